use crate::ranking::item::Item;
use crate::ranking::judgment::Judgment;
use petgraph::graphmap::DiGraphMap;

/// directed winner → loser view over the live non-tie judgments of one
/// dimension. multi-edges collapse to one; contradictory judgments keep
/// both directions and surface downstream as a 2-cycle. rebuilt from
/// the journal on every call, so it holds no state between operations.
#[derive(Default)]
pub struct Tournament(DiGraphMap<Item, ()>);

impl<'a> FromIterator<&'a Judgment> for Tournament {
    fn from_iter<I: IntoIterator<Item = &'a Judgment>>(judgments: I) -> Self {
        let mut graph = DiGraphMap::new();
        for judgment in judgments.into_iter().filter(|j| j.live()) {
            if let Some((winner, loser)) = judgment.winner() {
                graph.add_edge(winner, loser, ());
            }
        }
        Self(graph)
    }
}

impl From<Vec<(Item, Item)>> for Tournament {
    fn from(edges: Vec<(Item, Item)>) -> Self {
        let mut graph = DiGraphMap::new();
        for (winner, loser) in edges {
            graph.add_edge(winner, loser, ());
        }
        Self(graph)
    }
}

impl Tournament {
    /// vertices with at least one judgment edge, ascending
    pub fn nodes(&self) -> Vec<Item> {
        let mut nodes = self.0.nodes().collect::<Vec<_>>();
        nodes.sort();
        nodes
    }
    /// direct losers to this item, ascending
    pub fn beats(&self, winner: Item) -> Vec<Item> {
        let mut losers = self.0.neighbors(winner).collect::<Vec<_>>();
        losers.sort();
        losers
    }
    pub fn contains(&self, winner: Item, loser: Item) -> bool {
        self.0.contains_edge(winner, loser)
    }
    /// every (winner, loser) edge, ascending
    pub fn edges(&self) -> Vec<(Item, Item)> {
        let mut edges = self
            .0
            .all_edges()
            .map(|(winner, loser, _)| (winner, loser))
            .collect::<Vec<_>>();
        edges.sort();
        edges
    }
    pub fn is_empty(&self) -> bool {
        self.0.edge_count() == 0
    }
    pub(crate) fn graph(&self) -> &DiGraphMap<Item, ()> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::dimension::Dimension;
    use crate::ranking::judgment::JudgmentId;
    use crate::ranking::judgment::Retraction;
    use crate::ranking::judgment::Stamp;
    use crate::ranking::outcome::Outcome;

    fn judged(n: u64, a: u64, b: u64, outcome: Outcome) -> Judgment {
        Judgment {
            id: JudgmentId(n),
            dimension: Dimension::Value,
            item_a: Item::from(a),
            item_b: Item::from(b),
            outcome,
            strength: None,
            created_at: Stamp(n),
            retracted: None,
        }
    }

    #[test]
    fn ties_contribute_no_edges() {
        let judgments = vec![judged(1, 0, 1, Outcome::Tie)];
        let tournament = judgments.iter().collect::<Tournament>();
        assert!(tournament.is_empty());
    }

    #[test]
    fn retracted_judgments_are_invisible() {
        let mut judgment = judged(1, 0, 1, Outcome::AWins);
        judgment.retracted = Some(Retraction::Undone);
        let judgments = vec![judgment];
        let tournament = judgments.iter().collect::<Tournament>();
        assert!(tournament.is_empty());
    }

    #[test]
    fn multi_edges_collapse() {
        let judgments = vec![
            judged(1, 0, 1, Outcome::AWins),
            judged(2, 0, 1, Outcome::AWins),
            judged(3, 1, 0, Outcome::BWins),
        ];
        let tournament = judgments.iter().collect::<Tournament>();
        assert!(tournament.edges() == vec![(Item::from(0), Item::from(1))]);
    }

    #[test]
    fn contradictions_keep_both_directions() {
        let judgments = vec![
            judged(1, 0, 1, Outcome::AWins),
            judged(2, 0, 1, Outcome::BWins),
        ];
        let tournament = judgments.iter().collect::<Tournament>();
        assert!(tournament.contains(Item::from(0), Item::from(1)));
        assert!(tournament.contains(Item::from(1), Item::from(0)));
    }

    #[test]
    fn loser_orientation_follows_outcome() {
        let judgments = vec![judged(1, 3, 7, Outcome::BWins)];
        let tournament = judgments.iter().collect::<Tournament>();
        assert!(tournament.beats(Item::from(7)) == vec![Item::from(3)]);
        assert!(tournament.beats(Item::from(3)).is_empty());
    }
}
