use super::graph::Tournament;
use crate::Confidence;
use crate::Mean;
use crate::ranking::item::Item;
use crate::ranking::posterior::Posterior;
use petgraph::visit::Dfs;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// everything the judgment stream proves, directly or through chains:
/// the reachability relation of the tournament over the ambient item
/// set. a pair ordered in both directions still counts as known — the
/// contradiction itself is the cycle detector's business.
pub struct Knowledge {
    reach: BTreeMap<Item, BTreeSet<Item>>,
    unknown: Vec<(Item, Item)>,
    n: usize,
}

impl Knowledge {
    /// reachability by dfs from every vertex, self-pairs excluded.
    /// equivalent to expanding the direct relation to its transitive
    /// fixpoint, one source at a time.
    pub fn new(items: &BTreeSet<Item>, tournament: &Tournament) -> Self {
        let graph = tournament.graph();
        let mut reach = BTreeMap::new();
        for &source in items {
            let mut beaten = BTreeSet::new();
            if graph.contains_node(source) {
                let mut dfs = Dfs::new(graph, source);
                while let Some(found) = dfs.next(graph) {
                    if found != source {
                        beaten.insert(found);
                    }
                }
            }
            reach.insert(source, beaten);
        }
        let mut unknown = Vec::new();
        let sorted = items.iter().copied().collect::<Vec<_>>();
        for (i, &a) in sorted.iter().enumerate() {
            for &b in sorted[i + 1..].iter() {
                let known = reach.get(&a).map(|r| r.contains(&b)).unwrap_or(false)
                    || reach.get(&b).map(|r| r.contains(&a)).unwrap_or(false);
                if !known {
                    unknown.push((a, b));
                }
            }
        }
        Self {
            reach,
            unknown,
            n: items.len(),
        }
    }

    /// does the stream prove a beats b, possibly through intermediaries?
    pub fn proves(&self, a: Item, b: Item) -> bool {
        self.reach
            .get(&a)
            .map(|beaten| beaten.contains(&b))
            .unwrap_or(false)
    }

    /// is the ordering of {a, b} determined in either direction?
    pub fn knows(&self, a: Item, b: Item) -> bool {
        self.proves(a, b) || self.proves(b, a)
    }

    /// all proven (winner, loser) orderings, ascending
    pub fn ordered(&self) -> Vec<(Item, Item)> {
        self.reach
            .iter()
            .flat_map(|(&winner, beaten)| beaten.iter().map(move |&loser| (winner, loser)))
            .collect()
    }

    /// undetermined unordered pairs, ascending; the selector's search space
    pub fn unknown(&self) -> &[(Item, Item)] {
        &self.unknown
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// unordered pairs over the item set
    pub fn total(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    /// unordered pairs whose ordering is determined
    pub fn known(&self) -> usize {
        self.total() - self.unknown.len()
    }

    /// unordered pairs still undetermined
    pub fn uncertain(&self) -> usize {
        self.unknown.len()
    }

    /// fraction of orderings determined; zero until there are two items
    pub fn coverage(&self) -> Confidence {
        match self.total() {
            0 => 0.,
            total => self.known() as Confidence / total as Confidence,
        }
    }

    /// total order consistent with every proven ordering, refined by
    /// posterior mean where the stream proves nothing. an item becomes
    /// placeable once no unplaced rival is proven above it, and the
    /// placeable item with the highest mean goes next, smaller ids
    /// breaking exact ties. a contradiction can leave nobody placeable;
    /// the best remaining mean then breaks the deadlock.
    pub fn order(&self, posteriors: &BTreeMap<Item, Posterior>) -> Vec<Item> {
        let mut superiors = self
            .reach
            .keys()
            .map(|&item| (item, 0usize))
            .collect::<BTreeMap<_, _>>();
        for beaten in self.reach.values() {
            for loser in beaten {
                if let Some(count) = superiors.get_mut(loser) {
                    *count += 1;
                }
            }
        }
        let mut remaining = self.reach.keys().copied().collect::<BTreeSet<_>>();
        let mut placed = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let placeable = remaining
                .iter()
                .copied()
                .filter(|item| superiors[item] == 0);
            let next = Self::best(placeable, posteriors).unwrap_or_else(|| {
                Self::best(remaining.iter().copied(), posteriors).expect("remaining is non-empty")
            });
            placed.push(next);
            remaining.remove(&next);
            for loser in &self.reach[&next] {
                if remaining.contains(loser) {
                    *superiors.get_mut(loser).expect("remaining items are tracked") -= 1;
                }
            }
        }
        placed
    }

    /// highest posterior mean wins, first (smallest) id on exact ties
    fn best<I>(candidates: I, posteriors: &BTreeMap<Item, Posterior>) -> Option<Item>
    where
        I: Iterator<Item = Item>,
    {
        let mut best: Option<(Item, Mean)> = None;
        for item in candidates {
            let mu = posteriors.get(&item).map(|p| p.mu).unwrap_or_default();
            if best.map(|(_, top)| mu > top).unwrap_or(true) {
                best = Some((item, mu));
            }
        }
        best.map(|(item, _)| item)
    }
}
