use super::closure::Knowledge;
use super::cycles::Cycles;
use crate::Confidence;
use crate::Deviation;
use crate::ranking::config::Config;
use crate::ranking::config::Strategy;
use crate::ranking::error::RankError;
use crate::ranking::item::Item;
use crate::ranking::judgment::Judgment;
use crate::ranking::posterior::Posterior;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// why the selector offered a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// highest expected information gain among undetermined pairs
    Active,
    /// re-judging this pair is the likeliest way to break a cycle
    Cycle,
}

/// what to ask next, or nothing left worth asking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Selection {
    Pair { a: Item, b: Item, reason: Reason },
    Complete,
}

/// weakest-link nomination: the cycle edge whose endpoints carry the
/// largest combined uncertainty, plus one containing cycle for context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub a: Item,
    pub b: Item,
    pub uncertainty: Deviation,
    pub cycle: Vec<Item>,
}

/// pick the next judgment for one dimension. modes in order: terminal
/// (target reached, or nothing undetermined, on a consistent graph),
/// cycle resolution, then active learning over the undetermined pairs.
/// ties in every scoring mode break toward the lexicographically
/// smallest pair, so a fixed item set selects reproducibly.
pub fn select(
    posteriors: &BTreeMap<Item, Posterior>,
    judgments: &[Judgment],
    knowledge: &Knowledge,
    cycles: &Cycles,
    target: Confidence,
    config: &Config,
) -> Result<Selection, RankError> {
    if knowledge.n() < 2 {
        return Err(RankError::TooFewItems(knowledge.n()));
    }
    if cycles.is_empty() {
        if target > 0. && knowledge.coverage() >= target {
            return Ok(Selection::Complete);
        }
        if knowledge.uncertain() == 0 {
            return Ok(Selection::Complete);
        }
    } else if let Some(resolution) = weakest_link(cycles, posteriors) {
        return Ok(Selection::Pair {
            a: resolution.a,
            b: resolution.b,
            reason: Reason::Cycle,
        });
    }
    Ok(match choose(posteriors, judgments, knowledge, config) {
        Some((a, b)) => Selection::Pair {
            a,
            b,
            reason: Reason::Active,
        },
        None => Selection::Complete,
    })
}

/// across every edge on any enumerated cycle, nominate the one whose
/// endpoints the model is least sure about
pub fn weakest_link(
    cycles: &Cycles,
    posteriors: &BTreeMap<Item, Posterior>,
) -> Option<Resolution> {
    let mut weakest: Option<Resolution> = None;
    for (winner, loser) in cycles.edges() {
        let (Some(w), Some(l)) = (posteriors.get(&winner), posteriors.get(&loser)) else {
            continue;
        };
        let uncertainty = w.sigma + l.sigma;
        if weakest
            .as_ref()
            .map(|best| uncertainty > best.uncertainty)
            .unwrap_or(true)
        {
            let cycle = cycles
                .containing(winner, loser)
                .cloned()
                .expect("the edge came off an enumerated cycle");
            weakest = Some(Resolution {
                a: winner,
                b: loser,
                uncertainty,
                cycle,
            });
        }
    }
    weakest
}

fn choose(
    posteriors: &BTreeMap<Item, Posterior>,
    judgments: &[Judgment],
    knowledge: &Knowledge,
    config: &Config,
) -> Option<(Item, Item)> {
    match config.strategy {
        Strategy::Random => {
            use rand::prelude::IndexedRandom;
            let ref mut rng = rand::rng();
            knowledge.unknown().choose(rng).copied()
        }
        Strategy::UncertaintySampling => {
            argmax(knowledge.unknown(), |&(a, b)| {
                spread(posteriors, a) + spread(posteriors, b)
            })
        }
        // evoi shares the hybrid score until it grows its own estimator
        Strategy::Entropy | Strategy::ExpectedValueOfInformation => {
            let seen = judgments
                .iter()
                .filter(|j| j.live())
                .flat_map(|j| [j.item_a, j.item_b])
                .collect::<BTreeSet<_>>();
            argmax(knowledge.unknown(), |&(a, b)| {
                score(
                    lookup(posteriors, a),
                    lookup(posteriors, b),
                    bonus(seen.contains(&a), seen.contains(&b)),
                )
            })
        }
    }
}

/// the hybrid information-gain score of one undetermined pair:
/// combined spread, damped by how far apart the means already sit,
/// boosted when the pair touches the judged component
fn score(a: Posterior, b: Posterior, bonus: Confidence) -> Confidence {
    let uncertainty = a.sigma + b.sigma;
    let gap = a.mu - b.mu;
    let closeness =
        (-(gap * gap) / (2. * crate::CLOSENESS_SCALE * crate::CLOSENESS_SCALE)).exp();
    uncertainty * closeness * bonus
}

/// extending a judged chain beats linking two judged chains beats a
/// cold start
fn bonus(a_seen: bool, b_seen: bool) -> Confidence {
    match (a_seen, b_seen) {
        (true, false) | (false, true) => crate::BONUS_EXTEND,
        (true, true) => crate::BONUS_LINK,
        (false, false) => crate::BONUS_COLD,
    }
}

fn lookup(posteriors: &BTreeMap<Item, Posterior>, item: Item) -> Posterior {
    posteriors.get(&item).copied().unwrap_or_default()
}

fn spread(posteriors: &BTreeMap<Item, Posterior>, item: Item) -> Deviation {
    lookup(posteriors, item).sigma
}

/// first strict maximum over the ascending pair order
fn argmax<F>(pairs: &[(Item, Item)], mut score: F) -> Option<(Item, Item)>
where
    F: FnMut(&(Item, Item)) -> Confidence,
{
    let mut best: Option<((Item, Item), Confidence)> = None;
    for pair in pairs {
        let scored = score(pair);
        if best.map(|(_, top)| scored > top).unwrap_or(true) {
            best = Some((*pair, scored));
        }
    }
    best.map(|(pair, _)| pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::graph::Tournament;

    fn items(n: u64) -> BTreeSet<Item> {
        (0..n).map(Item::from).collect()
    }

    fn pairs(edges: &[(u64, u64)]) -> Tournament {
        Tournament::from(
            edges
                .iter()
                .map(|&(w, l)| (Item::from(w), Item::from(l)))
                .collect::<Vec<_>>(),
        )
    }

    fn flat(items: &BTreeSet<Item>) -> BTreeMap<Item, Posterior> {
        items.iter().map(|&i| (i, Posterior::default())).collect()
    }

    fn pick(
        posteriors: &BTreeMap<Item, Posterior>,
        tournament: &Tournament,
        items: &BTreeSet<Item>,
        target: Confidence,
    ) -> Selection {
        let knowledge = Knowledge::new(items, tournament);
        let cycles = Cycles::from(tournament);
        select(posteriors, &[], &knowledge, &cycles, target, &Config::default())
            .expect("two or more items")
    }

    #[test]
    fn one_item_is_an_error() {
        let items = items(1);
        let knowledge = Knowledge::new(&items, &Tournament::default());
        let cycles = Cycles::from(&Tournament::default());
        let refusal = select(
            &flat(&items),
            &[],
            &knowledge,
            &cycles,
            1.,
            &Config::default(),
        );
        assert!(refusal == Err(RankError::TooFewItems(1)));
    }

    #[test]
    fn transitive_chain_completes_early() {
        let items = items(3);
        let selection = pick(&flat(&items), &pairs(&[(0, 1), (1, 2)]), &items, 1.);
        assert!(selection == Selection::Complete);
    }

    #[test]
    fn cycles_demand_resolution() {
        let items = items(3);
        let selection = pick(&flat(&items), &pairs(&[(0, 1), (1, 2), (2, 0)]), &items, 1.);
        match selection {
            Selection::Pair { reason, .. } => assert!(reason == Reason::Cycle),
            Selection::Complete => panic!("a cyclic graph is never complete"),
        }
    }

    #[test]
    fn never_offers_a_determined_pair() {
        let items = items(4);
        let tournament = pairs(&[(0, 1), (1, 2)]);
        let knowledge = Knowledge::new(&items, &tournament);
        match pick(&flat(&items), &tournament, &items, 1.) {
            Selection::Pair { a, b, reason } => {
                assert!(reason == Reason::Active);
                assert!(!knowledge.knows(a, b));
            }
            Selection::Complete => panic!("item 3 is still unplaced"),
        }
    }

    #[test]
    fn target_gate_halts_short_of_everything() {
        // 0 > 1 > 2 orders three of six pairs around item 3
        let items = items(4);
        let selection = pick(&flat(&items), &pairs(&[(0, 1), (1, 2)]), &items, 0.5);
        assert!(selection == Selection::Complete);
    }

    #[test]
    fn zero_target_means_exhaustive() {
        let items = items(4);
        let selection = pick(&flat(&items), &pairs(&[(0, 1), (1, 2)]), &items, 0.);
        assert!(matches!(selection, Selection::Pair { .. }));
    }

    #[test]
    fn weakest_link_blames_the_blurriest_edge() {
        let cycles = Cycles::from(&pairs(&[(0, 1), (1, 2), (2, 0)]));
        let mut posteriors = flat(&items(3));
        posteriors.insert(Item::from(2), Posterior { mu: 0., sigma: 2. });
        let resolution = weakest_link(&cycles, &posteriors).expect("a cycle exists");
        // edges (1,2) and (2,0) both touch item 2; (1,2) comes first
        assert!((resolution.a, resolution.b) == (Item::from(1), Item::from(2)));
        assert!(resolution.uncertainty == 3.);
        assert!(resolution.cycle == vec![Item::from(0), Item::from(1), Item::from(2)]);
    }

    #[test]
    fn uncertain_pairs_attract_attention() {
        let items = items(3);
        let mut posteriors = flat(&items);
        posteriors.insert(Item::from(0), Posterior { mu: 0., sigma: 0.2 });
        posteriors.insert(Item::from(1), Posterior { mu: 0., sigma: 0.2 });
        // all pairs unknown and equally close; (0, 2) and (1, 2) carry
        // more combined spread than (0, 1)
        match pick(&posteriors, &Tournament::default(), &items, 1.) {
            Selection::Pair { a, b, .. } => {
                assert!((a, b) == (Item::from(0), Item::from(2)));
            }
            Selection::Complete => panic!("nothing is known yet"),
        }
    }

    #[test]
    fn uncertainty_sampling_ignores_closeness() {
        // a distant pair with wide spread loses under the entropy score
        // but wins on raw uncertainty
        let items = items(3);
        let mut posteriors = flat(&items);
        posteriors.insert(Item::from(0), Posterior { mu: 0., sigma: 0.3 });
        posteriors.insert(Item::from(1), Posterior { mu: 0., sigma: 0.3 });
        posteriors.insert(Item::from(2), Posterior { mu: 5., sigma: 1. });
        let knowledge = Knowledge::new(&items, &Tournament::default());
        let cycles = Cycles::from(&Tournament::default());
        let entropy = select(&posteriors, &[], &knowledge, &cycles, 1., &Config::default())
            .expect("three items");
        let mut config = Config::default();
        config.strategy = Strategy::UncertaintySampling;
        let sampled =
            select(&posteriors, &[], &knowledge, &cycles, 1., &config).expect("three items");
        assert!(
            entropy
                == Selection::Pair {
                    a: Item::from(0),
                    b: Item::from(1),
                    reason: Reason::Active
                }
        );
        assert!(
            sampled
                == Selection::Pair {
                    a: Item::from(0),
                    b: Item::from(2),
                    reason: Reason::Active
                }
        );
    }

    #[test]
    fn random_strategy_stays_in_the_unknown_set() {
        let items = items(4);
        let tournament = pairs(&[(0, 1), (1, 2)]);
        let knowledge = Knowledge::new(&items, &tournament);
        let cycles = Cycles::from(&tournament);
        let mut config = Config::default();
        config.strategy = Strategy::Random;
        for _ in 0..20 {
            match select(&flat(&items), &[], &knowledge, &cycles, 1., &config)
                .expect("four items")
            {
                Selection::Pair { a, b, .. } => assert!(!knowledge.knows(a, b)),
                Selection::Complete => panic!("item 3 is still unplaced"),
            }
        }
    }

    #[test]
    fn connectivity_prefers_extending_a_chain() {
        // 0 > 1 recorded; of the remaining pairs, those touching the
        // judged component outscore the cold (2, 3) start
        let items = items(4);
        let judged = [Judgment {
            id: crate::ranking::judgment::JudgmentId(1),
            dimension: crate::ranking::dimension::Dimension::Value,
            item_a: Item::from(0),
            item_b: Item::from(1),
            outcome: crate::ranking::outcome::Outcome::AWins,
            strength: None,
            created_at: crate::ranking::judgment::Stamp(1),
            retracted: None,
        }];
        let tournament = judged.iter().collect::<Tournament>();
        let knowledge = Knowledge::new(&items, &tournament);
        let cycles = Cycles::from(&tournament);
        let selection = select(
            &flat(&items),
            &judged,
            &knowledge,
            &cycles,
            1.,
            &Config::default(),
        )
        .expect("four items");
        match selection {
            Selection::Pair { a, b, .. } => {
                assert!(a == Item::from(0) || a == Item::from(1) || b == Item::from(0) || b == Item::from(1));
            }
            Selection::Complete => panic!("five pairs are unknown"),
        }
    }
}
