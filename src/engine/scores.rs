use crate::ranking::dimension::Dimension;
use crate::ranking::item::Item;
use crate::ranking::posterior::Posterior;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// the posterior store seam: one (μ, σ) cell per (item, dimension).
/// the engine stages its writes and commits them at the end of each
/// operation, so implementations never observe half an update.
pub trait Scores {
    fn get(&self, item: Item, dimension: Dimension) -> Option<Posterior>;
    fn set(&mut self, item: Item, dimension: Dimension, posterior: Posterior);
    /// drop every dimension's cell for an item leaving scope
    fn purge(&mut self, item: Item);
    /// current posteriors of one dimension restricted to the given items
    fn snapshot(&self, dimension: Dimension, items: &BTreeSet<Item>) -> BTreeMap<Item, Posterior> {
        items
            .iter()
            .map(|&item| (item, self.get(item, dimension).unwrap_or_default()))
            .collect()
    }
}

/// in-memory store over a btree keyed by (item, dimension)
#[derive(Debug, Default)]
pub struct Posteriors(BTreeMap<(Item, Dimension), Posterior>);

impl Scores for Posteriors {
    fn get(&self, item: Item, dimension: Dimension) -> Option<Posterior> {
        self.0.get(&(item, dimension)).copied()
    }

    fn set(&mut self, item: Item, dimension: Dimension, posterior: Posterior) {
        self.0.insert((item, dimension), posterior);
    }

    fn purge(&mut self, item: Item) {
        for &dimension in Dimension::all() {
            self.0.remove(&(item, dimension));
        }
    }
}
