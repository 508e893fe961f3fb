use serde::Deserialize;
use serde::Serialize;

/// opaque stable identifier for a ranked item. callers own the mapping
/// from their domain keys (uuids, database rows, file paths) onto these
/// compact ids; the engine only ever compares them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item(u64);

impl From<u64> for Item {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl From<Item> for u64 {
    fn from(item: Item) -> Self {
        item.0
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl crate::Arbitrary for Item {
    fn random() -> Self {
        use rand::Rng;
        Self(rand::rng().random())
    }
}
