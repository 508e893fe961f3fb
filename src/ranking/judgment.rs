use super::dimension::Dimension;
use super::item::Item;
use super::outcome::Outcome;
use super::strength::Strength;
use crate::Weight;
use serde::Deserialize;
use serde::Serialize;

/// sequence number identifying a judgment row
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JudgmentId(pub u64);

impl std::fmt::Display for JudgmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "j{}", self.0)
    }
}

/// creation stamp issued by the journal. strictly increasing, so it
/// totally orders the log and fixes the canonical replay order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Stamp(pub u64);

/// who retracted a judgment
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Actor(pub u64);

/// why a judgment left the live stream. retracted rows stay in the
/// journal for audit and are excluded from every inference path.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retraction {
    Deleted(Actor),
    Undone,
    Reset,
}

/// one recorded human decision between two items on one dimension.
/// immutable after creation except for the retraction mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub id: JudgmentId,
    pub dimension: Dimension,
    pub item_a: Item,
    pub item_b: Item,
    pub outcome: Outcome,
    pub strength: Option<Strength>,
    pub created_at: Stamp,
    pub retracted: Option<Retraction>,
}

impl Judgment {
    /// (winner, loser) for decisive outcomes; ties order nothing
    pub const fn winner(&self) -> Option<(Item, Item)> {
        match self.outcome {
            Outcome::AWins => Some((self.item_a, self.item_b)),
            Outcome::BWins => Some((self.item_b, self.item_a)),
            Outcome::Tie => None,
        }
    }
    /// mean-step scale: the graded strength if recorded, else unit
    pub fn weight(&self) -> Weight {
        self.strength
            .map(|s| s.weight())
            .unwrap_or(crate::WEIGHT_NORMAL)
    }
    pub const fn live(&self) -> bool {
        self.retracted.is_none()
    }
    /// unordered pair key, smaller item first
    pub fn key(&self) -> (Item, Item) {
        if self.item_a <= self.item_b {
            (self.item_a, self.item_b)
        } else {
            (self.item_b, self.item_a)
        }
    }
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.winner() {
            Some((winner, loser)) => write!(f, "{} > {} [{}]", winner, loser, self.dimension),
            None => write!(f, "{} = {} [{}]", self.item_a, self.item_b, self.dimension),
        }
    }
}
