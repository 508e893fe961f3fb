use serde::Deserialize;
use serde::Serialize;

/// independent axis on which items are ranked. dimensions share no
/// state: posteriors, judgments, graphs, and aggregates are all scoped
/// to exactly one of them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Complexity,
    Value,
}

impl Dimension {
    pub const fn all() -> &'static [Self] {
        &[Self::Complexity, Self::Value]
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Complexity => write!(f, "complexity"),
            Self::Value => write!(f, "value"),
        }
    }
}

impl crate::Arbitrary for Dimension {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..2) {
            0 => Self::Complexity,
            _ => Self::Value,
        }
    }
}
