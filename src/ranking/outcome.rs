use crate::Mean;
use serde::Deserialize;
use serde::Serialize;

/// result of one judgment. ties pull the pair's means together but
/// contribute no edge to the tournament graph.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    AWins,
    BWins,
    Tie,
}

impl Outcome {
    pub const fn all() -> &'static [Self] {
        &[Self::AWins, Self::BWins, Self::Tie]
    }
    /// regression target for the logistic update
    pub const fn target(&self) -> Mean {
        match self {
            Self::AWins => 1.,
            Self::Tie => 0.5,
            Self::BWins => 0.,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::AWins => write!(f, "a_wins"),
            Self::BWins => write!(f, "b_wins"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

impl crate::Arbitrary for Outcome {
    fn random() -> Self {
        use rand::prelude::IndexedRandom;
        let ref mut rng = rand::rng();
        Self::all().choose(rng).copied().expect("outcomes are non-empty")
    }
}
