use super::mode::Mode;
use super::outcome::Outcome;
use super::strength::Strength;
use serde::Deserialize;
use serde::Serialize;

/// submit-time input: either a plain outcome or a graded strength.
/// must agree with the project mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Binary(Outcome),
    Graded(Strength),
}

impl Verdict {
    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::Binary(outcome) => *outcome,
            Self::Graded(strength) => strength.outcome(),
        }
    }
    pub const fn strength(&self) -> Option<Strength> {
        match self {
            Self::Binary(_) => None,
            Self::Graded(strength) => Some(*strength),
        }
    }
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Binary(_) => Mode::Binary,
            Self::Graded(_) => Mode::Graded,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Binary(outcome) => write!(f, "{}", outcome),
            Self::Graded(strength) => write!(f, "{}", strength),
        }
    }
}
