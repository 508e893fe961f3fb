use super::outcome::Outcome;
use crate::Weight;
use serde::Deserialize;
use serde::Serialize;

/// five-point graded verdict. projects surjectively onto Outcome (both
/// "much" variants are still wins, "equal" is a tie) and carries a
/// weight that scales the mean step of the bayesian update.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    AMuchBetter,
    ABetter,
    Equal,
    BBetter,
    BMuchBetter,
}

impl Strength {
    pub const fn all() -> &'static [Self] {
        &[
            Self::AMuchBetter,
            Self::ABetter,
            Self::Equal,
            Self::BBetter,
            Self::BMuchBetter,
        ]
    }
    /// projection onto the binary outcome
    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::AMuchBetter | Self::ABetter => Outcome::AWins,
            Self::Equal => Outcome::Tie,
            Self::BBetter | Self::BMuchBetter => Outcome::BWins,
        }
    }
    /// how hard this verdict pushes the means apart
    pub const fn weight(&self) -> Weight {
        match self {
            Self::AMuchBetter | Self::BMuchBetter => crate::WEIGHT_MUCH,
            Self::ABetter | Self::BBetter => crate::WEIGHT_NORMAL,
            Self::Equal => crate::WEIGHT_EQUAL,
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::AMuchBetter => write!(f, "a_much_better"),
            Self::ABetter => write!(f, "a_better"),
            Self::Equal => write!(f, "equal"),
            Self::BBetter => write!(f, "b_better"),
            Self::BMuchBetter => write!(f, "b_much_better"),
        }
    }
}

impl crate::Arbitrary for Strength {
    fn random() -> Self {
        use rand::prelude::IndexedRandom;
        let ref mut rng = rand::rng();
        Self::all().choose(rng).copied().expect("strengths are non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn much_outweighs_normal_outweighs_nothing() {
        assert!(Strength::AMuchBetter.weight() > Strength::ABetter.weight());
        assert!(Strength::BMuchBetter.weight() > Strength::BBetter.weight());
        assert!(Strength::ABetter.weight() >= Strength::Equal.weight());
        assert!(Strength::Equal.weight() > 0.);
    }

    #[test]
    fn projection_is_surjective() {
        for outcome in Outcome::all() {
            assert!(Strength::all().iter().any(|s| s.outcome() == *outcome));
        }
    }
}
