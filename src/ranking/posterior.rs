use super::config::Config;
use super::outcome::Outcome;
use crate::Deviation;
use crate::Mean;
use crate::Weight;
use serde::Deserialize;
use serde::Serialize;

/// current belief about an item's latent strength on one dimension.
/// fresh items start at the configured prior; every judgment an item
/// takes part in shrinks its spread, never grows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posterior {
    pub mu: Mean,
    pub sigma: Deviation,
}

impl Default for Posterior {
    fn default() -> Self {
        Self {
            mu: crate::PRIOR_MEAN,
            sigma: crate::PRIOR_VARIANCE.sqrt(),
        }
    }
}

impl Posterior {
    /// one logistic bradley-terry step over a judged pair, moment
    /// matched. pure and total over finite inputs: the logistic
    /// saturates to exactly 0 or 1 for extreme mean gaps, and the
    /// variance floor catches the shrink factor going negative. the
    /// strength weight scales the mean step only — a graded verdict is a
    /// larger delta, not a more certain observation.
    pub fn update(
        a: Self,
        b: Self,
        outcome: Outcome,
        weight: Weight,
        config: &Config,
    ) -> (Self, Self) {
        let y = outcome.target();
        let p = Self::logistic(a.mu - b.mu);
        let delta = y - p;
        let v = (p * (1. - p)).max(crate::OUTCOME_VARIANCE_MIN);
        let d = (1. + config.logistic_scale * v).sqrt();
        let (va, vb) = (a.sigma * a.sigma, b.sigma * b.sigma);
        let a = Self {
            mu: a.mu + weight * va * delta / d,
            sigma: Self::shrink(va, v, config),
        };
        let b = Self {
            mu: b.mu - weight * vb * delta / d,
            sigma: Self::shrink(vb, v, config),
        };
        (a, b)
    }

    /// posterior spread after observing outcome variance v, floored at κ
    fn shrink(s2: f64, v: f64, config: &Config) -> Deviation {
        (s2 * (1. - s2 * v / (1. + config.logistic_scale * v)))
            .max(config.variance_floor)
            .sqrt()
    }

    /// win probability for a mean gap. f64 exp saturates to ±inf, which
    /// lands extreme gaps on exactly 0 or 1.
    fn logistic(x: f64) -> f64 {
        1. / (1. + (-x).exp())
    }
}

impl std::fmt::Display for Posterior {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "μ {:+.3} σ {:.3}", self.mu, self.sigma)
    }
}

impl crate::Arbitrary for Posterior {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        Self {
            mu: rng.random_range(-3.0..3.0),
            sigma: rng.random_range(0.1..1.0),
        }
    }
}
