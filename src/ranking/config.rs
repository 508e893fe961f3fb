use super::error::RankError;
use super::posterior::Posterior;
use crate::Mean;
use serde::Deserialize;
use serde::Serialize;

/// how the next pair is chosen. `entropy` is the hybrid
/// uncertainty × closeness × connectivity score and the default;
/// `uncertainty_sampling` looks at combined spread alone; `random`
/// draws uniformly from the undetermined pairs.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Random,
    UncertaintySampling,
    ExpectedValueOfInformation,
    #[default]
    Entropy,
}

impl TryFrom<&str> for Strategy {
    type Error = RankError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "random" => Ok(Self::Random),
            "uncertainty_sampling" => Ok(Self::UncertaintySampling),
            "expected_value_of_information" => Ok(Self::ExpectedValueOfInformation),
            "entropy" => Ok(Self::Entropy),
            other => Err(RankError::InvalidConfig(format!(
                "unknown selection strategy: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::UncertaintySampling => write!(f, "uncertainty_sampling"),
            Self::ExpectedValueOfInformation => write!(f, "expected_value_of_information"),
            Self::Entropy => write!(f, "entropy"),
        }
    }
}

/// per-dimension tuning for the bayesian model and pair selection.
/// validated once at engine construction; the inference layer then
/// trusts it unconditionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub prior_mean: Mean,
    pub prior_variance: f64,
    pub logistic_scale: f64,
    pub variance_floor: f64,
    /// reserved: mean gap under which a tie is considered unsurprising
    pub tie_tolerance: f64,
    pub strategy: Strategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prior_mean: crate::PRIOR_MEAN,
            prior_variance: crate::PRIOR_VARIANCE,
            logistic_scale: crate::LOGISTIC_SCALE,
            variance_floor: crate::VARIANCE_FLOOR,
            tie_tolerance: crate::TIE_TOLERANCE,
            strategy: Strategy::Entropy,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), RankError> {
        if !(self.prior_variance > 0.) {
            return Err(RankError::InvalidConfig(format!(
                "prior variance must be positive, got {}",
                self.prior_variance
            )));
        }
        if !(self.variance_floor > 0.) {
            return Err(RankError::InvalidConfig(format!(
                "variance floor must be positive, got {}",
                self.variance_floor
            )));
        }
        if !(self.logistic_scale > 0.) {
            return Err(RankError::InvalidConfig(format!(
                "logistic scale must be positive, got {}",
                self.logistic_scale
            )));
        }
        Ok(())
    }

    /// fresh posterior at the configured prior
    pub fn prior(&self) -> Posterior {
        Posterior {
            mu: self.prior_mean,
            sigma: self.prior_variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn nonpositive_variance_rejected() {
        let mut config = Config::default();
        config.prior_variance = 0.;
        assert!(config.validate().is_err());
        let mut config = Config::default();
        config.variance_floor = -1.;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_strategy_rejected() {
        assert!(Strategy::try_from("entropy").is_ok());
        assert!(Strategy::try_from("gradient_descent").is_err());
    }
}
