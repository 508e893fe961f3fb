#[cfg(feature = "cli")]
pub mod cli;

pub mod engine;
pub mod inference;
pub mod ranking;

/// dimensional analysis types
type Mean = f64;
type Deviation = f64;
type Weight = f64;
type Confidence = f64;

// bayesian bradley-terry parameters
const LOGISTIC_SCALE: f64 = std::f64::consts::PI / 8.;
const VARIANCE_FLOOR: f64 = 0.01;
const PRIOR_MEAN: Mean = 0.;
const PRIOR_VARIANCE: f64 = 1.;
const TIE_TOLERANCE: f64 = 0.1;
const OUTCOME_VARIANCE_MIN: f64 = 1e-10;

// graded strength weights. only the mean step scales with these;
// variance reduction is the same in binary and graded modes.
const WEIGHT_MUCH: Weight = 1.6;
const WEIGHT_NORMAL: Weight = 1.0;
const WEIGHT_EQUAL: Weight = 1.0;

// pair selection parameters
const CLOSENESS_SCALE: Mean = 2.0;
const BONUS_EXTEND: Confidence = 1.2;
const BONUS_LINK: Confidence = 1.1;
const BONUS_COLD: Confidence = 1.0;

// progress estimation parameters
const STIRLING_CUTOFF: usize = 20;
const COVERAGE_BASE: Confidence = 0.5;
const COVERAGE_SLOPE: Confidence = 0.3;
const BAYES_BOOST: Confidence = 0.05;
const CONSISTENCY_FLOOR: Confidence = 0.5;
const CYCLE_CAP: Confidence = 0.95;

/// trait for random generation, for property-style tests
/// and the random selection strategy
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize terminal logging for the cli
#[cfg(feature = "cli")]
pub fn init() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
