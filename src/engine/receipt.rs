use crate::Deviation;
use crate::inference::cycles::Inconsistency;
use crate::ranking::judgment::Judgment;
use crate::ranking::posterior::Posterior;
use serde::Serialize;

/// what a submit hands back: the stored judgment, both refreshed
/// posteriors, the dimension's refreshed average spread, and the
/// inconsistency picture for immediate ui feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub judgment: Judgment,
    pub a: Posterior,
    pub b: Posterior,
    pub avg_sigma: Deviation,
    pub inconsistency: Inconsistency,
}
