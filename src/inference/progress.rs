use super::closure::Knowledge;
use super::cycles::Cycles;
use crate::Confidence;
use crate::Deviation;
use crate::ranking::dimension::Dimension;
use crate::ranking::judgment::Judgment;
use serde::Serialize;
use std::collections::BTreeSet;

/// ui-facing snapshot of how close a dimension's ranking is to done,
/// and why. transitive coverage is the primary signal — the ranking is
/// finished when every ordering is implied, not when every pair has
/// been asked — lightly boosted by bayesian certainty and discounted
/// for cycles.
#[derive(Debug, Clone, Serialize)]
pub struct Progress {
    pub dimension: Dimension,
    pub target_certainty: Confidence,
    pub direct_coverage: Confidence,
    pub transitive_coverage: Confidence,
    pub known_pairs: usize,
    pub uncertain_pairs: usize,
    pub unique_pairs_compared: usize,
    pub total_possible_pairs: usize,
    pub bayesian_confidence: Confidence,
    pub consistency_score: Confidence,
    pub effective_confidence: Confidence,
    pub progress_percent: f64,
    pub judgments_done: usize,
    pub judgments_remaining: usize,
    pub theoretical_minimum: usize,
    pub practical_estimate: usize,
    pub avg_sigma: Deviation,
    pub cycle_count: usize,
}

impl Progress {
    pub fn measure(
        dimension: Dimension,
        target: Confidence,
        knowledge: &Knowledge,
        cycles: &Cycles,
        judgments: &[Judgment],
        avg_sigma: Deviation,
    ) -> Self {
        let total = knowledge.total();
        let done = judgments.iter().filter(|j| j.live()).count();
        let unique = judgments
            .iter()
            .filter(|j| j.live())
            .map(|j| j.key())
            .collect::<BTreeSet<_>>()
            .len();
        let direct = match total {
            0 => 0.,
            total => unique as Confidence / total as Confidence,
        };
        let transitive = knowledge.coverage();
        let bayesian = (1. - avg_sigma).clamp(0., 1.);
        let consistency = (1. - cycles.count() as Confidence / unique.max(1) as Confidence)
            .max(crate::CONSISTENCY_FLOOR);
        let effective = if transitive >= 1. && consistency >= 1. {
            1.
        } else if transitive >= 1. {
            consistency.min(crate::CYCLE_CAP)
        } else {
            (transitive + crate::BAYES_BOOST * bayesian).min(1.) * consistency
        };
        let uncertain = knowledge.uncertain();
        // each judgment settles roughly two pairs once transitivity kicks in
        let remaining = match effective >= target {
            true => 0,
            false => uncertain.div_ceil(2),
        };
        Self {
            dimension,
            target_certainty: target,
            direct_coverage: direct,
            transitive_coverage: transitive,
            known_pairs: knowledge.known(),
            uncertain_pairs: uncertain,
            unique_pairs_compared: unique,
            total_possible_pairs: total,
            bayesian_confidence: bayesian,
            consistency_score: consistency,
            effective_confidence: effective,
            progress_percent: effective * 100.,
            judgments_done: done,
            judgments_remaining: remaining,
            theoretical_minimum: Self::theoretical_minimum(knowledge.n()),
            practical_estimate: Self::practical_estimate(knowledge.n(), target),
            avg_sigma,
            cycle_count: cycles.count(),
        }
    }

    /// ⌈log₂(n!)⌉, the information-theoretic floor on comparisons for a
    /// total order. exact digit sums up to the cutoff, stirling beyond.
    pub fn theoretical_minimum(n: usize) -> usize {
        if n < 2 {
            0
        } else if n <= crate::STIRLING_CUTOFF {
            (2..=n)
                .map(|k| (k as f64).log2())
                .sum::<f64>()
                .ceil() as usize
        } else {
            let n = n as f64;
            let bits = n * n.log2() - n * std::f64::consts::LOG2_E
                + 0.5 * (2. * std::f64::consts::PI * n).log2();
            bits.ceil() as usize
        }
    }

    /// observed cost of reaching a target coverage with the hybrid
    /// selector, ≈ (0.5 + 0.3·τ) · n·log₂n
    pub fn practical_estimate(n: usize, target: Confidence) -> usize {
        if n < 2 {
            return 0;
        }
        let factor = crate::COVERAGE_BASE + crate::COVERAGE_SLOPE * target;
        (factor * n as f64 * (n as f64).log2()) as usize
    }
}
