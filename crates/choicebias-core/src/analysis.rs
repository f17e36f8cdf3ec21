//! One-call bias report over a selection history.
//!
//! [`full_analysis`] runs the composite randomness assessment together with
//! the position, edge and category×position detectors and bundles the
//! results in a single serializable [`BiasReport`].

use serde::Serialize;

use crate::assess::{Measured, RandomnessAssessment, assess};
use crate::config::AnalysisConfig;
use crate::correlation::{CorrelationResult, category_position_correlation};
use crate::position::{EdgeBiasResult, PositionBiasResult, edge_bias, position_bias};
use crate::record::SelectionHistory;

/// Full per-history analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasReport {
    pub trial_count: usize,
    pub position_count: usize,
    pub assessment: RandomnessAssessment,
    pub position_bias: Measured<PositionBiasResult>,
    pub edge_bias: Measured<EdgeBiasResult>,
    pub correlation: Measured<CorrelationResult>,
}

impl BiasReport {
    /// True when any detector flagged bias, a distribution is measurably
    /// skewed, or a computed runs test rejected independence. Statistics
    /// that could not be computed never count as a finding.
    pub fn bias_detected(&self) -> bool {
        self.assessment.has_distribution_skew
            || self.assessment.has_sequential_pattern
            || self.position_bias.value().is_some_and(|r| r.has_bias)
            || self.edge_bias.value().is_some_and(|r| r.has_edge_bias)
            || self
                .correlation
                .value()
                .is_some_and(|r| r.has_significant_correlation)
    }
}

/// Run every analysis on `history`.
pub fn full_analysis(history: &SelectionHistory, config: &AnalysisConfig) -> BiasReport {
    let report = BiasReport {
        trial_count: history.len(),
        position_count: history.position_count(),
        assessment: assess(history, config),
        position_bias: position_bias(history, config).into(),
        edge_bias: edge_bias(history, config).into(),
        correlation: category_position_correlation(history, config).into(),
    };
    log::debug!(
        "full analysis of {} trials: verdict={:?}, bias_detected={}",
        report.trial_count,
        report.assessment.verdict,
        report.bias_detected()
    );
    report
}
