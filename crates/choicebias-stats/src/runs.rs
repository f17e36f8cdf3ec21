//! Wald–Wolfowitz runs test for sequential independence.
//!
//! The sequence is binarized against its first value (`1` when equal, `0`
//! otherwise) and the number of maximal runs is compared with its expectation
//! under random ordering. Too few runs means clustering, too many means the
//! process alternates.

use serde::{Deserialize, Serialize};

/// Thresholds for [`runs_test`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunsTestConfig {
    /// Sequences shorter than this are reported as insufficient data.
    pub min_trials: usize,
    /// Two-sided |z| threshold. Used for both `is_random` and the
    /// interpretation, regardless of sample size.
    pub z_critical: f64,
}

impl Default for RunsTestConfig {
    fn default() -> Self {
        Self {
            min_trials: 10,
            z_critical: 1.96,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunsInterpretation {
    InsufficientData,
    AllIdentical,
    Random,
    Clustering,
    Alternating,
}

impl RunsInterpretation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientData => "not enough trials for a runs test",
            Self::AllIdentical => "every trial has the same value",
            Self::Random => "ordering is consistent with independent trials",
            Self::Clustering => "fewer runs than expected: values cluster together",
            Self::Alternating => "more runs than expected: values alternate too often",
        }
    }

    /// A computed outcome that contradicts independent trials.
    /// `InsufficientData` is not evidence either way.
    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            Self::AllIdentical | Self::Clustering | Self::Alternating
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunsTestResult {
    pub trials: usize,
    pub observed_runs: usize,
    /// Absent when the test is not computable.
    pub expected_runs: Option<f64>,
    /// Absent when the test is not computable.
    pub z_score: Option<f64>,
    pub is_random: bool,
    pub interpretation: RunsInterpretation,
}

impl RunsTestResult {
    fn not_computable(trials: usize, observed_runs: usize, why: RunsInterpretation) -> Self {
        Self {
            trials,
            observed_runs,
            expected_runs: None,
            z_score: None,
            is_random: false,
            interpretation: why,
        }
    }
}

/// Run the test over `values` in temporal order.
pub fn runs_test<T: PartialEq>(values: &[T], config: &RunsTestConfig) -> RunsTestResult {
    let trials = values.len();
    // Runs of the binarized sequence, not of the raw values: two different
    // non-reference values in a row belong to the same run.
    let binary: Vec<bool> = match values.first() {
        Some(reference) => values.iter().map(|v| v == reference).collect(),
        None => Vec::new(),
    };
    let binary_runs = count_runs(&binary);
    if trials < config.min_trials.max(2) {
        return RunsTestResult::not_computable(
            trials,
            binary_runs,
            RunsInterpretation::InsufficientData,
        );
    }

    let n1 = binary.iter().filter(|b| **b).count() as f64;
    let n2 = trials as f64 - n1;
    if n2 == 0.0 {
        return RunsTestResult::not_computable(trials, binary_runs, RunsInterpretation::AllIdentical);
    }

    let n = n1 + n2;
    let product = 2.0 * n1 * n2;
    let expected = 1.0 + product / n;
    let variance = product * (product - n) / (n * n * (n - 1.0));
    if variance <= 0.0 {
        return RunsTestResult::not_computable(trials, binary_runs, RunsInterpretation::AllIdentical);
    }
    let z = (binary_runs as f64 - expected) / variance.sqrt();

    let interpretation = if z.abs() < config.z_critical {
        RunsInterpretation::Random
    } else if z < 0.0 {
        RunsInterpretation::Clustering
    } else {
        RunsInterpretation::Alternating
    };

    RunsTestResult {
        trials,
        observed_runs: binary_runs,
        expected_runs: Some(expected),
        z_score: Some(z),
        is_random: interpretation == RunsInterpretation::Random,
        interpretation,
    }
}

/// Number of maximal blocks of equal adjacent values.
fn count_runs<T: PartialEq>(values: &[T]) -> usize {
    if values.is_empty() {
        return 0;
    }
    1 + values.windows(2).filter(|w| w[0] != w[1]).count()
}
