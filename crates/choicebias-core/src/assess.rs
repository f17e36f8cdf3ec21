//! Composite randomness assessment over the category and position attributes.

use choicebias_stats::{
    DispersionResult, EntropyResult, FrequencyDistribution, GoodnessOfFitResult,
    RunsInterpretation, RunsTestResult, StatError, chi_square, dispersion, runs_test,
    shannon_entropy,
};
use serde::Serialize;

use crate::aggregate::{Attribute, Category, Position, category_domain, frequencies, sequence};
use crate::config::AnalysisConfig;
use crate::record::SelectionHistory;

/// A statistic, or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Measured<T> {
    Computed { value: T },
    Undefined { reason: StatError },
}

impl<T> Measured<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Computed { value } => Some(value),
            Self::Undefined { .. } => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }

    pub fn as_result(&self) -> Result<&T, &StatError> {
        match self {
            Self::Computed { value } => Ok(value),
            Self::Undefined { reason } => Err(reason),
        }
    }
}

impl<T> From<Result<T, StatError>> for Measured<T> {
    fn from(result: Result<T, StatError>) -> Self {
        match result {
            Ok(value) => Self::Computed { value },
            Err(reason) => Self::Undefined { reason },
        }
    }
}

/// Everything measured for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeAnalysis<K: Ord> {
    pub attribute: &'static str,
    /// Number of values the attribute can take.
    pub domain_size: usize,
    /// Observed values only.
    pub frequencies: FrequencyDistribution<K>,
    /// Over the observed values.
    pub entropy: Measured<EntropyResult>,
    /// Over the zero-filled attribute domain.
    pub dispersion: Measured<DispersionResult>,
    /// Against a uniform distribution over the observed values.
    pub goodness_of_fit: Measured<GoodnessOfFitResult>,
    pub runs: RunsTestResult,
}

impl<K: Ord> AttributeAnalysis<K> {
    /// Normalized entropy above `threshold`; undefined entropy never qualifies.
    pub fn is_uniform(&self, threshold: f64) -> bool {
        self.entropy
            .value()
            .is_some_and(|e| e.normalized_entropy > threshold)
    }

    /// Positive evidence of an uneven distribution: measured entropy at or
    /// below `threshold`, or every trial on one value of a wider domain.
    /// No trials is no evidence.
    pub fn is_skewed(&self, threshold: f64) -> bool {
        match self.entropy.value() {
            Some(e) => e.normalized_entropy <= threshold,
            None => self.frequencies.total() > 0 && self.domain_size > 1,
        }
    }
}

/// The 2×2 outcome of distribution uniformity and sequential independence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    UniformAndIndependent,
    UniformButPatterned,
    BiasedButIndependent,
    BiasedAndPatterned,
}

impl Verdict {
    pub fn from_flags(uniform: bool, independent: bool) -> Self {
        match (uniform, independent) {
            (true, true) => Self::UniformAndIndependent,
            (true, false) => Self::UniformButPatterned,
            (false, true) => Self::BiasedButIndependent,
            (false, false) => Self::BiasedAndPatterned,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UniformAndIndependent => {
                "Selections look random: categories and positions are evenly distributed and show no sequential pattern"
            }
            Self::UniformButPatterned => {
                "Selections are evenly distributed, but their order shows a sequential pattern"
            }
            Self::BiasedButIndependent => {
                "Selections are unevenly distributed, although successive trials look independent"
            }
            Self::BiasedAndPatterned => {
                "Selections are unevenly distributed and their order shows a sequential pattern"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RandomnessAssessment {
    pub trials: usize,
    pub category: AttributeAnalysis<String>,
    pub position: AttributeAnalysis<usize>,
    pub is_uniform_distribution: bool,
    pub is_sequentially_independent: bool,
    /// Either attribute is measurably skewed.
    pub has_distribution_skew: bool,
    /// Either runs test was computed and rejected independence.
    pub has_sequential_pattern: bool,
    pub verdict: Verdict,
    pub interpretation: String,
}

/// Run entropy, dispersion, goodness of fit and the runs test for one attribute.
pub fn analyze_attribute<A: Attribute>(
    history: &SelectionHistory,
    domain: impl IntoIterator<Item = A::Key>,
    config: &AnalysisConfig,
) -> AttributeAnalysis<A::Key> {
    let observed = frequencies::<A>(history);
    let filled = observed.clone().with_domain(domain);
    let values = sequence::<A>(history);

    AttributeAnalysis {
        attribute: A::NAME,
        domain_size: filled.len(),
        entropy: shannon_entropy(&observed).into(),
        dispersion: dispersion(&filled).into(),
        goodness_of_fit: chi_square(&observed, None).into(),
        runs: runs_test(&values, &config.runs),
        frequencies: observed,
    }
}

/// Combine both attributes into one verdict.
pub fn assess(history: &SelectionHistory, config: &AnalysisConfig) -> RandomnessAssessment {
    let category = analyze_attribute::<Category>(history, category_domain(history), config);
    let position = analyze_attribute::<Position>(history, 0..history.position_count(), config);

    let is_uniform_distribution = category.is_uniform(config.uniform_entropy_threshold)
        && position.is_uniform(config.uniform_entropy_threshold);
    let is_sequentially_independent = category.runs.is_random && position.runs.is_random;
    let verdict = Verdict::from_flags(is_uniform_distribution, is_sequentially_independent);
    let has_distribution_skew = category.is_skewed(config.uniform_entropy_threshold)
        || position.is_skewed(config.uniform_entropy_threshold);
    let has_sequential_pattern =
        category.runs.interpretation.is_pattern() || position.runs.interpretation.is_pattern();
    let order_testable = [&category.runs, &position.runs]
        .iter()
        .all(|r| r.interpretation != RunsInterpretation::InsufficientData);

    let interpretation = if order_testable {
        verdict.as_str().to_string()
    } else {
        let distribution = if history.is_empty() {
            "No selections were recorded"
        } else if is_uniform_distribution {
            "Selections are evenly distributed"
        } else {
            "Selections are unevenly distributed"
        };
        format!(
            "{distribution}; the order test was not computable with fewer than {} trials",
            config.runs.min_trials.max(2)
        )
    };

    log::debug!(
        "assessed {} trials: uniform={is_uniform_distribution}, independent={is_sequentially_independent}",
        history.len()
    );

    RandomnessAssessment {
        trials: history.len(),
        category,
        position,
        is_uniform_distribution,
        is_sequentially_independent,
        has_distribution_skew,
        has_sequential_pattern,
        verdict,
        interpretation,
    }
}
