//! Errors raised at ingestion and configuration time.
//!
//! Statistical edge cases are not errors here; they travel inside results as
//! [`choicebias_stats::StatError`].

/// A [`SelectionRecord`](crate::SelectionRecord) broke its invariant.
///
/// This indicates a bug in whatever produced the records. The engine does not
/// try to repair or reinterpret them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainViolation {
    #[error("record {index}: position {position} is outside a presentation of {len} options")]
    PositionOutOfRange {
        index: usize,
        position: usize,
        len: usize,
    },
    #[error(
        "record {index}: presentation_order[{position}] is {presented:?} but the selected category is {selected:?}"
    )]
    CategoryMismatch {
        index: usize,
        position: usize,
        presented: String,
        selected: String,
    },
    #[error("record {index}: position {position} is outside the analysed domain 0..{position_count}")]
    PositionOutsideDomain {
        index: usize,
        position: usize,
        position_count: usize,
    },
    #[error("position count must be at least 1")]
    InvalidPositionCount,
}

/// Invalid [`AnalysisConfig`](crate::AnalysisConfig) value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("position_count must be at least 1")]
    ZeroPositions,
    #[error("{name} must be a finite positive number, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("uniform_entropy_threshold must lie in (0, 1], got {0}")]
    InvalidEntropyThreshold(f64),
    #[error("strong_bias_threshold ({strong}) must not be below bias_threshold ({bias})")]
    StrongBelowBias { bias: f64, strong: f64 },
}
