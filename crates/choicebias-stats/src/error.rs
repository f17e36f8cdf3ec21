use serde::Serialize;

/// A statistic that cannot be computed for the given input.
///
/// These are recoverable: callers carry them alongside successful results
/// instead of propagating `NaN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatError {
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },
    #[error("invalid expected distribution: {reason}")]
    InvalidExpected { reason: String },
}

impl StatError {
    pub fn insufficient(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    pub fn invalid_expected(reason: impl Into<String>) -> Self {
        Self::InvalidExpected {
            reason: reason.into(),
        }
    }
}
