//! Tunable thresholds for the bias analyses.

use choicebias_stats::RunsTestConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of presentation slots.
pub const DEFAULT_POSITION_COUNT: usize = 4;

/// Thresholds shared by every detector. Missing fields in a deserialized
/// config fall back to [`AnalysisConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Size of the slot domain `0..position_count`.
    pub position_count: usize,
    /// Bias index or per-position |deviation| above which a position bias is reported.
    pub bias_threshold: f64,
    /// Bias index above which a position bias is called strong.
    pub strong_bias_threshold: f64,
    /// |deviation| at the first or last slot above which an edge bias is reported.
    pub edge_threshold: f64,
    /// |deviation| of a category×position cell above which it is significant.
    pub correlation_threshold: f64,
    /// Normalized entropy both attributes must exceed to count as uniform.
    pub uniform_entropy_threshold: f64,
    pub runs: RunsTestConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            position_count: DEFAULT_POSITION_COUNT,
            bias_threshold: 0.15,
            strong_bias_threshold: 0.30,
            edge_threshold: 0.15,
            correlation_threshold: 0.30,
            uniform_entropy_threshold: 0.95,
            runs: RunsTestConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_position_count(mut self, position_count: usize) -> Self {
        self.position_count = position_count;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.position_count == 0 {
            return Err(ConfigError::ZeroPositions);
        }
        let thresholds = [
            ("bias_threshold", self.bias_threshold),
            ("strong_bias_threshold", self.strong_bias_threshold),
            ("edge_threshold", self.edge_threshold),
            ("correlation_threshold", self.correlation_threshold),
            ("runs.z_critical", self.runs.z_critical),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.strong_bias_threshold < self.bias_threshold {
            return Err(ConfigError::StrongBelowBias {
                bias: self.bias_threshold,
                strong: self.strong_bias_threshold,
            });
        }
        let h = self.uniform_entropy_threshold;
        if !(h > 0.0 && h <= 1.0) {
            return Err(ConfigError::InvalidEntropyThreshold(h));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AnalysisConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.position_count, 4);
        assert_eq!(cfg.runs.min_trials, 10);
        assert!((cfg.runs.z_critical - 1.96).abs() < 1e-12);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{"position_count": 6, "runs": {"z_critical": 2.5}}"#).unwrap();
        assert_eq!(cfg.position_count, 6);
        assert!((cfg.runs.z_critical - 2.5).abs() < 1e-12);
        assert_eq!(cfg.runs.min_trials, 10);
        assert!((cfg.bias_threshold - 0.15).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_values() {
        let zero = AnalysisConfig::default().with_position_count(0);
        assert_eq!(zero.validate(), Err(ConfigError::ZeroPositions));

        let negative = AnalysisConfig {
            edge_threshold: -0.1,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "edge_threshold",
                ..
            })
        ));

        let entropy = AnalysisConfig {
            uniform_entropy_threshold: 1.5,
            ..AnalysisConfig::default()
        };
        assert!(entropy.validate().is_err());
    }

    #[test]
    fn strong_threshold_below_bias_threshold_is_rejected() {
        let inverted = AnalysisConfig {
            bias_threshold: 0.30,
            strong_bias_threshold: 0.15,
            ..AnalysisConfig::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::StrongBelowBias {
                bias: 0.30,
                strong: 0.15
            })
        );
        let equal = AnalysisConfig {
            strong_bias_threshold: 0.15,
            ..AnalysisConfig::default()
        };
        assert!(equal.validate().is_ok());
    }
}
