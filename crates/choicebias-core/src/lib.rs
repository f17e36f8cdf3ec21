//! # choicebias-core
//!
//! **Is the picker random, or does it have favourites?**
//!
//! `choicebias-core` analyses a history of trials in which one option was
//! selected from a shuffled presentation. It answers two questions: are the
//! chosen categories and slots evenly distributed, and are successive choices
//! independent of each other?
//!
//! ## Quick Start
//!
//! ```
//! use choicebias_core::{AnalysisConfig, SelectionHistory, SelectionRecord, full_analysis};
//!
//! let order = |s: &[&str]| s.iter().map(|x| x.to_string()).collect::<Vec<_>>();
//! let records = vec![
//!     SelectionRecord::from_presentation(order(&["A", "B", "C", "D"]), 0).unwrap(),
//!     SelectionRecord::from_presentation(order(&["C", "A", "D", "B"]), 2).unwrap(),
//! ];
//!
//! let config = AnalysisConfig::default();
//! let history = SelectionHistory::new(records, config.position_count).unwrap();
//! let report = full_analysis(&history, &config);
//! assert_eq!(report.trial_count, 2);
//! ```
//!
//! ## Architecture
//!
//! Records → [`SelectionHistory`] (validation) → aggregation → detectors → report
//!
//! - [`aggregate`]: frequency distributions per [`Attribute`]
//! - [`assess`]: entropy, dispersion, chi-square and runs test per attribute,
//!   combined into a [`Verdict`]
//! - [`position`]: per-slot and edge deviations from the uniform expectation
//! - [`correlation`]: category × position cells that contradict independence
//!
//! Every analysis is a pure function of the history. Statistics that cannot be
//! computed are returned as [`Measured::Undefined`] with a reason.

pub mod aggregate;
pub mod analysis;
pub mod assess;
pub mod config;
pub mod correlation;
pub mod error;
pub mod position;
pub mod record;

pub use aggregate::{
    Attribute, Category, Position, category_domain, category_frequencies, frequencies,
    position_frequencies, sequence,
};
pub use analysis::{BiasReport, full_analysis};
pub use assess::{
    AttributeAnalysis, Measured, RandomnessAssessment, Verdict, analyze_attribute, assess,
};
pub use config::{AnalysisConfig, DEFAULT_POSITION_COUNT};
pub use correlation::{CorrelationResult, SignificantPair, category_position_correlation};
pub use error::{ConfigError, DomainViolation};
pub use position::{
    BiasDirection, BiasStrength, EdgeBiasResult, PositionBiasResult, edge_bias, position_bias,
};
pub use record::{SelectionHistory, SelectionRecord};

pub use choicebias_stats as stats;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
