//! Distribution-level randomness statistics.
//!
//! Every function here is pure and works on an explicitly typed
//! [`FrequencyDistribution`] or an ordered slice of values:
//!
//! - [`shannon_entropy`] -- Shannon entropy and its normalized form
//! - [`dispersion`] -- mean, standard deviation, coefficient of variation of counts
//! - [`chi_square`] -- goodness of fit against an expected distribution
//! - [`runs_test`] -- Wald–Wolfowitz runs test for sequential independence
//!
//! Statistics that are mathematically undefined for an input return a
//! [`StatError`] instead of `NaN`.

mod dispersion;
mod distribution;
mod entropy;
mod error;
mod fit;
mod runs;

pub use dispersion::{DispersionResult, dispersion};
pub use distribution::FrequencyDistribution;
pub use entropy::{EntropyResult, shannon_entropy};
pub use error::StatError;
pub use fit::{FitInterpretation, GoodnessOfFitResult, chi_square};
pub use runs::{RunsInterpretation, RunsTestConfig, RunsTestResult, runs_test};
