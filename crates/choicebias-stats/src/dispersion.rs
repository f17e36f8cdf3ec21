//! Spread of counts across a fixed category domain.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::{FrequencyDistribution, StatError};

/// Mean, population standard deviation and coefficient of variation of the
/// per-category counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DispersionResult {
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
}

/// Dispersion of the counts in `dist`.
///
/// Every key of the analysis domain must already be present (zero-filled);
/// categories missing from the map are not counted towards `k`.
pub fn dispersion<K: Ord>(dist: &FrequencyDistribution<K>) -> Result<DispersionResult, StatError> {
    if dist.is_empty() {
        return Err(StatError::insufficient("empty category domain"));
    }
    let counts: Vec<f64> = dist.iter().map(|(_, &c)| c as f64).collect();
    let mean = counts.iter().mean();
    if mean <= 0.0 {
        return Err(StatError::insufficient(
            "mean count is zero, coefficient of variation undefined",
        ));
    }
    let std_dev = if counts.len() > 1 {
        counts.iter().population_std_dev()
    } else {
        0.0
    };

    Ok(DispersionResult {
        mean,
        std_dev,
        coefficient_of_variation: std_dev / mean,
    })
}
