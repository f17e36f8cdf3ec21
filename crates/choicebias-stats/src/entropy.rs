//! Shannon entropy of a categorical distribution.

use serde::Serialize;

use crate::{FrequencyDistribution, StatError};

/// Shannon entropy and its normalized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropyResult {
    /// Entropy in bits.
    pub entropy: f64,
    /// `entropy / log2(categories)`: 1.0 = uniform, 0.0 = deterministic.
    pub normalized_entropy: f64,
    /// Number of categories the normalization was taken over.
    pub categories: usize,
}

/// Compute Shannon entropy over every key of `dist`.
///
/// The normalizing maximum is `log2(k)` where `k` counts all keys present in
/// the distribution, including zero-filled ones. Zero counts contribute
/// nothing to the sum.
pub fn shannon_entropy<K: Ord>(dist: &FrequencyDistribution<K>) -> Result<EntropyResult, StatError> {
    let k = dist.len();
    let total = dist.total();
    if total == 0 {
        return Err(StatError::insufficient("no observations"));
    }
    if k < 2 {
        return Err(StatError::insufficient(format!(
            "need at least 2 categories for normalized entropy, got {k}"
        )));
    }

    let n = total as f64;
    let mut h = 0.0;
    for (_, &c) in dist {
        if c > 0 {
            let p = c as f64 / n;
            h -= p * p.log2();
        }
    }
    // A single non-zero category evaluates to -1·log2(1) = -0.0.
    let entropy = h.max(0.0);
    let max = (k as f64).log2();
    let normalized_entropy = (entropy / max).clamp(0.0, 1.0);

    Ok(EntropyResult {
        entropy,
        normalized_entropy,
        categories: k,
    })
}
