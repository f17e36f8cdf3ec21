//! Category × position dependence.
//!
//! Under independence a category should be chosen at a given slot about
//! `category_total · position_total / grand_total` times. Cells that stray
//! from that by more than the configured relative deviation are reported.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use choicebias_stats::StatError;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::record::SelectionHistory;

/// One contingency cell that departs from independence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignificantPair {
    pub category: String,
    pub position: usize,
    pub observed: u64,
    pub expected: f64,
    /// `(observed - expected) / expected`
    pub deviation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// category → position → count, observed cells only.
    pub matrix: BTreeMap<String, BTreeMap<usize, u64>>,
    /// Sorted by |deviation|, largest first.
    pub significant_pairs: Vec<SignificantPair>,
    pub has_significant_correlation: bool,
}

/// Build the contingency table and flag cells that contradict independence.
pub fn category_position_correlation(
    history: &SelectionHistory,
    config: &AnalysisConfig,
) -> Result<CorrelationResult, StatError> {
    if history.is_empty() {
        return Err(StatError::insufficient("no trials to correlate"));
    }

    let mut matrix: BTreeMap<String, BTreeMap<usize, u64>> = BTreeMap::new();
    let mut category_totals: BTreeMap<&str, u64> = BTreeMap::new();
    let mut position_totals: BTreeMap<usize, u64> = BTreeMap::new();
    for record in history {
        *matrix
            .entry(record.selected_category.clone())
            .or_default()
            .entry(record.position)
            .or_insert(0) += 1;
        *category_totals.entry(record.selected_category.as_str()).or_insert(0) += 1;
        *position_totals.entry(record.position).or_insert(0) += 1;
    }
    let grand_total = history.len() as f64;

    let mut significant_pairs = Vec::new();
    for (category, row) in &matrix {
        let category_total = category_totals[category.as_str()] as f64;
        for (&position, &observed) in row {
            let expected = category_total * position_totals[&position] as f64 / grand_total;
            let deviation = (observed as f64 - expected) / expected;
            if deviation.abs() > config.correlation_threshold {
                significant_pairs.push(SignificantPair {
                    category: category.clone(),
                    position,
                    observed,
                    expected,
                    deviation,
                });
            }
        }
    }
    // Matrix iteration is already (category, position) ordered and the sort is
    // stable, so ties keep that order.
    significant_pairs.sort_by(|a, b| {
        b.deviation
            .abs()
            .partial_cmp(&a.deviation.abs())
            .unwrap_or(Ordering::Equal)
    });

    log::debug!(
        "correlation: {} categories, {} significant cells",
        matrix.len(),
        significant_pairs.len()
    );

    Ok(CorrelationResult {
        has_significant_correlation: !significant_pairs.is_empty(),
        matrix,
        significant_pairs,
    })
}
