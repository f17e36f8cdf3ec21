//! Position-bias and edge-bias detection.
//!
//! Both detectors compare the observed selection frequency of each slot with
//! the uniform expectation `total / position_count` and express the gap as a
//! relative deviation `(observed - expected) / expected`.

use std::collections::BTreeMap;

use choicebias_stats::StatError;
use serde::Serialize;

use crate::aggregate::position_frequencies;
use crate::config::AnalysisConfig;
use crate::record::SelectionHistory;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Sign of the dominant deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasDirection {
    /// The most-deviating slot is chosen more often than expected.
    Preference,
    /// The most-deviating slot is chosen less often than expected.
    Avoidance,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasStrength {
    None,
    Moderate,
    Strong,
}

/// Per-slot selection skew.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionBiasResult {
    pub frequency_by_position: BTreeMap<usize, u64>,
    pub deviation_by_position: BTreeMap<usize, f64>,
    /// Largest |deviation| over all slots.
    pub max_deviation: f64,
    pub max_deviation_position: usize,
    /// `min(1, Σ|deviation| / (2·(position_count - 1)))`.
    pub bias_index: f64,
    pub has_bias: bool,
    pub strength: BiasStrength,
    pub direction: BiasDirection,
    pub interpretation: String,
}

/// Skew at the first and last slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeBiasResult {
    /// Relative deviation at slot 0.
    pub first_position_bias: f64,
    /// Relative deviation at slot `position_count - 1`.
    pub last_position_bias: f64,
    pub has_edge_bias: bool,
    pub interpretation: String,
}

// ---------------------------------------------------------------------------
// Detectors
// ---------------------------------------------------------------------------

/// Compare per-slot selection counts against the uniform expectation.
pub fn position_bias(
    history: &SelectionHistory,
    config: &AnalysisConfig,
) -> Result<PositionBiasResult, StatError> {
    let frequencies = position_frequencies(history);
    let total = frequencies.total();
    if total == 0 {
        return Err(StatError::insufficient("no trials to measure position bias"));
    }
    let slots = history.position_count();
    let expected = total as f64 / slots as f64;

    let deviation_by_position: BTreeMap<usize, f64> = frequencies
        .iter()
        .map(|(&pos, &count)| (pos, relative_deviation(count, expected)))
        .collect();

    // Strictly greater keeps the lowest slot on ties.
    let (max_deviation_position, signed_max) = deviation_by_position.iter().fold(
        (0usize, 0.0f64),
        |(best_pos, best), (&pos, &dev)| {
            if dev.abs() > best.abs() {
                (pos, dev)
            } else {
                (best_pos, best)
            }
        },
    );
    let max_deviation = signed_max.abs();

    let bias_index = if slots < 2 {
        0.0
    } else {
        let sum_abs: f64 = deviation_by_position.values().map(|d| d.abs()).sum();
        (sum_abs / (2.0 * (slots - 1) as f64)).min(1.0)
    };

    let has_bias = bias_index > config.bias_threshold || max_deviation > config.bias_threshold;
    let strength = if bias_index > config.strong_bias_threshold {
        BiasStrength::Strong
    } else if has_bias {
        BiasStrength::Moderate
    } else {
        BiasStrength::None
    };
    let direction = if signed_max > 0.0 {
        BiasDirection::Preference
    } else if signed_max < 0.0 {
        BiasDirection::Avoidance
    } else {
        BiasDirection::None
    };

    let interpretation = describe_position_bias(
        strength,
        direction,
        max_deviation_position,
        max_deviation,
        bias_index,
    );

    log::debug!(
        "position bias over {total} trials: index={bias_index:.3}, max |dev|={max_deviation:.3} at {max_deviation_position}"
    );

    Ok(PositionBiasResult {
        frequency_by_position: frequencies.as_map().clone(),
        deviation_by_position,
        max_deviation,
        max_deviation_position,
        bias_index,
        has_bias,
        strength,
        direction,
        interpretation,
    })
}

/// Position-bias deviation restricted to the first and last slot.
pub fn edge_bias(
    history: &SelectionHistory,
    config: &AnalysisConfig,
) -> Result<EdgeBiasResult, StatError> {
    let slots = history.position_count();
    if slots < 2 {
        return Err(StatError::degenerate(
            "a single-slot presentation has no distinct edges",
        ));
    }
    let frequencies = position_frequencies(history);
    let total = frequencies.total();
    if total == 0 {
        return Err(StatError::insufficient("no trials to measure edge bias"));
    }
    let expected = total as f64 / slots as f64;
    let first = relative_deviation(frequencies.count(&0), expected);
    let last = relative_deviation(frequencies.count(&(slots - 1)), expected);

    let first_biased = first.abs() > config.edge_threshold;
    let last_biased = last.abs() > config.edge_threshold;

    let interpretation = match (first_biased, last_biased) {
        (false, false) => "No edge bias: first and last positions are selected at the expected rate".to_string(),
        (true, false) => format!("First position is {}", edge_phrase(first)),
        (false, true) => format!("Last position is {}", edge_phrase(last)),
        (true, true) if first.signum() == last.signum() => format!(
            "Both edges are {} (first {:+.0}%, last {:+.0}%)",
            if first > 0.0 { "over-selected" } else { "under-selected" },
            first * 100.0,
            last * 100.0
        ),
        (true, true) => format!(
            "Both edges are biased: first position is {}, last position is {}",
            edge_phrase(first),
            edge_phrase(last)
        ),
    };

    Ok(EdgeBiasResult {
        first_position_bias: first,
        last_position_bias: last,
        has_edge_bias: first_biased || last_biased,
        interpretation,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn relative_deviation(observed: u64, expected: f64) -> f64 {
    (observed as f64 - expected) / expected
}

fn edge_phrase(deviation: f64) -> String {
    let verb = if deviation > 0.0 {
        "over-selected"
    } else {
        "under-selected"
    };
    format!("{verb} ({:+.0}% vs expected)", deviation * 100.0)
}

fn describe_position_bias(
    strength: BiasStrength,
    direction: BiasDirection,
    position: usize,
    max_deviation: f64,
    bias_index: f64,
) -> String {
    let lead = match strength {
        BiasStrength::None => {
            return format!("No significant position bias (bias index {bias_index:.3})");
        }
        BiasStrength::Moderate => "Position bias detected",
        BiasStrength::Strong => "Strong position bias detected",
    };
    let tendency = match direction {
        BiasDirection::Preference => "preferred",
        BiasDirection::Avoidance => "avoided",
        BiasDirection::None => "neutral",
    };
    format!(
        "{lead}: position {position} is {tendency} ({:.0}% deviation, bias index {bias_index:.3})",
        max_deviation * 100.0
    )
}
