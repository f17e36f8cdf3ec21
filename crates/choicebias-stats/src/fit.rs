//! Chi-square goodness of fit against an expected categorical distribution.
//!
//! The interpretation uses coarse bands relative to the degrees of freedom
//! rather than a critical-value table, so it is a screening heuristic and
//! not a calibrated significance test.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{FrequencyDistribution, StatError};

/// Probabilities must sum to one within this tolerance.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitInterpretation {
    /// statistic < df
    Random,
    /// df <= statistic < 2·df
    Mild,
    /// 2·df <= statistic < 3·df
    Moderate,
    /// statistic >= 3·df
    Strong,
}

impl FitInterpretation {
    pub fn from_statistic(statistic: f64, degrees_of_freedom: usize) -> Self {
        let df = degrees_of_freedom as f64;
        if statistic < df {
            Self::Random
        } else if statistic < 2.0 * df {
            Self::Mild
        } else if statistic < 3.0 * df {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "consistent with the expected distribution",
            Self::Mild => "mild deviation from the expected distribution",
            Self::Moderate => "moderate deviation from the expected distribution",
            Self::Strong => "strong deviation from the expected distribution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodnessOfFitResult {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub interpretation: FitInterpretation,
}

/// Chi-square statistic of `observed` against `expected` probabilities.
///
/// With `expected == None` the reference is uniform over the observed keys
/// (zero-filled keys included). With an explicit map, the category set is
/// the union of observed and expected keys, minus keys that were never
/// observed and carry zero expected mass.
pub fn chi_square<K: Ord + Clone>(
    observed: &FrequencyDistribution<K>,
    expected: Option<&BTreeMap<K, f64>>,
) -> Result<GoodnessOfFitResult, StatError> {
    let total = observed.total();
    if total == 0 {
        return Err(StatError::insufficient("no observations"));
    }
    let n = total as f64;

    let probabilities: BTreeMap<K, f64> = match expected {
        Some(map) => {
            validate_expected(observed, map)?;
            map.clone()
        }
        None => {
            let k = observed.len() as f64;
            observed.keys().map(|key| (key.clone(), 1.0 / k)).collect()
        }
    };

    let categories: BTreeSet<&K> = observed
        .keys()
        .chain(probabilities.keys())
        .filter(|key| {
            observed.count(key) > 0 || probabilities.get(*key).is_some_and(|p| *p > 0.0)
        })
        .collect();
    let k = categories.len();
    if k < 2 {
        return Err(StatError::insufficient(format!(
            "need at least 2 categories for chi-square, got {k}"
        )));
    }

    let mut statistic = 0.0;
    for key in categories {
        // Observed keys without expected mass were rejected above.
        let e = n * probabilities.get(key).copied().unwrap_or(0.0);
        let diff = observed.count(key) as f64 - e;
        statistic += diff * diff / e;
    }

    let degrees_of_freedom = k - 1;
    Ok(GoodnessOfFitResult {
        statistic,
        degrees_of_freedom,
        interpretation: FitInterpretation::from_statistic(statistic, degrees_of_freedom),
    })
}

fn validate_expected<K: Ord>(
    observed: &FrequencyDistribution<K>,
    expected: &BTreeMap<K, f64>,
) -> Result<(), StatError> {
    if let Some(p) = expected.values().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(StatError::invalid_expected(format!(
            "probability {p} is not a finite non-negative number"
        )));
    }
    let sum: f64 = expected.values().sum();
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(StatError::invalid_expected(format!(
            "probabilities sum to {sum:.6}, expected 1"
        )));
    }
    let uncovered = observed
        .iter()
        .filter(|(_, c)| **c > 0)
        .filter(|(k, _)| expected.get(*k).copied().unwrap_or(0.0) <= 0.0)
        .count();
    if uncovered > 0 {
        return Err(StatError::invalid_expected(format!(
            "{uncovered} observed categories have zero expected probability"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(counts: &[(&'static str, u64)]) -> FrequencyDistribution<&'static str> {
        counts.iter().copied().collect()
    }

    #[test]
    fn exact_match_is_zero() {
        let o = observed(&[("A", 25), ("B", 25), ("C", 25), ("D", 25)]);
        let r = chi_square(&o, None).unwrap();
        assert_eq!(r.statistic, 0.0);
        assert_eq!(r.degrees_of_freedom, 3);
        assert_eq!(r.interpretation, FitInterpretation::Random);
    }

    #[test]
    fn skewed_is_strong() {
        let o = observed(&[("A", 40), ("B", 30), ("C", 20), ("D", 10)]);
        let r = chi_square(&o, None).unwrap();
        // (225 + 25 + 25 + 225) / 25
        assert!((r.statistic - 20.0).abs() < 1e-9);
        assert!(r.statistic > 3.0 * r.degrees_of_freedom as f64);
        assert_eq!(r.interpretation, FitInterpretation::Strong);
    }

    #[test]
    fn bands() {
        assert_eq!(FitInterpretation::from_statistic(2.9, 3), FitInterpretation::Random);
        assert_eq!(FitInterpretation::from_statistic(3.0, 3), FitInterpretation::Mild);
        assert_eq!(FitInterpretation::from_statistic(6.0, 3), FitInterpretation::Moderate);
        assert_eq!(FitInterpretation::from_statistic(8.99, 3), FitInterpretation::Moderate);
        assert_eq!(FitInterpretation::from_statistic(9.0, 3), FitInterpretation::Strong);
    }

    #[test]
    fn explicit_expected_matching_observation() {
        let o = observed(&[("A", 50), ("B", 30), ("C", 20)]);
        let expected: BTreeMap<_, _> = [("A", 0.5), ("B", 0.3), ("C", 0.2)].into_iter().collect();
        let r = chi_square(&o, Some(&expected)).unwrap();
        assert!(r.statistic.abs() < 1e-9);
        assert_eq!(r.degrees_of_freedom, 2);
    }

    #[test]
    fn explicit_expected_includes_unobserved_categories() {
        let o = observed(&[("A", 10), ("B", 10)]);
        let expected: BTreeMap<_, _> =
            [("A", 0.25), ("B", 0.25), ("C", 0.25), ("D", 0.25)].into_iter().collect();
        let r = chi_square(&o, Some(&expected)).unwrap();
        assert_eq!(r.degrees_of_freedom, 3);
        // 2 · (10 - 5)² / 5 + 2 · 5
        assert!((r.statistic - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_mass_unobserved_category_is_not_counted() {
        let o = observed(&[("A", 56), ("B", 44)]);
        let two: BTreeMap<_, _> = [("A", 0.5), ("B", 0.5)].into_iter().collect();
        let three: BTreeMap<_, _> = [("A", 0.5), ("B", 0.5), ("C", 0.0)].into_iter().collect();
        let a = chi_square(&o, Some(&two)).unwrap();
        let b = chi_square(&o, Some(&three)).unwrap();
        // (6² + 6²) / 50
        assert!((b.statistic - 1.44).abs() < 1e-9);
        assert_eq!(b.degrees_of_freedom, 1);
        assert_eq!(b.interpretation, FitInterpretation::Mild);
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_expected_is_rejected() {
        let o = observed(&[("A", 10), ("B", 10)]);
        let short: BTreeMap<_, _> = [("A", 0.5), ("B", 0.4)].into_iter().collect();
        assert!(matches!(
            chi_square(&o, Some(&short)),
            Err(StatError::InvalidExpected { .. })
        ));
        let uncovered: BTreeMap<_, _> = [("A", 1.0), ("B", 0.0)].into_iter().collect();
        assert!(matches!(
            chi_square(&o, Some(&uncovered)),
            Err(StatError::InvalidExpected { .. })
        ));
        let negative: BTreeMap<_, _> = [("A", 1.5), ("B", -0.5)].into_iter().collect();
        assert!(chi_square(&o, Some(&negative)).is_err());
    }

    #[test]
    fn degenerate_inputs() {
        assert!(chi_square(&observed(&[]), None).is_err());
        assert!(chi_square(&observed(&[("A", 5)]), None).is_err());
    }
}
