//! Frequency aggregation over a chosen record attribute.

use std::collections::BTreeSet;

use choicebias_stats::FrequencyDistribution;

use crate::record::{SelectionHistory, SelectionRecord};

/// A record attribute that can be counted and tested for order effects.
pub trait Attribute {
    type Key: Ord + Clone;

    /// Short label used in reports.
    const NAME: &'static str;

    fn key(record: &SelectionRecord) -> Self::Key;
}

/// The selected category.
#[derive(Debug, Clone, Copy, Default)]
pub struct Category;

impl Attribute for Category {
    type Key = String;
    const NAME: &'static str = "category";

    fn key(record: &SelectionRecord) -> String {
        record.selected_category.clone()
    }
}

/// The slot the selected category occupied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position;

impl Attribute for Position {
    type Key = usize;
    const NAME: &'static str = "position";

    fn key(record: &SelectionRecord) -> usize {
        record.position
    }
}

/// Count observed values of `A`. Values that never occur are absent.
pub fn frequencies<'a, A: Attribute>(
    records: impl IntoIterator<Item = &'a SelectionRecord>,
) -> FrequencyDistribution<A::Key> {
    records.into_iter().map(A::key).collect()
}

/// The attribute values of `records` in their original order.
pub fn sequence<'a, A: Attribute>(
    records: impl IntoIterator<Item = &'a SelectionRecord>,
) -> Vec<A::Key> {
    records.into_iter().map(A::key).collect()
}

/// Every category offered in any presentation, whether or not it was chosen.
pub fn category_domain(history: &SelectionHistory) -> BTreeSet<String> {
    history
        .iter()
        .flat_map(|r| r.presentation_order.iter().cloned())
        .collect()
}

/// Zero-filled frequencies over the full category domain.
pub fn category_frequencies(history: &SelectionHistory) -> FrequencyDistribution<String> {
    frequencies::<Category>(history).with_domain(category_domain(history))
}

/// Zero-filled frequencies over `0..position_count`.
pub fn position_frequencies(history: &SelectionHistory) -> FrequencyDistribution<usize> {
    frequencies::<Position>(history).with_domain(0..history.position_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(picks: &[usize]) -> SelectionHistory {
        let orders = [["A", "B", "C", "D"], ["D", "C", "B", "A"]];
        let records = picks
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let order = orders[i % 2].iter().map(|s| s.to_string()).collect();
                SelectionRecord::from_presentation(order, p).unwrap()
            })
            .collect();
        SelectionHistory::new(records, 4).unwrap()
    }

    #[test]
    fn empty_input_is_empty_distribution() {
        let dist = frequencies::<Category>(&[] as &[SelectionRecord]);
        assert!(dist.is_empty());
        assert_eq!(dist.total(), 0);
    }

    #[test]
    fn observed_values_only() {
        let h = history(&[0, 0, 0, 1]);
        let by_pos = frequencies::<Position>(&h);
        assert_eq!(by_pos.len(), 2);
        assert_eq!(by_pos.count(&0), 3);
        assert_eq!(by_pos.total(), 4);

        // A, D, A, C
        let by_cat = frequencies::<Category>(&h);
        assert_eq!(by_cat.count(&"A".to_string()), 2);
        assert_eq!(by_cat.len(), 3);
        assert_eq!(by_cat.total(), 4);
    }

    #[test]
    fn zero_filled_domains() {
        let h = history(&[0, 0, 0, 1]);
        let pos = position_frequencies(&h);
        assert_eq!(pos.len(), 4);
        assert_eq!(pos.count(&3), 0);
        let cat = category_frequencies(&h);
        assert_eq!(cat.len(), 4);
        assert_eq!(cat.count(&"B".to_string()), 0);
        assert_eq!(cat.total(), h.len() as u64);
    }

    #[test]
    fn sequence_keeps_order() {
        let h = history(&[2, 1, 0, 3]);
        assert_eq!(sequence::<Position>(&h), vec![2, 1, 0, 3]);
        assert_eq!(sequence::<Category>(&h), vec!["C", "C", "A", "A"]);
    }
}
