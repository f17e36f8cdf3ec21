//! Trial records and the validated history they are analysed as.

use serde::{Deserialize, Serialize};

use crate::error::DomainViolation;

/// One observed trial: the option that was picked, where it sat, and the
/// shuffled option list shown for that trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub selected_category: String,
    pub position: usize,
    pub presentation_order: Vec<String>,
}

impl SelectionRecord {
    /// Build a record from a presentation and the chosen slot.
    ///
    /// Returns `None` when `position` is outside the presentation.
    pub fn from_presentation(presentation_order: Vec<String>, position: usize) -> Option<Self> {
        let selected_category = presentation_order.get(position)?.clone();
        Some(Self {
            selected_category,
            position,
            presentation_order,
        })
    }

    /// Check `presentation_order[position] == selected_category`.
    ///
    /// `index` is only used to locate the record in the error.
    pub fn validate(&self, index: usize) -> Result<(), DomainViolation> {
        let presented = self.presentation_order.get(self.position).ok_or(
            DomainViolation::PositionOutOfRange {
                index,
                position: self.position,
                len: self.presentation_order.len(),
            },
        )?;
        if *presented != self.selected_category {
            return Err(DomainViolation::CategoryMismatch {
                index,
                position: self.position,
                presented: presented.clone(),
                selected: self.selected_category.clone(),
            });
        }
        Ok(())
    }
}

/// An ordered, validated sequence of trials over a fixed slot domain
/// `0..position_count`.
///
/// Construction is the only place record invariants are checked. Every
/// analysis takes a `&SelectionHistory`, so none of them has to handle
/// malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionHistory {
    records: Vec<SelectionRecord>,
    position_count: usize,
}

impl SelectionHistory {
    /// Validate `records` in order and fail on the first violation.
    pub fn new(
        records: Vec<SelectionRecord>,
        position_count: usize,
    ) -> Result<Self, DomainViolation> {
        if position_count == 0 {
            return Err(DomainViolation::InvalidPositionCount);
        }
        let mut mismatched_lengths = 0usize;
        for (index, record) in records.iter().enumerate() {
            record.validate(index)?;
            if record.position >= position_count {
                return Err(DomainViolation::PositionOutsideDomain {
                    index,
                    position: record.position,
                    position_count,
                });
            }
            if record.presentation_order.len() != position_count {
                mismatched_lengths += 1;
            }
        }
        if mismatched_lengths > 0 {
            log::warn!(
                "{mismatched_lengths} of {} records present a number of options other than {position_count}",
                records.len()
            );
        }
        log::debug!(
            "accepted {} records over {position_count} positions",
            records.len()
        );
        Ok(Self {
            records,
            position_count,
        })
    }

    pub fn records(&self) -> &[SelectionRecord] {
        &self.records
    }

    pub fn position_count(&self) -> usize {
        self.position_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<SelectionRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a SelectionHistory {
    type Item = &'a SelectionRecord;
    type IntoIter = std::slice::Iter<'a, SelectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
