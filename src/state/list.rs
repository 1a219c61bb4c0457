//! Current list state and its copy-on-toggle update policy

use super::data::{ItemId, RowList, RowRecord};
use super::reconcile::{diff, RowOp};

/// Produce a new list with the expansion flag of `target` flipped.
///
/// Every other row is copied unchanged. An id that is not in the list
/// is not an error: the result is simply equal to `current`.
pub fn toggle(current: &[RowRecord], target: ItemId) -> RowList {
    current
        .iter()
        .map(|row| {
            if row.id == target {
                row.with_expanded(!row.is_expanded)
            } else {
                row.clone()
            }
        })
        .collect()
}

/// Owns the current row list. Every change replaces the list with a new
/// value and reports the edit script against the previous one.
#[derive(Debug, Default)]
pub struct ListState {
    rows: RowList,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in display order
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn get(&self, id: ItemId) -> Option<&RowRecord> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Flip one row's expansion and return the resulting edit script
    pub fn toggle(&mut self, id: ItemId) -> Vec<RowOp> {
        let next = toggle(&self.rows, id);
        self.submit(next)
    }

    /// Replace the whole list (initial load, catalog reload)
    pub fn submit(&mut self, next: RowList) -> Vec<RowOp> {
        let ops = diff(&self.rows, &next);
        self.rows = next;
        ops
    }
}
