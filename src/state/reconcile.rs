//! List reconciliation
//!
//! Computes the edit script that turns one rendered row list into
//! another and classifies every changed row as either a cosmetic update
//! (expand/collapse only) or a structural one (full row rebuild).
//!
//! Operations are emitted in the order they must be applied:
//! 1. Removals, back to front (positions refer to the old list)
//! 2. Moves, remove-then-insert semantics
//! 3. Insertions, front to back (positions refer to the new list)
//! 4. Updates, front to back (positions refer to the new list)
//!
//! Lists must not contain duplicate ids. The result for such input is
//! unspecified, though it never panics.

use std::collections::{HashMap, HashSet};

use super::data::{ItemId, RowList, RowRecord};

/// How a matched row changed between two list versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowChange {
    /// Only the expansion flag differs; toggle visibility to `expanded`
    Cosmetic { expanded: bool },
    /// Any other field differs; rebuild the row from this record
    Structural(RowRecord),
}

/// A single step of the edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOp {
    Remove { position: usize, id: ItemId },
    Move { from: usize, to: usize, id: ItemId },
    Insert { position: usize, record: RowRecord },
    Update { position: usize, id: ItemId, change: RowChange },
}

/// Something that holds rendered rows and can be driven by an edit script
pub trait RowTarget {
    fn remove(&mut self, position: usize);
    fn insert(&mut self, position: usize, record: &RowRecord);
    fn move_row(&mut self, from: usize, to: usize);
    /// Rebind every visual of the row at `position`
    fn render_full(&mut self, position: usize, record: &RowRecord);
    /// Only flip the expand/collapse visual of the row at `position`
    fn render_cosmetic(&mut self, position: usize, expanded: bool);
}

/// Decide what update, if any, a matched row needs.
///
/// Returns `None` for content-identical rows. A row whose expansion flag
/// changed together with any other field gets a single structural update.
pub fn change_payload(old: &RowRecord, new: &RowRecord) -> Option<RowChange> {
    if old == new {
        None
    } else if old.with_expanded(new.is_expanded) == *new {
        Some(RowChange::Cosmetic {
            expanded: new.is_expanded,
        })
    } else {
        Some(RowChange::Structural(new.clone()))
    }
}

/// Compute the edit script from `old` to `new`
pub fn diff(old: &[RowRecord], new: &[RowRecord]) -> Vec<RowOp> {
    let old_index = index_by_id(old);
    let new_index = index_by_id(new);
    let mut ops = Vec::new();

    // Ids as currently rendered, kept in sync with every emitted op
    let mut current: Vec<ItemId> = old.iter().map(|row| row.id).collect();

    for (position, row) in old.iter().enumerate().rev() {
        if !new_index.contains_key(&row.id) {
            ops.push(RowOp::Remove {
                position,
                id: row.id,
            });
            current.remove(position);
        }
    }

    // Matched rows in the order they must end up in
    let target: Vec<ItemId> = new
        .iter()
        .map(|row| row.id)
        .filter(|id| old_index.contains_key(id))
        .collect();
    let anchored = longest_ordered_run(&current, &target);

    for (k, &id) in target.iter().enumerate() {
        if anchored.contains(&id) {
            continue;
        }
        let Some(from) = current.iter().position(|&c| c == id) else {
            continue;
        };
        current.remove(from);
        // Land right behind the row that precedes it in the target order
        let to = match k {
            0 => 0,
            _ => current
                .iter()
                .position(|&c| c == target[k - 1])
                .map_or(0, |p| p + 1),
        };
        current.insert(to, id);
        if from != to {
            ops.push(RowOp::Move { from, to, id });
        }
    }

    for (position, row) in new.iter().enumerate() {
        if !old_index.contains_key(&row.id) {
            ops.push(RowOp::Insert {
                position,
                record: row.clone(),
            });
        }
    }

    for (position, row) in new.iter().enumerate() {
        let Some(&old_position) = old_index.get(&row.id) else {
            continue;
        };
        if let Some(change) = change_payload(&old[old_position], row) {
            ops.push(RowOp::Update {
                position,
                id: row.id,
                change,
            });
        }
    }

    ops
}

/// Drive `target` through an edit script produced by [`diff`]
pub fn apply<T: RowTarget + ?Sized>(ops: &[RowOp], target: &mut T) {
    for op in ops {
        match op {
            RowOp::Remove { position, .. } => target.remove(*position),
            RowOp::Move { from, to, .. } => target.move_row(*from, *to),
            RowOp::Insert { position, record } => target.insert(*position, record),
            RowOp::Update {
                position, change, ..
            } => match change {
                RowChange::Cosmetic { expanded } => target.render_cosmetic(*position, *expanded),
                RowChange::Structural(record) => target.render_full(*position, record),
            },
        }
    }
}

impl RowTarget for RowList {
    fn remove(&mut self, position: usize) {
        Vec::remove(self, position);
    }

    fn insert(&mut self, position: usize, record: &RowRecord) {
        Vec::insert(self, position, record.clone());
    }

    fn move_row(&mut self, from: usize, to: usize) {
        let row = Vec::remove(self, from);
        Vec::insert(self, to, row);
    }

    fn render_full(&mut self, position: usize, record: &RowRecord) {
        self[position] = record.clone();
    }

    fn render_cosmetic(&mut self, position: usize, expanded: bool) {
        self[position].is_expanded = expanded;
    }
}

fn index_by_id(rows: &[RowRecord]) -> HashMap<ItemId, usize> {
    rows.iter()
        .enumerate()
        .map(|(position, row)| (row.id, position))
        .collect()
}

/// Ids of the longest subsequence of `target` that already appears in the
/// same relative order in `current`. Those rows never need to move.
fn longest_ordered_run(current: &[ItemId], target: &[ItemId]) -> HashSet<ItemId> {
    let positions: HashMap<ItemId, usize> = current
        .iter()
        .enumerate()
        .map(|(position, &id)| (id, position))
        .collect();
    let sequence: Vec<(ItemId, usize)> = target
        .iter()
        .filter_map(|id| positions.get(id).map(|&p| (*id, p)))
        .collect();

    // Patience sorting: tails[k] is the index of the smallest tail of an
    // increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; sequence.len()];
    for i in 0..sequence.len() {
        let slot = tails.partition_point(|&t| sequence[t].1 < sequence[i].1);
        if slot > 0 {
            previous[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut anchored = HashSet::new();
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        anchored.insert(sequence[i].0);
        cursor = previous[i];
    }
    anchored
}
