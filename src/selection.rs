//! Selection model.
//!
//! The set of selected coordinates is the single source of truth: "is this
//! cell selected" is a lookup in the set, and enumerating the selection is
//! O(selected) without touching the cell store.

use rustc_hash::FxHashMap;

use crate::cell_ref::{CellId, CellRange};
use crate::types::SelectionMode;

/// Cells that changed membership in one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    pub added: Vec<CellId>,
    pub removed: Vec<CellId>,
}

impl SelectionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.added.iter().chain(self.removed.iter()).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected: FxHashMap<u64, CellId>,
    /// Selection at the start of a Ctrl gesture; unioned into every update
    snapshot: Option<FxHashMap<u64, CellId>>,
    anchor: Option<CellId>,
    focus: Option<CellId>,
    mode: SelectionMode,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, row: u32, col: u32) -> bool {
        self.selected.contains_key(&CellId::new(row, col).pack())
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected cells in row-major order.
    pub fn cells(&self) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self.selected.values().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Bounding range of the selection.
    pub fn bounds(&self) -> Option<CellRange> {
        let mut iter = self.selected.values();
        let first = iter.next()?;
        let mut range = CellRange::single(*first);
        for cell in iter {
            range = range.union(&CellRange::single(*cell));
        }
        Some(range)
    }

    pub fn anchor(&self) -> Option<CellId> {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Option<CellId>) {
        self.anchor = anchor;
    }

    pub fn focus(&self) -> Option<CellId> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<CellId>) {
        self.focus = focus;
    }

    pub fn is_focused(&self, row: u32, col: u32) -> bool {
        self.focus == Some(CellId::new(row, col))
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Remember the current selection so later updates extend it.
    pub fn take_snapshot(&mut self) {
        self.snapshot = Some(self.selected.clone());
    }

    pub fn discard_snapshot(&mut self) {
        self.snapshot = None;
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Make the selection exactly `range` (plus the snapshot, if any).
    ///
    /// Cells already in the desired set are left untouched; only the
    /// difference is reported.
    pub fn apply_range(&mut self, range: Option<CellRange>) -> SelectionDiff {
        let mut desired: FxHashMap<u64, CellId> = self.snapshot.clone().unwrap_or_default();
        if let Some(range) = range {
            desired.reserve(usize::try_from(range.cell_count()).unwrap_or(0));
            for cell in range.cells() {
                desired.insert(cell.pack(), cell);
            }
        }

        let mut diff = SelectionDiff::default();
        self.selected.retain(|key, cell| {
            let keep = desired.contains_key(key);
            if !keep {
                diff.removed.push(*cell);
            }
            keep
        });
        for (key, cell) in desired {
            if let std::collections::hash_map::Entry::Vacant(slot) = self.selected.entry(key) {
                slot.insert(cell);
                diff.added.push(cell);
            }
        }
        diff
    }

    /// Add or remove a single cell; returns whether membership changed.
    pub fn set_cell(&mut self, cell: CellId, selected: bool) -> bool {
        if selected {
            self.selected.insert(cell.pack(), cell).is_none()
        } else {
            self.selected.remove(&cell.pack()).is_some()
        }
    }

    /// Drop every selected cell matching `pred`.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<CellId>
    where
        F: FnMut(CellId) -> bool,
    {
        let mut removed = Vec::new();
        self.selected.retain(|_, cell| {
            let drop = pred(*cell);
            if drop {
                removed.push(*cell);
            }
            !drop
        });
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.retain(|_, cell| !pred(*cell));
        }
        removed
    }

    /// Deselect everything; returns the cells that were selected.
    pub fn clear(&mut self) -> Vec<CellId> {
        self.snapshot = None;
        self.selected.drain().map(|(_, cell)| cell).collect()
    }
}
