//! Selection: the range primitive, gestures, keyboard navigation and
//! state-based cell search.

use log::trace;

use super::{Gesture, Grid};
use crate::cell_ref::{CellId, CellRange};
use crate::error::{GridError, Result};
use crate::notify::GridEvent;
use crate::selection::SelectionDiff;
use crate::types::{CellState, Direction, Key, Modifiers, SelectionMode};

impl Grid {
    /// Make the selection exactly `range` (unioned with the Ctrl snapshot
    /// during an extending gesture).
    ///
    /// The range is clamped out of the fixed rows/columns and grown to enclose
    /// every merge region it touches. With `selecting == false` no new cells
    /// enter the selection, which leaves only the snapshot. Repeating a call
    /// with the same arguments changes nothing.
    pub fn set_selected_range(&mut self, range: CellRange, selecting: bool) -> Result<()> {
        self.check_range(range)?;
        let in_gesture = self.gesture.is_some();
        if !in_gesture {
            self.notify(range.min_row, range.min_col, GridEvent::SelChanging);
        }
        let diff = self.apply_selection(if selecting { Some(range) } else { None });
        if !in_gesture && !diff.is_empty() {
            self.notify(range.min_row, range.min_col, GridEvent::SelChanged);
        }
        Ok(())
    }

    fn check_range(&self, range: CellRange) -> Result<()> {
        if self.store.is_valid(range.max_row, range.max_col) {
            Ok(())
        } else {
            Err(GridError::InvalidAddress {
                row: range.max_row,
                col: range.max_col,
            })
        }
    }

    /// Clamp, merge-expand and apply a range; returns the membership diff.
    pub(crate) fn apply_selection(&mut self, range: Option<CellRange>) -> SelectionDiff {
        // Expansion can reach back into the fixed band; clamp again after it.
        let target = range
            .and_then(|r| self.clamp_to_body(r))
            .and_then(|r| self.clamp_to_body(self.merges.expand(r)));
        let diff = self.selection.apply_range(target);
        if !diff.is_empty() {
            trace!(
                "selection +{} -{} (now {})",
                diff.added.len(),
                diff.removed.len(),
                self.selection.count()
            );
            self.redraw_diff(&diff);
        }
        diff
    }

    /// Drop the fixed rows/columns from a range.
    fn clamp_to_body(&self, range: CellRange) -> Option<CellRange> {
        let min_row = range.min_row.max(self.regions.fixed_rows);
        let min_col = range.min_col.max(self.regions.fixed_cols);
        if min_row > range.max_row || min_col > range.max_col {
            return None;
        }
        Some(CellRange::new(min_row, min_col, range.max_row, range.max_col))
    }

    pub fn select_all(&mut self) -> bool {
        let Some(range) = self.full_range() else {
            return false;
        };
        self.selection.set_mode(SelectionMode::AllSelected);
        self.set_selected_range(range, true).is_ok()
    }

    /// Select whole rows `first..=last`.
    pub fn select_rows(&mut self, first: u32, last: u32) -> bool {
        let cols = self.store.col_count();
        if cols == 0 {
            return false;
        }
        self.selection.set_mode(SelectionMode::RowSelection);
        self.set_selected_range(CellRange::new(first, 0, last, cols - 1), true)
            .is_ok()
    }

    /// Select whole columns `first..=last`.
    pub fn select_columns(&mut self, first: u32, last: u32) -> bool {
        let rows = self.store.row_count();
        if rows == 0 {
            return false;
        }
        self.selection.set_mode(SelectionMode::ColumnSelection);
        self.set_selected_range(CellRange::new(0, first, rows - 1, last), true)
            .is_ok()
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.notify(0, 0, GridEvent::SelChanging);
        let removed = self.selection.clear();
        for cell in removed {
            self.redraw_cell(cell);
        }
        self.selection.set_mode(SelectionMode::NoSelection);
        self.notify(0, 0, GridEvent::SelChanged);
    }

    /// Bounding range of the selected cells.
    pub fn selected_range(&self) -> Option<CellRange> {
        self.selection.bounds()
    }

    /// Selected cells in row-major order.
    pub fn selected_cells(&self) -> Vec<CellId> {
        self.selection.cells()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Selected, or part of a merge region with any selected constituent.
    pub fn is_cell_selected(&self, row: u32, col: u32) -> bool {
        self.merges
            .any_in_region(row, col, |c| self.selection.is_selected(c.row, c.col))
    }

    /// Focused, or part of a merge region whose focused constituent it shares.
    pub fn is_cell_focused(&self, row: u32, col: u32) -> bool {
        self.merges
            .any_in_region(row, col, |c| self.selection.is_focused(c.row, c.col))
    }

    pub fn focus_cell(&self) -> Option<CellId> {
        self.selection.focus()
    }

    /// Move focus; fixed and out-of-range cells are refused.
    pub fn set_focus_cell(&mut self, cell: Option<CellId>) -> bool {
        if let Some(c) = cell {
            if !self.store.is_valid(c.row, c.col) || self.regions.is_fixed_cell(c.row, c.col) {
                return false;
            }
        }
        let previous = self.selection.focus();
        if previous == cell {
            return true;
        }
        self.selection.set_focus(cell);
        for c in previous.into_iter().chain(cell) {
            self.redraw_region_of(c);
        }
        true
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Start a selection gesture at `cell`.
    ///
    /// The shape follows the origin: fixed corner selects everything, a fixed
    /// row header selects columns, a fixed column header selects rows, the
    /// body selects a rectangle (or rows in list mode). Ctrl keeps the
    /// current selection and extends it; Shift keeps the previous anchor.
    pub fn begin_selection(&mut self, cell: CellId, modifiers: Modifiers) -> bool {
        if !self.config.enable_selection || !self.store.is_valid(cell.row, cell.col) {
            return false;
        }
        let mode = self.mode_for_origin(cell);
        if mode == SelectionMode::NoSelection {
            return false;
        }
        self.notify(cell.row, cell.col, GridEvent::SelChanging);

        if modifiers.ctrl && !self.config.single_line_selection() {
            self.selection.take_snapshot();
        } else {
            self.selection.discard_snapshot();
        }
        let origin = self.gesture_origin(cell);
        if !(modifiers.shift && self.selection.anchor().is_some()) {
            self.selection.set_anchor(Some(origin));
        }
        self.selection.set_mode(mode);
        self.gesture = Some(Gesture { mode });

        if let Some(focus) = self.first_focusable_in_line(origin, mode) {
            self.set_focus_cell(Some(focus));
        }
        self.apply_gesture(origin);
        true
    }

    /// Continue the current gesture to `cell` (clamped into the grid).
    pub fn extend_selection(&mut self, cell: CellId) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        let (rows, cols) = (self.store.row_count(), self.store.col_count());
        if rows == 0 || cols == 0 {
            return false;
        }
        let cell = CellId::new(cell.row.min(rows - 1), cell.col.min(cols - 1));
        if gesture.mode == SelectionMode::RectSelection
            && !self.regions.is_fixed_cell(cell.row, cell.col)
        {
            self.set_focus_cell(Some(self.gesture_origin(cell)));
        }
        self.apply_gesture(cell);
        true
    }

    /// Finish the current gesture.
    pub fn end_selection(&mut self) -> bool {
        if self.gesture.take().is_none() {
            return false;
        }
        self.selection.discard_snapshot();
        let at = self.selection.focus().unwrap_or(CellId::new(0, 0));
        self.notify(at.row, at.col, GridEvent::SelChanged);
        true
    }

    pub fn is_selecting(&self) -> bool {
        self.gesture.is_some()
    }

    /// Pointer press at client coordinates.
    pub fn mouse_down(&mut self, x: i32, y: i32, modifiers: Modifiers) -> bool {
        match self.cell_at_point(x, y) {
            Some(cell) => self.begin_selection(cell, modifiers),
            None => false,
        }
    }

    /// Pointer drag; ignored outside a gesture or off the cells.
    pub fn mouse_move(&mut self, x: i32, y: i32) -> bool {
        if self.gesture.is_none() {
            return false;
        }
        match self.cell_at_point(x, y) {
            Some(cell) => self.extend_selection(cell),
            None => false,
        }
    }

    pub fn mouse_up(&mut self) -> bool {
        self.end_selection()
    }

    /// Merge origin of `cell`, or `cell` itself when the origin lies in the
    /// fixed band and `cell` does not.
    fn gesture_origin(&self, cell: CellId) -> CellId {
        let origin = self.merges.origin_of(cell);
        if self.regions.is_fixed_cell(origin.row, origin.col)
            && !self.regions.is_fixed_cell(cell.row, cell.col)
        {
            cell
        } else {
            origin
        }
    }

    fn mode_for_origin(&self, cell: CellId) -> SelectionMode {
        let fixed_row = self.regions.is_fixed_row(cell.row);
        let fixed_col = self.regions.is_fixed_col(cell.col);
        match (fixed_row, fixed_col) {
            (true, true) if self.config.fixed_row_selection || self.config.fixed_col_selection => {
                SelectionMode::AllSelected
            }
            (true, false) if self.config.fixed_row_selection => SelectionMode::ColumnSelection,
            (false, true) if self.config.fixed_col_selection => SelectionMode::RowSelection,
            (false, false) if self.config.list_mode => SelectionMode::RowSelection,
            (false, false) => SelectionMode::RectSelection,
            _ => SelectionMode::NoSelection,
        }
    }

    /// Range covered by a gesture from the anchor to `cell`.
    fn gesture_range(&self, mode: SelectionMode, cell: CellId) -> Option<CellRange> {
        let full = self.full_range()?;
        let anchor = self.selection.anchor().unwrap_or(cell);
        let range = match mode {
            SelectionMode::AllSelected => full,
            SelectionMode::RowSelection => {
                let first = if self.config.single_row_selection {
                    cell.row
                } else {
                    anchor.row
                };
                CellRange::new(first, 0, cell.row, full.max_col)
            }
            SelectionMode::ColumnSelection => {
                let first = if self.config.single_col_selection {
                    cell.col
                } else {
                    anchor.col
                };
                CellRange::new(0, first, full.max_row, cell.col)
            }
            SelectionMode::RectSelection => CellRange::spanning(anchor, cell),
            SelectionMode::NoSelection => return None,
        };
        Some(range)
    }

    fn apply_gesture(&mut self, cell: CellId) {
        let Some(mode) = self.gesture.map(|g| g.mode) else {
            return;
        };
        let range = self.gesture_range(mode, cell);
        self.apply_selection(range);
    }

    /// Focus target for a gesture starting at `origin`: the cell itself in
    /// the body, or the first body cell of the selected line from a header.
    fn first_focusable_in_line(&self, origin: CellId, mode: SelectionMode) -> Option<CellId> {
        let row = if self.regions.is_fixed_row(origin.row) {
            self.regions.fixed_rows
        } else {
            origin.row
        };
        let col = if self.regions.is_fixed_col(origin.col) {
            self.regions.fixed_cols
        } else {
            origin.col
        };
        if mode == SelectionMode::AllSelected {
            return None;
        }
        self.store.is_valid(row, col).then_some(CellId::new(row, col))
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Move focus with the keyboard. Shift extends the selection from the
    /// anchor; Ctrl moves focus alone; otherwise the selection collapses
    /// (to the focused row in list mode). Focus never lands on a fixed cell
    /// and the new focus is scrolled into view.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let Some(current) = self.keyboard_origin() else {
            return false;
        };
        let Some(next) = self.navigate(current, key, modifiers) else {
            return false;
        };
        if next == current {
            return false;
        }

        self.notify(next.row, next.col, GridEvent::SelChanging);
        self.set_focus_cell(Some(next));
        if modifiers.shift && self.config.enable_selection {
            let anchor = self.selection.anchor().unwrap_or(current);
            self.selection.set_anchor(Some(anchor));
            let range = if self.config.list_mode {
                self.full_range()
                    .map(|f| CellRange::new(anchor.row, 0, next.row, f.max_col))
            } else {
                Some(CellRange::spanning(anchor, next))
            };
            self.selection.discard_snapshot();
            self.apply_selection(range);
        } else if !modifiers.ctrl {
            self.selection.set_anchor(Some(next));
            self.selection.discard_snapshot();
            let range = if self.config.list_mode && self.config.enable_selection {
                self.full_range()
                    .map(|f| CellRange::new(next.row, 0, next.row, f.max_col))
            } else {
                None
            };
            self.apply_selection(range);
        }
        self.ensure_visible(next.row, next.col);
        self.notify(next.row, next.col, GridEvent::SelChanged);
        true
    }

    /// Focus cell, or the first body cell when nothing usable is focused.
    fn keyboard_origin(&self) -> Option<CellId> {
        if let Some(focus) = self.selection.focus() {
            if self.store.is_valid(focus.row, focus.col)
                && !self.regions.is_fixed_cell(focus.row, focus.col)
            {
                return Some(focus);
            }
        }
        let cell = CellId::new(self.regions.fixed_rows, self.regions.fixed_cols);
        self.store.is_valid(cell.row, cell.col).then_some(cell)
    }

    fn navigate(&self, from: CellId, key: Key, modifiers: Modifiers) -> Option<CellId> {
        let rows = self.store.row_count();
        let cols = self.store.col_count();
        let first_row = self.regions.fixed_rows;
        let first_col = self.regions.fixed_cols;
        if first_row >= rows || first_col >= cols {
            return None;
        }
        let last_row = rows - 1;
        let last_col = cols - 1;
        // Step off a merge region from its edge.
        let span = self
            .merges
            .region_at(from.row, from.col)
            .map_or(CellRange::single(from), |(_, r)| r);

        let page = self
            .fully_visible_body_range()
            .map_or(1, |r| r.row_span().max(1));

        let (row, col) = match key {
            Key::Up => (span.min_row.saturating_sub(1).max(first_row), from.col),
            Key::Down => (span.max_row.saturating_add(1).min(last_row), from.col),
            Key::Left => (from.row, span.min_col.saturating_sub(1).max(first_col)),
            Key::Right => (from.row, span.max_col.saturating_add(1).min(last_col)),
            Key::PageUp => (from.row.saturating_sub(page).max(first_row), from.col),
            Key::PageDown => (from.row.saturating_add(page).min(last_row), from.col),
            Key::Home if modifiers.ctrl => (first_row, first_col),
            Key::Home => (from.row, first_col),
            Key::End if modifiers.ctrl => (last_row, last_col),
            Key::End => (from.row, last_col),
        };
        let target = self.merges.origin_of(CellId::new(row, col));
        // A merge origin can sit inside the fixed band; stay put instead.
        if self.regions.is_fixed_cell(target.row, target.col) {
            return Some(from);
        }
        Some(target)
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Next cell from `from` in `direction` whose state shares a bit with
    /// `mask` (any cell when `mask` is empty). `Direction::All` scans
    /// row-major from the cell after `from` to the end of the grid.
    pub fn next_item(&self, from: CellId, direction: Direction, mask: CellState) -> Option<CellId> {
        let rows = self.store.row_count();
        let cols = self.store.col_count();
        if !self.store.is_valid(from.row, from.col) {
            return None;
        }
        let matches = |cell: CellId| {
            mask.is_empty()
                || self
                    .cell_state(cell.row, cell.col)
                    .is_some_and(|s| s.intersects(mask))
        };
        match direction {
            Direction::Above => (0..from.row)
                .rev()
                .map(|r| CellId::new(r, from.col))
                .find(|c| matches(*c)),
            Direction::Below => (from.row + 1..rows)
                .map(|r| CellId::new(r, from.col))
                .find(|c| matches(*c)),
            Direction::ToLeft => (0..from.col)
                .rev()
                .map(|c| CellId::new(from.row, c))
                .find(|c| matches(*c)),
            Direction::ToRight => (from.col + 1..cols)
                .map(|c| CellId::new(from.row, c))
                .find(|c| matches(*c)),
            Direction::All => {
                let start = u64::from(from.row) * u64::from(cols) + u64::from(from.col) + 1;
                let end = u64::from(rows) * u64::from(cols);
                (start..end)
                    .map(|i| {
                        let row = u32::try_from(i / u64::from(cols)).unwrap_or(u32::MAX);
                        let col = u32::try_from(i % u64::from(cols)).unwrap_or(u32::MAX);
                        CellId::new(row, col)
                    })
                    .find(|c| matches(*c))
            }
        }
    }
}
