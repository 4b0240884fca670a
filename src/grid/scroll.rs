//! Viewport operations: hit testing, visible ranges, scrolling and the
//! renderer's cell list.

use log::trace;
use rustc_hash::FxHashSet;

use super::{geometry, Grid};
use crate::cell_ref::{CellId, CellRange};
use crate::layout::{Rect, ScrollRanges};

impl Grid {
    /// Cell under a client-space point. Points on a merged region resolve to
    /// the region's top-left cell.
    pub fn cell_at_point(&self, x: i32, y: i32) -> Option<CellId> {
        let geo = self.geometry();
        let cell = self.viewport.cell_at(&geo, x, y)?;
        Some(self.merges.origin_of(cell))
    }

    /// First scrollable cell at the scroll anchor.
    pub fn top_left_cell(&self) -> Option<CellId> {
        self.viewport.top_left(&self.geometry())
    }

    /// Scrollable cells at least partly on screen.
    pub fn visible_body_range(&self) -> Option<CellRange> {
        self.viewport.body_range(&self.geometry(), false)
    }

    /// Scrollable cells entirely on screen.
    pub fn fully_visible_body_range(&self) -> Option<CellRange> {
        self.viewport.body_range(&self.geometry(), true)
    }

    pub fn is_cell_visible(&self, row: u32, col: u32) -> bool {
        self.viewport.is_visible(&self.geometry(), row, col, false)
    }

    pub fn is_cell_fully_visible(&self, row: u32, col: u32) -> bool {
        self.viewport.is_visible(&self.geometry(), row, col, true)
    }

    /// Screen rectangle of one cell, ignoring merges.
    pub fn cell_rect(&self, row: u32, col: u32) -> Option<Rect> {
        self.viewport.cell_rect(&self.geometry(), row, col)
    }

    /// Scroll by the least amount that brings `(row, col)` fully into view.
    /// Returns whether the scroll position changed.
    pub fn ensure_visible(&mut self, row: u32, col: u32) -> bool {
        if !self.store.is_valid(row, col) {
            return false;
        }
        let geo = geometry(&self.store, self.regions);
        let Some((x, y)) = self.viewport.reveal(&geo, row, col) else {
            return false;
        };
        self.apply_scroll(x, y)
    }

    pub fn scroll_ranges(&self) -> ScrollRanges {
        self.viewport.ranges()
    }

    pub fn scroll_pos(&self) -> (u32, u32) {
        (self.viewport.scroll_x(), self.viewport.scroll_y())
    }

    /// Set absolute body scroll offsets (clamped).
    pub fn set_scroll_pos(&mut self, x: u32, y: u32) -> bool {
        self.apply_scroll(x, y)
    }

    pub fn scroll_by(&mut self, dx: i64, dy: i64) -> bool {
        let moved = self.viewport.scroll_by(dx, dy);
        if moved {
            self.scrolled();
        }
        moved
    }

    /// Scroll vertically by whole rows from the current top row.
    pub fn scroll_rows(&mut self, delta: i64) -> bool {
        let Some(top) = self.top_left_cell() else {
            return false;
        };
        let pinned = self.regions.pinned_rows();
        let last = self.store.row_count().saturating_sub(1);
        let target = i64::from(top.row).saturating_add(delta);
        let target = u32::try_from(target.max(i64::from(pinned)))
            .unwrap_or(last)
            .min(last);
        let rows = self.store.rows();
        let y = rows.start(target).saturating_sub(rows.start(pinned));
        self.apply_scroll(self.viewport.scroll_x(), y)
    }

    /// Client area changed size.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        self.layout_changed();
    }

    fn apply_scroll(&mut self, x: u32, y: u32) -> bool {
        let moved = self.viewport.set_scroll(x, y);
        if moved {
            self.scrolled();
        }
        moved
    }

    fn scrolled(&mut self) {
        trace!(
            "scrolled to ({}, {})",
            self.viewport.scroll_x(),
            self.viewport.scroll_y()
        );
        self.redraw.all = true;
    }

    /// Every cell the renderer should paint with its destination rectangle:
    /// pinned bands first, then the visible body. A merged region appears
    /// once, at its top-left cell, with the clipped rectangle of the block.
    pub fn visible_cells(&self) -> Vec<(CellId, Rect)> {
        let rows = self.store.row_count();
        let cols = self.store.col_count();
        let pinned_rows = self.regions.pinned_rows().min(rows);
        let pinned_cols = self.regions.pinned_cols().min(cols);
        let body = self.visible_body_range();
        let body_rows = body.map_or(0..0, |r| r.min_row..r.max_row + 1);
        let body_cols = body.map_or(0..0, |r| r.min_col..r.max_col + 1);

        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for row in (0..pinned_rows).chain(body_rows) {
            for col in (0..pinned_cols).chain(body_cols.clone()) {
                match self.merges.region_at(row, col) {
                    Some((handle, range)) => {
                        if !seen.insert(handle) {
                            continue;
                        }
                        if let Some(rect) = self.merged_cell_rect(handle) {
                            out.push((range.top_left(), rect));
                        }
                    }
                    None => {
                        if let Some(rect) = self.cell_rect(row, col) {
                            out.push((CellId::new(row, col), rect));
                        }
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    fn grid(rows: u32, cols: u32) -> Grid {
        Grid::with_size(rows, cols, 400, 300, GridConfig::default()).unwrap()
    }

    #[test]
    fn test_hit_test_normalises_merges() {
        let mut g = grid(20, 5);
        g.merge_cells(CellRange::new(1, 1, 2, 2));
        // (2, 2) spans x 128..192, y 40..60
        assert_eq!(g.cell_at_point(150, 45), Some(CellId::new(1, 1)));
        assert_eq!(g.cell_at_point(10, 10), Some(CellId::new(0, 0)));
        assert_eq!(g.cell_at_point(-1, 10), None);
    }

    #[test]
    fn test_frozen_rows_stay_pinned_while_scrolling() {
        let mut g = grid(500, 5);
        g.set_fixed_row_count(1).unwrap();
        g.set_frozen_row_count(2).unwrap();
        assert!(g.scroll_rows(100));
        let top = g.top_left_cell().unwrap();
        assert!(top.row >= 3);
        assert_eq!(top.row, 103);
        assert!(g.is_cell_visible(1, 0));
        assert!(g.is_cell_visible(2, 0));
        assert!(!g.is_cell_visible(3, 0));
        assert_eq!(g.cell_at_point(5, 45), Some(CellId::new(2, 0)));
        assert_eq!(g.cell_at_point(5, 65), Some(CellId::new(103, 0)));
    }

    #[test]
    fn test_ensure_visible_then_visible() {
        let mut g = grid(200, 30);
        g.set_fixed_row_count(1).unwrap();
        g.set_fixed_column_count(1).unwrap();
        for (row, col) in [(150, 20), (2, 2), (199, 29), (1, 1), (75, 3)] {
            g.ensure_visible(row, col);
            assert!(g.is_cell_visible(row, col), "({row}, {col})");
            assert!(g.is_cell_fully_visible(row, col), "({row}, {col})");
        }
        assert!(!g.ensure_visible(75, 3));
    }

    #[test]
    fn test_visible_cells_lists_merge_once() {
        let mut g = grid(3, 3);
        g.merge_cells(CellRange::new(0, 0, 1, 1));
        let cells = g.visible_cells();
        assert_eq!(cells.len(), 9 - 3);
        assert!(cells.contains(&(
            CellId::new(0, 0),
            Rect {
                x: 0,
                y: 0,
                width: 128,
                height: 40
            }
        )));
    }

    #[test]
    fn test_resize_viewport_recomputes_ranges() {
        let mut g = grid(10, 4);
        assert!(!g.scroll_ranges().v_visible);
        g.resize_viewport(400, 100);
        assert!(g.scroll_ranges().v_visible);
        assert!(g.set_scroll_pos(0, 10_000));
        assert_eq!(g.scroll_pos().1, g.scroll_ranges().v_max);
    }
}
