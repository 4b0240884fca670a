//! Merged cells on the grid: registration, lookup and on-screen bounds.

use log::debug;

use super::{geometry, Grid};
use crate::cell_ref::CellRange;
use crate::layout::{Axis, Rect};

impl Grid {
    /// Merge `range` into one cell. Returns its handle, or `None` for a
    /// single-cell or out-of-bounds range. Overlapping regions are allowed.
    pub fn merge_cells(&mut self, range: CellRange) -> Option<usize> {
        let handle = self
            .merges
            .merge(range, self.store.row_count(), self.store.col_count())?;
        debug!("merged {range:?} as handle {handle}");
        self.redraw.all = true;
        Some(handle)
    }

    /// Remove the region at `handle`. Every later handle shifts down by one.
    pub fn split_cells(&mut self, handle: usize) -> Option<CellRange> {
        let range = self.merges.split(handle)?;
        debug!("split handle {handle} ({range:?})");
        self.redraw.all = true;
        Some(range)
    }

    /// Region containing `(row, col)`. With overlapping regions the last
    /// registered one wins.
    pub fn merge_at(&self, row: u32, col: u32) -> Option<(usize, CellRange)> {
        self.merges.region_at(row, col)
    }

    pub fn merge_count(&self) -> usize {
        self.merges.len()
    }

    /// On-screen rectangle of a merged region, clipped to what is scrolled
    /// into view. `None` for a stale handle or a region entirely off screen.
    pub fn merged_cell_rect(&self, handle: usize) -> Option<Rect> {
        let region = self.merges.get(handle)?;
        let geo = geometry(&self.store, self.regions);
        let rows = self.viewport.row_axis(&geo);
        let cols = self.viewport.col_axis(&geo);
        let (min_row, max_row) = clip_span(&rows, region.min_row, region.max_row)?;
        let (min_col, max_col) = clip_span(&cols, region.min_col, region.max_col)?;
        Some(
            self.viewport
                .raw_rect(&geo, CellRange::new(min_row, min_col, max_row, max_col)),
        )
    }
}

/// Clip `min..=max` along one axis: body entries scrolled past the anchor are
/// dropped, then each edge shrinks one entry at a time until it is visible.
fn clip_span(axis: &Axis<'_>, min: u32, max: u32) -> Option<(u32, u32)> {
    let mut lo = min;
    let mut hi = max;
    if lo >= axis.pinned {
        if let Some(first) = axis.first_visible() {
            lo = lo.max(first);
        }
    }
    while lo <= hi && !axis.is_visible(lo, false) {
        lo += 1;
    }
    while hi >= lo && !axis.is_visible(hi, false) {
        if hi == 0 {
            return None;
        }
        hi -= 1;
    }
    (lo <= hi).then_some((lo, hi))
}
