//! Merged-cell registry.
//!
//! An append-only list of rectangular ranges, each treated as one cell.
//! Handles are list indices: removing a region shifts every later handle
//! down by one. Regions may overlap; nothing here normalises them, and a
//! containment query returns the last registered region that matches.

use crate::cell_ref::{CellId, CellRange};

#[derive(Debug, Clone, Default)]
pub struct MergeRegistry {
    regions: Vec<CellRange>,
}

impl MergeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, handle: usize) -> Option<CellRange> {
        self.regions.get(handle).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, CellRange)> + '_ {
        self.regions.iter().copied().enumerate()
    }

    /// Register a region inside a `rows` x `cols` grid.
    ///
    /// Returns `None` for single-cell or out-of-bounds ranges.
    pub fn merge(&mut self, range: CellRange, rows: u32, cols: u32) -> Option<usize> {
        if range.is_single() || range.max_row >= rows || range.max_col >= cols {
            return None;
        }
        self.regions.push(range);
        Some(self.regions.len() - 1)
    }

    /// Remove the region at `handle`.
    pub fn split(&mut self, handle: usize) -> Option<CellRange> {
        if handle >= self.regions.len() {
            return None;
        }
        Some(self.regions.remove(handle))
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Region containing `(row, col)`; the last registered match wins.
    pub fn region_at(&self, row: u32, col: u32) -> Option<(usize, CellRange)> {
        let mut found = None;
        for (handle, range) in self.iter() {
            if range.contains(row, col) {
                found = Some((handle, range));
            }
        }
        found
    }

    /// Cell a merged region is addressed by (its top-left), or `cell` itself.
    pub fn origin_of(&self, cell: CellId) -> CellId {
        self.region_at(cell.row, cell.col)
            .map_or(cell, |(_, range)| range.top_left())
    }

    /// Grow `range` until it fully encloses every region it touches.
    ///
    /// Enclosing one region can newly overlap another, so this iterates to a
    /// fixed point.
    pub fn expand(&self, range: CellRange) -> CellRange {
        let mut current = range;
        loop {
            let mut grown = current;
            for (_, region) in self.iter() {
                if grown.intersects(&region) && !grown.encloses(&region) {
                    grown = grown.union(&region);
                }
            }
            if grown == current {
                return current;
            }
            current = grown;
        }
    }

    /// True if any cell of the region containing `(row, col)` satisfies `pred`.
    /// Cells outside any region test only themselves.
    pub fn any_in_region<F>(&self, row: u32, col: u32, mut pred: F) -> bool
    where
        F: FnMut(CellId) -> bool,
    {
        match self.region_at(row, col) {
            Some((_, range)) => range.cells().any(&mut pred),
            None => pred(CellId::new(row, col)),
        }
    }

    /// Drop regions that no longer fit a `rows` x `cols` grid.
    /// Returns how many were removed.
    pub fn retain_within(&mut self, rows: u32, cols: u32) -> usize {
        let before = self.regions.len();
        self.regions
            .retain(|r| r.max_row < rows && r.max_col < cols);
        before - self.regions.len()
    }

    /// Shift regions for a row inserted at `at`. A region that spans the
    /// insertion point grows by one row.
    pub fn insert_row(&mut self, at: u32) {
        for region in &mut self.regions {
            if region.min_row >= at {
                region.min_row += 1;
                region.max_row += 1;
            } else if region.max_row >= at {
                region.max_row += 1;
            }
        }
    }

    /// Shift regions for a removed row. Regions that collapse to a single
    /// cell or vanish are dropped.
    pub fn remove_row(&mut self, row: u32) {
        self.regions.retain_mut(|region| {
            if region.min_row > row {
                region.min_row -= 1;
                region.max_row -= 1;
                true
            } else if region.max_row >= row {
                if region.min_row == region.max_row {
                    return false;
                }
                region.max_row -= 1;
                !region.is_single()
            } else {
                true
            }
        });
    }
}
