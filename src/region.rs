//! Fixed / frozen / body classification of rows and columns.
//!
//! Leading rows (columns) are partitioned as:
//! - `0..fixed`: fixed headers, never scroll and never take focus
//! - `fixed..fixed + frozen`: frozen content pinned in place
//! - the rest: the scrolling body

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Which band of an axis an index falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Fixed,
    Frozen,
    Body,
}

/// Fixed and frozen counts for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCounts {
    pub fixed_rows: u32,
    pub fixed_cols: u32,
    pub frozen_rows: u32,
    pub frozen_cols: u32,
}

impl RegionCounts {
    /// Rows that do not scroll vertically (fixed + frozen).
    pub fn pinned_rows(&self) -> u32 {
        self.fixed_rows + self.frozen_rows
    }

    /// Columns that do not scroll horizontally (fixed + frozen).
    pub fn pinned_cols(&self) -> u32 {
        self.fixed_cols + self.frozen_cols
    }

    pub fn row_region(&self, row: u32) -> Region {
        classify(row, self.fixed_rows, self.frozen_rows)
    }

    pub fn col_region(&self, col: u32) -> Region {
        classify(col, self.fixed_cols, self.frozen_cols)
    }

    pub fn is_fixed_row(&self, row: u32) -> bool {
        row < self.fixed_rows
    }

    pub fn is_fixed_col(&self, col: u32) -> bool {
        col < self.fixed_cols
    }

    /// A cell is fixed if either its row or its column is fixed.
    pub fn is_fixed_cell(&self, row: u32, col: u32) -> bool {
        self.is_fixed_row(row) || self.is_fixed_col(col)
    }

    /// Check `fixed + frozen <= total` on both axes.
    pub fn validate(&self, rows: u32, cols: u32) -> Result<()> {
        check("row", self.fixed_rows, self.frozen_rows, rows)?;
        check("column", self.fixed_cols, self.frozen_cols, cols)
    }

    /// Shrink counts so they fit a grid of the given size.
    ///
    /// Fixed counts win over frozen ones when both cannot fit.
    pub fn clamp_to(&mut self, rows: u32, cols: u32) {
        self.fixed_rows = self.fixed_rows.min(rows);
        self.frozen_rows = self.frozen_rows.min(rows - self.fixed_rows);
        self.fixed_cols = self.fixed_cols.min(cols);
        self.frozen_cols = self.frozen_cols.min(cols - self.fixed_cols);
    }
}

fn classify(index: u32, fixed: u32, frozen: u32) -> Region {
    if index < fixed {
        Region::Fixed
    } else if index < fixed + frozen {
        Region::Frozen
    } else {
        Region::Body
    }
}

fn check(axis: &'static str, fixed: u32, frozen: u32, total: u32) -> Result<()> {
    match fixed.checked_add(frozen) {
        Some(sum) if sum <= total => Ok(()),
        _ => Err(GridError::InvalidCount {
            what: axis,
            count: fixed.saturating_add(frozen),
            limit: total,
        }),
    }
}
