//! Cell storage and per-axis geometry.
//!
//! In array mode every (row, col) owns a [`Cell`], stored by logical row and
//! logical column. In virtual mode no cells are stored at all; only row
//! heights, column widths and the two display permutations exist.
//!
//! All public coordinates are display coordinates. Columns always go through
//! the column-order permutation; rows go through the row-order permutation
//! in virtual mode only (array-mode sorting moves the rows themselves).

mod layer;
mod permutation;

pub use layer::Layer;
pub use permutation::Permutation;

use crate::error::{GridError, Result};
use crate::layout::Extents;
use crate::types::Cell;

#[derive(Debug, Clone)]
pub struct CellStore {
    /// `rows[logical_row][logical_col]`, empty in virtual mode
    rows: Vec<Vec<Cell>>,
    row_extents: Extents,
    col_extents: Extents,
    col_order: Permutation,
    row_order: Permutation,
    virtual_mode: bool,
}

impl CellStore {
    pub fn new(virtual_mode: bool) -> Self {
        Self {
            rows: Vec::new(),
            row_extents: Extents::default(),
            col_extents: Extents::default(),
            col_order: Permutation::default(),
            row_order: Permutation::default(),
            virtual_mode,
        }
    }

    pub fn is_virtual(&self) -> bool {
        self.virtual_mode
    }

    pub fn row_count(&self) -> u32 {
        self.row_extents.len()
    }

    pub fn col_count(&self) -> u32 {
        self.col_extents.len()
    }

    pub fn rows(&self) -> &Extents {
        &self.row_extents
    }

    pub fn cols(&self) -> &Extents {
        &self.col_extents
    }

    pub fn rows_mut(&mut self) -> &mut Extents {
        &mut self.row_extents
    }

    pub fn cols_mut(&mut self) -> &mut Extents {
        &mut self.col_extents
    }

    pub fn col_order(&self) -> &Permutation {
        &self.col_order
    }

    pub fn row_order(&self) -> &Permutation {
        &self.row_order
    }

    pub(crate) fn row_order_mut(&mut self) -> &mut Permutation {
        &mut self.row_order
    }

    pub fn is_valid(&self, row: u32, col: u32) -> bool {
        row < self.row_count() && col < self.col_count()
    }

    /// Logical row for a display row.
    pub fn logical_row(&self, row: u32) -> Option<u32> {
        if row >= self.row_count() {
            return None;
        }
        if self.virtual_mode {
            self.row_order.logical(row)
        } else {
            Some(row)
        }
    }

    /// Logical column for a display column.
    pub fn logical_col(&self, col: u32) -> Option<u32> {
        self.col_order.logical(col)
    }

    /// Stored cell at display coordinates (array mode only).
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        let row = self.logical_row(row)?;
        let col = self.logical_col(col)?;
        self.rows.get(row as usize)?.get(col as usize)
    }

    pub fn cell_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        let row = self.logical_row(row)?;
        let col = self.logical_col(col)?;
        self.rows.get_mut(row as usize)?.get_mut(col as usize)
    }

    /// Resize the row axis.
    ///
    /// Growing appends `seed` cells (array mode) and `height` sized rows;
    /// shrinking destroys trailing rows. On allocation failure nothing changes.
    pub fn set_row_count(&mut self, count: u32, height: u32, seed: &Cell) -> Result<()> {
        let current = self.row_count();
        if count == current {
            return Ok(());
        }
        if count > current {
            let added = (count - current) as usize;
            let mut fresh: Vec<Vec<Cell>> = Vec::new();
            if !self.virtual_mode {
                fresh
                    .try_reserve_exact(added)
                    .map_err(|_| alloc_failure(count))?;
                for _ in 0..added {
                    fresh.push(new_row(self.col_count(), seed)?);
                }
                self.rows
                    .try_reserve(added)
                    .map_err(|_| alloc_failure(count))?;
            }
            let mut order = self.row_order.clone();
            if self.virtual_mode {
                order.resize(count)?;
            }
            let mut extents = self.row_extents.clone();
            extents.resize(count, height)?;
            // Commit
            self.rows.extend(fresh);
            self.row_order = order;
            self.row_extents = extents;
        } else {
            if !self.virtual_mode {
                self.rows.truncate(count as usize);
            } else {
                self.row_order.resize(count)?;
            }
            self.row_extents.resize(count, height)?;
        }
        Ok(())
    }

    /// Resize the column axis. Same contract as [`Self::set_row_count`].
    pub fn set_col_count(&mut self, count: u32, width: u32, seed: &Cell) -> Result<()> {
        let current = self.col_count();
        if count == current {
            return Ok(());
        }
        if count > current {
            let added = (count - current) as usize;
            for row in &mut self.rows {
                row.try_reserve_exact(added)
                    .map_err(|_| alloc_failure(count))?;
            }
            let mut order = self.col_order.clone();
            order.resize(count)?;
            let mut extents = self.col_extents.clone();
            extents.resize(count, width)?;
            // Commit: capacity is already reserved, so these cannot fail.
            for row in &mut self.rows {
                row.resize(count as usize, seed.clone());
            }
            self.col_order = order;
            self.col_extents = extents;
        } else {
            for row in &mut self.rows {
                row.truncate(count as usize);
            }
            self.col_order.resize(count)?;
            self.col_extents.resize(count, width)?;
        }
        Ok(())
    }

    /// Insert a row before display row `at` (array mode).
    pub fn insert_row(&mut self, at: u32, height: u32, seed: &Cell) -> Result<()> {
        if self.virtual_mode {
            let logical = at.min(self.row_count());
            self.row_order.insert(at, logical)?;
        } else {
            let row = new_row(self.col_count(), seed)?;
            self.rows.try_reserve(1).map_err(|_| alloc_failure(1))?;
            let at_index = (at as usize).min(self.rows.len());
            self.rows.insert(at_index, row);
        }
        self.row_extents.insert(at, height)
    }

    /// Remove display row `row`.
    pub fn remove_row(&mut self, row: u32) -> bool {
        if row >= self.row_count() {
            return false;
        }
        if self.virtual_mode {
            self.row_order.remove(row);
        } else if (row as usize) < self.rows.len() {
            self.rows.remove(row as usize);
        }
        self.row_extents.remove(row);
        true
    }

    /// Swap two display rows with their heights (array-mode sort).
    pub fn swap_rows(&mut self, a: u32, b: u32) {
        if a == b || a >= self.row_count() || b >= self.row_count() {
            return;
        }
        if self.virtual_mode {
            self.row_order.swap(a, b);
        } else {
            self.rows.swap(a as usize, b as usize);
        }
        self.row_extents.swap(a, b);
    }

    /// Drag-reorder a column; its width travels with it.
    pub fn move_column(&mut self, from: u32, to: u32) -> bool {
        if !self.col_order.move_entry(from, to) {
            return false;
        }
        self.col_extents.move_entry(from, to);
        true
    }

    /// Reset every stored cell in the given display rows to `seed`.
    pub fn reset_rows(&mut self, rows: std::ops::Range<u32>, seed: &Cell) {
        for row in rows {
            let Some(logical) = self.logical_row(row) else {
                continue;
            };
            if let Some(cells) = self.rows.get_mut(logical as usize) {
                for cell in cells.iter_mut() {
                    cell.clone_from(seed);
                }
            }
        }
    }

    pub fn layer(&self) -> Layer {
        Layer {
            signature: self.col_count(),
            order: self.col_order.as_slice().to_vec(),
            widths: self.col_extents.sizes().to_vec(),
        }
    }

    /// Restore a saved layer. A layer taken from a different column count is
    /// ignored; returns whether it was applied.
    pub fn apply_layer(&mut self, layer: Layer) -> bool {
        if layer.signature != self.col_count()
            || layer.widths.len() != layer.order.len()
            || layer.order.len() != self.col_count() as usize
        {
            return false;
        }
        let mut order = self.col_order.clone();
        if !order.set_order(layer.order) {
            return false;
        }
        self.col_order = order;
        self.col_extents.set_sizes(layer.widths);
        true
    }
}

fn alloc_failure(requested: u32) -> GridError {
    GridError::AllocationFailure {
        requested: requested as usize,
    }
}

fn new_row(cols: u32, seed: &Cell) -> Result<Vec<Cell>> {
    let mut row = Vec::new();
    row.try_reserve_exact(cols as usize)
        .map_err(|_| alloc_failure(cols))?;
    row.resize(cols as usize, seed.clone());
    Ok(row)
}
