//! Structural operations: row/column counts, fixed and frozen regions, sizes,
//! row insertion/removal, column reordering, content mutators and layers.

use log::{debug, warn};

use super::{Grid, ResizeState};
use crate::cell_ref::CellId;
use crate::error::{GridError, Result};
use crate::notify::GridEvent;
use crate::store::{CellStore, Layer};
use crate::types::{Cell, CellState, Color, FontDesc, TextFormat};

impl Grid {
    fn enter_resize(&mut self) -> Result<()> {
        if self.resize_state == ResizeState::Resizing {
            return Err(GridError::Reentrant);
        }
        self.resize_state = ResizeState::Resizing;
        Ok(())
    }

    /// Resize the row axis.
    ///
    /// Growth appends default rows; shrinking destroys trailing rows, clips
    /// the row permutation and drops merges and selection that no longer fit.
    /// On allocation failure the grid keeps its previous size.
    pub fn set_row_count(&mut self, count: u32) -> Result<()> {
        self.enter_resize()?;
        let seed = self.defaults.body.clone();
        let height = self.config.default_row_height;
        let result = self.store.set_row_count(count, height, &seed);
        self.resize_state = ResizeState::Idle;
        if let Err(e) = result {
            warn!("set_row_count({count}) failed: {e}");
            self.invalidate_geometry();
            return Err(e);
        }
        debug!("row count -> {count}");
        self.after_resize();
        self.notify(count, self.store.col_count(), GridEvent::RowCountChanged);
        Ok(())
    }

    /// Resize the column axis. Same contract as [`Self::set_row_count`].
    pub fn set_column_count(&mut self, count: u32) -> Result<()> {
        self.enter_resize()?;
        let seed = self.defaults.body.clone();
        let width = self.config.default_col_width;
        let result = self.store.set_col_count(count, width, &seed);
        self.resize_state = ResizeState::Idle;
        if let Err(e) = result {
            warn!("set_column_count({count}) failed: {e}");
            self.invalidate_geometry();
            return Err(e);
        }
        debug!("column count -> {count}");
        self.after_resize();
        self.notify(self.store.row_count(), count, GridEvent::ColumnCountChanged);
        Ok(())
    }

    fn after_resize(&mut self) {
        let rows = self.store.row_count();
        let cols = self.store.col_count();
        self.regions.clamp_to(rows, cols);
        let dropped = self.merges.retain_within(rows, cols);
        if dropped > 0 {
            debug!("dropped {dropped} merge regions outside {rows}x{cols}");
        }
        self.selection
            .remove_where(|c| c.row >= rows || c.col >= cols);
        self.drop_stale_cursor(|c| c.row >= rows || c.col >= cols);
        if self.sort_column.is_some_and(|c| c >= cols) {
            self.sort_column = None;
        }
        self.layout_changed();
    }

    /// Forget focus/anchor if they match `stale`.
    fn drop_stale_cursor<F>(&mut self, stale: F)
    where
        F: Fn(CellId) -> bool,
    {
        if self.selection.focus().is_some_and(&stale) {
            self.selection.set_focus(None);
        }
        if self.selection.anchor().is_some_and(&stale) {
            self.selection.set_anchor(None);
        }
    }

    pub fn set_fixed_row_count(&mut self, count: u32) -> Result<()> {
        let mut regions = self.regions;
        regions.fixed_rows = count;
        regions.validate(self.store.row_count(), self.store.col_count())?;
        self.regions = regions;
        debug!("fixed rows -> {count}");
        self.clear_fixed_selection();
        self.layout_changed();
        Ok(())
    }

    pub fn set_fixed_column_count(&mut self, count: u32) -> Result<()> {
        let mut regions = self.regions;
        regions.fixed_cols = count;
        regions.validate(self.store.row_count(), self.store.col_count())?;
        self.regions = regions;
        debug!("fixed columns -> {count}");
        self.clear_fixed_selection();
        self.layout_changed();
        Ok(())
    }

    /// Pin `count` rows after the fixed ones; they stay put while the body scrolls.
    pub fn set_frozen_row_count(&mut self, count: u32) -> Result<()> {
        let mut regions = self.regions;
        regions.frozen_rows = count;
        regions.validate(self.store.row_count(), self.store.col_count())?;
        self.regions = regions;
        debug!("frozen rows -> {count}");
        self.layout_changed();
        Ok(())
    }

    pub fn set_frozen_column_count(&mut self, count: u32) -> Result<()> {
        let mut regions = self.regions;
        regions.frozen_cols = count;
        regions.validate(self.store.row_count(), self.store.col_count())?;
        self.regions = regions;
        debug!("frozen columns -> {count}");
        self.layout_changed();
        Ok(())
    }

    pub fn fixed_row_count(&self) -> u32 {
        self.regions.fixed_rows
    }

    pub fn fixed_column_count(&self) -> u32 {
        self.regions.fixed_cols
    }

    pub fn frozen_row_count(&self) -> u32 {
        self.regions.frozen_rows
    }

    pub fn frozen_column_count(&self) -> u32 {
        self.regions.frozen_cols
    }

    /// Fixed cells are never selected or focused.
    fn clear_fixed_selection(&mut self) {
        let regions = self.regions;
        let removed = self
            .selection
            .remove_where(|c| regions.is_fixed_cell(c.row, c.col));
        if !removed.is_empty() {
            debug!("deselected {} cells now in the fixed region", removed.len());
        }
        self.drop_stale_cursor(|c| regions.is_fixed_cell(c.row, c.col));
    }

    // ========================================================================
    // Sizes
    // ========================================================================

    pub fn row_height(&self, row: u32) -> Option<u32> {
        (row < self.store.row_count()).then(|| self.store.rows().size(row))
    }

    pub fn column_width(&self, col: u32) -> Option<u32> {
        (col < self.store.col_count()).then(|| self.store.cols().size(col))
    }

    pub fn set_row_height(&mut self, row: u32, height: u32) -> bool {
        if !self.store.rows_mut().set_size(row, height) {
            return false;
        }
        self.layout_changed();
        true
    }

    pub fn set_column_width(&mut self, col: u32, width: u32) -> bool {
        if !self.store.cols_mut().set_size(col, width) {
            return false;
        }
        self.layout_changed();
        true
    }

    // ========================================================================
    // Rows and columns
    // ========================================================================

    /// Insert a row before display row `at` (`at == row_count` appends).
    /// Returns the new row's index.
    pub fn insert_row(&mut self, at: u32) -> Result<u32> {
        let rows = self.store.row_count();
        if at > rows {
            return Err(GridError::InvalidAddress { row: at, col: 0 });
        }
        self.enter_resize()?;
        let seed = self.defaults.body.clone();
        let result = self
            .store
            .insert_row(at, self.config.default_row_height, &seed);
        self.resize_state = ResizeState::Idle;
        if let Err(e) = result {
            warn!("insert_row({at}) failed: {e}");
            self.invalidate_geometry();
            return Err(e);
        }
        self.merges.insert_row(at);
        self.reset_selection_silently();
        debug!("inserted row at {at}");
        self.layout_changed();
        self.notify(self.store.row_count(), self.store.col_count(), GridEvent::RowCountChanged);
        Ok(at)
    }

    /// Remove display row `row`. Removing a fixed or frozen row shrinks
    /// that band.
    pub fn delete_row(&mut self, row: u32) -> bool {
        if self.resize_state == ResizeState::Resizing || !self.store.remove_row(row) {
            return false;
        }
        if row < self.regions.fixed_rows {
            self.regions.fixed_rows -= 1;
        } else if row < self.regions.pinned_rows() {
            self.regions.frozen_rows -= 1;
        }
        self.merges.remove_row(row);
        self.reset_selection_silently();
        debug!("deleted row {row}");
        self.layout_changed();
        self.notify(self.store.row_count(), self.store.col_count(), GridEvent::RowCountChanged);
        true
    }

    /// Remove every row after the fixed header rows.
    pub fn delete_non_fixed_rows(&mut self) -> Result<()> {
        self.set_row_count(self.regions.fixed_rows)
    }

    /// Remove every row, column and merge region.
    pub fn delete_all_items(&mut self) -> Result<()> {
        self.reset_selection_silently();
        self.merges.clear();
        self.sort_column = None;
        self.set_row_count(0)?;
        self.set_column_count(0)?;
        self.store = CellStore::new(self.store.is_virtual());
        self.invalidate_geometry();
        Ok(())
    }

    /// Drag-reorder a column. Fixed columns cannot move or be displaced.
    pub fn move_column(&mut self, from: u32, to: u32) -> bool {
        if !self.config.allow_column_reorder
            || from < self.regions.fixed_cols
            || to < self.regions.fixed_cols
            || !self.store.move_column(from, to)
        {
            return false;
        }
        self.reset_selection_silently();
        if let Some(col) = self.sort_column {
            self.sort_column = Some(moved_index(col, from, to));
        }
        debug!("moved column {from} -> {to}");
        self.layout_changed();
        true
    }

    /// Logical column shown at display position `col`.
    pub fn logical_column(&self, col: u32) -> Option<u32> {
        self.store.logical_col(col)
    }

    /// Logical row shown at display position `row`.
    pub fn logical_row(&self, row: u32) -> Option<u32> {
        self.store.logical_row(row)
    }

    /// Switch between stored and provider-backed content. Counts and
    /// geometry are kept; stored content is dropped.
    pub fn set_virtual_mode(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.store.is_virtual() {
            return Ok(());
        }
        let rows = self.store.row_count();
        let cols = self.store.col_count();
        let heights = self.store.rows().sizes().to_vec();
        let widths = self.store.cols().sizes().to_vec();
        let mut store = CellStore::new(enabled);
        let seed = self.defaults.body.clone();
        store.set_col_count(cols, self.config.default_col_width, &seed)?;
        store.set_row_count(rows, self.config.default_row_height, &seed)?;
        store.rows_mut().set_sizes(heights);
        store.cols_mut().set_sizes(widths);
        self.store = store;
        self.config.virtual_mode = enabled;
        self.sort_column = None;
        self.reset_selection_silently();
        debug!("virtual mode -> {enabled}");
        self.invalidate_geometry();
        Ok(())
    }

    pub(crate) fn reset_selection_silently(&mut self) {
        self.selection.clear();
        self.selection.set_focus(None);
        self.selection.set_anchor(None);
        self.gesture = None;
    }

    // ========================================================================
    // Content mutators (array mode; virtual content lives in the provider)
    // ========================================================================

    fn update_cell<F>(&mut self, row: u32, col: u32, f: F) -> bool
    where
        F: FnOnce(&mut Cell),
    {
        if self.store.is_virtual() {
            return false;
        }
        let Some(cell) = self.store.cell_mut(row, col) else {
            return false;
        };
        f(cell);
        self.redraw_region_of(CellId::new(row, col));
        true
    }

    pub fn set_item_text(&mut self, row: u32, col: u32, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update_cell(row, col, |c| c.text = text)
    }

    pub fn set_item_data(&mut self, row: u32, col: u32, data: u64) -> bool {
        self.update_cell(row, col, |c| c.data = data)
    }

    pub fn item_data(&self, row: u32, col: u32) -> Option<u64> {
        self.cell(row, col).map(|c| c.data)
    }

    pub fn set_item_image(&mut self, row: u32, col: u32, image: Option<u32>) -> bool {
        self.update_cell(row, col, |c| c.image = image)
    }

    pub fn set_item_format(&mut self, row: u32, col: u32, format: TextFormat) -> bool {
        self.update_cell(row, col, |c| c.format = format)
    }

    pub fn set_item_fg_color(&mut self, row: u32, col: u32, color: Color) -> bool {
        self.update_cell(row, col, |c| c.fg = color)
    }

    pub fn set_item_bg_color(&mut self, row: u32, col: u32, color: Color) -> bool {
        self.update_cell(row, col, |c| c.bg = color)
    }

    pub fn set_item_font(&mut self, row: u32, col: u32, font: Option<FontDesc>) -> bool {
        self.update_cell(row, col, |c| c.font = font)
    }

    /// Set the stored state bits (read-only, drop-highlighted, modified).
    /// Selection, focus and fixed bits are derived and ignored here.
    pub fn set_item_state(&mut self, row: u32, col: u32, state: CellState) -> bool {
        self.update_cell(row, col, |c| c.state = state.persistent())
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Serialized column order and widths.
    pub fn layer(&self) -> Result<Vec<u8>> {
        self.store.layer().to_bytes()
    }

    pub fn layer_base64(&self) -> Result<String> {
        self.store.layer().to_base64()
    }

    /// Restore a layer from [`Self::layer`]. A blob that cannot be decoded or
    /// was taken from a different column count is ignored.
    pub fn set_layer(&mut self, data: &[u8]) -> bool {
        match Layer::from_bytes(data) {
            Ok(layer) => self.apply_layer(layer),
            Err(e) => {
                warn!("ignoring column layer: {e}");
                false
            }
        }
    }

    pub fn set_layer_base64(&mut self, text: &str) -> bool {
        match Layer::from_base64(text) {
            Ok(layer) => self.apply_layer(layer),
            Err(e) => {
                warn!("ignoring column layer: {e}");
                false
            }
        }
    }

    fn apply_layer(&mut self, layer: Layer) -> bool {
        let signature = layer.signature;
        if !self.store.apply_layer(layer) {
            warn!(
                "ignoring column layer for {signature} columns (grid has {})",
                self.store.col_count()
            );
            return false;
        }
        self.reset_selection_silently();
        self.sort_column = None;
        self.layout_changed();
        true
    }
}

/// Where the entry at `index` ends up after moving `from` to `to`.
fn moved_index(index: u32, from: u32, to: u32) -> u32 {
    if index == from {
        to
    } else if from < index && index <= to {
        index - 1
    } else if to <= index && index < from {
        index + 1
    } else {
        index
    }
}
