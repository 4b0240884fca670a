//! Common test utilities: grid builders and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use gridctrl::{Cell, CellId, FieldMask, Grid, GridConfig};

// ============================================================================
// Grid Builder
// ============================================================================

/// Fluent builder for test grids.
///
/// Defaults: 400x300 client area, 64x20 cells, no fixed or frozen lines.
pub struct GridBuilder {
    rows: u32,
    cols: u32,
    width: u32,
    height: u32,
    fixed_rows: u32,
    fixed_cols: u32,
    frozen_rows: u32,
    frozen_cols: u32,
    config: GridConfig,
    texts: Vec<(u32, u32, String)>,
}

impl GridBuilder {
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            width: 400,
            height: 300,
            fixed_rows: 0,
            fixed_cols: 0,
            frozen_rows: 0,
            frozen_cols: 0,
            config: GridConfig::default(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn client(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn fixed(mut self, rows: u32, cols: u32) -> Self {
        self.fixed_rows = rows;
        self.fixed_cols = cols;
        self
    }

    #[must_use]
    pub fn frozen(mut self, rows: u32, cols: u32) -> Self {
        self.frozen_rows = rows;
        self.frozen_cols = cols;
        self
    }

    #[must_use]
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn list_mode(mut self) -> Self {
        self.config.list_mode = true;
        self
    }

    #[must_use]
    pub fn virtual_mode(mut self) -> Self {
        self.config.virtual_mode = true;
        self
    }

    /// Put `text` at `(row, col)`.
    #[must_use]
    pub fn text(mut self, row: u32, col: u32, text: &str) -> Self {
        self.texts.push((row, col, text.to_string()));
        self
    }

    /// Fill column `col` from `first_row` downwards.
    #[must_use]
    pub fn column(mut self, col: u32, first_row: u32, values: &[&str]) -> Self {
        for (row, value) in (first_row..).zip(values) {
            self.texts.push((row, col, (*value).to_string()));
        }
        self
    }

    pub fn build(self) -> Grid {
        let mut grid = Grid::with_size(self.rows, self.cols, self.width, self.height, self.config)
            .expect("grid construction failed");
        grid.set_fixed_row_count(self.fixed_rows).unwrap();
        grid.set_fixed_column_count(self.fixed_cols).unwrap();
        grid.set_frozen_row_count(self.frozen_rows).unwrap();
        grid.set_frozen_column_count(self.frozen_cols).unwrap();
        for (row, col, text) in self.texts {
            assert!(grid.set_item_text(row, col, text), "cannot set ({row}, {col})");
        }
        grid
    }
}

// ============================================================================
// Providers
// ============================================================================

/// Provider that serves `values[logical_row]` in every column.
pub fn column_provider(values: Vec<String>) -> impl Fn(u32, u32, FieldMask, &mut Cell) {
    move |row: u32, _col: u32, mask: FieldMask, cell: &mut Cell| {
        if mask.contains(FieldMask::TEXT) {
            if let Some(v) = usize::try_from(row).ok().and_then(|i| values.get(i)) {
                cell.text.clone_from(v);
            }
        }
    }
}

/// Provider that writes `"row:col"` for the logical coordinate.
pub fn coordinate_provider(row: u32, col: u32, mask: FieldMask, cell: &mut Cell) {
    if mask.contains(FieldMask::TEXT) {
        cell.text = format!("{row}:{col}");
    }
}

// ============================================================================
// Assertions
// ============================================================================

/// Texts of `col` for display rows `first..last_exclusive`.
pub fn column_texts(grid: &Grid, col: u32, first: u32, last_exclusive: u32) -> Vec<String> {
    (first..last_exclusive)
        .map(|row| grid.item_text(row, col).unwrap_or_default())
        .collect()
}

/// Every valid cell reports the Selected bit exactly when it is in the
/// selection set.
pub fn assert_selection_consistent(grid: &Grid) {
    let selected = grid.selected_cells();
    for row in 0..grid.row_count() {
        for col in 0..grid.column_count() {
            let in_set = selected.contains(&CellId::new(row, col));
            let flagged = grid
                .cell(row, col)
                .unwrap()
                .state
                .contains(gridctrl::CellState::SELECTED);
            assert_eq!(in_set, flagged, "({row}, {col}) set={in_set} flag={flagged}");
        }
    }
}
