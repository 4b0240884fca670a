//! gridctrl - spreadsheet-style grid-control engine
//!
//! Everything a tabular control needs except the pixels:
//! - Cell store with fixed header rows/columns and frozen scrollable bands
//! - Virtual mode: cell content fetched on demand from a data provider
//! - Merged cells (overlapping regions allowed, last registered wins)
//! - Cell, row, column and rectangle selection with Ctrl/Shift extension
//! - Pixel to cell mapping, visible ranges, `ensure_visible`, scrollbar ranges
//! - Row sorting: in place (array mode) or via a stable row permutation
//!
//! # Usage
//!
//! ```
//! use gridctrl::{CellRange, Grid, GridConfig};
//!
//! let mut grid = Grid::with_size(10, 3, 400, 300, GridConfig::default()).unwrap();
//! grid.set_fixed_row_count(1).unwrap();
//! grid.set_item_text(1, 1, "b");
//! grid.set_item_text(2, 1, "a");
//! grid.merge_cells(CellRange::new(2, 1, 3, 2));
//! grid.sort_text_items(1, true);
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod layout;
pub mod merge;
pub mod notify;
pub mod provider;
pub mod region;
pub mod selection;
pub mod sort;
pub mod store;
pub mod text;
pub mod types;

mod grid;
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use cell_ref::{CellId, CellRange};
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use grid::{Grid, Redraw, RedrawGuard, ResizeState};
pub use layout::{Rect, ScrollRanges};
pub use notify::{EventLog, GridEvent, GridHost, NotifyResponse};
pub use provider::{DataProvider, FieldMask};
pub use region::{Region, RegionCounts};
pub use sort::{compare_numeric, compare_text, CellComparator};
pub use text::Delimiter;
pub use wasm::GridView;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
