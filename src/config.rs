//! Grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::DEFAULT_SCROLLBAR_THICKNESS;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: u32 = 64;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: u32 = 20;

/// Behaviour switches and default geometry for a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub default_row_height: u32,
    pub default_col_width: u32,
    pub scrollbar_thickness: u32,
    /// Only one row may be selected at a time
    pub single_row_selection: bool,
    /// Only one column may be selected at a time
    pub single_col_selection: bool,
    /// Body clicks select whole rows
    pub list_mode: bool,
    pub enable_selection: bool,
    /// Clicking a fixed row header selects the column beneath it
    pub fixed_row_selection: bool,
    /// Clicking a fixed column header selects the row beside it
    pub fixed_col_selection: bool,
    pub editable: bool,
    pub virtual_mode: bool,
    pub allow_column_reorder: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_col_width: DEFAULT_COL_WIDTH,
            scrollbar_thickness: DEFAULT_SCROLLBAR_THICKNESS,
            single_row_selection: false,
            single_col_selection: false,
            list_mode: false,
            enable_selection: true,
            fixed_row_selection: true,
            fixed_col_selection: true,
            editable: true,
            virtual_mode: false,
            allow_column_reorder: true,
        }
    }
}

impl GridConfig {
    /// Parse a JSON config; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when only one row or column may be selected at a time.
    pub fn single_line_selection(&self) -> bool {
        self.single_row_selection || self.single_col_selection
    }
}
