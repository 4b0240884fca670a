//! JavaScript façade over [`Grid`].
//!
//! `GridView` exposes the engine to a browser host: the host forwards pointer
//! and keyboard input, asks for the list of visible cells and paints them
//! itself. Structured results cross the boundary through `serde-wasm-bindgen`.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridctrl';
//! await init();
//! const grid = new GridView(100, 5, 800, 600, null);
//! grid.set_fixed_row_count(1);
//! grid.mouse_down(120, 45, false, false);
//! for (const cell of grid.visible_cells()) { paint(cell); }
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use serde::Deserialize;

use crate::cell_ref::{CellId, CellRange};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::grid::Grid;
use crate::layout::Rect;
use crate::text::{self, Delimiter};
use crate::types::{Key, Modifiers};

#[cfg(target_arch = "wasm32")]
use crate::notify::{GridEvent, GridHost, NotifyResponse};
#[cfg(target_arch = "wasm32")]
use crate::provider::{DataProvider, FieldMask};
#[cfg(target_arch = "wasm32")]
use crate::types::{Cell, Color};

/// One paintable cell handed to JavaScript.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VisibleCell {
    row: u32,
    col: u32,
    rect: Rect,
    text: String,
    fg: String,
    bg: String,
    selected: bool,
    focused: bool,
    fixed: bool,
}

#[wasm_bindgen]
pub struct GridView {
    grid: Grid,
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid. `config_json` uses the camelCase `GridConfig` keys;
    /// missing keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        rows: u32,
        cols: u32,
        width: u32,
        height: u32,
        config_json: Option<String>,
    ) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let config = match config_json {
            Some(json) => GridConfig::from_json(&json)?,
            None => GridConfig::default(),
        };
        let grid = Grid::with_size(rows, cols, width, height, config)?;
        Ok(GridView { grid })
    }

    pub fn row_count(&self) -> u32 {
        self.grid.row_count()
    }

    pub fn column_count(&self) -> u32 {
        self.grid.column_count()
    }

    pub fn set_row_count(&mut self, count: u32) -> Result<(), JsValue> {
        Ok(self.grid.set_row_count(count)?)
    }

    pub fn set_column_count(&mut self, count: u32) -> Result<(), JsValue> {
        Ok(self.grid.set_column_count(count)?)
    }

    pub fn set_fixed_row_count(&mut self, count: u32) -> Result<(), JsValue> {
        Ok(self.grid.set_fixed_row_count(count)?)
    }

    pub fn set_fixed_column_count(&mut self, count: u32) -> Result<(), JsValue> {
        Ok(self.grid.set_fixed_column_count(count)?)
    }

    pub fn set_frozen_row_count(&mut self, count: u32) -> Result<(), JsValue> {
        Ok(self.grid.set_frozen_row_count(count)?)
    }

    pub fn set_frozen_column_count(&mut self, count: u32) -> Result<(), JsValue> {
        Ok(self.grid.set_frozen_column_count(count)?)
    }

    pub fn set_row_height(&mut self, row: u32, height: u32) -> bool {
        self.grid.set_row_height(row, height)
    }

    pub fn set_column_width(&mut self, col: u32, width: u32) -> bool {
        self.grid.set_column_width(col, width)
    }

    pub fn set_item_text(&mut self, row: u32, col: u32, text: String) -> bool {
        self.grid.set_item_text(row, col, text)
    }

    pub fn item_text(&self, row: u32, col: u32) -> Option<String> {
        self.grid.item_text(row, col)
    }

    // Input

    pub fn mouse_down(&mut self, x: i32, y: i32, ctrl: bool, shift: bool) -> bool {
        self.grid.mouse_down(x, y, Modifiers { ctrl, shift })
    }

    pub fn mouse_move(&mut self, x: i32, y: i32) -> bool {
        self.grid.mouse_move(x, y)
    }

    pub fn mouse_up(&mut self) -> bool {
        self.grid.mouse_up()
    }

    /// Handle a DOM `KeyboardEvent.key` value; unknown keys are ignored.
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        match parse_key(key) {
            Some(key) => self.grid.key_down(key, Modifiers { ctrl, shift }),
            None => false,
        }
    }

    pub fn select_all(&mut self) -> bool {
        self.grid.select_all()
    }

    pub fn clear_selection(&mut self) {
        self.grid.clear_selection();
    }

    /// Bounding range of the selection as `{minRow, minCol, maxRow, maxCol}`.
    pub fn selected_range(&self) -> Result<JsValue, JsValue> {
        to_js(&self.grid.selected_range())
    }

    // Viewport

    pub fn resize(&mut self, width: u32, height: u32) {
        self.grid.resize_viewport(width, height);
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> bool {
        self.grid.scroll_by(to_i64(dx), to_i64(dy))
    }

    pub fn set_scroll_pos(&mut self, x: u32, y: u32) -> bool {
        self.grid.set_scroll_pos(x, y)
    }

    pub fn ensure_visible(&mut self, row: u32, col: u32) -> bool {
        self.grid.ensure_visible(row, col)
    }

    pub fn scroll_ranges(&self) -> Result<JsValue, JsValue> {
        to_js(&self.grid.scroll_ranges())
    }

    /// Cells to paint, each with its rectangle, text and resolved colors.
    pub fn visible_cells(&self) -> Result<JsValue, JsValue> {
        let cells: Vec<VisibleCell> = self
            .grid
            .visible_cells()
            .into_iter()
            .filter_map(|(id, rect)| self.describe(id, rect))
            .collect();
        to_js(&cells)
    }

    /// Drain pending repaint work as `{all, cells}`.
    pub fn take_redraw(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.grid.take_redraw())
    }

    // Merges, sorting, text

    /// Merge a range; returns the handle or -1.
    pub fn merge_cells(&mut self, min_row: u32, min_col: u32, max_row: u32, max_col: u32) -> i32 {
        self.grid
            .merge_cells(CellRange::new(min_row, min_col, max_row, max_col))
            .and_then(|h| i32::try_from(h).ok())
            .unwrap_or(-1)
    }

    /// Remove a merge region. Later handles shift down by one.
    pub fn split_cells(&mut self, handle: u32) -> Result<(), JsValue> {
        let handle = usize::try_from(handle).unwrap_or(usize::MAX);
        match self.grid.split_cells(handle) {
            Some(_) => Ok(()),
            None => Err(GridError::StaleHandle(handle).into()),
        }
    }

    pub fn sort_text(&mut self, col: u32, ascending: bool) -> bool {
        self.grid.sort_text_items(col, ascending)
    }

    pub fn sort_numeric(&mut self, col: u32, ascending: bool) -> bool {
        self.grid.sort_numeric_items(col, ascending)
    }

    pub fn copy_selection(&self) -> String {
        text::copy_selection(&self.grid)
    }

    pub fn paste(&mut self, row: u32, col: u32, text: &str) -> u32 {
        let written = text::paste_text(&mut self.grid, CellId::new(row, col), text);
        u32::try_from(written).unwrap_or(u32::MAX)
    }

    /// Replace the content with CSV/TSV text (separator auto-detected).
    pub fn load_text(&mut self, data: &str) -> Result<(), JsValue> {
        text::load_delimited(&mut self.grid, data, Delimiter::detect(data))?;
        Ok(())
    }

    pub fn layer(&self) -> Result<String, JsValue> {
        Ok(self.grid.layer_base64()?)
    }

    pub fn set_layer(&mut self, layer: &str) -> bool {
        self.grid.set_layer_base64(layer)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Switch to virtual mode with `callback(row, col)` supplying content.
    /// The callback returns a string, or an object with optional
    /// `text`, `fg`, `bg` (0xRRGGBB) and `data` fields.
    pub fn set_virtual_provider(&mut self, callback: Function) -> Result<(), JsValue> {
        self.grid.set_virtual_mode(true)?;
        self.grid.set_data_provider(JsProvider(callback));
        Ok(())
    }

    /// Receive `callback(row, col, eventName)` for every notification.
    /// Returning `false` from a `BeginEdit` call cancels the edit.
    pub fn set_notify_callback(&mut self, callback: Function) {
        self.grid.set_host(JsHost(callback));
    }
}

impl GridView {
    fn describe(&self, id: CellId, rect: Rect) -> Option<VisibleCell> {
        let cell = self.grid.cell(id.row, id.col)?;
        let template = self.grid.template(id.row, id.col);
        let (fg, bg) = cell.paint_colors(template);
        Some(VisibleCell {
            row: id.row,
            col: id.col,
            rect,
            text: cell.text.clone(),
            fg: fg.to_hex(),
            bg: bg.to_hex(),
            selected: self.grid.is_cell_selected(id.row, id.col),
            focused: self.grid.is_cell_focused(id.row, id.col),
            fixed: cell.is_fixed(),
        })
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[allow(clippy::cast_possible_truncation)]
fn to_i64(v: f64) -> i64 {
    if v.is_finite() {
        v.round() as i64
    } else {
        0
    }
}

fn parse_key(key: &str) -> Option<Key> {
    Some(match key {
        "ArrowUp" => Key::Up,
        "ArrowDown" => Key::Down,
        "ArrowLeft" => Key::Left,
        "ArrowRight" => Key::Right,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        "Home" => Key::Home,
        "End" => Key::End,
        _ => return None,
    })
}

#[cfg(target_arch = "wasm32")]
struct JsProvider(Function);

#[cfg(target_arch = "wasm32")]
#[derive(Deserialize)]
struct ProvidedCell {
    text: Option<String>,
    fg: Option<u32>,
    bg: Option<u32>,
    data: Option<f64>,
}

#[cfg(target_arch = "wasm32")]
impl DataProvider for JsProvider {
    fn fill(&self, row: u32, col: u32, mask: FieldMask, cell: &mut Cell) {
        let Ok(value) = self
            .0
            .call2(&JsValue::NULL, &JsValue::from(row), &JsValue::from(col))
        else {
            return;
        };
        if let Some(text) = value.as_string() {
            if mask.contains(FieldMask::TEXT) {
                cell.text = text;
            }
            return;
        }
        let Ok(provided) = serde_wasm_bindgen::from_value::<ProvidedCell>(value) else {
            return;
        };
        if let (true, Some(text)) = (mask.contains(FieldMask::TEXT), provided.text) {
            cell.text = text;
        }
        if let (true, Some(fg)) = (mask.contains(FieldMask::FG), provided.fg) {
            cell.fg = Color(fg & 0x00FF_FFFF);
        }
        if let (true, Some(bg)) = (mask.contains(FieldMask::BG), provided.bg) {
            cell.bg = Color(bg & 0x00FF_FFFF);
        }
        if let (true, Some(data)) = (mask.contains(FieldMask::DATA), provided.data) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let data = data.max(0.0) as u64;
            cell.data = data;
        }
    }
}

#[cfg(target_arch = "wasm32")]
struct JsHost(Function);

#[cfg(target_arch = "wasm32")]
impl GridHost for JsHost {
    fn notify(&mut self, row: u32, col: u32, event: GridEvent) -> NotifyResponse {
        let name = JsValue::from_str(&format!("{event:?}"));
        let result = self.0.call3(
            &JsValue::NULL,
            &JsValue::from(row),
            &JsValue::from(col),
            &name,
        );
        match result {
            Ok(v) if v.as_bool() == Some(false) => NotifyResponse::Cancel,
            _ => NotifyResponse::Continue,
        }
    }
}
