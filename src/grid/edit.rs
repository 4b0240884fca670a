//! Cell edit handshake with the host.

use log::debug;

use super::Grid;
use crate::cell_ref::CellId;
use crate::notify::{GridEvent, NotifyResponse};
use crate::types::CellState;

impl Grid {
    /// Ask to start editing `(row, col)`.
    ///
    /// Refused for fixed or read-only cells, when editing is disabled, or when
    /// the host answers `BeginEdit` with `Cancel`.
    pub fn begin_edit(&mut self, row: u32, col: u32) -> bool {
        if !self.config.editable || self.regions.is_fixed_cell(row, col) {
            return false;
        }
        let Some(state) = self.cell_state(row, col) else {
            return false;
        };
        if state.contains(CellState::READ_ONLY) {
            return false;
        }
        if self.notify(row, col, GridEvent::BeginEdit) == NotifyResponse::Cancel {
            debug!("edit of ({row}, {col}) cancelled by host");
            return false;
        }
        true
    }

    /// Commit an edit. Array mode stores the text and marks the cell
    /// modified; in virtual mode the host receives `EndEdit` and owns the
    /// value. Returns whether the cell was valid.
    pub fn end_edit(&mut self, row: u32, col: u32, text: &str) -> bool {
        if !self.store.is_valid(row, col) {
            return false;
        }
        if let Some(cell) = self.store.cell_mut(row, col) {
            cell.text = text.to_string();
            cell.state.insert(CellState::MODIFIED);
        }
        self.redraw_region_of(CellId::new(row, col));
        self.notify(row, col, GridEvent::EndEdit);
        true
    }
}
