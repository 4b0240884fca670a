//! Sorting rows on the grid.

use std::cmp::Ordering;

use log::debug;

use super::Grid;
use crate::notify::GridEvent;
use crate::provider::FieldMask;
use crate::sort::{self, compare_numeric, compare_text, CellComparator};
use crate::types::Cell;

impl Grid {
    /// Sort the non-fixed rows on display column `col`.
    ///
    /// Array mode swaps whole rows (cells and heights) and is not stable.
    /// Virtual mode stably reorders the row permutation, comparing cells
    /// synthesised for the sort column. Selection and focus are cleared first.
    pub fn sort_items(&mut self, col: u32, ascending: bool, compare: &CellComparator) -> bool {
        if col >= self.store.col_count() {
            return false;
        }
        self.clear_selection();
        self.reset_selection_silently();

        let first = self.regions.fixed_rows;
        let rows = self.store.row_count();
        if self.store.is_virtual() {
            let keys = self.sort_keys(col);
            let empty = Cell::default();
            let key = |id: u32| {
                usize::try_from(id)
                    .ok()
                    .and_then(|i| keys.get(i))
                    .unwrap_or(&empty)
            };
            sort::sort_permutation(self.store.row_order_mut(), first, ascending, |a, b| {
                compare(key(a), key(b))
            });
        } else if rows > first + 1 {
            sort::sort_rows(&mut self.store, col, first, rows - 1, ascending, compare);
        }
        self.finish_sort(Some(col), ascending);
        true
    }

    pub fn sort_text_items(&mut self, col: u32, ascending: bool) -> bool {
        self.sort_items(col, ascending, &compare_text)
    }

    pub fn sort_numeric_items(&mut self, col: u32, ascending: bool) -> bool {
        self.sort_items(col, ascending, &compare_numeric)
    }

    /// Stable virtual-mode sort with a comparator over logical row ids.
    /// Returns false in array mode.
    pub fn sort_virtual_rows<F>(&mut self, ascending: bool, compare: F) -> bool
    where
        F: FnMut(u32, u32) -> Ordering,
    {
        if !self.store.is_virtual() {
            return false;
        }
        self.clear_selection();
        self.reset_selection_silently();
        let first = self.regions.fixed_rows;
        sort::sort_permutation(self.store.row_order_mut(), first, ascending, compare);
        self.finish_sort(None, ascending);
        true
    }

    /// Column of the last sort, for drawing a sort indicator.
    pub fn sort_column(&self) -> Option<u32> {
        self.sort_column
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    /// Sort-column cells for every logical row, indexed by logical id.
    fn sort_keys(&self, col: u32) -> Vec<Cell> {
        let rows = self.store.row_count();
        let mut keys = vec![Cell::default(); rows as usize];
        for row in self.regions.fixed_rows..rows {
            let (Some(logical), Some(cell)) = (
                self.store.logical_row(row),
                self.synthesize(row, col, FieldMask::TEXT | FieldMask::DATA),
            ) else {
                continue;
            };
            if let Some(slot) = keys.get_mut(logical as usize) {
                *slot = cell;
            }
        }
        keys
    }

    fn finish_sort(&mut self, col: Option<u32>, ascending: bool) {
        self.sort_column = col;
        self.sort_ascending = ascending;
        debug!(
            "sorted rows {}.. on {:?} ({})",
            self.regions.fixed_rows,
            col,
            if ascending { "ascending" } else { "descending" }
        );
        self.layout_changed();
        self.notify(0, col.unwrap_or(0), GridEvent::Sorted);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cell_ref::{CellId, CellRange};
    use crate::config::GridConfig;

    #[test]
    fn test_sort_clears_selection_and_records_column() {
        let mut g = Grid::with_size(4, 2, 400, 300, GridConfig::default()).unwrap();
        for (row, text) in ["c", "a", "d", "b"].iter().enumerate() {
            g.set_item_text(u32::try_from(row).unwrap(), 0, *text);
        }
        g.set_selected_range(CellRange::new(0, 0, 1, 1), true).unwrap();
        g.set_focus_cell(Some(CellId::new(1, 1)));
        assert!(g.sort_text_items(0, false));
        let column: Vec<String> = (0..4).map(|r| g.item_text(r, 0).unwrap()).collect();
        assert_eq!(column, ["d", "c", "b", "a"]);
        assert_eq!(g.selected_count(), 0);
        assert_eq!(g.focus_cell(), None);
        assert_eq!(g.sort_column(), Some(0));
        assert!(!g.sort_ascending());
        assert!(!g.sort_text_items(5, true));
    }

    #[test]
    fn test_virtual_sort_moves_no_data() {
        let config = GridConfig {
            virtual_mode: true,
            ..GridConfig::default()
        };
        let mut g = Grid::with_size(5, 1, 400, 300, config).unwrap();
        g.set_fixed_row_count(1).unwrap();
        let values = ["hdr", "30", "4", "100", "4"];
        g.set_data_provider(move |row: u32, _col: u32, _mask: FieldMask, cell: &mut Cell| {
            cell.text = values[row as usize].to_string();
        });
        assert!(g.sort_numeric_items(0, true));
        let order: Vec<u32> = (0..5).map(|r| g.logical_row(r).unwrap()).collect();
        assert_eq!(order, [0, 2, 4, 1, 3]);
        assert_eq!(g.item_text(3, 0).as_deref(), Some("30"));
    }
}
