//! Virtual mode tests: provider-backed content, owned cell snapshots and the
//! stable row permutation used for sorting.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{column_provider, column_texts, coordinate_provider, GridBuilder};
use gridctrl::text::{load_delimited, paste_text};
use gridctrl::{CellId, CellState, Delimiter, GridError};

fn logical_rows(grid: &gridctrl::Grid) -> Vec<u32> {
    (0..grid.row_count())
        .map(|row| grid.logical_row(row).unwrap())
        .collect()
}

fn keyed_grid(keys: &[&str]) -> gridctrl::Grid {
    let rows = u32::try_from(keys.len()).unwrap();
    let mut grid = GridBuilder::new(rows, 2).virtual_mode().build();
    grid.set_data_provider(column_provider(
        keys.iter().map(|k| (*k).to_string()).collect(),
    ));
    grid
}

// ============================================================================
// Content
// ============================================================================

#[test]
fn test_provider_supplies_content_for_logical_cells() {
    let mut grid = GridBuilder::new(4, 3).virtual_mode().build();
    assert!(grid.is_virtual());
    assert_eq!(grid.item_text(2, 1).as_deref(), Some(""));

    grid.set_data_provider(coordinate_provider);
    assert_eq!(grid.item_text(2, 1).as_deref(), Some("2:1"));
    assert!(grid.move_column(0, 2));
    assert_eq!(grid.item_text(2, 2).as_deref(), Some("2:0"));

    grid.clear_data_provider();
    assert_eq!(grid.item_text(2, 2).as_deref(), Some(""));
}

#[test]
fn test_cells_are_owned_snapshots_with_derived_state() {
    let mut grid = GridBuilder::new(4, 3).virtual_mode().fixed(1, 0).build();
    grid.set_data_provider(coordinate_provider);
    grid.set_selected_range(gridctrl::CellRange::new(1, 1, 2, 1), true)
        .unwrap();

    let cell = grid.cell(2, 1).unwrap();
    assert!(!cell.is_borrowed());
    assert_eq!(cell.text, "2:1");
    assert!(cell.state.contains(CellState::SELECTED));
    let header = grid.cell(0, 1).unwrap().into_owned();
    assert!(header.is_fixed());
    assert_eq!(header.bg, grid.defaults().fixed_row.bg);
}

#[test]
fn test_content_mutators_are_refused() {
    let mut grid = GridBuilder::new(3, 3).virtual_mode().build();
    assert!(!grid.set_item_text(1, 1, "x"));
    assert!(!grid.set_item_data(1, 1, 7));
    assert!(!grid.set_item_state(1, 1, CellState::READ_ONLY));
    assert_eq!(paste_text(&mut grid, CellId::new(0, 0), "a\tb"), 0);
    assert!(matches!(
        load_delimited(&mut grid, "a,b", Delimiter::Comma),
        Err(GridError::InvalidAddress { row: 0, col: 0 })
    ));
    assert_eq!(grid.row_count(), 3);
}

#[test]
fn test_switching_modes_keeps_geometry_and_drops_content() {
    let mut grid = GridBuilder::new(3, 2).text(1, 1, "kept?").build();
    grid.set_row_height(1, 31);
    grid.set_virtual_mode(true).unwrap();
    assert!(grid.is_virtual());
    assert_eq!(grid.row_height(1), Some(31));
    assert_eq!(grid.item_text(1, 1).as_deref(), Some(""));

    grid.set_virtual_mode(false).unwrap();
    assert!(!grid.is_virtual());
    assert!(grid.set_item_text(1, 1, "back"));
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_equal_keys_keep_relative_order() {
    let mut grid = keyed_grid(&["k", "b", "a", "b", "a", "b"]);
    assert!(grid.sort_text_items(0, true));
    assert_eq!(logical_rows(&grid), [2, 4, 1, 3, 5, 0]);
    assert_eq!(column_texts(&grid, 1, 0, 6), ["a", "a", "b", "b", "b", "k"]);

    assert!(grid.sort_text_items(0, false));
    assert_eq!(logical_rows(&grid), [0, 1, 3, 5, 2, 4]);
}

#[test]
fn test_fixed_rows_stay_out_of_the_permutation_sort() {
    let mut grid = keyed_grid(&["title", "9", "10", "2", "10"]);
    grid.set_fixed_row_count(1).unwrap();
    assert!(grid.sort_numeric_items(1, true));
    assert_eq!(logical_rows(&grid), [0, 3, 1, 2, 4]);
    assert_eq!(grid.item_text(0, 0).as_deref(), Some("title"));
    assert_eq!(grid.sort_column(), Some(1));
}

#[test]
fn test_custom_virtual_comparator() {
    let mut grid = GridBuilder::new(5, 1).virtual_mode().build();
    assert!(grid.sort_virtual_rows(true, |a, b| b.cmp(&a)));
    assert_eq!(logical_rows(&grid), [4, 3, 2, 1, 0]);
    assert_eq!(grid.sort_column(), None);

    let mut array = GridBuilder::new(5, 1).build();
    assert!(!array.sort_virtual_rows(true, |a, b| a.cmp(&b)));
}

#[test]
fn test_sort_clears_selection_in_virtual_mode() {
    let mut grid = keyed_grid(&["b", "a", "c"]);
    grid.set_selected_range(gridctrl::CellRange::new(0, 0, 2, 1), true)
        .unwrap();
    grid.sort_text_items(0, true);
    assert_eq!(grid.selected_count(), 0);
    assert_eq!(column_texts(&grid, 0, 0, 3), ["a", "b", "c"]);
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn test_resizing_after_sort_keeps_permutation_dense() {
    let mut grid = keyed_grid(&["e", "d", "c", "b", "a", "f"]);
    grid.sort_text_items(0, true);
    assert_eq!(logical_rows(&grid), [4, 3, 2, 1, 0, 5]);

    grid.set_row_count(3).unwrap();
    assert_eq!(logical_rows(&grid), [2, 1, 0]);
    grid.set_row_count(5).unwrap();
    assert_eq!(logical_rows(&grid), [2, 1, 0, 3, 4]);
}

#[test]
fn test_row_insert_and_delete_renumber_logical_rows() {
    let mut grid = keyed_grid(&["x", "y", "z"]);
    grid.insert_row(1).unwrap();
    assert_eq!(grid.row_count(), 4);
    assert_eq!(logical_rows(&grid), [0, 1, 2, 3]);

    assert!(grid.delete_row(0));
    assert_eq!(logical_rows(&grid), [0, 1, 2]);
}
