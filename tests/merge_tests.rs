//! Merged-cell tests: aggregation of selection/focus, range expansion,
//! overlap resolution, hit testing and structural edits.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{assert_selection_consistent, GridBuilder};
use gridctrl::{CellId, CellRange, CellState, Key, Modifiers, Rect};

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_selecting_origin_selects_whole_region() {
    let mut grid = GridBuilder::new(10, 5).build();
    let handle = grid.merge_cells(CellRange::new(2, 1, 3, 2)).unwrap();
    assert_eq!(grid.merge_count(), 1);

    grid.begin_selection(CellId::new(2, 1), Modifiers::NONE);
    grid.end_selection();
    assert!(grid.is_cell_selected(3, 2));
    assert!(grid.is_cell_focused(3, 2));
    assert!(!grid.is_cell_selected(4, 2));
    assert_eq!(grid.merge_at(3, 2), Some((handle, CellRange::new(2, 1, 3, 2))));
}

#[test]
fn test_every_constituent_reports_region_state() {
    let mut grid = GridBuilder::new(10, 5).build();
    let region = CellRange::new(2, 1, 3, 2);
    grid.merge_cells(region);
    grid.set_focus_cell(Some(CellId::new(2, 1)));
    grid.set_selected_range(CellRange::single(CellId::new(3, 1)), true)
        .unwrap();
    for cell in region.cells() {
        assert!(grid.is_cell_selected(cell.row, cell.col), "{cell:?}");
        assert!(grid.is_cell_focused(cell.row, cell.col), "{cell:?}");
    }
}

#[test]
fn test_range_touching_region_grows_to_enclose_it() {
    let mut grid = GridBuilder::new(10, 5).build();
    grid.merge_cells(CellRange::new(2, 1, 3, 2));
    grid.set_selected_range(CellRange::new(3, 2, 3, 3), true)
        .unwrap();
    assert_eq!(grid.selected_range(), Some(CellRange::new(2, 1, 3, 3)));
    assert_eq!(grid.selected_count(), 6);
}

#[test]
fn test_expansion_chains_through_regions() {
    let mut grid = GridBuilder::new(10, 6).build();
    grid.merge_cells(CellRange::new(1, 1, 2, 2));
    grid.merge_cells(CellRange::new(2, 3, 4, 4));
    // Enclosing the first region reaches (2, 3), which pulls in the second
    grid.set_selected_range(CellRange::new(1, 2, 1, 3), true)
        .unwrap();
    assert_eq!(grid.selected_range(), Some(CellRange::new(1, 1, 4, 4)));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_rejects_single_cell_and_out_of_bounds() {
    let mut grid = GridBuilder::new(4, 4).build();
    assert_eq!(grid.merge_cells(CellRange::new(1, 1, 1, 1)), None);
    assert_eq!(grid.merge_cells(CellRange::new(2, 2, 4, 3)), None);
    assert_eq!(grid.merge_count(), 0);
}

#[test]
fn test_overlapping_regions_last_registered_wins() {
    let mut grid = GridBuilder::new(10, 6).build();
    let first = grid.merge_cells(CellRange::new(1, 1, 2, 2)).unwrap();
    let second = grid.merge_cells(CellRange::new(2, 2, 3, 3)).unwrap();
    assert_eq!(grid.merge_at(1, 1).map(|(h, _)| h), Some(first));
    assert_eq!(grid.merge_at(2, 2).map(|(h, _)| h), Some(second));

    // (3, 3) sits at x 192..256, y 60..80 and resolves to the second origin
    assert_eq!(grid.cell_at_point(200, 65), Some(CellId::new(2, 2)));
    assert_eq!(grid.cell_at_point(70, 25), Some(CellId::new(1, 1)));
}

#[test]
fn test_split_shifts_later_handles() {
    let mut grid = GridBuilder::new(10, 6).build();
    let first = grid.merge_cells(CellRange::new(1, 1, 2, 2)).unwrap();
    grid.merge_cells(CellRange::new(5, 1, 6, 2));
    assert_eq!(grid.split_cells(first), Some(CellRange::new(1, 1, 2, 2)));
    assert_eq!(grid.merge_count(), 1);
    assert_eq!(grid.merge_at(5, 1), Some((0, CellRange::new(5, 1, 6, 2))));
    assert_eq!(grid.merge_at(1, 1), None);
    assert_eq!(grid.split_cells(7), None);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_merged_rect_spans_region() {
    let mut grid = GridBuilder::new(10, 5).build();
    let handle = grid.merge_cells(CellRange::new(1, 1, 2, 2)).unwrap();
    assert_eq!(
        grid.merged_cell_rect(handle),
        Some(Rect {
            x: 64,
            y: 20,
            width: 128,
            height: 40
        })
    );
    assert_eq!(grid.merged_cell_rect(handle + 1), None);
}

#[test]
fn test_visible_cells_paint_region_once() {
    let mut grid = GridBuilder::new(4, 4).build();
    grid.merge_cells(CellRange::new(1, 1, 2, 3));
    let cells = grid.visible_cells();
    assert_eq!(cells.len(), 16 - 5);
    let origins = cells
        .iter()
        .filter(|(cell, _)| *cell == CellId::new(1, 1))
        .count();
    assert_eq!(origins, 1);
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_shrinking_drops_regions_that_no_longer_fit() {
    let mut grid = GridBuilder::new(10, 5).build();
    grid.merge_cells(CellRange::new(2, 1, 3, 2));
    grid.merge_cells(CellRange::new(7, 1, 8, 2));
    grid.set_row_count(8).unwrap();
    assert_eq!(grid.merge_count(), 1);
    assert_eq!(grid.merge_at(7, 1), None);

    grid.set_column_count(2).unwrap();
    assert_eq!(grid.merge_count(), 0);
}

#[test]
fn test_row_insert_and_delete_move_regions() {
    let mut grid = GridBuilder::new(10, 5).build();
    grid.merge_cells(CellRange::new(3, 1, 4, 2));
    grid.insert_row(1).unwrap();
    assert_eq!(grid.merge_at(4, 1), Some((0, CellRange::new(4, 1, 5, 2))));

    grid.insert_row(5).unwrap();
    assert_eq!(grid.merge_at(6, 2), Some((0, CellRange::new(4, 1, 6, 2))));

    assert!(grid.delete_row(4));
    assert!(grid.delete_row(4));
    assert_eq!(grid.merge_at(4, 2), Some((0, CellRange::new(4, 1, 4, 2))));
    assert!(grid.delete_row(4));
    assert_eq!(grid.merge_count(), 0);
}

#[test]
fn test_keyboard_steps_off_region_edges() {
    let mut grid = GridBuilder::new(6, 6).build();
    grid.merge_cells(CellRange::new(1, 1, 2, 2));
    grid.set_focus_cell(Some(CellId::new(1, 1)));
    assert!(grid.key_down(Key::Down, Modifiers::NONE));
    assert_eq!(grid.focus_cell(), Some(CellId::new(3, 1)));

    grid.set_focus_cell(Some(CellId::new(1, 1)));
    assert!(grid.key_down(Key::Right, Modifiers::NONE));
    assert_eq!(grid.focus_cell(), Some(CellId::new(1, 3)));

    // Moving into a region lands on its origin
    assert!(grid.key_down(Key::Left, Modifiers::NONE));
    assert_eq!(grid.focus_cell(), Some(CellId::new(1, 1)));
}

#[test]
fn test_fixed_state_reported_for_region_constituents() {
    let mut grid = GridBuilder::new(6, 6).fixed(1, 0).build();
    grid.merge_cells(CellRange::new(0, 1, 0, 3));
    let state = grid.cell_state(0, 2).unwrap();
    assert!(state.contains(CellState::FIXED | CellState::FIXED_ROW));
    assert!(!state.contains(CellState::FIXED_COL));
}

// ============================================================================
// Regions crossing the fixed band
// ============================================================================

#[test]
fn test_expansion_never_selects_fixed_constituents() {
    let mut grid = GridBuilder::new(6, 5).fixed(1, 0).build();
    grid.merge_cells(CellRange::new(0, 1, 1, 2)).unwrap();

    grid.set_selected_range(CellRange::single(CellId::new(1, 1)), true)
        .unwrap();
    assert_eq!(
        grid.selected_cells(),
        vec![CellId::new(1, 1), CellId::new(1, 2)]
    );
    assert!(!grid.cell_state(0, 1).unwrap().contains(CellState::SELECTED));
    assert!(!grid.cell_state(0, 2).unwrap().contains(CellState::SELECTED));
    assert_selection_consistent(&grid);
}

#[test]
fn test_click_on_body_part_of_region_with_fixed_origin() {
    let mut grid = GridBuilder::new(6, 5).fixed(1, 0).build();
    grid.merge_cells(CellRange::new(0, 1, 1, 2)).unwrap();

    assert!(grid.begin_selection(CellId::new(1, 2), Modifiers::NONE));
    assert_eq!(grid.focus_cell(), Some(CellId::new(1, 2)));
    assert_eq!(
        grid.selected_cells(),
        vec![CellId::new(1, 1), CellId::new(1, 2)]
    );

    grid.extend_selection(CellId::new(2, 2));
    grid.end_selection();
    assert_eq!(grid.focus_cell(), Some(CellId::new(2, 2)));
    assert_eq!(grid.selected_range(), Some(CellRange::new(1, 1, 2, 2)));
    assert_eq!(grid.selected_count(), 4);
    assert_selection_consistent(&grid);
}
