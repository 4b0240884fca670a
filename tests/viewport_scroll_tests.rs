//! Viewport tests: pixel/cell mapping, pinned bands, scrollbar ranges and
//! `ensure_visible`.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::GridBuilder;
use gridctrl::{CellId, Rect};

// ============================================================================
// Frozen and fixed bands
// ============================================================================

#[test]
fn test_frozen_rows_survive_scrolling_a_hundred_rows() {
    let mut grid = GridBuilder::new(500, 5).fixed(1, 0).frozen(2, 0).build();
    assert!(grid.scroll_by(0, 100 * 20));

    let top = grid.top_left_cell().unwrap();
    assert!(top.row >= 3);
    assert_eq!(top.row, 103);
    assert!(grid.visible_body_range().unwrap().min_row >= 3);

    // Header and frozen rows keep their screen positions
    assert_eq!(grid.cell_at_point(5, 5), Some(CellId::new(0, 0)));
    assert_eq!(grid.cell_at_point(5, 25), Some(CellId::new(1, 0)));
    assert_eq!(grid.cell_at_point(5, 45), Some(CellId::new(2, 0)));
    assert_eq!(grid.cell_at_point(5, 65), Some(CellId::new(103, 0)));
}

#[test]
fn test_pinned_rects_do_not_move() {
    let mut grid = GridBuilder::new(200, 4).fixed(1, 0).frozen(1, 0).build();
    grid.scroll_by(0, 400);
    assert_eq!(
        grid.cell_rect(1, 0),
        Some(Rect {
            x: 0,
            y: 20,
            width: 64,
            height: 20
        })
    );
    assert_eq!(grid.cell_rect(2, 0), None);
    assert_eq!(grid.top_left_cell(), Some(CellId::new(22, 0)));
    assert_eq!(grid.cell_rect(22, 0).map(|r| r.y), Some(40));
}

#[test]
fn test_visible_cells_start_with_pinned_corner() {
    let mut grid = GridBuilder::new(200, 10).fixed(1, 1).build();
    assert!(grid.scroll_by(128, 100));
    let cells = grid.visible_cells();
    assert_eq!(
        cells.first(),
        Some(&(
            CellId::new(0, 0),
            Rect {
                x: 0,
                y: 0,
                width: 64,
                height: 20
            }
        ))
    );
    let ids: Vec<CellId> = cells.iter().map(|(c, _)| *c).collect();
    assert!(ids.contains(&CellId::new(0, 3)));
    assert!(ids.contains(&CellId::new(6, 0)));
    assert!(ids.contains(&CellId::new(6, 3)));
    assert!(!ids.contains(&CellId::new(1, 1)));
}

// ============================================================================
// ensure_visible
// ============================================================================

#[test]
fn test_ensure_visible_then_visible_everywhere() {
    let mut grid = GridBuilder::new(300, 40).fixed(1, 1).frozen(1, 1).build();
    let mut targets: Vec<(u32, u32)> = (2..300)
        .step_by(37)
        .flat_map(|row| (2..40).step_by(7).map(move |col| (row, col)))
        .collect();
    targets.extend([(299, 39), (2, 2), (150, 20), (2, 39), (299, 2)]);
    for (row, col) in targets {
        grid.ensure_visible(row, col);
        assert!(grid.is_cell_visible(row, col), "({row}, {col})");
        assert!(grid.is_cell_fully_visible(row, col), "({row}, {col})");
    }
}

#[test]
fn test_ensure_visible_is_noop_for_pinned_and_invalid_cells() {
    let mut grid = GridBuilder::new(100, 10).fixed(1, 1).frozen(1, 0).build();
    grid.scroll_by(0, 500);
    let before = grid.scroll_pos();
    assert!(!grid.ensure_visible(0, 0));
    assert!(!grid.ensure_visible(1, 1));
    assert!(!grid.ensure_visible(100, 0));
    assert_eq!(grid.scroll_pos(), before);
}

// ============================================================================
// Scrollbar ranges and scrolling
// ============================================================================

#[test]
fn test_scroll_ranges_follow_content() {
    let mut grid = GridBuilder::new(100, 3).build();
    let ranges = grid.scroll_ranges();
    assert!(ranges.v_visible);
    assert!(!ranges.h_visible);
    assert_eq!(ranges.v_max, 100 * 20 - 300);
    assert_eq!(ranges.h_max, 0);

    assert!(grid.set_scroll_pos(0, u32::MAX));
    assert_eq!(grid.scroll_pos(), (0, 1700));
    assert!(grid.scroll_by(0, -100_000));
    assert_eq!(grid.scroll_pos(), (0, 0));
    assert!(!grid.scroll_by(0, -1));
}

#[test]
fn test_shrinking_clamps_scroll_position() {
    let mut grid = GridBuilder::new(100, 3).build();
    grid.set_scroll_pos(0, 1500);
    grid.set_row_count(20).unwrap();
    assert_eq!(grid.scroll_pos(), (0, 100));
    assert_eq!(grid.top_left_cell(), Some(CellId::new(5, 0)));
}

#[test]
fn test_resize_changes_scrollbars() {
    let mut grid = GridBuilder::new(10, 4).build();
    assert!(!grid.scroll_ranges().v_visible);
    grid.resize_viewport(200, 100);
    let ranges = grid.scroll_ranges();
    assert!(ranges.v_visible);
    assert!(ranges.h_visible);
}

#[test]
fn test_scrolling_requests_full_redraw() {
    let mut grid = GridBuilder::new(100, 3).build();
    grid.take_redraw();
    assert!(grid.take_redraw().is_empty());
    grid.scroll_rows(3);
    assert!(grid.take_redraw().all);
}

// ============================================================================
// Hit testing
// ============================================================================

#[test]
fn test_points_off_the_cells_hit_nothing() {
    let grid = GridBuilder::new(3, 3).build();
    assert_eq!(grid.cell_at_point(300, 10), None);
    assert_eq!(grid.cell_at_point(10, 250), None);
    assert_eq!(grid.cell_at_point(-5, 10), None);
    assert_eq!(grid.cell_at_point(191, 59), Some(CellId::new(2, 2)));
    assert!(!grid.is_cell_visible(3, 0));
}

#[test]
fn test_custom_sizes_shift_hit_testing() {
    let mut grid = GridBuilder::new(10, 5).build();
    assert!(grid.set_column_width(0, 100));
    assert!(grid.set_row_height(0, 50));
    assert_eq!(grid.cell_at_point(99, 49), Some(CellId::new(0, 0)));
    assert_eq!(grid.cell_at_point(100, 50), Some(CellId::new(1, 1)));
    assert_eq!(grid.column_width(0), Some(100));
    assert_eq!(grid.row_height(0), Some(50));
}
