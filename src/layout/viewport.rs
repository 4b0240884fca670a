//! Viewport state: scroll offsets, pixel↔cell mapping, visible ranges and
//! scrollbar derivation.
//!
//! Screen layout per axis:
//! - pinned entries (fixed + frozen) render at their natural position
//! - body entries render at `pinned_extent + (pos - body_start - scroll)`
//!
//! Scroll offsets are measured in body pixels, so `scroll == 0` puts the first
//! body row directly under the pinned rows.

use std::cell::Cell as MemoCell;

use serde::Serialize;

use super::Extents;
use crate::cell_ref::{CellId, CellRange};
use crate::region::RegionCounts;

/// Default scrollbar thickness in pixels.
pub const DEFAULT_SCROLLBAR_THICKNESS: u32 = 17;

/// Screen-space rectangle, relative to the grid's client origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && i64::from(x) < self.right() && i64::from(y) < self.bottom()
    }
}

/// Derived scrollbar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollRanges {
    /// Maximum horizontal scroll offset (0 when no scrollbar is needed)
    pub h_max: u32,
    /// Maximum vertical scroll offset
    pub v_max: u32,
    /// Horizontal page size (visible body width)
    pub h_page: u32,
    /// Vertical page size (visible body height)
    pub v_page: u32,
    pub h_visible: bool,
    pub v_visible: bool,
    /// Client width after subtracting a visible vertical scrollbar
    pub client_width: u32,
    /// Client height after subtracting a visible horizontal scrollbar
    pub client_height: u32,
}

/// Borrowed geometry of one grid, as seen by the viewport.
#[derive(Clone, Copy)]
pub struct Geometry<'a> {
    pub rows: &'a Extents,
    pub cols: &'a Extents,
    pub regions: RegionCounts,
}

/// One axis of the viewport: all mapping math is shared between rows and columns.
#[derive(Clone, Copy)]
pub(crate) struct Axis<'a> {
    pub extents: &'a Extents,
    /// Fixed + frozen entries
    pub pinned: u32,
    pub scroll: u32,
    /// Client size along this axis
    pub client: u32,
}

impl Axis<'_> {
    /// Pixel size of the pinned band.
    pub fn pinned_extent(&self) -> u32 {
        self.extents.start(self.pinned)
    }

    /// Absolute position where the scrolling body begins.
    pub fn body_start(&self) -> u32 {
        self.extents.start(self.pinned)
    }

    /// Total body extent (all scrollable entries).
    pub fn body_total(&self) -> u32 {
        self.extents.total().saturating_sub(self.body_start())
    }

    /// Pixels available to the body.
    pub fn body_view(&self) -> u32 {
        self.client.saturating_sub(self.pinned_extent())
    }

    pub fn max_scroll(&self) -> u32 {
        self.body_total().saturating_sub(self.body_view())
    }

    /// First body entry at the scroll anchor.
    pub fn first_visible(&self) -> Option<u32> {
        if self.pinned >= self.extents.len() {
            return None;
        }
        self.extents
            .index_at(self.body_start().saturating_add(self.scroll))
            .filter(|&i| i >= self.pinned)
    }

    /// First body entry whose leading edge is not scrolled off.
    pub fn first_fully_visible(&self) -> Option<u32> {
        let first = self.first_visible()?;
        let anchor = self.body_start().saturating_add(self.scroll);
        if self.extents.start(first) < anchor {
            let next = first + 1;
            (next < self.extents.len()).then_some(next)
        } else {
            Some(first)
        }
    }

    /// Last body entry that is at least partly (or, with `fully`, completely)
    /// inside the client.
    pub fn last_visible(&self, fully: bool) -> Option<u32> {
        let first = self.first_visible()?;
        let view_end = u64::from(self.body_start()) + u64::from(self.scroll) + u64::from(self.body_view());
        let mut last = None;
        // Forward cumulative walk from the anchor.
        let mut index = first;
        while index < self.extents.len() {
            let start = u64::from(self.extents.start(index));
            let end = u64::from(self.extents.end(index));
            if start >= view_end {
                break;
            }
            if fully && end > view_end {
                break;
            }
            last = Some(index);
            index += 1;
        }
        last
    }

    /// Screen coordinate of the leading edge of `index`.
    pub fn screen_start(&self, index: u32) -> i64 {
        let pos = i64::from(self.extents.start(index));
        if index < self.pinned {
            pos
        } else {
            i64::from(self.pinned_extent()) + pos - i64::from(self.body_start()) - i64::from(self.scroll)
        }
    }

    /// Entry under screen coordinate `p`.
    pub fn index_at_screen(&self, p: i32) -> Option<u32> {
        let p = u32::try_from(p).ok()?;
        if p >= self.client {
            return None;
        }
        if p < self.pinned_extent() {
            return self.extents.index_at(p).filter(|&i| i < self.pinned);
        }
        let body_pos = self
            .body_start()
            .saturating_add(self.scroll)
            .saturating_add(p - self.pinned_extent());
        self.extents.index_at(body_pos).filter(|&i| i >= self.pinned)
    }

    pub fn is_visible(&self, index: u32, fully: bool) -> bool {
        if index >= self.extents.len() {
            return false;
        }
        let start = self.screen_start(index);
        let end = start + i64::from(self.extents.size(index));
        let client = i64::from(self.client);
        if index < self.pinned {
            return if fully { end <= client } else { start < client };
        }
        let lo = i64::from(self.pinned_extent());
        if fully {
            start >= lo && end <= client
        } else {
            end > lo && start < client && end > start
        }
    }

    /// Scroll offset that brings `index` into view with the least movement.
    ///
    /// Walks one entry at a time from the current anchor in the required
    /// direction; the caller applies the result as a single scroll update.
    pub fn scroll_to_reveal(&self, index: u32) -> u32 {
        if index < self.pinned || index >= self.extents.len() {
            return self.scroll;
        }
        let Some(first) = self.first_visible() else {
            return self.scroll;
        };
        let anchor = self.body_start().saturating_add(self.scroll);
        let start = self.extents.start(index);

        if start < anchor {
            // Walk backwards from the anchor entry, accumulating the delta.
            let mut delta = anchor - self.extents.start(first);
            let mut cursor = first;
            while cursor > index {
                cursor -= 1;
                delta += self.extents.size(cursor);
            }
            return self.scroll.saturating_sub(delta);
        }

        let view = self.body_view();
        let end = self.extents.end(index);
        if u64::from(end) <= u64::from(anchor) + u64::from(view) {
            return self.scroll;
        }
        // Walk the anchor forward one entry at a time until `index` fits or
        // becomes the anchor.
        let mut top = first;
        let mut new_anchor = anchor;
        while top < index && end - new_anchor > view {
            top += 1;
            new_anchor = self.extents.start(top);
        }
        let target = new_anchor - self.body_start();
        target.min(self.max_scroll())
    }
}

/// Viewport state - the visible client area of the grid.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Client width in pixels (including any scrollbar)
    pub width: u32,
    /// Client height in pixels (including any scrollbar)
    pub height: u32,
    pub scrollbar_thickness: u32,
    scroll_x: u32,
    scroll_y: u32,
    ranges: ScrollRanges,
    top_left: MemoCell<Option<CellId>>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scrollbar_thickness: DEFAULT_SCROLLBAR_THICKNESS,
            scroll_x: 0,
            scroll_y: 0,
            ranges: ScrollRanges {
                client_width: width,
                client_height: height,
                ..ScrollRanges::default()
            },
            top_left: MemoCell::new(None),
        }
    }

    pub fn scroll_x(&self) -> u32 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> u32 {
        self.scroll_y
    }

    pub fn ranges(&self) -> ScrollRanges {
        self.ranges
    }

    /// Mark the top-left cache stale.
    pub fn invalidate(&self) {
        self.top_left.set(None);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.invalidate();
    }

    pub(crate) fn row_axis<'a>(&self, geo: &Geometry<'a>) -> Axis<'a> {
        Axis {
            extents: geo.rows,
            pinned: geo.regions.pinned_rows(),
            scroll: self.scroll_y,
            client: self.ranges.client_height,
        }
    }

    pub(crate) fn col_axis<'a>(&self, geo: &Geometry<'a>) -> Axis<'a> {
        Axis {
            extents: geo.cols,
            pinned: geo.regions.pinned_cols(),
            scroll: self.scroll_x,
            client: self.ranges.client_width,
        }
    }

    /// Recompute scrollbar ranges and clamp the scroll offsets into them.
    ///
    /// Showing one scrollbar shrinks the other axis' client, which can make the
    /// other scrollbar necessary too; two passes reach the fixed point.
    pub fn update_ranges(&mut self, geo: &Geometry<'_>) -> ScrollRanges {
        let pinned_w = geo.cols.start(geo.regions.pinned_cols());
        let pinned_h = geo.rows.start(geo.regions.pinned_rows());
        let body_w = geo.cols.total().saturating_sub(pinned_w);
        let body_h = geo.rows.total().saturating_sub(pinned_h);

        let mut client_w = self.width;
        let mut client_h = self.height;
        let mut h_visible = false;
        let mut v_visible = false;
        for _ in 0..2 {
            v_visible = body_h > client_h.saturating_sub(pinned_h);
            h_visible = body_w > client_w.saturating_sub(pinned_w);
            client_w = if v_visible {
                self.width.saturating_sub(self.scrollbar_thickness)
            } else {
                self.width
            };
            client_h = if h_visible {
                self.height.saturating_sub(self.scrollbar_thickness)
            } else {
                self.height
            };
        }

        let h_page = client_w.saturating_sub(pinned_w);
        let v_page = client_h.saturating_sub(pinned_h);
        self.ranges = ScrollRanges {
            h_max: body_w.saturating_sub(h_page),
            v_max: body_h.saturating_sub(v_page),
            h_page,
            v_page,
            h_visible,
            v_visible,
            client_width: client_w,
            client_height: client_h,
        };
        self.scroll_x = self.scroll_x.min(self.ranges.h_max);
        self.scroll_y = self.scroll_y.min(self.ranges.v_max);
        self.invalidate();
        self.ranges
    }

    /// Set absolute scroll offsets, clamped to the current ranges.
    /// Returns true if anything moved.
    pub fn set_scroll(&mut self, x: u32, y: u32) -> bool {
        let x = x.min(self.ranges.h_max);
        let y = y.min(self.ranges.v_max);
        let changed = x != self.scroll_x || y != self.scroll_y;
        self.scroll_x = x;
        self.scroll_y = y;
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Scroll by signed deltas.
    pub fn scroll_by(&mut self, dx: i64, dy: i64) -> bool {
        let x = offset(self.scroll_x, dx);
        let y = offset(self.scroll_y, dy);
        self.set_scroll(x, y)
    }

    /// First scrollable cell at the scroll anchor (memoised).
    pub fn top_left(&self, geo: &Geometry<'_>) -> Option<CellId> {
        if let Some(cell) = self.top_left.get() {
            return Some(cell);
        }
        let row = self.row_axis(geo).first_visible()?;
        let col = self.col_axis(geo).first_visible()?;
        let cell = CellId::new(row, col);
        self.top_left.set(Some(cell));
        Some(cell)
    }

    /// Cell under a client-space point, ignoring merges.
    pub fn cell_at(&self, geo: &Geometry<'_>, x: i32, y: i32) -> Option<CellId> {
        let row = self.row_axis(geo).index_at_screen(y)?;
        let col = self.col_axis(geo).index_at_screen(x)?;
        Some(CellId::new(row, col))
    }

    /// Visible scrollable range. `fully` keeps only unclipped rows/cols.
    pub fn body_range(&self, geo: &Geometry<'_>, fully: bool) -> Option<CellRange> {
        let rows = self.row_axis(geo);
        let cols = self.col_axis(geo);
        let top_left = if fully {
            CellId::new(rows.first_fully_visible()?, cols.first_fully_visible()?)
        } else {
            self.top_left(geo)?
        };
        let last_row = rows.last_visible(fully)?;
        let last_col = cols.last_visible(fully)?;
        if last_row < top_left.row || last_col < top_left.col {
            return None;
        }
        Some(CellRange::new(top_left.row, top_left.col, last_row, last_col))
    }

    pub fn is_visible(&self, geo: &Geometry<'_>, row: u32, col: u32, fully: bool) -> bool {
        self.row_axis(geo).is_visible(row, fully) && self.col_axis(geo).is_visible(col, fully)
    }

    /// Screen rectangle of a cell, or `None` if it is entirely off screen.
    pub fn cell_rect(&self, geo: &Geometry<'_>, row: u32, col: u32) -> Option<Rect> {
        if !self.is_visible(geo, row, col, false) {
            return None;
        }
        Some(self.raw_rect(geo, CellRange::new(row, col, row, col)))
    }

    /// Screen rectangle spanned by a range, without visibility checks.
    pub fn raw_rect(&self, geo: &Geometry<'_>, range: CellRange) -> Rect {
        let rows = self.row_axis(geo);
        let cols = self.col_axis(geo);
        let x = cols.screen_start(range.min_col);
        let y = rows.screen_start(range.min_row);
        let right = cols.screen_start(range.max_col) + i64::from(geo.cols.size(range.max_col));
        let bottom = rows.screen_start(range.max_row) + i64::from(geo.rows.size(range.max_row));
        Rect {
            x: clamp_i32(x),
            y: clamp_i32(y),
            width: u32::try_from((right - x).max(0)).unwrap_or(u32::MAX),
            height: u32::try_from((bottom - y).max(0)).unwrap_or(u32::MAX),
        }
    }

    /// Scroll offsets that reveal `(row, col)`; `None` when nothing would move.
    pub fn reveal(&self, geo: &Geometry<'_>, row: u32, col: u32) -> Option<(u32, u32)> {
        let y = self.row_axis(geo).scroll_to_reveal(row);
        let x = self.col_axis(geo).scroll_to_reveal(col);
        (x != self.scroll_x || y != self.scroll_y).then_some((x, y))
    }
}

fn offset(value: u32, delta: i64) -> u32 {
    let v = i64::from(value).saturating_add(delta).max(0);
    u32::try_from(v).unwrap_or(u32::MAX)
}

fn clamp_i32(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}
