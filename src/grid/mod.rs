//! The `Grid` control - the primary entry point of the engine.
//!
//! `Grid` owns every component and keeps them consistent:
//! - the cell store and per-axis geometry
//! - fixed/frozen region counts
//! - the selection model and the merge registry
//! - the viewport (scroll state, scrollbar ranges, hit testing)
//!
//! Methods are split by concern across the submodules; all of them are
//! inherent methods on [`Grid`].

mod edit;
mod merged;
mod scroll;
mod select;
mod sorting;
mod structure;

use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use log::trace;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::cell_ref::{CellId, CellRange};
use crate::config::GridConfig;
use crate::layout::{Geometry, Viewport};
use crate::merge::MergeRegistry;
use crate::notify::{GridEvent, GridHost, NotifyResponse};
use crate::provider::{DataProvider, FieldMask};
use crate::region::RegionCounts;
use crate::selection::{SelectionDiff, SelectionModel};
use crate::store::CellStore;
use crate::types::{Cell, CellState, CellView, DefaultCells, SelectionMode};

/// Re-entry guard for structural mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing,
}

/// Pending repaint work, drained by the renderer with [`Grid::take_redraw`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Redraw {
    /// Everything needs repainting
    pub all: bool,
    /// Individual cells (only meaningful when `all` is false)
    pub cells: Vec<CellId>,
}

impl Redraw {
    pub fn is_empty(&self) -> bool {
        !self.all && self.cells.is_empty()
    }
}

/// An in-progress pointer or programmatic selection gesture.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    mode: SelectionMode,
}

pub struct Grid {
    config: GridConfig,
    store: CellStore,
    regions: RegionCounts,
    selection: SelectionModel,
    merges: MergeRegistry,
    viewport: Viewport,
    defaults: DefaultCells,
    provider: Option<Box<dyn DataProvider>>,
    host: Option<Box<dyn GridHost>>,
    resize_state: ResizeState,
    /// Nesting depth of redraw suspension
    redraw_suspended: u32,
    /// Scrollbar ranges need recomputing once redraw resumes
    layout_pending: bool,
    redraw: Redraw,
    /// Packed ids already in `redraw.cells`
    redraw_queued: FxHashSet<u64>,
    gesture: Option<Gesture>,
    sort_column: Option<u32>,
    sort_ascending: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.store.row_count())
            .field("cols", &self.store.col_count())
            .field("regions", &self.regions)
            .field("virtual", &self.store.is_virtual())
            .field("selected", &self.selection.count())
            .field("merges", &self.merges.len())
            .finish_non_exhaustive()
    }
}

impl Grid {
    pub fn new(config: GridConfig) -> Self {
        let mut viewport = Viewport::default();
        viewport.scrollbar_thickness = config.scrollbar_thickness;
        Self {
            store: CellStore::new(config.virtual_mode),
            config,
            regions: RegionCounts::default(),
            selection: SelectionModel::new(),
            merges: MergeRegistry::new(),
            viewport,
            defaults: DefaultCells::default(),
            provider: None,
            host: None,
            resize_state: ResizeState::Idle,
            redraw_suspended: 0,
            layout_pending: false,
            redraw: Redraw::default(),
            redraw_queued: FxHashSet::default(),
            gesture: None,
            sort_column: None,
            sort_ascending: true,
        }
    }

    /// Create a grid with the given size and viewport.
    pub fn with_size(
        rows: u32,
        cols: u32,
        width: u32,
        height: u32,
        config: GridConfig,
    ) -> crate::Result<Self> {
        let mut grid = Self::new(config);
        grid.viewport.resize(width, height);
        grid.set_column_count(cols)?;
        grid.set_row_count(rows)?;
        Ok(grid)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) {
        self.viewport.scrollbar_thickness = config.scrollbar_thickness;
        self.config = config;
        self.layout_changed();
    }

    pub fn store(&self) -> &CellStore {
        &self.store
    }

    pub fn regions(&self) -> RegionCounts {
        self.regions
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn merges(&self) -> &MergeRegistry {
        &self.merges
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn defaults(&self) -> &DefaultCells {
        &self.defaults
    }

    /// Replace the region templates; everything is repainted.
    pub fn set_defaults(&mut self, defaults: DefaultCells) {
        self.defaults = defaults;
        self.redraw.all = true;
    }

    pub fn row_count(&self) -> u32 {
        self.store.row_count()
    }

    pub fn column_count(&self) -> u32 {
        self.store.col_count()
    }

    pub fn is_valid(&self, row: u32, col: u32) -> bool {
        self.store.is_valid(row, col)
    }

    pub fn is_virtual(&self) -> bool {
        self.store.is_virtual()
    }

    pub fn resize_state(&self) -> ResizeState {
        self.resize_state
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    /// Register the virtual-mode data provider.
    pub fn set_data_provider<P: DataProvider + 'static>(&mut self, provider: P) {
        self.provider = Some(Box::new(provider));
        self.redraw.all = true;
    }

    pub fn clear_data_provider(&mut self) {
        self.provider = None;
        self.redraw.all = true;
    }

    pub fn set_host<H: GridHost + 'static>(&mut self, host: H) {
        self.host = Some(Box::new(host));
    }

    pub fn take_host(&mut self) -> Option<Box<dyn GridHost>> {
        self.host.take()
    }

    pub(crate) fn notify(&mut self, row: u32, col: u32, event: GridEvent) -> NotifyResponse {
        match self.host.as_mut() {
            Some(host) => host.notify(row, col, event),
            None => NotifyResponse::Continue,
        }
    }

    // ========================================================================
    // Cell queries
    // ========================================================================

    /// Cell at display coordinates with selection, focus and fixed bits applied.
    ///
    /// Array mode borrows the stored cell when no derived bit is set. Virtual
    /// mode always returns an owned cell synthesised for this query.
    pub fn cell(&self, row: u32, col: u32) -> Option<CellView<'_>> {
        if !self.store.is_valid(row, col) {
            return None;
        }
        let derived = self.derived_state(row, col);
        if self.store.is_virtual() {
            let mut cell = self.synthesize(row, col, FieldMask::ALL)?;
            cell.state = cell.state.persistent() | derived;
            return Some(CellView(Cow::Owned(cell)));
        }
        let stored = self.store.cell(row, col)?;
        if derived.is_empty() {
            return Some(CellView(Cow::Borrowed(stored)));
        }
        let mut cell = stored.clone();
        cell.state = cell.state.persistent() | derived;
        Some(CellView(Cow::Owned(cell)))
    }

    /// Displayed text of a cell.
    pub fn item_text(&self, row: u32, col: u32) -> Option<String> {
        if self.store.is_virtual() {
            return self.synthesize(row, col, FieldMask::TEXT).map(|c| c.text);
        }
        self.store.cell(row, col).map(|c| c.text.clone())
    }

    /// Full state of a cell: stored bits plus derived ones.
    pub fn cell_state(&self, row: u32, col: u32) -> Option<CellState> {
        if !self.store.is_valid(row, col) {
            return None;
        }
        let stored = self
            .store
            .cell(row, col)
            .map_or(CellState::empty(), |c| c.state.persistent());
        Some(stored | self.derived_state(row, col))
    }

    /// Template for a display cell's region.
    pub fn template(&self, row: u32, col: u32) -> &Cell {
        self.defaults
            .template(self.regions.is_fixed_row(row), self.regions.is_fixed_col(col))
    }

    fn derived_state(&self, row: u32, col: u32) -> CellState {
        let mut state = CellState::empty();
        let fixed_row = self.regions.is_fixed_row(row);
        let fixed_col = self.regions.is_fixed_col(col);
        state.set(CellState::FIXED, fixed_row || fixed_col);
        state.set(CellState::FIXED_ROW, fixed_row);
        state.set(CellState::FIXED_COL, fixed_col);
        state.set(CellState::SELECTED, self.selection.is_selected(row, col));
        state.set(CellState::FOCUSED, self.selection.is_focused(row, col));
        state
    }

    /// Seed a cell from its region template and let the provider fill it
    /// for the logical coordinate behind `(row, col)`.
    pub(crate) fn synthesize(&self, row: u32, col: u32, mask: FieldMask) -> Option<Cell> {
        let logical_row = self.store.logical_row(row)?;
        let logical_col = self.store.logical_col(col)?;
        let mut cell = self.template(row, col).clone();
        cell.state = CellState::empty();
        if let Some(provider) = self.provider.as_deref() {
            provider.fill(logical_row, logical_col, mask, &mut cell);
        }
        Some(cell)
    }

    // ========================================================================
    // Redraw / layout bookkeeping
    // ========================================================================

    /// Borrowed geometry for viewport queries.
    pub fn geometry(&self) -> Geometry<'_> {
        geometry(&self.store, self.regions)
    }

    /// Drain pending repaint work.
    pub fn take_redraw(&mut self) -> Redraw {
        self.redraw_queued.clear();
        std::mem::take(&mut self.redraw)
    }

    pub fn is_redraw_suspended(&self) -> bool {
        self.redraw_suspended > 0
    }

    /// Defer scrollbar and paint recomputation until the guard drops.
    /// Guards nest; only the outermost one flushes.
    pub fn suspend_redraw(&mut self) -> RedrawGuard<'_> {
        self.redraw_suspended += 1;
        RedrawGuard { grid: self }
    }

    /// Counter form of [`Self::suspend_redraw`] for hosts without scopes.
    pub fn set_redraw(&mut self, enabled: bool) {
        if enabled {
            self.resume_redraw();
        } else {
            self.redraw_suspended += 1;
        }
    }

    fn resume_redraw(&mut self) {
        self.redraw_suspended = self.redraw_suspended.saturating_sub(1);
        if self.redraw_suspended == 0 && self.layout_pending {
            self.layout_changed();
        }
    }

    /// Drop every geometry cache and recompute scrollbar ranges.
    ///
    /// Always safe; used to recover from partial failures.
    pub fn invalidate_geometry(&mut self) {
        self.viewport.invalidate();
        self.layout_changed();
    }

    /// Geometry changed: recompute scrollbars (or defer while suspended).
    pub(crate) fn layout_changed(&mut self) {
        self.viewport.invalidate();
        self.redraw.all = true;
        if self.redraw_suspended > 0 {
            self.layout_pending = true;
            return;
        }
        self.layout_pending = false;
        let geo = geometry(&self.store, self.regions);
        let ranges = self.viewport.update_ranges(&geo);
        trace!(
            "scroll ranges h_max={} v_max={} scroll=({}, {})",
            ranges.h_max,
            ranges.v_max,
            self.viewport.scroll_x(),
            self.viewport.scroll_y()
        );
    }

    /// Queue a single cell for repaint if it is on screen and not queued yet.
    pub(crate) fn redraw_cell(&mut self, cell: CellId) {
        if self.redraw.all || self.redraw_queued.contains(&cell.pack()) {
            return;
        }
        let geo = geometry(&self.store, self.regions);
        if self.viewport.is_visible(&geo, cell.row, cell.col, false) {
            self.redraw_queued.insert(cell.pack());
            self.redraw.cells.push(cell);
        }
    }

    pub(crate) fn redraw_diff(&mut self, diff: &SelectionDiff) {
        for cell in diff.cells() {
            self.redraw_cell(cell);
        }
    }

    /// Queue every constituent of the merge region containing `cell`.
    pub(crate) fn redraw_region_of(&mut self, cell: CellId) {
        match self.merges.region_at(cell.row, cell.col) {
            Some((_, range)) => {
                for c in range.cells() {
                    self.redraw_cell(c);
                }
            }
            None => self.redraw_cell(cell),
        }
    }

    /// Full extent of the grid, if it has any cells.
    pub(crate) fn full_range(&self) -> Option<CellRange> {
        let rows = self.store.row_count();
        let cols = self.store.col_count();
        (rows > 0 && cols > 0).then(|| CellRange::new(0, 0, rows - 1, cols - 1))
    }
}

pub(crate) fn geometry(store: &CellStore, regions: RegionCounts) -> Geometry<'_> {
    Geometry {
        rows: store.rows(),
        cols: store.cols(),
        regions,
    }
}

/// Suspends redraw for its lifetime; dereferences to the grid.
pub struct RedrawGuard<'a> {
    grid: &'a mut Grid,
}

impl Deref for RedrawGuard<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        self.grid
    }
}

impl DerefMut for RedrawGuard<'_> {
    fn deref_mut(&mut self) -> &mut Grid {
        self.grid
    }
}

impl Drop for RedrawGuard<'_> {
    fn drop(&mut self) {
        self.grid.resume_redraw();
    }
}
