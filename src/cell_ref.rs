//! Cell coordinates and rectangular cell ranges.

use serde::{Deserialize, Serialize};

/// A (row, col) grid coordinate, 0-indexed in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub row: u32,
    pub col: u32,
}

impl CellId {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Pack into a single key: row in the high 32 bits, col in the low 32.
    #[inline]
    pub const fn pack(self) -> u64 {
        ((self.row as u64) << 32) | self.col as u64
    }

    #[inline]
    pub fn unpack(key: u64) -> Self {
        // Both halves fit by construction of `pack`.
        let row = u32::try_from(key >> 32).unwrap_or(u32::MAX);
        let col = u32::try_from(key & 0xFFFF_FFFF).unwrap_or(u32::MAX);
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellId {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// Inclusive rectangular range of cells.
///
/// Constructors normalise so that `min_* <= max_*` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl CellRange {
    /// Create a range from two corners in any order.
    pub fn new(row1: u32, col1: u32, row2: u32, col2: u32) -> Self {
        Self {
            min_row: row1.min(row2),
            min_col: col1.min(col2),
            max_row: row1.max(row2),
            max_col: col1.max(col2),
        }
    }

    /// Range spanning the two given cells.
    pub fn spanning(a: CellId, b: CellId) -> Self {
        Self::new(a.row, a.col, b.row, b.col)
    }

    pub fn single(cell: CellId) -> Self {
        Self::new(cell.row, cell.col, cell.row, cell.col)
    }

    pub fn top_left(&self) -> CellId {
        CellId::new(self.min_row, self.min_col)
    }

    pub fn bottom_right(&self) -> CellId {
        CellId::new(self.max_row, self.max_col)
    }

    pub fn row_span(&self) -> u32 {
        self.max_row - self.min_row + 1
    }

    pub fn col_span(&self) -> u32 {
        self.max_col - self.min_col + 1
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.row_span()) * u64::from(self.col_span())
    }

    /// True if the range covers exactly one cell.
    pub fn is_single(&self) -> bool {
        self.min_row == self.max_row && self.min_col == self.max_col
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    pub fn contains_cell(&self, cell: CellId) -> bool {
        self.contains(cell.row, cell.col)
    }

    /// True if `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &CellRange) -> bool {
        self.contains(other.min_row, other.min_col) && self.contains(other.max_row, other.max_col)
    }

    pub fn intersects(&self, other: &CellRange) -> bool {
        self.min_row <= other.max_row
            && other.min_row <= self.max_row
            && self.min_col <= other.max_col
            && other.min_col <= self.max_col
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &CellRange) -> CellRange {
        CellRange {
            min_row: self.min_row.min(other.min_row),
            min_col: self.min_col.min(other.min_col),
            max_row: self.max_row.max(other.max_row),
            max_col: self.max_col.max(other.max_col),
        }
    }

    /// Overlap of both ranges, if any.
    pub fn intersection(&self, other: &CellRange) -> Option<CellRange> {
        if !self.intersects(other) {
            return None;
        }
        Some(CellRange {
            min_row: self.min_row.max(other.min_row),
            min_col: self.min_col.max(other.min_col),
            max_row: self.max_row.min(other.max_row),
            max_col: self.max_col.min(other.max_col),
        })
    }

    /// Iterate every cell row-major.
    pub fn cells(&self) -> impl Iterator<Item = CellId> {
        let (min_col, max_col) = (self.min_col, self.max_col);
        (self.min_row..=self.max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| CellId::new(row, col)))
    }
}
