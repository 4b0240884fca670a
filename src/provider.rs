//! Virtual-mode data provider.
//!
//! In virtual mode the grid stores no cell content. Each cell query seeds a
//! scratch cell from the region template and asks the provider to fill the
//! requested fields for the *logical* (unsorted, unreordered) coordinate.

use bitflags::bitflags;

use crate::types::Cell;

bitflags! {
    /// Which cell fields a query wants filled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldMask: u32 {
        const TEXT   = 0x0001;
        const FORMAT = 0x0002;
        const FG     = 0x0004;
        const BG     = 0x0008;
        const IMAGE  = 0x0010;
        const DATA   = 0x0020;
        const FONT   = 0x0040;
        const ALL    = 0x007F;
    }
}

/// Supplies cell content on demand.
///
/// Providers are called synchronously with shared access only, so they
/// cannot change grid geometry while a query is in progress.
pub trait DataProvider {
    fn fill(&self, row: u32, col: u32, mask: FieldMask, cell: &mut Cell);
}

impl<F> DataProvider for F
where
    F: Fn(u32, u32, FieldMask, &mut Cell),
{
    fn fill(&self, row: u32, col: u32, mask: FieldMask, cell: &mut Cell) {
        self(row, col, mask, cell);
    }
}
