use serde::{Deserialize, Serialize};

/// Shape of the in-progress (or last) selection gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// No gesture in progress
    #[default]
    NoSelection,
    /// All cells selected (fixed corner origin)
    AllSelected,
    /// Entire row(s) selected (fixed column origin or list mode)
    RowSelection,
    /// Entire column(s) selected (fixed row origin)
    ColumnSelection,
    /// Rectangular cell range (body origin)
    RectSelection,
}

/// Keyboard modifiers held when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Add to the existing selection instead of replacing it
    pub ctrl: bool,
    /// Extend from the existing anchor
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
}

/// Navigation keys understood by [`crate::Grid::key_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Search direction for [`crate::Grid::next_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
    ToLeft,
    ToRight,
    /// Row-major scan starting after the given cell
    All,
}
