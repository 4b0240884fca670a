use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Deref;

use super::{Color, FontDesc, TextFormat};

bitflags! {
    /// Cell state bits.
    ///
    /// Only `READ_ONLY`, `DROP_HIGHLIGHTED` and `MODIFIED` are stored on a cell.
    /// `SELECTED`, `FOCUSED` and the fixed bits are derived on read from the
    /// selection model and region classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CellState: u32 {
        const FOCUSED          = 0x0001;
        const SELECTED         = 0x0002;
        const DROP_HIGHLIGHTED = 0x0004;
        const READ_ONLY        = 0x0008;
        const FIXED            = 0x0010;
        const FIXED_ROW        = 0x0020;
        const FIXED_COL        = 0x0040;
        const MODIFIED         = 0x0080;

        /// Bits a cell keeps in storage.
        const PERSISTENT = Self::DROP_HIGHLIGHTED.bits() | Self::READ_ONLY.bits() | Self::MODIFIED.bits();
    }
}

impl CellState {
    /// Keep only the bits that live in storage.
    pub fn persistent(self) -> CellState {
        self & Self::PERSISTENT
    }
}

/// A single cell's content and attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub text: String,
    pub format: TextFormat,
    pub fg: Color,
    pub bg: Color,
    /// Foreground used while highlighted (selected/focused)
    pub hl_fg: Color,
    /// Background used while highlighted (selected/focused)
    pub hl_bg: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontDesc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<u32>,
    /// Opaque host data
    pub data: u64,
    pub state: CellState,
}

impl Cell {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_selected(&self) -> bool {
        self.state.contains(CellState::SELECTED)
    }

    pub fn is_focused(&self) -> bool {
        self.state.contains(CellState::FOCUSED)
    }

    pub fn is_fixed(&self) -> bool {
        self.state.contains(CellState::FIXED)
    }

    pub fn is_read_only(&self) -> bool {
        self.state.contains(CellState::READ_ONLY)
    }

    /// Effective colors for painting, resolving highlight and default sentinels
    /// against the given template.
    pub fn paint_colors(&self, template: &Cell) -> (Color, Color) {
        let highlighted = self.state.intersects(CellState::SELECTED | CellState::DROP_HIGHLIGHTED)
            && !self.is_fixed();
        if highlighted {
            (
                self.hl_fg.or(template.hl_fg).or(Color::BLACK),
                self.hl_bg.or(template.hl_bg).or(Color::HIGHLIGHT),
            )
        } else {
            (
                self.fg.or(template.fg).or(Color::BLACK),
                self.bg.or(template.bg).or(Color::WHITE),
            )
        }
    }
}

/// Template cells used to seed new and synthesized cells, one per region kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultCells {
    pub body: Cell,
    pub fixed_row: Cell,
    pub fixed_col: Cell,
    pub fixed_corner: Cell,
}

impl Default for DefaultCells {
    fn default() -> Self {
        let body = Cell {
            format: TextFormat::LEFT
                | TextFormat::VCENTER
                | TextFormat::SINGLE_LINE
                | TextFormat::NO_PREFIX
                | TextFormat::END_ELLIPSIS,
            fg: Color::BLACK,
            bg: Color::WHITE,
            hl_fg: Color::BLACK,
            hl_bg: Color::HIGHLIGHT,
            ..Cell::default()
        };
        let fixed = Cell {
            format: TextFormat::CENTER
                | TextFormat::VCENTER
                | TextFormat::SINGLE_LINE
                | TextFormat::NO_PREFIX,
            bg: Color::BUTTON_FACE,
            ..body.clone()
        };
        Self {
            body,
            fixed_row: fixed.clone(),
            fixed_col: fixed.clone(),
            fixed_corner: fixed,
        }
    }
}

impl DefaultCells {
    /// Template for a cell given whether its row and column are fixed.
    pub fn template(&self, fixed_row: bool, fixed_col: bool) -> &Cell {
        match (fixed_row, fixed_col) {
            (true, true) => &self.fixed_corner,
            (true, false) => &self.fixed_row,
            (false, true) => &self.fixed_col,
            (false, false) => &self.body,
        }
    }
}

/// A cell returned from a grid query.
///
/// Borrowed from the store in array mode; an owned snapshot in virtual mode.
/// Either way the caller sees a `Cell` with derived state bits applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView<'a>(pub(crate) Cow<'a, Cell>);

impl<'a> CellView<'a> {
    pub fn into_owned(self) -> Cell {
        self.0.into_owned()
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self.0, Cow::Borrowed(_))
    }
}

impl Deref for CellView<'_> {
    type Target = Cell;

    fn deref(&self) -> &Cell {
        &self.0
    }
}
