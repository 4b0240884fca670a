use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// 0x00RRGGBB color, or the `DEFAULT` sentinel meaning "use the template color".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Sentinel: inherit from the region template / system palette.
    pub const DEFAULT: Color = Color(0xFF00_0000);
    pub const BLACK: Color = Color(0x0000_0000);
    pub const WHITE: Color = Color(0x00FF_FFFF);
    /// Windows-style button face used for fixed cells.
    pub const BUTTON_FACE: Color = Color(0x00F0_F0F0);
    /// Highlight background used for selected cells.
    pub const HIGHLIGHT: Color = Color(0x00CF_D8E8);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// `self`, or `fallback` if `self` is the default sentinel.
    pub fn or(self, fallback: Color) -> Color {
        if self.is_default() {
            fallback
        } else {
            self
        }
    }

    /// CSS hex string (`#RRGGBB`), as consumed by canvas renderers.
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Font descriptor. The engine never measures text; this is carried for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDesc {
    pub face: String,
    /// Size in points
    pub size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl Default for FontDesc {
    fn default() -> Self {
        Self {
            face: "Segoe UI".to_string(),
            size: 9.0,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

bitflags! {
    /// Text alignment and layout flags. `LEFT` and top alignment are the
    /// zero value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TextFormat: u32 {
        const LEFT         = 0x0000;
        const CENTER       = 0x0001;
        const RIGHT        = 0x0002;
        const VCENTER      = 0x0004;
        const BOTTOM       = 0x0008;
        const WORD_BREAK   = 0x0010;
        const SINGLE_LINE  = 0x0020;
        const NO_PREFIX    = 0x0800;
        const END_ELLIPSIS = 0x8000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_fallback() {
        assert_eq!(Color::DEFAULT.or(Color::WHITE), Color::WHITE);
        assert_eq!(Color::BLACK.or(Color::WHITE), Color::BLACK);
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_hex(), "#123456");
    }

    #[test]
    fn test_format_flags() {
        let f = TextFormat::CENTER | TextFormat::VCENTER | TextFormat::SINGLE_LINE;
        assert!(f.contains(TextFormat::VCENTER));
        assert!(!f.contains(TextFormat::RIGHT));
    }
}
