//! Terminal cell: one grid position's character plus its packed attributes.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Cell color, matching the three forms SGR can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Default foreground or background (renderer decides the actual color)
    Default,
    /// One of the 16 named ANSI colors (0-7 normal, 8-15 bright)
    Named(NamedColor),
    /// 256-color palette index
    Indexed(u8),
    /// 24-bit RGB
    Rgb(u8, u8, u8),
}

impl Color {
    /// Map an ANSI 256-color code to a `Color`
    pub fn from_ansi_code(code: u8) -> Self {
        if code < 16 {
            Color::Named(NamedColor::from_u8(code))
        } else {
            Color::Indexed(code)
        }
    }
}

/// The 16 named ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    pub fn from_u8(v: u8) -> Self {
        match v & 0x0f {
            0 => NamedColor::Black,
            1 => NamedColor::Red,
            2 => NamedColor::Green,
            3 => NamedColor::Yellow,
            4 => NamedColor::Blue,
            5 => NamedColor::Magenta,
            6 => NamedColor::Cyan,
            7 => NamedColor::White,
            8 => NamedColor::BrightBlack,
            9 => NamedColor::BrightRed,
            10 => NamedColor::BrightGreen,
            11 => NamedColor::BrightYellow,
            12 => NamedColor::BrightBlue,
            13 => NamedColor::BrightMagenta,
            14 => NamedColor::BrightCyan,
            _ => NamedColor::BrightWhite,
        }
    }
}

bitflags! {
    /// Packed per-cell attribute word
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CellFlags: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const REVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
        /// Continuation cell of a double-width glyph; carries no character
        const WIDE_SPACER   = 1 << 8;
    }
}

impl CellFlags {
    pub fn wide_char_spacer(&self) -> bool {
        self.contains(CellFlags::WIDE_SPACER)
    }
}

/// A single terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The character stored here (space for empty cells)
    pub c: char,
    /// Display width of the character (1, or 2 for East-Asian-Wide glyphs)
    pub width: u8,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Attribute flags
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            c: ' ',
            width: 1,
            fg: Color::Default,
            bg: Color::Default,
            flags: CellFlags::default(),
        }
    }
}

impl Cell {
    pub fn new(c: char, width: u8, fg: Color, bg: Color, flags: CellFlags) -> Self {
        Self {
            c,
            width,
            fg,
            bg,
            flags,
        }
    }

    /// Continuation half of a wide glyph
    pub fn wide_spacer(fg: Color, bg: Color) -> Self {
        Self {
            c: ' ',
            width: 1,
            fg,
            bg,
            flags: CellFlags::WIDE_SPACER,
        }
    }

    /// Reset to the blank default cell
    pub fn reset(&mut self) {
        *self = Cell::default();
    }

    /// True if this cell holds no visible content or attributes
    pub fn is_empty(&self) -> bool {
        self.c == ' '
            && self.flags.is_empty()
            && self.fg == Color::Default
            && self.bg == Color::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_blank_space() {
        let cell = Cell::default();
        assert_eq!(cell.c, ' ');
        assert_eq!(cell.width, 1);
        assert!(cell.is_empty());
    }

    #[test]
    fn reset_clears_attributes() {
        let mut cell = Cell::new('x', 1, Color::Rgb(1, 2, 3), Color::Default, CellFlags::BOLD);
        assert!(!cell.is_empty());
        cell.reset();
        assert!(cell.is_empty());
    }

    #[test]
    fn from_ansi_code_splits_named_and_indexed() {
        assert_eq!(Color::from_ansi_code(1), Color::Named(NamedColor::Red));
        assert_eq!(Color::from_ansi_code(9), Color::Named(NamedColor::BrightRed));
        assert_eq!(Color::from_ansi_code(196), Color::Indexed(196));
    }

    #[test]
    fn wide_spacer_flag() {
        let spacer = Cell::wide_spacer(Color::Default, Color::Default);
        assert!(spacer.flags.wide_char_spacer());
    }
}
