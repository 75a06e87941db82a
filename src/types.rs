//! Core types for quadcanvas.
//!
//! These are the values that flow from the drawing operations into the
//! cell grid and from there into the renderer.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// =============================================================================
// Color palette
// =============================================================================

/// One of the nine palette colors a cell can carry.
///
/// Each color has a fixed ANSI SGR code and a palette slot (1-9) that is
/// stored in the high nibble of a [`Cell`]. Slot 0 means "no override".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Brown,
    Blue,
    Magenta,
    Cyan,
    Grey,
    White,
}

/// Inverse of [`Color::index`], indexed by palette slot.
const BY_INDEX: [Option<Color>; 16] = [
    None,
    Some(Color::Black),
    Some(Color::Red),
    Some(Color::Green),
    Some(Color::Brown),
    Some(Color::Blue),
    Some(Color::Magenta),
    Some(Color::Cyan),
    Some(Color::Grey),
    Some(Color::White),
    None,
    None,
    None,
    None,
    None,
    None,
];

impl Color {
    /// All palette colors in slot order.
    pub const ALL: [Color; 9] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Brown,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Grey,
        Color::White,
    ];

    /// SGR parameter string written between `ESC[` and `m`.
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Color::Black => "0;30",
            Color::Red => "0;31",
            Color::Green => "0;32",
            Color::Brown => "0;33",
            Color::Blue => "0;34",
            Color::Magenta => "0;35",
            Color::Cyan => "0;36",
            Color::Grey => "0;37",
            Color::White => "0",
        }
    }

    /// Palette slot (1-9) stored in a cell's color nibble.
    pub const fn index(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::Red => 2,
            Color::Green => 3,
            Color::Brown => 4,
            Color::Blue => 5,
            Color::Magenta => 6,
            Color::Cyan => 7,
            Color::Grey => 8,
            Color::White => 9,
        }
    }

    /// Look up a color by palette slot. Slot 0 and slots above 9 yield `None`.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Color> {
        if index < 16 { BY_INDEX[index as usize] } else { None }
    }

    /// Look up a color by its SGR code (`"0;31"` etc).
    pub fn from_ansi_code(code: &str) -> Option<Color> {
        Self::ALL.into_iter().find(|c| c.ansi_code() == code)
    }

    /// Lowercase palette name.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Brown => "brown",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::Grey => "grey",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse a palette name (case-insensitive) or a raw SGR code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let by_name = match lower.as_str() {
            "gray" => Some(Color::Grey),
            name => Self::ALL.into_iter().find(|c| c.name() == name),
        };
        by_name
            .or_else(|| Self::from_ansi_code(s.trim()))
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

// =============================================================================
// Cell - one terminal character holding a 2x2 sub-pixel tile
// =============================================================================

/// A packed cell value.
///
/// Bit layout (must stay stable, the glyph table is indexed by it):
/// - low nibble: quadrant bits (8 = top-left, 4 = top-right,
///   2 = bottom-left, 1 = bottom-right)
/// - high nibble: palette slot, 0 = no color override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);

    const QUADRANT_MASK: u8 = 0b0000_1111;

    /// Wrap a raw packed value.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Build a cell from quadrant bits and an optional color.
    #[inline]
    pub const fn new(quadrants: u8, color: Option<Color>) -> Self {
        let slot = match color {
            Some(c) => c.index(),
            None => 0,
        };
        Self((quadrants & Self::QUADRANT_MASK) | (slot << 4))
    }

    /// The raw packed value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The 4-bit quadrant pattern.
    #[inline]
    pub const fn quadrant_bits(self) -> u8 {
        self.0 & Self::QUADRANT_MASK
    }

    /// The 4-bit palette slot.
    #[inline]
    pub const fn color_index(self) -> u8 {
        self.0 >> 4
    }

    /// The palette color, if the slot names one.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        Color::from_index(self.color_index())
    }

    /// True if no quadrant is set and no color is stored.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// OR a quadrant bit into the pattern, leaving the color alone.
    #[inline]
    pub const fn with_quadrant(self, bit: u8) -> Self {
        Self(self.0 | (bit & Self::QUADRANT_MASK))
    }

    /// Replace the color nibble for the whole cell.
    #[inline]
    pub const fn with_color(self, color: Color) -> Self {
        Self((self.0 & Self::QUADRANT_MASK) | (color.index() << 4))
    }

    /// Merge-blit combination: keep this cell's quadrant bits, drop its
    /// color, and OR in the whole source value.
    #[inline]
    pub const fn merged_with(self, source: Cell) -> Self {
        Self((self.0 & Self::QUADRANT_MASK) | source.0)
    }
}

impl From<u8> for Cell {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

// =============================================================================
// Blit mode (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// How [`Canvas::blit`](crate::Canvas::blit) combines cells.
    ///
    /// The empty set is plain overwrite. `SAFE` combines with either.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlitMode: u8 {
        const OVERWRITE = 0;
        const MERGE = 1 << 0;
        const SAFE = 1 << 1;
    }
}

// =============================================================================
// Text alignment
// =============================================================================

/// Horizontal anchoring of [`Canvas::text`](crate::Canvas::text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// `x` is the left edge of the first glyph.
    #[default]
    Left,
    /// `x` is the horizontal center of the whole string.
    Center,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_slots_round_trip() {
        for (i, color) in Color::ALL.into_iter().enumerate() {
            assert_eq!(color.index() as usize, i + 1);
            assert_eq!(Color::from_index(color.index()), Some(color));
        }
        assert_eq!(Color::from_index(0), None);
        assert_eq!(Color::from_index(10), None);
        assert_eq!(Color::from_index(15), None);
    }

    #[test]
    fn test_color_from_str() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("Cyan".parse::<Color>().unwrap(), Color::Cyan);
        assert_eq!("gray".parse::<Color>().unwrap(), Color::Grey);
        assert_eq!("0;34".parse::<Color>().unwrap(), Color::Blue);
        assert_eq!("0".parse::<Color>().unwrap(), Color::White);

        let err = "purple".parse::<Color>().unwrap_err();
        assert!(matches!(err, Error::UnknownColor(ref name) if name == "purple"));
    }

    #[test]
    fn test_cell_accessors() {
        let cell = Cell::new(0b1010, Some(Color::Green));
        assert_eq!(cell.quadrant_bits(), 0b1010);
        assert_eq!(cell.color_index(), 3);
        assert_eq!(cell.color(), Some(Color::Green));
        assert_eq!(cell.bits(), 0x3A);
        assert!(Cell::EMPTY.is_empty());
    }

    #[test]
    fn test_cell_with_quadrant_accumulates() {
        let cell = Cell::EMPTY.with_quadrant(8).with_quadrant(4).with_quadrant(8);
        assert_eq!(cell.quadrant_bits(), 12);
        assert_eq!(cell.color(), None);
    }

    #[test]
    fn test_cell_with_color_replaces_whole_nibble() {
        let cell = Cell::new(0b0001, Some(Color::White)).with_color(Color::Red);
        assert_eq!(cell.color(), Some(Color::Red));
        assert_eq!(cell.quadrant_bits(), 0b0001);
    }

    #[test]
    fn test_cell_merge_drops_destination_color() {
        let dest = Cell::new(0b1000, Some(Color::Blue));
        let src = Cell::new(0b0001, None);
        let merged = dest.merged_with(src);
        assert_eq!(merged.quadrant_bits(), 0b1001);
        assert_eq!(merged.color(), None);

        let colored = dest.merged_with(Cell::new(0b0010, Some(Color::Cyan)));
        assert_eq!(colored.quadrant_bits(), 0b1010);
        assert_eq!(colored.color(), Some(Color::Cyan));
    }

    #[test]
    fn test_blit_mode_flags() {
        let mode = BlitMode::MERGE | BlitMode::SAFE;
        assert!(mode.contains(BlitMode::MERGE));
        assert!(!(mode - BlitMode::SAFE).contains(BlitMode::SAFE));
        assert!(BlitMode::default().is_empty());
        assert_eq!(BlitMode::OVERWRITE, BlitMode::empty());
    }
}
