//! Sub-pixel encoding.
//!
//! Every terminal cell covers a 2x2 block of logical pixels. A pixel maps to
//! one of four quadrant bits, and the 4-bit pattern of a cell maps to one of
//! the sixteen Unicode quadrant-block glyphs.
//!
//! ```text
//!   even x   odd x
//!  +-------+-------+
//!  |   8   |   4   |  even y
//!  +-------+-------+
//!  |   2   |   1   |  odd y
//!  +-------+-------+
//! ```

/// Glyph for every quadrant pattern, indexed by the pattern itself.
pub const GLYPHS: [char; 16] = [
    ' ',  // 0000
    '▗', // 0001
    '▖', // 0010
    '▄', // 0011
    '▝', // 0100
    '▐', // 0101
    '▞', // 0110
    '▟', // 0111
    '▘', // 1000
    '▚', // 1001
    '▌', // 1010
    '▙', // 1011
    '▀', // 1100
    '▜', // 1101
    '▛', // 1110
    '█', // 1111
];

/// Quadrant bit for a pixel coordinate.
///
/// Only the parity of each axis matters. Callers are expected to pass
/// non-negative coordinates; negative ones are rejected before this point.
#[inline]
pub const fn quadrant_bit(x: i32, y: i32) -> u8 {
    let mut bit = 1;
    if y % 2 == 0 {
        bit <<= 2;
    }
    if x % 2 == 0 {
        bit <<= 1;
    }
    bit
}

/// Display glyph for a quadrant pattern. Bits above the low nibble are ignored.
#[inline]
pub const fn glyph_for(quadrants: u8) -> char {
    GLYPHS[(quadrants & 0x0F) as usize]
}

/// Cell coordinate containing a pixel coordinate (integer division).
#[inline]
pub const fn cell_of(x: i32, y: i32) -> (i32, i32) {
    (x / 2, y / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_quadrant_bits() {
        assert_eq!(quadrant_bit(0, 0), 8);
        assert_eq!(quadrant_bit(1, 0), 4);
        assert_eq!(quadrant_bit(0, 1), 2);
        assert_eq!(quadrant_bit(1, 1), 1);
        assert_eq!(quadrant_bit(6, 9), 2);
        assert_eq!(quadrant_bit(7, 4), 4);
    }

    #[test]
    fn test_glyph_table_is_distinct() {
        let unique: HashSet<char> = GLYPHS.iter().copied().collect();
        assert_eq!(unique.len(), 16);
        assert_eq!(glyph_for(0), ' ');
        assert_eq!(glyph_for(15), '█');
    }

    #[test]
    fn test_glyph_matches_quadrants() {
        assert_eq!(glyph_for(8), '▘');
        assert_eq!(glyph_for(4), '▝');
        assert_eq!(glyph_for(2), '▖');
        assert_eq!(glyph_for(1), '▗');
        assert_eq!(glyph_for(8 | 4), '▀');
        assert_eq!(glyph_for(2 | 1), '▄');
        assert_eq!(glyph_for(8 | 2), '▌');
        assert_eq!(glyph_for(4 | 1), '▐');
        assert_eq!(glyph_for(8 | 1), '▚');
        assert_eq!(glyph_for(4 | 2), '▞');
    }

    #[test]
    fn test_glyph_ignores_color_nibble() {
        assert_eq!(glyph_for(0x2C), '▀');
    }

    #[test]
    fn test_cell_of() {
        assert_eq!(cell_of(0, 0), (0, 0));
        assert_eq!(cell_of(3, 5), (1, 2));
        assert_eq!(cell_of(20, 10), (10, 5));
    }
}
