//! ANSI escape sequences used by the canvas.
//!
//! The byte layout of these sequences is part of the public contract: row and
//! column are the 0-based cell indices produced by the canvas, written as-is.

use std::io::Write;

use crate::types::Color;

// =============================================================================
// Constants
// =============================================================================

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// Clear the whole screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Reset all attributes and colors.
pub const RESET: &str = "\x1b[0m";

// =============================================================================
// Cursor
// =============================================================================

/// Move cursor to a cell (`ESC[{row};{col}f`).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, col: u16, row: u16) -> std::io::Result<()> {
    write!(w, "\x1b[{};{}f", row, col)
}

// =============================================================================
// Screen
// =============================================================================

/// Clear entire screen.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    w.write_all(CLEAR_SCREEN.as_bytes())
}

// =============================================================================
// Colors
// =============================================================================

/// Select a palette foreground color (`ESC[{code}m`).
#[inline]
pub fn set_color<W: Write>(w: &mut W, color: Color) -> std::io::Result<()> {
    write!(w, "{}{}m", CSI, color.ansi_code())
}

/// Restore the terminal default color.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    w.write_all(RESET.as_bytes())
}
