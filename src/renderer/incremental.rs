//! Incremental cell renderer.
//!
//! Each changed cell is written to the sink as soon as it changes. To keep
//! the byte count down the renderer remembers where the terminal cursor is
//! after the last glyph, and skips the positioning escape when the next cell
//! is the one directly to the right of it.
//!
//! # Algorithm
//!
//! For a cell `(col, row)`:
//! 1. Resolve the glyph from the quadrant nibble
//! 2. If the cell carries a palette slot, select that color (always emitted)
//! 3. If the cursor already sits on `(col, row)` write the glyph, otherwise
//!    position first
//! 4. Remember the cursor as `(col + 1, row)`

use std::io::{self, Write};

use tracing::trace;

use super::ansi;
use crate::codec::glyph_for;
use crate::types::{Cell, Color};

// =============================================================================
// RenderState
// =============================================================================

/// Per-renderer drawing state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    /// Color applied to subsequent plots.
    pub color: Option<Color>,
    /// Cell the terminal cursor is known to sit on. `None` = unknown.
    pub cursor: Option<(u16, u16)>,
}

// =============================================================================
// IncrementalRenderer
// =============================================================================

/// Writes cells to a sink while tracking cursor and color.
#[derive(Debug)]
pub struct IncrementalRenderer<W: Write> {
    sink: W,
    output: bool,
    state: RenderState,
}

impl<W: Write> IncrementalRenderer<W> {
    /// Create a renderer writing into `sink`. With `output == false` nothing
    /// is ever written, but color state is still tracked.
    pub fn new(sink: W, output: bool) -> Self {
        Self {
            sink,
            output,
            state: RenderState::default(),
        }
    }

    /// Whether cells are being written to the sink.
    #[inline]
    pub fn is_output(&self) -> bool {
        self.output
    }

    /// Turn writing on or off.
    #[inline]
    pub fn set_output(&mut self, output: bool) {
        self.output = output;
    }

    /// Current drawing state.
    #[inline]
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Active drawing color.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.state.color
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Mutably borrow the sink.
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the renderer and return its sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Select the drawing color and emit it.
    ///
    /// The escape is written on every call; callers decide whether a change
    /// is worth emitting.
    pub fn set_color(&mut self, color: Color) -> io::Result<()> {
        self.state.color = Some(color);
        if self.output {
            ansi::set_color(&mut self.sink, color)?;
        }
        Ok(())
    }

    /// Drop the drawing color and emit the reset sequence.
    pub fn clear_color(&mut self) -> io::Result<()> {
        self.state.color = None;
        if self.output {
            ansi::reset(&mut self.sink)?;
        }
        Ok(())
    }

    /// Clear the terminal and forget the cursor.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.state.cursor = None;
        if self.output {
            ansi::clear_screen(&mut self.sink)?;
        }
        Ok(())
    }

    /// Position the cursor on a cell without writing a glyph.
    pub fn move_to(&mut self, col: u16, row: u16) -> io::Result<()> {
        if self.output {
            ansi::cursor_to(&mut self.sink, col, row)?;
            self.state.cursor = Some((col, row));
        }
        Ok(())
    }

    /// Write arbitrary text at the current cursor position.
    ///
    /// The cursor is forgotten afterwards since the width of `text` on
    /// screen is not tracked.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        if self.output {
            self.sink.write_all(text.as_bytes())?;
            self.state.cursor = None;
        }
        Ok(())
    }

    /// Render one cell.
    pub fn render_cell(&mut self, col: u16, row: u16, cell: Cell) -> io::Result<()> {
        if !self.output {
            return Ok(());
        }

        let glyph = glyph_for(cell.quadrant_bits());

        // 1. Color (only cells carrying a slot switch it)
        if cell.color_index() > 0 {
            match cell.color() {
                Some(color) => self.set_color(color)?,
                None => trace!(col, row, slot = cell.color_index(), "cell carries unknown palette slot"),
            }
        }

        // 2. Cursor movement (only if not sequential)
        if self.state.cursor != Some((col, row)) {
            ansi::cursor_to(&mut self.sink, col, row)?;
        }

        // 3. Glyph
        let mut buf = [0u8; 4];
        self.sink.write_all(glyph.encode_utf8(&mut buf).as_bytes())?;

        self.state.cursor = Some((col.saturating_add(1), row));
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

// =============================================================================
// Tests
// =============================================================================
