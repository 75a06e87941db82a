//! The drawing surface.
//!
//! A [`Canvas`] owns a grid of packed cells and an [`IncrementalRenderer`].
//! Every operation that changes a cell renders that cell immediately, so
//! drawing on an outputting canvas updates the terminal as it goes.
//!
//! Coordinates passed to drawing operations are in pixel space, which is
//! twice the cell grid in each direction.

mod blit;
mod grid;
mod raster;

use std::io::{self, Stdout, Write};
use std::sync::Arc;

use tracing::debug;

pub use blit::BlitOptions;
pub use grid::CellGrid;

use crate::codec::{cell_of, quadrant_bit};
use crate::error::Result;
use crate::font::FontCache;
use crate::renderer::{IncrementalRenderer, RenderState};
use crate::terminal;
use crate::types::{Cell, Color};

// =============================================================================
// Builder
// =============================================================================

/// Configuration for a new canvas.
///
/// Dimensions left unset are taken from the terminal, falling back to
/// 80x24 when it cannot be queried.
#[derive(Default)]
pub struct CanvasBuilder {
    cols: Option<u16>,
    rows: Option<u16>,
    silent: bool,
    fonts: Option<Arc<FontCache>>,
}

impl CanvasBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width in cells.
    pub fn cols(mut self, cols: u16) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Height in cells.
    pub fn rows(mut self, rows: u16) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Whether drawing writes to the sink. Defaults to true.
    pub fn output(mut self, output: bool) -> Self {
        self.silent = !output;
        self
    }

    /// Share a font cache between canvases.
    pub fn fonts(mut self, fonts: Arc<FontCache>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Build a canvas drawing to stdout.
    pub fn build(self) -> Canvas<Stdout> {
        self.build_with(io::stdout())
    }

    /// Build a canvas drawing to `sink`.
    pub fn build_with<W: Write>(self, sink: W) -> Canvas<W> {
        let (cols, rows) = terminal::resolve_size(self.cols, self.rows);
        Canvas {
            grid: CellGrid::new(cols, rows),
            renderer: IncrementalRenderer::new(sink, !self.silent),
            fonts: self.fonts.unwrap_or_default(),
        }
    }
}

// =============================================================================
// Canvas
// =============================================================================

/// A terminal drawing surface with 2x2 sub-pixels per cell.
pub struct Canvas<W: Write = Stdout> {
    grid: CellGrid,
    renderer: IncrementalRenderer<W>,
    fonts: Arc<FontCache>,
}

impl Canvas<Stdout> {
    /// Create an outputting canvas on stdout sized to the terminal.
    pub fn new() -> Self {
        CanvasBuilder::new().build()
    }

    /// Start configuring a canvas.
    pub fn builder() -> CanvasBuilder {
        CanvasBuilder::new()
    }
}

impl Default for Canvas<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas<io::Sink> {
    /// Create a canvas that never writes anything.
    pub fn headless(cols: u16, rows: u16) -> Self {
        Self::with_sink(cols, rows, io::sink(), false)
    }
}

impl<W: Write> Canvas<W> {
    /// Create a canvas of an explicit size writing to `sink`.
    pub fn with_sink(cols: u16, rows: u16, sink: W, output: bool) -> Self {
        CanvasBuilder::new()
            .cols(cols)
            .rows(rows)
            .output(output)
            .build_with(sink)
    }

    // =========================================================================
    // Dimensions
    // =========================================================================

    /// Width in cells.
    #[inline]
    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    /// Height in cells.
    #[inline]
    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    /// Width in pixels (`cols * 2`).
    #[inline]
    pub fn width(&self) -> i32 {
        self.grid.cols() as i32 * 2
    }

    /// Height in pixels (`rows * 2`).
    #[inline]
    pub fn height(&self) -> i32 {
        self.grid.rows() as i32 * 2
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Whether drawing writes to the sink.
    #[inline]
    pub fn is_output(&self) -> bool {
        self.renderer.is_output()
    }

    /// Current renderer state (active color and known cursor cell).
    #[inline]
    pub fn render_state(&self) -> RenderState {
        self.renderer.state()
    }

    /// Active drawing color.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.renderer.color()
    }

    /// Font cache used by [`text`](Self::text).
    pub fn fonts(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Replace the font cache.
    pub fn set_fonts(&mut self, fonts: Arc<FontCache>) {
        self.fonts = fonts;
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &W {
        self.renderer.sink()
    }

    /// Mutably borrow the sink.
    pub fn sink_mut(&mut self) -> &mut W {
        self.renderer.sink_mut()
    }

    /// Consume the canvas and return its sink.
    pub fn into_sink(self) -> W {
        self.renderer.into_sink()
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.renderer.flush()?)
    }

    // =========================================================================
    // Cell data
    // =========================================================================

    /// The raw cell grid.
    pub fn data(&self) -> &CellGrid {
        &self.grid
    }

    /// Replace the cell grid outright. The canvas takes on the grid's size.
    ///
    /// Nothing is rendered; call [`render`](Self::render) to redraw.
    pub fn set_data(&mut self, grid: CellGrid) {
        if grid.cols() != self.grid.cols() || grid.rows() != self.grid.rows() {
            debug!(
                from_cols = self.grid.cols(),
                from_rows = self.grid.rows(),
                to_cols = grid.cols(),
                to_rows = grid.rows(),
                "canvas data replaced with different dimensions"
            );
        }
        self.grid = grid;
    }

    /// A non-outputting copy of this canvas sharing the font cache.
    pub fn clone_headless(&self) -> Canvas<io::Sink> {
        Canvas {
            grid: self.grid.clone(),
            renderer: IncrementalRenderer::new(io::sink(), false),
            fonts: Arc::clone(&self.fonts),
        }
    }

    /// Store a cell and render it.
    pub(crate) fn write_cell(&mut self, col: u16, row: u16, cell: Cell) -> Result<()> {
        self.grid.set(col as i32, row as i32, cell);
        self.renderer.render_cell(col, row, cell)?;
        Ok(())
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Set one pixel.
    ///
    /// The quadrant bit is OR-ed into its cell; the active color, if any,
    /// replaces the color of the whole cell. Pixels outside the canvas are
    /// ignored.
    pub fn plot(&mut self, x: i32, y: i32) -> Result<()> {
        // The upper bound is inclusive; the boundary pixel maps to a cell
        // past the grid and is clipped below.
        if x < 0 || y < 0 || x > self.width() || y > self.height() {
            return Ok(());
        }

        let (col, row) = cell_of(x, y);
        let Some(cell) = self.grid.get(col, row) else {
            return Ok(());
        };

        let mut next = cell.with_quadrant(quadrant_bit(x, y));
        if let Some(color) = self.renderer.color() {
            next = next.with_color(color);
        }

        self.write_cell(col as u16, row as u16, next)
    }

    /// Whether the sub-pixel at `(x, y)` is set.
    pub fn point(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (col, row) = cell_of(x, y);
        self.grid
            .get(col, row)
            .is_some_and(|cell| cell.quadrant_bits() & quadrant_bit(x, y) != 0)
    }

    /// Select the color for subsequent plots and emit it.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        Ok(self.renderer.set_color(color)?)
    }

    /// Go back to the terminal default color and emit the reset.
    pub fn clear_color(&mut self) -> Result<()> {
        Ok(self.renderer.clear_color()?)
    }

    /// Empty every cell and clear the screen. The cursor becomes unknown.
    pub fn clear(&mut self) -> Result<()> {
        self.grid.clear();
        Ok(self.renderer.clear_screen()?)
    }

    /// Switch output on and redraw every cell.
    pub fn render(&mut self) -> Result<()> {
        self.renderer.set_output(true);
        for (col, row, cell) in self.grid.iter() {
            self.renderer.render_cell(col, row, cell)?;
        }
        Ok(())
    }

    /// Move the terminal cursor to the cell holding pixel `(x, y)`.
    ///
    /// Useful for parking the cursor once drawing is done.
    pub fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        let (col, row) = cell_of(x, y);
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return Ok(());
        };
        Ok(self.renderer.move_to(col, row)?)
    }

    /// Write plain text starting at the cell holding pixel `(x, y)`.
    pub fn write_string(&mut self, x: i32, y: i32, text: &str) -> Result<()> {
        if !self.renderer.is_output() {
            return Ok(());
        }
        self.move_cursor(x, y)?;
        Ok(self.renderer.write_str(text)?)
    }
}

// =============================================================================
// Tests
// =============================================================================
