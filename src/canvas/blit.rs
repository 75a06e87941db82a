//! Compositing one cell grid onto another.
//!
//! Blits work on whole cells. The destination position is given in pixels
//! and snapped to the cell grid by integer division, so an odd pixel
//! coordinate lands on the cell to its left (or above).

use std::io::Write;

use super::grid::CellGrid;
use super::Canvas;
use crate::codec::cell_of;
use crate::error::Result;
use crate::types::BlitMode;

/// Per-call blit configuration.
///
/// `width`/`height` are in cells and default to the full source grid.
/// Offsets select where in the source grid the copied window starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlitOptions {
    pub mode: BlitMode,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl BlitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: BlitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Window size in cells.
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Window origin in source cells.
    pub fn offset(mut self, x_offset: i32, y_offset: i32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    fn window(&self, source: &CellGrid) -> (u16, u16) {
        (
            self.width.unwrap_or(source.cols()),
            self.height.unwrap_or(source.rows()),
        )
    }
}

impl<W: Write> Canvas<W> {
    /// Copy a window of `source` onto this canvas with its top-left corner
    /// at pixel `(x, y)`.
    ///
    /// Cells that fall outside either grid are skipped. Every written cell is
    /// rendered.
    pub fn blit<S: Write>(
        &mut self,
        x: i32,
        y: i32,
        source: &Canvas<S>,
        options: BlitOptions,
    ) -> Result<()> {
        self.blit_grid(x, y, &source.grid, options)
    }

    /// Blit a window of this canvas onto itself.
    ///
    /// Always staged through an intermediate grid, so overlapping source and
    /// destination regions read the original cells.
    pub fn blit_within(&mut self, x: i32, y: i32, options: BlitOptions) -> Result<()> {
        let (width, height) = options.window(&self.grid);
        let staged = stage(&self.grid, width, height, options)?;
        self.composite(x, y, &staged, width, height, 0, 0, options.mode)
    }

    /// Blit from a raw grid.
    pub fn blit_grid(
        &mut self,
        x: i32,
        y: i32,
        source: &CellGrid,
        options: BlitOptions,
    ) -> Result<()> {
        let (width, height) = options.window(source);

        if options.mode.contains(BlitMode::SAFE) {
            let staged = stage(source, width, height, options)?;
            return self.composite(x, y, &staged, width, height, 0, 0, options.mode);
        }

        self.composite(
            x,
            y,
            source,
            width,
            height,
            options.x_offset,
            options.y_offset,
            options.mode,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn composite(
        &mut self,
        x: i32,
        y: i32,
        source: &CellGrid,
        width: u16,
        height: u16,
        x_offset: i32,
        y_offset: i32,
        mode: BlitMode,
    ) -> Result<()> {
        let (dest_col, dest_row) = cell_of(x, y);
        let merge = mode.contains(BlitMode::MERGE);

        for xp in 0..width as i32 {
            for yp in 0..height as i32 {
                let (Some(sx), Some(sy)) = (xp.checked_add(x_offset), yp.checked_add(y_offset)) else {
                    continue;
                };
                let Some(src) = source.get(sx, sy) else {
                    continue;
                };
                let (col, row) = (dest_col + xp, dest_row + yp);
                let Some(dest) = self.grid.get(col, row) else {
                    continue;
                };

                let next = if merge { dest.merged_with(src) } else { src };
                self.write_cell(col as u16, row as u16, next)?;
            }
        }

        Ok(())
    }
}

/// Copy the requested window into a fresh grid of exactly `width x height`.
fn stage(source: &CellGrid, width: u16, height: u16, options: BlitOptions) -> Result<CellGrid> {
    let mut inter = Canvas::headless(width, height);
    inter.blit_grid(
        0,
        0,
        source,
        BlitOptions {
            mode: options.mode - BlitMode::SAFE,
            width: Some(width),
            height: Some(height),
            x_offset: options.x_offset,
            y_offset: options.y_offset,
        },
    )?;
    Ok(inter.grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::OutputBuffer;
    use crate::types::{Cell, Color};

    fn sprite() -> Canvas<std::io::Sink> {
        let mut s = Canvas::headless(2, 2);
        s.plot(0, 0).unwrap();
        s.plot(3, 3).unwrap();
        s
    }

    #[test]
    fn test_overwrite_copies_cells_at_snapped_offset() {
        let src = sprite();
        let mut dest = Canvas::headless(6, 6);
        dest.blit(5, 3, &src, BlitOptions::new()).unwrap();

        assert_eq!(dest.data().get(2, 1), Some(Cell::from_bits(8)));
        assert_eq!(dest.data().get(3, 2), Some(Cell::from_bits(1)));
        assert_eq!(dest.data().get(3, 1), Some(Cell::EMPTY));
        assert_eq!(dest.data().cells().iter().filter(|c| !c.is_empty()).count(), 2);
    }

    #[test]
    fn test_overwrite_replaces_existing_bits() {
        let src = sprite();
        let mut dest = Canvas::headless(4, 4);
        dest.plot(1, 1).unwrap();
        dest.blit(0, 0, &src, BlitOptions::new()).unwrap();
        assert_eq!(dest.data().get(0, 0), Some(Cell::from_bits(8)));
    }

    #[test]
    fn test_merge_keeps_destination_bits() {
        let src = sprite();
        let mut dest = Canvas::headless(4, 4);
        dest.set_color(Color::Red).unwrap();
        dest.plot(1, 1).unwrap();
        dest.plot(2, 0).unwrap();

        dest.blit(0, 0, &src, BlitOptions::new().mode(BlitMode::MERGE)).unwrap();

        // Quadrants OR together; the destination color is dropped.
        assert_eq!(dest.data().get(0, 0), Some(Cell::from_bits(0b1001)));
        // Source cell is empty: destination bits survive.
        assert_eq!(dest.data().get(1, 0), Some(Cell::from_bits(8)));
    }

    #[test]
    fn test_merge_takes_source_color() {
        let mut src = Canvas::headless(1, 1);
        src.set_color(Color::Green).unwrap();
        src.plot(1, 0).unwrap();

        let mut dest = Canvas::headless(1, 1);
        dest.plot(0, 1).unwrap();
        dest.blit(0, 0, &src, BlitOptions::new().mode(BlitMode::MERGE)).unwrap();

        let cell = dest.data().get(0, 0).unwrap();
        assert_eq!(cell.quadrant_bits(), 0b0110);
        assert_eq!(cell.color(), Some(Color::Green));
    }

    #[test]
    fn test_window_and_offset() {
        let mut src = Canvas::headless(4, 4);
        for x in 0..8 {
            src.plot(x, x).unwrap();
        }
        let mut dest = Canvas::headless(4, 4);
        dest.blit(0, 0, &src, BlitOptions::new().size(2, 2).offset(2, 2)).unwrap();

        assert_eq!(dest.data().get(0, 0), src.data().get(2, 2));
        assert_eq!(dest.data().get(1, 1), src.data().get(3, 3));
        assert_eq!(dest.data().get(2, 2), Some(Cell::EMPTY));
    }

    #[test]
    fn test_clipping_never_fails() {
        let src = sprite();
        let mut dest = Canvas::headless(2, 2);
        dest.blit(3, 3, &src, BlitOptions::new()).unwrap();
        dest.blit(-4, -4, &src, BlitOptions::new()).unwrap();
        dest.blit(0, 0, &src, BlitOptions::new().size(10, 10).offset(-3, 1)).unwrap();

        assert_eq!(dest.data().get(1, 1), Some(Cell::from_bits(8)));
    }

    #[test]
    fn test_huge_offsets_read_nothing() {
        let src = sprite();
        let mut dest = Canvas::headless(2, 2);
        dest.plot(0, 0).unwrap();

        dest.blit(0, 0, &src, BlitOptions::new().size(2, 2).offset(i32::MAX, 0)).unwrap();
        dest.blit(0, 0, &src, BlitOptions::new().size(2, 2).offset(0, i32::MAX)).unwrap();
        let merge = BlitOptions::new().mode(BlitMode::MERGE).size(2, 2);
        dest.blit_within(0, 0, merge.offset(0, i32::MAX)).unwrap();
        dest.blit_within(0, 0, merge.offset(i32::MIN, i32::MIN)).unwrap();

        assert_eq!(dest.data().get(0, 0), Some(Cell::from_bits(8)));
    }

    #[test]
    fn test_safe_mode_matches_direct_blit() {
        let mut src = Canvas::headless(5, 5);
        src.line(0.0, 0.0, 9.0, 7.0).unwrap();

        let options = BlitOptions::new().size(3, 2).offset(1, 1);
        let mut direct = Canvas::headless(6, 6);
        direct.blit(2, 2, &src, options).unwrap();

        let mut safe = Canvas::headless(6, 6);
        safe.blit(2, 2, &src, options.mode(BlitMode::SAFE)).unwrap();

        assert_eq!(direct.data(), safe.data());
    }

    #[test]
    fn test_blit_within_reads_original_cells() {
        let mut c = Canvas::headless(4, 1);
        c.plot(0, 0).unwrap();
        c.plot(3, 1).unwrap();

        // Shift the whole row one cell right onto itself.
        c.blit_within(2, 0, BlitOptions::new().size(3, 1)).unwrap();

        let bits: Vec<u8> = c.data().cells().iter().map(|c| c.bits()).collect();
        assert_eq!(bits, vec![8, 8, 1, 0]);
    }

    #[test]
    fn test_blit_renders_written_cells() {
        let src = sprite();
        let mut dest = Canvas::with_sink(2, 2, OutputBuffer::new(), true);
        dest.blit(0, 0, &src, BlitOptions::new()).unwrap();

        // Column-major walk: (0,0) (0,1) (1,0) (1,1)
        assert_eq!(
            dest.sink_mut().take(),
            "\x1b[0;0f▘\x1b[1;0f \x1b[0;1f \x1b[1;1f▗"
        );
    }

    #[test]
    fn test_defaults_are_not_shared_between_calls() {
        let small = sprite();
        let mut big = Canvas::headless(3, 3);
        big.plot(5, 5).unwrap();

        let mut dest = Canvas::headless(4, 4);
        dest.blit(0, 0, &small, BlitOptions::default()).unwrap();
        dest.blit(0, 0, &big, BlitOptions::default()).unwrap();

        assert_eq!(dest.data().get(2, 2), Some(Cell::from_bits(1)));
    }
}
