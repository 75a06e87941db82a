//! Bitmap text.
//!
//! Glyphs are laid out left to right with a fixed two-pixel gap. Centered
//! text needs the total width before anything can be plotted, so layout
//! collects every point first and plots in a second pass.

use std::io::Write;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::types::TextAlign;

/// Horizontal gap between consecutive glyphs, in pixels.
pub const GLYPH_SPACING: i32 = 2;

impl<W: Write> Canvas<W> {
    /// Draw `text` in font `size` at pixel `(x, y)` and return its width.
    ///
    /// Characters missing from the font are skipped and do not advance.
    /// The returned width excludes the trailing gap, so an empty (or
    /// entirely missing) string reports `-2`.
    pub fn text(&mut self, x: i32, y: i32, text: &str, size: u8, align: TextAlign) -> Result<i32> {
        let font = self.fonts().glyph_set(size)?;

        let origin = match align {
            TextAlign::Left => x,
            TextAlign::Center => 0,
        };

        let mut width = 0;
        let mut points = Vec::new();
        for ch in text.chars() {
            let Some(glyph) = font.get(ch) else {
                continue;
            };
            for &(dx, dy) in &glyph.offsets {
                points.push((width + dx as i32 + origin, y + dy as i32));
            }
            width += glyph.width + GLYPH_SPACING;
        }

        match align {
            TextAlign::Left => {
                for (px, py) in points {
                    self.plot(px, py)?;
                }
            }
            TextAlign::Center => {
                let shift = x as f64 - width as f64 / 2.0;
                for (px, py) in points {
                    self.plot((px as f64 + shift).floor() as i32, py)?;
                }
            }
        }

        Ok(width - GLYPH_SPACING)
    }
}
