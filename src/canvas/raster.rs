//! Line and circle rasterization.
//!
//! Both walk the shape in floating point and plot each sample truncated to
//! integer pixel coordinates.

use std::f64::consts::TAU;
use std::io::Write;

use super::Canvas;
use crate::error::Result;

impl<W: Write> Canvas<W> {
    /// Draw a line from `(x1, y1)` towards `(x2, y2)`.
    ///
    /// Takes `ceil(length)` unit-length steps starting at the first endpoint.
    /// The last sample lands one step short of the second endpoint, which is
    /// therefore not always plotted. Zero-length lines draw nothing.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        let xd = x2 - x1;
        let yd = y2 - y1;
        let d = (xd * xd + yd * yd).sqrt().ceil();
        if d == 0.0 || !d.is_finite() {
            return Ok(());
        }

        let xstep = xd / d;
        let ystep = yd / d;
        let mut cx = x1;
        let mut cy = y1;
        for _ in 0..d as u64 {
            self.plot(cx as i32, cy as i32)?;
            cx += xstep;
            cy += ystep;
        }
        Ok(())
    }

    /// Draw a circle outline centred on `(x, y)`.
    ///
    /// `aspect` stretches the horizontal radius; terminal cells are roughly
    /// twice as tall as they are wide, so 2.0 gives a visually round circle.
    /// The angular step is `1 / (r * aspect)`, which keeps neighbouring
    /// samples about one pixel apart.
    pub fn circle(&mut self, x: f64, y: f64, r: f64, aspect: f64) -> Result<()> {
        let step = 1.0 / (r * aspect);
        if !step.is_finite() || step <= 0.0 {
            return Ok(());
        }

        let mut i = 0.0_f64;
        while i < TAU {
            let px = x + i.sin() * r * aspect;
            let py = y + i.cos() * r;
            self.plot(px as i32, py as i32)?;
            i += step;
        }
        Ok(())
    }
}
