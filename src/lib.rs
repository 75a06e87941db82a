//! # quadcanvas
//!
//! Vector drawing in a text terminal.
//!
//! Every terminal cell is treated as a 2x2 block of pixels and drawn with
//! one of the sixteen Unicode quadrant-block characters, so an 80x24
//! terminal becomes a 160x48 pixel canvas. Each cell also carries one of
//! nine palette colors.
//!
//! ## Architecture
//!
//! ```text
//! line / circle / text / blit
//!            │
//!            ▼
//!   Canvas (CellGrid of packed cells)
//!            │  every changed cell
//!            ▼
//!   IncrementalRenderer ──► sink (stdout, OutputBuffer, ...)
//! ```
//!
//! Drawing is synchronous and unbuffered: each operation writes its escape
//! sequences before returning. A canvas built with output disabled only
//! updates its cells, which makes it usable as an off-screen sprite for
//! [`Canvas::blit`].
//!
//! ## Modules
//!
//! - [`types`] - Packed [`Cell`], palette [`Color`], [`BlitMode`], [`TextAlign`]
//! - [`codec`] - Pixel to quadrant bit, quadrant pattern to glyph
//! - [`canvas`] - [`Canvas`], plotting, rasterizers, compositing
//! - [`renderer`] - ANSI sequences and the incremental cell renderer
//! - [`font`] - Bitmap glyph tables and the per-size [`FontCache`]
//! - [`terminal`] - Terminal size detection
//!
//! ```
//! use quadcanvas::{Canvas, Color, OutputBuffer};
//!
//! let mut canvas = Canvas::with_sink(10, 5, OutputBuffer::new(), true);
//! canvas.set_color(Color::Red)?;
//! canvas.line(0.0, 0.0, 19.0, 9.0)?;
//! canvas.circle(10.0, 5.0, 4.0, 2.0)?;
//! assert!(!canvas.sink().is_empty());
//! # Ok::<(), quadcanvas::Error>(())
//! ```

pub mod canvas;
pub mod codec;
pub mod error;
pub mod font;
pub mod renderer;
pub mod terminal;
pub mod text;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use canvas::{BlitOptions, Canvas, CanvasBuilder, CellGrid};
pub use codec::{glyph_for, quadrant_bit};
pub use error::{Error, Result};
pub use font::{FontCache, FontDir, FontSource, Glyph, GlyphTable};
pub use renderer::{IncrementalRenderer, OutputBuffer, RenderState};
pub use terminal::terminal_size;
