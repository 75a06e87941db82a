//! Terminal renderer - the output layer.
//!
//! The renderer knows only about cells. It takes one packed cell at a time,
//! turns it into a quadrant glyph and writes the minimal escape sequences
//! needed to put it on screen.

pub mod ansi;
pub mod incremental;
pub mod output;

pub use incremental::{IncrementalRenderer, RenderState};
pub use output::OutputBuffer;
