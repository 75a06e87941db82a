//! Error types.
//!
//! Only resource and I/O problems surface as errors. Out-of-range coordinates
//! and degenerate geometry are silently ignored by the drawing operations.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while drawing.
#[derive(Debug, Error)]
pub enum Error {
    /// The output sink failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A color name that is not part of the palette.
    #[error("unknown palette color: {0:?}")]
    UnknownColor(String),

    /// A font file exists but could not be read.
    #[error("failed to read font size {size}: {source}")]
    FontLoad {
        size: u8,
        #[source]
        source: io::Error,
    },

    /// A font file is not valid JSON or does not match the glyph layout.
    #[error("failed to parse font size {size}: {source}")]
    FontParse {
        size: u8,
        #[source]
        source: serde_json::Error,
    },
}
