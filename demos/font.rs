//! Font Example - bitmap text in five sizes
//!
//! Reads `font_{size}.json` from `$QUADCANVAS_FONT_DIR` (default `./font`).
//! Sizes without a font file are skipped.
//!
//! Run with: QUADCANVAS_FONT_DIR=path/to/font cargo run --example font

use quadcanvas::{Canvas, TextAlign};
use tracing_subscriber::EnvFilter;

fn main() -> quadcanvas::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut canvas = Canvas::new();
    canvas.clear()?;
    canvas.clear_color()?;

    canvas.text(5, 2, "Font type 1", 1, TextAlign::Left)?;
    canvas.text(5, 8, "Font type 2", 2, TextAlign::Left)?;
    canvas.text(5, 19, "Font type 3", 3, TextAlign::Left)?;
    canvas.text(5, 30, "Font type 4", 4, TextAlign::Left)?;
    canvas.text(70, 2, "Font type 5", 5, TextAlign::Left)?;

    let center = canvas.width() / 2;
    canvas.text(center, 42, "centered", 5, TextAlign::Center)?;

    canvas.move_cursor(0, canvas.height())?;
    canvas.flush()
}
