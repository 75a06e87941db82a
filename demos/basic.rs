//! Basic Example - lines and a circle
//!
//! Draws a three-colored triangle and a stretched circle, then parks the
//! cursor at the bottom of the screen.
//!
//! Run with: cargo run --example basic

use quadcanvas::{Canvas, Color};
use tracing_subscriber::EnvFilter;

fn main() -> quadcanvas::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut canvas = Canvas::new();
    let h = canvas.height();

    canvas.clear()?;
    canvas.clear_color()?;

    canvas.set_color(Color::Red)?;
    canvas.line(40.0, 10.0, 10.0, 30.0)?;
    canvas.set_color(Color::Green)?;
    canvas.line(10.0, 30.0, 50.0, 40.0)?;
    canvas.set_color(Color::Blue)?;
    canvas.line(50.0, 40.0, 40.0, 10.0)?;

    canvas.set_color(Color::Cyan)?;
    canvas.circle(80.0, 20.0, 15.0, 2.0)?;

    canvas.clear_color()?;
    canvas.move_cursor(0, h - 1)?;
    canvas.flush()
}
