//! Cube Example - rotating wireframe
//!
//! Projects a unit cube and redraws its twelve edges every frame.
//!
//! Run with: cargo run --example cube -- [frames]

use std::thread;
use std::time::Duration;

use quadcanvas::Canvas;
use tracing_subscriber::EnvFilter;

const NODES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

fn rotate(node: [f64; 3], angle_x: f64, angle_y: f64) -> [f64; 3] {
    let (sin_x, cos_x) = angle_x.sin_cos();
    let (sin_y, cos_y) = angle_y.sin_cos();
    let [x, y, z] = node;
    let z2 = z * cos_x + x * sin_x;
    [
        x * cos_x - z * sin_y,
        y * cos_y - z2 * sin_y,
        z2 * cos_y + y * sin_y,
    ]
}

/// Perspective projection onto the screen plane.
fn project(node: [f64; 3], scale: f64, distance: f64) -> (f64, f64) {
    let depth = node[2] + distance;
    (node[0] * scale / depth, node[1] * scale / depth)
}

fn main() -> quadcanvas::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(200);

    let mut canvas = Canvas::new();
    canvas.clear_color()?;

    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    let mut n = 0.0_f64;
    for _ in 0..frames {
        canvas.clear()?;

        let projected: Vec<(f64, f64)> = NODES
            .iter()
            .map(|&node| project(rotate(node, n, n), 100.0, 7.0))
            .collect();

        for &(a, b) in &EDGES {
            let (x1, y1) = projected[a];
            let (x2, y2) = projected[b];
            canvas.line(x1 * 1.5 + w / 2.0, y1 + h / 2.0, x2 * 1.5 + w / 2.0, y2 + h / 2.0)?;
        }

        n += 0.1;
        canvas.move_cursor(0, 0)?;
        canvas.flush()?;
        thread::sleep(Duration::from_millis(50));
    }

    canvas.move_cursor(0, canvas.height() - 1)?;
    canvas.flush()
}
