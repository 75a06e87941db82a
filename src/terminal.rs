//! Terminal geometry.

use tracing::debug;

/// Columns assumed when the terminal cannot be queried.
pub const DEFAULT_COLS: u16 = 80;

/// Rows assumed when the terminal cannot be queried.
pub const DEFAULT_ROWS: u16 = 24;

/// Detect the terminal size as `(cols, rows)`.
///
/// Uses crossterm to query the terminal; falls back to 80x24 per axis when
/// the query fails or reports zero.
pub fn terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((cols, rows)) => (
            if cols > 0 { cols } else { DEFAULT_COLS },
            if rows > 0 { rows } else { DEFAULT_ROWS },
        ),
        Err(e) => {
            debug!(error = %e, "terminal size unavailable, using 80x24");
            (DEFAULT_COLS, DEFAULT_ROWS)
        }
    }
}

/// Fill in whichever dimensions were not given explicitly.
///
/// The terminal is only queried if at least one dimension is missing.
pub fn resolve_size(cols: Option<u16>, rows: Option<u16>) -> (u16, u16) {
    match (cols, rows) {
        (Some(cols), Some(rows)) => (cols, rows),
        _ => {
            let (detected_cols, detected_rows) = terminal_size();
            (cols.unwrap_or(detected_cols), rows.unwrap_or(detected_rows))
        }
    }
}
