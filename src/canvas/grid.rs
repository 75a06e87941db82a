//! Cell storage.
//!
//! Flat `Vec<Cell>` with row-major indexing: `index = row * cols + col`.
//! Lookups take signed coordinates so callers can hand over unclipped
//! positions and get `None` back instead of wrapping around.

use crate::types::Cell;

/// A 2D grid of packed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Create a grid filled with empty cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::EMPTY; cols as usize * rows as usize],
        }
    }

    /// Width in cells.
    #[inline]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Height in cells.
    #[inline]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[inline]
    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    /// Narrow signed coordinates to in-bounds cell coordinates.
    #[inline]
    pub fn clip(&self, col: i32, row: i32) -> Option<(u16, u16)> {
        if col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32 {
            Some((col as u16, row as u16))
        } else {
            None
        }
    }

    /// Get a cell (returns None if out of bounds).
    #[inline]
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.clip(col, row).map(|(c, r)| self.cells[self.index(c, r)])
    }

    /// Overwrite a cell. Returns false if out of bounds.
    #[inline]
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match self.clip(col, row) {
            Some((c, r)) => {
                let idx = self.index(c, r);
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Get raw cells slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let col = (i % self.cols as usize) as u16;
            let row = (i / self.cols as usize) as u16;
            (col, row, *cell)
        })
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }
}
