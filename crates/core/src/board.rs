//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or hold the color of a locked block.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::shapes::ShapeMatrix;
use crate::types::{BlockColor, Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Board contents as numeric cell codes, `[row][col]` (0 = empty, 1..=7 = color index + 1)
pub type CodeGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Row indices removed by one clear pass, in the order they were found (top to bottom)
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from numeric cell codes.
    ///
    /// Returns `None` if any code is outside `0..=7`.
    pub fn from_codes(grid: &CodeGrid) -> Option<Self> {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let cell = match code {
                    0 => None,
                    c => Some(BlockColor::from_cell_code(c)?),
                };
                board.cells[y * BOARD_WIDTH as usize + x] = cell;
            }
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Numeric code of the cell at (x, y): 0 when empty or out of bounds
    pub fn cell_code(&self, x: i8, y: i8) -> u8 {
        match self.get(x, y) {
            Some(Some(color)) => color.cell_code(),
            _ => 0,
        }
    }

    /// Cells of row `y` (empty slice if out of range)
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= BOARD_HEIGHT as usize {
            return &[];
        }
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Clear a row and shift all rows above down
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }

        let width = BOARD_WIDTH as usize;

        // Row r takes row r-1, from the cleared row up to row 1
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }

        1
    }

    /// Remove every full row in a single top-to-bottom pass.
    ///
    /// Each full row is removed as soon as it is found (rows above shift down one,
    /// row 0 becomes empty) and the scan continues on the shifted grid.
    /// Returns the removed row indices in scan order; a board without full rows is
    /// left untouched.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared.push(y as u8);
            }
        }
        cleared
    }

    /// Write a piece's filled cells into the board with the given color.
    ///
    /// Callers only merge from positions the collision check has already accepted,
    /// so every target cell is in bounds and empty.
    pub fn merge(&mut self, matrix: &ShapeMatrix, x: i8, y: i8, color: BlockColor) {
        for (dx, dy) in matrix.filled_cells() {
            let px = x + dx;
            let py = y + dy;
            debug_assert!(
                Self::index(px, py).is_some() && !self.is_occupied(px, py),
                "merge target ({}, {}) must be an empty in-bounds cell",
                px,
                py
            );
            self.set(px, py, Some(color));
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a `[row][col]` grid of numeric cell codes
    pub fn write_u8_grid(&self, out: &mut CodeGrid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * width + x].map_or(0, BlockColor::cell_code);
            }
        }
    }

    /// Numeric cell codes as a fresh grid
    pub fn to_codes(&self) -> CodeGrid {
        let mut out = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_u8_grid(&mut out);
        out
    }

    /// Count of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
