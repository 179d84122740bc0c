//! Shapes module - the piece catalog as binary occupancy matrices
//!
//! Every piece is described by a small 0/1 matrix (at most 4x4). Matrix
//! coordinates are `(x, y)` = `(column, row)` with the origin at the top-left.
//! Catalog matrices are immutable templates: rotation always returns a new
//! matrix value.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, SHAPE_COUNT};

/// Largest matrix side length in the catalog
pub const MAX_DIM: usize = 4;

/// Filled-cell offsets `(x, y)` relative to the matrix origin
pub type FilledCells = ArrayVec<(i8, i8), { MAX_DIM * MAX_DIM }>;

/// A 0/1 occupancy matrix of at most `MAX_DIM` x `MAX_DIM` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    /// Row-major occupancy; entries outside `rows x cols` are always 0
    cells: [[u8; MAX_DIM]; MAX_DIM],
}

impl ShapeMatrix {
    const fn new(rows: u8, cols: u8, cells: [[u8; MAX_DIM]; MAX_DIM]) -> Self {
        Self { rows, cols, cells }
    }

    /// Build a matrix from rows of 0/1 values.
    ///
    /// Returns `None` for empty, ragged or oversized input, or values other than 0 and 1.
    pub fn from_grid(grid: &[&[u8]]) -> Option<Self> {
        let rows = grid.len();
        let cols = grid.first().map(|r| r.len())?;
        if rows == 0 || rows > MAX_DIM || cols == 0 || cols > MAX_DIM {
            return None;
        }

        let mut cells = [[0u8; MAX_DIM]; MAX_DIM];
        for (y, row) in grid.iter().enumerate() {
            if row.len() != cols {
                return None;
            }
            for (x, &v) in row.iter().enumerate() {
                if v > 1 {
                    return None;
                }
                cells[y][x] = v;
            }
        }

        Some(Self::new(rows as u8, cols as u8, cells))
    }

    /// Number of matrix rows
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of matrix columns
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at column `x`, row `y` is filled (false outside the matrix)
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.cols && y < self.rows && self.cells[y as usize][x as usize] != 0
    }

    /// Offsets of all filled cells, scanned row by row
    pub fn filled_cells(&self) -> FilledCells {
        let mut out = FilledCells::new();
        for y in 0..self.rows {
            for x in 0..self.cols {
                if self.is_filled(x, y) {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.filled_cells().len()
    }

    /// The matrix rotated 90° clockwise (dimensions transposed)
    ///
    /// Cell `(x, y)` of the source lands on column `rows - 1 - y`, row `x`.
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[0u8; MAX_DIM]; MAX_DIM];
        let rows = self.rows as usize;
        for y in 0..rows {
            for x in 0..self.cols as usize {
                cells[x][rows - 1 - y] = self.cells[y][x];
            }
        }
        Self::new(self.cols, self.rows, cells)
    }
}

/// The catalog, indexed by [`PieceKind::index`]
static CATALOG: [ShapeMatrix; SHAPE_COUNT] = [
    // I
    ShapeMatrix::new(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
    // T
    ShapeMatrix::new(2, 3, [[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]]),
    // O
    ShapeMatrix::new(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    // S
    ShapeMatrix::new(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    // Z
    ShapeMatrix::new(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    // J
    ShapeMatrix::new(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    // L
    ShapeMatrix::new(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
];

/// Number of shapes in the catalog
pub fn shape_count() -> usize {
    CATALOG.len()
}

/// Spawn-orientation matrix for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static ShapeMatrix {
    &CATALOG[kind.index() as usize]
}
