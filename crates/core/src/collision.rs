//! Collision checks for a matrix placed on the board.
//!
//! A placement collides when any filled cell lands left of column 0, right of the
//! last column, below the last row, or on an occupied cell. Cells above row 0 are
//! allowed (only their column is checked).

use crate::board::Board;
use crate::shapes::ShapeMatrix;

/// Test a matrix placed with its top-left corner at `(origin_x, origin_y)`.
pub fn is_collision(origin_x: i8, origin_y: i8, matrix: &ShapeMatrix, board: &Board) -> bool {
    let width = board.width() as i8;
    let height = board.height() as i8;

    matrix.filled_cells().iter().any(|&(px, py)| {
        let x = origin_x + px;
        let y = origin_y + py;
        x < 0 || x >= width || y >= height || (y >= 0 && board.is_occupied(x, y))
    })
}
