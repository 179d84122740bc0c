//! Piece module - a shape instance with rotation state, color and position

use crate::board::Board;
use crate::collision::is_collision;
use crate::shapes::{get_shape, FilledCells, ShapeMatrix};
use crate::types::{BlockColor, PieceKind, BOARD_WIDTH};

/// A falling or queued piece
///
/// `(x, y)` is the board position of the matrix's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: BlockColor,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation at its spawn position
    pub fn new(kind: PieceKind, color: BlockColor) -> Self {
        let matrix = *get_shape(kind);
        let (x, y) = spawn_position(&matrix);
        Self {
            kind,
            matrix,
            color,
            x,
            y,
        }
    }

    /// Same piece moved back to the spawn position for its current matrix
    pub fn at_spawn(self) -> Self {
        let (x, y) = spawn_position(&self.matrix);
        Self { x, y, ..self }
    }

    /// Same piece offset by `(dx, dy)`
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Same piece with its matrix rotated 90° clockwise around the unchanged origin
    pub fn rotated(self) -> Self {
        Self {
            matrix: self.matrix.rotated_cw(),
            ..self
        }
    }

    /// Whether the piece overlaps a wall, the floor, or a locked cell
    pub fn collides(&self, board: &Board) -> bool {
        is_collision(self.x, self.y, &self.matrix, board)
    }

    /// Whether the piece could not move one row down
    pub fn is_grounded(&self, board: &Board) -> bool {
        is_collision(self.x, self.y + 1, &self.matrix, board)
    }

    /// Board coordinates of the filled cells
    pub fn cells(&self) -> FilledCells {
        self.matrix
            .filled_cells()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}

/// Horizontally centered spawn position on the top row
pub fn spawn_position(matrix: &ShapeMatrix) -> (i8, i8) {
    let x = (BOARD_WIDTH / 2) as i8 - (matrix.cols() / 2) as i8;
    (x, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_positions() {
        assert_eq!(Piece::new(PieceKind::I, BlockColor::Cyan).x, 3);
        assert_eq!(Piece::new(PieceKind::O, BlockColor::Cyan).x, 4);
        assert_eq!(Piece::new(PieceKind::T, BlockColor::Cyan).x, 4);
        assert_eq!(Piece::new(PieceKind::L, BlockColor::Cyan).y, 0);
    }

    #[test]
    fn test_rotated_keeps_origin_and_color() {
        let piece = Piece::new(PieceKind::J, BlockColor::Green).shifted(1, 5);
        let rotated = piece.rotated();

        assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
        assert_eq!(rotated.color, BlockColor::Green);
        assert_eq!(rotated.matrix.rows(), piece.matrix.cols());
        assert_eq!(rotated.matrix.cols(), piece.matrix.rows());
    }

    #[test]
    fn test_four_rotations_restore_matrix() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind, BlockColor::Red);
            let back = piece.rotated().rotated().rotated().rotated();
            assert_eq!(back.matrix, piece.matrix, "{:?}", kind);
        }
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = Piece::new(PieceKind::O, BlockColor::Yellow);
        assert_eq!(o.rotated().matrix, o.matrix);
    }

    #[test]
    fn test_cells_are_board_coordinates() {
        let o = Piece::new(PieceKind::O, BlockColor::Yellow).shifted(0, 3);
        assert_eq!(o.cells().as_slice(), &[(4, 3), (5, 3), (4, 4), (5, 4)]);
    }

    #[test]
    fn test_grounded_on_floor() {
        let board = Board::new();
        let o = Piece::new(PieceKind::O, BlockColor::Yellow);
        assert!(!o.is_grounded(&board));
        assert!(o.shifted(0, 18).is_grounded(&board));
    }

    #[test]
    fn test_at_spawn_recenters_rotated_matrix() {
        let vertical_i = Piece::new(PieceKind::I, BlockColor::Cyan).rotated().shifted(4, 7);
        let respawned = vertical_i.at_spawn();
        assert_eq!((respawned.x, respawned.y), (5, 0));
    }
}
