//! Read-only view of a game, copied out once per frame for rendering.

use crate::board::CodeGrid;
use crate::game_state::Phase;
use crate::piece::Piece;
use crate::shapes::ShapeMatrix;
use crate::types::{BlockColor, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: BlockColor,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

/// The queued piece in spawn orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub color: BlockColor,
}

impl From<Piece> for NextSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells as cell codes (0 empty, 1..=7 palette index + 1)
    pub board: CodeGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: NextSnapshot,
    pub phase: Phase,
    pub episode_id: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub fall_timer_ms: u32,
}

impl GameSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Cell code at `(x, y)` with the active piece drawn over the locked cells
    pub fn visible_code(&self, x: usize, y: usize) -> u8 {
        if let Some(active) = self.active {
            let dx = x as i16 - active.x as i16;
            let dy = y as i16 - active.y as i16;
            if dx >= 0 && dy >= 0 && active.matrix.is_filled(dx as u8, dy as u8) {
                return active.color.cell_code();
            }
        }
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: NextSnapshot::from(Piece::new(PieceKind::I, BlockColor::Cyan)),
            phase: Phase::Spawning,
            episode_id: 0,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            fall_interval_ms: 0,
            fall_timer_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_code_overlays_active_piece() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = BlockColor::Red.cell_code();
        snap.active = Some(ActiveSnapshot::from(
            Piece::new(PieceKind::O, BlockColor::Yellow).shifted(0, 3),
        ));

        assert_eq!(snap.visible_code(4, 3), BlockColor::Yellow.cell_code());
        assert_eq!(snap.visible_code(5, 4), BlockColor::Yellow.cell_code());
        assert_eq!(snap.visible_code(6, 4), 0);
        assert_eq!(snap.visible_code(0, 19), BlockColor::Red.cell_code());
        assert_eq!(snap.visible_code(10, 0), 0);
    }
}
