//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, piece source, and scoring.
//! It handles gravity timing, piece movement, rotation, locking, line clears, and the game
//! lifecycle.
//!
//! # Phases
//!
//! ```text
//! Spawning ──start()──▶ Falling ──lock──▶ (merge, clear) ──▶ Spawning ──▶ Falling
//!                                                              │
//!                                                              └─ spawn collides ─▶ GameOver
//! GameOver ──reset()──▶ Spawning ──▶ Falling
//! ```
//!
//! Locking, clearing and respawning run inside a single call, so between calls the
//! engine is observed in `Spawning` (before `start()`), `Falling`, or `GameOver`.

use log::{debug, info};

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::{PieceGenerator, PieceSource, Randomizer};
use crate::scoring::{calculate_drop_score, Progression};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::{GameAction, LockEvent};

/// Engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No piece is in play yet (before the first spawn of a session)
    Spawning,
    /// The current piece is under player and gravity control
    Falling,
    /// A freshly spawned piece collided; only `reset()` leaves this phase
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = PieceGenerator> {
    board: Board,
    active: Option<Piece>,
    next: Piece,
    source: S,
    progression: Progression,
    /// Gravity accumulator, always below the fall interval between ticks
    fall_timer_ms: u32,
    phase: Phase,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<PieceGenerator> {
    /// Create a new game with the given RNG seed and independent uniform draws
    pub fn new(seed: u32) -> Self {
        Self::with_randomizer(seed, Randomizer::Uniform)
    }

    /// Create a new game with the given RNG seed and shape selection policy
    pub fn with_randomizer(seed: u32, mode: Randomizer) -> Self {
        Self::with_source(PieceGenerator::new(seed, mode))
    }

    /// Current RNG state of the session generator
    pub fn seed(&self) -> u32 {
        self.source.seed()
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a new game drawing pieces from `source`
    pub fn with_source(source: S) -> Self {
        Self::with_board(Board::new(), source)
    }

    /// Create a new game on a prepared board
    ///
    /// The next piece is queued immediately; the first spawn happens on [`GameState::start`].
    pub fn with_board(board: Board, mut source: S) -> Self {
        let next = draw_piece(&mut source);
        Self {
            board,
            active: None,
            next,
            source,
            progression: Progression::new(),
            fall_timer_ms: 0,
            phase: Phase::Spawning,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Spawning {
            return;
        }
        self.spawn_piece();
    }

    /// Discard the session and start a new one on an empty board
    pub fn reset(&mut self) {
        self.board.clear();
        self.progression = Progression::new();
        self.fall_timer_ms = 0;
        self.active = None;
        self.last_event = None;
        self.phase = Phase::Spawning;
        self.next = draw_piece(&mut self.source);
        self.episode_id = self.episode_id.wrapping_add(1);
        info!("reset: episode {}", self.episode_id);
        self.spawn_piece();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Spawning
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.progression.fall_interval_ms()
    }

    /// Gravity interval in seconds
    pub fn fall_interval_secs(&self) -> f64 {
        f64::from(self.fall_interval_ms()) / 1000.0
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    /// The piece in play. `None` only before the first spawn.
    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// The queued piece (spawn orientation)
    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Peek at the last lock event without consuming it
    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = NextSnapshot::from(self.next);
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
        out.fall_interval_ms = self.fall_interval_ms();
        out.fall_timer_ms = self.fall_timer_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Move the queued piece into play and queue a new one.
    ///
    /// Returns false (and enters `GameOver`) when the new piece collides at its spawn
    /// position. The board is never modified here.
    fn spawn_piece(&mut self) -> bool {
        self.phase = Phase::Spawning;

        let piece = self.next.at_spawn();
        self.next = draw_piece(&mut self.source);
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if piece.collides(&self.board) {
            self.phase = Phase::GameOver;
            info!(
                "game over: {} blocked at ({}, {}), score {}, level {}, lines {}",
                piece.kind.as_str(),
                piece.x,
                piece.y,
                self.score(),
                self.level(),
                self.lines()
            );
            return false;
        }

        self.phase = Phase::Falling;
        debug!(
            "spawn #{}: {} {:?} at ({}, {}), next {}",
            self.piece_id,
            piece.kind.as_str(),
            piece.color,
            piece.x,
            piece.y,
            self.next.kind.as_str()
        );
        true
    }

    /// Try to move the active piece by one cell.
    ///
    /// Only left `(-1, 0)`, right `(1, 0)` and down `(0, 1)` are accepted. A move down
    /// scores one soft drop point.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Falling || !matches!((dx, dy), (-1, 0) | (1, 0) | (0, 1)) {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.collides(&self.board) {
            return false;
        }

        self.active = Some(moved);
        if dy > 0 {
            self.progression
                .add_points(calculate_drop_score(dy as u32, false));
        }
        true
    }

    /// Move the active piece one row down, scoring a soft drop point
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Try to rotate the active piece 90° clockwise in place.
    ///
    /// There are no wall kicks: if the rotated matrix collides at the current position
    /// the piece keeps its old matrix.
    pub fn try_rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated();
        if rotated.collides(&self.board) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// Drop the active piece as far as it goes and lock it immediately
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        let mut rows: u32 = 0;
        while !piece.is_grounded(&self.board) {
            piece = piece.shifted(0, 1);
            rows += 1;
        }

        self.active = Some(piece);
        self.lock_piece(rows);
        true
    }

    /// Whether the active piece cannot move one row down
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(ref piece) => piece.is_grounded(&self.board),
            None => false,
        }
    }

    /// Lock the active piece onto the board, clear lines, and spawn the next piece.
    ///
    /// `rows_dropped` is the hard drop distance that led here (0 for gravity locks).
    fn lock_piece(&mut self, rows_dropped: u32) -> LockEvent {
        let Some(piece) = self.active.take() else {
            return LockEvent::default();
        };

        self.board.merge(&piece.matrix, piece.x, piece.y, piece.color);

        let cleared_rows = self.board.clear_lines();
        let clear = self.progression.apply_clear(cleared_rows.len() as u32);

        let drop_score = calculate_drop_score(rows_dropped, true);
        self.progression.add_points(drop_score);

        debug!(
            "lock: {} at ({}, {}) dropped {} rows, cleared {:?}",
            piece.kind.as_str(),
            piece.x,
            piece.y,
            rows_dropped,
            cleared_rows.as_slice()
        );
        if clear.leveled_up {
            info!(
                "level up: level {}, lines {}, fall interval {}ms",
                self.level(),
                self.lines(),
                self.fall_interval_ms()
            );
        }

        let spawned = self.spawn_piece();

        let event = LockEvent {
            rows_dropped,
            drop_score,
            lines_cleared: clear.lines,
            line_clear_score: clear.points,
            leveled_up: clear.leveled_up,
            game_over: !spawned,
        };
        self.last_event = Some(event);
        event
    }

    /// Main game tick - accumulate time and apply gravity
    ///
    /// Once the accumulated time reaches the fall interval the timer restarts from zero
    /// and the piece either locks (when it cannot move down) or falls one row.
    /// Returns true when a gravity step happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms() {
            return false;
        }
        self.fall_timer_ms = 0;

        let Some(active) = self.active else {
            return false;
        };

        if active.is_grounded(&self.board) {
            self.lock_piece(0);
        } else {
            self.active = Some(active.shifted(0, 1));
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

fn draw_piece<S: PieceSource>(source: &mut S) -> Piece {
    let (kind, color) = source.draw();
    Piece::new(kind, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::types::{BlockColor, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

    fn scripted(kinds: &[PieceKind]) -> GameState<ScriptedSource> {
        let mut state = GameState::with_source(ScriptedSource::kinds(kinds.iter().copied()));
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started());
        assert_eq!(state.phase, Phase::Spawning);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.fall_interval_ms(), 1000);
        assert_eq!(state.episode_id, 0);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        let queued = state.next;

        state.start();
        assert!(state.started());
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(state.active.unwrap().kind, queued.kind);
        assert_eq!(state.active.unwrap().color, queued.color);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut state = GameState::new(12345);
        state.start();
        let active = state.active;
        state.start();
        assert_eq!(state.active, active);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_actions_before_start_are_rejected() {
        let mut state = GameState::new(12345);
        assert!(!state.try_move(1, 0));
        assert!(!state.try_rotate());
        assert!(!state.hard_drop());
        assert!(!state.tick(5000));
        assert!(state.active.is_none());
    }

    #[test]
    fn test_spawn_uses_queued_piece() {
        let mut state = scripted(&[PieceKind::T, PieceKind::I, PieceKind::O]);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.next.kind, PieceKind::I);

        state.hard_drop();
        assert_eq!(state.active.unwrap().kind, PieceKind::I);
        assert_eq!(state.next.kind, PieceKind::O);
        assert_eq!(state.piece_id, 2);
    }

    #[test]
    fn test_try_move() {
        let mut state = scripted(&[PieceKind::T]);
        let initial_x = state.active.unwrap().x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x, initial_x + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x, initial_x);

        // Only unit moves left, right and down exist
        assert!(!state.try_move(0, -1));
        assert!(!state.try_move(2, 0));
        assert!(!state.try_move(0, 0));
    }

    #[test]
    fn test_try_move_wall() {
        let mut state = scripted(&[PieceKind::I]);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        // I spawns at x=3
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_soft_drop_scores_per_row() {
        let mut state = scripted(&[PieceKind::O]);
        assert!(state.soft_drop());
        assert!(state.soft_drop());
        assert_eq!(state.score(), 2);
        assert_eq!(state.active.unwrap().y, 2);
    }

    #[test]
    fn test_soft_drop_on_floor_does_not_lock() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        while state.soft_drop() {}
        assert_eq!(state.active.unwrap().y, 18);
        assert_eq!(state.active.unwrap().kind, PieceKind::O);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.score(), 18);
    }

    #[test]
    fn test_try_rotate() {
        let mut state = scripted(&[PieceKind::T]);
        let before = state.active.unwrap();

        assert!(state.try_rotate());
        let after = state.active.unwrap();
        assert_eq!(after.matrix, before.matrix.rotated_cw());
        assert_eq!((after.x, after.y), (before.x, before.y));
    }

    #[test]
    fn test_rotation_rejected_against_wall() {
        let mut state = scripted(&[PieceKind::I]);
        // Vertical I at the right wall; rotating back to horizontal would overflow
        assert!(state.try_rotate());
        while state.try_move(1, 0) {}
        let before = state.active.unwrap();
        assert_eq!(before.x, 9);

        assert!(!state.try_rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_hard_drop_scores_two_per_row() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        assert!(state.hard_drop());

        // O is two rows tall: from y=0 it lands at y=18
        assert_eq!(state.score(), 36);
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.rows_dropped, 18);
        assert_eq!(ev.drop_score, 36);
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over);
        assert!(state.take_last_event().is_none());

        assert_eq!(state.board.cell_code(4, 19), BlockColor::Cyan.cell_code());
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_tick_accumulates_before_falling() {
        let mut state = scripted(&[PieceKind::O]);

        assert!(!state.tick(600));
        assert_eq!(state.active.unwrap().y, 0);
        assert_eq!(state.fall_timer_ms, 600);

        assert!(state.tick(400));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_tick_discards_overflow() {
        let mut state = scripted(&[PieceKind::O]);
        assert!(state.tick(2500));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_gravity_locks_on_the_tick_piece_is_found_grounded() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        while state.try_move(0, 1) {}
        let score = state.score();

        // Grounded now: the next gravity step locks instead of moving
        assert!(state.tick(1000));
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.score(), score);

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.rows_dropped, 0);
        assert_eq!(ev.score_delta(), 0);
    }

    #[test]
    fn test_gravity_never_scores() {
        let mut state = scripted(&[PieceKind::O]);
        for _ in 0..5 {
            state.tick(1000);
        }
        assert_eq!(state.active.unwrap().y, 5);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_line_clear_scoring_and_event() {
        let mut board = Board::new();
        for x in 0..8 {
            board.set(x, 19, Some(BlockColor::Red));
            board.set(x, 18, Some(BlockColor::Red));
        }
        let mut state = GameState::with_board(
            board,
            ScriptedSource::kinds([PieceKind::O, PieceKind::T]),
        );
        state.start();

        // O spawns at x=4; the gap is columns 8..=9
        assert!(state.try_move(1, 0));
        assert!(state.try_move(1, 0));
        assert!(state.try_move(1, 0));
        assert!(state.try_move(1, 0));
        assert!(state.hard_drop());

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 2);
        assert_eq!(ev.line_clear_score, 300);
        assert_eq!(ev.drop_score, 36);
        assert_eq!(state.score(), 336);
        assert_eq!(state.lines(), 2);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut board = Board::new();
        for y in 0..2 {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y, Some(BlockColor::Blue));
            }
        }
        let before = board.clone();

        let mut state = GameState::with_board(board, ScriptedSource::kinds([PieceKind::T]));
        state.start();

        assert!(state.is_game_over());
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.board, before);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 0, Some(BlockColor::Blue));
        }
        let mut state = GameState::with_board(board, ScriptedSource::kinds([PieceKind::O]));
        state.start();
        assert!(state.is_game_over());

        let active = state.active;
        let snapshot = state.snapshot();
        assert!(!state.try_move(1, 0));
        assert!(!state.try_move(0, 1));
        assert!(!state.try_rotate());
        assert!(!state.hard_drop());
        assert!(!state.tick(10_000));
        assert_eq!(state.active, active);
        assert_eq!(state.snapshot(), snapshot);
    }

    #[test]
    fn test_lock_into_blocked_spawn_ends_game() {
        let mut board = Board::new();
        // Column stack that leaves only the top two rows free around the spawn area
        for y in 2..BOARD_HEIGHT as i8 {
            board.set(4, y, Some(BlockColor::Green));
        }
        let mut state = GameState::with_board(
            board,
            ScriptedSource::kinds([PieceKind::O, PieceKind::O]),
        );
        state.start();
        assert!(!state.is_game_over());

        assert!(state.hard_drop());
        let ev = state.take_last_event().unwrap();
        assert!(ev.game_over);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 0, Some(BlockColor::Blue));
        }
        let mut state = GameState::with_board(board, ScriptedSource::kinds([PieceKind::O]));
        state.start();
        assert!(state.is_game_over());

        state.reset();
        assert_eq!(state.phase, Phase::Falling);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.fall_interval_ms(), 1000);
        assert_eq!(state.fall_timer_ms, 0);
        assert_eq!(state.episode_id, 1);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = scripted(&[PieceKind::T, PieceKind::T]);
        let x = state.active.unwrap().x;

        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active.unwrap().x, x + 1);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active.unwrap().x, x);
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.score(), 1);
        assert!(state.apply_action(GameAction::Rotate));
        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.board.filled_count(), 4);
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.score(), 0);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_fall_interval_secs() {
        let state = GameState::new(1);
        assert_eq!(state.fall_interval_secs(), 1.0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = scripted(&[PieceKind::L, PieceKind::S]);
        state.soft_drop();
        let snap = state.snapshot();

        assert_eq!(snap.phase, Phase::Falling);
        assert_eq!(snap.score, 1);
        assert_eq!(snap.level, 1);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::L);
        assert_eq!(active.y, 1);
        assert_eq!(snap.next.kind, PieceKind::S);
        assert_eq!(snap.board, state.board.to_codes());
    }
}
