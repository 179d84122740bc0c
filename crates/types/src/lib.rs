//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, key mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centered on row 0, depending on the piece width
//!
//! # Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `INITIAL_FALL_INTERVAL_MS` | 1000 | Gravity at level 1 |
//! | `FALL_INTERVAL_STEP_MS` | 100 | Gravity speed-up per level |
//! | `MIN_FALL_INTERVAL_MS` | 100 | Fastest gravity |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BlockColor, PieceKind, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_index(2).unwrap();
//! assert_eq!(piece, PieceKind::O);
//!
//! // Board cells store the color index offset by one (0 means empty)
//! assert_eq!(BlockColor::Cyan.cell_code(), 1);
//! assert_eq!(BlockColor::from_cell_code(7), Some(BlockColor::Red));
//!
//! assert_eq!(GameAction::HardDrop.as_str(), "hardDrop");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (one row per second)
pub const INITIAL_FALL_INTERVAL_MS: u32 = 1000;

/// Amount the gravity interval shrinks on each level-up
pub const FALL_INTERVAL_STEP_MS: u32 = 100;

/// Gravity interval floor
pub const MIN_FALL_INTERVAL_MS: u32 = 100;

/// Starting level of a fresh session
pub const INITIAL_LEVEL: u32 = 1;

/// A level-up happens once cumulative lines reach `level * LINES_PER_LEVEL`
pub const LINES_PER_LEVEL: u32 = 5;

/// Points per row of soft drop
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Points per row of hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table
///
/// Base points for clearing N lines in one lock, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Number of distinct piece shapes in the catalog
pub const SHAPE_COUNT: usize = 7;

/// Number of distinct block colors in the palette
pub const COLOR_COUNT: usize = 7;

/// The seven piece kinds, in catalog order
///
/// - **I**: straight bar
/// - **T**: three-wide with a center stem below
/// - **O**: 2x2 square
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    O,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; SHAPE_COUNT] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in the catalog (0..7)
    pub fn index(self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Inverse of [`PieceKind::index`]
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Single uppercase letter, used for labels and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Block color palette
///
/// A piece's color is drawn independently of its shape. Locked board cells
/// remember the color, not the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl BlockColor {
    /// All colors, in palette order
    pub const ALL: [BlockColor; COLOR_COUNT] = [
        BlockColor::Cyan,
        BlockColor::Blue,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Purple,
        BlockColor::Red,
    ];

    /// Palette index (0..7)
    pub fn index(self) -> u8 {
        match self {
            BlockColor::Cyan => 0,
            BlockColor::Blue => 1,
            BlockColor::Orange => 2,
            BlockColor::Yellow => 3,
            BlockColor::Green => 4,
            BlockColor::Purple => 5,
            BlockColor::Red => 6,
        }
    }

    /// Inverse of [`BlockColor::index`]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Numeric board code for a locked cell of this color (1..=7, 0 is empty)
    pub fn cell_code(self) -> u8 {
        self.index() + 1
    }

    /// Inverse of [`BlockColor::cell_code`]. Returns `None` for empty (0) and invalid codes.
    pub fn from_cell_code(code: u8) -> Option<Self> {
        code.checked_sub(1).and_then(Self::from_index)
    }
}

/// Game actions that the presentation layer can apply
///
/// Each action maps to one call on the engine's control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Convert to camelCase string for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(BlockColor)`: Cell locked with the given color
pub type Cell = Option<BlockColor>;

/// Outcome of a single lock (merge + line clear + respawn).
///
/// Emitted by the engine and consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Rows the piece travelled during the hard drop that locked it (0 for gravity locks)
    pub rows_dropped: u32,
    /// Points awarded for the hard drop distance
    pub drop_score: u32,
    /// Rows removed by the clear pass
    pub lines_cleared: u32,
    /// Points awarded for the cleared rows
    pub line_clear_score: u32,
    /// Whether this lock raised the level
    pub leveled_up: bool,
    /// Whether the spawn that followed the lock ended the game
    pub game_over: bool,
}

impl LockEvent {
    /// Total score gained from this lock
    pub fn score_delta(&self) -> u32 {
        self.drop_score.saturating_add(self.line_clear_score)
    }
}
