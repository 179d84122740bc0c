//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or terminal I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any environment (terminal, headless, benchmarks)
//!
//! # Module Structure
//!
//! - [`shapes`]: The seven shape matrices and clockwise rotation
//! - [`board`]: 10x20 grid of locked cells with merging and line clearing
//! - [`collision`]: Placement test against walls, floor and locked cells
//! - [`piece`]: A shape instance with color and position
//! - [`rng`]: Seedable piece sources (uniform draws or a shuffled bag)
//! - [`scoring`]: Line clear and drop points, level and gravity progression
//! - [`game_state`]: The engine state machine
//! - [`snapshot`]: Per-frame copy of the state for rendering
//!
//! # Game Rules
//!
//! - Rotation is a plain 90° clockwise matrix rotation with no wall kicks
//! - A piece locks on the gravity step that finds it unable to move down, or
//!   immediately on hard drop
//! - Clearing 1-4 rows scores 100/300/500/800 times the level
//! - Every `level * 5` cumulative lines the level goes up and gravity speeds up
//! - The game ends when a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the elapsed
//! milliseconds. Gravity starts at 1000ms per row and shrinks by 100ms per level
//! down to 100ms.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, CodeGrid};
pub use collision::is_collision;
pub use game_state::{GameState, Phase};
pub use piece::Piece;
pub use rng::{PieceGenerator, PieceSource, Randomizer, ScriptedSource, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, ClearResult, Progression};
pub use shapes::{get_shape, shape_count, ShapeMatrix};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
