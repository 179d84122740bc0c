//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders a [`GameSnapshot`](core::GameSnapshot)
//! into a simple framebuffer that is then flushed to the terminal.
//!
//! - `core` stays free of I/O
//! - Each board cell is 2 characters wide to keep blocks roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, AnchorY, GameView, Viewport, GAME_OVER_TEXT, NEXT_LABEL, RESTART_TEXT};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
