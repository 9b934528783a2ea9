//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and renders into a simple framebuffer that is
//! then flushed to the terminal as a diff.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Make the view a pure function of a `GameSnapshot`
//! - Allow precise control over aspect ratio (pit cells are 4x2 characters)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockout_core as core;
pub use blockout_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{level_rgb, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
