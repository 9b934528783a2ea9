//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`]. Every key press is a discrete
//! command; repetition is left to the terminal's key repeat, and buffering is
//! done by the game state (last command wins).

pub mod map;

pub use blockout_types as types;

pub use map::{handle_key_event, should_quit};
