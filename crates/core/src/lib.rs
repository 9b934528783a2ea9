//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on the terminal, input devices, or file I/O, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 5x5x12 voxel pit with level truncation
//! - [`shape`]: Falling shape with lattice moves and visual animation
//! - [`catalog`]: Shape templates parsed from a shape-set description
//! - [`scoring`]: Fall interval and lock score by game level
//! - [`game_state`]: Orchestration of shapes, timing, levels and lifecycle
//! - [`snapshot`]: Render-facing copy of the game state
//!
//! # Example
//!
//! ```
//! use blockout_core::{GameState, ShapeCatalog};
//! use blockout_core::types::GameAction;
//!
//! let catalog = ShapeCatalog::parse("1  0 0 0  1  0 0 0").unwrap();
//! let mut game = GameState::new(catalog, 12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.tick(16);
//! assert_eq!(game.current().position().x, 3);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time in milliseconds. The shape falls one level every
//! `(LAST_LEVEL - level) * 100` ms, and the game level rises after every minute
//! of unpaused play.

pub mod catalog;
pub mod game_state;
pub mod grid;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockout_types as types;
pub use glam;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, ShapeCatalog, ShapeTemplate};
pub use game_state::{GameState, LockEvent};
pub use grid::Grid;
pub use scoring::{fall_interval_ms, lock_score};
pub use shape::{Animation, Shape, SPAWN_POSITION};
pub use snapshot::{GameSnapshot, ShapeSnapshot};
