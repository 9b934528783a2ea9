//! Block Out (workspace facade crate).
//!
//! The game rules live in dedicated crates under `crates/`; this package
//! re-exports them as `blockout::{core,input,term,types}` and adds the pieces
//! that touch the file system: shape-set loading and high-score persistence.

pub mod assets;
pub mod high_score;

pub use blockout_core as core;
pub use blockout_input as input;
pub use blockout_term as term;
pub use blockout_types as types;
