//! Core types module - shared constants and plain data types
//!
//! Everything here is dependency-free so it can be used by the engine, the
//! terminal view and the input mapping alike.
//!
//! # Grid Dimensions
//!
//! The pit is a 5x5x12 voxel lattice:
//!
//! - **Width** (`x`): 5 columns, indexed 0-4
//! - **Depth** (`y`): 5 rows, indexed 0-4
//! - **Height** (`z`): 12 levels, indexed 0-11, where **0 is the top** (the
//!   opening the shapes fall in from) and 11 is the floor
//!
//! Shapes fall towards increasing `z`.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner (~60 FPS) |
//! | `FALL_STEP_MS` | 100 | Fall interval granularity per game level |
//! | `ANIMATION_DURATION_MS` | 100 | Duration of a translate/rotate animation |
//! | `LEVEL_TIME_INTERVAL_MS` | 60000 | Unpaused game time between level-ups |
//!
//! # Examples
//!
//! ```
//! use blockout_types::{GameAction, LevelColor, GRID_HEIGHT};
//!
//! assert_eq!(GRID_HEIGHT, 12);
//! assert_eq!(LevelColor::for_level(0), LevelColor::Red);
//! assert_eq!(LevelColor::for_level(6), LevelColor::Red);
//!
//! assert_eq!(GameAction::MoveLeft.translation(), Some((-1, 0, 0)));
//! assert_eq!(GameAction::MoveLeft.as_str(), "moveLeft");
//! ```

/// Grid width in cells (x axis)
pub const GRID_WIDTH: usize = 5;

/// Grid depth in cells (y axis)
pub const GRID_DEPTH: usize = 5;

/// Grid height in levels (z axis, 0 = top)
pub const GRID_HEIGHT: usize = 12;

/// Number of cells in one horizontal level
pub const LEVEL_CELLS: usize = GRID_WIDTH * GRID_DEPTH;

/// Total number of cells in the grid
pub const GRID_CELLS: usize = LEVEL_CELLS * GRID_HEIGHT;

/// Highest game level (fastest fall)
pub const LAST_LEVEL: u32 = 9;

/// Unpaused game time between two level-ups
pub const LEVEL_TIME_INTERVAL_MS: u64 = 60_000;

/// Fall interval step: level `n` falls every `(LAST_LEVEL - n) * FALL_STEP_MS`
pub const FALL_STEP_MS: u32 = 100;

/// Duration of a single translate or rotate animation
pub const ANIMATION_DURATION_MS: u32 = 100;

/// Fixed frame interval used by the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Number of distinct level colors before the palette repeats
pub const LEVEL_COLORS_COUNT: usize = 6;

/// Color of a placed cube, derived from the level it rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl LevelColor {
    pub const ALL: [LevelColor; LEVEL_COLORS_COUNT] = [
        LevelColor::Red,
        LevelColor::Green,
        LevelColor::Blue,
        LevelColor::Yellow,
        LevelColor::Cyan,
        LevelColor::Magenta,
    ];

    /// Palette entry for grid level `z` (cycles every six levels)
    pub fn for_level(z: usize) -> Self {
        Self::ALL[z % LEVEL_COLORS_COUNT]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelColor::Red => "red",
            LevelColor::Green => "green",
            LevelColor::Blue => "blue",
            LevelColor::Yellow => "yellow",
            LevelColor::Cyan => "cyan",
            LevelColor::Magenta => "magenta",
        }
    }
}

/// Cell in the grid (None = empty, Some = placed cube with its level color)
pub type Cell = Option<LevelColor>;

/// Rotation axis of a quarter-turn command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Game actions
///
/// Translations move the falling shape inside the horizontal plane, `Drop`
/// pushes it one level down, and each rotation is a quarter turn about one
/// grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Drop,
    RotateXPos,
    RotateXNeg,
    RotateYPos,
    RotateYNeg,
    RotateZPos,
    RotateZNeg,
    Pause,
    Confirm,
}

impl GameAction {
    pub const ALL: [GameAction; 13] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveUp,
        GameAction::MoveDown,
        GameAction::Drop,
        GameAction::RotateXPos,
        GameAction::RotateXNeg,
        GameAction::RotateYPos,
        GameAction::RotateYNeg,
        GameAction::RotateZPos,
        GameAction::RotateZNeg,
        GameAction::Pause,
        GameAction::Confirm,
    ];

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::Drop => "drop",
            GameAction::RotateXPos => "rotateXPos",
            GameAction::RotateXNeg => "rotateXNeg",
            GameAction::RotateYPos => "rotateYPos",
            GameAction::RotateYNeg => "rotateYNeg",
            GameAction::RotateZPos => "rotateZPos",
            GameAction::RotateZNeg => "rotateZNeg",
            GameAction::Pause => "pause",
            GameAction::Confirm => "confirm",
        }
    }

    /// Grid-plane translation for the four move commands.
    pub fn translation(&self) -> Option<(i32, i32, i32)> {
        match self {
            GameAction::MoveLeft => Some((-1, 0, 0)),
            GameAction::MoveRight => Some((1, 0, 0)),
            GameAction::MoveUp => Some((0, 1, 0)),
            GameAction::MoveDown => Some((0, -1, 0)),
            _ => None,
        }
    }

    /// Quarter turn (axis, positive direction) for the six rotation commands.
    pub fn rotation(&self) -> Option<(Axis, bool)> {
        match self {
            GameAction::RotateXPos => Some((Axis::X, true)),
            GameAction::RotateXNeg => Some((Axis::X, false)),
            GameAction::RotateYPos => Some((Axis::Y, true)),
            GameAction::RotateYNeg => Some((Axis::Y, false)),
            GameAction::RotateZPos => Some((Axis::Z, true)),
            GameAction::RotateZNeg => Some((Axis::Z, false)),
            _ => None,
        }
    }
}
