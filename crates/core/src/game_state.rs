//! Game state module - manages the complete game state
//!
//! This module ties together the grid, the falling shapes, the shape catalog
//! and scoring. It owns the fall timer, level progression, the single buffered
//! command and the pause/game-over lifecycle.
//!
//! Each call to [`GameState::tick`] runs one frame in a fixed order: buffered
//! command or fall step, then shape animation, then the level-up check.

use std::mem;

use glam::IVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::ShapeCatalog;
use crate::grid::Grid;
use crate::scoring::{fall_interval_ms, lock_score};
use crate::shape::Shape;
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, LAST_LEVEL, LEVEL_TIME_INTERVAL_MS};

/// Outcome of a shape lock (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Cubes the locked shape was made of
    pub cubes: u32,
    pub truncated_levels: u32,
    pub score_gained: u32,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    catalog: ShapeCatalog,
    rng: StdRng,
    current: Shape,
    /// Preview shape, promoted to `current` on lock
    next: Shape,
    level: u32,
    score: u32,
    high_score: u32,
    played_cubes: u32,
    fall_interval_ms: u32,
    since_last_fall_ms: u32,
    /// Unpaused game time of the current game
    game_time_ms: u64,
    next_level_at_ms: u64,
    /// Buffered command, applied once the shape is idle. `Drop` stays latched.
    pending: Option<GameAction>,
    paused: bool,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(catalog: ShapeCatalog, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let current = catalog.create_random(&mut rng);
        let next = catalog.create_random(&mut rng);

        Self {
            grid: Grid::new(),
            catalog,
            rng,
            current,
            next,
            level: 0,
            score: 0,
            high_score: 0,
            played_cubes: 0,
            fall_interval_ms: fall_interval_ms(0),
            since_last_fall_ms: 0,
            game_time_ms: 0,
            next_level_at_ms: LEVEL_TIME_INTERVAL_MS,
            pending: None,
            paused: false,
            game_over: false,
            last_event: None,
        }
    }

    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.set_high_score(high_score);
        self
    }

    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access, used to set up positions
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn current(&self) -> &Shape {
        &self.current
    }

    pub fn next(&self) -> &Shape {
        &self.next
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn played_cubes(&self) -> u32 {
        self.played_cubes
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn game_time_ms(&self) -> u64 {
        self.game_time_ms
    }

    pub fn pending(&self) -> Option<GameAction> {
        self.pending
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Write the render-facing view of the game into `out`, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cells.copy_from_slice(self.grid.cells());
        out.highest_level_with_box = self.grid.highest_level_with_box();
        out.current.write_from(&self.current);
        out.next.write_from(&self.next);
        out.shape_height = self.current.height_in_grid();
        out.level = self.level;
        out.score = self.score;
        out.high_score = self.high_score;
        out.played_cubes = self.played_cubes;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.game_time_ms = self.game_time_ms;
        out.fall_interval_ms = self.fall_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply a game action
    ///
    /// `Pause` and `Confirm` act immediately. Shape commands are buffered
    /// (last one wins) and applied by the next tick in which the shape is
    /// not animating. Returns whether the action was accepted.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                self.pending = None;
                info!(paused = self.paused, "pause toggled");
                true
            }
            GameAction::Confirm => {
                if !self.game_over {
                    return false;
                }
                self.new_game();
                true
            }
            _ => {
                if self.paused || self.game_over {
                    return false;
                }
                self.pending = Some(action);
                true
            }
        }
    }

    /// Main game tick - advance timers, apply input, fall and animate.
    ///
    /// Returns true when the shape moved, rotated or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused || self.game_over {
            return false;
        }

        self.game_time_ms += u64::from(elapsed_ms);
        self.since_last_fall_ms = self.since_last_fall_ms.saturating_add(elapsed_ms);

        let mut changed = false;
        if !self.current.is_animation_started() {
            if let Some(action) = self.pending {
                if action != GameAction::Drop {
                    self.pending = None;
                }
                changed = self.apply_shape_command(action);
            } else if self.since_last_fall_ms >= self.fall_interval_ms {
                self.since_last_fall_ms = 0;
                self.move_down_current_shape();
                changed = true;
            }
        }

        self.current.update(elapsed_ms);

        if !self.game_over && self.game_time_ms > self.next_level_at_ms && self.level < LAST_LEVEL {
            self.level += 1;
            self.next_level_at_ms += LEVEL_TIME_INTERVAL_MS;
            self.fall_interval_ms = fall_interval_ms(self.level);
            info!(level = self.level, fall_interval_ms = self.fall_interval_ms, "level up");
        }

        changed
    }

    fn apply_shape_command(&mut self, action: GameAction) -> bool {
        if action == GameAction::Drop {
            // A blocked drop locks the shape, which is a change too.
            self.move_down_current_shape();
            return true;
        }

        let moved = if let Some((dx, dy, dz)) = action.translation() {
            self.current
                .try_to_translate(&self.grid, IVec3::new(dx, dy, dz))
        } else if let Some((axis, positive)) = action.rotation() {
            self.current.try_to_rotate_quarter(&self.grid, axis, positive)
        } else {
            false
        };
        debug!(action = action.as_str(), moved, "shape command");
        moved
    }

    /// Push the current shape one level down, locking it when it cannot move.
    ///
    /// Returns true if the shape moved.
    pub fn move_down_current_shape(&mut self) -> bool {
        if self.current.try_to_translate(&self.grid, IVec3::Z) {
            return true;
        }
        self.lock_current_shape();
        false
    }

    /// Commit the current shape into the grid, clear full levels and bring
    /// in the preview shape.
    pub fn lock_current_shape(&mut self) {
        let cubes = self.current.block_count() as u32;
        self.played_cubes += cubes;

        let preview = self.catalog.create_random(&mut self.rng);
        let mut promoted = mem::replace(&mut self.next, preview);
        promoted.reset_to_spawn();
        let locked = mem::replace(&mut self.current, promoted);
        locked.commit_into(&mut self.grid);

        let truncated_levels = self.grid.update_levels();
        let score_gained = lock_score(truncated_levels, self.level);
        self.score += score_gained;
        if self.score > self.high_score {
            self.high_score = self.score;
        }

        if self.grid.has_box_on_highest_level() {
            self.game_over = true;
            info!(score = self.score, level = self.level, "game over");
        }

        self.pending = None;
        self.since_last_fall_ms = 0;

        info!(
            cubes,
            truncated_levels,
            score_gained,
            score = self.score,
            "shape locked"
        );
        self.last_event = Some(LockEvent {
            cubes,
            truncated_levels,
            score_gained,
            game_over: self.game_over,
        });
    }

    /// Reset everything but the high score and start over with fresh shapes
    pub fn new_game(&mut self) {
        self.grid.delete_boxes();
        self.current = self.catalog.create_random(&mut self.rng);
        self.next = self.catalog.create_random(&mut self.rng);
        self.level = 0;
        self.score = 0;
        self.played_cubes = 0;
        self.fall_interval_ms = fall_interval_ms(0);
        self.since_last_fall_ms = 0;
        self.game_time_ms = 0;
        self.next_level_at_ms = LEVEL_TIME_INTERVAL_MS;
        self.pending = None;
        self.paused = false;
        self.game_over = false;
        self.last_event = None;
        info!(high_score = self.high_score, "new game");
    }
}
