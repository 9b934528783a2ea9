//! Scoring module - fall speed and lock rewards by game level

use crate::types::{FALL_STEP_MS, LAST_LEVEL};

/// Interval between two automatic fall steps at `level`.
///
/// Levels above `LAST_LEVEL` are treated as `LAST_LEVEL`, which falls as fast
/// as the animation allows (0ms).
pub fn fall_interval_ms(level: u32) -> u32 {
    (LAST_LEVEL - level.min(LAST_LEVEL)) * FALL_STEP_MS
}

/// Points for a lock that truncated `truncated_levels` grid levels
pub fn lock_score(truncated_levels: u32, level: u32) -> u32 {
    truncated_levels.saturating_mul(level + 1)
}
