//! Integration tests for the main game loop

use blockout::assets;
use blockout::core::glam::IVec3;
use blockout::core::{fall_interval_ms, GameState, ShapeCatalog};
use blockout::types::{GameAction, GRID_DEPTH, GRID_WIDTH, LAST_LEVEL, TICK_MS};

fn builtin_game(seed: u64) -> GameState {
    GameState::new(assets::builtin_catalog().unwrap(), seed)
}

fn single_cube_game() -> GameState {
    GameState::new(ShapeCatalog::parse("1  0 0 0  1  0 0 0").unwrap(), 7)
}

/// Tick at the frame rate until `done` holds, with an upper bound.
fn run_until(state: &mut GameState, max_frames: u32, mut done: impl FnMut(&GameState) -> bool) {
    for _ in 0..max_frames {
        if done(state) {
            return;
        }
        state.tick(TICK_MS);
    }
    panic!("condition not reached in {max_frames} frames");
}

#[test]
fn test_game_lifecycle() {
    let state = builtin_game(12345);
    assert!(!state.game_over());
    assert!(!state.paused());
    assert_eq!(state.level(), 0);
    assert_eq!(state.current().position(), IVec3::new(2, 2, 0));
    assert!(state.current().is_move_possible(state.grid()));
}

#[test]
fn test_same_seed_same_shapes() {
    let mut a = builtin_game(99);
    let mut b = builtin_game(99);
    for _ in 0..10 {
        assert_eq!(a.current().kind(), b.current().kind());
        assert_eq!(a.next().kind(), b.next().kind());
        a.lock_current_shape();
        b.lock_current_shape();
        a.grid_mut().delete_boxes();
        b.grid_mut().delete_boxes();
    }
}

#[test]
fn test_preview_is_promoted_on_lock() {
    let mut state = builtin_game(5);
    let preview = state.next().kind();
    state.apply_action(GameAction::Drop);
    run_until(&mut state, 2_000, |s| s.played_cubes() > 0);

    assert_eq!(state.current().kind(), preview);
    assert_eq!(state.current().position(), IVec3::new(2, 2, 0));
    assert!(!state.current().is_animation_started());
}

#[test]
fn test_lock_in_top_level_is_game_over() {
    let mut state = single_cube_game();
    // A cube right under the spawn point stops the shape at z = 0.
    assert!(state.grid_mut().set_box_on(2, 2, 1));

    state.apply_action(GameAction::Drop);
    state.tick(TICK_MS);

    assert!(state.grid().has_box_on_highest_level());
    assert!(state.game_over());
    let event = state.take_last_event().unwrap();
    assert!(event.game_over);

    // Only confirm is accepted now.
    assert!(!state.apply_action(GameAction::Drop));
    assert!(!state.tick(TICK_MS));
    assert!(state.apply_action(GameAction::Confirm));
    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
}

#[test]
fn test_clearing_levels_scores_by_game_level() {
    let mut state = single_cube_game();
    // Two full floors except the column under the spawn point.
    for z in [10, 11] {
        for y in 0..GRID_DEPTH as i32 {
            for x in 0..GRID_WIDTH as i32 {
                if (x, y) != (2, 2) {
                    state.grid_mut().set_box_on(x, y, z);
                }
            }
        }
    }

    // First cube fills the floor hole and clears it; the upper level slides
    // down, still missing its center.
    state.apply_action(GameAction::Drop);
    run_until(&mut state, 2_000, |s| s.played_cubes() == 1);
    assert_eq!(state.take_last_event().unwrap().truncated_levels, 1);
    assert_eq!(state.score(), 1);
    assert_eq!(state.grid().box_count(), 24);

    state.apply_action(GameAction::Drop);
    run_until(&mut state, 2_000, |s| s.played_cubes() == 2);
    assert_eq!(state.score(), 2);
    assert_eq!(state.high_score(), 2);
    assert_eq!(state.grid().box_count(), 0);
}

#[test]
fn test_fall_interval_strictly_decreases() {
    let intervals: Vec<u32> = (0..=LAST_LEVEL).map(fall_interval_ms).collect();
    assert!(intervals.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(intervals[LAST_LEVEL as usize], 0);
    assert_eq!(intervals[0], 900);
}

#[test]
fn test_pause_stops_the_clock() {
    let mut state = builtin_game(3);
    state.tick(TICK_MS);
    assert!(state.apply_action(GameAction::Pause));
    for _ in 0..100 {
        assert!(!state.tick(TICK_MS));
    }
    assert_eq!(state.game_time_ms(), TICK_MS as u64);
    assert!(state.snapshot().paused);

    assert!(state.apply_action(GameAction::Pause));
    state.tick(TICK_MS);
    assert_eq!(state.game_time_ms(), 2 * TICK_MS as u64);
}

#[test]
fn test_random_play_keeps_invariants() {
    let mut state = builtin_game(2024);
    let actions = [
        GameAction::MoveLeft,
        GameAction::RotateXPos,
        GameAction::MoveUp,
        GameAction::RotateZNeg,
        GameAction::MoveRight,
        GameAction::RotateYPos,
        GameAction::MoveDown,
        GameAction::Drop,
    ];

    for frame in 0..20_000usize {
        if frame % 7 == 0 {
            state.apply_action(actions[(frame / 7) % actions.len()]);
        }
        state.tick(TICK_MS);

        if state.game_over() {
            assert!(state.grid().has_box_on_highest_level());
            state.apply_action(GameAction::Confirm);
            continue;
        }
        assert!(state.current().is_move_possible(state.grid()));
        assert!(state.score() <= state.high_score());
        for z in 0..12 {
            assert!(!state.grid().is_level_full(z));
        }
    }
}
