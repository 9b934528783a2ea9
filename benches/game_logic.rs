use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockout::assets;
use blockout::core::glam::IVec3;
use blockout::core::{GameState, Grid, Shape};
use blockout::types::{Axis, GameAction, GRID_DEPTH, GRID_WIDTH, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(assets::builtin_catalog().unwrap(), 12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(TICK_MS));
            if state.game_over() {
                state.apply_action(GameAction::Confirm);
            }
        })
    });
}

fn bench_level_clear(c: &mut Criterion) {
    c.bench_function("clear_4_levels", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for z in 8..12 {
                for y in 0..GRID_DEPTH as i32 {
                    for x in 0..GRID_WIDTH as i32 {
                        grid.set_box_on(x, y, z);
                    }
                }
            }
            black_box(grid.update_levels());
        })
    });
}

fn bench_translate(c: &mut Criterion) {
    let grid = Grid::new();
    let mut shape = Shape::new(0, &[IVec3::new(-1, 0, 0), IVec3::ZERO, IVec3::new(1, 0, 0)]);

    c.bench_function("try_to_translate", |b| {
        b.iter(|| {
            shape.try_to_translate(&grid, black_box(IVec3::new(0, 1, 0)));
            shape.try_to_translate(&grid, black_box(IVec3::new(0, -1, 0)));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let grid = Grid::new();
    let mut shape = Shape::new(
        0,
        &[IVec3::new(-1, 0, 0), IVec3::ZERO, IVec3::new(1, 0, 0), IVec3::new(0, 1, 0)],
    );
    shape.try_to_translate(&grid, IVec3::new(0, 0, 5));

    c.bench_function("try_to_rotate_quarter", |b| {
        b.iter(|| {
            shape.try_to_rotate_quarter(&grid, black_box(Axis::Y), true);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = GameState::new(assets::builtin_catalog().unwrap(), 12345);
    let mut snap = state.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_level_clear,
    bench_translate,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
