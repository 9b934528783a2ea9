use blockout::core::glam::{IVec3, Vec3};
use blockout::core::{GameSnapshot, ShapeSnapshot};
use blockout::term::{level_rgb, AnchorY, FrameBuffer, GameView, Viewport};
use blockout::types::{LevelColor, GRID_DEPTH, GRID_WIDTH};

/// Pit frame is 22x12 with the default 4x2 cells; the pole takes 3 columns.
const BODY: Viewport = Viewport {
    width: 25,
    height: 12,
};

fn set_cell(snap: &mut GameSnapshot, x: usize, y: usize, z: usize) {
    snap.cells[(z * GRID_DEPTH + y) * GRID_WIDTH + x] = Some(LevelColor::for_level(z));
    snap.highest_level_with_box = snap.highest_level_with_box.min(z);
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSnapshot::default();
    let fb = GameView::default().render(&snap, BODY);

    assert_eq!(fb.get(3, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(24, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(3, 11).unwrap().ch, '└');
    assert_eq!(fb.get(24, 11).unwrap().ch, '┘');
}

#[test]
fn term_view_centers_pit_on_tall_viewports() {
    let snap = GameSnapshot::default();
    let fb = GameView::default().render(&snap, Viewport::new(25, 20));
    assert_eq!(fb.get(3, 4).unwrap().ch, '┌');

    let top = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = top.render(&snap, Viewport::new(25, 20));
    assert_eq!(fb.get(3, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_colors_column_by_top_cube_level() {
    let mut snap = GameSnapshot::default();
    set_cell(&mut snap, 0, 0, 11);
    set_cell(&mut snap, 0, 0, 6);

    let fb = GameView::default().render(&snap, BODY);
    // Column (0, 0) is drawn in the bottom-left pit cell.
    let cell = fb.get(4, 9).unwrap();
    let expected = level_rgb(LevelColor::for_level(6));
    assert_eq!(cell.style.bg.r > 0, expected.r > 0);
    assert!(cell.style.bg.r <= expected.r);
    // Stack height: levels 6..=11.
    assert_eq!(cell.ch, '6');
}

#[test]
fn term_view_draws_falling_shape_at_visual_pose() {
    let mut snap = GameSnapshot::default();
    snap.current = ShapeSnapshot {
        position: IVec3::new(2, 2, 0),
        offsets: vec![IVec3::ZERO],
        visual_cubes: vec![Vec3::new(2.0, 2.0, 0.0)],
        ..ShapeSnapshot::default()
    };

    let fb = GameView::default().render(&snap, BODY);
    // Column (2, 2) sits in the middle of the pit.
    assert_eq!(fb.get(12, 5).unwrap().ch, '▓');
    assert_eq!(fb.get(15, 6).unwrap().ch, '▓');
}

#[test]
fn term_view_level_pole_marks_occupied_levels_and_shape() {
    let mut snap = GameSnapshot::default();
    set_cell(&mut snap, 1, 1, 9);
    snap.shape_height = 3;

    let fb = GameView::default().render(&snap, BODY);
    assert_eq!(fb.get(1, 8).unwrap().ch, '│');
    assert_eq!(fb.get(1, 9).unwrap().ch, '█');
    assert_eq!(
        fb.get(1, 9).unwrap().style.fg,
        level_rgb(LevelColor::for_level(9))
    );
    assert_eq!(fb.get(0, 3).unwrap().ch, '▶');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameSnapshot::default();
    snap.level = 3;
    snap.score = 1234;
    snap.high_score = 5678;
    snap.played_cubes = 42;
    snap.next.offsets = vec![IVec3::new(-1, 0, 0), IVec3::ZERO, IVec3::new(0, 1, 0)];

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let all = screen_text(&fb);
    for word in ["LEVEL", "NEXT", "CUBES PLAYED", "SCORE", "HIGH SCORE", "1234", "5678", "42"] {
        assert!(all.contains(word), "missing {word}");
    }
    assert!(all.contains("████"));
}

#[test]
fn term_view_hides_pit_while_paused() {
    let mut snap = GameSnapshot::default();
    set_cell(&mut snap, 0, 0, 11);
    snap.paused = true;
    snap.next.offsets = vec![IVec3::ZERO];

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let all = screen_text(&fb);
    assert!(all.contains("PAUSED"));
    assert!(!all.contains('·'));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_game_over_overlay() {
    let snap = GameSnapshot {
        game_over: true,
        ..GameSnapshot::default()
    };

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let all = screen_text(&fb);
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("Press ENTER to start new game"));
}
