//! GameView: maps a core `GameSnapshot` into a terminal framebuffer.
//!
//! The pit is drawn from above: each of the 5x5 columns shows its topmost
//! cube in that level's color, darker the deeper it lies, with the stack
//! height printed inside. The falling shape is drawn over the pit at its
//! visual (animated) pose. A level pole on the left shows which levels hold
//! cubes and where the falling shape currently is.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{LevelColor, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

/// Columns used by the level pole (marker, segment, gap).
const POLE_W: u16 = 3;

const PIT_BG: Rgb = Rgb::new(20, 20, 30);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const SHAPE_FG: Rgb = Rgb::new(245, 245, 245);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the pit frame and the pole for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    pole_x: u16,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Pit column width in terminal columns.
    cell_w: u16,
    /// Pit row height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps pit cells roughly square with typical glyph aspect ratios.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered pit in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_DEPTH as u16 * self.cell_h + 2,
        )
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let (frame_w, frame_h) = self.frame_size();
        let body_w = POLE_W + frame_w;
        let body_h = frame_h.max(GRID_HEIGHT as u16);

        let pole_x = viewport.width.saturating_sub(body_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(body_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            pole_x,
            start_x: pole_x + POLE_W,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Render the game into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(PIT_BG, PIT_BG),
        );
        self.draw_border(fb, &layout, border);
        self.draw_level_pole(fb, snap, &layout);

        // The pit content stays hidden while paused.
        if !snap.paused {
            for y in 0..GRID_DEPTH as i32 {
                for x in 0..GRID_WIDTH as i32 {
                    match snap.top_of_column(x, y) {
                        Some((z, color)) => self.draw_column(fb, &layout, x, y, z, color),
                        None => self.draw_empty_column(fb, &layout, x, y),
                    }
                }
            }
            self.draw_falling_shape(fb, snap, &layout);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.paused {
            self.draw_overlay_text(fb, &layout, 0, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, &layout, 0, "GAME OVER");
            self.draw_overlay_text(fb, &layout, 1, "Press ENTER to start new game");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout, style: CellStyle) {
        let (x, y, w, h) = (layout.start_x, layout.start_y, layout.frame_w, layout.frame_h);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// One segment per grid level, top level first. Occupied levels are
    /// drawn in their level color.
    fn draw_level_pole(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let empty = CellStyle::new(Rgb::new(90, 90, 100), PANEL_BG).dim();
        for z in 0..GRID_HEIGHT {
            let y = layout.start_y + z as u16;
            if z >= snap.highest_level_with_box {
                let color = level_rgb(LevelColor::for_level(z));
                fb.put_char(layout.pole_x + 1, y, '█', CellStyle::new(color, PANEL_BG));
            } else {
                fb.put_char(layout.pole_x + 1, y, '│', empty);
            }
        }

        if snap.shows_shape_marker() && !snap.game_over {
            let z = snap.shape_height.clamp(0, GRID_HEIGHT as i32 - 1) as u16;
            fb.put_char(
                layout.pole_x,
                layout.start_y + z,
                '▶',
                CellStyle::new(SHAPE_FG, PANEL_BG).bold(),
            );
        }
    }

    /// Top-left screen position of pit column (x, y). Larger y is drawn higher up.
    fn column_origin(&self, layout: &Layout, x: i32, y: i32) -> (u16, u16) {
        let row = (GRID_DEPTH as i32 - 1 - y) as u16;
        (
            layout.start_x + 1 + x as u16 * self.cell_w,
            layout.start_y + 1 + row * self.cell_h,
        )
    }

    fn draw_column(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        x: i32,
        y: i32,
        z: usize,
        color: LevelColor,
    ) {
        let (px, py) = self.column_origin(layout, x, y);
        let bg = level_rgb(color).scaled(depth_factor(z));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(bg, bg));
        if self.cell_w >= 2 {
            let height = (GRID_HEIGHT - z) as u32;
            fb.put_u32(px, py, height, CellStyle::new(Rgb::new(0, 0, 0), bg).bold());
        }
    }

    fn draw_empty_column(&self, fb: &mut FrameBuffer, layout: &Layout, x: i32, y: i32) {
        let (px, py) = self.column_origin(layout, x, y);
        let style = CellStyle::new(Rgb::new(90, 90, 100), PIT_BG).dim();
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    fn draw_falling_shape(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        if snap.game_over {
            return;
        }
        let style = CellStyle::new(SHAPE_FG, PIT_BG).bold();
        for cube in &snap.current.visual_cubes {
            let x = cube.x.round() as i32;
            let y = cube.y.round() as i32;
            if !(0..GRID_WIDTH as i32).contains(&x) || !(0..GRID_DEPTH as i32).contains(&y) {
                continue;
            }
            let (px, py) = self.column_origin(layout, x, y);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '▓', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        y += self.draw_preview(fb, snap, panel_x, y);
        y += 1;

        for (name, number) in [
            ("CUBES PLAYED", snap.played_cubes),
            ("SCORE", snap.score),
            ("HIGH SCORE", snap.high_score),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 3;
        }
    }

    /// Footprint of the preview shape seen from above. Returns rows used.
    fn draw_preview(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) -> u16 {
        let offsets = &snap.next.offsets;
        let (Some(min_x), Some(max_y), Some(min_y)) = (
            offsets.iter().map(|o| o.x).min(),
            offsets.iter().map(|o| o.y).max(),
            offsets.iter().map(|o| o.y).min(),
        ) else {
            return 0;
        };

        let style = CellStyle::new(SHAPE_FG, PANEL_BG);
        for o in offsets {
            let col = (o.x - min_x) as u16;
            let row = (max_y - o.y) as u16;
            fb.put_str(x + col * 2, y + row, "██", style);
        }
        (max_y - min_y + 1) as u16
    }

    /// Centered text over the pit; `line` counts rows below the middle.
    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, line: u16, text: &str) {
        let y = layout.start_y + layout.frame_h / 2 + line;
        let text_w = text.chars().count() as u16;
        let center = layout.start_x + layout.frame_w / 2;
        let x = center.saturating_sub(text_w / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Terminal color of a level.
pub fn level_rgb(color: LevelColor) -> Rgb {
    match color {
        LevelColor::Red => Rgb::new(220, 60, 60),
        LevelColor::Green => Rgb::new(80, 200, 90),
        LevelColor::Blue => Rgb::new(70, 110, 230),
        LevelColor::Yellow => Rgb::new(235, 215, 70),
        LevelColor::Cyan => Rgb::new(70, 210, 220),
        LevelColor::Magenta => Rgb::new(210, 80, 210),
    }
}

/// Brightness of a cube lying at level `z` (1.0 at the top, dimmer below).
fn depth_factor(z: usize) -> f32 {
    1.0 - 0.65 * z as f32 / (GRID_HEIGHT - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_leaves_room_for_pole() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(25, 12));
        assert_eq!(layout.pole_x, 0);
        assert_eq!(layout.start_x, 3);
        assert_eq!(layout.start_y, 0);
        assert_eq!((layout.frame_w, layout.frame_h), (22, 12));
    }

    #[test]
    fn test_column_origin_flips_y() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(25, 12));
        assert_eq!(view.column_origin(&layout, 0, 4), (4, 1));
        assert_eq!(view.column_origin(&layout, 4, 0), (20, 9));
    }

    #[test]
    fn test_depth_factor_dims_lower_levels() {
        assert_eq!(depth_factor(0), 1.0);
        assert!(depth_factor(11) < depth_factor(5));
        assert!(depth_factor(11) > 0.0);
    }
}
