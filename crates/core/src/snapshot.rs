use glam::{IVec3, Quat, Vec3};

use crate::shape::Shape;
use crate::types::{Cell, LevelColor, GRID_CELLS, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSnapshot {
    pub kind: usize,
    pub position: IVec3,
    pub offsets: Vec<IVec3>,
    pub translation: Vec3,
    pub orientation: Quat,
    pub visual_cubes: Vec<Vec3>,
    pub animating: bool,
}

impl ShapeSnapshot {
    pub fn write_from(&mut self, shape: &Shape) {
        self.kind = shape.kind();
        self.position = shape.position();
        self.offsets.clear();
        self.offsets.extend_from_slice(shape.offsets());
        self.translation = shape.visual_translation();
        self.orientation = shape.visual_orientation();
        self.visual_cubes.clear();
        self.visual_cubes.extend(shape.visual_cubes());
        self.animating = shape.is_animation_started();
    }
}

impl Default for ShapeSnapshot {
    fn default() -> Self {
        Self {
            kind: 0,
            position: IVec3::ZERO,
            offsets: Vec::new(),
            translation: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            visual_cubes: Vec::new(),
            animating: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub cells: [Cell; GRID_CELLS],
    pub highest_level_with_box: usize,
    pub current: ShapeSnapshot,
    pub next: ShapeSnapshot,
    pub shape_height: i32,
    pub level: u32,
    pub score: u32,
    pub high_score: u32,
    pub played_cubes: u32,
    pub paused: bool,
    pub game_over: bool,
    pub game_time_ms: u64,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn cell(&self, x: i32, y: i32, z: i32) -> Cell {
        if x < 0
            || x >= GRID_WIDTH as i32
            || y < 0
            || y >= GRID_DEPTH as i32
            || z < 0
            || z >= GRID_HEIGHT as i32
        {
            return None;
        }
        self.cells[((z as usize) * GRID_DEPTH + y as usize) * GRID_WIDTH + x as usize]
    }

    /// Topmost cube of column (x, y): its level and color
    pub fn top_of_column(&self, x: i32, y: i32) -> Option<(usize, LevelColor)> {
        (0..GRID_HEIGHT).find_map(|z| self.cell(x, y, z as i32).map(|color| (z, color)))
    }

    /// Whether the level indicator should show the falling shape's marker
    pub fn shows_shape_marker(&self) -> bool {
        self.highest_level_with_box != 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [None; GRID_CELLS],
            highest_level_with_box: GRID_HEIGHT,
            current: ShapeSnapshot::default(),
            next: ShapeSnapshot::default(),
            shape_height: 0,
            level: 0,
            score: 0,
            high_score: 0,
            played_cubes: 0,
            paused: false,
            game_over: false,
            game_time_ms: 0,
            fall_interval_ms: 0,
        }
    }
}
