//! Shape module - the falling piece
//!
//! A shape is a rigid set of integer cube offsets around a pivot position in
//! the grid. Moves are validated against a [`Grid`] before they are kept; a
//! rejected move leaves the shape exactly as it was.
//!
//! Besides its logical (lattice) pose, a shape carries a visual pose that is
//! interpolated towards the logical one over [`ANIMATION_DURATION_MS`] after
//! every successful move, so a renderer can show the piece sliding or turning.

use glam::{EulerRot, IVec3, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::grid::Grid;
use crate::types::{Axis, ANIMATION_DURATION_MS, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

/// Pivot of a freshly spawned shape: centered over the pit, at the top level
pub const SPAWN_POSITION: IVec3 = IVec3::new(GRID_WIDTH as i32 / 2, GRID_DEPTH as i32 / 2, 0);

/// Animation state of a shape's visual pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    Idle,
    Translating { from: Vec3, to: Vec3, elapsed_ms: u32 },
    Rotating { from: Quat, to: Quat, elapsed_ms: u32 },
}

/// Fraction of the animation completed after `elapsed_ms`
fn interpolation_ratio(elapsed_ms: u32) -> f32 {
    (elapsed_ms as f32 / ANIMATION_DURATION_MS as f32).clamp(0.0, 1.0)
}

/// Rotate a lattice offset and round it back onto the lattice
fn rotate_offset(rotation: Quat, offset: IVec3) -> IVec3 {
    (rotation * offset.as_vec3()).round().as_ivec3()
}

/// Every cube inside the pit columns, not below the floor, and on a free cell
fn fits(grid: &Grid, mut cubes: impl Iterator<Item = IVec3>) -> bool {
    cubes.all(|cube| {
        let inside = (0..GRID_WIDTH as i32).contains(&cube.x)
            && (0..GRID_DEPTH as i32).contains(&cube.y)
            && cube.z <= GRID_HEIGHT as i32 - 1;
        inside && !grid.has_box_on(cube.x, cube.y, cube.z)
    })
}

/// Falling shape
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Index of the catalog template this shape was created from
    kind: usize,
    /// Pivot in grid coordinates
    position: IVec3,
    /// Cube offsets relative to the pivot, in their current orientation
    offsets: Vec<IVec3>,
    /// Cube offsets as created (identity orientation)
    spawn_offsets: Vec<IVec3>,
    /// Visual pivot, equal to `position` at rest
    translation: Vec3,
    /// Visual orientation, equal to `resting_orientation` at rest
    orientation: Quat,
    /// Orientation matching `offsets`
    resting_orientation: Quat,
    animation: Animation,
}

impl Shape {
    /// Create a shape at the spawn pose
    pub fn new(kind: usize, cubes: &[IVec3]) -> Self {
        Self {
            kind,
            position: SPAWN_POSITION,
            offsets: cubes.to_vec(),
            spawn_offsets: cubes.to_vec(),
            translation: SPAWN_POSITION.as_vec3(),
            orientation: Quat::IDENTITY,
            resting_orientation: Quat::IDENTITY,
            animation: Animation::Idle,
        }
    }

    pub fn kind(&self) -> usize {
        self.kind
    }

    pub fn position(&self) -> IVec3 {
        self.position
    }

    pub fn offsets(&self) -> &[IVec3] {
        &self.offsets
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    /// Absolute lattice position of every cube
    pub fn cubes(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.offsets.iter().map(move |&offset| self.position + offset)
    }

    pub fn visual_translation(&self) -> Vec3 {
        self.translation
    }

    pub fn visual_orientation(&self) -> Quat {
        self.orientation
    }

    /// Cube centers under the current (possibly mid-animation) visual pose
    pub fn visual_cubes(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.spawn_offsets
            .iter()
            .map(move |offset| self.translation + self.orientation * offset.as_vec3())
    }

    pub fn is_animation_started(&self) -> bool {
        !matches!(self.animation, Animation::Idle)
    }

    /// Lowest point of the shape (largest z among pivot and cubes)
    pub fn height_in_grid(&self) -> i32 {
        self.cubes()
            .map(|cube| cube.z)
            .fold(self.position.z, i32::max)
    }

    /// Number of cubes the shape is made of
    pub fn block_count(&self) -> usize {
        self.offsets.len()
    }

    /// Check that every cube is inside the pit and not overlapping placed cubes.
    ///
    /// Cubes above the pit (negative z) are allowed as long as their x/y are
    /// inside it.
    pub fn is_move_possible(&self, grid: &Grid) -> bool {
        fits(grid, self.cubes())
    }

    /// Move the pivot by `delta` if the result is legal, starting a slide animation.
    pub fn try_to_translate(&mut self, grid: &Grid, delta: IVec3) -> bool {
        self.position += delta;

        if !self.is_move_possible(grid) {
            self.position -= delta;
            return false;
        }

        self.animation = Animation::Translating {
            from: self.translation,
            to: self.position.as_vec3(),
            elapsed_ms: 0,
        };
        true
    }

    /// Rotate every offset by the given angles (radians, multiples of pi/2)
    /// if the result is legal, starting a turn animation.
    ///
    /// Angles are applied roll (z) first, then pitch (x), then yaw (y).
    /// Rotated coordinates are rounded back onto the lattice.
    pub fn try_to_rotate(&mut self, grid: &Grid, angles: Vec3) -> bool {
        let rotation = Quat::from_euler(EulerRot::YXZ, angles.y, angles.x, angles.z);
        let rotated = self
            .offsets
            .iter()
            .map(|&offset| self.position + rotate_offset(rotation, offset));
        if !fits(grid, rotated) {
            return false;
        }

        for offset in &mut self.offsets {
            *offset = rotate_offset(rotation, *offset);
        }
        self.resting_orientation = (rotation * self.resting_orientation).normalize();
        self.animation = Animation::Rotating {
            from: self.orientation,
            to: self.resting_orientation,
            elapsed_ms: 0,
        };
        true
    }

    /// Quarter turn about one grid axis
    pub fn try_to_rotate_quarter(&mut self, grid: &Grid, axis: Axis, positive: bool) -> bool {
        let angle = if positive { FRAC_PI_2 } else { -FRAC_PI_2 };
        let angles = match axis {
            Axis::X => Vec3::new(angle, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, angle, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, angle),
        };
        self.try_to_rotate(grid, angles)
    }

    /// Advance the running animation by `elapsed_ms`
    pub fn update(&mut self, elapsed_ms: u32) {
        let finished = match &mut self.animation {
            Animation::Idle => return,
            Animation::Translating {
                from,
                to,
                elapsed_ms: elapsed,
            } => {
                *elapsed = elapsed.saturating_add(elapsed_ms);
                self.translation = from.lerp(*to, interpolation_ratio(*elapsed));
                *elapsed >= ANIMATION_DURATION_MS
            }
            Animation::Rotating {
                from,
                to,
                elapsed_ms: elapsed,
            } => {
                *elapsed = elapsed.saturating_add(elapsed_ms);
                self.orientation = from.slerp(*to, interpolation_ratio(*elapsed));
                *elapsed >= ANIMATION_DURATION_MS
            }
        };

        if finished {
            self.animation = Animation::Idle;
        }
    }

    /// Put the shape back at the spawn pose with its original orientation
    pub fn reset_to_spawn(&mut self) {
        self.position = SPAWN_POSITION;
        self.offsets.clone_from(&self.spawn_offsets);
        self.translation = SPAWN_POSITION.as_vec3();
        self.orientation = Quat::IDENTITY;
        self.resting_orientation = Quat::IDENTITY;
        self.animation = Animation::Idle;
    }

    /// Write the shape's cubes into the grid, consuming the shape.
    ///
    /// Cubes still above the pit (negative z) are dropped. Returns how many
    /// cubes were placed.
    pub fn commit_into(self, grid: &mut Grid) -> usize {
        self.cubes()
            .filter(|cube| cube.z >= 0)
            .filter(|cube| grid.set_box_on(cube.x, cube.y, cube.z))
            .count()
    }
}
