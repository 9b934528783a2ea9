//! Grid module - the 3D occupancy lattice of placed cubes
//!
//! The grid is a 5x5x12 voxel pit. Each cell is either empty or holds a placed
//! cube colored by the level it rests on.
//! Uses a flat array (level-major, then row-major) so whole levels are
//! contiguous and can be shifted with `copy_within`.
//! Coordinates: (x, y, z) where z = 0 is the top of the pit and z = 11 the floor.

use arrayvec::ArrayVec;
use tracing::warn;

use crate::types::{Cell, LevelColor, GRID_CELLS, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH, LEVEL_CELLS};

/// The voxel pit - 5 x 5 cells per level, 12 levels deep
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, index = (z * DEPTH + y) * WIDTH + x
    cells: [Cell; GRID_CELLS],
    /// Lowest z index holding a cube, `GRID_HEIGHT` when the grid is empty
    highest_level_with_box: usize,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
            highest_level_with_box: GRID_HEIGHT,
        }
    }

    /// Calculate flat index from (x, y, z) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0
            || x >= GRID_WIDTH as i32
            || y < 0
            || y >= GRID_DEPTH as i32
            || z < 0
            || z >= GRID_HEIGHT as i32
        {
            return None;
        }
        Some(((z as usize) * GRID_DEPTH + (y as usize)) * GRID_WIDTH + (x as usize))
    }

    #[inline(always)]
    fn level_range(z: usize) -> std::ops::Range<usize> {
        let start = z * LEVEL_CELLS;
        start..start + LEVEL_CELLS
    }

    /// Get cell at position (x, y, z)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Cell> {
        Self::index(x, y, z).map(|idx| self.cells[idx])
    }

    /// Whether a cube occupies (x, y, z). Out-of-bounds coordinates are never occupied.
    pub fn has_box_on(&self, x: i32, y: i32, z: i32) -> bool {
        matches!(self.get(x, y, z), Some(Some(_)))
    }

    /// Place a cube at (x, y, z), colored by its level.
    ///
    /// The cell must be in bounds and empty; otherwise nothing changes and
    /// `false` is returned.
    pub fn set_box_on(&mut self, x: i32, y: i32, z: i32) -> bool {
        let Some(idx) = Self::index(x, y, z) else {
            warn!(x, y, z, "set_box_on outside of the grid");
            return false;
        };
        if self.cells[idx].is_some() {
            warn!(x, y, z, "set_box_on over an occupied cell");
            return false;
        }

        let level = z as usize;
        self.cells[idx] = Some(LevelColor::for_level(level));
        self.highest_level_with_box = self.highest_level_with_box.min(level);
        true
    }

    /// Lowest z index holding a cube (`GRID_HEIGHT` when empty)
    pub fn highest_level_with_box(&self) -> usize {
        self.highest_level_with_box
    }

    /// True when the top level holds a cube - the game-over condition
    pub fn has_box_on_highest_level(&self) -> bool {
        self.highest_level_with_box == 0
    }

    /// Check if a level is completely filled
    pub fn is_level_full(&self, z: usize) -> bool {
        if z >= GRID_HEIGHT {
            return false;
        }
        self.cells[Self::level_range(z)].iter().all(|cell| cell.is_some())
    }

    /// Remove level `z` and move every level above it one step down.
    ///
    /// Moved cubes take the color of their new level.
    fn truncate_level(&mut self, z: usize) {
        let top = self.highest_level_with_box;
        if z < top {
            // Nothing is stored at or above an empty level.
            return;
        }

        // Shift [top, z) down by one level; copy_within handles the overlap.
        let src = top * LEVEL_CELLS..z * LEVEL_CELLS;
        self.cells.copy_within(src, (top + 1) * LEVEL_CELLS);

        for cell in &mut self.cells[Self::level_range(top)] {
            *cell = None;
        }

        for level in top + 1..=z {
            let color = LevelColor::for_level(level);
            for cell in &mut self.cells[Self::level_range(level)] {
                if cell.is_some() {
                    *cell = Some(color);
                }
            }
        }

        self.highest_level_with_box = (top + 1).min(GRID_HEIGHT);
        if self.highest_level_with_box < GRID_HEIGHT
            && self.cells[Self::level_range(self.highest_level_with_box)]
                .iter()
                .all(|c| c.is_none())
        {
            self.recompute_highest_level();
        }
    }

    fn recompute_highest_level(&mut self) {
        self.highest_level_with_box = (0..GRID_HEIGHT)
            .find(|&z| self.cells[Self::level_range(z)].iter().any(|c| c.is_some()))
            .unwrap_or(GRID_HEIGHT);
    }

    /// Clear every full level and return the cleared level indices, in the
    /// order they were removed.
    ///
    /// Scans from the floor up to the highest occupied level. After each
    /// truncation the scan restarts from the floor, since shifting can bring
    /// another full level into the same index.
    pub fn clear_full_levels(&mut self) -> ArrayVec<usize, GRID_HEIGHT> {
        let mut cleared = ArrayVec::new();

        'scan: loop {
            for z in (self.highest_level_with_box..GRID_HEIGHT).rev() {
                if self.is_level_full(z) {
                    self.truncate_level(z);
                    cleared.push(z);
                    continue 'scan;
                }
            }
            break;
        }

        cleared
    }

    /// Clear full levels and return how many were truncated
    pub fn update_levels(&mut self) -> u32 {
        self.clear_full_levels().len() as u32
    }

    /// Remove every cube
    pub fn delete_boxes(&mut self) {
        self.cells.fill(None);
        self.highest_level_with_box = GRID_HEIGHT;
    }

    /// Topmost cube of column (x, y): its level and color
    pub fn top_of_column(&self, x: i32, y: i32) -> Option<(usize, LevelColor)> {
        (self.highest_level_with_box..GRID_HEIGHT).find_map(|z| match self.get(x, y, z as i32) {
            Some(Some(color)) => Some((z, color)),
            _ => None,
        })
    }

    /// Number of placed cubes
    pub fn box_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_level(grid: &mut Grid, z: i32) {
        for y in 0..GRID_DEPTH as i32 {
            for x in 0..GRID_WIDTH as i32 {
                assert!(grid.set_box_on(x, y, z));
            }
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0, 0), Some(0));
        assert_eq!(Grid::index(4, 0, 0), Some(4));
        assert_eq!(Grid::index(0, 1, 0), Some(5));
        assert_eq!(Grid::index(0, 0, 1), Some(25));
        assert_eq!(Grid::index(4, 4, 11), Some(299));
        assert_eq!(Grid::index(-1, 0, 0), None);
        assert_eq!(Grid::index(5, 0, 0), None);
        assert_eq!(Grid::index(0, 0, 12), None);
        assert_eq!(Grid::index(0, 0, -1), None);
    }

    #[test]
    fn test_set_box_updates_highest_level() {
        let mut grid = Grid::new();
        assert_eq!(grid.highest_level_with_box(), GRID_HEIGHT);

        assert!(grid.set_box_on(1, 2, 9));
        assert_eq!(grid.highest_level_with_box(), 9);
        assert!(grid.set_box_on(1, 2, 11));
        assert_eq!(grid.highest_level_with_box(), 9);
        assert!(grid.set_box_on(0, 0, 4));
        assert_eq!(grid.highest_level_with_box(), 4);
        assert_eq!(grid.get(0, 0, 4), Some(Some(LevelColor::for_level(4))));
    }

    #[test]
    fn test_set_box_rejects_occupied_and_outside() {
        let mut grid = Grid::new();
        assert!(grid.set_box_on(0, 0, 0));
        assert!(!grid.set_box_on(0, 0, 0));
        assert!(!grid.set_box_on(5, 0, 0));
        assert!(!grid.set_box_on(0, 0, -1));
        assert_eq!(grid.box_count(), 1);
    }

    #[test]
    fn test_truncate_recolors_shifted_cubes() {
        let mut grid = Grid::new();
        fill_level(&mut grid, 11);
        grid.set_box_on(2, 2, 10);
        grid.set_box_on(3, 1, 9);

        assert_eq!(grid.update_levels(), 1);
        assert!(!grid.has_box_on(2, 2, 10));
        assert_eq!(grid.get(2, 2, 11), Some(Some(LevelColor::for_level(11))));
        assert_eq!(grid.get(3, 1, 10), Some(Some(LevelColor::for_level(10))));
        assert_eq!(grid.highest_level_with_box(), 10);
        assert_eq!(grid.box_count(), 2);
    }

    #[test]
    fn test_cascade_clears_stacked_full_levels() {
        let mut grid = Grid::new();
        fill_level(&mut grid, 11);
        fill_level(&mut grid, 10);
        fill_level(&mut grid, 8);
        grid.set_box_on(0, 0, 9);

        let cleared = grid.clear_full_levels();
        // 11 is cleared twice (original 11 then the shifted 10), then the
        // shifted level 8 lands on 10.
        assert_eq!(cleared.as_slice(), &[11, 11, 10]);
        assert_eq!(grid.box_count(), 1);
        assert!(grid.has_box_on(0, 0, 11));
        assert_eq!(grid.highest_level_with_box(), 11);
    }

    #[test]
    fn test_clearing_only_level_empties_grid() {
        let mut grid = Grid::new();
        fill_level(&mut grid, 5);
        assert_eq!(grid.update_levels(), 1);
        assert_eq!(grid.box_count(), 0);
        assert_eq!(grid.highest_level_with_box(), GRID_HEIGHT);
    }

    #[test]
    fn test_top_of_column() {
        let mut grid = Grid::new();
        assert_eq!(grid.top_of_column(1, 1), None);
        grid.set_box_on(1, 1, 11);
        grid.set_box_on(1, 1, 7);
        assert_eq!(grid.top_of_column(1, 1), Some((7, LevelColor::for_level(7))));
        assert_eq!(grid.top_of_column(9, 9), None);
    }

    #[test]
    fn test_delete_boxes_resets_sentinel() {
        let mut grid = Grid::new();
        grid.set_box_on(0, 0, 0);
        assert!(grid.has_box_on_highest_level());
        grid.delete_boxes();
        assert!(!grid.has_box_on_highest_level());
        assert_eq!(grid.highest_level_with_box(), GRID_HEIGHT);
        assert_eq!(grid.box_count(), 0);
    }
}
