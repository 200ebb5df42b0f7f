//! Fixed occupancy grid over world space
//!
//! The grid is filled once at level-build time and is read-only during
//! simulation; every body queries the same shared space each tick.
//! Queries clamp the box's cell span to the grid, so boxes fully outside
//! simply report "no collision".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{overlap, single_displacement};

/// Boolean occupancy grid with world/grid coordinate conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionSpace {
    pub cell_size: f32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub world_width: f32,
    pub world_height: f32,
    /// Column-major: `occupancy[x][y]`
    occupancy: Vec<Vec<bool>>,
}

impl CollisionSpace {
    /// `grid_width` and `grid_height` are in cells
    pub fn new(grid_width: usize, grid_height: usize, cell_size: f32) -> Self {
        Self {
            cell_size,
            grid_width,
            grid_height,
            world_width: grid_width as f32 * cell_size,
            world_height: grid_height as f32 * cell_size,
            occupancy: vec![vec![false; grid_height]; grid_width],
        }
    }

    /// Converts a world coordinate to a grid coordinate
    #[inline]
    pub fn world_to_grid(&self, world: f32) -> i32 {
        (world / self.cell_size).floor() as i32
    }

    /// Converts a grid coordinate to the cell's left edge in the world
    #[inline]
    pub fn grid_to_world_left(&self, grid: i32) -> f32 {
        grid as f32 * self.cell_size
    }

    /// Converts a grid coordinate to the cell's right edge in the world
    #[inline]
    pub fn grid_to_world_right(&self, grid: i32) -> f32 {
        (grid + 1) as f32 * self.cell_size
    }

    /// Converts a grid coordinate to the cell's top edge in the world
    #[inline]
    pub fn grid_to_world_top(&self, grid: i32) -> f32 {
        grid as f32 * self.cell_size
    }

    /// Converts a grid coordinate to the cell's bottom edge in the world
    #[inline]
    pub fn grid_to_world_bottom(&self, grid: i32) -> f32 {
        (grid + 1) as f32 * self.cell_size
    }

    /// Occupancy of a cell; out-of-grid cells read as empty
    pub fn occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.grid_width || y >= self.grid_height {
            return false;
        }
        self.occupancy[x][y]
    }

    /// Mark a cell occupied. Level-build time only; the grid is read-only
    /// once simulation starts.
    pub fn set_occupied(&mut self, x: usize, y: usize) {
        if x < self.grid_width && y < self.grid_height {
            self.occupancy[x][y] = true;
        }
    }

    /// World box of a single grid cell
    fn cell_aabb(&self, x: i32, y: i32) -> Aabb {
        Aabb::from_rect(
            x as f32 * self.cell_size,
            y as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// The box's cell span clamped to the grid; `None` when fully outside
    fn clamped_span(&self, aabb: &Aabb) -> Option<(i32, i32, i32, i32)> {
        let x_start = self.world_to_grid(aabb.left).max(0);
        let x_end = self.world_to_grid(aabb.right).min(self.grid_width as i32 - 1);
        let y_start = self.world_to_grid(aabb.top).max(0);
        let y_end = self.world_to_grid(aabb.bottom).min(self.grid_height as i32 - 1);

        if x_start > x_end || y_start > y_end {
            return None;
        }
        Some((x_start, x_end, y_start, y_end))
    }

    /// Is the point inside an occupied cell? Negative and out-of-grid
    /// coordinates are never occupied.
    pub fn point_collides(&self, point: Vec2) -> bool {
        if point.x < 0.0 || point.y < 0.0 {
            return false;
        }

        let x = self.world_to_grid(point.x);
        let y = self.world_to_grid(point.y);

        if x >= self.grid_width as i32 || y >= self.grid_height as i32 {
            return false;
        }

        self.occupancy[x as usize][y as usize]
    }

    /// Does the box overlap any occupied cell?
    pub fn collides(&self, aabb: &Aabb) -> bool {
        let Some((x_start, x_end, y_start, y_end)) = self.clamped_span(aabb) else {
            return false;
        };

        for y in y_start..=y_end {
            for x in x_start..=x_end {
                if self.occupancy[x as usize][y as usize] {
                    return true;
                }
            }
        }
        false
    }

    /// Accumulated minimum-translation displacement against all occupied
    /// cells the box overlaps.
    ///
    /// Each cell contributes a single-axis push; a nonzero x overwrites the
    /// result's x, otherwise a nonzero y overwrites y. Later cells win, so
    /// a body straddling a seam can jitter; the engine calls this once per
    /// body per step and treats the result as authoritative for that step.
    pub fn displacement(&self, aabb: &Aabb) -> Vec2 {
        let Some((x_start, x_end, y_start, y_end)) = self.clamped_span(aabb) else {
            return Vec2::ZERO;
        };

        let mut displacement = Vec2::ZERO;
        for y in y_start..=y_end {
            for x in x_start..=x_end {
                if self.occupancy[x as usize][y as usize] {
                    let disp = single_displacement(&self.cell_aabb(x, y), aabb);

                    if disp.x != 0.0 {
                        displacement.x = disp.x;
                    } else if disp.y != 0.0 {
                        displacement.y = disp.y;
                    }
                }
            }
        }
        displacement
    }

    /// Largest unsigned per-axis overlap across all occupied intersecting
    /// cells. Classifies whether a body penetrates more in x or in y.
    pub fn overlap(&self, aabb: &Aabb) -> Vec2 {
        let Some((x_start, x_end, y_start, y_end)) = self.clamped_span(aabb) else {
            return Vec2::ZERO;
        };

        let mut largest = Vec2::ZERO;
        for y in y_start..=y_end {
            for x in x_start..=x_end {
                if self.occupancy[x as usize][y as usize] {
                    let o = overlap(&self.cell_aabb(x, y), aabb);
                    largest.x = largest.x.max(o.x);
                    largest.y = largest.y.max(o.y);
                }
            }
        }
        largest
    }
}
