//! Axis-aligned bounding boxes
//!
//! A box is stored as its four edges. Callers supply correctly ordered
//! edges (`left <= right`, `top <= bottom`); construction does not reorder.
//! All overlap tests are strict: boxes sharing an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, x + width, y, y + height)
    }

    /// Build from an inclusive span of grid cells
    pub fn from_grid(x_start: i32, y_start: i32, x_end: i32, y_end: i32, cell_size: f32) -> Self {
        Self::new(
            x_start as f32 * cell_size,
            (x_end + 1) as f32 * cell_size,
            y_start as f32 * cell_size,
            (y_end + 1) as f32 * cell_size,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strict overlap on both axes
    pub fn colliding(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.bottom > other.top
            && self.top < other.bottom
    }

    /// Strict overlap of the y-intervals only
    #[inline]
    pub fn colliding_y(&self, other: &Aabb) -> bool {
        self.bottom > other.top && self.top < other.bottom
    }

    /// Strict overlap of the x-intervals only
    #[inline]
    pub fn colliding_x(&self, other: &Aabb) -> bool {
        self.left < other.right && self.right > other.left
    }

    /// Strict interior test (points on an edge are outside)
    pub fn contains(&self, point: Vec2) -> bool {
        point.y > self.top && point.y < self.bottom && point.x > self.left && point.x < self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rect() {
        let b = Aabb::from_rect(10.0, 20.0, 5.0, 8.0);
        assert_eq!(b.left, 10.0);
        assert_eq!(b.right, 15.0);
        assert_eq!(b.top, 20.0);
        assert_eq!(b.bottom, 28.0);
    }

    #[test]
    fn test_from_grid_inclusive_span() {
        // Cells 2..=4 in x at cell size 10 cover world [20, 50)
        let b = Aabb::from_grid(2, 3, 4, 3, 10.0);
        assert_eq!(b.left, 20.0);
        assert_eq!(b.right, 50.0);
        assert_eq!(b.top, 30.0);
        assert_eq!(b.bottom, 40.0);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(10.0, 0.0, 10.0, 10.0);
        assert!(!a.colliding(&b));
        assert!(!b.colliding(&a));

        let below = Aabb::from_rect(0.0, 10.0, 10.0, 10.0);
        assert!(!a.colliding(&below));
    }

    #[test]
    fn test_overlapping_boxes_collide() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(5.0, 5.0, 10.0, 10.0);
        assert!(a.colliding(&b));
        assert!(b.colliding(&a));
    }

    #[test]
    fn test_axis_tests_split_the_full_test() {
        // Overlap in y but not x
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(20.0, 5.0, 10.0, 10.0);
        assert!(a.colliding_y(&b));
        assert!(!a.colliding_x(&b));
        assert!(!a.colliding(&b));
    }

    #[test]
    fn test_contains_is_strict() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains(Vec2::new(5.0, 5.0)));
        assert!(!a.contains(Vec2::new(0.0, 5.0)));
        assert!(!a.contains(Vec2::new(5.0, 10.0)));
    }
}
