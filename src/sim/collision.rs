//! Minimum-translation collision primitives
//!
//! These operate on a pair of boxes already known to overlap and compute
//! how far the pushed box must move to separate. The axis with the smaller
//! penetration wins; ties resolve vertically. This heuristic is not exact
//! for concave multi-cell arrangements; see `CollisionSpace::displacement`
//! for how per-cell results are combined.

use glam::Vec2;

use super::aabb::Aabb;

/// Minimum single-axis translation that separates `pushed` from `stat`.
///
/// Candidate penetration depths, in screen coordinates (y down):
/// pushing the box left, right, up or down out of the obstacle.
/// Assumes the boxes overlap; garbage in, garbage out otherwise.
pub fn single_displacement(stat: &Aabb, pushed: &Aabb) -> Vec2 {
    let left = pushed.right - stat.left;
    let right = stat.right - pushed.left;

    // canvas coordinates: lower values are up
    let up = pushed.bottom - stat.top;
    let down = stat.bottom - pushed.top;

    if left.min(right) < up.min(down) {
        if left < right {
            Vec2::new(-left, 0.0)
        } else {
            Vec2::new(right, 0.0)
        }
    } else if up < down {
        Vec2::new(0.0, -up)
    } else {
        Vec2::new(0.0, down)
    }
}

/// Like [`single_displacement`] but the resolution MUST be horizontal
pub fn single_displacement_x(stat: &Aabb, pushed: &Aabb) -> Vec2 {
    let left = pushed.right - stat.left;
    let right = stat.right - pushed.left;

    if left < right {
        Vec2::new(-left, 0.0)
    } else {
        Vec2::new(right, 0.0)
    }
}

/// Unsigned penetration depth per axis between two overlapping boxes
pub fn overlap(a: &Aabb, b: &Aabb) -> Vec2 {
    let left = b.right - a.left;
    let right = a.right - b.left;

    let up = b.bottom - a.top;
    let down = a.bottom - b.top;

    Vec2::new(left.min(right), up.min(down))
}
