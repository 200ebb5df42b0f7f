//! Shared moving-body physics
//!
//! Every walking entity (player, rat) owns a [`Body`]: a box under gravity
//! that collides with the occupancy grid, refuses to walk off ledges, and
//! can fly along a closed-form parabolic arc between two points. Entity
//! behavior lives in the entity types; the body is pure physics state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::aabb::Aabb;
use super::space::CollisionSpace;
use super::tween::Tween;

/// Horizontal facing, multiplies direction-scaled offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing toward a target x, keeping the current facing on a tie
    pub fn toward(current: Self, from_x: f32, to_x: f32) -> Self {
        if to_x < from_x {
            Facing::Left
        } else if to_x > from_x {
            Facing::Right
        } else {
            current
        }
    }
}

/// An in-flight parabolic jump
///
/// The arc is parameterized along the straight line from start to target:
/// a tween drives t from 0 to 1 over the flight duration, and the vertical
/// offset at horizontal distance x along that line is
/// `delta_y(x) = -5 (x / (v cos θ))² + x tan θ`
/// (projectile equation with g fixed at 10, so g/2 = 5). The launch speed v
/// is solved so the arc's range equals the straight-line distance exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpArc {
    start: Vec2,
    target: Vec2,
    tween: Tween,
    /// Range-adjusted launch speed multiplied by cos θ
    horizontal_speed: f32,
    tan_angle: f32,
}

impl JumpArc {
    /// Solve the arc between two distinct points. Returns `None` for a
    /// degenerate jump (zero distance, or an angle with sin·cos == 0)
    /// instead of propagating NaN into positions.
    pub fn solve(start: Vec2, target: Vec2, launch_angle: f32, jump_speed: f32) -> Option<Self> {
        let distance = start.distance(target);
        if distance <= FLOAT_TOLERANCE {
            return None;
        }

        let (sin, cos) = launch_angle.sin_cos();
        if (sin * cos).abs() <= f32::EPSILON {
            return None;
        }

        let duration = distance / jump_speed;
        // From the range equation R = v² sin(2θ) / g with g = 10:
        // the speed whose arc at θ spans exactly `distance`.
        let adjusted_speed = (5.0 * distance / (sin * cos)).sqrt();

        Some(Self {
            start,
            target,
            tween: Tween::new(0.0, 1.0, duration),
            horizontal_speed: adjusted_speed * cos,
            tan_angle: launch_angle.tan(),
        })
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Height of the arc above the straight line at distance x along it
    fn delta_y(&self, x: f32) -> f32 {
        let ratio = x / self.horizontal_speed;
        -5.0 * ratio * ratio + x * self.tan_angle
    }

    /// Advance the arc; returns the new position and whether it landed.
    /// On the landing step the position is the target exactly.
    pub fn update(&mut self, delta_secs: f32) -> (Vec2, bool) {
        let step = self.tween.update(delta_secs);
        if step.just_finished {
            return (self.target, true);
        }

        let flat = self.start.lerp(self.target, step.value);
        let delta_x = self.start.distance(flat);
        (Vec2::new(flat.x, flat.y - self.delta_y(delta_x)), false)
    }
}

/// Physics state shared by all mobile entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the bounding box
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Set when edge protection stopped horizontal motion this step
    pub blocked_by_edge: bool,
    /// At most one active jump; starting a new one overwrites silently
    pub jump: Option<JumpArc>,
}

impl Body {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            width,
            height,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            blocked_by_edge: false,
            jump: None,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.position.x, self.position.y, self.width, self.height)
    }

    /// Grounded means collision resolution zeroed vertical motion
    #[inline]
    pub fn grounded(&self) -> bool {
        self.velocity.y == 0.0
    }

    pub fn jumping(&self) -> bool {
        self.jump.is_some()
    }

    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity.y += GRAVITY * dt;
    }

    /// One integration step: move by velocity, resolve grid collisions,
    /// then apply edge protection. While a jump is active the arc owns the
    /// position; callers step the jump instead of integrating.
    pub fn integrate(&mut self, space: &CollisionSpace, dt: f32) {
        self.position.y += self.velocity.y * dt;
        // x is clamped at the world-left boundary only
        self.position.x = (self.position.x + self.velocity.x * dt).max(0.0);

        self.resolve_collisions(space);
        self.protect_edges(space);
    }

    fn resolve_collisions(&mut self, space: &CollisionSpace) {
        let displacement = space.displacement(&self.aabb());

        if displacement.y != 0.0 {
            self.velocity.y = 0.0;
            self.position.y += displacement.y;
        }

        if displacement.x != 0.0 {
            self.velocity.x = 0.0;
            self.position.x += displacement.x;
        }
    }

    /// Stop a grounded body from walking off a ledge: probe a point just
    /// below the leading bottom corner; if it is over empty space, zero
    /// horizontal velocity and snap back to the cell boundary.
    fn protect_edges(&mut self, space: &CollisionSpace) {
        if self.velocity.y != 0.0 {
            self.blocked_by_edge = false;
            return;
        }

        let bottom = self.position.y + self.height;

        if self.velocity.x < 0.0 {
            let left = self.position.x;
            let probe = Vec2::new(left, bottom + EDGE_CHECK);

            if !space.point_collides(probe) {
                self.velocity.x = 0.0;
                self.position.x += space.cell_size - left.rem_euclid(space.cell_size);
                self.blocked_by_edge = true;
            } else {
                self.blocked_by_edge = false;
            }
        } else if self.velocity.x > 0.0 {
            let right = self.position.x + self.width;
            let probe = Vec2::new(right, bottom + EDGE_CHECK);

            if !space.point_collides(probe) {
                self.velocity.x = 0.0;
                self.position.x -= right.rem_euclid(space.cell_size);
                self.blocked_by_edge = true;
            } else {
                self.blocked_by_edge = false;
            }
        }
    }

    /// Start a parabolic jump toward `target` (the body's destination
    /// top-left corner). Turns to face the target. A degenerate jump is a
    /// no-op; an already-active jump is overwritten without ceremony.
    ///
    /// Returns whether a jump actually started.
    pub fn start_jump(&mut self, target: Vec2) -> bool {
        self.facing = Facing::toward(self.facing, self.position.x, target.x);

        let up = target.y < self.position.y;
        let launch_angle = if up { UP_LAUNCH_ANGLE } else { DOWN_LAUNCH_ANGLE };
        let jump_speed = if up { UP_JUMP_SPEED } else { DOWN_JUMP_SPEED };

        match JumpArc::solve(self.position, target, launch_angle, jump_speed) {
            Some(arc) => {
                self.jump = Some(arc);
                true
            }
            None => {
                log::debug!(
                    "degenerate jump skipped: {:?} -> {:?}",
                    self.position,
                    target
                );
                false
            }
        }
    }

    /// Advance an active jump. Returns true on the step the body lands;
    /// the jump slot is cleared and the position snaps to the target.
    pub fn update_jump(&mut self, dt: f32) -> bool {
        let Some(arc) = self.jump.as_mut() else {
            return false;
        };

        let (position, landed) = arc.update(dt);
        self.position = position;

        if landed {
            self.jump = None;
        }
        landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FLOAT_TOLERANCE, SIM_DT};

    fn floor_space() -> CollisionSpace {
        // 20x10 grid, cell 10; solid floor row at y=5 under x=0..10 only,
        // so cells 10.. have a ledge at x=100.
        let mut space = CollisionSpace::new(20, 10, 10.0);
        for x in 0..10 {
            space.set_occupied(x, 5);
        }
        space
    }

    #[test]
    fn test_gravity_pulls_down_until_floor() {
        let space = floor_space();
        let mut body = Body::new(Vec2::new(20.0, 10.0), 10.0, 10.0);

        for _ in 0..600 {
            body.apply_gravity(SIM_DT);
            body.integrate(&space, SIM_DT);
        }

        // Resting on top of the floor row (world y = 50), not inside it
        assert!(body.grounded());
        assert!((body.position.y + body.height - 50.0).abs() < FLOAT_TOLERANCE);
    }

    #[test]
    fn test_left_world_boundary_clamp() {
        let space = floor_space();
        let mut body = Body::new(Vec2::new(1.0, 40.0), 10.0, 10.0);
        body.velocity.x = -100.0;
        body.integrate(&space, SIM_DT);
        assert_eq!(body.position.x, 0.0);
    }

    #[test]
    fn test_edge_protection_left() {
        // Floor on the right half only; the ledge edge is at x=100
        let mut space = CollisionSpace::new(20, 10, 10.0);
        for x in 10..20 {
            space.set_occupied(x, 5);
        }

        let mut body = Body::new(Vec2::new(100.5, 40.0), 10.0, 10.0);
        body.velocity.x = -50.0;
        body.integrate(&space, SIM_DT);

        // Left edge crossed x=100 onto the empty cell: velocity zeroed,
        // snapped back so the left edge sits exactly on the boundary.
        assert_eq!(body.velocity.x, 0.0);
        assert!(body.blocked_by_edge);
        assert!((body.position.x - 100.0).abs() < FLOAT_TOLERANCE);
    }

    #[test]
    fn test_edge_protection_right() {
        let space = floor_space();
        // Walking right toward the ledge at x=100: body right edge crosses
        // into empty-probe territory and snaps back to the cell boundary.
        let mut body = Body::new(Vec2::new(87.0, 40.0), 10.0, 10.0);
        body.velocity.x = 200.0;
        body.integrate(&space, SIM_DT);

        assert_eq!(body.velocity.x, 0.0);
        assert!(body.blocked_by_edge);
        // right edge lands exactly on a multiple of the cell size
        let right = body.position.x + body.width;
        assert!((right - 100.0).abs() < FLOAT_TOLERANCE || (right - 90.0).abs() < FLOAT_TOLERANCE);
    }

    #[test]
    fn test_edge_protection_only_when_grounded() {
        let space = floor_space();
        let mut body = Body::new(Vec2::new(103.0, 20.0), 10.0, 10.0);
        body.velocity.x = -50.0;
        body.velocity.y = 10.0; // falling
        body.integrate(&space, SIM_DT);
        assert!(!body.blocked_by_edge);
        assert!(body.velocity.x != 0.0);
    }

    #[test]
    fn test_jump_lands_exactly_on_target() {
        let mut body = Body::new(Vec2::new(10.0, 100.0), 10.0, 10.0);
        let target = Vec2::new(130.0, 40.0);
        assert!(body.start_jump(target));

        let mut landed = false;
        for _ in 0..10_000 {
            if body.update_jump(SIM_DT) {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert_eq!(body.position, target);
        assert!(!body.jumping());
    }

    #[test]
    fn test_jump_arc_rises_above_straight_line() {
        // Level jump from (0,0) to (100,0) at the down angle (20°):
        // halfway through, the arc must sit above the line (negative y).
        let mut arc = JumpArc::solve(
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            DOWN_LAUNCH_ANGLE,
            150.0,
        )
        .unwrap();

        let duration = 100.0 / 150.0;
        let (mid, landed) = arc.update(duration / 2.0);
        assert!(!landed);
        assert!((mid.x - 50.0).abs() < 0.01);
        assert!(mid.y < 0.0);
    }

    #[test]
    fn test_zero_distance_jump_is_noop() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), 10.0, 10.0);
        assert!(!body.start_jump(Vec2::new(10.0, 10.0)));
        assert!(!body.jumping());
    }

    #[test]
    fn test_degenerate_angle_rejected() {
        assert!(JumpArc::solve(Vec2::ZERO, Vec2::new(50.0, 0.0), 0.0, 100.0).is_none());
        assert!(
            JumpArc::solve(
                Vec2::ZERO,
                Vec2::new(50.0, 0.0),
                std::f32::consts::FRAC_PI_2,
                100.0
            )
            .is_none()
        );
    }

    #[test]
    fn test_new_jump_overwrites_active_one() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 10.0);
        body.start_jump(Vec2::new(100.0, -50.0));
        let first_target = body.jump.as_ref().unwrap().target();

        body.start_jump(Vec2::new(-60.0, 30.0));
        let second_target = body.jump.as_ref().unwrap().target();
        assert_ne!(first_target, second_target);
        assert_eq!(body.facing, Facing::Left);
    }

    #[test]
    fn test_facing_follows_jump_direction() {
        let mut body = Body::new(Vec2::new(50.0, 50.0), 10.0, 10.0);
        body.start_jump(Vec2::new(0.0, 50.0));
        assert_eq!(body.facing, Facing::Left);
        body.jump = None;
        body.start_jump(Vec2::new(90.0, 50.0));
        assert_eq!(body.facing, Facing::Right);
    }
}
