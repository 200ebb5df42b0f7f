//! Player entity
//!
//! A body driven by directional input plus jump triggers. Input is locked
//! for the duration of a jump tween; the move-area index is consulted
//! through a narrower "interact" box aligned to the facing side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::aabb::Aabb;
use super::body::{Body, Facing};
use super::move_area::MoveAreaIndex;
use super::space::CollisionSpace;

/// Boolean input sampled by the host each tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Left movement key held
    pub left: bool,
    /// Right movement key held
    pub right: bool,
    /// Upward jump key held
    pub jump_up: bool,
    /// Downward jump key held
    pub jump_down: bool,
}

impl PlayerInput {
    /// -1, 0 or +1 from the held direction keys
    pub fn x_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Seconds spent standing still; drives the control-hint display
    pub idle_time: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            body: Body::new(position, PLAYER_WIDTH, PLAYER_HEIGHT),
            // start idle so hosts show hints right away
            idle_time: PLAYER_CONTROLS_IDLE_THRESHOLD + 1.0,
        }
    }

    /// Input is ignored while a jump tween owns the body
    pub fn input_locked(&self) -> bool {
        self.body.jumping()
    }

    /// Whether the host should display movement hints
    pub fn show_controls(&self) -> bool {
        self.idle_time > PLAYER_CONTROLS_IDLE_THRESHOLD
    }

    /// The narrower hitbox used for move-area and rat interaction,
    /// aligned to the side the player faces
    pub fn interact_aabb(&self) -> Aabb {
        let body = &self.body;
        if body.facing == Facing::Right {
            Aabb::from_rect(
                body.position.x + (body.width - PLAYER_INTERACT_WIDTH),
                body.position.y,
                PLAYER_INTERACT_WIDTH,
                body.height,
            )
        } else {
            Aabb::from_rect(
                body.position.x,
                body.position.y,
                PLAYER_INTERACT_WIDTH,
                body.height,
            )
        }
    }

    /// One fixed step. Returns true when a jump was started this step.
    pub fn fixed_update(
        &mut self,
        space: &CollisionSpace,
        areas: &MoveAreaIndex,
        input: &PlayerInput,
        dt: f32,
    ) -> bool {
        if self.input_locked() {
            let landed = self.body.update_jump(dt);
            if landed {
                self.idle_time = 0.0;
            }
            return false;
        }

        self.move_horizontally(input);

        self.body.apply_gravity(dt);
        self.body.integrate(space, dt);

        if self.body.velocity.x == 0.0 {
            self.idle_time += dt;
        } else {
            self.idle_time = 0.0;
        }

        self.try_jump(areas, input)
    }

    fn move_horizontally(&mut self, input: &PlayerInput) {
        self.body.velocity.x = input.x_axis() * PLAYER_SPEED;

        if self.body.velocity.x > 0.0 {
            self.body.facing = Facing::Right;
        } else if self.body.velocity.x < 0.0 {
            self.body.facing = Facing::Left;
        }
    }

    /// If standing in a move area and a jump key is held, resolve the
    /// matching target and launch
    fn try_jump(&mut self, areas: &MoveAreaIndex, input: &PlayerInput) -> bool {
        if !input.jump_up && !input.jump_down {
            return false;
        }

        let Some(area) = areas.query_containing(&self.interact_aabb()) else {
            return false;
        };

        if input.jump_down
            && let Some(target) = area.down_target_for(&self.body)
            && self.body.start_jump(target)
        {
            log::debug!("player jump down -> {target:?}");
            self.idle_time = 0.0;
            return true;
        }

        if input.jump_up
            && let Some(target) = area.up_target_for(&self.body)
            && self.body.start_jump(target)
        {
            log::debug!("player jump up -> {target:?}");
            self.idle_time = 0.0;
            return true;
        }

        false
    }
}
