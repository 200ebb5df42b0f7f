//! Rat entity
//!
//! Rats wander horizontally, panic when the player gets close, and flee.
//! A fleeing rat that runs out of floor (wall or protected ledge) consults
//! the move-area index and jumps away from the player. Touching the player
//! captures the rat.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::aabb::Aabb;
use super::body::{Body, Facing};
use super::move_area::MoveAreaIndex;
use super::player::Player;
use super::space::CollisionSpace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rat {
    pub id: u32,
    pub body: Body,
    pub captured: bool,
    speed: f32,
    being_chased: bool,
    /// Blocked either by an edge or a wall
    blocked: bool,
    stopped_time: f32,
    panic_time_left: f32,
    jump_cooldown: f32,
}

impl Rat {
    pub fn new(id: u32, position: Vec2) -> Self {
        Self {
            id,
            body: Body::new(position, RAT_WIDTH, RAT_HEIGHT),
            captured: false,
            speed: RAT_WALK_SPEED,
            being_chased: false,
            blocked: false,
            stopped_time: 0.0,
            panic_time_left: 0.0,
            jump_cooldown: 0.0,
        }
    }

    /// Panicked rats show the scared indicator and run instead of walking
    pub fn panicking(&self) -> bool {
        self.panic_time_left > 0.0
    }

    /// The hitbox used for move-area queries, aligned to facing like the
    /// player's
    pub fn interact_aabb(&self) -> Aabb {
        let body = &self.body;
        if body.facing == Facing::Right {
            Aabb::from_rect(
                body.position.x + (body.width - PLAYER_INTERACT_WIDTH).max(0.0),
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

    /// One fixed step. Returns true when this rat was captured this step.
    pub fn fixed_update<R: Rng + ?Sized>(
        &mut self,
        space: &CollisionSpace,
        areas: &MoveAreaIndex,
        player: &Player,
        rng: &mut R,
        dt: f32,
    ) -> bool {
        if self.body.jumping() {
            let landed = self.body.update_jump(dt);
            if landed {
                self.jump_cooldown = RAT_JUMP_COOLDOWN;
                self.blocked = false;
            }
            return false;
        }

        if self.touching_player(player) {
            self.captured = true;
            log::info!("rat {} captured", self.id);
            return true;
        }

        self.update_being_chased(player);
        if self.being_chased {
            self.panic_time_left = RAT_PANIC_TIME;
        }
        if self.panic_time_left > 0.0 {
            self.panic_time_left -= dt;
        }
        if self.jump_cooldown > 0.0 {
            self.jump_cooldown -= dt;
        }

        self.move_horizontally(areas, player, rng);

        self.body.apply_gravity(dt);
        self.body.integrate(space, dt);

        if self.body.velocity.x == 0.0 {
            self.stopped_time += dt;
        } else {
            self.stopped_time = 0.0;
        }
        self.blocked = self.stopped_time > RAT_STOPPED_THRESHOLD;

        false
    }

    fn touching_player(&self, player: &Player) -> bool {
        self.body.aabb().colliding(&player.body.aabb())
    }

    /// Player proximity test between feet lines
    fn update_being_chased(&mut self, player: &Player) {
        let player_feet = player.body.position.y + player.body.height;
        let rat_feet = self.body.position.y + self.body.height;

        if (player_feet - rat_feet).abs() > RAT_PLAYER_DETECTION_Y {
            // player is too high or too low
            self.being_chased = false;
        } else if player.body.position.x < self.body.position.x {
            // player is to the left
            let gap = self.body.position.x - (player.body.position.x + player.body.width);
            self.being_chased = gap < RAT_PLAYER_DETECTION_X;
        } else {
            // player is to the right
            let gap = player.body.position.x - (self.body.position.x + self.body.width);
            self.being_chased = gap < RAT_PLAYER_DETECTION_X;
        }
    }

    fn move_horizontally<R: Rng + ?Sized>(
        &mut self,
        areas: &MoveAreaIndex,
        player: &Player,
        rng: &mut R,
    ) {
        self.speed = if self.panic_time_left > 0.0 {
            RAT_RUN_SPEED
        } else {
            RAT_WALK_SPEED
        };

        if self.being_chased {
            let player_almost_same_level = self.player_almost_same_level(player);

            // flee horizontally when the player shares the level
            if player_almost_same_level {
                let away = if player.body.position.x < self.body.position.x {
                    Facing::Right
                } else {
                    Facing::Left
                };
                self.body.facing = away;
            }

            if self.blocked && self.jump_cooldown <= 0.0 {
                self.try_escape_jump(areas, player, player_almost_same_level, rng);
            }
        }

        if self.blocked && !self.body.jumping() {
            // cornered: turn around and keep moving
            self.body.facing = self.body.facing.flipped();
            self.blocked = false;
        }

        self.body.velocity.x = self.speed * self.body.facing.sign();
    }

    /// Mirrors the y-interval collision test with extra slack
    fn player_almost_same_level(&self, player: &Player) -> bool {
        let p = &player.body;
        let r = &self.body;
        r.position.y + r.height + RAT_PLAYER_SAME_LEVEL_MARGIN > p.position.y
            && r.position.y - RAT_PLAYER_SAME_LEVEL_MARGIN < p.position.y + p.height
    }

    /// Jump through the nearest move area away from the player: same level
    /// checks both directions in random order, otherwise only the one that
    /// increases separation.
    fn try_escape_jump<R: Rng + ?Sized>(
        &mut self,
        areas: &MoveAreaIndex,
        player: &Player,
        player_almost_same_level: bool,
        rng: &mut R,
    ) {
        let Some(area) = areas.query_containing(&self.interact_aabb()) else {
            return;
        };

        let targets: [Option<Vec2>; 2] = if player_almost_same_level {
            let mut pair = [
                area.down_target_for(&self.body),
                area.up_target_for(&self.body),
            ];
            if rng.random_bool(0.5) {
                pair.reverse();
            }
            pair
        } else if player.body.position.y + player.body.height
            < self.body.position.y + self.body.height
        {
            // player above: only drop down
            [area.down_target_for(&self.body), None]
        } else {
            // player below: only climb up
            [area.up_target_for(&self.body), None]
        };

        for target in targets.into_iter().flatten() {
            if self.body.start_jump(target) {
                self.stopped_time = 0.0;
                self.blocked = false;
                break;
            }
        }
    }
}
