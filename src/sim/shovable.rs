//! Shovable pots
//!
//! Pots sit on ledges and can be shoved sideways by the player or by other
//! pots. A grounded pot falls off the ledge once shoved past it; after
//! enough free fall it counts as falling and shatters on the next floor it
//! hits, or despawns once it drops below the world. Pots never push the
//! player back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, POT_FALL_SPEED_THRESHOLD, POT_HEIGHT, POT_WIDTH};

use super::aabb::Aabb;
use super::collision::single_displacement_x;
use super::space::CollisionSpace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pot {
    pub id: u32,
    /// Top-left corner in world units
    pub position: Vec2,
    pub y_velocity: f32,
    pub falling: bool,
    /// Grid row the pot was placed on; pots only shove each other within
    /// the same row
    pub spawn_row: i32,
}

impl Pot {
    pub fn new(id: u32, position: Vec2, spawn_row: i32) -> Self {
        Self {
            id,
            position,
            y_velocity: 0.0,
            falling: false,
            spawn_row,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.position.x, self.position.y, POT_WIDTH, POT_HEIGHT)
    }
}

/// Advance every pot by one fixed step and drop the ones that shattered or
/// left the world. Returns the ids of the pots that shattered.
///
/// Per pot: gravity, then (while grounded) shoves from same-row pots and
/// the player, then environment displacement. A vertical displacement
/// zeroes the fall speed, so a resting pot never trips the falling
/// threshold. A falling pot skips all resolution; it either shatters when
/// its deepest penetration is vertical, or keeps dropping.
pub fn update_pots(
    pots: &mut Vec<Pot>,
    space: &CollisionSpace,
    player_aabb: &Aabb,
    dt: f32,
) -> Vec<u32> {
    let mut shattered = Vec::new();
    let mut gone = Vec::new();

    for i in 0..pots.len() {
        {
            let pot = &mut pots[i];
            pot.y_velocity += GRAVITY * dt;
            pot.position.y += pot.y_velocity * dt;
        }

        if !pots[i].falling {
            for j in 0..pots.len() {
                if j == i || pots[j].spawn_row != pots[i].spawn_row {
                    continue;
                }
                let other = pots[j].aabb();
                let aabb = pots[i].aabb();
                if other.colliding(&aabb) {
                    let push = single_displacement_x(&other, &aabb);
                    pots[i].position.x += push.x;
                }
            }

            let aabb = pots[i].aabb();
            if player_aabb.colliding(&aabb) {
                let push = single_displacement_x(player_aabb, &aabb);
                pots[i].position.x += push.x;
            }

            let displacement = space.displacement(&pots[i].aabb());
            let pot = &mut pots[i];
            if displacement.y != 0.0 {
                pot.y_velocity = 0.0;
                pot.position.y += displacement.y;
            }
            pot.position.x += displacement.x;

            if pot.y_velocity > POT_FALL_SPEED_THRESHOLD {
                pot.falling = true;
            }
        } else {
            let aabb = pots[i].aabb();

            if aabb.top > space.world_height {
                log::debug!("pot {} fell out of the world", pots[i].id);
                gone.push(pots[i].id);
            } else if space.collides(&aabb) {
                let overlap = space.overlap(&aabb);
                // vertical impacts shatter; a sideways graze wedges past
                if overlap.y < overlap.x {
                    pots[i].position.y -= overlap.y;
                    log::debug!("pot {} shattered", pots[i].id);
                    shattered.push(pots[i].id);
                }
            }
        }
    }

    pots.retain(|pot| !shattered.contains(&pot.id) && !gone.contains(&pot.id));
    shattered
}
