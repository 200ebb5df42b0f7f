//! Core simulation tick

use super::player::PlayerInput;
use super::scene::{Scene, SceneEvent};
use crate::consts::SIM_DT;

/// Input sampled by the host for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump_up: bool,
    pub jump_down: bool,
}

impl TickInput {
    fn player(&self) -> PlayerInput {
        PlayerInput {
            left: self.left,
            right: self.right,
            jump_up: self.jump_up,
            jump_down: self.jump_down,
        }
    }
}

/// Advance the scene by one fixed step.
///
/// Order: events queued between ticks (spawns) are delivered first, then
/// the player moves, then every rat against the player's new position,
/// then the pots, then captured rats are dropped. Events come back in the
/// order they happened.
pub fn tick(scene: &mut Scene, input: &TickInput) -> Vec<SceneEvent> {
    let mut events = scene.drain_pending_events();

    let Scene {
        space,
        areas,
        player,
        rats,
        pots,
        rng_state,
        ..
    } = scene;

    if player.fixed_update(space, areas, &input.player(), SIM_DT) {
        events.push(SceneEvent::PlayerJumped);
    }

    let mut rng = rng_state.next_rng();
    for rat in rats.iter_mut() {
        if rat.fixed_update(space, areas, player, &mut rng, SIM_DT) {
            events.push(SceneEvent::RatCaptured { id: rat.id });
        }
    }

    for id in super::shovable::update_pots(pots, space, &player.body.aabb(), SIM_DT) {
        events.push(SceneEvent::PotShattered { id });
    }

    let captured = events
        .iter()
        .filter(|e| matches!(e, SceneEvent::RatCaptured { .. }))
        .count() as u32;
    if captured > 0 {
        scene.captured_count += captured;
        scene.remove_captured_rats();
    }

    scene.time_ticks += 1;
    events
}
