//! Scene state
//!
//! The complete simulation state for one level run: collision space, move
//! areas, player, rats, seeded RNG and the tick counter. Deterministic for
//! a given seed and input sequence, and serializable for snapshots.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{
    POT_HEIGHT, RAT_HEIGHT, RAT_PLAYER_DETECTION_X, RAT_PLAYER_DETECTION_Y, RAT_WIDTH,
};
use crate::level::Level;

use super::move_area::MoveAreaIndex;
use super::player::Player;
use super::rat::Rat;
use super::shovable::Pot;
use super::space::CollisionSpace;

/// Gameplay events raised during a tick, for the host to react to
/// (sound, score, UI). The simulation itself never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEvent {
    PlayerJumped,
    RatSpawned { id: u32 },
    RatCaptured { id: u32 },
    PotShattered { id: u32 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Each draw bumps the stream so replays stay deterministic without
    /// serializing the generator itself
    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream = self.stream.wrapping_add(1);
        Pcg32::new(self.seed, self.stream)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub space: CollisionSpace,
    pub areas: MoveAreaIndex,
    pub player: Player,
    /// Active rats (sorted by id for determinism)
    pub rats: Vec<Rat>,
    /// Shovable pots still standing or falling
    pub pots: Vec<Pot>,
    /// Total rats captured this run
    pub captured_count: u32,
    next_id: u32,
    /// Events raised outside a tick (spawns), delivered by the next tick
    pending_events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new(level: &Level, seed: u64) -> Self {
        let space = level.collision_space();
        let areas = level.move_area_index();

        log::info!(
            "scene: {}x{} grid, {} move areas, seed {}",
            space.grid_width,
            space.grid_height,
            areas.len(),
            seed
        );

        let mut scene = Self {
            seed,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            space,
            areas,
            player: Player::new(level.player_spawn),
            rats: Vec::new(),
            pots: Vec::new(),
            captured_count: 0,
            next_id: 1,
            pending_events: Vec::new(),
        };

        for &(x, y) in &level.pots {
            let id = scene.next_entity_id();
            // resting on the floor of its ledge
            let position = Vec2::new(
                x as f32 * level.cell_size,
                y as f32 * level.cell_size + POT_HEIGHT,
            );
            scene.pots.push(Pot::new(id, position, y));
        }

        scene
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a rat at an explicit position
    pub fn spawn_rat(&mut self, position: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.rats.push(Rat::new(id, position));
        self.pending_events.push(SceneEvent::RatSpawned { id });
        log::debug!("rat {id} spawned at {position:?}");
        id
    }

    /// Events raised since the last tick, oldest first
    pub(crate) fn drain_pending_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Spawn a rat standing on a random move area's floor, retrying a few
    /// times to land outside the player's detection range. Returns `None`
    /// when the level has no move areas.
    pub fn spawn_rat_away_from_player(&mut self) -> Option<u32> {
        let mut rng = self.rng_state.next_rng();

        let mut position = None;
        for _ in 0..8 {
            let area = self.areas.pick_random(&mut rng)?;
            let aabb = &area.aabb;

            let max_x = (aabb.right - RAT_WIDTH).max(aabb.left);
            let x = rng.random_range(aabb.left..=max_x);
            let candidate = Vec2::new(x, aabb.bottom - RAT_HEIGHT);

            position = Some(candidate);
            if !self.near_player(candidate) {
                break;
            }
        }

        position.map(|p| self.spawn_rat(p))
    }

    fn near_player(&self, position: Vec2) -> bool {
        let body = &self.player.body;
        (position.x - body.position.x).abs() < RAT_PLAYER_DETECTION_X * 2.0
            && (position.y - body.position.y).abs() < RAT_PLAYER_DETECTION_Y * 2.0
    }

    /// Drop captured rats after a tick has recorded their events
    pub fn remove_captured_rats(&mut self) {
        self.rats.retain(|rat| !rat.captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_HEIGHT;

    #[test]
    fn test_scene_from_building_level() {
        let level = Level::building();
        let scene = Scene::new(&level, 7);
        assert_eq!(scene.time_ticks, 0);
        assert!(scene.rats.is_empty());
        assert_eq!(scene.pots.len(), level.pots.len());
        assert_eq!(scene.player.body.position, level.player_spawn);
        assert_eq!(scene.player.body.height, PLAYER_HEIGHT);
    }

    #[test]
    fn test_pots_spawn_resting_on_their_ledge_floor() {
        let level = Level::building();
        let scene = Scene::new(&level, 7);
        for (pot, &(x, y)) in scene.pots.iter().zip(level.pots.iter()) {
            assert_eq!(pot.spawn_row, y);
            let aabb = pot.aabb();
            assert_eq!(aabb.left, x as f32 * level.cell_size);
            // bottom edge flush with the floor row under the ledge
            assert_eq!(aabb.bottom, (y + 1) as f32 * level.cell_size);
            assert!(!scene.space.collides(&aabb));
        }
    }

    #[test]
    fn test_spawn_queues_a_spawned_event() {
        let level = Level::building();
        let mut scene = Scene::new(&level, 7);
        let id = scene.spawn_rat(Vec2::new(100.0, 100.0));
        let events = scene.drain_pending_events();
        assert_eq!(events, vec![SceneEvent::RatSpawned { id }]);
        // draining empties the queue
        assert!(scene.drain_pending_events().is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let level = Level::building();
        let mut scene = Scene::new(&level, 7);
        let a = scene.spawn_rat(Vec2::new(100.0, 100.0));
        let b = scene.spawn_rat(Vec2::new(200.0, 100.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_spawn_is_deterministic() {
        let level = Level::building();
        let mut first = Scene::new(&level, 42);
        let mut second = Scene::new(&level, 42);

        first.spawn_rat_away_from_player().expect("spawn");
        second.spawn_rat_away_from_player().expect("spawn");
        assert_eq!(first.rats[0].body.position, second.rats[0].body.position);
    }

    #[test]
    fn test_random_spawn_rests_on_area_floor() {
        let level = Level::building();
        let mut scene = Scene::new(&level, 9);
        scene.spawn_rat_away_from_player().expect("spawn");

        let rat = &scene.rats[0];
        let feet = rat.body.position.y + rat.body.height;
        // feet must align with some area's bottom edge
        assert!(
            scene.areas.iter().any(|area| area.aabb.bottom == feet),
            "rat feet at {feet} do not sit on any area floor"
        );
    }

    #[test]
    fn test_remove_captured_rats() {
        let level = Level::building();
        let mut scene = Scene::new(&level, 7);
        scene.spawn_rat(Vec2::new(100.0, 100.0));
        scene.spawn_rat(Vec2::new(200.0, 100.0));
        scene.rats[0].captured = true;

        scene.remove_captured_rats();
        assert_eq!(scene.rats.len(), 1);
        assert_eq!(scene.rats[0].id, 2);
    }
}
