//! Catwalk entry point
//!
//! Headless demo: builds the building scene, spawns a few rats and runs a
//! scripted input sequence at the fixed timestep, logging what happens.

use catwalk::consts::SIM_DT;
use catwalk::sim::{SceneEvent, TickInput, tick};
use catwalk::{Level, Scene};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xCA7);

    let level = Level::building();
    let mut scene = Scene::new(&level, seed);
    log::info!("catwalk demo starting with seed {seed}");

    for _ in 0..3 {
        if let Some(id) = scene.spawn_rat_away_from_player() {
            log::info!("rat {id} spawned");
        }
    }

    // 30 seconds of scripted play: pace the roof, then hop down a level
    // and keep pacing
    let total_ticks = (30.0 / SIM_DT) as u64;
    for i in 0..total_ticks {
        let second = i as f32 * SIM_DT;
        let input = script(second);

        for event in tick(&mut scene, &input) {
            match event {
                SceneEvent::PlayerJumped => log::info!("[{second:6.2}s] player jumped"),
                SceneEvent::RatCaptured { id } => log::info!("[{second:6.2}s] caught rat {id}"),
                SceneEvent::RatSpawned { id } => log::info!("[{second:6.2}s] rat {id} spawned"),
                SceneEvent::PotShattered { id } => log::info!("[{second:6.2}s] pot {id} broke"),
            }
        }

        if i % 60 == 0 {
            let pos = scene.player.body.position;
            log::debug!(
                "[{second:6.2}s] player at ({:.1}, {:.1}), {} rats",
                pos.x,
                pos.y,
                scene.rats.len()
            );
        }
    }

    println!(
        "done: {} ticks, {} rats caught, {} still loose, {} pots standing",
        scene.time_ticks,
        scene.captured_count,
        scene.rats.len(),
        scene.pots.len()
    );
}

fn script(second: f32) -> TickInput {
    let mut input = TickInput::default();
    match second {
        s if s < 3.0 => input.right = true,
        s if s < 6.0 => input.left = true,
        s if s < 6.1 => input.jump_down = true,
        s if s < 12.0 => input.right = true,
        s if s < 12.1 => input.jump_down = true,
        s if s < 20.0 => input.left = true,
        _ => input.right = true,
    }
    input
}
