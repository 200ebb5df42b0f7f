//! Catwalk - a side-scrolling building scene
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid collision, gravity, parabolic
//!   jumps, move-area index, player and rat behavior)
//! - `level`: Hand-authored and JSON level definitions
//!
//! Rendering, input polling and audio are external collaborators; the crate
//! only reports positions, boxes and facing per fixed tick.

pub mod level;
pub mod sim;

pub use level::Level;
pub use sim::{Scene, SceneEvent, TickInput, tick};

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Comparison tolerance for world-space floats
    pub const FLOAT_TOLERANCE: f32 = 0.001;

    /// Downward acceleration applied to every falling body (px/s²)
    pub const GRAVITY: f32 = 300.0;

    /// Collision grid cell size in world units
    pub const CELL_SIZE: f32 = 30.0;

    /// How far below a body's bottom edge the ledge probe samples
    pub const EDGE_CHECK: f32 = 0.1;

    /// Player body size (the sprite is larger; this is the physics box)
    pub const PLAYER_WIDTH: f32 = 56.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    /// Narrower box used for move-area and rat interaction tests
    pub const PLAYER_INTERACT_WIDTH: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Seconds of standing still before control hints show
    pub const PLAYER_CONTROLS_IDLE_THRESHOLD: f32 = 8.0;

    /// Fixed launch speeds for the two jump directions (px/s)
    pub const UP_JUMP_SPEED: f32 = 300.0;
    pub const DOWN_JUMP_SPEED: f32 = 400.0;
    /// Fixed launch angles: 60 degrees up, 20 degrees down
    pub const UP_LAUNCH_ANGLE: f32 = 1.0472;
    pub const DOWN_LAUNCH_ANGLE: f32 = 0.349066;

    /// Rat body and AI tuning
    pub const RAT_WIDTH: f32 = 24.0;
    pub const RAT_HEIGHT: f32 = 16.0;
    pub const RAT_WALK_SPEED: f32 = 60.0;
    pub const RAT_RUN_SPEED: f32 = 160.0;
    /// Seconds of panic after the player was last seen nearby
    pub const RAT_PANIC_TIME: f32 = 2.0;
    /// Horizontal / vertical detection range, measured between feet lines
    pub const RAT_PLAYER_DETECTION_X: f32 = 120.0;
    pub const RAT_PLAYER_DETECTION_Y: f32 = 30.0;
    /// Extra slack when deciding whether the player stands on the same level
    pub const RAT_PLAYER_SAME_LEVEL_MARGIN: f32 = 8.0;
    /// Seconds at zero horizontal velocity before a rat counts as blocked
    pub const RAT_STOPPED_THRESHOLD: f32 = 0.5;
    pub const RAT_JUMP_COOLDOWN: f32 = 1.5;

    /// Shovable pot body size
    pub const POT_WIDTH: f32 = 20.0;
    pub const POT_HEIGHT: f32 = 15.0;
    /// Downward speed above which a pot counts as falling (and will
    /// shatter on the next floor instead of landing)
    pub const POT_FALL_SPEED_THRESHOLD: f32 = 50.0;
}
