//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Screen coordinates throughout: y increases downward, so "up" means a
//! smaller y and gravity is a positive y acceleration.

pub mod aabb;
pub mod body;
pub mod collision;
pub mod move_area;
pub mod player;
pub mod rat;
pub mod scene;
pub mod shovable;
pub mod space;
pub mod tick;
pub mod tween;

pub use aabb::Aabb;
pub use body::{Body, Facing, JumpArc};
pub use collision::{overlap, single_displacement, single_displacement_x};
pub use move_area::{MoveArea, MoveAreaIndex, Target, WorldTarget};
pub use player::{Player, PlayerInput};
pub use rat::Rat;
pub use scene::{Scene, SceneEvent};
pub use shovable::Pot;
pub use space::CollisionSpace;
pub use tick::{TickInput, tick};
pub use tween::{Easing, Tween, TweenStep};
