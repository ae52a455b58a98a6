//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` passed to each tick
//! - Seeded RNG only (passed in by the caller)
//! - Stable iteration order (projectiles by index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod ramp;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{first_overlap, overlaps};
pub use ramp::DifficultyRamp;
pub use rect::Rect;
pub use spawn::{spawn_collectible, spawn_player, spawn_projectile};
pub use state::{
    Collectible, CollectibleKind, Direction, Edge, GameEvent, Player, PlayerPose, Projectile,
    ProjectileKind, RunConfig, RunPhase, RunState,
};
pub use tick::{TickInput, TickOutcome, advance_catch, advance_player, advance_projectiles, tick};
