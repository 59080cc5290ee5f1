//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Seeded RNG only
//! - Side effects are queued as `GameEvent`s for the host
//! - No rendering, audio, storage or platform dependencies

pub mod collision;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tuning;

pub use collision::Aabb;
pub use state::{
    Achievement, Companion, Faller, GameEvent, GamePhase, GameState, Laser, Owner, Particle,
    Player,
};
pub use tick::{TickInput, tick};
pub use tuning::{SpawnRule, Tuning};
