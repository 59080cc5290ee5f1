//! Meteor Dash - a side-scrolling meteor dodging arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, spawning, collisions, scoring)
//! - `game`: Host loop that drives the simulation and feeds its collaborators
//! - `renderer`: Read-only draw list generation and vertex tessellation
//! - `audio`: Sound trigger sink with mute and volume controls
//! - `persistence`: Key-value storage for records and preferences
//! - `platform`: Browser bindings (wasm32 only)

pub mod audio;
pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use records::Records;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical playfield width; the host scales this to fit the viewport
    pub const LOGICAL_W: f32 = 400.0;
    /// Logical playfield height
    pub const LOGICAL_H: f32 = 600.0;

    /// Player spawn position and size
    pub const PLAYER_START_X: f32 = 184.0;
    pub const PLAYER_START_Y: f32 = 540.0;
    pub const PLAYER_SIZE: f32 = 32.0;

    /// Companion sprite size and vertical offset above the player
    pub const COMPANION_SIZE: f32 = 24.0;
    pub const COMPANION_OFFSET_Y: f32 = 40.0;

    /// Laser sprite dimensions
    pub const LASER_W: f32 = 4.0;
    pub const LASER_H: f32 = 12.0;

    /// Energy range for the dash meter
    pub const MAX_ENERGY: f32 = 100.0;

    /// Combo multiplier bounds
    pub const MIN_COMBO: u32 = 1;
    pub const MAX_COMBO: u32 = 5;

    /// Longest frame delta accepted from the host (ms)
    pub const MAX_FRAME_MS: f64 = 250.0;
}
