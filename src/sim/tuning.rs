//! Data-driven game balance
//!
//! Every number the simulation uses to pace a run lives here so that a
//! variant ruleset can be loaded from JSON without touching code.

use serde::{Deserialize, Serialize};

/// Spawn parameters for one falling entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Per-tick Bernoulli probability
    pub chance: f64,
    /// Square side length
    pub size: f32,
    /// Spawn height (negative = above the visible area)
    pub start_y: f32,
    /// Fall speed per tick
    pub speed: f32,
}

impl SpawnRule {
    pub const fn new(chance: f64, size: f32, start_y: f32, speed: f32) -> Self {
        Self {
            chance,
            size,
            start_y,
            speed,
        }
    }
}

/// Balance constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_speed: f32,
    pub dash_speed: f32,
    pub dash_cost: f32,
    pub energy_regen: f32,

    /// Live player lasers allowed at once
    pub max_player_lasers: usize,
    pub player_fire_cooldown_ms: f64,
    pub companion_fire_interval_ms: f64,
    pub companion_smoothing: f32,
    /// Laser velocity per tick (negative = upward)
    pub laser_speed: f32,

    pub meteor: SpawnRule,
    /// Meteor fall speed gains 1 per this many points
    pub meteor_speed_divisor: f32,
    pub star: SpawnRule,
    pub shield: SpawnRule,
    pub token: SpawnRule,
    pub token_cooldown_ms: f64,

    /// Entities are kept while above `LOGICAL_H + exit_margin`
    pub exit_margin: f32,
    /// Lasers are kept while below this height
    pub laser_exit_y: f32,

    pub combo_decay_ticks: u32,
    pub star_points: u64,
    pub laser_points: u64,

    pub zone2_score: u64,
    pub zone3_score: u64,

    pub particle_ttl: u32,
    pub particle_speed: f32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 6.0,
            dash_speed: 9.0,
            dash_cost: 0.5,
            energy_regen: 0.2,

            max_player_lasers: 3,
            player_fire_cooldown_ms: 200.0,
            companion_fire_interval_ms: 600.0,
            companion_smoothing: 0.1,
            laser_speed: -10.0,

            meteor: SpawnRule::new(0.04, 32.0, -30.0, 3.0),
            meteor_speed_divisor: 300.0,
            star: SpawnRule::new(0.02, 20.0, -20.0, 2.0),
            shield: SpawnRule::new(0.006, 22.0, -20.0, 1.8),
            token: SpawnRule::new(0.05, 24.0, -20.0, 2.0),
            token_cooldown_ms: 180_000.0, // 3 minutes

            exit_margin: 40.0,
            laser_exit_y: -20.0,

            combo_decay_ticks: 300,
            star_points: 1,
            laser_points: 5,

            zone2_score: 1500,
            zone3_score: 3000,

            particle_ttl: 30,
            particle_speed: 2.0,
            max_particles: 512,
        }
    }
}

impl Tuning {
    /// Parse a tuning override; absent fields keep their defaults, including
    /// fields inside a partially given spawn rule
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge(&mut merged, overrides);
        serde_json::from_value(merged)
    }

    /// Fall speed for a meteor spawned at the given score
    pub fn meteor_speed(&self, score: u64) -> f32 {
        self.meteor.speed + score as f32 / self.meteor_speed_divisor
    }
}

/// Overlay `patch` onto `base`, recursing into objects
fn merge(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
