//! Probabilistic spawning
//!
//! Each kind gets an independent Bernoulli trial per tick. Tokens are also
//! gated by the companion, a pending token and an attempt cooldown.

use rand::Rng;

use super::state::{Faller, GameState};
use super::tuning::SpawnRule;
use crate::consts::LOGICAL_W;

fn roll(state: &mut GameState, rule: &SpawnRule, speed: f32) -> Option<Faller> {
    if !state.rng.random_bool(rule.chance.clamp(0.0, 1.0)) {
        return None;
    }
    let max_x = LOGICAL_W - rule.size;
    let x = if max_x > 0.0 {
        state.rng.random_range(0.0..max_x)
    } else {
        0.0
    };
    Some(Faller::new(x, rule.start_y, rule.size, speed))
}

/// Whether the token gate is open (before the Bernoulli trial)
pub fn token_attempt_due(state: &GameState) -> bool {
    state.companion.is_none()
        && state.tokens.is_empty()
        && state.play_time_ms - state.last_token_attempt_ms >= state.tuning.token_cooldown_ms
}

/// Run this tick's spawn trials
pub fn spawn_entities(state: &mut GameState) {
    let tuning = state.tuning.clone();

    let meteor_speed = tuning.meteor_speed(state.score);
    if let Some(m) = roll(state, &tuning.meteor, meteor_speed) {
        state.meteors.push(m);
    }
    if let Some(s) = roll(state, &tuning.star, tuning.star.speed) {
        state.stars.push(s);
    }
    if let Some(s) = roll(state, &tuning.shield, tuning.shield.speed) {
        state.shields.push(s);
    }

    if token_attempt_due(state) {
        // The cooldown restarts on every attempt, hit or miss
        state.last_token_attempt_ms = state.play_time_ms;
        if let Some(t) = roll(state, &tuning.token, tuning.token.speed) {
            log::debug!("Token spawned at x={:.0}", t.pos.x);
            state.tokens.push(t);
        }
    }
}
