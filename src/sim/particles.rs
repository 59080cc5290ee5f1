//! Cosmetic particle bursts
//!
//! Particles never touch gameplay state; they only need the RNG and the cap.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};

/// Burst colors (0xRRGGBB)
pub mod colors {
    pub const STAR: u32 = 0xFFFF00;
    pub const SHIELD: u32 = 0x00FFFF;
    pub const COMPANION_KILL: u32 = 0xFF66FF;
    pub const LASER_KILL: u32 = 0xFF3333;
    pub const GAME_OVER: u32 = 0xFF4444;
}

/// Default burst size
pub const BURST: usize = 12;

/// Spawn `count` particles at `at` with random per-axis velocity
pub fn emit(state: &mut GameState, at: Vec2, color: u32, count: usize) {
    let spread = state.tuning.particle_speed;
    let ttl = state.tuning.particle_ttl;
    for _ in 0..count {
        let vel = if spread > 0.0 {
            Vec2::new(
                state.rng.random_range(-spread..spread),
                state.rng.random_range(-spread..spread),
            )
        } else {
            Vec2::ZERO
        };
        state.particles.push(Particle {
            pos: at,
            vel,
            ttl,
            color,
        });
    }

    // Evict oldest first
    let cap = state.tuning.max_particles;
    if state.particles.len() > cap {
        let excess = state.particles.len() - cap;
        state.particles.drain(..excess);
    }
}

/// Integrate one tick and drop expired particles
pub fn update(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.ttl = p.ttl.saturating_sub(1);
    }
    particles.retain(|p| p.ttl > 0);
}
