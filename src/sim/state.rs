//! Game state and core simulation types
//!
//! Everything the loop mutates lives in [`GameState`]; nothing is global.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::tuning::Tuning;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::records::Records;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; ticks are no-ops until reset
    GameOver,
}

/// The player-controlled critter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Current movement speed (base or dash)
    pub speed: f32,
    /// Horizontal velocity applied this tick
    pub vel_x: f32,
    /// Dash meter, always within [0, 100]
    pub energy: f32,
}

impl Player {
    pub fn new(base_speed: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            speed: base_speed,
            vel_x: 0.0,
            energy: MAX_ENERGY,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Anything that falls: meteors, stars, shields, tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Faller {
    /// Top-left corner
    pub pos: Vec2,
    /// Square side length
    pub size: f32,
    /// Fall distance per tick
    pub speed: f32,
}

impl Faller {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
            speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Who fired a laser; cooldowns and caps are tracked per owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Companion,
}

/// A laser bolt travelling upward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    /// Top-left corner; also the hit point against meteors
    pub pos: Vec2,
    pub vel_y: f32,
    pub owner: Owner,
}

/// Side-kick drone unlocked by a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Companion {
    pub pos: Vec2,
    /// Play time (ms) at which the next autonomous shot is allowed
    pub next_shot_ms: f64,
}

impl Companion {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(COMPANION_SIZE))
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before removal
    pub ttl: u32,
    /// 0xRRGGBB
    pub color: u32,
}

/// One-time unlocks, kept for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Achievement {
    Points50,
    Points300,
    ComboMaster,
    SidekickUnlocked,
}

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::Points50 => "50 Points!",
            Achievement::Points300 => "300 Points!",
            Achievement::ComboMaster => "×5 Combo Master",
            Achievement::SidekickUnlocked => "Side-kick Unlocked!",
        }
    }
}

/// Side effects produced by a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundEffect),
    Achievement(Achievement),
    ZoneChanged { zone: u8 },
    /// Most shield-lives ever held went up
    ShieldRecord { count: u32 },
    GameOver { score: u64, best: u64, new_best: bool },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,

    pub player: Player,
    pub meteors: Vec<Faller>,
    pub stars: Vec<Faller>,
    pub shields: Vec<Faller>,
    pub tokens: Vec<Faller>,
    pub lasers: Vec<Laser>,
    pub companion: Option<Companion>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,

    pub score: u64,
    /// Combo multiplier, always within [1, 5]
    pub combo: u32,
    /// Ticks until the combo decays one step
    pub combo_timer: u32,
    pub shield_lives: u32,
    /// Visual theme tier, 1..=3, never decreases within a run
    pub zone: u8,

    /// Accumulated play time (ms); frozen during game over
    pub play_time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Play time at which the player may fire again
    pub fire_ready_ms: f64,
    /// Play time of the last token spawn attempt
    pub last_token_attempt_ms: f64,

    /// Best-of-session records, seeded from storage at startup
    pub records: Records,
    pub achievements: BTreeSet<Achievement>,

    /// Pending side effects for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with the given seed, balance and stored records
    pub fn new(seed: u64, tuning: Tuning, records: Records) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(tuning.base_speed),
            tuning,
            phase: GamePhase::Playing,
            meteors: Vec::new(),
            stars: Vec::new(),
            shields: Vec::new(),
            tokens: Vec::new(),
            lasers: Vec::new(),
            companion: None,
            particles: Vec::new(),
            score: 0,
            combo: MIN_COMBO,
            combo_timer: 0,
            shield_lives: 0,
            zone: 1,
            play_time_ms: 0.0,
            time_ticks: 0,
            fire_ready_ms: 0.0,
            last_token_attempt_ms: 0.0,
            records,
            achievements: BTreeSet::new(),
            events: Vec::new(),
        }
    }

    /// Restore run defaults; records, achievements, tuning and RNG survive
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.player = Player::new(self.tuning.base_speed);
        self.meteors.clear();
        self.stars.clear();
        self.shields.clear();
        self.tokens.clear();
        self.lasers.clear();
        self.companion = None;
        self.particles.clear();
        self.score = 0;
        self.combo = MIN_COMBO;
        self.combo_timer = 0;
        self.shield_lives = 0;
        self.zone = 1;
        self.play_time_ms = 0.0;
        self.time_ticks = 0;
        self.fire_ready_ms = 0.0;
        self.last_token_attempt_ms = 0.0;
        self.events.clear();
        log::info!("Run reset (best score {})", self.records.best_score);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Live lasers fired by the given owner
    pub fn live_lasers(&self, owner: Owner) -> usize {
        self.lasers.iter().filter(|l| l.owner == owner).count()
    }

    /// Take the side effects produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn sound(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::Sound(effect));
    }

    /// Record a one-time unlock; repeated unlocks are ignored
    pub(crate) fn unlock(&mut self, achievement: Achievement) {
        if self.achievements.insert(achievement) {
            log::info!("Achievement unlocked: {}", achievement.title());
            self.events.push(GameEvent::Achievement(achievement));
        }
    }
}
