//! Per-frame simulation tick
//!
//! One call advances the run by one host frame: input, movement, firing,
//! companion, spawning, integration, collisions, particles, combo decay and
//! zone progression, in that order.

use glam::Vec2;

use super::particles::{self, BURST, colors};
use super::spawn::spawn_entities;
use super::state::{
    Achievement, Companion, Faller, GameEvent, GamePhase, GameState, Laser, Owner,
};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Player intent for a single tick, polled from held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Dash modifier
    pub dash: bool,
    /// Fire trigger
    pub fire: bool,
}

/// Advance the game state by one frame of `elapsed_ms`
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f64) {
    // Game over is terminal until reset
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.play_time_ms += elapsed_ms.max(0.0);

    move_player(state, input);
    update_dash(state, input);
    if input.fire {
        try_fire_player(state);
    }
    update_companion(state);

    spawn_entities(state);
    move_entities(state);

    resolve_collisions(state);
    if state.is_game_over() {
        return;
    }

    particles::update(&mut state.particles);
    decay_combo(state);
    update_zone(state);
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    // Left wins when both are held
    player.vel_x = if input.left {
        -player.speed
    } else if input.right {
        player.speed
    } else {
        0.0
    };
    let max_x = LOGICAL_W - player.size.x;
    player.pos.x = (player.pos.x + player.vel_x).clamp(0.0, max_x);
}

/// Dash speed chosen here applies to the next tick's move
fn update_dash(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;
    if input.dash && player.energy > 0.0 {
        player.speed = tuning.dash_speed;
        player.energy = (player.energy - tuning.dash_cost).max(0.0);
    } else {
        player.speed = tuning.base_speed;
        player.energy = (player.energy + tuning.energy_regen).min(MAX_ENERGY);
    }
}

fn fire_laser(state: &mut GameState, pos: Vec2, owner: Owner) {
    state.lasers.push(Laser {
        pos,
        vel_y: state.tuning.laser_speed,
        owner,
    });
    state.sound(SoundEffect::Laser);
}

fn try_fire_player(state: &mut GameState) {
    if state.play_time_ms < state.fire_ready_ms {
        return;
    }
    if state.live_lasers(Owner::Player) >= state.tuning.max_player_lasers {
        return;
    }
    let muzzle = state.player.pos + Vec2::new(state.player.size.x / 2.0 - LASER_W / 2.0, -10.0);
    fire_laser(state, muzzle, Owner::Player);
    state.fire_ready_ms = state.play_time_ms + state.tuning.player_fire_cooldown_ms;
}

fn update_companion(state: &mut GameState) {
    let now = state.play_time_ms;
    let smoothing = state.tuning.companion_smoothing;
    let interval = state.tuning.companion_fire_interval_ms;
    let target = state.player.pos;

    let Some(companion) = state.companion.as_mut() else {
        return;
    };
    companion.pos.x += (target.x - companion.pos.x) * smoothing;
    companion.pos.y = target.y - COMPANION_OFFSET_Y;

    if now < companion.next_shot_ms {
        return;
    }
    companion.next_shot_ms = now + interval;
    let muzzle = companion.pos + Vec2::new(COMPANION_SIZE / 2.0, -8.0);
    fire_laser(state, muzzle, Owner::Companion);
}

fn move_entities(state: &mut GameState) {
    for f in state
        .meteors
        .iter_mut()
        .chain(state.stars.iter_mut())
        .chain(state.shields.iter_mut())
        .chain(state.tokens.iter_mut())
    {
        f.pos.y += f.speed;
    }
    for laser in &mut state.lasers {
        laser.pos.y += laser.vel_y;
    }

    // Missed entities leave without penalty
    let floor = LOGICAL_H + state.tuning.exit_margin;
    state.meteors.retain(|f| f.pos.y < floor);
    state.stars.retain(|f| f.pos.y < floor);
    state.shields.retain(|f| f.pos.y < floor);
    state.tokens.retain(|f| f.pos.y < floor);
    let ceiling = state.tuning.laser_exit_y;
    state.lasers.retain(|l| l.pos.y > ceiling);
}

/// Split `items` into (hit, kept) by overlap with `target`
fn take_hits(items: &mut Vec<Faller>, target: &super::collision::Aabb) -> Vec<Faller> {
    let (hit, kept): (Vec<_>, Vec<_>) = std::mem::take(items)
        .into_iter()
        .partition(|f| f.bounds().overlaps(target));
    *items = kept;
    hit
}

fn resolve_collisions(state: &mut GameState) {
    resolve_meteors(state);
    if state.is_game_over() {
        return;
    }

    let player_box = state.player.bounds();

    for star in take_hits(&mut state.stars, &player_box) {
        collect_star(state, &star);
    }
    for shield in take_hits(&mut state.shields, &player_box) {
        collect_shield(state, &shield);
    }
    for _ in take_hits(&mut state.tokens, &player_box) {
        state.sound(SoundEffect::Pickup);
        unlock_companion(state);
    }

    resolve_lasers(state);
}

/// Meteors against the player (shield or death) and the companion
fn resolve_meteors(state: &mut GameState) {
    let player_box = state.player.bounds();
    let companion_box = state.companion.as_ref().map(Companion::bounds);

    let meteors = std::mem::take(&mut state.meteors);
    let mut kept = Vec::with_capacity(meteors.len());
    let mut rest = meteors.into_iter();

    while let Some(meteor) = rest.next() {
        let bounds = meteor.bounds();
        if bounds.overlaps(&player_box) {
            if state.shield_lives > 0 {
                state.shield_lives -= 1;
                state.sound(SoundEffect::Hit);
                log::debug!("Shield absorbed hit, {} left", state.shield_lives);
                continue;
            }
            kept.extend(rest);
            state.meteors = kept;
            enter_game_over(state);
            return;
        }
        if companion_box.is_some_and(|c| bounds.overlaps(&c)) {
            particles::emit(state, meteor.center(), colors::COMPANION_KILL, 18);
            state.sound(SoundEffect::Explode);
            continue;
        }
        kept.push(meteor);
    }
    state.meteors = kept;
}

fn collect_star(state: &mut GameState, star: &Faller) {
    state.score += state.tuning.star_points * state.combo as u64;
    state.combo = (state.combo + 1).min(MAX_COMBO);
    state.combo_timer = state.tuning.combo_decay_ticks;
    state.sound(SoundEffect::Pickup);
    particles::emit(state, star.center(), colors::STAR, BURST);
    check_achievements(state);
}

fn collect_shield(state: &mut GameState, shield: &Faller) {
    state.shield_lives += 1;
    state.sound(SoundEffect::Shield);
    particles::emit(state, shield.center(), colors::SHIELD, BURST);
    if state.shield_lives > state.records.most_shields {
        state.records.most_shields = state.shield_lives;
        state.emit(GameEvent::ShieldRecord {
            count: state.shield_lives,
        });
    }
}

fn unlock_companion(state: &mut GameState) {
    if state.companion.is_some() {
        return;
    }
    state.companion = Some(Companion {
        pos: state.player.pos - Vec2::new(0.0, COMPANION_OFFSET_Y),
        // First shot on the next tick
        next_shot_ms: state.play_time_ms,
    });
    log::info!("Companion unlocked at {:.1}s", state.play_time_ms / 1000.0);
    state.unlock(Achievement::SidekickUnlocked);
}

/// Each laser removes at most one meteor and vice versa
fn resolve_lasers(state: &mut GameState) {
    if state.lasers.is_empty() || state.meteors.is_empty() {
        return;
    }

    let mut alive = vec![true; state.meteors.len()];
    let mut kills = Vec::new();
    let lasers = std::mem::take(&mut state.lasers);
    for laser in lasers {
        let hit = state
            .meteors
            .iter()
            .enumerate()
            .find(|(i, m)| alive[*i] && m.bounds().contains_point(laser.pos))
            .map(|(i, m)| (i, m.center()));
        match hit {
            Some((i, center)) => {
                alive[i] = false;
                kills.push(center);
            }
            None => state.lasers.push(laser),
        }
    }

    let mut flags = alive.into_iter();
    state.meteors.retain(|_| flags.next().unwrap_or(true));

    for center in kills {
        state.score += state.tuning.laser_points * state.combo as u64;
        state.sound(SoundEffect::Explode);
        particles::emit(state, center, colors::LASER_KILL, 20);
    }
}

fn check_achievements(state: &mut GameState) {
    if state.score >= 50 {
        state.unlock(Achievement::Points50);
    }
    if state.score >= 300 {
        state.unlock(Achievement::Points300);
    }
    if state.combo >= MAX_COMBO {
        state.unlock(Achievement::ComboMaster);
    }
}

fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let center = state.player.center();
    particles::emit(state, center, colors::GAME_OVER, 30);
    state.sound(SoundEffect::GameOver);

    let new_best = state.score > state.records.best_score;
    if new_best {
        state.records.best_score = state.score;
        state.sound(SoundEffect::HighScore);
    }
    log::info!(
        "Game over: score {} (best {}{})",
        state.score,
        state.records.best_score,
        if new_best { ", new best" } else { "" }
    );
    state.emit(GameEvent::GameOver {
        score: state.score,
        best: state.records.best_score,
        new_best,
    });
}

fn decay_combo(state: &mut GameState) {
    state.combo_timer = state.combo_timer.saturating_sub(1);
    if state.combo_timer == 0 && state.combo > MIN_COMBO {
        state.combo -= 1;
        state.combo_timer = state.tuning.combo_decay_ticks;
    }
}

/// Score thresholds only ever raise the zone
fn update_zone(state: &mut GameState) {
    let target = if state.score > state.tuning.zone3_score {
        3
    } else if state.score > state.tuning.zone2_score {
        2
    } else {
        1
    };
    if target > state.zone {
        state.zone = target;
        log::info!("Entered zone {} at score {}", target, state.score);
        state.emit(GameEvent::ZoneChanged { zone: target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Records;
    use crate::sim::tuning::{SpawnRule, Tuning};

    const DT: f64 = 16.0;

    fn quiet_tuning() -> Tuning {
        let base = Tuning::default();
        Tuning {
            meteor: SpawnRule { chance: 0.0, ..base.meteor },
            star: SpawnRule { chance: 0.0, ..base.star },
            shield: SpawnRule { chance: 0.0, ..base.shield },
            token: SpawnRule { chance: 0.0, ..base.token },
            ..base
        }
    }

    fn quiet_state() -> GameState {
        GameState::new(42, quiet_tuning(), Records::default())
    }

    /// A faller sitting on the player, still overlapping after one fall step
    fn on_player(state: &GameState, size: f32) -> Faller {
        Faller::new(state.player.pos.x, state.player.pos.y, size, 2.0)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn sounds(events: &[GameEvent]) -> Vec<SoundEffect> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Sound(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_left_wins_and_position_clamps() {
        let mut state = quiet_state();
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both, DT);
        assert_eq!(state.player.pos.x, 178.0);
        assert_eq!(state.player.vel_x, -6.0);

        for _ in 0..100 {
            tick(&mut state, &both, DT);
        }
        assert_eq!(state.player.pos.x, 0.0);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &right, DT);
        }
        assert_eq!(state.player.pos.x, 400.0 - 32.0);
    }

    #[test]
    fn test_dash_boosts_next_move() {
        let mut state = quiet_state();
        let dash_right = TickInput {
            right: true,
            dash: true,
            ..Default::default()
        };
        tick(&mut state, &dash_right, DT);
        assert_eq!(state.player.pos.x, 190.0);
        assert_eq!(state.player.speed, 9.0);
        tick(&mut state, &dash_right, DT);
        assert_eq!(state.player.pos.x, 199.0);
        assert_eq!(state.player.energy, 99.0);
    }

    #[test]
    fn test_energy_floors_at_zero() {
        let mut state = quiet_state();
        let dash = TickInput {
            dash: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &dash, DT);
            assert!((0.0..=100.0).contains(&state.player.energy));
        }
        assert_eq!(state.player.energy, 0.0);
    }

    #[test]
    fn test_energy_regen_caps_at_hundred() {
        let mut state = quiet_state();
        state.player.energy = 99.5;
        for _ in 0..10 {
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.player.energy, 100.0);
    }

    #[test]
    fn test_three_stars_score_six() {
        let mut state = quiet_state();
        for _ in 0..3 {
            let star = on_player(&state, 20.0);
            state.stars.push(star);
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.score, 6);
        assert_eq!(state.combo, 4);
        assert!(state.stars.is_empty());
    }

    #[test]
    fn test_combo_caps_at_five() {
        let mut state = quiet_state();
        for _ in 0..8 {
            let star = on_player(&state, 20.0);
            state.stars.push(star);
            tick(&mut state, &idle(), DT);
            assert!((1..=5).contains(&state.combo));
        }
        assert_eq!(state.combo, 5);
        assert_eq!(state.score, 1 + 2 + 3 + 4 + 5 + 5 + 5 + 5);
        assert!(state.achievements.contains(&Achievement::ComboMaster));
    }

    #[test]
    fn test_combo_decays_one_step_per_timer() {
        let mut state = quiet_state();
        state.combo = 3;
        state.combo_timer = 2;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.combo, 3);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.combo, 2);
        assert_eq!(state.combo_timer, 300);

        for _ in 0..300 {
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.combo, 1);
        for _ in 0..1000 {
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.combo, 1);
    }

    #[test]
    fn test_shield_consumption_is_exact() {
        let mut state = quiet_state();
        state.shield_lives = 3;
        for _ in 0..3 {
            let meteor = on_player(&state, 32.0);
            state.meteors.push(meteor);
            tick(&mut state, &idle(), DT);
            assert!(!state.is_game_over());
        }
        assert_eq!(state.shield_lives, 0);
        assert!(state.meteors.is_empty());

        let meteor = on_player(&state, 32.0);
        state.meteors.push(meteor);
        tick(&mut state, &idle(), DT);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_adjacent_hits_in_one_tick_are_all_resolved() {
        let mut state = quiet_state();
        state.shield_lives = 2;
        let a = on_player(&state, 32.0);
        let b = Faller::new(a.pos.x + 4.0, a.pos.y, 32.0, 2.0);
        let far = Faller::new(0.0, 0.0, 32.0, 2.0);
        state.meteors.extend([a, b, far]);
        tick(&mut state, &idle(), DT);
        assert_eq!(state.shield_lives, 0);
        assert!(!state.is_game_over());
        assert_eq!(state.meteors.len(), 1);
        assert_eq!(state.meteors[0].pos.x, 0.0);
    }

    #[test]
    fn test_game_over_tick_is_noop() {
        let mut state = quiet_state();
        state.score = 12;
        state.meteors.push(Faller::new(10.0, 10.0, 32.0, 3.0));
        let meteor = on_player(&state, 32.0);
        state.meteors.push(meteor);
        tick(&mut state, &idle(), DT);
        assert!(state.is_game_over());

        let meteors = state.meteors.clone();
        let particle_count = state.particles.len();
        let energy = state.player.energy;
        let play_time = state.play_time_ms;
        let busy = TickInput {
            left: true,
            dash: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut state, &busy, DT);
        }
        assert_eq!(state.meteors, meteors);
        assert_eq!(state.particles.len(), particle_count);
        assert_eq!(state.score, 12);
        assert_eq!(state.player.energy, energy);
        assert_eq!(state.play_time_ms, play_time);
        assert!(state.lasers.is_empty());
    }

    #[test]
    fn test_game_over_records_new_best() {
        let mut state = GameState::new(
            42,
            quiet_tuning(),
            Records {
                best_score: 10,
                most_shields: 0,
            },
        );
        state.score = 25;
        let meteor = on_player(&state, 32.0);
        state.meteors.push(meteor);
        tick(&mut state, &idle(), DT);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 25,
            best: 25,
            new_best: true
        }));
        assert_eq!(
            sounds(&events),
            vec![SoundEffect::GameOver, SoundEffect::HighScore]
        );
        assert_eq!(state.records.best_score, 25);
        assert_eq!(state.particles.len(), 30);
    }

    #[test]
    fn test_game_over_without_new_best() {
        let mut state = GameState::new(
            42,
            quiet_tuning(),
            Records {
                best_score: 100,
                most_shields: 0,
            },
        );
        state.score = 25;
        let meteor = on_player(&state, 32.0);
        state.meteors.push(meteor);
        tick(&mut state, &idle(), DT);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 25,
            best: 100,
            new_best: false
        }));
        assert_eq!(state.records.best_score, 100);
    }

    #[test]
    fn test_laser_hits_one_meteor() {
        let mut state = quiet_state();
        state.combo = 3;
        state.combo_timer = 300;
        state.meteors.push(Faller::new(100.0, 100.0, 32.0, 3.0));
        state.meteors.push(Faller::new(300.0, 100.0, 32.0, 3.0));
        state.lasers.push(Laser {
            pos: Vec2::new(110.0, 130.0),
            vel_y: -10.0,
            owner: Owner::Player,
        });
        state.lasers.push(Laser {
            pos: Vec2::new(112.0, 134.0),
            vel_y: -10.0,
            owner: Owner::Player,
        });
        tick(&mut state, &idle(), DT);

        assert_eq!(state.score, 15);
        assert_eq!(state.meteors.len(), 1);
        assert_eq!(state.meteors[0].pos.x, 300.0);
        assert_eq!(state.lasers.len(), 1);
        assert_eq!(state.particles.len(), 20);
    }

    #[test]
    fn test_fire_cap_and_cooldown() {
        let mut state = quiet_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, DT);
        assert_eq!(state.live_lasers(Owner::Player), 1);
        assert_eq!(state.lasers[0].pos, Vec2::new(198.0, 520.0));

        // Still cooling down
        for _ in 0..5 {
            tick(&mut state, &fire, 30.0);
        }
        assert_eq!(state.live_lasers(Owner::Player), 1);

        for _ in 0..20 {
            tick(&mut state, &fire, 100.0);
        }
        // Lasers live ~55 ticks, so the cap binds
        assert_eq!(state.live_lasers(Owner::Player), 3);
    }

    #[test]
    fn test_token_unlocks_companion_once() {
        let mut state = quiet_state();
        let token = on_player(&state, 24.0);
        state.tokens.push(token);
        tick(&mut state, &idle(), DT);

        let companion = state.companion.as_ref().expect("companion unlocked");
        assert_eq!(companion.pos, Vec2::new(184.0, 500.0));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Achievement(Achievement::SidekickUnlocked)));
        assert!(sounds(&events).contains(&SoundEffect::Pickup));

        let token = on_player(&state, 24.0);
        state.tokens.push(token);
        tick(&mut state, &idle(), DT);
        assert!(state.companion.is_some());
        assert!(state.tokens.is_empty());
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Achievement(_)))
        );
    }

    #[test]
    fn test_companion_tracks_and_fires_on_interval() {
        let mut state = quiet_state();
        state.companion = Some(Companion {
            pos: Vec2::new(0.0, 0.0),
            next_shot_ms: 0.0,
        });
        tick(&mut state, &idle(), DT);
        let companion = state.companion.as_ref().unwrap();
        assert!((companion.pos.x - 18.4).abs() < 1e-4);
        assert_eq!(companion.pos.y, 500.0);
        assert_eq!(state.live_lasers(Owner::Companion), 1);

        tick(&mut state, &idle(), DT);
        assert_eq!(state.live_lasers(Owner::Companion), 1);

        tick(&mut state, &idle(), 600.0);
        assert_eq!(state.live_lasers(Owner::Companion), 2);
    }

    #[test]
    fn test_companion_destroys_meteor_without_score() {
        let mut state = quiet_state();
        state.companion = Some(Companion {
            pos: Vec2::new(184.0, 500.0),
            next_shot_ms: f64::MAX,
        });
        state.meteors.push(Faller::new(184.0, 470.0, 32.0, 3.0));
        tick(&mut state, &idle(), DT);
        assert!(state.meteors.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.particles.len(), 18);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_shield_pickup_updates_record() {
        let mut state = GameState::new(
            42,
            quiet_tuning(),
            Records {
                best_score: 0,
                most_shields: 1,
            },
        );
        for _ in 0..2 {
            let shield = on_player(&state, 22.0);
            state.shields.push(shield);
            tick(&mut state, &idle(), DT);
        }
        assert_eq!(state.shield_lives, 2);
        assert_eq!(state.records.most_shields, 2);
        let records: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ShieldRecord { .. }))
            .collect();
        assert_eq!(records, vec![GameEvent::ShieldRecord { count: 2 }]);
    }

    #[test]
    fn test_zone_ratchets_up_only() {
        let mut state = quiet_state();
        state.score = 1501;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.zone, 2);

        state.score = 3001;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.zone, 3);

        state.score = 10;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.zone, 3);

        state.reset();
        assert_eq!(state.zone, 1);
    }

    #[test]
    fn test_zone_can_jump_straight_to_three() {
        let mut state = quiet_state();
        state.score = 5000;
        tick(&mut state, &idle(), DT);
        assert_eq!(state.zone, 3);
        let zones: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ZoneChanged { .. }))
            .collect();
        assert_eq!(zones, vec![GameEvent::ZoneChanged { zone: 3 }]);
    }

    #[test]
    fn test_token_attempts_respect_cooldown() {
        let base = quiet_tuning();
        let tuning = Tuning {
            token: SpawnRule { chance: 0.5, ..base.token },
            ..base
        };
        let mut state = GameState::new(9, tuning, Records::default());
        let mut attempts = Vec::new();
        let mut last = state.last_token_attempt_ms;
        for _ in 0..2000 {
            tick(&mut state, &idle(), 1000.0);
            state.tokens.clear();
            if state.last_token_attempt_ms != last {
                last = state.last_token_attempt_ms;
                attempts.push(last);
            }
        }
        assert!(attempts.len() >= 5);
        for pair in attempts.windows(2) {
            assert!(pair[1] - pair[0] >= 180_000.0);
        }
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = GameState::new(
            42,
            quiet_tuning(),
            Records {
                best_score: 5,
                most_shields: 3,
            },
        );
        state.score = 40;
        state.combo = 4;
        state.player.energy = 20.0;
        state.stars.push(Faller::new(0.0, 0.0, 20.0, 2.0));
        let meteor = on_player(&state, 32.0);
        state.meteors.push(meteor);
        tick(&mut state, &idle(), DT);
        assert!(state.is_game_over());
        let records = state.records;

        state.reset();
        assert!(!state.is_game_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.shield_lives, 0);
        assert_eq!(state.player.energy, 100.0);
        assert_eq!(state.combo, 1);
        assert_eq!(state.zone, 1);
        assert!(state.meteors.is_empty() && state.stars.is_empty());
        assert!(state.particles.is_empty() && state.lasers.is_empty());
        assert_eq!(state.records, records);
        assert_eq!(state.records.best_score, 40);
        assert_eq!(state.records.most_shields, 3);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default(), Records::default());
        let mut state2 = GameState::new(99999, Tuning::default(), Records::default());

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                dash: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.meteors, state2.meteors);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
