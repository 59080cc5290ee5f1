//! Simulation host
//!
//! Owns the game state and its collaborators. Each frame it polls held keys,
//! runs one tick, then turns the queued [`GameEvent`]s into sound, storage
//! writes and HUD updates.

use crate::audio::AudioMixer;
use crate::consts::MAX_FRAME_MS;
use crate::input::{InputState, Key};
use crate::persistence::KeyValueStore;
use crate::records::Records;
use crate::renderer::{self, DrawSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Tuning, tick};
use crate::ui::{Hud, HudSnapshot, game_over_summary};

/// Delay between game over and the summary notice (host clock, ms)
pub const GAME_OVER_NOTICE_DELAY_MS: f64 = 200.0;

#[derive(Debug, Clone, PartialEq)]
struct PendingNotice {
    due_ms: f64,
    message: String,
}

/// A running session
pub struct Game {
    state: GameState,
    input: InputState,
    settings: Settings,
    audio: AudioMixer,
    store: Box<dyn KeyValueStore>,
    hud: Box<dyn Hud>,
    /// Host clock; keeps running while the simulation is frozen
    clock_ms: f64,
    notice: Option<PendingNotice>,
    last_hud: Option<HudSnapshot>,
}

impl Game {
    /// Read records and settings from `store` and start a run
    pub fn new(
        seed: u64,
        mut tuning: Tuning,
        store: Box<dyn KeyValueStore>,
        mut audio: AudioMixer,
        hud: Box<dyn Hud>,
    ) -> Self {
        let records = Records::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        settings.apply_audio(&mut audio);
        settings.apply_tuning(&mut tuning);
        log::info!(
            "Starting run (seed {}, quality {})",
            seed,
            settings.quality.as_str()
        );

        let mut game = Self {
            state: GameState::new(seed, tuning, records),
            input: InputState::default(),
            settings,
            audio,
            store,
            hud,
            clock_ms: 0.0,
            notice: None,
            last_hud: None,
        };
        game.sync_hud();
        game
    }

    /// Advance one frame
    pub fn update(&mut self, elapsed_ms: f64) {
        let dt = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        self.clock_ms += dt;

        tick(&mut self.state, &self.input.tick_input(), dt);
        for event in self.state.drain_events() {
            self.dispatch(event);
        }

        self.sync_hud();
        self.fire_notice();
    }

    /// Paint the current state; never mutates
    pub fn render(&self, sink: &mut dyn DrawSink) {
        renderer::render(&self.state, sink);
    }

    pub fn key_down(&mut self, name: &str) {
        self.audio.resume();
        match Key::from_name(name) {
            Some(Key::Mute) => self.toggle_mute(),
            Some(Key::Restart) => {
                if self.state.is_game_over() {
                    self.reset();
                }
            }
            Some(key) => self.input.set(key, true),
            None => {}
        }
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.input.set(key, false);
        }
    }

    /// Release all held keys (window lost focus)
    pub fn release_keys(&mut self) {
        self.input.clear();
    }

    /// Start a fresh run; records and achievements carry over
    pub fn reset(&mut self) {
        self.state.reset();
        self.notice = None;
        self.last_hud = None;
        self.sync_hud();
    }

    /// Music slider (0.0 - 1.0); saved to preferences
    pub fn set_music_volume(&mut self, volume: f32) {
        self.audio.set_music_volume(volume);
        self.settings.music_volume = self.audio.music_volume();
        self.settings.save(self.store.as_mut());
    }

    /// Effects slider (0.0 - 1.0); saved to preferences
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.audio.set_sfx_volume(volume);
        self.settings.sfx_volume = self.audio.sfx_volume();
        self.settings.save(self.store.as_mut());
    }

    /// Music on/off button; returns whether music is now on
    pub fn toggle_music(&mut self) -> bool {
        self.settings.music = self.audio.toggle_music();
        self.settings.save(self.store.as_mut());
        self.settings.music
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    pub fn is_music_on(&self) -> bool {
        self.audio.is_music_on()
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    fn toggle_mute(&mut self) {
        self.settings.muted = self.audio.toggle_mute();
        self.settings.save(self.store.as_mut());
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Sound(effect) => self.audio.play(effect),
            GameEvent::Achievement(achievement) => self.hud.achievement(achievement.title()),
            GameEvent::ZoneChanged { zone } => log::debug!("Zone {} palette", zone),
            GameEvent::ShieldRecord { count } => {
                log::debug!("New shield record: {}", count);
                self.state.records.save_most_shields(self.store.as_mut());
            }
            GameEvent::GameOver {
                score, new_best, ..
            } => {
                if new_best {
                    self.state.records.save_best_score(self.store.as_mut());
                }
                self.notice = Some(PendingNotice {
                    due_ms: self.clock_ms + GAME_OVER_NOTICE_DELAY_MS,
                    message: game_over_summary(score, new_best),
                });
            }
        }
    }

    fn sync_hud(&mut self) {
        let snapshot = HudSnapshot::from_state(&self.state);
        if self.last_hud != Some(snapshot) {
            self.hud.update(&snapshot);
            self.last_hud = Some(snapshot);
        }
    }

    fn fire_notice(&mut self) {
        match self.notice.take() {
            Some(notice) if self.clock_ms >= notice.due_ms => self.hud.notify(&notice.message),
            pending => self.notice = pending,
        }
    }
}
