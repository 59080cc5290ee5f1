//! Audio sink
//!
//! The simulation only names sounds; playback is fire-and-forget through an
//! [`AudioBackend`]. Mute and the two volume controls live in [`AudioMixer`]
//! and never feed back into game state.

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};

/// Sound effect triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Star or token collected
    Pickup,
    /// Meteor absorbed by a shield-life
    Hit,
    /// Shield collected
    Shield,
    /// Laser fired
    Laser,
    /// Meteor destroyed
    Explode,
    /// Run ended
    GameOver,
    /// New best score
    HighScore,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::Pickup,
        SoundEffect::Hit,
        SoundEffect::Shield,
        SoundEffect::Laser,
        SoundEffect::Explode,
        SoundEffect::GameOver,
        SoundEffect::HighScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Pickup => "pickup",
            SoundEffect::Hit => "hit",
            SoundEffect::Shield => "shield",
            SoundEffect::Laser => "laser",
            SoundEffect::Explode => "explode",
            SoundEffect::GameOver => "gameover",
            SoundEffect::HighScore => "high",
        }
    }
}

/// Playback device. Implementations swallow their own failures.
pub trait AudioBackend {
    /// Start a one-shot effect at the given volume (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Apply background music volume (0.0 = silent)
    fn set_music_volume(&mut self, _volume: f32) {}

    /// Start or pause background music
    fn set_music_playing(&mut self, _playing: bool) {}

    /// Unlock playback after a user gesture
    fn resume(&mut self) {}
}

/// Backend that drops every trigger (headless runs, missing audio device)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {} (vol {:.2}) dropped", effect.as_str(), volume);
    }
}

/// Mute and volume front for a backend
pub struct AudioMixer {
    backend: Box<dyn AudioBackend>,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    music_on: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl AudioMixer {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            music_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,
            music_on: true,
        }
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Set effects volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    /// Flip mute for music and effects together; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    /// Start or pause background music
    pub fn set_music_on(&mut self, on: bool) {
        self.music_on = on;
        self.backend.set_music_playing(on);
    }

    /// Flip background music on/off; returns the new state
    pub fn toggle_music(&mut self) -> bool {
        self.set_music_on(!self.music_on);
        log::info!("Music {}", if self.music_on { "on" } else { "off" });
        self.music_on
    }

    pub fn is_music_on(&self) -> bool {
        self.music_on
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    fn sync_music(&mut self) {
        let vol = if self.muted { 0.0 } else { self.music_volume };
        self.backend.set_music_volume(vol);
    }

    /// Forward a user gesture so the backend can start playback
    pub fn resume(&mut self) {
        self.backend.resume();
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }
}
