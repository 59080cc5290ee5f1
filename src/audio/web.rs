//! Audio backend using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Background music comes from an optional `<audio id="bgm">` element.

use wasm_bindgen::JsCast;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use super::{AudioBackend, SoundEffect};

/// Oscillator synth for effects plus an optional music element
pub struct WebAudio {
    ctx: Option<AudioContext>,
    music: Option<HtmlAudioElement>,
    /// Music switched on by the player
    music_on: bool,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - effects disabled");
        }
        let music = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("bgm"))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if music.is_none() {
            log::info!("No #bgm element - music disabled");
        }
        Self {
            ctx,
            music,
            music_on: true,
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short arpeggio of sine or triangle notes
    fn play_notes(
        &self,
        ctx: &AudioContext,
        vol: f32,
        freqs: &[f32],
        step: f64,
        length: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * step;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + length)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + length + 0.05).ok();
            }
        }
    }

    /// Meteor absorbed - solid thump
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Shield collected - rising shimmer
    fn play_shield(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Laser - short downward zap
    fn play_laser(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(1200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(300.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Explosion - boom!
    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.5).ok();

        // High frequency crack
        if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain2.gain().set_value_at_time(vol * 0.2, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc2.start().ok();
            osc2.stop_with_when(t + 0.15).ok();
        }
    }
}

impl AudioBackend for WebAudio {
    fn play(&mut self, effect: SoundEffect, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Pickup => {
                self.play_notes(ctx, vol, &[600.0, 800.0, 1000.0], 0.08, 0.15, OscillatorType::Sine)
            }
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::Shield => self.play_shield(ctx, vol),
            SoundEffect::Laser => self.play_laser(ctx, vol),
            SoundEffect::Explode => self.play_explosion(ctx, vol),
            SoundEffect::GameOver => self.play_notes(
                ctx,
                vol,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                0.3,
                OscillatorType::Sine,
            ),
            SoundEffect::HighScore => self.play_notes(
                ctx,
                vol,
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                0.08,
                0.25,
                OscillatorType::Triangle,
            ),
        }
    }

    fn set_music_volume(&mut self, volume: f32) {
        if let Some(music) = &self.music {
            music.set_volume(volume as f64);
        }
    }

    fn set_music_playing(&mut self, playing: bool) {
        self.music_on = playing;
        let Some(music) = &self.music else { return };
        if !playing {
            let _ = music.pause();
        } else if music.paused() {
            let _ = music.play();
        }
    }

    /// Resume audio context and start music (required after user gesture)
    fn resume(&mut self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
        if let Some(music) = &self.music {
            if self.music_on && music.paused() {
                // Autoplay rejection is fine, the next gesture retries
                let _ = music.play();
            }
        }
    }
}
