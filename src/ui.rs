//! HUD text sink
//!
//! The host reads post-tick state into a [`HudSnapshot`] and pushes it to a
//! [`Hud`] only when something changed. Collision code never touches it.

use crate::sim::GameState;

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u64,
    pub shield_lives: u32,
    /// Rounded energy percentage
    pub energy: u32,
    pub combo: u32,
    pub best_score: u64,
    pub most_shields: u32,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            shield_lives: state.shield_lives,
            energy: state.player.energy.round() as u32,
            combo: state.combo,
            best_score: state.records.best_score,
            most_shields: state.records.most_shields,
        }
    }
}

/// Text and notification display
pub trait Hud {
    /// Refresh the numeric readouts
    fn update(&mut self, snapshot: &HudSnapshot);
    /// Append an achievement line
    fn achievement(&mut self, title: &str);
    /// Show the end-of-session message
    fn notify(&mut self, message: &str);
}

/// HUD that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn update(&mut self, snapshot: &HudSnapshot) {
        log::trace!("hud {:?}", snapshot);
    }

    fn achievement(&mut self, title: &str) {
        log::info!("🏆 {}", title);
    }

    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
    }
}

/// Unlocked achievement lines, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementLog {
    lines: Vec<String>,
}

impl AchievementLog {
    pub fn push(&mut self, title: &str) {
        self.lines.insert(0, format!("🏆 {}", title));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Combo readout, e.g. `3×`
pub fn format_combo(combo: u32) -> String {
    format!("{}×", combo)
}

/// End-of-session summary line
pub fn game_over_summary(score: u64, new_best: bool) -> String {
    format!(
        "💥 Game Over! Score: {}{}",
        score,
        if new_best { " 🎉 NEW BEST" } else { "" }
    )
}
