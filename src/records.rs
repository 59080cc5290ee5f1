//! Best-of-session records
//!
//! Two scalar high-water marks persisted in the key-value store: best score
//! and most shield-lives ever held. Read once at startup, written only when
//! a new maximum is observed.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// High-water marks carried across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Records {
    pub best_score: u64,
    pub most_shields: u32,
}

impl Records {
    /// Storage keys
    pub const BEST_SCORE_KEY: &'static str = "bestScore";
    pub const MOST_SHIELDS_KEY: &'static str = "mostLives";

    /// Load both records; anything missing or unreadable counts as zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let records = Self {
            best_score: read_number(store, Self::BEST_SCORE_KEY),
            most_shields: read_number(store, Self::MOST_SHIELDS_KEY),
        };
        log::info!(
            "Loaded records: best score {}, most shields {}",
            records.best_score,
            records.most_shields
        );
        records
    }

    pub fn save_best_score(&self, store: &mut dyn KeyValueStore) {
        write_number(store, Self::BEST_SCORE_KEY, self.best_score);
    }

    pub fn save_most_shields(&self, store: &mut dyn KeyValueStore) {
        write_number(store, Self::MOST_SHIELDS_KEY, self.most_shields);
    }
}

fn read_number<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: std::str::FromStr + Default,
{
    match store.get(key) {
        Ok(Some(text)) => text.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unreadable {} value {:?}", key, text);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            T::default()
        }
    }
}

fn write_number<T: std::fmt::Display>(store: &mut dyn KeyValueStore, key: &str, value: T) {
    if let Err(e) = store.set(key, &value.to_string()) {
        log::warn!("Failed to save {}: {}", key, e);
    }
}
