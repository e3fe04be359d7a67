//! All-time high score
//!
//! A single integer persisted under one key, read once at startup and written
//! only when a finished run beats it.

use crate::persistence::KeyValueStore;

/// Persisted best score. Never decreases.
pub struct ScoreStore {
    store: Box<dyn KeyValueStore>,
    high_score: u32,
}

impl ScoreStore {
    /// Storage key, shared with earlier builds of the game
    pub const STORAGE_KEY: &'static str = "flappyKiroHighScore";

    /// Load the stored high score. Missing, unreadable or malformed values count as 0.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let high_score = match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring malformed high score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        };

        log::info!("High score loaded: {}", high_score);
        Self { store, high_score }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Strictly greater than the stored best
    pub fn is_new_high_score(&self, score: u32) -> bool {
        score > self.high_score
    }

    /// Record a finished run. Returns true when it set a new high score.
    ///
    /// A failed write is logged; the in-memory value is still raised so the
    /// rest of the session sees the new best.
    pub fn save_score(&mut self, score: u32) -> bool {
        if !self.is_new_high_score(score) {
            return false;
        }

        self.high_score = score;
        match self.store.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("New high score saved: {}", score),
            Err(e) => log::warn!("Could not persist high score {}: {}", score, e),
        }
        true
    }
}

impl std::fmt::Debug for ScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreStore")
            .field("high_score", &self.high_score)
            .finish_non_exhaustive()
    }
}
