//! Best score tracking
//!
//! Single persisted slot holding the highest score ever reached. Stored as a
//! bare JSON number so a plain integer written by older builds still loads.

use crate::persistence::{KeyValueStore, load_json, save_json};

/// Best score ever achieved (non-decreasing)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Load from storage, defaulting to 0 when absent or unreadable
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json::<u32, _>(store, Self::STORAGE_KEY) {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                Self { value }
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                Self::default()
            }
        }
    }

    /// Record a score. Returns true (and persists) if it beat the best.
    ///
    /// A failed write keeps the new best in memory only.
    pub fn record<S: KeyValueStore + ?Sized>(&mut self, score: u32, store: &S) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = save_json(store, Self::STORAGE_KEY, &self.value) {
            log::warn!("Best score {} kept in memory only: {}", self.value, e);
        }
        true
    }
}
