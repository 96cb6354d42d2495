//! Score and level persistence.
//!
//! Only aggregate state survives restarts: the level number and the two
//! score counters, written by field name as JSON. The grid itself is
//! never persisted.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// The aggregate state that survives a restart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// The level to resume at.
    pub level: u32,
    /// Points earned in the current level.
    pub current_score: u64,
    /// Points banked from completed levels.
    pub cumulative_score: u64,
}

impl Default for SavedState {
    fn default() -> Self {
        Self {
            level: 1,
            current_score: 0,
            cumulative_score: 0,
        }
    }
}

/// Where saved state comes from and goes to.
///
/// The session only ever loads once (at construction) and saves at level
/// transitions; implementations are free to be as dumb as a single file.
pub trait StateStore: fmt::Debug {
    /// Loads the saved state, falling back to defaults when nothing
    /// usable is stored.
    fn load(&self) -> SavedState;

    /// Persists the given state. Failures are logged, never fatal.
    fn save(&mut self, state: &SavedState);
}

/// A [`StateStore`] backed by a single JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    /// Creates a store writing to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonFileStateStore {
    fn default() -> Self {
        Self::new("game_state.json")
    }
}

impl StateStore for JsonFileStateStore {
    fn load(&self) -> SavedState {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "unreadable saved state; starting fresh");
                    SavedState::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => SavedState::default(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not load saved state; starting fresh");
                SavedState::default()
            }
        }
    }

    fn save(&mut self, state: &SavedState) {
        let contents = match serde_json::to_string(state) {
            Ok(contents) => contents,
            Err(err) => {
                error!(%err, "could not serialize saved state");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, contents) {
            error!(path = %self.path.display(), %err, "could not save game state");
        }
    }
}

/// A [`StateStore`] that remembers nothing. For tests and headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStateStore;

impl StateStore for NullStateStore {
    fn load(&self) -> SavedState {
        SavedState::default()
    }

    fn save(&mut self, _state: &SavedState) {}
}
