//! In-memory keep-max highscore store.
//!
//! Volatile by design: the best entry lives for the process lifetime only.
//! A submitted candidate replaces the stored best iff its score is strictly
//! greater; every submission returns the (possibly unchanged) current best.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::core::{GameObserver, GameSnapshot};

/// The stored best entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highscore {
    pub name: String,
    pub score: u32,
}

impl Default for Highscore {
    fn default() -> Self {
        Self {
            name: "-".to_string(),
            score: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct HighscoreStore {
    best: Highscore,
}

impl HighscoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current best entry
    pub fn best(&self) -> Highscore {
        self.best.clone()
    }

    /// Submit a candidate; replaces the best iff strictly greater.
    /// Returns the current best either way.
    pub fn submit(&mut self, candidate: Highscore) -> Highscore {
        if candidate.score > self.best.score {
            self.best = candidate;
        }
        self.best.clone()
    }
}

/// Store handle shared between the game observer and the HTTP endpoint
pub type SharedHighscoreStore = Arc<Mutex<HighscoreStore>>;

pub fn shared_store() -> SharedHighscoreStore {
    Arc::new(Mutex::new(HighscoreStore::new()))
}

/// Observer that submits `{player_name, score}` once per GameOver transition
pub struct HighscoreSubmitter {
    store: SharedHighscoreStore,
    submitted: bool,
}

impl HighscoreSubmitter {
    pub fn new(store: SharedHighscoreStore) -> Self {
        Self {
            store,
            submitted: false,
        }
    }
}

impl GameObserver for HighscoreSubmitter {
    fn on_snapshot(&mut self, snapshot: &GameSnapshot) {
        if !snapshot.game_over {
            self.submitted = false;
            return;
        }
        if self.submitted {
            return;
        }
        self.submitted = true;
        if let Ok(mut store) = self.store.lock() {
            store.submit(Highscore {
                name: snapshot.player_name.clone(),
                score: snapshot.score,
            });
        }
    }
}
