//! Immutable game-state snapshots and the observer seam.
//!
//! The engine rebuilds a fresh `GameSnapshot` on every observable change and
//! pushes it synchronously to every subscriber, in subscription order, before
//! the mutating call returns. Subscribers only ever see value copies; nothing
//! they do can affect engine state.

use std::sync::{Arc, Mutex};

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Point-in-time copy of the full observable game state.
///
/// `board` holds one color index per cell (0 = empty, 1-7 = piece kind) with
/// the active piece already composited in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub player_name: String,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH]; BOARD_HEIGHT],
            score: 0,
            level: 0,
            lines: 0,
            running: false,
            paused: false,
            game_over: false,
            player_name: String::new(),
        }
    }
}

/// Subscriber notified of every snapshot the engine emits
pub trait GameObserver: Send {
    fn on_snapshot(&mut self, snapshot: &GameSnapshot);
}

/// Observer that retains the most recent snapshot behind a shared handle.
///
/// The handle side (`SharedSnapshot`) is what a renderer polls each frame.
pub struct SnapshotCell {
    latest: SharedSnapshot,
}

pub type SharedSnapshot = Arc<Mutex<GameSnapshot>>;

impl SnapshotCell {
    pub fn new() -> (Self, SharedSnapshot) {
        let latest = Arc::new(Mutex::new(GameSnapshot::default()));
        (
            Self {
                latest: Arc::clone(&latest),
            },
            latest,
        )
    }
}

impl GameObserver for SnapshotCell {
    fn on_snapshot(&mut self, snapshot: &GameSnapshot) {
        if let Ok(mut latest) = self.latest.lock() {
            *latest = snapshot.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_cell_retains_latest_value() {
        let (mut cell, handle) = SnapshotCell::new();

        let mut snap = GameSnapshot {
            score: 500,
            player_name: "ada".to_string(),
            ..GameSnapshot::default()
        };
        cell.on_snapshot(&snap);
        assert_eq!(handle.lock().unwrap().score, 500);

        snap.score = 700;
        cell.on_snapshot(&snap);
        assert_eq!(handle.lock().unwrap().score, 700);
        assert_eq!(handle.lock().unwrap().player_name, "ada");
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let (mut cell, handle) = SnapshotCell::new();
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = 3;
        cell.on_snapshot(&snap);

        // Mutating the source after emission must not affect the stored copy.
        snap.board[19][0] = 7;
        assert_eq!(handle.lock().unwrap().board[19][0], 3);
    }
}
