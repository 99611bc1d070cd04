//! Core game engine: board, piece catalog, bag randomizer, scoring rules,
//! snapshots and the engine state machine itself.

pub mod bag;
pub mod board;
pub mod game;
pub mod pieces;
pub mod scoring;
pub mod snapshot;

pub use bag::{PieceBag, SimpleRng};
pub use board::Board;
pub use game::Game;
pub use pieces::{rotation_states, Piece, ShapeMatrix};
pub use scoring::{drop_interval_ms, drop_score, level_for_lines, line_clear_score};
pub use snapshot::{GameObserver, GameSnapshot, SharedSnapshot, SnapshotCell};
