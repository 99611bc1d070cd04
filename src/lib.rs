//! Blockfall: a timer-driven falling-block game engine with a terminal
//! front end and a keep-max highscore collaborator.
//!
//! Layering:
//! - `core`: board, pieces, bag, scoring, the game state machine and its
//!   observer/snapshot seam. Pure and synchronous.
//! - `engine`: the cancellable gravity timer and the session driver that
//!   funnels timer ticks and inputs into the core on one logical thread.
//! - `highscore`: shared keep-max store, game-over submitter, HTTP endpoint.
//! - `input` / `term`: crossterm key mapping and rendering for the binary.

pub mod core;
pub mod engine;
pub mod highscore;
pub mod input;
pub mod term;
pub mod types;
