//! Keep-max highscore collaborator: shared in-memory store, game-over
//! submitter observer, and the HTTP endpoint exposing it.

pub mod server;
pub mod store;

pub use server::serve;
pub use store::{shared_store, Highscore, HighscoreStore, HighscoreSubmitter, SharedHighscoreStore};
