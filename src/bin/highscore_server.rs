//! Standalone highscore endpoint.
//!
//! Serves the keep-max store over HTTP for clients that run the game
//! elsewhere. The store is in-memory; restarting the process resets the
//! best entry to the placeholder.

use anyhow::Result;

use blockfall::highscore;

const DEFAULT_ADDR: &str = "127.0.0.1:4000";

fn main() -> Result<()> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    highscore::serve(highscore::shared_store(), &addr)
}
