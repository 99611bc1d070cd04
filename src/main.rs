//! Terminal blockfall runner (default binary).
//!
//! Owns the render/input loop: crossterm events are mapped to game actions,
//! queued gravity ticks are pumped between inputs, and the latest snapshot is
//! drawn whenever it changes. With `--serve ADDR` the in-process highscore
//! store is also exposed over HTTP, so game-over submissions become visible
//! to `GET /api/highscore` immediately.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::SnapshotCell;
use blockfall::engine::Session;
use blockfall::highscore::{self, HighscoreSubmitter, SharedHighscoreStore};
use blockfall::input::{handle_key_event, should_quit, should_start};
use blockfall::term::{compose, TerminalRenderer};

const POLL_MS: u64 = 16;
const DEFAULT_SERVE_ADDR: &str = "127.0.0.1:4000";

struct Options {
    player: String,
    serve_addr: Option<String>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut player = "player".to_string();
        let mut serve_addr = None;
        while let Some(arg) = args.next() {
            if arg == "--serve" {
                serve_addr =
                    Some(args.next().unwrap_or_else(|| DEFAULT_SERVE_ADDR.to_string()));
            } else {
                player = arg;
            }
        }
        Self { player, serve_addr }
    }
}

fn main() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1));

    let store = highscore::shared_store();
    if let Some(addr) = opts.serve_addr.clone() {
        let endpoint_store = Arc::clone(&store);
        thread::spawn(move || {
            if let Err(e) = highscore::serve(endpoint_store, &addr) {
                eprintln!("highscore endpoint failed: {e:#}");
            }
        });
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &opts.player, store);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, player: &str, store: SharedHighscoreStore) -> Result<()> {
    let mut session = Session::new(seed_from_clock());
    let (cell, latest) = SnapshotCell::new();
    session.subscribe(Box::new(cell));
    session.subscribe(Box::new(HighscoreSubmitter::new(Arc::clone(&store))));

    let mut last_drawn = None;
    loop {
        session.pump_gravity();

        let snapshot = latest.lock().map(|s| s.clone()).unwrap_or_default();
        let best = store.lock().map(|s| s.best()).unwrap_or_default();
        let current = (snapshot, best);
        if last_drawn.as_ref() != Some(&current) {
            term.draw(&compose(&current.0, &current.1))?;
            last_drawn = Some(current);
        }

        if event::poll(Duration::from_millis(POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if should_start(key) {
                        session.start(player);
                    } else if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
            }
        }
    }
}

fn seed_from_clock() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.subsec_nanos() ^ (now.as_secs() as u32)
}
