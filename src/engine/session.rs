//! Session - timer-owning driver around the core game.
//!
//! All mutation funnels through this type on one logical thread: direct
//! inputs call into the game immediately, and gravity ticks queued by the
//! timer thread are drained by `pump_gravity` between inputs. After every
//! mutation the timer is re-synced with the game state: armed at the
//! level's interval while running (re-armed on level-up, which resets tick
//! phase), cancelled on stop or game over.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::core::{Game, GameObserver};
use crate::engine::timer::{GravityTimer, TimerTick};
use crate::types::GameAction;

pub struct Session {
    game: Game,
    timer: GravityTimer,
    ticks: Receiver<TimerTick>,
    armed_interval_ms: Option<u64>,
}

impl Session {
    pub fn new(seed: u32) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            game: Game::new(seed),
            timer: GravityTimer::new(tx),
            ticks: rx,
            armed_interval_ms: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Register an observer on the underlying game
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.game.subscribe(observer);
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn start(&mut self, name: &str) {
        self.game.start(name);
        // Force a fresh registration so every start resets the tick phase.
        self.armed_interval_ms = None;
        self.sync_timer();
    }

    pub fn stop(&mut self) {
        self.game.stop();
        self.sync_timer();
    }

    pub fn apply_action(&mut self, action: GameAction) {
        self.game.apply_action(action);
        self.sync_timer();
    }

    /// Drain queued gravity ticks, applying those from the live registration.
    /// Ticks from a cancelled or replaced registration are dropped.
    pub fn pump_gravity(&mut self) {
        while let Ok(tick) = self.ticks.try_recv() {
            if !self.timer.accepts(tick) {
                continue;
            }
            self.game.gravity_tick();
            self.sync_timer();
        }
    }

    fn sync_timer(&mut self) {
        if self.game.running() {
            let interval = self.game.drop_interval_ms();
            if self.armed_interval_ms != Some(interval) {
                self.timer.arm(Duration::from_millis(interval));
                self.armed_interval_ms = Some(interval);
            }
        } else {
            self.timer.cancel();
            self.armed_interval_ms = None;
        }
    }

    #[cfg(test)]
    fn inject_tick(&self, generation: u64) {
        self.timer
            .sender()
            .send(TimerTick { generation })
            .expect("session holds the receiver");
    }
}
