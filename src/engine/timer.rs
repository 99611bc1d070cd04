//! Cancellable gravity timer.
//!
//! Each `arm` call replaces the previous registration: the old tick thread is
//! cancelled and a new one started at the new interval, which resets the
//! phase of the next tick. Ticks carry the generation they were armed under,
//! so a tick queued by a cancelled registration is recognizably stale and can
//! be dropped by the consumer - there is at most one live registration and
//! never an observable tick from a dead one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One gravity tick, tagged with the registration that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub generation: u64,
}

pub struct GravityTimer {
    tx: Sender<TimerTick>,
    generation: u64,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl GravityTimer {
    /// Create an unarmed timer that will send ticks into `tx`
    pub fn new(tx: Sender<TimerTick>) -> Self {
        Self {
            tx,
            generation: 0,
            cancel_flag: None,
        }
    }

    /// Arm the timer at `interval`, cancelling any previous registration
    pub fn arm(&mut self, interval: Duration) {
        self.cancel();
        self.generation += 1;
        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancel_flag = Some(Arc::clone(&cancelled));

        let tx = self.tx.clone();
        let generation = self.generation;
        thread::spawn(move || loop {
            thread::sleep(interval);
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if tx.send(TimerTick { generation }).is_err() {
                break;
            }
        });
    }

    /// Cancel the current registration, if any
    pub fn cancel(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.cancel_flag.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a received tick belongs to the live registration
    pub fn accepts(&self, tick: TimerTick) -> bool {
        self.is_armed() && tick.generation == self.generation
    }

    /// A sender into the tick channel (used by tests to inject ticks)
    pub fn sender(&self) -> Sender<TimerTick> {
        self.tx.clone()
    }
}

impl Drop for GravityTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
