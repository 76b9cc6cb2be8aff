//! Countdown publisher for verification UIs
//!
//! The remaining time of a code is a pure function of `expires_at - now`;
//! this ticker merely republishes that value once per second over a watch
//! channel so a UI can refresh without owning a timer. Expiry authority
//! stays with the session's `expires_at` check on submit.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::traits::Clock;

/// Cancellable once-per-second countdown for a single issued code
///
/// The background task stops on its own when the countdown reaches zero or
/// every receiver is gone; `cancel` (or dropping the `Countdown`) aborts it
/// immediately. Once cancelled, no further tick is ever published.
pub struct Countdown {
    rx: watch::Receiver<i64>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Start publishing the seconds remaining until `expires_at`
    pub fn start(expires_at: DateTime<Utc>, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = watch::channel(seconds_until(expires_at, clock.now()));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick resolves immediately; the initial value is
            // already published, so consume it and start on the next second.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let remaining = seconds_until(expires_at, clock.now());
                if tx.send(remaining).is_err() {
                    break;
                }
                if remaining == 0 {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// Most recently published value, never negative
    pub fn remaining(&self) -> i64 {
        *self.rx.borrow()
    }

    /// Receiver for awaiting per-second updates
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.rx.clone()
    }

    /// Stop the ticker; no update is published after this returns
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the background task has stopped (expired, abandoned, or
    /// cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn seconds_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    if expires_at > now {
        (expires_at - now).num_seconds()
    } else {
        0
    }
}
