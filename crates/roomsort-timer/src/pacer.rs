//! Wall-clock pacing for the virtual timers.
//!
//! [`Timers`](crate::Timers) never look at a real clock. A host that wants
//! them to fire in real time keeps a [`Pacer`], sleeps until the next
//! deadline, and feeds the measured elapsed time back in:
//!
//! ```ignore
//! loop {
//!     let deadline = pacer.deadline(timers.until_next());
//!     tokio::select! {
//!         Some(cmd) = rx.recv() => {
//!             timers.advance(pacer.lap());
//!             /* handle command */
//!         }
//!         () = roomsort_timer::sleep_until(deadline) => {
//!             timers.advance(pacer.lap());
//!         }
//!     }
//! }
//! ```
//!
//! Uses Tokio's clock, so `tokio::time::pause()` controls it in tests.

use std::time::Duration;

use tokio::time::{self, Instant};

/// Measures wall-clock time between laps.
#[derive(Debug, Clone)]
pub struct Pacer {
    last: Instant,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer {
    /// Starts measuring from now.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous lap (or creation). Starts a new lap.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }

    /// Restarts the current lap without reporting it. Use after a pause,
    /// so the paused span is not fed into the timers.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// The wall-clock instant at which `until_next` (measured from the
    /// start of the current lap) elapses.
    pub fn deadline(&self, until_next: Option<Duration>) -> Option<Instant> {
        until_next.map(|d| self.last + d)
    }
}

/// Sleeps until `deadline`. With `None` it pends forever, which is the
/// right behavior inside `tokio::select!` when no timer is pending.
pub async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
