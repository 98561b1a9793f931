//! Cancellable game timers for Roomsort.
//!
//! The game only ever suspends on the clock: the one-second countdown,
//! the pause before the next room, the splash screen. All three are
//! timers in a [`Timers`] set owned by the round engine, so starting or
//! ending a game can cancel every one of them in one call and a stale
//! callback never fires against a newer session.
//!
//! # Virtual time
//!
//! [`Timers`] runs on a virtual clock advanced explicitly by its owner.
//! Tests drive it with plain `advance` calls. Real-time hosts pair it
//! with a [`Pacer`] that measures Tokio wall-clock time.
//!
//! # Pause
//!
//! [`Timers::pause`] freezes the clock: nothing fires, and pending timers
//! keep their remaining delay until [`Timers::resume`].

mod pacer;
mod timers;

pub use pacer::{sleep_until, Pacer};
pub use timers::{Fired, TimerId, Timers};
