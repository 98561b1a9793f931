//! # Roomsort
//!
//! The core of a drag-the-object-to-its-room matching game.
//!
//! Each round shows one room and a set of objects. Objects that belong in
//! the room score when dropped on it; distractors cost points and bounce
//! back. Every room is played once, against a countdown.
//!
//! The workspace is layered:
//!
//! - `roomsort-config`: the catalog, rules and exclusion lists
//! - `roomsort-timer`: cancellable virtual-time timers and wall-clock pacing
//! - `roomsort-drag`: pointer drag-and-drop over a z-ordered scene
//! - `roomsort-round`: the phase machine, scoring and round building
//!
//! This crate ties them together: [`GameController`] keeps the drag scene
//! in step with the round engine, and [`spawn_game`] runs a controller on
//! its own Tokio task behind a [`GameHandle`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use roomsort::prelude::*;
//!
//! # async fn run() -> Result<(), RoomsortError> {
//! let config = Arc::new(GameConfig::house());
//! let (sink, mut commands) = ChannelSink::new();
//! let engine = RoundEngine::new(config, sink);
//! let game = spawn_game(GameController::new(engine, RowLayout::default()));
//!
//! game.request_start().await?;
//! while let Some(cmd) = commands.recv().await {
//!     println!("{cmd:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod actor;
mod controller;
mod error;
mod layout;
mod sink;
pub mod telemetry;

pub use actor::{GameHandle, spawn_game};
pub use controller::{GameController, PointerReport, Snapshot};
pub use error::RoomsortError;
pub use layout::RowLayout;
pub use sink::ChannelSink;

pub use roomsort_config as config;
pub use roomsort_drag as drag;
pub use roomsort_round as round;
pub use roomsort_timer as timer;

/// Everything a host usually needs.
pub mod prelude {
    pub use crate::{
        ChannelSink, GameController, GameHandle, PointerReport, RoomsortError, RowLayout,
        Snapshot, spawn_game,
    };
    pub use roomsort_config::{GameConfig, Item, ItemId, Room, RoomId};
    pub use roomsort_drag::{DragEffect, Point, PointerEvent, PointerPhase, RawInput, Touch};
    pub use roomsort_round::{
        DropOutcome, Phase, PresentationSink, RecordingSink, RoundEngine, Screen, SinkCommand,
        SoundKind,
    };
}
