//! Round lifecycle for roomsort.
//!
//! A game is a sequence of rounds, one per room, in random order. Each
//! round shows a handful of items that belong in the active room plus
//! distractors that don't. The player drags items onto the room; the
//! [`RoundEngine`] judges every drop, keeps score, runs the countdown and
//! moves to the next room once every correct item was placed.
//!
//! # Key types
//!
//! - [`RoundEngine`]: phase machine, scoring and timers
//! - [`Phase`]: `Menu → Playing ⇄ Paused → GameOver`
//! - [`PresentationSink`]: where the engine sends everything visible or audible
//! - [`build_round`]: picks one round's items, honoring exclusion lists

mod engine;
mod phase;
mod round;
mod session;
mod sink;

pub use engine::{DropOutcome, GameSnapshot, GameTimer, RoundEngine};
pub use phase::Phase;
pub use round::build_round;
pub use session::{GameSession, RoundState};
pub use sink::{CommandSink, PresentationSink, RecordingSink, Screen, SinkCommand, SoundKind};
