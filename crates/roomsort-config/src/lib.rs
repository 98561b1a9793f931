//! Static configuration for Roomsort.
//!
//! This crate is the "config provider": an immutable catalog of items and
//! rooms, the scoring and timing rules, and the per-room exclusion lists.
//! Nothing here changes while a game is running.
//!
//! - **Types** ([`Item`], [`Room`], [`ItemId`], [`RoomId`]): the catalog.
//! - **Config** ([`GameConfig`], [`GameRules`], [`FeedbackConfig`]): what
//!   the round engine reads, loadable from JSON.
//! - **Errors** ([`ConfigError`]): what can go wrong while loading.
//!
//! ```rust
//! use roomsort_config::{GameConfig, RoomId, ItemId};
//!
//! let config = GameConfig::house();
//! assert!(config.is_excluded(&RoomId::new("kitchen"), &ItemId::new("plate")));
//! ```

mod config;
mod error;
mod house;
mod types;

pub use config::{FeedbackConfig, GameConfig, GameRules, SoundConfig};
pub use error::ConfigError;
pub use types::{Item, ItemId, Room, RoomId};
