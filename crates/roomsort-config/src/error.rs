//! Error types for the configuration layer.
//!
//! Configuration errors are the only errors that stop the game before it
//! starts. Everything that can go wrong later (short item pools, stray
//! drops) is recovered inside the round engine instead.

use std::path::PathBuf;

use crate::{ItemId, RoomId};

/// Errors that can occur while loading or validating a [`GameConfig`](crate::GameConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config could not be serialized.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The JSON was malformed or did not match the expected shape.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// There has to be at least one room to play.
    #[error("config defines no rooms")]
    NoRooms,

    /// Two catalog items share an id.
    #[error("duplicate item id {0}")]
    DuplicateItem(ItemId),

    /// Two rooms share an id.
    #[error("duplicate room id {0}")]
    DuplicateRoom(RoomId),

    /// An item targets a room that is not configured, so it could never
    /// be placed correctly.
    #[error("item {item} targets unknown room {room}")]
    UnknownTargetRoom { item: ItemId, room: RoomId },

    /// An exclusion list is keyed by a room that is not configured.
    #[error("restrictions reference unknown room {0}")]
    UnknownRestrictedRoom(RoomId),
}
