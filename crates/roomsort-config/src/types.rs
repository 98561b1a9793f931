//! Catalog types: the items players drag and the rooms they drag them into.
//!
//! Everything here is immutable once loaded. Identity is by id: two items
//! with the same [`ItemId`] are the same item, wherever they appear.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a draggable item (e.g. `"pan"`).
///
/// Newtype over `String` so an item id can never be passed where a
/// [`RoomId`] is expected. `#[serde(transparent)]` keeps the JSON form a
/// bare string: `"pan"`, not `{ "0": "pan" }`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A unique identifier for a room (e.g. `"kitchen"`).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ---------------------------------------------------------------------------
// Item / Room
// ---------------------------------------------------------------------------

/// An object that belongs in exactly one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Catalog-unique id.
    pub id: ItemId,
    /// Asset reference for the item's picture. Opaque to the core.
    #[serde(default)]
    pub image: String,
    /// The room this item has to be dropped into.
    pub target_room: RoomId,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        target_room: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            image: image.into(),
            target_room: RoomId::new(target_room),
        }
    }

    /// Returns `true` if this item belongs in `room`.
    pub fn belongs_in(&self, room: &RoomId) -> bool {
        &self.target_room == room
    }
}

/// A room, i.e. one drop target and one round of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Human-readable name shown to the player.
    pub name: String,
    #[serde(default)]
    pub image: String,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: RoomId::new(id),
            name: name.into(),
            image: image.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_bare_strings() {
        let json = serde_json::to_string(&ItemId::new("pan")).unwrap();
        assert_eq!(json, "\"pan\"");
        let room: RoomId = serde_json::from_str("\"kitchen\"").unwrap();
        assert_eq!(room, RoomId::new("kitchen"));
    }

    #[test]
    fn test_item_uses_camel_case_target_room() {
        let item: Item = serde_json::from_str(
            r#"{"id":"pan","image":"pan.png","targetRoom":"kitchen"}"#,
        )
        .unwrap();
        assert_eq!(item.target_room, RoomId::new("kitchen"));
        assert!(item.belongs_in(&RoomId::new("kitchen")));
        assert!(!item.belongs_in(&RoomId::new("bathroom")));
    }

    #[test]
    fn test_image_is_optional() {
        let room: Room =
            serde_json::from_str(r#"{"id":"sala","name":"Sala"}"#).unwrap();
        assert!(room.image.is_empty());
    }

    #[test]
    fn test_display_is_raw_id() {
        assert_eq!(ItemId::new("sofa").to_string(), "sofa");
        assert_eq!(RoomId::new("livingroom").to_string(), "livingroom");
    }
}
