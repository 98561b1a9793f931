//! Game configuration: catalog, rules, timing, and per-room exclusions.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Item, ItemId, Room, RoomId};

// ---------------------------------------------------------------------------
// GameRules
// ---------------------------------------------------------------------------

/// Scoring and round-size rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameRules {
    /// Added to the score for every correct drop.
    pub points_per_correct: i64,
    /// Added to the score for every incorrect drop. Usually negative.
    pub points_per_incorrect: i64,
    /// Length of a whole game, in seconds.
    pub time_limit_seconds: u32,
    /// How many items that belong in the room each round shows.
    pub num_correct_objects_per_round: usize,
    /// How many distractors each round shows.
    pub num_incorrect_objects_per_round: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            points_per_correct: 10,
            points_per_incorrect: -5,
            time_limit_seconds: 250,
            num_correct_objects_per_round: 5,
            num_incorrect_objects_per_round: 5,
        }
    }
}

impl GameRules {
    /// Upper bound on the number of items in one round.
    pub fn objects_per_round(&self) -> usize {
        self.num_correct_objects_per_round + self.num_incorrect_objects_per_round
    }
}

// ---------------------------------------------------------------------------
// FeedbackConfig
// ---------------------------------------------------------------------------

/// Presentation timings the engine has to respect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackConfig {
    /// How long the correct/incorrect message stays on screen.
    pub message_duration_ms: u64,
    /// Pause between the last correct drop and the next room, so the
    /// feedback is visible before the board changes.
    pub round_advance_delay_ms: u64,
    /// How long the splash screen shows after pressing start.
    pub splash_duration_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            message_duration_ms: 1_000,
            round_advance_delay_ms: 1_500,
            splash_duration_ms: 3_000,
        }
    }
}

impl FeedbackConfig {
    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_duration_ms)
    }

    pub fn round_advance_delay(&self) -> Duration {
        Duration::from_millis(self.round_advance_delay_ms)
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_duration_ms)
    }
}

// ---------------------------------------------------------------------------
// SoundConfig
// ---------------------------------------------------------------------------

/// Asset paths for sound effects and music. Playback is external.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoundConfig {
    pub correct: String,
    pub incorrect: String,
    pub button_start: String,
    pub background_music: String,
}

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// The full, immutable game configuration.
///
/// The JSON shape is:
///
/// ```json
/// {
///   "objects": [{ "id": "pan", "image": "pan.png", "targetRoom": "kitchen" }],
///   "rooms": [{ "id": "kitchen", "name": "Cocina", "image": "kitchen.png" }],
///   "gameRules": { "pointsPerCorrect": 10, "pointsPerIncorrect": -5, ... },
///   "feedback": { "messageDurationMs": 1000 },
///   "sounds": { "correct": "correct.mp3", ... },
///   "roomRestrictions": { "kitchen": ["plate"] }
/// }
/// ```
///
/// Every section except `objects` and `rooms` may be omitted and falls
/// back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub objects: Vec<Item>,
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub game_rules: GameRules,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub sounds: SoundConfig,
    /// Items that must never be offered as distractors in a given room.
    #[serde(default)]
    pub room_restrictions: BTreeMap<RoomId, Vec<ItemId>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        crate::house::house()
    }
}

impl GameConfig {
    /// The built-in five-room house catalog.
    pub fn house() -> Self {
        crate::house::house()
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::from_json_slice(json.as_bytes())
    }

    /// Parses and validates a config from JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_slice(data).map_err(ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_slice(&data)?;
        tracing::info!(
            path = %path.display(),
            rooms = config.rooms.len(),
            objects = config.objects.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Serializes the config back to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Encode)
    }

    /// Checks the structural rules the round engine relies on.
    ///
    /// Restriction entries that name unknown items are harmless (they can
    /// never match) and only produce a warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }

        let mut room_ids = HashSet::new();
        for room in &self.rooms {
            if !room_ids.insert(&room.id) {
                return Err(ConfigError::DuplicateRoom(room.id.clone()));
            }
        }

        let mut item_ids = HashSet::new();
        for item in &self.objects {
            if !item_ids.insert(&item.id) {
                return Err(ConfigError::DuplicateItem(item.id.clone()));
            }
            if !room_ids.contains(&item.target_room) {
                return Err(ConfigError::UnknownTargetRoom {
                    item: item.id.clone(),
                    room: item.target_room.clone(),
                });
            }
        }

        for (room, excluded) in &self.room_restrictions {
            if !room_ids.contains(room) {
                return Err(ConfigError::UnknownRestrictedRoom(room.clone()));
            }
            for item in excluded {
                if !item_ids.contains(item) {
                    tracing::warn!(%room, %item, "restriction names unknown item");
                }
            }
        }

        Ok(())
    }

    /// Looks up an item by id.
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.objects.iter().find(|item| &item.id == id)
    }

    /// Looks up a room by id.
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == id)
    }

    /// The exclusion list for `room`. Empty if none is configured.
    pub fn exclusions_for(&self, room: &RoomId) -> &[ItemId] {
        self.room_restrictions
            .get(room)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns `true` if `item` must never be a distractor in `room`.
    pub fn is_excluded(&self, room: &RoomId, item: &ItemId) -> bool {
        self.exclusions_for(room).contains(item)
    }

    /// Every image an asset preloader has to fetch: objects, then rooms.
    pub fn image_assets(&self) -> Vec<&str> {
        self.objects
            .iter()
            .map(|item| item.image.as_str())
            .chain(self.rooms.iter().map(|room| room.image.as_str()))
            .filter(|path| !path.is_empty())
            .collect()
    }

    /// Every configured sound path.
    pub fn sound_assets(&self) -> Vec<&str> {
        [
            self.sounds.correct.as_str(),
            self.sounds.incorrect.as_str(),
            self.sounds.button_start.as_str(),
            self.sounds.background_music.as_str(),
        ]
        .into_iter()
        .filter(|path| !path.is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> GameConfig {
        GameConfig {
            objects: vec![
                Item::new("pan", "kitchen", "pan.png"),
                Item::new("sofa", "livingroom", "sofa.png"),
            ],
            rooms: vec![
                Room::new("kitchen", "Cocina", "kitchen.png"),
                Room::new("livingroom", "Sala", ""),
            ],
            game_rules: GameRules::default(),
            feedback: FeedbackConfig::default(),
            sounds: SoundConfig::default(),
            room_restrictions: BTreeMap::new(),
        }
    }

    #[test]
    fn test_rules_defaults() {
        let rules = GameRules::default();
        assert_eq!(rules.points_per_correct, 10);
        assert_eq!(rules.points_per_incorrect, -5);
        assert_eq!(rules.time_limit_seconds, 250);
        assert_eq!(rules.objects_per_round(), 10);
    }

    #[test]
    fn test_feedback_durations() {
        let fb = FeedbackConfig::default();
        assert_eq!(fb.message_duration(), Duration::from_millis(1000));
        assert_eq!(fb.round_advance_delay(), Duration::from_millis(1500));
        assert_eq!(fb.splash_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_validate_accepts_minimal() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_rooms() {
        let mut config = minimal();
        config.rooms.clear();
        config.objects.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoRooms)));
    }

    #[test]
    fn test_validate_rejects_duplicate_item() {
        let mut config = minimal();
        config.objects.push(Item::new("pan", "kitchen", ""));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateItem(id)) if id.as_str() == "pan"
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_target_room() {
        let mut config = minimal();
        config.objects.push(Item::new("toalla", "bathroom", ""));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTargetRoom { .. })
        ));
    }

    #[test]
    fn test_validate_tolerates_unknown_restricted_item() {
        let mut config = minimal();
        config
            .room_restrictions
            .insert(RoomId::new("kitchen"), vec![ItemId::new("ghost")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_exclusions_default_to_empty() {
        let config = minimal();
        assert!(config.exclusions_for(&RoomId::new("kitchen")).is_empty());
        assert!(!config.is_excluded(&RoomId::new("kitchen"), &ItemId::new("sofa")));
    }

    #[test]
    fn test_image_assets_skip_empty_paths() {
        let config = minimal();
        assert_eq!(config.image_assets(), vec!["pan.png", "sofa.png", "kitchen.png"]);
        assert!(config.sound_assets().is_empty());
    }
}
