//! Integration tests for loading configs from JSON.

use roomsort_config::{ConfigError, GameConfig, ItemId, RoomId};

const FULL_CONFIG: &str = r#"{
    "objects": [
        { "id": "pan", "image": "assets/images/objects/pan.png", "targetRoom": "kitchen" },
        { "id": "plate", "image": "assets/images/objects/plate.png", "targetRoom": "diningroom" },
        { "id": "sofa", "image": "assets/images/objects/sofa.png", "targetRoom": "livingroom" }
    ],
    "rooms": [
        { "id": "kitchen", "name": "Cocina", "image": "assets/images/rooms/kitchen.png" },
        { "id": "diningroom", "name": "Comedor", "image": "assets/images/rooms/comedor.png" },
        { "id": "livingroom", "name": "Sala", "image": "assets/images/rooms/sala.png" }
    ],
    "gameRules": {
        "pointsPerCorrect": 10,
        "pointsPerIncorrect": -5,
        "timeLimitSeconds": 250,
        "numCorrectObjectsPerRound": 5,
        "numIncorrectObjectsPerRound": 5
    },
    "feedback": { "messageDurationMs": 1000 },
    "sounds": {
        "correct": "assets/sounds/correct.mp3",
        "incorrect": "assets/sounds/incorrect.mp3",
        "buttonStart": "assets/sounds/inicioboton.mp3",
        "backgroundMusic": "assets/sounds/musicafondo.mp3"
    },
    "roomRestrictions": { "kitchen": ["plate"] }
}"#;

#[test]
fn test_loads_full_config() {
    let config = GameConfig::from_json_str(FULL_CONFIG).unwrap();
    assert_eq!(config.objects.len(), 3);
    assert_eq!(config.rooms.len(), 3);
    assert_eq!(config.game_rules.points_per_incorrect, -5);
    assert_eq!(config.feedback.message_duration_ms, 1000);
    // Missing keys fall back to the defaults.
    assert_eq!(config.feedback.round_advance_delay_ms, 1500);
    assert_eq!(config.sounds.button_start, "assets/sounds/inicioboton.mp3");
    assert_eq!(
        config.exclusions_for(&RoomId::new("kitchen")),
        &[ItemId::new("plate")]
    );
}

#[test]
fn test_optional_sections_default() {
    let json = r#"{
        "objects": [{ "id": "pan", "targetRoom": "kitchen" }],
        "rooms": [{ "id": "kitchen", "name": "Cocina" }]
    }"#;
    let config = GameConfig::from_json_str(json).unwrap();
    assert_eq!(config.game_rules.time_limit_seconds, 250);
    assert!(config.room_restrictions.is_empty());
}

#[test]
fn test_malformed_json_is_decode_error() {
    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Decode(_)));
    assert!(err.to_string().starts_with("decode failed"));
}

#[test]
fn test_restriction_on_unknown_room_is_rejected() {
    let json = r#"{
        "objects": [],
        "rooms": [{ "id": "kitchen", "name": "Cocina" }],
        "roomRestrictions": { "garage": ["pan"] }
    }"#;
    let err = GameConfig::from_json_str(json).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownRestrictedRoom(room) if room.as_str() == "garage"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = GameConfig::load("/definitely/not/here/roomsort.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_load_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "roomsort-config-test-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, FULL_CONFIG).unwrap();
    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.rooms.len(), 3);
}

#[test]
fn test_house_survives_json_round_trip() {
    let house = GameConfig::house();
    let json = house.to_json_pretty().unwrap();
    assert!(json.contains("\"targetRoom\""));
    assert!(json.contains("\"roomRestrictions\""));
    let back = GameConfig::from_json_str(&json).unwrap();
    assert_eq!(back, house);
}
