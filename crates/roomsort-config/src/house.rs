//! The built-in house catalog: five rooms, twenty-five objects.

use std::collections::BTreeMap;

use crate::{
    FeedbackConfig, GameConfig, GameRules, Item, ItemId, Room, RoomId,
    SoundConfig,
};

const OBJECTS: &[(&str, &str)] = &[
    ("pan", "kitchen"),
    ("shampoo", "bathroom"),
    ("pastadental", "bathroom"),
    ("patitohule", "bathroom"),
    ("cepillo", "bathroom"),
    ("toalla", "bathroom"),
    ("aceite", "kitchen"),
    ("cucharon", "kitchen"),
    ("tabla", "kitchen"),
    ("lamparanoche", "bedroom"),
    ("libro", "bedroom"),
    ("despertador", "bedroom"),
    ("peluche", "bedroom"),
    ("pillow", "bedroom"),
    ("sal", "diningroom"),
    ("vaso", "diningroom"),
    ("panera", "diningroom"),
    ("jarra", "diningroom"),
    ("plate", "diningroom"),
    ("hoya", "kitchen"),
    ("sofa", "livingroom"),
    ("televisor", "livingroom"),
    ("biblioteca", "livingroom"),
    ("controlremoto", "livingroom"),
    ("florero", "livingroom"),
];

// (id, display name, image file)
const ROOMS: &[(&str, &str, &str)] = &[
    ("kitchen", "Cocina", "kitchen.png"),
    ("bathroom", "Baño", "bathroom.png"),
    ("bedroom", "Dormitorio", "bedroom.png"),
    ("diningroom", "Comedor", "comedor.png"),
    ("livingroom", "Sala", "sala.png"),
];

pub(crate) fn house() -> GameConfig {
    let objects = OBJECTS
        .iter()
        .map(|(id, room)| {
            Item::new(*id, *room, format!("assets/images/objects/{id}.png"))
        })
        .collect();

    let rooms = ROOMS
        .iter()
        .map(|(id, name, file)| {
            Room::new(*id, *name, format!("assets/images/rooms/{file}"))
        })
        .collect();

    let mut room_restrictions = BTreeMap::new();
    room_restrictions.insert(RoomId::new("kitchen"), vec![ItemId::new("plate")]);
    room_restrictions.insert(
        RoomId::new("bathroom"),
        vec![ItemId::new("libro"), ItemId::new("peluche")],
    );

    GameConfig {
        objects,
        rooms,
        game_rules: GameRules::default(),
        feedback: FeedbackConfig::default(),
        sounds: SoundConfig {
            correct: "assets/sounds/correct.mp3".into(),
            incorrect: "assets/sounds/incorrect.mp3".into(),
            button_start: "assets/sounds/inicioboton.mp3".into(),
            background_music: "assets/sounds/musicafondo.mp3".into(),
        },
        room_restrictions,
    }
}
