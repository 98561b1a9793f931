//! Building the object set for one room.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use roomsort_config::{GameConfig, Item, Room};
use tracing::debug;

use crate::RoundState;

/// Picks the items for a round in `room`.
///
/// Items that belong in the room are candidates for the correct pool,
/// everything else for the distractor pool minus the room's exclusion
/// list. Each pool is shuffled on its own and cut to the configured size
/// (or less when the pool is short), then the two are merged and
/// shuffled again for display.
pub fn build_round(config: &GameConfig, room: Room, rng: &mut impl Rng) -> RoundState {
    let rules = &config.game_rules;

    let (mut correct, incorrect): (Vec<&Item>, Vec<&Item>) = config
        .objects
        .iter()
        .partition(|item| item.belongs_in(&room.id));
    let mut incorrect: Vec<&Item> = incorrect
        .into_iter()
        .filter(|item| !config.is_excluded(&room.id, &item.id))
        .collect();

    correct.shuffle(rng);
    incorrect.shuffle(rng);

    let wanted_correct = rules.num_correct_objects_per_round;
    let wanted_incorrect = rules.num_incorrect_objects_per_round;
    if correct.len() < wanted_correct || incorrect.len() < wanted_incorrect {
        debug!(
            room = %room.id,
            correct = correct.len(),
            wanted_correct,
            incorrect = incorrect.len(),
            wanted_incorrect,
            "short item pool, round will be smaller"
        );
    }
    correct.truncate(wanted_correct);
    incorrect.truncate(wanted_incorrect);

    let pending_correct: BTreeSet<_> = correct.iter().map(|item| item.id.clone()).collect();

    let mut objects_in_play: Vec<Item> = correct
        .into_iter()
        .chain(incorrect)
        .cloned()
        .collect();
    objects_in_play.shuffle(rng);

    RoundState {
        room,
        pending_correct,
        objects_in_play,
        placed: BTreeSet::new(),
    }
}
