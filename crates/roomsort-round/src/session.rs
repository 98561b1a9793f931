//! Per-game and per-round state.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use roomsort_config::{Item, ItemId, Room};
use serde::{Deserialize, Serialize};

use crate::Phase;

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// Everything that lives for exactly one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Can go negative.
    pub score: i64,
    /// Rooms not yet played, consumed from the end.
    pub remaining_rooms: Vec<Room>,
    pub time_remaining_secs: u32,
    pub phase: Phase,
}

impl GameSession {
    /// A fresh session on the start screen.
    pub fn new(time_limit_secs: u32) -> Self {
        Self {
            score: 0,
            remaining_rooms: Vec::new(),
            time_remaining_secs: time_limit_secs,
            phase: Phase::Menu,
        }
    }

    /// Resets the session for a new game: score to zero, clock full,
    /// every room queued once in random order.
    pub fn start(&mut self, rooms: &[Room], time_limit_secs: u32, rng: &mut impl Rng) {
        let mut queue = rooms.to_vec();
        queue.shuffle(rng);
        self.score = 0;
        self.remaining_rooms = queue;
        self.time_remaining_secs = time_limit_secs;
        self.phase = Phase::Playing;
    }

    /// Marks the game as over. The score is kept for the end screen.
    pub fn end(&mut self) {
        self.remaining_rooms.clear();
        self.phase = Phase::GameOver;
    }

    /// Takes the next room off the queue.
    pub fn next_room(&mut self) -> Option<Room> {
        self.remaining_rooms.pop()
    }

    /// One second passes. Returns `true` when the clock hits zero.
    pub fn tick(&mut self) -> bool {
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        self.time_remaining_secs == 0
    }
}

// ---------------------------------------------------------------------------
// RoundState
// ---------------------------------------------------------------------------

/// One room's worth of play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// The active room. Every drop is judged against it.
    pub room: Room,
    /// Correct items not yet placed. Empty means the round is complete.
    pub pending_correct: BTreeSet<ItemId>,
    /// Items on the board this round, in display order.
    pub objects_in_play: Vec<Item>,
    /// Items already placed this round. They cannot be dropped again.
    pub placed: BTreeSet<ItemId>,
}

impl RoundState {
    pub fn is_complete(&self) -> bool {
        self.pending_correct.is_empty()
    }

    pub fn is_in_play(&self, id: &ItemId) -> bool {
        self.objects_in_play.iter().any(|item| &item.id == id)
    }

    pub fn is_placed(&self, id: &ItemId) -> bool {
        self.placed.contains(id)
    }

    /// Records a correct placement. Returns `true` if the item was still pending.
    pub(crate) fn place(&mut self, id: &ItemId) -> bool {
        self.placed.insert(id.clone());
        self.pending_correct.remove(id)
    }
}
