//! The controller: glue between pointer input, the drag engine and the
//! round engine.
//!
//! The round engine owns the truth (which items are in play, what is
//! correct). The drag engine owns the interaction (what is under the
//! pointer, what is being carried). The controller keeps the drag scene in
//! step with the current round and turns finished drags into
//! [`RoundEngine::resolve_drop`] calls.

use std::time::Duration;

use roomsort_config::{ItemId, RoomId};
use roomsort_drag::{
    DragEffect, DragEngine, DropDisposition, PointerEvent, PointerPhase, RawInput, Scene,
};
use roomsort_round::{DropOutcome, GameSnapshot, Phase, PresentationSink, RoundEngine};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{RoomsortError, RowLayout};

/// What one pointer event did.
#[derive(Debug, Clone, Default)]
pub struct PointerReport {
    /// Visual changes for the host to draw.
    pub effects: Vec<DragEffect<ItemId, RoomId>>,
    /// Set when the event finished a drag and the drop was judged.
    pub outcome: Option<DropOutcome>,
}

/// The game plus what the player is currently doing with the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub game: GameSnapshot,
    pub dragging: Option<ItemId>,
    pub highlighted: Option<RoomId>,
}

/// Synchronous game core: one round engine, one drag engine, one layout.
pub struct GameController<S> {
    engine: RoundEngine<S>,
    drag: DragEngine<ItemId, RoomId>,
    layout: RowLayout,
    /// Round serial and whether a round existed when the scene was last built.
    synced: (u64, bool),
}

impl<S: PresentationSink> GameController<S> {
    pub fn new(engine: RoundEngine<S>, layout: RowLayout) -> Self {
        Self {
            engine,
            drag: DragEngine::new(),
            layout,
            synced: (0, false),
        }
    }

    pub fn engine(&self) -> &RoundEngine<S> {
        &self.engine
    }

    pub fn drag(&self) -> &DragEngine<ItemId, RoomId> {
        &self.drag
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            game: self.engine.snapshot(),
            dragging: self.drag.session().map(|s| s.item.clone()),
            highlighted: self.drag.scene().highlighted().cloned(),
        }
    }

    // -- input ---------------------------------------------------------------

    /// Routes raw mouse/touch input through the drag engine.
    pub fn pointer(&mut self, input: &RawInput) -> Result<PointerReport, RoomsortError> {
        self.sync()?;
        let Some(event) = input.to_pointer(self.drag.captured_pointer()) else {
            return Ok(PointerReport::default());
        };
        Ok(self.dispatch(event))
    }

    /// Routes an already-normalized pointer event.
    pub fn pointer_event(&mut self, event: PointerEvent) -> Result<PointerReport, RoomsortError> {
        self.sync()?;
        Ok(self.dispatch(event))
    }

    fn dispatch(&mut self, event: PointerEvent) -> PointerReport {
        if event.phase == PointerPhase::Down && self.engine.phase() == Phase::Paused {
            debug!(pointer = %event.pointer, "paused, pick-up ignored");
            return PointerReport::default();
        }
        let engine = &mut self.engine;
        let mut outcome = None;
        let effects = self
            .drag
            .handle(event, &mut |item: &ItemId, zone: Option<&RoomId>| {
                let verdict = engine.resolve_drop(item, zone);
                outcome = Some(verdict);
                if verdict.consumes_item() {
                    DropDisposition::Consume
                } else {
                    DropDisposition::Return
                }
            });
        PointerReport { effects, outcome }
    }

    /// Judges a drop without a pointer gesture (scripted play, tests).
    ///
    /// The item disappears from the board on a correct drop, exactly as if
    /// it had been dragged there.
    pub fn drop_item(
        &mut self,
        item: &ItemId,
        room: Option<&RoomId>,
    ) -> Result<DropOutcome, RoomsortError> {
        self.sync()?;
        let outcome = self.engine.resolve_drop(item, room);
        if outcome.consumes_item() {
            self.drag.consume(item);
        }
        Ok(outcome)
    }

    // -- lifecycle -----------------------------------------------------------

    pub fn request_start(&mut self) -> Result<bool, RoomsortError> {
        let started = self.engine.request_start();
        self.sync()?;
        Ok(started)
    }

    pub fn start_game(&mut self) -> Result<bool, RoomsortError> {
        let started = self.engine.start_game();
        self.sync()?;
        Ok(started)
    }

    /// Pauses the game. A drag in progress is put back and nothing can be
    /// picked up until [`resume`](Self::resume).
    pub fn pause(&mut self) -> bool {
        let paused = self.engine.pause();
        if paused {
            self.drag.cancel();
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        self.engine.resume()
    }

    pub fn end_game(&mut self) -> Result<bool, RoomsortError> {
        let ended = self.engine.end_game();
        self.sync()?;
        Ok(ended)
    }

    // -- time ----------------------------------------------------------------

    pub fn next_timer_due(&self) -> Option<Duration> {
        self.engine.next_timer_due()
    }

    /// Lets time pass and rebuilds the board if the round changed.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), RoomsortError> {
        self.engine.advance(elapsed);
        self.sync()
    }

    /// Rebuilds the drag scene when the round engine moved to a new round
    /// or dropped its round.
    fn sync(&mut self) -> Result<(), RoomsortError> {
        let current = (self.engine.round_serial(), self.engine.round().is_some());
        if current == self.synced {
            return Ok(());
        }
        let scene = match self.engine.round() {
            Some(round) => self.layout.scene_for(round)?,
            None => Scene::new(),
        };
        debug!(serial = current.0, has_round = current.1, "drag scene rebuilt");
        self.drag.replace_scene(scene);
        self.synced = current;
        Ok(())
    }
}
