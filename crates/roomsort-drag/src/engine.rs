//! The drag engine: one pointer-drag session at a time.
//!
//! ```text
//!            pointer-down on eligible draggable
//!   Idle ─────────────────────────────────────────→ Dragging
//!    ↑                                                 │ pointer-move: follow, re-hit-test, move highlight
//!    └──── pointer-up: drop callback, consume/restore ─┤
//!    └──── pointer-cancel: restore, no callback ───────┘
//! ```
//!
//! The engine knows nothing about what a drop *means*. It reports
//! `(item, zone-or-none)` to a [`DropHandler`] exactly once per session and
//! only asks whether the item was consumed.

use tracing::{debug, trace};

use crate::scene::{EntityId, Hit, Slot};
use crate::{Point, PointerEvent, PointerId, PointerPhase, RawInput, Rect, Scene};

/// What the drop handler decided about the released item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDisposition {
    /// The item was placed. Hide it; it cannot be dragged again.
    Consume,
    /// Put the item back where it came from.
    Return,
}

/// Receives the outcome of every drag session.
///
/// Implemented for any `FnMut(&D, Option<&Z>) -> DropDisposition`.
pub trait DropHandler<D, Z> {
    fn on_drop(&mut self, item: &D, zone: Option<&Z>) -> DropDisposition;
}

impl<D, Z, F> DropHandler<D, Z> for F
where
    F: FnMut(&D, Option<&Z>) -> DropDisposition,
{
    fn on_drop(&mut self, item: &D, zone: Option<&Z>) -> DropDisposition {
        self(item, zone)
    }
}

/// Where a dragged item came from, for restoring it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub home: Rect,
    pub slot: Slot,
}

/// The live state of one drag.
#[derive(Debug, Clone)]
pub struct DragSession<D> {
    pub item: D,
    /// The pointer that owns this drag. Other pointers are ignored.
    pub pointer: PointerId,
    /// Pointer position relative to the item's top-left corner at pickup.
    pub offset: Point,
    pub origin: Origin,
    /// Last known pointer position.
    pub position: Point,
}

/// Visual consequences of an input event, for the host to render.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEffect<D, Z> {
    /// The item left its layout slot and now floats at `at`.
    Lifted { item: D, at: Point },
    /// The floating item's top-left corner moved to `at`.
    Moved { item: D, at: Point },
    /// The hover highlight moved.
    HoverChanged { from: Option<Z>, to: Option<Z> },
    /// The item was released over `zone` (or nothing).
    Dropped { item: D, zone: Option<Z> },
    /// The drop handler kept the item; it is now hidden.
    Consumed { item: D },
    /// The item is back in its original slot.
    Restored { item: D, slot: Slot },
}

/// Coarse engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// Tracks a single pointer-drag session over a [`Scene`].
#[derive(Debug, Clone)]
pub struct DragEngine<D, Z> {
    scene: Scene<D, Z>,
    session: Option<DragSession<D>>,
}

impl<D, Z> Default for DragEngine<D, Z> {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            session: None,
        }
    }
}

impl<D: EntityId, Z: EntityId> DragEngine<D, Z> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(scene: Scene<D, Z>) -> Self {
        Self {
            scene,
            session: None,
        }
    }

    pub fn scene(&self) -> &Scene<D, Z> {
        &self.scene
    }

    /// Swaps in a new scene (e.g. a new round was rendered). An active
    /// drag is dropped without calling the handler: its item is gone.
    pub fn replace_scene(&mut self, scene: Scene<D, Z>) -> Scene<D, Z> {
        if let Some(session) = self.session.take() {
            debug!(item = ?session.item, "scene replaced mid-drag, session discarded");
        }
        std::mem::replace(&mut self.scene, scene)
    }

    pub fn state(&self) -> DragState {
        if self.session.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<D>> {
        self.session.as_ref()
    }

    /// Whether move/up events are being listened for. Only true while a
    /// drag is active; outside a session they are not even looked at.
    pub fn listening(&self) -> bool {
        self.session.is_some()
    }

    /// The pointer that owns the current drag.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.session.as_ref().map(|s| s.pointer)
    }

    /// Normalizes platform input and handles it.
    pub fn handle_raw(
        &mut self,
        input: &RawInput,
        handler: &mut impl DropHandler<D, Z>,
    ) -> Vec<DragEffect<D, Z>> {
        match input.to_pointer(self.captured_pointer()) {
            Some(event) => self.handle(event, handler),
            None => Vec::new(),
        }
    }

    /// Feeds one pointer event through the state machine.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        handler: &mut impl DropHandler<D, Z>,
    ) -> Vec<DragEffect<D, Z>> {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up => self.pointer_up(event, handler),
            PointerPhase::Cancel => self.pointer_cancel(event),
        }
    }

    fn owns(&self, event: &PointerEvent) -> bool {
        self.captured_pointer() == Some(event.pointer)
    }

    fn pointer_down(&mut self, event: PointerEvent) -> Vec<DragEffect<D, Z>> {
        if self.session.is_some() {
            trace!(pointer = %event.pointer, "pointer-down during drag ignored");
            return Vec::new();
        }

        let item = match self.scene.hit_test(event.position, None) {
            Some(Hit::Draggable(id)) => id.clone(),
            _ => return Vec::new(),
        };
        let Some(draggable) = self.scene.draggable(&item) else {
            return Vec::new();
        };
        if draggable.is_consumed() {
            return Vec::new();
        }

        let bounds = draggable.bounds();
        let origin = Origin {
            home: draggable.home,
            slot: draggable.slot,
        };
        let offset = event.position - bounds.origin();
        let at = event.position - offset;
        self.scene.float(&item, at);

        debug!(?item, pointer = %event.pointer, "drag started");
        self.session = Some(DragSession {
            item: item.clone(),
            pointer: event.pointer,
            offset,
            origin,
            position: event.position,
        });

        vec![DragEffect::Lifted { item, at }]
    }

    fn pointer_move(&mut self, event: PointerEvent) -> Vec<DragEffect<D, Z>> {
        if !self.owns(&event) {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.position = event.position;
        let item = session.item.clone();
        let at = event.position - session.offset;

        self.scene.float(&item, at);
        let mut effects = vec![DragEffect::Moved {
            item: item.clone(),
            at,
        }];

        let target = self.scene.zone_at(event.position, Some(&item)).cloned();
        if let Some(from) = self.scene.set_highlight(target.clone()) {
            trace!(?item, ?from, to = ?target, "hover changed");
            effects.push(DragEffect::HoverChanged { from, to: target });
        }
        effects
    }

    fn pointer_up(
        &mut self,
        event: PointerEvent,
        handler: &mut impl DropHandler<D, Z>,
    ) -> Vec<DragEffect<D, Z>> {
        if !self.owns(&event) {
            return Vec::new();
        }
        let Some(session) = self.session.take() else {
            return Vec::new();
        };

        let zone = self
            .scene
            .zone_at(event.position, Some(&session.item))
            .cloned();

        let mut effects = Vec::new();
        if let Some(from) = self.scene.set_highlight(None) {
            effects.push(DragEffect::HoverChanged { from, to: None });
        }

        let disposition = handler.on_drop(&session.item, zone.as_ref());
        debug!(item = ?session.item, ?zone, ?disposition, "drag ended");
        effects.push(DragEffect::Dropped {
            item: session.item.clone(),
            zone,
        });

        match disposition {
            DropDisposition::Consume => {
                self.scene.consume(&session.item);
                effects.push(DragEffect::Consumed { item: session.item });
            }
            DropDisposition::Return => {
                effects.push(self.restore(session));
            }
        }
        effects
    }

    fn pointer_cancel(&mut self, event: PointerEvent) -> Vec<DragEffect<D, Z>> {
        if !self.owns(&event) {
            return Vec::new();
        }
        self.cancel()
    }

    /// Abandons the current drag: clears the highlight and puts the item
    /// back. The drop handler is not called.
    pub fn cancel(&mut self) -> Vec<DragEffect<D, Z>> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        debug!(item = ?session.item, "drag cancelled");
        let mut effects = Vec::new();
        if let Some(from) = self.scene.set_highlight(None) {
            effects.push(DragEffect::HoverChanged { from, to: None });
        }
        effects.push(self.restore(session));
        effects
    }

    /// Hides `item` without a pointer drop, e.g. when the host resolved a
    /// drop by other means. Ends the current drag if it was that item.
    /// Returns `false` if the item was unknown or already consumed.
    pub fn consume(&mut self, item: &D) -> bool {
        if self.session.as_ref().is_some_and(|s| &s.item == item) {
            self.session = None;
            self.scene.set_highlight(None);
        }
        if !self.scene.is_eligible(item) {
            return false;
        }
        self.scene.consume(item);
        true
    }

    fn restore(&mut self, session: DragSession<D>) -> DragEffect<D, Z> {
        let Origin { home, slot } = session.origin;
        self.scene.anchor(&session.item, home, slot);
        DragEffect::Restored {
            item: session.item,
            slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Engine = DragEngine<&'static str, &'static str>;

    fn engine() -> Engine {
        let mut scene = Scene::new();
        scene
            .add_zone("kitchen", Rect::new(0.0, 0.0, 100.0, 100.0), 0)
            .unwrap();
        scene
            .add_draggable("pan", Rect::new(200.0, 0.0, 20.0, 20.0), Slot::new(0, 0), 1)
            .unwrap();
        DragEngine::with_scene(scene)
    }

    fn consume(_: &&'static str, _: Option<&&'static str>) -> DropDisposition {
        DropDisposition::Consume
    }

    #[test]
    fn test_down_on_empty_space_stays_idle() {
        let mut e = engine();
        let fx = e.handle(PointerEvent::mouse(PointerPhase::Down, 500.0, 500.0), &mut consume);
        assert!(fx.is_empty());
        assert_eq!(e.state(), DragState::Idle);
        assert!(!e.listening());
    }

    #[test]
    fn test_down_on_zone_does_not_drag() {
        let mut e = engine();
        e.handle(PointerEvent::mouse(PointerPhase::Down, 50.0, 50.0), &mut consume);
        assert!(!e.is_dragging());
    }

    #[test]
    fn test_down_captures_offset() {
        let mut e = engine();
        let fx = e.handle(PointerEvent::mouse(PointerPhase::Down, 205.0, 8.0), &mut consume);
        let session = e.session().unwrap();
        assert_eq!(session.offset, Point::new(5.0, 8.0));
        assert_eq!(session.origin.slot, Slot::new(0, 0));
        assert_eq!(fx, vec![DragEffect::Lifted { item: "pan", at: Point::new(200.0, 0.0) }]);
        assert!(e.listening());
    }

    #[test]
    fn test_move_without_session_is_ignored() {
        let mut e = engine();
        let fx = e.handle(PointerEvent::mouse(PointerPhase::Move, 50.0, 50.0), &mut consume);
        assert!(fx.is_empty());
        assert!(e.scene().highlighted().is_none());
    }

    #[test]
    fn test_cancel_restores_without_callback() {
        let mut e = engine();
        e.handle(PointerEvent::touch(3, PointerPhase::Down, 205.0, 5.0), &mut consume);
        e.handle(PointerEvent::touch(3, PointerPhase::Move, 50.0, 50.0), &mut consume);
        let mut called = false;
        let fx = e.handle(
            PointerEvent::touch(3, PointerPhase::Cancel, 50.0, 50.0),
            &mut |_: &&'static str, _: Option<&&'static str>| {
                called = true;
                DropDisposition::Consume
            },
        );
        assert!(!called);
        assert!(matches!(fx.last(), Some(DragEffect::Restored { item: "pan", .. })));
        assert!(e.scene().highlighted().is_none());
        assert!(e.scene().is_eligible(&"pan"));
    }

    #[test]
    fn test_consume_ends_drag_of_that_item() {
        let mut e = engine();
        e.handle(PointerEvent::mouse(PointerPhase::Down, 205.0, 5.0), &mut consume);
        e.handle(PointerEvent::mouse(PointerPhase::Move, 50.0, 50.0), &mut consume);
        assert!(e.consume(&"pan"));
        assert!(!e.is_dragging());
        assert!(e.scene().highlighted().is_none());
        assert!(!e.consume(&"pan"));
    }

    #[test]
    fn test_replace_scene_discards_session() {
        let mut e = engine();
        e.handle(PointerEvent::mouse(PointerPhase::Down, 205.0, 5.0), &mut consume);
        e.replace_scene(Scene::new());
        assert!(!e.is_dragging());
        let fx = e.handle(PointerEvent::mouse(PointerPhase::Up, 50.0, 50.0), &mut consume);
        assert!(fx.is_empty());
    }
}
