//! Pointer drag-and-drop for roomsort.
//!
//! A [`Scene`] holds draggables and drop zones with screen bounds and a
//! z-order. A [`DragEngine`] consumes unified pointer events (mouse and
//! touch look the same after [`RawInput::to_pointer`]) and runs at most one
//! drag session at a time:
//!
//! - pointer-down on an eligible draggable lifts it and records the grab offset
//! - pointer-move makes it follow the pointer and highlights the zone under it
//! - pointer-up reports `(item, zone)` to a [`DropHandler`] exactly once
//! - the handler answers [`DropDisposition::Consume`] or [`DropDisposition::Return`]
//!
//! The engine has no idea what the items or zones mean. The round engine in
//! `roomsort-round` decides whether a drop was correct.

mod engine;
mod error;
mod geometry;
mod input;
mod scene;

pub use engine::{
    DragEffect, DragEngine, DragSession, DragState, DropDisposition, DropHandler, Origin,
};
pub use error::SceneError;
pub use geometry::{Point, Rect};
pub use input::{PointerEvent, PointerId, PointerPhase, RawInput, Touch};
pub use scene::{Draggable, DropZone, EntityId, Hit, Placement, Scene, Slot};
