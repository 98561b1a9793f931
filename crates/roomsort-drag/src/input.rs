//! Unified pointer input.
//!
//! Mouse and touch arrive in different shapes. Browsers report touch
//! events with lists of touches (all current touches on start/move, the
//! touches that just lifted on end). The drag engine only wants one
//! stream: "pointer P went down / moved / went up at (x, y)".
//! [`RawInput::to_pointer`] does that translation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;

/// Which physical pointer an event came from.
///
/// The mouse is a single pointer. Each finger on a touch screen has its
/// own identifier for as long as it stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mouse => write!(f, "mouse"),
            Self::Touch(id) => write!(f, "touch-{id}"),
        }
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (e.g. `touchcancel`).
    Cancel,
}

/// One normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            pointer: PointerId::Mouse,
            phase,
            position: Point::new(x, y),
        }
    }

    pub fn touch(id: u64, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            pointer: PointerId::Touch(id),
            phase,
            position: Point::new(x, y),
        }
    }
}

/// A single finger in a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub id: u64,
    pub position: Point,
}

/// Input as the platform reports it, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RawInput {
    MouseDown { position: Point },
    MouseMove { position: Point },
    MouseUp { position: Point },
    /// All touches currently on the surface.
    TouchStart { touches: Vec<Touch> },
    /// All touches currently on the surface.
    TouchMove { touches: Vec<Touch> },
    /// The touches that just lifted.
    TouchEnd { changed: Vec<Touch> },
    /// The touches the platform cancelled.
    TouchCancel { changed: Vec<Touch> },
}

impl RawInput {
    /// Normalizes this input into a single pointer event.
    ///
    /// `captured` is the pointer owning the current drag, if any. Touch
    /// move/end/cancel events only produce an event for the captured
    /// finger, so a second finger can neither steer nor end someone
    /// else's drag. Touch start always uses the first listed touch.
    pub fn to_pointer(&self, captured: Option<PointerId>) -> Option<PointerEvent> {
        match self {
            Self::MouseDown { position } => Some(mouse(PointerPhase::Down, *position)),
            Self::MouseMove { position } => Some(mouse(PointerPhase::Move, *position)),
            Self::MouseUp { position } => Some(mouse(PointerPhase::Up, *position)),
            Self::TouchStart { touches } => touches
                .first()
                .map(|t| touch(t, PointerPhase::Down)),
            Self::TouchMove { touches } => {
                pick(touches, captured).map(|t| touch(t, PointerPhase::Move))
            }
            Self::TouchEnd { changed } => {
                pick(changed, captured).map(|t| touch(t, PointerPhase::Up))
            }
            Self::TouchCancel { changed } => {
                pick(changed, captured).map(|t| touch(t, PointerPhase::Cancel))
            }
        }
    }
}

fn mouse(phase: PointerPhase, position: Point) -> PointerEvent {
    PointerEvent {
        pointer: PointerId::Mouse,
        phase,
        position,
    }
}

fn touch(t: &Touch, phase: PointerPhase) -> PointerEvent {
    PointerEvent {
        pointer: PointerId::Touch(t.id),
        phase,
        position: t.position,
    }
}

/// The captured finger if it is in the list; otherwise the first one.
fn pick(touches: &[Touch], captured: Option<PointerId>) -> Option<&Touch> {
    match captured {
        Some(PointerId::Touch(id)) => touches.iter().find(|t| t.id == id),
        _ => touches.first(),
    }
}
