//! The scene: a z-ordered spatial index of draggables and drop zones.
//!
//! This is what the drag engine hit-tests against. Instead of hiding the
//! dragged thing and asking the renderer what is underneath, the scene
//! answers "what is the topmost entity at this point, ignoring X" from
//! its own records, so the engine runs without any rendering surface.

use std::fmt;
use std::hash::Hash;

use crate::{Point, Rect, SceneError};

/// Bounds for ids used by the scene. Blanket-implemented.
pub trait EntityId: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> EntityId for T {}

/// Position of a draggable within its layout: which row, and where in
/// that row's sibling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Slot {
    pub row: usize,
    pub index: usize,
}

impl Slot {
    pub const fn new(row: usize, index: usize) -> Self {
        Self { row, index }
    }
}

/// Where a draggable is drawn right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// In its layout slot, at its home bounds.
    Anchored,
    /// Detached from the layout, top-left corner at the given point.
    Floating(Point),
}

/// Something the player can pick up.
#[derive(Debug, Clone)]
pub struct Draggable<D> {
    pub id: D,
    /// Bounds while anchored in the layout.
    pub home: Rect,
    pub slot: Slot,
    pub z: i32,
    placement: Placement,
    consumed: bool,
    seq: u64,
}

impl<D> Draggable<D> {
    /// Current on-screen bounds: home when anchored, following the
    /// pointer when floating.
    pub fn bounds(&self) -> Rect {
        match self.placement {
            Placement::Anchored => self.home,
            Placement::Floating(origin) => self.home.moved_to(origin),
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Consumed draggables are hidden: not drawn, not hit, not draggable.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// A region a draggable can be released onto.
#[derive(Debug, Clone)]
pub struct DropZone<Z> {
    pub id: Z,
    pub bounds: Rect,
    pub z: i32,
    seq: u64,
}

/// Result of a hit test: the topmost entity under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit<'a, D, Z> {
    Draggable(&'a D),
    Zone(&'a Z),
}

/// Z-ordered index of draggables and drop zones.
///
/// Higher `z` is on top. Within the same `z`, whatever was added later
/// is on top, like sibling order in a document.
#[derive(Debug, Clone)]
pub struct Scene<D, Z> {
    draggables: Vec<Draggable<D>>,
    zones: Vec<DropZone<Z>>,
    highlighted: Option<Z>,
    next_seq: u64,
}

impl<D, Z> Default for Scene<D, Z> {
    fn default() -> Self {
        Self {
            draggables: Vec::new(),
            zones: Vec::new(),
            highlighted: None,
            next_seq: 0,
        }
    }
}

impl<D: EntityId, Z: EntityId> Scene<D, Z> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a draggable anchored at `home` in `slot`.
    pub fn add_draggable(
        &mut self,
        id: D,
        home: Rect,
        slot: Slot,
        z: i32,
    ) -> Result<(), SceneError> {
        if self.draggable(&id).is_some() {
            return Err(SceneError::DuplicateDraggable(format!("{id:?}")));
        }
        let seq = self.bump_seq();
        self.draggables.push(Draggable {
            id,
            home,
            slot,
            z,
            placement: Placement::Anchored,
            consumed: false,
            seq,
        });
        Ok(())
    }

    /// Adds a drop zone.
    pub fn add_zone(&mut self, id: Z, bounds: Rect, z: i32) -> Result<(), SceneError> {
        if self.zones.iter().any(|zone| zone.id == id) {
            return Err(SceneError::DuplicateZone(format!("{id:?}")));
        }
        let seq = self.bump_seq();
        self.zones.push(DropZone { id, bounds, z, seq });
        Ok(())
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.draggables.clear();
        self.zones.clear();
        self.highlighted = None;
    }

    pub fn draggable(&self, id: &D) -> Option<&Draggable<D>> {
        self.draggables.iter().find(|d| &d.id == id)
    }

    fn draggable_mut(&mut self, id: &D) -> Option<&mut Draggable<D>> {
        self.draggables.iter_mut().find(|d| &d.id == id)
    }

    /// Draggables in layout order (row, then sibling index).
    pub fn draggables(&self) -> Vec<&Draggable<D>> {
        let mut all: Vec<_> = self.draggables.iter().collect();
        all.sort_by_key(|d| d.slot);
        all
    }

    pub fn zones(&self) -> &[DropZone<Z>] {
        &self.zones
    }

    /// A draggable can be picked up if it exists and was not consumed.
    pub fn is_eligible(&self, id: &D) -> bool {
        self.draggable(id).is_some_and(|d| !d.consumed)
    }

    /// The drop zone currently highlighted as the hover target.
    pub fn highlighted(&self) -> Option<&Z> {
        self.highlighted.as_ref()
    }

    /// The topmost visible entity at `point`, skipping `exclude`.
    ///
    /// Consumed draggables are invisible. A visible draggable on top of a
    /// zone occludes it, so the zone is not hit.
    pub fn hit_test(&self, point: Point, exclude: Option<&D>) -> Option<Hit<'_, D, Z>> {
        let draggable = self
            .draggables
            .iter()
            .filter(|d| !d.consumed && Some(&d.id) != exclude)
            .filter(|d| d.bounds().contains(point))
            .max_by_key(|d| (d.z, d.seq));
        let zone = self
            .zones
            .iter()
            .filter(|z| z.bounds.contains(point))
            .max_by_key(|z| (z.z, z.seq));

        match (draggable, zone) {
            (Some(d), Some(z)) if (z.z, z.seq) > (d.z, d.seq) => Some(Hit::Zone(&z.id)),
            (Some(d), _) => Some(Hit::Draggable(&d.id)),
            (None, Some(z)) => Some(Hit::Zone(&z.id)),
            (None, None) => None,
        }
    }

    /// The drop zone at `point`, if it is the topmost visible entity
    /// once `exclude` is ignored.
    pub fn zone_at(&self, point: Point, exclude: Option<&D>) -> Option<&Z> {
        match self.hit_test(point, exclude)? {
            Hit::Zone(zone) => Some(zone),
            Hit::Draggable(_) => None,
        }
    }

    /// Moves the hover highlight. Returns the previous target if it changed.
    pub(crate) fn set_highlight(&mut self, zone: Option<Z>) -> Option<Option<Z>> {
        if self.highlighted == zone {
            return None;
        }
        Some(std::mem::replace(&mut self.highlighted, zone))
    }

    pub(crate) fn float(&mut self, id: &D, origin: Point) {
        if let Some(d) = self.draggable_mut(id) {
            d.placement = Placement::Floating(origin);
        }
    }

    /// Puts a draggable back at `home` in `slot`.
    pub(crate) fn anchor(&mut self, id: &D, home: Rect, slot: Slot) {
        if let Some(d) = self.draggable_mut(id) {
            d.home = home;
            d.slot = slot;
            d.placement = Placement::Anchored;
        }
    }

    /// Hides a draggable for good (it was placed).
    pub(crate) fn consume(&mut self, id: &D) {
        if let Some(d) = self.draggable_mut(id) {
            d.consumed = true;
            d.placement = Placement::Anchored;
        }
    }
}
