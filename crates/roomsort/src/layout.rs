//! Screen layout for a round: the room as one big drop zone, the items
//! in rows underneath.

use roomsort_config::{ItemId, RoomId};
use roomsort_drag::{Rect, Scene, SceneError, Slot};
use roomsort_round::RoundState;
use serde::{Deserialize, Serialize};

const ZONE_Z: i32 = 0;
const ITEM_Z: i32 = 1;

/// Lays out a round in fixed-size cells, `columns` per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowLayout {
    /// Where the active room is drawn and where drops count.
    pub room_bounds: Rect,
    /// Top-left corner of the first item cell.
    pub items_x: f32,
    pub items_y: f32,
    pub item_size: f32,
    pub gap: f32,
    pub columns: usize,
}

impl Default for RowLayout {
    /// Two rows of five under an 800x450 room.
    fn default() -> Self {
        Self {
            room_bounds: Rect::new(0.0, 0.0, 800.0, 450.0),
            items_x: 0.0,
            items_y: 470.0,
            item_size: 150.0,
            gap: 12.5,
            columns: 5,
        }
    }
}

impl RowLayout {
    /// The cell for the `n`th item in display order.
    pub fn slot(&self, n: usize) -> Slot {
        let columns = self.columns.max(1);
        Slot::new(n / columns, n % columns)
    }

    /// On-screen bounds of a cell.
    pub fn slot_bounds(&self, slot: Slot) -> Rect {
        let step = self.item_size + self.gap;
        Rect::new(
            self.items_x + slot.index as f32 * step,
            self.items_y + slot.row as f32 * step,
            self.item_size,
            self.item_size,
        )
    }

    /// Builds the drag scene for a round.
    pub fn scene_for(&self, round: &RoundState) -> Result<Scene<ItemId, RoomId>, SceneError> {
        let mut scene = Scene::new();
        scene.add_zone(round.room.id.clone(), self.room_bounds, ZONE_Z)?;
        for (n, item) in round.objects_in_play.iter().enumerate() {
            let slot = self.slot(n);
            scene.add_draggable(item.id.clone(), self.slot_bounds(slot), slot, ITEM_Z)?;
        }
        Ok(scene)
    }
}
