//! Integration tests for the controller: real pointer gestures against
//! real rounds.

use std::sync::Arc;
use std::time::Duration;

use roomsort::prelude::*;
use roomsort::drag::Rect;

// =========================================================================
// Helpers
// =========================================================================

type Controller = GameController<RecordingSink>;

fn controller(seed: u64) -> Controller {
    let engine = RoundEngine::with_seed(Arc::new(GameConfig::house()), RecordingSink::new(), seed);
    GameController::new(engine, RowLayout::default())
}

fn centre(r: Rect) -> (f32, f32) {
    (r.x + r.width / 2.0, r.y + r.height / 2.0)
}

fn bounds_of(c: &Controller, item: &ItemId) -> Rect {
    c.drag().scene().draggable(item).expect("item on board").bounds()
}

fn room_centre(c: &Controller) -> (f32, f32) {
    centre(c.layout().room_bounds)
}

fn first_pending(c: &Controller) -> ItemId {
    c.engine().round().unwrap().pending_correct.iter().next().cloned().unwrap()
}

fn first_distractor(c: &Controller) -> ItemId {
    let round = c.engine().round().unwrap();
    round
        .objects_in_play
        .iter()
        .find(|i| !i.belongs_in(&round.room.id))
        .map(|i| i.id.clone())
        .unwrap()
}

/// Drags `item` from its cell to `(x, y)` with the mouse.
fn drag_to(c: &mut Controller, item: &ItemId, x: f32, y: f32) -> PointerReport {
    let (sx, sy) = centre(bounds_of(c, item));
    c.pointer(&RawInput::MouseDown { position: Point::new(sx, sy) }).unwrap();
    c.pointer(&RawInput::MouseMove { position: Point::new(x, y) }).unwrap();
    c.pointer(&RawInput::MouseUp { position: Point::new(x, y) }).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_board_follows_round() {
    let mut c = controller(1);
    assert_eq!(c.drag().scene().draggables().len(), 0);

    c.start_game().unwrap();
    let round = c.engine().round().unwrap();
    assert_eq!(c.drag().scene().draggables().len(), round.objects_in_play.len());
    assert_eq!(c.drag().scene().zones()[0].id, round.room.id);
}

#[test]
fn test_dragging_correct_item_onto_room_consumes_it() {
    let mut c = controller(2);
    c.start_game().unwrap();
    let item = first_pending(&c);
    let (x, y) = room_centre(&c);

    let report = drag_to(&mut c, &item, x, y);

    assert_eq!(report.outcome, Some(DropOutcome::Correct { round_complete: false }));
    assert!(report.effects.contains(&DragEffect::Consumed { item: item.clone() }));
    assert!(!c.drag().scene().is_eligible(&item));
    assert_eq!(c.engine().score(), 10);
}

#[test]
fn test_dragging_distractor_onto_room_bounces_back() {
    let mut c = controller(3);
    c.start_game().unwrap();
    let item = first_distractor(&c);
    let home = bounds_of(&c, &item);
    let (x, y) = room_centre(&c);

    let report = drag_to(&mut c, &item, x, y);

    assert_eq!(report.outcome, Some(DropOutcome::Incorrect));
    assert!(matches!(report.effects.last(), Some(DragEffect::Restored { .. })));
    assert_eq!(bounds_of(&c, &item), home);
    assert_eq!(c.engine().score(), -5);
}

#[test]
fn test_release_outside_room_is_no_drop() {
    let mut c = controller(4);
    c.start_game().unwrap();
    let item = first_pending(&c);

    let report = drag_to(&mut c, &item, 2_000.0, 2_000.0);

    assert_eq!(report.outcome, Some(DropOutcome::NoDrop));
    assert!(c.drag().scene().is_eligible(&item));
    assert_eq!(c.engine().score(), 0);
}

#[test]
fn test_hover_highlights_room_while_dragging() {
    let mut c = controller(5);
    c.start_game().unwrap();
    let item = first_pending(&c);
    let (sx, sy) = centre(bounds_of(&c, &item));
    let (x, y) = room_centre(&c);

    c.pointer(&RawInput::MouseDown { position: Point::new(sx, sy) }).unwrap();
    c.pointer(&RawInput::MouseMove { position: Point::new(x, y) }).unwrap();

    let snap = c.snapshot();
    assert_eq!(snap.dragging, Some(item));
    assert_eq!(snap.highlighted, Some(c.engine().round().unwrap().room.id.clone()));
}

#[test]
fn test_new_round_replaces_board() {
    let mut c = controller(6);
    c.start_game().unwrap();
    let first_room = c.engine().round().unwrap().room.id.clone();

    let room = first_room.clone();
    let pending: Vec<ItemId> = c.engine().round().unwrap().pending_correct.iter().cloned().collect();
    for item in &pending {
        c.drop_item(item, Some(&room)).unwrap();
    }
    c.advance(Duration::from_millis(1_500)).unwrap();

    let round = c.engine().round().unwrap();
    assert_ne!(round.room.id, first_room);
    assert_eq!(c.drag().scene().zones()[0].id, round.room.id);
    for item in &round.objects_in_play {
        assert!(c.drag().scene().is_eligible(&item.id));
    }
}

#[test]
fn test_drop_item_hides_correct_items() {
    let mut c = controller(7);
    c.start_game().unwrap();
    let item = first_pending(&c);
    let room = c.engine().round().unwrap().room.id.clone();

    let outcome = c.drop_item(&item, Some(&room)).unwrap();
    assert!(outcome.consumes_item());
    assert!(!c.drag().scene().is_eligible(&item));
}

#[test]
fn test_pause_puts_carried_item_back() {
    let mut c = controller(8);
    c.start_game().unwrap();
    let item = first_pending(&c);
    let (sx, sy) = centre(bounds_of(&c, &item));
    c.pointer(&RawInput::MouseDown { position: Point::new(sx, sy) }).unwrap();
    assert!(c.drag().is_dragging());

    assert!(c.pause());
    assert!(!c.drag().is_dragging());

    // Nothing can be picked up while paused.
    let (x, y) = room_centre(&c);
    let report = drag_to(&mut c, &item, x, y);
    assert!(report.effects.is_empty());
    assert_eq!(report.outcome, None);
    assert!(c.drag().scene().is_eligible(&item));
    assert_eq!(c.engine().score(), 0);

    assert!(c.resume());
    let report = drag_to(&mut c, &item, x, y);
    assert!(matches!(report.outcome, Some(DropOutcome::Correct { .. })));
}

#[test]
fn test_normalized_pointer_events_drive_a_drag() {
    let mut c = controller(11);
    c.start_game().unwrap();
    let item = first_distractor(&c);
    let (sx, sy) = centre(bounds_of(&c, &item));
    let (x, y) = room_centre(&c);

    let down = c.pointer_event(PointerEvent::mouse(PointerPhase::Down, sx, sy)).unwrap();
    assert!(matches!(&down.effects[..], [DragEffect::Lifted { item: lifted, .. }] if *lifted == item));
    c.pointer_event(PointerEvent::mouse(PointerPhase::Move, x, y)).unwrap();
    let up = c.pointer_event(PointerEvent::mouse(PointerPhase::Up, x, y)).unwrap();

    assert_eq!(up.outcome, Some(DropOutcome::Incorrect));
    assert!(c.snapshot().game.phase.in_game());
}

#[test]
fn test_game_over_clears_board() {
    let mut c = controller(9);
    c.start_game().unwrap();
    assert!(c.end_game().unwrap());
    assert!(c.drag().scene().draggables().is_empty());
    assert!(c.drag().scene().zones().is_empty());
    assert_eq!(c.snapshot().game.phase, Phase::GameOver);
}

#[test]
fn test_touch_gesture_places_item() {
    let mut c = controller(10);
    c.start_game().unwrap();
    let item = first_pending(&c);
    let (sx, sy) = centre(bounds_of(&c, &item));
    let (x, y) = room_centre(&c);
    let touch = |x, y| Touch { id: 1, position: Point::new(x, y) };

    c.pointer(&RawInput::TouchStart { touches: vec![touch(sx, sy)] }).unwrap();
    c.pointer(&RawInput::TouchMove { touches: vec![touch(x, y)] }).unwrap();
    let report = c.pointer(&RawInput::TouchEnd { changed: vec![touch(x, y)] }).unwrap();

    assert!(matches!(report.outcome, Some(DropOutcome::Correct { .. })));
}
