use super::*;
use crate::doc::Room;

fn room(id: RoomId, x: f64, y: f64, w: f64, h: f64) -> Room {
    Room { id, x, y, width: w, height: h, label: String::new() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn store(rooms: Vec<Room>) -> RoomStore {
    let mut s = RoomStore::new();
    for r in rooms {
        s.insert(r);
    }
    s
}

fn selected(ids: &[RoomId]) -> Selection {
    let mut sel = Selection::new();
    for &id in ids {
        sel.toggle(id);
    }
    sel
}

// =============================================================
// Handle
// =============================================================

#[test]
fn handle_all_has_eight_distinct() {
    for (i, a) in Handle::ALL.iter().enumerate() {
        for (j, b) in Handle::ALL.iter().enumerate() {
            assert_eq!(i == j, a == b);
        }
    }
}

#[test]
fn handle_edges_are_consistent() {
    for h in Handle::ALL {
        assert!(!(h.moves_left() && h.moves_right()), "{h}");
        assert!(!(h.moves_top() && h.moves_bottom()), "{h}");
        let touches = h.moves_left() || h.moves_right() || h.moves_top() || h.moves_bottom();
        assert!(touches, "{h}");
    }
}

#[test]
fn handle_positions_on_rect() {
    let r = Rect::new(10.0, 20.0, 100.0, 60.0);
    assert_eq!(Handle::Nw.position(&r), pt(10.0, 20.0));
    assert_eq!(Handle::N.position(&r), pt(60.0, 20.0));
    assert_eq!(Handle::Ne.position(&r), pt(110.0, 20.0));
    assert_eq!(Handle::E.position(&r), pt(110.0, 50.0));
    assert_eq!(Handle::Se.position(&r), pt(110.0, 80.0));
    assert_eq!(Handle::S.position(&r), pt(60.0, 80.0));
    assert_eq!(Handle::Sw.position(&r), pt(10.0, 80.0));
    assert_eq!(Handle::W.position(&r), pt(10.0, 50.0));
}

#[test]
fn handle_cursors() {
    assert_eq!(Handle::Nw.cursor(), "nwse-resize");
    assert_eq!(Handle::Se.cursor(), "nwse-resize");
    assert_eq!(Handle::Ne.cursor(), "nesw-resize");
    assert_eq!(Handle::Sw.cursor(), "nesw-resize");
    assert_eq!(Handle::N.cursor(), "ns-resize");
    assert_eq!(Handle::E.cursor(), "ew-resize");
}

#[test]
fn handle_parses_from_name() {
    for h in Handle::ALL {
        assert_eq!(h.as_str().parse::<Handle>(), Ok(h));
    }
    assert_eq!("x".parse::<Handle>(), Err(ParseHandleError("x".to_owned())));
}

#[test]
fn handle_display_is_short_name() {
    assert_eq!(Handle::Se.to_string(), "se");
    assert_eq!(Handle::W.to_string(), "w");
}

#[test]
fn unknown_handle_error_names_input() {
    let err = "north".parse::<Handle>().unwrap_err();
    assert_eq!(err.to_string(), "unknown resize handle: north");
}

#[test]
fn handle_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&Handle::Sw).unwrap(), "\"sw\"");
    let back: Handle = serde_json::from_str("\"ne\"").unwrap();
    assert_eq!(back, Handle::Ne);
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_store_hits_background() {
    let vp = Viewport::default();
    assert_eq!(hit_test(pt(10.0, 10.0), &RoomStore::new(), &Selection::new(), &vp), HitTarget::Background);
}

#[test]
fn point_inside_room_hits_body() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    assert_eq!(hit_test(pt(150.0, 150.0), &doc, &Selection::new(), &vp), HitTarget::RoomBody(1));
}

#[test]
fn point_outside_rooms_hits_background() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    assert_eq!(hit_test(pt(50.0, 50.0), &doc, &Selection::new(), &vp), HitTarget::Background);
}

#[test]
fn overlapping_rooms_prefer_topmost() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0), room(2, 150.0, 150.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    assert_eq!(hit_test(pt(160.0, 160.0), &doc, &Selection::new(), &vp), HitTarget::RoomBody(2));
    assert_eq!(hit_test(pt(110.0, 110.0), &doc, &Selection::new(), &vp), HitTarget::RoomBody(1));
}

#[test]
fn handles_ignored_when_unselected() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    // Corner point is on the border, so it is a body hit.
    assert_eq!(hit_test(pt(240.0, 200.0), &doc, &Selection::new(), &vp), HitTarget::RoomBody(1));
}

#[test]
fn selected_room_handle_hit() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    let sel = selected(&[1]);
    assert_eq!(hit_test(pt(240.0, 200.0), &doc, &sel, &vp), HitTarget::Handle { id: 1, handle: Handle::Se });
    assert_eq!(hit_test(pt(170.0, 96.0), &doc, &sel, &vp), HitTarget::Handle { id: 1, handle: Handle::N });
    assert_eq!(hit_test(pt(95.0, 150.0), &doc, &sel, &vp), HitTarget::Handle { id: 1, handle: Handle::W });
}

#[test]
fn handle_slop_is_half_handle_size() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    let sel = selected(&[1]);
    assert_eq!(hit_test(pt(246.0, 206.0), &doc, &sel, &vp), HitTarget::Handle { id: 1, handle: Handle::Se });
    assert_eq!(hit_test(pt(247.0, 200.0), &doc, &sel, &vp), HitTarget::Background);
}

#[test]
fn handle_outside_room_still_hits() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    let sel = selected(&[1]);
    assert_eq!(hit_test(pt(96.0, 96.0), &doc, &sel, &vp), HitTarget::Handle { id: 1, handle: Handle::Nw });
}

#[test]
fn handle_of_selected_room_beats_body_of_other_room() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0), room(2, 200.0, 150.0, 140.0, 100.0)]);
    let vp = Viewport::default();
    let sel = selected(&[1]);
    // (240, 200) is room 1's SE handle and inside room 2's body.
    assert_eq!(hit_test(pt(240.0, 200.0), &doc, &sel, &vp), HitTarget::Handle { id: 1, handle: Handle::Se });
}

#[test]
fn hit_test_converts_screen_to_model_with_zoom() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let mut vp = Viewport::default();
    vp.set_zoom(0.5);
    // Screen (60, 60) is model (120, 120).
    assert_eq!(hit_test(pt(60.0, 60.0), &doc, &Selection::new(), &vp), HitTarget::RoomBody(1));
    // Screen (150, 150) is model (300, 300): outside.
    assert_eq!(hit_test(pt(150.0, 150.0), &doc, &Selection::new(), &vp), HitTarget::Background);
}

#[test]
fn handle_slop_is_measured_in_screen_pixels() {
    let doc = store(vec![room(1, 100.0, 100.0, 140.0, 100.0)]);
    let mut vp = Viewport::default();
    vp.set_zoom(0.5);
    let sel = selected(&[1]);
    // SE corner model (240, 200) is screen (120, 100). 5px away on screen is still a hit.
    assert_eq!(hit_test(pt(125.0, 105.0), &doc, &sel, &vp), HitTarget::Handle { id: 1, handle: Handle::Se });
}
