#![allow(clippy::float_cmp)]

use super::*;

use crate::consts::{CANVAS_WIDTH, MIN_OBJECT_SIZE};
use crate::geom::Rect;

// =============================================================
// Helpers
// =============================================================

fn make_rect_at(x: f64, y: f64, w: f64, h: f64) -> CanvasObject {
    CanvasObject::new(ObjectKind::Rect, Rect::new(x, y, w, h), Style::default())
}

fn make_drawn(path: Vec<Point>) -> CanvasObject {
    let kind = ObjectKind::Drawn { path, brush: BrushKind::Pen, particles: Vec::new() };
    CanvasObject::new(kind, Rect::new(0.0, 0.0, 100.0, 100.0), Style::default())
}

fn drawn_path(obj: &CanvasObject) -> &[Point] {
    match &obj.kind {
        ObjectKind::Drawn { path, .. } => path,
        other => panic!("expected Drawn, got {other:?}"),
    }
}

// =============================================================
// CanvasObject basics
// =============================================================

#[test]
fn new_assigns_unique_ids() {
    let a = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let b = make_rect_at(0.0, 0.0, 50.0, 50.0);
    assert_ne!(a.id, b.id);
}

#[test]
fn center_is_rect_midpoint() {
    let obj = make_rect_at(10.0, 20.0, 100.0, 60.0);
    assert_eq!(obj.center(), Point::new(60.0, 50.0));
}

#[test]
fn group_scale_none_for_non_group() {
    let obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    assert!(obj.group_scale().is_none());
}

#[test]
fn group_scale_tracks_resize_ratio() {
    let kind = ObjectKind::Group {
        children: vec![],
        original_width: 100.0,
        original_height: 50.0,
    };
    let mut group = CanvasObject::new(kind, Rect::new(0.0, 0.0, 100.0, 50.0), Style::default());
    assert_eq!(group.group_scale(), Some((1.0, 1.0)));

    group.set_rect(0.0, 0.0, 200.0, 75.0);
    assert_eq!(group.group_scale(), Some((2.0, 1.5)));
}

// =============================================================
// set_rect
// =============================================================

#[test]
fn set_rect_moves_and_resizes() {
    let mut obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    obj.set_rect(10.0, 20.0, 80.0, 90.0);
    assert_eq!(obj.rect(), Rect::new(10.0, 20.0, 80.0, 90.0));
}

#[test]
fn set_rect_clamps_position_to_canvas() {
    let mut obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    obj.set_rect(-30.0, 5.0, 50.0, 50.0);
    assert_eq!(obj.x, 0.0);
    assert_eq!(obj.y, 5.0);
}

#[test]
fn set_rect_clamps_size_to_minimum() {
    let mut obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    obj.set_rect(0.0, 0.0, 3.0, 4.0);
    assert_eq!(obj.width, MIN_OBJECT_SIZE);
    assert_eq!(obj.height, MIN_OBJECT_SIZE);
}

#[test]
fn set_rect_translates_drawn_path() {
    let mut obj = make_drawn(vec![Point::new(10.0, 10.0), Point::new(90.0, 90.0)]);
    obj.set_rect(50.0, 30.0, 100.0, 100.0);
    let path = drawn_path(&obj);
    assert_eq!(path[0], Point::new(60.0, 40.0));
    assert_eq!(path[1], Point::new(140.0, 120.0));
}

#[test]
fn set_rect_rescales_drawn_path() {
    let mut obj = make_drawn(vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]);
    obj.set_rect(0.0, 0.0, 200.0, 50.0);
    let path = drawn_path(&obj);
    assert_eq!(path[0], Point::new(0.0, 0.0));
    assert_eq!(path[1], Point::new(200.0, 50.0));
}

#[test]
fn set_rect_inverse_resize_round_trips() {
    let original = vec![Point::new(20.0, 20.0), Point::new(60.0, 80.0)];
    let mut obj = make_drawn(original.clone());
    obj.set_rect(0.0, 0.0, 250.0, 40.0);
    obj.set_rect(0.0, 0.0, 100.0, 100.0);
    let path = drawn_path(&obj);
    for (got, want) in path.iter().zip(&original) {
        assert!((got.x - want.x).abs() < 1e-9);
        assert!((got.y - want.y).abs() < 1e-9);
    }
}

// =============================================================
// SceneStore
// =============================================================

#[test]
fn store_push_preserves_order() {
    let mut store = SceneStore::new();
    let a = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let b = make_rect_at(10.0, 10.0, 50.0, 50.0);
    let (id_a, id_b) = (a.id, b.id);
    store.push(a);
    store.push(b);
    assert_eq!(store.objects()[0].id, id_a);
    assert_eq!(store.objects()[1].id, id_b);
}

#[test]
fn store_remove_returns_object() {
    let mut store = SceneStore::new();
    let obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let id = obj.id;
    store.push(obj);
    let removed = store.remove(&id);
    assert_eq!(removed.map(|o| o.id), Some(id));
    assert!(store.is_empty());
}

#[test]
fn store_remove_missing_is_none() {
    let mut store = SceneStore::new();
    assert!(store.remove(&Uuid::new_v4()).is_none());
}

#[test]
fn store_replace_all_swaps_contents() {
    let mut store = SceneStore::new();
    store.push(make_rect_at(0.0, 0.0, 50.0, 50.0));
    let replacement = make_rect_at(5.0, 5.0, 20.0, 20.0);
    let id = replacement.id;
    store.replace_all(vec![replacement]);
    assert_eq!(store.len(), 1);
    assert!(store.get(&id).is_some());
}

// =============================================================
// apply_partial
// =============================================================

#[test]
fn apply_partial_updates_geometry() {
    let mut store = SceneStore::new();
    let obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let id = obj.id;
    store.push(obj);

    let partial = PartialObject { x: Some(40.0), width: Some(70.0), ..Default::default() };
    assert!(store.apply_partial(&id, &partial));

    let obj = store.get(&id).unwrap();
    assert_eq!(obj.x, 40.0);
    assert_eq!(obj.width, 70.0);
    assert_eq!(obj.y, 0.0);
}

#[test]
fn apply_partial_clamps_geometry() {
    let mut store = SceneStore::new();
    let obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let id = obj.id;
    store.push(obj);

    let partial = PartialObject { x: Some(CANVAS_WIDTH + 100.0), ..Default::default() };
    store.apply_partial(&id, &partial);
    assert_eq!(store.get(&id).unwrap().x, CANVAS_WIDTH - 50.0);
}

#[test]
fn apply_partial_updates_style() {
    let mut store = SceneStore::new();
    let obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let id = obj.id;
    store.push(obj);

    let partial = PartialObject {
        fill_color: Some("#00FF00".to_owned()),
        opacity: Some(0.5),
        ..Default::default()
    };
    store.apply_partial(&id, &partial);

    let obj = store.get(&id).unwrap();
    assert_eq!(obj.style.fill_color, "#00FF00");
    assert_eq!(obj.style.opacity, 0.5);
}

#[test]
fn apply_partial_normalizes_opacity() {
    let mut store = SceneStore::new();
    let obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let id = obj.id;
    store.push(obj);

    store.apply_partial(&id, &PartialObject { opacity: Some(3.0), ..Default::default() });
    assert_eq!(store.get(&id).unwrap().style.opacity, 1.0);

    store.apply_partial(&id, &PartialObject { opacity: Some(-0.1), ..Default::default() });
    assert_eq!(store.get(&id).unwrap().style.opacity, 0.0);
}

#[test]
fn apply_partial_missing_object_is_noop() {
    let mut store = SceneStore::new();
    let partial = PartialObject { x: Some(1.0), ..Default::default() };
    assert!(!store.apply_partial(&Uuid::new_v4(), &partial));
}

#[test]
fn partial_is_empty() {
    assert!(PartialObject::default().is_empty());
    assert!(!PartialObject { x: Some(0.0), ..Default::default() }.is_empty());
}

// =============================================================
// Serialization round trip
// =============================================================

#[test]
fn object_tree_serde_round_trip() {
    let child = make_drawn(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    let kind = ObjectKind::Group {
        children: vec![child],
        original_width: 100.0,
        original_height: 100.0,
    };
    let mut group = CanvasObject::new(kind, Rect::new(0.0, 0.0, 100.0, 100.0), Style::default());
    group.erase_mask.push(EraseStroke {
        points: vec![ErasePoint { x: 0.5, y: 0.5, size: 0.2 }],
    });

    let json = serde_json::to_string(&group).unwrap();
    let back: CanvasObject = serde_json::from_str(&json).unwrap();
    assert_eq!(back, group);
}

#[test]
fn object_kind_tag_is_lowercase() {
    let obj = make_rect_at(0.0, 0.0, 50.0, 50.0);
    let json = serde_json::to_value(&obj).unwrap();
    assert_eq!(json["kind"], "rect");
}
