use super::*;

use crate::geom::Rect;
use crate::scene::{ObjectKind, Style};

fn scene_with_one() -> Vec<CanvasObject> {
    vec![CanvasObject::new(
        ObjectKind::Rect,
        Rect::new(0.0, 0.0, 50.0, 50.0),
        Style::default(),
    )]
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_history_has_nothing_to_undo_or_redo() {
    let h = History::new();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn undo_at_start_is_noop() {
    let mut h = History::new();
    assert!(h.undo().is_none());
}

#[test]
fn redo_at_end_is_noop() {
    let mut h = History::new();
    h.push(&scene_with_one());
    assert!(h.redo().is_none());
}

// =============================================================
// push / undo / redo
// =============================================================

#[test]
fn push_makes_undo_available() {
    let mut h = History::new();
    h.push(&scene_with_one());
    assert!(h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn undo_returns_prior_snapshot() {
    let mut h = History::new();
    h.push(&scene_with_one());
    let restored = h.undo().unwrap();
    assert!(restored.is_empty());
    assert!(h.can_redo());
}

#[test]
fn redo_after_undo_restores_snapshot() {
    let mut h = History::new();
    let scene = scene_with_one();
    h.push(&scene);
    h.undo().unwrap();
    let restored = h.redo().unwrap();
    assert_eq!(restored, scene);
}

#[test]
fn undo_redo_round_trip_is_bit_identical() {
    let mut h = History::new();
    let first = scene_with_one();
    let mut second = first.clone();
    second[0].x = 25.0;
    h.push(&first);
    h.push(&second);

    h.undo().unwrap();
    let forward = h.redo().unwrap();
    assert_eq!(forward, second);
    let back = h.undo().unwrap();
    assert_eq!(back, first);
}

#[test]
fn push_truncates_redo_tail() {
    let mut h = History::new();
    let first = scene_with_one();
    h.push(&first);
    h.undo().unwrap();

    let replacement = scene_with_one();
    h.push(&replacement);
    assert!(!h.can_redo());
    assert_eq!(h.undo().unwrap(), Vec::<CanvasObject>::new());
    assert_eq!(h.redo().unwrap(), replacement);
}

#[test]
fn each_commit_is_separately_undoable() {
    let mut h = History::new();
    for i in 0..5 {
        let mut scene = scene_with_one();
        scene[0].x = f64::from(i);
        h.push(&scene);
    }
    let mut undos = 0;
    while h.undo().is_some() {
        undos += 1;
    }
    assert_eq!(undos, 5);
}

// =============================================================
// reset
// =============================================================

#[test]
fn reset_clears_everything() {
    let mut h = History::new();
    h.push(&scene_with_one());
    h.push(&scene_with_one());
    h.reset();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}
