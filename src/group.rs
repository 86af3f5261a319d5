//! Group composer: merge selected objects into one nested group.
//!
//! Merging computes the union bounding box over the selected objects'
//! AABBs, re-expresses each object relative to the box origin, and replaces
//! them with a single Group object that owns them by value. The group's
//! `original_width/height` are captured here; later resizes scale all
//! descendants through the `width / original_width` ratio. Merge is one-way.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use std::collections::HashSet;

use crate::geom::{self, Rect};
use crate::scene::{CanvasObject, ObjectId, ObjectKind, SceneStore, Style};

/// Merge the selected top-level objects into a new group, appended topmost.
///
/// Requires at least two selected objects present in the store; otherwise a
/// no-op returning `None`. Children keep their z-order. Returns the new
/// group's id.
pub fn merge_selected(store: &mut SceneStore, selected: &[ObjectId]) -> Option<ObjectId> {
    let ids: HashSet<ObjectId> = selected.iter().copied().collect();
    let present = store.objects().iter().filter(|o| ids.contains(&o.id)).count();
    if present < 2 {
        return None;
    }

    let mut picked = Vec::with_capacity(present);
    let mut kept = Vec::with_capacity(store.len() - present);
    for obj in store.objects_mut().drain(..) {
        if ids.contains(&obj.id) {
            picked.push(obj);
        } else {
            kept.push(obj);
        }
    }
    *store.objects_mut() = kept;

    let bounds = union_bounds(&picked);
    let clamped = geom::clamp_to_canvas(bounds.x, bounds.y, bounds.width, bounds.height);
    for child in &mut picked {
        translate(child, -clamped.x, -clamped.y);
    }

    let kind = ObjectKind::Group {
        children: picked,
        original_width: clamped.width,
        original_height: clamped.height,
    };
    let group = CanvasObject::new(kind, clamped, Style::default());
    let id = group.id;
    store.push(group);
    Some(id)
}

/// Union of the objects' axis-aligned bounding rects.
fn union_bounds(objects: &[CanvasObject]) -> Rect {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for obj in objects {
        min_x = min_x.min(obj.x);
        min_y = min_y.min(obj.y);
        max_x = max_x.max(obj.x + obj.width);
        max_y = max_y.max(obj.y + obj.height);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Shift an object (and any frame-absolute payload) without clamping —
/// child coordinates are group-local, not canvas coordinates.
fn translate(obj: &mut CanvasObject, dx: f64, dy: f64) {
    obj.x += dx;
    obj.y += dy;
    if let ObjectKind::Drawn { path, particles, .. } = &mut obj.kind {
        for p in path.iter_mut() {
            p.x += dx;
            p.y += dy;
        }
        for p in particles.iter_mut() {
            p.x += dx;
            p.y += dy;
        }
    }
}
