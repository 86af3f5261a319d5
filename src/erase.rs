//! Erase-mask accumulation.
//!
//! Erase samples are stored normalized to the erased object's own frame
//! (fractions of its width/height; size relative to its smaller absolute
//! dimension), so masks survive later moves, resizes, and rotations without
//! recomputation. Groups are resolved recursively: the sample point is
//! re-projected into each group's local, unscaled frame and handed to the
//! topmost child whose original bounding box contains it, with the group's
//! `width / original_width` scale accumulated down the chain.
//!
//! The renderer performs the inverse mapping (see `render`), subtracting one
//! `destination-out` circle per stored point from the leaf's off-screen
//! buffer.

#[cfg(test)]
#[path = "erase_test.rs"]
mod erase_test;

use std::collections::HashSet;

use crate::geom::{self, Point};
use crate::hit;
use crate::scene::{CanvasObject, ErasePoint, EraseStroke, ObjectId, ObjectKind, SceneStore};

/// Apply one erase-circle sample at canvas point `p` with diameter
/// `diameter` against every top-level object under it.
///
/// `in_progress` tracks which leaves already received a stroke during the
/// current gesture; the first sample for a leaf opens a fresh stroke,
/// subsequent samples append to it. Returns whether any point was recorded.
pub fn apply_sample(
    store: &mut SceneStore,
    p: Point,
    diameter: f64,
    in_progress: &mut HashSet<ObjectId>,
) -> bool {
    let mut recorded = false;
    for obj in store.objects_mut() {
        if hit::hit_test(p, obj) {
            recorded |= erase_into(obj, p, diameter, 1.0, 1.0, in_progress);
        }
    }
    recorded
}

/// Recurse into `obj` with `p` expressed in the object's containing frame
/// and the ancestor scale chain accumulated in `sx`/`sy`.
fn erase_into(
    obj: &mut CanvasObject,
    p: Point,
    diameter: f64,
    sx: f64,
    sy: f64,
    in_progress: &mut HashSet<ObjectId>,
) -> bool {
    let center = obj.center();
    let local = geom::to_local_space(p, center.x, center.y, obj.rotation);

    if let Some((gsx, gsy)) = obj.group_scale() {
        // Project into the group's local, unscaled frame and descend into
        // the topmost child whose original bounding box contains the point.
        let projected = Point::new((local.x - obj.x) / gsx, (local.y - obj.y) / gsy);
        if let ObjectKind::Group { children, .. } = &mut obj.kind {
            for child in children.iter_mut().rev() {
                if child.rect().contains(projected) {
                    return erase_into(child, projected, diameter, sx * gsx, sy * gsy, in_progress);
                }
            }
        }
        return false;
    }

    let lx = (local.x - obj.x) / obj.width;
    let ly = (local.y - obj.y) / obj.height;
    let size = diameter / (obj.width * sx).min(obj.height * sy);

    if in_progress.insert(obj.id) {
        obj.erase_mask.push(EraseStroke::default());
    }
    if let Some(stroke) = obj.erase_mask.last_mut() {
        stroke.points.push(ErasePoint { x: lx, y: ly, size });
    }
    true
}
