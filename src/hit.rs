//! Hit-testing against canvas objects and selection handles.
//!
//! Body tests un-rotate the pointer into the object's local frame and test
//! the bounding rect; drawn strokes are tested against their path segments
//! instead. Handle tests (resize/rotate) only apply when exactly one object
//! is selected and are checked before body hits by the input dispatcher.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{
    PATH_HIT_THRESHOLD, RESIZE_HANDLE_TOLERANCE, ROTATE_HANDLE_OFFSET, ROTATE_HANDLE_TOLERANCE,
};
use crate::geom::{self, Point};
use crate::scene::{CanvasObject, ObjectId, ObjectKind, SceneStore};

/// Which part of a selected object was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    RotateHandle,
}

/// Anchor position for the eight resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_west(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_north(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_east(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_south(self) -> bool {
        matches!(self, Self::Se | Self::S | Self::Sw)
    }

    /// CSS cursor name for this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Test whether `p` (in the object's containing frame) hits the object body.
///
/// Drawn strokes hit when `p` lies within [`PATH_HIT_THRESHOLD`] of any path
/// segment; an empty path never hits, and a single-point path falls back to
/// the un-rotated bounding-box test. All other kinds un-rotate `p` about the
/// object center and test the bounding rect.
#[must_use]
pub fn hit_test(p: Point, obj: &CanvasObject) -> bool {
    if let ObjectKind::Drawn { path, .. } = &obj.kind {
        return match path.len() {
            0 => false,
            1 => obj.rect().contains(p),
            _ => path
                .windows(2)
                .any(|seg| geom::dist_to_segment(p, seg[0], seg[1]) <= PATH_HIT_THRESHOLD),
        };
    }
    let center = obj.center();
    let local = geom::to_local_space(p, center.x, center.y, obj.rotation);
    obj.rect().contains(local)
}

/// Topmost object under `p` (reverse z-order walk).
#[must_use]
pub fn topmost_at(p: Point, store: &SceneStore) -> Option<ObjectId> {
    store.objects().iter().rev().find(|o| hit_test(p, o)).map(|o| o.id)
}

/// Local-space positions of the eight resize handles (corners plus edge
/// midpoints).
#[must_use]
pub fn resize_handle_positions(obj: &CanvasObject) -> [(ResizeAnchor, Point); 8] {
    let (x, y, w, h) = (obj.x, obj.y, obj.width, obj.height);
    [
        (ResizeAnchor::Nw, Point::new(x, y)),
        (ResizeAnchor::N, Point::new(x + w / 2.0, y)),
        (ResizeAnchor::Ne, Point::new(x + w, y)),
        (ResizeAnchor::E, Point::new(x + w, y + h / 2.0)),
        (ResizeAnchor::Se, Point::new(x + w, y + h)),
        (ResizeAnchor::S, Point::new(x + w / 2.0, y + h)),
        (ResizeAnchor::Sw, Point::new(x, y + h)),
        (ResizeAnchor::W, Point::new(x, y + h / 2.0)),
    ]
}

/// Local-space position of the rotate handle, above top-center.
#[must_use]
pub fn rotate_handle_position(obj: &CanvasObject) -> Point {
    Point::new(obj.x + obj.width / 2.0, obj.y - ROTATE_HANDLE_OFFSET)
}

/// Test the rotate and resize handles of a (single) selected object.
///
/// The pointer is un-rotated into the object's local frame first, so handles
/// track the object's rotation. The rotate handle wins over resize handles.
#[must_use]
pub fn hit_test_handles(p: Point, obj: &CanvasObject) -> Option<HitPart> {
    let center = obj.center();
    let local = geom::to_local_space(p, center.x, center.y, obj.rotation);

    if local.distance_to(rotate_handle_position(obj)) <= ROTATE_HANDLE_TOLERANCE {
        return Some(HitPart::RotateHandle);
    }
    for (anchor, pos) in resize_handle_positions(obj) {
        if local.distance_to(pos) <= RESIZE_HANDLE_TOLERANCE {
            return Some(HitPart::ResizeHandle(anchor));
        }
    }
    None
}
