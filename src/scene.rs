//! Scene model: canvas objects, their variants, and the in-memory store.
//!
//! This module defines the core data types that describe what is on the
//! canvas (`CanvasObject`, `ObjectKind`), a sparse-update type for host
//! property edits (`PartialObject`), and the runtime store that owns all
//! top-level objects (`SceneStore`).
//!
//! The store is a plain vector: **array order is the z-order** (later = on
//! top). Hit-testing walks it in reverse; the renderer walks it forward.
//! Groups own their children by value, expressed in the group's local,
//! unscaled coordinate frame.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{self, Point, Rect};

/// Unique identifier for a canvas object.
pub type ObjectId = Uuid;

/// Brush used for a freehand stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    /// Solid polyline stroke.
    Pen,
    /// Spray-can stroke rendered from a frozen particle cloud.
    Spray,
}

/// One spray particle, frozen at stroke commit and never regenerated.
///
/// Position is in the same frame as the owning stroke's path points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprayParticle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
}

/// One sample of an erase stroke, normalized to the erased object's own
/// frame at the time of erasure: `x`, `y` are fractions of the object's
/// width/height, `size` is the erase diameter divided by the object's
/// smaller absolute dimension (ancestor group scale included).
///
/// Normalization is what makes erase data resize- and rotate-invariant;
/// points are never re-normalized after storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErasePoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// An ordered run of erase samples from one eraser gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EraseStroke {
    pub points: Vec<ErasePoint>,
}

/// Variant payload of a canvas object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectKind {
    /// Freehand brush stroke: ordered path in the containing frame, plus a
    /// frozen particle cloud when the brush is spray.
    Drawn {
        path: Vec<Point>,
        brush: BrushKind,
        particles: Vec<SprayParticle>,
    },
    /// Axis-aligned rectangle filling the bounding box.
    Rect,
    /// Ellipse inscribed within the bounding box.
    Circle,
    /// Isosceles triangle: apex at top-center, base along the bottom edge.
    Triangle,
    /// Regular polygon inscribed within the bounding box.
    Polygon,
    /// Five-point star inscribed within the bounding box.
    Star,
    /// Straight segment along the bounding box's main diagonal.
    Line,
    /// Imported image reference; decoding is the host's job.
    Image {
        src: String,
        natural_width: f64,
        natural_height: f64,
    },
    /// Merged group owning its children by value. Children are expressed in
    /// the group's local, unscaled frame; `width / original_width` and
    /// `height / original_height` are the single source of truth for
    /// descendant scaling.
    Group {
        children: Vec<CanvasObject>,
        original_width: f64,
        original_height: f64,
    },
}

/// Visual style shared by every object kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Stroke color as a CSS color string.
    pub stroke_color: String,
    /// Fill color as a CSS color string.
    pub fill_color: String,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: "#1F1A17".to_owned(),
            fill_color: "#D94B4B".to_owned(),
            stroke_width: 2.0,
            opacity: 1.0,
        }
    }
}

/// A canvas object: identity, placement, style, erase mask, and payload.
///
/// `x, y, width, height` describe the axis-aligned bounding rect in the
/// containing frame before rotation; `rotation` (degrees) applies about the
/// rect's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub style: Style,
    #[serde(default)]
    pub erase_mask: Vec<EraseStroke>,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl CanvasObject {
    /// Create a new object with a fresh id at the given (already clamped)
    /// rect.
    #[must_use]
    pub fn new(kind: ObjectKind, rect: Rect, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            rotation: 0.0,
            style,
            erase_mask: Vec::new(),
            kind,
        }
    }

    /// The bounding rect in the containing frame (pre-rotation).
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Center of the bounding rect; the rotation pivot.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Group scale factors (`width / original_width`,
    /// `height / original_height`), if this object is a group.
    #[must_use]
    pub fn group_scale(&self) -> Option<(f64, f64)> {
        match &self.kind {
            ObjectKind::Group { original_width, original_height, .. } => Some((
                self.width / original_width.max(f64::MIN_POSITIVE),
                self.height / original_height.max(f64::MIN_POSITIVE),
            )),
            _ => None,
        }
    }

    /// Move/resize the object to the requested rect, clamped to the canvas.
    ///
    /// This is the single mutation path for placement: drags, resizes, and
    /// host property edits all come through here. Drawn paths and spray
    /// particles are remapped from the old bounding rect onto the new one,
    /// which covers pure translation (drag) and proportional rescaling
    /// (resize) in one rule. Group children need no adjustment: they are
    /// stored relative and scale through `group_scale`.
    pub fn set_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let old = self.rect();
        let new = geom::clamp_to_canvas(x, y, width, height);
        self.x = new.x;
        self.y = new.y;
        self.width = new.width;
        self.height = new.height;

        if let ObjectKind::Drawn { path, particles, .. } = &mut self.kind {
            let sx = new.width / old.width.max(f64::MIN_POSITIVE);
            let sy = new.height / old.height.max(f64::MIN_POSITIVE);
            for p in path.iter_mut() {
                p.x = new.x + (p.x - old.x) * sx;
                p.y = new.y + (p.y - old.y) * sy;
            }
            for p in particles.iter_mut() {
                p.x = new.x + (p.x - old.x) * sx;
                p.y = new.y + (p.y - old.y) * sy;
            }
        }
    }
}

/// Sparse update for a canvas object, as produced by the host's property
/// forms. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl PartialObject {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// In-memory store of top-level canvas objects, in z-order.
#[derive(Debug, Default)]
pub struct SceneStore {
    objects: Vec<CanvasObject>,
}

impl SceneStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All objects, bottom-most first.
    #[must_use]
    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    /// Mutable access for the erase engine and group composer.
    pub fn objects_mut(&mut self) -> &mut Vec<CanvasObject> {
        &mut self.objects
    }

    /// Append an object on top of the stack.
    pub fn push(&mut self, obj: CanvasObject) {
        self.objects.push(obj);
    }

    /// Remove a top-level object by id, returning it if present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<CanvasObject> {
        let idx = self.objects.iter().position(|o| o.id == *id)?;
        Some(self.objects.remove(idx))
    }

    /// Return a top-level object by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    /// Return a mutable top-level object by id.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    /// Apply a sparse update to an existing object. Geometry fields route
    /// through the clamped `set_rect` path; opacity is normalized into
    /// `[0, 1]`. Returns false (a no-op) if the object doesn't exist.
    pub fn apply_partial(&mut self, id: &ObjectId, partial: &PartialObject) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        if partial.x.is_some()
            || partial.y.is_some()
            || partial.width.is_some()
            || partial.height.is_some()
        {
            obj.set_rect(
                partial.x.unwrap_or(obj.x),
                partial.y.unwrap_or(obj.y),
                partial.width.unwrap_or(obj.width),
                partial.height.unwrap_or(obj.height),
            );
        }
        if let Some(r) = partial.rotation {
            obj.rotation = r;
        }
        if let Some(ref c) = partial.stroke_color {
            obj.style.stroke_color.clone_from(c);
        }
        if let Some(ref c) = partial.fill_color {
            obj.style.fill_color.clone_from(c);
        }
        if let Some(w) = partial.stroke_width {
            obj.style.stroke_width = w.max(0.0);
        }
        if let Some(o) = partial.opacity {
            obj.style.opacity = o.clamp(0.0, 1.0);
        }
        true
    }

    /// Replace all objects with a snapshot clone.
    pub fn replace_all(&mut self, objects: Vec<CanvasObject>) {
        self.objects = objects;
    }

    /// Number of top-level objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
