//! Geometry primitives: points, rects, local-space transforms, and the
//! canvas clamping rule.
//!
//! Every size/position mutation in the crate routes through
//! [`clamp_to_canvas`]; it is the sole bounds-enforcement primitive.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_OBJECT_SIZE};

/// A point in canvas (or group-local) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalize a drag-defined rect so width/height are non-negative.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Whether `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// Rotate `p` by `-rotation_deg` about `(cx, cy)`.
///
/// Maps a canvas-space point into the un-rotated local frame of an object
/// whose center is `(cx, cy)`. Used for rotated hit-testing and handle tests.
#[must_use]
pub fn to_local_space(p: Point, cx: f64, cy: f64, rotation_deg: f64) -> Point {
    rotate_about(p, cx, cy, -rotation_deg)
}

/// Rotate `p` by `rotation_deg` (clockwise, degrees) about `(cx, cy)`.
#[must_use]
pub fn rotate_about(p: Point, cx: f64, cy: f64, rotation_deg: f64) -> Point {
    let rad = rotation_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    let dx = p.x - cx;
    let dy = p.y - cy;
    Point {
        x: cx + dx * cos - dy * sin,
        y: cy + dx * sin + dy * cos,
    }
}

/// Clamp a rect so it has at least the minimum size and lies fully inside
/// the canvas extent.
///
/// Size is clamped first (to `[MIN_OBJECT_SIZE, canvas extent]`), then the
/// position so the whole rect fits in `[0, W] × [0, H]`. Mutations are
/// always clamped, never rejected.
#[must_use]
pub fn clamp_to_canvas(x: f64, y: f64, width: f64, height: f64) -> Rect {
    let width = width.clamp(MIN_OBJECT_SIZE, CANVAS_WIDTH);
    let height = height.clamp(MIN_OBJECT_SIZE, CANVAS_HEIGHT);
    Rect {
        x: x.clamp(0.0, CANVAS_WIDTH - width),
        y: y.clamp(0.0, CANVAS_HEIGHT - height),
        width,
        height,
    }
}

/// Perpendicular distance from `p` to the segment `a`–`b`, clamped to the
/// segment endpoints.
#[must_use]
pub fn dist_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = ((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq;
    let t = t.clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * abx, a.y + t * aby))
}
