#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_distance_axis_aligned() {
    assert_eq!(pt(0.0, 0.0).distance_to(pt(3.0, 4.0)), 5.0);
}

#[test]
fn point_distance_to_self_is_zero() {
    assert_eq!(pt(7.0, -2.0).distance_to(pt(7.0, -2.0)), 0.0);
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_from_corners_normalizes() {
    let r = Rect::from_corners(pt(300.0, 250.0), pt(100.0, 100.0));
    assert_eq!(r, Rect::new(100.0, 100.0, 200.0, 150.0));
}

#[test]
fn rect_contains_interior_and_edges() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(pt(15.0, 15.0)));
    assert!(r.contains(pt(10.0, 10.0)));
    assert!(r.contains(pt(30.0, 30.0)));
    assert!(!r.contains(pt(9.9, 15.0)));
    assert!(!r.contains(pt(15.0, 30.1)));
}

#[test]
fn rect_contains_rect_requires_full_containment() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 50.0, 50.0)));
    assert!(outer.contains_rect(&outer));
    // Partial overlap is not containment.
    assert!(!outer.contains_rect(&Rect::new(90.0, 90.0, 20.0, 20.0)));
    assert!(!outer.contains_rect(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotate_about_quarter_turn() {
    let p = rotate_about(pt(10.0, 0.0), 0.0, 0.0, 90.0);
    assert!((p.x - 0.0).abs() < 1e-9);
    assert!((p.y - 10.0).abs() < 1e-9);
}

#[test]
fn rotate_about_center_is_fixed_point() {
    let p = rotate_about(pt(5.0, 5.0), 5.0, 5.0, 137.0);
    assert!((p.x - 5.0).abs() < 1e-9);
    assert!((p.y - 5.0).abs() < 1e-9);
}

#[test]
fn to_local_space_inverts_rotation() {
    let world = rotate_about(pt(30.0, 40.0), 50.0, 50.0, 33.0);
    let local = to_local_space(world, 50.0, 50.0, 33.0);
    assert!((local.x - 30.0).abs() < 1e-9);
    assert!((local.y - 40.0).abs() < 1e-9);
}

// =============================================================
// clamp_to_canvas
// =============================================================

#[test]
fn clamp_leaves_valid_rect_alone() {
    let r = clamp_to_canvas(100.0, 100.0, 200.0, 150.0);
    assert_eq!(r, Rect::new(100.0, 100.0, 200.0, 150.0));
}

#[test]
fn clamp_enforces_min_size() {
    let r = clamp_to_canvas(50.0, 50.0, 2.0, -5.0);
    assert_eq!(r.width, MIN_OBJECT_SIZE);
    assert_eq!(r.height, MIN_OBJECT_SIZE);
}

#[test]
fn clamp_pulls_rect_inside_left_top() {
    let r = clamp_to_canvas(-25.0, -3.0, 50.0, 50.0);
    assert_eq!(r.x, 0.0);
    assert_eq!(r.y, 0.0);
}

#[test]
fn clamp_pulls_rect_inside_right_bottom() {
    let r = clamp_to_canvas(CANVAS_WIDTH - 10.0, CANVAS_HEIGHT - 10.0, 50.0, 60.0);
    assert_eq!(r.x, CANVAS_WIDTH - 50.0);
    assert_eq!(r.y, CANVAS_HEIGHT - 60.0);
}

#[test]
fn clamp_caps_size_at_canvas_extent() {
    let r = clamp_to_canvas(0.0, 0.0, CANVAS_WIDTH * 2.0, CANVAS_HEIGHT * 2.0);
    assert_eq!(r, Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT));
}

// =============================================================
// dist_to_segment
// =============================================================

#[test]
fn dist_to_segment_perpendicular() {
    let d = dist_to_segment(pt(50.0, 10.0), pt(0.0, 0.0), pt(100.0, 0.0));
    assert_eq!(d, 10.0);
}

#[test]
fn dist_to_segment_clamps_to_endpoints() {
    let d = dist_to_segment(pt(-30.0, 40.0), pt(0.0, 0.0), pt(100.0, 0.0));
    assert_eq!(d, 50.0);
}

#[test]
fn dist_to_segment_degenerate_segment() {
    let d = dist_to_segment(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0));
    assert_eq!(d, 5.0);
}
