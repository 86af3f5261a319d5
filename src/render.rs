//! Rendering: draws the full scene to a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives a read-only view of the
//! engine state and produces pixels; it never mutates application state.
//!
//! Objects render in store order (bottom first). An object with a non-empty
//! erase mask is painted into an offscreen canvas first, punched through with
//! `destination-out` circles, and composited back; mask points are stored as
//! fractions of the object's size, so the punch positions are recovered by
//! multiplying by the current width/height. Groups recurse with the group's
//! scale applied to the context, which keeps child masks correct at any
//! nesting depth.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{
    FRAC_PI_5, HANDLE_RADIUS_PX, POLYGON_SIDES, ROTATE_HANDLE_OFFSET, SELECTION_DASH_PX,
    STAR_INNER_RATIO,
};
use crate::engine::EngineCore;
use crate::geom::Rect;
use crate::hit;
use crate::input::{InputState, Tool};
use crate::scene::{BrushKind, CanvasObject, ObjectId, ObjectKind, SprayParticle};

/// Selection chrome color.
const SELECTION_COLOR: &str = "#1E90FF";

/// Placeholder fill for images whose pixels haven't arrived yet.
const IMAGE_PLACEHOLDER_FILL: &str = "rgba(31, 26, 23, 0.08)";

/// Draw the full scene: objects, selection UI, gesture overlays, cursor.
///
/// `viewport_w` and `viewport_h` are the canvas element's pixel size.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    images: &HashMap<ObjectId, HtmlImageElement>,
    viewport_w: f64,
    viewport_h: f64,
) -> Result<(), JsValue> {
    let zoom = core.camera.zoom();

    // Layer 1: clear and set up the view transform.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.scale(zoom, zoom)?;

    // Layer 2: objects in z-order (bottom first).
    for obj in core.doc.objects() {
        draw_object(ctx, obj, images)?;
    }

    // Layer 3: selection UI.
    let show_handles = core.ui.selected_ids.len() == 1;
    for id in &core.ui.selected_ids {
        if let Some(obj) = core.doc.get(id) {
            draw_selection(ctx, obj, zoom, show_handles)?;
        }
    }

    // Layer 4: in-progress gesture and cursor glyph.
    draw_gesture_overlay(ctx, core, zoom)?;
    draw_cursor_glyph(ctx, core, zoom)?;

    Ok(())
}

// =============================================================
// Object dispatch
// =============================================================

fn draw_object(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    images: &HashMap<ObjectId, HtmlImageElement>,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(obj.style.opacity.clamp(0.0, 1.0));
    let masked = !obj.erase_mask.is_empty() && !matches!(obj.kind, ObjectKind::Group { .. });
    let result = if masked {
        draw_masked(ctx, obj, images)
    } else {
        draw_in_place(ctx, obj, images)
    };
    ctx.restore();
    result
}

fn draw_in_place(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    images: &HashMap<ObjectId, HtmlImageElement>,
) -> Result<(), JsValue> {
    translate_and_rotate(ctx, obj)?;
    paint_kind(ctx, obj, images)
}

/// Paint a leaf with its erase mask applied: render the content into an
/// offscreen canvas, punch the mask circles out with `destination-out`, and
/// composite the result under the object's rotation.
fn draw_masked(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    images: &HashMap<ObjectId, HtmlImageElement>,
) -> Result<(), JsValue> {
    let off = offscreen_canvas(obj.width, obj.height)?;
    let octx = context_of(&off)?;
    octx.translate(obj.width / 2.0, obj.height / 2.0)?;
    paint_kind(&octx, obj, images)?;
    punch_erase_mask(&octx, obj)?;

    translate_and_rotate(ctx, obj)?;
    ctx.draw_image_with_html_canvas_element(&off, -obj.width / 2.0, -obj.height / 2.0)?;
    Ok(())
}

/// Punch the stored erase strokes out of an already-painted offscreen
/// context (origin at the object's center). Mask coordinates are fractions
/// of the object's size; diameter is a fraction of the smaller dimension.
fn punch_erase_mask(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let hw = obj.width / 2.0;
    let hh = obj.height / 2.0;
    let min_dim = obj.width.min(obj.height);

    ctx.save();
    ctx.set_global_composite_operation("destination-out")?;
    ctx.set_fill_style_str("#000");
    for stroke in &obj.erase_mask {
        for p in &stroke.points {
            let radius = (p.size * min_dim / 2.0).max(0.0);
            ctx.begin_path();
            ctx.arc(p.x * obj.width - hw, p.y * obj.height - hh, radius, 0.0, 2.0 * PI)?;
            ctx.fill();
        }
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Shape painters (center-origin frame)
// =============================================================

fn paint_kind(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    images: &HashMap<ObjectId, HtmlImageElement>,
) -> Result<(), JsValue> {
    match &obj.kind {
        ObjectKind::Drawn { path, brush, particles } => {
            paint_drawn(ctx, obj, path, *brush, particles)
        }
        ObjectKind::Rect => paint_rect(ctx, obj),
        ObjectKind::Circle => paint_circle(ctx, obj),
        ObjectKind::Triangle => paint_triangle(ctx, obj),
        ObjectKind::Polygon => paint_polygon(ctx, obj),
        ObjectKind::Star => paint_star(ctx, obj),
        ObjectKind::Line => paint_line(ctx, obj),
        ObjectKind::Image { .. } => paint_image(ctx, obj, images),
        ObjectKind::Group { children, .. } => {
            ctx.translate(-obj.width / 2.0, -obj.height / 2.0)?;
            if let Some((sx, sy)) = obj.group_scale() {
                ctx.scale(sx, sy)?;
            }
            for child in children {
                draw_object(ctx, child, images)?;
            }
            Ok(())
        }
    }
}

fn paint_drawn(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    path: &[crate::geom::Point],
    brush: BrushKind,
    particles: &[SprayParticle],
) -> Result<(), JsValue> {
    // Path points live in the containing frame; shift them into the
    // center-origin frame the context is in.
    let center = obj.center();

    match brush {
        BrushKind::Pen => {
            let Some(first) = path.first() else {
                return Ok(());
            };
            ctx.set_stroke_style_str(&obj.style.stroke_color);
            ctx.set_line_width(obj.style.stroke_width);
            ctx.set_line_cap("round");
            ctx.set_line_join("round");
            ctx.begin_path();
            ctx.move_to(first.x - center.x, first.y - center.y);
            for p in &path[1..] {
                ctx.line_to(p.x - center.x, p.y - center.y);
            }
            ctx.stroke();
        }
        BrushKind::Spray => {
            let base_alpha = obj.style.opacity.clamp(0.0, 1.0);
            ctx.set_fill_style_str(&obj.style.stroke_color);
            for p in particles {
                ctx.set_global_alpha(base_alpha * p.alpha);
                ctx.begin_path();
                ctx.arc(p.x - center.x, p.y - center.y, p.radius, 0.0, 2.0 * PI)?;
                ctx.fill();
            }
            ctx.set_global_alpha(base_alpha);
        }
    }
    Ok(())
}

fn paint_rect(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let hw = obj.width / 2.0;
    let hh = obj.height / 2.0;
    ctx.set_fill_style_str(&obj.style.fill_color);
    ctx.fill_rect(-hw, -hh, obj.width, obj.height);
    apply_stroke_style(ctx, obj);
    ctx.stroke_rect(-hw, -hh, obj.width, obj.height);
    Ok(())
}

fn paint_circle(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    if obj.width <= 0.0 || obj.height <= 0.0 {
        return Ok(());
    }
    ctx.begin_path();
    ctx.ellipse(0.0, 0.0, obj.width / 2.0, obj.height / 2.0, 0.0, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(&obj.style.fill_color);
    ctx.fill();
    apply_stroke_style(ctx, obj);
    ctx.stroke();
    Ok(())
}

fn paint_triangle(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let hw = obj.width / 2.0;
    let hh = obj.height / 2.0;
    ctx.begin_path();
    ctx.move_to(0.0, -hh);
    ctx.line_to(hw, hh);
    ctx.line_to(-hw, hh);
    ctx.close_path();
    ctx.set_fill_style_str(&obj.style.fill_color);
    ctx.fill();
    apply_stroke_style(ctx, obj);
    ctx.stroke();
    Ok(())
}

fn paint_polygon(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let rx = obj.width / 2.0;
    let ry = obj.height / 2.0;
    ctx.begin_path();
    for i in 0..POLYGON_SIDES {
        let angle = (2.0 * PI / f64::from(POLYGON_SIDES)).mul_add(f64::from(i), -FRAC_PI_2);
        let px = rx * angle.cos();
        let py = ry * angle.sin();
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
    ctx.close_path();
    ctx.set_fill_style_str(&obj.style.fill_color);
    ctx.fill();
    apply_stroke_style(ctx, obj);
    ctx.stroke();
    Ok(())
}

#[allow(clippy::similar_names)]
fn paint_star(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let rx_outer = obj.width / 2.0;
    let ry_outer = obj.height / 2.0;
    let rx_inner = rx_outer * STAR_INNER_RATIO;
    let ry_inner = ry_outer * STAR_INNER_RATIO;

    ctx.begin_path();
    for i in 0..10 {
        let angle = FRAC_PI_5.mul_add(f64::from(i), -FRAC_PI_2);
        let (rx, ry) = if i % 2 == 0 {
            (rx_outer, ry_outer)
        } else {
            (rx_inner, ry_inner)
        };
        let px = rx * angle.cos();
        let py = ry * angle.sin();
        if i == 0 {
            ctx.move_to(px, py);
        } else {
            ctx.line_to(px, py);
        }
    }
    ctx.close_path();
    ctx.set_fill_style_str(&obj.style.fill_color);
    ctx.fill();
    apply_stroke_style(ctx, obj);
    ctx.stroke();
    Ok(())
}

fn paint_line(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let hw = obj.width / 2.0;
    let hh = obj.height / 2.0;
    ctx.begin_path();
    ctx.move_to(-hw, -hh);
    ctx.line_to(hw, hh);
    apply_stroke_style(ctx, obj);
    ctx.stroke();
    Ok(())
}

fn paint_image(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    images: &HashMap<ObjectId, HtmlImageElement>,
) -> Result<(), JsValue> {
    let hw = obj.width / 2.0;
    let hh = obj.height / 2.0;
    if let Some(img) = images.get(&obj.id).filter(|img| img.complete()) {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -hw, -hh, obj.width, obj.height)?;
    } else {
        // Pixels not decoded yet; show a quiet placeholder.
        ctx.set_fill_style_str(IMAGE_PLACEHOLDER_FILL);
        ctx.fill_rect(-hw, -hh, obj.width, obj.height);
        apply_stroke_style(ctx, obj);
        ctx.stroke_rect(-hw, -hh, obj.width, obj.height);
    }
    Ok(())
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    zoom: f64,
    show_handles: bool,
) -> Result<(), JsValue> {
    ctx.save();
    translate_and_rotate(ctx, obj)?;

    let hw = obj.width / 2.0;
    let hh = obj.height / 2.0;

    // Dashed bounding box, rotated with the object.
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0 / zoom);
    set_dash(ctx, SELECTION_DASH_PX / zoom)?;
    ctx.stroke_rect(-hw, -hh, obj.width, obj.height);
    clear_dash(ctx)?;

    if !show_handles {
        ctx.restore();
        return Ok(());
    }

    // Resize handles: handle positions are in the object's unrotated local
    // frame, which is exactly the frame this context is in (minus the center
    // offset).
    let handle_r = HANDLE_RADIUS_PX / zoom;
    let center = obj.center();
    ctx.set_fill_style_str("#fff");
    for (_, pos) in hit::resize_handle_positions(obj) {
        let lx = pos.x - center.x;
        let ly = pos.y - center.y;
        ctx.fill_rect(lx - handle_r, ly - handle_r, handle_r * 2.0, handle_r * 2.0);
        ctx.stroke_rect(lx - handle_r, ly - handle_r, handle_r * 2.0, handle_r * 2.0);
    }

    // Rotate handle: stick from the top edge midpoint up to a knob. The
    // knob position matches what the hit test expects.
    let knob_y = -hh - ROTATE_HANDLE_OFFSET;
    ctx.begin_path();
    ctx.move_to(0.0, -hh);
    ctx.line_to(0.0, knob_y);
    ctx.stroke();
    ctx.begin_path();
    ctx.arc(0.0, knob_y, handle_r, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.stroke();

    ctx.restore();
    Ok(())
}

// =============================================================
// Gesture overlays
// =============================================================

fn draw_gesture_overlay(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    zoom: f64,
) -> Result<(), JsValue> {
    match &core.input {
        InputState::MarqueeSelecting { start, current } => {
            let rect = Rect::from_corners(*start, *current);
            ctx.save();
            set_dash(ctx, SELECTION_DASH_PX / zoom)?;
            ctx.set_stroke_style_str(SELECTION_COLOR);
            ctx.set_fill_style_str("rgba(30, 144, 255, 0.12)");
            ctx.set_line_width(1.0 / zoom);
            ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
            clear_dash(ctx)?;
            ctx.restore();
            Ok(())
        }
        InputState::FreeDrawing { path } => {
            let Some(first) = path.first() else {
                return Ok(());
            };
            ctx.save();
            ctx.set_stroke_style_str(&core.ui.brush.color);
            ctx.set_line_width(core.ui.brush.size);
            ctx.set_line_cap("round");
            ctx.set_line_join("round");
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            for p in &path[1..] {
                ctx.line_to(p.x, p.y);
            }
            ctx.stroke();
            ctx.restore();
            Ok(())
        }
        InputState::ShapeDrafting { anchor, current } => {
            let rect = Rect::from_corners(*anchor, *current);
            ctx.save();
            set_dash(ctx, SELECTION_DASH_PX / zoom)?;
            ctx.set_stroke_style_str(SELECTION_COLOR);
            ctx.set_line_width(1.0 / zoom);
            ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
            clear_dash(ctx)?;
            ctx.restore();
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Ring cursor for brush/eraser, crosshair for shape tools.
fn draw_cursor_glyph(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    zoom: f64,
) -> Result<(), JsValue> {
    let Some(p) = core.ui.cursor else {
        return Ok(());
    };

    match core.ui.tool {
        Tool::Brush | Tool::Eraser => {
            let radius = if core.ui.tool == Tool::Brush {
                core.ui.brush.size / 2.0
            } else {
                core.ui.eraser_size / 2.0
            };
            ctx.save();
            ctx.set_stroke_style_str("#555");
            ctx.set_line_width(1.0 / zoom);
            ctx.begin_path();
            ctx.arc(p.x, p.y, radius.max(1.0), 0.0, 2.0 * PI)?;
            ctx.stroke();
            ctx.restore();
        }
        tool if tool.is_shape() => {
            let arm = 8.0 / zoom;
            ctx.save();
            ctx.set_stroke_style_str("#555");
            ctx.set_line_width(1.0 / zoom);
            ctx.begin_path();
            ctx.move_to(p.x - arm, p.y);
            ctx.line_to(p.x + arm, p.y);
            ctx.move_to(p.x, p.y - arm);
            ctx.line_to(p.x, p.y + arm);
            ctx.stroke();
            ctx.restore();
        }
        _ => {}
    }
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the object's center and rotate by its rotation angle.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let center = obj.center();
    ctx.translate(center.x, center.y)?;
    ctx.rotate(obj.rotation.to_radians())?;
    Ok(())
}

fn apply_stroke_style(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) {
    ctx.set_stroke_style_str(&obj.style.stroke_color);
    ctx.set_line_width(obj.style.stroke_width);
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64) -> Result<(), JsValue> {
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)
}

fn clear_dash(ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
    ctx.set_line_dash(&js_sys::Array::new())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn offscreen_canvas(width: f64, height: f64) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width.ceil().max(1.0) as u32);
    canvas.set_height(height.ceil().max(1.0) as u32);
    Ok(canvas)
}

fn context_of(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?;
    Ok(ctx.dyn_into::<CanvasRenderingContext2d>()?)
}
