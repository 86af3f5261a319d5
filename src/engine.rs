//! Engine facade: the single entry point the host drives.
//!
//! `EngineCore` owns the document, camera, UI state, gesture state machine,
//! and history, and is fully native-testable. Pointer handlers take
//! screen-space coordinates, convert through the camera, dispatch on the
//! active tool and gesture state, and return the [`Action`]s the host must
//! perform (re-render, cursor change, selection/history notifications).
//! `Engine` is the thin wasm wrapper that additionally owns the
//! `HtmlCanvasElement` and the decoded-image cache and knows how to render.
//!
//! Mutation discipline: drag, resize, rotate, and erase mutate the document
//! in place per pointer event and commit one history snapshot on release;
//! brush strokes and shape drafts live only in the gesture state until
//! pointer-up commits a finished object.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::{HashMap, HashSet};

use rand::Rng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::camera::Camera;
use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, IMAGE_MAX_DIM, MIN_OBJECT_SIZE, SPRAY_ALPHA_MAX, SPRAY_ALPHA_MIN,
    SPRAY_JITTER_FACTOR, SPRAY_PARTICLES_PER_UNIT, SPRAY_RADIUS_FACTOR,
};
use crate::erase;
use crate::geom::{self, Point, Rect};
use crate::group;
use crate::history::History;
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState};
use crate::render;
use crate::scene::{
    BrushKind, CanvasObject, ObjectId, ObjectKind, PartialObject, SceneStore, SprayParticle,
    Style,
};

/// What the host must do after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The scene or an overlay changed; redraw.
    RenderNeeded,
    /// Set the CSS cursor on the canvas element.
    SetCursor(String),
    /// The selection changed; refresh property panels.
    SelectionChanged,
    /// Undo/redo availability may have changed; refresh toolbar buttons.
    HistoryChanged,
}

/// The editor core: document, view, UI state, gestures, and history.
///
/// Everything here is plain Rust with no browser types, so the full
/// interaction model is testable natively.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: SceneStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    history: History,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =============================================================
    // Host operations
    // =============================================================

    /// Switch the active tool. Any in-flight gesture keeps running under
    /// its original tool until release.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        vec![Action::RenderNeeded, Action::SetCursor(base_cursor(tool).to_owned())]
    }

    /// Replace the selection with `ids`, dropping any that don't resolve to
    /// a live top-level object.
    pub fn set_selection(&mut self, ids: &[ObjectId]) -> Vec<Action> {
        self.ui.selected_ids = ids.iter().copied().filter(|id| self.doc.get(id).is_some()).collect();
        vec![Action::RenderNeeded, Action::SelectionChanged]
    }

    /// Ids of the currently selected objects.
    #[must_use]
    pub fn selection(&self) -> &[ObjectId] {
        &self.ui.selected_ids
    }

    /// Look up a top-level object by id.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.doc.get(id)
    }

    /// Apply a sparse property update from the host's object form. A no-op
    /// (no snapshot, no actions) when the id is stale or the update is empty.
    pub fn update_object(&mut self, id: &ObjectId, partial: &PartialObject) -> Vec<Action> {
        if partial.is_empty() || !self.doc.apply_partial(id, partial) {
            return vec![];
        }
        self.commit("update object");
        vec![Action::RenderNeeded, Action::HistoryChanged]
    }

    /// Delete every selected object. A no-op when nothing is selected.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.ui.selected_ids.is_empty() {
            return vec![];
        }
        let ids = std::mem::take(&mut self.ui.selected_ids);
        for id in &ids {
            self.doc.remove(id);
        }
        self.commit("delete selection");
        vec![Action::RenderNeeded, Action::SelectionChanged, Action::HistoryChanged]
    }

    /// Merge the selected objects into a group; the new group becomes the
    /// sole selection. Requires at least two live selected objects.
    pub fn merge_selected(&mut self) -> Vec<Action> {
        let Some(group_id) = group::merge_selected(&mut self.doc, &self.ui.selected_ids) else {
            return vec![];
        };
        self.ui.selected_ids = vec![group_id];
        self.commit("merge into group");
        vec![Action::RenderNeeded, Action::SelectionChanged, Action::HistoryChanged]
    }

    /// Step back one history snapshot. Clears the selection because restored
    /// object sets may not contain the selected ids.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(snapshot) = self.history.undo() else {
            return vec![];
        };
        self.doc.replace_all(snapshot);
        self.ui.selected_ids.clear();
        self.input = InputState::Idle;
        vec![Action::RenderNeeded, Action::SelectionChanged, Action::HistoryChanged]
    }

    /// Step forward one history snapshot.
    pub fn redo(&mut self) -> Vec<Action> {
        let Some(snapshot) = self.history.redo() else {
            return vec![];
        };
        self.doc.replace_all(snapshot);
        self.ui.selected_ids.clear();
        self.input = InputState::Idle;
        vec![Action::RenderNeeded, Action::SelectionChanged, Action::HistoryChanged]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Clear the document and restart history from the empty scene.
    pub fn new_scene(&mut self) -> Vec<Action> {
        self.doc.replace_all(Vec::new());
        self.ui.selected_ids.clear();
        self.input = InputState::Idle;
        self.history.reset();
        log::debug!("new scene");
        vec![Action::RenderNeeded, Action::SelectionChanged, Action::HistoryChanged]
    }

    /// Place an imported image at the canvas center, scaled down (never up)
    /// so its longest edge fits [`IMAGE_MAX_DIM`]. Returns the new object's
    /// id; the host decodes pixels and reports readiness separately.
    pub fn import_image(&mut self, src: String, natural_width: f64, natural_height: f64) -> ObjectId {
        let nw = natural_width.max(1.0);
        let nh = natural_height.max(1.0);
        let scale = (IMAGE_MAX_DIM / nw).min(IMAGE_MAX_DIM / nh).min(1.0);
        let w = nw * scale;
        let h = nh * scale;
        let rect = geom::clamp_to_canvas(
            (CANVAS_WIDTH - w) / 2.0,
            (CANVAS_HEIGHT - h) / 2.0,
            w,
            h,
        );
        let kind = ObjectKind::Image { src, natural_width: nw, natural_height: nh };
        let obj = CanvasObject::new(kind, rect, Style::default());
        let id = obj.id;
        self.doc.push(obj);
        self.ui.selected_ids = vec![id];
        self.commit("import image");
        id
    }

    pub fn set_zoom_percent(&mut self, percent: u32) -> Vec<Action> {
        self.camera.set_zoom_percent(percent);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.camera.zoom_in();
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.camera.zoom_out();
        vec![Action::RenderNeeded]
    }

    /// The scene serialized as a JSON array of objects.
    #[must_use]
    pub fn scene_json(&self) -> String {
        serde_json::to_string(self.doc.objects()).unwrap_or_else(|_| "[]".to_owned())
    }

    // =============================================================
    // Pointer events
    // =============================================================

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return vec![];
        }
        let p = self.camera.screen_to_canvas(screen);
        self.ui.cursor = Some(p);
        match self.ui.tool {
            Tool::Select => self.select_pointer_down(p, modifiers),
            Tool::Merge => self.merge_pointer_down(p),
            Tool::Brush => {
                self.input = InputState::FreeDrawing { path: vec![p] };
                vec![Action::RenderNeeded]
            }
            Tool::Eraser => {
                let mut touched = HashSet::new();
                erase::apply_sample(&mut self.doc, p, self.ui.eraser_size, &mut touched);
                self.input = InputState::Erasing { touched };
                vec![Action::RenderNeeded]
            }
            _ => {
                self.input = InputState::ShapeDrafting { anchor: p, current: p };
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let p = self.camera.screen_to_canvas(screen);
        self.ui.cursor = Some(p);
        match std::mem::take(&mut self.input) {
            InputState::Idle => {
                // Only tools with a cursor glyph need the overlay repainted.
                if self.ui.tool.has_ring_cursor() || self.ui.tool.is_shape() {
                    vec![Action::RenderNeeded]
                } else {
                    vec![]
                }
            }
            InputState::Dragging { id, grab_dx, grab_dy, .. } => {
                if let Some(obj) = self.doc.get_mut(&id) {
                    obj.set_rect(p.x - grab_dx, p.y - grab_dy, obj.width, obj.height);
                }
                self.input = InputState::Dragging { id, grab_dx, grab_dy, moved: true };
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { id, anchor, start, orig_x, orig_y, orig_w, orig_h } => {
                let dx = p.x - start.x;
                let dy = p.y - start.y;
                let (mut x, mut y, mut w, mut h) = (orig_x, orig_y, orig_w, orig_h);
                if anchor.moves_west() {
                    w = (orig_w - dx).max(MIN_OBJECT_SIZE);
                    x = orig_x + orig_w - w;
                } else if anchor.moves_east() {
                    w = (orig_w + dx).max(MIN_OBJECT_SIZE);
                }
                if anchor.moves_north() {
                    h = (orig_h - dy).max(MIN_OBJECT_SIZE);
                    y = orig_y + orig_h - h;
                } else if anchor.moves_south() {
                    h = (orig_h + dy).max(MIN_OBJECT_SIZE);
                }
                if let Some(obj) = self.doc.get_mut(&id) {
                    obj.set_rect(x, y, w, h);
                }
                self.input = InputState::Resizing { id, anchor, start, orig_x, orig_y, orig_w, orig_h };
                vec![Action::RenderNeeded]
            }
            InputState::Rotating { id, center } => {
                let angle = (p.y - center.y).atan2(p.x - center.x).to_degrees() + 90.0;
                if let Some(obj) = self.doc.get_mut(&id) {
                    obj.rotation = angle;
                }
                self.input = InputState::Rotating { id, center };
                vec![Action::RenderNeeded]
            }
            InputState::MarqueeSelecting { start, .. } => {
                self.input = InputState::MarqueeSelecting { start, current: p };
                vec![Action::RenderNeeded]
            }
            InputState::FreeDrawing { mut path } => {
                path.push(p);
                self.input = InputState::FreeDrawing { path };
                vec![Action::RenderNeeded]
            }
            InputState::ShapeDrafting { anchor, .. } => {
                self.input = InputState::ShapeDrafting { anchor, current: p };
                vec![Action::RenderNeeded]
            }
            InputState::Erasing { mut touched } => {
                erase::apply_sample(&mut self.doc, p, self.ui.eraser_size, &mut touched);
                self.input = InputState::Erasing { touched };
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        let p = self.camera.screen_to_canvas(screen);
        match std::mem::take(&mut self.input) {
            InputState::Idle => vec![],
            InputState::Dragging { moved, .. } => {
                if moved {
                    self.commit("move object");
                    vec![Action::RenderNeeded, Action::HistoryChanged]
                } else {
                    vec![]
                }
            }
            InputState::Resizing { .. } => {
                self.commit("resize object");
                vec![Action::RenderNeeded, Action::HistoryChanged]
            }
            InputState::Rotating { .. } => {
                self.commit("rotate object");
                vec![Action::RenderNeeded, Action::HistoryChanged]
            }
            InputState::MarqueeSelecting { start, .. } => {
                let rect = Rect::from_corners(start, p);
                let contained: Vec<ObjectId> = self
                    .doc
                    .objects()
                    .iter()
                    .filter(|o| rect.contains_rect(&o.rect()))
                    .map(|o| o.id)
                    .collect();
                if modifiers.multi_select() {
                    for id in contained {
                        if !self.ui.is_selected(&id) {
                            self.ui.selected_ids.push(id);
                        }
                    }
                } else {
                    self.ui.selected_ids = contained;
                }
                vec![Action::RenderNeeded, Action::SelectionChanged]
            }
            InputState::FreeDrawing { path } => self.commit_free_draw(&path),
            InputState::ShapeDrafting { anchor, .. } => self.commit_shape_draft(anchor, p),
            InputState::Erasing { touched } => {
                if touched.is_empty() {
                    vec![Action::RenderNeeded]
                } else {
                    self.commit("erase");
                    vec![Action::RenderNeeded, Action::HistoryChanged]
                }
            }
        }
    }

    /// Pointer left the canvas mid-gesture. In-place edits (drag, resize,
    /// rotate, erase) commit as if the pointer were released; draft gestures
    /// (marquee, brush stroke, shape) are discarded.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.ui.cursor = None;
        match std::mem::take(&mut self.input) {
            InputState::Idle => vec![Action::RenderNeeded],
            InputState::Dragging { moved, .. } => {
                if moved {
                    self.commit("move object");
                    vec![Action::RenderNeeded, Action::HistoryChanged]
                } else {
                    vec![Action::RenderNeeded]
                }
            }
            InputState::Resizing { .. } => {
                self.commit("resize object");
                vec![Action::RenderNeeded, Action::HistoryChanged]
            }
            InputState::Rotating { .. } => {
                self.commit("rotate object");
                vec![Action::RenderNeeded, Action::HistoryChanged]
            }
            InputState::Erasing { touched } => {
                if touched.is_empty() {
                    vec![Action::RenderNeeded]
                } else {
                    self.commit("erase");
                    vec![Action::RenderNeeded, Action::HistoryChanged]
                }
            }
            InputState::MarqueeSelecting { .. }
            | InputState::FreeDrawing { .. }
            | InputState::ShapeDrafting { .. } => vec![Action::RenderNeeded],
        }
    }

    // =============================================================
    // Keyboard
    // =============================================================

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => self.cancel_gesture(),
            "z" | "Z" if modifiers.ctrl || modifiers.meta => {
                if modifiers.shift {
                    self.redo()
                } else {
                    self.undo()
                }
            }
            "y" | "Y" if modifiers.ctrl || modifiers.meta => self.redo(),
            _ => vec![],
        }
    }

    /// Abort the active gesture. In-place edits already applied to the
    /// document are rolled back to the last committed snapshot.
    fn cancel_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Idle => vec![],
            InputState::Dragging { .. }
            | InputState::Resizing { .. }
            | InputState::Rotating { .. }
            | InputState::Erasing { .. } => {
                self.doc.replace_all(self.history.current().to_vec());
                vec![Action::RenderNeeded]
            }
            InputState::MarqueeSelecting { .. }
            | InputState::FreeDrawing { .. }
            | InputState::ShapeDrafting { .. } => vec![Action::RenderNeeded],
        }
    }

    // =============================================================
    // Gesture internals
    // =============================================================

    fn select_pointer_down(&mut self, p: Point, modifiers: Modifiers) -> Vec<Action> {
        // With a single selection, its handles sit above everything else.
        if let [id] = self.ui.selected_ids[..] {
            if let Some(obj) = self.doc.get(&id) {
                match hit::hit_test_handles(p, obj) {
                    Some(HitPart::RotateHandle) => {
                        self.input = InputState::Rotating { id, center: obj.center() };
                        return vec![Action::SetCursor("grabbing".to_owned())];
                    }
                    Some(HitPart::ResizeHandle(anchor)) => {
                        self.input = InputState::Resizing {
                            id,
                            anchor,
                            start: p,
                            orig_x: obj.x,
                            orig_y: obj.y,
                            orig_w: obj.width,
                            orig_h: obj.height,
                        };
                        return vec![Action::SetCursor(anchor.cursor().to_owned())];
                    }
                    Some(HitPart::Body) | None => {}
                }
            }
        }

        if let Some(id) = hit::topmost_at(p, &self.doc) {
            if modifiers.multi_select() {
                self.ui.toggle_selected(id);
            } else {
                self.ui.selected_ids = vec![id];
            }
            if self.ui.is_selected(&id) {
                if let Some(obj) = self.doc.get(&id) {
                    self.input = InputState::Dragging {
                        id,
                        grab_dx: p.x - obj.x,
                        grab_dy: p.y - obj.y,
                        moved: false,
                    };
                }
                return vec![
                    Action::RenderNeeded,
                    Action::SelectionChanged,
                    Action::SetCursor("move".to_owned()),
                ];
            }
            return vec![Action::RenderNeeded, Action::SelectionChanged];
        }

        let mut actions = vec![Action::RenderNeeded];
        if !modifiers.multi_select() && !self.ui.selected_ids.is_empty() {
            self.ui.selected_ids.clear();
            actions.push(Action::SelectionChanged);
        }
        self.input = InputState::MarqueeSelecting { start: p, current: p };
        actions
    }

    /// The merge tool toggles membership on plain clicks; clicking empty
    /// space clears the pick set.
    fn merge_pointer_down(&mut self, p: Point) -> Vec<Action> {
        if let Some(id) = hit::topmost_at(p, &self.doc) {
            self.ui.toggle_selected(id);
        } else {
            self.ui.selected_ids.clear();
        }
        vec![Action::RenderNeeded, Action::SelectionChanged]
    }

    fn commit_free_draw(&mut self, path: &[Point]) -> Vec<Action> {
        if path.len() < 2 {
            return vec![Action::RenderNeeded];
        }
        let pad = self.ui.brush.size;
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in path {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let rect = geom::clamp_to_canvas(
            min_x - pad,
            min_y - pad,
            (max_x - min_x) + 2.0 * pad,
            (max_y - min_y) + 2.0 * pad,
        );
        let particles = match self.ui.brush.kind {
            BrushKind::Pen => vec![],
            BrushKind::Spray => spray_particles(path, self.ui.brush.size),
        };
        let kind = ObjectKind::Drawn {
            path: path.to_vec(),
            brush: self.ui.brush.kind,
            particles,
        };
        let style = Style {
            stroke_color: self.ui.brush.color.clone(),
            stroke_width: self.ui.brush.size,
            ..Style::default()
        };
        let obj = CanvasObject::new(kind, rect, style);
        self.ui.selected_ids = vec![obj.id];
        self.doc.push(obj);
        self.commit("brush stroke");
        vec![Action::RenderNeeded, Action::SelectionChanged, Action::HistoryChanged]
    }

    fn commit_shape_draft(&mut self, anchor: Point, release: Point) -> Vec<Action> {
        let draft = Rect::from_corners(anchor, release);
        if draft.width <= MIN_OBJECT_SIZE || draft.height <= MIN_OBJECT_SIZE {
            // Accidental click; nothing to create.
            return vec![Action::RenderNeeded];
        }
        let Some(kind) = shape_kind(self.ui.tool) else {
            return vec![Action::RenderNeeded];
        };
        let rect = geom::clamp_to_canvas(draft.x, draft.y, draft.width, draft.height);
        let obj = CanvasObject::new(kind, rect, Style::default());
        self.ui.selected_ids = vec![obj.id];
        self.doc.push(obj);
        self.commit("create shape");
        vec![Action::RenderNeeded, Action::SelectionChanged, Action::HistoryChanged]
    }

    fn commit(&mut self, what: &str) {
        self.history.push(self.doc.objects());
        log::debug!("commit: {what} ({} objects)", self.doc.len());
    }
}

/// The shape drafted by a shape tool; `None` for non-shape tools.
fn shape_kind(tool: Tool) -> Option<ObjectKind> {
    match tool {
        Tool::Rect => Some(ObjectKind::Rect),
        Tool::Circle => Some(ObjectKind::Circle),
        Tool::Triangle => Some(ObjectKind::Triangle),
        Tool::Polygon => Some(ObjectKind::Polygon),
        Tool::Star => Some(ObjectKind::Star),
        Tool::Line => Some(ObjectKind::Line),
        _ => None,
    }
}

/// Default CSS cursor for a tool when no gesture is active.
fn base_cursor(tool: Tool) -> &'static str {
    match tool {
        Tool::Select | Tool::Merge => "default",
        // Ring and crosshair glyphs are drawn by the renderer instead.
        _ => "none",
    }
}

/// Freeze spray particles along a finished stroke. Particle density scales
/// with path length; positions jitter around the path, radii and alpha vary
/// per particle.
fn spray_particles(path: &[Point], size: f64) -> Vec<SprayParticle> {
    let mut rng = rand::rng();
    let jitter = SPRAY_JITTER_FACTOR * size;
    let mut out = Vec::new();
    for seg in path.windows(2) {
        let len = seg[0].distance_to(seg[1]);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (len * SPRAY_PARTICLES_PER_UNIT).ceil().max(1.0) as usize;
        for _ in 0..count {
            let t: f64 = rng.random_range(0.0..=1.0);
            out.push(SprayParticle {
                x: seg[0].x + (seg[1].x - seg[0].x) * t + rng.random_range(-jitter..=jitter),
                y: seg[0].y + (seg[1].y - seg[0].y) * t + rng.random_range(-jitter..=jitter),
                radius: rng.random_range(0.5..=(size * SPRAY_RADIUS_FACTOR).max(0.5)),
                alpha: rng.random_range(SPRAY_ALPHA_MIN..=SPRAY_ALPHA_MAX),
            });
        }
    }
    out
}

// =============================================================
// Wasm-facing engine
// =============================================================

/// Browser-side engine: the core plus the canvas element and the cache of
/// decoded images, keyed by the image object's id.
pub struct Engine {
    canvas: HtmlCanvasElement,
    images: HashMap<ObjectId, HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, images: HashMap::new(), core: EngineCore::new() }
    }

    /// Register a decoded image for an image object. Until this arrives the
    /// renderer paints a placeholder.
    pub fn image_ready(&mut self, id: ObjectId, image: HtmlImageElement) -> Vec<Action> {
        self.images.insert(id, image);
        vec![Action::RenderNeeded]
    }

    /// Paint the whole scene into the canvas element.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        render::draw(&ctx, &self.core, &self.images, width, height)
    }

    fn context(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?;
        Ok(ctx.dyn_into::<CanvasRenderingContext2d>()?)
    }
}
