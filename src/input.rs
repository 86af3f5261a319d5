//! Input model: tools, modifier keys, brush settings, and the gesture state
//! machine.
//!
//! `Tool`, `Modifiers`, and the brush/eraser settings capture the user's
//! intent at the time of a pointer event; the host toolbar pushes them in
//! explicitly rather than the engine reading ambient state. `InputState` is
//! the active gesture being tracked between pointer-down and pointer-up,
//! carrying all context needed to compute incremental deltas and commit (or
//! discard) the result on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use crate::geom::Point;
use crate::hit::ResizeAnchor;
use crate::scene::{BrushKind, ObjectId};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Freehand brush.
    Brush,
    /// Eraser.
    Eraser,
    /// Draw a rectangle.
    Rect,
    /// Draw a circle (ellipse in the bounding box).
    Circle,
    /// Draw a triangle.
    Triangle,
    /// Draw a regular polygon.
    Polygon,
    /// Draw a five-point star.
    Star,
    /// Draw a straight line.
    Line,
    /// Pick objects to merge into a group.
    Merge,
}

impl Tool {
    /// Whether this tool drafts a bounding-box shape on drag.
    #[must_use]
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            Self::Rect | Self::Circle | Self::Triangle | Self::Polygon | Self::Star | Self::Line
        )
    }

    /// Whether the cursor preview for this tool is a ring sized by the
    /// brush or eraser diameter.
    #[must_use]
    pub fn has_ring_cursor(self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the multi-select (toggle-add) modifier is held.
    #[must_use]
    pub fn multi_select(&self) -> bool {
        self.shift
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Brush configuration pushed in by the host toolbar.
#[derive(Debug, Clone)]
pub struct BrushSettings {
    pub kind: BrushKind,
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width (and spray spread base) in canvas units.
    pub size: f64,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            kind: BrushKind::Pen,
            color: "#1F1A17".to_owned(),
            size: 4.0,
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Ids of the currently selected top-level objects, in selection order.
    pub selected_ids: Vec<ObjectId>,
    /// Brush configuration for the brush tool and new-shape stroke width.
    pub brush: BrushSettings,
    /// Eraser diameter in canvas units.
    pub eraser_size: f64,
    /// Last known pointer position (canvas space) for the cursor preview;
    /// cleared when the pointer leaves the canvas.
    pub cursor: Option<Point>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            selected_ids: Vec::new(),
            brush: BrushSettings::default(),
            eraser_size: 20.0,
            cursor: None,
        }
    }
}

impl UiState {
    /// Whether `id` is currently selected.
    #[must_use]
    pub fn is_selected(&self, id: &ObjectId) -> bool {
        self.selected_ids.contains(id)
    }

    /// Add `id` to the selection if absent, remove it if present.
    pub fn toggle_selected(&mut self, id: ObjectId) {
        if let Some(idx) = self.selected_ids.iter().position(|s| *s == id) {
            self.selected_ids.remove(idx);
        } else {
            self.selected_ids.push(id);
        }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to compute deltas
/// and commit on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving a selected object across the canvas.
    Dragging {
        /// Id of the object being dragged.
        id: ObjectId,
        /// Pointer offset from the object origin at pointer-down, so the
        /// object doesn't jump under the cursor.
        grab_dx: f64,
        grab_dy: f64,
        /// Whether any movement happened (a plain click commits nothing).
        moved: bool,
    },
    /// Resizing an object by one of its eight handles.
    Resizing {
        id: ObjectId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Pointer position at the start of the resize.
        start: Point,
        /// Object rect at the start of the resize.
        orig_x: f64,
        orig_y: f64,
        orig_w: f64,
        orig_h: f64,
    },
    /// Rotating an object via the rotate handle.
    Rotating {
        id: ObjectId,
        /// The rotation pivot (object center, fixed for the gesture).
        center: Point,
    },
    /// Dragging out a selection rectangle on empty space.
    MarqueeSelecting {
        /// Canvas position where the drag started.
        start: Point,
        /// Current pointer position.
        current: Point,
    },
    /// Accumulating a freehand brush path; nothing is committed until
    /// pointer-up.
    FreeDrawing {
        path: Vec<Point>,
    },
    /// Dragging out a new shape's bounding box; nothing is committed until
    /// pointer-up.
    ShapeDrafting {
        anchor: Point,
        current: Point,
    },
    /// Erase samples are being applied to every object under the pointer.
    Erasing {
        /// Leaves that already received a stroke during this gesture.
        touched: HashSet<ObjectId>,
    },
}

impl InputState {
    /// Whether a gesture is currently in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
