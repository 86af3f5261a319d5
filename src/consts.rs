//! Shared numeric constants for the editor core.

// ── Canvas ──────────────────────────────────────────────────────

/// Fixed canvas width in canvas units. The drawing surface does not scroll.
pub const CANVAS_WIDTH: f64 = 1200.0;

/// Fixed canvas height in canvas units.
pub const CANVAS_HEIGHT: f64 = 800.0;

/// Minimum object width/height. Mutations clamp to this, drafts at or below
/// it are discarded.
pub const MIN_OBJECT_SIZE: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Distance threshold for hitting a drawn (freehand) path, in canvas units.
pub const PATH_HIT_THRESHOLD: f64 = 15.0;

/// Tolerance around each of the eight resize handles, in canvas units.
pub const RESIZE_HANDLE_TOLERANCE: f64 = 12.0;

/// Tolerance around the rotate handle, in canvas units.
pub const ROTATE_HANDLE_TOLERANCE: f64 = 10.0;

/// Offset of the rotate handle above the top edge, in local (un-rotated)
/// object coordinates.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Minimum view zoom, in percent.
pub const MIN_ZOOM_PERCENT: u32 = 50;

/// Maximum view zoom, in percent.
pub const MAX_ZOOM_PERCENT: u32 = 200;

/// Zoom adjustment step, in percent.
pub const ZOOM_STEP_PERCENT: u32 = 10;

// ── Shapes ──────────────────────────────────────────────────────

/// π / 5 (36°) — angular step for a 10-vertex star polygon.
pub const FRAC_PI_5: f64 = std::f64::consts::PI / 5.0;

/// Inner-to-outer radius ratio for the 5-point star.
pub const STAR_INNER_RATIO: f64 = 0.5;

/// Vertex count for the regular polygon shape.
pub const POLYGON_SIDES: u32 = 6;

/// Largest edge an imported image is scaled to fit, preserving aspect.
pub const IMAGE_MAX_DIM: f64 = 400.0;

// ── Spray brush ─────────────────────────────────────────────────

/// Particles generated per unit of path-segment length.
pub const SPRAY_PARTICLES_PER_UNIT: f64 = 0.5;

/// Particle jitter bound, as a multiple of the stroke width.
pub const SPRAY_JITTER_FACTOR: f64 = 1.5;

/// Particle radius upper bound, as a fraction of the stroke width.
pub const SPRAY_RADIUS_FACTOR: f64 = 1.0 / 3.0;

/// Particle alpha range.
pub const SPRAY_ALPHA_MIN: f64 = 0.3;
pub const SPRAY_ALPHA_MAX: f64 = 0.8;

// ── Rendering ───────────────────────────────────────────────────

/// Selection dash segment length in screen pixels.
pub const SELECTION_DASH_PX: f64 = 4.0;

/// Visual half-size of resize/rotate handles in screen pixels.
pub const HANDLE_RADIUS_PX: f64 = 5.0;
