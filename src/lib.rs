//! Vector-object canvas editor engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full editing model for a fixed-size drawing canvas: a z-ordered scene of
//! typed vector objects, pointer gesture handling per tool (select, brush,
//! eraser, shape drafting, merge), normalized erase masks that survive resize
//! and rotation, one-way grouping, linear undo/redo over scene snapshots, and
//! scene rendering. The host JavaScript layer wires DOM events into the
//! engine, performs the returned [`engine::Action`]s, and owns everything
//! outside the canvas (toolbars, property forms, image decoding).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Scene store, object model, and serialization |
//! | [`geom`] | Points, rects, rotation math, canvas clamping |
//! | [`camera`] | Zoom state and coordinate conversions |
//! | [`input`] | Tools, modifiers, and the gesture state machine |
//! | [`hit`] | Hit-testing for bodies and selection handles |
//! | [`erase`] | Normalized erase-mask accumulation |
//! | [`group`] | Merging selections into nested groups |
//! | [`history`] | Linear snapshot-based undo/redo |
//! | [`render`] | Scene rendering to a 2D context |
//! | [`consts`] | Shared numeric constants (canvas extent, tolerances, etc.) |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod erase;
pub mod geom;
pub mod group;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
