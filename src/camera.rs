//! View zoom for the fixed-extent canvas.
//!
//! Zoom is a pure view transform: it scales what the user sees and how
//! incoming pointer coordinates are interpreted, but is never part of the
//! document model. Range is 50–200% in steps of 10.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM_PERCENT, MIN_ZOOM_PERCENT, ZOOM_STEP_PERCENT};
use crate::geom::Point;

/// View state: zoom percentage over the fixed canvas.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    zoom_percent: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom_percent: 100 }
    }
}

impl Camera {
    /// Current zoom percentage (50–200).
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    /// Current zoom as a scale factor (1.0 = 100%).
    #[must_use]
    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    /// Set the zoom percentage, clamped to the valid range and snapped to
    /// the step size.
    pub fn set_zoom_percent(&mut self, percent: u32) {
        let snapped = (percent + ZOOM_STEP_PERCENT / 2) / ZOOM_STEP_PERCENT * ZOOM_STEP_PERCENT;
        self.zoom_percent = snapped.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT);
    }

    /// Step the zoom up by one increment.
    pub fn zoom_in(&mut self) {
        self.set_zoom_percent(self.zoom_percent + ZOOM_STEP_PERCENT);
    }

    /// Step the zoom down by one increment.
    pub fn zoom_out(&mut self) {
        self.set_zoom_percent(self.zoom_percent.saturating_sub(ZOOM_STEP_PERCENT));
    }

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: screen.x / self.zoom(),
            y: screen.y / self.zoom(),
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom(),
            y: canvas.y * self.zoom(),
        }
    }
}
