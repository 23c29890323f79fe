//! Zoom and grid state for the editor canvas.
//!
//! Rooms are stored in a fixed model space. The viewport maps pointer
//! positions into that space and decides the rendered pixel size.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::config::EditorConfig;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, GRID_SIZE, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::geometry::{Point, SnapGrid};

/// Zoom and grid settings for the editor canvas.
///
/// Rooms live in a fixed model space. `zoom` only scales screen/model
/// conversion and the rendered pixel size; it never rewrites room geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    grid_enabled: bool,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
    grid_size: f64,
    base_width: f64,
    base_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            grid_enabled: true,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            grid_size: GRID_SIZE,
            base_width: CANVAS_WIDTH,
            base_height: CANVAS_HEIGHT,
        }
    }
}

impl Viewport {
    /// Build a viewport with the zoom bounds, grid and canvas size from `config`.
    ///
    /// `config` must already have passed [`EditorConfig::validate`], which
    /// guarantees `min_zoom <= 1.0 <= max_zoom`.
    #[must_use]
    pub(crate) fn from_config(config: &EditorConfig) -> Self {
        Self {
            zoom: 1.0,
            grid_enabled: true,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            grid_size: config.grid_size,
            base_width: config.canvas_width,
            base_height: config.canvas_height,
        }
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    /// Grid cell edge in model units at the current zoom.
    #[must_use]
    pub fn grid_cell(&self) -> f64 {
        self.grid_size * self.zoom
    }

    /// Grid parameters for the move/resize rules.
    #[must_use]
    pub fn snap_grid(&self) -> SnapGrid {
        SnapGrid { enabled: self.grid_enabled, zoom: self.zoom, base: self.grid_size }
    }

    /// Step zoom up, stopping at the upper bound.
    pub fn zoom_in(&mut self) {
        self.zoom = self.max_zoom.min(self.zoom + self.zoom_step);
    }

    /// Step zoom down, stopping at the lower bound.
    pub fn zoom_out(&mut self) {
        self.zoom = self.min_zoom.max(self.zoom - self.zoom_step);
    }

    /// Return to 100%.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
    }

    /// Set zoom directly, clamped to the configured bounds. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn toggle_grid(&mut self) {
        self.grid_enabled = !self.grid_enabled;
    }

    /// Rendered canvas size in pixels: `round(base * zoom)` on each axis.
    #[must_use]
    pub fn canvas_size_px(&self) -> (u32, u32) {
        (to_px(self.base_width * self.zoom), to_px(self.base_height * self.zoom))
    }

    /// Model-space canvas size.
    #[must_use]
    pub fn base_size(&self) -> (f64, f64) {
        (self.base_width, self.base_height)
    }

    /// Convert a screen-space point (canvas-relative pixels) to model coordinates.
    #[must_use]
    pub fn screen_to_model(&self, screen: Point) -> Point {
        Point::new(screen.x / self.zoom, screen.y / self.zoom)
    }

    /// Convert a screen-space distance (pixels) to model-space distance.
    #[must_use]
    pub fn screen_dist_to_model(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}
