//! Geometry primitives and grid-snapping arithmetic.
//!
//! Everything here is pure: no state, no side effects. The interaction state
//! machine calls these to turn pointer deltas into room geometry.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::GRID_SIZE;
use crate::hit::Handle;

/// A point in either screen or model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in model space. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
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

    /// Whether `pt` lies inside the rectangle or on its border.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// Raise width and height to at least `floor`.
    #[must_use]
    pub fn with_min_size(self, floor: f64) -> Self {
        Self { width: self.width.max(floor), height: self.height.max(floor), ..self }
    }
}

/// Snap `value` to the nearest multiple of `base * zoom` when the grid is on.
///
/// Ties round away from zero.
#[must_use]
pub fn snap_with_base(value: f64, grid_enabled: bool, zoom: f64, base: f64) -> f64 {
    if !grid_enabled {
        return value;
    }
    let cell = base * zoom;
    if cell <= 0.0 || !cell.is_finite() {
        return value;
    }
    (value / cell).round() * cell
}

/// Snap `value` to the standard 24-unit grid scaled by `zoom`.
#[must_use]
pub fn snap(value: f64, grid_enabled: bool, zoom: f64) -> f64 {
    snap_with_base(value, grid_enabled, zoom, GRID_SIZE)
}

/// Convert a screen-space distance to model space.
#[must_use]
pub fn to_model_delta(screen_delta: f64, zoom: f64) -> f64 {
    screen_delta / zoom
}

/// Grid parameters the move/resize rules snap against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGrid {
    /// Snapping is applied only when this is set.
    pub enabled: bool,
    /// Current zoom factor.
    pub zoom: f64,
    /// Cell edge at zoom 1.0.
    pub base: f64,
}

impl SnapGrid {
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        snap_with_base(value, self.enabled, self.zoom, self.base)
    }
}

/// Position of `orig` after moving it by the model-space delta `(mx, my)`.
///
/// Only `x`/`y` change; both are snapped independently.
#[must_use]
pub fn moved(orig: Rect, mx: f64, my: f64, grid: SnapGrid) -> Rect {
    Rect { x: grid.snap(orig.x + mx), y: grid.snap(orig.y + my), ..orig }
}

/// Geometry of `orig` after dragging `handle` by the model-space delta `(mx, my)`.
///
/// Each field the handle moves is snapped on its own; fields the handle does
/// not touch keep their original value. Width and height are floored to
/// `min_size` after snapping, so the floor itself is never re-snapped.
#[must_use]
pub fn resized(orig: Rect, handle: Handle, mx: f64, my: f64, grid: SnapGrid, min_size: f64) -> Rect {
    let mut out = orig;
    if handle.moves_left() {
        out.x = grid.snap(orig.x + mx);
        out.width = grid.snap(orig.width - mx);
    } else if handle.moves_right() {
        out.width = grid.snap(orig.width + mx);
    }
    if handle.moves_top() {
        out.y = grid.snap(orig.y + my);
        out.height = grid.snap(orig.height - my);
    } else if handle.moves_bottom() {
        out.height = grid.snap(orig.height + my);
    }
    out.with_min_size(min_size)
}
