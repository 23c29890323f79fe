//! Editor configuration.
//!
//! Every field defaults to the matching constant in [`crate::consts`], so an
//! empty JSON object yields the stock editor. Hosts may override any subset.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH, GRID_SIZE, MAX_ZOOM, MIN_ROOM_SIZE, MIN_ZOOM,
    PLACEMENT_MARGIN, PLACEMENT_RESERVE_X, PLACEMENT_RESERVE_Y, ROOM_LABELS, ZOOM_STEP,
};
use crate::error::ConfigError;

/// Tunable parameters for an editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Model-space canvas width; rendered at `round(canvas_width * zoom)` pixels.
    pub canvas_width: f64,
    /// Model-space canvas height; rendered at `round(canvas_height * zoom)` pixels.
    pub canvas_height: f64,
    /// Grid cell edge at zoom 1.0.
    pub grid_size: f64,
    /// Floor applied to room width and height.
    pub min_room_size: f64,
    /// Width of a newly added room.
    pub default_room_width: f64,
    /// Height of a newly added room.
    pub default_room_height: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Zoom increment per step.
    pub zoom_step: f64,
    /// Minimum x/y of a newly placed room.
    pub placement_margin: f64,
    /// Space kept free on the right when placing a room. At least `default_room_width`.
    pub placement_reserve_x: f64,
    /// Space kept free at the bottom when placing a room. At least `default_room_height`.
    pub placement_reserve_y: f64,
    /// Category words for default labels.
    pub labels: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            grid_size: GRID_SIZE,
            min_room_size: MIN_ROOM_SIZE,
            default_room_width: DEFAULT_ROOM_WIDTH,
            default_room_height: DEFAULT_ROOM_HEIGHT,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            placement_margin: PLACEMENT_MARGIN,
            placement_reserve_x: PLACEMENT_RESERVE_X,
            placement_reserve_y: PLACEMENT_RESERVE_Y,
            labels: ROOM_LABELS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON document into a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("grid_size", self.grid_size)?;
        positive("min_room_size", self.min_room_size)?;
        positive("zoom_step", self.zoom_step)?;
        if self.default_room_width < self.min_room_size {
            return Err(invalid("default_room_width", "must be at least min_room_size"));
        }
        if self.default_room_height < self.min_room_size {
            return Err(invalid("default_room_height", "must be at least min_room_size"));
        }
        if self.min_zoom.is_nan() || self.min_zoom <= 0.0 || self.min_zoom > 1.0 {
            return Err(invalid("min_zoom", "must be in (0, 1]"));
        }
        if !self.max_zoom.is_finite() || self.max_zoom < 1.0 {
            return Err(invalid("max_zoom", "must be a finite value >= 1"));
        }
        if !self.placement_margin.is_finite() || self.placement_margin < 0.0 {
            return Err(invalid("placement_margin", "must be non-negative"));
        }
        if !self.placement_reserve_x.is_finite() || self.placement_reserve_x < self.default_room_width {
            return Err(invalid("placement_reserve_x", "must be finite and at least default_room_width"));
        }
        if !self.placement_reserve_y.is_finite() || self.placement_reserve_y < self.default_room_height {
            return Err(invalid("placement_reserve_y", "must be finite and at least default_room_height"));
        }
        if self.placement_span_x() <= 0.0 {
            return Err(invalid("placement_reserve_x", "leaves no room to place rooms horizontally"));
        }
        if self.placement_span_y() <= 0.0 {
            return Err(invalid("placement_reserve_y", "leaves no room to place rooms vertically"));
        }
        if self.labels.is_empty() {
            return Err(invalid("labels", "must not be empty"));
        }
        Ok(())
    }

    /// Width of the interval new rooms are placed in, starting at the margin.
    #[must_use]
    pub fn placement_span_x(&self) -> f64 {
        self.canvas_width - self.placement_reserve_x - self.placement_margin
    }

    /// Height of the interval new rooms are placed in, starting at the margin.
    #[must_use]
    pub fn placement_span_y(&self) -> f64 {
        self.canvas_height - self.placement_reserve_y - self.placement_margin
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive finite number"))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
