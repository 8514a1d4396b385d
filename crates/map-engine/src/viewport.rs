//! Viewport
//!
//! Pan offset and zoom factor applied to the whole node + edge layer as
//! `translate(pan) scale(zoom)`. Zoom is anchored at the layer origin.

use crate::error::{MapError, MapResult};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Wheel-up / zoom-in multiplier
    pub zoom_in_factor: f64,
    /// Wheel-down / zoom-out multiplier
    pub zoom_out_factor: f64,
    pub default_pan_x: f64,
    pub default_pan_y: f64,
    pub default_zoom: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 2.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            default_pan_x: 100.0,
            default_pan_y: 100.0,
            default_zoom: 0.8,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> MapResult<()> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.default_zoom && self.default_zoom <= self.max_zoom) {
            return Err(MapError::Config(format!(
                "zoom bounds must satisfy 0 < min ({}) <= default ({}) <= max ({})",
                self.min_zoom, self.default_zoom, self.max_zoom
            )));
        }
        if self.zoom_in_factor <= 1.0 || self.zoom_out_factor <= 0.0 || self.zoom_out_factor >= 1.0 {
            return Err(MapError::Config("zoom factors must be > 1 (in) and in (0, 1) (out)".to_string()));
        }
        Ok(())
    }
}

/// Pan/zoom state. Process-local, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::reset(&ViewportConfig::default())
    }
}

impl ViewportState {
    /// The fixed starting view
    pub fn reset(config: &ViewportConfig) -> Self {
        Self {
            pan_x: config.default_pan_x,
            pan_y: config.default_pan_y,
            zoom: config.default_zoom,
        }
    }

    pub fn panned(self, dx: f64, dy: f64) -> Self {
        Self {
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
            ..self
        }
    }

    /// Multiply zoom by `factor`, clamped to the configured bounds
    pub fn zoomed(self, factor: f64, config: &ViewportConfig) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        Self {
            zoom: (self.zoom * factor).clamp(config.min_zoom, config.max_zoom),
            ..self
        }
    }

    /// Wheel-down zooms out, wheel-up zooms in
    pub fn wheeled(self, delta_y: f64, config: &ViewportConfig) -> Self {
        if delta_y > 0.0 {
            self.zoomed(config.zoom_out_factor, config)
        } else if delta_y < 0.0 {
            self.zoomed(config.zoom_in_factor, config)
        } else {
            self
        }
    }

    /// CSS transform for the node + edge layer
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.pan_x, self.pan_y, self.zoom)
    }

    /// Screen offset (relative to the canvas) -> layout space
    pub fn to_layout(&self, screen: Point) -> Point {
        Point::new((screen.x - self.pan_x) / self.zoom, (screen.y - self.pan_y) / self.zoom)
    }

    /// Layout space -> screen offset (relative to the canvas)
    pub fn to_screen(&self, at: Point) -> Point {
        Point::new(at.x * self.zoom + self.pan_x, at.y * self.zoom + self.pan_y)
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}
