//! Viewport dimensions

use serde::{Deserialize, Serialize};

/// Drawable area in CSS pixels plus the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(390.0, 844.0, 1.0)
    }
}

impl Viewport {
    /// Non-positive or non-finite ratios fall back to 1
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            dpr,
        }
    }

    /// Backing-store size in device pixels
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round().max(1.0) as u32,
            (self.height * self.dpr).round().max(1.0) as u32,
        )
    }
}
