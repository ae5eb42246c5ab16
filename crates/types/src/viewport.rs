//! The surface a layout pass is computed against.

use serde::{Deserialize, Serialize};

/// Density that style pixel values are authored at.
pub const BASELINE_DPI: f32 = 96.0;

/// Size and pixel density of the area a tree is laid out into.
///
/// Style values (sizes, margins, gaps) are authored at `baseline_dpi` and scaled to `dpi`
/// before use. Intrinsic sizes come from the measuring layer already in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    #[serde(default = "default_dpi")]
    pub baseline_dpi: f32,
}

fn default_dpi() -> f32 {
    BASELINE_DPI
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            dpi: BASELINE_DPI,
            baseline_dpi: BASELINE_DPI,
        }
    }

    pub fn with_dpi(width: f32, height: f32, dpi: f32, baseline_dpi: f32) -> Self {
        Self {
            width,
            height,
            dpi,
            baseline_dpi,
        }
    }

    /// Ratio between device pixels and style pixels. Degenerate densities scale by 1.
    pub fn scale(&self) -> f32 {
        if self.dpi > 0.0 && self.baseline_dpi > 0.0 {
            self.dpi / self.baseline_dpi
        } else {
            1.0
        }
    }

    /// Converts a style pixel value to whole device pixels, truncating toward zero.
    pub fn scale_px(&self, value: f32) -> f32 {
        (value * self.scale()).trunc()
    }
}
