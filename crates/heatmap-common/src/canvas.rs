//! Output canvas dimensions.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// Pixel dimensions of the raster to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Create a canvas size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> HeatmapResult<Self> {
        if width == 0 || height == 0 {
            return Err(HeatmapError::invalid_parameter(
                "size",
                format!("dimensions must be positive, got {}x{}", width, height),
            ));
        }
        Ok(Self { width, height })
    }

    /// Parse an export `size` parameter string: "width,height"
    pub fn from_size_string(s: &str) -> HeatmapResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(HeatmapError::invalid_parameter(
                "size",
                format!("{}: expected 'width,height'", s),
            ));
        }

        let parse = |part: &str| {
            part.parse::<u32>().map_err(|_| {
                HeatmapError::invalid_parameter("size", format!("invalid dimension: {}", part))
            })
        };

        Self::new(parse(parts[0])?, parse(parts[1])?)
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
