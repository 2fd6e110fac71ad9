//! Bounding box (map extent) types and operations.

use serde::{Deserialize, Serialize};

use crate::error::HeatmapError;

/// The map extent requested for export.
///
/// The origin is bottom-left: `min_y` is the southern edge. Coordinates are in
/// whatever units the map uses (degrees for geographic, meters for projected).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse an export `bbox` parameter string: "xmin,ymin,xmax,ymax"
    pub fn from_wms_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self {
            min_x: parse(parts[0])?,
            min_y: parse(parts[1])?,
            max_x: parse(parts[2])?,
            max_y: parse(parts[3])?,
        })
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check that both spans are finite and strictly positive.
    ///
    /// Projection divides by the spans, so a degenerate extent must be
    /// rejected here rather than producing `NaN`/`Inf` pixel coordinates.
    pub fn validate(&self) -> Result<(), HeatmapError> {
        let (w, h) = (self.width(), self.height());
        if !w.is_finite() || !h.is_finite() {
            return Err(HeatmapError::InvalidExtent(format!(
                "non-finite extent {:?}",
                self
            )));
        }
        if w <= 0.0 {
            return Err(HeatmapError::InvalidExtent(format!(
                "x span must be positive (min_x={}, max_x={})",
                self.min_x, self.max_x
            )));
        }
        if h <= 0.0 {
            return Err(HeatmapError::InvalidExtent(format!(
                "y span must be positive (min_y={}, max_y={})",
                self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    /// Check if a point is contained within this bbox (edges included).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Shift the extent by the same offset on both axes.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.min_x + dx,
            self.min_y + dy,
            self.max_x + dx,
            self.max_y + dy,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'xmin,ymin,xmax,ymax'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),
}

impl From<BboxParseError> for HeatmapError {
    fn from(err: BboxParseError) -> Self {
        HeatmapError::invalid_parameter("bbox", err.to_string())
    }
}
