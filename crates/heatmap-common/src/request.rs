//! Export-map request parameters relevant to heatmap generation.

use serde::Deserialize;

use crate::bbox::BoundingBox;
use crate::canvas::CanvasSize;
use crate::error::{HeatmapError, HeatmapResult};

/// The extent and canvas size of an export-map call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRequest {
    pub extent: BoundingBox,
    pub size: CanvasSize,
}

#[derive(Debug, Deserialize)]
struct RawExportInput {
    bbox: Option<String>,
    size: Option<String>,
}

impl ExportRequest {
    /// Read `bbox` and `size` from an export operation input such as
    /// `{"bbox": "xmin,ymin,xmax,ymax", "size": "width,height", ...}`.
    ///
    /// Other keys are ignored. The extent is validated so the result can be
    /// handed straight to projection.
    pub fn from_json(input: &str) -> HeatmapResult<Self> {
        let raw: RawExportInput = serde_json::from_str(input)?;

        let bbox = raw
            .bbox
            .ok_or_else(|| HeatmapError::invalid_parameter("bbox", "missing"))?;
        let size = raw
            .size
            .ok_or_else(|| HeatmapError::invalid_parameter("size", "missing"))?;

        let extent = BoundingBox::from_wms_string(&bbox)?;
        extent.validate()?;

        Ok(Self {
            extent,
            size: CanvasSize::from_size_string(&size)?,
        })
    }
}
