//! Heatmap rendering job: load points, filter to the extent, project,
//! rasterize and write the PNG.

use anyhow::{Context, Result};
use heatmap_common::{BoundingBox, CanvasSize, ExportRequest, HeatmapError, MapPoint};
use renderer::{render_heatmap_png, HeatmapConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Resolved inputs for one render.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub extent: BoundingBox,
    pub size: CanvasSize,
    pub points_path: PathBuf,
    pub output_path: PathBuf,
    pub config: HeatmapConfig,
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub points_read: usize,
    pub points_rendered: usize,
    pub bytes_written: usize,
}

impl RenderJob {
    /// Resolve extent and size from an export request file or from the
    /// `bbox`/`size` strings. Explicit strings win over the request file.
    pub fn resolve(
        request: Option<&Path>,
        bbox: Option<&str>,
        size: Option<&str>,
        points_path: PathBuf,
        output_path: PathBuf,
        config: HeatmapConfig,
    ) -> Result<Self> {
        let from_request = match request {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading export request {}", path.display()))?;
                Some(ExportRequest::from_json(&text).context("parsing export request")?)
            }
            None => None,
        };

        let extent = match (bbox, &from_request) {
            (Some(s), _) => BoundingBox::from_wms_string(s)
                .map_err(HeatmapError::from)
                .context("parsing --bbox")?,
            (None, Some(req)) => req.extent,
            (None, None) => {
                return Err(HeatmapError::invalid_parameter(
                    "bbox",
                    "an extent is required: pass --bbox or --request",
                )
                .into())
            }
        };
        extent.validate()?;

        let size = match (size, &from_request) {
            (Some(s), _) => CanvasSize::from_size_string(s).context("parsing --size")?,
            (None, Some(req)) => req.size,
            (None, None) => {
                return Err(HeatmapError::invalid_parameter(
                    "size",
                    "a canvas size is required: pass --size or --request",
                )
                .into())
            }
        };

        config.validate()?;

        Ok(Self {
            extent,
            size,
            points_path,
            output_path,
            config,
        })
    }

    /// Run the job and write the PNG to `output_path`.
    pub fn run(&self) -> Result<RenderSummary> {
        let start = Instant::now();

        let points = load_points(&self.points_path)?;
        let inside = projection::points_within(&self.extent, &points);
        debug!(
            read = points.len(),
            inside = inside.len(),
            "Filtered points to extent"
        );

        let projected = projection::project(&self.extent, self.size, &inside)?;
        let png = render_heatmap_png(self.size, &projected, &self.config)?;

        fs::write(&self.output_path, &png)
            .with_context(|| format!("writing {}", self.output_path.display()))?;

        info!(
            points = inside.len(),
            width = self.size.width,
            height = self.size.height,
            bytes = png.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            output = %self.output_path.display(),
            "Heatmap rendered"
        );

        Ok(RenderSummary {
            points_read: points.len(),
            points_rendered: inside.len(),
            bytes_written: png.len(),
        })
    }
}

/// Read a JSON array of points (`[x, y]` pairs or `{"x", "y"}` objects).
pub fn load_points(path: &Path) -> Result<Vec<MapPoint>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading points file {}", path.display()))?;
    let points: Vec<MapPoint> = serde_json::from_str(&text)
        .map_err(HeatmapError::from)
        .with_context(|| format!("parsing points file {}", path.display()))?;
    Ok(points)
}

/// Whether a failed job was rejected for bad input (extent, size, opacity,
/// request or points JSON) rather than failing inside the rasterizer or on
/// I/O.
pub fn is_input_failure(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<HeatmapError>())
        .any(HeatmapError::is_input_error)
}
