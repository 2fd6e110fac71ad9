//! Point-density heatmap rasterization.
//!
//! Pipeline, run once per request:
//! 1. Fill a working canvas with opaque white.
//! 2. Stamp the heat dot at every projected point (source-over).
//! 3. Remap gray levels 0..=254 to heat colors, then turn exact white black.
//! 4. Draw the result through an opacity color matrix onto a transparent
//!    destination canvas.
//!
//! Every canvas is owned by the call and dropped on return, including on the
//! error path, so a failed render never leaves a partial image behind.

use heatmap_common::{CanvasSize, HeatmapError, HeatmapResult};
use projection::ProjectedPoints;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composite::{draw_with_matrix, ColorMatrix};
use crate::png;
use crate::remap::{substitute_background, RemapTable};
use crate::stamp::{dot_stamp, DotStamp};

/// Default global opacity of the heat layer.
pub const DEFAULT_OPACITY: f32 = 0.5;

/// Heatmap rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Opacity applied uniformly to the finished layer (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl HeatmapConfig {
    pub fn validate(&self) -> HeatmapResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(HeatmapError::invalid_parameter(
                "opacity",
                format!("must be between 0 and 1, got {}", self.opacity),
            ));
        }
        Ok(())
    }
}

/// A finished heat layer: straight RGBA, 4 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatLayer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl HeatLayer {
    /// RGBA value at `(x, y)`, or `None` outside the layer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Encode as PNG, indexed when the layer has few enough colors.
    pub fn to_png(&self) -> HeatmapResult<Vec<u8>> {
        png::create_png_auto(&self.pixels, self.width as usize, self.height as usize)
    }
}

/// Render a heat layer for already-projected points.
pub fn render_heatmap(
    size: CanvasSize,
    points: &ProjectedPoints,
    config: &HeatmapConfig,
) -> HeatmapResult<HeatLayer> {
    let stamp = dot_stamp()?;
    render_with_stamp(size, points, config, stamp)
}

/// Render a heat layer and encode it as PNG bytes.
pub fn render_heatmap_png(
    size: CanvasSize,
    points: &ProjectedPoints,
    config: &HeatmapConfig,
) -> HeatmapResult<Vec<u8>> {
    let layer = render_heatmap(size, points, config)?;
    let png = layer.to_png()?;
    debug!(
        width = size.width,
        height = size.height,
        bytes = png.len(),
        "Encoded heatmap PNG"
    );
    Ok(png)
}

/// Render with an explicit stamp instead of the embedded heat dot.
pub fn render_with_stamp(
    size: CanvasSize,
    points: &ProjectedPoints,
    config: &HeatmapConfig,
    stamp: &DotStamp,
) -> HeatmapResult<HeatLayer> {
    config.validate()?;

    let working = stamp_points(size, points, stamp)?;
    let colorized = colorize(working);

    let mut pixels = vec![0u8; size.pixel_count() * 4];
    draw_with_matrix(&mut pixels, &colorized, &ColorMatrix::with_opacity(config.opacity));

    Ok(HeatLayer {
        width: size.width,
        height: size.height,
        pixels,
    })
}

/// Stamp every point onto a fresh opaque white canvas.
///
/// Points off the canvas, fully or partly, are clipped. Non-finite points
/// are skipped.
pub fn stamp_points(
    size: CanvasSize,
    points: &ProjectedPoints,
    stamp: &DotStamp,
) -> HeatmapResult<tiny_skia::Pixmap> {
    let mut canvas = tiny_skia::Pixmap::new(size.width, size.height).ok_or_else(|| {
        HeatmapError::RenderFailure(format!(
            "cannot allocate {}x{} working canvas",
            size.width, size.height
        ))
    })?;
    canvas.fill(tiny_skia::Color::WHITE);

    let mut skipped = 0usize;
    for (px, py) in points.iter() {
        if !px.is_finite() || !py.is_finite() {
            skipped += 1;
            continue;
        }
        stamp.stamp(&mut canvas, px, py);
    }

    debug!(
        width = size.width,
        height = size.height,
        points = points.len(),
        skipped,
        "Stamped heat dots"
    );

    Ok(canvas)
}

/// Turn a stamped working canvas into opaque heat colors.
///
/// The working canvas is fully opaque, so its premultiplied data is already
/// straight RGBA.
pub fn colorize(working: tiny_skia::Pixmap) -> Vec<u8> {
    let mut pixels = working.take();

    let recolored = RemapTable::heat().apply(&mut pixels);
    let background = substitute_background(&mut pixels);

    debug!(recolored, background, "Remapped gray levels to heat colors");
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> CanvasSize {
        CanvasSize::new(width, height).unwrap()
    }

    #[test]
    fn test_empty_canvas_colorizes_to_black() {
        let working = stamp_points(size(8, 4), &ProjectedPoints::new(), dot_stamp().unwrap()).unwrap();
        assert!(working.data().iter().all(|&b| b == 255));

        let colorized = colorize(working);
        assert!(colorized.chunks_exact(4).all(|p| *p == [0u8, 0, 0, 255]));
    }

    #[test]
    fn test_working_canvas_stays_gray() {
        let points: ProjectedPoints = vec![(10.0, 10.0), (14.5, 12.25), (30.0, 2.0)]
            .into_iter()
            .collect();
        let working = stamp_points(size(40, 24), &points, dot_stamp().unwrap()).unwrap();
        for p in working.data().chunks_exact(4) {
            assert_eq!(p[3], 255);
            assert!(p[0] == p[1] && p[1] == p[2], "non-gray pixel {:?}", p);
        }
    }

    #[test]
    fn test_invalid_opacity_rejected() {
        let config = HeatmapConfig { opacity: 1.5 };
        let err = render_heatmap(size(4, 4), &ProjectedPoints::new(), &config).unwrap_err();
        assert!(matches!(err, HeatmapError::InvalidParameter { .. }));
    }

    #[test]
    fn test_config_deserializes_with_default() {
        let config: HeatmapConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HeatmapConfig::default());
        let config: HeatmapConfig = serde_json::from_str(r#"{"opacity": 0.25}"#).unwrap();
        assert_eq!(config.opacity, 0.25);
    }
}
