//! The heat dot stamped once per point.
//!
//! The dot is an SVG radial gradient from semi-opaque black at the center to
//! fully transparent at the rim. It is embedded in the binary, rasterized
//! with resvg on first use, and shared read-only by every render after that.

use heatmap_common::{HeatmapError, HeatmapResult};
use once_cell::sync::Lazy;

/// Embedded heat dot asset.
const HEAT_DOT_SVG: &str = include_str!("../assets/heatdot.svg");

/// Rasterized heat dot, decoded once per process.
///
/// A decode failure is kept rather than retried: it can only come from the
/// embedded asset, so every later render would fail the same way.
static DOT_STAMP: Lazy<Result<DotStamp, String>> = Lazy::new(|| {
    DotStamp::from_svg(HEAT_DOT_SVG).map_err(|e| {
        tracing::warn!(error = %e, "Failed to load heat dot stamp");
        e.to_string()
    })
});

/// Get the shared heat dot stamp.
pub fn dot_stamp() -> HeatmapResult<&'static DotStamp> {
    DOT_STAMP
        .as_ref()
        .map_err(|e| HeatmapError::ResourceUnavailable(format!("heat dot stamp: {}", e)))
}

/// An alpha-bearing sprite drawn with source-over blending.
#[derive(Debug, Clone)]
pub struct DotStamp {
    pixmap: tiny_skia::Pixmap,
}

impl DotStamp {
    /// Rasterize an SVG document at its intrinsic size.
    pub fn from_svg(svg: &str) -> HeatmapResult<Self> {
        let opt = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| HeatmapError::ResourceUnavailable(format!("SVG parse error: {}", e)))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            HeatmapError::ResourceUnavailable(format!(
                "cannot allocate {}x{} stamp",
                size.width(),
                size.height()
            ))
        })?;

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Offset from a point to the stamp's top-left corner.
    ///
    /// Uses integer halves of the stamp size, so odd-sized stamps sit half a
    /// pixel right of and below true center.
    pub fn anchor_offset(&self) -> (f32, f32) {
        ((self.width() / 2) as f32, (self.height() / 2) as f32)
    }

    /// Blend the stamp onto `canvas` centered at `(px, py)`.
    ///
    /// Fractional positions are honored and any part falling outside the
    /// canvas is clipped.
    pub fn stamp(&self, canvas: &mut tiny_skia::Pixmap, px: f32, py: f32) {
        let (off_x, off_y) = self.anchor_offset();
        canvas.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            tiny_skia::Transform::from_translate(px - off_x, py - off_y),
            None,
        );
    }

    /// Premultiplied RGBA data of the stamp.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }
}
