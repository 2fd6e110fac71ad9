//! Common extents and canvas sizes for heatmap tests.

use heatmap_common::{BoundingBox, CanvasSize};

/// Common extent definitions for testing, as (min_x, min_y, max_x, max_y).
pub mod extent {
    /// Global geographic extent (-180 to 180, -90 to 90)
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, -90.0, 180.0, 90.0);

    /// Northern Italy in Web Mercator meters
    pub const NORTH_ITALY_3857: (f64, f64, f64, f64) =
        (730_000.0, 5_500_000.0, 1_500_000.0, 5_950_000.0);

    /// Unit square
    pub const UNIT: (f64, f64, f64, f64) = (0.0, 0.0, 1.0, 1.0);

    /// Zero-width extent
    pub const ZERO_WIDTH: (f64, f64, f64, f64) = (5.0, 0.0, 5.0, 10.0);

    /// Zero-height extent
    pub const ZERO_HEIGHT: (f64, f64, f64, f64) = (0.0, 5.0, 10.0, 5.0);
}

/// Common canvas sizes, as (width, height).
pub mod canvas {
    /// Small square canvas, fast enough for per-pixel assertions
    pub const SMALL: (u32, u32) = (64, 64);

    /// Typical export-map image
    pub const EXPORT: (u32, u32) = (800, 600);

    /// Single pixel
    pub const PIXEL: (u32, u32) = (1, 1);
}

/// Build a `BoundingBox` from a fixture tuple.
pub fn bbox(extent: (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(extent.0, extent.1, extent.2, extent.3)
}

/// Build a `CanvasSize` from a fixture tuple.
///
/// Panics on zero dimensions, which no fixture uses.
pub fn canvas_size(size: (u32, u32)) -> CanvasSize {
    CanvasSize::new(size.0, size.1).expect("fixture canvas sizes are non-zero")
}
