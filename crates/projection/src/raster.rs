//! Extent-to-raster projection.
//!
//! Maps points from a map extent (origin bottom-left, y up) onto a raster of
//! known size (origin top-left, y down). The transform is a pure scale and
//! offset per axis with the vertical axis flipped:
//!
//! ```text
//! px = (x - min_x) * width / (max_x - min_x)
//! py = height - (y - min_y) * height / (max_y - min_y)
//! ```
//!
//! Results are never clamped. Points outside the extent produce negative
//! coordinates or coordinates past the canvas edge, and the rasterizer is
//! expected to clip them.

use heatmap_common::{BoundingBox, CanvasSize, HeatmapResult, MapPoint};

/// A validated transform from one extent to one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterTransform {
    extent: BoundingBox,
    width: f64,
    height: f64,
}

impl RasterTransform {
    /// Build a transform, rejecting zero, negative or non-finite extent spans.
    pub fn new(extent: BoundingBox, size: CanvasSize) -> HeatmapResult<Self> {
        extent.validate()?;
        Ok(Self {
            extent,
            width: size.width as f64,
            height: size.height as f64,
        })
    }

    /// The extent this transform maps from.
    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    /// Map a single coordinate to pixel space.
    ///
    /// Results are not clamped. A finite point far enough outside the extent
    /// overflows `f32` and comes back infinite; stamping skips such points.
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        let rel_x = (x - self.extent.min_x) * self.width / self.extent.width();
        // Extent origin is bottom-left, raster origin is top-left.
        let rel_y = self.height - ((y - self.extent.min_y) * self.height / self.extent.height());
        (rel_x as f32, rel_y as f32)
    }

    /// Map every point, preserving order.
    pub fn project_all(&self, points: &[MapPoint]) -> ProjectedPoints {
        let mut projected = ProjectedPoints::with_capacity(points.len());
        for p in points {
            let (px, py) = self.to_pixel(p.x, p.y);
            projected.push(px, py);
        }
        projected
    }
}

/// Project `points` from `extent` into a `size` canvas.
///
/// Fails with `InvalidExtent` before touching any point if the extent is
/// degenerate.
pub fn project(
    extent: &BoundingBox,
    size: CanvasSize,
    points: &[MapPoint],
) -> HeatmapResult<ProjectedPoints> {
    Ok(RasterTransform::new(*extent, size)?.project_all(points))
}

/// Keep only the points inside `extent`, edges included.
///
/// This is the selection a spatial "intersects" query against the export
/// envelope returns for point features.
pub fn points_within(extent: &BoundingBox, points: &[MapPoint]) -> Vec<MapPoint> {
    points
        .iter()
        .filter(|p| extent.contains_point(p.x, p.y))
        .copied()
        .collect()
}

/// Projected pixel coordinates stored as parallel arrays.
///
/// `xs` and `ys` always have the same length; the fields are private so that
/// can only change through [`ProjectedPoints::push`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedPoints {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl ProjectedPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, x: f32, y: f32) {
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    /// Iterate `(px, py)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

impl FromIterator<(f32, f32)> for ProjectedPoints {
    fn from_iter<I: IntoIterator<Item = (f32, f32)>>(iter: I) -> Self {
        let mut projected = ProjectedPoints::new();
        for (x, y) in iter {
            projected.push(x, y);
        }
        projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::HeatmapError;

    fn size(width: u32, height: u32) -> CanvasSize {
        CanvasSize::new(width, height).unwrap()
    }

    #[test]
    fn test_corners_flip_vertical_axis() {
        let t = RasterTransform::new(BoundingBox::new(0.0, 0.0, 10.0, 20.0), size(100, 200)).unwrap();
        assert_eq!(t.to_pixel(0.0, 0.0), (0.0, 200.0));
        assert_eq!(t.to_pixel(10.0, 20.0), (100.0, 0.0));
        assert_eq!(t.to_pixel(0.0, 20.0), (0.0, 0.0));
        assert_eq!(t.to_pixel(10.0, 0.0), (100.0, 200.0));
    }

    #[test]
    fn test_outside_points_not_clamped() {
        let t = RasterTransform::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), size(100, 100)).unwrap();
        assert_eq!(t.to_pixel(-5.0, 15.0), (-50.0, -50.0));
        assert_eq!(t.to_pixel(20.0, -10.0), (200.0, 200.0));
    }

    #[test]
    fn test_degenerate_extent_rejected() {
        let err = project(&BoundingBox::new(1.0, 0.0, 1.0, 10.0), size(10, 10), &[]).unwrap_err();
        assert!(matches!(err, HeatmapError::InvalidExtent(_)));
    }

    #[test]
    fn test_parallel_arrays_stay_aligned() {
        let projected: ProjectedPoints = vec![(1.0, 2.0), (3.0, 4.0)].into_iter().collect();
        assert_eq!(projected.xs(), &[1.0, 3.0]);
        assert_eq!(projected.ys(), &[2.0, 4.0]);
        assert_eq!(projected.iter().collect::<Vec<_>>(), vec![(1.0, 2.0), (3.0, 4.0)]);
    }
}
