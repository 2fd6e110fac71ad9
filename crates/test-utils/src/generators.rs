//! Deterministic point-set generators.
//!
//! Identical arguments always produce identical point sets, so rendered
//! output can be compared byte for byte. Random sets come from a seeded
//! `StdRng`, never from the thread RNG.

use heatmap_common::{BoundingBox, MapPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Evenly spaced points strictly inside `extent`, `cols` by `rows`.
///
/// Points sit at cell centers, so none of them lands on an edge.
///
/// # Example
///
/// ```
/// use heatmap_common::BoundingBox;
/// use test_utils::grid_points;
///
/// let points = grid_points(&BoundingBox::new(0.0, 0.0, 4.0, 2.0), 2, 1);
/// assert_eq!(points.len(), 2);
/// assert_eq!((points[0].x, points[0].y), (1.0, 1.0));
/// assert_eq!((points[1].x, points[1].y), (3.0, 1.0));
/// ```
pub fn grid_points(extent: &BoundingBox, cols: usize, rows: usize) -> Vec<MapPoint> {
    let mut points = Vec::with_capacity(cols * rows);
    let dx = extent.width() / cols.max(1) as f64;
    let dy = extent.height() / rows.max(1) as f64;
    for row in 0..rows {
        for col in 0..cols {
            points.push(MapPoint::new(
                extent.min_x + (col as f64 + 0.5) * dx,
                extent.min_y + (row as f64 + 0.5) * dy,
            ));
        }
    }
    points
}

/// `count` points on a golden-angle spiral around `center`, within `radius`.
///
/// Density falls off from the center outward, which gives a heatmap with all
/// three color bands.
pub fn cluster_points(center: (f64, f64), radius: f64, count: usize) -> Vec<MapPoint> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..count)
        .map(|i| {
            let r = radius * ((i as f64 + 0.5) / count.max(1) as f64).sqrt();
            let theta = i as f64 * golden_angle;
            MapPoint::new(center.0 + r * theta.cos(), center.1 + r * theta.sin())
        })
        .collect()
}

/// `count` pseudo-random points inside `extent`, reproducible from `seed`.
pub fn scattered_points(extent: &BoundingBox, count: usize, seed: u64) -> Vec<MapPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = rng.gen_range(extent.min_x..=extent.max_x);
            let y = rng.gen_range(extent.min_y..=extent.max_y);
            MapPoint::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_points_inside_extent() {
        let extent = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
        let points = grid_points(&extent, 5, 4);
        assert_eq!(points.len(), 20);
        assert!(points.iter().all(|p| extent.contains_point(p.x, p.y)));
    }

    #[test]
    fn test_cluster_points_within_radius() {
        let points = cluster_points((100.0, 50.0), 2.0, 200);
        assert_eq!(points.len(), 200);
        for p in &points {
            let d = ((p.x - 100.0).powi(2) + (p.y - 50.0).powi(2)).sqrt();
            assert!(d <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_scattered_points_reproducible() {
        let extent = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let a = scattered_points(&extent, 50, 42);
        let b = scattered_points(&extent, 50, 42);
        let c = scattered_points(&extent, 50, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|p| extent.contains_point(p.x, p.y)));
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let extent = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let points = scattered_points(&extent, 3, 0);
        assert_ne!(points[0], points[1]);
    }
}
