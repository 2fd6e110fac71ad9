//! Coordinate transformations from map extents to raster pixels.
//!
//! Implemented from scratch without external dependencies.

pub mod raster;

pub use raster::{points_within, project, ProjectedPoints, RasterTransform};
