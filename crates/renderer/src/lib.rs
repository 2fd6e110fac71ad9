//! Point-density heatmap rendering.
//!
//! Turns projected point locations into a semi-transparent heat layer:
//! - Heat dot stamping with alpha accumulation
//! - Gray-level to heat color remapping
//! - Opacity compositing via a color matrix
//! - PNG encoding (indexed or RGBA)

pub mod composite;
pub mod heatmap;
pub mod png;
pub mod remap;
pub mod stamp;

pub use heatmap::{render_heatmap, render_heatmap_png, HeatLayer, HeatmapConfig};
