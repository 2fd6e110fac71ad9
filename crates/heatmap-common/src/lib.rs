//! Common types shared by the heatmap projection, rendering and CLI crates.

pub mod bbox;
pub mod canvas;
pub mod error;
pub mod point;
pub mod request;

pub use bbox::BoundingBox;
pub use canvas::CanvasSize;
pub use error::{HeatmapError, HeatmapResult};
pub use point::MapPoint;
pub use request::ExportRequest;
