//! Error types for heatmap generation.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for projecting and rasterizing point heatmaps.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Input Errors ===
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Rendering Errors ===
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Rendering failed: {0}")]
    RenderFailure(String),

    #[error("Encoding failed: {0}")]
    EncodeFailure(String),
}

impl HeatmapError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        HeatmapError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether the caller supplied bad input, as opposed to a failure inside
    /// the rasterizer. Callers fall back to the unprocessed map image only
    /// for the latter.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            HeatmapError::InvalidExtent(_) | HeatmapError::InvalidParameter { .. }
        )
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::invalid_parameter("json", err.to_string())
    }
}
