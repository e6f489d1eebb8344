//! Error types for the GDD pipeline.

use thiserror::Error;

/// Result type alias using GddError.
pub type GddResult<T> = Result<T, GddError>;

/// Primary error type for the GDD pipeline.
///
/// None of these are recovered internally; every stage propagates them to the
/// process boundary.
#[derive(Debug, Error)]
pub enum GddError {
    /// A dataset is missing, unreadable or malformed.
    #[error("Failed to read dataset: {0}")]
    DataAccess(String),

    /// The tmin and tmax grids do not share the same day/lat/lon labels.
    #[error("Grid shape mismatch: {left} vs {right}")]
    ShapeMismatch { left: String, right: String },

    /// A coordinate selection matched no cells.
    #[error("Selection on '{axis}' is empty: {message}")]
    EmptySelection { axis: String, message: String },

    /// Figure could not be produced, written or displayed.
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl GddError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            GddError::DataAccess(_) => "DataAccessError",
            GddError::ShapeMismatch { .. } => "ShapeMismatchError",
            GddError::EmptySelection { .. } => "EmptySelectionError",
            GddError::Render(_) => "RenderError",
        }
    }

    pub fn empty_selection(axis: impl Into<String>, message: impl Into<String>) -> Self {
        GddError::EmptySelection {
            axis: axis.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for GddError {
    fn from(err: std::io::Error) -> Self {
        GddError::DataAccess(err.to_string())
    }
}
