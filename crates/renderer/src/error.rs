//! Error types for map rendering.

use gdd_common::GddError;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Nothing positive to draw, so no contour levels exist
    #[error("No positive data to render: {0}")]
    NoData(String),

    /// No usable TrueType font was found
    #[error("No usable font: {0}")]
    FontUnavailable(String),

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform image viewer could not be launched
    #[error("Failed to display image: {0}")]
    Display(String),

    /// Figure geometry that cannot be rasterized
    #[error("Invalid figure: {0}")]
    InvalidFigure(String),
}

impl From<RenderError> for GddError {
    fn from(err: RenderError) -> Self {
        GddError::Render(err.to_string())
    }
}
