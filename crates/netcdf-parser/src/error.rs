//! Error types for NetCDF parsing operations.

use gdd_common::GddError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Time coordinate could not be decoded
    #[error("Invalid time coordinate: {0}")]
    InvalidTime(String),

    /// A read window matched no coordinates on one axis
    #[error("Selection on '{axis}' is empty: {message}")]
    EmptySelection { axis: String, message: String },
}

impl From<NetCdfError> for GddError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::EmptySelection { axis, message } => GddError::EmptySelection { axis, message },
            other => GddError::DataAccess(other.to_string()),
        }
    }
}
