//! Error types for the diabetes analysis.

use ndarray::ShapeError;
use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Errors that can occur while loading, plotting or reporting.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The bundled dataset could not be assembled.
    #[error("Dataset error: {0}")]
    Dataset(String),
    /// An IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// A serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Invalid parameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Invalid input data.
    #[error("Invalid input data: {0}")]
    InvalidInput(String),
    /// A drawing region outside the figure grid was requested.
    #[error("Invalid drawing region ({row}, {col}) in a {rows}x{cols} grid")]
    InvalidRegion {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Shape mismatch in arrays.
    #[error("Shape mismatch: expected {expected_shape}, got {actual_shape}")]
    ShapeMismatch {
        expected_shape: String,
        actual_shape: String,
    },
    /// An error occurred during plotting.
    #[error("Plotting error: {0}")]
    PlottingError(String),
}

impl From<ShapeError> for EdaError {
    fn from(err: ShapeError) -> Self {
        EdaError::ShapeMismatch {
            expected_shape: "unknown".to_string(),
            actual_shape: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EdaError {
    fn from(err: std::io::Error) -> Self {
        EdaError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for EdaError {
    fn from(err: serde_json::Error) -> Self {
        EdaError::SerializationError(err.to_string())
    }
}
