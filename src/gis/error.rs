//! Error types for dataset reading

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a spatial dataset
#[derive(Error, Debug)]
pub enum DatasetReadError {
    /// The dataset path does not exist
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    /// The file extension is not a supported spatial format
    #[error("Unsupported dataset format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The file exists but could not be parsed
    #[error("Failed to parse dataset {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dataset reading
pub type DatasetResult<T> = Result<T, DatasetReadError>;
