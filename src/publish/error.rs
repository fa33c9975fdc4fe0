//! Error types for publishing operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing to GitBook or ArcGIS Online
#[derive(Error, Debug)]
pub enum PublishError {
    /// Transport failure talking to the remote API
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote API rejected the request
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The remote API answered with something unexpected
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// No destination space was configured or given
    #[error("No GitBook space configured: {0}")]
    ConfigMissing(String),

    /// Configuration file could not be read
    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// Required credentials are absent
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Invalid glob pattern while scanning a directory
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => PublishError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => PublishError::Http(err.to_string()),
        }
    }
}

/// Result type for publishing operations
pub type PublishResult<T> = Result<T, PublishError>;
