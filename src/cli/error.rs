//! CLI error type

use std::path::PathBuf;

use thiserror::Error;

use crate::gis::DatasetReadError;
use crate::llm::LlmError;
use crate::publish::PublishError;

/// Errors reported by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Dataset(#[from] DatasetReadError),

    #[error("{}", .0.user_message())]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{failed} of {total} file(s) failed to publish")]
    SyncIncomplete { failed: usize, total: usize },

    #[error("{invalid} of {total} feature(s) have invalid geometry")]
    InvalidGeometry { invalid: usize, total: usize },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_uses_hints() {
        let err: CliError = LlmError::BackendUnavailable("refused".to_string()).into();
        assert!(err.to_string().contains("ollama serve"));
    }

    #[test]
    fn test_sync_incomplete_display() {
        let err = CliError::SyncIncomplete {
            failed: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "2 of 5 file(s) failed to publish");
    }
}
