//! Crate-level error type

use thiserror::Error;

use crate::gis::DatasetReadError;
use crate::llm::LlmError;
use crate::publish::PublishError;

/// Any failure surfaced by the pipeline
#[derive(Error, Debug)]
pub enum WalterError {
    #[error(transparent)]
    Dataset(#[from] DatasetReadError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type WalterResult<T> = Result<T, WalterError>;
