//! Error types for LLM operations
//!
//! This module defines error types for the narrative backend, including connection
//! errors, model availability problems, and malformed responses.

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Failed to connect to LLM service
    #[error("Failed to connect to LLM service: {0}")]
    ConnectionError(String),

    /// Request timeout
    #[error("LLM request timed out after {0} seconds")]
    Timeout(u64),

    /// Model not found or failed to pull
    #[error("Model error: {0}")]
    ModelError(String),

    /// Invalid response from LLM
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    /// Failed to parse the LLM service payload
    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    /// Rate limiting
    #[error("Rate limited by LLM service, retry after {0} seconds")]
    RateLimited(u64),

    /// The model runtime is unreachable and availability was required
    #[error("LLM backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::ParseError(err.to_string())
    }
}

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

impl LlmError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            LlmError::ConnectionError(msg) | LlmError::BackendUnavailable(msg) => {
                format!(
                    "Failed to connect to LLM service: {msg}\n\n\
                    Hints:\n\
                    - Ensure 'ollama serve' is running\n\
                    - Verify OLLAMA_HOST points at the right address\n\
                    - Run without --require-llm to use template descriptions"
                )
            }
            LlmError::Timeout(secs) => {
                format!(
                    "LLM request timed out after {secs} seconds.\n\n\
                    Hints:\n\
                    - The model may be overloaded, try again later\n\
                    - Consider using a smaller/faster model\n\
                    - Increase timeout with --timeout flag"
                )
            }
            LlmError::RateLimited(secs) => {
                format!(
                    "Rate limited by LLM service. Retry after {secs} seconds.\n\n\
                    Hint: Wait and try again."
                )
            }
            LlmError::ModelError(msg) => {
                format!(
                    "LLM model error: {msg}\n\n\
                    Hints:\n\
                    - Pull the model manually with 'ollama pull <model>'\n\
                    - Select another model with --model or WALTER_MODEL"
                )
            }
            _ => self.to_string(),
        }
    }

    /// Check if this error means the runtime itself could not be reached
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            LlmError::ConnectionError(_) | LlmError::Timeout(_) | LlmError::BackendUnavailable(_)
        )
    }
}
