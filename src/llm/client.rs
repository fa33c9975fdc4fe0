//! LLM client trait
//!
//! This module defines the `LlmClient` trait the narrative backend talks to. The
//! pipeline is synchronous, so every call blocks until the runtime answers or fails.

#[cfg(test)]
use std::cell::Cell;

#[cfg(test)]
use super::error::LlmError;
use super::error::LlmResult;

/// Trait for LLM client implementations
pub trait LlmClient {
    /// Generate a completion for the given prompt
    ///
    /// # Arguments
    /// * `prompt` - The input prompt for the LLM
    ///
    /// # Returns
    /// The generated text response
    fn complete(&self, prompt: &str) -> LlmResult<String>;

    /// Get the model name being used
    fn model_name(&self) -> &str;

    /// List the models available locally on the runtime
    fn list_models(&self) -> LlmResult<Vec<String>>;

    /// Fetch the configured model onto the runtime
    fn pull_model(&self) -> LlmResult<()>;
}

/// Whether a runtime model listing contains `model`
///
/// Ollama reports tagged names (`phi:latest`), so an untagged name matches any tag.
pub fn model_listed(models: &[String], model: &str) -> bool {
    models.iter().any(|listed| {
        listed == model
            || (!model.contains(':')
                && listed
                    .strip_prefix(model)
                    .is_some_and(|rest| rest.starts_with(':')))
    })
}

/// A mock LLM client for testing
#[cfg(test)]
pub struct MockLlmClient {
    response: String,
    model: String,
    models: Vec<String>,
    should_fail: bool,
    unreachable: bool,
    pull_fails: bool,
    calls: Cell<usize>,
    pulls: Cell<usize>,
}

#[cfg(test)]
impl MockLlmClient {
    /// Create a new mock client that returns the given response
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            model: "mock-model".to_string(),
            models: vec!["mock-model:latest".to_string()],
            should_fail: false,
            unreachable: false,
            pull_fails: false,
            calls: Cell::new(0),
            pulls: Cell::new(0),
        }
    }

    /// Create a mock client whose completions fail
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Create a mock client for a runtime that cannot be reached at all
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new("")
        }
    }

    /// List no models locally, so the probe has to pull
    pub fn without_local_model(mut self) -> Self {
        self.models = Vec::new();
        self
    }

    /// Make pulling the model fail
    pub fn with_failing_pull(mut self) -> Self {
        self.pull_fails = true;
        self
    }

    /// Number of completion calls received
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Number of pull calls received
    pub fn pulls(&self) -> usize {
        self.pulls.get()
    }
}

#[cfg(test)]
impl LlmClient for MockLlmClient {
    fn complete(&self, _prompt: &str) -> LlmResult<String> {
        self.calls.set(self.calls.get() + 1);
        if self.should_fail || self.unreachable {
            Err(LlmError::ConnectionError("Mock failure".to_string()))
        } else {
            Ok(self.response.clone())
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn list_models(&self) -> LlmResult<Vec<String>> {
        if self.unreachable {
            Err(LlmError::ConnectionError("Mock runtime offline".to_string()))
        } else {
            Ok(self.models.clone())
        }
    }

    fn pull_model(&self) -> LlmResult<()> {
        self.pulls.set(self.pulls.get() + 1);
        if self.pull_fails {
            Err(LlmError::ModelError("Mock pull failure".to_string()))
        } else {
            Ok(())
        }
    }
}
