//! Narrative backend capability
//!
//! A [`NarrativeBackend`] is built once, by probing the model runtime, and then shared
//! by reference. A failed probe leaves it permanently disabled; it is never re-probed.

use super::client::{LlmClient, model_listed};
use super::config::{LlmConfig, LlmMode};
use super::error::{LlmError, LlmResult};
use super::ollama::OllamaClient;

/// Model runtime handle, or the lack of one
pub struct NarrativeBackend<C = OllamaClient> {
    client: Option<C>,
}

impl<C: LlmClient> NarrativeBackend<C> {
    /// A backend that always uses template text
    pub fn disabled() -> Self {
        Self { client: None }
    }

    /// Probe the runtime behind `client`
    ///
    /// The configured model is pulled when the runtime does not list it. Any failure
    /// disables the backend with a warning. With `require` set, an unreachable runtime
    /// is returned as [`LlmError::BackendUnavailable`]; a failed pull is not.
    pub fn probe(client: C, require: bool) -> LlmResult<Self> {
        let models = match client.list_models() {
            Ok(models) => models,
            Err(e) => {
                if require && e.is_unreachable() {
                    return Err(LlmError::BackendUnavailable(e.to_string()));
                }
                tracing::warn!("LLM runtime not available, using template text: {}", e);
                return Ok(Self::disabled());
            }
        };

        if !model_listed(&models, client.model_name()) {
            if let Err(e) = client.pull_model() {
                tracing::warn!(
                    "Failed to pull model {}, using template text: {}",
                    client.model_name(),
                    e
                );
                return Ok(Self::disabled());
            }
        }

        tracing::debug!("LLM backend ready with model {}", client.model_name());
        Ok(Self {
            client: Some(client),
        })
    }

    /// Whether a model can be used
    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// The underlying client, when available
    pub fn client(&self) -> Option<&C> {
        self.client.as_ref()
    }

    /// Run a completion, returning the trimmed response
    pub fn complete(&self, prompt: &str) -> LlmResult<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| LlmError::BackendUnavailable("backend disabled".to_string()))?;

        tracing::debug!("Prompting {} ({} chars)", client.model_name(), prompt.len());
        let response = client.complete(prompt)?;
        Ok(response.trim().to_string())
    }
}

impl NarrativeBackend<OllamaClient> {
    /// Build a backend from configuration, probing Ollama when enabled
    pub fn from_config(config: &LlmConfig) -> LlmResult<Self> {
        match &config.mode {
            LlmMode::None => Ok(Self::disabled()),
            LlmMode::Online { url, model } => {
                let client = OllamaClient::new(url.as_str(), model.as_str())
                    .with_timeout(config.timeout_seconds)
                    .with_max_context(config.max_context_tokens)
                    .with_temperature(config.temperature);
                Self::probe(client, config.require_llm)
            }
        }
    }
}

impl<C: LlmClient> std::fmt::Debug for NarrativeBackend<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeBackend")
            .field("model", &self.client.as_ref().map(|c| c.model_name()))
            .finish()
    }
}
