//! Configuration types for the narrative backend
//!
//! This module provides the configuration that controls whether and how a language model
//! is used for descriptions, including mode selection, model parameters and the
//! environment variables the CLI honours.

use serde::{Deserialize, Serialize};

/// Default model name when `WALTER_MODEL` is unset
pub const DEFAULT_MODEL: &str = "phi";

/// Default Ollama address when `OLLAMA_HOST` is unset
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// LLM operation mode
///
/// - `None`: never contact a model runtime, always use template text
/// - `Online`: connect to an Ollama API server
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LlmMode {
    /// No model, template text only
    #[default]
    None,

    /// Online mode using Ollama API
    Online {
        /// Ollama API URL (default: http://localhost:11434)
        url: String,
        /// Model name (e.g., "phi", "llama2", "mistral")
        model: String,
    },
}

impl LlmMode {
    /// Create an online mode configuration with default Ollama URL
    pub fn online(model: impl Into<String>) -> Self {
        LlmMode::Online {
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: model.into(),
        }
    }

    /// Create an online mode configuration with custom URL
    pub fn online_with_url(url: impl Into<String>, model: impl Into<String>) -> Self {
        LlmMode::Online {
            url: url.into(),
            model: model.into(),
        }
    }

    /// Check if a model runtime should be contacted
    pub fn is_enabled(&self) -> bool {
        !matches!(self, LlmMode::None)
    }
}

/// Configuration for narrative generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM mode (none, online)
    #[serde(default)]
    pub mode: LlmMode,

    /// Temperature for LLM sampling
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Context window passed to the runtime as `num_ctx`
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: usize,

    /// Fail instead of falling back when the runtime cannot be reached
    #[serde(default)]
    pub require_llm: bool,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_max_context_tokens() -> usize {
    2048
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mode: LlmMode::None,
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
            max_context_tokens: default_max_context_tokens(),
            require_llm: false,
        }
    }
}

impl LlmConfig {
    /// Create a config using Ollama at the default address
    pub fn with_ollama(model: impl Into<String>) -> Self {
        Self {
            mode: LlmMode::online(model),
            ..Default::default()
        }
    }

    /// Build a config from `WALTER_MODEL`, `OLLAMA_HOST` and `WALTER_NO_LLM`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let disabled = lookup("WALTER_NO_LLM")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        if disabled {
            return Self::default();
        }

        let model = lookup("WALTER_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let url = lookup("OLLAMA_HOST")
            .filter(|u| !u.trim().is_empty())
            .map(|u| normalize_host(&u))
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

        Self {
            mode: LlmMode::online_with_url(url, model),
            ..Default::default()
        }
    }

    /// Set the model, keeping the current URL
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let url = match &self.mode {
            LlmMode::Online { url, .. } => url.clone(),
            LlmMode::None => DEFAULT_OLLAMA_URL.to_string(),
        };
        self.mode = LlmMode::online_with_url(url, model);
        self
    }

    /// Set the Ollama URL, keeping the current model
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let model = match &self.mode {
            LlmMode::Online { model, .. } => model.clone(),
            LlmMode::None => DEFAULT_MODEL.to_string(),
        };
        self.mode = LlmMode::online_with_url(normalize_host(&url.into()), model);
        self
    }

    /// Disable the model runtime entirely
    pub fn without_llm(mut self) -> Self {
        self.mode = LlmMode::None;
        self
    }

    /// Set temperature, clamped to 0.0-2.0
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp.clamp(0.0, 2.0);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Require the runtime to be reachable
    pub fn with_require_llm(mut self, require: bool) -> Self {
        self.require_llm = require;
        self
    }
}

/// `OLLAMA_HOST` is often given as a bare `host:port`
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
