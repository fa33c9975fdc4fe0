//! Ollama API client
//!
//! This module provides a blocking HTTP client for the Ollama API, which hosts the
//! language models used for dataset descriptions, tags and explanations.
//!
//! # Example
//!
//! ```ignore
//! use walter::llm::{LlmClient, OllamaClient};
//!
//! let client = OllamaClient::new("http://localhost:11434", "phi")
//!     .with_timeout(60);
//!
//! let response = client.complete("Describe this dataset...")?;
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::client::LlmClient;
use super::error::{LlmError, LlmResult};

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// Base URL of the Ollama API
    base_url: String,
    /// Model name to use
    model: String,
    /// Request timeout in seconds
    timeout_seconds: u64,
    /// Maximum context tokens
    max_context_tokens: usize,
    /// Temperature for sampling
    temperature: f32,
    /// HTTP client
    client: reqwest::blocking::Client,
}

/// Request body for Ollama generate endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

/// Options for generation
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_ctx: usize,
}

/// Response from Ollama generate endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    total_duration: Option<u64>,
    #[serde(default)]
    prompt_eval_count: Option<usize>,
    #[serde(default)]
    eval_count: Option<usize>,
}

/// Request body for Ollama pull endpoint
#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    model: &'a str,
    stream: bool,
}

/// Response from Ollama pull endpoint
#[derive(Debug, Deserialize)]
struct PullResponse {
    #[serde(default)]
    status: String,
}

/// Response from Ollama tags endpoint (list models)
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

/// Model information from Ollama
#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Ollama API (e.g., "http://localhost:11434")
    /// * `model` - Model name to use (e.g., "phi", "llama2", "mistral")
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout_seconds: 120,
            max_context_tokens: 2048,
            temperature: 0.7,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the maximum context tokens
    pub fn with_max_context(mut self, tokens: usize) -> Self {
        self.max_context_tokens = tokens;
        self
    }

    /// Set the temperature for sampling
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the sampling temperature
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout_seconds)
        } else if e.is_connect() {
            LlmError::ConnectionError(format!(
                "Failed to connect to Ollama at {}: {}",
                self.base_url, e
            ))
        } else {
            LlmError::ConnectionError(e.to_string())
        }
    }
}

impl LlmClient for OllamaClient {
    fn complete(&self, prompt: &str) -> LlmResult<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: Some(GenerateOptions {
                temperature: self.temperature,
                num_ctx: self.max_context_tokens,
            }),
        };

        tracing::debug!("Sending request to Ollama: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(LlmError::RateLimited(60));
            }
            return Err(LlmError::ConnectionError(format!(
                "Ollama API error (HTTP {}): {}",
                status, error_text
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        if !gen_response.done {
            tracing::debug!("Ollama reported an unfinished generation");
        }

        if let Some(duration) = gen_response.total_duration {
            tracing::debug!(
                "Ollama completion took {} ms, {} prompt tokens, {} completion tokens",
                duration / 1_000_000,
                gen_response.prompt_eval_count.unwrap_or(0),
                gen_response.eval_count.unwrap_or(0)
            );
        }

        if gen_response.response.trim().is_empty() {
            return Err(LlmError::InvalidResponse(
                "Ollama returned an empty response".to_string(),
            ));
        }

        Ok(gen_response.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn list_models(&self) -> LlmResult<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(LlmError::ConnectionError(format!(
                "Failed to list models: HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn pull_model(&self) -> LlmResult<()> {
        let url = format!("{}/api/pull", self.base_url);

        tracing::info!("Model {} not found locally, pulling from Ollama", self.model);

        let response = self
            .client
            .post(&url)
            .json(&PullRequest {
                model: &self.model,
                stream: false,
            })
            // Pulls download whole model weights
            .timeout(Duration::from_secs(self.timeout_seconds.max(600)))
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            return Err(LlmError::ModelError(format!(
                "Failed to pull {} (HTTP {}): {}",
                self.model, status, error_text
            )));
        }

        let pull: PullResponse = response
            .json()
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        if pull.status != "success" {
            return Err(LlmError::ModelError(format!(
                "Pull of {} ended with status '{}'",
                self.model, pull.status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_client_new() {
        let client = OllamaClient::new("http://localhost:11434/", "phi");
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.model_name(), "phi");
        assert_eq!(client.max_context_tokens, 2048);
    }

    #[test]
    fn test_ollama_client_builder() {
        let client = OllamaClient::new("http://remote:11434", "mistral")
            .with_timeout(60)
            .with_max_context(8192)
            .with_temperature(0.5);

        assert_eq!(client.timeout_seconds, 60);
        assert_eq!(client.max_context_tokens, 8192);
        assert!((client.temperature() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_temperature_clamp() {
        let client = OllamaClient::new("http://localhost:11434", "phi").with_temperature(5.0);
        assert!((client.temperature() - 2.0).abs() < f32::EPSILON);

        let client = OllamaClient::new("http://localhost:11434", "phi").with_temperature(-1.0);
        assert!(client.temperature().abs() < f32::EPSILON);
    }

    #[test]
    fn test_generate_request_serialize() {
        let request = GenerateRequest {
            model: "phi",
            prompt: "Test prompt",
            stream: false,
            options: Some(GenerateOptions {
                temperature: 0.7,
                num_ctx: 2048,
            }),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"phi\""));
        assert!(json.contains("Test prompt"));
        assert!(json.contains("\"stream\":false"));
        assert!(json.contains("temperature"));
    }

    #[test]
    fn test_generate_response_deserialize() {
        let json = r#"{
            "response": "Generated text",
            "done": true,
            "total_duration": 1500000000,
            "prompt_eval_count": 50,
            "eval_count": 100
        }"#;

        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, "Generated text");
        assert!(response.done);
        assert_eq!(response.total_duration, Some(1500000000));
        assert_eq!(response.prompt_eval_count, Some(50));
        assert_eq!(response.eval_count, Some(100));
    }

    #[test]
    fn test_tags_response_deserialize() {
        let json = r#"{"models": [{"name": "phi:latest", "size": 1602463378}]}"#;
        let tags: TagsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tags.models[0].name, "phi:latest");
    }

    #[test]
    fn test_unreachable_runtime() {
        // Port 9 (discard) is not an Ollama server
        let client = OllamaClient::new("http://127.0.0.1:9", "phi").with_timeout(2);
        assert!(client.list_models().is_err());
    }
}
