//! LLM-backed narrative generation
//!
//! This module turns dataset analysis into prose, either through a local Ollama
//! runtime or, when none is reachable, through deterministic templates.
//!
//! # Example
//!
//! ```ignore
//! use walter::llm::{LlmConfig, NarrativeBackend, NarrativeGenerator};
//!
//! let config = LlmConfig::from_env().with_temperature(0.5);
//! let backend = NarrativeBackend::from_config(&config)?;
//! let generator = NarrativeGenerator::new(&backend);
//!
//! let record = walter::analysis::analyze("parcels.geojson".as_ref())?;
//! println!("{}", generator.generate_description(&record));
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod narrative;
pub mod ollama;
pub mod prompt;

// Re-export main types
pub use backend::NarrativeBackend;
pub use client::{LlmClient, model_listed};
pub use config::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL, LlmConfig, LlmMode};
pub use error::{LlmError, LlmResult};
pub use narrative::{FALLBACK_TAGS, NarrativeGenerator, clean_tags};
pub use ollama::OllamaClient;

#[cfg(test)]
pub use client::MockLlmClient;
