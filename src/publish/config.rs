//! Publisher configuration
//!
//! Loaded from `~/.walter/gitbook.yml`:
//!
//! ```yaml
//! default_space: abc123
//! base_url: https://api.gitbook.com/v1
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{PublishError, PublishResult};

/// GitBook API root used when the config does not name one
pub const DEFAULT_GITBOOK_URL: &str = "https://api.gitbook.com/v1";

/// Settings for the GitBook publisher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Space that pages are published to unless overridden
    #[serde(default)]
    pub default_space: Option<String>,
    /// Override of the GitBook API root
    #[serde(default)]
    pub base_url: Option<String>,
}

impl PublisherConfig {
    /// Default config location, `~/.walter/gitbook.yml`
    pub fn default_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".walter").join("gitbook.yml"))
    }

    /// Load a config file
    pub fn load(path: &Path) -> PublishResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|reason| PublishError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Load `path`, or the default location, treating a missing file as empty config
    pub fn load_or_default(path: Option<&Path>) -> PublishResult<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            tracing::debug!("No publisher config at {}", path.display());
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Parse YAML config text; an empty document is an empty config
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Pick the destination space: explicit override first, then `default_space`
    pub fn resolve_space(&self, space_override: Option<&str>) -> PublishResult<String> {
        space_override
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.default_space
                    .clone()
                    .filter(|s| !s.trim().is_empty())
            })
            .ok_or_else(|| {
                PublishError::ConfigMissing(
                    "pass --space or set default_space in ~/.walter/gitbook.yml".to_string(),
                )
            })
    }

    /// API root to use
    pub fn api_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_GITBOOK_URL)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
