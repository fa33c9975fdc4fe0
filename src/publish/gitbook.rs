//! GitBook publishing
//!
//! [`GitBookApi`] is the HTTP client; [`GitBookPublisher`] resolves the destination
//! space, publishes single pages and syncs whole directories of markdown, regenerating
//! `SUMMARY.md` afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::config::PublisherConfig;
use super::error::{PublishError, PublishResult};
use super::{PublishedPage, title_from_path};

/// Name of the generated index file, never published itself
pub const SUMMARY_FILE: &str = "SUMMARY.md";

/// Page operations of a GitBook-compatible content API
pub trait ContentApi {
    /// Create a page, returning the API's JSON response
    fn create_page(&self, space_id: &str, title: &str, content: &str) -> PublishResult<Value>;

    /// Replace the content of an existing page
    fn update_page(&self, space_id: &str, page_id: &str, content: &str) -> PublishResult<Value>;
}

/// Blocking GitBook API client
#[derive(Debug, Clone)]
pub struct GitBookApi {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl GitBookApi {
    /// Create a client for `base_url` authenticating with `token`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> PublishResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PublishError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        })
    }

    /// Create a client with the token from `GITBOOK_TOKEN`
    pub fn from_env(config: &PublisherConfig) -> PublishResult<Self> {
        let token = std::env::var("GITBOOK_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                PublishError::MissingCredentials(
                    "GitBook API token not found. Set GITBOOK_TOKEN environment variable."
                        .to_string(),
                )
            })?;
        Self::new(config.api_url(), token)
    }

    fn page_url(&self, space_id: &str, page_id: Option<&str>) -> String {
        let mut url = format!(
            "{}/spaces/{}/content",
            self.base_url,
            urlencoding::encode(space_id)
        );
        if let Some(page_id) = page_id {
            url.push('/');
            url.push_str(&urlencoding::encode(page_id));
        }
        url
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> PublishResult<Value> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| PublishError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))
    }
}

impl ContentApi for GitBookApi {
    fn create_page(&self, space_id: &str, title: &str, content: &str) -> PublishResult<Value> {
        let url = self.page_url(space_id, None);
        tracing::debug!("POST {}", url);
        self.send(
            self.client
                .post(&url)
                .json(&json!({"title": title, "content": content})),
        )
    }

    fn update_page(&self, space_id: &str, page_id: &str, content: &str) -> PublishResult<Value> {
        let url = self.page_url(space_id, Some(page_id));
        tracing::debug!("PATCH {}", url);
        self.send(self.client.patch(&url).json(&json!({"content": content})))
    }
}

/// A file that could not be published during a sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of syncing a directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub published: Vec<PublishedPage>,
    pub failures: Vec<SyncFailure>,
    /// Where the regenerated index was written
    pub summary_path: Option<PathBuf>,
}

impl SyncReport {
    fn add_failure(&mut self, path: PathBuf, error: impl std::fmt::Display) {
        tracing::warn!("Failed to publish {}: {}", path.display(), error);
        self.failures.push(SyncFailure {
            path,
            error: error.to_string(),
        });
    }

    /// Whether every file was published
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Publishes content to a GitBook space
pub struct GitBookPublisher<A = GitBookApi> {
    api: A,
    config: PublisherConfig,
}

impl<A: ContentApi> GitBookPublisher<A> {
    pub fn new(api: A, config: PublisherConfig) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Publish one page, updating `page_id` when given and creating a page otherwise
    pub fn publish_content(
        &self,
        content: &str,
        title: &str,
        space_id: Option<&str>,
        page_id: Option<&str>,
    ) -> PublishResult<PublishedPage> {
        let space_id = self.config.resolve_space(space_id)?;
        self.publish_to_space(&space_id, content, title, page_id)
    }

    fn publish_to_space(
        &self,
        space_id: &str,
        content: &str,
        title: &str,
        page_id: Option<&str>,
    ) -> PublishResult<PublishedPage> {
        let response = match page_id {
            Some(page_id) => self.api.update_page(space_id, page_id, content)?,
            None => self.api.create_page(space_id, title, content)?,
        };

        let id = match response.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => match page_id {
                Some(page_id) => page_id.to_string(),
                None => {
                    return Err(PublishError::InvalidResponse(format!(
                        "no page id in response for '{}'",
                        title
                    )));
                }
            },
        };

        tracing::info!("Published '{}' to space {} as {}", title, space_id, id);

        Ok(PublishedPage {
            id,
            title: title.to_string(),
            path: None,
            published_at: Utc::now(),
        })
    }

    /// Publish every markdown file under `source_dir` and rewrite its `SUMMARY.md`
    ///
    /// Files are published in sorted path order. A failing file is recorded in the
    /// report and the sync moves on; the index lists only the pages that succeeded.
    pub fn sync_directory(
        &self,
        source_dir: &Path,
        space_id: Option<&str>,
    ) -> PublishResult<SyncReport> {
        let space_id = self.config.resolve_space(space_id)?;
        if !source_dir.is_dir() {
            return Err(PublishError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a directory", source_dir.display()),
            )));
        }

        let mut report = SyncReport::default();

        for path in discover_markdown(source_dir)? {
            let relative = path
                .strip_prefix(source_dir)
                .unwrap_or(path.as_path())
                .to_string_lossy()
                .replace('\\', "/");

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    report.add_failure(path, e);
                    continue;
                }
            };

            let title = title_from_path(&path);
            match self.publish_to_space(&space_id, &content, &title, None) {
                Ok(mut page) => {
                    page.path = Some(relative);
                    report.published.push(page);
                }
                Err(e) => report.add_failure(path, e),
            }
        }

        let summary_path = source_dir.join(SUMMARY_FILE);
        fs::write(&summary_path, create_summary(&report.published))?;
        report.summary_path = Some(summary_path);

        tracing::info!(
            "Synced {} page(s) from {}, {} failure(s)",
            report.published.len(),
            source_dir.display(),
            report.failures.len()
        );

        Ok(report)
    }
}

/// Build `SUMMARY.md` content linking each published page
pub fn create_summary(pages: &[PublishedPage]) -> String {
    let mut summary = String::from("# Summary\n\n");
    for page in pages {
        let path = page.path.as_deref().unwrap_or_default();
        summary.push_str(&format!("* [{}]({})\n", page.title, path));
    }
    summary
}

/// Markdown files below `dir`, excluding the index, in sorted order
fn discover_markdown(dir: &Path) -> PublishResult<Vec<PathBuf>> {
    let pattern = format!(
        "{}/**/*.md",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let entries =
        glob::glob(&pattern).map_err(|e| PublishError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                let is_summary = path.file_name().is_some_and(|name| name == SUMMARY_FILE);
                if path.is_file() && !is_summary {
                    files.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("Error accessing path: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}
