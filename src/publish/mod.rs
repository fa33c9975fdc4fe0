//! Publishing adapters
//!
//! Pushes rendered documentation to GitBook and uploads datasets to ArcGIS Online.

pub mod agol;
pub mod config;
pub mod error;
pub mod gitbook;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::render::title_case;

pub use agol::{AgolClient, AgolCredentials, ItemMetadata, UploadedItem, content_type_for};
pub use config::{DEFAULT_GITBOOK_URL, PublisherConfig};
pub use error::{PublishError, PublishResult};
pub use gitbook::{ContentApi, GitBookApi, GitBookPublisher, SyncFailure, SyncReport, create_summary};

/// A page accepted by GitBook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPage {
    pub id: String,
    pub title: String,
    /// Source file relative to the synced directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// Page title derived from a file name: `road-network_2024.md` becomes `Road Network 2024`
pub fn title_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace(['-', '_'], " "))
}
