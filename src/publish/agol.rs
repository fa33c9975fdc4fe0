//! ArcGIS Online uploads
//!
//! Uses the portal's sharing REST API: `generateToken` to authenticate, then
//! `addItem` to upload a file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{PublishError, PublishResult};

/// Portal used when `AGOL_PORTAL` is unset
pub const DEFAULT_PORTAL: &str = "https://www.arcgis.com";

/// Tags appended to every upload
pub const DEFAULT_TAGS: [&str; 2] = ["walter", "automated-upload"];

/// Token lifetime requested from the portal, in minutes
const TOKEN_EXPIRATION_MINUTES: u32 = 60;

/// ArcGIS Online sign-in details
#[derive(Debug, Clone)]
pub struct AgolCredentials {
    pub username: String,
    pub password: String,
    pub portal: String,
}

impl AgolCredentials {
    /// Read `AGOL_USERNAME`, `AGOL_PASSWORD` and optionally `AGOL_PORTAL`
    pub fn from_env() -> PublishResult<Self> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        match (var("AGOL_USERNAME"), var("AGOL_PASSWORD")) {
            (Some(username), Some(password)) => Ok(Self {
                username,
                password,
                portal: var("AGOL_PORTAL").unwrap_or_else(|| DEFAULT_PORTAL.to_string()),
            }),
            _ => Err(PublishError::MissingCredentials(
                "ArcGIS Online credentials not found. Set AGOL_USERNAME and AGOL_PASSWORD environment variables."
                    .to_string(),
            )),
        }
    }
}

/// Item fields sent with an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl ItemMetadata {
    /// Metadata for uploading `path`
    ///
    /// The title defaults to the file stem and the description to
    /// `Uploaded by Walter: {title}`. [`DEFAULT_TAGS`] are always appended.
    pub fn for_file(
        path: &Path,
        title: Option<&str>,
        tags: &[String],
        description: Option<&str>,
    ) -> Self {
        let title = title
            .map(str::to_string)
            .unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });

        let mut all_tags = tags.to_vec();
        all_tags.extend(DEFAULT_TAGS.iter().map(|t| t.to_string()));

        let description = description
            .map(str::to_string)
            .unwrap_or_else(|| format!("Uploaded by Walter: {}", title));

        Self {
            item_type: content_type_for(path).to_string(),
            title,
            tags: all_tags,
            description,
        }
    }
}

/// Portal content type for a file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "shp" | "zip" => "Shapefile",
        "geojson" => "GeoJson",
        "csv" => "CSV",
        "gpkg" => "GeoPackage",
        _ => "File",
    }
}

/// An item created or updated in the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedItem {
    pub id: String,
    pub title: String,
    /// Item page in the portal
    pub url: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Authenticated ArcGIS Online session
pub struct AgolClient {
    portal: String,
    username: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl AgolClient {
    /// Sign in and obtain a token
    pub fn connect(credentials: &AgolCredentials) -> PublishResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| PublishError::Http(format!("Failed to create HTTP client: {}", e)))?;

        let portal = credentials.portal.trim_end_matches('/').to_string();
        let url = format!("{}/sharing/rest/generateToken", portal);
        let expiration = TOKEN_EXPIRATION_MINUTES.to_string();

        tracing::debug!("Requesting ArcGIS Online token from {}", url);

        let response = client
            .post(&url)
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
                ("referer", portal.as_str()),
                ("client", "referer"),
                ("expiration", expiration.as_str()),
                ("f", "json"),
            ])
            .send()?;

        let body = portal_json(response)?;
        let token: TokenResponse = serde_json::from_value(body)
            .map_err(|e| PublishError::InvalidResponse(format!("token response: {}", e)))?;

        Ok(Self {
            portal,
            username: credentials.username.clone(),
            token: token.token,
            client,
        })
    }

    fn user_content_url(&self) -> String {
        format!(
            "{}/sharing/rest/content/users/{}",
            self.portal,
            urlencoding::encode(&self.username)
        )
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/home/item.html?id={}", self.portal, id)
    }

    /// Upload a file as a new item
    pub fn upload_data(&self, path: &Path, metadata: &ItemMetadata) -> PublishResult<UploadedItem> {
        if !path.is_file() {
            return Err(PublishError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }

        let form = reqwest::blocking::multipart::Form::new()
            .text("f", "json")
            .text("token", self.token.clone())
            .text("title", metadata.title.clone())
            .text("type", metadata.item_type.clone())
            .text("tags", metadata.tags.join(","))
            .text("description", metadata.description.clone())
            .file("file", path)?;

        let url = format!("{}/addItem", self.user_content_url());
        tracing::info!("Uploading {} to ArcGIS Online as {}", path.display(), metadata.item_type);

        let response = self.client.post(&url).multipart(form).send()?;
        let body = portal_json(response)?;
        let id = item_id(&body)?;

        Ok(UploadedItem {
            url: self.item_url(&id),
            id,
            title: metadata.title.clone(),
            item_type: metadata.item_type.clone(),
        })
    }
}

/// Decode a portal response, surfacing `{"error": ...}` bodies sent with HTTP 200
fn portal_json(response: reqwest::blocking::Response) -> PublishResult<Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Api {
            status: status.as_u16(),
            message: response.text().unwrap_or_default(),
        });
    }

    let body: Value = response
        .json()
        .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;
    check_portal_error(body)
}

fn check_portal_error(body: Value) -> PublishResult<Value> {
    if let Some(error) = body.get("error") {
        let status = error
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(400);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown portal error")
            .to_string();
        return Err(PublishError::Api { status, message });
    }
    Ok(body)
}

fn item_id(body: &Value) -> PublishResult<String> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(PublishError::InvalidResponse(
            "portal reported an unsuccessful upload".to_string(),
        ));
    }
    body.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PublishError::InvalidResponse("no item id in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("roads.shp")), "Shapefile");
        assert_eq!(content_type_for(Path::new("roads.ZIP")), "Shapefile");
        assert_eq!(content_type_for(Path::new("parks.geojson")), "GeoJson");
        assert_eq!(content_type_for(Path::new("sites.csv")), "CSV");
        assert_eq!(content_type_for(Path::new("base.gpkg")), "GeoPackage");
        assert_eq!(content_type_for(Path::new("notes.txt")), "File");
        assert_eq!(content_type_for(Path::new("README")), "File");
    }

    #[test]
    fn test_item_metadata_defaults() {
        let metadata = ItemMetadata::for_file(Path::new("data/parks.geojson"), None, &[], None);
        assert_eq!(metadata.title, "parks");
        assert_eq!(metadata.item_type, "GeoJson");
        assert_eq!(metadata.tags, vec!["walter", "automated-upload"]);
        assert_eq!(metadata.description, "Uploaded by Walter: parks");
    }

    #[test]
    fn test_item_metadata_explicit() {
        let metadata = ItemMetadata::for_file(
            Path::new("roads.zip"),
            Some("Road Network"),
            &["transport".to_string()],
            Some("County roads"),
        );
        assert_eq!(metadata.title, "Road Network");
        assert_eq!(metadata.tags, vec!["transport", "walter", "automated-upload"]);
        assert_eq!(metadata.description, "County roads");
    }

    #[test]
    fn test_portal_error_body() {
        let err = check_portal_error(json!({"error": {"code": 498, "message": "Invalid token"}}))
            .unwrap_err();
        match err {
            PublishError::Api { status, message } => {
                assert_eq!(status, 498);
                assert_eq!(message, "Invalid token");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(check_portal_error(json!({"token": "abc"})).is_ok());
    }

    #[test]
    fn test_item_id() {
        assert_eq!(item_id(&json!({"success": true, "id": "a1"})).unwrap(), "a1");
        assert!(item_id(&json!({"success": false})).is_err());
        assert!(item_id(&json!({})).is_err());
    }
}
