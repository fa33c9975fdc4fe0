//! Multi-format rendering of narrative sections
//!
//! Provides renderers for:
//! - Markdown
//! - HTML fragments
//! - Plain text
//!
//! Unknown format names render plain text; [`Rendered::fell_back`] reports when that
//! happened.

pub mod html;
pub mod markdown;
pub mod text;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use text::TextRenderer;

/// Ordered named text sections
///
/// Insertion order is render order. Inserting an existing key replaces its text in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSections {
    entries: Vec<(String, String)>,
}

impl NarrativeSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a section
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((key, text)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, text)| text.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output format for rendered sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Html,
    Text,
}

impl OutputFormat {
    /// Parse a format name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "html" => Some(OutputFormat::Html),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        }
    }

    /// Resolve a format name, falling back to plain text
    pub fn resolve(name: &str) -> (Self, bool) {
        match Self::parse(name) {
            Some(format) => (format, false),
            None => (OutputFormat::Text, true),
        }
    }

    fn renderer(self) -> &'static dyn SectionRenderer {
        match self {
            OutputFormat::Markdown => &MarkdownRenderer,
            OutputFormat::Html => &HtmlRenderer,
            OutputFormat::Text => &TextRenderer,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Renders sections into one output string
pub trait SectionRenderer {
    fn render(&self, sections: &NarrativeSections) -> String;
}

/// Result of rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The renderer actually used
    pub format: OutputFormat,
    /// The format name that was asked for
    pub requested: String,
    pub content: String,
}

impl Rendered {
    /// Whether the requested format was unknown and plain text was used instead
    pub fn fell_back(&self) -> bool {
        OutputFormat::parse(&self.requested).is_none()
    }
}

/// Render sections in the named format
pub fn render(sections: &NarrativeSections, format: &str) -> Rendered {
    let (resolved, fell_back) = OutputFormat::resolve(format);
    if fell_back {
        tracing::warn!("Unknown output format '{}', rendering plain text", format);
    }

    Rendered {
        format: resolved,
        requested: format.to_string(),
        content: resolved.renderer().render(sections),
    }
}

/// Title-case a section key: the first letter of every alphabetic run is upper-cased,
/// the rest lower-cased
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> NarrativeSections {
        NarrativeSections::new()
            .with("overview", "Three cities.")
            .with("spatial", "The data uses the EPSG:4326 coordinate system.")
    }

    #[test]
    fn test_sections_preserve_order() {
        let mut s = sections();
        s.insert("attributes", "name");
        s.insert("overview", "Replaced.");
        assert_eq!(
            s.keys().collect::<Vec<_>>(),
            vec!["overview", "spatial", "attributes"]
        );
        assert_eq!(s.get("overview"), Some("Replaced."));
    }

    #[test]
    fn test_format_resolution() {
        assert_eq!(OutputFormat::resolve("MARKDOWN"), (OutputFormat::Markdown, false));
        assert_eq!(OutputFormat::resolve("md"), (OutputFormat::Markdown, false));
        assert_eq!(OutputFormat::resolve("Html"), (OutputFormat::Html, false));
        assert_eq!(OutputFormat::resolve("txt"), (OutputFormat::Text, false));
        assert_eq!(OutputFormat::resolve("xml"), (OutputFormat::Text, true));
    }

    #[test]
    fn test_render_fallback() {
        let rendered = render(&sections(), "xml");
        assert_eq!(rendered.format, OutputFormat::Text);
        assert!(rendered.fell_back());
        assert!(rendered.content.starts_with("OVERVIEW\n========\n"));

        let rendered = render(&sections(), "markdown");
        assert!(!rendered.fell_back());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("overview"), "Overview");
        assert_eq!(title_case("bounding_box"), "Bounding_Box");
        assert_eq!(title_case("road network 2nd"), "Road Network 2Nd");
    }
}
