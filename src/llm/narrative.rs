//! Narrative generation with template fallback
//!
//! Every method tries the model first when the backend is available and falls back
//! to deterministic template text on any failure. Failures are logged, never returned.

use serde_json::Value;

use super::backend::NarrativeBackend;
use super::client::LlmClient;
use super::ollama::OllamaClient;
use super::prompt;
use crate::analysis::AnalysisRecord;

/// Tags used when no model is available
pub const FALLBACK_TAGS: [&str; 5] = ["gis", "spatial-data", "geospatial", "vector-data", "analysis"];

/// Turns analysis output into prose
pub struct NarrativeGenerator<'a, C = OllamaClient> {
    backend: &'a NarrativeBackend<C>,
}

impl<'a, C: LlmClient> NarrativeGenerator<'a, C> {
    pub fn new(backend: &'a NarrativeBackend<C>) -> Self {
        Self { backend }
    }

    /// Whether model output will be attempted
    pub fn uses_model(&self) -> bool {
        self.backend.is_available()
    }

    /// Describe a dataset in a few sentences
    pub fn generate_description(&self, record: &AnalysisRecord) -> String {
        if !self.backend.is_available() {
            return fallback_description(record);
        }

        match self.backend.complete(&prompt::description_prompt(record)) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                tracing::warn!("LLM returned an empty description, using template text");
                fallback_description(record)
            }
            Err(e) => {
                tracing::warn!("LLM generation failed: {}", e);
                fallback_description(record)
            }
        }
    }

    /// Suggest up to `count` tags for a description
    pub fn suggest_tags(&self, description: &str, count: usize) -> Vec<String> {
        if !self.backend.is_available() {
            return fallback_tags();
        }

        match self.backend.complete(&prompt::tags_prompt(description, count)) {
            Ok(text) => {
                let tags = clean_tags(&text, count);
                if tags.is_empty() {
                    tracing::warn!("LLM returned no usable tags, using defaults");
                    fallback_tags()
                } else {
                    tags
                }
            }
            Err(e) => {
                tracing::warn!("Tag generation failed: {}", e);
                fallback_tags()
            }
        }
    }

    /// Explain a JSON object of analysis results
    pub fn explain_analysis(&self, results: &Value) -> String {
        if !self.backend.is_available() {
            return fallback_explanation(results);
        }

        match self.backend.complete(&prompt::explain_prompt(results)) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => fallback_explanation(results),
            Err(e) => {
                tracing::warn!("Analysis explanation failed: {}", e);
                fallback_explanation(results)
            }
        }
    }
}

/// Normalize a comma-separated tag list
///
/// Tags are trimmed and lower-cased, each inner space becomes a hyphen, and empties
/// and repeats are dropped before truncating to `count`.
pub fn clean_tags(raw: &str, count: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',') {
        let tag = tag.trim().to_lowercase().replace(' ', "-");
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags.truncate(count);
    tags
}

fn fallback_description(record: &AnalysisRecord) -> String {
    format!(
        "Dataset contains {} features of type {}. Available attributes: {}.",
        record.feature_count,
        record.geometry_types_lowercase(),
        record.columns.join(", ")
    )
}

fn fallback_tags() -> Vec<String> {
    FALLBACK_TAGS.iter().map(|t| t.to_string()).collect()
}

fn fallback_explanation(results: &Value) -> String {
    let feature_count = match results.get("feature_count") {
        Some(Value::String(s)) => s.clone(),
        Some(value) if !value.is_null() => value.to_string(),
        _ => "Unknown".to_string(),
    };
    let geometry_types = results
        .get("geometry_types")
        .map(join_values)
        .unwrap_or_else(|| "Unknown".to_string());
    let attributes = results
        .get("attributes")
        .map(join_values)
        .unwrap_or_default();

    format!(
        "Analysis Results Summary:\n- Feature Count: {}\n- Geometry Types: {}\n- Available Attributes: {}",
        feature_count, geometry_types, attributes
    )
}

fn join_values(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_dataset;
    use crate::gis::{CrsHandle, Dataset, Feature};
    use crate::llm::client::MockLlmClient;
    use geo::{Geometry, Point};
    use serde_json::{Map, json};

    fn cities() -> AnalysisRecord {
        let rows = [
            ("San Francisco", 874961, "CA", -122.42, 37.77),
            ("Los Angeles", 3898747, "CA", -118.24, 34.05),
            ("New York", 8804190, "NY", -74.01, 40.71),
        ];
        let features = rows
            .iter()
            .map(|(name, population, state, x, y)| {
                let mut properties = Map::new();
                properties.insert("name".to_string(), json!(name));
                properties.insert("population".to_string(), json!(population));
                properties.insert("state".to_string(), json!(state));
                Feature::new(Some(Geometry::Point(Point::new(*x, *y))), properties)
            })
            .collect();
        let dataset = Dataset {
            features,
            crs: Some(CrsHandle::wgs84()),
        };
        analyze_dataset(&dataset, "cities.geojson", ".geojson")
    }

    #[test]
    fn test_disabled_backend_fallbacks() {
        let backend: NarrativeBackend<MockLlmClient> = NarrativeBackend::disabled();
        let generator = NarrativeGenerator::new(&backend);
        assert!(!generator.uses_model());

        assert_eq!(
            generator.generate_description(&cities()),
            "Dataset contains 3 features of type point. Available attributes: name, population, state."
        );
        assert_eq!(
            generator.suggest_tags("anything", 3),
            vec!["gis", "spatial-data", "geospatial", "vector-data", "analysis"]
        );
    }

    #[test]
    fn test_model_description() {
        let backend =
            NarrativeBackend::probe(MockLlmClient::new("  A dataset of cities.\n"), false).unwrap();
        let generator = NarrativeGenerator::new(&backend);

        assert_eq!(generator.generate_description(&cities()), "A dataset of cities.");
        assert_eq!(backend.client().unwrap().calls(), 1);
    }

    #[test]
    fn test_failed_completion_falls_back() {
        let backend = NarrativeBackend::probe(MockLlmClient::failing(), false).unwrap();
        assert!(backend.is_available());
        let generator = NarrativeGenerator::new(&backend);

        assert!(generator
            .generate_description(&cities())
            .starts_with("Dataset contains 3 features"));
        assert_eq!(generator.suggest_tags("d", 5).len(), 5);
        assert!(generator
            .explain_analysis(&json!({}))
            .starts_with("Analysis Results Summary:"));
    }

    #[test]
    fn test_model_tags_cleaned() {
        let backend = NarrativeBackend::probe(
            MockLlmClient::new("Urban Planning, census ,urban planning,, Public Health, roads"),
            false,
        )
        .unwrap();
        let generator = NarrativeGenerator::new(&backend);

        assert_eq!(
            generator.suggest_tags("d", 3),
            vec!["urban-planning", "census", "public-health"]
        );
    }

    #[test]
    fn test_clean_tags() {
        assert_eq!(clean_tags(" A b ,c", 5), vec!["a-b", "c"]);
        assert_eq!(
            clean_tags("urban  planning, Urban Planning", 5),
            vec!["urban--planning", "urban-planning"]
        );
        assert!(clean_tags(" , ,", 5).is_empty());
        assert!(clean_tags("a, b", 0).is_empty());
    }

    #[test]
    fn test_fallback_explanation() {
        let text = fallback_explanation(&cities().analysis_results());
        assert_eq!(
            text,
            "Analysis Results Summary:\n- Feature Count: 3\n- Geometry Types: Point\n- Available Attributes: name, population, state"
        );

        let text = fallback_explanation(&json!({}));
        assert_eq!(
            text,
            "Analysis Results Summary:\n- Feature Count: Unknown\n- Geometry Types: Unknown\n- Available Attributes: "
        );
    }
}
