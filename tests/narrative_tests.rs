//! Narrative generation tests

use std::cell::Cell;

use geo::{Geometry, Point};
use serde_json::{Map, json};
use walter::analysis::{AnalysisRecord, analyze_dataset};
use walter::gis::{CrsHandle, Dataset, Feature};
use walter::llm::{LlmClient, LlmError, LlmResult, NarrativeBackend, NarrativeGenerator};

/// Scripted runtime for exercising the backend without a network
struct ScriptedClient {
    reply: Option<String>,
    reachable: bool,
    local_models: Vec<String>,
    completions: Cell<usize>,
}

impl ScriptedClient {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            reachable: true,
            local_models: vec!["phi:latest".to_string()],
            completions: Cell::new(0),
        }
    }

    fn offline() -> Self {
        Self {
            reply: None,
            reachable: false,
            local_models: Vec::new(),
            completions: Cell::new(0),
        }
    }
}

impl LlmClient for ScriptedClient {
    fn complete(&self, _prompt: &str) -> LlmResult<String> {
        self.completions.set(self.completions.get() + 1);
        self.reply
            .clone()
            .ok_or_else(|| LlmError::Timeout(120))
    }

    fn model_name(&self) -> &str {
        "phi"
    }

    fn list_models(&self) -> LlmResult<Vec<String>> {
        if self.reachable {
            Ok(self.local_models.clone())
        } else {
            Err(LlmError::ConnectionError("connection refused".to_string()))
        }
    }

    fn pull_model(&self) -> LlmResult<()> {
        Ok(())
    }
}

fn cities() -> AnalysisRecord {
    let rows = [
        ("San Francisco", 874961, "CA", -122.4194, 37.7749),
        ("Los Angeles", 3898747, "CA", -118.2437, 34.0522),
        ("New York", 8804190, "NY", -74.0060, 40.7128),
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
    analyze_dataset(
        &Dataset {
            features,
            crs: Some(CrsHandle::wgs84()),
        },
        "cities.geojson",
        ".geojson",
    )
}

mod fallback_tests {
    use super::*;

    #[test]
    fn test_disabled_backend_description() {
        let backend: NarrativeBackend = NarrativeBackend::disabled();
        let generator = NarrativeGenerator::new(&backend);

        assert_eq!(
            generator.generate_description(&cities()),
            "Dataset contains 3 features of type point. Available attributes: name, population, state."
        );
    }

    #[test]
    fn test_disabled_backend_tags() {
        let backend: NarrativeBackend = NarrativeBackend::disabled();
        let generator = NarrativeGenerator::new(&backend);

        assert_eq!(
            generator.suggest_tags("City points", 2),
            vec!["gis", "spatial-data", "geospatial", "vector-data", "analysis"]
        );
    }

    #[test]
    fn test_disabled_backend_explanation() {
        let backend: NarrativeBackend = NarrativeBackend::disabled();
        let generator = NarrativeGenerator::new(&backend);

        assert_eq!(
            generator.explain_analysis(&cities().analysis_results()),
            "Analysis Results Summary:\n- Feature Count: 3\n- Geometry Types: Point\n- Available Attributes: name, population, state"
        );
    }

    #[test]
    fn test_offline_runtime_never_completes() {
        let backend = NarrativeBackend::probe(ScriptedClient::offline(), false).unwrap();
        assert!(!backend.is_available());

        let generator = NarrativeGenerator::new(&backend);
        assert!(generator
            .generate_description(&cities())
            .starts_with("Dataset contains 3 features"));
        assert!(backend.client().is_none());
    }

    #[test]
    fn test_required_runtime_unreachable() {
        let err = NarrativeBackend::probe(ScriptedClient::offline(), true).unwrap_err();
        assert!(matches!(err, LlmError::BackendUnavailable(_)));
    }
}

mod model_tests {
    use super::*;

    #[test]
    fn test_model_description_trimmed() {
        let backend = NarrativeBackend::probe(
            ScriptedClient::replying("\n  Point locations of three major US cities.  \n"),
            false,
        )
        .unwrap();
        let generator = NarrativeGenerator::new(&backend);

        assert_eq!(
            generator.generate_description(&cities()),
            "Point locations of three major US cities."
        );
        assert_eq!(backend.client().unwrap().completions.get(), 1);
    }

    #[test]
    fn test_model_tags_deduplicated_then_truncated() {
        let backend = NarrativeBackend::probe(
            ScriptedClient::replying("Cities, cities, Urban Areas, population, census"),
            false,
        )
        .unwrap();
        let generator = NarrativeGenerator::new(&backend);

        assert_eq!(
            generator.suggest_tags("d", 3),
            vec!["cities", "urban-areas", "population"]
        );
    }
}
