//! Prompt templates for narrative generation
//!
//! Each template carries `{placeholder}` markers that are filled from an
//! [`AnalysisRecord`] or from caller-supplied text.

use crate::analysis::AnalysisRecord;

/// Prompt template for a dataset description
pub const DESCRIPTION_PROMPT: &str = r#"Generate a professional description of this GIS dataset:

Dataset Information:
- Name: {filename}
- Format: {format}
- Features: {feature_count} {geometry_types}
- CRS: {crs}
- Attributes: {columns}

Statistics:
{geometry_stats}

Write a clear, professional description that a GIS analyst would find helpful.
Focus on the key characteristics and potential uses of the dataset.
Use natural, flowing language rather than just listing facts."#;

/// Prompt template for tag suggestions
pub const TAGS_PROMPT: &str = r#"Based on this GIS dataset description, suggest {count} relevant tags:

{description}

Format the tags as a comma-separated list, using lowercase and hyphens for spaces.
Example: urban-planning, demographics, transportation

Tags:"#;

/// Prompt template for explaining analysis results
pub const EXPLAIN_PROMPT: &str = r#"Explain these GIS analysis results in clear, natural language:

{results}

Focus on key insights and patterns. Use professional but accessible language."#;

/// Build the description prompt for an analysis record
pub fn description_prompt(record: &AnalysisRecord) -> String {
    let geometry_stats = serde_json::to_string_pretty(&record.geometry_stats)
        .unwrap_or_else(|_| "{}".to_string());

    DESCRIPTION_PROMPT
        .replace("{filename}", &record.source_name)
        .replace("{format}", &record.format_label)
        .replace("{feature_count}", &record.feature_count.to_string())
        .replace("{geometry_types}", &record.geometry_types_lowercase())
        .replace("{crs}", &record.crs_label)
        .replace("{columns}", &record.columns.join(", "))
        .replace("{geometry_stats}", &geometry_stats)
}

/// Build the tag suggestion prompt
pub fn tags_prompt(description: &str, count: usize) -> String {
    TAGS_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{description}", description)
}

/// Build the explanation prompt for a JSON results object
pub fn explain_prompt(results: &serde_json::Value) -> String {
    let results = serde_json::to_string_pretty(results).unwrap_or_else(|_| results.to_string());
    EXPLAIN_PROMPT.replace("{results}", &results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_dataset;
    use crate::gis::{CrsHandle, Dataset, Feature};
    use geo::{Geometry, Point};
    use serde_json::{Map, json};

    fn record() -> AnalysisRecord {
        let mut properties = Map::new();
        properties.insert("name".to_string(), json!("Boulder"));
        let dataset = Dataset {
            features: vec![Feature::new(
                Some(Geometry::Point(Point::new(-105.27, 40.01))),
                properties,
            )],
            crs: Some(CrsHandle::wgs84()),
        };
        analyze_dataset(&dataset, "towns.geojson", ".geojson")
    }

    #[test]
    fn test_description_prompt() {
        let prompt = description_prompt(&record());
        assert!(prompt.contains("- Name: towns.geojson"));
        assert!(prompt.contains("- Format: .geojson"));
        assert!(prompt.contains("- Features: 1 point"));
        assert!(prompt.contains("- CRS: EPSG:4326"));
        assert!(prompt.contains("- Attributes: name"));
        assert!(prompt.contains("\"area_unit\": \"square meters\""));
        assert!(!prompt.contains("{filename}"));
    }

    #[test]
    fn test_tags_prompt() {
        let prompt = tags_prompt("Road centerlines", 3);
        assert!(prompt.contains("suggest 3 relevant tags"));
        assert!(prompt.contains("Road centerlines"));
    }

    #[test]
    fn test_explain_prompt() {
        let prompt = explain_prompt(&json!({"feature_count": 12}));
        assert!(prompt.contains("\"feature_count\": 12"));
    }
}
