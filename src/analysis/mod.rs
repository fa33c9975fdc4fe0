//! Dataset analysis
//!
//! Combines geometry inspection with schema introspection into a single
//! [`AnalysisRecord`], the value passed down the description pipeline.

pub mod stats;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::gis::{self, Dataset, DatasetResult, GeometryStats, ValidationReport};

pub use stats::{ColumnSummary, numeric_summaries};

/// Structured analysis of one spatial dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// File name of the originating dataset
    pub source_name: String,
    /// File extension including the leading dot
    pub format_label: String,
    pub feature_count: usize,
    /// Attribute names in schema order; never includes the geometry column
    pub columns: Vec<String>,
    pub crs_label: String,
    pub geometry_types: Vec<String>,
    pub geometry_stats: GeometryStats,
    /// Attributes of the first feature
    pub sample_attributes: Map<String, Value>,
    pub attribute_stats: Vec<ColumnSummary>,
    pub validation: ValidationReport,
}

impl AnalysisRecord {
    /// Geometry types joined for prose, e.g. `point, polygon`
    pub fn geometry_types_lowercase(&self) -> String {
        self.geometry_types
            .iter()
            .map(|t| t.to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Analysis results in the shape expected by
    /// [`NarrativeGenerator::explain_analysis`](crate::llm::NarrativeGenerator::explain_analysis)
    pub fn analysis_results(&self) -> Value {
        let numeric_stats: Map<String, Value> = self
            .attribute_stats
            .iter()
            .map(|summary| {
                (
                    summary.column.clone(),
                    serde_json::to_value(summary).unwrap_or(Value::Null),
                )
            })
            .collect();

        json!({
            "feature_count": self.feature_count,
            "geometry_types": self.geometry_types,
            "attributes": self.columns,
            "crs": self.crs_label,
            "numeric_stats": numeric_stats,
            "validation": self.validation,
        })
    }
}

/// Read and analyze a dataset file
pub fn analyze(path: &Path) -> DatasetResult<AnalysisRecord> {
    let dataset = gis::read_dataset(path)?;

    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format_label = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    Ok(analyze_dataset(&dataset, source_name, format_label))
}

/// Analyze an already loaded dataset
pub fn analyze_dataset(
    dataset: &Dataset,
    source_name: impl Into<String>,
    format_label: impl Into<String>,
) -> AnalysisRecord {
    let sample_attributes = dataset
        .features
        .first()
        .map(|feature| feature.properties.clone())
        .unwrap_or_default();

    AnalysisRecord {
        source_name: source_name.into(),
        format_label: format_label.into(),
        feature_count: dataset.len(),
        columns: dataset.columns(),
        crs_label: gis::describe_crs(dataset.crs.as_ref()),
        geometry_types: dataset.geometry_types(),
        geometry_stats: gis::compute_stats(dataset),
        sample_attributes,
        attribute_stats: numeric_summaries(dataset),
        validation: gis::validate_dataset(dataset),
    }
}
