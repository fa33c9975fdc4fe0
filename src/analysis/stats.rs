//! Summary statistics for numeric attribute columns

use serde::{Deserialize, Serialize};

use crate::gis::Dataset;
use crate::gis::stats::nan_from_null;

/// Distribution summary of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Number of non-null numeric values
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN with fewer than two values
    #[serde(deserialize_with = "nan_from_null")]
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn from_values(column: &str, mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        };

        Some(Self {
            column: column.to_string(),
            count,
            mean,
            std,
            min: values[0],
            p25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            p75: quantile(&values, 0.75),
            max: values[count - 1],
        })
    }
}

/// Summarize every column whose non-null values are all numeric
///
/// Columns mixing numbers with other value types are skipped, as are columns that
/// only ever hold nulls.
pub fn numeric_summaries(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .columns()
        .iter()
        .filter_map(|column| {
            let mut values = Vec::new();
            for feature in &dataset.features {
                match feature.properties.get(column) {
                    None | Some(serde_json::Value::Null) => {}
                    Some(value) => values.push(value.as_f64()?),
                }
            }
            ColumnSummary::from_values(column, values)
        })
        .collect()
}

/// Linearly interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
