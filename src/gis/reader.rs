//! Dataset reading
//!
//! GeoJSON is read with the `geojson` crate and converted into `geo` geometries.
//! A FeatureCollection, a single Feature, or a bare Geometry are all accepted.

use std::fs;
use std::path::Path;

use geojson::GeoJson;
use serde_json::Map;

use super::error::{DatasetReadError, DatasetResult};
use super::{CrsHandle, Dataset, Feature};

/// File extensions this reader understands
pub const SUPPORTED_EXTENSIONS: &[&str] = &["geojson", "json"];

/// Read a spatial dataset from disk
pub fn read_dataset(path: &Path) -> DatasetResult<Dataset> {
    if !path.exists() {
        return Err(DatasetReadError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DatasetReadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: format!(".{}", extension),
        });
    }

    let content = fs::read_to_string(path)?;
    let dataset = parse_geojson(&content).map_err(|reason| DatasetReadError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;

    tracing::debug!(
        "Read {} features from {}",
        dataset.features.len(),
        path.display()
    );

    Ok(dataset)
}

/// Parse GeoJSON text into a dataset
///
/// A missing `crs` member means the RFC 7946 default (WGS 84); an explicit `null`
/// means the dataset has no CRS.
pub fn parse_geojson(content: &str) -> Result<Dataset, String> {
    let geojson: GeoJson = content.parse().map_err(|e: geojson::Error| e.to_string())?;

    let (features, foreign_members) = match geojson {
        GeoJson::FeatureCollection(collection) => {
            let features = collection
                .features
                .into_iter()
                .map(convert_feature)
                .collect::<Result<Vec<_>, _>>()?;
            (features, collection.foreign_members)
        }
        GeoJson::Feature(feature) => {
            let foreign_members = feature.foreign_members.clone();
            (vec![convert_feature(feature)?], foreign_members)
        }
        GeoJson::Geometry(geometry) => {
            let foreign_members = geometry.foreign_members.clone();
            let geometry = convert_geometry(geometry)?;
            (vec![Feature::new(Some(geometry), Map::new())], foreign_members)
        }
    };

    let crs = match foreign_members.as_ref().and_then(|m| m.get("crs")) {
        Some(member) => CrsHandle::from_geojson_member(member),
        None => Some(CrsHandle::wgs84()),
    };

    Ok(Dataset { features, crs })
}

fn convert_feature(feature: geojson::Feature) -> Result<Feature, String> {
    let geometry = feature.geometry.map(convert_geometry).transpose()?;
    let properties = feature.properties.unwrap_or_default();
    Ok(Feature::new(geometry, properties))
}

fn convert_geometry(geometry: geojson::Geometry) -> Result<geo::Geometry<f64>, String> {
    geo::Geometry::<f64>::try_from(geometry).map_err(|e| format!("invalid geometry: {}", e))
}
