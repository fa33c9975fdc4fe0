//! Spatial dataset model and geometry inspection
//!
//! A [`Dataset`] is a table of features, each with an optional geometry and a set of
//! named attributes, plus the CRS the coordinates are expressed in.

pub mod crs;
pub mod error;
pub mod reader;
pub mod stats;
pub mod validate;

use geo::Geometry;
use serde_json::{Map, Value};

pub use crs::{CrsHandle, describe_crs};
pub use error::{DatasetReadError, DatasetResult};
pub use reader::{SUPPORTED_EXTENSIONS, read_dataset};
pub use stats::{AreaUnit, Extent, GeometryStats, compute_stats};
pub use validate::{ValidationIssue, ValidationReport, validate_dataset, validate_geometry};

/// A single feature: one geometry plus its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry<f64>>,
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Option<Geometry<f64>>, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }
}

/// A loaded spatial dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub features: Vec<Feature>,
    pub crs: Option<CrsHandle>,
}

impl Dataset {
    /// Number of features, including those without geometry
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over the geometries that are present
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry<f64>> {
        self.features.iter().filter_map(|f| f.geometry.as_ref())
    }

    /// Attribute column names in schema order (first appearance across features)
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for feature in &self.features {
            for key in feature.properties.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    /// Distinct geometry type names in first-appearance order
    pub fn geometry_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for geometry in self.geometries() {
            let name = geometry_type_name(geometry);
            if !types.iter().any(|t| t == name) {
                types.push(name.to_string());
            }
        }
        types
    }
}

/// Simple-features name of a geometry's type
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) | Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
    }
}
