//! Geometry validity checks
//!
//! Reports features whose geometry is not valid in the simple-features sense: non-finite
//! coordinates, components with too few points, and rings that cross themselves.

use geo::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, CoordsIter, Geometry, Line, LineString, Polygon};
use serde::{Deserialize, Serialize};

use super::Dataset;

/// An invalid geometry, by feature position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub index: usize,
    pub reason: String,
}

/// Outcome of validating every geometry in a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

/// Validate each feature's geometry
///
/// Features without a geometry are not checked.
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let issues: Vec<ValidationIssue> = dataset
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let reason = validate_geometry(feature.geometry.as_ref()?)?;
            Some(ValidationIssue { index, reason })
        })
        .collect();

    if !issues.is_empty() {
        tracing::debug!("{} invalid geometries", issues.len());
    }

    ValidationReport {
        valid: issues.is_empty(),
        issues,
    }
}

/// First problem found in a geometry, or `None` when it is valid
pub fn validate_geometry(geometry: &Geometry<f64>) -> Option<String> {
    if let Some(coord) = geometry
        .coords_iter()
        .find(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Some(format!("Invalid coordinate ({}, {})", coord.x, coord.y));
    }

    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::Rect(_) => None,
        Geometry::Line(line) => {
            (line.start == line.end).then(|| too_few_points(line.start))
        }
        Geometry::LineString(line) => check_line_string(line),
        Geometry::MultiLineString(lines) => lines.iter().find_map(check_line_string),
        Geometry::Polygon(polygon) => check_polygon(polygon),
        Geometry::MultiPolygon(polygons) => polygons.iter().find_map(check_polygon),
        Geometry::Triangle(triangle) => check_polygon(&triangle.to_polygon()),
        Geometry::GeometryCollection(collection) => collection.iter().find_map(validate_geometry),
    }
}

fn too_few_points(at: Coord<f64>) -> String {
    format!(
        "Too few points in geometry component at ({:.2}, {:.2})",
        at.x, at.y
    )
}

/// Coordinates with consecutive repeats removed
fn distinct_run(line: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut coords = line.0.clone();
    coords.dedup();
    coords
}

fn check_line_string(line: &LineString<f64>) -> Option<String> {
    let coords = distinct_run(line);
    match coords.as_slice() {
        [] => None,
        [only] => Some(too_few_points(*only)),
        _ => None,
    }
}

fn check_polygon(polygon: &Polygon<f64>) -> Option<String> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .find_map(check_ring)
}

fn check_ring(ring: &LineString<f64>) -> Option<String> {
    let coords = distinct_run(ring);
    if coords.is_empty() {
        return None;
    }
    // A closed ring needs three distinct vertices plus the closing one
    if coords.len() < 4 {
        return Some(too_few_points(coords[0]));
    }

    let segments: Vec<Line<f64>> = coords.windows(2).map(|w| Line::new(w[0], w[1])).collect();
    let last = segments.len() - 1;

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let adjacent = j == i + 1 || (i == 0 && j == last);
            let crossing = match line_intersection(segments[i], segments[j]) {
                None => None,
                // Neighbours always share an endpoint; only an overlap is a problem
                Some(LineIntersection::SinglePoint { .. }) if adjacent => None,
                Some(LineIntersection::SinglePoint { intersection, .. }) => Some(intersection),
                Some(LineIntersection::Collinear { intersection }) => Some(intersection.start),
            };
            if let Some(at) = crossing {
                return Some(format!(
                    "Ring self-intersection at ({:.2}, {:.2})",
                    at.x, at.y
                ));
            }
        }
    }
    None
}
