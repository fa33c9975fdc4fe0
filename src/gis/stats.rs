//! Geometric summary statistics
//!
//! Bounds are always computed in the dataset's own coordinates. Areas are measured in
//! Web Mercator metres when the dataset is geographic, so that degree-based data does
//! not produce meaningless "square degree" figures.

use std::f64::consts::PI;

use geo::{Area, BoundingRect, Coord, MapCoords, Rect};
use serde::{Deserialize, Deserializer, Serialize};

use super::Dataset;

/// WGS 84 semi-major axis used by Web Mercator (EPSG:3857)
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator square
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Unit that areas are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    /// Areas measured after reprojection to a metric plane
    #[serde(rename = "square meters")]
    SquareMeters,
    /// Areas measured directly in the dataset's coordinate units
    #[serde(rename = "square units")]
    SquareUnits,
}

impl std::fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AreaUnit::SquareMeters => write!(f, "square meters"),
            AreaUnit::SquareUnits => write!(f, "square units"),
        }
    }
}

/// Axis-aligned extent of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    fn from_rect(rect: Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }

    fn merge(self, other: Extent) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    fn to_rect(self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min_x,
                y: self.min_y,
            },
            Coord {
                x: self.max_x,
                y: self.max_y,
            },
        )
    }

    /// Format as `(minx, miny, maxx, maxy)` with two decimals
    pub fn formatted(&self) -> String {
        format!(
            "({:.2}, {:.2}, {:.2}, {:.2})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Geometric summary of a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Extent formatted as `(minx, miny, maxx, maxy)`
    pub bbox: String,
    /// Numeric extent, absent for a dataset without geometries
    pub extent: Option<Extent>,
    /// Sum of feature areas
    pub total_area: f64,
    /// Mean feature area; NaN when there are no geometries to average
    #[serde(deserialize_with = "nan_from_null")]
    pub mean_area: f64,
    /// Area of the extent in the measuring plane
    pub bbox_area: Option<f64>,
    pub area_unit: AreaUnit,
}

impl GeometryStats {
    /// Whether the mean area is the empty-dataset sentinel
    pub fn has_undefined_mean(&self) -> bool {
        self.mean_area.is_nan()
    }
}

/// Compute bounding box and area statistics for a dataset
///
/// An empty dataset is not an error: it yields a zero total area and a NaN mean.
pub fn compute_stats(dataset: &Dataset) -> GeometryStats {
    let geographic = dataset.crs.as_ref().is_some_and(|crs| crs.is_geographic());
    let area_unit = if geographic {
        AreaUnit::SquareMeters
    } else {
        AreaUnit::SquareUnits
    };

    let extent = dataset
        .geometries()
        .filter_map(|geometry| geometry.bounding_rect())
        .map(Extent::from_rect)
        .reduce(Extent::merge);

    let areas: Vec<f64> = dataset
        .geometries()
        .map(|geometry| {
            if geographic {
                geometry.map_coords(to_web_mercator).unsigned_area()
            } else {
                geometry.unsigned_area()
            }
        })
        .collect();

    let total_area = areas.iter().fold(0.0, |acc, area| acc + area);
    let mean_area = if areas.is_empty() {
        f64::NAN
    } else {
        total_area / areas.len() as f64
    };

    let bbox_area = extent.map(|extent| {
        let rect = extent.to_rect();
        if geographic {
            rect.map_coords(to_web_mercator).unsigned_area()
        } else {
            rect.unsigned_area()
        }
    });

    let bbox = match &extent {
        Some(extent) => extent.formatted(),
        None => "(nan, nan, nan, nan)".to_string(),
    };

    tracing::debug!(
        "Computed stats over {} geometries: total area {} {}",
        areas.len(),
        total_area,
        area_unit
    );

    GeometryStats {
        bbox,
        extent,
        total_area,
        mean_area,
        bbox_area,
        area_unit,
    }
}

/// Read a float that serde_json wrote as `null` because it was NaN
pub(crate) fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Project a longitude/latitude coordinate to Web Mercator metres
pub fn to_web_mercator(coord: Coord<f64>) -> Coord<f64> {
    let lat = coord.y.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    Coord {
        x: EARTH_RADIUS_M * coord.x.to_radians(),
        y: EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gis::{CrsHandle, Feature};
    use geo::{Geometry, Point, polygon};

    fn dataset(geometries: Vec<Geometry<f64>>, crs: Option<CrsHandle>) -> Dataset {
        Dataset {
            features: geometries
                .into_iter()
                .map(|g| Feature::new(Some(g), serde_json::Map::new()))
                .collect(),
            crs,
        }
    }

    #[test]
    fn test_web_mercator_origin() {
        let projected = to_web_mercator(Coord { x: 0.0, y: 0.0 });
        assert!(projected.x.abs() < 1e-9);
        assert!(projected.y.abs() < 1e-9);
    }

    #[test]
    fn test_web_mercator_antimeridian() {
        let projected = to_web_mercator(Coord { x: 180.0, y: 0.0 });
        assert!((projected.x - 20_037_508.342_789_244).abs() < 1e-3);
    }

    #[test]
    fn test_web_mercator_clamps_poles() {
        let pole = to_web_mercator(Coord { x: 0.0, y: 90.0 });
        assert!(pole.y.is_finite());
    }

    #[test]
    fn test_planar_polygon_area() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0),
        ];
        let ds = dataset(
            vec![Geometry::Polygon(square.clone()), Geometry::Polygon(square)],
            Some(CrsHandle::epsg("2263")),
        );

        let stats = compute_stats(&ds);
        assert_eq!(stats.area_unit, AreaUnit::SquareUnits);
        assert!((stats.total_area - 200.0).abs() < 1e-9);
        assert!((stats.mean_area - 100.0).abs() < 1e-9);
        assert_eq!(stats.bbox, "(0.00, 0.00, 10.00, 10.00)");
        assert!((stats.bbox_area.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_geographic_points() {
        let ds = dataset(
            vec![
                Geometry::Point(Point::new(-122.4194, 37.7749)),
                Geometry::Point(Point::new(-74.0060, 40.7128)),
            ],
            Some(CrsHandle::wgs84()),
        );

        let stats = compute_stats(&ds);
        assert_eq!(stats.area_unit, AreaUnit::SquareMeters);
        assert_eq!(stats.total_area, 0.0);
        assert_eq!(stats.bbox, "(-122.42, 37.77, -74.01, 40.71)");
    }

    #[test]
    fn test_empty_dataset() {
        let ds = dataset(Vec::new(), Some(CrsHandle::wgs84()));
        let stats = compute_stats(&ds);
        assert_eq!(stats.total_area, 0.0);
        assert!(stats.has_undefined_mean());
        assert!(stats.extent.is_none());
        assert!(stats.bbox_area.is_none());

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"mean_area\":null"));
        let parsed: GeometryStats = serde_json::from_str(&json).unwrap();
        assert!(parsed.has_undefined_mean());
        assert_eq!(parsed.total_area, 0.0);
    }

    #[test]
    fn test_undefined_crs_measures_directly() {
        let ds = dataset(vec![Geometry::Point(Point::new(1.0, 2.0))], None);
        let stats = compute_stats(&ds);
        assert_eq!(stats.area_unit, AreaUnit::SquareUnits);
        assert_eq!(stats.area_unit.to_string(), "square units");
    }
}
