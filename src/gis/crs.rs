//! Coordinate reference system handling
//!
//! GeoJSON carries its CRS (when it carries one at all) as a legacy `crs` member.
//! This module turns that member into a [`CrsHandle`] and derives the labels and
//! properties the rest of the pipeline needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label reported when a dataset has no CRS attached
pub const UNDEFINED_CRS: &str = "undefined";

/// Label reported when a CRS is present but its authority cannot be resolved
pub const UNKNOWN_AUTHORITY: &str = "Custom:Unknown";

/// EPSG codes of common geographic (lat/long, degree-based) 2D systems
const GEOGRAPHIC_EPSG_CODES: &[&str] = &[
    "4326", "4269", "4258", "4267", "4283", "4617", "4674", "4019", "4030", "4152", "4171",
    "4759",
];

/// OGC codes of geographic systems with longitude-first axis order
const GEOGRAPHIC_OGC_CODES: &[&str] = &["CRS84", "CRS83", "CRS27"];

/// A coordinate reference system attached to a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CrsHandle {
    /// A registry authority/code pair, e.g. EPSG:4326
    Authority { authority: String, code: String },
    /// A free-text identifier with no resolvable authority
    Identifier { name: String },
    /// A CRS object whose authority lookup failed
    Unresolved,
}

impl CrsHandle {
    /// WGS 84, the RFC 7946 default for GeoJSON
    pub fn wgs84() -> Self {
        Self::epsg("4326")
    }

    /// Create an EPSG authority handle
    pub fn epsg(code: impl Into<String>) -> Self {
        CrsHandle::Authority {
            authority: "EPSG".to_string(),
            code: code.into(),
        }
    }

    /// Parse a CRS name such as `EPSG:4326` or `urn:ogc:def:crs:EPSG::4326`
    ///
    /// Names that do not follow an authority pattern are kept verbatim as identifiers.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return CrsHandle::Unresolved;
        }

        if let Some(rest) = strip_prefix_ignore_case(trimmed, "urn:ogc:def:crs:") {
            // urn:ogc:def:crs:{authority}:{version}:{code}, version may be empty
            let parts: Vec<&str> = rest.split(':').collect();
            return match parts.as_slice() {
                [authority, _, code] | [authority, code]
                    if !authority.is_empty() && !code.is_empty() =>
                {
                    CrsHandle::Authority {
                        authority: authority.to_uppercase(),
                        code: code.to_string(),
                    }
                }
                _ => CrsHandle::Unresolved,
            };
        }

        if let Some((authority, code)) = trimmed.split_once(':') {
            let is_authority = !authority.is_empty()
                && authority.chars().all(|c| c.is_ascii_alphabetic())
                && !code.is_empty()
                && code.chars().all(|c| c.is_ascii_alphanumeric());
            if is_authority {
                return CrsHandle::Authority {
                    authority: authority.to_uppercase(),
                    code: code.to_string(),
                };
            }
        }

        CrsHandle::Identifier {
            name: trimmed.to_string(),
        }
    }

    /// Interpret a GeoJSON `crs` member
    ///
    /// Returns `None` for an explicit `null`, meaning the dataset has no CRS.
    pub fn from_geojson_member(member: &Value) -> Option<Self> {
        match member {
            Value::Null => None,
            Value::String(name) => Some(Self::from_name(name)),
            Value::Object(object) => {
                let crs_type = object.get("type").and_then(Value::as_str);
                let properties = object.get("properties");
                let handle = match crs_type.map(str::to_ascii_lowercase).as_deref() {
                    Some("name") => properties
                        .and_then(|p| p.get("name"))
                        .and_then(Value::as_str)
                        .map(Self::from_name)
                        .unwrap_or(CrsHandle::Unresolved),
                    Some("epsg") => properties
                        .and_then(|p| p.get("code"))
                        .and_then(|code| match code {
                            Value::Number(n) => Some(n.to_string()),
                            Value::String(s) => Some(s.clone()),
                            _ => None,
                        })
                        .map(Self::epsg)
                        .unwrap_or(CrsHandle::Unresolved),
                    _ => CrsHandle::Unresolved,
                };
                Some(handle)
            }
            _ => Some(CrsHandle::Unresolved),
        }
    }

    /// Human-readable label for this CRS
    pub fn label(&self) -> String {
        match self {
            CrsHandle::Authority { authority, code } => format!("{}:{}", authority, code),
            CrsHandle::Identifier { name } => name.clone(),
            CrsHandle::Unresolved => UNKNOWN_AUTHORITY.to_string(),
        }
    }

    /// Whether coordinates in this CRS are degree-based longitude/latitude
    pub fn is_geographic(&self) -> bool {
        match self {
            CrsHandle::Authority { authority, code } => match authority.as_str() {
                "EPSG" => GEOGRAPHIC_EPSG_CODES.contains(&code.as_str()),
                "OGC" => GEOGRAPHIC_OGC_CODES
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(code)),
                _ => false,
            },
            CrsHandle::Identifier { name } => identifier_is_geographic(name),
            CrsHandle::Unresolved => false,
        }
    }
}

/// Describe an optional CRS; total over every input
pub fn describe_crs(crs: Option<&CrsHandle>) -> String {
    match crs {
        None => UNDEFINED_CRS.to_string(),
        Some(handle) => handle.label(),
    }
}

fn identifier_is_geographic(name: &str) -> bool {
    let normalized = name.to_ascii_lowercase();
    if normalized.contains("+proj=longlat") || normalized.contains("+proj=latlong") {
        return true;
    }
    // Projected systems are usually named "<datum> / <projection>"
    if normalized.contains('/') {
        return false;
    }
    let compact: String = normalized
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    matches!(
        compact.as_str(),
        "wgs84" | "crs84" | "nad83" | "nad27" | "etrs89" | "gcswgs1984" | "latlong" | "longlat"
    )
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    value
        .get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &value[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_undefined() {
        assert_eq!(describe_crs(None), "undefined");
    }

    #[test]
    fn test_from_name_authority() {
        assert_eq!(CrsHandle::from_name("EPSG:4326"), CrsHandle::epsg("4326"));
        assert_eq!(CrsHandle::from_name("epsg:3857").label(), "EPSG:3857");
    }

    #[test]
    fn test_from_name_urn() {
        let crs = CrsHandle::from_name("urn:ogc:def:crs:EPSG::4326");
        assert_eq!(crs.label(), "EPSG:4326");

        let crs = CrsHandle::from_name("urn:ogc:def:crs:OGC:1.3:CRS84");
        assert_eq!(crs.label(), "OGC:CRS84");
        assert!(crs.is_geographic());
    }

    #[test]
    fn test_from_name_malformed_urn() {
        let crs = CrsHandle::from_name("urn:ogc:def:crs:");
        assert_eq!(crs, CrsHandle::Unresolved);
        assert_eq!(crs.label(), "Custom:Unknown");
    }

    #[test]
    fn test_from_name_free_text() {
        let crs = CrsHandle::from_name("WGS 84 / Pseudo-Mercator");
        assert_eq!(crs.label(), "WGS 84 / Pseudo-Mercator");
        assert!(!crs.is_geographic());
    }

    #[test]
    fn test_from_geojson_member() {
        let member = json!({"type": "name", "properties": {"name": "EPSG:2263"}});
        let crs = CrsHandle::from_geojson_member(&member).unwrap();
        assert_eq!(crs.label(), "EPSG:2263");
        assert!(!crs.is_geographic());

        let member = json!({"type": "EPSG", "properties": {"code": 4269}});
        let crs = CrsHandle::from_geojson_member(&member).unwrap();
        assert_eq!(crs.label(), "EPSG:4269");
        assert!(crs.is_geographic());

        assert!(CrsHandle::from_geojson_member(&Value::Null).is_none());
    }

    #[test]
    fn test_from_geojson_member_unresolvable() {
        let member = json!({"type": "link", "properties": {"href": "http://example.com/crs"}});
        let crs = CrsHandle::from_geojson_member(&member).unwrap();
        assert_eq!(describe_crs(Some(&crs)), "Custom:Unknown");

        let member = json!({"type": "name"});
        let crs = CrsHandle::from_geojson_member(&member).unwrap();
        assert_eq!(crs, CrsHandle::Unresolved);
    }

    #[test]
    fn test_identifier_geographic() {
        assert!(CrsHandle::from_name("WGS 84").is_geographic());
        assert!(CrsHandle::from_name("+proj=longlat +datum=WGS84 +no_defs").is_geographic());
        assert!(!CrsHandle::from_name("British National Grid").is_geographic());
    }

    #[test]
    fn test_from_name_non_ascii() {
        let crs = CrsHandle::from_name("Lambert 93 (RGFé)");
        assert_eq!(crs.label(), "Lambert 93 (RGFé)");
        assert!(!crs.is_geographic());

        assert_eq!(strip_prefix_ignore_case("urn:ogc:def:crsé", "urn:ogc:def:crs:"), None);
        assert_eq!(strip_prefix_ignore_case("URN:OGC:DEF:CRS:EPSG::2154", "urn:ogc:def:crs:"), Some("EPSG::2154"));
    }
}
