//! Core types for the location subsystem.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    DirectoryExact,
    DirectoryPartial,
    Provider,
    Default,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryExact => write!(f, "directory (exact)"),
            Self::DirectoryPartial => write!(f, "directory (partial)"),
            Self::Provider => write!(f, "text search"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved location with coordinates and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub formatted_address: String,
    pub source: LocationSource,
}

impl ResolvedLocation {
    pub fn is_default(&self) -> bool {
        self.source == LocationSource::Default
    }

    pub fn display_line(&self) -> String {
        format!(
            "\u{1F4CD} {}\n  \u{1F4D0} {}\n  \u{1F50E} via {}",
            self.formatted_address,
            format_coords(self.point.lat, self.point.lng),
            self.source
        )
    }
}

/// Format coordinates as "41.8781°N, 87.6298°W".
pub fn format_coords(lat: f64, lng: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lng >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", lat.abs(), ns, lng.abs(), ew)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coords() {
        assert_eq!(format_coords(41.8781, -87.6298), "41.8781°N, 87.6298°W");
        assert_eq!(format_coords(-33.8688, 151.2093), "33.8688°S, 151.2093°E");
    }

    #[test]
    fn test_serialized_shape() {
        let loc = ResolvedLocation {
            point: GeoPoint::new(41.8781, -87.6298),
            formatted_address: "Chicago, IL".into(),
            source: LocationSource::DirectoryExact,
        };
        let v = serde_json::to_value(&loc).unwrap();
        assert_eq!(v["lat"], 41.8781);
        assert_eq!(v["lng"], -87.6298);
        assert_eq!(v["formattedAddress"], "Chicago, IL");
        assert_eq!(v["source"], "directory_exact");
    }

    #[test]
    fn test_display_line_mentions_source() {
        let loc = ResolvedLocation {
            point: GeoPoint::new(37.7749, -122.4194),
            formatted_address: "San Francisco, CA".into(),
            source: LocationSource::Default,
        };
        assert!(loc.display_line().contains("via default"));
        assert!(loc.is_default());
    }
}
