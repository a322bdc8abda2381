//! Built-in directory of well-known places and postal codes.
//!
//! Always available, no network. Keys are lower-case.

use super::types::{LocationSource, ResolvedLocation};
use crate::geo::GeoPoint;
use serde::Serialize;

struct DirectoryEntry {
    key: &'static str,
    lat: f64,
    lng: f64,
    name: &'static str,
}

const DIRECTORY: &[DirectoryEntry] = &[
    DirectoryEntry { key: "new york", lat: 40.7128, lng: -74.0060, name: "New York, NY" },
    DirectoryEntry { key: "los angeles", lat: 34.0522, lng: -118.2437, name: "Los Angeles, CA" },
    DirectoryEntry { key: "chicago", lat: 41.8781, lng: -87.6298, name: "Chicago, IL" },
    DirectoryEntry { key: "houston", lat: 29.7604, lng: -95.3698, name: "Houston, TX" },
    DirectoryEntry { key: "phoenix", lat: 33.4484, lng: -112.0740, name: "Phoenix, AZ" },
    DirectoryEntry { key: "philadelphia", lat: 39.9526, lng: -75.1652, name: "Philadelphia, PA" },
    DirectoryEntry { key: "san antonio", lat: 29.4241, lng: -98.4936, name: "San Antonio, TX" },
    DirectoryEntry { key: "san diego", lat: 32.7157, lng: -117.1611, name: "San Diego, CA" },
    DirectoryEntry { key: "dallas", lat: 32.7767, lng: -96.7970, name: "Dallas, TX" },
    DirectoryEntry { key: "san jose", lat: 37.3382, lng: -121.8863, name: "San Jose, CA" },
    DirectoryEntry { key: "austin", lat: 30.2672, lng: -97.7431, name: "Austin, TX" },
    DirectoryEntry { key: "san francisco", lat: 37.7749, lng: -122.4194, name: "San Francisco, CA" },
    DirectoryEntry { key: "seattle", lat: 47.6062, lng: -122.3321, name: "Seattle, WA" },
    DirectoryEntry { key: "denver", lat: 39.7392, lng: -104.9903, name: "Denver, CO" },
    DirectoryEntry { key: "boston", lat: 42.3601, lng: -71.0589, name: "Boston, MA" },
    DirectoryEntry { key: "miami", lat: 25.7617, lng: -80.1918, name: "Miami, FL" },
    DirectoryEntry { key: "atlanta", lat: 33.7490, lng: -84.3880, name: "Atlanta, GA" },
    DirectoryEntry { key: "detroit", lat: 42.3314, lng: -83.0458, name: "Detroit, MI" },
    DirectoryEntry { key: "portland", lat: 45.5152, lng: -122.6784, name: "Portland, OR" },
    DirectoryEntry { key: "las vegas", lat: 36.1699, lng: -115.1398, name: "Las Vegas, NV" },
    // Postal codes
    DirectoryEntry { key: "10001", lat: 40.7506, lng: -73.9972, name: "New York, NY 10001" },
    DirectoryEntry { key: "90001", lat: 33.9731, lng: -118.2479, name: "Los Angeles, CA 90001" },
    DirectoryEntry { key: "60601", lat: 41.8858, lng: -87.6181, name: "Chicago, IL 60601" },
    DirectoryEntry { key: "77001", lat: 29.7520, lng: -95.3585, name: "Houston, TX 77001" },
    DirectoryEntry { key: "75201", lat: 32.7899, lng: -96.8045, name: "Dallas, TX 75201" },
    DirectoryEntry { key: "94102", lat: 37.7793, lng: -122.4193, name: "San Francisco, CA 94102" },
    DirectoryEntry { key: "98101", lat: 47.6101, lng: -122.3344, name: "Seattle, WA 98101" },
    DirectoryEntry { key: "02108", lat: 42.3576, lng: -71.0636, name: "Boston, MA 02108" },
    DirectoryEntry { key: "33101", lat: 25.7791, lng: -80.1978, name: "Miami, FL 33101" },
    DirectoryEntry { key: "30301", lat: 33.7525, lng: -84.3888, name: "Atlanta, GA 30301" },
];

/// How a substring candidate relates to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    /// The query contains the key. Longer keys are more specific.
    KeyInQuery { neg_len: isize },
    /// The key contains the query. Shorter keys are closer to it.
    QueryInKey { len: usize },
}

/// Look up `query` in the directory.
///
/// Exact key match first, then the best-ranked substring match. Returns
/// `None` when nothing matches; the caller falls through to a provider.
pub fn lookup(query: &str) -> Option<ResolvedLocation> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    if let Some(entry) = DIRECTORY.iter().find(|e| e.key == q) {
        return Some(entry_to_resolved(entry, LocationSource::DirectoryExact));
    }

    // min_by_key keeps the first of equal ranks, so table order breaks ties.
    DIRECTORY
        .iter()
        .filter_map(|e| substring_rank(&q, e.key).map(|rank| (rank, e)))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, e)| entry_to_resolved(e, LocationSource::DirectoryPartial))
}

fn substring_rank(query: &str, key: &str) -> Option<MatchRank> {
    if query.contains(key) {
        Some(MatchRank::KeyInQuery {
            neg_len: -(key.len() as isize),
        })
    } else if key.contains(query) {
        Some(MatchRank::QueryInKey { len: key.len() })
    } else {
        None
    }
}

fn entry_to_resolved(entry: &DirectoryEntry, source: LocationSource) -> ResolvedLocation {
    ResolvedLocation {
        point: GeoPoint::new(entry.lat, entry.lng),
        formatted_address: entry.name.to_string(),
        source,
    }
}

/// A directory entry for the public listing API.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceInfo {
    pub key: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Return every directory entry in table order.
pub fn directory_list() -> Vec<PlaceInfo> {
    DIRECTORY
        .iter()
        .map(|e| PlaceInfo {
            key: e.key.to_string(),
            name: e.name.to_string(),
            lat: e.lat,
            lng: e.lng,
        })
        .collect()
}
