//! Geocoding providers: free text → coordinates.

use crate::fallback::ProviderError;
use crate::geo::GeoPoint;
use crate::google::{Geometry, GooglePlaces, SearchResponse};
use serde::Deserialize;

/// First result of a text geocode.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub point: GeoPoint,
    pub formatted_address: String,
}

/// A text-search geocoder.
///
/// `Ok(None)` means the provider answered but found nothing.
pub trait GeocodeProvider: Send + Sync {
    fn text_search(&self, query: &str) -> Result<Option<GeocodeHit>, ProviderError>;
}

// ─── Google Places text search ──────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

impl GeocodeProvider for GooglePlaces {
    fn text_search(&self, query: &str) -> Result<Option<GeocodeHit>, ProviderError> {
        let response: SearchResponse<TextSearchResult> =
            self.get("textsearch", &[("query", query)])?;
        first_hit(response, query)
    }
}

fn first_hit(
    response: SearchResponse<TextSearchResult>,
    query: &str,
) -> Result<Option<GeocodeHit>, ProviderError> {
    let Some(first) = response.into_results()?.into_iter().next() else {
        return Ok(None);
    };

    let point: GeoPoint = first
        .geometry
        .map(|g| g.location.into())
        .ok_or_else(|| ProviderError::InvalidResponse("first result has no geometry".into()))?;
    if !point.is_valid() {
        return Err(ProviderError::InvalidResponse(format!(
            "coordinates out of range: {}, {}",
            point.lat, point.lng
        )));
    }

    let formatted_address = first
        .formatted_address
        .or(first.name)
        .unwrap_or_else(|| query.trim().to_string());

    Ok(Some(GeocodeHit {
        point,
        formatted_address,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::test_server;
    use std::time::Duration;

    fn parse(json: &str) -> SearchResponse<TextSearchResult> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_hit_takes_first_result() {
        let resp = parse(
            r#"{"status":"OK","results":[
                {"formatted_address":"1 Infinite Loop, Cupertino, CA","geometry":{"location":{"lat":37.3318,"lng":-122.0312}}},
                {"formatted_address":"Elsewhere","geometry":{"location":{"lat":1.0,"lng":1.0}}}
            ]}"#,
        );
        let hit = first_hit(resp, "apple campus").unwrap().unwrap();
        assert_eq!(hit.point, GeoPoint::new(37.3318, -122.0312));
        assert_eq!(hit.formatted_address, "1 Infinite Loop, Cupertino, CA");
    }

    #[test]
    fn test_zero_results_is_none() {
        let resp = parse(r#"{"status":"ZERO_RESULTS","results":[]}"#);
        assert_eq!(first_hit(resp, "nowhere").unwrap(), None);
    }

    #[test]
    fn test_denied_status_is_error() {
        let resp = parse(r#"{"status":"REQUEST_DENIED","error_message":"bad key","results":[]}"#);
        assert!(matches!(first_hit(resp, "x"), Err(ProviderError::Status { .. })));
    }

    #[test]
    fn test_missing_geometry_is_invalid() {
        let resp = parse(r#"{"status":"OK","results":[{"formatted_address":"Somewhere"}]}"#);
        assert!(matches!(first_hit(resp, "x"), Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_address_falls_back_to_name_then_query() {
        let resp = parse(r#"{"status":"OK","results":[{"name":"Joe's Garage","geometry":{"location":{"lat":1.0,"lng":2.0}}}]}"#);
        assert_eq!(first_hit(resp, "q").unwrap().unwrap().formatted_address, "Joe's Garage");

        let resp = parse(r#"{"status":"OK","results":[{"geometry":{"location":{"lat":1.0,"lng":2.0}}}]}"#);
        assert_eq!(first_hit(resp, " some query ").unwrap().unwrap().formatted_address, "some query");
    }

    #[test]
    fn test_google_text_search_over_http() {
        let (base, _rx) = test_server::serve_once(
            r#"{"status":"OK","results":[{"formatted_address":"Springfield, IL, USA","geometry":{"location":{"lat":39.7817,"lng":-89.6501}}}]}"#,
        );
        let client = GooglePlaces::new(Some("key".into()), Duration::from_secs(5)).with_base_url(base);
        let hit = client.text_search("springfield illinois").unwrap().unwrap();
        assert_eq!(hit.formatted_address, "Springfield, IL, USA");
        assert_eq!(hit.point, GeoPoint::new(39.7817, -89.6501));
    }
}
