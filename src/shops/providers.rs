//! Places providers: nearby venues and per-venue details.

use super::types::{OpeningHours, PlaceDetails, RawPlace};
use crate::fallback::ProviderError;
use crate::geo::GeoPoint;
use crate::google::{check_status, GooglePlaces, SearchResponse};
use serde::Deserialize;

/// Place type requested from the nearby search.
pub const PLACE_TYPE: &str = "car_repair";

const DETAIL_FIELDS: &str = "formatted_phone_number,website,opening_hours";

pub trait PlacesProvider: Send + Sync {
    /// Venues near `center`, in the provider's relevance order.
    fn nearby(&self, center: GeoPoint, radius_meters: u32) -> Result<Vec<RawPlace>, ProviderError>;

    fn details(&self, place_id: &str) -> Result<PlaceDetails, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
}

impl DetailsResponse {
    fn into_details(self) -> Result<PlaceDetails, ProviderError> {
        check_status(&self.status, self.error_message.as_deref())?;
        let result = self.result.unwrap_or_default();
        Ok(PlaceDetails {
            phone: result.formatted_phone_number,
            website: result.website,
            hours: result.opening_hours.and_then(|h| h.weekday_text),
        })
    }
}

impl PlacesProvider for GooglePlaces {
    fn nearby(&self, center: GeoPoint, radius_meters: u32) -> Result<Vec<RawPlace>, ProviderError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_meters.to_string();
        let response: SearchResponse<RawPlace> = self.get(
            "nearbysearch",
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", PLACE_TYPE),
            ],
        )?;
        response.into_results()
    }

    fn details(&self, place_id: &str) -> Result<PlaceDetails, ProviderError> {
        let response: DetailsResponse =
            self.get("details", &[("place_id", place_id), ("fields", DETAIL_FIELDS)])?;
        response.into_details()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::test_server;
    use std::time::Duration;

    #[test]
    fn test_details_parse() {
        let resp: DetailsResponse = serde_json::from_str(
            r#"{"status":"OK","result":{
                "formatted_phone_number":"(312) 555-0199",
                "website":"https://ace.example",
                "opening_hours":{"open_now":false,"weekday_text":["Monday: 8:00 AM – 6:00 PM"]}
            }}"#,
        )
        .unwrap();
        let d = resp.into_details().unwrap();
        assert_eq!(d.phone.as_deref(), Some("(312) 555-0199"));
        assert_eq!(d.website.as_deref(), Some("https://ace.example"));
        assert_eq!(d.hours.unwrap().len(), 1);
    }

    #[test]
    fn test_details_not_found_status() {
        let resp: DetailsResponse =
            serde_json::from_str(r#"{"status":"NOT_FOUND"}"#).unwrap();
        assert!(matches!(resp.into_details(), Err(ProviderError::Status { .. })));
    }

    #[test]
    fn test_nearby_over_http() {
        let (base, rx) = test_server::serve_once(
            r#"{"status":"OK","results":[
                {"name":"Joe's Pizza","geometry":{"location":{"lat":41.88,"lng":-87.63}}},
                {"name":"Ace Auto Body","place_id":"p2","geometry":{"location":{"lat":41.89,"lng":-87.64}}}
            ]}"#,
        );
        let client = GooglePlaces::new(Some("key".into()), Duration::from_secs(5)).with_base_url(base);
        let places = client.nearby(GeoPoint::new(41.8781, -87.6298), 8000).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].place_id.as_deref(), Some("p2"));

        let line = rx.recv().unwrap();
        assert!(line.starts_with("GET /nearbysearch/json?"));
        assert!(line.contains("radius=8000"));
        assert!(line.contains("type=car_repair"));
    }

    #[test]
    fn test_nearby_status_error() {
        let (base, _rx) = test_server::serve_once(r#"{"status":"OVER_QUERY_LIMIT","results":[]}"#);
        let client = GooglePlaces::new(Some("key".into()), Duration::from_secs(5)).with_base_url(base);
        let err = client.nearby(GeoPoint::new(0.0, 0.0), 1000).unwrap_err();
        assert!(matches!(err, ProviderError::Status { ref status, .. } if status == "OVER_QUERY_LIMIT"));
    }
}
