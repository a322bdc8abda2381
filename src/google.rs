//! Blocking client for the Google Places web service.
//!
//! One `ureq::Agent` carries the request deadline for every call; the
//! location and shop providers build on the `get` helper here.

use crate::config::Config;
use crate::fallback::ProviderError;
use crate::geo::GeoPoint;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

const USER_AGENT: &str = concat!("repairscope/", env!("CARGO_PKG_VERSION"));

/// Places API client. Cheap to share behind `&` across threads.
pub struct GooglePlaces {
    agent: ureq::Agent,
    api_key: Option<String>,
    base_url: String,
}

impl GooglePlaces {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.google_api_key.clone(), config.request_timeout())
    }

    /// Point the client at another host (a proxy, or a local test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// GET `{base}/{endpoint}/json` with query params plus the API key.
    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = format!("{}/{}/json", self.base_url, endpoint);

        let mut request = self.agent.get(&url);
        for (name, value) in params {
            request = request.query(name, value);
        }

        debug!(endpoint, "places request");
        let response = request.query("key", key).call()?;
        let body = response.into_json::<T>()?;
        Ok(body)
    }
}

/// Map a Places `status` field to success or a provider error.
///
/// `ZERO_RESULTS` is a successful empty answer.
pub(crate) fn check_status(status: &str, error_message: Option<&str>) -> Result<(), ProviderError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(ProviderError::Status {
            status: other.to_string(),
            message: error_message.map(str::to_string),
        }),
    }
}

/// Envelope of the list endpoints (text search, nearby search).
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse<T> {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> SearchResponse<T> {
    pub fn into_results(self) -> Result<Vec<T>, ProviderError> {
        check_status(&self.status, self.error_message.as_deref())?;
        Ok(self.results)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(ll: LatLng) -> Self {
        GeoPoint::new(ll.lat, ll.lng)
    }
}
