//! Location resolver: orchestrates the fallback chain.
//!
//! Flow: built-in directory → text-search provider → fixed default point.

use super::directory;
use super::providers::GeocodeProvider;
use super::types::{LocationSource, ResolvedLocation};
use crate::fallback::FallbackChain;
use crate::geo::GeoPoint;
use tracing::{debug, info};

/// Used when nothing else resolves.
pub const DEFAULT_POINT: GeoPoint = GeoPoint::new(37.7749, -122.4194);
pub const DEFAULT_ADDRESS: &str = "San Francisco, CA (default location)";

/// The location resolver with its fallback pipeline.
pub struct LocationResolver {
    geocoder: Box<dyn GeocodeProvider>,
    offline: bool,
}

impl LocationResolver {
    pub fn new(geocoder: impl GeocodeProvider + 'static) -> Self {
        Self {
            geocoder: Box::new(geocoder),
            offline: false,
        }
    }

    /// Set offline mode: skip the provider, use only the directory and default.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Resolve free-form address text. Never fails: provider errors,
    /// timeouts, malformed payloads and empty answers all end in the default.
    pub fn resolve(&self, address: &str) -> ResolvedLocation {
        if address.trim().is_empty() {
            debug!("blank address, using default location");
            return default_location();
        }

        let resolved = FallbackChain::new("location")
            .then("directory", || Ok(directory::lookup(address)))
            .then("provider", || {
                if self.offline {
                    return Ok(None);
                }
                let hit = self.geocoder.text_search(address)?;
                Ok(hit.map(|h| ResolvedLocation {
                    point: h.point,
                    formatted_address: h.formatted_address,
                    source: LocationSource::Provider,
                }))
            })
            .resolve_or(default_location);

        info!(
            address,
            source = %resolved.source,
            lat = resolved.point.lat,
            lng = resolved.point.lng,
            "location resolved"
        );
        resolved
    }
}

/// The fixed fallback location.
pub fn default_location() -> ResolvedLocation {
    ResolvedLocation {
        point: DEFAULT_POINT,
        formatted_address: DEFAULT_ADDRESS.to_string(),
        source: LocationSource::Default,
    }
}
