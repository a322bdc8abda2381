//! Repair-shop types: provider payloads and the ranked output.

use crate::fallback::ProviderError;
use crate::geo::GeoPoint;
use crate::google::Geometry;
use serde::{Deserialize, Serialize};

/// A candidate repair shop, with distance from the query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairShop {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub total_ratings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub location: GeoPoint,
    /// `None` when the provider does not know the opening state.
    pub is_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    pub distance_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<Vec<String>>,
    /// True for placeholder shops generated when no provider data was usable.
    #[serde(default)]
    pub synthetic: bool,
}

impl RepairShop {
    pub fn apply_details(&mut self, details: PlaceDetails) {
        self.phone = details.phone.or(self.phone.take());
        self.website = details.website.or(self.website.take());
        self.hours = details.hours.or(self.hours.take());
    }
}

/// Contact details fetched per candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetails {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub hours: Option<Vec<String>>,
}

// ─── Provider payloads ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Option<Vec<String>>,
}

/// One venue from a nearby search, as the provider returned it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub(crate) geometry: Option<Geometry>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub price_level: Option<u8>,
}

impl RawPlace {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Coordinates of the venue, when present.
    pub fn point(&self) -> Option<GeoPoint> {
        self.geometry.as_ref().map(|g| g.location.into())
    }

    /// Convert to a shop measured from `origin`. Missing or out-of-range
    /// coordinates make the payload unusable.
    pub fn into_shop(self, origin: GeoPoint) -> Result<RepairShop, ProviderError> {
        let location = self
            .point()
            .filter(GeoPoint::is_valid)
            .ok_or_else(|| {
                ProviderError::InvalidResponse(format!(
                    "place '{}' has no usable geometry",
                    self.display_name()
                ))
            })?;

        Ok(RepairShop {
            name: self.name.unwrap_or_default(),
            address: self
                .vicinity
                .or(self.formatted_address)
                .unwrap_or_else(|| "Address unavailable".to_string()),
            rating: self.rating.unwrap_or(0.0),
            total_ratings: self.user_ratings_total.unwrap_or(0),
            place_id: self.place_id,
            location,
            is_open: self.opening_hours.and_then(|h| h.open_now),
            price_level: self.price_level,
            distance_miles: origin.distance_miles(&location),
            phone: None,
            website: None,
            hours: None,
            synthetic: false,
        })
    }
}

#[cfg(test)]
impl RawPlace {
    pub(crate) fn at(name: &str, place_id: Option<&str>, point: GeoPoint) -> Self {
        Self {
            name: Some(name.to_string()),
            vicinity: Some(format!("{} address", name)),
            rating: Some(4.0),
            user_ratings_total: Some(10),
            place_id: place_id.map(str::to_string),
            geometry: Some(Geometry {
                location: crate::google::LatLng {
                    lat: point.lat,
                    lng: point.lng,
                },
            }),
            ..Default::default()
        }
    }
}
