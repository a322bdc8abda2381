//! Geographic primitives: points and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the lat/lng ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Shift by a fixed number of degrees on each axis.
    pub fn offset(&self, dlat: f64, dlng: f64) -> Self {
        Self {
            lat: self.lat + dlat,
            lng: self.lng + dlng,
        }
    }

    pub fn distance_miles(&self, other: &GeoPoint) -> f64 {
        distance_miles(*self, *other)
    }
}

/// Haversine distance between two points, in statute miles.
///
/// Symmetric in its arguments and exactly `0.0` for identical points.
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    // Absolute deltas keep the result bit-identical when a and b swap.
    let dlat = (b.lat - a.lat).abs().to_radians();
    let dlng = (b.lng - a.lng).abs().to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Clamp guards asin against rounding just above 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const CHICAGO: GeoPoint = GeoPoint::new(41.8781, -87.6298);
    const NEW_YORK: GeoPoint = GeoPoint::new(40.7128, -74.0060);

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_miles(CHICAGO, CHICAGO), 0.0);
    }

    #[test]
    fn test_chicago_new_york() {
        // Great-circle distance is roughly 711 miles.
        let d = distance_miles(CHICAGO, NEW_YORK);
        assert_relative_eq!(d, 711.0, epsilon = 5.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        assert_relative_eq!(distance_miles(a, b), 69.09, epsilon = 0.05);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        assert_relative_eq!(
            distance_miles(a, b),
            std::f64::consts::PI * EARTH_RADIUS_MILES,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_is_valid() {
        assert!(CHICAGO.is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let a = GeoPoint::new(lat1, lng1);
            let b = GeoPoint::new(lat2, lng2);
            prop_assert_eq!(distance_miles(a, b), distance_miles(b, a));
        }

        #[test]
        fn distance_to_self_is_zero(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let a = GeoPoint::new(lat, lng);
            prop_assert_eq!(distance_miles(a, a), 0.0);
        }

        #[test]
        fn distance_is_bounded(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let d = distance_miles(GeoPoint::new(lat1, lng1), GeoPoint::new(lat2, lng2));
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_MILES + 1e-6);
        }
    }
}
