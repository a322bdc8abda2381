//! Placeholder shops used when no provider data is usable.
//!
//! The shape is fixed: five shops at fixed offsets around the query point
//! with fixed ratings. Open state and rating counts come from the supplied
//! random source.

use super::types::RepairShop;
use crate::geo::GeoPoint;
use rand::Rng;

pub const SYNTHETIC_SHOP_COUNT: usize = 5;

/// Probability that a synthetic shop reports as open.
pub const OPEN_PROBABILITY: f64 = 0.7;

pub const MIN_RATING_COUNT: u32 = 50;
pub const MAX_RATING_COUNT: u32 = 250;

struct Template {
    name: &'static str,
    address: &'static str,
    rating: f64,
    dlat: f64,
    dlng: f64,
}

const TEMPLATES: [Template; SYNTHETIC_SHOP_COUNT] = [
    Template { name: "Precision Auto Body", address: "120 Main St", rating: 4.7, dlat: 0.010, dlng: 0.015 },
    Template { name: "Elite Collision Center", address: "455 Oak Ave", rating: 4.5, dlat: -0.015, dlng: 0.020 },
    Template { name: "Main Street Auto Repair", address: "78 Market St", rating: 4.3, dlat: 0.020, dlng: -0.010 },
    Template { name: "Quality Body Shop", address: "902 Industrial Blvd", rating: 4.6, dlat: -0.010, dlng: -0.015 },
    Template { name: "Express Collision Repair", address: "31 Commerce Dr", rating: 4.4, dlat: 0.015, dlng: 0.010 },
];

/// Build the five synthetic shops around `origin`, in template order.
pub fn synthetic_shops<R: Rng + ?Sized>(origin: GeoPoint, rng: &mut R) -> Vec<RepairShop> {
    TEMPLATES
        .iter()
        .map(|t| {
            let location = origin.offset(t.dlat, t.dlng);
            RepairShop {
                name: t.name.to_string(),
                address: format!("{} (sample listing)", t.address),
                rating: t.rating,
                total_ratings: rng.random_range(MIN_RATING_COUNT..=MAX_RATING_COUNT),
                place_id: None,
                location,
                is_open: Some(rng.random_bool(OPEN_PROBABILITY)),
                price_level: None,
                distance_miles: origin.distance_miles(&location),
                phone: None,
                website: None,
                hours: None,
                synthetic: true,
            }
        })
        .collect()
}
