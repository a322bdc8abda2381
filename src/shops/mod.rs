//! Nearby repair-shop lookup and ranking.

pub mod providers;
pub mod ranker;
pub mod synthetic;
pub mod types;

pub use providers::PlacesProvider;
pub use ranker::{fallback_shops, ShopRanker};
pub use types::{PlaceDetails, RawPlace, RepairShop};
