//! Shop ranker: provider venues → filtered, enriched, distance-sorted shops.
//!
//! Anything short of at least one usable shop resolves to the synthetic
//! shops instead of an error.

use super::providers::PlacesProvider;
use super::synthetic::synthetic_shops;
use super::types::{PlaceDetails, RawPlace, RepairShop};
use crate::fallback::{FallbackChain, ProviderError};
use crate::geo::GeoPoint;
use rand::Rng;
use std::thread;
use tracing::{debug, info};

/// Name fragments that mark a venue as a repair shop (matched case-insensitively).
pub const SHOP_KEYWORDS: &[&str] = &["auto", "collision", "body", "repair"];

pub const MAX_SHOPS: usize = 5;

pub fn is_repair_shop(name: &str) -> bool {
    let name = name.to_lowercase();
    SHOP_KEYWORDS.iter().any(|k| name.contains(k))
}

/// Ascending by distance. Stable, so ties keep their prior order.
pub fn sort_by_distance(shops: &mut [RepairShop]) {
    shops.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
}

/// Synthetic shops around `query`, sorted by distance.
pub fn fallback_shops<R: Rng + ?Sized>(query: GeoPoint, rng: &mut R) -> Vec<RepairShop> {
    let mut shops = synthetic_shops(query, rng);
    sort_by_distance(&mut shops);
    shops
}

pub struct ShopRanker {
    places: Box<dyn PlacesProvider>,
    offline: bool,
}

impl ShopRanker {
    pub fn new(places: impl PlacesProvider + 'static) -> Self {
        Self {
            places: Box::new(places),
            offline: false,
        }
    }

    /// Offline mode: never call the provider, always return synthetic shops.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Nearby search around `query`, then [`rank`](Self::rank).
    pub fn search(&self, query: GeoPoint, radius_meters: u32) -> Vec<RepairShop> {
        let raw = if self.offline {
            Err(ProviderError::Network("offline mode".into()))
        } else {
            self.places.nearby(query, radius_meters)
        };
        self.rank(query, raw)
    }

    /// Rank raw provider results using the thread-local random source for
    /// any synthetic fallback.
    pub fn rank(&self, query: GeoPoint, raw: Result<Vec<RawPlace>, ProviderError>) -> Vec<RepairShop> {
        self.rank_with_rng(query, raw, &mut rand::rng())
    }

    pub fn rank_with_rng<R: Rng + ?Sized>(
        &self,
        query: GeoPoint,
        raw: Result<Vec<RawPlace>, ProviderError>,
        rng: &mut R,
    ) -> Vec<RepairShop> {
        let shops = FallbackChain::new("shops")
            .then("provider", || self.rank_candidates(query, raw?))
            .resolve_or(|| fallback_shops(query, rng));

        info!(
            count = shops.len(),
            synthetic = shops.iter().any(|s| s.synthetic),
            nearest_miles = shops.first().map(|s| s.distance_miles),
            "shops ranked"
        );
        shops
    }

    fn rank_candidates(
        &self,
        query: GeoPoint,
        places: Vec<RawPlace>,
    ) -> Result<Option<Vec<RepairShop>>, ProviderError> {
        let total = places.len();
        let candidates: Vec<RawPlace> = places
            .into_iter()
            .filter(|p| is_repair_shop(p.display_name()))
            .take(MAX_SHOPS)
            .collect();
        debug!(total, kept = candidates.len(), "filtered provider venues");

        if candidates.is_empty() {
            return Ok(None);
        }

        let mut shops = candidates
            .into_iter()
            .map(|p| p.into_shop(query))
            .collect::<Result<Vec<_>, _>>()?;

        self.enrich(&mut shops)?;
        sort_by_distance(&mut shops);
        Ok(Some(shops))
    }

    /// Fetch details for every shop concurrently. A failed lookup leaves that
    /// shop's contact fields unset; only a crashed worker is an error.
    fn enrich(&self, shops: &mut [RepairShop]) -> Result<(), ProviderError> {
        let results: Vec<thread::Result<Option<Result<PlaceDetails, ProviderError>>>> =
            thread::scope(|scope| {
                let handles: Vec<_> = shops
                    .iter()
                    .map(|shop| {
                        let place_id = shop.place_id.clone();
                        scope.spawn(move || place_id.map(|id| self.places.details(&id)))
                    })
                    .collect();
                handles.into_iter().map(|h| h.join()).collect()
            });

        for (shop, result) in shops.iter_mut().zip(results) {
            match result {
                Ok(Some(Ok(details))) => shop.apply_details(details),
                Ok(Some(Err(e))) => {
                    debug!(shop = %shop.name, error = %e, "details lookup failed");
                }
                Ok(None) => {}
                Err(_) => {
                    return Err(ProviderError::InvalidResponse(format!(
                        "details worker for '{}' panicked",
                        shop.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shops::synthetic::{MAX_RATING_COUNT, MIN_RATING_COUNT, SYNTHETIC_SHOP_COUNT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const ORIGIN: GeoPoint = GeoPoint::new(41.8781, -87.6298);

    #[derive(Clone)]
    enum DetailReply {
        Found(PlaceDetails),
        Fail,
        Panic,
    }

    #[derive(Default)]
    struct FakePlaces {
        nearby: Option<Vec<RawPlace>>,
        details: HashMap<String, DetailReply>,
        detail_calls: Arc<AtomicUsize>,
    }

    impl PlacesProvider for FakePlaces {
        fn nearby(&self, _center: GeoPoint, _radius: u32) -> Result<Vec<RawPlace>, ProviderError> {
            self.nearby
                .clone()
                .ok_or_else(|| ProviderError::Status { status: "REQUEST_DENIED".into(), message: None })
        }

        fn details(&self, place_id: &str) -> Result<PlaceDetails, ProviderError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            match self.details.get(place_id) {
                Some(DetailReply::Found(d)) => Ok(d.clone()),
                Some(DetailReply::Panic) => panic!("details exploded"),
                Some(DetailReply::Fail) | None => Err(ProviderError::Timeout),
            }
        }
    }

    fn phone(p: &str) -> DetailReply {
        DetailReply::Found(PlaceDetails {
            phone: Some(p.to_string()),
            ..Default::default()
        })
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn assert_synthetic(shops: &[RepairShop]) {
        assert_eq!(shops.len(), SYNTHETIC_SHOP_COUNT);
        assert!(shops.iter().all(|s| s.synthetic));
        assert!(shops.iter().all(|s| s.distance_miles >= 0.0));
        assert!(shops
            .iter()
            .all(|s| (MIN_RATING_COUNT..=MAX_RATING_COUNT).contains(&s.total_ratings)));
        assert!(shops.windows(2).all(|w| w[0].distance_miles <= w[1].distance_miles));
    }

    #[test]
    fn test_keyword_filter() {
        assert!(is_repair_shop("Ace AUTO Care"));
        assert!(is_repair_shop("Northside Collision"));
        assert!(is_repair_shop("Bob's Body Works"));
        assert!(is_repair_shop("Quick Repair"));
        assert!(!is_repair_shop("Joe's Pizza"));
        assert!(!is_repair_shop(""));
    }

    #[test]
    fn test_provider_failure_yields_five_sorted_synthetic() {
        let ranker = ShopRanker::new(FakePlaces::default());
        let shops = ranker.rank_with_rng(ORIGIN, Err(ProviderError::Timeout), &mut rng());
        assert_synthetic(&shops);
    }

    #[test]
    fn test_search_with_denied_status_falls_back() {
        let shops = ShopRanker::new(FakePlaces::default()).search(ORIGIN, 5000);
        assert_synthetic(&shops);
    }

    #[test]
    fn test_offline_search_falls_back() {
        let places = FakePlaces {
            nearby: Some(vec![RawPlace::at("Ace Auto", None, ORIGIN)]),
            ..Default::default()
        };
        let mut ranker = ShopRanker::new(places);
        ranker.set_offline(true);
        assert_synthetic(&ranker.search(ORIGIN, 5000));
    }

    #[test]
    fn test_non_matching_venue_excluded_even_if_closest() {
        let raw = vec![
            RawPlace::at("Joe's Pizza", Some("pizza"), ORIGIN),
            RawPlace::at("Lakeview Collision", Some("c1"), ORIGIN.offset(0.02, 0.0)),
        ];
        let shops = ShopRanker::new(FakePlaces::default()).rank_with_rng(ORIGIN, Ok(raw), &mut rng());
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].name, "Lakeview Collision");
        assert!(!shops[0].synthetic);
    }

    #[test]
    fn test_nothing_usable_falls_back() {
        let raw = vec![
            RawPlace::at("Joe's Pizza", None, ORIGIN),
            RawPlace::at("Corner Bakery", None, ORIGIN),
        ];
        let shops = ShopRanker::new(FakePlaces::default()).rank_with_rng(ORIGIN, Ok(raw), &mut rng());
        assert_synthetic(&shops);
        assert!(shops.iter().all(|s| s.name != "Joe's Pizza"));
    }

    #[test]
    fn test_empty_success_falls_back() {
        let shops = ShopRanker::new(FakePlaces::default()).rank_with_rng(ORIGIN, Ok(vec![]), &mut rng());
        assert_synthetic(&shops);
    }

    #[test]
    fn test_truncates_to_five_in_provider_order_then_sorts() {
        // Seven matches; the sixth and seventh are closest but must be dropped.
        let raw: Vec<RawPlace> = [0.05, 0.04, 0.03, 0.02, 0.01, 0.001, 0.0]
            .iter()
            .enumerate()
            .map(|(i, d)| RawPlace::at(&format!("Shop {} Auto", i), None, ORIGIN.offset(*d, 0.0)))
            .collect();
        let shops = ShopRanker::new(FakePlaces::default()).rank_with_rng(ORIGIN, Ok(raw), &mut rng());
        let names: Vec<&str> = shops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Shop 4 Auto", "Shop 3 Auto", "Shop 2 Auto", "Shop 1 Auto", "Shop 0 Auto"]);
    }

    #[test]
    fn test_ties_keep_provider_order() {
        let raw = vec![
            RawPlace::at("B Auto", None, ORIGIN.offset(0.01, 0.0)),
            RawPlace::at("A Auto", None, ORIGIN.offset(0.01, 0.0)),
        ];
        let shops = ShopRanker::new(FakePlaces::default()).rank_with_rng(ORIGIN, Ok(raw), &mut rng());
        assert_eq!(shops[0].name, "B Auto");
        assert_eq!(shops[1].name, "A Auto");
    }

    #[test]
    fn test_enrichment_is_best_effort() {
        let mut details = HashMap::new();
        details.insert("ok".to_string(), phone("555-0101"));
        details.insert("bad".to_string(), DetailReply::Fail);
        let calls = Arc::new(AtomicUsize::new(0));
        let places = FakePlaces {
            nearby: None,
            details,
            detail_calls: calls.clone(),
        };
        let raw = vec![
            RawPlace::at("Good Auto", Some("ok"), ORIGIN.offset(0.01, 0.0)),
            RawPlace::at("Flaky Body Shop", Some("bad"), ORIGIN.offset(0.02, 0.0)),
            RawPlace::at("No Id Repair", None, ORIGIN.offset(0.03, 0.0)),
        ];
        let shops = ShopRanker::new(places).rank_with_rng(ORIGIN, Ok(raw), &mut rng());
        assert_eq!(shops.len(), 3);
        assert_eq!(shops[0].phone.as_deref(), Some("555-0101"));
        assert_eq!(shops[1].name, "Flaky Body Shop");
        assert_eq!(shops[1].phone, None);
        assert_eq!(shops[2].phone, None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_malformed_candidate_falls_back() {
        let mut broken = RawPlace::at("Broken Collision", None, ORIGIN);
        broken.geometry = None;
        let raw = vec![RawPlace::at("Fine Auto", None, ORIGIN), broken];
        let shops = ShopRanker::new(FakePlaces::default()).rank_with_rng(ORIGIN, Ok(raw), &mut rng());
        assert_synthetic(&shops);
    }

    #[test]
    fn test_panicking_details_worker_falls_back() {
        let mut details = HashMap::new();
        details.insert("boom".to_string(), DetailReply::Panic);
        let places = FakePlaces {
            details,
            ..Default::default()
        };
        let raw = vec![RawPlace::at("Boom Auto", Some("boom"), ORIGIN)];
        let shops = ShopRanker::new(places).rank_with_rng(ORIGIN, Ok(raw), &mut rng());
        assert_synthetic(&shops);
    }

    #[test]
    fn test_search_uses_provider_results() {
        let places = FakePlaces {
            nearby: Some(vec![
                RawPlace::at("Far Auto", None, ORIGIN.offset(0.05, 0.0)),
                RawPlace::at("Near Body", None, ORIGIN.offset(0.001, 0.0)),
            ]),
            ..Default::default()
        };
        let shops = ShopRanker::new(places).search(ORIGIN, 5000);
        assert_eq!(shops.len(), 2);
        assert_eq!(shops[0].name, "Near Body");
        assert!(shops.iter().all(|s| !s.synthetic));
    }
}
