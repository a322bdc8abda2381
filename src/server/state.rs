use crate::location::LocationResolver;
use crate::shops::ShopRanker;
use std::time::Duration;

pub struct AppState {
    pub resolver: LocationResolver,
    pub ranker: ShopRanker,
    pub search_radius_meters: u32,
    /// Overall deadline for one blocking lookup, provider calls included.
    pub deadline: Duration,
}
