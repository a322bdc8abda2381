//! JSON HTTP surface over the estimator, resolver and ranker.

mod handlers;
mod state;

pub use handlers::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::google::GooglePlaces;
use crate::location::LocationResolver;
use crate::shops::ShopRanker;

/// Extra time on top of the per-request provider timeout. A shop search makes
/// the nearby call and then the details calls, so it can take two timeouts.
const DEADLINE_SLACK_FACTOR: u32 = 2;

impl AppState {
    /// Live providers from `config`. With `offline`, only built-in data and
    /// synthetic shops are used.
    pub fn from_config(config: &Config, offline: bool) -> Self {
        let places = GooglePlaces::from_config(config);
        if !offline && !places.has_api_key() {
            warn!("no Google Places API key configured, every lookup will use fallback data");
        }

        let mut resolver = LocationResolver::new(places);
        resolver.set_offline(offline);
        let mut ranker = ShopRanker::new(GooglePlaces::from_config(config));
        ranker.set_offline(offline);

        Self {
            resolver,
            ranker,
            search_radius_meters: config.search_radius_meters,
            deadline: config.request_timeout().saturating_mul(DEADLINE_SLACK_FACTOR),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/estimate", post(handlers::estimate))
        .route("/api/locate", get(handlers::locate))
        .route("/api/shops", get(handlers::shops))
        .route("/api/directory", get(handlers::directory))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(config: &Config, offline: bool) -> std::io::Result<()> {
    let state = Arc::new(AppState::from_config(config, offline));
    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, offline, "repairscope server listening");
    axum::serve(listener, app).await
}
