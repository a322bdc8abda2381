use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::estimate::{self, CostBreakdown, DamageAssessment};
use crate::geo::GeoPoint;
use crate::location::{default_location, directory_list, PlaceInfo, ResolvedLocation};
use crate::shops::{fallback_shops, RepairShop};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// Run blocking work off the async runtime under a deadline. Timeouts and
/// crashed tasks produce `fallback()`, the same as a provider error would.
async fn run_blocking<T, F, D>(deadline: Duration, work: F, fallback: D) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
    D: FnOnce() -> T,
{
    match tokio::time::timeout(deadline, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(error = %e, "blocking task failed, using fallback");
            fallback()
        }
        Err(_) => {
            warn!(deadline_ms = deadline.as_millis() as u64, "deadline elapsed, using fallback");
            fallback()
        }
    }
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ─── POST /api/estimate ──────────────────────────────────────────

pub async fn estimate(
    payload: Result<Json<DamageAssessment>, JsonRejection>,
) -> Result<Json<CostBreakdown>, ApiError> {
    let start = Instant::now();
    let Json(assessment) = payload
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid assessment: {}", e.body_text())))?;

    let breakdown = estimate::estimate(&assessment);

    info!(
        parts = breakdown.line_items.len(),
        midpoint = breakdown.midpoint,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /api/estimate"
    );
    Ok(Json(breakdown))
}

// ─── GET /api/locate ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LocateQuery {
    pub address: Option<String>,
}

pub async fn locate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocateQuery>,
) -> Result<Json<ResolvedLocation>, ApiError> {
    let start = Instant::now();
    let address = required_address(params.address)?;

    let resolved = resolve_address(&state, address.clone()).await;

    info!(
        address = %address,
        source = %resolved.source,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/locate"
    );
    Ok(Json(resolved))
}

// ─── GET /api/shops ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ShopsQuery {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopsResponse {
    /// Present when the query point came from an address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ResolvedLocation>,
    pub query: GeoPoint,
    pub shops: Vec<RepairShop>,
    pub generated_at: DateTime<Utc>,
}

pub async fn shops(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShopsQuery>,
) -> Result<Json<ShopsResponse>, ApiError> {
    let start = Instant::now();

    let (location, query) = match (params.lat, params.lng, params.address) {
        (Some(lat), Some(lng), _) => {
            let point = GeoPoint::new(lat, lng);
            if !point.is_valid() {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "Invalid coordinates. Lat: -90..90, Lng: -180..180",
                ));
            }
            (None, point)
        }
        (_, _, Some(address)) if !address.trim().is_empty() => {
            let resolved = resolve_address(&state, address).await;
            let point = resolved.point;
            (Some(resolved), point)
        }
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Provide 'address' or 'lat'+'lng' parameters",
            ))
        }
    };

    let radius = params.radius.unwrap_or(state.search_radius_meters);
    let worker = state.clone();
    let shops = run_blocking(
        state.deadline,
        move || worker.ranker.search(query, radius),
        || fallback_shops(query, &mut rand::rng()),
    )
    .await;

    info!(
        lat = query.lat,
        lng = query.lng,
        count = shops.len(),
        synthetic = shops.iter().any(|s| s.synthetic),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/shops"
    );

    Ok(Json(ShopsResponse {
        location,
        query,
        shops,
        generated_at: Utc::now(),
    }))
}

// ─── GET /api/directory ──────────────────────────────────────────

pub async fn directory() -> Json<Vec<PlaceInfo>> {
    Json(directory_list())
}

// ─── Helpers ─────────────────────────────────────────────────────

fn required_address(address: Option<String>) -> Result<String, ApiError> {
    match address {
        Some(a) if !a.trim().is_empty() => Ok(a),
        _ => Err(api_error(StatusCode::BAD_REQUEST, "Missing 'address' parameter")),
    }
}

async fn resolve_address(state: &Arc<AppState>, address: String) -> ResolvedLocation {
    let worker = state.clone();
    run_blocking(
        state.deadline,
        move || worker.resolver.resolve(&address),
        default_location,
    )
    .await
}
