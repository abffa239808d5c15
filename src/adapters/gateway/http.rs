//! Gateway HTTP server.
//!
//! Relays the restaurant, activity, detail, hours and menu lookups to the
//! upstream API, and serves `/api/itinerary`, which runs the budget split and
//! sampler against freshly fetched pools.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::adapters::random::RngSource;
use crate::adapters::upstream::{SearchParams, UpstreamClient};
use crate::domain::errors::DomainError;
use crate::domain::models::{
    CategoryBudgets, CategoryRanges, History, Itinerary, Location, RecommendationRequest,
    ServerConfig,
};
use crate::services::RecommendationService;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure summary.
    pub error: String,
    /// Upstream body or underlying error, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            details: None,
        }),
    )
}

/// Reject ids that would not stay a single upstream path segment.
fn venue_id(id: &str) -> Result<&str, ApiError> {
    if id.is_empty() || id == "." || id == ".." || id.contains('/') {
        return Err(bad_request(format!("invalid id: {id}")));
    }
    Ok(id)
}

/// Map an upstream failure to the relayed status and `{error, details}`.
///
/// The upstream's own status is kept when there is one; the upstream body is
/// passed back as JSON when it parses, otherwise as a string.
fn upstream_error(context: &str, err: &DomainError) -> ApiError {
    error!(endpoint = context, error = %err, "upstream call failed");

    let status = err
        .upstream_status()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let details = match err {
        DomainError::Upstream { body, .. } => {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
        }
        other => Value::String(other.to_string()),
    };

    (
        status,
        Json(ErrorResponse {
            error: format!("Failed to fetch from upstream {context}"),
            details: Some(details),
        }),
    )
}

/// Body of `POST /api/itinerary`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryRequest {
    /// Latitude; required together with `lng`.
    pub lat: Option<f64>,
    /// Longitude; required together with `lat`.
    pub lng: Option<f64>,
    /// Total budget for the whole party.
    pub budget: u64,
    /// Party size.
    pub people: u32,
    /// Search radius in metres; the configured default when absent.
    #[serde(default)]
    pub radius: Option<u32>,
    /// Venues already shown to this client, excluded from the draw.
    #[serde(default)]
    pub history: History,
}

impl ItineraryRequest {
    fn to_request(&self) -> RecommendationRequest {
        let location = self.lat.zip(self.lng).map(|(lat, lng)| Location { lat, lng });
        RecommendationRequest {
            location,
            budget: self.budget,
            people: self.people,
            radius_m: self.radius,
        }
    }
}

/// Response of `POST /api/itinerary`.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    /// The drawn venues, one slot per category.
    pub itinerary: Itinerary,
    /// Per-category share of the total budget.
    pub budgets: CategoryBudgets,
    /// Accepted price range per category.
    pub ranges: CategoryRanges,
}

/// Shared, immutable handler state.
pub struct GatewayState {
    /// Client for the pass-through endpoints.
    pub upstream: UpstreamClient,
    /// Pool fetching and drawing for `/api/itinerary`.
    pub recommendations: RecommendationService,
    /// Radius used when a listing query leaves it out.
    pub default_radius_m: u32,
}

/// Gateway HTTP server.
pub struct GatewayServer {
    config: ServerConfig,
    state: Arc<GatewayState>,
}

impl GatewayServer {
    /// Wrap the handler state for serving.
    pub fn new(state: GatewayState, config: ServerConfig) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let app = Router::new()
            .route("/", get(root))
            .route("/api/ping", get(ping))
            .route("/api/restaurants", get(restaurants))
            .route("/api/activities", get(activities))
            // Both routes share the `{id}` segment: a place id for details, a
            // business id for hours.
            .route("/api/restaurant/{id}", get(restaurant_detail))
            .route("/api/restaurant/{id}/hours", get(restaurant_hours))
            .route("/api/menu", get(menu))
            .route("/api/itinerary", post(itinerary))
            .with_state(Arc::clone(&self.state));

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.serve_with_shutdown(std::future::pending::<()>()).await
    }

    /// Start the server, stopping gracefully when `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.build_router();

        info!(
            %addr,
            upstream = self.state.upstream.base_url(),
            "gateway listening"
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("gateway stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C, or on SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

// Handler functions

async fn root() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "daytrip gateway running" }))
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

/// Parse `lat`, `lng`, `radius` and `category_group` from a listing query.
fn search_params(
    query: &HashMap<String, String>,
    default_radius: u32,
) -> Result<SearchParams, ApiError> {
    let coord = |key: &str| query.get(key).filter(|v| !v.is_empty());
    let (Some(lat), Some(lng)) = (coord("lat"), coord("lng")) else {
        return Err(bad_request("lat and lng are required"));
    };

    let lat = lat
        .parse::<f64>()
        .map_err(|_| bad_request(format!("invalid lat: {lat}")))?;
    let lng = lng
        .parse::<f64>()
        .map_err(|_| bad_request(format!("invalid lng: {lng}")))?;

    let radius = match query.get("radius").filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| bad_request(format!("invalid radius: {raw}")))?,
        None => default_radius,
    };

    Ok(SearchParams {
        lat,
        lng,
        radius,
        category_group: query.get("category_group").filter(|v| !v.is_empty()).cloned(),
    })
}

async fn restaurants(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Value> {
    let params = search_params(&query, state.default_radius_m)?;
    state
        .upstream
        .restaurants(&params)
        .await
        .map(Json)
        .map_err(|e| upstream_error("/restaurants", &e))
}

async fn activities(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Value> {
    let params = search_params(&query, state.default_radius_m)?;
    state
        .upstream
        .activities(&params)
        .await
        .map(Json)
        .map_err(|e| upstream_error("/activities", &e))
}

async fn restaurant_detail(
    State(state): State<Arc<GatewayState>>,
    Path(place_id): Path<String>,
) -> ApiResult<Value> {
    let place_id = venue_id(&place_id)?;
    state
        .upstream
        .restaurant_detail(place_id)
        .await
        .map(Json)
        .map_err(|e| upstream_error("/restaurant/{place_id}", &e))
}

async fn restaurant_hours(
    State(state): State<Arc<GatewayState>>,
    Path(business_id): Path<String>,
) -> ApiResult<Value> {
    let business_id = venue_id(&business_id)?;
    state
        .upstream
        .restaurant_hours(business_id)
        .await
        .map(Json)
        .map_err(|e| upstream_error("/restaurant/{business_id}/hours", &e))
}

async fn menu(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> ApiResult<Value> {
    if !query
        .iter()
        .any(|(key, value)| key == "business_id" && !value.is_empty())
    {
        return Err(bad_request("Missing business_id parameter"));
    }

    state
        .upstream
        .menu(&query)
        .await
        .map(Json)
        .map_err(|e| upstream_error("/menu", &e))
}

async fn itinerary(
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<ItineraryRequest>, JsonRejection>,
) -> ApiResult<ItineraryResponse> {
    let Json(body) = body.map_err(|rejection| bad_request(rejection.body_text()))?;
    let batch = state
        .recommendations
        .prepare(&body.to_request())
        .await
        .map_err(|e| bad_request(e.to_string()))?;

    let mut history = body.history;
    let mut rng = RngSource::from_os();
    let itinerary = state.recommendations.draw(&batch, &mut history, &mut rng);

    info!(filled = itinerary.filled(), "itinerary served");
    Ok(Json(ItineraryResponse {
        itinerary,
        budgets: batch.budgets,
        ranges: batch.ranges,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_search_params_defaults_radius() {
        let params = search_params(&query(&[("lat", "37.5"), ("lng", "127")]), 5000).unwrap();
        assert_eq!(params.radius, 5000);
        assert!(params.category_group.is_none());
    }

    #[test]
    fn test_search_params_requires_coordinates() {
        let (status, body) = search_params(&query(&[("lat", "37.5")]), 5000).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "lat and lng are required");

        let (status, _) = search_params(&query(&[("lat", "x"), ("lng", "1")]), 5000).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_venue_id_rejects_path_escapes() {
        assert_eq!(venue_id("ChIJ-123").unwrap(), "ChIJ-123");
        for bad in ["", ".", "..", "../admin", "a/b"] {
            let (status, _) = venue_id(bad).unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        }
    }

    #[test]
    fn test_upstream_error_keeps_status_and_json_details() {
        let err = DomainError::Upstream {
            status: 404,
            body: r#"{"detail":"not found"}"#.to_string(),
        };
        let (status, Json(body)) = upstream_error("/menu", &err);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.details.unwrap()["detail"], "not found");
    }

    #[test]
    fn test_upstream_error_without_status_is_500() {
        let err = DomainError::UpstreamUnavailable("connection refused".to_string());
        let (status, Json(body)) = upstream_error("/restaurants", &err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.details.unwrap().as_str().unwrap().contains("refused"));
    }

    #[test]
    fn test_itinerary_request_location() {
        let body: ItineraryRequest =
            serde_json::from_str(r#"{"lat": 1.0, "budget": 100000, "people": 1}"#).unwrap();
        assert!(body.to_request().location.is_none());
        assert!(body.history.is_empty());
    }
}
