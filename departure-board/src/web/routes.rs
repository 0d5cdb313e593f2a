//! HTTP route handlers.

use std::path::Path as FsPath;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::board::{ServiceCallingPoints, get_calling_points, get_departure_board};
use crate::domain::{DepartureBoard, StationCode, TimeWindow, TimeWindowRequest};
use crate::huxley::{DepartureSource, HuxleyError};
use crate::stations::{Station, StationDirectory};

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Station shown when the index page is opened without one.
const DEFAULT_STATION: &str = "KGX";

/// Shortest query passed to station search.
const MIN_SEARCH_LEN: usize = 2;

/// Default and maximum number of station search results.
const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<S>(state: AppState<S>, static_dir: impl AsRef<FsPath>) -> Router
where
    S: DepartureSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index_page::<S>))
        .route("/health", get(health))
        .route("/api/departures/:station_code", get(departures::<S>))
        .route("/api/service/:service_id", get(service_details::<S>))
        .route("/api/stations", get(search_stations::<S>))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Board page for a station.
///
/// An unusable station code redirects to the default board.
async fn index_page<S>(
    State(state): State<AppState<S>>,
    Query(req): Query<IndexQuery>,
) -> Result<Response, ApiError>
where
    S: Send + Sync + 'static,
{
    let raw = req.station.unwrap_or_else(|| DEFAULT_STATION.to_string());
    let code = match StationCode::parse(&raw) {
        Ok(code) => code,
        Err(e) => {
            warn!(error = %e, "Redirecting board page for bad station");
            return Ok(Redirect::to("/").into_response());
        }
    };

    let template = IndexTemplate {
        station_name: state.stations.resolve_name(code.as_str()),
        station_code: code.to_string(),
    };
    let html = template.render().map_err(|e| ApiError::Board {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("Template error: {e}"),
    })?;

    Ok(Html(html).into_response())
}

/// Aggregated departure board.
async fn departures<S>(
    State(state): State<AppState<S>>,
    Path(station_code): Path<String>,
    Query(req): Query<DeparturesQuery>,
) -> Result<Json<DepartureBoard>, ApiError>
where
    S: DepartureSource + Send + Sync + 'static,
{
    let station = StationCode::parse(&station_code).map_err(|e| ApiError::Board {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })?;

    let filter_to = req
        .filter_to
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .map(StationCode::parse)
        .transpose()
        .map_err(|e| ApiError::Board {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        })?;

    // Non-numeric values fall back to the default window.
    let window = req
        .time_window
        .as_deref()
        .and_then(|w| w.trim().parse::<i64>().ok())
        .map(TimeWindow::clamped)
        .unwrap_or_default();

    let request = TimeWindowRequest { window, filter_to };

    let board =
        get_departure_board(state.upstream.as_ref(), state.stations.as_ref(), &station, &request)
            .await;

    Ok(Json(board))
}

/// Remaining calling points for one service.
async fn service_details<S>(
    State(state): State<AppState<S>>,
    Path(service_id): Path<String>,
    Query(req): Query<ServiceQuery>,
) -> Result<Json<ServiceCallingPoints>, ApiError>
where
    S: DepartureSource + Send + Sync + 'static,
{
    // The station is context only; an unparseable one is ignored.
    let from_station = req
        .station
        .as_deref()
        .and_then(|s| StationCode::parse(s).ok());

    let result = get_calling_points(
        state.upstream.as_ref(),
        state.stations.as_ref(),
        &service_id,
        from_station.as_ref(),
    )
    .await?;

    Ok(Json(result))
}

/// Search stations by name or code.
async fn search_stations<S>(
    State(state): State<AppState<S>>,
    Query(req): Query<StationSearchQuery>,
) -> Json<Vec<Station>>
where
    S: Send + Sync + 'static,
{
    if req.q.trim().chars().count() < MIN_SEARCH_LEN {
        return Json(Vec::new());
    }

    let limit = req
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);

    Json(state.stations.search(&req.q, limit))
}

/// API error type.
///
/// Each variant renders the error alongside the empty result collection of
/// its endpoint, so clients can always read the same field.
#[derive(Debug)]
pub enum ApiError {
    /// Departures (or board page) failure
    Board { status: StatusCode, message: String },
    /// Service detail failure
    Service { status: StatusCode, message: String },
}

impl From<HuxleyError> for ApiError {
    fn from(e: HuxleyError) -> Self {
        let status = match e {
            HuxleyError::ServiceNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::Service {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Board { status, .. } | ApiError::Service { status, .. } => *status,
        };

        if status.is_server_error() {
            error!(status = %status, error = ?self, "Request failed");
        } else {
            warn!(status = %status, error = ?self, "Request rejected");
        }

        match self {
            ApiError::Board { message, .. } => (
                status,
                Json(BoardErrorResponse {
                    error: message,
                    services: Vec::new(),
                }),
            )
                .into_response(),
            ApiError::Service { message, .. } => (
                status,
                Json(ServiceErrorResponse {
                    error: message,
                    calling_points: Vec::new(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::huxley::{
        CallingPointGroup, MockHuxleyClient, RawCallingPoint, ServiceDetails, ServiceItem,
        ServiceLocation, StationBoard,
    };
    use crate::stations::StationNames;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn service(id: &str, std: &str, dest: &str) -> ServiceItem {
        ServiceItem {
            service_id: Some(id.to_string()),
            std: Some(std.to_string()),
            destination: Some(vec![ServiceLocation {
                crs: Some(dest.to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    fn router() -> Router {
        let board = StationBoard {
            generated_at: Some("2024-03-15T10:30:00Z".into()),
            train_services: Some(vec![
                service("b", "10:40", "EDB"),
                service("a", "10:05", "YRK"),
            ]),
            ..Default::default()
        };

        let details = ServiceDetails {
            operator: Some("LNER".into()),
            subsequent_calling_points: Some(vec![CallingPointGroup {
                calling_point: Some(vec![RawCallingPoint {
                    crs: Some("YRK".into()),
                    st: Some("12:00".into()),
                    ..Default::default()
                }]),
            }]),
            ..Default::default()
        };

        let upstream = MockHuxleyClient::default()
            .with_board(code("KGX"), board)
            .with_service("a", details);

        let state = AppState::new(upstream, StationNames::builtin().unwrap());
        create_router(state, "static")
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_ok() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn departures_board() {
        let (status, json) = get_json("/api/departures/kgx?timeWindow=65").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["station"], "London Kings Cross");
        assert_eq!(json["stationCode"], "KGX");
        assert_eq!(json["generatedAt"], "2024-03-15T10:30:00Z");

        // Three identical mock windows collapse to one copy of each service.
        let services = json["services"].as_array().unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0]["serviceId"], "a");
        assert_eq!(services[0]["destination"], "York");
        assert_eq!(services[0]["platform"], "-");
        assert_eq!(services[1]["serviceId"], "b");
    }

    #[tokio::test]
    async fn departures_with_bad_time_window_uses_default() {
        let (status, json) = get_json("/api/departures/KGX?timeWindow=soon&filterTo=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["services"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn departures_filtered() {
        let (status, json) = get_json("/api/departures/KGX?filterTo=edb").await;

        assert_eq!(status, StatusCode::OK);
        let services = json["services"].as_array().unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0]["serviceId"], "b");
    }

    #[tokio::test]
    async fn departures_when_upstream_fails_is_empty_board() {
        let (status, json) = get_json("/api/departures/PAD").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["station"], "London Paddington");
        assert_eq!(json["generatedAt"], "");
        assert!(json["services"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn departures_invalid_code() {
        let (status, json) = get_json("/api/departures/K-X").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("invalid station code"));
        assert_eq!(json["services"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn service_calling_points() {
        let (status, json) = get_json("/api/service/a?station=KGX").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["serviceId"], "a");
        assert_eq!(json["operator"], "LNER");
        assert_eq!(json["callingPoints"][0]["station"], "York");
        assert_eq!(json["callingPoints"][0]["st"], "12:00");
    }

    #[tokio::test]
    async fn service_not_found() {
        let (status, json) = get_json("/api/service/expired").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].is_string());
        assert_eq!(json["callingPoints"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn station_search() {
        let (status, json) = get_json("/api/stations?q=kin").await;

        assert_eq!(status, StatusCode::OK);
        let results = json.as_array().unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().any(|s| s["code"] == "KGX"));
    }

    #[tokio::test]
    async fn station_search_short_query_is_empty() {
        let (_, json) = get_json("/api/stations?q=k").await;
        assert_eq!(json, Value::Array(vec![]));

        let (_, json) = get_json("/api/stations").await;
        assert_eq!(json, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn station_search_limit() {
        let (_, json) = get_json("/api/stations?q=london&limit=2").await;
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn station_search_bad_limit_uses_default() {
        let (status, json) = get_json("/api/stations?q=london&limit=abc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), DEFAULT_SEARCH_LIMIT);
    }

    #[tokio::test]
    async fn index_page_bad_station_redirects_home() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/?station=K-X")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()["location"], "/");
    }

    #[tokio::test]
    async fn index_page_renders_station() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/?station=yrk")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("York"));
        assert!(html.contains(r#"data-station="YRK""#));
    }
}
