//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CallingPoint, ServiceRecord};

/// Query string for `/api/departures/{stationCode}`.
///
/// Both fields are taken as raw strings so that a malformed value falls
/// back to a default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesQuery {
    /// Lookahead in minutes, clamped to 1..=120 (defaults to 120)
    pub time_window: Option<String>,

    /// Only show services calling at this station
    pub filter_to: Option<String>,
}

/// Query string for `/api/service/{serviceId}`.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceQuery {
    /// Station whose board the service was picked from
    pub station: Option<String>,
}

/// Query string for `/api/stations`.
#[derive(Debug, Default, Deserialize)]
pub struct StationSearchQuery {
    /// Search text (name or code)
    #[serde(default)]
    pub q: String,

    /// Maximum results (defaults to 10, capped at 50). Taken raw so a
    /// malformed value falls back to the default.
    pub limit: Option<String>,
}

/// Query string for the index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub station: Option<String>,
}

/// Error body for the departures endpoint.
#[derive(Debug, Serialize)]
pub struct BoardErrorResponse {
    /// Error message
    pub error: String,
    /// Always empty
    pub services: Vec<ServiceRecord>,
}

/// Error body for the service endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceErrorResponse {
    /// Error message
    pub error: String,
    /// Always empty
    pub calling_points: Vec<CallingPoint>,
}
