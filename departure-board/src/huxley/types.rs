//! Huxley API response DTOs.
//!
//! These types map the Huxley JSON responses (a REST front-end for Darwin).
//! They are deliberately permissive: every field is optional and unknown
//! fields are ignored. A scalar of the wrong type decodes as `None`, and
//! collections are decoded element by element so one bad entry does not
//! take its neighbours with it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Response from `/departures/{from}/{rows}` and `/departures/{from}/to/{to}/{rows}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StationBoard {
    /// When this response was generated (ISO 8601 datetime).
    #[serde(deserialize_with = "lenient")]
    pub generated_at: Option<String>,

    /// Human-readable name of the station.
    #[serde(deserialize_with = "lenient")]
    pub location_name: Option<String>,

    /// CRS code of the station.
    #[serde(deserialize_with = "lenient")]
    pub crs: Option<String>,

    /// Train services at this station.
    #[serde(deserialize_with = "lenient_items")]
    pub train_services: Option<Vec<ServiceItem>>,
}

/// A service on the departure board.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceItem {
    /// Darwin service ID. Only valid while the service is on a board.
    #[serde(rename = "serviceID", deserialize_with = "lenient")]
    pub service_id: Option<String>,

    /// Retail Service ID (e.g., "GW123400").
    #[serde(deserialize_with = "lenient")]
    pub rsid: Option<String>,

    /// Scheduled time of arrival at this station.
    #[serde(deserialize_with = "lenient")]
    pub sta: Option<String>,

    /// Estimated time of arrival at this station.
    #[serde(deserialize_with = "lenient")]
    pub eta: Option<String>,

    /// Scheduled time of departure from this station.
    #[serde(deserialize_with = "lenient")]
    pub std: Option<String>,

    /// Estimated time of departure from this station.
    /// May be "On time", "Delayed", "Cancelled", or a time like "10:15".
    #[serde(deserialize_with = "lenient")]
    pub etd: Option<String>,

    /// Platform number/letter.
    #[serde(deserialize_with = "lenient")]
    pub platform: Option<String>,

    /// Train operating company name.
    #[serde(deserialize_with = "lenient")]
    pub operator: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub is_cancelled: Option<bool>,

    /// Origin station(s).
    #[serde(deserialize_with = "lenient_items")]
    pub origin: Option<Vec<ServiceLocation>>,

    /// Destination station(s).
    #[serde(deserialize_with = "lenient_items")]
    pub destination: Option<Vec<ServiceLocation>>,

    /// Subsequent calling points, present when `expand=true`.
    #[serde(deserialize_with = "lenient_items")]
    pub subsequent_calling_points: Option<Vec<CallingPointGroup>>,

    #[serde(deserialize_with = "lenient")]
    pub cancel_reason: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub delay_reason: Option<String>,
}

/// Response from `/service/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDetails {
    /// Train operating company name.
    #[serde(deserialize_with = "lenient")]
    pub operator: Option<String>,

    /// Subsequent calling points.
    #[serde(deserialize_with = "lenient_items")]
    pub subsequent_calling_points: Option<Vec<CallingPointGroup>>,
}

/// Wrapper for a list of calling points.
///
/// Darwin wraps calling points in this structure to support split/join
/// services, where multiple groups represent different portions of a train.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallingPointGroup {
    #[serde(deserialize_with = "lenient_items")]
    pub calling_point: Option<Vec<RawCallingPoint>>,
}

/// A single calling point (station stop).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCallingPoint {
    #[serde(deserialize_with = "lenient")]
    pub crs: Option<String>,
    /// Scheduled time.
    #[serde(deserialize_with = "lenient")]
    pub st: Option<String>,
    /// Estimated time.
    #[serde(deserialize_with = "lenient")]
    pub et: Option<String>,
    /// Actual time (only present after the train has called).
    #[serde(deserialize_with = "lenient")]
    pub at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub is_cancelled: Option<bool>,
}

/// Origin or destination location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceLocation {
    #[serde(deserialize_with = "lenient")]
    pub crs: Option<String>,
}

impl ServiceItem {
    /// Whether this service calls at (or terminates at) `crs`.
    pub fn calls_at(&self, crs: &str) -> bool {
        let matches = |code: Option<&String>| code.is_some_and(|c| c.eq_ignore_ascii_case(crs));

        let at_destination = self
            .destination
            .iter()
            .flatten()
            .any(|loc| matches(loc.crs.as_ref()));

        let at_subsequent = self
            .subsequent_calling_points
            .iter()
            .flatten()
            .filter_map(|group| group.calling_point.as_ref())
            .flatten()
            .any(|cp| matches(cp.crs.as_ref()));

        at_destination || at_subsequent
    }
}

/// Decode a value, yielding `None` when it has an unexpected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode an array, skipping elements with an unexpected shape. Anything
/// other than an array yields `None`.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(None);
    };

    let decoded = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed upstream item");
                None
            }
        })
        .collect();

    Ok(Some(decoded))
}
