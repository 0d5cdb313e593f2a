//! Train service types.
//!
//! A `ServiceRecord` is the canonical, display-ready snapshot of one service
//! on a departure board. Times are kept exactly as the upstream reported
//! them ("10:45", "On time", "Delayed", ...); nothing here parses them.

use serde::Serialize;

/// One train service as shown on a departure board.
///
/// Absent upstream fields are represented as empty strings (or `"-"` for
/// the platform), never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    /// Upstream service ID, or the retail service ID when that is missing.
    /// Empty when neither was supplied.
    pub service_id: String,
    /// Scheduled time of arrival.
    pub sta: String,
    /// Estimated time of arrival.
    pub eta: String,
    /// Scheduled time of departure.
    pub std: String,
    /// Estimated time of departure.
    pub etd: String,
    /// Platform, or `"-"` when unknown.
    pub platform: String,
    /// Origin station display name.
    pub origin: String,
    /// Destination station display name.
    pub destination: String,
    /// Train operating company name.
    pub operator: String,
    pub is_cancelled: bool,
    pub cancel_reason: String,
    pub delay_reason: String,
}

impl ServiceRecord {
    /// The deduplication key for this record.
    pub fn identity(&self) -> ServiceIdentity {
        if self.service_id.is_empty() {
            ServiceIdentity::Composite {
                std: self.std.clone(),
                destination: self.destination.clone(),
            }
        } else {
            ServiceIdentity::Id(self.service_id.clone())
        }
    }

    /// Sort key for board ordering.
    ///
    /// Records without a scheduled departure sort after every record that
    /// has one.
    pub fn departure_sort_key(&self) -> (bool, &str) {
        (self.std.is_empty(), &self.std)
    }
}

/// Identity of a service within one aggregated board.
///
/// Two records with the same identity are the same service seen in more
/// than one time window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceIdentity {
    /// Upstream-provided identifier.
    Id(String),
    /// Scheduled departure plus destination, for records with no identifier.
    Composite { std: String, destination: String },
}
