//! Calling point types.

use serde::Serialize;

/// One stop on the remainder of a service's itinerary.
///
/// Time strings are copied verbatim from upstream; any of them may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingPoint {
    /// Station display name.
    pub station: String,
    /// Station code as reported upstream.
    pub crs: String,
    /// Scheduled time.
    pub st: String,
    /// Expected time.
    pub et: String,
    /// Actual time, once the train has called.
    pub at: String,
    pub is_cancelled: bool,
}
