//! Remaining calling points for a single service.

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{CallingPoint, StationCode};
use crate::huxley::{DepartureSource, HuxleyError, convert_calling_points};
use crate::stations::StationDirectory;

/// Calling points for one service, as served to the board page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCallingPoints {
    pub service_id: String,
    pub operator: String,
    pub calling_points: Vec<CallingPoint>,
}

/// Fetch a service and flatten its subsequent calling points.
///
/// `from_station` is the board the user is looking at. It is recorded for
/// context only: every subsequent calling point is returned, including any
/// before `from_station`.
///
/// A missing or malformed calling-point list yields an empty list. Upstream
/// failures are returned as errors; there is no fallback for a single
/// service lookup.
pub async fn get_calling_points<S, D>(
    source: &S,
    directory: &D,
    service_id: &str,
    from_station: Option<&StationCode>,
) -> Result<ServiceCallingPoints, HuxleyError>
where
    S: DepartureSource,
    D: StationDirectory + ?Sized,
{
    let details = source
        .fetch_service_detail(service_id)
        .await
        .inspect_err(|e| {
            warn!(service_id, from = ?from_station, error = %e, "Service detail lookup failed");
        })?;

    let calling_points = convert_calling_points(&details, directory);

    debug!(
        service_id,
        from = ?from_station,
        calling_points = calling_points.len(),
        "Resolved calling points"
    );

    Ok(ServiceCallingPoints {
        service_id: service_id.to_string(),
        operator: details.operator.unwrap_or_default(),
        calling_points,
    })
}
