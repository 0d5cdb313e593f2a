//! Conversion from Huxley DTOs to domain types.
//!
//! Conversions never fail: an absent optional field becomes an empty
//! string (or `"-"` for the platform, `false` for flags).

use crate::domain::{CallingPoint, ServiceRecord};
use crate::stations::StationDirectory;

use super::types::{ServiceDetails, ServiceItem, ServiceLocation};

/// Placeholder shown when the platform is not known.
pub const UNKNOWN_PLATFORM: &str = "-";

/// Normalise one board service into a [`ServiceRecord`].
pub fn normalize_service<D>(item: &ServiceItem, directory: &D) -> ServiceRecord
where
    D: StationDirectory + ?Sized,
{
    let service_id = non_empty(&item.service_id)
        .or_else(|| non_empty(&item.rsid))
        .unwrap_or_default()
        .to_string();

    let platform = non_empty(&item.platform)
        .unwrap_or(UNKNOWN_PLATFORM)
        .to_string();

    ServiceRecord {
        service_id,
        sta: text(&item.sta),
        eta: text(&item.eta),
        std: text(&item.std),
        etd: text(&item.etd),
        platform,
        origin: first_location_name(item.origin.as_deref(), directory),
        destination: first_location_name(item.destination.as_deref(), directory),
        operator: text(&item.operator),
        is_cancelled: item.is_cancelled.unwrap_or(false),
        cancel_reason: text(&item.cancel_reason),
        delay_reason: text(&item.delay_reason),
    }
}

/// Flatten the first group of subsequent calling points, preserving order.
///
/// Services that split carry one group per portion; only the first (the
/// portion this board entry describes) is used.
pub fn convert_calling_points<D>(details: &ServiceDetails, directory: &D) -> Vec<CallingPoint>
where
    D: StationDirectory + ?Sized,
{
    let Some(points) = details
        .subsequent_calling_points
        .as_deref()
        .and_then(|groups| groups.first())
        .and_then(|group| group.calling_point.as_deref())
    else {
        return Vec::new();
    };

    points
        .iter()
        .map(|point| {
            let crs = text(&point.crs);
            CallingPoint {
                station: directory.resolve_name(&crs),
                crs,
                st: text(&point.st),
                et: text(&point.et),
                at: text(&point.at),
                is_cancelled: point.is_cancelled.unwrap_or(false),
            }
        })
        .collect()
}

/// Resolve the first location of an origin/destination list to a name.
fn first_location_name<D>(locations: Option<&[ServiceLocation]>, directory: &D) -> String
where
    D: StationDirectory + ?Sized,
{
    match locations.and_then(|l| l.first()) {
        Some(first) => directory.resolve_name(first.crs.as_deref().unwrap_or_default()),
        None => String::new(),
    }
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
