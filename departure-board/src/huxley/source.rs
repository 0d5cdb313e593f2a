//! Upstream capability used by the board aggregator.

use std::future::Future;

use crate::domain::StationCode;

use super::error::HuxleyError;
use super::types::{ServiceDetails, StationBoard};

/// Something that can answer bounded departure-board queries and
/// single-service lookups.
///
/// Implementations make exactly one upstream attempt per call. Retrying or
/// skipping failed calls is the caller's decision.
pub trait DepartureSource {
    /// Departures from `station` in the window `[offset, offset + width)`
    /// minutes from now, optionally restricted to services calling at
    /// `filter_to`.
    fn fetch_departures_chunk(
        &self,
        station: &StationCode,
        offset: u16,
        width: u16,
        filter_to: Option<&StationCode>,
    ) -> impl Future<Output = Result<StationBoard, HuxleyError>> + Send;

    /// Full details for one service, including its subsequent calling points.
    fn fetch_service_detail(
        &self,
        service_id: &str,
    ) -> impl Future<Output = Result<ServiceDetails, HuxleyError>> + Send;
}
