//! Departure board aggregation.
//!
//! The upstream only returns a few services per call, so a board is built
//! from several bounded time-window queries that are merged, deduplicated,
//! and sorted.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{DepartureBoard, ServiceIdentity, StationCode, TimeWindowRequest};
use crate::huxley::{DepartureSource, normalize_service};
use crate::stations::StationDirectory;

use super::planner::{CHUNK_MINS, plan_chunks};

/// Build the departure board for `station`.
///
/// All chunks are fetched concurrently. A chunk that fails is logged and
/// skipped, so the board may be partial or empty, but this never fails.
///
/// Merging is keyed on chunk order, not completion order:
/// - `generated_at` is the first non-empty timestamp among successful
///   chunks, taken in chunk order.
/// - When the same service appears in several chunks, the earliest chunk's
///   record is kept and later ones are dropped whole.
///
/// Services are then stable-sorted by scheduled departure, with services
/// that have no scheduled departure last.
pub async fn get_departure_board<S, D>(
    source: &S,
    directory: &D,
    station: &StationCode,
    request: &TimeWindowRequest,
) -> DepartureBoard
where
    S: DepartureSource,
    D: StationDirectory + ?Sized,
{
    let chunks = plan_chunks(request.window, CHUNK_MINS);
    let filter_to = request.filter_to.as_ref();

    let results = join_all(chunks.iter().map(|chunk| {
        source.fetch_departures_chunk(station, chunk.offset, chunk.width, filter_to)
    }))
    .await;

    let mut generated_at: Option<String> = None;
    let mut seen: HashSet<ServiceIdentity> = HashSet::new();
    let mut services = Vec::new();
    let mut failed = 0usize;
    let mut duplicates = 0usize;

    for (chunk, result) in chunks.iter().zip(results) {
        let board = match result {
            Ok(board) => board,
            Err(e) => {
                warn!(
                    station = %station,
                    offset = chunk.offset,
                    width = chunk.width,
                    error = %e,
                    "Skipping failed departures chunk"
                );
                failed += 1;
                continue;
            }
        };

        if generated_at.is_none() {
            generated_at = board.generated_at.filter(|g| !g.is_empty());
        }

        for item in board.train_services.iter().flatten() {
            let record = normalize_service(item, directory);
            if seen.insert(record.identity()) {
                services.push(record);
            } else {
                duplicates += 1;
            }
        }
    }

    services.sort_by(|a, b| a.departure_sort_key().cmp(&b.departure_sort_key()));

    debug!(
        station = %station,
        window = request.window.mins(),
        filter_to = ?request.filter_to,
        chunks = chunks.len(),
        failed,
        duplicates,
        services = services.len(),
        "Built departure board"
    );

    DepartureBoard {
        station: directory.resolve_name(station.as_str()),
        station_code: station.clone(),
        generated_at: generated_at.unwrap_or_default(),
        services,
    }
}
