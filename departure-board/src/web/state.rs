//! Application state for the web layer.

use std::sync::Arc;

use crate::stations::StationNames;

/// Shared application state.
///
/// Generic over the upstream so the same routes serve live data, offline
/// mock data, or a test double.
pub struct AppState<S> {
    /// Upstream departures source
    pub upstream: Arc<S>,

    /// Station name lookup, read-only after startup
    pub stations: Arc<StationNames>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(upstream: S, stations: StationNames) -> Self {
        Self {
            upstream: Arc::new(upstream),
            stations: Arc::new(stations),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            upstream: Arc::clone(&self.upstream),
            stations: Arc::clone(&self.stations),
        }
    }
}
