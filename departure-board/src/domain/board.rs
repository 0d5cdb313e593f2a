//! Departure board types.

use serde::Serialize;

use super::{ServiceRecord, StationCode};

/// Largest lookahead the upstream accepts, in minutes.
pub const MAX_WINDOW_MINS: u16 = 120;

/// Smallest lookahead, in minutes.
pub const MIN_WINDOW_MINS: u16 = 1;

/// Total lookahead for a board, always within
/// [`MIN_WINDOW_MINS`, `MAX_WINDOW_MINS`].
///
/// Out-of-range input is clamped rather than rejected.
///
/// ```
/// use departure_board::domain::TimeWindow;
///
/// assert_eq!(TimeWindow::clamped(0).mins(), 1);
/// assert_eq!(TimeWindow::clamped(65).mins(), 65);
/// assert_eq!(TimeWindow::clamped(500).mins(), 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeWindow(u16);

impl TimeWindow {
    pub fn clamped(mins: i64) -> Self {
        let mins = mins.clamp(i64::from(MIN_WINDOW_MINS), i64::from(MAX_WINDOW_MINS));
        // In range after the clamp above.
        Self(mins as u16)
    }

    pub fn mins(self) -> u16 {
        self.0
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self(MAX_WINDOW_MINS)
    }
}

/// A request for a departure board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindowRequest {
    /// How far ahead to look.
    pub window: TimeWindow,
    /// Only include services calling at this station.
    pub filter_to: Option<StationCode>,
}

impl TimeWindowRequest {
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            filter_to: None,
        }
    }

    pub fn with_filter_to(mut self, filter_to: StationCode) -> Self {
        self.filter_to = Some(filter_to);
        self
    }
}

/// The aggregated departure board for a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureBoard {
    /// Station display name.
    pub station: String,
    pub station_code: StationCode,
    /// Upstream generation timestamp from the first successful window, or
    /// empty if no window succeeded.
    pub generated_at: String,
    /// Services ordered by scheduled departure.
    pub services: Vec<ServiceRecord>,
}
