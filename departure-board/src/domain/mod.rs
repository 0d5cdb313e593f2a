//! Domain types for the departure board.
//!
//! Everything here is request-scoped: built fresh for each incoming
//! request and discarded once the response is written.

mod board;
mod call;
mod service;
mod station;

pub use board::{DepartureBoard, MAX_WINDOW_MINS, MIN_WINDOW_MINS, TimeWindow, TimeWindowRequest};
pub use call::CallingPoint;
pub use service::{ServiceIdentity, ServiceRecord};
pub use station::{InvalidStationCode, StationCode};
