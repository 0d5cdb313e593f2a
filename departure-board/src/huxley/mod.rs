//! Huxley client.
//!
//! Huxley is a JSON/REST front-end for the National Rail Darwin Live
//! Departure Boards service. This module wraps its departures and
//! service-detail endpoints.
//!
//! Key characteristics of the upstream:
//! - A single departures call returns only a handful of services, bounded
//!   by a time offset and a time window of at most 120 minutes
//! - Service IDs are **ephemeral** - only valid while the service appears
//!   on a departure board
//! - Times are "HH:MM" strings, or status text such as "On time"
//! - Fields are frequently omitted rather than sent as null

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, HuxleyClient, HuxleyConfig};
pub use convert::{UNKNOWN_PLATFORM, convert_calling_points, normalize_service};
pub use error::HuxleyError;
pub use mock::MockHuxleyClient;
pub use source::DepartureSource;
pub use types::{
    CallingPointGroup, RawCallingPoint, ServiceDetails, ServiceItem, ServiceLocation, StationBoard,
};
