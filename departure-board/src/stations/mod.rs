//! Station directory.
//!
//! Provides station code → name mapping and name search, loaded once at
//! startup from a JSON station list.

mod directory;
mod error;
mod names;

pub use directory::{Station, StationDirectory};
pub use error::StationError;
pub use names::{StationDto, StationNames};
