//! Station directory error types.

use std::path::PathBuf;

/// Errors that can occur when loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The station list file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The station list was not valid JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The station list contained no usable stations
    #[error("station list is empty")]
    Empty,
}
