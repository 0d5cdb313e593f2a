//! Station directory capability.

use serde::Serialize;

/// A station as returned by directory search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub code: String,
    pub name: String,
}

/// Maps station codes to display names and searches stations.
///
/// The board code depends only on this trait, so it can be exercised
/// against a fake directory without touching the filesystem.
pub trait StationDirectory {
    /// Display name for a station code.
    ///
    /// Unknown codes resolve to the code itself. The empty code resolves to
    /// the empty string.
    fn resolve_name(&self, code: &str) -> String;

    /// Stations whose code or name matches `query`, best matches first.
    fn search(&self, query: &str, limit: usize) -> Vec<Station>;
}
