//! Mock Huxley client for running without upstream access.
//!
//! Loads sample departure boards and service details from JSON files and
//! serves them as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::StationCode;

use super::error::HuxleyError;
use super::source::DepartureSource;
use super::types::{ServiceDetails, StationBoard};

/// Mock Huxley client that serves data from memory.
///
/// Boards are static: every time window returns the same board, which the
/// aggregator then deduplicates.
#[derive(Debug, Clone, Default)]
pub struct MockHuxleyClient {
    boards: Arc<HashMap<StationCode, StationBoard>>,
    services: Arc<HashMap<String, ServiceDetails>>,
}

impl MockHuxleyClient {
    /// Load mock data from a directory.
    ///
    /// Expects `boards/{CODE}.json` (e.g., `boards/PAD.json`) and,
    /// optionally, `services/{serviceId}.json`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, HuxleyError> {
        let data_dir = data_dir.as_ref();

        let boards: HashMap<StationCode, StationBoard> = load_json_files(&data_dir.join("boards"))?
            .into_iter()
            .map(|(stem, board)| {
                let code = StationCode::parse(&stem).map_err(|_| {
                    HuxleyError::MockData(format!("Invalid station code in filename: {stem}"))
                })?;
                Ok((code, board))
            })
            .collect::<Result<_, HuxleyError>>()?;

        if boards.is_empty() {
            return Err(HuxleyError::MockData(format!(
                "No mock board files found in {:?}",
                data_dir.join("boards")
            )));
        }

        let services_dir = data_dir.join("services");
        let services: HashMap<String, ServiceDetails> = if services_dir.is_dir() {
            load_json_files(&services_dir)?.into_iter().collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            boards: Arc::new(boards),
            services: Arc::new(services),
        })
    }

    /// Add a board for a station.
    pub fn with_board(mut self, code: StationCode, board: StationBoard) -> Self {
        Arc::make_mut(&mut self.boards).insert(code, board);
        self
    }

    /// Add service details for a service ID.
    pub fn with_service(mut self, service_id: impl Into<String>, details: ServiceDetails) -> Self {
        Arc::make_mut(&mut self.services).insert(service_id.into(), details);
        self
    }

    /// List available stations in the mock data.
    pub fn available_stations(&self) -> Vec<StationCode> {
        let mut codes: Vec<_> = self.boards.keys().cloned().collect();
        codes.sort();
        codes
    }
}

impl DepartureSource for MockHuxleyClient {
    async fn fetch_departures_chunk(
        &self,
        station: &StationCode,
        _offset: u16,
        _width: u16,
        filter_to: Option<&StationCode>,
    ) -> Result<StationBoard, HuxleyError> {
        let board = self
            .boards
            .get(station)
            .ok_or_else(|| HuxleyError::ApiError {
                status: 404,
                message: format!(
                    "No mock data for station {}. Available: {:?}",
                    station,
                    self.available_stations()
                ),
            })?;

        let mut board = board.clone();
        if let (Some(to), Some(services)) = (filter_to, board.train_services.as_mut()) {
            services.retain(|s| s.calls_at(to.as_str()));
        }

        Ok(board)
    }

    async fn fetch_service_detail(&self, service_id: &str) -> Result<ServiceDetails, HuxleyError> {
        self.services
            .get(service_id)
            .cloned()
            .ok_or(HuxleyError::ServiceNotFound)
    }
}

/// Read every `*.json` file in `dir`, keyed by file stem.
fn load_json_files<T: DeserializeOwned>(dir: &Path) -> Result<Vec<(String, T)>, HuxleyError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        HuxleyError::MockData(format!("Failed to read mock data directory {dir:?}: {e}"))
    })?;

    let mut loaded = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| HuxleyError::MockData(format!("Failed to read directory entry: {e}")))?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| HuxleyError::MockData(format!("Invalid filename: {path:?}")))?
            .to_string();

        let json = std::fs::read_to_string(&path)
            .map_err(|e| HuxleyError::MockData(format!("Failed to read {path:?}: {e}")))?;

        let value: T = serde_json::from_str(&json)
            .map_err(|e| HuxleyError::MockData(format!("Failed to parse {path:?}: {e}")))?;

        loaded.push((stem, value));
    }

    Ok(loaded)
}
