//! Station name lookup.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::directory::{Station, StationDirectory};
use super::error::StationError;

/// Station list compiled into the binary, used when no file is configured.
const BUILTIN_STATIONS: &str = include_str!("../../data/stations.json");

/// One entry of a station list file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub crs_code: String,
    pub name: String,
}

/// In-memory station directory.
///
/// Read-only once built, so it can be shared across requests without
/// locking.
#[derive(Debug, Clone)]
pub struct StationNames {
    by_code: HashMap<String, String>,
    /// All stations, sorted by name.
    stations: Vec<Station>,
}

impl StationNames {
    /// Build a directory from station DTOs.
    ///
    /// Codes are upper-cased; entries with a blank code or name are dropped.
    /// A later duplicate code replaces an earlier one.
    pub fn from_dtos(dtos: impl IntoIterator<Item = StationDto>) -> Self {
        let by_code: HashMap<String, String> = dtos
            .into_iter()
            .filter_map(|s| {
                let code = s.crs_code.trim().to_ascii_uppercase();
                let name = s.name.trim().to_string();
                (!code.is_empty() && !name.is_empty()).then_some((code, name))
            })
            .collect();

        let mut stations: Vec<Station> = by_code
            .iter()
            .map(|(code, name)| Station {
                code: code.clone(),
                name: name.clone(),
            })
            .collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));

        Self { by_code, stations }
    }

    /// Parse a JSON array of `{"crsCode", "name"}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, StationError> {
        let dtos: Vec<StationDto> = serde_json::from_str(json).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

        let names = Self::from_dtos(dtos);
        if names.is_empty() {
            return Err(StationError::Empty);
        }
        Ok(names)
    }

    /// Load a station list file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The station list shipped with the binary.
    pub fn builtin() -> Result<Self, StationError> {
        Self::from_json_str(BUILTIN_STATIONS)
    }

    /// Look up a station name by code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(&code.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Get the number of stations in the lookup.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Check if the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// How well a station matches a search query. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    ExactCode,
    CodePrefix,
    NamePrefix,
    NameContains,
}

fn rank(station: &Station, query_upper: &str, query_lower: &str) -> Option<MatchRank> {
    let name = station.name.to_lowercase();

    if station.code == query_upper {
        Some(MatchRank::ExactCode)
    } else if station.code.starts_with(query_upper) {
        Some(MatchRank::CodePrefix)
    } else if name.starts_with(query_lower) {
        Some(MatchRank::NamePrefix)
    } else if name.contains(query_lower) {
        Some(MatchRank::NameContains)
    } else {
        None
    }
}

impl StationDirectory for StationNames {
    fn resolve_name(&self, code: &str) -> String {
        self.get(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    fn search(&self, query: &str, limit: usize) -> Vec<Station> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let query_upper = query.to_ascii_uppercase();
        let query_lower = query.to_lowercase();

        let mut matches: Vec<(MatchRank, &Station)> = self
            .stations
            .iter()
            .filter_map(|s| rank(s, &query_upper, &query_lower).map(|r| (r, s)))
            .collect();

        // Stable: within a rank, stations stay in name order.
        matches.sort_by_key(|(r, _)| *r);

        matches
            .into_iter()
            .take(limit)
            .map(|(_, s)| s.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn dto(code: &str, name: &str) -> StationDto {
        StationDto {
            crs_code: code.to_string(),
            name: name.to_string(),
        }
    }

    fn sample() -> StationNames {
        StationNames::from_dtos([
            dto("KGX", "London Kings Cross"),
            dto("KNG", "Kingston"),
            dto("KGL", "Kings Langley"),
            dto("PAD", "London Paddington"),
            dto("SKI", "Skipton"),
        ])
    }

    #[test]
    fn from_dtos_uppercases_and_drops_blank() {
        let names = StationNames::from_dtos([
            dto("kgx", "London Kings Cross"),
            dto("", "No Code"),
            dto("PAD", "  "),
        ]);

        assert_eq!(names.len(), 1);
        assert_eq!(names.get("KGX"), Some("London Kings Cross"));
        assert_eq!(names.get("kgx"), Some("London Kings Cross"));
    }

    #[test]
    fn resolve_unknown_echoes_code() {
        let names = sample();
        assert_eq!(names.resolve_name("PAD"), "London Paddington");
        assert_eq!(names.resolve_name("pad"), "London Paddington");
        assert_eq!(names.resolve_name("ZZZ"), "ZZZ");
        assert_eq!(names.resolve_name(""), "");
    }

    #[test]
    fn search_ranks_code_before_name() {
        let names = sample();
        let results = names.search("kgx", 10);
        assert_eq!(results[0].code, "KGX");

        let results = names.search("kin", 10);
        let codes: Vec<_> = results.iter().map(|s| s.code.as_str()).collect();
        // Name prefix matches first (in name order), then substring matches.
        assert_eq!(codes, ["KGL", "KNG", "KGX"]);
    }

    #[test]
    fn search_respects_limit() {
        let names = sample();
        assert_eq!(names.search("lon", 1).len(), 1);
        assert!(names.search("lon", 0).is_empty());
        assert!(names.search("   ", 10).is_empty());
    }

    #[test]
    fn search_no_match() {
        assert!(sample().search("xyz", 10).is_empty());
    }

    #[test]
    fn builtin_list_loads() {
        let names = StationNames::builtin().unwrap();
        assert!(!names.is_empty());
        assert_eq!(names.resolve_name("KGX"), "London Kings Cross");
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(
            &path,
            r#"[{"crsCode": "rdg", "name": "Reading"}, {"crsCode": "SWI", "name": "Swindon"}]"#,
        )
        .unwrap();

        let names = StationNames::from_json_file(&path).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.resolve_name("RDG"), "Reading");
    }

    #[test]
    fn load_errors() {
        let dir = tempdir().unwrap();

        let missing = StationNames::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(StationError::Io { .. })));

        assert!(matches!(
            StationNames::from_json_str("not json"),
            Err(StationError::Json { .. })
        ));
        assert!(matches!(
            StationNames::from_json_str("[]"),
            Err(StationError::Empty)
        ));
    }
}
