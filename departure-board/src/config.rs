//! Server configuration.
//!
//! Everything is read from environment variables, with defaults suitable
//! for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::huxley::{DEFAULT_BASE_URL, HuxleyConfig};

/// Default upstream timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Huxley base URL
    pub huxley_base_url: String,
    /// Upstream request timeout in seconds
    pub huxley_timeout_secs: u64,
    /// Station list file; the built-in list is used when unset
    pub stations_file: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Serve boards from this directory instead of the live upstream
    pub mock_boards_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "BIND_ADDR",
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let huxley_timeout_secs = match get("HUXLEY_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "HUXLEY_TIMEOUT_SECS",
                        value,
                        reason: "must be positive".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "HUXLEY_TIMEOUT_SECS",
                        value,
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            huxley_base_url: get("HUXLEY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            huxley_timeout_secs,
            stations_file: get("STATIONS_FILE").map(PathBuf::from),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            mock_boards_dir: get("MOCK_BOARDS_DIR").map(PathBuf::from),
        })
    }

    /// Upstream client configuration.
    pub fn huxley(&self) -> HuxleyConfig {
        HuxleyConfig::new()
            .with_base_url(&self.huxley_base_url)
            .with_timeout(self.huxley_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.huxley_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.huxley_timeout_secs, 10);
        assert_eq!(config.stations_file, None);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.mock_boards_dir, None);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("HUXLEY_BASE_URL", "http://localhost:5000"),
            ("HUXLEY_TIMEOUT_SECS", "3"),
            ("STATIONS_FILE", "/etc/stations.json"),
            ("MOCK_BOARDS_DIR", "data/mock"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.stations_file, Some(PathBuf::from("/etc/stations.json")));
        assert_eq!(config.mock_boards_dir, Some(PathBuf::from("data/mock")));

        let huxley = config.huxley();
        assert_eq!(huxley.base_url, "http://localhost:5000");
        assert_eq!(huxley.timeout_secs, 3);
    }

    #[test]
    fn empty_values_are_unset() {
        let config = config(&[("STATIONS_FILE", ""), ("BIND_ADDR", "  ")]).unwrap();
        assert_eq!(config.stations_file, None);
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            config(&[("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { var: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config(&[("HUXLEY_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::Invalid { var: "HUXLEY_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            config(&[("HUXLEY_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
