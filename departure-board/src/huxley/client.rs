//! Huxley HTTP client.
//!
//! Provides async methods for querying departure boards and service
//! details. Each call is a single attempt bounded by the configured timeout.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::StationCode;

use super::error::HuxleyError;
use super::source::DepartureSource;
use super::types::{ServiceDetails, StationBoard};

/// Default base URL for the Huxley API.
pub const DEFAULT_BASE_URL: &str = "https://huxley2.azurewebsites.net";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of services requested per board call.
const DEFAULT_BOARD_ROWS: u8 = 50;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the Huxley client.
#[derive(Debug, Clone)]
pub struct HuxleyConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Services requested per departures call
    pub board_rows: u8,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl HuxleyConfig {
    /// Create a config pointing at the public Huxley instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            board_rows: DEFAULT_BOARD_ROWS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of services requested per departures call.
    pub fn with_board_rows(mut self, rows: u8) -> Self {
        self.board_rows = rows;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

impl Default for HuxleyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Huxley API client.
///
/// Uses a semaphore to limit concurrent requests across all in-flight
/// board requests. The timeout covers waiting for a permit as well as the
/// request itself.
#[derive(Debug, Clone)]
pub struct HuxleyClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    board_rows: u8,
    semaphore: Arc<Semaphore>,
}

impl HuxleyClient {
    /// Create a new Huxley client with the given configuration.
    pub fn new(config: HuxleyConfig) -> Result<Self, HuxleyError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            HuxleyError::InvalidRequest(format!("bad base URL {}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(HuxleyError::InvalidRequest(format!(
                "base URL {} cannot have a path",
                config.base_url
            )));
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            timeout,
            board_rows: config.board_rows,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Build an endpoint URL from path segments. Segments are
    /// percent-encoded, so opaque service IDs are safe to pass through.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issue a GET and return the body of a successful response.
    async fn get_body(&self, url: Url, query: &[(&str, String)]) -> Result<String, HuxleyError> {
        tokio::time::timeout(self.timeout, self.send(url, query))
            .await
            .map_err(|_| HuxleyError::Timeout {
                secs: self.timeout.as_secs(),
            })?
    }

    async fn send(&self, url: Url, query: &[(&str, String)]) -> Result<String, HuxleyError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| HuxleyError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        debug!(url = %url, "Upstream request");

        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(HuxleyError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HuxleyError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl DepartureSource for HuxleyClient {
    async fn fetch_departures_chunk(
        &self,
        station: &StationCode,
        offset: u16,
        width: u16,
        filter_to: Option<&StationCode>,
    ) -> Result<StationBoard, HuxleyError> {
        let rows = self.board_rows.to_string();
        let url = match filter_to {
            Some(to) => self.endpoint([
                "departures",
                station.as_str(),
                "to",
                to.as_str(),
                rows.as_str(),
            ]),
            None => self.endpoint(["departures", station.as_str(), rows.as_str()]),
        };

        let body = self
            .get_body(
                url,
                &[
                    ("expand", "true".to_string()),
                    ("timeOffset", offset.to_string()),
                    ("timeWindow", width.to_string()),
                ],
            )
            .await?;

        serde_json::from_str(&body).map_err(|e| HuxleyError::json(e, &body))
    }

    async fn fetch_service_detail(&self, service_id: &str) -> Result<ServiceDetails, HuxleyError> {
        let url = self.endpoint(["service", service_id]);

        let body = self
            .get_body(url, &[("expand", "true".to_string())])
            .await
            .map_err(|e| match e {
                HuxleyError::ApiError { status: 404, .. } => HuxleyError::ServiceNotFound,
                other => other,
            })?;

        // Darwin returns null/empty for expired service IDs
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(HuxleyError::ServiceNotFound);
        }

        serde_json::from_str(&body).map_err(|e| HuxleyError::json(e, &body))
    }
}
