//! Huxley client error types.

/// Errors from the Huxley HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HuxleyError {
    /// HTTP request failed (connection error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Service details not found (expired or invalid ID)
    #[error("service not found (expired or invalid ID)")]
    ServiceNotFound,

    /// No response within the timeout, including time spent queued
    #[error("upstream request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Rate limited by the API
    #[error("rate limited by upstream API")]
    RateLimited,

    /// The request URL could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Offline board data could not be loaded
    #[error("mock data error: {0}")]
    MockData(String),
}

impl HuxleyError {
    /// Build a `Json` error, keeping the start of the offending body.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        HuxleyError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HuxleyError::ServiceNotFound;
        assert_eq!(err.to_string(), "service not found (expired or invalid ID)");

        let err = HuxleyError::ApiError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = HuxleyError::Timeout { secs: 10 };
        assert_eq!(err.to_string(), "upstream request timed out after 10s");

        let err = HuxleyError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value (body: <html>)");

        let err = HuxleyError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }

    #[test]
    fn json_helper_truncates_body() {
        let body = "x".repeat(2000);
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();

        let HuxleyError::Json { body: Some(kept), .. } = HuxleyError::json(parse_err, &body) else {
            panic!("expected Json error");
        };
        assert_eq!(kept.len(), 500);
    }
}
