use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for the API facade.
///
/// `Timeout` is split out of the transport errors because the feed
/// controller treats a deadline the same as any other terminal outcome:
/// the in-flight marker must be cleared so future loads are not blocked.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("server error ({status}): {message}")]
    Server {
        status: StatusCode,
        message: String,
    },
    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err)
        }
    }
}

impl ApiError {
    /// Builds a `Server` error from a non-2xx response body. The API puts
    /// human-readable text under `error` on most routes and `message` on a
    /// few older ones; anything else falls back to the status line.
    pub(crate) fn from_error_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .or_else(|| value.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        ApiError::Server { status, message }
    }
}
