//! Error classification and retry policy for LLM requests.

use std::time::Duration;
use thiserror::Error;

/// Kind of LLM request failure, used to decide retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// 429 from the provider; retry after a delay.
    RateLimited,
    /// 5xx from the provider; usually transient.
    ServerError,
    /// 4xx other than 429; the request itself is bad, never retried.
    ClientError,
    /// Connection failure or timeout before a response was received.
    NetworkError,
    /// The provider responded but the body could not be interpreted.
    ParseError,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::ClientError => "client_error",
            Self::NetworkError => "network_error",
            Self::ParseError => "parse_error",
        };
        write!(f, "{}", s)
    }
}

/// Classify an HTTP status code into an error kind.
pub fn classify_http_status(status: u16) -> LlmErrorKind {
    match status {
        429 => LlmErrorKind::RateLimited,
        500..=599 => LlmErrorKind::ServerError,
        400..=499 => LlmErrorKind::ClientError,
        _ => LlmErrorKind::ServerError,
    }
}

/// An error from an LLM request.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status code, when the provider responded.
    pub status: Option<u16>,
    /// Provider-suggested retry delay (Retry-After header).
    pub retry_after: Option<Duration>,
}

impl LlmError {
    pub fn rate_limited(message: String, retry_after: Option<Duration>) -> Self {
        Self {
            kind: LlmErrorKind::RateLimited,
            message,
            status: Some(429),
            retry_after,
        }
    }

    pub fn server_error(status: u16, message: String) -> Self {
        Self {
            kind: LlmErrorKind::ServerError,
            message,
            status: Some(status),
            retry_after: None,
        }
    }

    pub fn client_error(status: u16, message: String) -> Self {
        Self {
            kind: LlmErrorKind::ClientError,
            message,
            status: Some(status),
            retry_after: None,
        }
    }

    pub fn network_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::NetworkError,
            message,
            status: None,
            retry_after: None,
        }
    }

    pub fn parse_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::ParseError,
            message,
            status: None,
            retry_after: None,
        }
    }

    /// Delay before the next retry attempt.
    ///
    /// Uses the provider's Retry-After when present, otherwise exponential
    /// backoff starting at one second.
    pub fn suggested_delay(&self, attempt: u32) -> Duration {
        if let Some(retry_after) = self.retry_after {
            return retry_after;
        }
        let exp = attempt.min(5);
        Duration::from_secs(1u64 << exp)
    }
}

/// Retry policy for transient LLM errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial request.
    pub max_retries: u32,
    /// Total wall-clock budget across all attempts.
    pub max_retry_duration: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            max_retry_duration: Duration::from_secs(90),
        }
    }
}

impl RetryConfig {
    /// Whether an error is worth retrying at all.
    pub fn should_retry(&self, error: &LlmError) -> bool {
        matches!(
            error.kind,
            LlmErrorKind::RateLimited | LlmErrorKind::ServerError | LlmErrorKind::NetworkError
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_http_status() {
        assert_eq!(classify_http_status(429), LlmErrorKind::RateLimited);
        assert_eq!(classify_http_status(500), LlmErrorKind::ServerError);
        assert_eq!(classify_http_status(503), LlmErrorKind::ServerError);
        assert_eq!(classify_http_status(400), LlmErrorKind::ClientError);
        assert_eq!(classify_http_status(404), LlmErrorKind::ClientError);
    }

    #[test]
    fn test_retry_policy() {
        let config = RetryConfig::default();
        assert!(config.should_retry(&LlmError::rate_limited("slow down".into(), None)));
        assert!(config.should_retry(&LlmError::server_error(502, "bad gateway".into())));
        assert!(config.should_retry(&LlmError::network_error("connection reset".into())));
        assert!(!config.should_retry(&LlmError::client_error(400, "bad request".into())));
        assert!(!config.should_retry(&LlmError::parse_error("not json".into())));
    }

    #[test]
    fn test_suggested_delay_prefers_retry_after() {
        let err = LlmError::rate_limited("429".into(), Some(Duration::from_secs(7)));
        assert_eq!(err.suggested_delay(0), Duration::from_secs(7));

        let err = LlmError::server_error(500, "oops".into());
        assert_eq!(err.suggested_delay(0), Duration::from_secs(1));
        assert_eq!(err.suggested_delay(2), Duration::from_secs(4));
    }
}
