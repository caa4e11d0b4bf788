//! KSeF API error types.

use super::config::ConfigError;
use super::status::{ResponseErrorKind, StatusFailure};
use crate::core::KsefError;

/// Errors from KSeF API calls.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Non-2xx status other than rate limiting. Not retryable.
    #[error("Unsupported response status code: {status} from {endpoint}")]
    UnsupportedResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// HTTP 429. Retryable after backing off.
    #[error(
        "Rate limit exceeded calling {endpoint}: your client has sent too many requests and has been throttled, please try again later"
    )]
    RateLimitExceeded { endpoint: String },
    /// Response body did not match the expected shape.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// The challenge timestamp is not an RFC 3339 instant.
    #[error("invalid challenge timestamp '{timestamp}': {source}")]
    InvalidChallengeTimestamp {
        timestamp: String,
        source: chrono::ParseError,
    },
    /// The caller-supplied token encryptor failed.
    #[error("token encryption failed: {0}")]
    Encryption(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request input failed validation, or a request document could not be encoded.
    #[error(transparent)]
    Invalid(#[from] KsefError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    pub(crate) fn from_failure(endpoint: &str, failure: StatusFailure, body: String) -> Self {
        match failure.kind {
            ResponseErrorKind::RateLimitExceeded => Self::RateLimitExceeded {
                endpoint: endpoint.to_string(),
            },
            ResponseErrorKind::UnsupportedResponse => Self::UnsupportedResponse {
                endpoint: endpoint.to_string(),
                status: failure.status,
                body,
            },
        }
    }

    /// Whether the failed call can be retried. Backoff policy is up to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// HTTP status of a rejected response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnsupportedResponse { status, .. } => Some(*status),
            Self::RateLimitExceeded { .. } => Some(429),
            _ => None,
        }
    }
}
