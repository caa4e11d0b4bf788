//! HTTP status → error kind mapping.

/// Kind of a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseErrorKind {
    /// Any non-2xx status other than 429.
    UnsupportedResponse,
    /// 429 Too Many Requests.
    RateLimitExceeded,
}

/// Classification of a non-success status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFailure {
    pub kind: ResponseErrorKind,
    pub status: u16,
    /// Whether the caller may retry the same request after backing off.
    pub retryable: bool,
}

const TOO_MANY_REQUESTS: u16 = 429;

/// Map a status code to a failure, or `None` for 2xx.
pub fn classify_status(status: u16) -> Option<StatusFailure> {
    if (200..=299).contains(&status) {
        return None;
    }

    let (kind, retryable) = if status == TOO_MANY_REQUESTS {
        (ResponseErrorKind::RateLimitExceeded, true)
    } else {
        (ResponseErrorKind::UnsupportedResponse, false)
    };
    Some(StatusFailure {
        kind,
        status,
        retryable,
    })
}
