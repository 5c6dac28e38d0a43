//! Verification outcomes.

use thiserror::Error;

/// Why a target failed verification. Every reason is terminal for the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// A response arrived with a status outside 2xx/3xx.
    #[error("HTTP status {0}")]
    HttpError(u16),

    /// No response within the request timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure (DNS, refused, TLS, reset).
    #[error("network error: {0}")]
    NetworkError(String),

    /// The URL could not be decoded; no request was sent.
    #[error("malformed URL: {0}")]
    MalformedUrl(String),
}

/// Classified result of verifying one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx or 3xx response.
    Success { status: u16 },
    /// Anything else.
    Failure(FailureReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Classifies a received status by its leading digit.
    pub fn from_status(status: u16) -> Self {
        match status / 100 {
            2 | 3 => Outcome::Success { status },
            _ => Outcome::Failure(FailureReason::HttpError(status)),
        }
    }
}
