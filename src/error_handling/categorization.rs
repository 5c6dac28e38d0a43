//! Error categorization.
//!
//! Maps transport errors and failure reasons onto the categories used for
//! outcomes and statistics.

use super::stats::ProcessingStats;
use super::types::FailureKind;
use crate::verify::FailureReason;

/// Categorizes a `reqwest::Error` into a terminal `FailureReason`.
///
/// Status errors only occur if a caller used `error_for_status`; they are kept
/// as `HttpError` so the status is not lost. Timeouts are checked before the
/// generic transport classes because reqwest may also flag a timed-out
/// request as a connect or request error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureReason {
    if let Some(status) = error.status() {
        return FailureReason::HttpError(status.as_u16());
    }

    if error.is_timeout() {
        FailureReason::Timeout
    } else if error.is_builder() {
        // The URL passed sanitization but reqwest refused it
        FailureReason::MalformedUrl(error.to_string())
    } else {
        FailureReason::NetworkError(describe_transport_error(error))
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    let class = if error.is_connect() {
        "connect"
    } else if error.is_redirect() {
        "redirect"
    } else if error.is_request() {
        "request"
    } else if error.is_body() {
        "body"
    } else if error.is_decode() {
        "decode"
    } else {
        "transport"
    };
    // The top-level Display of reqwest errors omits the cause (DNS, TLS, refused)
    let mut message = format!("{class} error: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Maps a failure reason onto its statistics category.
pub fn failure_kind(reason: &FailureReason) -> FailureKind {
    match reason {
        FailureReason::MalformedUrl(_) => FailureKind::MalformedUrl,
        FailureReason::HttpError(status) => match status / 100 {
            4 => FailureKind::HttpClientError,
            5 => FailureKind::HttpServerError,
            _ => FailureKind::HttpOtherStatus,
        },
        FailureReason::Timeout => FailureKind::Timeout,
        FailureReason::NetworkError(_) => FailureKind::NetworkError,
    }
}

/// Records one failure in the statistics.
pub fn update_failure_stats(stats: &ProcessingStats, reason: &FailureReason) {
    stats.increment_failure(failure_kind(reason));
}
