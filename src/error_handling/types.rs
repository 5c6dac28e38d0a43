//! Error type definitions.
//!
//! Process-level errors (initialization, input) plus the failure kinds used to
//! break down per-target failures in the final statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for reading the tactic input file.
#[derive(Error, Debug)]
pub enum InputError {
    /// The file could not be opened or read.
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid CSV.
    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Input is missing required column `{0}`")]
    MissingColumn(String),
}

/// Categories of per-target failures, used for the failure breakdown.
///
/// Every `FailureReason` maps onto exactly one kind; HTTP errors are split by
/// status class so the summary shows whether hosts rejected or broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// The URL could not be decoded or is not an absolute http(s) URL
    MalformedUrl,
    /// 4xx response
    HttpClientError,
    /// 5xx response
    HttpServerError,
    /// Any other non-2xx/3xx status
    HttpOtherStatus,
    /// No response within the request timeout
    Timeout,
    /// DNS, connect, TLS or other transport failure
    NetworkError,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MalformedUrl => "Malformed URL",
            FailureKind::HttpClientError => "HTTP client error (4xx)",
            FailureKind::HttpServerError => "HTTP server error (5xx)",
            FailureKind::HttpOtherStatus => "HTTP unexpected status",
            FailureKind::Timeout => "Request timeout",
            FailureKind::NetworkError => "Network error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_failure_kind_labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            FailureKind::iter().map(|k| k.as_str()).collect();
        assert_eq!(labels.len(), FailureKind::iter().count());
    }

    #[test]
    fn test_missing_column_message() {
        let err = InputError::MissingColumn("tactic_id".to_string());
        assert_eq!(err.to_string(), "Input is missing required column `tactic_id`");
    }
}
