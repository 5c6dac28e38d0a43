//! Data types shared between input preparation, dispatch and reporting.

use serde::Serialize;

use crate::verify::FailureReason;

/// One prepared input row: a tactic and the candidate impression URLs found
/// in its packed URL cell. `impression_url_arr` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpressionRecord {
    pub tactic_id: String,
    pub impression_url_arr: Vec<String>,
}

/// One label + URL pair to verify. Immutable once queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTarget {
    pub label: String,
    pub raw_url: String,
}

impl VerificationTarget {
    pub fn new(label: impl Into<String>, raw_url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            raw_url: raw_url.into(),
        }
    }

    /// A slot with no URL at all. The scheduler skips it and shrinks the
    /// expected total instead of dispatching it.
    pub fn is_vacant(&self) -> bool {
        self.raw_url.trim().is_empty()
    }
}

/// A target whose verification failed.
///
/// `url` is the decoded URL when decoding succeeded, the raw token otherwise.
/// Serializes to the `Tactic,URL` columns of the failure file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRecord {
    #[serde(rename = "Tactic")]
    pub tactic: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(skip)]
    pub reason: FailureReason,
}
