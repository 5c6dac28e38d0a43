//! Verification client.
//!
//! `verify_target` turns one `VerificationTarget` into exactly one recorded
//! outcome:
//! 1. Decode the raw URL (`sanitize_url`); on failure record `MalformedUrl`
//!    without touching the network
//! 2. Otherwise run the probe (one GET, fixed timeout, no retry)
//! 3. Report the outcome to the `CompletionTracker`
//!
//! The report is owned by a drop guard. If the task is cancelled or panics
//! before step 3, the guard records a `NetworkError` so the tracker still
//! reaches its expected total.

mod outcome;
mod probe;

use std::future::Future;
use std::sync::Arc;

use log::debug;

use crate::models::VerificationTarget;
use crate::tracker::CompletionTracker;
use crate::utils::sanitize_url;

pub use outcome::{FailureReason, Outcome};
pub use probe::{HttpProbe, UrlProbe};

/// Verifies one target and records its outcome.
///
/// Intended to be spawned as its own task; the caller never waits on it.
/// The outcome slot is reserved when this is called, so even a future that
/// is dropped before its first poll still records a failure.
pub fn verify_target(
    target: VerificationTarget,
    probe: Arc<dyn UrlProbe>,
    tracker: Arc<CompletionTracker>,
) -> impl Future<Output = ()> + Send + 'static {
    let report = PendingReport::new(&target, tracker);

    async move {
        let url = match sanitize_url(&target.raw_url) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping request for {}: {}", target.raw_url, e);
                let reason = FailureReason::MalformedUrl(e.to_string());
                report.deliver(&target.raw_url, Outcome::Failure(reason));
                return;
            }
        };

        let outcome = probe.probe(&url).await;
        match &outcome {
            Outcome::Success { status } => debug!("{} -> {}", url, status),
            Outcome::Failure(reason) => debug!("{} failed: {}", url, reason),
        }
        report.deliver(&url, outcome);
    }
}

/// Outcome slot for one dispatched target.
struct PendingReport {
    label: String,
    raw_url: String,
    tracker: Option<Arc<CompletionTracker>>,
}

impl PendingReport {
    fn new(target: &VerificationTarget, tracker: Arc<CompletionTracker>) -> Self {
        Self {
            label: target.label.clone(),
            raw_url: target.raw_url.clone(),
            tracker: Some(tracker),
        }
    }

    fn deliver(mut self, url: &str, outcome: Outcome) {
        if let Some(tracker) = self.tracker.take() {
            tracker.record_outcome(&self.label, url, outcome);
        }
    }
}

impl Drop for PendingReport {
    fn drop(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            log::warn!(
                "Verification of {} ended without an outcome, recording failure",
                self.raw_url
            );
            let reason = FailureReason::NetworkError("verification aborted".to_string());
            tracker.record_outcome(&self.label, &self.raw_url, Outcome::Failure(reason));
        }
    }
}
