//! Completion tracking.
//!
//! `CompletionTracker` owns the run's counters and the failure list. It is the
//! only place that decides whether every expected outcome has arrived: the
//! scheduler hands targets off without waiting, so dispatch counts say nothing
//! about resolution.
//!
//! All counters live in one `RunState` behind a mutex, so an outcome updates
//! the counts, the failure list and the completion check as a single step.
//! The lock is never held across an `.await` or while the completion callback
//! runs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use tokio::sync::watch;

use crate::error_handling::{update_failure_stats, ProcessingStats};
use crate::models::FailedRecord;
use crate::verify::Outcome;

/// Called once with the final summary when the last outcome is recorded.
pub type CompletionCallback = Box<dyn FnOnce(&RunSummary) + Send>;

/// Final result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Expected total after vacant slots were removed
    pub total: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// Vacant slots skipped by the scheduler (not part of `total`)
    pub skipped: usize,
    /// Failures in resolution order
    pub failed_records: Vec<FailedRecord>,
}

/// Point-in-time view of dispatch progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub dispatched: usize,
    pub expected_total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ProgressSnapshot {
    /// Dispatched share of the expected total, rounded to a whole percent.
    pub fn percent(&self) -> usize {
        if self.expected_total == 0 {
            return 100;
        }
        (self.dispatched * 100 + self.expected_total / 2) / self.expected_total
    }

    pub fn resolved(&self) -> usize {
        self.succeeded + self.failed
    }
}

#[derive(Debug, Default)]
struct RunState {
    started: bool,
    expected_total: usize,
    dispatched: usize,
    succeeded: usize,
    failed: usize,
    skipped: usize,
    failed_records: Vec<FailedRecord>,
    completed: bool,
}

impl RunState {
    fn summary(&self) -> RunSummary {
        RunSummary {
            total: self.expected_total,
            success_count: self.succeeded,
            failure_count: self.failed,
            skipped: self.skipped,
            failed_records: self.failed_records.clone(),
        }
    }

    /// Marks completion if it just became true. Returns the summary exactly
    /// once per run.
    fn take_completion(&mut self) -> Option<RunSummary> {
        if !self.started || self.completed {
            return None;
        }
        if self.succeeded + self.failed != self.expected_total {
            return None;
        }
        self.completed = true;
        Some(self.summary())
    }
}

/// Sets the completion signal when dropped.
struct DoneSignal<'a>(&'a watch::Sender<bool>);

impl Drop for DoneSignal<'_> {
    fn drop(&mut self) {
        self.0.send_replace(true);
    }
}

/// Shared outcome counter for one run.
pub struct CompletionTracker {
    state: Mutex<RunState>,
    stats: ProcessingStats,
    on_complete: Mutex<Option<CompletionCallback>>,
    done: watch::Sender<bool>,
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompletionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionTracker")
            .field("state", &*self.lock_state())
            .finish_non_exhaustive()
    }
}

impl CompletionTracker {
    pub fn new() -> Self {
        let (done, _) = watch::channel(false);
        Self {
            state: Mutex::new(RunState::default()),
            stats: ProcessingStats::new(),
            on_complete: Mutex::new(None),
            done,
        }
    }

    /// Tracker that invokes `callback` once when the run completes.
    pub fn with_callback(callback: impl FnOnce(&RunSummary) + Send + 'static) -> Self {
        let tracker = Self::new();
        *tracker
            .on_complete
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Box::new(callback));
        tracker
    }

    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        // Counters stay consistent even if a holder panicked: every update is
        // a handful of integer bumps and one push
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the expected total. Only the first call has any effect.
    ///
    /// A total of zero completes the run immediately.
    pub fn start(&self, expected_total: usize) -> bool {
        let completion = {
            let mut state = self.lock_state();
            if state.started {
                warn!(
                    "Completion tracker already started with {} targets, ignoring restart",
                    state.expected_total
                );
                return false;
            }
            state.started = true;
            state.expected_total = expected_total;
            state.take_completion()
        };
        self.fire(completion);
        true
    }

    /// Counts one target handed to the verification client.
    pub fn record_dispatch(&self) {
        let mut state = self.lock_state();
        state.dispatched += 1;
        debug_assert!(state.dispatched <= state.expected_total);
    }

    /// Removes one vacant slot from the expected total.
    pub fn skip_slot(&self) {
        let completion = {
            let mut state = self.lock_state();
            state.expected_total = state.expected_total.saturating_sub(1);
            state.skipped += 1;
            state.take_completion()
        };
        self.fire(completion);
    }

    /// Records the outcome of one dispatched target. Safe to call from many
    /// tasks at once.
    pub fn record_outcome(&self, label: &str, url: &str, outcome: Outcome) {
        let completion = {
            let mut state = self.lock_state();
            if state.completed {
                warn!(
                    "Ignoring outcome for {} ({}) after the run completed",
                    label, url
                );
                return;
            }
            match outcome {
                Outcome::Success { .. } => state.succeeded += 1,
                Outcome::Failure(reason) => {
                    update_failure_stats(&self.stats, &reason);
                    state.failed += 1;
                    state.failed_records.push(FailedRecord {
                        tactic: label.to_string(),
                        url: url.to_string(),
                        reason,
                    });
                }
            }
            if state.succeeded + state.failed > state.dispatched {
                warn!(
                    "Outcome count {} exceeds dispatch count {}",
                    state.succeeded + state.failed,
                    state.dispatched
                );
            }
            state.take_completion()
        };
        self.fire(completion);
    }

    fn fire(&self, completion: Option<RunSummary>) {
        let Some(summary) = completion else {
            return;
        };
        // Flips `done` on the way out, even if the callback panics
        let _signal = DoneSignal(&self.done);
        debug!(
            "All {} outcomes recorded ({} ok, {} failed)",
            summary.total, summary.success_count, summary.failure_count
        );
        let callback = self
            .on_complete
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(callback) = callback {
            callback(&summary);
        }
    }

    /// Whether every expected outcome has been recorded.
    pub fn is_complete(&self) -> bool {
        self.lock_state().completed
    }

    /// Resolves once the run is complete (immediately if it already is).
    pub async fn wait_for_completion(&self) {
        let mut done = self.done.subscribe();
        loop {
            let finished = *done.borrow_and_update();
            if finished {
                return;
            }
            if done.changed().await.is_err() {
                return;
            }
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let state = self.lock_state();
        ProgressSnapshot {
            dispatched: state.dispatched,
            expected_total: state.expected_total,
            succeeded: state.succeeded,
            failed: state.failed,
        }
    }

    pub fn summary(&self) -> RunSummary {
        self.lock_state().summary()
    }

    /// Per-kind failure counters.
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }
}
