//! Progress logging and the periodic status reporter.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::scheduler::SchedulerState;
use crate::tracker::{CompletionTracker, ProgressSnapshot};

/// Logs dispatch progress as `[dispatched/expected] percent%`.
pub fn log_progress(snapshot: &ProgressSnapshot) {
    info!(
        "Current Status: [{}/{}] {}% ({} resolved)",
        snapshot.dispatched,
        snapshot.expected_total,
        snapshot.percent(),
        snapshot.resolved()
    );
}

/// Spawns the status reporter.
///
/// Logs progress every `interval` (first line after one full interval) until
/// the scheduler reaches `Done`, then exits for good. Purely observational.
pub fn spawn_status_reporter(
    tracker: Arc<CompletionTracker>,
    mut state: watch::Receiver<SchedulerState>,
    interval: Duration,
) -> JoinHandle<()> {
    // A zero period would panic in `interval_at`
    let interval = interval.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            let done = *state.borrow_and_update() == SchedulerState::Done;
            if done {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => log_progress(&tracker.snapshot()),
                changed = state.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    })
}
