//! Batch scheduler.
//!
//! Drives the whole target list through verification as an explicit state
//! machine:
//!
//! ```text
//! Idle -> Dispatching -> Draining -> Done
//!   \______________________________/
//!          (no targets at all)
//! ```
//!
//! While `Dispatching`, one loop waits the batch delay, then hands the next
//! contiguous slice of at most `batch_size` targets to the verification
//! client, one spawned task per target. The loop never waits for those tasks;
//! outstanding requests cannot hold back the next batch. After the last slice
//! the scheduler is `Draining` until the `CompletionTracker` signals that every
//! outcome is in, then enters `Done` exactly once.

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::config::Config;
use crate::models::VerificationTarget;
use crate::tracker::{CompletionTracker, RunSummary};
use crate::verify::{verify_target, UrlProbe};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Dispatching,
    Draining,
    Done,
}

/// Batch size and inter-batch delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub batch_size: usize,
    pub delay: Duration,
}

impl BatchSettings {
    /// A batch size of zero is treated as one.
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            delay,
        }
    }
}

impl From<&Config> for BatchSettings {
    fn from(config: &Config) -> Self {
        Self::new(config.batch_size, config.batch_delay())
    }
}

/// Index ranges of the batches for `total` targets.
///
/// Yields `ceil(total / batch_size)` contiguous ranges; only the last one may
/// be shorter than `batch_size`.
pub fn partition(total: usize, batch_size: usize) -> impl Iterator<Item = Range<usize>> {
    let batch_size = batch_size.max(1);
    (0..total)
        .step_by(batch_size)
        .map(move |start| start..(start + batch_size).min(total))
}

/// Releases targets in timed batches and waits for all outcomes.
pub struct BatchScheduler {
    settings: BatchSettings,
    probe: Arc<dyn UrlProbe>,
    tracker: Arc<CompletionTracker>,
    state: watch::Sender<SchedulerState>,
}

impl BatchScheduler {
    pub fn new(probe: Arc<dyn UrlProbe>, settings: BatchSettings) -> Self {
        Self::with_tracker(probe, settings, Arc::new(CompletionTracker::new()))
    }

    /// Scheduler reporting into an existing tracker (e.g. one with a
    /// completion callback). The tracker must not have been started.
    pub fn with_tracker(
        probe: Arc<dyn UrlProbe>,
        settings: BatchSettings,
        tracker: Arc<CompletionTracker>,
    ) -> Self {
        let (state, _) = watch::channel(SchedulerState::Idle);
        Self {
            settings,
            probe,
            tracker,
            state,
        }
    }

    pub fn tracker(&self) -> Arc<CompletionTracker> {
        Arc::clone(&self.tracker)
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    fn transition(&self, next: SchedulerState) {
        let previous = self.state.send_replace(next);
        debug!("Scheduler {:?} -> {:?}", previous, next);
    }

    /// Runs every target to an outcome and returns the summary.
    ///
    /// Consumes the scheduler: one scheduler drives exactly one run.
    pub async fn run(self, targets: Vec<VerificationTarget>) -> RunSummary {
        let total = targets.len();
        self.tracker.start(total);

        if total == 0 {
            info!("No targets to verify");
            self.transition(SchedulerState::Done);
            return self.tracker.summary();
        }

        self.transition(SchedulerState::Dispatching);
        let batch_count = partition(total, self.settings.batch_size).count();
        info!(
            "Dispatching {} targets in {} batches of up to {} ({}ms apart)",
            total,
            batch_count,
            self.settings.batch_size,
            self.settings.delay.as_millis()
        );

        let mut pending = targets.into_iter();
        for (index, range) in partition(total, self.settings.batch_size).enumerate() {
            tokio::time::sleep(self.settings.delay).await;
            let batch: Vec<_> = pending.by_ref().take(range.len()).collect();
            debug!(
                "Releasing batch {}/{} (targets {}..{})",
                index + 1,
                batch_count,
                range.start,
                range.end
            );
            self.dispatch_batch(batch);
        }

        self.transition(SchedulerState::Draining);
        self.tracker.wait_for_completion().await;
        self.transition(SchedulerState::Done);
        self.tracker.summary()
    }

    fn dispatch_batch(&self, batch: Vec<VerificationTarget>) {
        for target in batch {
            if target.is_vacant() {
                warn!("Skipping vacant target slot for {}", target.label);
                self.tracker.skip_slot();
                continue;
            }
            self.tracker.record_dispatch();
            tokio::spawn(verify_target(
                target,
                Arc::clone(&self.probe),
                Arc::clone(&self.tracker),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::Outcome;
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records the order URLs were probed in and answers 200.
    #[derive(Default)]
    struct RecordingProbe {
        seen: Mutex<Vec<String>>,
    }

    impl UrlProbe for RecordingProbe {
        fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Outcome> {
            self.seen.lock().unwrap().push(url.to_string());
            async { Outcome::Success { status: 200 } }.boxed()
        }
    }

    /// Never answers until released.
    struct GateProbe {
        calls: AtomicUsize,
        gate: tokio::sync::Semaphore,
    }

    impl UrlProbe for GateProbe {
        fn probe<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Outcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async move {
                let _permit = self.gate.acquire().await;
                Outcome::Success { status: 200 }
            }
            .boxed()
        }
    }

    fn targets(n: usize) -> Vec<VerificationTarget> {
        (0..n)
            .map(|i| VerificationTarget::new(format!("T{i}"), format!("http://host.test/{i}")))
            .collect()
    }

    #[test]
    fn test_partition_counts() {
        for (total, size) in [(0, 3), (1, 3), (3, 3), (7, 3), (20, 20), (41, 20), (5, 1)] {
            let batches: Vec<_> = partition(total, size).collect();
            assert_eq!(batches.len(), total.div_ceil(size), "n={total} b={size}");
            if let Some(last) = batches.last() {
                let expected_last = if total % size == 0 { size } else { total % size };
                assert_eq!(last.len(), expected_last);
                assert_eq!(last.end, total);
            }
            // Contiguous and complete
            let mut next = 0;
            for range in &batches {
                assert_eq!(range.start, next);
                next = range.end;
            }
            assert_eq!(next, total);
        }
    }

    #[test]
    fn test_batch_settings_clamp_zero() {
        let settings = BatchSettings::new(0, Duration::ZERO);
        assert_eq!(settings.batch_size, 1);
    }

    #[tokio::test]
    async fn test_empty_run_is_done_without_delay() {
        let probe = Arc::new(RecordingProbe::default());
        let scheduler = BatchScheduler::new(
            probe.clone(),
            BatchSettings::new(5, Duration::from_secs(3600)),
        );
        let state = scheduler.subscribe();

        let summary = tokio::time::timeout(Duration::from_secs(1), scheduler.run(Vec::new()))
            .await
            .expect("empty run must not wait on the batch delay");

        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.failure_count, 0);
        assert!(probe.seen.lock().unwrap().is_empty());
        assert_eq!(*state.borrow(), SchedulerState::Done);
    }

    #[tokio::test]
    async fn test_dispatch_order_within_batches() {
        let probe = Arc::new(RecordingProbe::default());
        let scheduler = BatchScheduler::new(probe.clone(), BatchSettings::new(3, Duration::ZERO));

        let summary = scheduler.run(targets(7)).await;

        assert_eq!(summary.total, 7);
        assert_eq!(summary.success_count, 7);
        // Current-thread runtime: spawned tasks run in spawn order
        let seen = probe.seen.lock().unwrap().clone();
        let expected: Vec<_> = (0..7).map(|i| format!("http://host.test/{i}")).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_states_and_batch_timing() {
        let probe = Arc::new(GateProbe {
            calls: AtomicUsize::new(0),
            gate: tokio::sync::Semaphore::new(0),
        });
        let scheduler = BatchScheduler::new(
            probe.clone(),
            BatchSettings::new(2, Duration::from_millis(100)),
        );
        let tracker = scheduler.tracker();
        let state = scheduler.subscribe();
        assert_eq!(*state.borrow(), SchedulerState::Idle);

        let run = tokio::spawn(scheduler.run(targets(5)));

        // First batch only after the first delay
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*state.borrow(), SchedulerState::Dispatching);
        assert_eq!(tracker.snapshot().dispatched, 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(tracker.snapshot().dispatched, 2);

        // Unresolved requests do not hold back later batches
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(tracker.snapshot().dispatched, 5);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 5);
        assert_eq!(*state.borrow(), SchedulerState::Draining);
        assert!(!tracker.is_complete());

        probe.gate.add_permits(5);
        let summary = run.await.expect("scheduler panicked");
        assert_eq!(summary.success_count, 5);
        assert_eq!(*state.borrow(), SchedulerState::Done);
    }

    #[tokio::test]
    async fn test_vacant_slots_do_not_stall() {
        let probe = Arc::new(RecordingProbe::default());
        let scheduler = BatchScheduler::new(probe.clone(), BatchSettings::new(2, Duration::ZERO));
        let mut input = targets(3);
        input.insert(1, VerificationTarget::new("T-empty", "  "));
        input.push(VerificationTarget::new("T-last", ""));

        let summary = tokio::time::timeout(Duration::from_secs(5), scheduler.run(input))
            .await
            .expect("vacant slots must not stall the run");

        assert_eq!(summary.total, 3);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.success_count, 3);
        assert_eq!(probe.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_all_vacant_completes() {
        let probe = Arc::new(RecordingProbe::default());
        let scheduler = BatchScheduler::new(probe, BatchSettings::new(4, Duration::ZERO));
        let input = vec![
            VerificationTarget::new("A", ""),
            VerificationTarget::new("B", ""),
        ];

        let summary = tokio::time::timeout(Duration::from_secs(5), scheduler.run(input))
            .await
            .expect("run must complete");
        assert_eq!(summary.total, 0);
        assert_eq!(summary.skipped, 2);
    }

    #[tokio::test]
    async fn test_panicking_completion_callback_does_not_stall() {
        let tracker = Arc::new(CompletionTracker::with_callback(|_| {
            panic!("callback failure");
        }));
        let scheduler = BatchScheduler::with_tracker(
            Arc::new(RecordingProbe::default()),
            BatchSettings::new(1, Duration::ZERO),
            Arc::clone(&tracker),
        );
        let state = scheduler.subscribe();

        let summary = tokio::time::timeout(Duration::from_secs(3), scheduler.run(targets(1)))
            .await
            .expect("run must reach Done even if the callback panics");

        assert_eq!(summary.success_count, 1);
        assert_eq!(*state.borrow(), SchedulerState::Done);
    }
}
