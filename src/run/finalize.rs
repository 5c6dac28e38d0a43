//! Run finalization.
//!
//! After the scheduler reaches `Done`: stop the reporter, log the final
//! progress and summary, persist the failure file, build the report.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::task::JoinHandle;

use crate::app::{
    log_progress, print_failure_file, print_failure_statistics, print_run_summary,
    shutdown_reporter,
};
use crate::config::Config;
use crate::export::write_failed_records;
use crate::tracker::{CompletionTracker, RunSummary};

use super::VerificationReport;

const REPORTER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Finalize a run and produce the report.
///
/// # Errors
///
/// Returns an error if the failure file cannot be written.
pub async fn finalize_run(
    config: &Config,
    tracker: &Arc<CompletionTracker>,
    reporter: JoinHandle<()>,
    summary: RunSummary,
    run_id: String,
    start_time_epoch: i64,
    start_time: Instant,
) -> Result<VerificationReport> {
    shutdown_reporter(reporter, REPORTER_SHUTDOWN_TIMEOUT).await;
    log_progress(&tracker.snapshot());

    let elapsed_seconds = start_time.elapsed().as_secs_f64();

    print_run_summary(&summary);
    print_failure_statistics(tracker.stats());

    let failure_file =
        write_failed_records(&config.output_dir, start_time_epoch, &summary.failed_records)
            .context("Failed to persist failed records")?;
    print_failure_file(&failure_file, summary.failed_records.len());

    Ok(VerificationReport {
        summary,
        failure_file,
        run_id,
        elapsed_seconds,
    })
}
