//! Final summary printing.

use log::info;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, ProcessingStats};
use crate::tracker::RunSummary;

/// Logs the run summary: success and failure counts against the total.
pub fn print_run_summary(summary: &RunSummary) {
    info!("Verification run summary:");
    info!(
        "OK (2xx and 3xx responses): {}/{}",
        summary.success_count, summary.total
    );
    info!(
        "Failed (4xx/5xx, timeouts, invalid URLs): {}/{}",
        summary.failure_count, summary.total
    );
    if summary.skipped > 0 {
        info!("Skipped vacant slots: {}", summary.skipped);
    }
}

/// Logs the failure breakdown by kind, omitting kinds with no occurrences.
pub fn print_failure_statistics(stats: &ProcessingStats) {
    let total = stats.total_failures();
    if total == 0 {
        return;
    }
    info!("Failure breakdown ({} total):", total);
    for kind in FailureKind::iter() {
        let count = stats.get_failure_count(kind);
        if count > 0 {
            info!("   {}: {}", kind, count);
        }
    }
}

/// Logs where the failure file went.
pub fn print_failure_file(path: &Path, entries: usize) {
    info!(
        "{} has been created. There are {} entries to review.",
        path.display(),
        entries
    );
}
