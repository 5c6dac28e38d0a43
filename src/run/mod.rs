//! Run orchestration.
//!
//! Wires input preparation, the scheduler, the status reporter and the
//! failure export into one verification run.

mod finalize;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;

use crate::app::spawn_status_reporter;
use crate::config::Config;
use crate::initialization::init_client;
use crate::input::{plan_targets, read_records};
use crate::models::VerificationTarget;
use crate::scheduler::{BatchScheduler, BatchSettings};
use crate::tracker::RunSummary;
use crate::verify::{HttpProbe, UrlProbe};

use finalize::finalize_run;

/// Results of a verification run.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// Counts and failed records
    pub summary: RunSummary,
    /// Path of the `Tactic,URL` failure file
    pub failure_file: PathBuf,
    /// Run identifier (format: `run_<timestamp_millis>`)
    pub run_id: String,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs a verification with the provided configuration.
///
/// Reads the tactic CSV, plans targets per the dispatch policy, verifies them
/// in timed batches and writes the failure file into `config.output_dir`.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the HTTP client cannot be
/// built, or the failure file cannot be written. Individual request failures
/// never abort the run.
///
/// # Example
///
/// ```no_run
/// use impression_check::{run_verification, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     file: PathBuf::from("tactics.csv"),
///     ..Default::default()
/// };
/// let report = run_verification(config).await?;
/// println!("{} failed", report.summary.failure_count);
/// # Ok(())
/// # }
/// ```
pub async fn run_verification(config: Config) -> Result<VerificationReport> {
    info!("Processing: {}", config.file.display());
    let records = read_records(&config.file, &config.label_column, &config.url_column)
        .context("Failed to read input records")?;
    info!(
        "CSV file successfully read ({} impression records), checking impression URLs",
        records.len()
    );

    let targets = plan_targets(records, config.dispatch_policy);
    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let probe: Arc<dyn UrlProbe> = Arc::new(HttpProbe::new(client, config.request_timeout()));

    run_targets(&config, targets, probe).await
}

/// Runs already-planned targets through the given probe.
///
/// This is the part of `run_verification` after input preparation; the probe
/// seam lets callers verify targets without a real network.
pub async fn run_targets(
    config: &Config,
    targets: Vec<VerificationTarget>,
    probe: Arc<dyn UrlProbe>,
) -> Result<VerificationReport> {
    let start_time_epoch = Utc::now().timestamp_millis();
    let run_id = format!("run_{}", start_time_epoch);
    let start_time = std::time::Instant::now();
    info!("Starting run: {} ({} targets)", run_id, targets.len());

    let scheduler = BatchScheduler::new(probe, BatchSettings::from(config));
    let tracker = scheduler.tracker();
    let reporter = spawn_status_reporter(
        Arc::clone(&tracker),
        scheduler.subscribe(),
        config.status_interval(),
    );

    let summary = scheduler.run(targets).await;
    info!("Finished processing!");

    finalize_run(
        config,
        &tracker,
        reporter,
        summary,
        run_id,
        start_time_epoch,
        start_time,
    )
    .await
}
