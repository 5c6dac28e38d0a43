//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `impression_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use impression_check::initialization::init_logger_with;
use impression_check::{run_verification, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_verification(config).await {
        Ok(report) => {
            let summary = &report.summary;
            println!("========================");
            println!("CSV BATCH RUN SUMMARY");
            println!("========================");
            println!(
                "Number OK (2xx and 3xx responses): {}/{}",
                summary.success_count, summary.total
            );
            println!(
                "Number failed (4xx/5xx, timeouts, invalid URLs): {}/{}",
                summary.failure_count, summary.total
            );
            println!(
                "Checked {} URL{} in {:.1}s - failures written to {}",
                summary.total,
                if summary.total == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.failure_file.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("impression_check error: {:#}", e);
            process::exit(1);
        }
    }
}
