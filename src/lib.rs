//! impression_check library: batch verification of impression pixel URLs
//!
//! Reads a tactic CSV export, extracts the impression URLs of every tactic and
//! verifies each with one HTTP GET. Requests are released in fixed-size
//! batches separated by a fixed delay; a completion tracker detects, exactly
//! once, when every outcome has arrived. Failures (non-2xx/3xx responses,
//! timeouts, network errors, undecodable URLs) are written to a CSV file.
//!
//! # Example
//!
//! ```no_run
//! use impression_check::{Config, run_verification};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("tactics.csv"),
//!     batch_size: 20,
//!     batch_delay_ms: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_verification(config).await?;
//! println!("{} of {} impression URLs failed",
//!          report.summary.failure_count, report.summary.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod input;
pub mod models;
mod run;
pub mod scheduler;
pub mod tracker;
pub mod utils;
pub mod verify;

// Re-export public API
pub use config::{Config, DispatchPolicy, LogFormat, LogLevel};
pub use models::{FailedRecord, ImpressionRecord, VerificationTarget};
pub use run::{run_targets, run_verification, VerificationReport};
pub use scheduler::{BatchScheduler, BatchSettings, SchedulerState};
pub use tracker::{CompletionTracker, RunSummary};
pub use verify::{FailureReason, HttpProbe, Outcome, UrlProbe};
