//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE, DEFAULT_LABEL_COLUMN, DEFAULT_REQUEST_TIMEOUT_MS,
    DEFAULT_STATUS_INTERVAL_MS, DEFAULT_URL_COLUMN,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How many candidate URLs of one input record are dispatched.
///
/// A packed URL cell can yield several candidates for the same tactic. The
/// historical behavior only ever verified the first one, which stays the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DispatchPolicy {
    /// Dispatch only the first candidate of each record
    First,
    /// Dispatch every candidate of each record
    All,
}

/// Run configuration.
///
/// Parsed from the command line by the binary; library callers can build it
/// directly with struct update syntax over `Config::default()`.
///
/// # Examples
///
/// ```no_run
/// use impression_check::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("tactics.csv"),
///     batch_size: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "impression_check",
    version,
    about = "Checks impression pixel URLs from a tactic CSV export and writes the failures to a CSV file"
)]
pub struct Config {
    /// CSV file with tactic rows
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of requests released per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_batch_size)]
    pub batch_size: usize,

    /// Delay before each batch, in milliseconds
    #[arg(long, default_value_t = DEFAULT_BATCH_DELAY_MS)]
    pub batch_delay_ms: u64,

    /// Per-request timeout, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Interval between progress lines, in milliseconds
    #[arg(long, default_value_t = DEFAULT_STATUS_INTERVAL_MS)]
    pub status_interval_ms: u64,

    /// Which candidate URLs of a row are verified
    #[arg(long, value_enum, default_value_t = DispatchPolicy::First)]
    pub dispatch_policy: DispatchPolicy,

    /// Column holding the tactic id
    #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
    pub label_column: String,

    /// Column holding the packed impression URLs
    #[arg(long, default_value = DEFAULT_URL_COLUMN)]
    pub url_column: String,

    /// Directory the failure CSV is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Inter-batch delay as a `Duration`.
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Progress interval as a `Duration`.
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("tactics.csv"),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            status_interval_ms: DEFAULT_STATUS_INTERVAL_MS,
            dispatch_policy: DispatchPolicy::First,
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            url_column: DEFAULT_URL_COLUMN.to_string(),
            output_dir: PathBuf::from("."),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

fn parse_batch_size(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a valid batch size"))?;
    if value == 0 {
        return Err("batch size must be at least 1".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.batch_delay_ms, 50);
        assert_eq!(config.timeout_ms, 1000);
        assert_eq!(config.status_interval_ms, 1000);
        assert_eq!(config.dispatch_policy, DispatchPolicy::First);
        assert_eq!(config.label_column, "tactic_id");
        assert_eq!(config.url_column, "impression_pixel_json");
    }

    #[test]
    fn test_durations() {
        let config = Config {
            batch_delay_ms: 40,
            timeout_ms: 250,
            status_interval_ms: 2000,
            ..Default::default()
        };
        assert_eq!(config.batch_delay(), Duration::from_millis(40));
        assert_eq!(config.request_timeout(), Duration::from_millis(250));
        assert_eq!(config.status_interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_batch_size() {
        assert_eq!(parse_batch_size("5"), Ok(5));
        assert!(parse_batch_size("0").is_err());
        assert!(parse_batch_size("-3").is_err());
        assert!(parse_batch_size("many").is_err());
    }
}
