// Shared test helpers for input files and configuration.
//
// Included by integration tests with `#[path = "helpers.rs"] mod helpers;`.

use std::io::Write;
use std::path::Path;

use impression_check::{Config, LogFormat, LogLevel};
use tempfile::NamedTempFile;

/// Writes a tactic CSV with the default column names.
#[allow(dead_code)] // Used by other test files
pub fn write_input_csv(rows: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["tactic_id", "impression_pixel_json"])
        .expect("Failed to write header");
    for (tactic, cell) in rows {
        writer
            .write_record([tactic, cell])
            .expect("Failed to write row");
    }
    let bytes = writer.into_inner().expect("Failed to finish CSV");
    file.write_all(&bytes).expect("Failed to write input");
    file.flush().expect("Failed to flush file");
    file
}

/// Config for fast test runs: no batch delay, short timeout.
#[allow(dead_code)] // Used by other test files
pub fn create_test_config(input: &Path, output_dir: &Path) -> Config {
    Config {
        file: input.to_path_buf(),
        batch_size: 1,
        batch_delay_ms: 0,
        timeout_ms: 1000,
        status_interval_ms: 1000,
        output_dir: output_dir.to_path_buf(),
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}
