//! Failure file export.
//!
//! Writes the failed records of one run to `failed-url-results-<millis>.csv`
//! with a `Tactic,URL` header, quoting per standard CSV rules.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{FAILURE_FILE_HEADERS, FAILURE_FILE_PREFIX};
use crate::models::FailedRecord;

/// File name of the failure report for a run started at `epoch_millis`.
pub fn failure_file_name(epoch_millis: i64) -> String {
    format!("{}-{}.csv", FAILURE_FILE_PREFIX, epoch_millis)
}

/// Writes failed records as CSV to any writer.
///
/// The header row is always written, so an empty run still produces a
/// well-formed file.
pub fn write_failed_records_to<W: Write>(writer: W, records: &[FailedRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(FAILURE_FILE_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the failure report into `dir` and returns its path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_failed_records(
    dir: &Path,
    epoch_millis: i64,
    records: &[FailedRecord],
) -> Result<PathBuf> {
    let path = dir.join(failure_file_name(epoch_millis));
    let file = std::fs::File::create(&path).context(format!(
        "Failed to create failure file: {}",
        path.display()
    ))?;
    write_failed_records_to(file, records)
        .context(format!("Failed to write failure file: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::FailureReason;

    fn record(tactic: &str, url: &str) -> FailedRecord {
        FailedRecord {
            tactic: tactic.to_string(),
            url: url.to_string(),
            reason: FailureReason::Timeout,
        }
    }

    #[test]
    fn test_failure_file_name() {
        assert_eq!(
            failure_file_name(1704067200000),
            "failed-url-results-1704067200000.csv"
        );
    }

    #[test]
    fn test_header_only_when_empty() {
        let mut out = Vec::new();
        write_failed_records_to(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Tactic,URL\n");
    }

    #[test]
    fn test_rows_are_quoted_when_needed() {
        let mut out = Vec::new();
        write_failed_records_to(
            &mut out,
            &[
                record("T2", "http://fail.test/b"),
                record("T3", "http://q.test/?a=1,2"),
                record("T\"4", "http://x.test/"),
            ],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Tactic,URL\n\
             T2,http://fail.test/b\n\
             T3,\"http://q.test/?a=1,2\"\n\
             \"T\"\"4\",http://x.test/\n"
        );
    }
}
