//! Input preparation.
//!
//! Reads the tactic CSV export and turns it into impression records:
//! - `read_records` / `parse_records`: CSV rows → records
//! - `extract`: packed URL cell → candidate URLs
//! - `plan`: records → verification targets per dispatch policy

mod extract;
mod plan;

use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use crate::error_handling::InputError;
use crate::models::ImpressionRecord;

pub use extract::{clean_url_fragment, extract_impression_records, is_valid_url_cell};
pub use plan::plan_targets;

/// Reads impression records from a CSV file with a header row.
///
/// # Errors
///
/// Returns `InputError` if the file cannot be read, is not CSV, or lacks one
/// of the two columns.
pub fn read_records(
    path: &Path,
    label_column: &str,
    url_column: &str,
) -> Result<Vec<ImpressionRecord>, InputError> {
    let file = std::fs::File::open(path)?;
    parse_records(file, label_column, url_column)
}

/// Parses impression records from any CSV reader.
///
/// Rows that fail to parse are logged and skipped; only a broken header row
/// fails the whole input.
pub fn parse_records<R: Read>(
    reader: R,
    label_column: &str,
    url_column: &str,
) -> Result<Vec<ImpressionRecord>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| InputError::MissingColumn(name.to_string()))
    };
    let label_idx = column_index(label_column)?;
    let url_idx = column_index(url_column)?;

    let mut records = Vec::new();
    for (line, row) in csv_reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping unreadable input row {}: {}", line + 2, e);
                continue;
            }
        };
        let (Some(label), Some(cell)) = (row.get(label_idx), row.get(url_idx)) else {
            warn!("Skipping short input row {}", line + 2);
            continue;
        };
        records.extend(extract_impression_records(label, cell));
    }

    debug!("Parsed {} impression records", records.len());
    Ok(records)
}
