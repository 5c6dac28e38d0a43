//! Export of run results.
//!
//! The failure list of each run is persisted as a CSV file named after the
//! run's start time.

mod csv;

pub use self::csv::{failure_file_name, write_failed_records, write_failed_records_to};
