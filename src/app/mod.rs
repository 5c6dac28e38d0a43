//! Main application modules.
//!
//! Progress reporting, reporter shutdown and summary printing used by the
//! run orchestration.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, spawn_status_reporter};
pub use shutdown::shutdown_reporter;
pub use statistics::{print_failure_file, print_failure_statistics, print_run_summary};
