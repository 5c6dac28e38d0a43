//! Configuration constants.
//!
//! Defaults for every tunable exposed on the command line, plus the fixed
//! names used by the input and failure files.

use std::time::Duration;

/// Number of targets released per batch.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Delay before each batch is released, in milliseconds.
/// Crude backpressure: keeps the number of fresh connections per second bounded.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 50;

/// Per-request timeout in milliseconds.
/// Covers connect, TLS and response; a request that exceeds it is a `Timeout` failure.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 1000;

/// Interval between progress log lines, in milliseconds.
pub const DEFAULT_STATUS_INTERVAL_MS: u64 = 1000;

/// Input column holding the label (tactic id).
pub const DEFAULT_LABEL_COLUMN: &str = "tactic_id";

/// Input column holding the packed impression URL cell.
pub const DEFAULT_URL_COLUMN: &str = "impression_pixel_json";

/// Prefix of the per-run failure file (`<prefix>-<unix_millis>.csv`).
pub const FAILURE_FILE_PREFIX: &str = "failed-url-results";

/// Header row of the failure file.
pub const FAILURE_FILE_HEADERS: [&str; 2] = ["Tactic", "URL"];

/// Upper bound on how long a single verification may wait for its outcome
/// once the request has been handed to the transport. Requests already carry
/// their own timeout; this only guards against a transport that never returns.
pub const PROBE_GRACE_PERIOD: Duration = Duration::from_millis(500);
