//! Reporter shutdown.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Waits for the status reporter to exit after the scheduler reached `Done`.
///
/// The reporter stops on its own; the timeout only bounds the wait if it is
/// mid-tick. A reporter that does not finish in time is aborted.
pub async fn shutdown_reporter(reporter: JoinHandle<()>, timeout: Duration) {
    let abort = reporter.abort_handle();
    match tokio::time::timeout(timeout, reporter).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) if e.is_cancelled() => {}
        Ok(Err(e)) => log::warn!("Status reporter panicked: {:?}", e),
        Err(_) => {
            log::warn!("Status reporter did not stop in time, aborting it");
            abort.abort();
        }
    }
}
