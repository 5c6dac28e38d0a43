//! Network probes.
//!
//! A probe performs the single GET for one decoded URL and classifies the
//! result. `HttpProbe` is the production implementation; the trait is the
//! seam tests use to control timing and outcomes.

use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

use super::outcome::{FailureReason, Outcome};
use crate::config::PROBE_GRACE_PERIOD;
use crate::error_handling::categorize_reqwest_error;

/// Issues one request for an already-sanitized URL.
///
/// Implementations must resolve exactly once and never retry.
pub trait UrlProbe: Send + Sync {
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Outcome>;
}

/// GET via a shared `reqwest::Client`.
///
/// A response is classified only after its body has been read in full, so a
/// server that stalls mid-body fails with `Timeout` instead of passing on its
/// headers. The client carries the per-request timeout; the probe adds an outer
/// deadline of timeout + `PROBE_GRACE_PERIOD` so a stuck transport still
/// yields `Timeout`.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Arc<reqwest::Client>,
    deadline: Duration,
}

impl HttpProbe {
    pub fn new(client: Arc<reqwest::Client>, timeout: Duration) -> Self {
        Self {
            client,
            deadline: timeout + PROBE_GRACE_PERIOD,
        }
    }
}

impl UrlProbe for HttpProbe {
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Outcome> {
        async move {
            let request = async {
                let response = self.client.get(url).send().await?;
                let status = response.status().as_u16();
                // The status only counts once the whole body has arrived
                response.bytes().await?;
                Ok::<_, reqwest::Error>(status)
            };
            match tokio::time::timeout(self.deadline, request).await {
                Ok(Ok(status)) => Outcome::from_status(status),
                Ok(Err(e)) => Outcome::Failure(categorize_reqwest_error(&e)),
                Err(_) => Outcome::Failure(FailureReason::Timeout),
            }
        }
        .boxed()
    }
}
