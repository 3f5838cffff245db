//! Retry with exponential backoff for Didox HTTP calls.
//!
//! Any HTTP response, including 4xx and 5xx, is returned to the caller on
//! the first attempt. Which transport failures are retried depends on the
//! [`RetryPolicy`]: document creation is not idempotent, so once a request
//! may have reached the server (a timeout, a reset mid-response) it is never
//! sent again.

use std::future::Future;
use std::time::Duration;

/// Retry attempts after the initial request.
pub(crate) const MAX_RETRIES: u32 = 3;

/// First backoff delay; doubles per attempt (200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

pub(crate) fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt))
}

/// Which transport failures may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryPolicy {
    /// Every transport failure, timeouts included. For calls that are safe
    /// to repeat, such as login.
    Transport,
    /// Only failures to connect, where the request never left the client.
    ConnectOnly,
}

impl RetryPolicy {
    pub(crate) fn should_retry(self, error: &reqwest::Error) -> bool {
        match self {
            Self::Transport => true,
            Self::ConnectOnly => error.is_connect(),
        }
    }
}

/// Send a request, retrying transport failures allowed by `policy` with
/// backoff.
///
/// `send` is called up to `MAX_RETRIES + 1` times.
pub(crate) async fn retry_send<F, Fut>(
    endpoint: &str,
    policy: RetryPolicy,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..MAX_RETRIES {
        match send().await {
            Ok(resp) => return Ok(resp),
            Err(e) if !policy.should_retry(&e) => {
                tracing::warn!(endpoint, ?policy, error = %e, "Didox request failed, not retrying");
                return Err(e);
            }
            Err(e) => {
                let delay = backoff(attempt);
                tracing::warn!(
                    endpoint,
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Didox request failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    send().await
}
