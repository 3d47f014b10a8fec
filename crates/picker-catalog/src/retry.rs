//! Fixed-delay retry for catalog searches.
//!
//! A search is attempted up to [`RetryPolicy::max_attempts`] times. After a
//! 429 the client waits [`RetryPolicy::rate_limit_delay`]; after any other
//! HTTP or transport failure it waits [`RetryPolicy::failure_delay`]. Errors
//! that another attempt cannot fix (configuration, malformed JSON) are
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// How many times to attempt a search and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Wait after an HTTP 429.
    pub rate_limit_delay: Duration,
    /// Wait after any other retriable failure.
    pub failure_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_delay: Duration::from_secs(2),
            failure_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Same attempt count, no waiting. Used by tests and tooling.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            rate_limit_delay: Duration::ZERO,
            failure_delay: Duration::ZERO,
        }
    }

    fn delay_after(&self, err: &CatalogError) -> Duration {
        if matches!(err, CatalogError::RateLimited { .. }) {
            self.rate_limit_delay
        } else {
            self.failure_delay
        }
    }
}

/// Returns `true` if another attempt could produce a different outcome.
///
/// Every HTTP status failure and transport error is retried. Configuration
/// problems and unparseable bodies are not.
fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::Network(_)
        | CatalogError::NotFound { .. }
        | CatalogError::Unauthorized { .. }
        | CatalogError::RateLimited { .. }
        | CatalogError::Api { .. } => true,
        CatalogError::Configuration { .. }
        | CatalogError::InvalidBaseUrl { .. }
        | CatalogError::InvalidJson { .. } => false,
    }
}

/// Runs `operation` until it succeeds, fails with a non-retriable error, or
/// the attempt budget is spent. The last error is returned on exhaustion.
/// No delay follows the final attempt.
pub(crate) async fn retry_with_policy<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                let delay = policy.delay_after(&err);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "catalog search failed, retrying"
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}
