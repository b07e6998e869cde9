//! Bounded retry with exponential backoff for transient upstream failures.

use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::warn;

use crate::error::{GoogleApiError, Result};

/// Upstream statuses treated as transient.
pub const RETRYABLE_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// How many times a request is attempted and how long to wait in between.
///
/// The wait before attempt `n + 1` is `initial_backoff * 2^(n - 1)`, so a
/// policy of 3 attempts at 0.5 s sleeps 0.5 s and then 1 s. Transport
/// failures (refused or reset connections) and [`RETRYABLE_STATUSES`] are
/// retried; timeouts are not, since each attempt already waited the full
/// client timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
        }
    }

    /// Delay after the `attempt`-th failed attempt (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }

    pub fn is_retryable_status(status: StatusCode) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Transport errors worth another attempt.
    pub fn is_retryable_error(error: &reqwest::Error) -> bool {
        !error.is_timeout() && (error.is_connect() || error.is_request() || error.is_body())
    }

    /// Send the request produced by `build`, retrying transient failures.
    ///
    /// `build` is called once per attempt. Returns the first 2xx response, or
    /// the last failure once attempts run out or a permanent error is seen.
    pub async fn send<F>(&self, api: &str, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 1;
        loop {
            let last_attempt = attempt >= self.max_attempts;

            match build().send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    if !last_attempt && Self::is_retryable_status(status) {
                        warn!(api, status = %status, attempt, "Transient upstream status, retrying");
                    } else {
                        let message = response.text().await.unwrap_or_default();
                        return Err(GoogleApiError::Api {
                            status: status.as_u16(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    if !last_attempt && Self::is_retryable_error(&e) {
                        warn!(api, error = %e.without_url(), attempt, "Transport error, retrying");
                    } else {
                        return Err(e.into());
                    }
                }
            }

            tokio::time::sleep(self.backoff_for(attempt)).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_millis(500));
        assert_eq!(policy.backoff_for(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(1));
        assert_eq!(policy.backoff_for(3), Duration::from_secs(2));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(RetryPolicy::is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(RetryPolicy::is_retryable_status(StatusCode::GATEWAY_TIMEOUT));
        assert!(!RetryPolicy::is_retryable_status(StatusCode::NOT_IMPLEMENTED));
        assert!(!RetryPolicy::is_retryable_status(StatusCode::BAD_REQUEST));
        assert!(!RetryPolicy::is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
    }
}
