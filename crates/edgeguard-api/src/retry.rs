// Retry policy for the transport.
//
// Requests failing with 429 or a 5xx (other than 501) are retried with
// exponential backoff bounded by `wait_min` / `wait_max`. A `Retry-After`
// header, when present, replaces the computed delay (still capped).

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

pub const DEFAULT_RETRY_MAX: u32 = 3;
pub const DEFAULT_RETRY_WAIT_MIN: Duration = Duration::from_secs(1);
pub const DEFAULT_RETRY_WAIT_MAX: Duration = Duration::from_secs(30);

/// Backoff configuration. `retry_max == 0` disables retries entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub retry_max: u32,

    /// Delay before the first retry. Default: 1s.
    pub wait_min: Duration,

    /// Upper bound on any single delay. Default: 30s.
    pub wait_max: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retry_max: 0,
            wait_min: DEFAULT_RETRY_WAIT_MIN,
            wait_max: DEFAULT_RETRY_WAIT_MAX,
        }
    }
}

impl RetryConfig {
    /// Retries disabled: every request is sent exactly once.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// The stock retrying policy: 3 retries between 1s and 30s.
    pub fn with_defaults() -> Self {
        Self {
            retry_max: DEFAULT_RETRY_MAX,
            ..Self::default()
        }
    }

    pub fn enabled(&self) -> bool {
        self.retry_max > 0
    }

    /// `wait_min * 2^retry`, capped at `wait_max`.
    pub fn backoff(&self, retry: u32) -> Duration {
        2u32.checked_pow(retry)
            .and_then(|factor| self.wait_min.checked_mul(factor))
            .map_or(self.wait_max, |d| d.min(self.wait_max))
    }

    /// Delay before retry number `retry` (0-based), honouring `Retry-After`.
    pub(crate) fn delay(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.map_or_else(|| self.backoff(retry), |d| d.min(self.wait_max))
    }
}

pub(crate) fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
pub(crate) fn retry_after(status: StatusCode, headers: &HeaderMap) -> Option<Duration> {
    if status != StatusCode::TOO_MANY_REQUESTS && status != StatusCode::SERVICE_UNAVAILABLE {
        return None;
    }
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
