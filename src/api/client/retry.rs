//! Caller-supplied retry policy for Places requests.

use std::time::Duration;

use crate::api::status::PlaceStatus;
use crate::error::ConfigError;

/// Fixed-delay retry policy scoped to specific remote statuses.
///
/// Only the statuses named here trigger a retry; an `INVALID_REQUEST` policy
/// does not cover `OVER_QUERY_LIMIT`. Statuses that can never be retried
/// (`OK`, `ZERO_RESULTS`, `NOT_FOUND`, `REQUEST_DENIED`) are rejected when the
/// policy is built.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    max: u32,
    statuses: Vec<PlaceStatus>,
    delay: Duration,
    timeout: Option<Duration>,
}

/// What the loop does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RetryStep {
    /// Sleep, then dispatch again.
    Wait(Duration),
    /// The deadline lands inside the next wait: sleep until it, then stop.
    WaitForDeadline(Duration),
    /// The wall-clock ceiling has already passed.
    TimedOut,
    /// The attempt ceiling has been reached.
    Exhausted,
}

impl RetryOptions {
    /// Policy retrying `status` up to `max` total attempts, `delay` apart.
    pub fn new(max: u32, status: PlaceStatus, delay: Duration) -> Result<Self, ConfigError> {
        if max == 0 {
            return Err(ConfigError::Invalid(
                "retry max must be a positive attempt count".to_string(),
            ));
        }
        Ok(Self {
            max,
            statuses: vec![retryable(status)?],
            delay,
            timeout: None,
        })
    }

    /// Also retry on `status`.
    pub fn also_on(mut self, status: PlaceStatus) -> Result<Self, ConfigError> {
        let status = retryable(status)?;
        if !self.statuses.contains(&status) {
            self.statuses.push(status);
        }
        Ok(self)
    }

    /// Give up once `timeout` has elapsed since the first dispatch.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "retry timeout must be greater than zero".to_string(),
            ));
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn statuses(&self) -> &[PlaceStatus] {
        &self.statuses
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether an observed status licenses another attempt under this policy.
    pub fn retries_on(&self, status: &PlaceStatus) -> bool {
        status.is_retryable() && self.statuses.contains(status)
    }

    /// Decide the next step after attempt number `attempt` (1-based) failed
    /// with a status this policy retries.
    ///
    /// The deadline is checked before the attempt ceiling, so a check where
    /// both have been reached reports a timeout.
    pub(super) fn next_step(&self, attempt: u32, elapsed: Duration) -> RetryStep {
        if let Some(timeout) = self.timeout {
            if elapsed >= timeout {
                return RetryStep::TimedOut;
            }
        }
        if attempt >= self.max {
            return RetryStep::Exhausted;
        }
        match self.timeout {
            Some(timeout) if elapsed.saturating_add(self.delay) >= timeout => {
                RetryStep::WaitForDeadline(timeout - elapsed)
            }
            _ => RetryStep::Wait(self.delay),
        }
    }
}

fn retryable(status: PlaceStatus) -> Result<PlaceStatus, ConfigError> {
    if status.is_retryable() {
        Ok(status)
    } else {
        Err(ConfigError::Invalid(format!(
            "retry status {status} can never be retried"
        )))
    }
}
