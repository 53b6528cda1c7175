//! Polling configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Timeout and tick interval for polling assertions.
///
/// Defaults to a 30 second timeout polled every 100 milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    timeout: Duration,
    interval: Duration,
}

impl PollConfig {
    /// Default total time to keep polling.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default time between two polls.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPollConfig`] if `interval` is zero or longer
    /// than `timeout`.
    pub fn new(timeout: Duration, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::invalid_poll_config("interval must be non-zero"));
        }
        if interval > timeout {
            return Err(Error::invalid_poll_config(format!(
                "interval {interval:?} exceeds timeout {timeout:?}"
            )));
        }
        Ok(Self { timeout, interval })
    }

    /// Total time to keep polling.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time between two polls.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of polls made when the value never matches.
    #[must_use]
    pub fn max_attempts(&self) -> u128 {
        1 + self.timeout.as_nanos() / self.interval.as_nanos()
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}
