//! Error definitions
//!
//! Errors here are programmer errors: using the crate in a way that can never
//! produce a meaningful assertion. They are raised through [`fatal`], which
//! aborts the current test instead of recording an ordinary failure.

use thiserror::Error;

/// Main error type for testkit-expect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No live test context is registered on the calling thread.
    #[error("No test context registered on this thread. Did you forget to call register_t()?")]
    NotRegistered,

    /// An assertion needed to dereference a value that was absent.
    #[error("{assertion}: value is nil")]
    NilReference {
        /// Name of the assertion that tried to dereference the value
        assertion: &'static str,
    },

    /// Polling configuration rejected by [`PollConfig::new`](crate::poll::PollConfig::new).
    #[error("Invalid poll configuration: {0}")]
    InvalidPollConfig(String),
}

impl Error {
    /// Create a nil reference error for the named assertion.
    #[must_use]
    pub fn nil_reference(assertion: &'static str) -> Self {
        Self::NilReference { assertion }
    }

    /// Create an invalid poll configuration error.
    #[must_use]
    pub fn invalid_poll_config(message: impl Into<String>) -> Self {
        Self::InvalidPollConfig(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Abort the running test with a programmer error.
///
/// The panic carries the error's display text so `#[should_panic(expected = ..)]`
/// can match on it. It is never recorded as an assertion failure.
#[track_caller]
pub fn fatal(error: Error) -> ! {
    tracing::error!(%error, "aborting test on programmer error");
    panic!("{error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::nil_reference("WithinTime").to_string(),
            "WithinTime: value is nil"
        );
        assert!(Error::NotRegistered.to_string().contains("register_t()"));
        assert_eq!(
            Error::invalid_poll_config("interval is zero").to_string(),
            "Invalid poll configuration: interval is zero"
        );
    }

    #[test]
    #[should_panic(expected = "Did you forget to call register_t()?")]
    fn test_fatal_panics_with_message() {
        fatal(Error::NotRegistered);
    }
}
