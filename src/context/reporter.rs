//! Where recorded failures are reported as they happen.

use std::fmt::Debug;

use super::Failure;

/// Receives each failure as soon as it is recorded.
///
/// The context keeps its own list of failures regardless of the reporter;
/// the reporter decides how failures reach a human while the test runs.
pub trait Reporter: Send + Sync + Debug {
    /// Report a failure recorded against the test `test_name`.
    fn report(&self, test_name: &str, failure: &Failure);
}

/// Writes failures to standard error.
///
/// Under libtest, stderr is captured per test and shown when the test fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&self, test_name: &str, failure: &Failure) {
        eprintln!("[{test_name}] {failure}");
    }
}

/// Discards failures; they are still recorded on the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _test_name: &str, _failure: &Failure) {}
}
