//! Per-test context that collects assertion failures.
//!
//! A [`TestContext`] names the running test and records every failed
//! assertion made through it. Failures do not stop the test: they are
//! reported as they happen and the test is marked failed when the context
//! ends, either through [`TestContext::finish`] or when its last handle is
//! dropped.
//!
//! # Example
//!
//! ```rust
//! use testkit_expect::TestContext;
//!
//! let ctx = TestContext::new("arithmetic");
//! ctx.expect(2 + 2).equals(4);
//! ctx.expect(vec![1, 2, 3]).has_len(3);
//! ctx.finish();
//! ```
//!
//! For the free-function style, [`register_t`] installs a context as the
//! calling thread's current one, after which [`expect`] and [`fail`] use it.

mod current;
mod failure;
mod reporter;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::assertions::Expectation;
use crate::clock::{Clock, SystemClock};
use crate::poll::PollConfig;

pub use current::{current, expect, fail, register, register_t};
pub use failure::{AssertionKind, Detail, Failure};
pub use reporter::{Reporter, SilentReporter, StderrReporter};

/// Handle to the running test's context.
///
/// Cloning is cheap; all clones share the same failure list. The context is
/// `Send + Sync`, so assertions may be made from helper threads.
#[derive(Clone)]
pub struct TestContext {
    pub(crate) inner: Arc<ContextInner>,
}

pub(crate) struct ContextInner {
    name: String,
    failures: Mutex<Vec<Failure>>,
    reporter: Box<dyn Reporter>,
    clock: Arc<dyn Clock>,
    poll_config: PollConfig,
}

impl TestContext {
    /// Create a context with the default reporter, clock and poll configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    /// Start building a customized context.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> TestContextBuilder {
        TestContextBuilder::new(name)
    }

    /// Name of the test this context belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Start a chain of assertions on `actual`.
    pub fn expect<T>(&self, actual: T) -> Expectation<T> {
        Expectation::new(self.clone(), actual)
    }

    /// Record a failure with a free-text message.
    pub fn fail(&self, message: impl Into<String>) {
        self.record(Failure::message(message));
    }

    /// Record a failure against this test and report it.
    pub fn record(&self, failure: Failure) {
        tracing::warn!(test = %self.inner.name, kind = %failure.kind(), "assertion failed");
        self.inner.reporter.report(&self.inner.name, &failure);
        self.inner.failures.lock().push(failure);
    }

    /// Failures recorded so far.
    #[must_use]
    pub fn failures(&self) -> Vec<Failure> {
        self.inner.failures.lock().clone()
    }

    /// Number of failures recorded so far.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.inner.failures.lock().len()
    }

    /// Returns `true` if any failure has been recorded.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failure_count() > 0
    }

    /// Remove and return all recorded failures.
    ///
    /// Taken failures no longer fail the test when the context ends.
    pub fn take_failures(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.inner.failures.lock())
    }

    /// Clock used for waiting between polls.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Polling configuration used by `eventually_equals`.
    #[must_use]
    pub fn poll_config(&self) -> PollConfig {
        self.inner.poll_config
    }

    /// End the test, panicking if any failure was recorded.
    ///
    /// # Panics
    ///
    /// Panics with a summary of every recorded failure.
    #[track_caller]
    pub fn finish(self) {
        let failures = self.take_failures();
        tracing::debug!(test = %self.inner.name, failures = failures.len(), "test context finished");
        if !failures.is_empty() {
            panic!("{}", summarize(&self.inner.name, &failures));
        }
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("name", &self.inner.name)
            .field("failures", &self.failure_count())
            .field("poll_config", &self.inner.poll_config)
            .finish_non_exhaustive()
    }
}

impl Drop for ContextInner {
    fn drop(&mut self) {
        let failures = self.failures.get_mut();
        if !failures.is_empty() && !std::thread::panicking() {
            panic!("{}", summarize(&self.name, failures));
        }
    }
}

fn summarize(name: &str, failures: &[Failure]) -> String {
    let mut summary = format!("{} assertion(s) failed in {name}:", failures.len());
    for (i, failure) in failures.iter().enumerate() {
        summary.push_str(&format!("\n\n#{}: {failure}", i + 1));
    }
    summary
}

/// Builder for [`TestContext`].
///
/// ```rust
/// use testkit_expect::clock::MockClock;
/// use testkit_expect::poll::PollConfig;
/// use testkit_expect::{SilentReporter, TestContext};
/// use std::time::Duration;
///
/// let ctx = TestContext::builder("custom")
///     .reporter(SilentReporter)
///     .clock(MockClock::new())
///     .poll_config(PollConfig::new(Duration::from_secs(1), Duration::from_millis(10)).unwrap())
///     .build();
/// assert_eq!(ctx.poll_config().timeout(), Duration::from_secs(1));
/// ```
#[derive(Debug)]
pub struct TestContextBuilder {
    name: String,
    reporter: Box<dyn Reporter>,
    clock: Arc<dyn Clock>,
    poll_config: PollConfig,
}

impl TestContextBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reporter: Box::new(StderrReporter),
            clock: Arc::new(SystemClock::new()),
            poll_config: PollConfig::default(),
        }
    }

    /// Report failures through `reporter` instead of stderr.
    #[must_use]
    pub fn reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Wait between polls on `clock` instead of the system clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Use `config` for `eventually_equals`.
    #[must_use]
    pub fn poll_config(mut self, config: PollConfig) -> Self {
        self.poll_config = config;
        self
    }

    /// Build the context.
    #[must_use]
    pub fn build(self) -> TestContext {
        tracing::debug!(test = %self.name, "test context created");
        TestContext {
            inner: Arc::new(ContextInner {
                name: self.name,
                failures: Mutex::new(Vec::new()),
                reporter: self.reporter,
                clock: self.clock,
                poll_config: self.poll_config,
            }),
        }
    }
}
