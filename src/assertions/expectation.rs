//! The fluent assertion chain.

use std::fmt::Debug;
use std::time::Duration;

use super::{capture_panic, describe, describe_callable, structurally_equal};
use crate::context::{AssertionKind, Failure, TestContext};
use crate::error::{fatal, Error};
use crate::kind::{AsTimestamp, Length, Nilable, Timestamp};
use crate::poll::{PollConfig, Poller};

/// Assertions on one actual value.
///
/// Created by [`TestContext::expect`] or [`expect`](crate::expect). Every
/// assertion borrows the value, returns `true` on success and, on failure,
/// records one diagnostic on the context and returns `false`. A failed
/// assertion never stops the test.
///
/// Which assertions are available depends on the actual value's type:
/// `has_len` needs a [`Length`], `is_nil` a [`Nilable`], `panics` a
/// callable, and so on. Using one on an unsuitable type does not compile:
///
/// ```rust,compile_fail
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).is_nil();
/// ```
///
/// ```rust,compile_fail
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).is_not_nil();
/// ```
///
/// ```rust,compile_fail
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).has_len(1);
/// ```
///
/// ```rust,compile_fail
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).is_empty();
/// ```
///
/// ```rust,compile_fail
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).panics::<()>();
/// ```
///
/// ```rust,compile_fail
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).eventually_equals(5);
/// ```
///
/// ```rust,compile_fail
/// use std::time::{Duration, SystemTime};
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).within_time(SystemTime::now(), Duration::from_secs(1));
/// ```
///
/// ```rust,compile_fail
/// # let ctx = testkit_expect::TestContext::new("wrong_kind");
/// ctx.expect(5).contains_string("5");
/// ```
///
/// The same calls on suitable kinds compile:
///
/// ```rust
/// use std::time::{Duration, SystemTime};
/// # let ctx = testkit_expect::TestContext::new("right_kind");
/// ctx.expect(Some(5)).is_not_nil();
/// ctx.expect([5]).has_len(1);
/// ctx.expect(|| ()).panics::<()>();
/// ctx.expect(SystemTime::now()).within_time(SystemTime::now(), Duration::from_secs(60));
/// # ctx.take_failures();
/// ```
///
/// # Example
///
/// ```rust
/// use testkit_expect::TestContext;
///
/// let ctx = TestContext::new("chain");
/// let name = String::from("testkit");
///
/// assert!(ctx.expect(name.clone()).equals("testkit".to_string()));
/// assert!(ctx.expect(name.as_str()).contains_string("kit"));
/// assert!(ctx.expect(&name).is_not_empty());
/// assert!(ctx.expect(None::<u8>).is_nil());
/// ctx.finish();
/// ```
#[derive(Debug)]
pub struct Expectation<T> {
    ctx: TestContext,
    actual: T,
}

impl<T> Expectation<T> {
    pub(crate) fn new(ctx: TestContext, actual: T) -> Self {
        Self { ctx, actual }
    }

    /// The value under test.
    pub fn actual(&self) -> &T {
        &self.actual
    }

    /// The context failures are recorded on.
    pub fn context(&self) -> &TestContext {
        &self.ctx
    }

    fn reject(&self, failure: Failure) -> bool {
        self.ctx.record(failure);
        false
    }

    /// Assert that calling the actual value panics.
    ///
    /// The panic is caught and does not propagate.
    ///
    /// ```rust
    /// # let ctx = testkit_expect::TestContext::new("panics");
    /// let divide = |d: u32| move || 10 / d;
    /// assert!(ctx.expect(divide(0)).panics());
    /// ```
    pub fn panics<R>(&self) -> bool
    where
        T: Fn() -> R,
    {
        if capture_panic(|| (self.actual)()).is_err() {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::Panics)
                .with_note("Given function didn't panic")
                .with_detail("Actual", describe_callable::<T>()),
        )
    }

    /// Assert that calling the actual value eventually returns `expected`.
    ///
    /// Polls with the context's [`PollConfig`] (30 seconds, every 100
    /// milliseconds by default) on the context's clock, stopping at the
    /// first match. This blocks the calling thread.
    pub fn eventually_equals<R>(&self, expected: R) -> bool
    where
        T: Fn() -> R,
        R: PartialEq + Debug,
    {
        self.eventually_equals_with(expected, self.ctx.poll_config())
    }

    /// Like [`eventually_equals`](Self::eventually_equals) with an explicit
    /// polling configuration.
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use std::time::Duration;
    /// use testkit_expect::{poll::PollConfig, TestContext};
    ///
    /// let ctx = TestContext::new("eventually");
    /// let ticks = Cell::new(0);
    /// let config = PollConfig::new(Duration::from_secs(1), Duration::from_millis(5)).unwrap();
    ///
    /// let counter = || { ticks.set(ticks.get() + 1); ticks.get() };
    /// assert!(ctx.expect(counter).eventually_equals_with(3, config));
    /// ```
    pub fn eventually_equals_with<R>(&self, expected: R, config: PollConfig) -> bool
    where
        T: Fn() -> R,
        R: PartialEq + Debug,
    {
        let outcome = Poller::new(config, self.ctx.clock()).run(
            || (self.actual)(),
            |value| structurally_equal(&expected, value),
        );
        if outcome.is_success() {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::EventuallyEquals)
                .with_note(format!(
                    "No match after {} attempts in {:?}",
                    outcome.attempts, outcome.elapsed
                ))
                .with_detail("Expected", describe(&expected))
                .with_detail("Actual", describe(&outcome.last)),
        )
    }
}

impl<T: PartialEq + Debug> Expectation<T> {
    fn check_equals(&self, kind: AssertionKind, expected: &T) -> bool {
        if structurally_equal(expected, &self.actual) {
            return true;
        }
        let mut failure = Failure::new(kind);
        if kind != AssertionKind::Equals {
            failure = failure.with_note(format!("Checked as Equals({expected:?})"));
        }
        self.reject(
            failure
                .with_detail("Expected", describe(expected))
                .with_detail("Actual", describe(&self.actual)),
        )
    }

    /// Assert that the actual value equals `expected`.
    pub fn equals(&self, expected: T) -> bool {
        self.check_equals(AssertionKind::Equals, &expected)
    }

    /// Assert that the actual value differs from `other`.
    pub fn not_equals(&self, other: T) -> bool {
        if !structurally_equal(&other, &self.actual) {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::NotEquals)
                .with_detail("Other", describe(&other))
                .with_detail("Actual", describe(&self.actual)),
        )
    }
}

impl Expectation<bool> {
    /// Assert that the actual value is `true`.
    pub fn is_true(&self) -> bool {
        self.check_equals(AssertionKind::IsTrue, &true)
    }

    /// Assert that the actual value is `false`.
    pub fn is_false(&self) -> bool {
        self.check_equals(AssertionKind::IsFalse, &false)
    }
}

impl<T: AsRef<str> + Debug> Expectation<T> {
    /// Assert that the actual string contains `substr`.
    pub fn contains_string(&self, substr: &str) -> bool {
        if self.actual.as_ref().contains(substr) {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::ContainsString)
                .with_detail("String", substr)
                .with_detail("Actual", describe(&self.actual)),
        )
    }
}

impl<T: Length> Expectation<T> {
    /// Assert that the actual value has exactly `expected` elements.
    ///
    /// Strings are measured in bytes.
    pub fn has_len(&self, expected: usize) -> bool {
        let length = self.actual.length();
        if length == expected {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::HasLen)
                .with_detail("Expected", expected.to_string())
                .with_detail("Actual", length.to_string()),
        )
    }
}

impl<T: Length + Debug> Expectation<T> {
    /// Assert that the actual value has no elements.
    ///
    /// For strings this is equality with `""`.
    pub fn is_empty(&self) -> bool {
        if self.actual.length() == 0 {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::IsEmpty)
                .with_note("Checked as Equals(empty)")
                .with_detail("Actual", describe(&self.actual)),
        )
    }

    /// Assert that the actual value has at least one element.
    pub fn is_not_empty(&self) -> bool {
        if self.actual.length() != 0 {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::IsNotEmpty)
                .with_note("Checked as NotEquals(empty)")
                .with_detail("Actual", describe(&self.actual)),
        )
    }
}

impl<T: Nilable + Debug> Expectation<T> {
    /// Assert that the actual value is absent.
    pub fn is_nil(&self) -> bool {
        if self.actual.is_nil() {
            return true;
        }
        self.reject(Failure::new(AssertionKind::IsNil).with_detail("Actual", describe(&self.actual)))
    }

    /// Assert that the actual value is present.
    pub fn is_not_nil(&self) -> bool {
        if !self.actual.is_nil() {
            return true;
        }
        self.reject(Failure::new(AssertionKind::IsNotNil).with_detail("Actual", describe(&self.actual)))
    }
}

impl<T: AsTimestamp> Expectation<T> {
    /// Assert that the actual time lies strictly between `other - diff` and
    /// `other + diff`.
    ///
    /// Both bounds are excluded. A bound that falls outside the timestamp
    /// type's range leaves that side unbounded.
    ///
    /// # Panics
    ///
    /// Fails fast with [`Error::NilReference`] if the actual value is an
    /// absent reference such as `None::<&SystemTime>`.
    ///
    /// ```rust
    /// use std::time::{Duration, SystemTime};
    /// # let ctx = testkit_expect::TestContext::new("within_time");
    /// let now = SystemTime::now();
    /// let soon = now + Duration::from_millis(400);
    /// assert!(ctx.expect(soon).within_time(now, Duration::from_secs(1)));
    /// ```
    #[track_caller]
    pub fn within_time(&self, other: T::Time, diff: Duration) -> bool {
        let Some(actual) = self.actual.as_timestamp() else {
            fatal(Error::nil_reference(AssertionKind::WithinTime.name()));
        };
        let lower = other.checked_sub(diff);
        let upper = other.checked_add(diff);

        let above_lower = lower.map_or(true, |bound| actual > bound);
        let below_upper = upper.map_or(true, |bound| actual < bound);
        if above_lower && below_upper {
            return true;
        }
        self.reject(
            Failure::new(AssertionKind::WithinTime)
                .with_detail(
                    "Range",
                    format!("{} ~ {}", render_bound(lower), render_bound(upper)),
                )
                .with_detail("Actual", format!("{actual:?}")),
        )
    }
}

fn render_bound<X: Timestamp>(bound: Option<X>) -> String {
    bound.map_or_else(|| "unbounded".to_string(), |b| format!("{b:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, MockClock};
    use crate::context::SilentReporter;
    use crate::kind::Nil;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::time::{Instant, SystemTime};

    use chrono::{DateTime, Utc};

    fn ctx() -> TestContext {
        TestContext::builder("expectation")
            .reporter(SilentReporter)
            .clock(MockClock::new())
            .build()
    }

    fn single_failure(ctx: &TestContext) -> Failure {
        let mut failures = ctx.take_failures();
        assert_eq!(failures.len(), 1, "expected exactly one failure: {failures:?}");
        failures.remove(0)
    }

    #[test]
    fn test_equals() {
        let ctx = ctx();
        assert!(ctx.expect(vec![1, 2]).equals(vec![1, 2]));
        assert!(!ctx.expect(vec![1, 2]).equals(vec![2, 1]));

        let failure = single_failure(&ctx);
        assert_eq!(failure.kind(), AssertionKind::Equals);
        assert_eq!(failure.detail("Expected"), Some("[Vec<i32>] [2, 1]"));
        assert_eq!(failure.detail("Actual"), Some("[Vec<i32>] [1, 2]"));
    }

    #[test]
    fn test_not_equals() {
        let ctx = ctx();
        assert!(ctx.expect("a").not_equals("b"));
        assert!(!ctx.expect("a").not_equals("a"));

        let failure = single_failure(&ctx);
        assert_eq!(failure.kind(), AssertionKind::NotEquals);
        assert_eq!(failure.detail("Other"), Some("[&str] \"a\""));
    }

    #[test]
    fn test_nested_option_equality() {
        let ctx = ctx();
        let actual: HashMap<&str, Option<Vec<u8>>> = [("a", None), ("b", Some(vec![1]))].into();
        let expected: HashMap<&str, Option<Vec<u8>>> = [("b", Some(vec![1])), ("a", None)].into();
        assert!(ctx.expect(actual).equals(expected));
        ctx.finish();
    }

    #[test]
    fn test_contains_string() {
        let ctx = ctx();
        assert!(ctx.expect("hello world").contains_string("lo wo"));
        assert!(ctx.expect(String::from("hello")).contains_string(""));
        assert!(!ctx.expect("hello").contains_string("xyz"));

        let failure = single_failure(&ctx);
        assert_eq!(failure.detail("String"), Some("xyz"));
        assert_eq!(failure.detail("Actual"), Some("[&str] \"hello\""));
    }

    #[test]
    fn test_is_true_and_is_false() {
        let ctx = ctx();
        assert!(ctx.expect(true).is_true());
        assert!(ctx.expect(false).is_false());
        assert!(!ctx.expect(false).is_true());
        assert!(!ctx.expect(true).is_false());

        let failures = ctx.take_failures();
        let kinds: Vec<_> = failures.iter().map(Failure::kind).collect();
        assert_eq!(kinds, vec![AssertionKind::IsTrue, AssertionKind::IsFalse]);
        assert_eq!(failures[0].note(), Some("Checked as Equals(true)"));
        assert_eq!(
            failures[1].to_string(),
            "IsFalse assertion failed. \n Checked as Equals(false) \n Expected: \n\t\t [bool] false \n Actual: \n\t\t [bool] true"
        );
    }

    #[test]
    fn test_is_empty_and_is_not_empty() {
        let ctx = ctx();
        assert!(ctx.expect("").is_empty());
        assert!(ctx.expect(Vec::<u8>::new()).is_empty());
        assert!(ctx.expect("x").is_not_empty());
        assert!(!ctx.expect("x").is_empty());
        assert!(!ctx.expect(String::new()).is_not_empty());

        let failures = ctx.take_failures();
        assert_eq!(failures[0].kind(), AssertionKind::IsEmpty);
        assert_eq!(failures[0].note(), Some("Checked as Equals(empty)"));
        assert_eq!(failures[1].note(), Some("Checked as NotEquals(empty)"));
        assert_eq!(failures[1].kind(), AssertionKind::IsNotEmpty);
        assert_eq!(failures[1].detail("Actual"), Some("[String] \"\""));
    }

    #[test]
    fn test_is_nil() {
        let ctx = ctx();
        let value = 3;
        let ptr: *const i32 = &value;

        assert!(ctx.expect(Nil).is_nil());
        assert!(ctx.expect(None::<String>).is_nil());
        assert!(ctx.expect(std::ptr::null::<i32>()).is_nil());
        assert!(!ctx.expect(Some(1)).is_nil());
        assert!(!ctx.expect(ptr).is_nil());

        let failures = ctx.take_failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].detail("Actual"), Some("[Option<i32>] Some(1)"));
    }

    #[test]
    fn test_is_not_nil() {
        let ctx = ctx();
        assert!(ctx.expect(Some("x")).is_not_nil());
        assert!(!ctx.expect(Nil).is_not_nil());

        let failure = single_failure(&ctx);
        assert_eq!(failure.kind(), AssertionKind::IsNotNil);
        assert_eq!(failure.detail("Actual"), Some("[nil] nil"));
    }

    #[test]
    fn test_has_len() {
        let ctx = ctx();
        assert!(ctx.expect(vec!['a', 'b', 'c']).has_len(3));
        assert!(!ctx.expect(vec!['a', 'b', 'c']).has_len(4));
        assert!(ctx.expect("four").has_len(4));

        let failure = single_failure(&ctx);
        assert_eq!(failure.detail("Expected"), Some("4"));
        assert_eq!(failure.detail("Actual"), Some("3"));
    }

    #[test]
    fn test_panics() {
        let ctx = ctx();
        assert!(ctx.expect(|| panic!("expected")).panics());
        assert!(ctx
            .expect(|| {
                let empty: Vec<u8> = Vec::new();
                empty[1]
            })
            .panics());
        assert!(!ctx.expect(|| 1).panics());

        let failure = single_failure(&ctx);
        assert_eq!(failure.kind(), AssertionKind::Panics);
        assert_eq!(failure.note(), Some("Given function didn't panic"));
    }

    #[test]
    fn test_eventually_equals_matches_after_some_ticks() {
        let clock = MockClock::new();
        let ctx = TestContext::builder("eventually")
            .reporter(SilentReporter)
            .clock(clock.clone())
            .build();
        let calls = Cell::new(0);

        let ready_on_fifth = || {
            calls.set(calls.get() + 1);
            if calls.get() >= 5 {
                "ready"
            } else {
                "pending"
            }
        };

        assert!(ctx.expect(ready_on_fifth).eventually_equals("ready"));
        assert_eq!(calls.get(), 5);
        assert_eq!(clock.now(), Duration::from_millis(400));
        ctx.finish();
    }

    #[test]
    fn test_eventually_equals_times_out() {
        let clock = MockClock::new();
        let ctx = TestContext::builder("eventually")
            .reporter(SilentReporter)
            .clock(clock.clone())
            .build();
        let calls = Cell::new(0_u32);

        let never = || {
            calls.set(calls.get() + 1);
            calls.get()
        };

        assert!(!ctx.expect(never).eventually_equals(0));
        assert_eq!(calls.get(), 301);
        assert_eq!(clock.now(), Duration::from_secs(30));

        let failure = single_failure(&ctx);
        assert_eq!(failure.kind(), AssertionKind::EventuallyEquals);
        assert_eq!(failure.detail("Expected"), Some("[u32] 0"));
        assert_eq!(failure.detail("Actual"), Some("[u32] 301"));
        assert_eq!(failure.note(), Some("No match after 301 attempts in 30s"));
    }

    #[test]
    fn test_eventually_equals_with_custom_config() {
        let clock = MockClock::new();
        let ctx = TestContext::builder("eventually")
            .reporter(SilentReporter)
            .clock(clock.clone())
            .build();
        let config = PollConfig::new(Duration::from_secs(1), Duration::from_millis(250)).unwrap();

        assert!(!ctx.expect(|| false).eventually_equals_with(true, config));
        assert_eq!(clock.now(), Duration::from_secs(1));
        assert_eq!(clock.sleep_count(), 4);
        ctx.take_failures();
    }

    #[test]
    fn test_within_time_open_interval() {
        let ctx = ctx();
        let other = SystemTime::now();
        let diff = Duration::from_secs(10);

        assert!(ctx.expect(other).within_time(other, diff));
        assert!(ctx.expect(other + diff / 2).within_time(other, diff));
        assert!(ctx.expect(other - diff / 2).within_time(other, diff));
        assert!(!ctx.expect(other + diff).within_time(other, diff));
        assert!(!ctx.expect(other - diff).within_time(other, diff));
        assert!(!ctx.expect(other + diff * 2).within_time(other, diff));
        assert!(!ctx.expect(other).within_time(other, Duration::ZERO));

        let failures = ctx.take_failures();
        assert_eq!(failures.len(), 4);
        assert!(failures.iter().all(|f| f.kind() == AssertionKind::WithinTime));
        assert!(failures[0].detail("Range").unwrap().contains(" ~ "));
    }

    #[test]
    fn test_within_time_references_and_chrono() {
        let ctx = ctx();
        let other = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let actual = DateTime::<Utc>::from_timestamp(1_700_000_001, 0).unwrap();

        assert!(ctx.expect(&actual).within_time(other, Duration::from_secs(2)));
        assert!(ctx.expect(Some(&actual)).within_time(other, Duration::from_secs(2)));
        assert!(ctx.expect(Some(actual)).within_time(other, Duration::from_millis(1001)));
        assert!(!ctx.expect(actual).within_time(other, Duration::from_secs(1)));
        ctx.take_failures();
    }

    #[test]
    fn test_within_time_unbounded_side() {
        let ctx = ctx();
        let max = DateTime::<Utc>::MAX_UTC;
        assert!(ctx.expect(max).within_time(max, Duration::from_secs(1)));
        ctx.finish();
    }

    #[test]
    #[should_panic(expected = "WithinTime: value is nil")]
    fn test_within_time_nil_reference_fails_fast() {
        let ctx = ctx();
        ctx.expect(None::<&Instant>).within_time(Instant::now(), Duration::from_secs(1));
    }

    #[test]
    fn test_failure_does_not_stop_later_assertions() {
        let ctx = ctx();
        ctx.expect(1).equals(2);
        ctx.expect("a").is_empty();
        assert!(ctx.expect(3).equals(3));
        assert_eq!(ctx.take_failures().len(), 2);
    }
}
