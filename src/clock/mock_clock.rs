//! `MockClock` implementation for virtual time control.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use super::Clock;

/// A mock clock that provides virtual time control for tests.
///
/// Sleeping on a `MockClock` returns immediately and moves virtual time
/// forward by the requested duration, so a 30 second polling assertion
/// finishes in microseconds. Every sleep is recorded and can be inspected
/// with [`sleeps`](Self::sleeps).
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned and shared across threads.
/// All clones share the same underlying time state.
///
/// # Example
///
/// ```rust
/// use testkit_expect::clock::{Clock, MockClock};
/// use std::time::Duration;
///
/// let clock = MockClock::new();
/// let clock2 = clock.clone();
///
/// clock.advance(Duration::from_secs(10));
/// assert_eq!(clock2.now(), Duration::from_secs(10));
///
/// clock2.sleep(Duration::from_millis(100));
/// assert_eq!(clock.now(), Duration::from_millis(10_100));
/// assert_eq!(clock.sleeps(), vec![Duration::from_millis(100)]);
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    inner: Arc<Mutex<ClockState>>,
}

#[derive(Debug)]
struct ClockState {
    /// Current time as duration since clock creation
    current_time: Duration,
    /// Durations passed to `sleep`, in call order
    sleeps: Vec<Duration>,
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClock {
    /// Creates a new `MockClock` starting at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_start_time(Duration::ZERO)
    }

    /// Creates a new `MockClock` starting at the specified time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use testkit_expect::clock::{Clock, MockClock};
    /// use std::time::Duration;
    ///
    /// let clock = MockClock::with_start_time(Duration::from_secs(100));
    /// assert_eq!(clock.now(), Duration::from_secs(100));
    /// ```
    #[must_use]
    pub fn with_start_time(start: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ClockState {
                current_time: start,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Advances the clock by the specified duration.
    ///
    /// Unlike [`Clock::sleep`], the advance is not recorded as a sleep.
    pub fn advance(&self, duration: Duration) {
        self.inner.lock().current_time += duration;
    }

    /// Sets the clock to an absolute time, possibly moving it backwards.
    pub fn set(&self, time: Duration) {
        self.inner.lock().current_time = time;
    }

    /// Advances the clock to a specific time.
    ///
    /// Only moves time forward; earlier times are a no-op.
    pub fn advance_to(&self, time: Duration) {
        let mut state = self.inner.lock();
        if time > state.current_time {
            state.current_time = time;
        }
    }

    /// Durations of every sleep taken so far, in call order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.lock().sleeps.clone()
    }

    /// Number of sleeps taken so far.
    #[must_use]
    pub fn sleep_count(&self) -> usize {
        self.inner.lock().sleeps.len()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        self.inner.lock().current_time
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.inner.lock();
        state.current_time += duration;
        state.sleeps.push(duration);
    }
}
