//! Time sources for polling assertions
//!
//! [`eventually_equals`](crate::assertions::Expectation::eventually_equals)
//! waits between polls through a [`Clock`]. Real tests use [`SystemClock`];
//! tests of time-dependent behavior can swap in [`MockClock`], whose sleeps
//! advance virtual time instantly.
//!
//! # Example
//!
//! ```rust
//! use testkit_expect::clock::{Clock, MockClock};
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! assert_eq!(clock.now(), Duration::ZERO);
//!
//! clock.sleep(Duration::from_secs(10));
//! assert_eq!(clock.now(), Duration::from_secs(10));
//! ```

mod mock_clock;
mod system_clock;

use std::fmt::Debug;
use std::time::Duration;

pub use mock_clock::MockClock;
pub use system_clock::SystemClock;

/// A source of time that can block the caller.
///
/// Time is measured as a [`Duration`] since an arbitrary, clock-specific
/// origin; only differences between readings are meaningful.
pub trait Clock: Send + Sync + Debug {
    /// Current time since the clock's origin.
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}
