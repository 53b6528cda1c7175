//! Bounded polling until a value matches.
//!
//! [`Poller`] drives the retry loop behind
//! [`eventually_equals`](crate::assertions::Expectation::eventually_equals):
//! poll once immediately, then once per tick, until the polled value matches
//! or the deadline passes.
//!
//! # Example
//!
//! ```rust
//! use testkit_expect::clock::MockClock;
//! use testkit_expect::poll::{PollConfig, PollState, Poller};
//! use std::time::Duration;
//!
//! let clock = MockClock::new();
//! let poller = Poller::new(PollConfig::default(), &clock);
//!
//! let mut calls = 0;
//! let outcome = poller.run(|| { calls += 1; calls }, |v| *v == 3);
//!
//! assert_eq!(outcome.state, PollState::Succeeded);
//! assert_eq!(outcome.attempts, 3);
//! assert_eq!(outcome.elapsed, Duration::from_millis(200));
//! ```

mod config;
mod scheduler;

pub use config::PollConfig;
pub use scheduler::{PollOutcome, PollState, Poller};
