//! The polling loop.

use std::time::Duration;

use super::PollConfig;
use crate::clock::Clock;

/// Terminal state of a polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// A polled value matched.
    Succeeded,
    /// The deadline passed without a match.
    TimedOut,
}

/// Result of [`Poller::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome<T> {
    /// How the run ended.
    pub state: PollState,
    /// Number of times the value was polled.
    pub attempts: usize,
    /// Clock time between the first poll and the end of the run.
    pub elapsed: Duration,
    /// The last polled value: the match on success, the final miss otherwise.
    pub last: T,
}

impl<T> PollOutcome<T> {
    /// Returns `true` if the run ended on a match.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == PollState::Succeeded
    }
}

/// Polls a value on a fixed tick until it matches or a deadline passes.
///
/// The value is polled once immediately and then once at every tick boundary
/// (`start + k * interval`). Ticks missed because a poll was slow are skipped,
/// never made up in a burst. A tick that lands exactly on the deadline is
/// still polled, so a value that never matches is polled
/// [`PollConfig::max_attempts`] times. There is no external cancellation.
#[derive(Debug)]
pub struct Poller<'c> {
    config: PollConfig,
    clock: &'c dyn Clock,
}

impl<'c> Poller<'c> {
    /// Create a poller waiting on `clock`.
    #[must_use]
    pub fn new(config: PollConfig, clock: &'c dyn Clock) -> Self {
        Self { config, clock }
    }

    /// Poll until `matches` accepts a value from `poll`, or time runs out.
    pub fn run<T, P, M>(&self, mut poll: P, mut matches: M) -> PollOutcome<T>
    where
        P: FnMut() -> T,
        M: FnMut(&T) -> bool,
    {
        let interval = self.config.interval();
        let start = self.clock.now();
        let deadline = start
            .checked_add(self.config.timeout())
            .unwrap_or(Duration::MAX);
        let mut attempts = 0;

        loop {
            let value = poll();
            attempts += 1;

            if matches(&value) {
                tracing::trace!(attempts, "poll matched");
                return self.finish(PollState::Succeeded, attempts, start, value);
            }

            let now = self.clock.now();
            if now >= deadline {
                return self.finish(PollState::TimedOut, attempts, start, value);
            }

            let next_tick = next_tick_after(start, interval, now);
            if next_tick > deadline {
                self.clock.sleep(deadline - now);
                return self.finish(PollState::TimedOut, attempts, start, value);
            }

            tracing::trace!(attempts, wait = ?(next_tick - now), "no match, waiting for next tick");
            self.clock.sleep(next_tick - now);
        }
    }

    fn finish<T>(
        &self,
        state: PollState,
        attempts: usize,
        start: Duration,
        last: T,
    ) -> PollOutcome<T> {
        let elapsed = self.clock.now().saturating_sub(start);
        tracing::debug!(?state, attempts, ?elapsed, "polling finished");
        PollOutcome {
            state,
            attempts,
            elapsed,
            last,
        }
    }
}

/// First tick boundary `start + k * interval` strictly after `now`.
fn next_tick_after(start: Duration, interval: Duration, now: Duration) -> Duration {
    let interval_nanos = interval.as_nanos().max(1);
    let ticks = now.saturating_sub(start).as_nanos() / interval_nanos + 1;
    ticks
        .checked_mul(interval_nanos)
        .and_then(|nanos| u64::try_from(nanos).ok())
        .map_or(Duration::MAX, |nanos| start.saturating_add(Duration::from_nanos(nanos)))
}
