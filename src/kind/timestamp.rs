//! Timestamps and references to timestamps.

use std::fmt::Debug;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeDelta, Utc};

/// A point in time that can be shifted by a [`Duration`].
pub trait Timestamp: Copy + PartialOrd + Debug {
    /// `self + diff`, or `None` if the result is out of range.
    fn checked_add(self, diff: Duration) -> Option<Self>;

    /// `self - diff`, or `None` if the result is out of range.
    fn checked_sub(self, diff: Duration) -> Option<Self>;
}

impl Timestamp for SystemTime {
    fn checked_add(self, diff: Duration) -> Option<Self> {
        SystemTime::checked_add(&self, diff)
    }

    fn checked_sub(self, diff: Duration) -> Option<Self> {
        SystemTime::checked_sub(&self, diff)
    }
}

impl Timestamp for Instant {
    fn checked_add(self, diff: Duration) -> Option<Self> {
        Instant::checked_add(&self, diff)
    }

    fn checked_sub(self, diff: Duration) -> Option<Self> {
        Instant::checked_sub(&self, diff)
    }
}

macro_rules! impl_chrono_timestamp {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Timestamp for $ty {
                fn checked_add(self, diff: Duration) -> Option<Self> {
                    self.checked_add_signed(TimeDelta::from_std(diff).ok()?)
                }

                fn checked_sub(self, diff: Duration) -> Option<Self> {
                    self.checked_sub_signed(TimeDelta::from_std(diff).ok()?)
                }
            }
        )*
    };
}

impl_chrono_timestamp!(
    DateTime<Utc>,
    DateTime<FixedOffset>,
    DateTime<Local>,
    NaiveDateTime,
);

/// A value that is, or refers to, a [`Timestamp`].
///
/// Implemented for every timestamp type `X` as well as `&X`, `Option<X>` and
/// `Option<&X>`. An absent reference yields `None`.
pub trait AsTimestamp {
    /// The referenced timestamp type.
    type Time: Timestamp;

    /// Resolve the timestamp, or `None` if the reference is absent.
    fn as_timestamp(&self) -> Option<Self::Time>;
}

macro_rules! impl_as_timestamp {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsTimestamp for $ty {
                type Time = $ty;

                fn as_timestamp(&self) -> Option<$ty> {
                    Some(*self)
                }
            }

            impl AsTimestamp for &$ty {
                type Time = $ty;

                fn as_timestamp(&self) -> Option<$ty> {
                    Some(**self)
                }
            }

            impl AsTimestamp for Option<$ty> {
                type Time = $ty;

                fn as_timestamp(&self) -> Option<$ty> {
                    *self
                }
            }

            impl AsTimestamp for Option<&$ty> {
                type Time = $ty;

                fn as_timestamp(&self) -> Option<$ty> {
                    self.copied()
                }
            }
        )*
    };
}

impl_as_timestamp!(
    SystemTime,
    Instant,
    DateTime<Utc>,
    DateTime<FixedOffset>,
    DateTime<Local>,
    NaiveDateTime,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_shift() {
        let now = SystemTime::now();
        let later = Timestamp::checked_add(now, Duration::from_secs(5)).unwrap();
        assert_eq!(later.duration_since(now).unwrap(), Duration::from_secs(5));
        let earlier = Timestamp::checked_sub(now, Duration::from_secs(5)).unwrap();
        assert!(earlier < now);
    }

    #[test]
    fn test_chrono_shift() {
        let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let later = Timestamp::checked_add(base, Duration::from_millis(1500)).unwrap();
        assert_eq!((later - base).num_milliseconds(), 1500);
    }

    #[test]
    fn test_chrono_overflow_is_none() {
        assert!(Timestamp::checked_add(DateTime::<Utc>::MAX_UTC, Duration::from_secs(1)).is_none());
        assert!(Timestamp::checked_sub(DateTime::<Utc>::MIN_UTC, Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_as_timestamp_references() {
        let now = Instant::now();
        assert_eq!(now.as_timestamp(), Some(now));
        assert_eq!((&now).as_timestamp(), Some(now));
        assert_eq!(Some(&now).as_timestamp(), Some(now));
        assert_eq!(None::<&Instant>.as_timestamp(), None);
        assert_eq!(None::<Instant>.as_timestamp(), None);
    }
}
