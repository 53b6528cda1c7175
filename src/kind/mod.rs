//! Capability traits describing which kinds of values an assertion accepts.
//!
//! Assertions such as [`has_len`](crate::assertions::Expectation::has_len) or
//! [`is_nil`](crate::assertions::Expectation::is_nil) only make sense for some
//! kinds of values. Instead of inspecting values at runtime, each kind is a
//! trait implemented for the supported types, so asking for the length of an
//! integer is a compile error rather than an aborted test.
//!
//! - [`Nilable`] - values that can be absent (`Option`, raw pointers, [`Nil`])
//! - [`Length`] - sequences, maps, sets and strings
//! - [`Timestamp`] / [`AsTimestamp`] - points in time and references to them

mod length;
mod nilable;
mod timestamp;

pub use length::Length;
pub use nilable::{Nil, Nilable};
pub use timestamp::{AsTimestamp, Timestamp};
