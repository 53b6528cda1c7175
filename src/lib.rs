//! # testkit-expect 🧰
//!
//! > Fluent assertions for Rust tests that keep going after a failure
//!
//! **testkit-expect** lets a test register its context once and then chain
//! readable assertions against any value. A failed assertion is recorded and
//! reported, the test carries on, and the test is marked failed when its
//! context ends.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_expect::prelude::*;
//!
//! let ctx = TestContext::new("quick_start");
//!
//! ctx.expect(2 + 2).equals(4);
//! ctx.expect("hello world").contains_string("lo wo");
//! ctx.expect(vec![1, 2, 3]).has_len(3);
//! ctx.expect(None::<u32>).is_nil();
//! ctx.expect(|| panic!("boom")).panics();
//!
//! ctx.finish(); // panics here if any assertion above failed
//! ```
//!
//! With the `macros` feature (on by default) the context is set up for you:
//!
//! ```rust,ignore
//! #[testkit_expect::test]
//! fn eventually_consistent(ctx: TestContext) {
//!     let cache = start_cache();
//!     ctx.expect(|| cache.get("key")).eventually_equals(Some("value"));
//! }
//! ```
//!
//! ## Features
//!
//! - ✅ **Non-aborting assertions** - every failure is recorded, not just the first
//! - ⏱️ **Eventual consistency** - poll a closure until it returns the expected value
//! - 🧪 **Mock clock** - run 30 second polling assertions instantly
//! - 🌱 **Environment reset** - each registered test starts from the same environment
//! - 🔒 **Compile-time kinds** - `has_len` on an integer is a type error, not a crash

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod clock;
pub mod context;
pub mod env;
pub mod error;
pub mod kind;
pub mod poll;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_expect::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::Expectation;
    pub use crate::clock::{Clock, MockClock, SystemClock};
    pub use crate::context::{expect, fail, register_t, TestContext};
    pub use crate::error::{Error, Result};
    pub use crate::kind::Nil;
    pub use crate::poll::PollConfig;
}

// Re-exports
pub use context::{
    current, expect, fail, register, register_t, Failure, Reporter, SilentReporter,
    StderrReporter, TestContext, TestContextBuilder,
};
pub use error::{Error, Result};

/// Record a formatted failure against the thread's current test context.
///
/// # Panics
///
/// Fails fast if no test context is registered on this thread.
///
/// # Example
///
/// ```rust
/// let _t = testkit_expect::register_t("fail_macro");
/// let user_id = 3;
/// testkit_expect::fail!("user {} was not found", user_id);
/// # _t.take_failures();
/// ```
#[macro_export]
macro_rules! fail {
    ($($arg:tt)+) => {
        $crate::fail(::std::format!($($arg)+))
    };
}

// Re-export the test macro when macros feature is enabled
#[cfg(feature = "macros")]
pub use testkit_expect_macros::test;
