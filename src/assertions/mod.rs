//! Fluent assertions that record failures instead of aborting.
//!
//! - [`Expectation`] - the assertion chain returned by `expect`
//! - [`describe`] - render a value as `[<type>] <value>` for diagnostics
//! - [`structurally_equal`] - deep equality used by the equality assertions
//! - [`capture_panic`] - run a callable and catch its panic
//!
//! # Example
//!
//! ```rust
//! use testkit_expect::TestContext;
//!
//! let ctx = TestContext::new("assertions");
//! ctx.expect(vec![1, 2, 3]).has_len(3);
//! ctx.expect("hello world").contains_string("lo wo");
//! ctx.expect(|| panic!("boom")).panics();
//! ctx.finish();
//! ```

mod capture;
mod compare;
mod describe;
mod expectation;

pub use capture::{capture_panic, CapturedPanic};
pub use compare::structurally_equal;
pub use describe::{describe, describe_callable, type_tag};
pub use expectation::Expectation;
