//! The calling thread's current test context.
//!
//! Each thread has one slot holding a weak reference to the context most
//! recently registered on it. A new registration replaces the previous one;
//! registrations are not stacked. The slot never keeps a context alive: once
//! the test drops its handle, the free functions fail fast again.

use std::cell::RefCell;
use std::sync::{Arc, Weak};

use super::{ContextInner, TestContext};
use crate::assertions::Expectation;
use crate::env;
use crate::error::{fatal, Error};

thread_local! {
    static CURRENT: RefCell<Weak<ContextInner>> = RefCell::new(Weak::new());
}

/// Register a new context named `name` as this thread's current context.
///
/// On the first registration in the process the environment variables are
/// snapshotted; every registration, including the first, restores them to
/// that snapshot so each test starts from the same environment.
///
/// Keep the returned handle alive for the duration of the test. Dropping it
/// ends the registration and fails the test if assertions failed.
///
/// # Example
///
/// ```rust
/// use testkit_expect::{expect, register_t};
///
/// let _t = register_t("doc_example");
/// expect("hello world").contains_string("lo wo");
/// ```
#[must_use = "the test context is unregistered as soon as it is dropped"]
pub fn register_t(name: impl Into<String>) -> TestContext {
    register(TestContext::new(name))
}

/// Register an already-built context as this thread's current context.
///
/// Restores the environment exactly like [`register_t`].
#[must_use = "the test context is unregistered as soon as it is dropped"]
pub fn register(ctx: TestContext) -> TestContext {
    env::reset_to_baseline();
    CURRENT.with(|slot| *slot.borrow_mut() = Arc::downgrade(&ctx.inner));
    tracing::debug!(test = %ctx.name(), "test context registered");
    ctx
}

/// The calling thread's current context, if one is registered and alive.
#[must_use]
pub fn current() -> Option<TestContext> {
    CURRENT
        .with(|slot| slot.borrow().upgrade())
        .map(|inner| TestContext { inner })
}

fn current_or_fatal() -> TestContext {
    current().unwrap_or_else(|| fatal(Error::NotRegistered))
}

/// Start a chain of assertions on `actual` against the current context.
///
/// # Panics
///
/// Fails fast with [`Error::NotRegistered`] if no live context is registered
/// on this thread.
#[track_caller]
pub fn expect<T>(actual: T) -> Expectation<T> {
    current_or_fatal().expect(actual)
}

/// Record a free-text failure against the current context.
///
/// See also the [`fail!`](crate::fail!) macro for formatted messages.
///
/// # Panics
///
/// Fails fast with [`Error::NotRegistered`] if no live context is registered
/// on this thread.
#[track_caller]
pub fn fail(message: impl Into<String>) {
    current_or_fatal().fail(message);
}
