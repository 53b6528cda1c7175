//! Nilable values.

use std::fmt;

/// The untyped absent value.
///
/// `Nil` stands in where a test wants to talk about "nothing" without naming
/// a type. It always counts as nil and describes itself as `[nil] nil`.
///
/// ```rust
/// use testkit_expect::{kind::Nil, TestContext};
///
/// let ctx = TestContext::new("nil");
/// assert!(ctx.expect(Nil).is_nil());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

impl fmt::Debug for Nil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("nil")
    }
}

/// A value whose representation can be absent.
pub trait Nilable {
    /// Returns `true` if the value is currently absent.
    fn is_nil(&self) -> bool;
}

impl Nilable for Nil {
    fn is_nil(&self) -> bool {
        true
    }
}

impl<T> Nilable for Option<T> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nilable for *const T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> Nilable for *mut T {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl<N: Nilable + ?Sized> Nilable for &N {
    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}
