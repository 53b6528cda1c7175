//! Running a callable while capturing any panic it raises.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// A panic caught by [`capture_panic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPanic {
    message: String,
}

impl CapturedPanic {
    fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "<non-string panic payload>".to_string()
        };
        Self { message }
    }

    /// The panic message, if the payload was a string.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CapturedPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Invoke `f`, returning its value or the panic it raised.
///
/// The panic does not propagate. The global panic hook still runs, so the
/// panic message appears in the test's captured output.
///
/// # Example
///
/// ```rust
/// use testkit_expect::assertions::capture_panic;
///
/// assert_eq!(capture_panic(|| 1 + 1), Ok(2));
///
/// let caught = capture_panic(|| -> u8 { panic!("boom") }).unwrap_err();
/// assert_eq!(caught.message(), "boom");
/// ```
pub fn capture_panic<F, R>(f: F) -> Result<R, CapturedPanic>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let caught = CapturedPanic::from_payload(payload.as_ref());
        tracing::debug!(message = %caught, "captured panic");
        caught
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_value_when_no_panic() {
        assert_eq!(capture_panic(|| "fine"), Ok("fine"));
    }

    #[test]
    fn test_captures_formatted_message() {
        let code = 42;
        let caught = capture_panic(|| panic!("failed with {code}")).unwrap_err();
        assert_eq!(caught.message(), "failed with 42");
        assert_eq!(caught.to_string(), "failed with 42");
    }

    #[test]
    fn test_captures_non_string_payload() {
        let caught = capture_panic(|| std::panic::panic_any(17_u32)).unwrap_err();
        assert_eq!(caught.message(), "<non-string panic payload>");
    }

    #[test]
    fn test_side_effects_before_panic_are_kept() {
        let mut touched = false;
        let result = capture_panic(|| {
            touched = true;
            panic!("after side effect");
        });
        assert!(result.is_err());
        assert!(touched);
    }
}
