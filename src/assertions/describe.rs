//! Human-readable descriptions of values for failure diagnostics.

use std::any::type_name;
use std::fmt::Debug;

use crate::kind::Nil;

/// Describe a value as `[<type>] <value>`.
///
/// The type is the value's static type with module paths stripped and the
/// value is its `Debug` rendering. [`Nil`] describes itself as `[nil] nil`.
///
/// # Example
///
/// ```rust
/// use testkit_expect::assertions::describe;
///
/// assert_eq!(describe(&42), "[i32] 42");
/// assert_eq!(describe(&vec!["a"]), "[Vec<&str>] [\"a\"]");
/// assert_eq!(describe(&Some(1.5)), "[Option<f64>] Some(1.5)");
/// ```
pub fn describe<T: Debug + ?Sized>(value: &T) -> String {
    format!("[{}] {value:?}", type_tag::<T>())
}

/// Describe a callable, which has no printable value, as `[<type>] <callable>`.
#[must_use]
pub fn describe_callable<F: ?Sized>() -> String {
    format!("[{}] <callable>", type_tag::<F>())
}

/// Static type name of `T` with module paths stripped.
///
/// `alloc::vec::Vec<core::option::Option<i32>>` becomes `Vec<Option<i32>>`.
#[must_use]
pub fn type_tag<T: ?Sized>() -> String {
    let full = type_name::<T>();
    if full == type_name::<Nil>() {
        return "nil".to_string();
    }
    strip_paths(full)
}

fn strip_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_describe_scalars() {
        assert_eq!(describe(&1u8), "[u8] 1");
        assert_eq!(describe(&true), "[bool] true");
        assert_eq!(describe("hi"), "[str] \"hi\"");
        assert_eq!(describe(&"hi"), "[&str] \"hi\"");
        assert_eq!(describe(&String::from("hi")), "[String] \"hi\"");
    }

    #[test]
    fn test_describe_nil() {
        assert_eq!(describe(&Nil), "[nil] nil");
    }

    #[test]
    fn test_describe_nested() {
        assert_eq!(
            describe(&Some(vec![1, 2])),
            "[Option<Vec<i32>>] Some([1, 2])"
        );
        assert_eq!(
            type_tag::<HashMap<String, Box<dyn Fn() -> u8>>>(),
            "HashMap<String, Box<dyn Fn() -> u8>>"
        );
    }

    #[test]
    fn test_describe_callable() {
        assert_eq!(describe_callable::<fn() -> u8>(), "[fn() -> u8] <callable>");
    }

    #[test]
    fn test_strip_paths_keeps_tuples_and_refs() {
        assert_eq!(
            strip_paths("(&core::option::Option<alloc::string::String>, [u8; 4])"),
            "(&Option<String>, [u8; 4])"
        );
    }
}
