//! Structural equality between two values of the same type.

/// Returns `true` if `expected` and `actual` are structurally equal.
///
/// Both sides must have the same type, so there is no coercion between, say,
/// `String` and `&str`. Equality recurses through containers, boxes,
/// references and options as defined by their `PartialEq` impls: two `None`s
/// are equal, `Some` values compare their payloads.
///
/// # Example
///
/// ```rust
/// use testkit_expect::assertions::structurally_equal;
///
/// assert!(structurally_equal(&vec![Some(1), None], &vec![Some(1), None]));
/// assert!(!structurally_equal(&Box::new(1), &Box::new(2)));
/// ```
pub fn structurally_equal<T: PartialEq + ?Sized>(expected: &T, actual: &T) -> bool {
    let equal = expected == actual;
    tracing::trace!(
        ty = std::any::type_name::<T>(),
        equal,
        "structural comparison"
    );
    equal
}
