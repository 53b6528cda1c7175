//! Structured assertion failures.

use std::fmt;

/// The assertion that produced a [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionKind {
    /// [`Expectation::equals`](crate::assertions::Expectation::equals)
    Equals,
    /// [`Expectation::not_equals`](crate::assertions::Expectation::not_equals)
    NotEquals,
    /// [`Expectation::contains_string`](crate::assertions::Expectation::contains_string)
    ContainsString,
    /// [`Expectation::is_true`](crate::assertions::Expectation::is_true)
    IsTrue,
    /// [`Expectation::is_false`](crate::assertions::Expectation::is_false)
    IsFalse,
    /// [`Expectation::is_empty`](crate::assertions::Expectation::is_empty)
    IsEmpty,
    /// [`Expectation::is_not_empty`](crate::assertions::Expectation::is_not_empty)
    IsNotEmpty,
    /// [`Expectation::is_nil`](crate::assertions::Expectation::is_nil)
    IsNil,
    /// [`Expectation::is_not_nil`](crate::assertions::Expectation::is_not_nil)
    IsNotNil,
    /// [`Expectation::has_len`](crate::assertions::Expectation::has_len)
    HasLen,
    /// [`Expectation::panics`](crate::assertions::Expectation::panics)
    Panics,
    /// [`Expectation::eventually_equals`](crate::assertions::Expectation::eventually_equals)
    EventuallyEquals,
    /// [`Expectation::within_time`](crate::assertions::Expectation::within_time)
    WithinTime,
    /// An explicit [`TestContext::fail`](crate::TestContext::fail)
    Fail,
}

impl AssertionKind {
    /// Name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::ContainsString => "ContainsString",
            Self::IsTrue => "IsTrue",
            Self::IsFalse => "IsFalse",
            Self::IsEmpty => "IsEmpty",
            Self::IsNotEmpty => "IsNotEmpty",
            Self::IsNil => "IsNil",
            Self::IsNotNil => "IsNotNil",
            Self::HasLen => "HasLen",
            Self::Panics => "Panics",
            Self::EventuallyEquals => "EventuallyEquals",
            Self::WithinTime => "WithinTime",
            Self::Fail => "Fail",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A labelled line of a failure diagnostic, such as `Expected` or `Actual`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    /// Label, e.g. `"Expected"`
    pub label: &'static str,
    /// Rendered value
    pub value: String,
}

/// A recorded assertion failure.
///
/// Renders in the familiar block layout:
///
/// ```text
/// Equals assertion failed.
///  Expected:
///         [i32] 1
///  Actual:
///         [i32] 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: AssertionKind,
    details: Vec<Detail>,
    note: Option<String>,
}

impl Failure {
    /// Start a failure for the given assertion.
    #[must_use]
    pub fn new(kind: AssertionKind) -> Self {
        Self {
            kind,
            details: Vec::new(),
            note: None,
        }
    }

    /// Failure carrying a free-text message, as raised by `fail`.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(AssertionKind::Fail).with_note(message)
    }

    /// Append a labelled detail.
    #[must_use]
    pub fn with_detail(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.details.push(Detail {
            label,
            value: value.into(),
        });
        self
    }

    /// Attach a free-text note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The assertion that failed.
    #[must_use]
    pub fn kind(&self) -> AssertionKind {
        self.kind
    }

    /// Labelled details in insertion order.
    #[must_use]
    pub fn details(&self) -> &[Detail] {
        &self.details
    }

    /// Value of the first detail with the given label.
    #[must_use]
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.value.as_str())
    }

    /// Free-text note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == AssertionKind::Fail {
            return f.write_str(self.note.as_deref().unwrap_or_default());
        }
        write!(f, "{} assertion failed.", self.kind)?;
        if let Some(note) = &self.note {
            write!(f, " \n {note}")?;
        }
        for detail in &self.details {
            write!(f, " \n {}: \n\t\t {}", detail.label, detail.value)?;
        }
        Ok(())
    }
}
