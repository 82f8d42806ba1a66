//! Ready-made error values for the three wrapping conventions.
//!
//! - [`Message`] — a plain error with no cause.
//! - [`Wrapped`] — a message prefixed onto a cause (`"prefix: cause"`); exposes
//!   both [`SingleUnwrap`] and [`RootCause`].
//! - [`MultiError`] — an ordered collection of independent errors; exposes
//!   [`Aggregate`].

use std::error::Error as StdError;
use std::fmt;

use crate::value::{Aggregate, ErrorRef, ErrorValue, RootCause, SingleUnwrap};

/// An owned cause: either a native error value or a standard library error.
#[derive(Debug)]
pub enum Cause {
    Native(Box<dyn ErrorValue + Send + Sync>),
    Std(Box<dyn StdError + Send + Sync>),
}

impl Cause {
    pub fn native<E: ErrorValue + Send + Sync + 'static>(err: E) -> Self {
        Self::Native(Box::new(err))
    }

    pub fn std<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Std(Box::new(err))
    }

    /// Borrow as a search handle.
    pub fn handle(&self) -> ErrorRef<'_> {
        match self {
            Self::Native(e) => ErrorRef::Native(&**e),
            Self::Std(e) => ErrorRef::Std(&**e),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.handle(), f)
    }
}

// ─── Message ──────────────────────────────────────────────────────────────────

/// A plain error carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    msg: String,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl StdError for Message {}

impl ErrorValue for Message {
    fn as_std_error(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self)
    }
}

// ─── Wrapped ──────────────────────────────────────────────────────────────────

/// An error that adds context to a cause. Renders as `"{context}: {cause}"`.
#[derive(Debug)]
pub struct Wrapped {
    context: String,
    cause: Cause,
}

impl Wrapped {
    /// Wrap a native error value.
    pub fn new<E: ErrorValue + Send + Sync + 'static>(cause: E, context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            cause: Cause::native(cause),
        }
    }

    /// Wrap a standard library error.
    pub fn from_std<E: StdError + Send + Sync + 'static>(
        cause: E,
        context: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            cause: Cause::std(cause),
        }
    }

    /// The context message without the cause.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The directly wrapped cause.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.cause)
    }
}

impl ErrorValue for Wrapped {
    fn as_single_unwrap(&self) -> Option<&dyn SingleUnwrap> {
        Some(self)
    }

    fn as_root_cause(&self) -> Option<&dyn RootCause> {
        Some(self)
    }
}

impl SingleUnwrap for Wrapped {
    fn unwrap_cause(&self) -> Option<ErrorRef<'_>> {
        Some(self.cause.handle())
    }
}

impl RootCause for Wrapped {
    /// Follows the cause's own root-cause edge when it has one, so nested
    /// wraps resolve to the innermost error in a single call.
    fn root_cause(&self) -> ErrorRef<'_> {
        let cause = self.cause.handle();
        cause.root_cause().unwrap_or(cause)
    }
}

// ─── MultiError ───────────────────────────────────────────────────────────────

/// An ordered collection of independent errors.
///
/// Renders as a bulleted list:
///
/// ```text
/// 2 errors occurred:
///     * foo
///     * blah
/// ```
#[derive(Debug, Default)]
pub struct MultiError {
    errors: Vec<Cause>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a native error value.
    pub fn append<E: ErrorValue + Send + Sync + 'static>(mut self, err: E) -> Self {
        self.errors.push(Cause::native(err));
        self
    }

    /// Append a standard library error.
    pub fn append_std<E: StdError + Send + Sync + 'static>(mut self, err: E) -> Self {
        self.errors.push(Cause::std(err));
        self
    }

    /// Append every error of `other`, flattening rather than nesting.
    pub fn merge(mut self, other: MultiError) -> Self {
        self.errors.extend(other.errors);
        self
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cause> {
        self.errors.iter()
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "error" } else { "errors" };
        write!(f, "{} {noun} occurred:", self.errors.len())?;
        for e in &self.errors {
            write!(f, "\n    * {e}")?;
        }
        Ok(())
    }
}

impl ErrorValue for MultiError {
    fn as_aggregate(&self) -> Option<&dyn Aggregate> {
        Some(self)
    }
}

impl Aggregate for MultiError {
    fn errors(&self) -> Vec<ErrorRef<'_>> {
        self.errors.iter().map(Cause::handle).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_renders_context_then_cause() {
        let w = Wrapped::new(Message::new("blah"), "foo");
        assert_eq!(w.to_string(), "foo: blah");
        assert_eq!(w.context(), "foo");
    }

    #[test]
    fn wrapped_root_cause_skips_intermediate_levels() {
        let w = Wrapped::new(
            Wrapped::new(Wrapped::new(Message::new("root"), "a"), "b"),
            "c",
        );
        let handle = ErrorRef::native(&w);
        assert_eq!(handle.single_unwrap().map(|e| e.message()).as_deref(), Some("b: a: root"));
        assert_eq!(handle.root_cause().map(|e| e.message()).as_deref(), Some("root"));
    }

    #[test]
    fn wrapped_std_cause_is_its_own_root() {
        let w = Wrapped::from_std(std::fmt::Error, "formatting");
        let root = ErrorRef::native(&w).root_cause().expect("root cause");
        assert_eq!(root.message(), "an error occurred when formatting an argument");
        assert!(root.root_cause().is_none());
    }

    #[test]
    fn multi_error_display_and_children() {
        let m = MultiError::new()
            .append(Wrapped::new(Message::new("x"), "foo"))
            .append(Message::new("blah"));
        assert_eq!(m.to_string(), "2 errors occurred:\n    * foo: x\n    * blah");
        let children: Vec<String> = m.errors().into_iter().map(|e| e.message()).collect();
        assert_eq!(children, ["foo: x", "blah"]);
    }

    #[test]
    fn multi_error_merge_flattens() {
        let a = MultiError::new().append(Message::new("a"));
        let b = MultiError::new().append(Message::new("b")).append(Message::new("c"));
        let merged = a.merge(b);
        assert_eq!(merged.len(), 3);
        assert_eq!(MultiError::new().append(Message::new("solo")).to_string(), "1 error occurred:\n    * solo");
    }
}
