//! Error values, the three wrapping capabilities, and the handles the search walks.
//!
//! An error value opts into each wrapping convention independently by
//! overriding the matching capability-check method on [`ErrorValue`]:
//!
//! ```rust
//! use causematch_core::{ErrorRef, ErrorValue, SingleUnwrap};
//!
//! #[derive(Debug)]
//! struct Outer(std::io::Error);
//!
//! impl std::fmt::Display for Outer {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "outer: {}", self.0)
//!     }
//! }
//!
//! impl ErrorValue for Outer {
//!     fn as_single_unwrap(&self) -> Option<&dyn SingleUnwrap> {
//!         Some(self)
//!     }
//! }
//!
//! impl SingleUnwrap for Outer {
//!     fn unwrap_cause(&self) -> Option<ErrorRef<'_>> {
//!         Some(ErrorRef::std(&self.0))
//!     }
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::error::MatchError;
use crate::format;

/// An error that can take part in a cause search.
///
/// Every capability defaults to absent; most errors expose none or one.
pub trait ErrorValue: fmt::Display + fmt::Debug {
    /// Type name used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// One-level unwrap, if this error wraps a single cause.
    fn as_single_unwrap(&self) -> Option<&dyn SingleUnwrap> {
        None
    }

    /// Direct jump to the innermost cause, if this error tracks one.
    fn as_root_cause(&self) -> Option<&dyn RootCause> {
        None
    }

    /// Ordered sub-errors, if this error is a container of independent errors.
    fn as_aggregate(&self) -> Option<&dyn Aggregate> {
        None
    }

    /// This value as a standard library error, for downcasting.
    fn as_std_error(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }
}

/// One level of wrapping: the error this one directly wraps.
pub trait SingleUnwrap {
    /// The wrapped error, or `None` when there is no further cause.
    fn unwrap_cause(&self) -> Option<ErrorRef<'_>>;
}

/// The innermost cause at the end of a wrap chain.
pub trait RootCause {
    /// The innermost cause. Returns a handle to `self` when there is no
    /// deeper cause, so calling it on its own result is a no-op.
    fn root_cause(&self) -> ErrorRef<'_>;
}

/// A container of independent errors, each considered a cause.
pub trait Aggregate {
    /// The contained errors, in their defined order.
    fn errors(&self) -> Vec<ErrorRef<'_>>;
}

// ─── ErrorRef ─────────────────────────────────────────────────────────────────

/// A borrowed handle to one node of an error graph.
///
/// Native values expose whichever capabilities they implement. Standard
/// library errors expose [`SingleUnwrap`] through `source()` and nothing else.
#[derive(Clone, Copy)]
pub enum ErrorRef<'a> {
    Native(&'a dyn ErrorValue),
    Std(&'a (dyn StdError + 'static)),
}

impl<'a> ErrorRef<'a> {
    /// Handle to a value implementing [`ErrorValue`].
    pub fn native<E: ErrorValue + 'a>(err: &'a E) -> Self {
        Self::Native(err)
    }

    /// Handle to a standard library error.
    pub fn std<E: StdError + 'static>(err: &'a E) -> Self {
        Self::Std(err)
    }

    /// Follow the single-unwrap edge, if any.
    pub fn single_unwrap(self) -> Option<ErrorRef<'a>> {
        match self {
            Self::Native(e) => e.as_single_unwrap()?.unwrap_cause(),
            Self::Std(e) => e.source().map(ErrorRef::Std),
        }
    }

    /// Follow the root-cause edge, if any.
    pub fn root_cause(self) -> Option<ErrorRef<'a>> {
        match self {
            Self::Native(e) => e.as_root_cause().map(|rc| rc.root_cause()),
            Self::Std(_) => None,
        }
    }

    /// Children of an aggregate, or `None` when this is not an aggregate.
    pub fn aggregate(self) -> Option<Vec<ErrorRef<'a>>> {
        match self {
            Self::Native(e) => e.as_aggregate().map(|agg| agg.errors()),
            Self::Std(_) => None,
        }
    }

    /// The node as a standard library error, when it is one.
    pub fn as_std_error(self) -> Option<&'a (dyn StdError + 'static)> {
        match self {
            Self::Native(e) => e.as_std_error(),
            Self::Std(e) => Some(e),
        }
    }

    /// Type name used in diagnostics.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Native(e) => e.type_name(),
            Self::Std(_) => "dyn std::error::Error",
        }
    }

    /// The rendered error message.
    pub fn message(self) -> String {
        self.to_string()
    }

    /// Identity comparison.
    ///
    /// Two handles are the same node when they point at the same address and
    /// describe the same object there. A struct's first field shares its
    /// parent's address, so the address alone is not enough: native values
    /// also compare type names, std errors compare their vtables.
    pub fn is_same(self, other: ErrorRef<'_>) -> bool {
        if self.addr() != other.addr() {
            return false;
        }
        match (self, other) {
            (Self::Native(a), ErrorRef::Native(b)) => a.type_name() == b.type_name(),
            (Self::Std(a), ErrorRef::Std(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }

    fn addr(self) -> *const () {
        match self {
            Self::Native(e) => e as *const _ as *const (),
            Self::Std(e) => e as *const _ as *const (),
        }
    }
}

impl fmt::Display for ErrorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(e) => fmt::Display::fmt(e, f),
            Self::Std(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl fmt::Debug for ErrorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(e) => fmt::Debug::fmt(e, f),
            Self::Std(e) => fmt::Debug::fmt(e, f),
        }
    }
}

// ─── Actual ───────────────────────────────────────────────────────────────────

/// The value an assertion is made against.
///
/// Absent and not-an-error are distinct so each can be reported precisely.
#[derive(Clone, Copy)]
pub enum Actual<'a> {
    /// No value at all.
    Nil,
    /// An error.
    Error(ErrorRef<'a>),
    /// Something that is not an error.
    Other {
        type_name: &'static str,
        value: &'a dyn fmt::Debug,
    },
}

impl<'a> Actual<'a> {
    pub fn nil() -> Self {
        Self::Nil
    }

    pub fn error<E: ErrorValue + 'a>(err: &'a E) -> Self {
        Self::Error(ErrorRef::native(err))
    }

    pub fn std<E: StdError + 'static>(err: &'a E) -> Self {
        Self::Error(ErrorRef::std(err))
    }

    /// A value that is not an error. Its type name is kept for diagnostics.
    pub fn value<T: fmt::Debug + 'a>(value: &'a T) -> Self {
        Self::Other {
            type_name: std::any::type_name::<T>(),
            value,
        }
    }

    /// The error of a `Result`, or [`Actual::Nil`] for `Ok`.
    pub fn from_result<T, E: StdError + 'static>(result: &'a Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Nil,
            Err(e) => Self::std(e),
        }
    }

    /// Validate that this is an error and return its handle.
    pub fn as_error(self) -> Result<ErrorRef<'a>, MatchError> {
        match self {
            Self::Error(e) => Ok(e),
            Self::Nil => Err(MatchError::NilActual),
            Self::Other { type_name, value } => Err(MatchError::NotAnError {
                rendered: format::object(type_name, value, 1),
            }),
        }
    }
}

impl<'a> From<ErrorRef<'a>> for Actual<'a> {
    fn from(err: ErrorRef<'a>) -> Self {
        Self::Error(err)
    }
}

impl<'a> From<Option<ErrorRef<'a>>> for Actual<'a> {
    fn from(err: Option<ErrorRef<'a>>) -> Self {
        err.map_or(Self::Nil, Self::Error)
    }
}

impl fmt::Debug for Actual<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Error(e) => fmt::Debug::fmt(e, f),
            Self::Other { value, .. } => fmt::Debug::fmt(value, f),
        }
    }
}

// ─── anyhow ───────────────────────────────────────────────────────────────────

impl ErrorValue for anyhow::Error {
    fn as_single_unwrap(&self) -> Option<&dyn SingleUnwrap> {
        Some(self)
    }

    /// Absent for an error without a source, which is its own root.
    fn as_root_cause(&self) -> Option<&dyn RootCause> {
        self.source().map(|_| self as &dyn RootCause)
    }
}

impl SingleUnwrap for anyhow::Error {
    fn unwrap_cause(&self) -> Option<ErrorRef<'_>> {
        self.source().map(ErrorRef::Std)
    }
}

impl RootCause for anyhow::Error {
    fn root_cause(&self) -> ErrorRef<'_> {
        ErrorRef::Std(anyhow::Error::root_cause(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::{Message, Wrapped};

    #[derive(Debug)]
    struct Io(std::io::Error);

    impl fmt::Display for Io {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "io: {}", self.0)
        }
    }

    impl StdError for Io {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn std_errors_unwrap_through_source() {
        let e = Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let handle = ErrorRef::std(&e);
        let inner = handle.single_unwrap().expect("source");
        assert_eq!(inner.message(), "disk");
        assert!(inner.single_unwrap().is_none());
        assert!(handle.root_cause().is_none());
        assert!(handle.aggregate().is_none());
    }

    #[test]
    fn identity_distinguishes_parent_from_first_field() {
        #[derive(Debug)]
        struct Parent {
            inner: Message,
        }
        impl fmt::Display for Parent {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "parent: {}", self.inner)
            }
        }
        impl ErrorValue for Parent {}

        let p = Parent {
            inner: Message::new("x"),
        };
        let parent = ErrorRef::native(&p);
        let child = ErrorRef::native(&p.inner);
        assert!(!parent.is_same(child));
        assert!(parent.is_same(ErrorRef::native(&p)));
    }

    #[test]
    fn std_identity_distinguishes_error_from_its_first_field_source() {
        #[derive(Debug)]
        struct Inner;
        impl fmt::Display for Inner {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("inner")
            }
        }
        impl StdError for Inner {}

        struct Outer {
            inner: Inner,
        }
        impl fmt::Debug for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.inner, f)
            }
        }
        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("outer")
            }
        }
        impl StdError for Outer {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.inner)
            }
        }

        let e = Outer { inner: Inner };
        let outer = ErrorRef::std(&e);
        let source = outer.single_unwrap().expect("source");
        assert!(!outer.is_same(source));
        assert!(outer.is_same(ErrorRef::std(&e)));
        assert!(source.is_same(ErrorRef::std(&e.inner)));
    }

    #[test]
    fn sourceless_anyhow_error_has_no_root_cause_edge() {
        let err = anyhow::anyhow!("solo");
        let handle = ErrorRef::native(&err);
        assert!(handle.root_cause().is_none());
        assert!(handle.single_unwrap().is_none());
    }

    #[test]
    fn anyhow_exposes_source_and_root_cause() {
        let err = anyhow::Error::new(std::io::Error::new(std::io::ErrorKind::Other, "disk"))
            .context("reading config")
            .context("starting up");
        let handle = ErrorRef::native(&err);
        assert_eq!(handle.message(), "starting up");
        assert_eq!(handle.single_unwrap().map(|e| e.message()).as_deref(), Some("reading config"));
        assert_eq!(handle.root_cause().map(|e| e.message()).as_deref(), Some("disk"));
        assert_eq!(handle.type_name(), "anyhow::Error");
    }

    #[test]
    fn actual_validation_distinguishes_nil_and_non_errors() {
        assert_eq!(Actual::nil().as_error().unwrap_err(), MatchError::NilActual);

        let five = 5_i32;
        match Actual::value(&five).as_error() {
            Err(MatchError::NotAnError { rendered }) => assert_eq!(rendered, "    <i32>: 5"),
            other => panic!("expected NotAnError, got {other:?}"),
        }

        let w = Wrapped::new(Message::new("blah"), "foo");
        assert!(Actual::error(&w).as_error().is_ok());
    }

    #[test]
    fn actual_from_result() {
        let ok: Result<(), std::io::Error> = Ok(());
        assert!(matches!(Actual::from_result(&ok), Actual::Nil));
        let err: Result<(), std::io::Error> = Err(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        assert!(matches!(Actual::from_result(&err), Actual::Error(_)));
    }
}
