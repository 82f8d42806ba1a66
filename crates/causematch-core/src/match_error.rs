//! `MatchErrorMatcher` — matches a single error node by message, message matcher,
//! type or value. `same_error` matches one node by identity.

use std::error::Error as StdError;
use std::fmt;

use crate::error::MatchError;
use crate::format;
use crate::matcher::{BoxMatcher, Matcher};
use crate::value::{ErrorRef, ErrorValue};
use crate::wrap::Message;

/// What an error node is compared against.
pub enum ErrorExpectation {
    /// The rendered message equals this string.
    Message(String),
    /// The rendered message satisfies this matcher.
    Satisfying(BoxMatcher<str>),
    /// The node is of this type.
    Type {
        name: &'static str,
        is_std: Option<fn(&(dyn StdError + 'static)) -> bool>,
    },
    /// The node is of the expected error's type and compares equal to it.
    Equals {
        rendered: String,
        eq: Box<dyn Fn(ErrorRef<'_>) -> bool>,
    },
}

impl ErrorExpectation {
    /// Expect a node equal to `err`. Nodes are compared after downcasting,
    /// so only nodes that expose themselves as std errors can match.
    pub fn equal_to<E>(err: E) -> Self
    where
        E: StdError + PartialEq + 'static,
    {
        let rendered = format::object_of(&err, 1);
        let eq: Box<dyn Fn(ErrorRef<'_>) -> bool> = Box::new(move |node: ErrorRef<'_>| {
            node.as_std_error().and_then(|e| e.downcast_ref::<E>()) == Some(&err)
        });
        Self::Equals { rendered, eq }
    }
}

impl fmt::Debug for ErrorExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(m) => f.debug_tuple("Message").field(m).finish(),
            Self::Satisfying(_) => f.write_str("Satisfying(..)"),
            Self::Type { name, .. } => f.debug_struct("Type").field("name", name).finish(),
            Self::Equals { rendered, .. } => {
                f.debug_struct("Equals").field("rendered", rendered).finish()
            }
        }
    }
}

impl From<&str> for ErrorExpectation {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<String> for ErrorExpectation {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<Message> for ErrorExpectation {
    fn from(err: Message) -> Self {
        Self::equal_to(err)
    }
}

impl From<MatchErrorMatcher> for ErrorExpectation {
    fn from(m: MatchErrorMatcher) -> Self {
        m.expected
    }
}

fn is_std_type<E: StdError + 'static>(err: &(dyn StdError + 'static)) -> bool {
    err.is::<E>()
}

/// Matches one error node. Does not look at causes; wrap it in a
/// [`CauseMatcher`](crate::CauseMatcher) for that.
#[derive(Debug)]
pub struct MatchErrorMatcher {
    expected: ErrorExpectation,
}

impl MatchErrorMatcher {
    pub fn new(expected: impl Into<ErrorExpectation>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Match when the error message satisfies `m`.
    pub fn satisfying<M: Matcher<str> + 'static>(m: M) -> Self {
        Self {
            expected: ErrorExpectation::Satisfying(Box::new(m)),
        }
    }

    /// Match native error values of type `E`.
    pub fn of_type<E: ErrorValue + 'static>() -> Self {
        Self {
            expected: ErrorExpectation::Type {
                name: std::any::type_name::<E>(),
                is_std: None,
            },
        }
    }

    /// Match standard library errors of type `E`, whether reached as a std
    /// error or as a native value of the same type.
    pub fn of_std_type<E: StdError + 'static>() -> Self {
        Self {
            expected: ErrorExpectation::Type {
                name: std::any::type_name::<E>(),
                is_std: Some(is_std_type::<E>),
            },
        }
    }

    /// Match nodes equal to `err`, e.g. `Message` or `std::fmt::Error`.
    pub fn equal_to<E: StdError + PartialEq + 'static>(err: E) -> Self {
        Self {
            expected: ErrorExpectation::equal_to(err),
        }
    }

    pub fn expected(&self) -> &ErrorExpectation {
        &self.expected
    }
}

fn error_object(actual: &ErrorRef<'_>) -> String {
    format::object(actual.type_name(), actual, 1)
}

impl<'e> Matcher<ErrorRef<'e>> for MatchErrorMatcher {
    fn matches(&self, actual: &ErrorRef<'e>) -> Result<bool, MatchError> {
        match &self.expected {
            ErrorExpectation::Message(msg) => Ok(actual.message() == *msg),
            ErrorExpectation::Satisfying(m) => m.matches(actual.message().as_str()),
            ErrorExpectation::Type { name, is_std } => Ok(match (actual, is_std) {
                (ErrorRef::Std(e), Some(is)) => is(*e),
                (ErrorRef::Std(_), None) => false,
                (ErrorRef::Native(e), _) => e.type_name() == *name,
            }),
            ErrorExpectation::Equals { eq, .. } => Ok(eq(*actual)),
        }
    }

    fn failure_message(&self, actual: &ErrorRef<'e>) -> String {
        let obj = error_object(actual);
        match &self.expected {
            ErrorExpectation::Message(msg) => {
                format::message(&obj, "to match error", &format::object_of(msg.as_str(), 1))
            }
            ErrorExpectation::Satisfying(m) => format!(
                "Expected error message of\n{obj}\nto match, but failed with\n{}",
                format::indent_string(&m.failure_message(actual.message().as_str()), 1)
            ),
            ErrorExpectation::Type { name, .. } => format!(
                "Expected\n{obj}\nto be an error of type\n{}<{}>",
                format::INDENT,
                format::short_type_name(name)
            ),
            ErrorExpectation::Equals { rendered, .. } => {
                format::message(&obj, "to match error", rendered)
            }
        }
    }

    fn negated_failure_message(&self, actual: &ErrorRef<'e>) -> Result<String, MatchError> {
        let obj = error_object(actual);
        Ok(match &self.expected {
            ErrorExpectation::Message(msg) => {
                format::message(&obj, "not to match error", &format::object_of(msg.as_str(), 1))
            }
            ErrorExpectation::Satisfying(m) => format!(
                "Expected error message of\n{obj}\nnot to match, but did with\n{}",
                format::indent_string(&m.negated_failure_message(actual.message().as_str())?, 1)
            ),
            ErrorExpectation::Type { name, .. } => format!(
                "Expected\n{obj}\nnot to be an error of type\n{}<{}>",
                format::INDENT,
                format::short_type_name(name)
            ),
            ErrorExpectation::Equals { rendered, .. } => {
                format::message(&obj, "not to match error", rendered)
            }
        })
    }
}

// ─── SameError ────────────────────────────────────────────────────────────────

/// Matches the one node `target` refers to, by [`ErrorRef::is_same`].
///
/// An equal but separately allocated error does not match.
pub fn same_error(target: ErrorRef<'_>) -> SameError<'_> {
    SameError { target }
}

#[derive(Debug, Clone, Copy)]
pub struct SameError<'x> {
    target: ErrorRef<'x>,
}

impl<'x, 'e> Matcher<ErrorRef<'e>> for SameError<'x> {
    fn matches(&self, actual: &ErrorRef<'e>) -> Result<bool, MatchError> {
        Ok(actual.is_same(self.target))
    }

    fn failure_message(&self, actual: &ErrorRef<'e>) -> String {
        format::message(
            &error_object(actual),
            "to be the same error as",
            &error_object(&self.target),
        )
    }

    fn negated_failure_message(&self, actual: &ErrorRef<'e>) -> Result<String, MatchError> {
        Ok(format::message(
            &error_object(actual),
            "not to be the same error as",
            &error_object(&self.target),
        ))
    }
}
