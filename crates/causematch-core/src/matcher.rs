//! The `Matcher` trait — the one capability every matcher in the workspace implements.

use crate::error::MatchError;

/// Evaluates a candidate value against an expectation and explains failures.
///
/// `matches` returns `Ok(false)` for an ordinary mismatch. `Err` is reserved
/// for inputs the matcher cannot evaluate at all (see [`MatchError`]).
///
/// Messages are only computed when an assertion fails, so implementations
/// may recompute whatever they need from `actual`.
pub trait Matcher<T: ?Sized> {
    /// Decide whether `actual` satisfies this matcher.
    fn matches(&self, actual: &T) -> Result<bool, MatchError>;

    /// Explain why `actual` did not satisfy this matcher.
    fn failure_message(&self, actual: &T) -> String;

    /// Explain why `actual` satisfied this matcher when it should not have.
    ///
    /// Matchers for which a negated assertion is meaningless return
    /// [`MatchError::NegationUnsupported`].
    fn negated_failure_message(&self, actual: &T) -> Result<String, MatchError>;

    /// Checked before a negated assertion evaluates anything, so matchers
    /// with no meaningful negative form can refuse up front.
    fn ensure_negatable(&self) -> Result<(), MatchError> {
        Ok(())
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn matches(&self, actual: &T) -> Result<bool, MatchError> {
        (**self).matches(actual)
    }

    fn failure_message(&self, actual: &T) -> String {
        (**self).failure_message(actual)
    }

    fn negated_failure_message(&self, actual: &T) -> Result<String, MatchError> {
        (**self).negated_failure_message(actual)
    }

    fn ensure_negatable(&self) -> Result<(), MatchError> {
        (**self).ensure_negatable()
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn matches(&self, actual: &T) -> Result<bool, MatchError> {
        (**self).matches(actual)
    }

    fn failure_message(&self, actual: &T) -> String {
        (**self).failure_message(actual)
    }

    fn negated_failure_message(&self, actual: &T) -> Result<String, MatchError> {
        (**self).negated_failure_message(actual)
    }

    fn ensure_negatable(&self) -> Result<(), MatchError> {
        (**self).ensure_negatable()
    }
}

/// A type-erased matcher, for storing heterogeneous matchers side by side.
pub type BoxMatcher<T> = Box<dyn Matcher<T>>;
