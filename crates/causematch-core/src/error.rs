//! Error types raised by matchers and assertions.

use thiserror::Error;

/// Errors a matcher can raise instead of a plain matched/not-matched verdict.
///
/// A failed match is never one of these: it is `Ok(false)`. These describe
/// inputs or uses the matcher cannot evaluate at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The actual value was absent where an error was required.
    #[error("Expected an error, got nil")]
    NilActual,

    /// The actual value was present but is not an error.
    #[error("Expected an error.  Got:\n{rendered}")]
    NotAnError { rendered: String },

    /// A negated assertion was made with a matcher that has no meaningful
    /// negative diagnostic.
    #[error("do not negate this matcher: {matcher} {reason}")]
    NegationUnsupported {
        matcher: &'static str,
        reason: &'static str,
    },

    /// A single-use matcher was run a second time.
    #[error("{matcher} is single-use and was already attempted")]
    AlreadyAttempted { matcher: &'static str },

    /// The cause search went deeper than the configured ceiling.
    #[error("cause search exceeded the maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    /// The matcher was given a value whose shape it cannot evaluate.
    #[error("{0}")]
    Structural(String),

    /// The matcher itself was built with an expectation it cannot use.
    #[error("invalid expectation: {0}")]
    InvalidExpectation(String),
}

impl MatchError {
    /// Convenience constructor for [`MatchError::Structural`].
    pub fn structural(reason: impl Into<String>) -> Self {
        Self::Structural(reason.into())
    }

    /// Returns `true` if this error rejects the actual value itself
    /// (nil or not an error) rather than the way the matcher was used.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::NilActual | Self::NotAnError { .. })
    }
}

/// The outcome of a failed assertion made through [`crate::Expectation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// The matcher evaluated cleanly and did not hold; carries its diagnostic.
    #[error("{0}")]
    Failed(String),

    /// The matcher could not evaluate the actual value.
    #[error(transparent)]
    Matcher(#[from] MatchError),
}
