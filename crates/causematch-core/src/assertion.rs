//! `expect(actual).to(matcher)` — the assertion surface tests use.

use tracing::debug;

use crate::error::AssertionError;
use crate::matcher::Matcher;

/// Start an assertion about `actual`.
pub fn expect<T: ?Sized>(actual: &T) -> Expectation<'_, T> {
    Expectation { actual }
}

/// An assertion in progress. `to`/`to_not` panic on failure, like `assert!`;
/// `try_to`/`try_to_not` return the failure instead.
#[derive(Debug)]
pub struct Expectation<'v, T: ?Sized> {
    actual: &'v T,
}

impl<T: ?Sized> Expectation<'_, T> {
    /// Assert that `matcher` holds.
    #[track_caller]
    pub fn to<M: Matcher<T>>(&self, matcher: M) {
        if let Err(e) = self.try_to(matcher) {
            panic!("{e}");
        }
    }

    /// Assert that `matcher` does not hold.
    #[track_caller]
    pub fn to_not<M: Matcher<T>>(&self, matcher: M) {
        if let Err(e) = self.try_to_not(matcher) {
            panic!("{e}");
        }
    }

    pub fn try_to<M: Matcher<T>>(&self, matcher: M) -> Result<(), AssertionError> {
        if matcher.matches(self.actual)? {
            return Ok(());
        }
        let msg = matcher.failure_message(self.actual);
        debug!(message = %msg, "assertion failed");
        Err(AssertionError::Failed(msg))
    }

    /// Matchers that refuse negation fail here before evaluating anything.
    pub fn try_to_not<M: Matcher<T>>(&self, matcher: M) -> Result<(), AssertionError> {
        matcher.ensure_negatable()?;
        if !matcher.matches(self.actual)? {
            return Ok(());
        }
        let msg = matcher.negated_failure_message(self.actual)?;
        debug!(message = %msg, "negated assertion failed");
        Err(AssertionError::Failed(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{contain_substring, equal};
    use crate::cause::be_caused_by;
    use crate::error::MatchError;
    use crate::value::Actual;
    use crate::wrap::Message;

    #[test]
    fn try_to_reports_failure_message() {
        let err = expect(&5).try_to(equal(6)).unwrap_err();
        assert_eq!(
            err,
            AssertionError::Failed("Expected\n    <i32>: 5\nto equal\n    <i32>: 6".into())
        );
    }

    #[test]
    fn try_to_not_uses_negated_message() {
        let err = expect("abc").try_to_not(contain_substring("b")).unwrap_err();
        assert!(err.to_string().contains("not to contain substring"));
        assert!(expect("abc").try_to_not(contain_substring("z")).is_ok());
    }

    #[test]
    fn negating_a_cause_matcher_fails_even_without_a_match() {
        let e = Message::new("blah");
        let err = expect(&Actual::error(&e))
            .try_to_not(be_caused_by("unrelated"))
            .unwrap_err();
        assert!(matches!(
            err,
            AssertionError::Matcher(MatchError::NegationUnsupported { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "to equal")]
    fn to_panics_with_the_failure_message() {
        expect(&1).to(equal(2));
    }
}
