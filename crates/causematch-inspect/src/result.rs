//! `not_error` — succeeds when a `Result` is `Ok`.

use std::fmt;

use causematch_core::format;
use causematch_core::{MatchError, Matcher};

pub fn not_error() -> NotError {
    NotError
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotError;

impl<T, E> Matcher<Result<T, E>> for NotError
where
    T: fmt::Debug,
    E: fmt::Display,
{
    fn matches(&self, actual: &Result<T, E>) -> Result<bool, MatchError> {
        Ok(actual.is_ok())
    }

    fn failure_message(&self, actual: &Result<T, E>) -> String {
        match actual {
            Ok(value) => format!("Expected no error, got value:\n{}", format::object_of(value, 1)),
            Err(e) => format!(
                "Expected no error, got:\n{}<{}>: {e}",
                format::INDENT,
                format::short_type_name(std::any::type_name::<E>())
            ),
        }
    }

    fn negated_failure_message(&self, actual: &Result<T, E>) -> Result<String, MatchError> {
        match actual {
            Ok(value) => Ok(format!(
                "Expected an error, got:\n{}",
                format::object_of(value, 1)
            )),
            Err(_) => Err(MatchError::structural("negated NotError reached with an error")),
        }
    }
}
