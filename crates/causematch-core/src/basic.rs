//! Basic value matchers: equality, substrings, and numeric comparison.

use std::fmt;

use crate::error::MatchError;
use crate::format;
use crate::matcher::Matcher;

// ─── Equal ────────────────────────────────────────────────────────────────────

/// Succeeds when the actual value equals `expected`.
pub fn equal<E: fmt::Debug>(expected: E) -> Equal<E> {
    Equal { expected }
}

#[derive(Debug, Clone)]
pub struct Equal<E> {
    expected: E,
}

impl<A, E> Matcher<A> for Equal<E>
where
    A: PartialEq<E> + fmt::Debug + ?Sized,
    E: fmt::Debug,
{
    fn matches(&self, actual: &A) -> Result<bool, MatchError> {
        Ok(*actual == self.expected)
    }

    fn failure_message(&self, actual: &A) -> String {
        format::message(
            &format::object_of(actual, 1),
            "to equal",
            &format::object_of(&self.expected, 1),
        )
    }

    fn negated_failure_message(&self, actual: &A) -> Result<String, MatchError> {
        Ok(format::message(
            &format::object_of(actual, 1),
            "not to equal",
            &format::object_of(&self.expected, 1),
        ))
    }
}

// ─── Plain values ─────────────────────────────────────────────────────────────

// A plain value used where a matcher is expected means "equal to this value",
// so `have_response_code(200_u16)` reads like `have_response_code(equal(200_u16))`.
macro_rules! impl_value_matcher {
    ($($t:ty),* $(,)?) => {
        $(
            impl Matcher<$t> for $t {
                fn matches(&self, actual: &$t) -> Result<bool, MatchError> {
                    Ok(actual == self)
                }

                fn failure_message(&self, actual: &$t) -> String {
                    format::message(
                        &format::object_of(actual, 1),
                        "to equal",
                        &format::object_of(self, 1),
                    )
                }

                fn negated_failure_message(&self, actual: &$t) -> Result<String, MatchError> {
                    Ok(format::message(
                        &format::object_of(actual, 1),
                        "not to equal",
                        &format::object_of(self, 1),
                    ))
                }
            }
        )*
    };
}

impl_value_matcher!(
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
    bool,
    char,
    String,
    serde_json::Value,
);

// ─── String matchers ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrCheck {
    Contains,
    Prefix,
    Suffix,
}

impl StrCheck {
    fn verb(self) -> &'static str {
        match self {
            Self::Contains => "contain substring",
            Self::Prefix => "have prefix",
            Self::Suffix => "have suffix",
        }
    }
}

/// Matches strings by substring, prefix, or suffix.
#[derive(Debug, Clone)]
pub struct StrMatcher {
    check: StrCheck,
    needle: String,
}

/// Succeeds when the actual string contains `needle`.
pub fn contain_substring(needle: impl Into<String>) -> StrMatcher {
    StrMatcher {
        check: StrCheck::Contains,
        needle: needle.into(),
    }
}

/// Succeeds when the actual string starts with `prefix`.
pub fn have_prefix(prefix: impl Into<String>) -> StrMatcher {
    StrMatcher {
        check: StrCheck::Prefix,
        needle: prefix.into(),
    }
}

/// Succeeds when the actual string ends with `suffix`.
pub fn have_suffix(suffix: impl Into<String>) -> StrMatcher {
    StrMatcher {
        check: StrCheck::Suffix,
        needle: suffix.into(),
    }
}

impl<S> Matcher<S> for StrMatcher
where
    S: AsRef<str> + fmt::Debug + ?Sized,
{
    fn matches(&self, actual: &S) -> Result<bool, MatchError> {
        let s = actual.as_ref();
        Ok(match self.check {
            StrCheck::Contains => s.contains(&self.needle),
            StrCheck::Prefix => s.starts_with(&self.needle),
            StrCheck::Suffix => s.ends_with(&self.needle),
        })
    }

    fn failure_message(&self, actual: &S) -> String {
        format::message(
            &format::object_of(actual.as_ref(), 1),
            &format!("to {}", self.check.verb()),
            &format::object_of(self.needle.as_str(), 1),
        )
    }

    fn negated_failure_message(&self, actual: &S) -> Result<String, MatchError> {
        Ok(format::message(
            &format::object_of(actual.as_ref(), 1),
            &format!("not to {}", self.check.verb()),
            &format::object_of(self.needle.as_str(), 1),
        ))
    }
}

// ─── BeNumerically ────────────────────────────────────────────────────────────

/// A numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparison {
    /// Parse `<`, `<=`, `>`, `>=`, `==`.
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "==" => Some(Self::Eq),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
        }
    }
}

/// Succeeds when `actual OP expected` holds, e.g. `be_numerically(">", 400)`.
///
/// An unknown operator is reported as [`MatchError::InvalidExpectation`] when
/// the matcher is evaluated.
pub fn be_numerically<E: fmt::Debug>(op: &str, expected: E) -> BeNumerically<E> {
    BeNumerically {
        op: Comparison::parse(op).ok_or_else(|| op.to_string()),
        expected,
    }
}

#[derive(Debug, Clone)]
pub struct BeNumerically<E> {
    op: Result<Comparison, String>,
    expected: E,
}

impl<E> BeNumerically<E> {
    fn symbol(&self) -> &str {
        match &self.op {
            Ok(op) => op.symbol(),
            Err(raw) => raw.as_str(),
        }
    }
}

impl<A, E> Matcher<A> for BeNumerically<E>
where
    A: PartialOrd<E> + fmt::Debug + ?Sized,
    E: fmt::Debug,
{
    fn matches(&self, actual: &A) -> Result<bool, MatchError> {
        let op = self.op.as_ref().map_err(|raw| {
            MatchError::InvalidExpectation(format!("unknown comparator {raw:?}"))
        })?;
        let e = &self.expected;
        Ok(match op {
            Comparison::Lt => actual < e,
            Comparison::Le => actual <= e,
            Comparison::Gt => actual > e,
            Comparison::Ge => actual >= e,
            Comparison::Eq => actual == e,
        })
    }

    fn failure_message(&self, actual: &A) -> String {
        format::message(
            &format::object_of(actual, 1),
            &format!("to be {}", self.symbol()),
            &format::object_of(&self.expected, 1),
        )
    }

    fn negated_failure_message(&self, actual: &A) -> Result<String, MatchError> {
        Ok(format::message(
            &format::object_of(actual, 1),
            &format!("not to be {}", self.symbol()),
            &format::object_of(&self.expected, 1),
        ))
    }
}
