//! `match_len` / `match_cap` — match a collection's length or capacity against an inner matcher.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use causematch_core::format;
use causematch_core::{MatchError, Matcher};

/// Anything with a length.
pub trait HasLen {
    fn len_of(&self) -> usize;
}

/// Anything with an allocated capacity.
pub trait HasCapacity {
    fn capacity_of(&self) -> usize;
}

macro_rules! impl_has_len {
    ($( [$($gen:tt)*] $ty:ty ),* $(,)?) => {
        $(
            impl<$($gen)*> HasLen for $ty {
                fn len_of(&self) -> usize {
                    self.len()
                }
            }
        )*
    };
}

impl_has_len! {
    [] str,
    [] String,
    [T] [T],
    [T] Vec<T>,
    [T, const N: usize] [T; N],
    [T] VecDeque<T>,
    [K, V, S] HashMap<K, V, S>,
    [K, V] BTreeMap<K, V>,
    [T, S] HashSet<T, S>,
    [T] BTreeSet<T>,
}

macro_rules! impl_has_capacity {
    ($( [$($gen:tt)*] $ty:ty ),* $(,)?) => {
        $(
            impl<$($gen)*> HasCapacity for $ty {
                fn capacity_of(&self) -> usize {
                    self.capacity()
                }
            }
        )*
    };
}

impl_has_capacity! {
    [] String,
    [T] Vec<T>,
    [T] VecDeque<T>,
    [K, V, S] HashMap<K, V, S>,
    [T, S] HashSet<T, S>,
}

fn measured_failure(what: &str, obj: &str, inner: &str) -> String {
    format!(
        "Expected {what} of\n{obj}\nto match, but failed with\n{}",
        format::indent_string(inner, 1)
    )
}

fn measured_negated(what: &str, obj: &str, inner: &str) -> String {
    format!(
        "Expected {what} of\n{obj}\nnot to match, but did with\n{}",
        format::indent_string(inner, 1)
    )
}

// ─── MatchLen ─────────────────────────────────────────────────────────────────

/// Matches the length of a collection against `matcher`.
///
/// `match_len(equal(2_usize))` is a fixed-length check; `match_len(be_numerically(">", 0))`
/// is a dynamic one.
pub fn match_len<M: Matcher<usize>>(matcher: M) -> MatchLen<M> {
    MatchLen { matcher }
}

#[derive(Debug, Clone)]
pub struct MatchLen<M> {
    matcher: M,
}

impl<T, M> Matcher<T> for MatchLen<M>
where
    T: HasLen + fmt::Debug + ?Sized,
    M: Matcher<usize>,
{
    fn matches(&self, actual: &T) -> Result<bool, MatchError> {
        self.matcher.matches(&actual.len_of())
    }

    fn failure_message(&self, actual: &T) -> String {
        let len = actual.len_of();
        measured_failure(
            "length",
            &format::object_of(actual, 1),
            &self.matcher.failure_message(&len),
        )
    }

    fn negated_failure_message(&self, actual: &T) -> Result<String, MatchError> {
        let len = actual.len_of();
        Ok(measured_negated(
            "length",
            &format::object_of(actual, 1),
            &self.matcher.negated_failure_message(&len)?,
        ))
    }
}

// ─── MatchCap ─────────────────────────────────────────────────────────────────

/// Matches the capacity of a collection against `matcher`.
pub fn match_cap<M: Matcher<usize>>(matcher: M) -> MatchCap<M> {
    MatchCap { matcher }
}

#[derive(Debug, Clone)]
pub struct MatchCap<M> {
    matcher: M,
}

impl<T, M> Matcher<T> for MatchCap<M>
where
    T: HasCapacity + fmt::Debug + ?Sized,
    M: Matcher<usize>,
{
    fn matches(&self, actual: &T) -> Result<bool, MatchError> {
        self.matcher.matches(&actual.capacity_of())
    }

    fn failure_message(&self, actual: &T) -> String {
        let cap = actual.capacity_of();
        measured_failure(
            "capacity",
            &format::object_of(actual, 1),
            &self.matcher.failure_message(&cap),
        )
    }

    fn negated_failure_message(&self, actual: &T) -> Result<String, MatchError> {
        let cap = actual.capacity_of();
        Ok(measured_negated(
            "capacity",
            &format::object_of(actual, 1),
            &self.matcher.negated_failure_message(&cap)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causematch_core::{be_numerically, equal, expect};

    #[test]
    fn matches_length_of_common_collections() {
        expect("abc").to(match_len(equal(3_usize)));
        expect(&vec![1, 2]).to(match_len(equal(2_usize)));
        expect(&[0u8; 4]).to(match_len(be_numerically(">", 3_usize)));
        let map: HashMap<&str, i32> = [("a", 1)].into_iter().collect();
        expect(&map).to(match_len(equal(1_usize)));
    }

    #[test]
    fn length_failure_message() {
        let v = vec![1, 2];
        let msg = match_len(equal(3_usize)).failure_message(&v);
        assert_eq!(
            msg,
            "Expected length of\n    <Vec<i32>>: [1, 2]\nto match, but failed with\n    Expected\n        <usize>: 2\n    to equal\n        <usize>: 3"
        );
    }

    #[test]
    fn length_negated_message() {
        let msg = match_len(equal(2_usize)).negated_failure_message("ab").unwrap();
        assert!(msg.starts_with("Expected length of\n    <str>: \"ab\"\nnot to match, but did with\n"));
    }

    #[test]
    fn matches_capacity() {
        let v: Vec<u8> = Vec::with_capacity(10);
        expect(&v).to(match_cap(be_numerically(">=", 10_usize)));
        expect(&v).to_not(match_cap(equal(0_usize)));
        let msg = match_cap(equal(0_usize)).failure_message(&v);
        assert!(msg.starts_with("Expected capacity of\n    <Vec<u8>>: []\nto match, but failed with\n"));
    }
}
