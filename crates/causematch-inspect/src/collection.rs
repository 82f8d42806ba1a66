//! Element inspectors: `at_index`, `at_every` and `at_key`.
//!
//! Each one applies an inner matcher to part of a collection and reports
//! which element it looked at when that matcher fails.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use causematch_core::format;
use causematch_core::{MatchError, Matcher};

// ─── AtIndex ──────────────────────────────────────────────────────────────────

/// Matches the element at `index` against `matcher`.
///
/// A collection too short to have that index fails rather than erroring.
pub fn at_index<M>(index: usize, matcher: M) -> AtIndex<M> {
    AtIndex { index, matcher }
}

#[derive(Debug, Clone)]
pub struct AtIndex<M> {
    index: usize,
    matcher: M,
}

impl<M> AtIndex<M> {
    fn check<E>(&self, items: &[E]) -> Result<bool, MatchError>
    where
        M: Matcher<E>,
    {
        match items.get(self.index) {
            Some(item) => self.matcher.matches(item),
            None => Ok(false),
        }
    }

    fn explain<E>(&self, items: &[E], obj: String) -> String
    where
        M: Matcher<E>,
    {
        match items.get(self.index) {
            Some(item) => format!(
                "Matcher failed at slice index {}. {}",
                self.index,
                self.matcher.failure_message(item)
            ),
            None => format!(
                "Slice\n{obj}\nis too short to match against index {}",
                self.index
            ),
        }
    }

    fn explain_negated<E>(&self, items: &[E]) -> Result<String, MatchError>
    where
        M: Matcher<E>,
    {
        match items.get(self.index) {
            Some(item) => self.matcher.negated_failure_message(item),
            None => Err(MatchError::structural(format!(
                "index {} is out of range (length {})",
                self.index,
                items.len()
            ))),
        }
    }
}

// ─── AtEvery ──────────────────────────────────────────────────────────────────

/// Matches every element against `matcher`. An empty collection fails.
pub fn at_every<M>(matcher: M) -> AtEvery<M> {
    AtEvery { matcher }
}

#[derive(Debug, Clone)]
pub struct AtEvery<M> {
    matcher: M,
}

impl<M> AtEvery<M> {
    fn check<E>(&self, items: &[E]) -> Result<bool, MatchError>
    where
        M: Matcher<E>,
    {
        if items.is_empty() {
            return Ok(false);
        }
        for item in items {
            if !self.matcher.matches(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// First element the inner matcher rejects. Elements that error are
    /// treated as failing.
    fn first_failing<'i, E>(&self, items: &'i [E]) -> Option<(usize, &'i E)>
    where
        M: Matcher<E>,
    {
        items
            .iter()
            .enumerate()
            .find(|(_, item)| !matches!(self.matcher.matches(item), Ok(true)))
    }

    fn explain<E>(&self, items: &[E], _obj: String) -> String
    where
        M: Matcher<E>,
    {
        if items.is_empty() {
            return "Did not expect empty collection".to_string();
        }
        match self.first_failing(items) {
            Some((index, item)) => format!(
                "Match failed at index {index}:\n{}",
                self.matcher.failure_message(item)
            ),
            None => "Every element matched".to_string(),
        }
    }

    fn explain_negated<E>(&self, items: &[E]) -> Result<String, MatchError>
    where
        M: Matcher<E>,
    {
        match items.last() {
            Some(item) => self.matcher.negated_failure_message(item),
            None => Err(MatchError::structural("empty collection cannot match every element")),
        }
    }
}

macro_rules! impl_slice_matcher {
    ($name:ident) => {
        impl<E, M> Matcher<[E]> for $name<M>
        where
            E: fmt::Debug,
            M: Matcher<E>,
        {
            fn matches(&self, actual: &[E]) -> Result<bool, MatchError> {
                self.check(actual)
            }

            fn failure_message(&self, actual: &[E]) -> String {
                self.explain(actual, format::object_of(actual, 1))
            }

            fn negated_failure_message(&self, actual: &[E]) -> Result<String, MatchError> {
                self.explain_negated(actual)
            }
        }

        impl<E, M> Matcher<Vec<E>> for $name<M>
        where
            E: fmt::Debug,
            M: Matcher<E>,
        {
            fn matches(&self, actual: &Vec<E>) -> Result<bool, MatchError> {
                self.check(actual)
            }

            fn failure_message(&self, actual: &Vec<E>) -> String {
                self.explain(actual, format::object_of(actual, 1))
            }

            fn negated_failure_message(&self, actual: &Vec<E>) -> Result<String, MatchError> {
                self.explain_negated(actual)
            }
        }
    };
}

impl_slice_matcher!(AtIndex);
impl_slice_matcher!(AtEvery);

// ─── AtKey ────────────────────────────────────────────────────────────────────

/// Matches the value stored under `key` against `matcher`.
///
/// The key must have the map's own key type. A missing key fails.
pub fn at_key<K, M>(key: K, matcher: M) -> AtKey<K, M> {
    AtKey { key, matcher }
}

#[derive(Debug, Clone)]
pub struct AtKey<K, M> {
    key: K,
    matcher: M,
}

impl<K: fmt::Debug, M> AtKey<K, M> {
    fn explain<V>(&self, found: Option<&V>, obj: String) -> String
    where
        M: Matcher<V>,
    {
        match found {
            Some(value) => format!(
                "Matcher failed at map key {}. {}",
                format::object_of(&self.key, 0),
                self.matcher.failure_message(value)
            ),
            None => format!(
                "Map\n{obj}\ndoes not contain key\n{}",
                format::object_of(&self.key, 1)
            ),
        }
    }

    fn explain_negated<V>(&self, found: Option<&V>) -> Result<String, MatchError>
    where
        M: Matcher<V>,
    {
        match found {
            Some(value) => self.matcher.negated_failure_message(value),
            None => Err(MatchError::structural(format!(
                "map does not contain key {:?}",
                self.key
            ))),
        }
    }
}

impl<K, V, S, M> Matcher<HashMap<K, V, S>> for AtKey<K, M>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
    M: Matcher<V>,
{
    fn matches(&self, actual: &HashMap<K, V, S>) -> Result<bool, MatchError> {
        match actual.get(&self.key) {
            Some(value) => self.matcher.matches(value),
            None => Ok(false),
        }
    }

    fn failure_message(&self, actual: &HashMap<K, V, S>) -> String {
        self.explain(actual.get(&self.key), format::object_of(actual, 1))
    }

    fn negated_failure_message(&self, actual: &HashMap<K, V, S>) -> Result<String, MatchError> {
        self.explain_negated(actual.get(&self.key))
    }
}

impl<K, V, M> Matcher<BTreeMap<K, V>> for AtKey<K, M>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    M: Matcher<V>,
{
    fn matches(&self, actual: &BTreeMap<K, V>) -> Result<bool, MatchError> {
        match actual.get(&self.key) {
            Some(value) => self.matcher.matches(value),
            None => Ok(false),
        }
    }

    fn failure_message(&self, actual: &BTreeMap<K, V>) -> String {
        self.explain(actual.get(&self.key), format::object_of(actual, 1))
    }

    fn negated_failure_message(&self, actual: &BTreeMap<K, V>) -> Result<String, MatchError> {
        self.explain_negated(actual.get(&self.key))
    }
}
