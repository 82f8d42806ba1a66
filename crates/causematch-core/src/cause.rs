//! `CauseMatcher` — matches an error if it, or anything it wraps, satisfies a target matcher.
//!
//! Search order at every node:
//! 1. the target matcher against the node itself
//! 2. the single-unwrap edge ([`SingleUnwrap`](crate::SingleUnwrap))
//! 3. the root-cause edge ([`RootCause`](crate::RootCause))
//! 4. each aggregate child in order ([`Aggregate`](crate::Aggregate))
//!
//! The first hit wins. The order only decides which node is recorded as the
//! witness when several would match; it never changes the verdict.
//!
//! An edge leading back to a node already on the current path (by
//! [`ErrorRef::is_same`]) is not followed, so cycles through existing nodes
//! terminate. The depth ceiling only stops adapters that keep producing new
//! nodes.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::MatchError;
use crate::match_error::{ErrorExpectation, MatchErrorMatcher};
use crate::matcher::Matcher;
use crate::value::{Actual, ErrorRef};

/// Default ceiling on search depth. Never reached by well-behaved adapters.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration for a [`CauseMatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CauseMatcherConfig {
    /// Maximum number of edges followed from the top-level error before the
    /// search aborts with [`MatchError::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for CauseMatcherConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ─── Outcome types ────────────────────────────────────────────────────────────

/// One edge followed during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Unwrap,
    RootCause,
    Aggregate { index: usize },
}

/// The result of one search.
#[derive(Debug, Clone)]
pub struct MatchOutcome<'a> {
    node: Option<ErrorRef<'a>>,
    path: Vec<Step>,
}

impl<'a> MatchOutcome<'a> {
    fn no_match() -> Self {
        Self {
            node: None,
            path: Vec::new(),
        }
    }

    /// Returns `true` if some reachable node satisfied the target matcher.
    pub fn matched(&self) -> bool {
        self.node.is_some()
    }

    /// The node where the match occurred.
    pub fn node(&self) -> Option<ErrorRef<'a>> {
        self.node
    }

    /// Edges followed from the top-level error to the matched node.
    /// Empty for a direct match or no match.
    pub fn path(&self) -> &[Step] {
        &self.path
    }
}

/// Owned record of the matched node, kept after the search for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub path: Vec<Step>,
    pub type_name: String,
    pub message: String,
}

/// Lifecycle of a [`CauseMatcher`]. Every state but `NotRun` is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    NotRun,
    Matched(Witness),
    NotMatched,
    /// The actual value was nil or not an error.
    InvalidInput(MatchError),
    /// The search was cut short by a target matcher failure or the depth ceiling.
    Aborted(MatchError),
}

// ─── CauseMatcher ─────────────────────────────────────────────────────────────

/// Matches an error when the error, or any error reachable through its
/// wrapping relationships, satisfies the target matcher.
///
/// Single use: create one per assertion. A second [`attempt`](Self::attempt)
/// returns [`MatchError::AlreadyAttempted`]. Negated use is refused with
/// [`MatchError::NegationUnsupported`], since a failed deep search has no single
/// node a diagnostic could name.
#[derive(Debug)]
pub struct CauseMatcher<M> {
    target: M,
    config: CauseMatcherConfig,
    state: RefCell<RunState>,
}

impl<M> CauseMatcher<M> {
    pub fn new(target: M) -> Self {
        Self::with_config(target, CauseMatcherConfig::default())
    }

    pub fn with_config(target: M, config: CauseMatcherConfig) -> Self {
        Self {
            target,
            config,
            state: RefCell::new(RunState::NotRun),
        }
    }

    pub fn target(&self) -> &M {
        &self.target
    }

    pub fn config(&self) -> &CauseMatcherConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state.borrow().clone()
    }

    /// The matched node, once an attempt has succeeded.
    pub fn witness(&self) -> Option<Witness> {
        match &*self.state.borrow() {
            RunState::Matched(w) => Some(w.clone()),
            _ => None,
        }
    }

    /// Run the search once against `actual`.
    ///
    /// Nil and non-error inputs are rejected before any search. A structural
    /// failure raised by the target matcher on any node aborts the whole
    /// search with that failure, even if a sibling would have matched.
    pub fn attempt<'a>(&self, actual: &Actual<'a>) -> Result<MatchOutcome<'a>, MatchError>
    where
        M: Matcher<ErrorRef<'a>>,
    {
        if *self.state.borrow() != RunState::NotRun {
            return Err(MatchError::AlreadyAttempted {
                matcher: "CauseMatcher",
            });
        }

        let result = actual.as_error().and_then(|root| {
            Search {
                target: &self.target,
                max_depth: self.config.max_depth,
            }
            .run(root)
        });

        let next = match &result {
            Ok(outcome) => match outcome.node {
                Some(node) => RunState::Matched(Witness {
                    path: outcome.path.clone(),
                    type_name: node.type_name().to_string(),
                    message: node.message(),
                }),
                None => RunState::NotMatched,
            },
            Err(e) if e.is_invalid_input() => RunState::InvalidInput(e.clone()),
            Err(e) => RunState::Aborted(e.clone()),
        };
        *self.state.borrow_mut() = next;
        result
    }
}

const NEGATION_REFUSED: MatchError = MatchError::NegationUnsupported {
    matcher: "CauseMatcher",
    reason: "cannot name a single witness for a failed negative search",
};

impl<'a, M> Matcher<Actual<'a>> for CauseMatcher<M>
where
    M: Matcher<ErrorRef<'a>>,
{
    fn matches(&self, actual: &Actual<'a>) -> Result<bool, MatchError> {
        self.attempt(actual).map(|outcome| outcome.matched())
    }

    /// The target matcher's own explanation against the top-level error, not
    /// against whichever node the search reached last.
    fn failure_message(&self, actual: &Actual<'a>) -> String {
        match actual.as_error() {
            Ok(err) => self.target.failure_message(&err),
            Err(e) => e.to_string(),
        }
    }

    fn negated_failure_message(&self, _actual: &Actual<'a>) -> Result<String, MatchError> {
        Err(NEGATION_REFUSED)
    }

    fn ensure_negatable(&self) -> Result<(), MatchError> {
        Err(NEGATION_REFUSED)
    }
}

/// Matches an error caused by `expected`, anywhere in its wrap graph.
///
/// `expected` is a message (`&str`/`String`, compared for equality) or any
/// [`ErrorExpectation`], e.g. [`MatchErrorMatcher::satisfying`].
///
/// ```rust
/// use causematch_core::{be_caused_by, expect, Actual, Message, Wrapped};
///
/// let err = Wrapped::new(Message::new("blah"), "foo");
/// expect(&Actual::error(&err)).to(be_caused_by("blah"));
/// expect(&Actual::error(&err)).to(be_caused_by("foo: blah"));
/// ```
pub fn be_caused_by(expected: impl Into<ErrorExpectation>) -> CauseMatcher<MatchErrorMatcher> {
    CauseMatcher::new(MatchErrorMatcher::new(expected))
}

// ─── Search ───────────────────────────────────────────────────────────────────

struct Search<'m, M: ?Sized> {
    target: &'m M,
    max_depth: usize,
}

struct Found<'a> {
    node: ErrorRef<'a>,
    /// Steps from the matched node back up to the root.
    rev_path: Vec<Step>,
}

impl<'m, M: ?Sized> Search<'m, M> {
    fn run<'a>(&self, root: ErrorRef<'a>) -> Result<MatchOutcome<'a>, MatchError>
    where
        M: Matcher<ErrorRef<'a>>,
    {
        let outcome = match self.visit(root, &mut Vec::new())? {
            Some(found) => {
                let mut path = found.rev_path;
                path.reverse();
                MatchOutcome {
                    node: Some(found.node),
                    path,
                }
            }
            None => MatchOutcome::no_match(),
        };
        debug!(
            matched = outcome.matched(),
            depth = outcome.path.len(),
            "cause search finished"
        );
        Ok(outcome)
    }

    /// `path` holds the nodes from the root down to `node`'s parent. An edge
    /// back to any of them is treated as absent.
    fn visit<'a>(
        &self,
        node: ErrorRef<'a>,
        path: &mut Vec<ErrorRef<'a>>,
    ) -> Result<Option<Found<'a>>, MatchError>
    where
        M: Matcher<ErrorRef<'a>>,
    {
        let depth = path.len();
        if depth > self.max_depth {
            warn!(limit = self.max_depth, "cause search exceeded depth ceiling");
            return Err(MatchError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        if self.target.matches(&node)? {
            trace!(depth, node = %node, "target matched");
            return Ok(Some(Found {
                node,
                rev_path: Vec::new(),
            }));
        }

        path.push(node);
        let found = self.follow_edges(node, path);
        path.pop();
        found
    }

    fn follow_edges<'a>(
        &self,
        node: ErrorRef<'a>,
        path: &mut Vec<ErrorRef<'a>>,
    ) -> Result<Option<Found<'a>>, MatchError>
    where
        M: Matcher<ErrorRef<'a>>,
    {
        if let Some(next) = node.single_unwrap() {
            if let Some(found) = self.descend(next, path, Step::Unwrap)? {
                return Ok(Some(found));
            }
        }

        if let Some(next) = node.root_cause() {
            if let Some(found) = self.descend(next, path, Step::RootCause)? {
                return Ok(Some(found));
            }
        }

        if let Some(children) = node.aggregate() {
            for (index, child) in children.into_iter().enumerate() {
                if let Some(found) = self.descend(child, path, Step::Aggregate { index })? {
                    return Ok(Some(found));
                }
            }
        }

        Ok(None)
    }

    fn descend<'a>(
        &self,
        next: ErrorRef<'a>,
        path: &mut Vec<ErrorRef<'a>>,
        step: Step,
    ) -> Result<Option<Found<'a>>, MatchError>
    where
        M: Matcher<ErrorRef<'a>>,
    {
        if path.iter().any(|ancestor| ancestor.is_same(next)) {
            trace!(depth = path.len(), ?step, "edge leads back onto the current path");
            return Ok(None);
        }
        trace!(depth = path.len(), ?step, "following edge");
        Ok(self.visit(next, path)?.map(|mut found| {
            found.rev_path.push(step);
            found
        }))
    }
}
