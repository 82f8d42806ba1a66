//! causematch-core — caused-by error matching for tests.
//!
//! This crate defines:
//! - [`Matcher`] — the capability every matcher implements
//! - [`ErrorValue`] and the three wrapping capabilities [`SingleUnwrap`],
//!   [`RootCause`], [`Aggregate`]
//! - [`CauseMatcher`] / [`be_caused_by`] — matches an error if it or anything
//!   it wraps satisfies a target matcher
//! - [`MatchErrorMatcher`] — matches a single error node; [`same_error`]
//!   matches one node by identity
//! - [`wrap`] — ready-made plain, wrapped and multi errors
//! - [`expect`] — the assertion surface
//!
//! # Quick Start
//!
//! ```rust
//! use causematch_core::{be_caused_by, expect, Actual, Message, MultiError, Wrapped};
//!
//! let err = MultiError::new()
//!     .append(Message::new("foo"))
//!     .append(Wrapped::new(Message::new("blah"), "spam"));
//!
//! expect(&Actual::error(&err)).to(be_caused_by("blah"));
//! ```

pub mod assertion;
pub mod basic;
pub mod cause;
pub mod error;
pub mod format;
pub mod match_error;
pub mod matcher;
pub mod value;
pub mod wrap;

pub use assertion::{expect, Expectation};
pub use basic::{be_numerically, contain_substring, equal, have_prefix, have_suffix};
pub use cause::{be_caused_by, CauseMatcher, CauseMatcherConfig, MatchOutcome, RunState, Step, Witness};
pub use error::{AssertionError, MatchError};
pub use match_error::{same_error, ErrorExpectation, MatchErrorMatcher, SameError};
pub use matcher::{BoxMatcher, Matcher};
pub use value::{Actual, Aggregate, ErrorRef, ErrorValue, RootCause, SingleUnwrap};
pub use wrap::{Cause, Message, MultiError, Wrapped};
