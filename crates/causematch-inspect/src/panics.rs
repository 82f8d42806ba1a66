//! `panic_with` — run a closure and match the message it panics with.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use causematch_core::format;
use causematch_core::{MatchError, Matcher};

/// Succeeds when the closure panics with a message `matcher` accepts.
///
/// Only `&str`/`String` payloads (what `panic!` produces) can be matched;
/// any other payload is a structural error. Negating is refused: "did not
/// panic with X" mixes two different outcomes.
pub fn panic_with<M: Matcher<String>>(matcher: M) -> PanicWith<M> {
    PanicWith {
        matcher,
        last: RefCell::new(None),
    }
}

#[derive(Debug)]
pub struct PanicWith<M> {
    matcher: M,
    /// Outcome of the most recent run, kept so diagnostics do not run the
    /// closure a second time.
    last: RefCell<Option<Outcome>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Returned,
    Panicked(String),
}

fn payload_message(payload: Box<dyn Any + Send>) -> Result<String, MatchError> {
    match payload.downcast::<String>() {
        Ok(s) => Ok(*s),
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(s) => Ok((*s).to_string()),
            Err(_) => Err(MatchError::structural(
                "PanicWith can only match string panic payloads",
            )),
        },
    }
}

fn negation_refused() -> MatchError {
    MatchError::NegationUnsupported {
        matcher: "PanicWith",
        reason: "leads to ambiguous test conditions",
    }
}

fn render_fn<F: ?Sized>() -> String {
    format!(
        "{}<{}>",
        format::INDENT,
        format::short_type_name(std::any::type_name::<F>())
    )
}

impl<M> PanicWith<M> {
    fn run<F: Fn()>(&self, f: &F) -> Result<Outcome, MatchError> {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| f())) {
            Ok(()) => Outcome::Returned,
            Err(payload) => {
                let message = payload_message(payload)?;
                debug!(panic = %message, "caught panic");
                Outcome::Panicked(message)
            }
        };
        *self.last.borrow_mut() = Some(outcome.clone());
        Ok(outcome)
    }

    fn outcome<F: Fn()>(&self, f: &F) -> Result<Outcome, MatchError> {
        let cached = self.last.borrow().clone();
        match cached {
            Some(outcome) => Ok(outcome),
            None => self.run(f),
        }
    }
}

impl<F, M> Matcher<F> for PanicWith<M>
where
    F: Fn(),
    M: Matcher<String>,
{
    fn matches(&self, actual: &F) -> Result<bool, MatchError> {
        match self.run(actual)? {
            Outcome::Returned => Ok(false),
            Outcome::Panicked(message) => self.matcher.matches(&message),
        }
    }

    fn failure_message(&self, actual: &F) -> String {
        let obj = render_fn::<F>();
        match self.outcome(actual) {
            Ok(Outcome::Returned) => format!("Expected\n{obj}\nto panic, but did not"),
            Ok(Outcome::Panicked(message)) => format!(
                "Expected\n{obj}\nto panic with matcher, but matcher failed:\n{}",
                self.matcher.failure_message(&message)
            ),
            Err(e) => e.to_string(),
        }
    }

    fn negated_failure_message(&self, _actual: &F) -> Result<String, MatchError> {
        Err(negation_refused())
    }

    fn ensure_negatable(&self) -> Result<(), MatchError> {
        Err(negation_refused())
    }
}
