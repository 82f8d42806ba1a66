//! Response inspectors over an in-memory [`ResponseRecorder`].
//!
//! `have_header`, `have_response_code` and `have_json_body` may be used with
//! `to_not` while the negated assertion holds, but they cannot explain a
//! negated failure: that path returns [`MatchError::NegationUnsupported`].

use http::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderName, InvalidHeaderValue};
use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use causematch_core::{MatchError, Matcher};

/// Errors building a [`ResponseRecorder`].
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("invalid header name: {0}")]
    HeaderName(#[from] InvalidHeaderName),

    #[error("invalid header value: {0}")]
    HeaderValue(#[from] InvalidHeaderValue),
}

/// A recorded response: status, headers and an optional body.
#[derive(Debug, Clone, Default)]
pub struct ResponseRecorder {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<String>,
}

impl ResponseRecorder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Append a header. Names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, RecorderError> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

fn negation_refused(matcher: &'static str) -> MatchError {
    MatchError::NegationUnsupported {
        matcher,
        reason: "cannot explain a negated response check",
    }
}

// ─── HaveHeader ───────────────────────────────────────────────────────────────

/// Matches the first value of header `name` against `matcher`.
///
/// A missing header is matched as the empty string, so
/// `to_not(have_header("x-id", contain_substring("a")))` holds for it. A
/// header present with an empty value is reported as missing.
pub fn have_header<M: Matcher<String>>(name: impl Into<String>, matcher: M) -> HaveHeader<M> {
    HaveHeader {
        name: name.into(),
        matcher,
    }
}

#[derive(Debug, Clone)]
pub struct HaveHeader<M> {
    name: String,
    matcher: M,
}

impl<M> HaveHeader<M> {
    fn value_of(&self, rr: &ResponseRecorder) -> Result<Option<String>, MatchError> {
        match rr.headers.get(self.name.as_str()) {
            None => Ok(None),
            Some(v) => v.to_str().map(|s| Some(s.to_string())).map_err(|_| {
                MatchError::structural(format!("header {} is not visible ASCII", self.name))
            }),
        }
    }
}

impl<M: Matcher<String>> Matcher<ResponseRecorder> for HaveHeader<M> {
    fn matches(&self, actual: &ResponseRecorder) -> Result<bool, MatchError> {
        let got = self.value_of(actual)?.unwrap_or_default();
        self.matcher.matches(&got)
    }

    fn failure_message(&self, actual: &ResponseRecorder) -> String {
        match self.value_of(actual) {
            Ok(Some(got)) if !got.is_empty() => {
                format!("{}: {}", self.name, self.matcher.failure_message(&got))
            }
            Ok(_) => {
                let mut found: Vec<&str> = actual.headers.keys().map(|k| k.as_str()).collect();
                found.sort_unstable();
                format!("{} is missing\nFound: {}", self.name, found.join(", "))
            }
            Err(e) => e.to_string(),
        }
    }

    fn negated_failure_message(&self, _actual: &ResponseRecorder) -> Result<String, MatchError> {
        Err(negation_refused("HaveHeader"))
    }
}

// ─── HaveResponseCode ─────────────────────────────────────────────────────────

/// Matches the status code against `matcher`, e.g.
/// `have_response_code(be_numerically(">=", 400_u16))`. A plain `u16`
/// matches by equality: `have_response_code(422_u16)`.
pub fn have_response_code<M: Matcher<u16>>(matcher: M) -> HaveResponseCode<M> {
    HaveResponseCode { matcher }
}

#[derive(Debug, Clone)]
pub struct HaveResponseCode<M> {
    matcher: M,
}

impl<M: Matcher<u16>> Matcher<ResponseRecorder> for HaveResponseCode<M> {
    fn matches(&self, actual: &ResponseRecorder) -> Result<bool, MatchError> {
        self.matcher.matches(&actual.status.as_u16())
    }

    /// The inner diagnostic followed by the body, which usually says why.
    fn failure_message(&self, actual: &ResponseRecorder) -> String {
        format!(
            "{}\nBody:\n{}",
            self.matcher.failure_message(&actual.status.as_u16()),
            actual.body().unwrap_or("<nil>")
        )
    }

    fn negated_failure_message(&self, _actual: &ResponseRecorder) -> Result<String, MatchError> {
        Err(negation_refused("HaveResponseCode"))
    }
}

// ─── HaveJsonBody ─────────────────────────────────────────────────────────────

/// Decodes the body as JSON and matches it against `matcher`.
///
/// A body that fails to decode (or is absent) fails the match.
pub fn have_json_body<M: Matcher<Value>>(matcher: M) -> HaveJsonBody<M> {
    HaveJsonBody { matcher }
}

#[derive(Debug, Clone)]
pub struct HaveJsonBody<M> {
    matcher: M,
}

fn decode(rr: &ResponseRecorder) -> Result<Value, serde_json::Error> {
    serde_json::from_str(rr.body().unwrap_or_default())
}

impl<M: Matcher<Value>> Matcher<ResponseRecorder> for HaveJsonBody<M> {
    fn matches(&self, actual: &ResponseRecorder) -> Result<bool, MatchError> {
        match decode(actual) {
            Ok(body) => self.matcher.matches(&body),
            Err(_) => Ok(false),
        }
    }

    fn failure_message(&self, actual: &ResponseRecorder) -> String {
        match decode(actual) {
            Ok(body) => self.matcher.failure_message(&body),
            Err(e) => format!("Error decoding body: {e}"),
        }
    }

    fn negated_failure_message(&self, _actual: &ResponseRecorder) -> Result<String, MatchError> {
        Err(negation_refused("HaveJsonBody"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causematch_core::{
        be_numerically, contain_substring, equal, expect, AssertionError,
    };
    use serde_json::json;

    fn response() -> ResponseRecorder {
        ResponseRecorder::new(StatusCode::UNPROCESSABLE_ENTITY)
            .with_header("Test-Header", "somestring")
            .unwrap()
            .with_header("Another-Header", "x")
            .unwrap()
            .with_body(r#"{"a": [1, 2], "ok": false}"#)
    }

    #[test]
    fn header_is_matched_case_insensitively() {
        let rr = response();
        expect(&rr).to(have_header("Test-Header", contain_substring("some")));
        expect(&rr).to(have_header("test-header", equal("somestring")));
        expect(&rr).to_not(have_header("Test-Header", contain_substring("otherstring")));
    }

    #[test]
    fn missing_header_lists_what_was_found() {
        let rr = response();
        let m = have_header("X-Missing", contain_substring("a"));
        assert!(!m.matches(&rr).unwrap());
        assert_eq!(
            m.failure_message(&rr),
            "X-Missing is missing\nFound: another-header, test-header"
        );
    }

    #[test]
    fn empty_header_is_reported_as_missing() {
        let rr = response().with_header("X-Empty", "").unwrap();
        let m = have_header("X-Empty", contain_substring("a"));
        assert!(!m.matches(&rr).unwrap());
        assert_eq!(
            m.failure_message(&rr),
            "X-Empty is missing\nFound: another-header, test-header, x-empty"
        );
    }

    #[test]
    fn header_mismatch_is_prefixed_with_the_name() {
        let rr = response();
        let msg = have_header("Test-Header", equal("other")).failure_message(&rr);
        assert!(msg.starts_with("Test-Header: Expected\n    <String>: \"somestring\""));
    }

    #[test]
    fn response_code_failure_includes_the_body() {
        let rr = ResponseRecorder::new(StatusCode::UNPROCESSABLE_ENTITY).with_body("abc");
        expect(&rr).to(have_response_code(be_numerically(">=", 400_u16)));
        let m = have_response_code(equal(301_u16));
        assert!(!m.matches(&rr).unwrap());
        assert_eq!(
            m.failure_message(&rr),
            "Expected\n    <u16>: 422\nto equal\n    <u16>: 301\nBody:\nabc"
        );
    }

    #[test]
    fn plain_status_code_matches_by_equality() {
        let rr = ResponseRecorder::new(StatusCode::UNPROCESSABLE_ENTITY).with_body("abc");
        expect(&rr).to(have_response_code(422_u16));
        let m = have_response_code(StatusCode::OK.as_u16());
        assert!(!m.matches(&rr).unwrap());
        assert_eq!(
            m.failure_message(&rr),
            "Expected\n    <u16>: 422\nto equal\n    <u16>: 200\nBody:\nabc"
        );
    }

    #[test]
    fn json_body_is_decoded_before_matching() {
        let rr = response();
        expect(&rr).to(have_json_body(equal(json!({"a": [1, 2], "ok": false}))));
        expect(&rr).to(have_json_body(json!({"a": [1, 2], "ok": false})));
    }

    #[test]
    fn undecodable_body_fails() {
        let rr = ResponseRecorder::new(StatusCode::OK).with_body("not json");
        let m = have_json_body(equal(json!(null)));
        assert!(!m.matches(&rr).unwrap());
        assert!(m.failure_message(&rr).starts_with("Error decoding body: "));
    }

    #[test]
    fn negated_failure_is_refused() {
        let rr = response();
        let err = expect(&rr)
            .try_to_not(have_response_code(equal(422_u16)))
            .unwrap_err();
        assert!(matches!(
            err,
            AssertionError::Matcher(MatchError::NegationUnsupported { .. })
        ));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let err = ResponseRecorder::default().with_header("bad name", "v").unwrap_err();
        assert!(matches!(err, RecorderError::HeaderName(_)));
    }
}
