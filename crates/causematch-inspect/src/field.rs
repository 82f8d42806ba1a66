//! `match_field` — match one named field of a serializable value.
//!
//! The actual value is serialized with `serde_json`, so the inner matcher
//! sees the field as a [`serde_json::Value`]. Pass a `Value` to compare by
//! equality (`match_field("id", json!(7))`), or a matcher such as
//! `equal(7)` (`Value: PartialEq<i64>`, `PartialEq<&str>`…).

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use causematch_core::format;
use causematch_core::{MatchError, Matcher};

/// Matches the field `name` of the actual value against `matcher`.
pub fn match_field<M: Matcher<Value>>(name: impl Into<String>, matcher: M) -> MatchField<M> {
    MatchField {
        name: name.into(),
        matcher,
    }
}

#[derive(Debug, Clone)]
pub struct MatchField<M> {
    name: String,
    matcher: M,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<M> MatchField<M> {
    fn field_of<T>(&self, actual: &T) -> Result<Value, MatchError>
    where
        T: Serialize + ?Sized,
    {
        let type_name = format::short_type_name(std::any::type_name::<T>());
        let value = serde_json::to_value(actual)
            .map_err(|e| MatchError::structural(format!("MatchField could not serialize {type_name}: {e}")))?;
        match value {
            Value::Object(mut map) => map.remove(&self.name).ok_or_else(|| {
                MatchError::structural(format!(
                    "field '{}' does not exist on type {type_name}",
                    self.name
                ))
            }),
            other => Err(MatchError::structural(format!(
                "MatchField matcher requires an actual of kind struct, not {}",
                kind_of(&other)
            ))),
        }
    }
}

impl<T, M> Matcher<T> for MatchField<M>
where
    T: Serialize + fmt::Debug + ?Sized,
    M: Matcher<Value>,
{
    fn matches(&self, actual: &T) -> Result<bool, MatchError> {
        let field = self.field_of(actual)?;
        self.matcher.matches(&field)
    }

    fn failure_message(&self, actual: &T) -> String {
        let inner = match self.field_of(actual) {
            Ok(field) => self.matcher.failure_message(&field),
            Err(e) => e.to_string(),
        };
        format!(
            "Field {} of\n{}\ndid not match. {inner}",
            self.name,
            format::object_of(actual, 1)
        )
    }

    fn negated_failure_message(&self, actual: &T) -> Result<String, MatchError> {
        let field = self.field_of(actual)?;
        Ok(format!(
            "Field {} of\n{}\nmatched. {}",
            self.name,
            format::object_of(actual, 1),
            self.matcher.negated_failure_message(&field)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causematch_core::{equal, expect};
    use serde_json::json;

    #[derive(Debug, Serialize)]
    struct Account {
        name: String,
        balance: i64,
    }

    fn account() -> Account {
        Account {
            name: "ops".into(),
            balance: 10,
        }
    }

    #[test]
    fn matches_a_named_field() {
        let a = account();
        expect(&a).to(match_field("balance", equal(json!(10))));
        expect(&a).to(match_field("name", equal(json!("ops"))));
        expect(&a).to(match_field("name", json!("ops")));
        expect(&a).to_not(match_field("balance", json!(11)));
        expect(&a).to_not(match_field("balance", equal(json!(11))));
    }

    #[test]
    fn failure_message_names_the_field() {
        let a = account();
        let msg = match_field("balance", equal(json!(11))).failure_message(&a);
        assert!(msg.starts_with(
            "Field balance of\n    <Account>: Account { name: \"ops\", balance: 10 }\ndid not match. Expected\n"
        ));
    }

    #[test]
    fn missing_field_is_a_structural_error() {
        let err = match_field("owner", equal(json!(null)))
            .matches(&account())
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::Structural("field 'owner' does not exist on type Account".into())
        );
    }

    #[test]
    fn non_struct_actual_is_a_structural_error() {
        let err = match_field("len", equal(json!(1))).matches(&vec![1, 2]).unwrap_err();
        assert_eq!(
            err,
            MatchError::Structural(
                "MatchField matcher requires an actual of kind struct, not array".into()
            )
        );
    }
}
