//! Schema-driven payload validation.
//!
//! A [`Schema`] is a list of [`Field`]s, each carrying a [`Rule`]. The same
//! schema validates full payloads (every field required unless it has a
//! default) and partial ones (only present fields checked). Neither mode
//! panics: the result is either the normalized object or the list of
//! per-field [`Violation`]s, ready to be serialized back to the caller.

mod rules;

pub use rules::Rule;

use crate::models::{Genre, MoviePatch, NewMovie};
use chrono::Datelike;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    InvalidType,
    TooSmall,
    TooBig,
    InvalidString,
    InvalidEnumValue,
}

/// One offending field. Serialized as-is into the `{"error": [...]}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub code: ViolationCode,
    pub expected: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
    pub message: String,
}

impl Violation {
    pub(crate) fn new(
        field: &str,
        code: ViolationCode,
        expected: impl Into<String>,
        received: Option<&Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.to_string(),
            code,
            expected: expected.into(),
            received: received.cloned(),
            message: message.into(),
        }
    }

    /// Violation for a request body that isn't a JSON object at all.
    pub fn body(received: Option<&Value>, message: impl Into<String>) -> Self {
        Self::new("body", ViolationCode::InvalidType, "object", received, message)
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub rule: Rule,
    /// Applied on full validation when the field is absent.
    pub default: Option<Value>,
}

impl Field {
    pub fn required(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            rule,
            default: None,
        }
    }

    pub fn with_default(name: &'static str, rule: Rule, default: Value) -> Self {
        Self {
            name,
            rule,
            default: Some(default),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    /// The movie schema, with the year bounded by next calendar year (UTC).
    pub fn movie() -> Self {
        Self::movie_for_year(chrono::Utc::now().year())
    }

    pub fn movie_for_year(current_year: i32) -> Self {
        Self {
            fields: vec![
                Field::required("title", Rule::NonEmptyString),
                Field::required(
                    "year",
                    Rule::IntRange {
                        min: 1900,
                        max: i64::from(current_year) + 1,
                    },
                ),
                Field::required("director", Rule::NonEmptyString),
                Field::required("duration", Rule::PositiveInt),
                Field::with_default(
                    "rate",
                    Rule::NumberRange {
                        min: 0.0,
                        max: 10.0,
                    },
                    Value::from(0),
                ),
                Field::required("poster", Rule::Url),
                Field::required(
                    "genre",
                    Rule::EnumList {
                        allowed: Genre::names(),
                    },
                ),
            ],
        }
    }

    /// Checks every field. Unknown keys are dropped and defaults filled in.
    pub fn validate(&self, payload: &Value) -> Result<Map<String, Value>, Vec<Violation>> {
        self.run(payload, false)
    }

    /// Checks only the fields present in `payload`. `{}` is valid.
    pub fn validate_partial(&self, payload: &Value) -> Result<Map<String, Value>, Vec<Violation>> {
        self.run(payload, true)
    }

    fn run(&self, payload: &Value, partial: bool) -> Result<Map<String, Value>, Vec<Violation>> {
        let Some(object) = payload.as_object() else {
            return Err(vec![Violation::body(
                Some(payload),
                "Expected a JSON object",
            )]);
        };

        let mut data = Map::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            match object.get(field.name) {
                Some(value) => match field.rule.check(field.name, value) {
                    Ok(normalized) => {
                        data.insert(field.name.to_string(), normalized);
                    }
                    Err(violation) => violations.push(violation),
                },
                None if partial => {}
                None => match &field.default {
                    Some(default) => {
                        data.insert(field.name.to_string(), default.clone());
                    }
                    None => violations.push(Violation::new(
                        field.name,
                        ViolationCode::Required,
                        field.rule.describe(),
                        None,
                        format!("{} is required", field.name),
                    )),
                },
            }
        }

        if violations.is_empty() {
            Ok(data)
        } else {
            Err(violations)
        }
    }
}

/// Full validation straight into the typed create payload.
pub fn validate_movie(schema: &Schema, payload: &Value) -> Result<NewMovie, Vec<Violation>> {
    schema.validate(payload).and_then(into_typed)
}

/// Partial validation straight into the typed patch.
pub fn validate_partial_movie(
    schema: &Schema,
    payload: &Value,
) -> Result<MoviePatch, Vec<Violation>> {
    schema.validate_partial(payload).and_then(into_typed)
}

fn into_typed<T: DeserializeOwned>(data: Map<String, Value>) -> Result<T, Vec<Violation>> {
    serde_json::from_value(Value::Object(data))
        .map_err(|e| vec![Violation::body(None, e.to_string())])
}
