use super::{Violation, ViolationCode};
use serde_json::Value;
use url::Url;

/// Constraint attached to a single schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    NonEmptyString,
    /// Whole number within `[min, max]`.
    IntRange { min: i64, max: i64 },
    /// Whole number greater than zero (and fitting in a `u32`).
    PositiveInt,
    NumberRange { min: f64, max: f64 },
    /// Absolute URL with a scheme and host.
    Url,
    /// Non-empty array whose entries all belong to `allowed`.
    EnumList { allowed: Vec<&'static str> },
}

impl Rule {
    /// Human readable form of the constraint, used as `expected`.
    pub fn describe(&self) -> String {
        match self {
            Rule::NonEmptyString => "non-empty string".to_string(),
            Rule::IntRange { min, max } => format!("integer between {min} and {max}"),
            Rule::PositiveInt => "positive integer".to_string(),
            Rule::NumberRange { min, max } => format!("number between {min} and {max}"),
            Rule::Url => "url".to_string(),
            Rule::EnumList { allowed } => format!("non-empty array of {}", allowed.join(" | ")),
        }
    }

    /// Validates `value`, returning the normalized value to keep.
    pub fn check(&self, field: &str, value: &Value) -> Result<Value, Violation> {
        let fail = |code: ViolationCode, message: String| -> Result<Value, Violation> {
            Err(Violation::new(field, code, self.describe(), Some(value), message))
        };

        match self {
            Rule::NonEmptyString => match value.as_str() {
                None => fail(
                    ViolationCode::InvalidType,
                    format!("{field} must be a string"),
                ),
                Some("") => fail(
                    ViolationCode::TooSmall,
                    format!("{field} must not be empty"),
                ),
                Some(_) => Ok(value.clone()),
            },
            Rule::IntRange { min, max } => match as_integer(value) {
                None => fail(
                    ViolationCode::InvalidType,
                    format!("{field} must be an integer"),
                ),
                Some(n) if n < *min => fail(
                    ViolationCode::TooSmall,
                    format!("{field} must be at least {min}"),
                ),
                Some(n) if n > *max => fail(
                    ViolationCode::TooBig,
                    format!("{field} must be at most {max}"),
                ),
                Some(n) => Ok(Value::from(n)),
            },
            Rule::PositiveInt => match as_integer(value) {
                None => fail(
                    ViolationCode::InvalidType,
                    format!("{field} must be an integer"),
                ),
                Some(n) if n <= 0 => fail(
                    ViolationCode::TooSmall,
                    format!("{field} must be greater than 0"),
                ),
                Some(n) if n > i64::from(u32::MAX) => fail(
                    ViolationCode::TooBig,
                    format!("{field} must be at most {}", u32::MAX),
                ),
                Some(n) => Ok(Value::from(n)),
            },
            Rule::NumberRange { min, max } => match value.as_f64() {
                None => fail(
                    ViolationCode::InvalidType,
                    format!("{field} must be a number"),
                ),
                Some(n) if n < *min => fail(
                    ViolationCode::TooSmall,
                    format!("{field} must be at least {min}"),
                ),
                Some(n) if n > *max => fail(
                    ViolationCode::TooBig,
                    format!("{field} must be at most {max}"),
                ),
                Some(_) => Ok(value.clone()),
            },
            Rule::Url => match value.as_str() {
                None => fail(
                    ViolationCode::InvalidType,
                    format!("{field} must be a string"),
                ),
                Some(s) if is_url(s) => Ok(value.clone()),
                Some(_) => fail(
                    ViolationCode::InvalidString,
                    format!("{field} must be a valid URL"),
                ),
            },
            Rule::EnumList { allowed } => {
                let Some(items) = value.as_array() else {
                    return fail(
                        ViolationCode::InvalidType,
                        format!("{field} must be an array"),
                    );
                };
                if items.is_empty() {
                    return fail(
                        ViolationCode::TooSmall,
                        format!("{field} must contain at least one entry"),
                    );
                }
                let invalid: Vec<&Value> = items
                    .iter()
                    .filter(|item| !item.as_str().is_some_and(|s| allowed.iter().any(|a| *a == s)))
                    .collect();
                if invalid.is_empty() {
                    Ok(value.clone())
                } else {
                    fail(
                        ViolationCode::InvalidEnumValue,
                        format!(
                            "{field} contains unsupported values {}; expected one of {}",
                            Value::from(invalid.into_iter().cloned().collect::<Vec<_>>()),
                            allowed.join(", ")
                        ),
                    )
                }
            }
        }
    }
}

/// Integers, including integral floats such as `2021.0`.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn is_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.has_host())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_floats_are_normalized() {
        let rule = Rule::IntRange { min: 1900, max: 2027 };
        assert_eq!(rule.check("year", &json!(2021.0)).unwrap(), json!(2021));
        assert!(rule.check("year", &json!(2021.5)).is_err());
        assert!(rule.check("year", &json!("2021")).is_err());
    }

    #[test]
    fn positive_int_rejects_zero_and_negatives() {
        assert!(Rule::PositiveInt.check("duration", &json!(0)).is_err());
        assert!(Rule::PositiveInt.check("duration", &json!(-5)).is_err());
        assert_eq!(
            Rule::PositiveInt.check("duration", &json!(90)).unwrap(),
            json!(90)
        );
    }

    #[test]
    fn url_needs_a_host() {
        assert!(Rule::Url.check("poster", &json!("https://movies.com/a.jpg")).is_ok());
        assert!(Rule::Url.check("poster", &json!("not a url")).is_err());
        assert!(Rule::Url.check("poster", &json!("/relative/path.jpg")).is_err());
        let err = Rule::Url.check("poster", &json!("mailto:someone")).unwrap_err();
        assert_eq!(err.code, ViolationCode::InvalidString);
    }

    #[test]
    fn rate_accepts_bounds_inclusive() {
        let rule = Rule::NumberRange { min: 0.0, max: 10.0 };
        assert!(rule.check("rate", &json!(0)).is_ok());
        assert!(rule.check("rate", &json!(10)).is_ok());
        assert!(rule.check("rate", &json!(10.1)).is_err());
        assert!(rule.check("rate", &json!(-0.1)).is_err());
    }

    #[test]
    fn enum_list_reports_offending_entries() {
        let rule = Rule::EnumList {
            allowed: vec!["Action", "Drama"],
        };
        let err = rule.check("genre", &json!(["Action", "Western"])).unwrap_err();
        assert_eq!(err.code, ViolationCode::InvalidEnumValue);
        assert!(err.message.contains("Western"));
        assert!(rule.check("genre", &json!(["Drama", "Action"])).is_ok());
    }
}
