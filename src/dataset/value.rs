//! Scalar comparison and coercion rules shared by the derive stages.
//!
//! Records are dynamically typed, so every ordering question lands here. The
//! policy is strict same-type comparison: numbers against numbers, strings
//! against strings, booleans against booleans (false < true). A comparison
//! across types, or against null/missing, has no ordering, which makes
//! relational filter clauses on mismatched types evaluate to false instead of
//! inheriting host-language coercion quirks.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::cmp::Ordering;

/// True when the value is `null`. Absent fields are looked up as `None` by
/// callers and funneled through [`field_value`].
pub fn is_missing(value: &Value) -> bool {
    value.is_null()
}

/// Field lookup that folds "key absent" into `Value::Null`.
pub fn field_value<'a>(record: &'a super::Record, column: &str) -> &'a Value {
    record.get(column).unwrap_or(&Value::Null)
}

/// Numeric view of a value. Only JSON numbers qualify; numeric-looking strings
/// stay text, matching the type inferencer's graceful-degrade rule.
pub fn as_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Strict same-type ordering. `None` means the pair is unordered.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Same-type equality. Numbers compare numerically so `10` equals `10.0`
/// regardless of the underlying integer/float representation.
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Number(_), Value::Number(_)) => compare(a, b) == Some(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        _ => false,
    }
}

/// Display form used by `contains` filtering and group keys. Null renders as
/// an empty string; strings render without quotes.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Calendar-date predicate for type inference. Accepts the formats the
/// application actually produces: RFC 3339, ISO dates with `-` or `/`
/// separators, US-style `MM/DD/YYYY`, and a space-separated datetime.
pub fn parses_as_date(value: &Value) -> bool {
    let Value::String(s) = value else {
        return false;
    };
    let s = s.trim();
    if s.is_empty() {
        return false;
    }

    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(s, "%Y/%m/%d").is_ok()
        || NaiveDate::parse_from_str(s, "%m/%d/%Y").is_ok()
}
