//! Field type inference.
//!
//! Classification samples every non-null value of a field and takes the first
//! predicate that holds for all of them, in the fixed order number, date,
//! boolean, text. A field with no non-null values at all is `Unknown`. There
//! are no error conditions: a malformed timestamp simply fails the date
//! predicate and the column falls through to text.

use super::types::{FieldType, Record};
use super::value;
use serde_json::Value;
use std::collections::BTreeMap;

/// Infer a [`FieldType`] for every field of the first record.
///
/// Fields that later records introduce are ignored, mirroring the upload flow
/// where the header row fixes the schema. An empty collection yields an empty
/// mapping, not an error.
pub fn infer_types(records: &[Record]) -> BTreeMap<String, FieldType> {
    let mut types = BTreeMap::new();

    let Some(first) = records.first() else {
        return types;
    };

    for field in first.keys() {
        let values: Vec<&Value> = records
            .iter()
            .map(|record| value::field_value(record, field))
            .filter(|v| !value::is_missing(v))
            .collect();

        types.insert(field.clone(), classify(&values));
    }

    types
}

fn classify(values: &[&Value]) -> FieldType {
    if values.is_empty() {
        FieldType::Unknown
    } else if values.iter().all(|v| v.is_number()) {
        FieldType::Number
    } else if values.iter().all(|v| value::parses_as_date(v)) {
        FieldType::Date
    } else if values.iter().all(|v| v.is_boolean()) {
        FieldType::Boolean
    } else {
        FieldType::Text
    }
}
