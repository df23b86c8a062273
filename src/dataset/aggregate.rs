//! Group-by aggregation into summary rows.

use super::types::{AggregateFn, AggregationSpec, Record};
use super::value;
use serde_json::Value;
use std::collections::HashMap;

/// Group records by the `group_by` field and reduce each requested column.
///
/// Groups appear in first-appearance order; rows missing the group field fall
/// into a null-keyed group. Within a group, null and missing values of the
/// target column are dropped before reduction, and non-numeric leftovers are
/// ignored by the numeric reductions. Empty value sets reduce to 0 for `sum`,
/// null for `avg`/`min`/`max`, and 0 for `count`.
///
/// Output rows carry the group value under the original field name plus one
/// `{column}_{function}` field per aggregation. A spec without a group key or
/// without aggregations returns the input unchanged.
pub fn aggregate_records(records: &[Record], spec: &AggregationSpec) -> Vec<Record> {
    if spec.group_by.is_empty() || spec.aggregations.is_empty() {
        return records.to_vec();
    }

    // First-appearance group order, keyed by the rendered group value.
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Value, Vec<&Record>)> = Vec::new();

    for record in records {
        let group_value = value::field_value(record, &spec.group_by);
        let key = value::to_text(group_value);
        match group_index.get(&key) {
            Some(&i) => groups[i].1.push(record),
            None => {
                group_index.insert(key, groups.len());
                groups.push((group_value.clone(), vec![record]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(group_value, rows)| {
            let mut out = Record::new();
            out.insert(spec.group_by.clone(), group_value);

            for agg in &spec.aggregations {
                let name = format!("{}_{}", agg.column, agg.function);
                out.insert(name, reduce(&rows, &agg.column, agg.function));
            }
            out
        })
        .collect()
}

fn reduce(rows: &[&Record], column: &str, function: AggregateFn) -> Value {
    let present: Vec<&Value> = rows
        .iter()
        .map(|record| value::field_value(record, column))
        .filter(|v| !value::is_missing(v))
        .collect();

    if function == AggregateFn::Count {
        return Value::from(present.len());
    }

    let numbers: Vec<f64> = present.iter().filter_map(|v| value::as_number(v)).collect();

    match function {
        AggregateFn::Sum => number(numbers.iter().sum()),
        AggregateFn::Avg => {
            if numbers.is_empty() {
                Value::Null
            } else {
                number(numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
        }
        AggregateFn::Min => numbers
            .iter()
            .copied()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
            .map_or(Value::Null, number),
        AggregateFn::Max => numbers
            .iter()
            .copied()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            .map_or(Value::Null, number),
        AggregateFn::Count => unreachable!("count handled above"),
    }
}

/// Render a float back as an integer when it is one, keeping sums of integer
/// columns integral in the output.
fn number(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < (1i64 << 53) as f64 {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
    }
}
