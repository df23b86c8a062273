//! Per-field descriptive statistics.
//!
//! Builds on the type inferencer: every field gets count/missing figures, then
//! numeric fields gain min/max/sum/mean/population-stddev and text fields gain
//! a cardinality and mode. Boolean, date and unknown fields intentionally stop
//! at the base figures.

use super::infer::infer_types;
use super::types::{FieldStats, FieldType, NumericStats, Record, StatsDetail, TextStats};
use super::value;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Summarize every field of the collection.
///
/// Never errors. A zero-count numeric field reports NaN mean and stddev rather
/// than panicking on the division, though in practice inference already maps
/// such fields to [`FieldType::Unknown`].
pub fn summarize(records: &[Record]) -> BTreeMap<String, FieldStats> {
    let types = infer_types(records);
    let mut stats = BTreeMap::new();

    for (field, field_type) in types {
        let values: Vec<&Value> = records
            .iter()
            .map(|record| value::field_value(record, &field))
            .filter(|v| !value::is_missing(v))
            .collect();

        let detail = match field_type {
            FieldType::Number => StatsDetail::Numeric(numeric_stats(&values)),
            FieldType::Text => StatsDetail::Text(text_stats(&values)),
            FieldType::Date | FieldType::Boolean | FieldType::Unknown => StatsDetail::None,
        };

        stats.insert(
            field,
            FieldStats {
                field_type,
                count: values.len(),
                missing: records.len() - values.len(),
                detail,
            },
        );
    }

    stats
}

fn numeric_stats(values: &[&Value]) -> NumericStats {
    let numbers: Vec<f64> = values.iter().filter_map(|v| value::as_number(v)).collect();
    let count = numbers.len();

    let sum: f64 = numbers.iter().sum();
    let mean = if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    };

    let std_dev = if count == 0 {
        f64::NAN
    } else {
        let variance =
            numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        variance.sqrt()
    };

    NumericStats {
        min: numbers.iter().copied().fold(f64::INFINITY, f64::min),
        max: numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        sum,
        mean,
        std_dev,
    }
}

fn text_stats(values: &[&Value]) -> TextStats {
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for v in values {
        let text = value::to_text(v);
        let entry = frequencies.entry(text.clone()).or_insert(0);
        if *entry == 0 {
            order.push(text);
        }
        *entry += 1;
    }

    // Ties break to the first value (in record order) to reach the max count.
    let mut most_frequent = None;
    let mut most_frequent_count = 0;
    for text in &order {
        let freq = frequencies[text];
        if freq > most_frequent_count {
            most_frequent = Some(text.clone());
            most_frequent_count = freq;
        }
    }

    TextStats {
        unique_count: order.len(),
        most_frequent,
        most_frequent_count,
    }
}
