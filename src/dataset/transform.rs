//! Filter and sort over record collections, composable independently.

use super::types::{FilterClause, FilterOp, Record, SortDirection, SortSpec};
use super::value;
use std::cmp::Ordering;

/// Keep the records that satisfy every clause (logical AND; there is no OR or
/// grouping). An empty clause list returns the input unchanged.
///
/// Relational operators use strict same-type comparison, so a clause that
/// compares a numeric field against a string value matches nothing. `contains`
/// stringifies both sides before the substring test. Missing fields
/// participate as null: they fail every clause except `notEquals`.
pub fn filter_records(records: &[Record], clauses: &[FilterClause]) -> Vec<Record> {
    if clauses.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| clauses.iter().all(|clause| matches_clause(record, clause)))
        .cloned()
        .collect()
}

fn matches_clause(record: &Record, clause: &FilterClause) -> bool {
    let field = value::field_value(record, &clause.column);

    match clause.operator {
        FilterOp::Equals => value::equal(field, &clause.value),
        FilterOp::NotEquals => !value::equal(field, &clause.value),
        FilterOp::Contains => value::to_text(field).contains(&value::to_text(&clause.value)),
        FilterOp::GreaterThan => {
            value::compare(field, &clause.value) == Some(Ordering::Greater)
        }
        FilterOp::LessThan => value::compare(field, &clause.value) == Some(Ordering::Less),
        FilterOp::GreaterThanOrEqual => matches!(
            value::compare(field, &clause.value),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::LessThanOrEqual => matches!(
            value::compare(field, &clause.value),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

/// Stable single-key sort.
///
/// Null and missing values sort after all defined values in either direction.
/// Defined values of mismatched types compare equal, so the stable sort keeps
/// their original relative order. An empty column name is a passthrough.
pub fn sort_records(records: &[Record], spec: &SortSpec) -> Vec<Record> {
    if spec.column.is_empty() {
        return records.to_vec();
    }

    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let av = value::field_value(a, &spec.column);
        let bv = value::field_value(b, &spec.column);

        let ordering = match (value::is_missing(av), value::is_missing(bv)) {
            (true, true) => return Ordering::Equal, // missing pairs ignore direction
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => value::compare(av, bv).unwrap_or(Ordering::Equal),
        };

        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_json_records;
    use serde_json::json;

    fn records(json: &str) -> Vec<Record> {
        parse_json_records(json).unwrap()
    }

    fn clause(column: &str, operator: FilterOp, value: serde_json::Value) -> FilterClause {
        FilterClause {
            column: column.to_owned(),
            operator,
            value,
        }
    }

    fn sample() -> Vec<Record> {
        records(r#"[{"m":"Jan","v":10},{"m":"Feb","v":20},{"m":"Jan","v":5}]"#)
    }

    #[test]
    fn test_greater_than_preserves_input_order() {
        let out = filter_records(&sample(), &[clause("v", FilterOp::GreaterThan, json!(8))]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["v"], json!(10));
        assert_eq!(out[1]["v"], json!(20));
    }

    #[test]
    fn test_clauses_are_anded() {
        let out = filter_records(
            &sample(),
            &[
                clause("m", FilterOp::Equals, json!("Jan")),
                clause("v", FilterOp::GreaterThan, json!(8)),
            ],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["v"], json!(10));
    }

    #[test]
    fn test_adding_a_clause_is_monotonic() {
        let base = vec![clause("v", FilterOp::GreaterThanOrEqual, json!(5))];
        let mut narrowed = base.clone();
        narrowed.push(clause("m", FilterOp::Contains, json!("J")));

        let with_base = filter_records(&sample(), &base);
        let with_extra = filter_records(&sample(), &narrowed);
        assert!(with_extra.len() <= with_base.len());
    }

    #[test]
    fn test_mismatched_types_never_match_relational_ops() {
        let out = filter_records(&sample(), &[clause("v", FilterOp::GreaterThan, json!("8"))]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_contains_stringifies_both_sides() {
        let out = filter_records(&sample(), &[clause("v", FilterOp::Contains, json!(0))]);
        // "10" and "20" contain "0".
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_missing_field_passes_not_equals_only() {
        let data = records(r#"[{"a": 1}]"#);
        assert!(filter_records(&data, &[clause("b", FilterOp::Equals, json!(1))]).is_empty());
        assert_eq!(
            filter_records(&data, &[clause("b", FilterOp::NotEquals, json!(1))]).len(),
            1
        );
    }

    #[test]
    fn test_empty_clause_list_is_passthrough() {
        assert_eq!(filter_records(&sample(), &[]).len(), 3);
    }

    #[test]
    fn test_sort_asc_desc_reverse_each_other() {
        let spec_asc = SortSpec {
            column: "v".to_owned(),
            direction: SortDirection::Asc,
        };
        let spec_desc = SortSpec {
            column: "v".to_owned(),
            direction: SortDirection::Desc,
        };

        let asc = sort_records(&sample(), &spec_asc);
        let desc = sort_records(&sample(), &spec_desc);

        let asc_values: Vec<_> = asc.iter().map(|r| r["v"].clone()).collect();
        let mut desc_values: Vec<_> = desc.iter().map(|r| r["v"].clone()).collect();
        desc_values.reverse();
        assert_eq!(asc_values, desc_values);
        assert_eq!(asc_values, vec![json!(5), json!(10), json!(20)]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let data = records(r#"[{"k":"a","i":1},{"k":"a","i":2},{"k":"a","i":3}]"#);
        let sorted = sort_records(
            &data,
            &SortSpec {
                column: "k".to_owned(),
                direction: SortDirection::Desc,
            },
        );
        let order: Vec<_> = sorted.iter().map(|r| r["i"].clone()).collect();
        assert_eq!(order, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_nulls_sort_last() {
        let data = records(r#"[{"v": null},{"v": 2},{"v": 1}]"#);
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort_records(
                &data,
                &SortSpec {
                    column: "v".to_owned(),
                    direction,
                },
            );
            assert!(sorted[2]["v"].is_null());
        }
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let data = sample();
        let _ = sort_records(
            &data,
            &SortSpec {
                column: "v".to_owned(),
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(data[0]["v"], json!(10));
    }
}
