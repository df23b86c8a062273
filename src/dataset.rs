//! Dataset module: parsing, profiling and reshaping uploaded record collections.
//!
//! A dataset is an ordered `Vec<Record>` where each [`Record`] maps field names
//! to JSON scalars. Field types are homogeneous by convention, not enforcement:
//! the [`infer`] pass classifies each field from the values actually present,
//! and a mixed numeric/string column simply degrades to [`FieldType::Text`].
//!
//! ## Pipeline
//!
//! ```text
//! uploaded file ──io──> Vec<Record> ──infer──> field types
//!                            │
//!                            ├──stats────> per-field summaries
//!                            ├──transform> filtered / sorted records
//!                            └──aggregate> grouped summary rows
//! ```
//!
//! The derive stages are independently invokable pure functions; none of them
//! mutates its input and none of them errors on incomplete specs (an empty
//! clause list or a spec without a group key is a passthrough).
//!
//! ## Usage
//!
//! ```
//! use datacollab::dataset::{self, FilterClause, FilterOp, SortDirection, SortSpec};
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let records = dataset::parse_json_records(
//!     r#"[{"name":"a","score":10},{"name":"b","score":3}]"#,
//! )?;
//!
//! let high = dataset::filter_records(
//!     &records,
//!     &[FilterClause {
//!         column: "score".to_owned(),
//!         operator: FilterOp::GreaterThan,
//!         value: json!(5),
//!     }],
//! );
//! assert_eq!(high.len(), 1);
//!
//! let ordered = dataset::sort_records(
//!     &records,
//!     &SortSpec { column: "score".to_owned(), direction: SortDirection::Desc },
//! );
//! assert_eq!(ordered[0]["name"], json!("a"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod aggregate;
pub mod infer;
pub mod io;
pub mod stats;
pub mod transform;
pub mod types;
pub mod value;

pub use aggregate::aggregate_records;
pub use infer::infer_types;
pub use io::{load_records, parse_csv_records, parse_json_records};
pub use stats::summarize;
pub use transform::{filter_records, sort_records};
pub use types::{
    AggregateFn, Aggregation, AggregationSpec, FieldStats, FieldType, FilterClause, FilterOp,
    NumericStats, Record, SortDirection, SortSpec, StatsDetail, TextStats,
};
