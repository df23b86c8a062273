//! # DataCollab - Collaborative Data Analysis Library
//!
//! DataCollab is the data layer of a collaborative analysis workspace: users
//! create projects, upload CSV/JSON datasets, derive filtered/aggregated views
//! and chart configurations, and review an activity log.
//!
//! ## Quick Start
//!
//! ```
//! use datacollab::dataset::{self, AggregateFn, Aggregation, AggregationSpec};
//!
//! # fn example() -> anyhow::Result<()> {
//! let records = dataset::parse_json_records(
//!     r#"[{"m":"Jan","v":10},{"m":"Feb","v":20},{"m":"Jan","v":5}]"#,
//! )?;
//!
//! let types = dataset::infer_types(&records);
//! let stats = dataset::summarize(&records);
//! assert_eq!(types.len(), stats.len());
//!
//! let spec = AggregationSpec {
//!     group_by: "m".to_owned(),
//!     aggregations: vec![Aggregation {
//!         column: "v".to_owned(),
//!         function: AggregateFn::Sum,
//!     }],
//! };
//! let totals = dataset::aggregate_records(&records, &spec);
//! assert_eq!(totals.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Core Modules
//!
//! - [`dataset`]: record parsing, type inference, statistics, filter/sort and
//!   aggregation - pure functions over in-memory record collections
//! - [`store`]: project/user/activity persistence behind an injected storage
//!   trait, with ownership checks
//! - [`config`]: application configuration
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing setup with rotating log files
//!
//! ## Design Notes
//!
//! Every derive operation in [`dataset`] is a pure, synchronous function:
//! callers re-invoke on data change, there is no incremental update model.
//! Malformed or incomplete specs degrade gracefully (input returned unchanged)
//! so an in-progress UI configuration never raises.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod store;
