use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of tabular data, keyed by field name.
///
/// Values are JSON scalars (`Null`, `Bool`, `Number`, `String`); a missing key
/// and an explicit `null` are treated alike by every derive stage. Insertion
/// order is preserved so records keep the column order of their source file.
pub type Record = serde_json::Map<String, Value>;

/// Inferred semantic type of a field.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Date,
    Boolean,
    Text,
    /// Field exists but carries no non-null values.
    Unknown,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }
}

/// Descriptive statistics for one field.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct FieldStats {
    pub field_type: FieldType,
    /// Non-missing values in the field.
    pub count: usize,
    /// Rows where the field is null or absent.
    pub missing: usize,
    pub detail: StatsDetail,
}

/// Type-specific statistics. Boolean, date and unknown fields only get the
/// base count/missing figures.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub enum StatsDetail {
    None,
    Numeric(NumericStats),
    Text(TextStats),
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct TextStats {
    pub unique_count: usize,
    /// Highest-frequency value. Ties break to the first value in record order
    /// to reach the maximum count.
    pub most_frequent: Option<String>,
    pub most_frequent_count: usize,
}

/// One filter condition.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct FilterClause {
    pub column: String,
    pub operator: FilterOp,
    pub value: Value,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    Equals,
    NotEquals,
    /// Substring match after stringifying both sides.
    Contains,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

/// Single-key sort order. At most one sort key is active at a time.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Group-and-reduce request: group rows by `group_by`, then apply each
/// [`Aggregation`] within every group.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AggregationSpec {
    pub group_by: String,
    pub aggregations: Vec<Aggregation>,
}

/// A (column, reduction) pair. The output field is named `{column}_{function}`.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Aggregation {
    pub column: String,
    pub function: AggregateFn,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFn {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl AggregateFn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
        }
    }
}

impl std::fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
