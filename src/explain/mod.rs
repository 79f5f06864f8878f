//! Execution plans as produced by MySQL's `EXPLAIN FORMAT=json`.
//!
//! Only single-table plans are modelled. Fields the plan carries but that are
//! not part of these structs are ignored. Fields missing from the plan or set
//! to `null` keep their default value. A join plan nests its tables under
//! `nested_loop`, so it parses with an empty [TableInfo].
pub mod advisor;
pub mod report;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::Error;

/// Cost estimates of a query block or table access.
///
/// MySQL emits the costs as decimal strings; they are kept as such so a plan
/// re-serialises without losing precision.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub query_cost: String,
    #[serde(deserialize_with = "null_as_default")]
    pub read_cost: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eval_cost: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prefix_cost: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_read_per_join: String,
}

/// Access of the single table read by a query block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub table_name: String,

    /// Raw access type code, see [advisor::AccessType].
    #[serde(deserialize_with = "null_as_default")]
    pub access_type: String,

    #[serde(deserialize_with = "null_as_default")]
    pub rows_examined_per_scan: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rows_produced_per_join: i64,

    /// Percentage of rows left after the table condition, e.g. `"100.00"`.
    #[serde(deserialize_with = "null_as_default")]
    pub filtered: String,

    #[serde(deserialize_with = "null_as_default")]
    pub cost_info: CostInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub used_columns: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub select_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cost_info: CostInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub table: TableInfo,
}

/// Root of an `EXPLAIN FORMAT=json` document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainResult {
    #[serde(deserialize_with = "null_as_default")]
    pub query_block: QueryBlock,
}

impl ExplainResult {
    pub fn table(&self) -> &TableInfo {
        &self.query_block.table
    }
}

/// Deserialize a field, reading `null` as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a plan document returned by `EXPLAIN FORMAT=json`.
pub fn parse_explain_json(explain_json: &str) -> Result<ExplainResult, Error> {
    serde_json::from_str(explain_json).map_err(Error::PlanParse)
}
