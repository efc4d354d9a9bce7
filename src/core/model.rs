// SocialGaze - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::collections::HashMap;

use crate::util::constants;

// =============================================================================
// Field value
// =============================================================================

/// A single typed field value produced by the loader.
///
/// Boolean-like columns (`"True"` / `"False"`) are kept as `Text`; there is
/// no boolean variant, so comparisons always match the literal string.
/// Equality is exact: `Number(1.0)` never equals `Text("1")`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

// =============================================================================
// Record (one row of the dataset)
// =============================================================================

/// One row of the dataset: a mapping from column name to value.
///
/// Absent fields (missing column, empty cell, short row) are simply not
/// present in the map and never match any predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used heavily by tests and fixtures.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Value of `key`, or `None` when the field is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Number of present (non-absent) fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Account username. A numeric username is rendered as text.
    pub fn username(&self) -> Option<String> {
        self.get(constants::FIELD_USERNAME).map(|v| v.to_string())
    }

    /// Follower count as loaded. Usually a number, but non-numeric text
    /// such as `"n/a"` is passed through unchanged.
    pub fn follower_count(&self) -> Option<&Value> {
        self.get(constants::FIELD_FOLLOWER_COUNT)
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The full ordered sequence of records for one load cycle.
///
/// Read-only once built; aggregation borrows it immutably.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// A dataset without a declared header, e.g. assembled in memory.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            columns: Vec::new(),
            records,
        }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Aggregate results (handed to the renderer)
// =============================================================================

/// One named bar/slice of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub name: String,
    /// Signed because derived values (complements) may go negative.
    pub value: i64,
}

/// Ordered sequence of named values. Order is caller-specified and drives
/// slice order and colour assignment in the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, name: impl Into<String>, value: i64) {
        self.points.push(SeriesPoint {
            name: name.into(),
            value,
        });
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of all values. Not necessarily the dataset size: categories may
    /// overlap or leave records uncovered.
    pub fn total(&self) -> i64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Value of the first point called `name`.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.points.iter().find(|p| p.name == name).map(|p| p.value)
    }
}

/// Payload of an aggregate: a scalar count or a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateValue {
    Scalar(i64),
    Series(Series),
}

/// A named aggregate value, computed fresh from a dataset and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub name: String,
    pub value: AggregateValue,
}

impl AggregateResult {
    pub fn scalar(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: AggregateValue::Scalar(value),
        }
    }

    pub fn series(name: impl Into<String>, series: Series) -> Self {
        Self {
            name: name.into(),
            value: AggregateValue::Series(series),
        }
    }
}
