//! Database values and rows
//!
//! `DatabaseValue` is the typed scalar used for statement parameters and row
//! cells. `DatabaseRow` abstracts over the rows a session hands back.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{ModelError, ModelResult};

/// Database value enumeration for type-safe parameter binding
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseValue {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
    DateTime(DateTime<Utc>),
    NaiveDateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Json(JsonValue),
    Array(Vec<DatabaseValue>),
}

impl DatabaseValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, DatabaseValue::Null)
    }

    /// Values that mean "no criterion": null, empty text, zero, false and
    /// empty collections.
    pub fn is_falsy(&self) -> bool {
        match self {
            DatabaseValue::Null => true,
            DatabaseValue::Bool(b) => !b,
            DatabaseValue::Int32(i) => *i == 0,
            DatabaseValue::Int64(i) => *i == 0,
            DatabaseValue::Float32(f) => *f == 0.0,
            DatabaseValue::Float64(f) => *f == 0.0,
            DatabaseValue::String(s) => s.is_empty(),
            DatabaseValue::Bytes(b) => b.is_empty(),
            DatabaseValue::Array(values) => values.is_empty(),
            DatabaseValue::Json(json) => match json {
                JsonValue::Null => true,
                JsonValue::Array(values) => values.is_empty(),
                JsonValue::Object(map) => map.is_empty(),
                _ => false,
            },
            DatabaseValue::Uuid(_)
            | DatabaseValue::DateTime(_)
            | DatabaseValue::NaiveDateTime(_)
            | DatabaseValue::Date(_)
            | DatabaseValue::Time(_) => false,
        }
    }

    /// Integer view of the value, used for aggregate results
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DatabaseValue::Int32(i) => Some(i64::from(*i)),
            DatabaseValue::Int64(i) => Some(*i),
            DatabaseValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            DatabaseValue::Null => JsonValue::Null,
            DatabaseValue::Bool(b) => JsonValue::Bool(*b),
            DatabaseValue::Int32(i) => JsonValue::from(*i),
            DatabaseValue::Int64(i) => JsonValue::from(*i),
            DatabaseValue::Float32(f) => serde_json::Number::from_f64(f64::from(*f))
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            DatabaseValue::Float64(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            DatabaseValue::String(s) => JsonValue::String(s.clone()),
            DatabaseValue::Bytes(b) => JsonValue::Array(b.iter().map(|&x| JsonValue::from(x)).collect()),
            DatabaseValue::Uuid(u) => JsonValue::String(u.to_string()),
            DatabaseValue::DateTime(dt) => JsonValue::String(dt.to_rfc3339()),
            DatabaseValue::NaiveDateTime(dt) => {
                JsonValue::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            DatabaseValue::Date(d) => JsonValue::String(d.to_string()),
            DatabaseValue::Time(t) => JsonValue::String(t.to_string()),
            DatabaseValue::Json(j) => j.clone(),
            DatabaseValue::Array(arr) => JsonValue::Array(arr.iter().map(|v| v.to_json()).collect()),
        }
    }
}

impl Serialize for DatabaseValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for DatabaseValue {
    fn from(value: bool) -> Self {
        DatabaseValue::Bool(value)
    }
}

impl From<i32> for DatabaseValue {
    fn from(value: i32) -> Self {
        DatabaseValue::Int32(value)
    }
}

impl From<i64> for DatabaseValue {
    fn from(value: i64) -> Self {
        DatabaseValue::Int64(value)
    }
}

impl From<f32> for DatabaseValue {
    fn from(value: f32) -> Self {
        DatabaseValue::Float32(value)
    }
}

impl From<f64> for DatabaseValue {
    fn from(value: f64) -> Self {
        DatabaseValue::Float64(value)
    }
}

impl From<String> for DatabaseValue {
    fn from(value: String) -> Self {
        DatabaseValue::String(value)
    }
}

impl From<&str> for DatabaseValue {
    fn from(value: &str) -> Self {
        DatabaseValue::String(value.to_string())
    }
}

impl From<Vec<u8>> for DatabaseValue {
    fn from(value: Vec<u8>) -> Self {
        DatabaseValue::Bytes(value)
    }
}

impl From<uuid::Uuid> for DatabaseValue {
    fn from(value: uuid::Uuid) -> Self {
        DatabaseValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for DatabaseValue {
    fn from(value: DateTime<Utc>) -> Self {
        DatabaseValue::DateTime(value)
    }
}

impl From<NaiveDateTime> for DatabaseValue {
    fn from(value: NaiveDateTime) -> Self {
        DatabaseValue::NaiveDateTime(value)
    }
}

impl From<NaiveDate> for DatabaseValue {
    fn from(value: NaiveDate) -> Self {
        DatabaseValue::Date(value)
    }
}

impl From<NaiveTime> for DatabaseValue {
    fn from(value: NaiveTime) -> Self {
        DatabaseValue::Time(value)
    }
}

impl From<JsonValue> for DatabaseValue {
    fn from(value: JsonValue) -> Self {
        DatabaseValue::Json(value)
    }
}

impl<T> From<Option<T>> for DatabaseValue
where
    T: Into<DatabaseValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DatabaseValue::Null,
        }
    }
}

/// Abstract database row trait
pub trait DatabaseRow: Send + Sync {
    /// Get a column value by index
    fn get_by_index(&self, index: usize) -> ModelResult<DatabaseValue>;

    /// Get column names in select order
    fn column_names(&self) -> Vec<String>;

    /// Get a column value by name
    fn get_by_name(&self, name: &str) -> ModelResult<DatabaseValue> {
        let index = self
            .column_names()
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ModelError::Query(format!("Column '{}' not found", name)))?;
        self.get_by_index(index)
    }

    /// Get column count
    fn column_count(&self) -> usize {
        self.column_names().len()
    }

    /// Convert row to JSON object keyed by column name
    fn to_json(&self) -> ModelResult<JsonValue> {
        let mut map = serde_json::Map::new();
        for (i, column) in self.column_names().into_iter().enumerate() {
            map.insert(column, self.get_by_index(i)?.to_json());
        }
        Ok(JsonValue::Object(map))
    }

    /// Convert row to HashMap keyed by column name
    fn to_map(&self) -> ModelResult<HashMap<String, DatabaseValue>> {
        let mut map = HashMap::new();
        for (i, column) in self.column_names().into_iter().enumerate() {
            map.insert(column, self.get_by_index(i)?);
        }
        Ok(map)
    }
}

/// Materialized row: shared column names plus one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<DatabaseValue>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<DatabaseValue>) -> Self {
        Self { columns, values }
    }

    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DatabaseValue>,
    {
        let (columns, values): (Vec<String>, Vec<DatabaseValue>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(columns.into(), values)
    }

    /// Copy every cell out of a session row
    pub fn from_database_row(row: &dyn DatabaseRow) -> ModelResult<Self> {
        let columns = row.column_names();
        let values = (0..columns.len())
            .map(|i| row.get_by_index(i))
            .collect::<ModelResult<Vec<_>>>()?;
        Ok(Self::new(columns.into(), values))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[DatabaseValue] {
        &self.values
    }

    /// Pair every value with its column name
    pub fn into_mapping(self) -> HashMap<String, DatabaseValue> {
        self.columns.iter().cloned().zip(self.values).collect()
    }
}

impl DatabaseRow for Row {
    fn get_by_index(&self, index: usize) -> ModelResult<DatabaseValue> {
        self.values
            .get(index)
            .cloned()
            .ok_or_else(|| ModelError::Query(format!("Column index {} out of range", index)))
    }

    fn column_names(&self) -> Vec<String> {
        self.columns.to_vec()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        assert!(DatabaseValue::Null.is_falsy());
        assert!(DatabaseValue::from("").is_falsy());
        assert!(DatabaseValue::from(0).is_falsy());
        assert!(DatabaseValue::from(0.0f64).is_falsy());
        assert!(DatabaseValue::from(false).is_falsy());
        assert!(DatabaseValue::Array(vec![]).is_falsy());
        assert!(DatabaseValue::from(None::<String>).is_falsy());

        assert!(!DatabaseValue::from("active").is_falsy());
        assert!(!DatabaseValue::from(7i64).is_falsy());
        assert!(!DatabaseValue::from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).is_falsy());
    }

    #[test]
    fn test_json_round_trip_of_row() {
        let row = Row::from_pairs([("id", DatabaseValue::from(1)), ("name", DatabaseValue::from("Ann"))]);

        assert_eq!(row.to_json().unwrap(), json!({ "id": 1, "name": "Ann" }));
        assert_eq!(row.get_by_name("name").unwrap(), DatabaseValue::from("Ann"));
        assert!(row.get_by_name("missing").is_err());
    }

    #[test]
    fn test_into_mapping_keys_by_column() {
        let row = Row::from_pairs([("id", 3), ("total", 12)]);
        let mapping = row.into_mapping();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["total"], DatabaseValue::Int32(12));
    }
}
