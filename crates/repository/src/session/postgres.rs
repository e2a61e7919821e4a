//! PostgreSQL session backed by a sqlx pool
//!
//! Reads go straight to the pool. Staged inserts and deletes are queued in
//! order and written in a single transaction by [`PgSession::flush`].

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row as SqlxRow, TypeInfo};

use super::value::{DatabaseRow, DatabaseValue};
use super::{Session, StagedRecord};
use crate::error::{ModelError, ModelResult};
use crate::query::Statement;

/// A staged unit-of-work change
#[derive(Debug, Clone, PartialEq)]
pub enum PendingChange {
    Insert(StagedRecord),
    Delete(StagedRecord),
}

impl PendingChange {
    /// Statement that applies this change
    pub fn to_statement(&self) -> ModelResult<Statement> {
        match self {
            PendingChange::Insert(record) => {
                let mut columns: Vec<&String> = record
                    .fields
                    .keys()
                    .filter(|column| {
                        // Leave generated keys to the database
                        record.primary_key.is_some() || column.as_str() != record.primary_key_name
                    })
                    .collect();
                columns.sort();

                Ok(columns.into_iter().fold(
                    Statement::new().insert_into(record.table),
                    |statement, column| statement.set(column, record.fields[column].clone()),
                ))
            }
            PendingChange::Delete(record) => {
                let key = record
                    .primary_key
                    .clone()
                    .filter(|key| !key.is_null())
                    .ok_or_else(|| {
                        ModelError::Query(format!(
                            "Cannot delete from {} without a primary key value",
                            record.table
                        ))
                    })?;

                Ok(Statement::new()
                    .delete_from(record.table)
                    .where_eq(record.primary_key_name, key))
            }
        }
    }
}

/// Session over a PostgreSQL pool
pub struct PgSession {
    pool: PgPool,
    pending: Vec<PendingChange>,
}

impl PgSession {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            pending: Vec::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Changes staged since the last flush
    pub fn pending(&self) -> &[PendingChange] {
        &self.pending
    }

    /// Drop staged changes without writing them
    pub fn discard(&mut self) {
        self.pending.clear();
    }

    /// Write every staged change in one transaction, returning the number of
    /// affected rows. Nothing is written if any statement fails.
    pub async fn flush(&mut self) -> ModelResult<u64> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let statements = self
            .pending
            .iter()
            .map(PendingChange::to_statement)
            .collect::<ModelResult<Vec<_>>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ModelError::Database(format!("Failed to begin transaction: {}", e)))?;

        let mut affected = 0;
        for statement in &statements {
            let (sql, params) = statement.to_sql_with_params();
            tracing::debug!(target: "elif_repository", "Flushing: {}", sql);

            let result = bind_all(sqlx::query(&sql), &params)?
                .execute(&mut *tx)
                .await
                .map_err(|e| ModelError::Database(format!("Query execution failed: {}", e)))?;
            affected += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| ModelError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            target: "elif_repository",
            "Flushed {} staged changes ({} rows)",
            self.pending.len(),
            affected
        );
        self.pending.clear();
        Ok(affected)
    }
}

#[async_trait]
impl Session for PgSession {
    async fn fetch_all(
        &mut self,
        sql: &str,
        params: &[DatabaseValue],
    ) -> ModelResult<Vec<Box<dyn DatabaseRow>>> {
        let rows = bind_all(sqlx::query(sql), params)?
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ModelError::Database(format!("Query fetch failed: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| Box::new(PostgresRow::new(row)) as Box<dyn DatabaseRow>)
            .collect())
    }

    async fn fetch_optional(
        &mut self,
        sql: &str,
        params: &[DatabaseValue],
    ) -> ModelResult<Option<Box<dyn DatabaseRow>>> {
        let row = bind_all(sqlx::query(sql), params)?
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ModelError::Database(format!("Query fetch failed: {}", e)))?;

        Ok(row.map(|r| Box::new(PostgresRow::new(r)) as Box<dyn DatabaseRow>))
    }

    fn add(&mut self, record: StagedRecord) {
        self.pending.push(PendingChange::Insert(record));
    }

    fn delete(&mut self, record: StagedRecord) {
        self.pending.push(PendingChange::Delete(record));
    }
}

/// PostgreSQL row
pub struct PostgresRow {
    row: PgRow,
}

impl PostgresRow {
    pub fn new(row: PgRow) -> Self {
        Self { row }
    }
}

impl DatabaseRow for PostgresRow {
    fn get_by_index(&self, index: usize) -> ModelResult<DatabaseValue> {
        postgres_value_to_database_value(&self.row, index)
    }

    fn column_names(&self) -> Vec<String> {
        self.row.columns().iter().map(|c| c.name().to_string()).collect()
    }

    fn column_count(&self) -> usize {
        self.row.len()
    }
}

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

fn bind_all<'q>(query: PgQuery<'q>, params: &[DatabaseValue]) -> ModelResult<PgQuery<'q>> {
    params.iter().try_fold(query, bind_database_value)
}

/// Bind a DatabaseValue to a sqlx query
fn bind_database_value<'q>(query: PgQuery<'q>, value: &DatabaseValue) -> ModelResult<PgQuery<'q>> {
    match value {
        DatabaseValue::Null => Ok(query.bind(Option::<String>::None)),
        DatabaseValue::Bool(b) => Ok(query.bind(*b)),
        DatabaseValue::Int32(i) => Ok(query.bind(*i)),
        DatabaseValue::Int64(i) => Ok(query.bind(*i)),
        DatabaseValue::Float32(f) => Ok(query.bind(*f)),
        DatabaseValue::Float64(f) => Ok(query.bind(*f)),
        DatabaseValue::String(s) => Ok(query.bind(s.clone())),
        DatabaseValue::Bytes(b) => Ok(query.bind(b.clone())),
        DatabaseValue::Uuid(u) => Ok(query.bind(*u)),
        DatabaseValue::DateTime(dt) => Ok(query.bind(*dt)),
        DatabaseValue::NaiveDateTime(dt) => Ok(query.bind(*dt)),
        DatabaseValue::Date(d) => Ok(query.bind(*d)),
        DatabaseValue::Time(t) => Ok(query.bind(*t)),
        DatabaseValue::Json(j) => Ok(query.bind(j.clone())),
        DatabaseValue::Array(_) => Err(ModelError::Query(
            "Array parameters are not supported; use an IN filter instead".to_string(),
        )),
    }
}

fn decode<'r, T>(row: &'r PgRow, index: usize) -> ModelResult<Option<T>>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get::<Option<T>, _>(index)
        .map_err(|e| ModelError::Query(format!("Failed to decode column {}: {}", index, e)))
}

/// Convert a PostgreSQL column value to DatabaseValue
fn postgres_value_to_database_value(row: &PgRow, index: usize) -> ModelResult<DatabaseValue> {
    let column = row
        .columns()
        .get(index)
        .ok_or_else(|| ModelError::Query(format!("Column index {} out of range", index)))?;
    let type_name = column.type_info().name();

    let value = match type_name {
        "BOOL" => decode::<bool>(row, index)?.map(DatabaseValue::Bool),
        "INT2" => decode::<i16>(row, index)?.map(|v| DatabaseValue::Int32(i32::from(v))),
        "INT4" => decode::<i32>(row, index)?.map(DatabaseValue::Int32),
        "INT8" => decode::<i64>(row, index)?.map(DatabaseValue::Int64),
        "FLOAT4" => decode::<f32>(row, index)?.map(DatabaseValue::Float32),
        "FLOAT8" => decode::<f64>(row, index)?.map(DatabaseValue::Float64),
        "BYTEA" => decode::<Vec<u8>>(row, index)?.map(DatabaseValue::Bytes),
        "UUID" => decode::<uuid::Uuid>(row, index)?.map(DatabaseValue::Uuid),
        "TIMESTAMPTZ" => {
            decode::<chrono::DateTime<chrono::Utc>>(row, index)?.map(DatabaseValue::DateTime)
        }
        "TIMESTAMP" => decode::<chrono::NaiveDateTime>(row, index)?.map(DatabaseValue::NaiveDateTime),
        "DATE" => decode::<chrono::NaiveDate>(row, index)?.map(DatabaseValue::Date),
        "TIME" => decode::<chrono::NaiveTime>(row, index)?.map(DatabaseValue::Time),
        "JSON" | "JSONB" => decode::<JsonValue>(row, index)?.map(DatabaseValue::Json),
        _ => decode::<String>(row, index)?.map(DatabaseValue::String),
    };

    Ok(value.unwrap_or(DatabaseValue::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::test_models::User;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::HashMap;

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Event {
        id: i32,
        day: NaiveDate,
        at: NaiveDateTime,
        code: String,
    }

    impl Model for Event {
        type PrimaryKey = i32;

        fn table_name() -> &'static str {
            "events"
        }

        fn field_names() -> &'static [&'static str] {
            &["id", "day", "at", "code"]
        }

        fn primary_key(&self) -> Option<Self::PrimaryKey> {
            Some(self.id)
        }

        fn to_fields(&self) -> HashMap<String, DatabaseValue> {
            HashMap::from([
                ("id".to_string(), DatabaseValue::from(self.id)),
                ("day".to_string(), DatabaseValue::from(self.day)),
                ("at".to_string(), DatabaseValue::from(self.at)),
                ("code".to_string(), DatabaseValue::from(self.code.clone())),
            ])
        }
    }

    #[test]
    fn test_staged_dates_and_text_keep_their_types() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let event = Event {
            id: 1,
            day,
            at: day.and_hms_opt(8, 0, 0).unwrap(),
            code: "550e8400-e29b-41d4-a716-446655440000".to_string(),
        };

        let statement = PendingChange::Insert(StagedRecord::from_model(&event))
            .to_statement()
            .unwrap();
        let (sql, params) = statement.to_sql_with_params();

        assert_eq!(sql, "INSERT INTO events (at, code, day, id) VALUES ($1, $2, $3, $4)");
        assert!(matches!(params[0], DatabaseValue::NaiveDateTime(_)));
        assert!(matches!(params[1], DatabaseValue::String(_)));
        assert!(matches!(params[2], DatabaseValue::Date(_)));
        assert_eq!(params[3], DatabaseValue::Int32(1));
    }

    #[test]
    fn test_insert_statement_uses_sorted_columns() {
        let record = StagedRecord::from_model(&User::sample(7, "ann@example.com"));
        let statement = PendingChange::Insert(record).to_statement().unwrap();
        let (sql, params) = statement.to_sql_with_params();

        assert_eq!(
            sql,
            "INSERT INTO users (age, created_at, email, id, status) VALUES ($1, $2, $3, $4, $5)"
        );
        assert_eq!(params.len(), 5);
        assert_eq!(params[3], DatabaseValue::Int32(7));
    }

    #[test]
    fn test_insert_without_key_leaves_it_to_the_database() {
        let mut record = StagedRecord::from_model(&User::sample(7, "ann@example.com"));
        record.primary_key = None;

        let sql = PendingChange::Insert(record).to_statement().unwrap().to_sql();
        assert!(sql.starts_with("INSERT INTO users (age, created_at, email, status)"));
    }

    #[test]
    fn test_delete_by_primary_key() {
        let record = StagedRecord::from_model(&User::sample(7, "ann@example.com"));
        let statement = PendingChange::Delete(record).to_statement().unwrap();

        assert_eq!(statement.to_sql(), "DELETE FROM users WHERE id = 7");
    }

    #[test]
    fn test_delete_requires_primary_key() {
        let mut record = StagedRecord::from_model(&User::sample(7, "ann@example.com"));
        record.primary_key = None;

        let err = PendingChange::Delete(record).to_statement().unwrap_err();
        assert!(matches!(err, ModelError::Query(_)));
    }
}
