//! Session collaborator
//!
//! A session executes rendered statements and stages entity changes for its
//! unit of work. Connection handling, transactions and retries belong to the
//! session implementation, never to the repository.

pub mod postgres;
pub mod value;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::ModelResult;
use crate::model::Model;

pub use postgres::PgSession;
pub use value::{DatabaseRow, DatabaseValue, Row};

/// Statement execution and unit-of-work staging
#[async_trait]
pub trait Session: Send {
    /// Execute a query and return every result row
    async fn fetch_all(
        &mut self,
        sql: &str,
        params: &[DatabaseValue],
    ) -> ModelResult<Vec<Box<dyn DatabaseRow>>>;

    /// Execute a query and return the first result row
    async fn fetch_optional(
        &mut self,
        sql: &str,
        params: &[DatabaseValue],
    ) -> ModelResult<Option<Box<dyn DatabaseRow>>>;

    /// Stage a record for insertion
    fn add(&mut self, record: StagedRecord);

    /// Stage several records for insertion
    fn add_all(&mut self, records: Vec<StagedRecord>) {
        for record in records {
            self.add(record);
        }
    }

    /// Stage a record for deletion
    fn delete(&mut self, record: StagedRecord);
}

/// Snapshot of an entity handed to the session's unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRecord {
    pub table: &'static str,
    pub primary_key_name: &'static str,
    pub primary_key: Option<DatabaseValue>,
    pub fields: HashMap<String, DatabaseValue>,
}

impl StagedRecord {
    /// Capture the table metadata and field values of a model instance
    pub fn from_model<M: Model>(model: &M) -> Self {
        Self {
            table: M::table_name(),
            primary_key_name: M::primary_key_name(),
            primary_key: model.primary_key().map(Into::into),
            fields: model.to_fields(),
        }
    }
}
