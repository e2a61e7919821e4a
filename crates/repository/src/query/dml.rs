//! Statement DML operations (INSERT, DELETE) used to flush staged records

use super::builder::Statement;
use super::types::*;
use crate::session::value::DatabaseValue;

impl Statement {
    /// Start an INSERT statement
    pub fn insert_into(mut self, table: &str) -> Self {
        self.query_type = QueryType::Insert;
        self.insert_table = Some(table.to_string());
        self
    }

    /// Start a DELETE statement
    pub fn delete_from(mut self, table: &str) -> Self {
        self.query_type = QueryType::Delete;
        self.delete_table = Some(table.to_string());
        self
    }

    /// Set a column value (for INSERT)
    pub fn set<T: Into<DatabaseValue>>(mut self, column: &str, value: T) -> Self {
        let value = value.into();
        self.set_clauses.push(SetClause {
            column: column.to_string(),
            value: (!value.is_null()).then_some(value),
        });
        self
    }

    /// Set a column to NULL (for INSERT)
    pub fn set_null(mut self, column: &str) -> Self {
        self.set_clauses.push(SetClause {
            column: column.to_string(),
            value: None,
        });
        self
    }
}
