//! Statement WHERE clause operations
//!
//! All conditions are joined with AND.

use super::builder::Statement;
use super::types::*;
use crate::session::value::DatabaseValue;

impl Statement {
    /// Add a prepared condition
    pub fn filter(mut self, condition: WhereCondition) -> Self {
        self.where_conditions.push(condition);
        self
    }

    /// Add WHERE condition with equality
    pub fn where_eq<T: Into<DatabaseValue>>(self, column: &str, value: T) -> Self {
        self.filter(WhereCondition::new(column, QueryOperator::Equal, value))
    }

    /// Add WHERE condition with greater than or equal
    pub fn where_gte<T: Into<DatabaseValue>>(self, column: &str, value: T) -> Self {
        self.filter(WhereCondition::new(column, QueryOperator::GreaterThanOrEqual, value))
    }

    /// Add WHERE condition with IN
    pub fn where_in<T: Into<DatabaseValue>>(self, column: &str, values: Vec<T>) -> Self {
        self.filter(WhereCondition::with_values(column, QueryOperator::In, values))
    }

    /// Add WHERE condition with NOT IN
    pub fn where_not_in<T: Into<DatabaseValue>>(self, column: &str, values: Vec<T>) -> Self {
        self.filter(WhereCondition::with_values(column, QueryOperator::NotIn, values))
    }

    /// Add WHERE condition with BETWEEN
    pub fn where_between<T: Into<DatabaseValue>>(self, column: &str, start: T, end: T) -> Self {
        self.filter(WhereCondition::with_values(column, QueryOperator::Between, [start, end]))
    }

    /// Add WHERE condition with IS NULL
    pub fn where_null(self, column: &str) -> Self {
        self.filter(WhereCondition::unary(column, QueryOperator::IsNull))
    }

    /// Add raw WHERE condition for complex cases
    pub fn where_raw(self, raw_condition: &str) -> Self {
        self.filter(WhereCondition::raw(raw_condition))
    }
}
