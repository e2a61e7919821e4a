//! Statement - Core value type

use super::types::*;

/// Composable query representation.
///
/// Every builder method consumes the statement and returns the updated one,
/// so a statement is never changed behind a shared reference. Clone it to
/// branch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    pub(crate) query_type: QueryType,
    pub(crate) select_fields: Vec<String>,
    pub(crate) from_tables: Vec<String>,
    pub(crate) insert_table: Option<String>,
    pub(crate) delete_table: Option<String>,
    pub(crate) set_clauses: Vec<SetClause>,
    pub(crate) where_conditions: Vec<WhereCondition>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) order_by: Vec<(String, OrderDirection)>,
    pub(crate) limit_count: Option<i64>,
    pub(crate) offset_value: Option<i64>,
}

impl Statement {
    /// Create an empty SELECT statement
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    pub fn select_fields(&self) -> &[String] {
        &self.select_fields
    }

    pub fn from_tables(&self) -> &[String] {
        &self.from_tables
    }

    pub fn where_conditions(&self) -> &[WhereCondition] {
        &self.where_conditions
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn order_clauses(&self) -> &[(String, OrderDirection)] {
        &self.order_by
    }

    pub fn limit_count(&self) -> Option<i64> {
        self.limit_count
    }

    pub fn offset_value(&self) -> Option<i64> {
        self.offset_value
    }
}
