//! Statement JOIN operations

use super::builder::Statement;
use super::types::*;

impl Statement {
    /// Add INNER JOIN
    pub fn join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join_with(JoinType::Inner, table, left_col, right_col)
    }

    /// Add LEFT JOIN
    pub fn left_join(self, table: &str, left_col: &str, right_col: &str) -> Self {
        self.join_with(JoinType::Left, table, left_col, right_col)
    }

    /// Add a join of the given kind on a single column pair
    pub fn join_with(mut self, join_type: JoinType, table: &str, left_col: &str, right_col: &str) -> Self {
        self.joins.push(JoinClause {
            join_type,
            table: table.to_string(),
            on_conditions: vec![(left_col.to_string(), right_col.to_string())],
        });
        self
    }
}
