//! `LIMIT :limit OFFSET :offset`

use super::StatementFilter;
use crate::error::ModelResult;
use crate::model::ModelDescriptor;
use crate::query::Statement;

/// Row window; always applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitOffset {
    pub limit: i64,
    pub offset: i64,
}

impl LimitOffset {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Window for a 1-based page number; the offset saturates at `i64::MAX`
    pub fn page(page: i64, per_page: i64) -> Self {
        let offset = page.max(1).saturating_sub(1).saturating_mul(per_page.max(0));
        Self::new(per_page, offset)
    }
}

impl StatementFilter for LimitOffset {
    fn append_to_statement(
        &self,
        statement: Statement,
        _models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        Ok(statement.limit(self.limit).offset(self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::test_models::User;

    #[test]
    fn test_sets_limit_and_offset() {
        let users = User::descriptor();
        let statement = LimitOffset::new(10, 0)
            .append_to_statement(Statement::select_from(&users), &[users])
            .unwrap();

        assert_eq!(statement.to_sql(), "SELECT users.* FROM users LIMIT 10 OFFSET 0");
    }

    #[test]
    fn test_page_window() {
        assert_eq!(LimitOffset::page(3, 25), LimitOffset::new(25, 50));
        assert_eq!(LimitOffset::page(0, 25), LimitOffset::new(25, 0));
    }

    #[test]
    fn test_page_window_saturates() {
        assert_eq!(LimitOffset::page(i64::MAX, 30), LimitOffset::new(30, i64::MAX));
        assert_eq!(LimitOffset::page(i64::MIN, 30), LimitOffset::new(30, 0));
        assert_eq!(LimitOffset::page(4, -10), LimitOffset::new(-10, 0));
    }
}
