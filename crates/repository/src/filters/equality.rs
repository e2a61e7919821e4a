//! `WHERE field = :value`

use super::StatementFilter;
use crate::error::ModelResult;
use crate::model::ModelDescriptor;
use crate::query::Statement;
use crate::resolver::resolve;
use crate::session::value::DatabaseValue;

/// Equality filter; a falsy value means "no criterion"
#[derive(Debug, Clone, PartialEq)]
pub struct EqFilter {
    pub field_name: String,
    pub value: DatabaseValue,
}

impl EqFilter {
    pub fn new(field_name: impl Into<String>, value: impl Into<DatabaseValue>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
        }
    }
}

impl StatementFilter for EqFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        if self.value.is_falsy() {
            return Ok(statement);
        }

        let field = resolve(models, &self.field_name)?;
        Ok(statement.filter(field.eq(self.value.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::test_models::User;

    fn apply(filter: EqFilter) -> ModelResult<Statement> {
        let users = User::descriptor();
        filter.append_to_statement(Statement::select_from(&users), &[users])
    }

    #[test]
    fn test_absent_values_leave_statement_unchanged() {
        let base = Statement::select_from(&User::descriptor());

        assert_eq!(apply(EqFilter::new("status", None::<String>)).unwrap(), base);
        assert_eq!(apply(EqFilter::new("status", "")).unwrap(), base);
        assert_eq!(apply(EqFilter::new("age", 0)).unwrap(), base);
    }

    #[test]
    fn test_absent_value_skips_field_resolution() {
        assert!(apply(EqFilter::new("nickname", "")).is_ok());
    }

    #[test]
    fn test_value_adds_equality() {
        let statement = apply(EqFilter::new("status", "active")).unwrap();
        assert_eq!(
            statement.to_sql(),
            "SELECT users.* FROM users WHERE users.status = 'active'"
        );
    }
}
