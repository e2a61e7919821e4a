//! Single-bound comparisons: `<`, `<=`, `>`, `>=`
//!
//! Unlike equality, only a missing bound disables these filters; zero or an
//! empty string are legitimate bounds.

use super::StatementFilter;
use crate::error::ModelResult;
use crate::model::{Attribute, ModelDescriptor};
use crate::query::{Statement, WhereCondition};
use crate::resolver::resolve;
use crate::session::value::DatabaseValue;

type Comparison = fn(&Attribute, DatabaseValue) -> WhereCondition;

fn apply_bound(
    statement: Statement,
    models: &[ModelDescriptor],
    field_name: &str,
    value: &Option<DatabaseValue>,
    compare: Comparison,
) -> ModelResult<Statement> {
    let field = resolve(models, field_name)?;

    match value {
        Some(bound) if !bound.is_null() => Ok(statement.filter(compare(&field, bound.clone()))),
        _ => Ok(statement),
    }
}

/// `WHERE field < :value`
#[derive(Debug, Clone, PartialEq)]
pub struct BeforeFilter {
    pub field_name: String,
    pub value: Option<DatabaseValue>,
}

impl BeforeFilter {
    pub fn new<T: Into<DatabaseValue>>(field_name: impl Into<String>, value: Option<T>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.map(Into::into),
        }
    }
}

impl StatementFilter for BeforeFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        apply_bound(statement, models, &self.field_name, &self.value, Attribute::lt)
    }
}

/// `WHERE field <= :value`
#[derive(Debug, Clone, PartialEq)]
pub struct OnBeforeFilter {
    pub field_name: String,
    pub value: Option<DatabaseValue>,
}

impl OnBeforeFilter {
    pub fn new<T: Into<DatabaseValue>>(field_name: impl Into<String>, value: Option<T>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.map(Into::into),
        }
    }
}

impl StatementFilter for OnBeforeFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        apply_bound(statement, models, &self.field_name, &self.value, Attribute::le)
    }
}

/// `WHERE field > :value`
#[derive(Debug, Clone, PartialEq)]
pub struct AfterFilter {
    pub field_name: String,
    pub value: Option<DatabaseValue>,
}

impl AfterFilter {
    pub fn new<T: Into<DatabaseValue>>(field_name: impl Into<String>, value: Option<T>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.map(Into::into),
        }
    }
}

impl StatementFilter for AfterFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        apply_bound(statement, models, &self.field_name, &self.value, Attribute::gt)
    }
}

/// `WHERE field >= :value`
#[derive(Debug, Clone, PartialEq)]
pub struct OnAfterFilter {
    pub field_name: String,
    pub value: Option<DatabaseValue>,
}

impl OnAfterFilter {
    pub fn new<T: Into<DatabaseValue>>(field_name: impl Into<String>, value: Option<T>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.map(Into::into),
        }
    }
}

impl StatementFilter for OnAfterFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        apply_bound(statement, models, &self.field_name, &self.value, Attribute::ge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::Model;
    use crate::test_models::User;

    fn render(filter: &dyn StatementFilter) -> String {
        let users = User::descriptor();
        filter
            .append_to_statement(Statement::select_from(&users), &[users])
            .unwrap()
            .to_sql()
    }

    #[test]
    fn test_each_operator() {
        assert!(render(&BeforeFilter::new("age", Some(30))).ends_with("WHERE users.age < 30"));
        assert!(render(&OnBeforeFilter::new("age", Some(30))).ends_with("WHERE users.age <= 30"));
        assert!(render(&AfterFilter::new("age", Some(30))).ends_with("WHERE users.age > 30"));
        assert!(render(&OnAfterFilter::new("age", Some(30))).ends_with("WHERE users.age >= 30"));
    }

    #[test]
    fn test_zero_is_a_valid_bound() {
        assert!(render(&AfterFilter::new("age", Some(0))).ends_with("WHERE users.age > 0"));
    }

    #[test]
    fn test_missing_bound_is_noop() {
        assert_eq!(render(&BeforeFilter::new("age", None::<i32>)), "SELECT users.* FROM users");
        assert_eq!(
            render(&OnAfterFilter::new("age", Some(DatabaseValue::Null))),
            "SELECT users.* FROM users"
        );
    }

    #[test]
    fn test_unknown_field_fails_even_without_bound() {
        let users = User::descriptor();
        let err = AfterFilter::new("nickname", None::<i32>)
            .append_to_statement(Statement::select_from(&users), &[users])
            .unwrap_err();
        assert!(matches!(err, ModelError::FieldNotFound { .. }));
    }
}
