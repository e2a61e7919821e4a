//! `WHERE field IN (...)` and `WHERE field NOT IN (...)`
//!
//! The empty-list behaviour differs on purpose:
//!
//! | values        | `InFilter`        | `NotInFilter` |
//! |---------------|-------------------|---------------|
//! | `None`        | no-op             | no-op         |
//! | `Some([])`    | matches no rows   | no-op         |
//! | `Some([..])`  | `IN (..)`         | `NOT IN (..)` |
//!
//! An empty inclusion set is an explicit "nothing qualifies", while an empty
//! exclusion set excludes nothing.

use super::StatementFilter;
use crate::error::ModelResult;
use crate::model::ModelDescriptor;
use crate::query::{Statement, WhereCondition};
use crate::resolver::resolve;
use crate::session::value::DatabaseValue;

fn collect_values<I, T>(values: Option<I>) -> Option<Vec<DatabaseValue>>
where
    I: IntoIterator<Item = T>,
    T: Into<DatabaseValue>,
{
    values.map(|values| values.into_iter().map(Into::into).collect())
}

/// Membership filter
#[derive(Debug, Clone, PartialEq)]
pub struct InFilter {
    pub field_name: String,
    pub values: Option<Vec<DatabaseValue>>,
}

impl InFilter {
    pub fn new<I, T>(field_name: impl Into<String>, values: Option<I>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DatabaseValue>,
    {
        Self {
            field_name: field_name.into(),
            values: collect_values(values),
        }
    }

    /// Filter on a concrete list of values
    pub fn values<I, T>(field_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DatabaseValue>,
    {
        Self::new(field_name, Some(values))
    }
}

impl StatementFilter for InFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        let field = resolve(models, &self.field_name)?;

        match &self.values {
            None => Ok(statement),
            Some(values) if values.is_empty() => Ok(statement.filter(WhereCondition::contradiction())),
            Some(values) => Ok(statement.filter(field.in_list(values.iter().cloned()))),
        }
    }
}

/// Exclusion filter
#[derive(Debug, Clone, PartialEq)]
pub struct NotInFilter {
    pub field_name: String,
    pub values: Option<Vec<DatabaseValue>>,
}

impl NotInFilter {
    pub fn new<I, T>(field_name: impl Into<String>, values: Option<I>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DatabaseValue>,
    {
        Self {
            field_name: field_name.into(),
            values: collect_values(values),
        }
    }

    /// Exclude a concrete list of values
    pub fn values<I, T>(field_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DatabaseValue>,
    {
        Self::new(field_name, Some(values))
    }
}

impl StatementFilter for NotInFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        let field = resolve(models, &self.field_name)?;

        match &self.values {
            Some(values) if !values.is_empty() => {
                Ok(statement.filter(field.not_in_list(values.iter().cloned())))
            }
            _ => Ok(statement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::Model;
    use crate::test_models::User;

    fn base() -> Statement {
        Statement::select_from(&User::descriptor())
    }

    fn apply(filter: &dyn StatementFilter) -> ModelResult<Statement> {
        filter.append_to_statement(base(), &[User::descriptor()])
    }

    #[test]
    fn test_in_with_values() {
        let statement = apply(&InFilter::values("id", [1, 2, 3])).unwrap();
        assert_eq!(
            statement.to_sql(),
            "SELECT users.* FROM users WHERE users.id IN (1, 2, 3)"
        );
    }

    #[test]
    fn test_in_with_none_is_noop() {
        let statement = apply(&InFilter::new("id", None::<Vec<i32>>)).unwrap();
        assert_eq!(statement, base());
    }

    #[test]
    fn test_in_with_empty_list_matches_nothing() {
        let statement = apply(&InFilter::values("id", Vec::<i32>::new())).unwrap();
        assert_eq!(statement.where_conditions(), &[WhereCondition::contradiction()]);
        assert_eq!(statement.to_sql(), "SELECT users.* FROM users WHERE 1=-1");
    }

    #[test]
    fn test_not_in_with_empty_list_excludes_nothing() {
        let empty = apply(&NotInFilter::values("id", Vec::<i32>::new())).unwrap();
        let none = apply(&NotInFilter::new("id", None::<Vec<i32>>)).unwrap();

        assert_eq!(empty, base());
        assert_eq!(none, base());
    }

    #[test]
    fn test_not_in_with_values() {
        let statement = apply(&NotInFilter::values("status", ["banned", "deleted"])).unwrap();
        assert_eq!(
            statement.to_sql(),
            "SELECT users.* FROM users WHERE users.status NOT IN ('banned', 'deleted')"
        );
    }

    #[test]
    fn test_unknown_field_fails_even_without_values() {
        let err = apply(&InFilter::new("nickname", None::<Vec<i32>>)).unwrap_err();
        assert!(matches!(err, ModelError::FieldNotFound { .. }));
    }
}
