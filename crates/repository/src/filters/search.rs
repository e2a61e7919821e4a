//! Substring search: `WHERE field ILIKE '%' || :value || '%'`

use super::StatementFilter;
use crate::error::ModelResult;
use crate::model::{Attribute, ModelDescriptor};
use crate::query::{Statement, WhereCondition};
use crate::resolver::resolve;

/// Substring match, case-insensitive unless told otherwise
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    pub field_name: String,
    pub value: Option<String>,
    pub ignore_case: bool,
    /// Attribute to search instead of resolving `field_name`, for computed
    /// or aliased columns
    pub mapping_to_attr: Option<Attribute>,
}

impl SearchFilter {
    pub fn new(field_name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.map(Into::into),
            ignore_case: true,
            mapping_to_attr: None,
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.mapping_to_attr = Some(attribute);
        self
    }

    fn condition(&self, field: &Attribute, pattern: &str, negated: bool) -> WhereCondition {
        match (self.ignore_case, negated) {
            (true, false) => field.ilike(pattern),
            (false, false) => field.like(pattern),
            (true, true) => field.not_ilike(pattern),
            (false, true) => field.not_like(pattern),
        }
    }

    fn apply(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
        negated: bool,
    ) -> ModelResult<Statement> {
        let value = match self.value.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(statement),
        };

        let field = match &self.mapping_to_attr {
            Some(attribute) => attribute.clone(),
            None => resolve(models, &self.field_name)?,
        };

        let pattern = format!("%{}%", value);
        Ok(statement.filter(self.condition(&field, &pattern, negated)))
    }
}

impl StatementFilter for SearchFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        self.apply(statement, models, false)
    }
}

/// Negated substring match: `NOT ILIKE` / `NOT LIKE`
#[derive(Debug, Clone, PartialEq)]
pub struct NotInSearchFilter(pub SearchFilter);

impl NotInSearchFilter {
    pub fn new(field_name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self(SearchFilter::new(field_name, value))
    }

    pub fn ignore_case(self, ignore_case: bool) -> Self {
        Self(self.0.ignore_case(ignore_case))
    }

    pub fn with_attribute(self, attribute: Attribute) -> Self {
        Self(self.0.with_attribute(attribute))
    }
}

impl StatementFilter for NotInSearchFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        self.0.apply(statement, models, true)
    }
}
