//! `ORDER BY field ASC|DESC`

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::StatementFilter;
use crate::error::ModelResult;
use crate::model::{Attribute, ModelDescriptor};
use crate::query::Statement;
use crate::resolver::resolve;

/// Sort direction as accepted from callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unsupported sort order: {}", s)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Ordering on an optional field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderBy {
    pub field_name: Option<String>,
    pub sort_order: SortOrder,
    /// Names that map to attributes outside the candidate models, such as
    /// aggregate aliases; checked before resolution
    pub mapping_to_attr: Option<HashMap<String, Attribute>>,
}

impl OrderBy {
    pub fn new(field_name: Option<impl Into<String>>, sort_order: SortOrder) -> Self {
        Self {
            field_name: field_name.map(Into::into),
            sort_order,
            mapping_to_attr: None,
        }
    }

    pub fn asc(field_name: impl Into<String>) -> Self {
        Self::new(Some(field_name), SortOrder::Asc)
    }

    pub fn desc(field_name: impl Into<String>) -> Self {
        Self::new(Some(field_name), SortOrder::Desc)
    }

    pub fn with_mapping(mut self, mapping: HashMap<String, Attribute>) -> Self {
        self.mapping_to_attr = Some(mapping);
        self
    }
}

impl StatementFilter for OrderBy {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        let field_name = match self.field_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(statement),
        };

        let mapped = self
            .mapping_to_attr
            .as_ref()
            .and_then(|mapping| mapping.get(field_name));
        let field = match mapped {
            Some(attribute) => attribute.clone(),
            None => resolve(models, field_name)?,
        };

        let (column, direction) = match self.sort_order {
            SortOrder::Asc => field.asc(),
            SortOrder::Desc => field.desc(),
        };
        Ok(statement.order_by_direction(&column, direction))
    }
}
