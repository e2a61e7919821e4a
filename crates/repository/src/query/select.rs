//! Statement SELECT operations

use super::builder::Statement;
use super::types::QueryType;
use crate::model::{Attribute, ModelDescriptor};

impl Statement {
    /// `SELECT <table>.* FROM <table>` for a model
    pub fn select_from(model: &ModelDescriptor) -> Self {
        Self::new()
            .select(&model.all_columns())
            .from(model.table_name)
    }

    /// Add SELECT fields to the statement
    pub fn select(mut self, fields: &str) -> Self {
        if fields == "*" {
            self.select_fields.push("*".to_string());
        } else {
            self.select_fields.extend(
                fields
                    .split(',')
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty()),
            );
        }
        self
    }

    /// Select the given attributes, labelled with their names
    pub fn select_attributes(mut self, attributes: &[Attribute]) -> Self {
        self.select_fields.extend(
            attributes
                .iter()
                .map(|attr| format!("{} AS {}", attr.column(), attr.name())),
        );
        self
    }

    /// Replace the projection, keeping FROM and JOIN clauses
    pub fn with_only_columns(mut self, fields: &[&str]) -> Self {
        self.select_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Set the FROM table
    pub fn from(mut self, table: &str) -> Self {
        self.query_type = QueryType::Select;
        self.from_tables = vec![table.to_string()];
        self
    }

    /// Count-only variant: projection becomes `COUNT(<key>)`, ordering and
    /// row window are dropped, filters and joins are kept.
    pub fn into_count(self, key: &Attribute) -> Self {
        let count = format!("COUNT({})", key.column());
        self.with_only_columns(&[count.as_str()])
            .clear_order_by()
            .clear_limit()
            .clear_offset()
    }
}
