//! Statement building
//!
//! A builder supplies the base statement and the candidate models its fields
//! resolve against; the filters are then folded onto it left to right.

use crate::error::ModelResult;
use crate::filters::{Filter, StatementFilter};
use crate::model::{Model, ModelDescriptor};
use crate::query::Statement;

/// Produces statements from filter lists
pub trait BuildSql: Send + Sync {
    /// Initial statement and the candidates field names resolve against
    fn base_statement(&self) -> (Statement, Vec<ModelDescriptor>);

    /// Base statement with every filter applied in order
    fn build(&self, filters: &[Filter]) -> ModelResult<Statement> {
        let (statement, models) = self.base_statement();
        apply_filters(statement, &models, filters)
    }
}

/// Fold `filters` onto `statement`
pub fn apply_filters(
    statement: Statement,
    models: &[ModelDescriptor],
    filters: &[Filter],
) -> ModelResult<Statement> {
    filters
        .iter()
        .try_fold(statement, |statement, filter| filter.append_to_statement(statement, models))
}

/// `SELECT <table>.* FROM <table>` over a single model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultBuildSql {
    model: ModelDescriptor,
}

impl DefaultBuildSql {
    pub fn new(model: ModelDescriptor) -> Self {
        Self { model }
    }

    pub fn for_model<M: Model>() -> Self {
        Self::new(M::descriptor())
    }

    pub fn model(&self) -> &ModelDescriptor {
        &self.model
    }
}

impl BuildSql for DefaultBuildSql {
    fn base_statement(&self) -> (Statement, Vec<ModelDescriptor>) {
        (Statement::select_from(&self.model), vec![self.model])
    }
}
