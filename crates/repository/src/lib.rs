//! # elif-repository: Generic repository layer for elif.rs
//!
//! Typed, composable statement filters and a generic repository over a
//! session. Callers describe a read as a list of [`Filter`] values; the
//! repository folds them onto a base statement, executes it through its
//! [`Session`], and post-processes the rows with a [`Resolver`].
//!
//! Filters that receive absent values leave the statement untouched, so an
//! endpoint can forward optional query parameters without branching.

pub mod build;
pub mod config;
pub mod error;
pub mod filters;
pub mod model;
pub mod paginate;
pub mod query;
pub mod repository;
pub mod resolver;
pub mod results;
pub mod session;

#[cfg(test)]
mod test_models;

// Re-export core traits and types
pub use build::{apply_filters, BuildSql, DefaultBuildSql};
pub use config::{ConfigError, RepositoryConfig, DEFAULT_PAGE_SIZE};
pub use error::{ModelError, ModelResult};
pub use filters::*;
pub use model::{Attribute, FieldKey, Model, ModelDescriptor};
pub use paginate::{DefaultPaginate, LoadPaginate, Paginate};
pub use query::{OrderDirection, QueryOperator, Statement, WhereCondition};
pub use repository::{Paginated, QueryOptions, Repository};
pub use resolver::resolve;
pub use results::{DefaultResolver, Fetched, ResolvedRow, Resolver};
pub use session::{DatabaseRow, DatabaseValue, PgSession, Row, Session, StagedRecord};
