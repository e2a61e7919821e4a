//! Statement Module - Composable, immutable query representation

pub mod builder;
pub mod dml;
pub mod joins;
pub mod ordering;
pub mod pagination;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::Statement;
pub use types::{JoinType, OrderDirection, QueryOperator, QueryType, WhereCondition};
