//! Statement filters
//!
//! Each filter is an immutable value describing one predicate or statement
//! modifier. Filters that receive an absent value (None, empty text, zero,
//! empty collection) leave the statement untouched, so callers can pass
//! optional criteria without branching. The one exception is [`InFilter`]
//! with an empty list, which matches nothing.

pub mod comparison;
pub mod equality;
pub mod limit_offset;
pub mod membership;
pub mod ordering;
pub mod range;
pub mod search;

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::ModelResult;
use crate::model::ModelDescriptor;
use crate::query::{Statement, WhereCondition};

pub use comparison::{AfterFilter, BeforeFilter, OnAfterFilter, OnBeforeFilter};
pub use equality::EqFilter;
pub use limit_offset::LimitOffset;
pub use membership::{InFilter, NotInFilter};
pub use ordering::{OrderBy, SortOrder};
pub use range::{DatesType, DatesTypeFilter, RangeBound};
pub use search::{NotInSearchFilter, SearchFilter};

/// A rule that knows how to append itself to a statement
pub trait StatementFilter: Debug + Send + Sync {
    /// Return `statement` with this filter applied. `models` are the
    /// candidates field names are resolved against.
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement>;
}

/// Every filter the builder understands
#[derive(Debug, Clone)]
pub enum Filter {
    Eq(EqFilter),
    In(InFilter),
    NotIn(NotInFilter),
    Dates(DatesTypeFilter),
    Before(BeforeFilter),
    OnBefore(OnBeforeFilter),
    After(AfterFilter),
    OnAfter(OnAfterFilter),
    Search(SearchFilter),
    NotSearch(NotInSearchFilter),
    OrderBy(OrderBy),
    LimitOffset(LimitOffset),
    /// Raw predicate joined to the WHERE clause as is
    Expression(WhereCondition),
    /// Filter defined outside this crate
    Custom(Arc<dyn StatementFilter>),
}

impl Filter {
    /// Wrap a user-defined filter
    pub fn custom(filter: impl StatementFilter + 'static) -> Self {
        Filter::Custom(Arc::new(filter))
    }

    pub fn as_limit_offset(&self) -> Option<&LimitOffset> {
        match self {
            Filter::LimitOffset(limit_offset) => Some(limit_offset),
            _ => None,
        }
    }
}

impl StatementFilter for Filter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        match self {
            Filter::Eq(f) => f.append_to_statement(statement, models),
            Filter::In(f) => f.append_to_statement(statement, models),
            Filter::NotIn(f) => f.append_to_statement(statement, models),
            Filter::Dates(f) => f.append_to_statement(statement, models),
            Filter::Before(f) => f.append_to_statement(statement, models),
            Filter::OnBefore(f) => f.append_to_statement(statement, models),
            Filter::After(f) => f.append_to_statement(statement, models),
            Filter::OnAfter(f) => f.append_to_statement(statement, models),
            Filter::Search(f) => f.append_to_statement(statement, models),
            Filter::NotSearch(f) => f.append_to_statement(statement, models),
            Filter::OrderBy(f) => f.append_to_statement(statement, models),
            Filter::LimitOffset(f) => f.append_to_statement(statement, models),
            Filter::Expression(condition) => Ok(statement.filter(condition.clone())),
            Filter::Custom(f) => f.append_to_statement(statement, models),
        }
    }
}

macro_rules! impl_from_filter {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Filter {
                fn from(filter: $ty) -> Self {
                    Filter::$variant(filter)
                }
            }
        )*
    };
}

impl_from_filter! {
    Eq => EqFilter,
    In => InFilter,
    NotIn => NotInFilter,
    Dates => DatesTypeFilter,
    Before => BeforeFilter,
    OnBefore => OnBeforeFilter,
    After => AfterFilter,
    OnAfter => OnAfterFilter,
    Search => SearchFilter,
    NotSearch => NotInSearchFilter,
    OrderBy => OrderBy,
    LimitOffset => LimitOffset,
    Expression => WhereCondition,
}
