//! Statement Types - Core types and enums for statement building

use std::fmt;

use crate::session::value::DatabaseValue;

/// Query operator types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    NotLike,
    ILike,
    NotILike,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    Between,
    /// Verbatim SQL predicate held in the condition's column
    Raw,
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperator::Equal => write!(f, "="),
            QueryOperator::NotEqual => write!(f, "!="),
            QueryOperator::GreaterThan => write!(f, ">"),
            QueryOperator::GreaterThanOrEqual => write!(f, ">="),
            QueryOperator::LessThan => write!(f, "<"),
            QueryOperator::LessThanOrEqual => write!(f, "<="),
            QueryOperator::Like => write!(f, "LIKE"),
            QueryOperator::NotLike => write!(f, "NOT LIKE"),
            QueryOperator::ILike => write!(f, "ILIKE"),
            QueryOperator::NotILike => write!(f, "NOT ILIKE"),
            QueryOperator::In => write!(f, "IN"),
            QueryOperator::NotIn => write!(f, "NOT IN"),
            QueryOperator::IsNull => write!(f, "IS NULL"),
            QueryOperator::IsNotNull => write!(f, "IS NOT NULL"),
            QueryOperator::Between => write!(f, "BETWEEN"),
            QueryOperator::Raw => Ok(()),
        }
    }
}

/// Where clause condition, also usable on its own as a raw predicate filter
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCondition {
    pub column: String,
    pub operator: QueryOperator,
    pub value: Option<DatabaseValue>,
    pub values: Vec<DatabaseValue>, // For IN, NOT IN, BETWEEN
}

impl WhereCondition {
    /// Single-value comparison
    pub fn new<T: Into<DatabaseValue>>(
        column: impl Into<String>,
        operator: QueryOperator,
        value: T,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: Some(value.into()),
            values: Vec::new(),
        }
    }

    /// List comparison (IN, NOT IN, BETWEEN)
    pub fn with_values<I, T>(column: impl Into<String>, operator: QueryOperator, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DatabaseValue>,
    {
        Self {
            column: column.into(),
            operator,
            value: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Operator without operands (IS NULL, IS NOT NULL)
    pub fn unary(column: impl Into<String>, operator: QueryOperator) -> Self {
        Self {
            column: column.into(),
            operator,
            value: None,
            values: Vec::new(),
        }
    }

    /// Verbatim SQL predicate
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::unary(sql, QueryOperator::Raw)
    }

    /// Predicate that no row satisfies
    pub fn contradiction() -> Self {
        Self::raw("1=-1")
    }
}

/// Join types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER JOIN"),
            JoinType::Left => write!(f, "LEFT JOIN"),
        }
    }
}

/// Join clause
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table: String,
    pub on_conditions: Vec<(String, String)>, // (left_column, right_column)
}

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Statement kinds supported by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryType {
    #[default]
    Select,
    Insert,
    Delete,
}

/// Column assignment for INSERT statements
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub column: String,
    pub value: Option<DatabaseValue>, // None for NULL values
}
