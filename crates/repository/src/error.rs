//! Error types for the repository layer
//!
//! Field misconfiguration and missing record types are programming errors and
//! are always surfaced. Driver failures are carried through untouched.

use std::fmt;

/// Result type alias for repository operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for repository operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A filter referenced a field that none of the candidate models expose
    FieldNotFound { field: String, tables: Vec<String> },
    /// The repository was bound to a model without usable table metadata
    MissingRecordType { repository: String, reason: String },
    /// Database connection or query error reported by the session
    Database(String),
    /// Statement could not be rendered or bound
    Query(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::FieldNotFound { field, tables } => write!(
                f,
                "The `{}` is not in these models: [{}]. Check the correctness of the SQL request.",
                field,
                tables.join(", ")
            ),
            ModelError::MissingRecordType { repository, reason } => write!(
                f,
                "No model is specified for this repository: {} ({})",
                repository, reason
            ),
            ModelError::Database(msg) => write!(f, "Database error: {}", msg),
            ModelError::Query(msg) => write!(f, "Query error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        ModelError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}
