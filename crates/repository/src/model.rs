//! Model metadata and attribute handles
//!
//! Every mapped entity implements [`Model`], which exposes its table, primary
//! key and field names. Filters never inspect types at runtime: they resolve
//! field names against [`ModelDescriptor`]s and work with [`Attribute`]
//! handles.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::query::types::{OrderDirection, QueryOperator, WhereCondition};
use crate::session::value::{DatabaseRow, DatabaseValue};

/// Core trait for queryable entities
pub trait Model: Send + Sync + Debug + Serialize + DeserializeOwned {
    /// The type used for this model's primary key
    type PrimaryKey: Clone + Send + Sync + Debug + Display + Into<DatabaseValue>;

    /// Table name for this model
    fn table_name() -> &'static str;

    /// Primary key field name
    fn primary_key_name() -> &'static str {
        "id"
    }

    /// Mapped field names, primary key included
    fn field_names() -> &'static [&'static str];

    /// Get the primary key value for this model instance
    fn primary_key(&self) -> Option<Self::PrimaryKey>;

    /// Create a model instance from a database row
    fn from_row(row: &dyn DatabaseRow) -> ModelResult<Self>
    where
        Self: Sized,
    {
        Ok(serde_json::from_value(row.to_json()?)?)
    }

    /// Typed field-value pairs for database operations, keyed by column
    fn to_fields(&self) -> HashMap<String, DatabaseValue>;

    /// Type-erased metadata for candidate lists
    fn descriptor() -> ModelDescriptor
    where
        Self: Sized,
    {
        ModelDescriptor::of::<Self>()
    }
}

/// Static metadata of a model, usable in heterogeneous candidate lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub table_name: &'static str,
    pub primary_key_name: &'static str,
    pub field_names: &'static [&'static str],
}

impl ModelDescriptor {
    pub fn of<M: Model>() -> Self {
        Self {
            table_name: M::table_name(),
            primary_key_name: M::primary_key_name(),
            field_names: M::field_names(),
        }
    }

    /// Look up a mapped field by name
    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        self.field_names
            .iter()
            .find(|field| **field == name)
            .map(|field| Attribute::new(self.table_name, *field))
    }

    /// Attribute of the primary key column
    pub fn primary_key(&self) -> Attribute {
        Attribute::new(self.table_name, self.primary_key_name)
    }

    /// `table.*` projection
    pub fn all_columns(&self) -> String {
        format!("{}.*", self.table_name)
    }

    /// Fails when the metadata cannot back `repository`
    pub fn validate(&self, repository: &str) -> ModelResult<()> {
        let missing = |reason: String| ModelError::MissingRecordType {
            repository: repository.to_string(),
            reason,
        };

        if self.table_name.is_empty() {
            return Err(missing("model has an empty table name".to_string()));
        }

        if !self.field_names.contains(&self.primary_key_name) {
            return Err(missing(format!(
                "primary key `{}` is not a field of `{}`",
                self.primary_key_name, self.table_name
            )));
        }

        Ok(())
    }
}

/// Handle to a column, or to a computed SQL expression with a label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    table: Option<String>,
    name: String,
    expression: Option<String>,
}

impl Attribute {
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
            expression: None,
        }
    }

    /// A computed or aliased column, rendered verbatim
    pub fn computed(expression: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            table: None,
            name: label.into(),
            expression: Some(expression.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// SQL text of the attribute
    pub fn column(&self) -> String {
        match (&self.expression, &self.table) {
            (Some(expression), _) => expression.clone(),
            (None, Some(table)) => format!("{}.{}", table, self.name),
            (None, None) => self.name.clone(),
        }
    }

    fn compare<T: Into<DatabaseValue>>(&self, operator: QueryOperator, value: T) -> WhereCondition {
        WhereCondition::new(self.column(), operator, value)
    }

    pub fn eq<T: Into<DatabaseValue>>(&self, value: T) -> WhereCondition {
        self.compare(QueryOperator::Equal, value)
    }

    pub fn ne<T: Into<DatabaseValue>>(&self, value: T) -> WhereCondition {
        self.compare(QueryOperator::NotEqual, value)
    }

    pub fn lt<T: Into<DatabaseValue>>(&self, value: T) -> WhereCondition {
        self.compare(QueryOperator::LessThan, value)
    }

    pub fn le<T: Into<DatabaseValue>>(&self, value: T) -> WhereCondition {
        self.compare(QueryOperator::LessThanOrEqual, value)
    }

    pub fn gt<T: Into<DatabaseValue>>(&self, value: T) -> WhereCondition {
        self.compare(QueryOperator::GreaterThan, value)
    }

    pub fn ge<T: Into<DatabaseValue>>(&self, value: T) -> WhereCondition {
        self.compare(QueryOperator::GreaterThanOrEqual, value)
    }

    pub fn like(&self, pattern: &str) -> WhereCondition {
        self.compare(QueryOperator::Like, pattern)
    }

    pub fn ilike(&self, pattern: &str) -> WhereCondition {
        self.compare(QueryOperator::ILike, pattern)
    }

    pub fn not_like(&self, pattern: &str) -> WhereCondition {
        self.compare(QueryOperator::NotLike, pattern)
    }

    pub fn not_ilike(&self, pattern: &str) -> WhereCondition {
        self.compare(QueryOperator::NotILike, pattern)
    }

    pub fn in_list<I, T>(&self, values: I) -> WhereCondition
    where
        I: IntoIterator<Item = T>,
        T: Into<DatabaseValue>,
    {
        WhereCondition::with_values(self.column(), QueryOperator::In, values)
    }

    pub fn not_in_list<I, T>(&self, values: I) -> WhereCondition
    where
        I: IntoIterator<Item = T>,
        T: Into<DatabaseValue>,
    {
        WhereCondition::with_values(self.column(), QueryOperator::NotIn, values)
    }

    pub fn between<T: Into<DatabaseValue>>(&self, start: T, end: T) -> WhereCondition {
        WhereCondition::with_values(self.column(), QueryOperator::Between, [start, end])
    }

    pub fn is_null(&self) -> WhereCondition {
        WhereCondition::unary(self.column(), QueryOperator::IsNull)
    }

    pub fn is_not_null(&self) -> WhereCondition {
        WhereCondition::unary(self.column(), QueryOperator::IsNotNull)
    }

    pub fn asc(&self) -> (String, OrderDirection) {
        (self.column(), OrderDirection::Asc)
    }

    pub fn desc(&self) -> (String, OrderDirection) {
        (self.column(), OrderDirection::Desc)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column())
    }
}

/// A field reference: a plain name or an already resolved attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    Name(String),
    Attribute(Attribute),
}

impl FieldKey {
    /// The name used for lookups
    pub fn name(&self) -> &str {
        match self {
            FieldKey::Name(name) => name,
            FieldKey::Attribute(attribute) => attribute.name(),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::Name(name)
    }
}

impl From<&String> for FieldKey {
    fn from(name: &String) -> Self {
        FieldKey::Name(name.clone())
    }
}

impl From<Attribute> for FieldKey {
    fn from(attribute: Attribute) -> Self {
        FieldKey::Attribute(attribute)
    }
}

impl From<&Attribute> for FieldKey {
    fn from(attribute: &Attribute) -> Self {
        FieldKey::Attribute(attribute.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_models::{Post, User};

    #[test]
    fn test_descriptor_attribute_lookup() {
        let users = User::descriptor();

        assert_eq!(users.attribute("email"), Some(Attribute::new("users", "email")));
        assert_eq!(users.attribute("title"), None);
        assert_eq!(users.primary_key().column(), "users.id");
        assert_eq!(users.all_columns(), "users.*");
    }

    #[test]
    fn test_descriptor_validation() {
        assert!(User::descriptor().validate("Repository<User>").is_ok());

        let broken = ModelDescriptor {
            table_name: "",
            primary_key_name: "id",
            field_names: &["id"],
        };
        assert_eq!(
            broken.validate("Repository<Anon>").unwrap_err(),
            ModelError::MissingRecordType {
                repository: "Repository<Anon>".to_string(),
                reason: "model has an empty table name".to_string(),
            }
        );

        let no_key = ModelDescriptor {
            primary_key_name: "uuid",
            ..Post::descriptor()
        };
        assert_eq!(
            no_key.validate("Repository<Post>").unwrap_err().to_string(),
            "No model is specified for this repository: Repository<Post> \
             (primary key `uuid` is not a field of `posts`)"
        );
    }

    #[test]
    fn test_computed_attribute_renders_expression() {
        let attr = Attribute::computed("lower(users.email)", "email_lower");

        assert_eq!(attr.name(), "email_lower");
        assert_eq!(attr.table(), None);
        assert_eq!(attr.column(), "lower(users.email)");
    }

    #[test]
    fn test_to_fields_keeps_column_types() {
        let user = User::sample(4, "ann@example.com");
        let fields = user.to_fields();

        assert_eq!(fields["id"], DatabaseValue::Int32(4));
        assert_eq!(fields["email"], DatabaseValue::from("ann@example.com"));
        assert!(matches!(fields["created_at"], DatabaseValue::DateTime(_)));
    }

    #[test]
    fn test_predicate_builders_render() {
        let email = Attribute::new("users", "email");

        assert_eq!(email.ne("a").operator, QueryOperator::NotEqual);
        assert_eq!(email.is_null().value, None);
        assert_eq!(email.asc(), ("users.email".to_string(), OrderDirection::Asc));
        assert_eq!(email.desc(), ("users.email".to_string(), OrderDirection::Desc));
    }
}
