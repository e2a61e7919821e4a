//! Attribute resolution across candidate models
//!
//! Filters name their field without knowing which of the joined models owns
//! it. The candidates are searched in order and the first match wins.

use crate::error::{ModelError, ModelResult};
use crate::model::{Attribute, FieldKey, ModelDescriptor};

/// Find the attribute named by `key` on the first candidate that maps it.
///
/// An [`Attribute`] key is reduced to its name before the lookup, so a
/// handle taken from one model resolves against the statement's own
/// candidates.
pub fn resolve(models: &[ModelDescriptor], key: impl Into<FieldKey>) -> ModelResult<Attribute> {
    let key = key.into();
    let name = key.name();

    models
        .iter()
        .find_map(|model| model.attribute(name))
        .ok_or_else(|| ModelError::FieldNotFound {
            field: name.to_string(),
            tables: models.iter().map(|m| m.table_name.to_string()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::test_models::{Post, User};

    #[test]
    fn test_resolves_field_on_single_model() {
        let attr = resolve(&[User::descriptor()], "status").unwrap();
        assert_eq!(attr, Attribute::new("users", "status"));
    }

    #[test]
    fn test_every_mapped_field_resolves_to_itself() {
        let users = User::descriptor();
        for field in User::field_names() {
            let attr = resolve(&[users], *field).unwrap();
            assert_eq!(attr.name(), *field);
            assert_eq!(attr.table(), Some("users"));
        }
    }

    #[test]
    fn test_first_candidate_wins() {
        let models = [Post::descriptor(), User::descriptor()];

        assert_eq!(resolve(&models, "id").unwrap().column(), "posts.id");
        assert_eq!(resolve(&models, "email").unwrap().column(), "users.email");
    }

    #[test]
    fn test_attribute_key_is_resolved_by_name() {
        let foreign = Attribute::new("archived_users", "email");
        let attr = resolve(&[User::descriptor()], &foreign).unwrap();
        assert_eq!(attr.column(), "users.email");
    }

    #[test]
    fn test_missing_field_reports_searched_tables() {
        let err = resolve(&[Post::descriptor(), User::descriptor()], "nonexistent").unwrap_err();
        assert_eq!(
            err,
            ModelError::FieldNotFound {
                field: "nonexistent".to_string(),
                tables: vec!["posts".to_string(), "users".to_string()],
            }
        );
    }
}
