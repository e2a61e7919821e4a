//! Repository configuration
//!
//! Defaults match the behaviour callers get without any configuration; every
//! value can be overridden from the environment.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

/// Page size used when a paginated read carries no `LimitOffset` filter
pub const DEFAULT_PAGE_SIZE: i64 = 30;

/// Repository configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub default_page_size: i64,
    pub search_ignore_case: bool,
    pub log_statements: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            search_ignore_case: true,
            log_statements: true,
        }
    }
}

impl RepositoryConfig {
    /// Load configuration from `REPOSITORY_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(page_size) = read_env("REPOSITORY_DEFAULT_PAGE_SIZE", "positive integer")? {
            config.default_page_size = page_size;
        }

        if let Some(ignore_case) = read_env("REPOSITORY_SEARCH_IGNORE_CASE", "true or false")? {
            config.search_ignore_case = ignore_case;
        }

        if let Some(log_statements) = read_env("REPOSITORY_LOG_STATEMENTS", "true or false")? {
            config.log_statements = log_statements;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_page_size".to_string(),
                value: self.default_page_size.to_string(),
                expected: "positive integer".to_string(),
            });
        }

        Ok(())
    }
}

fn read_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            field: key.to_string(),
            value: raw,
            expected: expected.to_string(),
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RepositoryConfig::default();
        assert_eq!(config.default_page_size, 30);
        assert!(config.search_ignore_case);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = RepositoryConfig {
            default_page_size: 0,
            ..RepositoryConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_page_size"));
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: RepositoryConfig =
            serde_json::from_str(r#"{ "default_page_size": 50 }"#).unwrap();

        assert_eq!(config.default_page_size, 50);
        assert!(config.log_statements);
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("REPOSITORY_DEFAULT_PAGE_SIZE", "25");
        env::set_var("REPOSITORY_SEARCH_IGNORE_CASE", "false");
        let config = RepositoryConfig::from_env().unwrap();
        env::remove_var("REPOSITORY_DEFAULT_PAGE_SIZE");
        env::remove_var("REPOSITORY_SEARCH_IGNORE_CASE");

        assert_eq!(config.default_page_size, 25);
        assert!(!config.search_ignore_case);
    }
}
