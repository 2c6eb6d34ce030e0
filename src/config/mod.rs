//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::ConfigError;

/// Conventions the sort compiler relies on
///
/// # Example
/// ```yaml
/// id_member: id
/// locale_member: language_code
/// default_locale: pt-BR
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Member used when the path is empty or its root segment is unknown
    pub id_member: String,

    /// Member of localized child elements holding their language code
    pub locale_member: String,

    /// Locale matched by the default collection condition when the request
    /// does not carry one
    pub default_locale: String,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            id_member: "id".to_string(),
            locale_member: "language_code".to_string(),
            default_locale: "en-US".to_string(),
        }
    }
}

impl SortConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every member name is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("id_member", &self.id_member),
            ("locale_member", &self.locale_member),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    message: "member name cannot be empty".to_string(),
                });
            }
            if value.contains('.') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                    message: "member name cannot be a path".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Builder-style override of the default locale
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }
}
