//! Typed error handling for sort compilation
//!
//! # Error Categories
//!
//! - [`ConfigurationError`]: the requested type cannot be sorted at all
//!   (neither the path nor the `Id` fallback resolves)
//! - [`ConfigError`]: loading or validating a [`SortConfig`](crate::config::SortConfig),
//!   reported through `anyhow` at the loading edge
//! - [`ValidationError`]: malformed sort request input
//!
//! Unresolved segments in the middle of a path and absent data are not
//! errors; they degrade to the deepest resolved value and default values.
//!
//! # Example
//!
//! ```rust,ignore
//! use sortkey::prelude::*;
//!
//! match order_by_property(items, Some("name"), &SortOptions::default()) {
//!     Ok(sorted) => render(sorted),
//!     Err(SortError::Configuration(ConfigurationError::NotFoundProperty { type_name })) => {
//!         tracing::error!("{} has no sortable id", type_name);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for sort operations
#[derive(Debug, Error)]
pub enum SortError {
    /// The root type cannot be ordered
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Sort request input is malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SortError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SortError::Configuration(e) => e.error_code(),
            SortError::Validation(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors caused by an entity type that cannot be ordered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Neither the requested path nor the `Id` fallback exists on the type
    #[error("NotFoundProperty;{type_name}")]
    NotFoundProperty { type_name: String },
}

impl ConfigurationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigurationError::NotFoundProperty { .. } => "NOT_FOUND_PROPERTY",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to sort configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to sort request input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Sort direction other than `asc` / `desc`
    #[error("Invalid sort direction '{value}', expected 'asc' or 'desc'")]
    InvalidDirection { value: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidDirection { .. } => "INVALID_SORT_DIRECTION",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;
