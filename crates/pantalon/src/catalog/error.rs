//! Catalog-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Semantic rule violations found after a document decoded successfully.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid version '{found}', expected '{expected}'")]
    InvalidVersion { found: String, expected: String },

    #[error("invalid kind '{found}', expected '{expected}'")]
    InvalidKind { found: String, expected: String },

    #[error("invalid metadata.name '{name}': must be lowercase alphanumerics or '-', start and end with an alphanumeric, and be at most 253 characters")]
    InvalidName { name: String },
}

/// Errors produced while turning raw bytes into a validated configuration.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to decode YAML: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors that can occur while building the configuration catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to walk directory tree at '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to check for configuration file '{path}': {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in '{path}': {source}")]
    InvalidConfiguration {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("Duplicate configuration name '{name}' in '{first}' and '{second}'")]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl CatalogError {
    /// Returns the validation failure behind this error, if any.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            CatalogError::InvalidConfiguration {
                source: SchemaError::Invalid(v),
                ..
            } => Some(v),
            _ => None,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
