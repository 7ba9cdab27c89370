//! Schema validation for configuration documents.

use regex::Regex;
use std::sync::LazyLock;

use super::error::{SchemaError, ValidationError};
use super::resource::{TerraformConfiguration, API_VERSION, KIND};

/// Maximum length of a DNS subdomain name.
pub const MAX_NAME_LENGTH: usize = 253;

// Lowercase alphanumerics and '-', starting and ending with an alphanumeric.
static RE_SUBDOMAIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

/// Decodes and validates a configuration document.
pub fn parse_configuration(content: &[u8]) -> Result<TerraformConfiguration, SchemaError> {
    let cfg: TerraformConfiguration = serde_yaml::from_slice(content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Checks the semantic rules of an already decoded document, stopping at the
/// first violation.
pub fn validate(cfg: &TerraformConfiguration) -> Result<(), ValidationError> {
    if cfg.api_version != API_VERSION {
        return Err(ValidationError::InvalidVersion {
            found: cfg.api_version.clone(),
            expected: API_VERSION.to_string(),
        });
    }

    if cfg.kind != KIND {
        return Err(ValidationError::InvalidKind {
            found: cfg.kind.clone(),
            expected: KIND.to_string(),
        });
    }

    if !is_valid_name(&cfg.metadata.name) {
        return Err(ValidationError::InvalidName {
            name: cfg.metadata.name.clone(),
        });
    }

    Ok(())
}

/// Checks if a string is a valid DNS subdomain label.
pub fn is_valid_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LENGTH && RE_SUBDOMAIN_NAME.is_match(name)
}

// ============================================================================
// Tests
// ============================================================================
