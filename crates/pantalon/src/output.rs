//! Rendering of configuration items for downstream CI tooling.

use thiserror::Error;

use crate::catalog::ConfigurationItem;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// Single-line JSON array.
    JsonCompact,
    /// YAML sequence.
    Yaml,
    /// One item directory per line.
    List,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonCompact => write!(f, "json-compact"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::List => write!(f, "list"),
        }
    }
}

/// Renders `items` in the given format, without a trailing newline.
pub fn render(items: &[ConfigurationItem], format: OutputFormat) -> Result<String, OutputError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(items)?,
        OutputFormat::JsonCompact => serde_json::to_string(items)?,
        OutputFormat::Yaml => serde_yaml::to_string(items)?
            .trim_end_matches('\n')
            .to_string(),
        OutputFormat::List => items
            .iter()
            .map(|item| item.dir.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}
