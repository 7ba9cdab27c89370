//! Run configuration and the library entry point used by the binary.

use std::path::PathBuf;

use tracing::info;

use crate::catalog::{CatalogLoader, SENTINEL_FILE};
use crate::changed::ChangedSource;
use crate::error::Result;
use crate::impact::ImpactResolver;
use crate::output::{self, OutputFormat};

/// Everything a single invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Repository root the catalog is built from.
    pub root: PathBuf,
    /// How the result is rendered.
    pub format: OutputFormat,
    /// Changed directories to resolve against. `None` means nothing changed.
    pub changed: Option<ChangedSource>,
    /// Skip resolution and return the whole catalog.
    pub list_all: bool,
    /// File name marking a configuration directory.
    pub sentinel: String,
}

impl RunConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            format: OutputFormat::default(),
            changed: None,
            list_all: false,
            sentinel: SENTINEL_FILE.to_string(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_changed(mut self, changed: ChangedSource) -> Self {
        self.changed = Some(changed);
        self
    }

    pub fn with_list_all(mut self, list_all: bool) -> Self {
        self.list_all = list_all;
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }
}

/// Builds the catalog, filters it by the changed directories (or keeps all of
/// it when `list_all` is set), and renders the result.
///
/// The changed-directory input is read before the tree is walked so that bad
/// input fails fast. Absent input resolves against nothing changed.
pub fn run(config: &RunConfig) -> Result<String> {
    let changed = match &config.changed {
        Some(source) if !config.list_all => source.load()?,
        _ => Vec::new(),
    };

    let catalog = CatalogLoader::new(&config.root)
        .with_sentinel(config.sentinel.as_str())
        .load()?;
    let items = catalog.items();

    let selected = if config.list_all {
        info!(count = items.len(), "Listing all configurations");
        items
    } else {
        ImpactResolver::new(&items).resolve(&changed)
    };

    Ok(output::render(&selected, config.format)?)
}
