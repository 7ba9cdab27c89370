//! Discovers and loads `pantalon.yaml` files below a root directory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::error::{CatalogError, Result};
use super::resource::{
    ConfigurationItem, DiscoveredConfiguration, TerraformConfiguration, SENTINEL_FILE,
};
use super::validation::parse_configuration;

/// All configurations found below a root, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub configurations: Vec<DiscoveredConfiguration>,
}

impl Catalog {
    /// Reduces every configuration to a [`ConfigurationItem`].
    pub fn items(&self) -> Vec<ConfigurationItem> {
        self.configurations
            .iter()
            .map(ConfigurationItem::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

/// Configuration loader rooted at an explicit directory.
pub struct CatalogLoader {
    /// Directory the walk starts from.
    root: PathBuf,
    /// File name that marks a configuration directory.
    sentinel: String,
}

impl CatalogLoader {
    /// Creates a loader for the given root using the default sentinel file name.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sentinel: SENTINEL_FILE.to_string(),
        }
    }

    /// Overrides the sentinel file name.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the sentinel file name.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Finds every sentinel file below the root.
    ///
    /// Directories are visited in lexical order. Once a directory holds a
    /// sentinel file its subtree is not searched any further. Returned paths
    /// are relative to the root.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| CatalogError::Walk {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source: e,
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }

            let candidate = entry.path().join(&self.sentinel);
            match fs::metadata(&candidate) {
                Ok(meta) if meta.is_file() => {
                    let relative = candidate
                        .strip_prefix(&self.root)
                        .unwrap_or(&candidate)
                        .to_path_buf();
                    debug!(path = %relative.display(), "Found configuration file");
                    found.push(relative);
                    walker.skip_current_dir();
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(CatalogError::Stat {
                        path: candidate,
                        source: e,
                    });
                }
            }
        }

        Ok(found)
    }

    /// Discovers, parses and validates every configuration below the root.
    ///
    /// The first invalid document aborts the load.
    pub fn load(&self) -> Result<Catalog> {
        let mut configurations = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for relative in self.discover()? {
            let configuration = match self.load_file(&self.root.join(&relative)) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("Failed to load {}: {}", relative.display(), e);
                    return Err(e);
                }
            };

            if let Some(first) = seen.get(configuration.name()) {
                return Err(CatalogError::DuplicateName {
                    name: configuration.name().to_string(),
                    first: first.clone(),
                    second: relative,
                });
            }
            seen.insert(configuration.name().to_string(), relative.clone());

            configurations.push(DiscoveredConfiguration::new(configuration, relative));
        }

        info!(
            root = %self.root.display(),
            count = configurations.len(),
            "Loaded configuration catalog"
        );

        Ok(Catalog { configurations })
    }

    /// Reads and validates a single configuration file.
    pub fn load_file(&self, path: &Path) -> Result<TerraformConfiguration> {
        let content = fs::read(path).map_err(|e| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        parse_configuration(&content).map_err(|e| CatalogError::InvalidConfiguration {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
