//! Configuration catalog for pantalon.
//!
//! This module builds the catalog of configuration units in a repository:
//! - One `pantalon.yaml` per directory, found by walking from an explicit root
//! - Directories holding a configuration are not searched any deeper
//! - K8s-style header validation (`apiVersion`, `kind`, `metadata.name`)
//! - Reduction of each document to a [`ConfigurationItem`]

pub mod error;
pub mod loader;
pub mod resource;
pub mod validation;

pub use error::{CatalogError, Result, SchemaError, ValidationError};
pub use loader::{Catalog, CatalogLoader};
pub use resource::{
    ConfigurationItem, DiscoveredConfiguration, ObjectMeta, TerraformConfiguration, API_VERSION,
    KIND, SENTINEL_FILE,
};
pub use validation::{is_valid_name, parse_configuration, validate};
