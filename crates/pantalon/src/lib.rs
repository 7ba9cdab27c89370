pub mod catalog;
pub mod changed;
pub mod config;
pub mod error;
pub mod impact;
pub mod logging;
pub mod output;
pub mod paths;

pub use catalog::{Catalog, CatalogError, CatalogLoader, ConfigurationItem, TerraformConfiguration};
pub use changed::{parse_changed_dirs, ChangedInputError, ChangedSource};
pub use config::{run, RunConfig};
pub use error::{PantalonError, Result};
pub use impact::{resolve, Impact, ImpactReason, ImpactResolver};
pub use output::{render, OutputFormat};
