//! K8s-style configuration documents and their reduced catalog items.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::paths;

/// The API version every configuration document must declare.
pub const API_VERSION: &str = "pantalon.kallan.dev/v1alpha1";

/// The only supported document kind.
pub const KIND: &str = "TerraformConfiguration";

/// File name that marks a directory as a configuration unit.
pub const SENTINEL_FILE: &str = "pantalon.yaml";

/// Metadata for a configuration, following K8s conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// The unique name of the configuration.
    #[serde(default)]
    pub name: String,
}

impl ObjectMeta {
    /// Creates a new ObjectMeta with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A `pantalon.yaml` document.
///
/// Header fields default to empty so that a missing `apiVersion` or `kind`
/// surfaces as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerraformConfiguration {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Free-form values handed to downstream tooling. Scalars are coerced to strings.
    #[serde(
        default,
        deserialize_with = "deserialize_context",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub context: BTreeMap<String, String>,

    /// Paths whose changes also impact this configuration.
    #[serde(
        default,
        deserialize_with = "deserialize_dependencies",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependencies: Vec<String>,
}

impl TerraformConfiguration {
    /// Creates a configuration with the expected header and the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta::new(name),
            context: BTreeMap::new(),
            dependencies: Vec::new(),
        }
    }

    /// Adds a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Appends a dependency path.
    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    /// Returns the name of the configuration.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

fn deserialize_context<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_yaml::Value;

    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    let mut context = BTreeMap::new();

    for (key, value) in raw.unwrap_or_default() {
        let value = match value {
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Null => String::new(),
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                return Err(D::Error::custom(format!(
                    "context value for '{}' must be a scalar",
                    key
                )));
            }
        };
        context.insert(key, value);
    }

    Ok(context)
}

fn deserialize_dependencies<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

/// A configuration along with the file it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredConfiguration {
    /// The configuration.
    pub configuration: TerraformConfiguration,
    /// The file path relative to the discovery root.
    pub path: PathBuf,
}

impl DiscoveredConfiguration {
    pub fn new(configuration: TerraformConfiguration, path: impl Into<PathBuf>) -> Self {
        Self {
            configuration,
            path: path.into(),
        }
    }
}

/// The reduced projection of a configuration that impact resolution works on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationItem {
    /// `metadata.name` of the source document.
    pub name: String,
    /// Root-relative path of the source document, `/`-separated.
    pub path: String,
    /// Directory containing `path`, `"."` for the root.
    pub dir: String,
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ConfigurationItem {
    /// Creates an item for the document at `path`, deriving its directory.
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        let path = paths::to_slash(path.as_ref());
        let dir = paths::parent_dir(&path);
        Self {
            name: name.into(),
            path,
            dir,
            context: BTreeMap::new(),
            dependencies: Vec::new(),
        }
    }

    /// Replaces the dependency list.
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

impl From<&DiscoveredConfiguration> for ConfigurationItem {
    fn from(discovered: &DiscoveredConfiguration) -> Self {
        let cfg = &discovered.configuration;
        ConfigurationItem {
            context: cfg.context.clone(),
            dependencies: cfg.dependencies.clone(),
            ..ConfigurationItem::new(cfg.metadata.name.clone(), &discovered.path)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_scalars_are_coerced() {
        let yaml = r#"
apiVersion: pantalon.kallan.dev/v1alpha1
kind: TerraformConfiguration
metadata:
  name: hello-world
context:
  foo: 1
  bar: b
  baz: true
  ratio: 0.5
  empty:
"#;
        let cfg: TerraformConfiguration = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.context.get("foo").map(String::as_str), Some("1"));
        assert_eq!(cfg.context.get("bar").map(String::as_str), Some("b"));
        assert_eq!(cfg.context.get("baz").map(String::as_str), Some("true"));
        assert_eq!(cfg.context.get("ratio").map(String::as_str), Some("0.5"));
        assert_eq!(cfg.context.get("empty").map(String::as_str), Some(""));
    }

    #[test]
    fn test_context_rejects_nested_values() {
        let yaml = r#"
apiVersion: pantalon.kallan.dev/v1alpha1
kind: TerraformConfiguration
metadata:
  name: hello-world
context:
  nested:
    key: value
"#;
        let err = serde_yaml::from_str::<TerraformConfiguration>(yaml).unwrap_err();
        assert!(err.to_string().contains("must be a scalar"));
    }

    #[test]
    fn test_missing_optional_sections_are_empty() {
        let yaml = r#"
apiVersion: pantalon.kallan.dev/v1alpha1
kind: TerraformConfiguration
metadata:
  name: hello-world
dependencies:
"#;
        let cfg: TerraformConfiguration = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.context.is_empty());
        assert!(cfg.dependencies.is_empty());
    }

    #[test]
    fn test_item_from_discovered_configuration() {
        let cfg = TerraformConfiguration::new("app1")
            .with_context("env", "dev")
            .with_dependency("shared/vpc");
        let discovered = DiscoveredConfiguration::new(cfg, "apps/app1/pantalon.yaml");

        let item = ConfigurationItem::from(&discovered);

        assert_eq!(item.name, "app1");
        assert_eq!(item.path, "apps/app1/pantalon.yaml");
        assert_eq!(item.dir, "apps/app1");
        assert_eq!(item.context.get("env").map(String::as_str), Some("dev"));
        assert_eq!(item.dependencies, vec!["shared/vpc".to_string()]);
    }

    #[test]
    fn test_item_at_root_has_dot_dir() {
        let item = ConfigurationItem::new("root", "pantalon.yaml");
        assert_eq!(item.dir, ".");
    }

    #[test]
    fn test_item_serializes_empty_collections() {
        let item = ConfigurationItem::new("item1", "a/pantalon.yaml");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "item1",
                "path": "a/pantalon.yaml",
                "dir": "a",
                "context": {},
                "dependencies": []
            })
        );
    }
}
