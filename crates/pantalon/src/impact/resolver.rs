//! Selects the configuration items impacted by a set of changed directories.

use tracing::{debug, info};

use super::matcher::DependencyMatcher;
use crate::catalog::ConfigurationItem;
use crate::paths;

/// Why an item was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpactReason {
    /// The changed directory overlaps the item's own directory.
    Direct { changed: String },
    /// The changed directory overlaps one of the item's dependencies.
    Dependency { changed: String, dependency: String },
}

impl std::fmt::Display for ImpactReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactReason::Direct { changed } => write!(f, "changed '{}'", changed),
            ImpactReason::Dependency {
                changed,
                dependency,
            } => write!(f, "dependency '{}' changed '{}'", dependency, changed),
        }
    }
}

/// An impacted item and the first rule that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Impact<'a> {
    pub item: &'a ConfigurationItem,
    pub reason: ImpactReason,
}

/// An item with its dependencies resolved and compiled.
#[derive(Debug)]
struct Entry<'a> {
    item: &'a ConfigurationItem,
    dir: String,
    dependencies: Vec<(&'a str, DependencyMatcher)>,
}

/// Resolver over an immutable catalog.
///
/// Dependencies are compiled once in [`ImpactResolver::new`] so the same
/// resolver can answer many change sets.
#[derive(Debug)]
pub struct ImpactResolver<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> ImpactResolver<'a> {
    pub fn new(items: &'a [ConfigurationItem]) -> Self {
        let entries = items
            .iter()
            .map(|item| {
                let dir = paths::normalize(&item.dir);
                let dependencies = item
                    .dependencies
                    .iter()
                    .map(|dep| (dep.as_str(), DependencyMatcher::new(&dir, dep)))
                    .collect();
                Entry {
                    item,
                    dir,
                    dependencies,
                }
            })
            .collect();

        Self { entries }
    }

    /// Returns every impacted item in catalog order, each at most once, along
    /// with the reason it was selected.
    pub fn impacts<S: AsRef<str>>(&self, changed_dirs: &[S]) -> Vec<Impact<'a>> {
        let changed: Vec<String> = changed_dirs
            .iter()
            .map(|dir| paths::normalize(dir.as_ref()))
            .collect();

        let impacts: Vec<Impact<'a>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let reason = Self::match_entry(entry, &changed)?;
                debug!(name = %entry.item.name, %reason, "Configuration impacted");
                Some(Impact {
                    item: entry.item,
                    reason,
                })
            })
            .collect();

        info!(
            changed = changed.len(),
            impacted = impacts.len(),
            total = self.entries.len(),
            "Resolved impacted configurations"
        );

        impacts
    }

    /// Returns copies of the impacted items in catalog order.
    pub fn resolve<S: AsRef<str>>(&self, changed_dirs: &[S]) -> Vec<ConfigurationItem> {
        self.impacts(changed_dirs)
            .into_iter()
            .map(|impact| impact.item.clone())
            .collect()
    }

    fn match_entry(entry: &Entry<'a>, changed: &[String]) -> Option<ImpactReason> {
        for dir in changed {
            if paths::overlaps(dir, &entry.dir) {
                return Some(ImpactReason::Direct {
                    changed: dir.clone(),
                });
            }

            if let Some((dependency, _)) = entry
                .dependencies
                .iter()
                .find(|(_, matcher)| matcher.overlaps(dir))
            {
                return Some(ImpactReason::Dependency {
                    changed: dir.clone(),
                    dependency: dependency.to_string(),
                });
            }
        }
        None
    }
}

/// Filters `items` down to those impacted by `changed_dirs`.
///
/// Catalog order is preserved and each item appears at most once. An empty
/// change set selects nothing; `"."` selects everything.
pub fn resolve<S: AsRef<str>>(
    items: &[ConfigurationItem],
    changed_dirs: &[S],
) -> Vec<ConfigurationItem> {
    ImpactResolver::new(items).resolve(changed_dirs)
}

// ============================================================================
// Tests
// ============================================================================
