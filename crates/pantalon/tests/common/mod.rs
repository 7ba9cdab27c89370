//! Shared test utilities for pantalon integration tests.
//!
//! This module provides:
//! - Paths to the checked-in fixture repositories
//! - `RepoBuilder` for laying out throwaway repositories programmatically

#![allow(dead_code)]

use std::path::PathBuf;

use assert_fs::prelude::*;
use assert_fs::TempDir;

use pantalon::catalog::{API_VERSION, KIND, SENTINEL_FILE};

/// Root of a fixture repository under `tests/fixtures/terraform`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/terraform")
        .join(name)
}

/// Root of a fixture repository under `tests/fixtures/invalid`.
pub fn invalid_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/invalid")
        .join(name)
}

/// Builder for temporary repositories holding `pantalon.yaml` files.
pub struct RepoBuilder {
    dir: TempDir,
}

impl RepoBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Adds a valid configuration in `dir` with the given dependencies.
    pub fn config(self, dir: &str, name: &str, dependencies: &[&str]) -> Self {
        let mut doc = format!(
            "apiVersion: {}\nkind: {}\nmetadata:\n  name: {}\n",
            API_VERSION, KIND, name
        );
        if !dependencies.is_empty() {
            doc.push_str("dependencies:\n");
            for dep in dependencies {
                doc.push_str(&format!("  - \"{}\"\n", dep));
            }
        }
        self.raw(&format!("{}/{}", dir, SENTINEL_FILE), &doc)
    }

    /// Writes an arbitrary file.
    pub fn raw(self, path: &str, content: &str) -> Self {
        self.dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Creates an empty directory.
    pub fn empty_dir(self, path: &str) -> Self {
        self.dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Finishes the repository. The directory lives as long as the returned handle.
    pub fn build(self) -> TempDir {
        self.dir
    }
}
