//! Changed-directory input, typically produced by a diff tool as a JSON array.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Message attached to every changed entry that looks like a file.
pub const NOT_A_DIRECTORY: &str = "changed file is not a directory";

#[derive(Error, Debug)]
pub enum ChangedInputError {
    #[error("Failed to parse changed directories: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{}", not_directories_message(.0))]
    NotDirectories(Vec<String>),

    #[error("Failed to read changed directories from '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn not_directories_message(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| format!("{}: {}", p, NOT_A_DIRECTORY))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, ChangedInputError>;

/// Where the changed-directory list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangedSource {
    /// JSON passed directly on the command line.
    Inline(String),
    /// A file holding the JSON.
    File(PathBuf),
    /// JSON read from standard input.
    Stdin,
}

impl ChangedSource {
    /// Builds a source from a file argument, treating `-` as stdin.
    pub fn from_file_arg(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.as_os_str() == "-" {
            ChangedSource::Stdin
        } else {
            ChangedSource::File(path)
        }
    }

    /// Reads and parses the changed directories.
    pub fn load(&self) -> Result<Vec<String>> {
        match self {
            ChangedSource::Inline(json) => parse_changed_dirs(json),
            ChangedSource::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| ChangedInputError::Read {
                    path: path.clone(),
                    source: e,
                })?;
                parse_changed_dirs(&json)
            }
            ChangedSource::Stdin => {
                let mut json = String::new();
                io::stdin()
                    .read_to_string(&mut json)
                    .map_err(|e| ChangedInputError::Read {
                        path: PathBuf::from("-"),
                        source: e,
                    })?;
                parse_changed_dirs(&json)
            }
        }
    }
}

/// Parses a JSON array of changed directories.
///
/// Blank input means nothing changed. Entries that look like files are
/// collected and reported together.
pub fn parse_changed_dirs(json: &str) -> Result<Vec<String>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let paths: Vec<String> = serde_json::from_str(json)?;

    let not_directories: Vec<String> = paths
        .iter()
        .filter(|p| !is_directory_path(p))
        .cloned()
        .collect();
    if !not_directories.is_empty() {
        return Err(ChangedInputError::NotDirectories(not_directories));
    }

    debug!(count = paths.len(), "Parsed changed directories");
    Ok(paths)
}

/// A changed entry is taken to be a directory when it is the root or its last
/// segment has no extension.
pub fn is_directory_path(path: &str) -> bool {
    path == "." || Path::new(path).extension().is_none()
}
