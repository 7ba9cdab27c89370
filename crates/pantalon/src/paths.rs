//! Lexical helpers for the `/`-separated, root-relative paths used by the catalog
//! and the impact resolver.
//!
//! Nothing here touches the filesystem. Paths are compared segment by segment, so
//! `a/b` is a prefix of `a/b/c` but not of `a/bc`.

use std::path::{Component, Path};

/// The repository root.
pub const ROOT: &str = ".";

/// Converts a filesystem path into a normalized `/`-separated string.
pub fn to_slash(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => parts.push("..".to_string()),
            Component::CurDir => {}
            Component::RootDir => parts.push(String::new()),
            Component::Prefix(prefix) => parts.push(prefix.as_os_str().to_string_lossy().into_owned()),
        }
    }
    normalize(&parts.join("/"))
}

/// Lexically cleans a path: drops empty and `.` segments and folds `..` into
/// the preceding segment where one exists.
///
/// Returns `"."` for an empty result. A leading `/` is preserved and `..`
/// cannot climb above it.
pub fn normalize(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match stack.last() {
                Some(&last) if last != ".." => {
                    stack.pop();
                }
                _ if rooted => {}
                _ => stack.push(".."),
            },
            other => stack.push(other),
        }
    }

    let joined = stack.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ROOT.to_string(),
        (false, false) => joined,
    }
}

/// Joins `relative` onto `base` and normalizes the result.
pub fn join(base: &str, relative: &str) -> String {
    if base == ROOT || base.is_empty() {
        normalize(relative)
    } else {
        normalize(&format!("{}/{}", base, relative))
    }
}

/// Returns the directory containing `path`, or `"."` when it has none.
pub fn parent_dir(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent.to_string(),
        Some(_) => "/".to_string(),
        None => ROOT.to_string(),
    }
}

/// Splits a normalized path into its segments. The root has none.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ROOT)
        .collect()
}

/// True when `prefix` equals `path` or is one of its ancestors.
pub fn is_path_prefix(prefix: &str, path: &str) -> bool {
    if prefix == ROOT {
        return true;
    }
    if prefix == "/" {
        return path.starts_with('/');
    }
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Bidirectional containment between a changed directory and a target.
///
/// A root change overlaps everything.
pub fn overlaps(dir: &str, target: &str) -> bool {
    dir == ROOT || is_path_prefix(target, dir) || is_path_prefix(dir, target)
}

/// True for dependency paths written relative to the declaring directory.
pub fn is_relative_reference(path: &str) -> bool {
    path == "." || path == ".." || path.starts_with("./") || path.starts_with("../")
}

/// True when the path contains a `*` wildcard.
pub fn has_wildcard(path: &str) -> bool {
    path.contains('*')
}
