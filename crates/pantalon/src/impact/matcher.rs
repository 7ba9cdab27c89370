//! Dependency paths resolved against their declaring directory.

use glob::{MatchOptions, Pattern};
use tracing::warn;

use crate::paths::{self, ROOT};

// `*` and `?` never cross a path separator.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Resolves a declared dependency to a root-relative path.
///
/// `./` and `../` references are joined onto `item_dir`; anything else is
/// already relative to the repository root.
pub fn resolve_dependency(item_dir: &str, dependency: &str) -> String {
    if paths::is_relative_reference(dependency) {
        paths::join(item_dir, dependency)
    } else {
        paths::normalize(dependency)
    }
}

/// One segment of a glob dependency.
#[derive(Debug, Clone)]
pub enum Segment {
    Literal(String),
    /// A segment holding `*`. The raw text also matches itself, so bracket
    /// characters in directory names keep working.
    Wildcard { raw: String, pattern: Option<Pattern> },
    /// `**`: any number of segments, including none.
    Recursive,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == "**" {
            return Segment::Recursive;
        }
        if !paths::has_wildcard(raw) {
            return Segment::Literal(raw.to_string());
        }
        let pattern = match Pattern::new(raw) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(segment = raw, error = %e, "Invalid glob segment, matching literally");
                None
            }
        };
        Segment::Wildcard {
            raw: raw.to_string(),
            pattern,
        }
    }

    fn is_literal(&self) -> bool {
        matches!(self, Segment::Literal(_))
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == segment,
            Segment::Wildcard { raw, pattern } => {
                raw == segment
                    || pattern
                        .as_ref()
                        .is_some_and(|p| p.matches_with(segment, MATCH_OPTIONS))
            }
            Segment::Recursive => true,
        }
    }
}

/// A compiled dependency of a configuration item.
#[derive(Debug, Clone)]
pub enum DependencyMatcher {
    /// A concrete directory.
    Exact(String),
    /// A shell-glob over directories.
    Glob {
        pattern: String,
        /// Directory before the first wildcard segment (`.` when the first
        /// segment already holds one).
        literal_prefix: String,
        segments: Vec<Segment>,
    },
}

impl DependencyMatcher {
    /// Resolves `dependency` against `item_dir` and compiles it.
    ///
    /// Only a `*` switches a dependency into glob mode.
    pub fn new(item_dir: &str, dependency: &str) -> Self {
        let resolved = resolve_dependency(item_dir, dependency);
        if !paths::has_wildcard(&resolved) {
            return DependencyMatcher::Exact(resolved);
        }

        let segments: Vec<Segment> = paths::segments(&resolved)
            .into_iter()
            .map(Segment::parse)
            .collect();
        let literal_prefix = literal_prefix(&resolved, &segments);

        DependencyMatcher::Glob {
            pattern: resolved,
            literal_prefix,
            segments,
        }
    }

    /// The resolved, root-relative dependency path.
    pub fn target(&self) -> &str {
        match self {
            DependencyMatcher::Exact(target) => target,
            DependencyMatcher::Glob { pattern, .. } => pattern,
        }
    }

    pub fn is_glob(&self) -> bool {
        matches!(self, DependencyMatcher::Glob { .. })
    }

    /// True when a change in `changed` impacts this dependency.
    ///
    /// Exact dependencies use plain overlap. A glob overlaps a changed
    /// directory that overlaps its literal prefix, or that matches the
    /// pattern (directly or from inside a matching path).
    pub fn overlaps(&self, changed: &str) -> bool {
        match self {
            DependencyMatcher::Exact(target) => paths::overlaps(changed, target),
            DependencyMatcher::Glob {
                pattern,
                literal_prefix,
                segments,
            } => {
                if paths::overlaps(changed, literal_prefix) {
                    return true;
                }
                if pattern.starts_with('/') != changed.starts_with('/') {
                    return false;
                }
                glob_matches(segments, &paths::segments(changed))
            }
        }
    }
}

fn literal_prefix(pattern: &str, segments: &[Segment]) -> String {
    let literal: Vec<&str> = segments
        .iter()
        .take_while(|segment| segment.is_literal())
        .filter_map(|segment| match segment {
            Segment::Literal(literal) => Some(literal.as_str()),
            _ => None,
        })
        .collect();

    match (literal.is_empty(), pattern.starts_with('/')) {
        (true, true) => "/".to_string(),
        (true, false) => ROOT.to_string(),
        (false, true) => format!("/{}", literal.join("/")),
        (false, false) => literal.join("/"),
    }
}

/// True when `changed` is a path the pattern matches or lies inside one.
fn glob_matches(pattern: &[Segment], changed: &[&str]) -> bool {
    match (pattern.split_first(), changed.split_first()) {
        (None, _) => true,
        (Some((Segment::Recursive, rest)), None) => glob_matches(rest, changed),
        (Some(_), None) => false,
        (Some((Segment::Recursive, rest)), Some((_, changed_rest))) => {
            glob_matches(rest, changed) || glob_matches(pattern, changed_rest)
        }
        (Some((segment, rest)), Some((head, changed_rest))) => {
            segment.matches(head) && glob_matches(rest, changed_rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dependency() {
        assert_eq!(
            resolve_dependency("environments/dev", "../../shared/vpc"),
            "shared/vpc"
        );
        assert_eq!(
            resolve_dependency("environments/dev", "./modules/"),
            "environments/dev/modules"
        );
        assert_eq!(resolve_dependency("environments/dev", "shared/vpc"), "shared/vpc");
        assert_eq!(resolve_dependency("environments/dev", ".."), "environments");
    }

    #[test]
    fn test_exact_overlap() {
        let matcher = DependencyMatcher::new("apps/web", "modules/shared");

        assert!(!matcher.is_glob());
        assert!(matcher.overlaps("modules/shared"));
        assert!(matcher.overlaps("modules/shared/vpc"));
        assert!(matcher.overlaps("modules"));
        assert!(!matcher.overlaps("modules/shared-two"));
        assert!(!matcher.overlaps("apps/web"));
    }

    #[test]
    fn test_glob_matches_single_segment() {
        let matcher = DependencyMatcher::new("apps/web", "modules/vpc-*");

        assert!(matcher.is_glob());
        assert!(matcher.overlaps("modules/vpc-east"));
        assert!(matcher.overlaps("modules/vpc-east/subnets"));
        assert!(!matcher.overlaps("other/vpc-east"));
    }

    #[test]
    fn test_glob_literal_prefix_is_plain_overlap() {
        let matcher = DependencyMatcher::new(".", "modules/*/main");

        // Anything below `modules` counts, matching the wildcard or not.
        assert!(matcher.overlaps("modules/vpc/main"));
        assert!(matcher.overlaps("modules/vpc/other"));
        assert!(matcher.overlaps("modules/a/b/main"));
        assert!(matcher.overlaps("modules/db"));
        assert!(matcher.overlaps("modules"));
        assert!(!matcher.overlaps("modulesx/vpc/main"));
        assert!(!matcher.overlaps("apps/vpc/main"));
    }

    #[test]
    fn test_glob_literal_prefix_ancestors_count() {
        let matcher = DependencyMatcher::new(".", "shared/modules/*");

        assert!(matcher.overlaps("shared/modules"));
        assert!(matcher.overlaps("shared"));
        assert!(matcher.overlaps("."));
        assert!(!matcher.overlaps("other"));
        assert!(!matcher.overlaps("shared/other"));
    }

    #[test]
    fn test_glob_in_first_segment_has_root_prefix() {
        let matcher = DependencyMatcher::new(".", "*/main");

        assert!(matcher.overlaps("anything"));
        assert!(matcher.overlaps("a/b/c"));
    }

    #[test]
    fn test_relative_glob() {
        let matcher = DependencyMatcher::new("envs/dev", "../../modules/*");

        assert_eq!(matcher.target(), "modules/*");
        assert!(matcher.overlaps("modules/vpc"));
        assert!(!matcher.overlaps("envs/modules/vpc"));
    }

    #[test]
    fn test_recursive_glob() {
        let matcher = DependencyMatcher::new(".", "modules/**/main");

        assert!(matcher.overlaps("modules/main"));
        assert!(matcher.overlaps("modules/a/b/main"));
        assert!(matcher.overlaps("modules/a/b/main/sub"));
    }

    #[test]
    fn test_recursive_glob_matching() {
        let segments: Vec<Segment> = ["modules", "**", "main"]
            .into_iter()
            .map(Segment::parse)
            .collect();

        assert!(glob_matches(&segments, &["modules", "main"]));
        assert!(glob_matches(&segments, &["modules", "a", "b", "main", "sub"]));
        assert!(!glob_matches(&segments, &["modules", "a", "b"]));
    }

    #[test]
    fn test_only_star_enters_glob_mode() {
        let matcher = DependencyMatcher::new(".", "modules/[legacy]");
        assert!(!matcher.is_glob());
        assert!(matcher.overlaps("modules/[legacy]"));
        assert!(!matcher.overlaps("modules/l"));

        let matcher = DependencyMatcher::new(".", "stacks/vpc-?");
        assert!(!matcher.is_glob());
        assert!(matcher.overlaps("stacks/vpc-?"));
        assert!(!matcher.overlaps("stacks/vpc-a"));
    }

    #[test]
    fn test_bracketed_wildcard_segment_matches_itself() {
        let segments = vec![Segment::parse("[legacy]-*")];

        assert!(glob_matches(&segments, &["l-east"]));
        assert!(glob_matches(&segments, &["[legacy]-*"]));
    }

    #[test]
    fn test_invalid_glob_segment_is_literal() {
        let segments = vec![Segment::parse("[abc-*")];

        assert!(glob_matches(&segments, &["[abc-*"]));
        assert!(!glob_matches(&segments, &["a-1"]));
    }
}
