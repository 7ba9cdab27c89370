//! Change-impact resolution.
//!
//! An item is impacted when a changed directory overlaps its own directory, or
//! overlaps one of its declared dependencies. Overlap is bidirectional: a change
//! inside the target and a change to one of its ancestors both count.

pub mod matcher;
pub mod resolver;

pub use matcher::{resolve_dependency, DependencyMatcher};
pub use resolver::{resolve, Impact, ImpactReason, ImpactResolver};
