//! Core types for the dependency graph.
//!
//! Defines resource qualifiers and the vertex/edge payloads stored in the
//! graph arena. Resources are supplied by the caller; the engine never
//! creates or destroys them on its own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The structural kind of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    /// A source file.
    File,
    /// A class inside a file.
    Class,
    /// A package (logical grouping of classes).
    Package,
    /// A directory on disk.
    Directory,
    /// A module / sub-project of a multi-module build.
    Module,
    /// A top-level project.
    Project,
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::File => write!(f, "file"),
            Qualifier::Class => write!(f, "class"),
            Qualifier::Package => write!(f, "package"),
            Qualifier::Directory => write!(f, "directory"),
            Qualifier::Module => write!(f, "module"),
            Qualifier::Project => write!(f, "project"),
        }
    }
}

/// A vertex payload: one code-structure element.
///
/// Containment (which resource is inside which) lives in the graph's
/// side indexes, not here, so the payload stays a plain value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Stable identifier, unique within a graph (e.g. a path or UUID).
    pub key: String,
    /// Human-readable display name.
    pub name: String,
    /// What kind of element this is.
    pub qualifier: Qualifier,
}

impl Resource {
    pub fn new(key: impl Into<String>, name: impl Into<String>, qualifier: Qualifier) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            qualifier,
        }
    }
}

/// An edge payload: a directed reference between two resources.
///
/// `weight` counts the underlying references. Parallel edges between the
/// same pair are kept as-is; callers pre-aggregate if they want one edge
/// per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// Stable identifier of the dependency.
    pub key: String,
    /// Number of underlying references (positive).
    pub weight: u32,
    /// Free-form classification label, opaque to the engine.
    pub usage: String,
}

impl Dependency {
    /// A dependency with the default "uses" label.
    pub fn new(key: impl Into<String>, weight: u32) -> Self {
        Self {
            key: key.into(),
            weight,
            usage: "uses".to_string(),
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_display() {
        assert_eq!(Qualifier::Directory.to_string(), "directory");
        assert_eq!(Qualifier::Project.to_string(), "project");
    }

    #[test]
    fn test_dependency_defaults_to_uses() {
        let dep = Dependency::new("a->b", 3);
        assert_eq!(dep.usage, "uses");
        assert_eq!(dep.weight, 3);

        let dep = Dependency::new("a->b", 1).with_usage("extends");
        assert_eq!(dep.usage, "extends");
    }
}
