//! Dependency graph model — the structural backbone of tanglegraph.
//!
//! Provides the resource/dependency value types, the petgraph-backed
//! arena, and the read-only index contract consumed by the solvers.

pub mod engine;
pub mod types;

pub use engine::{DependencyGraph, GraphIndex, GraphStats};
pub use types::{Dependency, Qualifier, Resource};
