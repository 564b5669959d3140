//! Analysis scope policies.
//!
//! A policy decides whether a parent resource gets analyzed at all, and
//! which of its children form the vertex set. The two variants mirror the
//! two levels a multi-module build is analyzed at: sub-modules of a
//! project, and directories of a module.

use petgraph::graph::NodeIndex;

use crate::graph::{DependencyGraph, GraphIndex, Qualifier};

/// Strategy selecting the vertex set S for a parent resource.
///
/// `Sync` so policies can drive parallel batch analysis.
pub trait ScopePolicy: Sync {
    /// Stable identifier, distinct per policy. Cached reports are keyed
    /// by it, since two policies can select different vertex sets under
    /// the same parent.
    fn name(&self) -> &'static str;

    /// Whether this parent resource should be analyzed at all.
    fn should_analyze(&self, graph: &DependencyGraph, parent: NodeIndex) -> bool;

    /// The vertices to analyze beneath the parent, in child order.
    fn scope(&self, graph: &DependencyGraph, parent: NodeIndex) -> Vec<NodeIndex>;
}

/// Project-level analysis: S = the project's direct sub-modules.
pub struct ProjectScope;

impl ScopePolicy for ProjectScope {
    fn name(&self) -> &'static str {
        "project"
    }

    fn should_analyze(&self, graph: &DependencyGraph, parent: NodeIndex) -> bool {
        graph.resource(parent).qualifier == Qualifier::Project
    }

    fn scope(&self, graph: &DependencyGraph, parent: NodeIndex) -> Vec<NodeIndex> {
        graph
            .children_of(parent)
            .iter()
            .copied()
            .filter(|&c| {
                matches!(
                    graph.resource(c).qualifier,
                    Qualifier::Module | Qualifier::Project
                )
            })
            .collect()
    }
}

/// Module-level analysis: S = the module's direct child directories.
///
/// A project without sub-modules is its own module and qualifies too; the
/// root of a multi-module build does not — its directories belong to the
/// modules.
pub struct SubProjectScope;

impl ScopePolicy for SubProjectScope {
    fn name(&self) -> &'static str {
        "sub_project"
    }

    fn should_analyze(&self, graph: &DependencyGraph, parent: NodeIndex) -> bool {
        match graph.resource(parent).qualifier {
            Qualifier::Module => true,
            Qualifier::Project => graph
                .children_of(parent)
                .iter()
                .all(|&c| graph.resource(c).qualifier != Qualifier::Module),
            _ => false,
        }
    }

    fn scope(&self, graph: &DependencyGraph, parent: NodeIndex) -> Vec<NodeIndex> {
        graph
            .children_of(parent)
            .iter()
            .copied()
            .filter(|&c| graph.resource(c).qualifier == Qualifier::Directory)
            .collect()
    }
}
