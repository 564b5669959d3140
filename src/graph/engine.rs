//! The dependency graph engine.
//!
//! Stores resources and their directed dependencies in a petgraph arena
//! and exposes the read-only [`GraphIndex`] contract the solvers consume.
//! Vertices and edges are addressed by `NodeIndex`/`EdgeIndex`, so cycles
//! in the analyzed graph never become cycles in the ownership graph.

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::types::{Dependency, Qualifier, Resource};

/// Read-only lookup over a dependency graph.
///
/// Supplied entirely by the caller and side-effect free: the engine
/// never mutates it, and lookups with indices the implementation issued
/// always succeed. The solvers, sorter and DSM builder are generic over
/// this trait.
pub trait GraphIndex {
    /// Outgoing dependency edges of a vertex.
    fn outgoing_edges(&self, vertex: NodeIndex) -> Vec<EdgeIndex>;

    /// Vertex by insertion position, if it exists.
    fn vertex_at(&self, position: usize) -> Option<NodeIndex>;

    /// Source and target of an edge.
    ///
    /// Like [`GraphIndex::dependency`], may panic on an edge index the
    /// implementation never issued.
    fn endpoints(&self, edge: EdgeIndex) -> (NodeIndex, NodeIndex);

    /// Edge payload.
    fn dependency(&self, edge: EdgeIndex) -> &Dependency;

    /// Vertex payload.
    fn resource(&self, vertex: NodeIndex) -> &Resource;
}

/// The standard [`GraphIndex`] implementation: a dependency graph plus
/// the containment tree linking each resource to its parent.
///
/// The dependency edges and the containment relation are independent —
/// a directory's files may depend on anything, but each file has exactly
/// one containing directory.
pub struct DependencyGraph {
    /// The directed graph storing resources and their dependencies.
    graph: DiGraph<Resource, Dependency>,
    /// Index: resource key -> node index.
    key_index: HashMap<String, NodeIndex>,
    /// Containment: child -> parent.
    parent_index: HashMap<NodeIndex, NodeIndex>,
    /// Containment: parent -> children, in insertion order.
    child_index: HashMap<NodeIndex, Vec<NodeIndex>>,
}

impl DependencyGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            key_index: HashMap::new(),
            parent_index: HashMap::new(),
            child_index: HashMap::new(),
        }
    }

    // ─── Construction ───────────────────────────────────────────

    /// Add a root resource. Returns the existing vertex if the key was
    /// already registered.
    pub fn add_resource(&mut self, resource: Resource) -> NodeIndex {
        if let Some(&idx) = self.key_index.get(&resource.key) {
            return idx;
        }
        let key = resource.key.clone();
        let idx = self.graph.add_node(resource);
        self.key_index.insert(key, idx);
        idx
    }

    /// Add a resource contained in `parent`. Returns the existing vertex
    /// if the key was already registered (containment is left untouched
    /// in that case).
    pub fn add_child_of(&mut self, parent: NodeIndex, resource: Resource) -> NodeIndex {
        if let Some(&idx) = self.key_index.get(&resource.key) {
            return idx;
        }
        let idx = self.add_resource(resource);
        self.parent_index.insert(idx, parent);
        self.child_index.entry(parent).or_default().push(idx);
        idx
    }

    /// Add a directed dependency edge between two resources.
    pub fn add_dependency(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        dependency: Dependency,
    ) -> EdgeIndex {
        let from_key = self.graph[from].key.as_str();
        let to_key = self.graph[to].key.as_str();
        debug!(from = from_key, to = to_key, weight = dependency.weight, "adding dependency");
        self.graph.add_edge(from, to, dependency)
    }

    // ─── Lookup ─────────────────────────────────────────────────

    /// Find a resource by its key.
    pub fn find(&self, key: &str) -> Option<NodeIndex> {
        self.key_index.get(key).copied()
    }

    /// Direct children of a resource, in insertion order.
    pub fn children_of(&self, parent: NodeIndex) -> &[NodeIndex] {
        self.child_index
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The containing resource, if any.
    pub fn parent_of(&self, vertex: NodeIndex) -> Option<NodeIndex> {
        self.parent_index.get(&vertex).copied()
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    // ─── Stats ──────────────────────────────────────────────────

    /// Summary counts over the whole graph.
    pub fn stats(&self) -> GraphStats {
        let total_weight = self
            .graph
            .edge_weights()
            .map(|d| u64::from(d.weight))
            .sum();
        GraphStats {
            resource_count: self.graph.node_count(),
            dependency_count: self.graph.edge_count(),
            total_weight,
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphIndex for DependencyGraph {
    fn outgoing_edges(&self, vertex: NodeIndex) -> Vec<EdgeIndex> {
        self.graph
            .edges_directed(vertex, Direction::Outgoing)
            .map(|e| e.id())
            .collect()
    }

    fn vertex_at(&self, position: usize) -> Option<NodeIndex> {
        if position < self.graph.node_count() {
            Some(NodeIndex::new(position))
        } else {
            None
        }
    }

    fn endpoints(&self, edge: EdgeIndex) -> (NodeIndex, NodeIndex) {
        // Edge indices come from this graph; a foreign index is a
        // caller bug, same as the indexing in `dependency` below.
        match self.graph.edge_endpoints(edge) {
            Some(pair) => pair,
            None => panic!("edge {} does not belong to this graph", edge.index()),
        }
    }

    fn dependency(&self, edge: EdgeIndex) -> &Dependency {
        &self.graph[edge]
    }

    fn resource(&self, vertex: NodeIndex) -> &Resource {
        &self.graph[vertex]
    }
}

/// Statistics about a dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub resource_count: usize,
    pub dependency_count: usize,
    /// Sum of all edge weights.
    pub total_weight: u64,
}
