//! Cycle discovery.
//!
//! Two solvers share one contract: the exhaustive detector enumerates
//! every elementary cycle of a vertex scope by depth-first search, and the
//! incremental solver discovers the same cycles edge-by-edge, which keeps
//! large, mostly-acyclic scopes cheap. Both report identical cycle sets;
//! the exhaustive detector is the reference semantics.

pub mod detector;
pub mod incremental;

pub use detector::CycleDetector;
pub use incremental::IncrementalCycleSolver;

use petgraph::graph::EdgeIndex;

use crate::fes::FeedbackEdgeSet;

/// An elementary cycle: a closed walk through distinct vertices,
/// represented by its edge chain. Each edge's target is the next edge's
/// source, and the last edge returns to the first edge's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    edges: Vec<EdgeIndex>,
}

impl Cycle {
    /// A cycle over a non-empty edge chain.
    pub fn new(edges: Vec<EdgeIndex>) -> Self {
        debug_assert!(!edges.is_empty(), "a cycle has at least one edge");
        Self { edges }
    }

    /// The edge chain, in walk order.
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// Number of edges (= number of vertices) on the cycle.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the cycle runs through the given edge.
    pub fn contains(&self, edge: EdgeIndex) -> bool {
        self.edges.contains(&edge)
    }
}

/// Common contract of the two cycle solvers.
///
/// Callers pick the implementation by expected scope size: the exhaustive
/// [`CycleDetector`] for small scopes, the [`IncrementalCycleSolver`] for
/// larger ones. Externally observable results must agree.
pub trait CycleSolver {
    /// Run detection and return the elementary cycles of the scope.
    fn solve(&mut self) -> &[Cycle];

    /// A feedback edge set maintained by the solver itself, if any.
    ///
    /// Solvers returning `None` leave feedback-edge selection to
    /// [`crate::fes::MinimumFeedbackEdgeSetSolver`].
    fn feedback_edges(&self) -> Option<&FeedbackEdgeSet> {
        None
    }
}
