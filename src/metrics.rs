//! Scalar tangle metrics.
//!
//! The tangle index normalizes the weight of the feedback edge set against
//! the total edge weight of the scope. The factor of 2 reflects that a
//! feedback edge and the forward edge it conflicts with both count toward
//! the tangle relationship.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cycles::Cycle;
use crate::fes::FeedbackEdgeSet;
use crate::graph::GraphIndex;

/// The scalar outputs of one analyzed scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeMetrics {
    /// Number of elementary cycles discovered.
    pub cycle_count: usize,
    /// Number of edges selected into the feedback set.
    pub feedback_edge_count: usize,
    /// Total weight of the feedback set — the dependencies to cut.
    pub tangles: u64,
    /// Sum of the weights of every edge in the induced subgraph.
    pub edges_weight: u64,
    /// Percentage of entangled weight, 0 when the scope has no edges.
    pub tangle_index: f64,
}

impl ScopeMetrics {
    pub fn compute(cycles: &[Cycle], feedback: &FeedbackEdgeSet, edges_weight: u64) -> Self {
        let tangles = feedback.total_weight();
        Self {
            cycle_count: cycles.len(),
            feedback_edge_count: feedback.len(),
            tangles,
            edges_weight,
            tangle_index: tangle_index(tangles, edges_weight),
        }
    }
}

/// `2 * tangles / edges_weight * 100`, defined as 0 on an edge-less scope.
pub fn tangle_index(tangles: u64, edges_weight: u64) -> f64 {
    if edges_weight == 0 {
        0.0
    } else {
        tangles as f64 * 2.0 / edges_weight as f64 * 100.0
    }
}

/// Sum of the weights of the induced subgraph's edges.
pub fn edges_weight<G: GraphIndex>(graph: &G, scope: &[NodeIndex]) -> u64 {
    let members: HashSet<NodeIndex> = scope.iter().copied().collect();
    scope
        .iter()
        .flat_map(|&v| graph.outgoing_edges(v))
        .filter(|&e| {
            let (_, to) = graph.endpoints(e);
            members.contains(&to)
        })
        .map(|e| u64::from(graph.dependency(e).weight))
        .sum()
}
