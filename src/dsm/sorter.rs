//! Topological ordering of a scope with feedback edges masked.
//!
//! Kahn's algorithm over the logically-acyclic remainder: in-degrees over
//! the non-feedback, non-self in-scope edges, then repeated extraction of
//! the zero-in-degree vertex that appears earliest in the original scope
//! order. The position tie-break makes the order fully deterministic.

use petgraph::graph::{EdgeIndex, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::error::{Result, TangleError};
use crate::graph::GraphIndex;

/// Orders `scope` so that for every non-feedback edge (u -> v), u comes
/// strictly before v.
///
/// Returns [`TangleError::CycleRemains`] if the masked graph still holds a
/// cycle — possible only with a feedback set that does not cover every
/// cycle of the scope.
pub fn topological_order<G: GraphIndex>(
    graph: &G,
    scope: &[NodeIndex],
    feedback: &HashSet<EdgeIndex>,
) -> Result<Vec<NodeIndex>> {
    let members: HashSet<NodeIndex> = scope.iter().copied().collect();
    let mut in_degree: HashMap<NodeIndex, usize> =
        scope.iter().map(|&v| (v, 0)).collect();
    let mut successors: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();

    for &from in scope {
        for edge in graph.outgoing_edges(from) {
            let (_, to) = graph.endpoints(edge);
            if !members.contains(&to) || feedback.contains(&edge) || to == from {
                continue;
            }
            *in_degree.entry(to).or_insert(0) += 1;
            successors.entry(from).or_default().push(to);
        }
    }

    let mut order = Vec::with_capacity(scope.len());
    let mut placed: HashSet<NodeIndex> = HashSet::new();

    while order.len() < scope.len() {
        // Earliest scope position with no remaining predecessors.
        let next = scope
            .iter()
            .copied()
            .find(|v| !placed.contains(v) && in_degree[v] == 0);
        let Some(vertex) = next else {
            return Err(TangleError::CycleRemains {
                remaining: scope.len() - order.len(),
            });
        };
        placed.insert(vertex);
        order.push(vertex);
        for succ in successors.get(&vertex).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(succ) {
                *degree = degree.saturating_sub(1);
            }
        }
    }
    Ok(order)
}
