//! Exhaustive elementary-cycle detection.
//!
//! Depth-first enumeration from each vertex of the scope. After a start
//! vertex's subtree is exhausted the vertex becomes ineligible, so the
//! same cycle is never re-discovered rotated from a later start. Worst
//! case is exponential in the number of simple cycles of the induced
//! subgraph; callers with large scopes use the incremental solver instead.

use petgraph::graph::{EdgeIndex, NodeIndex};
use std::collections::HashSet;
use tracing::debug;

use super::{Cycle, CycleSolver};
use crate::graph::GraphIndex;

/// Enumerates every elementary cycle within a vertex scope.
///
/// Edges with an endpoint outside the scope are treated as absent from
/// the induced subgraph.
pub struct CycleDetector<'g, G> {
    graph: &'g G,
    scope: Vec<NodeIndex>,
    members: HashSet<NodeIndex>,
    cycles: Vec<Cycle>,
    solved: bool,
}

impl<'g, G: GraphIndex> CycleDetector<'g, G> {
    pub fn new(graph: &'g G, scope: &[NodeIndex]) -> Self {
        Self {
            graph,
            scope: scope.to_vec(),
            members: scope.iter().copied().collect(),
            cycles: Vec::new(),
            solved: false,
        }
    }

    /// Run detection and consume the detector, returning the cycles.
    pub fn into_cycles(mut self) -> Vec<Cycle> {
        self.solve();
        self.cycles
    }

    fn detect(&mut self) {
        let mut analyzed: HashSet<NodeIndex> = HashSet::new();
        for i in 0..self.scope.len() {
            let start = self.scope[i];
            let mut on_path = HashSet::new();
            on_path.insert(start);
            self.search(start, start, &mut Vec::new(), &mut on_path, &analyzed);
            // Every cycle through this vertex is now known.
            analyzed.insert(start);
        }
        debug!(
            scope = self.scope.len(),
            cycles = self.cycles.len(),
            "exhaustive cycle detection done"
        );
    }

    fn search(
        &mut self,
        current: NodeIndex,
        start: NodeIndex,
        path: &mut Vec<EdgeIndex>,
        on_path: &mut HashSet<NodeIndex>,
        analyzed: &HashSet<NodeIndex>,
    ) {
        for edge in self.graph.outgoing_edges(current) {
            let (_, target) = self.graph.endpoints(edge);
            if !self.members.contains(&target) || analyzed.contains(&target) {
                continue;
            }
            if target == start {
                // Walk closed on its start: record the edge chain.
                let mut edges = path.clone();
                edges.push(edge);
                self.cycles.push(Cycle::new(edges));
            } else if !on_path.contains(&target) {
                path.push(edge);
                on_path.insert(target);
                self.search(target, start, path, on_path, analyzed);
                on_path.remove(&target);
                path.pop();
            }
            // Re-entering the path anywhere but the start would make the
            // walk non-elementary: discard.
        }
    }
}

impl<G: GraphIndex> CycleSolver for CycleDetector<'_, G> {
    fn solve(&mut self) -> &[Cycle] {
        if !self.solved {
            self.detect();
            self.solved = true;
        }
        &self.cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Dependency, DependencyGraph, Qualifier, Resource};

    fn graph_with(names: &[&str]) -> (DependencyGraph, Vec<NodeIndex>) {
        let mut graph = DependencyGraph::new();
        let vertices = names
            .iter()
            .map(|n| graph.add_resource(Resource::new(*n, *n, Qualifier::File)))
            .collect();
        (graph, vertices)
    }

    fn link(graph: &mut DependencyGraph, from: NodeIndex, to: NodeIndex) {
        let key = format!("{}->{}", from.index(), to.index());
        graph.add_dependency(from, to, Dependency::new(key, 1));
    }

    #[test]
    fn test_three_cycle_found_once() {
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1]);
        link(&mut graph, v[1], v[2]);
        link(&mut graph, v[2], v[0]);

        let cycles = CycleDetector::new(&graph, &v).into_cycles();
        assert_eq!(cycles.len(), 1, "one ring, one cycle");
        assert_eq!(cycles[0].len(), 3);
    }

    #[test]
    fn test_cycle_edges_form_closed_walk() {
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1]);
        link(&mut graph, v[1], v[2]);
        link(&mut graph, v[2], v[0]);

        let cycles = CycleDetector::new(&graph, &v).into_cycles();
        let edges = cycles[0].edges();
        for pair in edges.windows(2) {
            let (_, to) = graph.endpoints(pair[0]);
            let (from, _) = graph.endpoints(pair[1]);
            assert_eq!(to, from, "consecutive edges must chain");
        }
        let (first_from, _) = graph.endpoints(edges[0]);
        let (_, last_to) = graph.endpoints(edges[edges.len() - 1]);
        assert_eq!(first_from, last_to, "walk must return to its start");
    }

    #[test]
    fn test_two_overlapping_cycles() {
        // a <-> b and b <-> c share vertex b.
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1]);
        link(&mut graph, v[1], v[0]);
        link(&mut graph, v[1], v[2]);
        link(&mut graph, v[2], v[1]);

        let cycles = CycleDetector::new(&graph, &v).into_cycles();
        assert_eq!(cycles.len(), 2);
        assert!(cycles.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_nested_cycles_all_elementary() {
        // Ring a->b->c->a plus chord a->c: two elementary cycles.
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1]);
        link(&mut graph, v[1], v[2]);
        link(&mut graph, v[2], v[0]);
        link(&mut graph, v[0], v[2]);

        let cycles = CycleDetector::new(&graph, &v).into_cycles();
        assert_eq!(cycles.len(), 2);
        let mut lengths: Vec<usize> = cycles.iter().map(Cycle::len).collect();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![2, 3]);
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let (mut graph, v) = graph_with(&["a"]);
        link(&mut graph, v[0], v[0]);

        let cycles = CycleDetector::new(&graph, &v).into_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 1);
    }

    #[test]
    fn test_edges_leaving_scope_ignored() {
        // Cycle a->b->a plus b->c->b, but c is outside the scope.
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1]);
        link(&mut graph, v[1], v[0]);
        link(&mut graph, v[1], v[2]);
        link(&mut graph, v[2], v[1]);

        let scope = &v[0..2];
        let cycles = CycleDetector::new(&graph, scope).into_cycles();
        assert_eq!(cycles.len(), 1);
        for cycle in &cycles {
            for &edge in cycle.edges() {
                let (from, to) = graph.endpoints(edge);
                assert!(scope.contains(&from) && scope.contains(&to));
            }
        }
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1]);
        link(&mut graph, v[1], v[2]);
        link(&mut graph, v[0], v[2]);

        assert!(CycleDetector::new(&graph, &v).into_cycles().is_empty());
    }

    #[test]
    fn test_empty_scope() {
        let (graph, _) = graph_with(&[]);
        assert!(CycleDetector::new(&graph, &[]).into_cycles().is_empty());
    }
}
