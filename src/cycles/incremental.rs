//! Incremental cycle and feedback-edge discovery.
//!
//! Processes the in-scope edges one at a time in insertion order and
//! maintains reachability over the edges accepted so far. An edge whose
//! source is already reachable from its target closes one or more
//! elementary cycles; exactly those cycles are enumerated at that moment.
//! Each elementary cycle is therefore discovered once — when its
//! highest-index edge arrives — and the full cycle set matches the
//! exhaustive detector's.
//!
//! A running feedback cover is kept with the same greedy heuristic as
//! [`crate::fes::MinimumFeedbackEdgeSetSolver`]; the reported set is
//! re-derived over the complete cycle list at the end, so both solver
//! pipelines emit identical metrics.

use petgraph::graph::{EdgeIndex, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

use super::{Cycle, CycleSolver};
use crate::fes::{FeedbackEdgeSet, MinimumFeedbackEdgeSetSolver};
use crate::graph::GraphIndex;

/// Cycle solver optimized for larger, mostly-acyclic scopes.
pub struct IncrementalCycleSolver<'g, G> {
    graph: &'g G,
    scope: Vec<NodeIndex>,
    members: HashSet<NodeIndex>,
    cycles: Vec<Cycle>,
    feedback: Option<FeedbackEdgeSet>,
    solved: bool,
}

impl<'g, G: GraphIndex> IncrementalCycleSolver<'g, G> {
    pub fn new(graph: &'g G, scope: &[NodeIndex]) -> Self {
        Self {
            graph,
            scope: scope.to_vec(),
            members: scope.iter().copied().collect(),
            cycles: Vec::new(),
            feedback: None,
            solved: false,
        }
    }

    fn detect(&mut self) {
        // In-scope edges in insertion order, the fixed deterministic order
        // required for reproducible output.
        let mut edges: Vec<EdgeIndex> = self
            .scope
            .iter()
            .flat_map(|&v| self.graph.outgoing_edges(v))
            .filter(|&e| {
                let (_, to) = self.graph.endpoints(e);
                self.members.contains(&to)
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();

        // Adjacency over accepted edges only.
        let mut adjacency: HashMap<NodeIndex, Vec<(NodeIndex, EdgeIndex)>> = HashMap::new();
        let mut cover = RunningCover::default();

        for edge in edges {
            let (from, to) = self.graph.endpoints(edge);
            if from == to {
                let closed = vec![Cycle::new(vec![edge])];
                cover.absorb(self.graph, &closed, &mut self.cycles);
                // A self loop can never sit on a longer elementary cycle.
                continue;
            }
            // Cheap gate: most edges close nothing.
            if reachable(&adjacency, to, from) {
                let mut closed = Vec::new();
                let mut path = Vec::new();
                let mut on_path = HashSet::new();
                on_path.insert(to);
                closing_cycles(&adjacency, to, from, edge, &mut path, &mut on_path, &mut closed);
                cover.absorb(self.graph, &closed, &mut self.cycles);
            }
            adjacency.entry(from).or_default().push((to, edge));
        }

        // The running cover breaks every cycle, but the authoritative set
        // is the greedy solution over the complete cycle list: identical
        // to what the exhaustive pipeline reports.
        self.feedback =
            Some(MinimumFeedbackEdgeSetSolver::new(self.graph, &self.cycles).solve());
        debug!(
            scope = self.scope.len(),
            cycles = self.cycles.len(),
            "incremental cycle detection done"
        );
    }
}

impl<G: GraphIndex> CycleSolver for IncrementalCycleSolver<'_, G> {
    fn solve(&mut self) -> &[Cycle] {
        if !self.solved {
            self.detect();
            self.solved = true;
        }
        &self.cycles
    }

    fn feedback_edges(&self) -> Option<&FeedbackEdgeSet> {
        self.feedback.as_ref()
    }
}

/// Feedback cover maintained while edges stream in. Re-solves only when a
/// newly closed cycle is not already broken by the current cover.
#[derive(Default)]
struct RunningCover {
    edges: HashSet<EdgeIndex>,
}

impl RunningCover {
    fn absorb<G: GraphIndex>(
        &mut self,
        graph: &G,
        closed: &[Cycle],
        cycles: &mut Vec<Cycle>,
    ) {
        let uncovered = closed
            .iter()
            .any(|c| !c.edges().iter().any(|e| self.edges.contains(e)));
        cycles.extend_from_slice(closed);
        if uncovered && !cycles.is_empty() {
            let set = MinimumFeedbackEdgeSetSolver::new(graph, cycles).solve();
            self.edges = set.edges().iter().copied().collect();
        }
    }
}

/// Breadth-first reachability over the accepted-edge adjacency.
fn reachable(
    adjacency: &HashMap<NodeIndex, Vec<(NodeIndex, EdgeIndex)>>,
    from: NodeIndex,
    to: NodeIndex,
) -> bool {
    if from == to {
        return true;
    }
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);
    while let Some(v) = queue.pop_front() {
        for &(next, _) in adjacency.get(&v).into_iter().flatten() {
            if next == to {
                return true;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

/// Enumerates every simple path `from .. to` over the accepted edges; each
/// one, closed by `closing_edge`, is a new elementary cycle.
fn closing_cycles(
    adjacency: &HashMap<NodeIndex, Vec<(NodeIndex, EdgeIndex)>>,
    current: NodeIndex,
    to: NodeIndex,
    closing_edge: EdgeIndex,
    path: &mut Vec<EdgeIndex>,
    on_path: &mut HashSet<NodeIndex>,
    out: &mut Vec<Cycle>,
) {
    for &(next, edge) in adjacency.get(&current).into_iter().flatten() {
        if next == to {
            let mut edges = path.clone();
            edges.push(edge);
            edges.push(closing_edge);
            out.push(Cycle::new(edges));
        } else if !on_path.contains(&next) {
            path.push(edge);
            on_path.insert(next);
            closing_cycles(adjacency, next, to, closing_edge, path, on_path, out);
            on_path.remove(&next);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::CycleDetector;
    use crate::graph::{Dependency, DependencyGraph, Qualifier, Resource};

    fn graph_with(names: &[&str]) -> (DependencyGraph, Vec<NodeIndex>) {
        let mut graph = DependencyGraph::new();
        let vertices = names
            .iter()
            .map(|n| graph.add_resource(Resource::new(*n, *n, Qualifier::Directory)))
            .collect();
        (graph, vertices)
    }

    fn link(graph: &mut DependencyGraph, from: NodeIndex, to: NodeIndex, weight: u32) {
        let key = format!("{}->{}", from.index(), to.index());
        graph.add_dependency(from, to, Dependency::new(key, weight));
    }

    fn assert_matches_exhaustive(graph: &DependencyGraph, scope: &[NodeIndex]) {
        let reference = CycleDetector::new(graph, scope).into_cycles();
        let mut solver = IncrementalCycleSolver::new(graph, scope);
        let cycles = solver.solve().to_vec();
        assert_eq!(cycles.len(), reference.len(), "cycle counts must agree");

        let reference_fes = MinimumFeedbackEdgeSetSolver::new(graph, &reference).solve();
        let fes = solver.feedback_edges().expect("incremental solver owns a set");
        assert_eq!(fes.edges(), reference_fes.edges());
        assert_eq!(fes.total_weight(), reference_fes.total_weight());
    }

    #[test]
    fn test_matches_exhaustive_on_ring() {
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1], 1);
        link(&mut graph, v[1], v[2], 1);
        link(&mut graph, v[2], v[0], 1);
        assert_matches_exhaustive(&graph, &v);
    }

    #[test]
    fn test_matches_exhaustive_on_dense_tangle() {
        // Every ordered pair of four vertices, mixed weights.
        let (mut graph, v) = graph_with(&["a", "b", "c", "d"]);
        let mut w = 0;
        for &from in &v {
            for &to in &v {
                if from != to {
                    w += 1;
                    link(&mut graph, from, to, w % 3 + 1);
                }
            }
        }
        assert_matches_exhaustive(&graph, &v);
    }

    #[test]
    fn test_matches_exhaustive_with_self_loop() {
        let (mut graph, v) = graph_with(&["a", "b"]);
        link(&mut graph, v[0], v[0], 2);
        link(&mut graph, v[0], v[1], 1);
        link(&mut graph, v[1], v[0], 1);
        assert_matches_exhaustive(&graph, &v);
    }

    #[test]
    fn test_acyclic_scope_yields_nothing() {
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1], 1);
        link(&mut graph, v[1], v[2], 5);

        let mut solver = IncrementalCycleSolver::new(&graph, &v);
        assert!(solver.solve().is_empty());
        let fes = solver.feedback_edges().unwrap();
        assert!(fes.edges().is_empty());
        assert_eq!(fes.total_weight(), 0);
    }

    #[test]
    fn test_out_of_scope_edges_are_absent() {
        let (mut graph, v) = graph_with(&["a", "b", "c"]);
        link(&mut graph, v[0], v[1], 1);
        link(&mut graph, v[1], v[0], 1);
        link(&mut graph, v[1], v[2], 1);
        link(&mut graph, v[2], v[1], 1);

        let mut solver = IncrementalCycleSolver::new(&graph, &v[0..2]);
        assert_eq!(solver.solve().len(), 1);
    }
}
