//! Minimum feedback edge set approximation.
//!
//! Exact weighted minimum feedback edge set is NP-hard; this is the
//! documented greedy set-cover heuristic: repeatedly pick the edge lying
//! on the most uncovered cycles, breaking ties by higher weight and then
//! by insertion order. The tie-break chain is part of the contract —
//! changing it changes every reported metric.

use petgraph::graph::EdgeIndex;
use std::collections::BTreeMap;

use crate::cycles::Cycle;
use crate::graph::GraphIndex;

/// Edges whose removal leaves the discovered cycle set broken, with the
/// metadata the metrics layer reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEdgeSet {
    edges: Vec<EdgeIndex>,
    total_weight: u64,
    cycle_count: usize,
}

impl FeedbackEdgeSet {
    /// The selected edges, in selection order.
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// Sum of the selected edges' weights — the "tangles" figure.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Number of cycles the set was derived from.
    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the given edge was selected.
    pub fn contains(&self, edge: EdgeIndex) -> bool {
        self.edges.contains(&edge)
    }
}

/// Greedy solver over a discovered cycle set.
pub struct MinimumFeedbackEdgeSetSolver<'a, G> {
    graph: &'a G,
    cycles: &'a [Cycle],
}

impl<'a, G: GraphIndex> MinimumFeedbackEdgeSetSolver<'a, G> {
    pub fn new(graph: &'a G, cycles: &'a [Cycle]) -> Self {
        Self { graph, cycles }
    }

    pub fn solve(&self) -> FeedbackEdgeSet {
        let mut covered = vec![false; self.cycles.len()];
        let mut selected = Vec::new();
        let mut total_weight = 0u64;

        loop {
            // Count, per edge, the uncovered cycles running through it.
            // BTreeMap keeps the scan in EdgeIndex (insertion) order so
            // the final tie-break is stable.
            let mut counts: BTreeMap<EdgeIndex, usize> = BTreeMap::new();
            for (i, cycle) in self.cycles.iter().enumerate() {
                if covered[i] {
                    continue;
                }
                for &edge in cycle.edges() {
                    *counts.entry(edge).or_insert(0) += 1;
                }
            }
            if counts.is_empty() {
                break;
            }

            // Highest coverage, then highest weight; on a full tie the
            // first candidate scanned wins, i.e. the lowest EdgeIndex.
            let mut best: Option<(EdgeIndex, usize, u32)> = None;
            for (&edge, &count) in &counts {
                let weight = self.graph.dependency(edge).weight;
                let better = match best {
                    None => true,
                    Some((_, best_count, best_weight)) => {
                        count > best_count || (count == best_count && weight > best_weight)
                    }
                };
                if better {
                    best = Some((edge, count, weight));
                }
            }

            if let Some((edge, _, weight)) = best {
                selected.push(edge);
                total_weight += u64::from(weight);
                for (i, cycle) in self.cycles.iter().enumerate() {
                    if !covered[i] && cycle.contains(edge) {
                        covered[i] = true;
                    }
                }
            }
        }

        FeedbackEdgeSet {
            edges: selected,
            total_weight,
            cycle_count: self.cycles.len(),
        }
    }
}
