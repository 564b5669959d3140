//! The Design Structure Matrix.
//!
//! A square matrix over an ordered vertex list: cell (row, col) holds the
//! dependency from the row's vertex to the column's vertex, if any.
//! Construction is refused above the dimension limit — the consumer of
//! the matrix cannot usefully render anything larger, so this is a hard
//! boundary, not a degradation.

use petgraph::graph::{EdgeIndex, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::error::{Result, TangleError};
use crate::graph::GraphIndex;

/// Default cap on the matrix dimension.
pub const DEFAULT_DIMENSION_LIMIT: usize = 200;

/// One occupied matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsmCell {
    /// The dependency edge from the row vertex to the column vertex.
    pub edge: EdgeIndex,
    /// The edge's weight.
    pub weight: u32,
    /// Whether the edge was selected into the feedback edge set.
    pub feedback: bool,
}

/// A dependency structure matrix over an ordered vertex list.
#[derive(Debug, Clone)]
pub struct Dsm {
    order: Vec<NodeIndex>,
    /// Row-major, `dimension * dimension` cells.
    cells: Vec<Option<DsmCell>>,
}

impl Dsm {
    /// Builds the matrix over `order` (normally a topological order).
    ///
    /// Fails with [`TangleError::DimensionExceeded`] when the order is
    /// longer than `limit`. When several parallel edges link one ordered
    /// pair, the cell keeps the last one encountered; callers wanting a
    /// single aggregate edge per pair pre-aggregate before building the
    /// graph.
    pub fn build<G: GraphIndex>(
        graph: &G,
        order: &[NodeIndex],
        feedback: &HashSet<EdgeIndex>,
        limit: usize,
    ) -> Result<Self> {
        let dimension = order.len();
        if dimension > limit {
            return Err(TangleError::DimensionExceeded { dimension, limit });
        }

        let positions: HashMap<NodeIndex, usize> = order
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();
        let mut cells = vec![None; dimension * dimension];

        for (row, &vertex) in order.iter().enumerate() {
            for edge in graph.outgoing_edges(vertex) {
                let (_, target) = graph.endpoints(edge);
                let Some(&col) = positions.get(&target) else {
                    continue;
                };
                cells[row * dimension + col] = Some(DsmCell {
                    edge,
                    weight: graph.dependency(edge).weight,
                    feedback: feedback.contains(&edge),
                });
            }
        }

        Ok(Self {
            order: order.to_vec(),
            cells,
        })
    }

    /// Number of rows (= columns).
    pub fn dimension(&self) -> usize {
        self.order.len()
    }

    /// The vertex order shared by rows and columns.
    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// The vertex at a row (or column) position.
    pub fn vertex(&self, position: usize) -> NodeIndex {
        self.order[position]
    }

    /// The cell at (row, col), if occupied.
    pub fn cell(&self, row: usize, col: usize) -> Option<&DsmCell> {
        self.cells
            .get(row * self.dimension() + col)
            .and_then(Option::as_ref)
    }

    /// Iterator over the occupied cells as (row, col, cell).
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, &DsmCell)> {
        let dim = self.dimension();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|c| (i / dim, i % dim, c)))
    }
}
