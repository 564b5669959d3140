//! Compact DSM export.
//!
//! One entry per row in matrix order, carrying the vertex's identity and
//! a cell vector in the same vertex order, so the payload stays square
//! and position-addressable without an auxiliary index.

use serde::{Deserialize, Serialize};

use super::matrix::Dsm;
use crate::error::Result;
use crate::graph::{GraphIndex, Qualifier};

/// The serialized matrix: rows in DSM vertex order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsmPayload {
    pub rows: Vec<DsmRow>,
}

/// One row: the vertex's identity plus its cells, column per vertex in
/// the same order as the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsmRow {
    pub id: String,
    pub name: String,
    pub qualifier: Qualifier,
    /// `None` marks an empty cell.
    pub cells: Vec<Option<DsmCellPayload>>,
}

/// An occupied cell: the dependency's identity and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsmCellPayload {
    pub id: String,
    pub weight: u32,
}

/// Flattens a matrix into its payload form.
pub fn serialize<G: GraphIndex>(graph: &G, dsm: &Dsm) -> DsmPayload {
    let dimension = dsm.dimension();
    let rows = (0..dimension)
        .map(|row| {
            let resource = graph.resource(dsm.vertex(row));
            let cells = (0..dimension)
                .map(|col| {
                    dsm.cell(row, col)
                        .filter(|cell| cell.weight > 0)
                        .map(|cell| DsmCellPayload {
                            id: graph.dependency(cell.edge).key.clone(),
                            weight: cell.weight,
                        })
                })
                .collect();
            DsmRow {
                id: resource.key.clone(),
                name: resource.name.clone(),
                qualifier: resource.qualifier,
                cells,
            }
        })
        .collect();
    DsmPayload { rows }
}

/// Encodes a payload as JSON.
pub fn to_json(payload: &DsmPayload) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}

/// Decodes a payload from JSON.
pub fn from_json(json: &str) -> Result<DsmPayload> {
    Ok(serde_json::from_str(json)?)
}
