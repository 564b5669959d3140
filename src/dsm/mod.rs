//! Design Structure Matrix construction and export.

pub mod matrix;
pub mod serializer;
pub mod sorter;

pub use matrix::{Dsm, DsmCell, DEFAULT_DIMENSION_LIMIT};
pub use serializer::{from_json, serialize, to_json, DsmCellPayload, DsmPayload, DsmRow};
pub use sorter::topological_order;
