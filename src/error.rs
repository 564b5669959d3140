//! Error types for tanglegraph.

use thiserror::Error;

/// Errors raised by the analysis engine.
///
/// Well-formed input never errors: an empty scope, a scope without edges,
/// or a zero total weight are all handled values. The variants here cover
/// the dimension guard and defensive invariant checks.
#[derive(Debug, Error)]
pub enum TangleError {
    /// The scope is larger than the configured DSM dimension limit.
    /// The matrix is refused outright; scalar metrics are unaffected.
    #[error("DSM dimension {dimension} exceeds the limit of {limit}")]
    DimensionExceeded { dimension: usize, limit: usize },

    /// The graph left after masking feedback edges still contains a cycle,
    /// so no topological order exists. With a feedback set covering every
    /// discovered cycle this cannot happen; it guards against callers
    /// passing a partial or foreign feedback set.
    #[error("no topological order: {remaining} vertices remain on a cycle")]
    CycleRemains { remaining: usize },

    /// DSM payload encoding or decoding failed.
    #[error("DSM serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TangleError>;
