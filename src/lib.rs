//! # Tanglegraph
//!
//! Dependency cycle analysis for code-structure graphs.
//!
//! Given a graph of resources (files, packages, directories, modules,
//! projects) and weighted dependency edges between them, the engine
//! derives, per analysis scope:
//!
//! - **Elementary cycles** — every minimal dependency ring in the scope
//! - **Feedback edge set** — a cheap-to-cut edge set breaking all cycles
//!   (greedy heuristic with a documented, deterministic tie-break)
//! - **Design Structure Matrix** — the scope in topological order, with
//!   feedback edges above the diagonal
//! - **Tangle metrics** — cycle count, feedback edges, tangles and the
//!   tangle index percentage
//!
//! Everything is a pure in-process computation: no persistence, no I/O,
//! no network surface. The graph is read-only during analysis, so
//! independent scopes can be processed in parallel.
//!
//! ## Quick Start
//!
//! ```rust
//! use tanglegraph::{
//!     AnalysisOptions, Analyzer, Dependency, DependencyGraph, Qualifier, Resource,
//!     SubProjectScope,
//! };
//!
//! let mut graph = DependencyGraph::new();
//! let module = graph.add_resource(Resource::new("core", "core", Qualifier::Module));
//! let model = graph.add_child_of(
//!     module,
//!     Resource::new("core/model", "model", Qualifier::Directory),
//! );
//! let store = graph.add_child_of(
//!     module,
//!     Resource::new("core/store", "store", Qualifier::Directory),
//! );
//! graph.add_dependency(model, store, Dependency::new("model->store", 3));
//! graph.add_dependency(store, model, Dependency::new("store->model", 1));
//!
//! let mut analyzer = Analyzer::new(&graph, AnalysisOptions::default());
//! let report = analyzer.analyze(&SubProjectScope, module).unwrap();
//! assert_eq!(report.metrics.cycle_count, 1);
//! assert_eq!(report.metrics.tangles, 3); // the heavier edge gets cut
//! ```

pub mod analysis;
pub mod cycles;
pub mod dsm;
pub mod error;
pub mod fes;
pub mod graph;
pub mod metrics;
pub mod scope;

// Re-exports for convenience
pub use error::{Result, TangleError};

// Graph model
pub use graph::{Dependency, DependencyGraph, GraphIndex, GraphStats, Qualifier, Resource};

// Solvers
pub use cycles::{Cycle, CycleDetector, CycleSolver, IncrementalCycleSolver};
pub use fes::{FeedbackEdgeSet, MinimumFeedbackEdgeSetSolver};

// Matrix and export
pub use dsm::{
    from_json, serialize, to_json, topological_order, Dsm, DsmCell, DsmCellPayload, DsmPayload,
    DsmRow, DEFAULT_DIMENSION_LIMIT,
};

// Metrics and pipeline
pub use analysis::{analyze_scope, analyze_scopes, AnalysisOptions, Analyzer, ScopeReport, SolverKind};
pub use metrics::{edges_weight, tangle_index, ScopeMetrics};
pub use scope::{ProjectScope, ScopePolicy, SubProjectScope};
