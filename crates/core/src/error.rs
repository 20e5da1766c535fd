//! Error taxonomy shared by the substrate and the algorithms built on it.
//!
//! Mirrors the failure modes named in the specification's error-handling design: small,
//! local error types per concern rather than one grab-bag enum, propagated with `?`.

/// A user-provided graph, weight function or algorithm input violates a documented
/// precondition (negative weight seen by Dijkstra, non-DAG input to a topological sort,
/// a self edge where the graph forbids them, ...).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal input: {reason}")]
pub struct IllegalInput {
    pub reason: String,
}

impl IllegalInput {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A flow or circulation problem has no feasible solution under the posed constraints
/// (lower bounds, demands, multi-source/sink reduction).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("no feasible flow exists for the given capacities, lower bounds and demands")]
pub struct NoFeasibleFlow;

/// Lookup of an id that was never assigned, or was since removed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no such id")]
pub struct NoSuchId;

/// Attempt to register an id that is already present in the identifier strategy.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("duplicate id")]
pub struct DuplicateId;

/// Attempted mutation of an unmodifiable/complete/reverse view that does not support it.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported operation on this graph view")]
pub struct UnsupportedOperation;

/// The union of ways `IndexGraph::add_edge` can fail: either the edge itself is illegal
/// (self edge, parallel edge) or the backend does not support mutation at all.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphMutationError {
    #[error(transparent)]
    IllegalInput(#[from] IllegalInput),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOperation),
}
