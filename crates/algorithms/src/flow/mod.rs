//! Maximum flow, circulation and the lower-bound / multi-source-sink / supply reductions
//! (§4.H).

mod dinic;
mod push_relabel;
mod reductions;
mod residual;

pub use dinic::dinic;
pub use push_relabel::{push_relabel, Selection};
pub use reductions::{
    circulation_with_lower_bounds, circulation_with_supplies, max_flow_multi_source_sink,
    FlowReduction, FlowReductionError,
};
