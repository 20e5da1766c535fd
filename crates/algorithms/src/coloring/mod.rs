//! Vertex coloring heuristics (§4.J): DSatur driven by a referenceable heap, and RLF
//! (Recursive Largest First) via repeated maximal independent set extraction.

mod dsatur;
mod rlf;

pub use dsatur::dsatur_heap;
pub use rlf::rlf;

use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

fn reject_self_edges(graph: &dyn IndexGraph) -> Result<(), IllegalInput> {
    if graph.edges().any(|e| graph.edge_source(e) == graph.edge_target(e)) {
        return Err(IllegalInput::new("coloring is undefined on a graph with self edges"));
    }
    Ok(())
}
