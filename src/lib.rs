//! `ixgraph`: a reusable toolkit of classical graph algorithms built on a compact
//! index-graph substrate.
//!
//! This crate is a thin facade over three lower-level crates: [`ixgraph_core`] (identifier
//! strategy, index-keyed weight containers, the shared error taxonomy), [`ixgraph_graph`]
//! (the [`IndexGraph`] substrate and its concrete representations) and
//! [`ixgraph_algorithms`] (the algorithms themselves). Most users only need `ixgraph::prelude`.

pub use ixgraph_algorithms as algorithms;
pub use ixgraph_core as core;
pub use ixgraph_graph as graph;

/// Commonly used types and functions, re-exported flat for `use ixgraph::prelude::*;`.
pub mod prelude {
    pub use ixgraph_core::{
        DuplicateId, GraphId, IllegalInput, IndexId, NoFeasibleFlow, NoSuchId,
        UnsupportedOperation,
    };
    pub use ixgraph_graph::{
        ArrayDirectedGraph, ArrayUndirectedGraph, Endpoint, GraphBuilder, GraphCapabilities,
        IdGraph, IndexGraph, LinkedDirectedGraph, LinkedUndirectedGraph, TableDirectedGraph,
        TableUndirectedGraph,
    };
    pub use ixgraph_algorithms::{
        bellman_ford, bipartite_cardinality_matching, bipartite_weighted_matching, boruvka,
        circulation_with_lower_bounds, circulation_with_supplies, dag_shortest_paths, dijkstra,
        dinic, dsatur_heap, johnson, karger_klein_tarjan, kruskal,
        max_flow_multi_source_sink, prim, push_relabel, rlf, tarjan_directed_mst,
        topological_order, yao_buckets, ApspResult, ArrayFlowNetwork, FlowNetwork, Lca,
        MatchingResult, MstResult, Path, PushRelabelSelection, SsspResult, UnionFind, WeightFn,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_wires_a_tiny_graph_through_an_algorithm() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 2).unwrap();

        let weights = vec![1.0, 1.0, 1.0];
        let weight = |e: usize| weights[e];
        let mst = kruskal(&g, &weight);
        assert_eq!(mst.edges.len(), 2);
    }
}
