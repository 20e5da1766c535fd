//! Classical graph algorithms over the [`ixgraph_graph::IndexGraph`] substrate (§4.F–§4.J):
//! a referenceable pairing heap, shortest paths, maximum flow and circulation, minimum
//! spanning trees and the directed minimum spanning arborescence, bipartite matching,
//! vertex coloring, topological order and static LCA.

pub mod coloring;
pub mod flow;
pub mod heap;
pub mod lca;
pub mod matching;
pub mod mst;
pub mod result;
pub mod shortest_paths;
pub mod toposort;
pub mod unionfind;

pub use coloring::{dsatur_heap, rlf};
pub use flow::{
    circulation_with_lower_bounds, circulation_with_supplies, dinic, max_flow_multi_source_sink,
    push_relabel, FlowReduction, FlowReductionError, Selection as PushRelabelSelection,
};
pub use heap::{DoubleHeap, FloatKey, HeapRef, IntHeap, PairingHeap};
pub use lca::Lca;
pub use matching::{bipartite_cardinality_matching, bipartite_weighted_matching, MatchingResult};
pub use mst::{boruvka, karger_klein_tarjan, kruskal, prim, tarjan_directed_mst, yao_buckets};
pub use result::{ApspResult, ArrayFlowNetwork, FlowNetwork, MstResult, Path, SsspResult, WeightFn};
pub use shortest_paths::{bellman_ford, dag_shortest_paths, dijkstra, johnson};
pub use toposort::topological_order;
pub use unionfind::UnionFind;
