use ixgraph_graph::IndexGraph;

use crate::result::{MstResult, WeightFn};
use crate::unionfind::UnionFind;

/// Kruskal's algorithm (§4.I): sort edges by weight, union-find to reject edges that
/// would close a cycle. O(m log m).
pub fn kruskal(graph: &dyn IndexGraph, weight: &impl WeightFn) -> MstResult {
    let mut sorted: Vec<usize> = graph.edges().collect();
    sorted.sort_by(|&a, &b| weight.weight(a).partial_cmp(&weight.weight(b)).expect("non-NaN weight"));

    let mut uf = UnionFind::new(graph.num_vertices());
    let mut edges = Vec::new();
    for e in sorted {
        let u = graph.edge_source(e);
        let v = graph.edge_target(e);
        if uf.union(u, v) {
            edges.push(e);
        }
    }
    MstResult { edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayUndirectedGraph;
    use std::collections::HashMap;

    #[test]
    fn matches_prim_on_the_same_graph() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        let e01 = g.add_edge(0, 1).unwrap();
        let e12 = g.add_edge(1, 2).unwrap();
        let e23 = g.add_edge(2, 3).unwrap();
        let e03 = g.add_edge(0, 3).unwrap();
        let e02 = g.add_edge(0, 2).unwrap();
        let weights: HashMap<usize, f64> =
            [(e01, 1.0), (e12, 2.0), (e23, 1.0), (e03, 10.0), (e02, 3.0)].into_iter().collect();
        let w = |e: usize| weights[&e];

        let mst = kruskal(&g, &w);
        assert_eq!(mst.edges.len(), 3);
        assert_eq!(mst.weight(&w), 4.0);
    }
}
