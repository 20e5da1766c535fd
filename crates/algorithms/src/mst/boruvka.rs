use ixgraph_graph::IndexGraph;

use crate::result::{MstResult, WeightFn};
use crate::unionfind::UnionFind;

/// Borůvka's algorithm (§4.I): in each round every component picks its globally cheapest
/// outgoing edge; all picks are unioned simultaneously. O(m log n) rounds halve the
/// component count at worst, so at most `ceil(log2 n)` rounds run.
pub fn boruvka(graph: &dyn IndexGraph, weight: &impl WeightFn) -> MstResult {
    let n = graph.num_vertices();
    let mut uf = UnionFind::new(n);
    let mut edges = Vec::new();
    let mut components_remaining = n;

    loop {
        let mut cheapest: Vec<Option<usize>> = vec![None; n];
        for e in graph.edges() {
            let (u, v) = (graph.edge_source(e), graph.edge_target(e));
            let (ru, rv) = (uf.find(u), uf.find(v));
            if ru == rv {
                continue;
            }
            for r in [ru, rv] {
                let better = match cheapest[r] {
                    None => true,
                    Some(cur) => weight.weight(e) < weight.weight(cur),
                };
                if better {
                    cheapest[r] = Some(e);
                }
            }
        }

        let mut merged_any = false;
        for r in 0..n {
            if let Some(e) = cheapest[r] {
                let (u, v) = (graph.edge_source(e), graph.edge_target(e));
                if uf.union(u, v) {
                    edges.push(e);
                    merged_any = true;
                    components_remaining -= 1;
                }
            }
        }

        if !merged_any || components_remaining == 1 {
            break;
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
    fn matches_kruskal_on_the_same_graph() {
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

        let mst = boruvka(&g, &w);
        assert_eq!(mst.edges.len(), 3);
        assert_eq!(mst.weight(&w), 4.0);
    }
}
