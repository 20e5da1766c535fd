use ixgraph_graph::IndexGraph;

use crate::heap::{FloatKey, HeapRef, PairingHeap};
use crate::result::{MstResult, WeightFn};

/// Prim's algorithm (§4.I), O(m log n) via the referenceable heap. Builds a minimum
/// spanning forest: every connected component contributes its own tree.
pub fn prim(graph: &dyn IndexGraph, weight: &impl WeightFn) -> MstResult {
    let n = graph.num_vertices();
    let mut in_tree = vec![false; n];
    let mut best_edge: Vec<Option<usize>> = vec![None; n];
    let mut heap_ref: Vec<Option<HeapRef>> = vec![None; n];
    let mut heap: PairingHeap<FloatKey, usize> = PairingHeap::new();
    let mut edges = Vec::new();

    for root in 0..n {
        if in_tree[root] {
            continue;
        }
        in_tree[root] = true;
        heap_ref[root] = Some(heap.insert(FloatKey(0.0), root));

        while let Some((_, v)) = heap.extract_min() {
            heap_ref[v] = None;
            in_tree[v] = true;
            if let Some(e) = best_edge[v] {
                edges.push(e);
            }
            for e in graph.out_edges(v) {
                let w = graph.edge_endpoint_other(e, v);
                if in_tree[w] {
                    continue;
                }
                let wt = weight.weight(e);
                let better = match best_edge[w] {
                    None => true,
                    Some(cur) => wt < weight.weight(cur),
                };
                if better {
                    best_edge[w] = Some(e);
                    match heap_ref[w] {
                        Some(r) => heap.decrease_key(r, FloatKey(wt)).expect("wt is strictly smaller than the current key"),
                        None => heap_ref[w] = Some(heap.insert(FloatKey(wt), w)),
                    }
                }
            }
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
    fn builds_a_minimum_spanning_tree() {
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

        let mst = prim(&g, &w);
        assert_eq!(mst.edges.len(), 3);
        assert_eq!(mst.weight(&w), 4.0);
    }

    #[test]
    fn disconnected_graph_yields_a_forest() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(2, 3).unwrap();
        let w = |_: usize| 1.0;
        let mst = prim(&g, &w);
        assert_eq!(mst.edges.len(), 2);
    }
}
