use fixedbitset::FixedBitSet;
use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

use super::reject_self_edges;
use crate::heap::{HeapRef, PairingHeap};

/// DSatur coloring driven by a referenceable heap (§4.J): each uncolored vertex is keyed by
/// `(-saturation, -degree)` so the heap's minimum is always the most-constrained vertex;
/// assigning a color only ever raises a neighbor's saturation, so every update is a
/// `decrease_key`, never an increase.
pub fn dsatur_heap(graph: &dyn IndexGraph) -> Result<Vec<usize>, IllegalInput> {
    reject_self_edges(graph)?;
    let n = graph.num_vertices();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut colors: Vec<Option<usize>> = vec![None; n];
    let mut used_colors: Vec<FixedBitSet> = (0..n).map(|_| FixedBitSet::with_capacity(n)).collect();
    let mut saturation = vec![0i64; n];
    let degree: Vec<i64> = (0..n).map(|v| graph.out_degree(v) as i64).collect();

    let mut heap: PairingHeap<(i64, i64), usize> = PairingHeap::new();
    let mut heap_ref: Vec<Option<HeapRef>> = vec![None; n];
    for v in 0..n {
        heap_ref[v] = Some(heap.insert((-saturation[v], -degree[v]), v));
    }

    while let Some((_, v)) = heap.extract_min() {
        heap_ref[v] = None;
        let mut c = 0;
        while used_colors[v].contains(c) {
            c += 1;
        }
        colors[v] = Some(c);

        for e in graph.out_edges(v) {
            let u = graph.edge_endpoint_other(e, v);
            if colors[u].is_some() || used_colors[u].contains(c) {
                continue;
            }
            used_colors[u].insert(c);
            saturation[u] += 1;
            if let Some(r) = heap_ref[u] {
                heap.decrease_key(r, (-saturation[u], -degree[u])).expect("saturation only increases, so this key only decreases");
            }
        }
    }

    Ok(colors.into_iter().map(|c| c.expect("every vertex is extracted and colored exactly once")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayUndirectedGraph;

    #[test]
    fn properly_colors_a_triangle() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 2).unwrap();

        let colors = dsatur_heap(&g).unwrap();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn bipartite_graph_uses_two_colors() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(3, 0).unwrap();

        let colors = dsatur_heap(&g).unwrap();
        let distinct: std::collections::HashSet<usize> = colors.iter().copied().collect();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn rejects_self_edges() {
        let mut g = ArrayUndirectedGraph::new(true, false);
        g.add_vertex();
        g.add_edge(0, 0).unwrap();
        assert!(dsatur_heap(&g).is_err());
    }
}
