use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

use crate::heap::{FloatKey, HeapRef, PairingHeap};
use crate::result::{negative_weight_err, SsspResult, WeightFn};

/// Dijkstra's algorithm (§4.G): single-source shortest paths over nonnegative edge
/// weights. Fails with [`IllegalInput`] the first time it traverses a negative-weight
/// edge; vertices unreachable from `source` keep `dist == f64::INFINITY`.
pub fn dijkstra(
    graph: &dyn IndexGraph,
    weight: &impl WeightFn,
    source: usize,
) -> Result<SsspResult, IllegalInput> {
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack: Vec<Option<usize>> = vec![None; n];
    let mut heap_ref: Vec<Option<HeapRef>> = vec![None; n];
    let mut heap: PairingHeap<FloatKey, usize> = PairingHeap::new();

    dist[source] = 0.0;
    heap_ref[source] = Some(heap.insert(FloatKey(0.0), source));

    while let Some((_, u)) = heap.extract_min() {
        heap_ref[u] = None;
        let du = dist[u];
        let edges: Vec<usize> = graph.out_edges(u).collect();
        for e in edges {
            let w = weight.weight(e);
            if w < 0.0 {
                return Err(negative_weight_err(e));
            }
            let v = graph.edge_endpoint_other(e, u);
            let nd = du + w;
            if nd < dist[v] {
                dist[v] = nd;
                backtrack[v] = Some(e);
                match heap_ref[v] {
                    Some(r) => heap.decrease_key(r, FloatKey(nd)).expect("distance only decreases"),
                    None => heap_ref[v] = Some(heap.insert(FloatKey(nd), v)),
                }
            }
        }
    }

    Ok(SsspResult::new(source, dist, backtrack))
}
