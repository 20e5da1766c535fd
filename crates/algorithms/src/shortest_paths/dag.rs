use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

use crate::result::{SsspResult, WeightFn};
use crate::toposort::topological_order;

/// Shortest paths on a DAG (§4.G family): relax edges in topological order, a single
/// linear pass that tolerates negative weights since no vertex is ever revisited. Fails
/// with [`IllegalInput`] if `graph` is not a directed acyclic graph.
pub fn dag_shortest_paths(
    graph: &dyn IndexGraph,
    weight: &impl WeightFn,
    source: usize,
) -> Result<SsspResult, IllegalInput> {
    let order = topological_order(graph)?;
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack: Vec<Option<usize>> = vec![None; n];
    dist[source] = 0.0;

    for &u in &order {
        if dist[u].is_infinite() {
            continue;
        }
        for e in graph.out_edges(u) {
            let v = graph.edge_target(e);
            let nd = dist[u] + weight.weight(e);
            if nd < dist[v] {
                dist[v] = nd;
                backtrack[v] = Some(e);
            }
        }
    }

    Ok(SsspResult::new(source, dist, backtrack))
}
