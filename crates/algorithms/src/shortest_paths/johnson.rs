use ixgraph_graph::IndexGraph;

use crate::result::{ApspResult, WeightFn};

use super::dijkstra::dijkstra;

/// Johnson's algorithm (§4.G): all-pairs shortest paths via Bellman–Ford-computed vertex
/// potentials followed by one Dijkstra per source on the reweighted graph.
///
/// Conceptually adjoins a fake vertex with a zero-weight edge to every vertex and runs
/// Bellman–Ford from it; equivalently (and without mutating the caller's graph) this is a
/// Bellman–Ford relaxation initialized with every distance at `0` instead of `INFINITY`.
/// Per-source work is run serially; the reference design allows farming it out to a task
/// pool above a vertex-count threshold, but this crate carries no thread-pool dependency.
pub fn johnson(graph: &dyn IndexGraph, weight: &impl WeightFn) -> ApspResult {
    let n = graph.num_vertices();
    let edges: Vec<(usize, usize, usize, f64)> = graph
        .edges()
        .map(|e| (e, graph.edge_source(e), graph.edge_target(e), weight.weight(e)))
        .collect();

    let mut potential = vec![0.0; n];
    let relax_pass = |potential: &mut Vec<f64>| {
        let mut changed = false;
        for &(_, u, v, w) in &edges {
            if potential[u] + w < potential[v] {
                potential[v] = potential[u] + w;
                changed = true;
            }
            if !graph.is_directed() && potential[v] + w < potential[u] {
                potential[u] = potential[v] + w;
                changed = true;
            }
        }
        changed
    };
    for _ in 0..n.saturating_sub(1) {
        if !relax_pass(&mut potential) {
            break;
        }
    }
    let has_negative_cycle = relax_pass(&mut potential);

    if has_negative_cycle {
        // Reuse Bellman-Ford's own cycle reconstruction by running it from any vertex;
        // a negative cycle detected from the fake source is reachable from some real vertex.
        for s in 0..n {
            let bf = super::bellman_ford::bellman_ford(graph, weight, s);
            if bf.found_negative_cycle() {
                return ApspResult::with_negative_cycle(bf.negative_cycle().unwrap().to_vec());
            }
        }
        unreachable!("Johnson detected a negative cycle but no source reproduced it");
    }

    let per_source = (0..n)
        .map(|s| {
            let reweighted = |e: usize| weight.weight(e) + potential[graph.edge_source(e)] - potential[graph.edge_target(e)];
            dijkstra(graph, &reweighted, s).expect("reweighted edges are nonnegative by construction")
        })
        .collect();

    ApspResult::new(per_source, potential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayDirectedGraph;

    #[test]
    fn matches_bellman_ford_from_every_source() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        let e01 = g.add_edge(0, 1).unwrap();
        let e12 = g.add_edge(1, 2).unwrap();
        let e03 = g.add_edge(0, 3).unwrap();
        let e32 = g.add_edge(3, 2).unwrap();
        let weights = [(e01, 2.0), (e12, 5.0), (e03, 1.0), (e32, 1.0)]
            .into_iter()
            .collect::<std::collections::HashMap<_, _>>();
        let w = |e: usize| weights[&e];

        let apsp = johnson(&g, &w);
        assert!(!apsp.found_negative_cycle());
        for s in 0..4 {
            let bf = super::super::bellman_ford::bellman_ford(&g, &w, s);
            for t in 0..4 {
                assert!((apsp.distance(s, t) - bf.distance(t)).abs() < 1e-9);
            }
        }
        assert_eq!(apsp.distance(0, 2), 2.0);
    }

    #[test]
    fn negative_cycle_is_propagated() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        let w = |_: usize| -1.0;
        assert!(johnson(&g, &w).found_negative_cycle());
    }
}
