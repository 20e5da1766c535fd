use ixgraph_graph::IndexGraph;

use crate::result::{SsspResult, WeightFn};

/// Bellman–Ford (§4.G): single-source shortest paths tolerating negative weights.
/// `n-1` relaxation rounds followed by a detection round; if that round still finds a
/// relaxable edge, a negative cycle reachable from `source` is reconstructed and reported
/// via [`SsspResult::found_negative_cycle`] instead of distances.
pub fn bellman_ford(graph: &dyn IndexGraph, weight: &impl WeightFn, source: usize) -> SsspResult {
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack: Vec<Option<usize>> = vec![None; n];
    dist[source] = 0.0;

    let edges: Vec<(usize, usize, usize, f64)> = graph
        .edges()
        .map(|e| (e, graph.edge_source(e), graph.edge_target(e), weight.weight(e)))
        .collect();

    for _ in 0..n.saturating_sub(1) {
        let mut changed = false;
        for &(e, u, v, w) in &edges {
            relax(&mut dist, &mut backtrack, u, v, e, w, graph.is_directed(), &mut changed);
        }
        if !changed {
            break;
        }
    }

    let mut relaxed_vertex = None;
    for &(e, u, v, w) in &edges {
        let mut changed = false;
        relax(&mut dist, &mut backtrack, u, v, e, w, graph.is_directed(), &mut changed);
        if changed {
            relaxed_vertex = Some(v);
            break;
        }
    }

    match relaxed_vertex {
        None => SsspResult::new(source, dist, backtrack),
        Some(start) => {
            // Walk predecessors n times to guarantee landing inside the cycle, then walk
            // the cycle itself until we return to the starting vertex.
            let mut v = start;
            for _ in 0..n {
                v = match backtrack[v] {
                    Some(e) => graph.edge_endpoint_other(e, v),
                    None => v,
                };
            }
            let cycle_start = v;
            let mut cycle = Vec::new();
            loop {
                let e = backtrack[v].expect("cycle vertex has a predecessor edge");
                cycle.push(e);
                v = graph.edge_endpoint_other(e, v);
                if v == cycle_start {
                    break;
                }
            }
            cycle.reverse();
            SsspResult::with_negative_cycle(source, n, cycle)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn relax(
    dist: &mut [f64],
    backtrack: &mut [Option<usize>],
    u: usize,
    v: usize,
    e: usize,
    w: f64,
    directed: bool,
    changed: &mut bool,
) {
    if dist[u].is_finite() && dist[u] + w < dist[v] {
        dist[v] = dist[u] + w;
        backtrack[v] = Some(e);
        *changed = true;
    }
    if !directed && dist[v].is_finite() && dist[v] + w < dist[u] {
        dist[u] = dist[v] + w;
        backtrack[u] = Some(e);
        *changed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayDirectedGraph;

    /// Seed scenario 2: directed (0,1,1) (1,2,-1) (2,0,-1); from 0 a negative cycle exists.
    #[test]
    fn seed_scenario_two_negative_cycle() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        let e01 = g.add_edge(0, 1).unwrap();
        let e12 = g.add_edge(1, 2).unwrap();
        let e20 = g.add_edge(2, 0).unwrap();
        let weights = [(e01, 1.0), (e12, -1.0), (e20, -1.0)]
            .into_iter()
            .collect::<std::collections::HashMap<_, _>>();
        let w = |e: usize| weights[&e];

        let result = bellman_ford(&g, &w, 0);
        assert!(result.found_negative_cycle());
        let cycle = result.negative_cycle().unwrap();
        let sum: f64 = cycle.iter().map(|&e| w(e)).sum();
        assert!(sum < 0.0);
    }

    #[test]
    fn no_negative_cycle_gives_ordinary_distances() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let w = |_: usize| 2.0;
        let result = bellman_ford(&g, &w, 0);
        assert!(!result.found_negative_cycle());
        assert_eq!(result.distance(2), 4.0);
    }
}
