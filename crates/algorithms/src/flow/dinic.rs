use std::collections::VecDeque;

use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

use super::residual::Residual;
use crate::result::FlowNetwork;

const EPS: f64 = 1e-9;

/// Dinic's blocking-flow maximum flow (§4.H). Alternates a BFS level graph from `source`
/// with DFS augmenting walks that only cross admissible (strictly-increasing-level) edges,
/// using a per-vertex "current arc" cursor so a dead-end edge is never revisited within the
/// same phase (the same O(1)-removal effect the layered-DAG description asks for, expressed
/// as cursor advance instead of an explicit linked-list splice).
pub fn dinic(graph: &dyn IndexGraph, net: &mut dyn FlowNetwork, source: usize, sink: usize) -> Result<f64, IllegalInput> {
    if !graph.is_directed() {
        return Err(IllegalInput::new("Dinic's algorithm requires a directed graph"));
    }
    if source == sink {
        return Err(IllegalInput::new("source and sink must be distinct"));
    }
    let n = graph.num_vertices();
    let mut res = Residual::build(graph, net);
    let mut total = 0.0;

    loop {
        let level = bfs_levels(&res, source, n);
        if level[sink] == usize::MAX {
            break;
        }
        let mut cursor = vec![0usize; n];
        loop {
            let pushed = dfs_augment(&mut res, &level, &mut cursor, source, sink, f64::INFINITY);
            if pushed <= EPS {
                break;
            }
            total += pushed;
        }
    }

    res.write_back(net);
    Ok(total)
}

fn bfs_levels(res: &Residual, source: usize, n: usize) -> Vec<usize> {
    let mut level = vec![usize::MAX; n];
    level[source] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        for &arc in &res.adj[v] {
            if res.cap[arc] > EPS {
                let w = res.head[arc];
                if level[w] == usize::MAX {
                    level[w] = level[v] + 1;
                    queue.push_back(w);
                }
            }
        }
    }
    level
}

fn dfs_augment(res: &mut Residual, level: &[usize], cursor: &mut [usize], v: usize, sink: usize, bottleneck: f64) -> f64 {
    if v == sink {
        return bottleneck;
    }
    while cursor[v] < res.adj[v].len() {
        let arc = res.adj[v][cursor[v]];
        let w = res.head[arc];
        let cap = res.cap[arc];
        if cap > EPS && level[w] == level[v] + 1 {
            let pushed = dfs_augment(res, level, cursor, w, sink, bottleneck.min(cap));
            if pushed > EPS {
                res.push(arc, pushed);
                return pushed;
            }
        }
        cursor[v] += 1;
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ArrayFlowNetwork;
    use ixgraph_graph::ArrayDirectedGraph;

    #[test]
    fn seed_scenario_three_max_flow() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        let mut caps = Vec::new();
        for &(u, v, c) in &[(0, 1, 10.0), (0, 2, 5.0), (1, 2, 15.0), (1, 3, 10.0), (2, 3, 10.0)] {
            g.add_edge(u, v).unwrap();
            caps.push(c);
        }
        let mut net = ArrayFlowNetwork::new(caps);

        let value = dinic(&g, &mut net, 0, 3).unwrap();
        assert_eq!(value, 15.0);

        for v in 0..4 {
            if v == 0 || v == 3 {
                continue;
            }
            let inflow: f64 = g.in_edges(v).map(|e| net.flow(e)).sum();
            let outflow: f64 = g.out_edges(v).map(|e| net.flow(e)).sum();
            assert!((inflow - outflow).abs() < 1e-6);
        }
    }

    #[test]
    fn rejects_equal_source_and_sink() {
        let mut g = ArrayDirectedGraph::new(false, false);
        g.add_vertex();
        let mut net = ArrayFlowNetwork::new(Vec::new());
        assert!(dinic(&g, &mut net, 0, 0).is_err());
    }
}
