use hashbrown::HashSet;

use ixgraph_graph::IndexGraph;

use super::MatchingResult;
use crate::heap::{FloatKey, PairingHeap};
use crate::result::WeightFn;

struct CostResidual {
    head: Vec<usize>,
    cap: Vec<f64>,
    cost: Vec<f64>,
    twin: Vec<usize>,
    orig_edge: Vec<Option<usize>>,
    adj: Vec<Vec<usize>>,
}

impl CostResidual {
    fn new(n: usize) -> Self {
        Self {
            head: Vec::new(),
            cap: Vec::new(),
            cost: Vec::new(),
            twin: Vec::new(),
            orig_edge: Vec::new(),
            adj: vec![Vec::new(); n],
        }
    }

    fn add_arc(&mut self, u: usize, v: usize, cap: f64, cost: f64, orig_edge: Option<usize>) {
        let fwd = self.head.len();
        self.head.push(v);
        self.cap.push(cap);
        self.cost.push(cost);
        self.orig_edge.push(orig_edge);
        self.twin.push(fwd + 1);
        self.adj[u].push(fwd);

        let bwd = self.head.len();
        self.head.push(u);
        self.cap.push(0.0);
        self.cost.push(-cost);
        self.orig_edge.push(None);
        self.twin.push(fwd);
        self.adj[v].push(bwd);
    }

    fn push(&mut self, arc: usize, f: f64) {
        self.cap[arc] -= f;
        self.cap[self.twin[arc]] += f;
    }
}

/// Successive shortest augmenting paths for maximum-weight bipartite matching (§4.J): a
/// super-source feeds every left vertex, a super-sink drains every right vertex, and each
/// original edge becomes a left-to-right arc of cost `-weight(e)` (so a min-cost flow finds
/// a max-weight matching). Potentials start from a Bellman–Ford pass (the initial residual
/// graph can have negative-cost arcs) and are then maintained incrementally so every later
/// round is an ordinary nonnegative-weight Dijkstra, exactly as the reduction describes.
pub fn bipartite_weighted_matching(graph: &dyn IndexGraph, weight: &impl WeightFn, left: &[usize], right: &[usize]) -> MatchingResult {
    let n = graph.num_vertices();
    let s = n;
    let t = n + 1;
    let total = n + 2;
    let mut res = CostResidual::new(total);

    for &l in left {
        res.add_arc(s, l, 1.0, 0.0, None);
    }
    for &r in right {
        res.add_arc(r, t, 1.0, 0.0, None);
    }
    let right_set: HashSet<usize> = right.iter().copied().collect();
    for e in graph.edges() {
        let (u, v) = (graph.edge_source(e), graph.edge_target(e));
        let (l, r) = if right_set.contains(&v) { (u, v) } else { (v, u) };
        res.add_arc(l, r, 1.0, -weight.weight(e), Some(e));
    }

    let mut potential = bellman_ford_potentials(&res, s, total);

    loop {
        let (dist, parent_arc) = dijkstra_from(&res, &potential, s, total);
        if dist[t].is_infinite() {
            break;
        }
        for v in 0..total {
            if dist[v].is_finite() {
                potential[v] += dist[v];
            }
        }

        let mut path = Vec::new();
        let mut v = t;
        while v != s {
            let arc = parent_arc[v].expect("dijkstra reached v via some arc");
            path.push(arc);
            v = res.head[res.twin[arc]];
        }
        for &arc in &path {
            res.push(arc, 1.0);
        }
    }

    let edges = res
        .orig_edge
        .iter()
        .enumerate()
        .filter(|&(arc, oe)| oe.is_some() && res.cap[arc] < 0.5)
        .filter_map(|(_, oe)| *oe)
        .collect();
    MatchingResult { edges }
}

fn bellman_ford_potentials(res: &CostResidual, s: usize, n: usize) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; n];
    dist[s] = 0.0;
    for _ in 0..n {
        let mut changed = false;
        for u in 0..n {
            if dist[u].is_infinite() {
                continue;
            }
            for &arc in &res.adj[u] {
                if res.cap[arc] <= 0.0 {
                    continue;
                }
                let v = res.head[arc];
                let nd = dist[u] + res.cost[arc];
                if nd < dist[v] {
                    dist[v] = nd;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist.iter().map(|&d| if d.is_infinite() { 0.0 } else { d }).collect()
}

fn dijkstra_from(res: &CostResidual, potential: &[f64], s: usize, n: usize) -> (Vec<f64>, Vec<Option<usize>>) {
    let mut dist = vec![f64::INFINITY; n];
    let mut parent_arc: Vec<Option<usize>> = vec![None; n];
    let mut heap: PairingHeap<FloatKey, usize> = PairingHeap::new();
    dist[s] = 0.0;
    heap.insert(FloatKey(0.0), s);

    while let Some((FloatKey(d), u)) = heap.extract_min() {
        if d > dist[u] {
            continue;
        }
        for &arc in &res.adj[u] {
            if res.cap[arc] <= 0.0 {
                continue;
            }
            let v = res.head[arc];
            let reduced = res.cost[arc] + potential[u] - potential[v];
            let nd = dist[u] + reduced;
            if nd < dist[v] {
                dist[v] = nd;
                parent_arc[v] = Some(arc);
                heap.insert(FloatKey(nd), v);
            }
        }
    }

    (dist, parent_arc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayUndirectedGraph;
    use std::collections::HashMap;

    #[test]
    fn picks_the_heavier_perfect_matching() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        // left = {0,1}, right = {2,3}. Optimal: 0-3 (5) + 1-2 (5) = 10, beats 0-2+1-3 = 2.
        let e02 = g.add_edge(0, 2).unwrap();
        let e03 = g.add_edge(0, 3).unwrap();
        let e12 = g.add_edge(1, 2).unwrap();
        let e13 = g.add_edge(1, 3).unwrap();
        let weights: HashMap<usize, f64> = [(e02, 1.0), (e03, 5.0), (e12, 5.0), (e13, 1.0)].into_iter().collect();
        let w = |e: usize| weights[&e];

        let m = bipartite_weighted_matching(&g, &w, &[0, 1], &[2, 3]);
        assert_eq!(m.edges.len(), 2);
        assert_eq!(m.weight(&w), 10.0);
    }
}
