//! Topological order via Kahn's algorithm (§4.J).

use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

/// A topological order of `graph`'s vertices. Fails with [`IllegalInput`] if `graph`
/// contains a cycle (the emitted order would be shorter than `num_vertices()`).
pub fn topological_order(graph: &dyn IndexGraph) -> Result<Vec<usize>, IllegalInput> {
    let n = graph.num_vertices();
    let mut in_degree = vec![0usize; n];
    for v in graph.vertices() {
        for e in graph.out_edges(v) {
            in_degree[graph.edge_target(e)] += 1;
        }
    }

    let mut queue: std::collections::VecDeque<usize> =
        (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        for e in graph.out_edges(v) {
            let t = graph.edge_target(e);
            in_degree[t] -= 1;
            if in_degree[t] == 0 {
                queue.push_back(t);
            }
        }
    }

    if order.len() != n {
        return Err(IllegalInput::new("graph is not a DAG: topological order is shorter than num_vertices()"));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayDirectedGraph;

    #[test]
    fn orders_a_dag() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 3).unwrap();
        g.add_edge(2, 3).unwrap();

        let order = topological_order(&g).unwrap();
        let pos = |v: usize| order.iter().position(|&x| x == v).unwrap();
        assert!(pos(0) < pos(1));
        assert!(pos(0) < pos(2));
        assert!(pos(1) < pos(3));
        assert!(pos(2) < pos(3));
    }

    #[test]
    fn rejects_a_cycle() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        assert!(topological_order(&g).is_err());
    }
}
