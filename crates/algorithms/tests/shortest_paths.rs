use ixgraph_algorithms::{bellman_ford, dijkstra};
use ixgraph_graph::{ArrayDirectedGraph, ArrayUndirectedGraph, IndexGraph};

#[test]
fn dijkstra_path_on_an_undirected_graph() {
    let mut g = ArrayUndirectedGraph::new(false, false);
    for _ in 0..4 {
        g.add_vertex();
    }
    let e01 = g.add_edge(0, 1).unwrap();
    let e12 = g.add_edge(1, 2).unwrap();
    let e02 = g.add_edge(0, 2).unwrap();
    let e23 = g.add_edge(2, 3).unwrap();

    let weights = [(e01, 1.0), (e12, 2.0), (e02, 4.0), (e23, 1.0)].into_iter().collect::<std::collections::HashMap<_, _>>();
    let weight = |e: usize| weights[&e];

    let result = dijkstra(&g, &weight, 0).unwrap();
    assert_eq!(result.distance(0), 0.0);
    assert_eq!(result.distance(1), 1.0);
    assert_eq!(result.distance(2), 3.0);
    assert_eq!(result.distance(3), 4.0);

    let path = result.path_on(|e, v| g.edge_endpoint_other(e, v), 3).unwrap();
    assert_eq!(path.edges, vec![e01, e12, e23]);
}

#[test]
fn bellman_ford_detects_a_negative_cycle() {
    let mut g = ArrayDirectedGraph::new(false, false);
    for _ in 0..3 {
        g.add_vertex();
    }
    let e01 = g.add_edge(0, 1).unwrap();
    let e12 = g.add_edge(1, 2).unwrap();
    let e20 = g.add_edge(2, 0).unwrap();

    let weights = [(e01, 1.0), (e12, -1.0), (e20, -1.0)].into_iter().collect::<std::collections::HashMap<_, _>>();
    let weight = |e: usize| weights[&e];

    let result = bellman_ford(&g, &weight, 0);
    assert!(result.found_negative_cycle());
    let cycle = result.negative_cycle().unwrap();
    let sum: f64 = cycle.iter().map(|&e| weight(e)).sum();
    assert!(sum < 0.0);
}
