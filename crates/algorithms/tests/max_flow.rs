use ixgraph_algorithms::{circulation_with_lower_bounds, dinic, push_relabel, ArrayFlowNetwork, FlowNetwork, PushRelabelSelection};
use ixgraph_graph::{ArrayDirectedGraph, IndexGraph};

fn scenario_three() -> (ArrayDirectedGraph, ArrayFlowNetwork) {
    let mut g = ArrayDirectedGraph::new(false, false);
    for _ in 0..4 {
        g.add_vertex();
    }
    g.add_edge(0, 1).unwrap();
    g.add_edge(0, 2).unwrap();
    g.add_edge(1, 2).unwrap();
    g.add_edge(1, 3).unwrap();
    g.add_edge(2, 3).unwrap();
    let net = ArrayFlowNetwork::new(vec![10.0, 5.0, 15.0, 10.0, 10.0]);
    (g, net)
}

#[test]
fn dinic_finds_the_expected_max_flow() {
    let (g, mut net) = scenario_three();
    let value = dinic(&g, &mut net, 0, 3).unwrap();
    assert_eq!(value, 15.0);
    for e in g.edges() {
        assert!(net.flow(e) >= 0.0 && net.flow(e) <= net.capacity(e));
    }
}

#[test]
fn push_relabel_agrees_with_dinic_under_both_selections() {
    let (g, mut net_fifo) = scenario_three();
    let value_fifo = push_relabel(&g, &mut net_fifo, 0, 3, PushRelabelSelection::Fifo).unwrap();
    assert_eq!(value_fifo, 15.0);

    let (g, mut net_highest) = scenario_three();
    let value_highest = push_relabel(&g, &mut net_highest, 0, 3, PushRelabelSelection::HighestLabel).unwrap();
    assert_eq!(value_highest, 15.0);
}

#[test]
fn circulation_with_lower_bounds_saturates_the_required_minimum() {
    let mut g = ArrayDirectedGraph::new(false, false);
    g.add_vertex();
    g.add_vertex();
    let forward = g.add_edge(0, 1).unwrap();
    let back = g.add_edge(1, 0).unwrap();
    let mut net = ArrayFlowNetwork::new(vec![5.0, 10.0]);

    circulation_with_lower_bounds(&g, &mut net, &[(forward, 2.0)]).unwrap();

    assert!(net.flow(forward) >= 2.0 && net.flow(forward) <= 5.0);
    for v in 0..2 {
        let inflow: f64 = g.in_edges(v).map(|e| net.flow(e)).sum();
        let outflow: f64 = g.out_edges(v).map(|e| net.flow(e)).sum();
        assert!((inflow - outflow).abs() < 1e-6);
    }
}
