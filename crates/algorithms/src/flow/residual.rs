use ixgraph_graph::IndexGraph;

use crate::result::FlowNetwork;

/// Residual network (§4.H): each original edge gets a reverse "twin" arc with zero
/// original capacity; `cap[arc]` after pushes is the remaining residual capacity. Built
/// fresh per algorithm run so the caller's graph and flow network are never mutated except
/// through the final [`Residual::write_back`].
pub(crate) struct Residual {
    pub(crate) head: Vec<usize>,
    pub(crate) twin: Vec<usize>,
    pub(crate) cap: Vec<f64>,
    pub(crate) adj: Vec<Vec<usize>>,
    orig_edge: Vec<Option<usize>>,
}

impl Residual {
    pub(crate) fn build(graph: &dyn IndexGraph, net: &dyn FlowNetwork) -> Self {
        let n = graph.num_vertices();
        let m = graph.num_edges();
        let mut head = Vec::with_capacity(2 * m);
        let mut twin = Vec::with_capacity(2 * m);
        let mut cap = Vec::with_capacity(2 * m);
        let mut orig_edge = Vec::with_capacity(2 * m);
        let mut adj = vec![Vec::new(); n];

        for e in graph.edges() {
            let u = graph.edge_source(e);
            let v = graph.edge_target(e);

            let fwd = head.len();
            head.push(v);
            cap.push(net.capacity(e));
            orig_edge.push(Some(e));
            twin.push(fwd + 1);

            let bwd = head.len();
            head.push(u);
            cap.push(0.0);
            orig_edge.push(None);
            twin.push(fwd);

            adj[u].push(fwd);
            adj[v].push(bwd);
        }

        Self {
            head,
            twin,
            cap,
            adj,
            orig_edge,
        }
    }

    pub(crate) fn push(&mut self, arc: usize, f: f64) {
        self.cap[arc] -= f;
        self.cap[self.twin[arc]] += f;
    }

    pub(crate) fn write_back(&self, net: &mut dyn FlowNetwork) {
        for (arc, oe) in self.orig_edge.iter().enumerate() {
            if let Some(e) = *oe {
                let original_cap = net.capacity(e);
                net.set_flow(e, original_cap - self.cap[arc]);
            }
        }
    }
}
