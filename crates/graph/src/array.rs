//! The `Array` backend (§4.C): per-vertex dynamic arrays of incident edge indices.
//! Amortized O(1) `add_edge`, O(deg) `remove_edge`/`get_edge`. The default backend,
//! best suited for dense enumeration.

use ixgraph_core::{GraphMutationError, IllegalInput, UnsupportedOperation};

use crate::adjacency::{remove_from_list, replace_in_list};
use crate::capabilities::GraphCapabilities;
use crate::index_graph::IndexGraph;

fn check_new_edge(
    caps: &GraphCapabilities,
    existing: Option<usize>,
    u: usize,
    v: usize,
) -> Result<(), IllegalInput> {
    if !caps.self_edges && u == v {
        return Err(IllegalInput::new(format!(
            "self edges are not permitted on this graph (vertex {u})"
        )));
    }
    if !caps.parallel_edges && existing.is_some() {
        return Err(IllegalInput::new(format!(
            "parallel edges are not permitted on this graph ({u} -> {v} already exists)"
        )));
    }
    Ok(())
}

/// Directed `Array` backend: separate out- and in-adjacency per vertex.
#[derive(Debug, Clone)]
pub struct ArrayDirectedGraph {
    caps: GraphCapabilities,
    out: Vec<Vec<usize>>,
    inc: Vec<Vec<usize>>,
    edge_source: Vec<usize>,
    edge_target: Vec<usize>,
}

impl ArrayDirectedGraph {
    pub fn new(self_edges: bool, parallel_edges: bool) -> Self {
        Self {
            caps: GraphCapabilities::new(true, self_edges, parallel_edges),
            out: Vec::new(),
            inc: Vec::new(),
            edge_source: Vec::new(),
            edge_target: Vec::new(),
        }
    }
}

impl IndexGraph for ArrayDirectedGraph {
    fn num_vertices(&self) -> usize {
        self.out.len()
    }

    fn num_edges(&self) -> usize {
        self.edge_source.len()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.caps
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        self.out.push(Vec::new());
        self.inc.push(Vec::new());
        Ok(self.out.len() - 1)
    }

    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.remove_edges_of(v)?;
        let last = self.num_vertices() - 1;
        if v != last {
            for &e in &self.out[last].clone() {
                if self.edge_source[e] == last {
                    self.edge_source[e] = v;
                }
            }
            for &e in &self.inc[last].clone() {
                if self.edge_target[e] == last {
                    self.edge_target[e] = v;
                }
            }
            self.out.swap(v, last);
            self.inc.swap(v, last);
        }
        self.out.pop();
        self.inc.pop();
        Ok(())
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError> {
        check_new_edge(&self.caps, self.get_edge(u, v), u, v)?;
        let e = self.edge_source.len();
        self.edge_source.push(u);
        self.edge_target.push(v);
        self.out[u].push(e);
        self.inc[v].push(e);
        Ok(e)
    }

    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        remove_from_list(&mut self.out[s], e);
        remove_from_list(&mut self.inc[t], e);
        let last = self.num_edges() - 1;
        if e != last {
            let (ls, lt) = (self.edge_source[last], self.edge_target[last]);
            replace_in_list(&mut self.out[ls], last, e);
            replace_in_list(&mut self.inc[lt], last, e);
            self.edge_source[e] = ls;
            self.edge_target[e] = lt;
        }
        self.edge_source.pop();
        self.edge_target.pop();
        Ok(())
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.out[v].iter().copied())
    }

    fn in_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.inc[v].iter().copied())
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edge_source[e]
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edge_target[e]
    }

    fn reverse_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        remove_from_list(&mut self.out[s], e);
        remove_from_list(&mut self.inc[t], e);
        self.edge_source[e] = t;
        self.edge_target[e] = s;
        self.out[t].push(e);
        self.inc[s].push(e);
        Ok(())
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        for list in &mut self.out {
            list.clear();
        }
        for list in &mut self.inc {
            list.clear();
        }
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        self.out.clear();
        self.inc.clear();
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        Box::new(self.clone())
    }
}

/// Undirected `Array` backend: a single incident-edge list per vertex. A self edge has
/// only one distinct endpoint, so it appears once in that vertex's list; any other edge
/// appears once in each endpoint's list.
#[derive(Debug, Clone)]
pub struct ArrayUndirectedGraph {
    caps: GraphCapabilities,
    adj: Vec<Vec<usize>>,
    edge_source: Vec<usize>,
    edge_target: Vec<usize>,
}

impl ArrayUndirectedGraph {
    pub fn new(self_edges: bool, parallel_edges: bool) -> Self {
        Self {
            caps: GraphCapabilities::new(false, self_edges, parallel_edges),
            adj: Vec::new(),
            edge_source: Vec::new(),
            edge_target: Vec::new(),
        }
    }
}

impl IndexGraph for ArrayUndirectedGraph {
    fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    fn num_edges(&self) -> usize {
        self.edge_source.len()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.caps
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        self.adj.push(Vec::new());
        Ok(self.adj.len() - 1)
    }

    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.remove_edges_of(v)?;
        let last = self.num_vertices() - 1;
        if v != last {
            for &e in &self.adj[last].clone() {
                if self.edge_source[e] == last {
                    self.edge_source[e] = v;
                }
                if self.edge_target[e] == last {
                    self.edge_target[e] = v;
                }
            }
            self.adj.swap(v, last);
        }
        self.adj.pop();
        Ok(())
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError> {
        check_new_edge(&self.caps, self.get_edge(u, v), u, v)?;
        let e = self.edge_source.len();
        self.edge_source.push(u);
        self.edge_target.push(v);
        self.adj[u].push(e);
        if u != v {
            self.adj[v].push(e);
        }
        Ok(e)
    }

    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        remove_from_list(&mut self.adj[s], e);
        if s != t {
            remove_from_list(&mut self.adj[t], e);
        }
        let last = self.num_edges() - 1;
        if e != last {
            let (ls, lt) = (self.edge_source[last], self.edge_target[last]);
            replace_in_list(&mut self.adj[ls], last, e);
            if ls != lt {
                replace_in_list(&mut self.adj[lt], last, e);
            }
            self.edge_source[e] = ls;
            self.edge_target[e] = lt;
        }
        self.edge_source.pop();
        self.edge_target.pop();
        Ok(())
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.adj[v].iter().copied())
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edge_source[e]
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edge_target[e]
    }

    fn reverse_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        // Undirected edges are semantically unordered; flip the stored orientation only.
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        self.edge_source[e] = t;
        self.edge_target[e] = s;
        Ok(())
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        for list in &mut self.adj {
            list.clear();
        }
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        self.adj.clear();
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Endpoint;

    #[test]
    fn directed_swap_protocol_on_vertex_removal() {
        let mut g = ArrayDirectedGraph::new(true, true);
        for _ in 0..5 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(4, 2).unwrap();

        g.remove_vertex(2);
        assert_eq!(g.num_vertices(), 4);
        // Vertex 2's own edges (1->2, 2->3, 4->2) are gone; vertex 4 (last) is swapped
        // into slot 2 and carries no edges of its own along (its only edge touched the
        // removed vertex).
        assert_eq!(g.out_edges(2).count(), 0);
        assert_eq!(g.in_edges(2).count(), 0);
        assert!(g.get_edge(0, 1).is_some());
        assert!(g.get_edge(1, 2).is_none());
    }

    #[test]
    fn last_vertex_edges_follow_the_swap() {
        let mut g = ArrayDirectedGraph::new(true, true);
        for _ in 0..4 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(3, 0).unwrap(); // incident to the soon-to-be-last vertex 3
        g.add_edge(1, 3).unwrap();

        g.remove_vertex(1); // vertex 1 has no edges of its own besides (0,1) and (1,3)
        assert_eq!(g.num_vertices(), 3);
        // vertex 3 (old last) is now at slot 1; its edges (3,0) and (1,3)-removed-already
        // should have been relabeled to reference slot 1 instead of 3.
        assert!(g.get_edge(1, 0).is_some());
    }

    #[test]
    fn undirected_self_edge_appears_once() {
        let mut g = ArrayUndirectedGraph::new(true, true);
        g.add_vertex();
        let e = g.add_edge(0, 0).unwrap();
        assert_eq!(g.out_edges(0).collect::<Vec<_>>(), vec![e]);
        assert_eq!(g.edge_endpoint(e, Endpoint::Source), 0);
        assert_eq!(g.edge_endpoint(e, Endpoint::Target), 0);
    }

    #[test]
    fn rejects_parallel_and_self_edges_when_forbidden() {
        let mut g = ArrayDirectedGraph::new(false, false);
        g.add_vertex();
        g.add_vertex();
        assert!(g.add_edge(0, 0).is_err());
        g.add_edge(0, 1).unwrap();
        assert!(g.add_edge(0, 1).is_err());
    }
}
