//! The `Linked` backend (§4.C): each edge is a node in an intrusive doubly linked list
//! per incident vertex (represented here as parallel index arrays rather than raw
//! pointers, since the crate forbids `unsafe`). O(1) `add_edge`/`remove_edge`; best
//! suited for workloads with many removals.

use ixgraph_core::{GraphMutationError, IllegalInput, UnsupportedOperation};

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

struct LinkedListIter<'a> {
    next: &'a [Option<usize>],
    cursor: Option<usize>,
}

impl Iterator for LinkedListIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.cursor?;
        self.cursor = self.next[current];
        Some(current)
    }
}

/// Directed `Linked` backend: an intrusive doubly linked out-list and in-list per edge.
#[derive(Debug, Clone)]
pub struct LinkedDirectedGraph {
    caps: GraphCapabilities,
    head_out: Vec<Option<usize>>,
    head_in: Vec<Option<usize>>,
    next_out: Vec<Option<usize>>,
    prev_out: Vec<Option<usize>>,
    next_in: Vec<Option<usize>>,
    prev_in: Vec<Option<usize>>,
    edge_source: Vec<usize>,
    edge_target: Vec<usize>,
}

impl LinkedDirectedGraph {
    pub fn new(self_edges: bool, parallel_edges: bool) -> Self {
        Self {
            caps: GraphCapabilities::new(true, self_edges, parallel_edges),
            head_out: Vec::new(),
            head_in: Vec::new(),
            next_out: Vec::new(),
            prev_out: Vec::new(),
            next_in: Vec::new(),
            prev_in: Vec::new(),
            edge_source: Vec::new(),
            edge_target: Vec::new(),
        }
    }

    fn link_out(&mut self, e: usize, s: usize) {
        self.prev_out[e] = None;
        self.next_out[e] = self.head_out[s];
        if let Some(h) = self.head_out[s] {
            self.prev_out[h] = Some(e);
        }
        self.head_out[s] = Some(e);
    }

    fn link_in(&mut self, e: usize, t: usize) {
        self.prev_in[e] = None;
        self.next_in[e] = self.head_in[t];
        if let Some(h) = self.head_in[t] {
            self.prev_in[h] = Some(e);
        }
        self.head_in[t] = Some(e);
    }

    fn unlink_out(&mut self, e: usize, s: usize) {
        let (p, n) = (self.prev_out[e], self.next_out[e]);
        match p {
            Some(p) => self.next_out[p] = n,
            None => self.head_out[s] = n,
        }
        if let Some(n) = n {
            self.prev_out[n] = p;
        }
    }

    fn unlink_in(&mut self, e: usize, t: usize) {
        let (p, n) = (self.prev_in[e], self.next_in[e]);
        match p {
            Some(p) => self.next_in[p] = n,
            None => self.head_in[t] = n,
        }
        if let Some(n) = n {
            self.prev_in[n] = p;
        }
    }
}

impl IndexGraph for LinkedDirectedGraph {
    fn num_vertices(&self) -> usize {
        self.head_out.len()
    }

    fn num_edges(&self) -> usize {
        self.edge_source.len()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.caps
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        self.head_out.push(None);
        self.head_in.push(None);
        Ok(self.head_out.len() - 1)
    }

    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.remove_edges_of(v)?;
        let last = self.num_vertices() - 1;
        if v != last {
            let out_last: Vec<usize> = LinkedListIter {
                next: &self.next_out,
                cursor: self.head_out[last],
            }
            .collect();
            for e in out_last {
                if self.edge_source[e] == last {
                    self.edge_source[e] = v;
                }
            }
            let in_last: Vec<usize> = LinkedListIter {
                next: &self.next_in,
                cursor: self.head_in[last],
            }
            .collect();
            for e in in_last {
                if self.edge_target[e] == last {
                    self.edge_target[e] = v;
                }
            }
            self.head_out.swap(v, last);
            self.head_in.swap(v, last);
        }
        self.head_out.pop();
        self.head_in.pop();
        Ok(())
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError> {
        check_new_edge(&self.caps, self.get_edge(u, v), u, v)?;
        let e = self.edge_source.len();
        self.edge_source.push(u);
        self.edge_target.push(v);
        self.next_out.push(None);
        self.prev_out.push(None);
        self.next_in.push(None);
        self.prev_in.push(None);
        self.link_out(e, u);
        self.link_in(e, v);
        Ok(e)
    }

    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        self.unlink_out(e, s);
        self.unlink_in(e, t);

        let last = self.num_edges() - 1;
        if e != last {
            let (ls, lt) = (self.edge_source[last], self.edge_target[last]);
            self.unlink_out(last, ls);
            self.unlink_in(last, lt);
            self.edge_source[e] = ls;
            self.edge_target[e] = lt;
            self.link_out(e, ls);
            self.link_in(e, lt);
        }
        self.edge_source.pop();
        self.edge_target.pop();
        self.next_out.pop();
        self.prev_out.pop();
        self.next_in.pop();
        self.prev_in.pop();
        Ok(())
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(LinkedListIter {
            next: &self.next_out,
            cursor: self.head_out[v],
        })
    }

    fn in_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(LinkedListIter {
            next: &self.next_in,
            cursor: self.head_in[v],
        })
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edge_source[e]
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edge_target[e]
    }

    fn reverse_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        self.unlink_out(e, s);
        self.unlink_in(e, t);
        self.edge_source[e] = t;
        self.edge_target[e] = s;
        self.link_out(e, t);
        self.link_in(e, s);
        Ok(())
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        self.head_out.iter_mut().for_each(|h| *h = None);
        self.head_in.iter_mut().for_each(|h| *h = None);
        self.next_out.clear();
        self.prev_out.clear();
        self.next_in.clear();
        self.prev_in.clear();
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        self.head_out.clear();
        self.head_in.clear();
        self.clear_edges()
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        Box::new(self.clone())
    }
}

/// Undirected `Linked` backend: a single intrusive list per vertex. A non-self edge owns
/// two independent link slots, one per endpoint's list; a self edge only links into its
/// one distinct endpoint's list.
#[derive(Debug, Clone)]
pub struct LinkedUndirectedGraph {
    caps: GraphCapabilities,
    head: Vec<Option<usize>>,
    next_a: Vec<Option<usize>>,
    prev_a: Vec<Option<usize>>,
    next_b: Vec<Option<usize>>,
    prev_b: Vec<Option<usize>>,
    edge_source: Vec<usize>,
    edge_target: Vec<usize>,
}

impl LinkedUndirectedGraph {
    pub fn new(self_edges: bool, parallel_edges: bool) -> Self {
        Self {
            caps: GraphCapabilities::new(false, self_edges, parallel_edges),
            head: Vec::new(),
            next_a: Vec::new(),
            prev_a: Vec::new(),
            next_b: Vec::new(),
            prev_b: Vec::new(),
            edge_source: Vec::new(),
            edge_target: Vec::new(),
        }
    }

    fn link(&mut self, e: usize, v: usize, side_a: bool) {
        let (next, prev) = if side_a {
            (&mut self.next_a, &mut self.prev_a)
        } else {
            (&mut self.next_b, &mut self.prev_b)
        };
        prev[e] = None;
        next[e] = self.head[v];
        if let Some(h) = self.head[v] {
            if self.edge_source[h] == v {
                self.prev_a[h] = Some(e);
            } else {
                self.prev_b[h] = Some(e);
            }
        }
        self.head[v] = Some(e);
    }

    fn unlink(&mut self, e: usize, v: usize, side_a: bool) {
        let (prev_of_e, next_of_e) = if side_a {
            (self.prev_a[e], self.next_a[e])
        } else {
            (self.prev_b[e], self.next_b[e])
        };
        match prev_of_e {
            Some(p) => {
                if self.edge_source[p] == v {
                    self.next_a[p] = next_of_e;
                } else {
                    self.next_b[p] = next_of_e;
                }
            }
            None => self.head[v] = next_of_e,
        }
        if let Some(n) = next_of_e {
            if self.edge_source[n] == v {
                self.prev_a[n] = prev_of_e;
            } else {
                self.prev_b[n] = prev_of_e;
            }
        }
    }

    fn list_of(&self, v: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cursor = self.head[v];
        while let Some(e) = cursor {
            out.push(e);
            cursor = if self.edge_source[e] == v {
                self.next_a[e]
            } else {
                self.next_b[e]
            };
        }
        out
    }
}

impl IndexGraph for LinkedUndirectedGraph {
    fn num_vertices(&self) -> usize {
        self.head.len()
    }

    fn num_edges(&self) -> usize {
        self.edge_source.len()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.caps
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        self.head.push(None);
        Ok(self.head.len() - 1)
    }

    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.remove_edges_of(v)?;
        let last = self.num_vertices() - 1;
        if v != last {
            for e in self.list_of(last) {
                if self.edge_source[e] == last {
                    self.edge_source[e] = v;
                }
                if self.edge_target[e] == last {
                    self.edge_target[e] = v;
                }
            }
            self.head.swap(v, last);
        }
        self.head.pop();
        Ok(())
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError> {
        check_new_edge(&self.caps, self.get_edge(u, v), u, v)?;
        let e = self.edge_source.len();
        self.edge_source.push(u);
        self.edge_target.push(v);
        self.next_a.push(None);
        self.prev_a.push(None);
        self.next_b.push(None);
        self.prev_b.push(None);
        self.link(e, u, true);
        if u != v {
            self.link(e, v, false);
        }
        Ok(e)
    }

    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        self.unlink(e, s, true);
        if s != t {
            self.unlink(e, t, false);
        }

        let last = self.num_edges() - 1;
        if e != last {
            let (ls, lt) = (self.edge_source[last], self.edge_target[last]);
            self.unlink(last, ls, true);
            if ls != lt {
                self.unlink(last, lt, false);
            }
            self.edge_source[e] = ls;
            self.edge_target[e] = lt;
            self.link(e, ls, true);
            if ls != lt {
                self.link(e, lt, false);
            }
        }
        self.edge_source.pop();
        self.edge_target.pop();
        self.next_a.pop();
        self.prev_a.pop();
        self.next_b.pop();
        self.prev_b.pop();
        Ok(())
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.list_of(v).into_iter())
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edge_source[e]
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edge_target[e]
    }

    fn reverse_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        self.edge_source[e] = t;
        self.edge_target[e] = s;
        Ok(())
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        self.head.iter_mut().for_each(|h| *h = None);
        self.next_a.clear();
        self.prev_a.clear();
        self.next_b.clear();
        self.prev_b.clear();
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        self.head.clear();
        self.clear_edges()
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directed_linked_add_remove_roundtrip() {
        let mut g = LinkedDirectedGraph::new(true, true);
        for _ in 0..4 {
            g.add_vertex();
        }
        let e01 = g.add_edge(0, 1).unwrap();
        let e02 = g.add_edge(0, 2).unwrap();
        g.add_edge(1, 3).unwrap();
        assert_eq!(g.out_degree(0), 2);
        g.remove_edge(e01);
        assert_eq!(g.out_degree(0), 1);
        assert_eq!(g.out_edges(0).collect::<Vec<_>>(), vec![e02]);
        assert_eq!(g.in_degree(3), 1);
    }

    #[test]
    fn undirected_linked_self_loop_and_removal() {
        let mut g = LinkedUndirectedGraph::new(true, true);
        g.add_vertex();
        g.add_vertex();
        let loop_e = g.add_edge(0, 0).unwrap();
        let cross_e = g.add_edge(0, 1).unwrap();
        assert_eq!(g.out_degree(0), 2);
        assert_eq!(g.out_degree(1), 1);
        g.remove_edge(loop_e);
        assert_eq!(g.out_edges(0).collect::<Vec<_>>(), vec![cross_e]);
    }
}
