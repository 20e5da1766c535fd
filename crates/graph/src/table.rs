//! The `Table` backend (§4.C): a dense `n x n` table of edge indices (`None` = absent).
//! O(1) `add_edge`/`remove_edge`/`get_edge`, but no parallel edges (a cell holds at most
//! one edge index) and O(n) vertex add/remove. Best suited for small, dense graphs with
//! frequent adjacency lookups.

use ixgraph_core::{GraphMutationError, IllegalInput, UnsupportedOperation};

use crate::capabilities::GraphCapabilities;
use crate::index_graph::IndexGraph;

fn rebuild<F: Fn(usize) -> Option<usize>>(
    old: &[Option<usize>],
    old_n: usize,
    new_n: usize,
    remap: F,
) -> Vec<Option<usize>> {
    let mut table = vec![None; new_n * new_n];
    for i in 0..old_n {
        let Some(ni) = remap(i) else { continue };
        for j in 0..old_n {
            let Some(nj) = remap(j) else { continue };
            table[ni * new_n + nj] = old[i * old_n + j];
        }
    }
    table
}

/// Directed `Table` backend.
#[derive(Debug, Clone)]
pub struct TableDirectedGraph {
    caps: GraphCapabilities,
    n: usize,
    table: Vec<Option<usize>>,
    edge_source: Vec<usize>,
    edge_target: Vec<usize>,
}

impl TableDirectedGraph {
    pub fn new(self_edges: bool) -> Self {
        Self {
            // A dense table cell holds at most one edge index; parallel edges cannot be
            // represented regardless of what the caller requests.
            caps: GraphCapabilities::new(true, self_edges, false),
            n: 0,
            table: Vec::new(),
            edge_source: Vec::new(),
            edge_target: Vec::new(),
        }
    }

    #[inline]
    fn cell(&self, u: usize, v: usize) -> usize {
        u * self.n + v
    }
}

impl IndexGraph for TableDirectedGraph {
    fn num_vertices(&self) -> usize {
        self.n
    }

    fn num_edges(&self) -> usize {
        self.edge_source.len()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.caps
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        let old_n = self.n;
        let new_n = old_n + 1;
        self.table = rebuild(&self.table, old_n, new_n, |i| Some(i));
        self.n = new_n;
        Ok(new_n - 1)
    }

    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.remove_edges_of(v)?;
        let old_n = self.n;
        let last = old_n - 1;
        let new_n = old_n - 1;
        self.table = rebuild(&self.table, old_n, new_n, |i| {
            if i == v {
                None
            } else if i == last {
                Some(v)
            } else {
                Some(i)
            }
        });
        self.n = new_n;
        for e in 0..self.edge_source.len() {
            if self.edge_source[e] == last {
                self.edge_source[e] = v;
            }
            if self.edge_target[e] == last {
                self.edge_target[e] = v;
            }
        }
        Ok(())
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError> {
        if !self.caps.self_edges && u == v {
            return Err(IllegalInput::new(format!(
                "self edges are not permitted on this graph (vertex {u})"
            ))
            .into());
        }
        if self.table[self.cell(u, v)].is_some() {
            return Err(IllegalInput::new(format!(
                "parallel edges are not permitted on this graph ({u} -> {v} already exists)"
            ))
            .into());
        }
        let e = self.edge_source.len();
        self.edge_source.push(u);
        self.edge_target.push(v);
        let cell = self.cell(u, v);
        self.table[cell] = Some(e);
        Ok(e)
    }

    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        let cell = self.cell(s, t);
        self.table[cell] = None;
        let last = self.num_edges() - 1;
        if e != last {
            let (ls, lt) = (self.edge_source[last], self.edge_target[last]);
            let cell = self.cell(ls, lt);
            self.table[cell] = Some(e);
            self.edge_source[e] = ls;
            self.edge_target[e] = lt;
        }
        self.edge_source.pop();
        self.edge_target.pop();
        Ok(())
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new((0..self.n).filter_map(move |j| self.table[self.cell(v, j)]))
    }

    fn in_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new((0..self.n).filter_map(move |i| self.table[self.cell(i, v)]))
    }

    fn get_edge(&self, u: usize, v: usize) -> Option<usize> {
        self.table[self.cell(u, v)]
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edge_source[e]
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edge_target[e]
    }

    fn reverse_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        self.table[self.cell(s, t)] = None;
        self.edge_source[e] = t;
        self.edge_target[e] = s;
        let cell = self.cell(t, s);
        self.table[cell] = Some(e);
        Ok(())
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        self.table.iter_mut().for_each(|c| *c = None);
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        self.n = 0;
        self.table.clear();
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        Box::new(self.clone())
    }
}

/// Undirected `Table` backend: cell `(u, v)` mirrors cell `(v, u)`, except on the
/// diagonal where a self edge occupies a single cell.
#[derive(Debug, Clone)]
pub struct TableUndirectedGraph {
    caps: GraphCapabilities,
    n: usize,
    table: Vec<Option<usize>>,
    edge_source: Vec<usize>,
    edge_target: Vec<usize>,
}

impl TableUndirectedGraph {
    pub fn new(self_edges: bool) -> Self {
        Self {
            caps: GraphCapabilities::new(false, self_edges, false),
            n: 0,
            table: Vec::new(),
            edge_source: Vec::new(),
            edge_target: Vec::new(),
        }
    }

    #[inline]
    fn cell(&self, u: usize, v: usize) -> usize {
        u * self.n + v
    }
}

impl IndexGraph for TableUndirectedGraph {
    fn num_vertices(&self) -> usize {
        self.n
    }

    fn num_edges(&self) -> usize {
        self.edge_source.len()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.caps
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        let old_n = self.n;
        let new_n = old_n + 1;
        self.table = rebuild(&self.table, old_n, new_n, |i| Some(i));
        self.n = new_n;
        Ok(new_n - 1)
    }

    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.remove_edges_of(v)?;
        let old_n = self.n;
        let last = old_n - 1;
        let new_n = old_n - 1;
        self.table = rebuild(&self.table, old_n, new_n, |i| {
            if i == v {
                None
            } else if i == last {
                Some(v)
            } else {
                Some(i)
            }
        });
        self.n = new_n;
        for e in 0..self.edge_source.len() {
            if self.edge_source[e] == last {
                self.edge_source[e] = v;
            }
            if self.edge_target[e] == last {
                self.edge_target[e] = v;
            }
        }
        Ok(())
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError> {
        if !self.caps.self_edges && u == v {
            return Err(IllegalInput::new(format!(
                "self edges are not permitted on this graph (vertex {u})"
            ))
            .into());
        }
        if self.table[self.cell(u, v)].is_some() {
            return Err(IllegalInput::new(format!(
                "parallel edges are not permitted on this graph ({u}, {v}) already exists)"
            ))
            .into());
        }
        let e = self.edge_source.len();
        self.edge_source.push(u);
        self.edge_target.push(v);
        let cell = self.cell(u, v);
        self.table[cell] = Some(e);
        if u != v {
            let cell = self.cell(v, u);
            self.table[cell] = Some(e);
        }
        Ok(e)
    }

    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        let cell = self.cell(s, t);
        self.table[cell] = None;
        if s != t {
            let cell = self.cell(t, s);
            self.table[cell] = None;
        }
        let last = self.num_edges() - 1;
        if e != last {
            let (ls, lt) = (self.edge_source[last], self.edge_target[last]);
            let cell = self.cell(ls, lt);
            self.table[cell] = Some(e);
            if ls != lt {
                let cell = self.cell(lt, ls);
                self.table[cell] = Some(e);
            }
            self.edge_source[e] = ls;
            self.edge_target[e] = lt;
        }
        self.edge_source.pop();
        self.edge_target.pop();
        Ok(())
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new((0..self.n).filter_map(move |j| self.table[self.cell(v, j)]))
    }

    fn get_edge(&self, u: usize, v: usize) -> Option<usize> {
        self.table[self.cell(u, v)]
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
        self.table.iter_mut().for_each(|c| *c = None);
        self.edge_source.clear();
        self.edge_target.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        self.n = 0;
        self.table.clear();
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

    #[test]
    fn directed_table_o1_lookup_and_removal() {
        let mut g = TableDirectedGraph::new(true);
        for _ in 0..3 {
            g.add_vertex();
        }
        let e = g.add_edge(0, 1).unwrap();
        assert_eq!(g.get_edge(0, 1), Some(e));
        assert!(g.get_edge(1, 0).is_none());
        g.remove_edge(e);
        assert!(g.get_edge(0, 1).is_none());
    }

    #[test]
    fn undirected_table_mirrors_cells() {
        let mut g = TableUndirectedGraph::new(true);
        g.add_vertex();
        g.add_vertex();
        let e = g.add_edge(0, 1).unwrap();
        assert_eq!(g.get_edge(0, 1), Some(e));
        assert_eq!(g.get_edge(1, 0), Some(e));
    }

    #[test]
    fn rejects_parallel_edges_unconditionally() {
        let mut g = TableDirectedGraph::new(true);
        g.add_vertex();
        g.add_vertex();
        g.add_edge(0, 1).unwrap();
        assert!(g.add_edge(0, 1).is_err());
    }

    #[test]
    fn vertex_removal_shrinks_and_relabels() {
        let mut g = TableDirectedGraph::new(true);
        for _ in 0..4 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(3, 0).unwrap();
        g.remove_vertex(1);
        assert_eq!(g.num_vertices(), 3);
        assert!(g.get_edge(0, 1).is_none());
        // old vertex 3 is swapped into slot 1, carrying its edge (3, 0) along as (1, 0)
        assert!(g.get_edge(1, 0).is_some());
    }
}
