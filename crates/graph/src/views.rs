//! Graph views (§4.E): thin wrappers over an [`IndexGraph`] that change what mutation or
//! traversal means without copying the underlying storage.

use ixgraph_core::{GraphMutationError, UnsupportedOperation};

use crate::capabilities::{Endpoint, GraphCapabilities};
use crate::index_graph::IndexGraph;

/// Wraps any graph so every mutating operation fails with [`UnsupportedOperation`].
/// Reads are forwarded unchanged.
pub struct UnmodifiableView<'a, G: IndexGraph> {
    inner: &'a G,
}

impl<'a, G: IndexGraph> UnmodifiableView<'a, G> {
    pub fn new(inner: &'a G) -> Self {
        Self { inner }
    }
}

impl<'a, G: IndexGraph> IndexGraph for UnmodifiableView<'a, G> {
    fn num_vertices(&self) -> usize {
        self.inner.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.inner.num_edges()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.inner.capabilities()
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn remove_vertex(&mut self, _v: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn add_edge(&mut self, _u: usize, _v: usize) -> Result<usize, GraphMutationError> {
        Err(UnsupportedOperation.into())
    }

    fn remove_edge(&mut self, _e: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        self.inner.out_edges(v)
    }

    fn in_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        self.inner.in_edges(v)
    }

    fn edge_source(&self, e: usize) -> usize {
        self.inner.edge_source(e)
    }

    fn edge_target(&self, e: usize) -> usize {
        self.inner.edge_target(e)
    }

    fn reverse_edge(&mut self, _e: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        self.inner.copy()
    }
}

/// A directed graph seen backwards: `out_edges`/`in_edges` and source/target are swapped,
/// and `add_edge(u, v)` on the view adds `(v, u)` on the underlying graph.
pub struct ReverseView<'a, G: IndexGraph> {
    inner: &'a mut G,
}

impl<'a, G: IndexGraph> ReverseView<'a, G> {
    pub fn new(inner: &'a mut G) -> Self {
        assert!(
            inner.is_directed(),
            "ReverseView only applies to directed graphs"
        );
        Self { inner }
    }
}

impl<'a, G: IndexGraph> IndexGraph for ReverseView<'a, G> {
    fn num_vertices(&self) -> usize {
        self.inner.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.inner.num_edges()
    }

    fn capabilities(&self) -> GraphCapabilities {
        self.inner.capabilities()
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        self.inner.add_vertex()
    }

    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.inner.remove_vertex(v)
    }

    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError> {
        self.inner.add_edge(v, u)
    }

    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        self.inner.remove_edge(e)
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        self.inner.in_edges(v)
    }

    fn in_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        self.inner.out_edges(v)
    }

    fn edge_source(&self, e: usize) -> usize {
        self.inner.edge_target(e)
    }

    fn edge_target(&self, e: usize) -> usize {
        self.inner.edge_source(e)
    }

    fn edge_endpoint(&self, e: usize, which: Endpoint) -> usize {
        match which {
            Endpoint::Source => self.edge_source(e),
            Endpoint::Target => self.edge_target(e),
        }
    }

    fn reverse_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation> {
        self.inner.reverse_edge(e)
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        self.inner.clear_edges()
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        self.inner.clear()
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        self.inner.copy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayDirectedGraph;

    #[test]
    fn unmodifiable_forwards_reads_and_rejects_mutation() {
        let mut g = ArrayDirectedGraph::new(true, true);
        g.add_vertex();
        g.add_vertex();
        g.add_edge(0, 1).unwrap();
        let mut view = UnmodifiableView::new(&g);
        assert_eq!(view.num_vertices(), 2);
        assert_eq!(view.out_edges(0).collect::<Vec<_>>(), vec![0]);
        assert!(view.add_edge(1, 0).is_err());
    }

    #[test]
    fn reverse_view_swaps_direction() {
        let mut g = ArrayDirectedGraph::new(true, true);
        g.add_vertex();
        g.add_vertex();
        g.add_edge(0, 1).unwrap();
        let mut view = ReverseView::new(&mut g);
        assert_eq!(view.edge_source(0), 1);
        assert_eq!(view.edge_target(0), 0);
        assert_eq!(view.out_edges(1).collect::<Vec<_>>(), vec![0]);
        view.add_edge(0, 1).unwrap(); // adds (1, 0) on the underlying graph
        drop(view);
        assert!(g.get_edge(1, 0).is_some());
    }
}
