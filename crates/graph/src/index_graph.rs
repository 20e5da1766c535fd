//! The `IndexGraph` contract (§4.C): vertices are exactly `0..num_vertices()`, edges are
//! exactly `0..num_edges()`, and every backend (array/linked/table, directed/undirected)
//! implements the same surface so algorithms can be written once against the trait.

use ixgraph_core::{GraphMutationError, UnsupportedOperation};

use crate::capabilities::{Endpoint, GraphCapabilities};

/// A graph whose vertex and edge identifiers are contiguous indices. Implemented by the
/// six concrete backends in this crate (`Array`/`Linked`/`Table` × directed/undirected)
/// and by the views in [`crate::views`].
pub trait IndexGraph {
    fn num_vertices(&self) -> usize;

    fn num_edges(&self) -> usize;

    fn capabilities(&self) -> GraphCapabilities;

    #[inline]
    fn is_directed(&self) -> bool {
        self.capabilities().directed
    }

    fn vertices(&self) -> std::ops::Range<usize> {
        0..self.num_vertices()
    }

    fn edges(&self) -> std::ops::Range<usize> {
        0..self.num_edges()
    }

    /// Append a new vertex, returning its index (always `num_vertices() - 1` afterwards).
    /// Fails with [`UnsupportedOperation`] on a view that forbids mutation.
    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation>;

    /// Remove vertex `v`. If `v` is not the last index, the last vertex is swapped into
    /// slot `v` first; listeners registered on the vertex swap list are notified with
    /// `(v, n-1)` before the swap, then the list shrinks.
    fn remove_vertex(&mut self, v: usize) -> Result<(), UnsupportedOperation>;

    /// Add an edge `u -> v` (or the unordered pair `{u, v}` for undirected backends).
    /// Fails with [`GraphMutationError::IllegalInput`] if this would violate the declared
    /// capabilities (a parallel edge when `parallel_edges = false`, a self edge when
    /// `self_edges = false`), before any mutation occurs, or with
    /// [`GraphMutationError::Unsupported`] on a view that forbids mutation.
    fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, GraphMutationError>;

    /// Remove edge `e`, following the same swap-with-last protocol as `remove_vertex` but
    /// over the edge index space.
    fn remove_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation>;

    fn remove_edges_of(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        self.remove_out_edges_of(v)?;
        if self.is_directed() {
            self.remove_in_edges_of(v)?;
        }
        Ok(())
    }

    fn remove_out_edges_of(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        let edges: Vec<usize> = self.out_edges(v).collect();
        for e in edges {
            self.remove_edge(e)?;
        }
        Ok(())
    }

    fn remove_in_edges_of(&mut self, v: usize) -> Result<(), UnsupportedOperation> {
        let edges: Vec<usize> = self.in_edges(v).collect();
        for e in edges {
            self.remove_edge(e)?;
        }
        Ok(())
    }

    /// Edges leaving `v` (for undirected backends: every edge incident to `v`).
    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_>;

    /// Edges entering `v`. For undirected backends this is identical to `out_edges`.
    fn in_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        self.out_edges(v)
    }

    fn out_degree(&self, v: usize) -> usize {
        self.out_edges(v).count()
    }

    fn in_degree(&self, v: usize) -> usize {
        self.in_edges(v).count()
    }

    /// The first edge found with these endpoints, if any.
    fn get_edge(&self, u: usize, v: usize) -> Option<usize> {
        self.out_edges(u).find(|&e| {
            let (s, t) = (self.edge_source(e), self.edge_target(e));
            (s == u && t == v) || (!self.is_directed() && s == v && t == u)
        })
    }

    /// All (parallel) edges between `u` and `v`.
    fn get_edges(&self, u: usize, v: usize) -> Vec<usize> {
        self.out_edges(u)
            .filter(|&e| {
                let (s, t) = (self.edge_source(e), self.edge_target(e));
                (s == u && t == v) || (!self.is_directed() && s == v && t == u)
            })
            .collect()
    }

    fn edge_source(&self, e: usize) -> usize;

    fn edge_target(&self, e: usize) -> usize;

    fn edge_endpoint(&self, e: usize, which: Endpoint) -> usize {
        match which {
            Endpoint::Source => self.edge_source(e),
            Endpoint::Target => self.edge_target(e),
        }
    }

    /// The endpoint of `e` that is *not* `v` (`v` must be one of the two endpoints).
    fn edge_endpoint_other(&self, e: usize, v: usize) -> usize {
        let s = self.edge_source(e);
        let t = self.edge_target(e);
        if s == v {
            t
        } else {
            debug_assert_eq!(t, v, "vertex {v} is not an endpoint of edge {e}");
            s
        }
    }

    /// Swap source and target of a directed edge in place.
    fn reverse_edge(&mut self, e: usize) -> Result<(), UnsupportedOperation>;

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation>;

    fn clear(&mut self) -> Result<(), UnsupportedOperation>;

    /// A deep copy of this graph as a concrete, owned value behind the same trait object
    /// shape it was accessed through.
    fn copy(&self) -> Box<dyn IndexGraph>;

    /// `self`, for code that is generic over something that might already be an
    /// `&dyn IndexGraph` or a concrete backend and wants a uniform way to get one.
    fn index_graph(&self) -> &dyn IndexGraph
    where
        Self: Sized,
    {
        self
    }
}
