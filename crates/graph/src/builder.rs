//! Graph builder (§6): a single entry point that resolves directedness, capabilities,
//! expected vertex/edge counts and a storage backend choice into a concrete [`IndexGraph`],
//! optionally wrapped by an [`IdGraph`] when the caller wants id-keyed access.

use ixgraph_core::{IdGenerator, IdStrategy, MappedIdStrategy};

use crate::array::{ArrayDirectedGraph, ArrayUndirectedGraph};
use crate::id_graph::IdGraph;
use crate::index_graph::IndexGraph;
use crate::linked::{LinkedDirectedGraph, LinkedUndirectedGraph};
use crate::table::{TableDirectedGraph, TableUndirectedGraph};

/// Storage backend choice (§4.C). A typed enum stands in for the distilled spec's
/// free-form `setOption("backend", ...)` string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Array,
    Linked,
    Table,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Array
    }
}

/// The six concrete backends, behind one enum so callers can pick a backend at runtime
/// and still get a single static type out of `build()`.
pub enum BuiltGraph {
    ArrayDirected(ArrayDirectedGraph),
    ArrayUndirected(ArrayUndirectedGraph),
    LinkedDirected(LinkedDirectedGraph),
    LinkedUndirected(LinkedUndirectedGraph),
    TableDirected(TableDirectedGraph),
    TableUndirected(TableUndirectedGraph),
}

impl BuiltGraph {
    pub fn as_index_graph(&self) -> &dyn IndexGraph {
        match self {
            BuiltGraph::ArrayDirected(g) => g,
            BuiltGraph::ArrayUndirected(g) => g,
            BuiltGraph::LinkedDirected(g) => g,
            BuiltGraph::LinkedUndirected(g) => g,
            BuiltGraph::TableDirected(g) => g,
            BuiltGraph::TableUndirected(g) => g,
        }
    }

    pub fn as_index_graph_mut(&mut self) -> &mut dyn IndexGraph {
        match self {
            BuiltGraph::ArrayDirected(g) => g,
            BuiltGraph::ArrayUndirected(g) => g,
            BuiltGraph::LinkedDirected(g) => g,
            BuiltGraph::LinkedUndirected(g) => g,
            BuiltGraph::TableDirected(g) => g,
            BuiltGraph::TableUndirected(g) => g,
        }
    }
}

/// Builder for an [`IndexGraph`] (§6 "Graph construction").
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    directed: bool,
    self_edges: bool,
    parallel_edges: bool,
    expected_vertices: usize,
    expected_edges: usize,
    backend: Backend,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            directed: true,
            self_edges: false,
            parallel_edges: false,
            expected_vertices: 0,
            expected_edges: 0,
            backend: Backend::default(),
        }
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn self_edges(mut self, allowed: bool) -> Self {
        self.self_edges = allowed;
        self
    }

    pub fn parallel_edges(mut self, allowed: bool) -> Self {
        self.parallel_edges = allowed;
        self
    }

    /// Hint used to pre-size the backend's internal storage; never affects semantics.
    pub fn expected_vertices(mut self, n: usize) -> Self {
        self.expected_vertices = n;
        self
    }

    pub fn expected_edges(mut self, m: usize) -> Self {
        self.expected_edges = m;
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Build the bare index graph (indices are the ids). The Table backend cannot
    /// represent parallel edges regardless of what was requested here; its capabilities
    /// always report `parallel_edges = false`.
    pub fn build(self) -> BuiltGraph {
        match (self.backend, self.directed) {
            (Backend::Array, true) => {
                let mut g = ArrayDirectedGraph::new(self.self_edges, self.parallel_edges);
                for _ in 0..self.expected_vertices {
                    g.add_vertex();
                }
                BuiltGraph::ArrayDirected(g)
            }
            (Backend::Array, false) => {
                let mut g = ArrayUndirectedGraph::new(self.self_edges, self.parallel_edges);
                for _ in 0..self.expected_vertices {
                    g.add_vertex();
                }
                BuiltGraph::ArrayUndirected(g)
            }
            (Backend::Linked, true) => {
                let mut g = LinkedDirectedGraph::new(self.self_edges, self.parallel_edges);
                for _ in 0..self.expected_vertices {
                    g.add_vertex();
                }
                BuiltGraph::LinkedDirected(g)
            }
            (Backend::Linked, false) => {
                let mut g = LinkedUndirectedGraph::new(self.self_edges, self.parallel_edges);
                for _ in 0..self.expected_vertices {
                    g.add_vertex();
                }
                BuiltGraph::LinkedUndirected(g)
            }
            (Backend::Table, true) => {
                let mut g = TableDirectedGraph::new(self.self_edges);
                for _ in 0..self.expected_vertices {
                    g.add_vertex();
                }
                BuiltGraph::TableDirected(g)
            }
            (Backend::Table, false) => {
                let mut g = TableUndirectedGraph::new(self.self_edges);
                for _ in 0..self.expected_vertices {
                    g.add_vertex();
                }
                BuiltGraph::TableUndirected(g)
            }
        }
    }

    /// Build an id graph wrapping a freshly built index graph, minting `u64` vertex and
    /// edge ids with `generator`.
    pub fn build_id_graph<G: IndexGraph>(
        index_graph: G,
        generator: IdGenerator,
    ) -> IdGraph<G, MappedIdStrategy<u64>, MappedIdStrategy<u64>> {
        IdGraph::new(
            index_graph,
            MappedIdStrategy::new(generator),
            MappedIdStrategy::new(generator),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_the_requested_backend_and_size() {
        let built = GraphBuilder::new()
            .directed(true)
            .self_edges(true)
            .expected_vertices(4)
            .backend(Backend::Linked)
            .build();
        assert!(matches!(built, BuiltGraph::LinkedDirected(_)));
        assert_eq!(built.as_index_graph().num_vertices(), 4);
    }

    #[test]
    fn build_id_graph_mints_ids() {
        let built = GraphBuilder::new().directed(false).build();
        let index_graph = match built {
            BuiltGraph::ArrayUndirected(g) => g,
            _ => unreachable!(),
        };
        let mut ig = GraphBuilder::build_id_graph(index_graph, IdGenerator::Sequential);
        let a = ig.add_vertex_auto().unwrap();
        let b = ig.add_vertex_auto().unwrap();
        assert_ne!(a, b);
        ig.add_edge_auto(a, b).unwrap();
        assert_eq!(ig.num_edges(), 1);
    }
}
