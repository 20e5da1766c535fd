//! Index graph representations, the id↔index wrapper, graph views, the complete graph and
//! the graph builder.

pub mod adjacency;
pub mod array;
pub mod builder;
pub mod capabilities;
pub mod complete;
pub mod id_graph;
pub mod index_graph;
pub mod linked;
pub mod table;
pub mod views;

pub use array::{ArrayDirectedGraph, ArrayUndirectedGraph};
pub use builder::{Backend, BuiltGraph, GraphBuilder};
pub use capabilities::{Endpoint, GraphCapabilities};
pub use complete::{CompleteGraphDirected, CompleteGraphUndirected};
pub use id_graph::{IdGraph, IdGraphError};
pub use index_graph::IndexGraph;
pub use linked::{LinkedDirectedGraph, LinkedUndirectedGraph};
pub use table::{TableDirectedGraph, TableUndirectedGraph};
pub use views::{ReverseView, UnmodifiableView};
