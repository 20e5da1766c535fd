//! Single- and all-pairs shortest paths (§4.G): Dijkstra, Bellman–Ford, Johnson, and a
//! linear-time DAG relaxation order.

mod bellman_ford;
mod dag;
mod dijkstra;
mod johnson;

pub use bellman_ford::bellman_ford;
pub use dag::dag_shortest_paths;
pub use dijkstra::dijkstra;
pub use johnson::johnson;
