//! Minimum spanning trees/forests (§4.I): Prim, Kruskal, Yao-buckets, Borůvka and
//! Karger–Klein–Tarjan for undirected graphs, plus Tarjan's directed MST (arborescence).

mod boruvka;
mod kruskal;
mod prim;
mod tarjan_mdst;
mod yao;

pub use boruvka::boruvka;
pub use kruskal::kruskal;
pub use prim::prim;
pub use tarjan_mdst::tarjan_directed_mst;
pub use yao::{karger_klein_tarjan, yao_buckets};
