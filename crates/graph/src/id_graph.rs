//! The Id↔Index graph wrapper (§4.D): presents an id-keyed API over an [`IndexGraph`],
//! keeping id strategies for vertices and edges in sync with the index graph and
//! forwarding swap events to any user weight container registered by key.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use ixgraph_core::{
    DuplicateId, GraphMutationError, IdStrategy, IndexWeights, MappedIdStrategy, NoSuchId,
    UnsupportedOperation,
};

use crate::index_graph::IndexGraph;

/// Errors surfaced by id-keyed operations: either the id layer rejects the request
/// (unknown/duplicate id) or the underlying index graph rejects the mutation.
#[derive(Debug, thiserror::Error)]
pub enum IdGraphError {
    #[error(transparent)]
    NoSuchId(#[from] NoSuchId),
    #[error(transparent)]
    DuplicateId(#[from] DuplicateId),
    #[error(transparent)]
    GraphMutation(#[from] GraphMutationError),
}

impl From<UnsupportedOperation> for IdGraphError {
    fn from(e: UnsupportedOperation) -> Self {
        IdGraphError::GraphMutation(e.into())
    }
}

struct WeightEntry {
    handle: ixgraph_core::ListenerHandle,
    container: Box<dyn Any>,
}

/// Wraps an [`IndexGraph`] `G` and two id strategies (one for vertices, one for edges),
/// translating every id-keyed operation to the corresponding index operation and back.
pub struct IdGraph<G, SV, SE>
where
    G: IndexGraph,
    SV: IdStrategy,
    SE: IdStrategy,
{
    index_graph: G,
    vertex_ids: SV,
    edge_ids: SE,
    vertex_weights: HashMap<String, WeightEntry>,
    edge_weights: HashMap<String, WeightEntry>,
}

impl<G, SV, SE> IdGraph<G, SV, SE>
where
    G: IndexGraph,
    SV: IdStrategy,
    SE: IdStrategy,
{
    pub fn new(index_graph: G, vertex_ids: SV, edge_ids: SE) -> Self {
        Self {
            index_graph,
            vertex_ids,
            edge_ids,
            vertex_weights: HashMap::new(),
            edge_weights: HashMap::new(),
        }
    }

    pub fn index_graph(&self) -> &G {
        &self.index_graph
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_ids.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_ids.len()
    }

    /// Add a vertex. `id = None` requests an auto-generated id (only meaningful when `SV`
    /// supports it, e.g. `MappedIdStrategy<u64>::new_idx_auto` called by the caller first).
    pub fn add_vertex(&mut self, id: Option<SV::Id>) -> Result<SV::Id, IdGraphError> {
        let (id, idx) = self.vertex_ids.new_idx(id)?;
        let actual = self.index_graph.add_vertex()?;
        debug_assert_eq!(idx, actual, "vertex id strategy and index graph diverged");
        Ok(id)
    }

    pub fn remove_vertex(&mut self, id: SV::Id) -> Result<(), IdGraphError> {
        let idx = self.vertex_ids.id_to_index(id)?;
        self.index_graph.remove_vertex(idx)?;
        self.vertex_ids.remove_idx(idx);
        Ok(())
    }

    pub fn add_edge(
        &mut self,
        u: SV::Id,
        v: SV::Id,
        id: Option<SE::Id>,
    ) -> Result<SE::Id, IdGraphError> {
        let ui = self.vertex_ids.id_to_index(u)?;
        let vi = self.vertex_ids.id_to_index(v)?;
        let idx = self.index_graph.add_edge(ui, vi)?;
        let (id, registered_idx) = self.edge_ids.new_idx(id)?;
        debug_assert_eq!(idx, registered_idx, "edge id strategy and index graph diverged");
        Ok(id)
    }

    pub fn remove_edge(&mut self, id: SE::Id) -> Result<(), IdGraphError> {
        let idx = self.edge_ids.id_to_index(id)?;
        self.index_graph.remove_edge(idx)?;
        self.edge_ids.remove_idx(idx);
        Ok(())
    }

    pub fn get_edge(&self, u: SV::Id, v: SV::Id) -> Result<Option<SE::Id>, NoSuchId> {
        let ui = self.vertex_ids.id_to_index(u)?;
        let vi = self.vertex_ids.id_to_index(v)?;
        Ok(self
            .index_graph
            .get_edge(ui, vi)
            .map(|e| self.edge_ids.index_to_id(e)))
    }

    pub fn edge_source(&self, id: SE::Id) -> Result<SV::Id, NoSuchId> {
        let idx = self.edge_ids.id_to_index(id)?;
        Ok(self.vertex_ids.index_to_id(self.index_graph.edge_source(idx)))
    }

    pub fn edge_target(&self, id: SE::Id) -> Result<SV::Id, NoSuchId> {
        let idx = self.edge_ids.id_to_index(id)?;
        Ok(self.vertex_ids.index_to_id(self.index_graph.edge_target(idx)))
    }

    /// Out-edges of `v`, translated lazily from index to edge id as the iterator advances.
    pub fn out_edges(&self, v: SV::Id) -> Result<impl Iterator<Item = SE::Id> + '_, NoSuchId> {
        let idx = self.vertex_ids.id_to_index(v)?;
        Ok(self
            .index_graph
            .out_edges(idx)
            .map(move |e| self.edge_ids.index_to_id(e)))
    }

    pub fn in_edges(&self, v: SV::Id) -> Result<impl Iterator<Item = SE::Id> + '_, NoSuchId> {
        let idx = self.vertex_ids.id_to_index(v)?;
        Ok(self
            .index_graph
            .in_edges(idx)
            .map(move |e| self.edge_ids.index_to_id(e)))
    }

    /// Register a vertex weight container under `key`, subscribing it to vertex swap
    /// events so it keeps following vertex add/swap/remove. Panics if `key` is already in
    /// use (registering the same key twice is a programming error, not a runtime input).
    pub fn register_vertex_weights<T: Clone + 'static>(
        &mut self,
        key: impl Into<String>,
        weights: Rc<RefCell<IndexWeights<T>>>,
    ) {
        let key = key.into();
        assert!(
            !self.vertex_weights.contains_key(&key),
            "vertex weight key {key:?} already registered"
        );
        let w = Rc::clone(&weights);
        let handle = self
            .vertex_ids
            .add_swap_listener(Box::new(move |e| w.borrow_mut().apply(e)));
        self.vertex_weights.insert(
            key,
            WeightEntry {
                handle,
                container: Box::new(weights),
            },
        );
    }

    pub fn register_edge_weights<T: Clone + 'static>(
        &mut self,
        key: impl Into<String>,
        weights: Rc<RefCell<IndexWeights<T>>>,
    ) {
        let key = key.into();
        assert!(
            !self.edge_weights.contains_key(&key),
            "edge weight key {key:?} already registered"
        );
        let w = Rc::clone(&weights);
        let handle = self
            .edge_ids
            .add_swap_listener(Box::new(move |e| w.borrow_mut().apply(e)));
        self.edge_weights.insert(
            key,
            WeightEntry {
                handle,
                container: Box::new(weights),
            },
        );
    }

    pub fn vertex_weights<T: Clone + 'static>(
        &self,
        key: &str,
    ) -> Option<Rc<RefCell<IndexWeights<T>>>> {
        self.vertex_weights
            .get(key)
            .and_then(|entry| entry.container.downcast_ref::<Rc<RefCell<IndexWeights<T>>>>())
            .cloned()
    }

    pub fn edge_weights<T: Clone + 'static>(
        &self,
        key: &str,
    ) -> Option<Rc<RefCell<IndexWeights<T>>>> {
        self.edge_weights
            .get(key)
            .and_then(|entry| entry.container.downcast_ref::<Rc<RefCell<IndexWeights<T>>>>())
            .cloned()
    }

    pub fn unregister_vertex_weights(&mut self, key: &str) {
        if let Some(entry) = self.vertex_weights.remove(key) {
            self.vertex_ids.remove_swap_listener(entry.handle);
        }
    }

    pub fn unregister_edge_weights(&mut self, key: &str) {
        if let Some(entry) = self.edge_weights.remove(key) {
            self.edge_ids.remove_swap_listener(entry.handle);
        }
    }
}

/// Convenience entry points for the common case where vertex ids are auto-minted `u64`s.
impl<G, SE> IdGraph<G, MappedIdStrategy<u64>, SE>
where
    G: IndexGraph,
    SE: IdStrategy,
{
    pub fn add_vertex_auto(&mut self) -> Result<u64, UnsupportedOperation> {
        let (id, idx) = self.vertex_ids.new_idx_auto();
        let actual = self.index_graph.add_vertex()?;
        debug_assert_eq!(idx, actual, "vertex id strategy and index graph diverged");
        Ok(id)
    }
}

/// Convenience entry points for the common case where edge ids are auto-minted `u64`s.
impl<G, SV> IdGraph<G, SV, MappedIdStrategy<u64>>
where
    G: IndexGraph,
    SV: IdStrategy,
{
    pub fn add_edge_auto(&mut self, u: SV::Id, v: SV::Id) -> Result<u64, IdGraphError> {
        let ui = self.vertex_ids.id_to_index(u)?;
        let vi = self.vertex_ids.id_to_index(v)?;
        let idx = self.index_graph.add_edge(ui, vi)?;
        let (id, registered_idx) = self.edge_ids.new_idx_auto();
        debug_assert_eq!(idx, registered_idx, "edge id strategy and index graph diverged");
        Ok(id)
    }
}
