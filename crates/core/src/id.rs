//! Identifier strategy: the bijection between user ids and contiguous indices `0..n`.
//!
//! Two flavors, per the spec: [`DefaultIdStrategy`] where the id space *is* the index
//! space (ids are handed out as `0, 1, 2, ...` and never diverge from it), and
//! [`MappedIdStrategy`] where ids are user-chosen (or drawn from a counter/random pool)
//! and kept in sync with indices through two directional tables.
//!
//! Both flavors notify [`SwapListener`]s synchronously, in registration order, and the
//! swap event fires *before* the backing storage swaps so a listener can still read the
//! old value at the slot being overwritten.

use hashbrown::HashMap;
use rand::RngCore;
use std::hash::Hash;

use crate::error::{DuplicateId, NoSuchId};

/// Bound satisfied by any type usable as a user-facing vertex/edge id.
pub trait GraphId: Copy + Eq + Hash + std::fmt::Debug {}
impl<T: Copy + Eq + Hash + std::fmt::Debug> GraphId for T {}

/// A [`GraphId`] that can be constructed from, and converted back to, a plain index.
/// Only types satisfying this bound can back a [`DefaultIdStrategy`].
pub trait IndexId: GraphId {
    fn from_index(index: usize) -> Self;
    fn to_index(self) -> usize;
}

macro_rules! impl_index_id {
    ($($t:ty),*) => {
        $(
            impl IndexId for $t {
                #[inline]
                fn from_index(index: usize) -> Self { index as $t }
                #[inline]
                fn to_index(self) -> usize { self as usize }
            }
        )*
    };
}
impl_index_id!(usize, u32, u64);

/// The event a [`SwapListener`] is notified with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapEvent {
    /// Index `a` and index `b` are about to be exchanged (fired before the exchange).
    Swap(usize, usize),
    /// A new slot was appended at this index.
    Add(usize),
    /// The last slot (this index) was just popped.
    Remove(usize),
}

/// Opaque handle returned by `add_swap_listener`, used to unregister later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

type ListenerBox = Box<dyn FnMut(SwapEvent)>;

#[derive(Default)]
struct Listeners {
    next: u64,
    entries: Vec<(u64, ListenerBox)>,
}

impl Listeners {
    fn add(&mut self, listener: ListenerBox) -> ListenerHandle {
        let id = self.next;
        self.next += 1;
        self.entries.push((id, listener));
        ListenerHandle(id)
    }

    fn remove(&mut self, handle: ListenerHandle) {
        self.entries.retain(|(id, _)| *id != handle.0);
    }

    fn fire(&mut self, event: SwapEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

/// How a [`MappedIdStrategy`] mints ids when the caller doesn't supply one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenerator {
    /// Hand out `0, 1, 2, ...` as `u64`s, skipping any value already taken.
    Sequential,
    /// Draw `u64`s from the thread RNG, retrying on collision.
    Random,
}

/// Common read/registration surface shared by both id strategy flavors.
pub trait IdStrategy {
    type Id: GraphId;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn id_to_index(&self, id: Self::Id) -> Result<usize, NoSuchId>;

    fn index_to_id(&self, index: usize) -> Self::Id;

    /// Register a new index for `id` (`None` ⇒ auto-generate). Returns `(id, index)`.
    fn new_idx(&mut self, id: Option<Self::Id>) -> Result<(Self::Id, usize), DuplicateId>;

    /// Remove the index `idx`: if it isn't already last, swap the last index into `idx`
    /// first (firing `Swap(idx, n-1)`), then shrink (firing `Remove(n-1)`). Returns the id
    /// that was removed.
    fn remove_idx(&mut self, idx: usize) -> Self::Id;

    fn add_swap_listener(&mut self, listener: ListenerBox) -> ListenerHandle;

    fn remove_swap_listener(&mut self, handle: ListenerHandle);
}

/// `id == index` always. Zero bookkeeping beyond a count; used when the caller is content
/// to treat the index graph itself as the id space (e.g. `Id = usize`).
pub struct DefaultIdStrategy<Id: IndexId> {
    len: usize,
    listeners: Listeners,
    _marker: std::marker::PhantomData<Id>,
}

impl<Id: IndexId> Default for DefaultIdStrategy<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: IndexId> DefaultIdStrategy<Id> {
    pub fn new() -> Self {
        Self {
            len: 0,
            listeners: Listeners::default(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<Id: IndexId> IdStrategy for DefaultIdStrategy<Id> {
    type Id = Id;

    fn len(&self) -> usize {
        self.len
    }

    fn id_to_index(&self, id: Id) -> Result<usize, NoSuchId> {
        let idx = id.to_index();
        if idx < self.len {
            Ok(idx)
        } else {
            Err(NoSuchId)
        }
    }

    fn index_to_id(&self, index: usize) -> Id {
        debug_assert!(index < self.len, "index out of range in DefaultIdStrategy");
        Id::from_index(index)
    }

    fn new_idx(&mut self, id: Option<Id>) -> Result<(Id, usize), DuplicateId> {
        if let Some(id) = id {
            if id.to_index() != self.len {
                // Any id other than the next contiguous index is, by construction,
                // either already taken or would break contiguity.
                return Err(DuplicateId);
            }
        }
        let index = self.len;
        self.len += 1;
        self.listeners.fire(SwapEvent::Add(index));
        Ok((Id::from_index(index), index))
    }

    fn remove_idx(&mut self, idx: usize) -> Id {
        debug_assert!(idx < self.len, "remove_idx out of range");
        let last = self.len - 1;
        let removed = Id::from_index(idx);
        if idx != last {
            self.listeners.fire(SwapEvent::Swap(idx, last));
        }
        self.len = last;
        self.listeners.fire(SwapEvent::Remove(last));
        removed
    }

    fn add_swap_listener(&mut self, listener: ListenerBox) -> ListenerHandle {
        self.listeners.add(listener)
    }

    fn remove_swap_listener(&mut self, handle: ListenerHandle) {
        self.listeners.remove(handle);
    }
}

/// Arbitrary user ids, kept bijective with `0..n` via two directional tables.
pub struct MappedIdStrategy<Id: GraphId> {
    index_to_id: Vec<Id>,
    id_to_index: HashMap<Id, usize>,
    generator: IdGenerator,
    next_seq: u64,
    listeners: Listeners,
}

impl<Id: GraphId> MappedIdStrategy<Id> {
    pub fn new(generator: IdGenerator) -> Self {
        Self {
            index_to_id: Vec::new(),
            id_to_index: HashMap::new(),
            generator,
            next_seq: 0,
            listeners: Listeners::default(),
        }
    }
}

/// Ids minted by the built-in generators are always `u64`; callers supplying their own
/// id type must always pass an explicit id to `new_idx`.
impl MappedIdStrategy<u64> {
    fn mint(&mut self) -> u64 {
        match self.generator {
            IdGenerator::Sequential => loop {
                let candidate = self.next_seq;
                self.next_seq += 1;
                if !self.id_to_index.contains_key(&candidate) {
                    return candidate;
                }
            },
            IdGenerator::Random => {
                let mut rng = rand::thread_rng();
                loop {
                    let candidate = rng.next_u64();
                    if !self.id_to_index.contains_key(&candidate) {
                        return candidate;
                    }
                }
            }
        }
    }
}

impl<Id: GraphId> IdStrategy for MappedIdStrategy<Id> {
    type Id = Id;

    fn len(&self) -> usize {
        self.index_to_id.len()
    }

    fn id_to_index(&self, id: Id) -> Result<usize, NoSuchId> {
        self.id_to_index.get(&id).copied().ok_or(NoSuchId)
    }

    fn index_to_id(&self, index: usize) -> Id {
        self.index_to_id[index]
    }

    fn new_idx(&mut self, id: Option<Id>) -> Result<(Id, usize), DuplicateId> {
        let id = match id {
            Some(id) => {
                if self.id_to_index.contains_key(&id) {
                    return Err(DuplicateId);
                }
                id
            }
            None => {
                // Only reachable when `Id = u64` through the inherent `mint` impl above;
                // other id types must always supply an explicit id.
                unreachable!(
                    "MappedIdStrategy::new_idx(None) requires Id = u64; use the u64 inherent impl"
                )
            }
        };
        let index = self.index_to_id.len();
        self.index_to_id.push(id);
        self.id_to_index.insert(id, index);
        self.listeners.fire(SwapEvent::Add(index));
        Ok((id, index))
    }

    fn remove_idx(&mut self, idx: usize) -> Id {
        let last = self.index_to_id.len() - 1;
        let removed_id = self.index_to_id[idx];
        if idx != last {
            self.listeners.fire(SwapEvent::Swap(idx, last));
            self.index_to_id.swap(idx, last);
            let moved_id = self.index_to_id[idx];
            self.id_to_index.insert(moved_id, idx);
        }
        self.index_to_id.pop();
        self.id_to_index.remove(&removed_id);
        self.listeners.fire(SwapEvent::Remove(last));
        removed_id
    }

    fn add_swap_listener(&mut self, listener: ListenerBox) -> ListenerHandle {
        self.listeners.add(listener)
    }

    fn remove_swap_listener(&mut self, handle: ListenerHandle) {
        self.listeners.remove(handle);
    }
}

impl MappedIdStrategy<u64> {
    /// Register a new index, auto-generating an id with the configured [`IdGenerator`].
    pub fn new_idx_auto(&mut self) -> (u64, usize) {
        let id = self.mint();
        self.new_idx(Some(id)).expect("minted id cannot collide")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn default_strategy_tracks_contiguous_indices() {
        let mut s = DefaultIdStrategy::<usize>::new();
        for i in 0..5 {
            let (id, idx) = s.new_idx(None).unwrap();
            assert_eq!(id, i);
            assert_eq!(idx, i);
        }
        assert_eq!(s.len(), 5);
        let removed = s.remove_idx(2);
        assert_eq!(removed, 2);
        assert_eq!(s.len(), 4);
        assert_eq!(s.index_to_id(2), 2);
    }

    #[test]
    fn mapped_strategy_swap_listener_order_and_payload() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut s = MappedIdStrategy::<&'static str>::new(IdGenerator::Sequential);
        let (a, _) = s.new_idx(Some("a")).unwrap();
        let (b, _) = s.new_idx(Some("b")).unwrap();
        let (c, _) = s.new_idx(Some("c")).unwrap();
        assert_eq!((a, b, c), ("a", "b", "c"));

        let log1 = Rc::clone(&log);
        let h1 = s.add_swap_listener(Box::new(move |e| log1.borrow_mut().push(("first", e))));
        let log2 = Rc::clone(&log);
        let _h2 = s.add_swap_listener(Box::new(move |e| log2.borrow_mut().push(("second", e))));

        // Remove "a" (index 0): "c" (last, index 2) swaps into slot 0.
        let removed = s.remove_idx(0);
        assert_eq!(removed, "a");
        assert_eq!(s.index_to_id(0), "c");
        assert_eq!(s.id_to_index("c").unwrap(), 0);
        assert!(s.id_to_index("a").is_err());

        let events = log.borrow();
        assert_eq!(
            &*events,
            &[
                ("first", SwapEvent::Swap(0, 2)),
                ("second", SwapEvent::Swap(0, 2)),
                ("first", SwapEvent::Remove(2)),
                ("second", SwapEvent::Remove(2)),
            ]
        );
        drop(events);

        s.remove_swap_listener(h1);
        log.borrow_mut().clear();
        s.new_idx(Some("d")).unwrap();
        assert_eq!(&*log.borrow(), &[("second", SwapEvent::Add(2))]);
    }

    #[test]
    fn duplicate_and_missing_id_errors() {
        let mut s = MappedIdStrategy::<u32>::new(IdGenerator::Sequential);
        s.new_idx(Some(1)).unwrap();
        assert!(s.new_idx(Some(1)).is_err());
        assert!(s.id_to_index(99).is_err());
    }
}
