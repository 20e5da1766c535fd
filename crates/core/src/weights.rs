//! Index-keyed weight containers: typed arrays that mirror an identifier strategy's
//! lifecycle (extend on add, exchange on swap, drop-last on remove).

use std::cell::RefCell;
use std::rc::Rc;

use crate::id::{IdStrategy, SwapEvent};

/// A typed array keyed by vertex/edge index, with a default value for positions that were
/// never explicitly set.
#[derive(Debug, Clone)]
pub struct IndexWeights<T> {
    data: Vec<T>,
    default: T,
}

impl<T: Clone> IndexWeights<T> {
    pub fn new(default: T) -> Self {
        Self {
            data: Vec::new(),
            default,
        }
    }

    pub fn with_capacity(default: T, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            default,
        }
    }

    #[inline]
    pub fn get(&self, idx: usize) -> &T {
        &self.data[idx]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }

    #[inline]
    pub fn set(&mut self, idx: usize, value: T) {
        self.data[idx] = value;
    }

    pub fn default_weight(&self) -> &T {
        &self.default
    }

    pub fn set_default_weight(&mut self, default: T) {
        self.default = default;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Grow the backing storage to `new_len`, filling new slots with the default.
    pub fn expand(&mut self, new_len: usize) {
        if new_len > self.data.len() {
            self.data.resize(new_len, self.default.clone());
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Clone this container's data and subscribe the clone to `id_strategy`'s swap
    /// listeners, so it tracks future `add`/`swap`/`remove` events the same way a
    /// container registered through `IdGraph::register_vertex_weights` would.
    pub fn copy<S: IdStrategy>(&self, id_strategy: &mut S) -> Rc<RefCell<Self>>
    where
        T: 'static,
    {
        let copy = Rc::new(RefCell::new(self.clone()));
        let w = Rc::clone(&copy);
        id_strategy.add_swap_listener(Box::new(move |e| w.borrow_mut().apply(e)));
        copy
    }

    /// Apply one swap-protocol event to this container: `Add` extends by one default
    /// slot, `Swap` exchanges two slots, `Remove` drops the last slot. This is the method
    /// a container's swap-listener closure calls when subscribed to an id strategy.
    pub fn apply(&mut self, event: SwapEvent) {
        match event {
            SwapEvent::Add(idx) => {
                debug_assert_eq!(idx, self.data.len());
                self.data.push(self.default.clone());
            }
            SwapEvent::Swap(a, b) => {
                self.data.swap(a, b);
            }
            SwapEvent::Remove(idx) => {
                debug_assert_eq!(idx, self.data.len() - 1);
                self.data.pop();
            }
        }
    }
}

pub type ByteWeights = IndexWeights<i8>;
pub type ShortWeights = IndexWeights<i16>;
pub type IntWeights = IndexWeights<i32>;
pub type LongWeights = IndexWeights<i64>;
pub type FloatWeights = IndexWeights<f32>;
pub type DoubleWeights = IndexWeights<f64>;
pub type BoolWeights = IndexWeights<bool>;
pub type CharWeights = IndexWeights<char>;
pub type ObjWeights<T> = IndexWeights<Option<std::rc::Rc<T>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_mirrors_id_strategy_seed_scenario() {
        // Seed scenario 6: vertices 0..4 with weight == index, remove vertex 2.
        let mut w = IndexWeights::new(0i64);
        for i in 0..5i64 {
            w.expand(w.len() + 1);
            w.set(i as usize, i);
        }
        assert_eq!(w.as_slice(), &[0, 1, 2, 3, 4]);

        // remove_idx(2) protocol: fire Swap(2, 4), then Remove(4).
        w.apply(SwapEvent::Swap(2, 4));
        w.apply(SwapEvent::Remove(4));
        assert_eq!(w.as_slice(), &[0, 1, 4, 3]);
    }

    #[test]
    fn copy_tracks_further_swap_events_on_the_id_strategy() {
        use crate::id::DefaultIdStrategy;

        let mut strategy = DefaultIdStrategy::<usize>::new();
        for _ in 0..5 {
            strategy.new_idx(None).unwrap();
        }
        let mut w = IndexWeights::new(0i64);
        w.expand(5);
        for i in 0..5i64 {
            w.set(i as usize, i);
        }

        let copy = w.copy(&mut strategy);
        assert_eq!(copy.borrow().as_slice(), &[0, 1, 2, 3, 4]);

        strategy.remove_idx(2);
        assert_eq!(copy.borrow().as_slice(), &[0, 1, 4, 3]);
        // The original is untouched: it never subscribed to the strategy itself.
        assert_eq!(w.as_slice(), &[0, 1, 2, 3, 4]);
    }
}
