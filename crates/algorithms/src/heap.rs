//! Referenceable pairing heap (§4.F): an arena-backed multiway-tree heap supporting
//! `insert`, `find_min`, `extract_min`, `decrease_key`, `remove` and `meld`, all keyed by
//! a stable [`HeapRef`] that survives reshuffling of the underlying tree.
//!
//! Each node tracks `prev_or_parent` plus a boolean discriminant (`is_first_child`)
//! instead of the usual "first child points to parent, rest point to siblings" trick
//! encoded purely by pointer identity, since the arena has no null/sentinel pointer to
//! distinguish the two cases implicitly.

use ixgraph_core::IllegalInput;

/// Stable reference to a node, valid until that node is extracted or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapRef(usize);

struct Node<K, V> {
    key: K,
    value: V,
    prev_or_parent: Option<usize>,
    is_first_child: bool,
    next: Option<usize>,
    child: Option<usize>,
}

/// A pairing heap over keys `K` (ascending order: `find_min` returns the smallest key).
pub struct PairingHeap<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

impl<K: Ord, V> Default for PairingHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> PairingHeap<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn alloc(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev_or_parent: None,
            is_first_child: false,
            next: None,
            child: None,
        };
        if let Some(idx) = self.free.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn node(&self, idx: usize) -> &Node<K, V> {
        self.nodes[idx].as_ref().expect("dangling heap node reference")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.nodes[idx].as_mut().expect("dangling heap node reference")
    }

    /// Combine two heap roots into one, making the larger-key root the first child of the
    /// smaller-key one. O(1).
    fn meld_roots(&mut self, a: usize, b: usize) -> usize {
        let (small, big) = if self.node(a).key <= self.node(b).key {
            (a, b)
        } else {
            (b, a)
        };
        let old_child = self.node(small).child;
        self.node_mut(big).next = old_child;
        self.node_mut(big).prev_or_parent = Some(small);
        self.node_mut(big).is_first_child = true;
        if let Some(oc) = old_child {
            self.node_mut(oc).prev_or_parent = Some(big);
            self.node_mut(oc).is_first_child = false;
        }
        self.node_mut(small).child = Some(big);
        small
    }

    fn meld_root_option(&mut self, a: Option<usize>, b: Option<usize>) -> Option<usize> {
        match (a, b) {
            (None, None) => None,
            (Some(x), None) | (None, Some(x)) => Some(x),
            (Some(x), Some(y)) => Some(self.meld_roots(x, y)),
        }
    }

    pub fn insert(&mut self, key: K, value: V) -> HeapRef {
        let idx = self.alloc(key, value);
        self.root = self.meld_root_option(self.root, Some(idx));
        self.len += 1;
        HeapRef(idx)
    }

    pub fn find_min(&self) -> Option<HeapRef> {
        self.root.map(HeapRef)
    }

    pub fn peek_min(&self) -> Option<(&K, &V)> {
        self.root.map(|r| {
            let n = self.node(r);
            (&n.key, &n.value)
        })
    }

    /// Detach every child of `idx`, returning the new subheap root formed by the classic
    /// two-pass pairing merge (left-to-right pairwise, then right-to-left fold).
    fn collapse_children(&mut self, idx: usize) -> Option<usize> {
        let mut children = Vec::new();
        let mut cursor = self.node(idx).child;
        while let Some(c) = cursor {
            cursor = self.node(c).next;
            let n = self.node_mut(c);
            n.next = None;
            n.prev_or_parent = None;
            n.is_first_child = false;
            children.push(c);
        }
        self.node_mut(idx).child = None;

        if children.is_empty() {
            return None;
        }
        let mut pairs = Vec::with_capacity(children.len().div_ceil(2));
        let mut it = children.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => pairs.push(self.meld_roots(a, b)),
                None => pairs.push(a),
            }
        }
        let mut acc = pairs.pop();
        while let Some(p) = pairs.pop() {
            acc = Some(self.meld_roots(p, acc.expect("non-empty pairs fold")));
        }
        acc
    }

    /// Remove and return the minimum (key, value) pair.
    pub fn extract_min(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        let new_root = self.collapse_children(root);
        self.root = new_root;
        self.len -= 1;
        let node = self.nodes[root].take().expect("root node present");
        self.free.push(root);
        Some((node.key, node.value))
    }

    /// Cut `idx` out of its parent's child list; `idx` must not be the current root.
    fn cut(&mut self, idx: usize) {
        let prev_or_parent = self.node(idx).prev_or_parent;
        let next = self.node(idx).next;
        let is_first_child = self.node(idx).is_first_child;
        let parent_or_prev = prev_or_parent.expect("cut() called on a root node");

        if is_first_child {
            self.node_mut(parent_or_prev).child = next;
        } else {
            self.node_mut(parent_or_prev).next = next;
        }
        if let Some(n) = next {
            self.node_mut(n).prev_or_parent = prev_or_parent;
            self.node_mut(n).is_first_child = is_first_child;
        }
        let node = self.node_mut(idx);
        node.prev_or_parent = None;
        node.next = None;
        node.is_first_child = false;
    }

    /// Lower the key of `r`. Fails with [`IllegalInput`] if `new_key` is not `<=` the
    /// current key.
    pub fn decrease_key(&mut self, r: HeapRef, new_key: K) -> Result<(), IllegalInput>
    where
        K: std::fmt::Debug,
    {
        let idx = r.0;
        if new_key > self.node(idx).key {
            return Err(IllegalInput::new(format!(
                "decrease_key: new key {new_key:?} is greater than the current key"
            )));
        }
        self.node_mut(idx).key = new_key;
        if self.root == Some(idx) {
            return Ok(());
        }
        self.cut(idx);
        self.root = Some(self.meld_roots(self.root.expect("non-root decrease_key implies a root exists"), idx));
        Ok(())
    }

    /// Remove an arbitrary node from the heap.
    pub fn remove(&mut self, r: HeapRef) -> (K, V) {
        let idx = r.0;
        if self.root == Some(idx) {
            return self.extract_min().expect("root exists by precondition");
        }
        self.cut(idx);
        let children_root = self.collapse_children(idx);
        self.root = self.meld_root_option(self.root, children_root);
        self.len -= 1;
        let node = self.nodes[idx].take().expect("removed node present");
        self.free.push(idx);
        (node.key, node.value)
    }

    /// Merge `other` into `self`, consuming it. O(1): only the two roots are melded; the
    /// arenas are concatenated so existing [`HeapRef`]s into `other` remain valid, offset
    /// by this heap's prior node count.
    pub fn meld(&mut self, other: Self) {
        let offset = self.nodes.len();
        let other_root = other.root.map(|r| r + offset);
        for slot in other.nodes.into_iter() {
            self.nodes.push(slot.map(|mut n| {
                n.prev_or_parent = n.prev_or_parent.map(|p| p + offset);
                n.next = n.next.map(|p| p + offset);
                n.child = n.child.map(|p| p + offset);
                n
            }));
        }
        for f in other.free {
            self.free.push(f + offset);
        }
        self.root = self.meld_root_option(self.root, other_root);
        self.len += other.len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_extract_in_sorted_order() {
        let mut h = PairingHeap::new();
        for &k in &[5, 1, 4, 2, 3] {
            h.insert(k, k.to_string());
        }
        let mut out = Vec::new();
        while let Some((k, _)) = h.extract_min() {
            out.push(k);
        }
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn decrease_key_reorders_extraction() {
        let mut h = PairingHeap::new();
        h.insert(10, "a");
        let r = h.insert(20, "b");
        h.insert(30, "c");
        h.decrease_key(r, 1).unwrap();
        assert_eq!(h.extract_min().unwrap(), (1, "b"));
    }

    #[test]
    fn remove_arbitrary_node() {
        let mut h = PairingHeap::new();
        h.insert(1, "a");
        let r = h.insert(2, "b");
        h.insert(3, "c");
        let (k, v) = h.remove(r);
        assert_eq!((k, v), (2, "b"));
        assert_eq!(h.len(), 2);
        let mut out = Vec::new();
        while let Some((k, _)) = h.extract_min() {
            out.push(k);
        }
        assert_eq!(out, vec![1, 3]);
    }

    #[test]
    fn decrease_key_rejects_increase() {
        let mut h = PairingHeap::new();
        let r = h.insert(5, ());
        assert!(h.decrease_key(r, 6).is_err());
    }

    #[test]
    fn meld_combines_two_heaps() {
        let mut a = PairingHeap::new();
        a.insert(3, "a3");
        a.insert(1, "a1");
        let mut b = PairingHeap::new();
        b.insert(2, "b2");
        b.insert(5, "b5");
        a.meld(b);
        let mut out = Vec::new();
        while let Some((k, _)) = a.extract_min() {
            out.push(k);
        }
        assert_eq!(out, vec![1, 2, 3, 5]);
    }
}

/// Total order over `f64` for use as a pairing-heap key (NaN sorts as greater than
/// everything, so it is never selected as a minimum).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatKey(pub f64);

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.partial_cmp(&other.0).unwrap_or_else(|| {
            if self.0.is_nan() && other.0.is_nan() {
                std::cmp::Ordering::Equal
            } else if self.0.is_nan() {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Less
            }
        })
    }
}

/// Typed specialization: integer-keyed heap, no boxing of the key.
pub type IntHeap<V> = PairingHeap<i64, V>;
/// Typed specialization: double-keyed heap via [`FloatKey`]'s total order.
pub type DoubleHeap<V> = PairingHeap<FloatKey, V>;
