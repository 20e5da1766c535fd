//! Disjoint-set forest with union-by-rank and path compression, grounded on the shape of
//! petgraph's `UnionFind` (rank-tagged parent array, recursive `find`, path-compressing
//! `find_mut`), modernized and extended with a per-root payload slot so callers (e.g. the
//! directed MST contraction) can carry an accumulated value per component without a second
//! side table.

/// A disjoint-set forest over `0..n`. `P` is an optional payload merged pairwise on
/// `union`; use `()` when no payload is needed.
pub struct UnionFind<P = ()> {
    parent: Vec<usize>,
    rank: Vec<u8>,
    payload: Vec<P>,
}

impl UnionFind<()> {
    pub fn new(n: usize) -> Self {
        Self::with_payload(n, std::iter::repeat_with(|| ()).take(n).collect())
    }
}

impl<P> UnionFind<P> {
    pub fn with_payload(n: usize, payload: Vec<P>) -> Self {
        assert_eq!(payload.len(), n, "one payload slot per element required");
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            payload,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the representative of `x`'s set, compressing the path walked along the way.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    pub fn payload(&mut self, x: usize) -> &P {
        let root = self.find(x);
        &self.payload[root]
    }

    pub fn payload_mut(&mut self, x: usize) -> &mut P {
        let root = self.find(x);
        &mut self.payload[root]
    }

    /// Union the sets containing `a` and `b`. `merge` combines the payloads of the two
    /// roots (winner first) when the sets were actually distinct; returns `false` if `a`
    /// and `b` were already in the same set.
    pub fn union_with(&mut self, a: usize, b: usize, merge: impl FnOnce(P, P) -> P) -> bool
    where
        P: Default,
    {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (winner, loser) = if self.rank[ra] < self.rank[rb] {
            (rb, ra)
        } else {
            (ra, rb)
        };
        if self.rank[ra] == self.rank[rb] {
            self.rank[winner] += 1;
        }
        self.parent[loser] = winner;
        let winner_payload = std::mem::take(&mut self.payload[winner]);
        let loser_payload = std::mem::take(&mut self.payload[loser]);
        self.payload[winner] = merge(winner_payload, loser_payload);
        true
    }
}

impl UnionFind<()> {
    /// Union without any payload bookkeeping; returns `false` if already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        self.union_with(a, b, |_, _| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_fully_disjoint() {
        let mut uf = UnionFind::new(4);
        assert!(!uf.same_set(0, 1));
        assert!(uf.same_set(2, 2));
    }

    #[test]
    fn union_merges_sets_and_path_compresses() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(1, 2);
        assert!(uf.same_set(0, 2));
        assert!(!uf.same_set(0, 3));
        uf.union(3, 4);
        uf.union(2, 3);
        assert!(uf.same_set(0, 4));
    }

    #[test]
    fn repeated_union_is_a_no_op() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(0, 1));
        assert!(!uf.union(0, 1));
    }

    #[test]
    fn payload_follows_the_winning_root() {
        let mut uf = UnionFind::with_payload(3, vec![1i64, 10, 100]);
        uf.union_with(0, 1, |a, b| a + b);
        uf.union_with(0, 2, |a, b| a + b);
        assert_eq!(*uf.payload(0), 111);
        assert_eq!(*uf.payload(2), 111);
    }
}
