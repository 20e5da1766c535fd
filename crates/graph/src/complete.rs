//! Complete graph (§4.E): a fixed-size graph with no adjacency storage at all — every
//! edge index is computed arithmetically from its endpoints, and vice versa. Mutation is
//! forbidden; the vertex count is fixed at construction.

use ixgraph_core::{GraphMutationError, UnsupportedOperation};

use crate::capabilities::GraphCapabilities;
use crate::index_graph::IndexGraph;

/// Encode an unordered pair `u < v` on `n` vertices as an edge index, and its inverse.
///
/// The naive triangular numbering (row `u` owns the `n-1-u` pairs `(u, u+1..n)`) makes row 0
/// own `n-1` pairs and row `n-2` own one, so decoding needs a search over a lopsided range.
/// Pairing row `i` with its complement `n-2-i` gives every pair of rows a combined size of
/// exactly `n`, so both directions become a single division: `bi = e / n` picks the pair of
/// rows, `r = e % n` picks a position inside it. When `n` is even there are `n-1` rows (an
/// odd count) and one middle row is left over; it gets its own size-`n/2` block past the
/// paired ones.
mod pairing {
    pub fn half_pairs(n: usize) -> usize {
        (n - 1) / 2
    }

    pub fn has_middle(n: usize) -> bool {
        (n - 1) % 2 == 1
    }

    pub fn threshold(n: usize) -> usize {
        half_pairs(n) * n
    }

    /// `u < v < n`.
    pub fn encode(n: usize, u: usize, v: usize) -> usize {
        let half_pairs = half_pairs(n);
        if u < half_pairs {
            u * n + (v - u - 1)
        } else if has_middle(n) && u == half_pairs {
            threshold(n) + (v - u - 1)
        } else {
            let bi = n - 2 - u;
            bi * n + (n - 1 - bi) + (v - u - 1)
        }
    }

    /// Inverse of [`encode`]: given `e` among the `n*(n-1)/2` unordered pairs on `n`
    /// vertices, recover `(u, v)` with `u < v`.
    pub fn decode(n: usize, e: usize) -> (usize, usize) {
        let threshold = threshold(n);
        if e < threshold {
            let bi = e / n;
            let r = e % n;
            let large_size = n - 1 - bi;
            if r < large_size {
                (bi, bi + 1 + r)
            } else {
                let u = n - 2 - bi;
                (u, u + 1 + (r - large_size))
            }
        } else {
            let u = half_pairs(n);
            (u, u + 1 + (e - threshold))
        }
    }
}

/// Undirected complete graph on a fixed `n` vertices.
#[derive(Debug, Clone)]
pub struct CompleteGraphUndirected {
    n: usize,
    self_edges: bool,
}

impl CompleteGraphUndirected {
    pub fn new(n: usize, self_edges: bool) -> Self {
        Self { n, self_edges }
    }

    fn non_self_edge_count(&self) -> usize {
        if self.n == 0 {
            0
        } else {
            self.n * (self.n - 1) / 2
        }
    }
}

impl IndexGraph for CompleteGraphUndirected {
    fn num_vertices(&self) -> usize {
        self.n
    }

    fn num_edges(&self) -> usize {
        self.non_self_edge_count() + if self.self_edges { self.n } else { 0 }
    }

    fn capabilities(&self) -> GraphCapabilities {
        GraphCapabilities::new(false, self.self_edges, false)
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn remove_vertex(&mut self, _v: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn add_edge(&mut self, _u: usize, _v: usize) -> Result<usize, GraphMutationError> {
        Err(UnsupportedOperation.into())
    }

    fn remove_edge(&mut self, _e: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        let n = self.n;
        let self_edges = self.self_edges;
        Box::new((0..n).filter(move |&u| u != v).map(move |u| {
            let (a, b) = if u < v { (u, v) } else { (v, u) };
            pairing::encode(n, a, b)
        }).chain(self_edges.then(|| self.non_self_edge_count() + v)))
    }

    fn get_edge(&self, u: usize, v: usize) -> Option<usize> {
        if u == v {
            return self.self_edges.then(|| self.non_self_edge_count() + u);
        }
        let (a, b) = if u < v { (u, v) } else { (v, u) };
        Some(pairing::encode(self.n, a, b))
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edge_endpoints(e).0
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edge_endpoints(e).1
    }

    fn reverse_edge(&mut self, _e: usize) -> Result<(), UnsupportedOperation> {
        // Undirected: orientation carries no meaning; nothing to do.
        Ok(())
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        Box::new(self.clone())
    }
}

impl CompleteGraphUndirected {
    fn edge_endpoints(&self, e: usize) -> (usize, usize) {
        let non_self = self.non_self_edge_count();
        if e >= non_self {
            let u = e - non_self;
            (u, u)
        } else {
            pairing::decode(self.n, e)
        }
    }
}

/// Directed complete graph on a fixed `n` vertices: every ordered pair `(u, v)`, `u != v`,
/// is an edge, indexed `source * (n - 1) + offset`.
#[derive(Debug, Clone)]
pub struct CompleteGraphDirected {
    n: usize,
    self_edges: bool,
}

impl CompleteGraphDirected {
    pub fn new(n: usize, self_edges: bool) -> Self {
        Self { n, self_edges }
    }

    fn non_self_edge_count(&self) -> usize {
        self.n * self.n.saturating_sub(1)
    }

    #[inline]
    fn offset_of(&self, u: usize, v: usize) -> usize {
        if v < u {
            v
        } else {
            v - 1
        }
    }
}

impl IndexGraph for CompleteGraphDirected {
    fn num_vertices(&self) -> usize {
        self.n
    }

    fn num_edges(&self) -> usize {
        self.non_self_edge_count() + if self.self_edges { self.n } else { 0 }
    }

    fn capabilities(&self) -> GraphCapabilities {
        GraphCapabilities::new(true, self.self_edges, false)
    }

    fn add_vertex(&mut self) -> Result<usize, UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn remove_vertex(&mut self, _v: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn add_edge(&mut self, _u: usize, _v: usize) -> Result<usize, GraphMutationError> {
        Err(UnsupportedOperation.into())
    }

    fn remove_edge(&mut self, _e: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn out_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        let n = self.n;
        let self_edges = self.self_edges;
        Box::new(
            (0..n)
                .filter(move |&u| u != v)
                .map(move |u| v * (n - 1) + self.offset_of(v, u))
                .chain(self_edges.then(|| self.non_self_edge_count() + v)),
        )
    }

    fn in_edges(&self, v: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        let n = self.n;
        let self_edges = self.self_edges;
        Box::new(
            (0..n)
                .filter(move |&u| u != v)
                .map(move |u| u * (n - 1) + self.offset_of(u, v))
                .chain(self_edges.then(|| self.non_self_edge_count() + v)),
        )
    }

    fn get_edge(&self, u: usize, v: usize) -> Option<usize> {
        if u == v {
            return self.self_edges.then(|| self.non_self_edge_count() + u);
        }
        Some(u * (self.n - 1) + self.offset_of(u, v))
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edge_endpoints(e).0
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edge_endpoints(e).1
    }

    fn reverse_edge(&mut self, _e: usize) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn clear_edges(&mut self) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn clear(&mut self) -> Result<(), UnsupportedOperation> {
        Err(UnsupportedOperation)
    }

    fn copy(&self) -> Box<dyn IndexGraph> {
        Box::new(self.clone())
    }
}

impl CompleteGraphDirected {
    fn edge_endpoints(&self, e: usize) -> (usize, usize) {
        let non_self = self.non_self_edge_count();
        if e >= non_self {
            let u = e - non_self;
            (u, u)
        } else {
            let u = e / (self.n - 1);
            let off = e % (self.n - 1);
            let v = if off < u { off } else { off + 1 };
            (u, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trips(n: usize) {
        let g = CompleteGraphUndirected::new(n, false);
        let mut seen = std::collections::HashSet::new();
        for u in 0..n {
            for v in (u + 1)..n {
                let e = g.get_edge(u, v).unwrap();
                assert!(e < g.num_edges(), "n={n} u={u} v={v} e={e}");
                assert!(seen.insert(e), "n={n} duplicate edge index {e}");
                let (a, b) = (g.edge_source(e), g.edge_target(e));
                assert_eq!((a.min(b), a.max(b)), (u, v), "n={n} u={u} v={v} e={e}");
            }
        }
        assert_eq!(seen.len(), g.num_edges());
    }

    #[test]
    fn undirected_complete_arithmetic_round_trips() {
        let g = CompleteGraphUndirected::new(5, false);
        assert_eq!(g.num_edges(), 10);
        for u in 0..5 {
            for v in 0..5 {
                if u == v {
                    continue;
                }
                let e = g.get_edge(u, v).unwrap();
                let (a, b) = (g.edge_source(e), g.edge_target(e));
                assert_eq!((a.min(b), a.max(b)), (u.min(v), u.max(v)));
            }
        }
        assert_eq!(g.out_degree(0), 4);
    }

    #[test]
    fn undirected_complete_round_trips_across_even_and_odd_sizes() {
        for n in 2..12 {
            assert_round_trips(n);
        }
    }

    #[test]
    fn directed_complete_arithmetic_round_trips() {
        let g = CompleteGraphDirected::new(4, false);
        assert_eq!(g.num_edges(), 12);
        for u in 0..4 {
            for v in 0..4 {
                if u == v {
                    continue;
                }
                let e = g.get_edge(u, v).unwrap();
                assert_eq!(g.edge_source(e), u);
                assert_eq!(g.edge_target(e), v);
            }
        }
    }

    #[test]
    fn mutation_is_rejected() {
        let mut g = CompleteGraphDirected::new(3, false);
        assert!(g.add_edge(0, 1).is_err());
    }

    #[test]
    fn self_edges_are_appended_after_the_pair_range() {
        let g = CompleteGraphUndirected::new(3, true);
        assert_eq!(g.num_edges(), 3 + 3);
        let e = g.get_edge(1, 1).unwrap();
        assert_eq!(g.edge_source(e), 1);
        assert_eq!(g.edge_target(e), 1);
    }
}
