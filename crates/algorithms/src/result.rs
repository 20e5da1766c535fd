//! Shared result envelopes (§3 "Result envelopes"): `Path`, `SsspResult`, `ApspResult`,
//! `MstResult`, and the `FlowNetwork`/`WeightFn` traits algorithms are parameterized over.

use ixgraph_core::IllegalInput;

/// A weight function over edge indices, returning `f64`. Implementations may localize
/// (copy into an index-keyed array) before a hot loop; a plain closure is the common case.
pub trait WeightFn {
    fn weight(&self, edge: usize) -> f64;
}

impl<F: Fn(usize) -> f64> WeightFn for F {
    fn weight(&self, edge: usize) -> f64 {
        self(edge)
    }
}

/// Capacities and flows attached to an edge set (§3 "FlowNetwork", §6). The fast path is a
/// pair of index-keyed arrays; a slow path backed by user getters/setters also satisfies
/// this trait.
pub trait FlowNetwork {
    fn capacity(&self, edge: usize) -> f64;
    fn flow(&self, edge: usize) -> f64;
    fn set_flow(&mut self, edge: usize, value: f64);
}

/// A simple index-keyed flow network: two parallel `Vec<f64>`, one per edge.
#[derive(Debug, Clone)]
pub struct ArrayFlowNetwork {
    capacities: Vec<f64>,
    flows: Vec<f64>,
}

impl ArrayFlowNetwork {
    pub fn new(capacities: Vec<f64>) -> Self {
        let flows = vec![0.0; capacities.len()];
        Self { capacities, flows }
    }
}

impl FlowNetwork for ArrayFlowNetwork {
    fn capacity(&self, edge: usize) -> f64 {
        self.capacities[edge]
    }

    fn flow(&self, edge: usize) -> f64 {
        self.flows[edge]
    }

    fn set_flow(&mut self, edge: usize, value: f64) {
        self.flows[edge] = value;
    }
}

/// An ordered walk from `source` to `target` as a list of edge indices (§3 "Path").
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub source: usize,
    pub target: usize,
    pub edges: Vec<usize>,
}

impl Path {
    pub fn weight(&self, w: &impl WeightFn) -> f64 {
        self.edges.iter().map(|&e| w.weight(e)).sum()
    }
}

/// Single-source shortest paths result (§3, §4.G). Distances are `f64::INFINITY` for
/// unreached vertices. If a negative cycle is reachable from the source, distances are not
/// meaningful and `negative_cycle` carries a witness walk instead.
#[derive(Debug, Clone)]
pub struct SsspResult {
    pub source: usize,
    dist: Vec<f64>,
    backtrack: Vec<Option<usize>>,
    negative_cycle: Option<Vec<usize>>,
}

impl SsspResult {
    pub fn new(source: usize, dist: Vec<f64>, backtrack: Vec<Option<usize>>) -> Self {
        Self {
            source,
            dist,
            backtrack,
            negative_cycle: None,
        }
    }

    pub fn with_negative_cycle(source: usize, n: usize, cycle: Vec<usize>) -> Self {
        Self {
            source,
            dist: vec![f64::INFINITY; n],
            backtrack: vec![None; n],
            negative_cycle: Some(cycle),
        }
    }

    pub fn distance(&self, v: usize) -> f64 {
        self.dist[v]
    }

    pub fn found_negative_cycle(&self) -> bool {
        self.negative_cycle.is_some()
    }

    pub fn negative_cycle(&self) -> Option<&[usize]> {
        self.negative_cycle.as_deref()
    }

    /// Reconstruct the path from the source to `target`, given the graph the backtrack
    /// edges were computed against (needed to walk from an edge back to its source vertex).
    pub fn path_on(&self, edge_endpoint_other: impl Fn(usize, usize) -> usize, target: usize) -> Option<Path> {
        if self.dist[target].is_infinite() {
            return None;
        }
        let mut edges = Vec::new();
        let mut v = target;
        while v != self.source {
            let e = self.backtrack[v]?;
            edges.push(e);
            v = edge_endpoint_other(e, v);
        }
        edges.reverse();
        Some(Path {
            source: self.source,
            target,
            edges,
        })
    }
}

/// All-pairs shortest paths result (§4.G Johnson). Decoded distance:
/// `dist(s,t) = sssp[s].distance(t) + potential[t] - potential[s]`.
#[derive(Debug, Clone)]
pub struct ApspResult {
    per_source: Vec<SsspResult>,
    potential: Vec<f64>,
    negative_cycle: Option<Vec<usize>>,
}

impl ApspResult {
    pub fn new(per_source: Vec<SsspResult>, potential: Vec<f64>) -> Self {
        Self {
            per_source,
            potential,
            negative_cycle: None,
        }
    }

    pub fn with_negative_cycle(cycle: Vec<usize>) -> Self {
        Self {
            per_source: Vec::new(),
            potential: Vec::new(),
            negative_cycle: Some(cycle),
        }
    }

    pub fn found_negative_cycle(&self) -> bool {
        self.negative_cycle.is_some()
    }

    pub fn negative_cycle(&self) -> Option<&[usize]> {
        self.negative_cycle.as_deref()
    }

    /// Decoded distance `s -> t`. Panics if a negative cycle was found (no distances exist).
    pub fn distance(&self, s: usize, t: usize) -> f64 {
        assert!(self.negative_cycle.is_none(), "no distances: negative cycle present");
        let raw = self.per_source[s].distance(t);
        if raw.is_infinite() {
            return raw;
        }
        raw + self.potential[t] - self.potential[s]
    }

    pub fn sssp(&self, s: usize) -> &SsspResult {
        &self.per_source[s]
    }
}

/// Minimum spanning tree/forest result (§4.I): the chosen edge indices.
#[derive(Debug, Clone)]
pub struct MstResult {
    pub edges: Vec<usize>,
}

impl MstResult {
    pub fn weight(&self, w: &impl WeightFn) -> f64 {
        self.edges.iter().map(|&e| w.weight(e)).sum()
    }
}

pub(crate) fn negative_weight_err(e: usize) -> IllegalInput {
    IllegalInput::new(format!("edge {e} has negative weight, which Dijkstra cannot traverse"))
}
