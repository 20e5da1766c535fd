//! Static lowest common ancestor via Euler tour + sparse-table RMQ (§4.J). Preprocessing
//! is O(n log n) (a plain sparse table rather than the ±1-restricted O(n) Farach-Colton and
//! Bender structure — documented simplification, see DESIGN.md); queries are O(1).

use ixgraph_graph::IndexGraph;

fn euler_visit(
    graph: &dyn IndexGraph,
    v: usize,
    d: u32,
    visited: &mut [bool],
    euler: &mut Vec<usize>,
    depth: &mut Vec<u32>,
    first: &mut [usize],
) {
    first[v] = euler.len();
    euler.push(v);
    depth.push(d);
    let children: Vec<usize> = graph
        .out_edges(v)
        .map(|e| graph.edge_endpoint_other(e, v))
        .filter(|&w| !visited[w])
        .collect();
    for w in children {
        visited[w] = true;
        euler_visit(graph, w, d + 1, visited, euler, depth, first);
        euler.push(v);
        depth.push(d);
    }
}

pub struct Lca {
    euler: Vec<usize>,
    depth: Vec<u32>,
    first: Vec<usize>,
    sparse: Vec<Vec<usize>>,
    log: Vec<u32>,
}

impl Lca {
    /// Build the structure over a tree rooted at `root`, given as an undirected
    /// [`IndexGraph`] (only tree edges are followed; `root` must reach every vertex used in
    /// a later query).
    pub fn build(graph: &dyn IndexGraph, root: usize) -> Self {
        let n = graph.num_vertices();
        let mut euler = Vec::with_capacity(2 * n);
        let mut depth = Vec::with_capacity(2 * n);
        let mut first = vec![usize::MAX; n];
        let mut visited = vec![false; n];

        visited[root] = true;
        euler_visit(graph, root, 0, &mut visited, &mut euler, &mut depth, &mut first);

        let len = euler.len();
        let mut log = vec![0u32; len + 1];
        for i in 2..=len {
            log[i] = log[i / 2] + 1;
        }
        let levels = (log[len.max(1)] + 1) as usize;
        let mut sparse = vec![vec![0usize; len]; levels];
        sparse[0] = (0..len).collect();
        for k in 1..levels {
            let half = 1usize << (k - 1);
            for i in 0..=len.saturating_sub(1usize << k) {
                let a = sparse[k - 1][i];
                let b = sparse[k - 1][i + half];
                sparse[k][i] = if depth[a] <= depth[b] { a } else { b };
            }
        }

        Self {
            euler,
            depth,
            first,
            sparse,
            log,
        }
    }

    /// Lowest common ancestor of `u` and `v`.
    pub fn query(&self, u: usize, v: usize) -> usize {
        let mut l = self.first[u];
        let mut r = self.first[v];
        if l > r {
            std::mem::swap(&mut l, &mut r);
        }
        let k = self.log[r - l + 1] as usize;
        let half = 1usize << k;
        let a = self.sparse[k][l];
        let b = self.sparse[k][r + 1 - half];
        let idx = if self.depth[a] <= self.depth[b] { a } else { b };
        self.euler[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayUndirectedGraph;

    /// Rooted at 0:   0
    ///              /   \
    ///             1     2
    ///            / \
    ///           3   4
    fn sample_tree() -> ArrayUndirectedGraph {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..5 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 3).unwrap();
        g.add_edge(1, 4).unwrap();
        g
    }

    #[test]
    fn lca_of_siblings_is_their_parent() {
        let g = sample_tree();
        let lca = Lca::build(&g, 0);
        assert_eq!(lca.query(3, 4), 1);
        assert_eq!(lca.query(1, 2), 0);
        assert_eq!(lca.query(3, 2), 0);
    }

    #[test]
    fn lca_of_a_vertex_with_itself_is_itself() {
        let g = sample_tree();
        let lca = Lca::build(&g, 0);
        assert_eq!(lca.query(4, 4), 4);
    }

    #[test]
    fn lca_of_ancestor_and_descendant() {
        let g = sample_tree();
        let lca = Lca::build(&g, 0);
        assert_eq!(lca.query(0, 4), 0);
        assert_eq!(lca.query(1, 3), 1);
    }
}
