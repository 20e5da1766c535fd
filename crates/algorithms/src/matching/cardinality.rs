use hashbrown::HashSet;

use ixgraph_graph::IndexGraph;

use super::MatchingResult;

/// Kuhn's algorithm for bipartite cardinality matching: repeatedly try to augment the
/// matching from each left vertex via an alternating-path DFS. O(V*E).
pub fn bipartite_cardinality_matching(graph: &dyn IndexGraph, left: &[usize], right: &[usize]) -> MatchingResult {
    let right_set: HashSet<usize> = right.iter().copied().collect();
    let n = graph.num_vertices();
    let mut match_left_of: Vec<Option<usize>> = vec![None; n];
    let mut match_edge_of: Vec<Option<usize>> = vec![None; n];

    for &l in left {
        let mut visited = vec![false; n];
        try_augment(graph, l, &right_set, &mut visited, &mut match_left_of, &mut match_edge_of);
    }

    MatchingResult {
        edges: match_edge_of.into_iter().flatten().collect(),
    }
}

fn try_augment(
    graph: &dyn IndexGraph,
    l: usize,
    right_set: &HashSet<usize>,
    visited: &mut [bool],
    match_left_of: &mut [Option<usize>],
    match_edge_of: &mut [Option<usize>],
) -> bool {
    for e in graph.out_edges(l) {
        let r = graph.edge_endpoint_other(e, l);
        if !right_set.contains(&r) || visited[r] {
            continue;
        }
        visited[r] = true;
        let free_or_augmentable = match match_left_of[r] {
            None => true,
            Some(prev) => try_augment(graph, prev, right_set, visited, match_left_of, match_edge_of),
        };
        if free_or_augmentable {
            match_left_of[r] = Some(l);
            match_edge_of[r] = Some(e);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayUndirectedGraph;

    #[test]
    fn matches_every_left_vertex_when_possible() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..4 {
            g.add_vertex();
        }
        // left = {0,1}, right = {2,3}
        g.add_edge(0, 2).unwrap();
        g.add_edge(0, 3).unwrap();
        g.add_edge(1, 2).unwrap();

        let m = bipartite_cardinality_matching(&g, &[0, 1], &[2, 3]);
        assert_eq!(m.edges.len(), 2);
    }

    #[test]
    fn leaves_unmatchable_vertex_unmatched() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 2).unwrap();
        // vertex 1 has no edge into the right side at all.
        let m = bipartite_cardinality_matching(&g, &[0, 1], &[2]);
        assert_eq!(m.edges.len(), 1);
    }
}
