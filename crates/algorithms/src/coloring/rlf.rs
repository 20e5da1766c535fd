use hashbrown::HashSet;

use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

use super::reject_self_edges;

fn adjacent_to_set(graph: &dyn IndexGraph, v: usize, set: &HashSet<usize>) -> bool {
    graph.out_edges(v).any(|e| set.contains(&graph.edge_endpoint_other(e, v)))
}

fn neighbors_adjacent_to_set(graph: &dyn IndexGraph, v: usize, set: &HashSet<usize>) -> usize {
    graph
        .out_edges(v)
        .filter(|&e| adjacent_to_set(graph, graph.edge_endpoint_other(e, v), set))
        .count()
}

/// RLF (Recursive Largest First) coloring (§4.J): build one color class at a time as a
/// maximal independent set, seeded by the highest-degree uncolored vertex, then repeatedly
/// add whichever remaining non-adjacent candidate has the most neighbors already blocked by
/// the growing set (this shrinks the candidate pool the fastest).
pub fn rlf(graph: &dyn IndexGraph) -> Result<Vec<usize>, IllegalInput> {
    reject_self_edges(graph)?;
    let n = graph.num_vertices();
    let mut colors: Vec<Option<usize>> = vec![None; n];
    let mut uncolored: HashSet<usize> = (0..n).collect();
    let mut color = 0usize;

    while let Some(&start) = uncolored.iter().max_by_key(|&&v| graph.out_degree(v)) {
        let mut set: HashSet<usize> = HashSet::new();
        set.insert(start);
        uncolored.remove(&start);

        let mut candidates: HashSet<usize> = uncolored.iter().copied().filter(|&u| !adjacent_to_set(graph, u, &set)).collect();

        while let Some(&best) = candidates.iter().max_by_key(|&&v| neighbors_adjacent_to_set(graph, v, &set)) {
            set.insert(best);
            uncolored.remove(&best);
            candidates.remove(&best);
            candidates.retain(|&u| !adjacent_to_set(graph, u, &set));
        }

        for &v in &set {
            colors[v] = Some(color);
        }
        color += 1;
    }

    Ok(colors.into_iter().map(|c| c.expect("every vertex is placed into exactly one color class")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayUndirectedGraph;

    #[test]
    fn properly_colors_a_triangle() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 2).unwrap();

        let colors = rlf(&g).unwrap();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn isolated_vertices_share_one_color() {
        let mut g = ArrayUndirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        let colors = rlf(&g).unwrap();
        assert_eq!(colors, vec![0, 0, 0]);
    }

    #[test]
    fn rejects_self_edges() {
        let mut g = ArrayUndirectedGraph::new(true, false);
        g.add_vertex();
        g.add_edge(0, 0).unwrap();
        assert!(rlf(&g).is_err());
    }
}
