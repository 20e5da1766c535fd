use ixgraph_core::IllegalInput;
use ixgraph_graph::IndexGraph;

use crate::result::{MstResult, WeightFn};

struct WorkEdge {
    u: usize,
    v: usize,
    w: f64,
    orig: usize,
    /// Set when `v` was a genuine multi-member cycle contracted this round: the specific
    /// round-local node this edge would override if chosen as the super-node's in-edge.
    replaces: Option<usize>,
}

struct RoundData {
    n: usize,
    /// This round's node id -> next round's node id.
    members: Vec<Vec<usize>>,
    /// This round's node id -> its own cheapest in-edge (original edge id), before any
    /// override from an edge entering its contracted super-node from outside.
    default_orig: Vec<Option<usize>>,
    /// Edges carried forward into the next round, searched by `orig` during unwind.
    new_edges: Vec<WorkEdge>,
}

/// Tarjan/Edmonds minimum arborescence (§4.I "Directed MST"): repeatedly find each
/// non-root vertex's cheapest incoming edge, contract any cycle those choices form into a
/// single super-vertex with edge weights reduced by the cycle member's own edge weight,
/// and recurse on the contracted graph. When a round finds no new cycle the current
/// round's choices are final; the contraction history is then unwound to recover the
/// original edges.
///
/// This is the classical O(VE) iterative formulation (cycle contraction via a
/// visited-marker walk, no lazy-additive lowest-incoming-edge heap with a union-find
/// payload) rather than the heap-driven O(E log V) variant; implementing a pairing heap
/// with O(1) lazy "add a constant to every key" is a separate data structure from the
/// plain referenceable heap this crate otherwise uses, and was judged out of proportion to
/// this algorithm's share of the crate. See DESIGN.md.
///
/// Fails with [`IllegalInput`] if `graph` is not directed, or if some vertex cannot reach
/// an arborescence rooted at `root` (no incoming edge survives contraction for it).
pub fn tarjan_directed_mst(
    graph: &dyn IndexGraph,
    weight: &impl WeightFn,
    root: usize,
) -> Result<MstResult, IllegalInput> {
    if !graph.is_directed() {
        return Err(IllegalInput::new("directed MST requires a directed graph"));
    }
    let n0 = graph.num_vertices();

    let mut edges: Vec<WorkEdge> = graph
        .edges()
        .filter(|&e| graph.edge_source(e) != graph.edge_target(e))
        .map(|e| WorkEdge {
            u: graph.edge_source(e),
            v: graph.edge_target(e),
            w: weight.weight(e),
            orig: e,
            replaces: None,
        })
        .collect();

    let mut cur_n = n0;
    let mut cur_root = root;
    let mut rounds: Vec<RoundData> = Vec::new();

    loop {
        let mut in_node: Vec<Option<usize>> = vec![None; cur_n];
        let mut in_edge_ref: Vec<Option<usize>> = vec![None; cur_n];
        for (idx, e) in edges.iter().enumerate() {
            if e.v == cur_root {
                continue;
            }
            let better = match in_edge_ref[e.v] {
                None => true,
                Some(cur) => e.w < edges[cur].w,
            };
            if better {
                in_node[e.v] = Some(e.u);
                in_edge_ref[e.v] = Some(idx);
            }
        }
        for v in 0..cur_n {
            if v != cur_root && in_node[v].is_none() {
                return Err(IllegalInput::new(format!(
                    "vertex {v} has no incoming edge after contraction; no arborescence rooted at {root} exists"
                )));
            }
        }

        let mut comp = vec![usize::MAX; cur_n];
        let mut vis = vec![usize::MAX; cur_n];
        let mut num_cycles = 0usize;
        for start in 0..cur_n {
            let mut v = start;
            while vis[v] != start && comp[v] == usize::MAX && v != cur_root {
                vis[v] = start;
                v = in_node[v].expect("non-root node has an in-edge by the reachability check above");
            }
            if v != cur_root && comp[v] == usize::MAX {
                let cid = num_cycles;
                num_cycles += 1;
                let mut u = in_node[v].expect("cycle member has an in-edge");
                comp[v] = cid;
                while u != v {
                    comp[u] = cid;
                    u = in_node[u].expect("cycle member has an in-edge");
                }
            }
        }
        let mut next_n = num_cycles;
        for v in 0..cur_n {
            if comp[v] == usize::MAX {
                comp[v] = next_n;
                next_n += 1;
            }
        }

        if num_cycles == 0 {
            let selected: Vec<Option<usize>> =
                (0..cur_n).map(|v| in_edge_ref[v].map(|idx| edges[idx].orig)).collect();
            return Ok(unwind(rounds, selected, root, n0));
        }

        let mut members = vec![Vec::new(); next_n];
        for v in 0..cur_n {
            members[comp[v]].push(v);
        }
        let default_orig: Vec<Option<usize>> =
            (0..cur_n).map(|v| in_edge_ref[v].map(|idx| edges[idx].orig)).collect();

        let mut new_edges = Vec::new();
        for e in &edges {
            let cu = comp[e.u];
            let cv = comp[e.v];
            if cu == cv {
                continue;
            }
            if comp[e.v] < num_cycles {
                let reduced = e.w - edges[in_edge_ref[e.v].expect("cycle member has an in-edge")].w;
                new_edges.push(WorkEdge {
                    u: cu,
                    v: cv,
                    w: reduced,
                    orig: e.orig,
                    replaces: Some(e.v),
                });
            } else {
                new_edges.push(WorkEdge {
                    u: cu,
                    v: cv,
                    w: e.w,
                    orig: e.orig,
                    replaces: None,
                });
            }
        }

        let new_root = comp[cur_root];
        rounds.push(RoundData {
            n: cur_n,
            members,
            default_orig,
            new_edges: new_edges
                .iter()
                .map(|e| WorkEdge {
                    u: e.u,
                    v: e.v,
                    w: e.w,
                    orig: e.orig,
                    replaces: e.replaces,
                })
                .collect(),
        });
        edges = new_edges;
        cur_n = next_n;
        cur_root = new_root;
    }
}

fn unwind(rounds: Vec<RoundData>, mut selected: Vec<Option<usize>>, root: usize, n0: usize) -> MstResult {
    for round in rounds.into_iter().rev() {
        let mut selected_cur: Vec<Option<usize>> = vec![None; round.n];
        for (j, members) in round.members.iter().enumerate() {
            let Some(orig_id) = selected.get(j).copied().flatten() else {
                continue;
            };
            if members.len() == 1 {
                selected_cur[members[0]] = Some(orig_id);
            } else {
                let edge = round
                    .new_edges
                    .iter()
                    .find(|e| e.orig == orig_id)
                    .expect("surviving edge with this original id must exist");
                let v_star = edge.replaces.expect("edge entering a contracted cycle must carry `replaces`");
                selected_cur[v_star] = Some(orig_id);
                for &m in members {
                    if m != v_star {
                        selected_cur[m] = round.default_orig[m];
                    }
                }
            }
        }
        selected = selected_cur;
    }

    let edges = (0..n0).filter(|&v| v != root).filter_map(|v| selected[v]).collect();
    MstResult { edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ixgraph_graph::ArrayDirectedGraph;
    use std::collections::HashMap;

    /// Seed scenario 5: complete directed graph on 4 vertices, weight(e) = target id,
    /// root 0. Expected: edges (0,1),(0,2),(0,3), total weight 6.
    #[test]
    fn seed_scenario_five_directed_mst() {
        let mut g = ArrayDirectedGraph::new(false, true);
        for _ in 0..4 {
            g.add_vertex();
        }
        let mut weights = HashMap::new();
        // Root's own edges first so ties (same target weight from any source) resolve to
        // the root, matching the scenario's expected edge set.
        for &(u, v) in &[(0, 1), (0, 2), (0, 3)] {
            let e = g.add_edge(u, v).unwrap();
            weights.insert(e, v as f64);
        }
        for u in 0..4usize {
            for v in 0..4usize {
                if u == v || u == 0 {
                    continue;
                }
                let e = g.add_edge(u, v).unwrap();
                weights.insert(e, v as f64);
            }
        }
        let w = |e: usize| weights[&e];

        let mst = tarjan_directed_mst(&g, &w, 0).unwrap();
        assert_eq!(mst.edges.len(), 3);
        assert_eq!(mst.weight(&w), 6.0);
        let pairs: std::collections::HashSet<(usize, usize)> = mst
            .edges
            .iter()
            .map(|&e| (g.edge_source(e), g.edge_target(e)))
            .collect();
        assert!(pairs.contains(&(0, 1)));
        assert!(pairs.contains(&(0, 2)));
        assert!(pairs.contains(&(0, 3)));
    }

    #[test]
    fn unreachable_vertex_is_rejected() {
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        g.add_edge(0, 1).unwrap();
        let w = |_: usize| 1.0;
        assert!(tarjan_directed_mst(&g, &w, 0).is_err());
    }

    #[test]
    fn resolves_a_cycle_among_non_root_vertices() {
        // 0 -> 1 -> 2 -> 1 (cycle 1<->2), plus 0 -> 2 directly, cheaper overall via 0->1->2? but we pick cheapest arborescence.
        let mut g = ArrayDirectedGraph::new(false, false);
        for _ in 0..3 {
            g.add_vertex();
        }
        let e01 = g.add_edge(0, 1).unwrap();
        let e12 = g.add_edge(1, 2).unwrap();
        let e21 = g.add_edge(2, 1).unwrap();
        let e02 = g.add_edge(0, 2).unwrap();
        let weights: HashMap<usize, f64> = [(e01, 1.0), (e12, 1.0), (e21, 100.0), (e02, 1.0)].into_iter().collect();
        let w = |e: usize| weights[&e];

        let mst = tarjan_directed_mst(&g, &w, 0).unwrap();
        assert_eq!(mst.edges.len(), 2);
        assert_eq!(mst.weight(&w), 2.0);
    }
}
