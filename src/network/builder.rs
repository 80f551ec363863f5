// Similarity-graph construction.
//
// Each distinct text value becomes a node; an undirected edge connects
// two nodes when the cosine similarity of their embeddings meets the
// threshold. Pairs are visited once (i < j), so the graph never holds
// self-loops or duplicate edges.

use anyhow::Result;
use petgraph::graph::UnGraph;
use tracing::info;

use crate::embedding::cosine_similarity;

/// Similarity threshold below which no edge is created.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Summary counts for a built network.
#[derive(Debug, Clone, Copy)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
    pub isolated: usize,
}

/// Build an undirected similarity graph from parallel label and
/// embedding slices.
///
/// Node weights are the labels; edge weights are the similarity scores.
/// Labels with no neighbor at or above the threshold stay in the graph
/// as isolated nodes.
pub fn build_network(
    labels: &[String],
    embeddings: &[Vec<f64>],
    threshold: f64,
) -> Result<UnGraph<String, f64>> {
    if labels.len() != embeddings.len() {
        anyhow::bail!(
            "Label/embedding count mismatch: {} labels, {} embeddings",
            labels.len(),
            embeddings.len()
        );
    }

    let mut graph = UnGraph::<String, f64>::new_undirected();
    let indices: Vec<_> = labels.iter().map(|l| graph.add_node(l.clone())).collect();

    for i in 0..labels.len() {
        for j in (i + 1)..labels.len() {
            let score = cosine_similarity(&embeddings[i], &embeddings[j]);
            if score >= threshold {
                graph.add_edge(indices[i], indices[j], score);
            }
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        threshold = threshold,
        "Built similarity network"
    );

    Ok(graph)
}

/// Node, edge, and isolated-node counts for a graph.
pub fn stats(graph: &UnGraph<String, f64>) -> NetworkStats {
    let isolated = graph
        .node_indices()
        .filter(|&n| graph.neighbors(n).next().is_none())
        .count();
    NetworkStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        isolated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn similar_pairs_get_edges() {
        let l = labels(&["a", "b", "c"]);
        let e = vec![
            vec![1.0, 0.0],
            vec![1.0, 0.1], // near-parallel to a
            vec![0.0, 1.0], // orthogonal to a
        ];
        let g = build_network(&l, &e, 0.7).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn no_self_loops_for_identical_embeddings() {
        let l = labels(&["a", "b"]);
        let e = vec![vec![1.0, 0.0], vec![1.0, 0.0]];
        let g = build_network(&l, &e, 0.7).unwrap();
        // One edge between the two distinct nodes, none from a node to
        // itself.
        assert_eq!(g.edge_count(), 1);
        for n in g.node_indices() {
            assert!(!g.neighbors(n).any(|m| m == n));
        }
    }

    #[test]
    fn threshold_is_inclusive() {
        let l = labels(&["a", "b"]);
        let e = vec![vec![1.0, 0.0], vec![1.0, 0.0]];
        // Exactly 1.0 similarity, threshold 1.0 — edge created.
        let g = build_network(&l, &e, 1.0).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn below_threshold_nodes_stay_isolated() {
        let l = labels(&["a", "b"]);
        let e = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let g = build_network(&l, &e, 0.7).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(stats(&g).isolated, 2);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let l = labels(&["a"]);
        assert!(build_network(&l, &[], 0.7).is_err());
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let g = build_network(&[], &[], 0.7).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }
}
