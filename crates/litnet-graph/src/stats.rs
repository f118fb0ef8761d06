//! Graph statistics and analysis.
//!
//! Degree counts include parallel edges, so a pair linked by both an
//! "editor" and a "co-editor" edge contributes two to each degree.

use crate::{GraphData, NodeId};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Types
// ============================================================================

/// Comprehensive statistics about a graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes per node type.
    pub kind_distribution: BTreeMap<String, usize>,
    /// Edges per label; unlabelled edges are counted as `"unlabelled"`.
    pub label_distribution: BTreeMap<String, usize>,
    /// Nodes without any edges.
    pub orphan_count: usize,
    /// Average edges per node (in + out).
    pub avg_degree: f32,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    /// Node with the highest in-degree.
    pub most_incoming: Option<String>,
    /// Node with the highest out-degree.
    pub most_outgoing: Option<String>,
}

/// Direction for degree calculation.
#[derive(Clone, Copy, Debug)]
pub enum DegreeDirection {
    /// Incoming edges only.
    In,
    /// Outgoing edges only.
    Out,
    /// Both directions.
    Both,
}

// ============================================================================
// Functions
// ============================================================================

fn degree(graph: &GraphData, id: &NodeId, direction: DegreeDirection) -> usize {
    match direction {
        DegreeDirection::In => graph.degree(id.as_str(), Direction::Incoming),
        DegreeDirection::Out => graph.degree(id.as_str(), Direction::Outgoing),
        DegreeDirection::Both => {
            graph.degree(id.as_str(), Direction::Incoming)
                + graph.degree(id.as_str(), Direction::Outgoing)
        }
    }
}

/// Node with the highest degree; ties go to the first inserted.
fn max_degree(graph: &GraphData, direction: DegreeDirection) -> (Option<String>, usize) {
    let mut best: (Option<String>, usize) = (None, 0);
    for id in graph.node_ids() {
        let d = degree(graph, id, direction);
        if best.0.is_none() || d > best.1 {
            best = (Some(id.to_string()), d);
        }
    }
    best
}

/// Compute comprehensive statistics for a graph.
pub fn compute_stats(graph: &GraphData) -> GraphStats {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let mut kind_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for node in graph.iter_nodes() {
        *kind_distribution
            .entry(node.kind.as_str().to_string())
            .or_insert(0) += 1;
    }

    let mut label_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for edge in graph.iter_edges() {
        *label_distribution
            .entry(edge.label_name().to_string())
            .or_insert(0) += 1;
    }

    let orphan_count = graph
        .node_ids()
        .filter(|id| degree(graph, id, DegreeDirection::Both) == 0)
        .count();

    // Every edge adds one in and one out.
    let avg_degree = if node_count > 0 {
        (2 * edge_count) as f32 / node_count as f32
    } else {
        0.0
    };

    let (most_incoming, max_in_degree) = max_degree(graph, DegreeDirection::In);
    let (most_outgoing, max_out_degree) = max_degree(graph, DegreeDirection::Out);

    GraphStats {
        node_count,
        edge_count,
        kind_distribution,
        label_distribution,
        orphan_count,
        avg_degree,
        max_in_degree,
        max_out_degree,
        most_incoming,
        most_outgoing,
    }
}

/// Get a quick summary of graph size.
pub fn quick_summary(graph: &GraphData) -> String {
    format!("{} nodes, {} edges", graph.node_count(), graph.edge_count())
}

/// Get top N nodes by degree.
pub fn top_nodes_by_degree(
    graph: &GraphData,
    limit: usize,
    direction: DegreeDirection,
) -> Vec<(String, usize)> {
    let mut scores: Vec<(String, usize)> = graph
        .node_ids()
        .map(|id| (id.to_string(), degree(graph, id, direction)))
        .collect();

    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores.truncate(limit);
    scores
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn id(kind: NodeKind, n: u64) -> NodeId {
        NodeId::new(kind, n)
    }

    fn create_test_graph() -> GraphData {
        let mut graph = GraphData::new();

        graph.add_node(Node::new(id(NodeKind::Journal, 1), NodeKind::Journal, "Yugen"));
        graph.add_node(Node::new(id(NodeKind::Person, 1), NodeKind::Person, "A"));
        graph.add_node(Node::new(id(NodeKind::Person, 2), NodeKind::Person, "B"));
        graph.add_node(Node::new(id(NodeKind::Person, 3), NodeKind::Person, "C"));
        graph.add_node(Node::new(id(NodeKind::School, 1), NodeKind::School, "Orphan"));

        let journal = id(NodeKind::Journal, 1);
        let (a, b, c) = (
            id(NodeKind::Person, 1),
            id(NodeKind::Person, 2),
            id(NodeKind::Person, 3),
        );
        graph
            .add_edge(Edge::new(a.clone(), journal.clone()).with_label("editor"))
            .unwrap();
        graph
            .add_edge(Edge::new(b.clone(), journal.clone()).with_label("editor"))
            .unwrap();
        graph
            .add_edge(Edge::new(c, journal).with_label("contributor"))
            .unwrap();
        graph.add_edge(Edge::new(a, b)).unwrap();

        graph
    }

    #[test]
    fn test_compute_stats_basic_counts() {
        let stats = compute_stats(&create_test_graph());
        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.orphan_count, 1);
    }

    #[test]
    fn test_compute_stats_distributions() {
        let stats = compute_stats(&create_test_graph());
        assert_eq!(stats.kind_distribution["Person"], 3);
        assert_eq!(stats.kind_distribution["Journal"], 1);
        assert_eq!(stats.kind_distribution["School"], 1);
        assert_eq!(stats.label_distribution["editor"], 2);
        assert_eq!(stats.label_distribution["contributor"], 1);
        assert_eq!(stats.label_distribution["unlabelled"], 1);
    }

    #[test]
    fn test_compute_stats_degrees() {
        let stats = compute_stats(&create_test_graph());
        assert_eq!(stats.max_in_degree, 3);
        assert_eq!(stats.most_incoming.as_deref(), Some("journal:1"));
        assert_eq!(stats.max_out_degree, 2);
        assert_eq!(stats.most_outgoing.as_deref(), Some("person:1"));
        assert!((stats.avg_degree - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_compute_stats_empty_graph() {
        let stats = compute_stats(&GraphData::new());
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.avg_degree, 0.0);
        assert!(stats.most_incoming.is_none());
        assert_eq!(stats.max_out_degree, 0);
    }

    #[test]
    fn test_quick_summary() {
        assert_eq!(quick_summary(&create_test_graph()), "5 nodes, 4 edges");
    }

    #[test]
    fn test_top_nodes_by_degree() {
        let graph = create_test_graph();

        let top_in = top_nodes_by_degree(&graph, 1, DegreeDirection::In);
        assert_eq!(top_in, vec![("journal:1".to_string(), 3)]);

        let top_both = top_nodes_by_degree(&graph, 2, DegreeDirection::Both);
        assert_eq!(top_both.len(), 2);
        assert_eq!(top_both[0].0, "journal:1");
        assert_eq!(top_both[1], ("person:1".to_string(), 2));
    }
}
