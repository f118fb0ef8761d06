//! Graph validation and integrity checking.
//!
//! Networks built from a consistent store are expected to contain orphan
//! journals, editors credited with editing their own work, and repeated
//! edges. Only structural breakage is reported as an error.

use crate::GraphData;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Types
// ============================================================================

/// Result of graph validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the graph is valid (no errors).
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Add an error (marks graph as invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A validation issue found in the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue code, e.g. `ORPHAN_NODES`.
    pub code: String,
    pub message: String,
    /// Affected node ids.
    pub nodes: Vec<String>,
    /// Affected edge descriptions.
    pub edges: Vec<String>,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_edges(mut self, edges: Vec<String>) -> Self {
        self.edges = edges;
        self
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a graph.
///
/// Checks for:
/// - Orphan nodes (warning)
/// - Self-loops (info)
/// - Edges whose recorded endpoints are not the nodes they connect (error)
/// - Parallel edges sharing a label (info)
pub fn validate_graph(graph: &GraphData) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_orphans(graph, &mut result);
    check_self_loops(graph, &mut result);
    check_endpoints(graph, &mut result);
    check_repeated_edges(graph, &mut result);

    result
}

/// Quick check if graph has any validation errors.
pub fn is_valid(graph: &GraphData) -> bool {
    validate_graph(graph).valid
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_orphans(graph: &GraphData, result: &mut ValidationResult) {
    let orphans: Vec<String> = graph
        .graph
        .node_indices()
        .filter(|&idx| graph.graph.neighbors_undirected(idx).next().is_none())
        .map(|idx| graph.graph[idx].id.to_string())
        .collect();

    if !orphans.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "ORPHAN_NODES",
                format!("{} node(s) have no connections", orphans.len()),
            )
            .with_nodes(orphans),
        );
    }
}

fn check_self_loops(graph: &GraphData, result: &mut ValidationResult) {
    let self_loops: Vec<String> = graph
        .iter_edges()
        .filter(|edge| edge.source == edge.target)
        .map(|edge| format!("{} -[{}]-> {}", edge.source, edge.label_name(), edge.target))
        .collect();

    if !self_loops.is_empty() {
        result.add_info(
            ValidationIssue::new(
                "SELF_LOOPS",
                format!("{} edge(s) are self-loops", self_loops.len()),
            )
            .with_edges(self_loops),
        );
    }
}

/// The ids stored on an edge must match the nodes petgraph connects.
fn check_endpoints(graph: &GraphData, result: &mut ValidationResult) {
    let mut broken: Vec<String> = Vec::new();

    for edge_ref in graph.graph.edge_references() {
        let edge = edge_ref.weight();
        let source = &graph.graph[edge_ref.source()].id;
        let target = &graph.graph[edge_ref.target()].id;
        if !graph.contains_node(edge.source.as_str())
            || !graph.contains_node(edge.target.as_str())
            || &edge.source != source
            || &edge.target != target
        {
            broken.push(format!("{} -> {}", edge.source, edge.target));
        }
    }

    if !broken.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "UNKNOWN_ENDPOINTS",
                format!("{} edge(s) reference unknown endpoints", broken.len()),
            )
            .with_edges(broken),
        );
    }
}

/// Parallel edges with the same label are expected multiplicity.
fn check_repeated_edges(graph: &GraphData, result: &mut ValidationResult) {
    let mut counts: HashMap<(&str, &str, &str), usize> = HashMap::new();
    let mut order: Vec<(&str, &str, &str)> = Vec::new();

    for edge in graph.iter_edges() {
        let key = (edge.source.as_str(), edge.label_name(), edge.target.as_str());
        let count = counts.entry(key).or_insert(0);
        if *count == 1 {
            order.push(key);
        }
        *count += 1;
    }

    if !order.is_empty() {
        let repeated: Vec<String> = order
            .iter()
            .map(|&(source, label, target)| {
                format!("{source} -[{label}]-> {target} (x{})", counts[&(source, label, target)])
            })
            .collect();
        result.add_info(
            ValidationIssue::new(
                "REPEATED_EDGES",
                format!("{} edge(s) occur more than once", repeated.len()),
            )
            .with_edges(repeated),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn person(n: u64) -> NodeId {
        NodeId::new(NodeKind::Person, n)
    }

    fn create_valid_graph() -> GraphData {
        let mut graph = GraphData::new();
        for n in 1..=3 {
            graph.add_node(Node::new(person(n), NodeKind::Person, format!("P{n}")));
        }
        graph
            .add_edge(Edge::new(person(1), person(2)).with_label("co-editor"))
            .unwrap();
        graph
            .add_edge(Edge::new(person(2), person(3)).with_label("edited"))
            .unwrap();
        graph
    }

    #[test]
    fn test_valid_graph() {
        let result = validate_graph(&create_valid_graph());
        assert!(result.valid);
        assert_eq!(result.total_issues(), 0);
        assert!(result.info.is_empty());
        assert!(is_valid(&create_valid_graph()));
    }

    #[test]
    fn test_orphan_is_warning() {
        let mut graph = create_valid_graph();
        graph.add_node(Node::new(person(9), NodeKind::Person, "Alone"));

        let result = validate_graph(&graph);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "ORPHAN_NODES");
        assert_eq!(result.warnings[0].nodes, vec!["person:9"]);
    }

    #[test]
    fn test_self_loop_is_info() {
        let mut graph = create_valid_graph();
        graph
            .add_edge(Edge::new(person(1), person(1)).with_label("edited"))
            .unwrap();

        let result = validate_graph(&graph);
        assert!(result.valid);
        assert!(result.info.iter().any(|i| i.code == "SELF_LOOPS"));
    }

    #[test]
    fn test_repeated_edges_are_info() {
        let mut graph = create_valid_graph();
        graph
            .add_edge(Edge::new(person(2), person(3)).with_label("edited"))
            .unwrap();
        graph
            .add_edge(Edge::new(person(2), person(3)).with_label("edited"))
            .unwrap();

        let result = validate_graph(&graph);
        assert!(result.valid);
        let repeated = result
            .info
            .iter()
            .find(|i| i.code == "REPEATED_EDGES")
            .unwrap();
        assert_eq!(repeated.edges, vec!["person:2 -[edited]-> person:3 (x3)"]);
    }

    #[test]
    fn test_mismatched_endpoint_is_error() {
        let mut graph = create_valid_graph();
        let a = graph.get_index("person:1").unwrap();
        let b = graph.get_index("person:2").unwrap();
        graph
            .graph
            .add_edge(a, b, Edge::new(person(1), person(42)));

        let result = validate_graph(&graph);
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, "UNKNOWN_ENDPOINTS");
    }

    #[test]
    fn test_empty_graph_is_valid() {
        let result = validate_graph(&GraphData::new());
        assert!(result.valid);
        assert_eq!(result.total_issues(), 0);
    }
}
