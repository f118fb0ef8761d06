//! Graph persistence and export.
//!
//! Graphs are written as a node-link JSON document that carries every node
//! and edge attribute, so downstream visualisation tools can consume them
//! without loss:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "journal:1", "kind": "Journal", "label": "Yugen", "attributes": {} }],
//!   "edges": [{ "source": "person:1", "target": "journal:1", "label": "editor", "attributes": {} }],
//!   "metadata": { "built_at": "2024-01-01T00:00:00+00:00", "network": "contributors", ... }
//! }
//! ```

use crate::{Edge, GraphData, Node};
use chrono::{DateTime, Utc};
use litnet_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Serializable types
// ============================================================================

/// Serializable representation of graph data.
///
/// The petgraph `DiGraph` is rebuilt on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializableGraph {
    /// All nodes in insertion order.
    pub nodes: Vec<Node>,
    /// All edges in insertion order, parallel edges included.
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub metadata: Option<GraphMetadata>,
}

impl SerializableGraph {
    pub fn from_graph(graph: &GraphData, metadata: Option<GraphMetadata>) -> Self {
        Self {
            nodes: graph.iter_nodes().cloned().collect(),
            edges: graph.iter_edges().cloned().collect(),
            metadata,
        }
    }
}

/// Metadata about a persisted graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// When the graph was built (RFC 3339).
    pub built_at: String,
    /// Version of the builder.
    pub builder_version: String,
    /// Which network this is, e.g. `contributors` or `schools`.
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub node_count: usize,
    #[serde(default)]
    pub edge_count: usize,
}

impl GraphMetadata {
    /// Metadata describing `graph`, stamped with the current time.
    pub fn for_graph(network: impl Into<String>, graph: &GraphData) -> Self {
        Self {
            network: Some(network.into()),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            ..Default::default()
        }
    }

    /// Parsed build timestamp, if well-formed.
    pub fn built_at_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.built_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

impl Default for GraphMetadata {
    fn default() -> Self {
        Self {
            built_at: Utc::now().to_rfc3339(),
            builder_version: env!("CARGO_PKG_VERSION").to_string(),
            network: None,
            node_count: 0,
            edge_count: 0,
        }
    }
}

// ============================================================================
// Save / Load
// ============================================================================

/// Render a graph as pretty-printed JSON.
pub fn to_json_string(graph: &GraphData, metadata: Option<GraphMetadata>) -> Result<String> {
    serde_json::to_string_pretty(&SerializableGraph::from_graph(graph, metadata))
        .map_err(|e| Error::serialization(format!("Failed to serialize graph: {e}")))
}

/// Save a graph to a JSON file, creating parent directories as needed.
pub fn save_graph(
    graph: &GraphData,
    path: impl AsRef<Path>,
    metadata: Option<GraphMetadata>,
) -> Result<()> {
    let path = path.as_ref();
    let json = to_json_string(graph, metadata)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;

    log::debug!(
        "Saved graph ({} nodes, {} edges) to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

/// Load a graph from a JSON file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<GraphData> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;

    load_graph_from_str(&json)
}

/// Load a graph from a JSON string.
pub fn load_graph_from_str(json: &str) -> Result<GraphData> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|e| Error::parse(format!("Failed to parse graph JSON: {e}")))?;

    Ok(to_graph_data(serializable))
}

/// Load only the metadata block of a persisted graph.
pub fn load_metadata(path: impl AsRef<Path>) -> Result<Option<GraphMetadata>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let serializable: SerializableGraph = serde_json::from_str(&json)
        .map_err(|e| Error::parse(format!("Failed to parse graph JSON: {e}")))?;
    Ok(serializable.metadata)
}

/// Rebuild a [`GraphData`], skipping edges that reference missing nodes.
fn to_graph_data(serializable: SerializableGraph) -> GraphData {
    let mut graph = GraphData::new();

    for node in serializable.nodes {
        graph.add_node(node);
    }

    let mut dropped = 0usize;
    for edge in serializable.edges {
        if graph.add_edge(edge).is_err() {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::warn!("Dropped {dropped} edge(s) with missing endpoints while loading graph");
    }

    graph
}

// ============================================================================
// Tests
// ============================================================================
