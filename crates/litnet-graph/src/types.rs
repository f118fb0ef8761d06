//! Core graph types: typed nodes, labelled edges, and the multigraph.
//!
//! [`GraphData`] wraps a petgraph `DiGraph` together with an index from
//! [`NodeId`] to petgraph node index. Parallel edges are allowed and kept;
//! two edges between the same pair with different labels (or even the
//! same label) are distinct records.

use litnet_core::{Error, Result};
use litnet_store::EntityId;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ============================================================================
// NodeKind / NodeId
// ============================================================================

/// The entity type a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Person,
    School,
    Journal,
    Issue,
    Item,
    Location,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        Self::Person,
        Self::School,
        Self::Journal,
        Self::Issue,
        Self::Item,
        Self::Location,
    ];

    /// Value of the `type` node attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::School => "School",
            Self::Journal => "Journal",
            Self::Issue => "Issue",
            Self::Item => "Item",
            Self::Location => "Location",
        }
    }

    /// Lowercase prefix used in node identifiers.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::School => "school",
            Self::Journal => "journal",
            Self::Issue => "issue",
            Self::Item => "item",
            Self::Location => "location",
        }
    }

    /// Inverse of [`prefix`](Self::prefix), case-insensitive.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.prefix().eq_ignore_ascii_case(prefix))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable node identifier of the form `"<prefix>:<numeric id>"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(kind: NodeKind, id: EntityId) -> Self {
        Self(format!("{}:{}", kind.prefix(), id))
    }

    /// Split an identifier back into its kind and entity id.
    pub fn parse(value: &str) -> Result<(NodeKind, EntityId)> {
        let (prefix, id) = value
            .split_once(':')
            .ok_or_else(|| Error::parse(format!("node id '{value}' has no ':' separator")))?;
        let kind = NodeKind::from_prefix(prefix)
            .ok_or_else(|| Error::parse(format!("unknown node type '{prefix}' in '{value}'")))?;
        let id = id
            .parse::<EntityId>()
            .map_err(|e| Error::parse(format!("bad numeric id in '{value}': {e}")))?;
        Ok((kind, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// A node or edge attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Ordered attribute bag.
pub type Attributes = BTreeMap<String, AttrValue>;

// ============================================================================
// Node / Edge
// ============================================================================

/// A typed graph node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    /// Domain-specific attributes beyond `type` and `label`.
    #[serde(default)]
    pub attributes: Attributes,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            attributes: Attributes::new(),
        }
    }

    /// Set an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set an attribute only when a value is present.
    pub fn with_opt_attr(
        self,
        key: impl Into<String>,
        value: Option<impl Into<AttrValue>>,
    ) -> Self {
        match value {
            Some(value) => self.with_attr(key, value),
            None => self,
        }
    }

    /// Full attribute map, including `type` and `label`.
    pub fn attribute_map(&self) -> Attributes {
        let mut attrs = self.attributes.clone();
        attrs.insert("type".into(), self.kind.as_str().into());
        attrs.insert("label".into(), self.label.clone().into());
        attrs
    }
}

/// A directed, optionally labelled edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            label: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Label for grouping and display; unlabelled edges read as `"unlabelled"`.
    pub fn label_name(&self) -> &str {
        self.label.as_deref().unwrap_or("unlabelled")
    }
}

// ============================================================================
// GraphData
// ============================================================================

/// In-memory property multigraph.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
    /// Underlying petgraph directed graph.
    pub graph: DiGraph<Node, Edge>,
    node_indices: HashMap<NodeId, NodeIndex>,
}

impl GraphData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same id exists.
    ///
    /// Returns `true` if the node was inserted. The first insertion's data
    /// is kept; later insertions for the same id change nothing.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.node_indices.contains_key(&node.id) {
            return false;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(id, idx);
        true
    }

    /// Append an edge. Both endpoints must already be nodes.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeIndex> {
        let from = self
            .get_index(edge.source.as_str())
            .ok_or_else(|| Error::not_found(format!("edge source node {}", edge.source)))?;
        let to = self
            .get_index(edge.target.as_str())
            .ok_or_else(|| Error::not_found(format!("edge target node {}", edge.target)))?;
        Ok(self.graph.add_edge(from, to, edge))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    pub fn get_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.get_index(id).map(|idx| &self.graph[idx])
    }

    /// Nodes in insertion order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.iter_nodes().map(|n| &n.id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.iter_nodes().filter(move |n| n.kind == kind)
    }

    /// All edges directed from `source` to `target`, parallel ones included.
    pub fn edges_between(&self, source: &str, target: &str) -> Vec<&Edge> {
        match (self.get_index(source), self.get_index(target)) {
            (Some(from), Some(to)) => self
                .graph
                .edges_connecting(from, to)
                .map(|e| e.weight())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Number of edges touching a node in the given direction.
    pub fn degree(&self, id: &str, direction: Direction) -> usize {
        self.get_index(id)
            .map(|idx| self.graph.edges_directed(idx, direction).count())
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: EntityId, label: &str) -> Node {
        Node::new(NodeId::new(NodeKind::Person, id), NodeKind::Person, label)
    }

    #[test]
    fn test_node_id_format_and_parse() {
        let id = NodeId::new(NodeKind::Journal, 42);
        assert_eq!(id.as_str(), "journal:42");
        assert_eq!(NodeId::parse("journal:42").unwrap(), (NodeKind::Journal, 42));
        assert_eq!(NodeId::parse("Person:7").unwrap(), (NodeKind::Person, 7));
        assert!(NodeId::parse("journal").is_err());
        assert!(NodeId::parse("genre:1").is_err());
        assert!(NodeId::parse("item:abc").is_err());
    }

    #[test]
    fn test_node_kind_strings() {
        assert_eq!(NodeKind::Location.as_str(), "Location");
        assert_eq!(NodeKind::Location.prefix(), "location");
        assert_eq!(NodeKind::from_prefix("school"), Some(NodeKind::School));
        assert_eq!(NodeKind::from_prefix("genre"), None);
    }

    #[test]
    fn test_add_node_is_idempotent_first_wins() {
        let mut graph = GraphData::new();
        assert!(graph.add_node(person(1, "Frank O'Hara")));
        assert!(!graph.add_node(person(1, "Someone Else")));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get_node("person:1").unwrap().label, "Frank O'Hara");
    }

    #[test]
    fn test_add_edge_requires_endpoints() {
        let mut graph = GraphData::new();
        graph.add_node(person(1, "A"));
        let edge = Edge::new(
            NodeId::new(NodeKind::Person, 1),
            NodeId::new(NodeKind::Person, 2),
        );
        let err = graph.add_edge(edge).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph = GraphData::new();
        graph.add_node(person(1, "A"));
        graph.add_node(person(2, "B"));
        let a = NodeId::new(NodeKind::Person, 1);
        let b = NodeId::new(NodeKind::Person, 2);

        graph
            .add_edge(Edge::new(a.clone(), b.clone()).with_label("editor"))
            .unwrap();
        graph
            .add_edge(Edge::new(a.clone(), b.clone()).with_label("co-editor"))
            .unwrap();
        graph
            .add_edge(Edge::new(a.clone(), b.clone()).with_label("co-editor"))
            .unwrap();

        let between = graph.edges_between("person:1", "person:2");
        assert_eq!(between.len(), 3);
        assert!(between.iter().any(|e| e.label.as_deref() == Some("editor")));
        assert!(graph.edges_between("person:2", "person:1").is_empty());
        assert_eq!(graph.degree("person:1", Direction::Outgoing), 3);
        assert_eq!(graph.degree("person:2", Direction::Incoming), 3);
    }

    #[test]
    fn test_attribute_map_includes_type_and_label() {
        let node = person(3, "Kenneth Koch")
            .with_attr("creator", true)
            .with_opt_attr("gender", None::<&str>)
            .with_opt_attr("first name", Some("Kenneth"));
        let attrs = node.attribute_map();
        assert_eq!(attrs["type"], AttrValue::from("Person"));
        assert_eq!(attrs["label"], AttrValue::from("Kenneth Koch"));
        assert_eq!(attrs["creator"].as_bool(), Some(true));
        assert_eq!(attrs["first name"].as_str(), Some("Kenneth"));
        assert!(!attrs.contains_key("gender"));
    }

    #[test]
    fn test_attr_value_untagged_serde() {
        let attrs: Attributes = serde_json::from_str(
            r#"{"flag": true, "count": 3, "name": "x", "race": ["Asian", "White"]}"#,
        )
        .unwrap();
        assert_eq!(attrs["flag"], AttrValue::Bool(true));
        assert_eq!(attrs["count"], AttrValue::Int(3));
        assert_eq!(attrs["name"], AttrValue::Text("x".into()));
        assert_eq!(
            attrs["race"],
            AttrValue::List(vec!["Asian".into(), "White".into()])
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphData::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.get_node("person:1").is_none());
        assert_eq!(graph.degree("person:1", Direction::Incoming), 0);
    }
}
