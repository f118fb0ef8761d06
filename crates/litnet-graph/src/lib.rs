//! Network graph derivation for the litnet catalogue.
//!
//! Graphs are petgraph-backed multigraphs of typed nodes and optionally
//! labelled edges. Entities describe themselves through [`NetworkNode`];
//! the builders walk the [`EntityStore`](litnet_store::EntityStore) and
//! assemble [`GraphData`].
//!
//! # Key Abstractions
//!
//! - [`NetworkNode`]: per-entity node and edge provider
//! - [`NetworkBuilder`]: generic, deduplicating assembly
//! - [`contributor_network`] and [`schools_network`]: the specialised
//!   networks
//! - [`GraphCache`]: injected memoization, used by [`NetworkService`]

#![doc = include_str!("../README.md")]

pub mod builder;
pub mod cache;
pub mod contributors;
pub mod persistence;
pub mod provider;
pub mod schools;
pub mod service;
pub mod stats;
pub mod types;
pub mod validation;

pub use builder::{BuildStats, NetworkBuilder, entity_network};
pub use cache::{
    CacheKey, CacheOptions, DEFAULT_MAX_ENTRIES, GraphCache, MemoryGraphCache, NullGraphCache,
};
pub use contributors::contributor_network;
pub use persistence::{
    GraphMetadata, SerializableGraph, load_graph, load_graph_from_str, load_metadata, save_graph,
    to_json_string,
};
pub use provider::{EntityRef, NetworkEdge, NetworkNode};
pub use schools::{categorizer_network, schools_network};
pub use service::NetworkService;
pub use stats::{DegreeDirection, GraphStats, compute_stats, quick_summary, top_nodes_by_degree};
pub use types::{AttrValue, Attributes, Edge, GraphData, Node, NodeId, NodeKind};
pub use validation::{ValidationIssue, ValidationResult, is_valid, validate_graph};
