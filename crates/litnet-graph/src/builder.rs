//! Generic network assembly over [`NetworkNode`] providers.
//!
//! The builder adds a node for every root entity, then follows each root's
//! edges, adding the target node (first insertion wins) before appending the
//! edge. Edges are never merged, so repeated relations stay visible as
//! parallel edges.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut builder = NetworkBuilder::new(&store).with_edges_only(true);
//! builder.add_entities(store.journals())?;
//! let (graph, stats) = builder.build();
//! ```

use crate::provider::NetworkNode;
use crate::types::GraphData;
use litnet_core::Result;
use litnet_store::EntityStore;
use serde::{Deserialize, Serialize};

/// Counters collected while building.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Roots whose node was added (or already present).
    pub roots_processed: usize,
    /// Roots skipped because they had no edges.
    pub roots_skipped: usize,
    pub nodes_created: usize,
    pub edges_created: usize,
}

/// Assembles a [`GraphData`] from entity providers.
pub struct NetworkBuilder<'s> {
    store: &'s dyn EntityStore,
    graph: GraphData,
    stats: BuildStats,
    edges_only: bool,
}

impl<'s> NetworkBuilder<'s> {
    pub fn new(store: &'s dyn EntityStore) -> Self {
        Self {
            store,
            graph: GraphData::new(),
            stats: BuildStats::default(),
            edges_only: false,
        }
    }

    /// Skip roots that would contribute no edges.
    pub fn with_edges_only(mut self, edges_only: bool) -> Self {
        self.edges_only = edges_only;
        self
    }

    /// Add one root entity with all of its edges.
    pub fn add_entity(&mut self, entity: &dyn NetworkNode) -> Result<()> {
        let has_edges = entity.has_network_edges(self.store);
        if self.edges_only && !has_edges {
            self.stats.roots_skipped += 1;
            return Ok(());
        }

        let source = entity.network_id();
        if self.graph.add_node(entity.to_node(self.store)) {
            self.stats.nodes_created += 1;
        }
        self.stats.roots_processed += 1;

        if !has_edges {
            return Ok(());
        }
        for edge in entity.network_edges(self.store) {
            if self.graph.add_node(edge.target.to_node(self.store)) {
                self.stats.nodes_created += 1;
            }
            self.graph.add_edge(edge.to_edge(&source))?;
            self.stats.edges_created += 1;
        }
        Ok(())
    }

    /// Add every entity of a collection.
    pub fn add_entities<'e, N>(&mut self, entities: impl IntoIterator<Item = &'e N>) -> Result<()>
    where
        N: NetworkNode + 'e,
    {
        for entity in entities {
            self.add_entity(entity)?;
        }
        Ok(())
    }

    /// The graph built so far.
    pub fn graph(&self) -> &GraphData {
        &self.graph
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Finish building.
    pub fn build(self) -> (GraphData, BuildStats) {
        log::debug!(
            "Built network: {} roots ({} skipped), {} nodes, {} edges",
            self.stats.roots_processed,
            self.stats.roots_skipped,
            self.stats.nodes_created,
            self.stats.edges_created
        );
        (self.graph, self.stats)
    }
}

/// Build a network over one collection of roots.
pub fn entity_network<'e, N>(
    store: &dyn EntityStore,
    entities: impl IntoIterator<Item = &'e N>,
    edges_only: bool,
) -> Result<GraphData>
where
    N: NetworkNode + 'e,
{
    let mut builder = NetworkBuilder::new(store).with_edges_only(edges_only);
    builder.add_entities(entities)?;
    Ok(builder.build().0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::EntityRef;
    use crate::types::NodeKind;
    use litnet_store::MemoryStore;
    use litnet_store::fixtures::{self, JONES};

    fn store() -> MemoryStore {
        fixtures::sample_store().unwrap()
    }

    #[test]
    fn test_build_journal_network() {
        let store = store();
        let (graph, stats) = {
            let mut builder = NetworkBuilder::new(&store);
            builder.add_entities(store.journals()).unwrap();
            builder.build()
        };

        // Three journals, two schools they belong to.
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(stats.roots_processed, 3);
        assert_eq!(stats.nodes_created, 5);
        assert_eq!(stats.edges_created, 3);
        assert_eq!(graph.edges_between("journal:2", "school:3").len(), 1);

        let school = graph.get_node("school:3").unwrap();
        assert_eq!(school.kind, NodeKind::School);
        assert_eq!(school.label, "Beat Generation");
    }

    #[test]
    fn test_adding_same_entity_twice_keeps_one_node() {
        let store = store();
        let jones = store.person(JONES).unwrap();

        let mut builder = NetworkBuilder::new(&store);
        builder.add_entity(jones).unwrap();
        builder.add_entity(jones).unwrap();
        let (graph, stats) = builder.build();

        assert_eq!(graph.nodes_of_kind(NodeKind::Person).count(), 1);
        assert_eq!(stats.roots_processed, 2);
        // Edges are appended on every pass.
        assert_eq!(graph.edges_between("person:1", "school:3").len(), 2);
    }

    #[test]
    fn test_edges_only_skips_isolated_roots() {
        let store = store();
        let all = entity_network(&store, store.people(), false).unwrap();
        assert_eq!(all.nodes_of_kind(NodeKind::Person).count(), 8);

        let mut builder = NetworkBuilder::new(&store).with_edges_only(true);
        builder.add_entities(store.people()).unwrap();
        let (filtered, stats) = builder.build();

        // Jones, O'Hara, Koch and Olson have schools or dwellings.
        assert_eq!(filtered.nodes_of_kind(NodeKind::Person).count(), 4);
        assert_eq!(stats.roots_skipped, 4);
        assert!(!filtered.contains_node("person:8"));
    }

    #[test]
    fn test_target_nodes_carry_their_own_attributes() {
        let store = store();
        let graph = entity_network(&store, store.issues(), false).unwrap();

        let editor = graph.get_node("person:2").unwrap();
        assert_eq!(editor.label, "Cohen, Hettie");
        assert!(editor.attributes.contains_key("editor"));

        let labels: Vec<_> = graph
            .edges_between("issue:10", "person:1")
            .into_iter()
            .map(|e| e.label_name())
            .collect();
        assert_eq!(labels, vec!["editor"]);
    }

    #[test]
    fn test_entity_refs_as_roots() {
        let store = store();
        let roots = EntityRef::all_of_kind(&store, NodeKind::Location);
        let graph = entity_network(&store, &roots, false).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 0);

        let graph = entity_network(&store, &roots, true).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_empty_roots() {
        let store = store();
        let graph = entity_network(&store, Vec::<&litnet_store::Journal>::new(), false).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
