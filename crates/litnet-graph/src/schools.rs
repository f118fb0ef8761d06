//! The schools network: schools with their places, members and journals.
//!
//! Only declared associations are used; no co-relations are derived.

use crate::provider::NetworkNode;
use crate::types::{Edge, GraphData, Node};
use litnet_core::Result;
use litnet_store::{EntityStore, Relation, School};
use std::time::Instant;

/// Build the network for a set of schools.
///
/// Each school gets a node, and an edge to each of its locations, members
/// and journals. Nodes are labelled as follows: schools by name, locations
/// by short label, people by first and last name, journals by title.
pub fn schools_network(store: &dyn EntityStore, schools: &[&School]) -> Result<GraphData> {
    let started = Instant::now();
    let mut graph = GraphData::new();

    for &school in schools {
        let school_started = Instant::now();
        let source = school.network_id();
        graph.add_node(Node::new(
            source.clone(),
            school.node_kind(),
            school.name.as_str(),
        ));

        let locations = store.related_locations(Relation::SchoolLocations, school.id);
        let members = store.related_people(Relation::SchoolMembers, school.id);
        let journals = store.related_journals(Relation::SchoolJournals, school.id);

        let mut targets: Vec<Node> = Vec::new();
        targets.extend(
            locations
                .iter()
                .map(|l| Node::new(l.network_id(), l.node_kind(), l.short_label())),
        );
        targets.extend(
            members
                .iter()
                .map(|p| Node::new(p.network_id(), p.node_kind(), p.firstname_lastname())),
        );
        targets.extend(
            journals
                .iter()
                .map(|j| Node::new(j.network_id(), j.node_kind(), j.title.as_str())),
        );

        for node in targets {
            let target = node.id.clone();
            graph.add_node(node);
            graph.add_edge(Edge::new(source.clone(), target))?;
        }

        log::debug!(
            "Added {} locations, {} people, {} journals for {} in {:.2?}",
            locations.len(),
            members.len(),
            journals.len(),
            school.name,
            school_started.elapsed()
        );
    }

    log::debug!(
        "Built schools network for {} schools: {} nodes, {} edges in {:.2?}",
        schools.len(),
        graph.node_count(),
        graph.edge_count(),
        started.elapsed()
    );
    Ok(graph)
}

/// Schools network for every school classified by `categorizer`.
pub fn categorizer_network(store: &dyn EntityStore, categorizer: &str) -> Result<GraphData> {
    let schools = store.schools_by_categorizer(categorizer);
    schools_network(store, &schools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;
    use litnet_store::fixtures::{self, DONALD_ALLEN};

    #[test]
    fn test_single_school() {
        let store = fixtures::sample_store().unwrap();
        let school = store.school(1).unwrap();
        let graph = schools_network(&store, &[school]).unwrap();

        // Black Mountain: one location, Olson, the Review.
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.get_node("location:3").unwrap().label,
            "Black Mountain, NC"
        );
        assert_eq!(graph.get_node("person:7").unwrap().label, "Charles Olson");
        assert_eq!(
            graph.get_node("journal:3").unwrap().label,
            "Black Mountain Review"
        );
        assert_eq!(graph.edges_between("school:1", "journal:3").len(), 1);
        assert!(graph.iter_edges().all(|e| e.label.is_none()));
    }

    #[test]
    fn test_shared_targets_are_not_duplicated() {
        let store = fixtures::sample_store().unwrap();
        let graph = categorizer_network(&store, DONALD_ALLEN).unwrap();

        assert_eq!(graph.nodes_of_kind(NodeKind::School).count(), 3);
        // Beat Generation: Jones plus Yugen and Floating Bear.
        assert_eq!(graph.edges_between("school:3", "journal:1").len(), 1);
        assert_eq!(graph.edges_between("school:3", "person:1").len(), 1);
        // New York School: location 1, O'Hara, Koch.
        assert_eq!(graph.edges_between("school:2", "location:1").len(), 1);
        assert_eq!(graph.node_count(), 3 + 2 + 4 + 3);
        assert_eq!(graph.edge_count(), 3 + 3 + 3);
    }

    #[test]
    fn test_no_schools() {
        let store = fixtures::sample_store().unwrap();
        let graph = schools_network(&store, &[]).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(categorizer_network(&store, "nobody").unwrap().is_empty());
    }
}
