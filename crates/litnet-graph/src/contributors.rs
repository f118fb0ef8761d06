//! The author/editor/translator network across all journals.
//!
//! Phases run in order and only ever add edges:
//!
//! 1. a node per journal
//! 2. editor, author and translator edges from people to each journal
//! 3. `co-editor` edges between editors sharing an issue
//! 4. `co-author` edges between creators sharing an item
//! 5. `edited` edges from editors to the creators and translators of items
//!    in the issues they edited
//! 6. `translated` edges from translators to the authors they translated
//!
//! Co-relations are computed per person, so each shared pair yields an edge
//! in both directions. Phase 5 keeps one edge per credited item and does not
//! exclude the editor, so an editor who published in their own issue gets a
//! self-loop. Edge multiplicity is part of the output.

use crate::types::{Edge, GraphData, Node, NodeId, NodeKind};
use litnet_core::Result;
use litnet_store::{EntityStore, Journal, Person, RelationQueries};
use std::time::Instant;

pub const EDITOR: &str = "editor";
pub const CONTRIBUTOR: &str = "contributor";
pub const TRANSLATION_CONTRIBUTOR: &str = "contributor (translation)";
pub const CO_EDITOR: &str = "co-editor";
pub const CO_AUTHOR: &str = "co-author";
pub const EDITED: &str = "edited";
pub const TRANSLATED: &str = "translated";

/// Build the full contributor network from the store.
pub fn contributor_network(store: &dyn EntityStore) -> Result<GraphData> {
    let started = Instant::now();
    let mut graph = GraphData::new();

    add_journals(store, &mut graph)?;
    add_co_editors(store, &mut graph)?;
    add_co_authors(store, &mut graph)?;
    add_edited(store, &mut graph)?;
    add_translated(store, &mut graph)?;

    log::info!(
        "Built contributor network: {} nodes, {} edges in {:.2?}",
        graph.node_count(),
        graph.edge_count(),
        started.elapsed()
    );
    Ok(graph)
}

// ============================================================================
// Nodes
// ============================================================================

fn journal_node(journal: &Journal) -> Node {
    Node::new(
        NodeId::new(NodeKind::Journal, journal.id),
        NodeKind::Journal,
        journal.title.as_str(),
    )
}

fn person_node(person: &Person) -> Node {
    Node::new(
        NodeId::new(NodeKind::Person, person.id),
        NodeKind::Person,
        person.firstname_lastname(),
    )
}

/// Add an edge between two people, adding either node if it is missing.
fn link_people(graph: &mut GraphData, from: &Person, to: &Person, label: &str) -> Result<()> {
    graph.add_node(person_node(from));
    graph.add_node(person_node(to));
    graph.add_edge(
        Edge::new(
            NodeId::new(NodeKind::Person, from.id),
            NodeId::new(NodeKind::Person, to.id),
        )
        .with_label(label),
    )?;
    Ok(())
}

// ============================================================================
// Phases
// ============================================================================

/// Phases 1 and 2.
fn add_journals(store: &dyn EntityStore, graph: &mut GraphData) -> Result<()> {
    let journals = store.journals();
    for journal in &journals {
        graph.add_node(journal_node(journal));
    }

    for journal in journals {
        let started = Instant::now();
        let target = NodeId::new(NodeKind::Journal, journal.id);
        let groups = [
            (store.editors_of_journal(journal.id), EDITOR),
            (store.authors_of_journal(journal.id), CONTRIBUTOR),
            (
                store.translators_of_journal(journal.id),
                TRANSLATION_CONTRIBUTOR,
            ),
        ];

        let mut count = 0;
        for (people, label) in groups {
            for person in people {
                graph.add_node(person_node(person));
                graph.add_edge(
                    Edge::new(NodeId::new(NodeKind::Person, person.id), target.clone())
                        .with_label(label),
                )?;
                count += 1;
            }
        }
        log::debug!(
            "Added {count} journal edges for editors/authors/translators of {} in {:.2?}",
            journal.title,
            started.elapsed()
        );
    }
    Ok(())
}

fn add_co_editors(store: &dyn EntityStore, graph: &mut GraphData) -> Result<()> {
    let started = Instant::now();
    for editor in store.co_editor_candidates() {
        for co_editor in store.co_editors(editor.id) {
            link_people(graph, editor, co_editor, CO_EDITOR)?;
        }
    }
    log::debug!("Added co-editor edges in {:.2?}", started.elapsed());
    Ok(())
}

fn add_co_authors(store: &dyn EntityStore, graph: &mut GraphData) -> Result<()> {
    let started = Instant::now();
    for author in store.co_author_candidates() {
        for co_author in store.co_authors(author.id) {
            link_people(graph, author, co_author, CO_AUTHOR)?;
        }
    }
    log::debug!("Added co-author edges in {:.2?}", started.elapsed());
    Ok(())
}

fn add_edited(store: &dyn EntityStore, graph: &mut GraphData) -> Result<()> {
    let started = Instant::now();
    for editor in store.editors() {
        for author in store.edited_creators(editor.id) {
            link_people(graph, editor, author, EDITED)?;
        }
        for translator in store.edited_translators(editor.id) {
            link_people(graph, editor, translator, EDITED)?;
        }
    }
    log::debug!(
        "Added author/editor and translator/editor edges in {:.2?}",
        started.elapsed()
    );
    Ok(())
}

fn add_translated(store: &dyn EntityStore, graph: &mut GraphData) -> Result<()> {
    let started = Instant::now();
    for translator in store.translators() {
        for author in store.translated_authors(translator.id) {
            link_people(graph, translator, author, TRANSLATED)?;
        }
    }
    log::debug!("Added translator/author edges in {:.2?}", started.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use litnet_store::fixtures::{
        self, BLACKBURN, COHEN, DI_PRIMA, JONES, KOCH, LORCA, OHARA, OLSON, YUGEN,
    };
    use litnet_store::{Dataset, MemoryStore};

    fn person(id: u64) -> String {
        format!("person:{id}")
    }

    fn labels(graph: &GraphData, from: &str, to: &str) -> Vec<String> {
        graph
            .edges_between(from, to)
            .into_iter()
            .map(|e| e.label_name().to_string())
            .collect()
    }

    fn build() -> GraphData {
        let store: MemoryStore = fixtures::sample_store().unwrap();
        contributor_network(&store).unwrap()
    }

    #[test]
    fn test_node_set() {
        let graph = build();
        assert_eq!(graph.nodes_of_kind(NodeKind::Journal).count(), 3);
        assert_eq!(graph.nodes_of_kind(NodeKind::Person).count(), 8);
        assert_eq!(graph.node_count(), 11);

        let ohara = graph.get_node(&person(OHARA)).unwrap();
        assert_eq!(ohara.label, "Frank O'Hara");
        assert!(ohara.attributes.is_empty());
        assert_eq!(graph.get_node("journal:1").unwrap().label, "Yugen");
    }

    #[test]
    fn test_edge_totals_by_label() {
        let graph = build();
        let count = |label: &str| {
            graph
                .iter_edges()
                .filter(|e| e.label.as_deref() == Some(label))
                .count()
        };
        assert_eq!(count(EDITOR), 4);
        assert_eq!(count(CONTRIBUTOR), 6);
        assert_eq!(count(TRANSLATION_CONTRIBUTOR), 1);
        assert_eq!(count(CO_EDITOR), 2);
        assert_eq!(count(CO_AUTHOR), 2);
        assert_eq!(count(EDITED), 11);
        assert_eq!(count(TRANSLATED), 1);
        assert_eq!(graph.edge_count(), 27);
    }

    #[test]
    fn test_journal_edges() {
        let graph = build();
        let yugen = format!("journal:{YUGEN}");
        assert_eq!(labels(&graph, &person(JONES), &yugen), vec![EDITOR, CONTRIBUTOR]);
        assert_eq!(labels(&graph, &person(COHEN), &yugen), vec![EDITOR]);
        assert_eq!(
            labels(&graph, &person(BLACKBURN), &yugen),
            vec![TRANSLATION_CONTRIBUTOR]
        );
        // Contributing editors are not journal editors.
        assert!(labels(&graph, &person(JONES), "journal:2").is_empty());
        assert_eq!(labels(&graph, &person(DI_PRIMA), "journal:2"), vec![EDITOR]);
    }

    #[test]
    fn test_co_relations_are_symmetric() {
        let graph = build();
        assert_eq!(labels(&graph, &person(JONES), &person(COHEN)), vec![CO_EDITOR]);
        assert_eq!(
            labels(&graph, &person(COHEN), &person(JONES)),
            vec![CO_EDITOR]
        );
        assert_eq!(labels(&graph, &person(OHARA), &person(KOCH)), vec![CO_AUTHOR]);
        assert_eq!(labels(&graph, &person(KOCH), &person(OHARA)), vec![CO_AUTHOR]);
    }

    #[test]
    fn test_edited_keeps_multiplicity_and_self() {
        let graph = build();
        assert_eq!(labels(&graph, &person(JONES), &person(JONES)), vec![EDITED]);
        assert_eq!(labels(&graph, &person(OLSON), &person(OLSON)), vec![EDITED]);
        assert_eq!(labels(&graph, &person(JONES), &person(BLACKBURN)), vec![EDITED]);
        assert_eq!(labels(&graph, &person(COHEN), &person(LORCA)), vec![EDITED]);
        assert_eq!(labels(&graph, &person(DI_PRIMA), &person(OHARA)), vec![EDITED]);
    }

    #[test]
    fn test_translated_edges() {
        let graph = build();
        assert_eq!(
            labels(&graph, &person(BLACKBURN), &person(LORCA)),
            vec![TRANSLATED]
        );
        assert!(labels(&graph, &person(LORCA), &person(BLACKBURN)).is_empty());
    }

    #[test]
    fn test_empty_store() {
        let store = Dataset::default().into_store().unwrap();
        let graph = contributor_network(&store).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
