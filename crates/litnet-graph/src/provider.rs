//! The node/edge provider capability.
//!
//! Every entity that can appear in a network implements [`NetworkNode`]:
//! it names its node, describes itself as an attribute bag, and lists the
//! edges rooted at it. Entities are plain records, so the store is passed
//! in wherever a relation has to be followed.
//!
//! Edge targets are returned as [`EntityRef`]s rather than bare ids so the
//! builder can add the target node with its own type and attributes.

use crate::types::{Attributes, Edge, Node, NodeId, NodeKind};
use litnet_core::{Error, Result};
use litnet_store::{
    EntityId, EntityStore, Issue, Item, Journal, Location, Person, RelationQueries, Relation,
    School,
};

// ============================================================================
// Provider trait
// ============================================================================

/// Capability of an entity to contribute a node and edges to a network.
pub trait NetworkNode {
    fn node_kind(&self) -> NodeKind;

    fn entity_id(&self) -> EntityId;

    /// Stable identifier, `"<lowercase-type>:<id>"`.
    fn network_id(&self) -> NodeId {
        NodeId::new(self.node_kind(), self.entity_id())
    }

    /// The node for this entity, with its type, label and extra attributes.
    fn to_node(&self, store: &dyn EntityStore) -> Node;

    /// Full attribute mapping, always including `type` and `label`.
    fn network_attributes(&self, store: &dyn EntityStore) -> Attributes {
        self.to_node(store).attribute_map()
    }

    /// Whether [`network_edges`](Self::network_edges) would return anything.
    ///
    /// Implementations answer with existence checks where they can.
    fn has_network_edges(&self, store: &dyn EntityStore) -> bool {
        !self.network_edges(store).is_empty()
    }

    /// Edges directed from this entity to related entities.
    fn network_edges<'s>(&self, store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>>;
}

/// An edge rooted at a provider, pointing at another entity.
#[derive(Clone, Copy, Debug)]
pub struct NetworkEdge<'s> {
    pub target: EntityRef<'s>,
    pub label: Option<&'static str>,
}

impl<'s> NetworkEdge<'s> {
    pub fn new(target: EntityRef<'s>) -> Self {
        Self {
            target,
            label: None,
        }
    }

    pub fn labelled(target: EntityRef<'s>, label: &'static str) -> Self {
        Self {
            target,
            label: Some(label),
        }
    }

    /// Graph edge from `source` to this edge's target.
    pub fn to_edge(&self, source: &NodeId) -> Edge {
        let edge = Edge::new(source.clone(), self.target.network_id());
        match self.label {
            Some(label) => edge.with_label(label),
            None => edge,
        }
    }
}

// ============================================================================
// EntityRef
// ============================================================================

/// A borrowed entity of any network-capable kind.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'s> {
    Person(&'s Person),
    School(&'s School),
    Journal(&'s Journal),
    Issue(&'s Issue),
    Item(&'s Item),
    Location(&'s Location),
}

impl<'s> EntityRef<'s> {
    fn provider(&self) -> &dyn NetworkNode {
        match self {
            Self::Person(p) => *p,
            Self::School(s) => *s,
            Self::Journal(j) => *j,
            Self::Issue(i) => *i,
            Self::Item(i) => *i,
            Self::Location(l) => *l,
        }
    }

    /// Look up an entity by kind and id.
    pub fn lookup(store: &'s dyn EntityStore, kind: NodeKind, id: EntityId) -> Option<Self> {
        match kind {
            NodeKind::Person => store.person(id).map(Self::Person),
            NodeKind::School => store.school(id).map(Self::School),
            NodeKind::Journal => store.journal(id).map(Self::Journal),
            NodeKind::Issue => store.issue(id).map(Self::Issue),
            NodeKind::Item => store.item(id).map(Self::Item),
            NodeKind::Location => store.location(id).map(Self::Location),
        }
    }

    /// Resolve a node identifier such as `"journal:3"`.
    pub fn resolve(store: &'s dyn EntityStore, id: &str) -> Result<Self> {
        let (kind, entity_id) = NodeId::parse(id)?;
        Self::lookup(store, kind, entity_id)
            .ok_or_else(|| Error::not_found(format!("no entity for node id '{id}'")))
    }

    /// Every entity of one kind, in id order.
    pub fn all_of_kind(store: &'s dyn EntityStore, kind: NodeKind) -> Vec<Self> {
        match kind {
            NodeKind::Person => store.people().into_iter().map(Self::Person).collect(),
            NodeKind::School => store.schools().into_iter().map(Self::School).collect(),
            NodeKind::Journal => store.journals().into_iter().map(Self::Journal).collect(),
            NodeKind::Issue => store.issues().into_iter().map(Self::Issue).collect(),
            NodeKind::Item => store.items().into_iter().map(Self::Item).collect(),
            NodeKind::Location => store.locations().into_iter().map(Self::Location).collect(),
        }
    }
}

impl NetworkNode for EntityRef<'_> {
    fn node_kind(&self) -> NodeKind {
        self.provider().node_kind()
    }

    fn entity_id(&self) -> EntityId {
        self.provider().entity_id()
    }

    fn to_node(&self, store: &dyn EntityStore) -> Node {
        self.provider().to_node(store)
    }

    fn has_network_edges(&self, store: &dyn EntityStore) -> bool {
        self.provider().has_network_edges(store)
    }

    fn network_edges<'s>(&self, store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>> {
        self.provider().network_edges(store)
    }
}

fn node_for(entity: &dyn NetworkNode, label: impl Into<String>) -> Node {
    Node::new(entity.network_id(), entity.node_kind(), label)
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

// ============================================================================
// Person
// ============================================================================

impl NetworkNode for Person {
    fn node_kind(&self) -> NodeKind {
        NodeKind::Person
    }

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn to_node(&self, store: &dyn EntityStore) -> Node {
        let roles = store.person_roles(self.id);
        let race = if self.race.is_empty() {
            None
        } else {
            Some(self.race.clone())
        };
        node_for(self, self.to_string())
            .with_attr("last name", self.last_name.as_str())
            .with_opt_attr("first name", non_empty(&self.first_name))
            .with_opt_attr("race", race)
            .with_opt_attr("gender", self.gender.map(|g| g.code()))
            .with_attr("editor", roles.editor)
            .with_attr("creator", roles.creator)
            .with_attr("translator", roles.translator)
            .with_attr("mentioned", roles.mentioned)
    }

    fn has_network_edges(&self, store: &dyn EntityStore) -> bool {
        store.has_related(Relation::PersonSchools, self.id)
            || store.has_related(Relation::PersonDwellings, self.id)
    }

    fn network_edges<'s>(&self, store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>> {
        let schools = store
            .related_schools(Relation::PersonSchools, self.id)
            .into_iter()
            .map(|s| NetworkEdge::new(EntityRef::School(s)));
        let dwellings = store
            .related_locations(Relation::PersonDwellings, self.id)
            .into_iter()
            .map(|l| NetworkEdge::new(EntityRef::Location(l)));
        schools.chain(dwellings).collect()
    }
}

// ============================================================================
// School
// ============================================================================

impl NetworkNode for School {
    fn node_kind(&self) -> NodeKind {
        NodeKind::School
    }

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn to_node(&self, _store: &dyn EntityStore) -> Node {
        let categorizer = self
            .categorizer_name()
            .or_else(|| self.categorizer.as_deref().and_then(non_empty));
        node_for(self, self.name.as_str()).with_opt_attr("categorizer", categorizer)
    }

    fn has_network_edges(&self, store: &dyn EntityStore) -> bool {
        store.has_related(Relation::SchoolLocations, self.id)
    }

    fn network_edges<'s>(&self, store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>> {
        store
            .related_locations(Relation::SchoolLocations, self.id)
            .into_iter()
            .map(|l| NetworkEdge::new(EntityRef::Location(l)))
            .collect()
    }
}

// ============================================================================
// Journal
// ============================================================================

impl NetworkNode for Journal {
    fn node_kind(&self) -> NodeKind {
        NodeKind::Journal
    }

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn to_node(&self, _store: &dyn EntityStore) -> Node {
        node_for(self, self.title.as_str()).with_opt_attr("publisher", non_empty(&self.publisher))
    }

    fn has_network_edges(&self, store: &dyn EntityStore) -> bool {
        store.has_related(Relation::JournalSchools, self.id)
    }

    fn network_edges<'s>(&self, store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>> {
        store
            .related_schools(Relation::JournalSchools, self.id)
            .into_iter()
            .map(|s| NetworkEdge::new(EntityRef::School(s)))
            .collect()
    }
}

// ============================================================================
// Issue
// ============================================================================

impl NetworkNode for Issue {
    fn node_kind(&self) -> NodeKind {
        NodeKind::Issue
    }

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn to_node(&self, store: &dyn EntityStore) -> Node {
        node_for(self, store.issue_display(self))
            .with_opt_attr("volume", non_empty(&self.volume))
            .with_opt_attr("issue", non_empty(&self.issue))
            .with_opt_attr(
                "publication date",
                self.publication_date.as_deref().and_then(non_empty),
            )
    }

    fn has_network_edges(&self, store: &dyn EntityStore) -> bool {
        store.journal(self.journal_id).is_some()
            || self.publication_address.is_some()
            || self.print_address.is_some()
            || store.has_related(Relation::IssueEditors, self.id)
            || store.has_related(Relation::IssueContributingEditors, self.id)
            || store.has_related(Relation::IssueMailingAddresses, self.id)
    }

    fn network_edges<'s>(&self, store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>> {
        let mut edges = Vec::new();
        if let Some(journal) = store.journal(self.journal_id) {
            edges.push(NetworkEdge::new(EntityRef::Journal(journal)));
        }
        if let Some(loc) = self.publication_address.and_then(|id| store.location(id)) {
            edges.push(NetworkEdge::labelled(
                EntityRef::Location(loc),
                "publication address",
            ));
        }
        if let Some(loc) = self.print_address.and_then(|id| store.location(id)) {
            edges.push(NetworkEdge::labelled(
                EntityRef::Location(loc),
                "print address",
            ));
        }
        edges.extend(
            store
                .related_people(Relation::IssueEditors, self.id)
                .into_iter()
                .map(|p| NetworkEdge::labelled(EntityRef::Person(p), "editor")),
        );
        edges.extend(
            store
                .related_people(Relation::IssueContributingEditors, self.id)
                .into_iter()
                .map(|p| NetworkEdge::labelled(EntityRef::Person(p), "contributing editor")),
        );
        edges.extend(
            store
                .related_locations(Relation::IssueMailingAddresses, self.id)
                .into_iter()
                .map(|l| NetworkEdge::labelled(EntityRef::Location(l), "mailing address")),
        );
        edges
    }
}

// ============================================================================
// Item
// ============================================================================

impl NetworkNode for Item {
    fn node_kind(&self) -> NodeKind {
        NodeKind::Item
    }

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn to_node(&self, store: &dyn EntityStore) -> Node {
        let genres: Vec<&str> = store
            .item_genres(self.id)
            .into_iter()
            .map(|g| g.name.as_str())
            .collect();
        let issue = store.item_issue(self).map(|i| store.issue_display(i));
        node_for(self, self.title.as_str())
            .with_attr("anonymous", self.anonymous)
            .with_attr("no creator", self.no_creator)
            .with_opt_attr("issue", issue)
            .with_opt_attr("genre", non_empty(&genres.join(", ")))
    }

    fn has_network_edges(&self, store: &dyn EntityStore) -> bool {
        store.issue(self.issue_id).is_some()
            || store.has_related(Relation::ItemCreators, self.id)
            || store.has_related(Relation::ItemTranslators, self.id)
            || store.has_related(Relation::ItemMentionedPeople, self.id)
            || store.has_related(Relation::ItemAddresses, self.id)
            || store
                .item_place_names(self.id)
                .iter()
                .any(|p| p.location_id.is_some())
    }

    fn network_edges<'s>(&self, store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>> {
        let mut edges = Vec::new();
        if let Some(issue) = store.issue(self.issue_id) {
            edges.push(NetworkEdge::new(EntityRef::Issue(issue)));
        }
        let people = |relation: Relation, label: &'static str| {
            store
                .related_people(relation, self.id)
                .into_iter()
                .map(move |p| NetworkEdge::labelled(EntityRef::Person(p), label))
        };
        edges.extend(people(Relation::ItemCreators, "creator"));
        edges.extend(people(Relation::ItemTranslators, "translator"));
        edges.extend(people(Relation::ItemMentionedPeople, "mentioned"));
        edges.extend(
            store
                .related_locations(Relation::ItemAddresses, self.id)
                .into_iter()
                .map(|l| NetworkEdge::new(EntityRef::Location(l))),
        );
        // Only place names resolved to a location produce an edge.
        edges.extend(
            store
                .item_place_names(self.id)
                .into_iter()
                .filter_map(|p| p.location_id.and_then(|id| store.location(id)))
                .map(|l| NetworkEdge::labelled(EntityRef::Location(l), "mentioned")),
        );
        edges
    }
}

// ============================================================================
// Location
// ============================================================================

impl NetworkNode for Location {
    fn node_kind(&self) -> NodeKind {
        NodeKind::Location
    }

    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn to_node(&self, _store: &dyn EntityStore) -> Node {
        node_for(self, self.short_label())
            .with_opt_attr("city", non_empty(&self.city))
            .with_opt_attr("state", self.state.as_deref().and_then(non_empty))
            .with_opt_attr("country", non_empty(&self.country))
    }

    fn has_network_edges(&self, _store: &dyn EntityStore) -> bool {
        false
    }

    fn network_edges<'s>(&self, _store: &'s dyn EntityStore) -> Vec<NetworkEdge<'s>> {
        Vec::new()
    }
}
