//! In-memory entity store.
//!
//! Entities are kept in ordered maps and every association in an explicit
//! join table indexed in both directions. Inserts validate foreign keys, so
//! a populated [`MemoryStore`] never holds a dangling reference.

use crate::models::{
    CreatorName, EntityId, EntityKind, Genre, Issue, Item, Journal, Location, Name, PenName,
    Person, PlaceName, School,
};
use crate::store::{EntityStore, Relation};
use litnet_core::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A many-to-many association that can be recorded with [`MemoryStore::link`].
///
/// Each link fills its forward relation and, where one exists, the
/// reverse relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    PersonSchool,
    PersonDwelling,
    SchoolLocation,
    JournalSchool,
    IssueEditor,
    IssueContributingEditor,
    IssueMailingAddress,
    ItemTranslator,
    ItemMentionedPerson,
    ItemGenre,
    ItemAddress,
}

impl Link {
    /// Forward and optional reverse relation for this association.
    pub fn relations(&self) -> (Relation, Option<Relation>) {
        use Relation as R;
        match self {
            Self::PersonSchool => (R::PersonSchools, Some(R::SchoolMembers)),
            Self::PersonDwelling => (R::PersonDwellings, None),
            Self::SchoolLocation => (R::SchoolLocations, None),
            Self::JournalSchool => (R::JournalSchools, Some(R::SchoolJournals)),
            Self::IssueEditor => (R::IssueEditors, Some(R::IssuesEdited)),
            Self::IssueContributingEditor => {
                (R::IssueContributingEditors, Some(R::IssuesContribEdited))
            }
            Self::IssueMailingAddress => (R::IssueMailingAddresses, None),
            Self::ItemTranslator => (R::ItemTranslators, Some(R::ItemsTranslated)),
            Self::ItemMentionedPerson => (R::ItemMentionedPeople, Some(R::ItemsMentionedIn)),
            Self::ItemGenre => (R::ItemGenres, None),
            Self::ItemAddress => (R::ItemAddresses, None),
        }
    }
}

/// Store backed by ordered in-memory maps.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    people: BTreeMap<EntityId, Person>,
    schools: BTreeMap<EntityId, School>,
    journals: BTreeMap<EntityId, Journal>,
    issues: BTreeMap<EntityId, Issue>,
    items: BTreeMap<EntityId, Item>,
    locations: BTreeMap<EntityId, Location>,
    genres: BTreeMap<EntityId, Genre>,
    place_names: BTreeMap<EntityId, PlaceName>,
    names: BTreeMap<EntityId, Name>,
    pen_names: BTreeMap<EntityId, PenName>,
    /// Keyed by (item, person).
    creator_names: BTreeMap<(EntityId, EntityId), CreatorName>,
    relations: HashMap<Relation, BTreeMap<EntityId, BTreeSet<EntityId>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entity of `kind` with `id` exists.
    pub fn contains(&self, kind: EntityKind, id: EntityId) -> bool {
        match kind {
            EntityKind::Person => self.people.contains_key(&id),
            EntityKind::School => self.schools.contains_key(&id),
            EntityKind::Journal => self.journals.contains_key(&id),
            EntityKind::Issue => self.issues.contains_key(&id),
            EntityKind::Item => self.items.contains_key(&id),
            EntityKind::Location => self.locations.contains_key(&id),
            EntityKind::Genre => self.genres.contains_key(&id),
        }
    }

    fn require(&self, kind: EntityKind, id: EntityId, context: &str) -> Result<()> {
        if self.contains(kind, id) {
            Ok(())
        } else {
            Err(Error::invalid_data(format!(
                "{context} references unknown {kind} {id}"
            )))
        }
    }

    fn vacant<K: Ord, V>(map: &BTreeMap<K, V>, key: &K, what: &str) -> Result<()> {
        if map.contains_key(key) {
            Err(Error::invalid_data(format!("duplicate {what}")))
        } else {
            Ok(())
        }
    }

    fn index(&mut self, relation: Relation, left: EntityId, right: EntityId) {
        self.relations
            .entry(relation)
            .or_default()
            .entry(left)
            .or_default()
            .insert(right);
    }

    // ------------------------------------------------------------------------
    // Inserts
    // ------------------------------------------------------------------------

    pub fn insert_location(&mut self, location: Location) -> Result<()> {
        Self::vacant(&self.locations, &location.id, &format!("location {}", location.id))?;
        self.locations.insert(location.id, location);
        Ok(())
    }

    pub fn insert_school(&mut self, school: School) -> Result<()> {
        Self::vacant(&self.schools, &school.id, &format!("school {}", school.id))?;
        self.schools.insert(school.id, school);
        Ok(())
    }

    pub fn insert_person(&mut self, person: Person) -> Result<()> {
        Self::vacant(&self.people, &person.id, &format!("person {}", person.id))?;
        self.people.insert(person.id, person);
        Ok(())
    }

    pub fn insert_journal(&mut self, journal: Journal) -> Result<()> {
        Self::vacant(&self.journals, &journal.id, &format!("journal {}", journal.id))?;
        self.journals.insert(journal.id, journal);
        Ok(())
    }

    pub fn insert_genre(&mut self, genre: Genre) -> Result<()> {
        Self::vacant(&self.genres, &genre.id, &format!("genre {}", genre.id))?;
        self.genres.insert(genre.id, genre);
        Ok(())
    }

    /// Insert an issue. Its journal and any addresses must already exist.
    pub fn insert_issue(&mut self, issue: Issue) -> Result<()> {
        let context = format!("issue {}", issue.id);
        Self::vacant(&self.issues, &issue.id, &context)?;
        self.require(EntityKind::Journal, issue.journal_id, &context)?;
        for address in [issue.publication_address, issue.print_address]
            .into_iter()
            .flatten()
        {
            self.require(EntityKind::Location, address, &context)?;
        }
        self.index(Relation::JournalIssues, issue.journal_id, issue.id);
        self.issues.insert(issue.id, issue);
        Ok(())
    }

    /// Insert an item. Its issue must already exist.
    pub fn insert_item(&mut self, item: Item) -> Result<()> {
        let context = format!("item {}", item.id);
        Self::vacant(&self.items, &item.id, &context)?;
        self.require(EntityKind::Issue, item.issue_id, &context)?;
        self.index(Relation::IssueItems, item.issue_id, item.id);
        self.items.insert(item.id, item);
        Ok(())
    }

    /// Record a person as creator of an item.
    pub fn insert_creator_name(&mut self, creator: CreatorName) -> Result<()> {
        let context = format!("creator of item {}", creator.item_id);
        Self::vacant(
            &self.creator_names,
            &(creator.item_id, creator.person_id),
            &format!("person {} as {context}", creator.person_id),
        )?;
        self.require(EntityKind::Item, creator.item_id, &context)?;
        self.require(EntityKind::Person, creator.person_id, &context)?;
        self.index(Relation::ItemCreators, creator.item_id, creator.person_id);
        self.index(Relation::ItemsCreated, creator.person_id, creator.item_id);
        self.creator_names
            .insert((creator.item_id, creator.person_id), creator);
        Ok(())
    }

    /// Insert a place name. The location is optional; when present it
    /// must exist.
    pub fn insert_place_name(&mut self, place: PlaceName) -> Result<()> {
        let context = format!("place name {}", place.id);
        Self::vacant(&self.place_names, &place.id, &context)?;
        self.require(EntityKind::Item, place.item_id, &context)?;
        if let Some(location) = place.location_id {
            self.require(EntityKind::Location, location, &context)?;
        }
        self.index(Relation::ItemPlaceNames, place.item_id, place.id);
        self.place_names.insert(place.id, place);
        Ok(())
    }

    pub fn insert_name(&mut self, name: Name) -> Result<()> {
        let context = format!("name {}", name.id);
        Self::vacant(&self.names, &name.id, &context)?;
        self.require(EntityKind::Person, name.person_id, &context)?;
        self.names.insert(name.id, name);
        Ok(())
    }

    pub fn insert_pen_name(&mut self, pen_name: PenName) -> Result<()> {
        let context = format!("pen name {}", pen_name.id);
        Self::vacant(&self.pen_names, &pen_name.id, &context)?;
        self.require(EntityKind::Person, pen_name.person_id, &context)?;
        self.pen_names.insert(pen_name.id, pen_name);
        Ok(())
    }

    /// Record a many-to-many association between two existing entities.
    pub fn link(&mut self, link: Link, left: EntityId, right: EntityId) -> Result<()> {
        let (forward, reverse) = link.relations();
        let (left_kind, right_kind) = forward.endpoints();
        let context = format!("{link:?} link");
        self.require(left_kind, left, &context)?;
        if let Some(kind) = right_kind {
            self.require(kind, right, &context)?;
        }
        self.index(forward, left, right);
        if let Some(reverse) = reverse {
            self.index(reverse, right, left);
        }
        Ok(())
    }

    /// Total number of catalogued entities of the six network kinds.
    pub fn entity_count(&self) -> usize {
        self.people.len()
            + self.schools.len()
            + self.journals.len()
            + self.issues.len()
            + self.items.len()
            + self.locations.len()
    }
}

impl EntityStore for MemoryStore {
    fn person(&self, id: EntityId) -> Option<&Person> {
        self.people.get(&id)
    }

    fn school(&self, id: EntityId) -> Option<&School> {
        self.schools.get(&id)
    }

    fn journal(&self, id: EntityId) -> Option<&Journal> {
        self.journals.get(&id)
    }

    fn issue(&self, id: EntityId) -> Option<&Issue> {
        self.issues.get(&id)
    }

    fn item(&self, id: EntityId) -> Option<&Item> {
        self.items.get(&id)
    }

    fn location(&self, id: EntityId) -> Option<&Location> {
        self.locations.get(&id)
    }

    fn genre(&self, id: EntityId) -> Option<&Genre> {
        self.genres.get(&id)
    }

    fn place_name(&self, id: EntityId) -> Option<&PlaceName> {
        self.place_names.get(&id)
    }

    fn people(&self) -> Vec<&Person> {
        self.people.values().collect()
    }

    fn schools(&self) -> Vec<&School> {
        self.schools.values().collect()
    }

    fn journals(&self) -> Vec<&Journal> {
        self.journals.values().collect()
    }

    fn issues(&self) -> Vec<&Issue> {
        self.issues.values().collect()
    }

    fn items(&self) -> Vec<&Item> {
        self.items.values().collect()
    }

    fn locations(&self) -> Vec<&Location> {
        self.locations.values().collect()
    }

    fn related_ids(&self, relation: Relation, id: EntityId) -> Vec<EntityId> {
        self.relations
            .get(&relation)
            .and_then(|table| table.get(&id))
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn has_related(&self, relation: Relation, id: EntityId) -> bool {
        self.relations
            .get(&relation)
            .and_then(|table| table.get(&id))
            .is_some_and(|ids| !ids.is_empty())
    }

    fn creator_names(&self, item: EntityId) -> Vec<&CreatorName> {
        self.creator_names
            .range((item, EntityId::MIN)..=(item, EntityId::MAX))
            .map(|(_, creator)| creator)
            .collect()
    }

    fn alternate_names(&self, person: EntityId) -> Vec<&Name> {
        self.names
            .values()
            .filter(|n| n.person_id == person)
            .collect()
    }

    fn pen_names(&self, person: EntityId) -> Vec<&PenName> {
        self.pen_names
            .values()
            .filter(|n| n.person_id == person)
            .collect()
    }
}
