//! The read-only entity store interface.
//!
//! Graph construction only ever reads from an [`EntityStore`]. Join tables
//! and foreign-key back-references are addressed uniformly through
//! [`Relation`], one variant per traversal direction, so implementations
//! only need to answer "which ids are related to this id".

use crate::models::{
    CreatorName, EntityId, EntityKind, Genre, Issue, Item, Journal, Location, Name, PenName,
    Person, PlaceName, School,
};

/// A traversable relation between two entity kinds.
///
/// Each variant reads "left → right": `IssueEditors` maps an issue id to the
/// ids of its editors, `IssuesEdited` maps a person id to the issues they
/// edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    PersonSchools,
    SchoolMembers,
    PersonDwellings,
    SchoolLocations,
    JournalSchools,
    SchoolJournals,
    JournalIssues,
    IssueItems,
    IssueEditors,
    IssuesEdited,
    IssueContributingEditors,
    IssuesContribEdited,
    IssueMailingAddresses,
    ItemCreators,
    ItemsCreated,
    ItemTranslators,
    ItemsTranslated,
    ItemMentionedPeople,
    ItemsMentionedIn,
    ItemGenres,
    ItemAddresses,
    ItemPlaceNames,
}

impl Relation {
    /// Entity kinds on the (left, right) side of the relation.
    ///
    /// `ItemPlaceNames` yields place-name ids, which are not an
    /// [`EntityKind`], so its right side is `None`.
    pub fn endpoints(&self) -> (EntityKind, Option<EntityKind>) {
        use EntityKind as K;
        match self {
            Self::PersonSchools => (K::Person, Some(K::School)),
            Self::SchoolMembers => (K::School, Some(K::Person)),
            Self::PersonDwellings => (K::Person, Some(K::Location)),
            Self::SchoolLocations => (K::School, Some(K::Location)),
            Self::JournalSchools => (K::Journal, Some(K::School)),
            Self::SchoolJournals => (K::School, Some(K::Journal)),
            Self::JournalIssues => (K::Journal, Some(K::Issue)),
            Self::IssueItems => (K::Issue, Some(K::Item)),
            Self::IssueEditors => (K::Issue, Some(K::Person)),
            Self::IssuesEdited => (K::Person, Some(K::Issue)),
            Self::IssueContributingEditors => (K::Issue, Some(K::Person)),
            Self::IssuesContribEdited => (K::Person, Some(K::Issue)),
            Self::IssueMailingAddresses => (K::Issue, Some(K::Location)),
            Self::ItemCreators => (K::Item, Some(K::Person)),
            Self::ItemsCreated => (K::Person, Some(K::Item)),
            Self::ItemTranslators => (K::Item, Some(K::Person)),
            Self::ItemsTranslated => (K::Person, Some(K::Item)),
            Self::ItemMentionedPeople => (K::Item, Some(K::Person)),
            Self::ItemsMentionedIn => (K::Person, Some(K::Item)),
            Self::ItemGenres => (K::Item, Some(K::Genre)),
            Self::ItemAddresses => (K::Item, Some(K::Location)),
            Self::ItemPlaceNames => (K::Item, None),
        }
    }
}

/// Read-only, synchronous access to the catalogued entities.
///
/// Enumerations and relation lookups return ids in ascending order with no
/// duplicates. The typed accessors are provided on top of
/// [`related_ids`](EntityStore::related_ids) and the per-kind lookups.
pub trait EntityStore: Send + Sync {
    fn person(&self, id: EntityId) -> Option<&Person>;
    fn school(&self, id: EntityId) -> Option<&School>;
    fn journal(&self, id: EntityId) -> Option<&Journal>;
    fn issue(&self, id: EntityId) -> Option<&Issue>;
    fn item(&self, id: EntityId) -> Option<&Item>;
    fn location(&self, id: EntityId) -> Option<&Location>;
    fn genre(&self, id: EntityId) -> Option<&Genre>;
    fn place_name(&self, id: EntityId) -> Option<&PlaceName>;

    fn people(&self) -> Vec<&Person>;
    fn schools(&self) -> Vec<&School>;
    fn journals(&self) -> Vec<&Journal>;
    fn issues(&self) -> Vec<&Issue>;
    fn items(&self) -> Vec<&Item>;
    fn locations(&self) -> Vec<&Location>;

    /// Ids on the right side of `relation` for the left-side entity `id`.
    fn related_ids(&self, relation: Relation, id: EntityId) -> Vec<EntityId>;

    /// Existence test for a relation without materialising the ids.
    fn has_related(&self, relation: Relation, id: EntityId) -> bool {
        !self.related_ids(relation, id).is_empty()
    }

    /// Creator join records for an item, ordered by person id.
    fn creator_names(&self, item: EntityId) -> Vec<&CreatorName>;

    fn alternate_names(&self, person: EntityId) -> Vec<&Name>;
    fn pen_names(&self, person: EntityId) -> Vec<&PenName>;

    // ------------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------------

    /// Schools classified by the given categorizer slug.
    fn schools_by_categorizer(&self, categorizer: &str) -> Vec<&School> {
        self.schools()
            .into_iter()
            .filter(|s| s.categorizer.as_deref() == Some(categorizer))
            .collect()
    }

    fn related_people(&self, relation: Relation, id: EntityId) -> Vec<&Person> {
        self.related_ids(relation, id)
            .into_iter()
            .filter_map(|pid| self.person(pid))
            .collect()
    }

    fn related_schools(&self, relation: Relation, id: EntityId) -> Vec<&School> {
        self.related_ids(relation, id)
            .into_iter()
            .filter_map(|sid| self.school(sid))
            .collect()
    }

    fn related_journals(&self, relation: Relation, id: EntityId) -> Vec<&Journal> {
        self.related_ids(relation, id)
            .into_iter()
            .filter_map(|jid| self.journal(jid))
            .collect()
    }

    fn related_issues(&self, relation: Relation, id: EntityId) -> Vec<&Issue> {
        self.related_ids(relation, id)
            .into_iter()
            .filter_map(|iid| self.issue(iid))
            .collect()
    }

    fn related_items(&self, relation: Relation, id: EntityId) -> Vec<&Item> {
        self.related_ids(relation, id)
            .into_iter()
            .filter_map(|iid| self.item(iid))
            .collect()
    }

    fn related_locations(&self, relation: Relation, id: EntityId) -> Vec<&Location> {
        self.related_ids(relation, id)
            .into_iter()
            .filter_map(|lid| self.location(lid))
            .collect()
    }

    /// Genres of an item, by name.
    fn item_genres(&self, item: EntityId) -> Vec<&Genre> {
        let mut genres: Vec<&Genre> = self
            .related_ids(Relation::ItemGenres, item)
            .into_iter()
            .filter_map(|gid| self.genre(gid))
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        genres
    }

    /// Place names mentioned in an item, resolved or not.
    fn item_place_names(&self, item: EntityId) -> Vec<&PlaceName> {
        self.related_ids(Relation::ItemPlaceNames, item)
            .into_iter()
            .filter_map(|pid| self.place_name(pid))
            .collect()
    }

    /// The journal an issue belongs to.
    fn issue_journal(&self, issue: &Issue) -> Option<&Journal> {
        self.journal(issue.journal_id)
    }

    /// The issue an item belongs to.
    fn item_issue(&self, item: &Item) -> Option<&Issue> {
        self.issue(item.issue_id)
    }

    /// "<journal title> <issue label>", or the bare label for an orphaned issue.
    fn issue_display(&self, issue: &Issue) -> String {
        match self.issue_journal(issue) {
            Some(journal) => issue.display_with(journal),
            None => issue.label(),
        }
    }
}
