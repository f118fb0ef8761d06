//! JSON dataset loading.
//!
//! A dataset is a single JSON document listing every entity, with
//! many-to-many associations written inline as id lists on the record that
//! owns them:
//!
//! ```json
//! {
//!   "journals": [{ "id": 1, "title": "Yugen", "schools": [2] }],
//!   "issues":   [{ "id": 10, "journal_id": 1, "editors": [1] }],
//!   "items":    [{ "id": 100, "issue_id": 10, "title": "Poem",
//!                  "creators": [{ "person_id": 3, "name_used": "F. O'H." }] }]
//! }
//! ```
//!
//! Loading validates every reference and fails on the first dangling one.

use crate::memory::{Link, MemoryStore};
use crate::models::{
    CreatorName, EntityId, Genre, Issue, Item, Journal, Location, Name, PenName, Person,
    PlaceName, School,
};
use litnet_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(flatten)]
    pub person: Person,
    #[serde(default)]
    pub schools: Vec<EntityId>,
    #[serde(default)]
    pub dwellings: Vec<EntityId>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SchoolRecord {
    #[serde(flatten)]
    pub school: School,
    #[serde(default)]
    pub locations: Vec<EntityId>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JournalRecord {
    #[serde(flatten)]
    pub journal: Journal,
    #[serde(default)]
    pub schools: Vec<EntityId>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IssueRecord {
    #[serde(flatten)]
    pub issue: Issue,
    #[serde(default)]
    pub editors: Vec<EntityId>,
    #[serde(default)]
    pub contributing_editors: Vec<EntityId>,
    #[serde(default)]
    pub mailing_addresses: Vec<EntityId>,
}

/// Creator entry on an item record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreatorRecord {
    pub person_id: EntityId,
    #[serde(default)]
    pub name_used: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(flatten)]
    pub item: Item,
    #[serde(default)]
    pub creators: Vec<CreatorRecord>,
    #[serde(default)]
    pub translators: Vec<EntityId>,
    #[serde(default)]
    pub persons_mentioned: Vec<EntityId>,
    #[serde(default)]
    pub genres: Vec<EntityId>,
    #[serde(default)]
    pub addresses: Vec<EntityId>,
}

/// Complete serialized catalogue.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub locations: Vec<Location>,
    pub schools: Vec<SchoolRecord>,
    pub people: Vec<PersonRecord>,
    pub names: Vec<Name>,
    pub pen_names: Vec<PenName>,
    pub journals: Vec<JournalRecord>,
    pub issues: Vec<IssueRecord>,
    pub genres: Vec<Genre>,
    pub items: Vec<ItemRecord>,
    pub place_names: Vec<PlaceName>,
}

impl Dataset {
    /// Read a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_json_str(&json)
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::parse(format!("Failed to parse dataset JSON: {e}")))
    }

    /// Build a validated [`MemoryStore`].
    ///
    /// Entities are inserted in dependency order, then associations.
    pub fn into_store(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();

        for location in self.locations {
            store.insert_location(location)?;
        }
        for genre in self.genres {
            store.insert_genre(genre)?;
        }
        let mut school_links = Vec::new();
        for record in self.schools {
            for location in record.locations {
                school_links.push((Link::SchoolLocation, record.school.id, location));
            }
            store.insert_school(record.school)?;
        }
        let mut person_links = Vec::new();
        for record in self.people {
            let id = record.person.id;
            person_links.extend(record.schools.into_iter().map(|s| (Link::PersonSchool, id, s)));
            person_links.extend(
                record
                    .dwellings
                    .into_iter()
                    .map(|l| (Link::PersonDwelling, id, l)),
            );
            store.insert_person(record.person)?;
        }
        for name in self.names {
            store.insert_name(name)?;
        }
        for pen_name in self.pen_names {
            store.insert_pen_name(pen_name)?;
        }
        let mut journal_links = Vec::new();
        for record in self.journals {
            let id = record.journal.id;
            journal_links.extend(record.schools.into_iter().map(|s| (Link::JournalSchool, id, s)));
            store.insert_journal(record.journal)?;
        }

        let mut issue_links = Vec::new();
        for record in self.issues {
            let id = record.issue.id;
            issue_links.extend(record.editors.into_iter().map(|p| (Link::IssueEditor, id, p)));
            issue_links.extend(
                record
                    .contributing_editors
                    .into_iter()
                    .map(|p| (Link::IssueContributingEditor, id, p)),
            );
            issue_links.extend(
                record
                    .mailing_addresses
                    .into_iter()
                    .map(|l| (Link::IssueMailingAddress, id, l)),
            );
            store.insert_issue(record.issue)?;
        }

        let mut item_links = Vec::new();
        let mut creators = Vec::new();
        for record in self.items {
            let id = record.item.id;
            creators.extend(record.creators.into_iter().map(|c| CreatorName {
                item_id: id,
                person_id: c.person_id,
                name_used: c.name_used,
            }));
            item_links.extend(
                record
                    .translators
                    .into_iter()
                    .map(|p| (Link::ItemTranslator, id, p)),
            );
            item_links.extend(
                record
                    .persons_mentioned
                    .into_iter()
                    .map(|p| (Link::ItemMentionedPerson, id, p)),
            );
            item_links.extend(record.genres.into_iter().map(|g| (Link::ItemGenre, id, g)));
            item_links.extend(
                record
                    .addresses
                    .into_iter()
                    .map(|l| (Link::ItemAddress, id, l)),
            );
            store.insert_item(record.item)?;
        }
        for creator in creators {
            store.insert_creator_name(creator)?;
        }
        for place in self.place_names {
            store.insert_place_name(place)?;
        }

        for (link, left, right) in school_links
            .into_iter()
            .chain(person_links)
            .chain(journal_links)
            .chain(issue_links)
            .chain(item_links)
        {
            store.link(link, left, right)?;
        }

        log::debug!(
            "Loaded dataset into store: {} entities",
            store.entity_count()
        );
        Ok(store)
    }
}

/// Load a JSON dataset file straight into a [`MemoryStore`].
pub fn load_store(path: impl AsRef<Path>) -> Result<MemoryStore> {
    Dataset::load(path)?.into_store()
}
