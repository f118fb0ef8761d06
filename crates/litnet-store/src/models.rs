//! Entity records held by the store.
//!
//! Records carry only their own scalar attributes plus foreign keys.
//! Many-to-many associations live in the store's join tables and are
//! reached through [`EntityStore`](crate::EntityStore) relations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric primary key shared by every entity type.
pub type EntityId = u64;

/// The entity types known to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Person,
    School,
    Journal,
    Issue,
    Item,
    Location,
    Genre,
}

impl EntityKind {
    /// Lowercase name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::School => "school",
            Self::Journal => "journal",
            Self::Issue => "issue",
            Self::Item => "item",
            Self::Location => "location",
            Self::Genre => "genre",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Joins the non-empty parts with `sep`.
fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

// ============================================================================
// Location
// ============================================================================

/// A street address or place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    #[serde(default)]
    pub street_address: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub country: String,
}

impl Location {
    /// Compact label: street address, city and state, or city and country
    /// when there is no state.
    pub fn short_label(&self) -> String {
        let region = self.state.as_deref().unwrap_or(&self.country);
        join_present([self.street_address.as_str(), &self.city, region], ", ")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.as_deref().unwrap_or("");
        f.write_str(&join_present(
            [
                self.street_address.as_str(),
                &self.city,
                state,
                &self.zipcode,
                &self.country,
            ],
            " ",
        ))
    }
}

// ============================================================================
// School
// ============================================================================

/// Known categorizers, keyed by the slug stored on a school.
pub const CATEGORIZERS: &[(&str, &str)] = &[("donald-allen", "Donald Allen")];

/// A school of poetry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: EntityId,
    pub name: String,
    /// Slug of the person or scheme that classified the school.
    #[serde(default)]
    pub categorizer: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl School {
    /// Display form of the categorizer slug, if it is a known one.
    pub fn categorizer_name(&self) -> Option<&'static str> {
        let slug = self.categorizer.as_deref()?;
        CATEGORIZERS
            .iter()
            .find(|(key, _)| *key == slug)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// Person
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    /// Single-letter code as stored.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Female => "F",
            Self::Male => "M",
        }
    }
}

/// A person associated with a school, journal issue, or item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: EntityId,
    #[serde(default)]
    pub first_name: String,
    pub last_name: String,
    /// Multi-valued race terms.
    #[serde(default)]
    pub race: Vec<String>,
    #[serde(default)]
    pub racial_self_description: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub notes: String,
}

impl Person {
    /// "First Last", skipping an empty first name.
    pub fn firstname_lastname(&self) -> String {
        join_present([self.first_name.as_str(), &self.last_name], " ")
    }

    /// Comma-joined race terms, if any are recorded.
    pub fn race_label(&self) -> Option<String> {
        if self.race.is_empty() {
            None
        } else {
            Some(self.race.join(", "))
        }
    }
}

impl fmt::Display for Person {
    /// "Last, First", or just the last name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_name.is_empty() {
            f.write_str(&self.last_name)
        } else {
            write!(f, "{}, {}", self.last_name, self.first_name)
        }
    }
}

/// Alternate name a person went by during their life.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub id: EntityId,
    pub person_id: EntityId,
    #[serde(default)]
    pub first_name: String,
    pub last_name: String,
}

/// Name used for publication only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PenName {
    pub id: EntityId,
    pub person_id: EntityId,
    pub name: String,
}

// ============================================================================
// Journal / Issue
// ============================================================================

/// A journal or magazine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub issn: String,
    #[serde(default)]
    pub notes: String,
}

impl fmt::Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Fall,
    Spring,
    Summer,
    Winter,
}

impl Season {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Winter => "Winter",
        }
    }
}

/// A single issue of a [`Journal`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: EntityId,
    pub journal_id: EntityId,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub issue: String,
    /// Approximate date as recorded (`YYYY`, `MM/YYYY` or `DD/MM/YYYY`).
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub publication_address: Option<EntityId>,
    #[serde(default)]
    pub print_address: Option<EntityId>,
    #[serde(default)]
    pub physical_description: String,
    #[serde(default)]
    pub numbered_pages: bool,
    #[serde(default)]
    pub notes: String,
    /// Order within the journal; volume and issue numbers are unreliable.
    #[serde(default)]
    pub sort_order: Option<u16>,
}

impl Issue {
    /// Display label without the journal title: `Volume V, Issue I`.
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.volume.is_empty() {
            parts.push(format!("Volume {}", self.volume));
        }
        if self.issue.is_empty() {
            parts.push("Issue".to_string());
        } else {
            parts.push(format!("Issue {}", self.issue));
        }
        parts.join(", ")
    }

    /// Full display: journal title followed by the issue label.
    pub fn display_with(&self, journal: &Journal) -> String {
        format!("{} {}", journal.title, self.label())
    }

    /// Season and publication date, whichever are present.
    pub fn date(&self) -> String {
        join_present(
            [
                self.season.map(|s| s.name()).unwrap_or(""),
                self.publication_date.as_deref().unwrap_or(""),
            ],
            " ",
        )
    }
}

// ============================================================================
// Item and its parts
// ============================================================================

/// A piece of content published in an [`Issue`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub issue_id: EntityId,
    pub title: String,
    /// Labelled as by "Anonymous".
    #[serde(default)]
    pub anonymous: bool,
    /// No author listed at all, including "Anonymous".
    #[serde(default)]
    pub no_creator: bool,
    #[serde(default)]
    pub start_page: i32,
    #[serde(default)]
    pub end_page: i32,
    #[serde(default)]
    pub abbreviated_text: bool,
    #[serde(default)]
    pub literary_advertisement: bool,
    #[serde(default)]
    pub notes: String,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: EntityId,
    pub name: String,
}

/// Join record for item creators, capturing the name as printed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatorName {
    pub item_id: EntityId,
    pub person_id: EntityId,
    #[serde(default)]
    pub name_used: String,
}

/// A place as mentioned in an item, optionally resolved to a [`Location`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceName {
    pub id: EntityId,
    pub name: String,
    pub item_id: EntityId,
    #[serde(default)]
    pub location_id: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_names() {
        let person = Person {
            id: 1,
            first_name: "Frank".into(),
            last_name: "O'Hara".into(),
            ..Default::default()
        };
        assert_eq!(person.to_string(), "O'Hara, Frank");
        assert_eq!(person.firstname_lastname(), "Frank O'Hara");

        let mononym = Person {
            id: 2,
            last_name: "H.D.".into(),
            ..Default::default()
        };
        assert_eq!(mononym.to_string(), "H.D.");
        assert_eq!(mononym.firstname_lastname(), "H.D.");
    }

    #[test]
    fn test_race_label() {
        let mut person = Person::default();
        assert!(person.race_label().is_none());
        person.race = vec!["Black or African American".into(), "White".into()];
        assert_eq!(
            person.race_label().as_deref(),
            Some("Black or African American, White")
        );
    }

    #[test]
    fn test_issue_label() {
        let mut issue = Issue {
            volume: "2".into(),
            issue: "3".into(),
            ..Default::default()
        };
        assert_eq!(issue.label(), "Volume 2, Issue 3");

        issue.volume.clear();
        assert_eq!(issue.label(), "Issue 3");

        issue.issue.clear();
        assert_eq!(issue.label(), "Issue");

        let journal = Journal {
            title: "Yugen".into(),
            ..Default::default()
        };
        issue.volume = "1".into();
        assert_eq!(issue.display_with(&journal), "Yugen Volume 1, Issue");
    }

    #[test]
    fn test_issue_date() {
        let mut issue = Issue::default();
        assert_eq!(issue.date(), "");
        issue.publication_date = Some("1958".into());
        assert_eq!(issue.date(), "1958");
        issue.season = Some(Season::Spring);
        assert_eq!(issue.date(), "Spring 1958");
    }

    #[test]
    fn test_location_labels() {
        let loc = Location {
            id: 1,
            street_address: "402 W 20th St".into(),
            city: "New York".into(),
            state: Some("NY".into()),
            zipcode: "10011".into(),
            country: "United States".into(),
        };
        assert_eq!(loc.short_label(), "402 W 20th St, New York, NY");
        assert_eq!(loc.to_string(), "402 W 20th St New York NY 10011 United States");

        let abroad = Location {
            id: 2,
            city: "Paris".into(),
            country: "France".into(),
            ..Default::default()
        };
        assert_eq!(abroad.short_label(), "Paris, France");
    }

    #[test]
    fn test_categorizer_name() {
        let mut school = School {
            id: 1,
            name: "Black Mountain".into(),
            categorizer: Some("donald-allen".into()),
            ..Default::default()
        };
        assert_eq!(school.categorizer_name(), Some("Donald Allen"));
        school.categorizer = Some("unknown".into());
        assert_eq!(school.categorizer_name(), None);
        school.categorizer = None;
        assert_eq!(school.categorizer_name(), None);
    }

    #[test]
    fn test_gender_serde_codes() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"F\"");
        let parsed: Gender = serde_json::from_str("\"M\"").unwrap();
        assert_eq!(parsed, Gender::Male);
        assert_eq!(parsed.code(), "M");
    }
}
