//! A small literary catalogue for tests.
//!
//! Enabled for this crate's tests and, in dependent crates, with the
//! `test-utils` feature.
//!
//! Contents:
//!
//! - Journals: Yugen (1), The Floating Bear (2), Black Mountain Review (3)
//! - Yugen issue 10 is co-edited by Jones (1) and Cohen (2); issue 11 by
//!   Jones alone. Floating Bear issue 20 is edited by di Prima (8) with
//!   Jones as contributing editor. BMR issue 30 is edited by Olson (7).
//! - Item 100 (issue 10) is co-authored by O'Hara (3) and Koch (4) and
//!   mentions di Prima and two places, one unresolved.
//! - Item 101 (issue 10) is Lorca (6) translated by Blackburn (5).
//! - Item 102 (issue 11) is by Jones, who also edited that issue.
//! - Item 103 (issue 20) is by O'Hara; item 104 (issue 30) by Olson.
//! - Schools 1-3 are categorized by `donald-allen`, school 4 is not.

use crate::dataset::{
    CreatorRecord, Dataset, IssueRecord, ItemRecord, JournalRecord, PersonRecord, SchoolRecord,
};
use crate::memory::MemoryStore;
use crate::models::{
    EntityId, Gender, Genre, Issue, Item, Journal, Location, PenName, Person, PlaceName, School,
};
use litnet_core::Result;

pub const JONES: EntityId = 1;
pub const COHEN: EntityId = 2;
pub const OHARA: EntityId = 3;
pub const KOCH: EntityId = 4;
pub const BLACKBURN: EntityId = 5;
pub const LORCA: EntityId = 6;
pub const OLSON: EntityId = 7;
pub const DI_PRIMA: EntityId = 8;

pub const YUGEN: EntityId = 1;
pub const FLOATING_BEAR: EntityId = 2;
pub const BLACK_MOUNTAIN_REVIEW: EntityId = 3;

pub const DONALD_ALLEN: &str = "donald-allen";

fn location(id: EntityId, street: &str, city: &str, state: Option<&str>, country: &str) -> Location {
    Location {
        id,
        street_address: street.into(),
        city: city.into(),
        state: state.map(String::from),
        zipcode: String::new(),
        country: country.into(),
    }
}

fn school(id: EntityId, name: &str, categorizer: Option<&str>, locations: Vec<EntityId>) -> SchoolRecord {
    SchoolRecord {
        school: School {
            id,
            name: name.into(),
            categorizer: categorizer.map(String::from),
            notes: String::new(),
        },
        locations,
    }
}

fn person(id: EntityId, first: &str, last: &str) -> PersonRecord {
    PersonRecord {
        person: Person {
            id,
            first_name: first.into(),
            last_name: last.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn item(id: EntityId, issue_id: EntityId, title: &str, creators: &[EntityId]) -> ItemRecord {
    ItemRecord {
        item: Item {
            id,
            issue_id,
            title: title.into(),
            start_page: 1,
            end_page: 2,
            ..Default::default()
        },
        creators: creators
            .iter()
            .map(|&person_id| CreatorRecord {
                person_id,
                name_used: String::new(),
            })
            .collect(),
        genres: vec![1],
        ..Default::default()
    }
}

/// The sample catalogue as a [`Dataset`].
pub fn sample_dataset() -> Dataset {
    let mut jones = person(JONES, "LeRoi", "Jones");
    jones.person.race = vec!["Black or African American".into()];
    jones.person.gender = Some(Gender::Male);
    jones.schools = vec![3];
    jones.dwellings = vec![1];

    let mut cohen = person(COHEN, "Hettie", "Cohen");
    cohen.person.gender = Some(Gender::Female);

    let mut ohara = person(OHARA, "Frank", "O'Hara");
    ohara.schools = vec![2];
    let mut koch = person(KOCH, "Kenneth", "Koch");
    koch.schools = vec![2];

    let mut olson = person(OLSON, "Charles", "Olson");
    olson.schools = vec![1];
    olson.dwellings = vec![3];

    let mut yugen_1 = IssueRecord {
        issue: Issue {
            id: 10,
            journal_id: YUGEN,
            volume: "1".into(),
            issue: "1".into(),
            publication_date: Some("1958".into()),
            publication_address: Some(1),
            sort_order: Some(1),
            ..Default::default()
        },
        editors: vec![JONES, COHEN],
        ..Default::default()
    };
    yugen_1.mailing_addresses = vec![2];

    let yugen_2 = IssueRecord {
        issue: Issue {
            id: 11,
            journal_id: YUGEN,
            volume: "1".into(),
            issue: "2".into(),
            sort_order: Some(2),
            ..Default::default()
        },
        editors: vec![JONES],
        ..Default::default()
    };

    let bear = IssueRecord {
        issue: Issue {
            id: 20,
            journal_id: FLOATING_BEAR,
            issue: "1".into(),
            ..Default::default()
        },
        editors: vec![DI_PRIMA],
        contributing_editors: vec![JONES],
        ..Default::default()
    };

    let bmr = IssueRecord {
        issue: Issue {
            id: 30,
            journal_id: BLACK_MOUNTAIN_REVIEW,
            issue: "1".into(),
            print_address: Some(4),
            ..Default::default()
        },
        editors: vec![OLSON],
        ..Default::default()
    };

    let mut poem = item(100, 10, "Poem", &[OHARA, KOCH]);
    poem.persons_mentioned = vec![DI_PRIMA];
    let mut romances = item(101, 10, "Romances", &[LORCA]);
    romances.translators = vec![BLACKBURN];
    romances.genres = vec![1, 3];
    let mut verse = item(104, 30, "Projective Verse", &[OLSON]);
    verse.genres = vec![2];
    verse.addresses = vec![3];

    Dataset {
        locations: vec![
            location(1, "402 W 20th St", "New York", Some("NY"), "United States"),
            location(2, "", "San Francisco", Some("CA"), "United States"),
            location(3, "", "Black Mountain", Some("NC"), "United States"),
            location(4, "", "Palma de Mallorca", None, "Spain"),
        ],
        schools: vec![
            school(1, "Black Mountain", Some(DONALD_ALLEN), vec![3]),
            school(2, "New York School", Some(DONALD_ALLEN), vec![1]),
            school(3, "Beat Generation", Some(DONALD_ALLEN), vec![]),
            school(4, "Deep Image", None, vec![]),
        ],
        people: vec![
            jones,
            cohen,
            ohara,
            koch,
            person(BLACKBURN, "Paul", "Blackburn"),
            person(LORCA, "Federico", "García Lorca"),
            olson,
            person(DI_PRIMA, "Diane", "di Prima"),
        ],
        names: Vec::new(),
        pen_names: vec![PenName {
            id: 1,
            person_id: JONES,
            name: "Amiri Baraka".into(),
        }],
        journals: vec![
            JournalRecord {
                journal: Journal {
                    id: YUGEN,
                    title: "Yugen".into(),
                    publisher: "Totem Press".into(),
                    ..Default::default()
                },
                schools: vec![3],
            },
            JournalRecord {
                journal: Journal {
                    id: FLOATING_BEAR,
                    title: "The Floating Bear".into(),
                    ..Default::default()
                },
                schools: vec![3],
            },
            JournalRecord {
                journal: Journal {
                    id: BLACK_MOUNTAIN_REVIEW,
                    title: "Black Mountain Review".into(),
                    ..Default::default()
                },
                schools: vec![1],
            },
        ],
        issues: vec![yugen_1, yugen_2, bear, bmr],
        genres: vec![
            Genre {
                id: 1,
                name: "Poetry".into(),
            },
            Genre {
                id: 2,
                name: "Prose".into(),
            },
            Genre {
                id: 3,
                name: "Translation".into(),
            },
        ],
        items: vec![
            poem,
            romances,
            item(102, 11, "Notes", &[JONES]),
            item(103, 20, "Letter", &[OHARA]),
            verse,
        ],
        place_names: vec![
            PlaceName {
                id: 1,
                name: "Manhattan".into(),
                item_id: 100,
                location_id: Some(1),
            },
            PlaceName {
                id: 2,
                name: "the Coast".into(),
                item_id: 100,
                location_id: None,
            },
        ],
    }
}

/// The sample catalogue loaded into a [`MemoryStore`].
pub fn sample_store() -> Result<MemoryStore> {
    sample_dataset().into_store()
}
