//! Entity store for the litnet catalogue.
//!
//! The network builders treat this crate as a read-only data source. It
//! holds people, schools, journals, issues, items, and locations, plus the
//! join tables that relate them.
//!
//! # Key Abstractions
//!
//! - [`EntityStore`]: per-kind lookups, enumeration, and [`Relation`]
//!   traversal
//! - [`RelationQueries`]: derived person and journal queries over any store
//! - [`MemoryStore`]: the in-memory implementation
//! - [`Dataset`]: JSON dataset format and loader

#![doc = include_str!("../README.md")]

pub mod dataset;
pub mod memory;
pub mod models;
pub mod queries;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use dataset::{Dataset, load_store};
pub use memory::{Link, MemoryStore};
pub use models::{
    CreatorName, EntityId, EntityKind, Gender, Genre, Issue, Item, Journal, Location, Name,
    PenName, Person, PlaceName, School, Season,
};
pub use queries::{ContributorCounts, PersonRoles, RelationQueries};
pub use store::{EntityStore, Relation};
