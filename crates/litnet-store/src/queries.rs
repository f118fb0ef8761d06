//! Relational queries used by the network builders.
//!
//! These are expressed once, over any [`EntityStore`], as explicit
//! traversals of the join tables. Unless a method says otherwise, results
//! are distinct and ordered by id.

use crate::models::{EntityId, Journal, Person};
use crate::store::{EntityStore, Relation};
use std::collections::BTreeSet;

/// Which kinds of credit a person holds anywhere in the catalogue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersonRoles {
    /// Edited or contributing-edited at least one issue.
    pub editor: bool,
    pub creator: bool,
    pub translator: bool,
    pub mentioned: bool,
}

/// A journal contributor with per-role totals.
#[derive(Clone, Debug, PartialEq)]
pub struct ContributorCounts<'a> {
    pub person: &'a Person,
    pub num_created: usize,
    pub num_translated: usize,
    pub num_edited: usize,
}

/// Derived relational queries, available on every [`EntityStore`].
pub trait RelationQueries: EntityStore {
    /// Resolve a set of person ids, dropping unknown ids.
    fn people_by_ids(&self, ids: impl IntoIterator<Item = EntityId>) -> Vec<&Person> {
        ids.into_iter().filter_map(|id| self.person(id)).collect()
    }

    /// Role flags for a person, using existence checks only.
    fn person_roles(&self, person: EntityId) -> PersonRoles {
        PersonRoles {
            editor: self.has_related(Relation::IssuesEdited, person)
                || self.has_related(Relation::IssuesContribEdited, person),
            creator: self.has_related(Relation::ItemsCreated, person),
            translator: self.has_related(Relation::ItemsTranslated, person),
            mentioned: self.has_related(Relation::ItemsMentionedIn, person),
        }
    }

    // ------------------------------------------------------------------------
    // Journal-scoped people
    // ------------------------------------------------------------------------

    /// People who edited any issue of the journal (editors only, not
    /// contributing editors).
    fn editors_of_journal(&self, journal: EntityId) -> Vec<&Person> {
        let ids: BTreeSet<EntityId> = self
            .related_ids(Relation::JournalIssues, journal)
            .into_iter()
            .flat_map(|issue| self.related_ids(Relation::IssueEditors, issue))
            .collect();
        self.people_by_ids(ids)
    }

    /// People who created an item in any issue of the journal.
    fn authors_of_journal(&self, journal: EntityId) -> Vec<&Person> {
        self.people_by_ids(journal_item_people(self, journal, Relation::ItemCreators))
    }

    /// People who translated an item in any issue of the journal.
    fn translators_of_journal(&self, journal: EntityId) -> Vec<&Person> {
        self.people_by_ids(journal_item_people(self, journal, Relation::ItemTranslators))
    }

    // ------------------------------------------------------------------------
    // Role holders
    // ------------------------------------------------------------------------

    /// People who edited at least one issue.
    fn editors(&self) -> Vec<&Person> {
        self.people()
            .into_iter()
            .filter(|p| self.has_related(Relation::IssuesEdited, p.id))
            .collect()
    }

    /// People who translated at least one item.
    fn translators(&self) -> Vec<&Person> {
        self.people()
            .into_iter()
            .filter(|p| self.has_related(Relation::ItemsTranslated, p.id))
            .collect()
    }

    /// Editors whose summed editor count over the issues they edited
    /// exceeds one. Only these can have co-editors.
    fn co_editor_candidates(&self) -> Vec<&Person> {
        self.people()
            .into_iter()
            .filter(|p| {
                shared_credit_count(self, p.id, Relation::IssuesEdited, Relation::IssueEditors) > 1
            })
            .collect()
    }

    /// Creators whose summed creator count over the items they created
    /// exceeds one. Only these can have co-authors.
    fn co_author_candidates(&self) -> Vec<&Person> {
        self.people()
            .into_iter()
            .filter(|p| {
                shared_credit_count(self, p.id, Relation::ItemsCreated, Relation::ItemCreators) > 1
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Person-to-person
    // ------------------------------------------------------------------------

    /// Other editors of the issues this person edited.
    fn co_editors(&self, person: EntityId) -> Vec<&Person> {
        self.people_by_ids(co_credited(
            self,
            person,
            Relation::IssuesEdited,
            Relation::IssueEditors,
        ))
    }

    /// Other creators of the items this person created.
    fn co_authors(&self, person: EntityId) -> Vec<&Person> {
        self.people_by_ids(co_credited(
            self,
            person,
            Relation::ItemsCreated,
            Relation::ItemCreators,
        ))
    }

    /// Authors who contributed to an issue this person edited.
    fn edited_by(&self, person: EntityId) -> Vec<&Person> {
        let ids: BTreeSet<EntityId> = edited_item_credits(self, person, Relation::ItemCreators)
            .into_iter()
            .filter(|&id| id != person)
            .collect();
        self.people_by_ids(ids)
    }

    /// People who edited issues containing work created by this person.
    fn editors_of(&self, person: EntityId) -> Vec<&Person> {
        let ids: BTreeSet<EntityId> = self
            .related_ids(Relation::ItemsCreated, person)
            .into_iter()
            .filter_map(|item| self.item(item))
            .flat_map(|item| self.related_ids(Relation::IssueEditors, item.issue_id))
            .filter(|&id| id != person)
            .collect();
        self.people_by_ids(ids)
    }

    /// One entry per (issue edited by `editor`, item in that issue, creator
    /// of that item). Not deduplicated and the editor is not excluded, so
    /// the length reflects how much of a person's work the editor handled.
    fn edited_creators(&self, editor: EntityId) -> Vec<&Person> {
        self.people_by_ids(edited_item_credits(self, editor, Relation::ItemCreators))
    }

    /// Translator counterpart of [`edited_creators`](Self::edited_creators).
    fn edited_translators(&self, editor: EntityId) -> Vec<&Person> {
        self.people_by_ids(edited_item_credits(self, editor, Relation::ItemTranslators))
    }

    /// Creators of the items this person translated, excluding the
    /// translator.
    fn translated_authors(&self, translator: EntityId) -> Vec<&Person> {
        let ids: BTreeSet<EntityId> = self
            .related_ids(Relation::ItemsTranslated, translator)
            .into_iter()
            .flat_map(|item| self.related_ids(Relation::ItemCreators, item))
            .filter(|&id| id != translator)
            .collect();
        self.people_by_ids(ids)
    }

    // ------------------------------------------------------------------------
    // Contributors
    // ------------------------------------------------------------------------

    /// People who edited an issue, created an item, or translated an item.
    fn journal_contributors(&self) -> Vec<&Person> {
        self.people()
            .into_iter()
            .filter(|p| {
                self.has_related(Relation::IssuesEdited, p.id)
                    || self.has_related(Relation::ItemsCreated, p.id)
                    || self.has_related(Relation::ItemsTranslated, p.id)
            })
            .collect()
    }

    /// [`journal_contributors`](Self::journal_contributors) with distinct
    /// per-role totals.
    fn journal_contributors_with_counts(&self) -> Vec<ContributorCounts<'_>> {
        self.people()
            .into_iter()
            .map(|person| ContributorCounts {
                person,
                num_created: self.related_ids(Relation::ItemsCreated, person.id).len(),
                num_translated: self.related_ids(Relation::ItemsTranslated, person.id).len(),
                num_edited: self.related_ids(Relation::IssuesEdited, person.id).len(),
            })
            .filter(|c| c.num_created > 0 || c.num_translated > 0 || c.num_edited > 0)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Journals by person
    // ------------------------------------------------------------------------

    /// Journals the person edited issues for.
    fn journals_by_editor(&self, person: EntityId) -> Vec<&Journal> {
        let ids: BTreeSet<EntityId> = self
            .related_issues(Relation::IssuesEdited, person)
            .into_iter()
            .map(|issue| issue.journal_id)
            .collect();
        ids.into_iter().filter_map(|id| self.journal(id)).collect()
    }

    /// Journals the person contributed to as an author.
    fn journals_by_author(&self, person: EntityId) -> Vec<&Journal> {
        let ids: BTreeSet<EntityId> = self
            .related_items(Relation::ItemsCreated, person)
            .into_iter()
            .filter_map(|item| self.issue(item.issue_id))
            .map(|issue| issue.journal_id)
            .collect();
        ids.into_iter().filter_map(|id| self.journal(id)).collect()
    }

    /// Journals the person edited, contributing-edited, or wrote for.
    fn journals_by_editor_or_author(&self, person: EntityId) -> Vec<&Journal> {
        let mut ids: BTreeSet<EntityId> = self
            .journals_by_editor(person)
            .into_iter()
            .chain(self.journals_by_author(person))
            .map(|j| j.id)
            .collect();
        ids.extend(
            self.related_issues(Relation::IssuesContribEdited, person)
                .into_iter()
                .map(|issue| issue.journal_id),
        );
        ids.into_iter().filter_map(|id| self.journal(id)).collect()
    }
}

impl<S: EntityStore + ?Sized> RelationQueries for S {}

// ============================================================================
// Traversal helpers
// ============================================================================

/// Distinct people credited through `credit` on items of the journal.
fn journal_item_people<S: EntityStore + ?Sized>(
    store: &S,
    journal: EntityId,
    credit: Relation,
) -> BTreeSet<EntityId> {
    store
        .related_ids(Relation::JournalIssues, journal)
        .into_iter()
        .flat_map(|issue| store.related_ids(Relation::IssueItems, issue))
        .flat_map(|item| store.related_ids(credit, item))
        .collect()
}

/// Sum, over the works reached by `works`, of the people credited on each.
fn shared_credit_count<S: EntityStore + ?Sized>(
    store: &S,
    person: EntityId,
    works: Relation,
    credited: Relation,
) -> usize {
    store
        .related_ids(works, person)
        .into_iter()
        .map(|work| store.related_ids(credited, work).len())
        .sum()
}

/// Distinct people sharing a work with `person`, excluding `person`.
fn co_credited<S: EntityStore + ?Sized>(
    store: &S,
    person: EntityId,
    works: Relation,
    credited: Relation,
) -> BTreeSet<EntityId> {
    store
        .related_ids(works, person)
        .into_iter()
        .flat_map(|work| store.related_ids(credited, work))
        .filter(|&id| id != person)
        .collect()
}

/// Credits on every item of every issue the editor edited, with repeats.
fn edited_item_credits<S: EntityStore + ?Sized>(
    store: &S,
    editor: EntityId,
    credit: Relation,
) -> Vec<EntityId> {
    store
        .related_ids(Relation::IssuesEdited, editor)
        .into_iter()
        .flat_map(|issue| store.related_ids(Relation::IssueItems, issue))
        .flat_map(|item| store.related_ids(credit, item))
        .collect()
}
