//! The in-memory family graph store

use crate::error::{Error, Result};
use crate::link::ParentChildLink;
use crate::person::{Person, PersonId};
use crate::union::{UnionId, UnionRecord};
use std::collections::HashMap;

/// The in-memory store of persons, unions, and parent-child links
///
/// One `FamilyTree` owns the whole graph. Presentation and persistence
/// layers receive a reference to it rather than reaching into shared
/// state. All operations are synchronous, and a failed mutation leaves
/// the store unchanged.
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    pub(crate) people: HashMap<PersonId, Person>,
    pub(crate) unions: HashMap<UnionId, UnionRecord>,
    pub(crate) links: Vec<ParentChildLink>,
}

impl FamilyTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a person, replacing any existing record with the same
    /// identifier. Returns the stored entry.
    pub fn add_person(&mut self, person: Person) -> &Person {
        let id = person.id.clone();
        if self.people.insert(id.clone(), person).is_some() {
            tracing::debug!("replaced person {}", id);
        }
        // Safe: inserted under this key just above
        self.people.get(&id).expect("person present after insert")
    }

    /// Look up a person by identifier
    pub fn find_person(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    /// All persons, in arbitrary order
    pub fn list_people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// Insert a union, replacing any existing record with the same
    /// identifier. Partner references are not checked; unions tolerate
    /// absent partners.
    pub fn add_union(&mut self, record: UnionRecord) -> &UnionRecord {
        let id = record.id.clone();
        if self.unions.insert(id.clone(), record).is_some() {
            tracing::debug!("replaced union {}", id);
        }
        // Safe: inserted under this key just above
        self.unions.get(&id).expect("union present after insert")
    }

    /// Look up a union by identifier
    pub fn find_union(&self, id: &UnionId) -> Option<&UnionRecord> {
        self.unions.get(id)
    }

    /// All unions, in arbitrary order
    pub fn list_unions(&self) -> impl Iterator<Item = &UnionRecord> {
        self.unions.values()
    }

    /// Validate and append a parent-child link
    ///
    /// Checks run in a fixed order: the parent must resolve, the child
    /// must resolve, and the endpoints must differ. The first failed
    /// check wins and nothing is recorded.
    pub fn add_link(&mut self, link: ParentChildLink) -> Result<&ParentChildLink> {
        if !self.people.contains_key(&link.parent) {
            return Err(Error::UnknownPerson(link.parent));
        }
        if !self.people.contains_key(&link.child) {
            return Err(Error::UnknownPerson(link.child));
        }
        if link.parent == link.child {
            return Err(Error::SelfParentage(link.parent));
        }

        tracing::debug!("linking parent {} -> child {}", link.parent, link.child);
        self.links.push(link);
        // Safe: pushed just above
        Ok(self.links.last().expect("link present after push"))
    }

    /// Create and append a link between two known persons
    pub fn link_parent_child(
        &mut self,
        parent_id: &PersonId,
        child_id: &PersonId,
        adoptive: bool,
    ) -> Result<&ParentChildLink> {
        self.add_link(ParentChildLink::new(
            parent_id.clone(),
            child_id.clone(),
            adoptive,
        ))
    }

    /// Every recorded link, in insertion order
    pub fn links(&self) -> &[ParentChildLink] {
        &self.links
    }
}
