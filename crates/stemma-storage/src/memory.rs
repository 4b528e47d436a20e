//! In-memory storage backend for testing

use crate::error::StorageResult;
use crate::traits::TreeStore;
use std::cell::RefCell;
use std::collections::HashMap;
use stemma_core::{ParentChildLink, Person, PersonId, UnionId, UnionRecord};

/// In-memory storage backend
///
/// Useful for testing and throwaway sessions. Interior mutability is a
/// plain `RefCell`; the whole system runs on one thread.
pub struct MemoryStore {
    people: RefCell<HashMap<PersonId, Person>>,
    unions: RefCell<HashMap<UnionId, UnionRecord>>,
    links: RefCell<Vec<ParentChildLink>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            people: RefCell::new(HashMap::new()),
            unions: RefCell::new(HashMap::new()),
            links: RefCell::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore for MemoryStore {
    fn save_person(&self, person: &Person) -> StorageResult<()> {
        self.people
            .borrow_mut()
            .insert(person.id.clone(), person.clone());
        Ok(())
    }

    fn load_people(&self) -> StorageResult<Vec<Person>> {
        Ok(self.people.borrow().values().cloned().collect())
    }

    fn append_link(&self, link: &ParentChildLink) -> StorageResult<()> {
        self.links.borrow_mut().push(link.clone());
        Ok(())
    }

    fn load_links(&self) -> StorageResult<Vec<ParentChildLink>> {
        Ok(self.links.borrow().clone())
    }

    fn save_union(&self, record: &UnionRecord) -> StorageResult<()> {
        self.unions
            .borrow_mut()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn load_unions(&self) -> StorageResult<Vec<UnionRecord>> {
        Ok(self.unions.borrow().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use stemma_core::{Sex, UnionKind};

    fn sample_person(given: &str) -> Person {
        Person::new(given, "Shelley", Sex::Unknown)
    }

    #[test]
    fn test_save_and_load_person() {
        let store = MemoryStore::new();
        let person = sample_person("Mary");
        store.save_person(&person).unwrap();

        let loaded = store.load_people().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, person.id);
    }

    #[test]
    fn test_save_person_replaces_by_id() {
        let store = MemoryStore::new();
        let mut person = sample_person("Mary");
        store.save_person(&person).unwrap();

        person.given_name = "Marie".to_string();
        store.save_person(&person).unwrap();

        let loaded = store.load_people().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].given_name, "Marie");
    }

    #[test]
    fn test_links_append() {
        let store = MemoryStore::new();
        let a = sample_person("Mary");
        let b = sample_person("Percy");
        let link = ParentChildLink::new(a.id.clone(), b.id.clone(), false);

        store.append_link(&link).unwrap();
        store.append_link(&link).unwrap();

        assert_eq!(store.load_links().unwrap().len(), 2);
    }

    #[test]
    fn test_load_tree_replays_contract_order() {
        let store = MemoryStore::new();
        let parent = sample_person("Mary");
        let child = sample_person("Percy");
        store.save_person(&parent).unwrap();
        store.save_person(&child).unwrap();
        store
            .append_link(&ParentChildLink::new(parent.id.clone(), child.id.clone(), false))
            .unwrap();
        store
            .save_union(&UnionRecord::new(UnionKind::Marriage).with_partner_a(parent.id.clone()))
            .unwrap();

        let tree = store.load_tree().unwrap();
        assert_eq!(tree.children_of(&parent.id).len(), 1);
        assert_eq!(tree.unions_of(&parent.id).len(), 1);
    }

    #[test]
    fn test_load_tree_rejects_stored_dangling_link() {
        let store = MemoryStore::new();
        let parent = sample_person("Mary");
        store.save_person(&parent).unwrap();

        // The other endpoint is never saved
        let orphan = ParentChildLink::new(parent.id.clone(), PersonId::new(), false);
        store.append_link(&orphan).unwrap();

        let err = store.load_tree().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Core(stemma_core::Error::UnknownPerson(_))
        ));
    }

    #[test]
    fn test_load_tree_tolerates_dangling_union_partner() {
        let store = MemoryStore::new();
        let a = sample_person("Mary");
        store.save_person(&a).unwrap();

        let record = UnionRecord::new(UnionKind::Partnership)
            .with_partners(a.id.clone(), PersonId::new());
        store.save_union(&record).unwrap();

        let tree = store.load_tree().unwrap();
        let partners = tree.partners_of(&record.id);
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].id, a.id);
    }
}
