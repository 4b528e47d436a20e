//! Storage backend trait definitions

use crate::error::StorageResult;
use stemma_core::{FamilyTree, ParentChildLink, Person, UnionRecord};

/// Trait for storage backend implementations
///
/// The graph core never touches storage. Callers mutate the in-memory
/// tree first and persist the accepted record afterwards through these
/// methods. Persons and unions are create-or-replace by identifier;
/// links are append-only.
pub trait TreeStore {
    // ─────────────────────────────────────────────────────────────────────────
    // Person Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Save a person, replacing any stored record with the same id
    fn save_person(&self, person: &Person) -> StorageResult<()>;

    /// Get all stored persons, in arbitrary order
    fn load_people(&self) -> StorageResult<Vec<Person>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Link Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a parent-child link
    fn append_link(&self, link: &ParentChildLink) -> StorageResult<()>;

    /// Get all stored links
    fn load_links(&self) -> StorageResult<Vec<ParentChildLink>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Union Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Save a union, replacing any stored record with the same id
    fn save_union(&self, record: &UnionRecord) -> StorageResult<()>;

    /// Get all stored unions, in arbitrary order
    fn load_unions(&self) -> StorageResult<Vec<UnionRecord>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Bulk Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rebuild the in-memory tree from storage
    ///
    /// Loads persons first, then replays links through the graph's own
    /// validation, then unions. A stored link whose endpoint no longer
    /// resolves aborts the load; a union partner that does not resolve
    /// is kept as-is, since unions tolerate absent partners.
    fn load_tree(&self) -> StorageResult<FamilyTree> {
        let mut tree = FamilyTree::new();

        for person in self.load_people()? {
            tree.add_person(person);
        }
        for link in self.load_links()? {
            tree.add_link(link)?;
        }
        for record in self.load_unions()? {
            tree.add_union(record);
        }

        tracing::debug!(
            "loaded {} persons, {} links, {} unions",
            tree.list_people().count(),
            tree.links().len(),
            tree.list_unions().count()
        );
        Ok(tree)
    }
}
