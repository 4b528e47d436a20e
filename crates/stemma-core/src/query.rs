//! Derived relationship queries over the family graph
//!
//! Nothing here is stored. Every answer is recomputed from the link list
//! on each call, so results always reflect the current graph. Queries
//! never fail: an unknown identifier yields an empty result, and a link
//! endpoint that no longer resolves to a stored person is skipped.

use crate::person::{Person, PersonId};
use crate::tree::FamilyTree;
use crate::union::{UnionId, UnionRecord};
use std::collections::{HashSet, VecDeque};

/// Walk direction for generation traversals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Generation {
    Up,
    Down,
}

impl FamilyTree {
    /// All persons recorded as a parent of `child_id`
    pub fn parents_of(&self, child_id: &PersonId) -> Vec<&Person> {
        self.links
            .iter()
            .filter(|link| link.child == *child_id)
            .filter_map(|link| self.people.get(&link.parent))
            .collect()
    }

    /// All persons recorded as a child of `parent_id`
    pub fn children_of(&self, parent_id: &PersonId) -> Vec<&Person> {
        self.links
            .iter()
            .filter(|link| link.parent == *parent_id)
            .filter_map(|link| self.people.get(&link.child))
            .collect()
    }

    /// Everyone sharing at least one recorded parent with `person_id`,
    /// excluding the person themselves
    ///
    /// Half-siblings count. Each sibling appears once even when both
    /// parents are shared, and two people with no recorded parents are
    /// never siblings.
    pub fn siblings_of(&self, person_id: &PersonId) -> Vec<&Person> {
        let parent_ids: HashSet<&PersonId> = self
            .links
            .iter()
            .filter(|link| link.child == *person_id)
            .map(|link| &link.parent)
            .collect();

        let sibling_ids: HashSet<&PersonId> = self
            .links
            .iter()
            .filter(|link| parent_ids.contains(&link.parent))
            .map(|link| &link.child)
            .filter(|id| *id != person_id)
            .collect();

        sibling_ids
            .into_iter()
            .filter_map(|id| self.people.get(id))
            .collect()
    }

    /// Children of this person's children
    ///
    /// One entry per line of descent: a grandchild reachable through two
    /// different children appears once for each.
    pub fn grandchildren_of(&self, grandparent_id: &PersonId) -> Vec<&Person> {
        let mut grandchildren = Vec::new();
        for child in self.children_of(grandparent_id) {
            grandchildren.extend(self.children_of(&child.id));
        }
        grandchildren
    }

    /// Every ancestor reachable through parent links, nearest generation
    /// first, each person once
    pub fn ancestors_of(&self, person_id: &PersonId) -> Vec<&Person> {
        self.walk_generations(person_id, Generation::Up, u32::MAX)
    }

    /// Ancestors at most `generations` levels away (1 = parents only)
    pub fn ancestors_within(&self, person_id: &PersonId, generations: u32) -> Vec<&Person> {
        self.walk_generations(person_id, Generation::Up, generations)
    }

    /// Every descendant reachable through child links, nearest generation
    /// first, each person once
    pub fn descendants_of(&self, person_id: &PersonId) -> Vec<&Person> {
        self.walk_generations(person_id, Generation::Down, u32::MAX)
    }

    /// Descendants at most `generations` levels away (1 = children only)
    pub fn descendants_within(&self, person_id: &PersonId, generations: u32) -> Vec<&Person> {
        self.walk_generations(person_id, Generation::Down, generations)
    }

    /// Whether `ancestor_id` appears among the ancestors of `person_id`
    ///
    /// Nobody is their own ancestor. Callers can probe with this before
    /// linking to keep a tree free of generational cycles.
    pub fn is_ancestor_of(&self, ancestor_id: &PersonId, person_id: &PersonId) -> bool {
        self.ancestors_of(person_id)
            .iter()
            .any(|person| person.id == *ancestor_id)
    }

    /// Unions naming `person_id` in either partner slot
    pub fn unions_of(&self, person_id: &PersonId) -> Vec<&UnionRecord> {
        self.unions
            .values()
            .filter(|record| record.involves(person_id))
            .collect()
    }

    /// Resolved partners of a union, dangling references skipped
    pub fn partners_of(&self, union_id: &UnionId) -> Vec<&Person> {
        let record = match self.unions.get(union_id) {
            Some(record) => record,
            None => return Vec::new(),
        };

        [&record.partner_a, &record.partner_b]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
            .filter_map(|id| self.people.get(id))
            .collect()
    }

    /// Breadth-first generation walk from `start`
    ///
    /// The visited set bounds the walk even when stored links form a
    /// cycle. Endpoints that no longer resolve stop the walk along that
    /// line, matching how single-step queries skip them.
    fn walk_generations(
        &self,
        start: &PersonId,
        direction: Generation,
        max_depth: u32,
    ) -> Vec<&Person> {
        let mut visited: HashSet<PersonId> = HashSet::new();
        let mut queue: VecDeque<(PersonId, u32)> = VecDeque::new();
        let mut found: Vec<&Person> = Vec::new();

        visited.insert(start.clone());
        queue.push_back((start.clone(), 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }

            for next in self.neighbor_ids(&current, direction) {
                if visited.insert(next.clone()) {
                    if let Some(person) = self.people.get(&next) {
                        found.push(person);
                        queue.push_back((next, depth + 1));
                    }
                }
            }
        }

        tracing::debug!(
            "{:?} walk from {} reached {} persons",
            direction,
            start,
            found.len()
        );
        found
    }

    /// Identifiers one generation away from `id` in the given direction
    fn neighbor_ids(&self, id: &PersonId, direction: Generation) -> Vec<PersonId> {
        self.links
            .iter()
            .filter_map(|link| match direction {
                Generation::Up if link.child == *id => Some(link.parent.clone()),
                Generation::Down if link.parent == *id => Some(link.child.clone()),
                _ => None,
            })
            .collect()
    }
}
