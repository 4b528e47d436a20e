//! Stemma Core - In-memory family graph engine
//!
//! This crate provides the core data types, the graph store, and the
//! derived relationship queries for the Stemma genealogy system.

pub mod error;
pub mod link;
pub mod person;
pub mod tree;
pub mod union;

// Inherent query methods on FamilyTree
mod query;

pub use error::{Error, Result};
pub use link::{LinkId, ParentChildLink};
pub use person::{Person, PersonId, Sex};
pub use tree::FamilyTree;
pub use union::{UnionId, UnionKind, UnionRecord};
