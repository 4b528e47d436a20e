//! Parent-child link edges

use crate::error::Error;
use crate::person::PersonId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for a parent-child link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub Ulid);

impl LinkId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LinkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("link id '{}': {}", s, e)))
    }
}

/// A directed parent-to-child edge in the family graph
///
/// Endpoints are references by identifier. The same parent/child pair may
/// be linked more than once; callers that care deduplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentChildLink {
    /// Unique identifier
    pub id: LinkId,

    /// Parent end of the edge
    pub parent: PersonId,

    /// Child end of the edge
    pub child: PersonId,

    /// True when the relationship is adoptive rather than biological
    #[serde(default)]
    pub adoptive: bool,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ParentChildLink {
    /// Create a new link with a fresh identifier
    pub fn new(parent: PersonId, child: PersonId, adoptive: bool) -> Self {
        Self {
            id: LinkId::new(),
            parent,
            child,
            adoptive,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
