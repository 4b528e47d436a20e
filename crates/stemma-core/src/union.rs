//! Union records: partnerships between people

use crate::error::Error;
use crate::person::PersonId;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for a union record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnionId(pub Ulid);

impl UnionId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for UnionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UnionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UnionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("union id '{}': {}", s, e)))
    }
}

/// Kind of recorded partnership
///
/// Closed set. Unrecognized labels read from outside fall back to the
/// default kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnionKind {
    #[default]
    Marriage,
    CivilUnion,
    Partnership,
}

impl UnionKind {
    /// Label used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marriage => "marriage",
            Self::CivilUnion => "civil_union",
            Self::Partnership => "partnership",
        }
    }

    /// Parse a label, mapping anything unrecognized to the default
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "civil_union" => Self::CivilUnion,
            "partnership" => Self::Partnership,
            _ => Self::Marriage,
        }
    }
}

impl std::fmt::Display for UnionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded partnership between up to two people
///
/// Partners are weak references by identifier. Either slot may be empty,
/// and a filled slot is allowed to point at a person the graph no longer
/// holds; resolution happens at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnionRecord {
    /// Unique identifier
    pub id: UnionId,

    /// Kind of partnership
    #[serde(default)]
    pub kind: UnionKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_a: Option<PersonId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_b: Option<PersonId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UnionRecord {
    /// Create a new union with a fresh identifier and no partners
    pub fn new(kind: UnionKind) -> Self {
        Self {
            id: UnionId::new(),
            kind,
            partner_a: None,
            partner_b: None,
            start_date: None,
            end_date: None,
            location: None,
            notes: None,
        }
    }

    pub fn with_partners(mut self, a: PersonId, b: PersonId) -> Self {
        self.partner_a = Some(a);
        self.partner_b = Some(b);
        self
    }

    pub fn with_partner_a(mut self, id: PersonId) -> Self {
        self.partner_a = Some(id);
        self
    }

    pub fn with_partner_b(mut self, id: PersonId) -> Self {
        self.partner_b = Some(id);
        self
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Whether the union is ongoing as of `date`: no end date, or an end
    /// date strictly after it
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        match self.end_date {
            None => true,
            Some(end) => end > date,
        }
    }

    /// Whether the union is ongoing today (UTC)
    pub fn is_active(&self) -> bool {
        self.is_active_on(Utc::now().date_naive())
    }

    /// Whether `person_id` fills either partner slot
    pub fn involves(&self, person_id: &PersonId) -> bool {
        self.partner_a.as_ref() == Some(person_id) || self.partner_b.as_ref() == Some(person_id)
    }
}
