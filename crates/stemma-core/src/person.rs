//! Person records and identity

use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for a person
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub Ulid);

impl PersonId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("person id '{}': {}", s, e)))
    }
}

/// Recorded sex of a person
///
/// The set is closed. Values read from outside the enum fall back to
/// `Unknown` rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
    Other,
}

impl Sex {
    /// Label used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
            Self::Other => "other",
        }
    }

    /// Parse a label, mapping anything unrecognized to `Unknown`
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            "other" => Self::Other,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An individual in the family graph (a node)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier, stable for the lifetime of the record
    pub id: PersonId,

    /// Given (first) name
    pub given_name: String,

    /// Family (last) name
    pub family_name: String,

    /// Middle names, space separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_names: Option<String>,

    /// Recorded sex
    #[serde(default)]
    pub sex: Sex,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Person {
    /// Create a new person with a fresh identifier
    pub fn new(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        sex: Sex,
    ) -> Self {
        Self {
            id: PersonId::new(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            middle_names: None,
            sex,
            birth_date: None,
            death_date: None,
            birth_place: None,
            notes: None,
        }
    }

    pub fn with_middle_names(mut self, middle_names: impl Into<String>) -> Self {
        self.middle_names = Some(middle_names.into());
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn with_death_date(mut self, date: NaiveDate) -> Self {
        self.death_date = Some(date);
        self
    }

    pub fn with_birth_place(mut self, place: impl Into<String>) -> Self {
        self.birth_place = Some(place.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Full display name: given, middle, and family names joined by single
    /// spaces, with absent or blank parts skipped
    pub fn display_name(&self) -> String {
        [
            self.given_name.as_str(),
            self.middle_names.as_deref().unwrap_or(""),
            self.family_name.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Whether a death date has been recorded
    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some()
    }
}
