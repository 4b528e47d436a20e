//! Error types for Stemma Core

use crate::person::PersonId;
use thiserror::Error;

/// Result type alias using Stemma's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Stemma error types
///
/// Only mutations fail. Relationship queries degrade to empty results
/// instead of raising `UnknownPerson`.
#[derive(Error, Debug)]
pub enum Error {
    /// A link endpoint does not resolve to a stored person
    #[error("Unknown person: {0}")]
    UnknownPerson(PersonId),

    /// A link names the same person as both parent and child
    #[error("Person cannot be their own parent: {0}")]
    SelfParentage(PersonId),

    /// Malformed caller input, such as unparseable identifier text
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
