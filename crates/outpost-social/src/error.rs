//! Error types for the outpost-social crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! Unknown opinion subjects are deliberately *not* errors (reads synthesize
//! a neutral default); the failures below are directory misses and
//! precondition violations.

use outpost_types::PersonId;

/// Errors that can occur during social state operations.
#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    /// Person with the given ID was not found in the population directory.
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    /// A person was asked for an opinion of themselves.
    ///
    /// Self-relationships are a precondition violation on every entry
    /// point; there is no code path that tolerates them.
    #[error("self-relationship rejected for person {0}")]
    SelfRelationship(PersonId),

    /// A person with this ID is already registered in the directory.
    #[error("duplicate person id: {0}")]
    DuplicatePerson(PersonId),
}
