//! Per-person opinion storage.
//!
//! Each person owns one [`OpinionStore`] holding their view of every other
//! person they know, as an [`OpinionVector`] over three dimensions (trust,
//! care, respect). Stores are deliberately asymmetric: A's opinion of B and
//! B's opinion of A live in different stores and never synchronize — a
//! "relationship exists" only when both stores carry an entry for the other.
//!
//! # Invariants
//!
//! - Every stored component stays within [1.0, 100.0] after every write.
//!   The floor is 1, not 0, so no relationship is ever impossible to
//!   recover.
//! - A store never holds an entry for its own owner.
//! - The lazy default (`50 ± U(-10, 10)` per dimension) is persisted on
//!   first access, so repeated reads are stable until the next write.
//!
//! # Mutating reads
//!
//! The `opinion_of` / `dimension_of` / `vector_of` readers are *mutating*:
//! an unknown subject gets a randomized-neutral entry written before the
//! value is returned, which is why they take `&mut self` and an rng. The
//! `stored_*` readers are pure and return `None` for unknown subjects;
//! aggregation code uses those so display queries never touch the stores.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use outpost_types::{Dimension, PersonId};

use crate::error::SocialError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest representable opinion. Never 0: total write-off states would be
/// impossible to recover from.
pub const MIN_OPINION: f64 = 1.0;

/// Highest representable opinion.
pub const MAX_OPINION: f64 = 100.0;

/// The indifferent midpoint.
pub const NEUTRAL_OPINION: f64 = 50.0;

/// Half-width of the randomized spread around neutral for lazy defaults.
const DEFAULT_SPREAD: f64 = 10.0;

/// Clamp a single opinion component to the representable range.
fn clamp_opinion(value: f64) -> f64 {
    value.clamp(MIN_OPINION, MAX_OPINION)
}

// ---------------------------------------------------------------------------
// OpinionVector
// ---------------------------------------------------------------------------

/// One person's opinion of another, along three dimensions.
///
/// All components are kept within [1.0, 100.0] by every setter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpinionVector {
    /// Confidence that the other person is reliable.
    pub trust: f64,
    /// Emotional warmth toward the other person.
    pub care: f64,
    /// Regard for the other person's competence and conduct.
    pub respect: f64,
}

impl OpinionVector {
    /// Build a vector with each component clamped to the valid range.
    pub fn new(trust: f64, care: f64, respect: f64) -> Self {
        Self {
            trust: clamp_opinion(trust),
            care: clamp_opinion(care),
            respect: clamp_opinion(respect),
        }
    }

    /// A vector with all three dimensions set to the same clamped value.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// The randomized-neutral default: `50 ± U(-10, 10)` drawn
    /// independently per dimension.
    pub fn randomized_default(rng: &mut impl Rng) -> Self {
        Self::new(
            NEUTRAL_OPINION + rng.random_range(-DEFAULT_SPREAD..DEFAULT_SPREAD),
            NEUTRAL_OPINION + rng.random_range(-DEFAULT_SPREAD..DEFAULT_SPREAD),
            NEUTRAL_OPINION + rng.random_range(-DEFAULT_SPREAD..DEFAULT_SPREAD),
        )
    }

    /// Read a single dimension.
    pub const fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Trust => self.trust,
            Dimension::Care => self.care,
            Dimension::Respect => self.respect,
        }
    }

    /// Write a single dimension, clamped.
    pub fn set(&mut self, dimension: Dimension, value: f64) {
        let value = clamp_opinion(value);
        match dimension {
            Dimension::Trust => self.trust = value,
            Dimension::Care => self.care = value,
            Dimension::Respect => self.respect = value,
        }
    }

    /// The scalar opinion: the mean of the three dimensions.
    pub fn average(&self) -> f64 {
        (self.trust + self.care + self.respect) / 3.0
    }
}

// ---------------------------------------------------------------------------
// OpinionStore
// ---------------------------------------------------------------------------

/// All opinions held by one person, keyed by the subject's ID.
///
/// Serializes as the owner plus an `id -> (trust, care, respect)` map, which
/// is the persistence contract for save/load (the on-disk format itself is
/// the caller's concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpinionStore {
    /// The person these opinions belong to.
    owner: PersonId,
    /// Opinion vectors for every known person.
    opinions: BTreeMap<PersonId, OpinionVector>,
}

impl OpinionStore {
    /// Create an empty store owned by `owner`.
    pub const fn new(owner: PersonId) -> Self {
        Self {
            owner,
            opinions: BTreeMap::new(),
        }
    }

    /// Reconstruct a store from persisted entries.
    ///
    /// Any entry keyed by the owner itself is discarded; it can only come
    /// from corrupted data and would violate the no-self-entry invariant.
    pub fn from_entries(owner: PersonId, mut entries: BTreeMap<PersonId, OpinionVector>) -> Self {
        entries.remove(&owner);
        Self {
            owner,
            opinions: entries,
        }
    }

    /// The person who owns this store.
    pub const fn owner(&self) -> PersonId {
        self.owner
    }

    /// The raw entries, for persistence.
    pub const fn entries(&self) -> &BTreeMap<PersonId, OpinionVector> {
        &self.opinions
    }

    /// Whether an entry for `subject` exists.
    pub fn knows(&self, subject: PersonId) -> bool {
        self.opinions.contains_key(&subject)
    }

    /// IDs of everyone this store holds an opinion of.
    pub fn known_person_ids(&self) -> Vec<PersonId> {
        self.opinions.keys().copied().collect()
    }

    /// Scalar opinion of `subject`, lazily initializing an unknown subject
    /// with the randomized-neutral default (a mutating read).
    ///
    /// # Errors
    ///
    /// [`SocialError::SelfRelationship`] if `subject` is the owner.
    pub fn opinion_of(
        &mut self,
        subject: PersonId,
        rng: &mut impl Rng,
    ) -> Result<f64, SocialError> {
        Ok(self.ensure_entry(subject, rng)?.average())
    }

    /// One dimension of the opinion of `subject`, with the same lazy-init
    /// behavior as [`opinion_of`](Self::opinion_of).
    ///
    /// # Errors
    ///
    /// [`SocialError::SelfRelationship`] if `subject` is the owner.
    pub fn dimension_of(
        &mut self,
        subject: PersonId,
        dimension: Dimension,
        rng: &mut impl Rng,
    ) -> Result<f64, SocialError> {
        Ok(self.ensure_entry(subject, rng)?.get(dimension))
    }

    /// The full opinion vector for `subject`, lazily initialized.
    ///
    /// # Errors
    ///
    /// [`SocialError::SelfRelationship`] if `subject` is the owner.
    pub fn vector_of(
        &mut self,
        subject: PersonId,
        rng: &mut impl Rng,
    ) -> Result<OpinionVector, SocialError> {
        Ok(*self.ensure_entry(subject, rng)?)
    }

    /// Scalar opinion of `subject` without touching the store.
    ///
    /// Returns `None` for the owner and for subjects never initialized.
    pub fn stored_opinion_of(&self, subject: PersonId) -> Option<f64> {
        self.opinions.get(&subject).map(OpinionVector::average)
    }

    /// The stored vector for `subject`, if any, without touching the store.
    pub fn stored_vector(&self, subject: PersonId) -> Option<&OpinionVector> {
        self.opinions.get(&subject)
    }

    /// Set the scalar opinion of `subject`: all three dimensions take the
    /// clamped value. An unknown subject is created directly at the value.
    ///
    /// # Errors
    ///
    /// [`SocialError::SelfRelationship`] if `subject` is the owner.
    pub fn set_opinion(&mut self, subject: PersonId, value: f64) -> Result<(), SocialError> {
        self.check_subject(subject)?;
        self.opinions.insert(subject, OpinionVector::uniform(value));
        Ok(())
    }

    /// Set one dimension of the opinion of `subject`, clamped. An unknown
    /// subject is first created with the randomized default.
    ///
    /// # Errors
    ///
    /// [`SocialError::SelfRelationship`] if `subject` is the owner.
    pub fn set_dimension(
        &mut self,
        subject: PersonId,
        dimension: Dimension,
        value: f64,
        rng: &mut impl Rng,
    ) -> Result<(), SocialError> {
        self.ensure_entry(subject, rng)?.set(dimension, value);
        Ok(())
    }

    /// Shift the scalar opinion of `subject` by `delta` (may be negative):
    /// every dimension moves by `delta`, each clamped independently.
    ///
    /// Returns the new scalar opinion.
    ///
    /// # Errors
    ///
    /// [`SocialError::SelfRelationship`] if `subject` is the owner.
    pub fn change_opinion(
        &mut self,
        subject: PersonId,
        delta: f64,
        rng: &mut impl Rng,
    ) -> Result<f64, SocialError> {
        let entry = self.ensure_entry(subject, rng)?;
        for dimension in Dimension::ALL {
            let current = entry.get(dimension);
            entry.set(dimension, current + delta);
        }
        Ok(entry.average())
    }

    /// Shift one dimension of the opinion of `subject` by `delta`, clamped.
    ///
    /// Returns the new value of that dimension.
    ///
    /// # Errors
    ///
    /// [`SocialError::SelfRelationship`] if `subject` is the owner.
    pub fn change_dimension(
        &mut self,
        subject: PersonId,
        dimension: Dimension,
        delta: f64,
        rng: &mut impl Rng,
    ) -> Result<f64, SocialError> {
        let entry = self.ensure_entry(subject, rng)?;
        let current = entry.get(dimension);
        entry.set(dimension, current + delta);
        Ok(entry.get(dimension))
    }

    /// Reject the owner as a subject.
    fn check_subject(&self, subject: PersonId) -> Result<(), SocialError> {
        if subject == self.owner {
            return Err(SocialError::SelfRelationship(subject));
        }
        Ok(())
    }

    /// Fetch the entry for `subject`, creating the randomized default if it
    /// does not exist yet.
    fn ensure_entry(
        &mut self,
        subject: PersonId,
        rng: &mut impl Rng,
    ) -> Result<&mut OpinionVector, SocialError> {
        self.check_subject(subject)?;
        Ok(self
            .opinions
            .entry(subject)
            .or_insert_with(|| OpinionVector::randomized_default(rng)))
    }
}
