//! The population directory: person profiles, mutable state, and lookups.
//!
//! The engine and aggregator never reach for a global registry; they are
//! handed a [`Population`] explicitly. Each [`PersonState`] bundles the
//! read-only [`PersonProfile`] (attributes, personality, gender, science
//! background) with the mutable pieces the engine touches: stress, current
//! location, and the person's [`OpinionStore`].
//!
//! Co-location is modeled by [`LocationId`]: everyone at the same location
//! is in each other's local group for the current tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use outpost_types::{
    Attribute, Gender, LocationId, PersonId, PersonalityType, ScienceField, SettlementId,
};

use crate::error::SocialError;
use crate::opinion::OpinionStore;

/// Stress floor.
const MIN_STRESS: f64 = 0.0;

/// Stress ceiling.
const MAX_STRESS: f64 = 100.0;

/// Attribute value assumed when nothing was ever assigned.
const DEFAULT_ATTRIBUTE: u32 = 50;

// ---------------------------------------------------------------------------
// AttributeSet
// ---------------------------------------------------------------------------

/// A person's natural attributes, scored 0 to 100.
///
/// Unassigned attributes read as the population average of 50.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Assigned attribute values.
    values: BTreeMap<Attribute, u32>,
}

impl AttributeSet {
    /// An empty set; every attribute reads as 50.
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Read an attribute, defaulting to 50.
    pub fn get(&self, attribute: Attribute) -> u32 {
        self.values
            .get(&attribute)
            .copied()
            .unwrap_or(DEFAULT_ATTRIBUTE)
    }

    /// Assign an attribute, capped at 100.
    pub fn set(&mut self, attribute: Attribute, value: u32) {
        self.values.insert(attribute, value.min(100));
    }

    /// Builder-style assignment for test and seed data.
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: u32) -> Self {
        self.set(attribute, value);
        self
    }
}

// ---------------------------------------------------------------------------
// PersonProfile
// ---------------------------------------------------------------------------

/// The read-only identity of a person, as consumed by the relationship
/// formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    /// Display name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Four-axis personality type.
    pub personality: PersonalityType,
    /// Natural attributes (conversation, attractiveness, leadership).
    pub attributes: AttributeSet,
    /// The science field of the person's job, if their job has one.
    pub job_science: Option<ScienceField>,
    /// Scientific achievement credit earned per field.
    pub achievements: BTreeMap<ScienceField, f64>,
    /// The settlement this person is associated with.
    pub settlement: SettlementId,
}

impl PersonProfile {
    /// Read a natural attribute (default 50).
    pub fn natural_attribute(&self, attribute: Attribute) -> u32 {
        self.attributes.get(attribute)
    }

    /// Achievement credit in one field (default 0).
    pub fn scientific_achievement(&self, field: ScienceField) -> f64 {
        self.achievements.get(&field).copied().unwrap_or(0.0)
    }

    /// Total achievement credit across every field.
    pub fn total_scientific_achievement(&self) -> f64 {
        self.achievements.values().sum()
    }
}

// ---------------------------------------------------------------------------
// PersonState
// ---------------------------------------------------------------------------

/// A person's full simulation state: profile plus the mutable pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonState {
    /// Read-only identity and attributes.
    pub profile: PersonProfile,
    /// Current physical location; drives local-group membership.
    pub location: LocationId,
    /// This person's opinions of everyone they know.
    pub opinions: OpinionStore,
    /// Stress level, clamped to [0, 100].
    stress: f64,
}

impl PersonState {
    /// Create a fresh state for `person` at `location` with zero stress.
    pub const fn new(person: PersonId, profile: PersonProfile, location: LocationId) -> Self {
        Self {
            profile,
            location,
            opinions: OpinionStore::new(person),
            stress: 0.0,
        }
    }

    /// Current stress level.
    pub const fn stress(&self) -> f64 {
        self.stress
    }

    /// Overwrite the stress level, clamped to [0, 100].
    pub fn set_stress(&mut self, value: f64) {
        self.stress = value.clamp(MIN_STRESS, MAX_STRESS);
    }

    /// Shift the stress level by `delta` (may be negative), clamped.
    ///
    /// Returns the new stress level.
    pub fn add_stress(&mut self, delta: f64) -> f64 {
        self.set_stress(self.stress + delta);
        self.stress
    }
}

// ---------------------------------------------------------------------------
// Population
// ---------------------------------------------------------------------------

/// The directory of every person in the simulation, keyed by ID.
///
/// This is the injected collaborator the engine and aggregator read through;
/// lookups by ID are the only way state is reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// Person state keyed by ID.
    people: BTreeMap<PersonId, PersonState>,
}

impl Population {
    /// An empty population.
    pub const fn new() -> Self {
        Self {
            people: BTreeMap::new(),
        }
    }

    /// Register a person.
    ///
    /// # Errors
    ///
    /// [`SocialError::DuplicatePerson`] if the ID is already registered.
    pub fn add_person(
        &mut self,
        person: PersonId,
        profile: PersonProfile,
        location: LocationId,
    ) -> Result<(), SocialError> {
        if self.people.contains_key(&person) {
            return Err(SocialError::DuplicatePerson(person));
        }
        self.people
            .insert(person, PersonState::new(person, profile, location));
        Ok(())
    }

    /// Look up a person's state.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if the ID is not registered.
    pub fn person(&self, person: PersonId) -> Result<&PersonState, SocialError> {
        self.people
            .get(&person)
            .ok_or(SocialError::PersonNotFound(person))
    }

    /// Look up a person's state mutably.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if the ID is not registered.
    pub fn person_mut(&mut self, person: PersonId) -> Result<&mut PersonState, SocialError> {
        self.people
            .get_mut(&person)
            .ok_or(SocialError::PersonNotFound(person))
    }

    /// Whether a person is registered.
    pub fn contains(&self, person: PersonId) -> bool {
        self.people.contains_key(&person)
    }

    /// All registered person IDs, in ID order.
    pub fn ids(&self) -> Vec<PersonId> {
        self.people.keys().copied().collect()
    }

    /// Number of registered people.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Everyone co-located with `person` this tick, excluding the person.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if the ID is not registered.
    pub fn local_group_of(&self, person: PersonId) -> Result<Vec<PersonId>, SocialError> {
        let location = self.person(person)?.location;
        Ok(self
            .people
            .iter()
            .filter(|(id, state)| **id != person && state.location == location)
            .map(|(id, _)| *id)
            .collect())
    }

    /// IDs of everyone associated with the given settlement.
    pub fn residents_of(&self, settlement: SettlementId) -> Vec<PersonId> {
        self.people
            .iter()
            .filter(|(_, state)| state.profile.settlement == settlement)
            .map(|(id, _)| *id)
            .collect()
    }
}
