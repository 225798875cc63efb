//! The per-tick relationship update.
//!
//! [`RelationshipEngine::process_person`] is driven once per person per
//! simulation tick with the elapsed time in millisols. For the person's
//! local group it:
//!
//! 1. Creates any missing relationship directions through the factory
//!    (people sharing an associated settlement meet [`FaceToFace`];
//!    strangers get a [`FirstImpression`]).
//! 2. Rolls a per-pair change probability — `base_change_probability × dt`,
//!    amplified by the pair's combined stress. Most pairs do nothing most
//!    ticks; this is what bounds the update cost and keeps drift gradual.
//! 3. On a successful roll, accumulates a signed change amount from random
//!    drift, reciprocity pull, conversation skill, attraction or
//!    same-gender bonding, personality similarity, and settler training,
//!    then amplifies it by the same stress factor and applies it through
//!    the clamped opinion store.
//! 4. Feeds the local group's regard back into the person's own stress.
//!
//! This is a stochastic relaxation process, not a closed-form solution: it
//! has to be re-run every tick, and there is no cached "final" relationship
//! state. With `dt <= 0` the whole step is a no-op.
//!
//! [`FaceToFace`]: MeetingContext::FaceToFace
//! [`FirstImpression`]: MeetingContext::FirstImpression

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use outpost_types::{Attribute, MeetingContext, PersonId};

use crate::config::RelationshipConfig;
use crate::error::SocialError;
use crate::factory;
use crate::opinion::NEUTRAL_OPINION;
use crate::population::Population;

/// Attribute midpoint; deviations from it drive the drift terms.
const ATTRIBUTE_MIDPOINT: f64 = 50.0;

// ---------------------------------------------------------------------------
// TickOutcome
// ---------------------------------------------------------------------------

/// Summary of one person's relationship update for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// Pairs for which at least one missing direction was created.
    pub relationships_formed: u32,
    /// Pairs whose opinion actually moved this tick.
    pub opinions_changed: u32,
    /// The stress change applied from the group's regard (0 when the
    /// person was alone).
    pub stress_delta: f64,
}

// ---------------------------------------------------------------------------
// RelationshipEngine
// ---------------------------------------------------------------------------

/// Drives the stochastic opinion drift across the population.
///
/// The engine owns its random generator, seeded from the config, so a run
/// over the same population with the same seed and tick sizes reproduces
/// exactly.
#[derive(Debug)]
pub struct RelationshipEngine {
    /// Tunable rates.
    config: RelationshipConfig,
    /// Engine-internal generator for all stochastic terms.
    rng: SmallRng,
}

/// Everything the drift formula needs to know about one (person, other)
/// pair, captured before any mutation.
struct PairView {
    /// The person's stored opinion of the other.
    my_opinion: f64,
    /// The other's stored opinion of the person.
    their_opinion: f64,
    /// The other's conversation attribute.
    conversation: f64,
    /// The other's attractiveness attribute.
    attractiveness: f64,
    /// Whether the two share a gender.
    same_gender: bool,
    /// Normalized personality distance in [0, 2].
    personality_distance: f64,
    /// `1 + (stress_p + stress_other) / 100`; amplifies both the change
    /// probability and the change magnitude.
    stress_factor: f64,
}

impl RelationshipEngine {
    /// Create an engine seeded from `config.seed`.
    pub fn new(config: RelationshipConfig) -> Self {
        let rng = SmallRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// The active configuration.
    pub const fn config(&self) -> &RelationshipConfig {
        &self.config
    }

    /// Run one tick of `dt` millisols for every registered person, in ID
    /// order, and return the summed outcome.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SocialError`] from any person's update.
    pub fn process_tick(
        &mut self,
        population: &mut Population,
        dt: f64,
    ) -> Result<TickOutcome, SocialError> {
        let mut total = TickOutcome::default();
        for person in population.ids() {
            let outcome = self.process_person(population, person, dt)?;
            total.relationships_formed += outcome.relationships_formed;
            total.opinions_changed += outcome.opinions_changed;
            total.stress_delta += outcome.stress_delta;
        }
        debug!(
            relationships_formed = total.relationships_formed,
            opinions_changed = total.opinions_changed,
            "relationship tick complete"
        );
        Ok(total)
    }

    /// Run one tick of `dt` millisols for a single person.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if `person` (or a member of their
    /// local group) is not registered.
    pub fn process_person(
        &mut self,
        population: &mut Population,
        person: PersonId,
        dt: f64,
    ) -> Result<TickOutcome, SocialError> {
        let mut outcome = TickOutcome::default();

        // No elapsed time: nothing is created, nothing moves.
        if dt <= 0.0 {
            return Ok(outcome);
        }

        let local_group = population.local_group_of(person)?;
        if local_group.is_empty() {
            return Ok(outcome);
        }

        for other in &local_group {
            outcome.relationships_formed +=
                self.ensure_relationship(population, person, *other)?;
            if self.perturb_pair(population, person, *other, dt)? {
                outcome.opinions_changed += 1;
            }
        }

        outcome.stress_delta = self.apply_regard_stress(population, person, &local_group, dt)?;
        Ok(outcome)
    }

    /// Create any missing direction of the relationship between `person`
    /// and `other`. Returns 1 if anything was created, 0 otherwise.
    fn ensure_relationship(
        &mut self,
        population: &mut Population,
        person: PersonId,
        other: PersonId,
    ) -> Result<u32, SocialError> {
        let person_knows = population.person(person)?.opinions.knows(other);
        let other_knows = population.person(other)?.opinions.knows(person);
        if person_knows && other_knows {
            return Ok(0);
        }

        let (context, forward, backward) = {
            let person_state = population.person(person)?;
            let other_state = population.person(other)?;
            // Shared settlement means shared history: they have met before.
            let context = if person_state.profile.settlement == other_state.profile.settlement {
                MeetingContext::FaceToFace
            } else {
                MeetingContext::FirstImpression
            };
            let forward = if person_knows {
                None
            } else {
                Some(factory::initial_opinion(
                    &person_state.profile,
                    &other_state.profile,
                    context,
                    &mut self.rng,
                ))
            };
            let backward = if other_knows {
                None
            } else {
                Some(factory::initial_opinion(
                    &other_state.profile,
                    &person_state.profile,
                    context,
                    &mut self.rng,
                ))
            };
            (context, forward, backward)
        };

        if let Some(value) = forward {
            population.person_mut(person)?.opinions.set_opinion(other, value)?;
        }
        if let Some(value) = backward {
            population.person_mut(other)?.opinions.set_opinion(person, value)?;
        }
        trace!(person = %person, other = %other, ?context, "relationship formed");
        Ok(1)
    }

    /// Roll the change probability for one pair and, on success, apply the
    /// accumulated drift to `person`'s opinion of `other`. Returns whether
    /// the opinion moved.
    fn perturb_pair(
        &mut self,
        population: &mut Population,
        person: PersonId,
        other: PersonId,
        dt: f64,
    ) -> Result<bool, SocialError> {
        let view = {
            let person_state = population.person(person)?;
            let other_state = population.person(other)?;
            let profile = &other_state.profile;
            PairView {
                my_opinion: person_state
                    .opinions
                    .stored_opinion_of(other)
                    .unwrap_or(NEUTRAL_OPINION),
                their_opinion: other_state
                    .opinions
                    .stored_opinion_of(person)
                    .unwrap_or(NEUTRAL_OPINION),
                conversation: f64::from(profile.natural_attribute(Attribute::Conversation)),
                attractiveness: f64::from(profile.natural_attribute(Attribute::Attractiveness)),
                same_gender: person_state.profile.gender == profile.gender,
                personality_distance: person_state
                    .profile
                    .personality
                    .distance(&profile.personality),
                stress_factor: 1.0 + (person_state.stress() + other_state.stress()) / 100.0,
            }
        };

        // Collective stress makes opinions volatile in both probability
        // and magnitude.
        let probability =
            (self.config.base_change_probability * dt * view.stress_factor).clamp(0.0, 1.0);
        if !self.rng.random_bool(probability) {
            return Ok(false);
        }

        let mut amount = self.random_drift(dt);

        // Reciprocity: opinions pull toward how the other person feels.
        amount += (view.their_opinion - view.my_opinion) * self.config.base_opinion_modifier * dt
            / 100.0;

        // A good conversationalist wins people over; a poor one grates.
        amount += (view.conversation - ATTRIBUTE_MIDPOINT)
            * self.config.base_conversation_modifier
            * dt
            / 50.0;

        if view.same_gender {
            amount += self.config.base_gender_bonding_modifier * dt;
        } else {
            amount += (view.attractiveness - ATTRIBUTE_MIDPOINT)
                * self.config.base_attractiveness_modifier
                * dt
                / 50.0;
        }

        // Similar personalities drift together.
        amount +=
            (2.0 - view.personality_distance) * self.config.personality_diff_modifier * dt / 2.0;

        amount += self.config.base_settler_modifier * dt;

        amount *= view.stress_factor;

        let new_opinion =
            population
                .person_mut(person)?
                .opinions
                .change_opinion(other, amount, &mut self.rng)?;
        trace!(person = %person, other = %other, amount, new_opinion, "opinion drifted");
        Ok(true)
    }

    /// The base random drift: a magnitude drawn from
    /// `U(0, base_change_amount × dt)` with its sign flipped half the time.
    fn random_drift(&mut self, dt: f64) -> f64 {
        let ceiling = self.config.base_change_amount * dt;
        if ceiling <= 0.0 {
            return 0.0;
        }
        let magnitude = self.rng.random_range(0.0..ceiling);
        if self.rng.random_bool(0.5) {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Being surrounded by people who think poorly of you is stressful;
    /// being well regarded is calming. Applies and returns the stress
    /// delta.
    fn apply_regard_stress(
        &mut self,
        population: &mut Population,
        person: PersonId,
        local_group: &[PersonId],
        dt: f64,
    ) -> Result<f64, SocialError> {
        let mut regard = 0.0;
        for other in local_group {
            let their_opinion = population
                .person(*other)?
                .opinions
                .stored_opinion_of(person)
                .unwrap_or(NEUTRAL_OPINION);
            regard += (their_opinion - NEUTRAL_OPINION) / NEUTRAL_OPINION;
        }
        let count = u32::try_from(local_group.len()).unwrap_or(u32::MAX);
        let mean_regard = regard / f64::from(count);

        let stress_delta = -mean_regard * self.config.base_stress_modifier * dt;
        population.person_mut(person)?.add_stress(stress_delta);
        Ok(stress_delta)
    }
}
