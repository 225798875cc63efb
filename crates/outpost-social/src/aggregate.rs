//! Derived social views over the population.
//!
//! Everything here is pull-based and read-only: presentation layers call in
//! whenever they need a snapshot, and nothing is cached or stored. The
//! aggregator borrows the [`Population`] it was handed — there is no global
//! registry — and reads opinions through the pure `stored_*` accessors, so
//! a display query between ticks never mutates a store. A person the
//! subject has never initialized reads as the neutral 50.

use outpost_types::{PersonId, SettlementId};

use crate::error::SocialError;
use crate::opinion::NEUTRAL_OPINION;
use crate::population::Population;

/// Read-only social metrics derived from the per-person opinion stores.
#[derive(Debug, Clone, Copy)]
pub struct SocialAggregator<'a> {
    /// The population directory queries resolve against.
    population: &'a Population,
}

impl<'a> SocialAggregator<'a> {
    /// Build an aggregator over the given population.
    pub const fn new(population: &'a Population) -> Self {
        Self { population }
    }

    /// Everyone `person` knows, restricted to people still present in the
    /// directory, in ID order.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if `person` is not registered.
    pub fn known_people(&self, person: PersonId) -> Result<Vec<PersonId>, SocialError> {
        let state = self.population.person(person)?;
        Ok(state
            .opinions
            .known_person_ids()
            .into_iter()
            .filter(|id| *id != person && self.population.contains(*id))
            .collect())
    }

    /// `person`'s opinion of everyone they know, sorted ascending by score.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if `person` is not registered.
    pub fn my_opinions_of_them(
        &self,
        person: PersonId,
    ) -> Result<Vec<(PersonId, f64)>, SocialError> {
        let state = self.population.person(person)?;
        let mut scores: Vec<(PersonId, f64)> = self
            .known_people(person)?
            .into_iter()
            .map(|id| {
                (
                    id,
                    state.opinions.stored_opinion_of(id).unwrap_or(NEUTRAL_OPINION),
                )
            })
            .collect();
        scores.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(scores)
    }

    /// What everyone `person` knows thinks of them, sorted ascending by
    /// score. Someone who has never formed an opinion back reads as
    /// neutral.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if `person` is not registered.
    pub fn their_opinions_of_me(
        &self,
        person: PersonId,
    ) -> Result<Vec<(PersonId, f64)>, SocialError> {
        let mut scores = Vec::new();
        for id in self.known_people(person)? {
            let opinion = self
                .population
                .person(id)?
                .opinions
                .stored_opinion_of(person)
                .unwrap_or(NEUTRAL_OPINION);
            scores.push((id, opinion));
        }
        scores.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(scores)
    }

    /// Everyone tied for `person`'s highest opinion — all of them, not just
    /// one arbitrary maximum. Empty when `person` knows nobody.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if `person` is not registered.
    pub fn best_friends(&self, person: PersonId) -> Result<Vec<PersonId>, SocialError> {
        let scores = self.my_opinions_of_them(person)?;
        let Some((_, best)) = scores.last().copied() else {
            return Ok(Vec::new());
        };
        Ok(scores
            .into_iter()
            .filter(|(_, score)| score.total_cmp(&best).is_eq())
            .map(|(id, _)| id)
            .collect())
    }

    /// `person`'s mean opinion over a given group. An empty group reads as
    /// exactly 50: no information means indifference, and nothing divides
    /// by zero. The person themselves is skipped if present in `group`.
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if `person` is not registered.
    pub fn average_opinion_of_group(
        &self,
        person: PersonId,
        group: &[PersonId],
    ) -> Result<f64, SocialError> {
        let state = self.population.person(person)?;
        let opinions: Vec<f64> = group
            .iter()
            .filter(|id| **id != person)
            .map(|id| {
                state
                    .opinions
                    .stored_opinion_of(*id)
                    .unwrap_or(NEUTRAL_OPINION)
            })
            .collect();
        Ok(mean_of(&opinions).unwrap_or(NEUTRAL_OPINION))
    }

    /// Settlement-wide relationship score: the mean over every resident of
    /// the mean "their opinion of me", rounded to 2 decimals. A settlement
    /// with no residents scores 0 (guarded divide, not an error).
    ///
    /// # Errors
    ///
    /// [`SocialError::PersonNotFound`] if a resident's acquaintance has
    /// been removed from the directory mid-query.
    pub fn settlement_relationship_score(
        &self,
        settlement: SettlementId,
    ) -> Result<f64, SocialError> {
        let residents = self.population.residents_of(settlement);
        if residents.is_empty() {
            return Ok(0.0);
        }

        let mut per_resident = Vec::with_capacity(residents.len());
        for resident in residents {
            let inbound: Vec<f64> = self
                .their_opinions_of_me(resident)?
                .into_iter()
                .map(|(_, score)| score)
                .collect();
            per_resident.push(mean_of(&inbound).unwrap_or(NEUTRAL_OPINION));
        }
        let score = mean_of(&per_resident).unwrap_or(0.0);
        Ok(round_two_decimals(score))
    }
}

/// Mean of a slice, or `None` when it is empty.
fn mean_of(values: &[f64]) -> Option<f64> {
    let count = u32::try_from(values.len()).ok()?;
    if count == 0 {
        return None;
    }
    Some(values.iter().sum::<f64>() / f64::from(count))
}

/// Round to two decimal places for presentation-stable scores.
fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use outpost_types::{
        Deciding, Focus, Gender, LocationId, Perceiving, PersonalityType, Structuring,
    };

    use crate::population::{AttributeSet, PersonProfile};

    use super::*;

    const ALICE: PersonId = PersonId::new(1);
    const BORIS: PersonId = PersonId::new(2);
    const CHEN: PersonId = PersonId::new(3);
    const DARIA: PersonId = PersonId::new(4);

    fn profile(settlement: u64) -> PersonProfile {
        PersonProfile {
            name: String::from("Settler"),
            gender: Gender::Female,
            personality: PersonalityType::new(
                Focus::Introvert,
                Perceiving::Sensing,
                Deciding::Thinking,
                Structuring::Judging,
            ),
            attributes: AttributeSet::new(),
            job_science: None,
            achievements: BTreeMap::new(),
            settlement: SettlementId::new(settlement),
        }
    }

    fn population_of(count: u64, settlement: u64) -> Population {
        let mut population = Population::new();
        for id in 1..=count {
            let _ = population.add_person(
                PersonId::new(id),
                profile(settlement),
                LocationId::new(1),
            );
        }
        population
    }

    fn set_opinion(population: &mut Population, from: PersonId, of: PersonId, value: f64) {
        let _ = population
            .person_mut(from)
            .ok()
            .map(|state| state.opinions.set_opinion(of, value));
    }

    #[test]
    fn known_people_excludes_the_departed() {
        let mut population = population_of(2, 1);
        set_opinion(&mut population, ALICE, BORIS, 60.0);
        // A stale entry for someone no longer in the directory.
        set_opinion(&mut population, ALICE, PersonId::new(99), 70.0);

        let aggregator = SocialAggregator::new(&population);
        let known = aggregator.known_people(ALICE).unwrap_or_default();
        assert_eq!(known, vec![BORIS]);
    }

    #[test]
    fn my_opinions_sort_ascending() {
        let mut population = population_of(4, 1);
        set_opinion(&mut population, ALICE, BORIS, 80.0);
        set_opinion(&mut population, ALICE, CHEN, 20.0);
        set_opinion(&mut population, ALICE, DARIA, 55.0);

        let aggregator = SocialAggregator::new(&population);
        let scores = aggregator.my_opinions_of_them(ALICE).unwrap_or_default();
        assert_eq!(
            scores,
            vec![(CHEN, 20.0), (DARIA, 55.0), (BORIS, 80.0)]
        );
    }

    #[test]
    fn their_opinions_use_the_other_stores() {
        let mut population = population_of(3, 1);
        set_opinion(&mut population, ALICE, BORIS, 90.0);
        set_opinion(&mut population, ALICE, CHEN, 90.0);
        set_opinion(&mut population, BORIS, ALICE, 10.0);
        // Chen never formed an opinion back: neutral.

        let aggregator = SocialAggregator::new(&population);
        let scores = aggregator.their_opinions_of_me(ALICE).unwrap_or_default();
        assert_eq!(scores, vec![(BORIS, 10.0), (CHEN, 50.0)]);
    }

    #[test]
    fn best_friends_includes_every_tie() {
        let mut population = population_of(4, 1);
        set_opinion(&mut population, ALICE, BORIS, 80.0);
        set_opinion(&mut population, ALICE, CHEN, 80.0);
        set_opinion(&mut population, ALICE, DARIA, 60.0);

        let aggregator = SocialAggregator::new(&population);
        let friends = aggregator.best_friends(ALICE).unwrap_or_default();
        assert_eq!(friends.len(), 2);
        assert!(friends.contains(&BORIS));
        assert!(friends.contains(&CHEN));
        assert!(!friends.contains(&DARIA));
    }

    #[test]
    fn best_friends_of_a_loner_is_empty() {
        let population = population_of(1, 1);
        let aggregator = SocialAggregator::new(&population);
        let friends = aggregator.best_friends(ALICE).unwrap_or_default();
        assert!(friends.is_empty());
    }

    #[test]
    fn empty_group_average_is_exactly_neutral() {
        let population = population_of(1, 1);
        let aggregator = SocialAggregator::new(&population);
        let average = aggregator.average_opinion_of_group(ALICE, &[]).ok();
        assert_eq!(average, Some(50.0));
    }

    #[test]
    fn group_average_skips_the_person_themselves() {
        let mut population = population_of(2, 1);
        set_opinion(&mut population, ALICE, BORIS, 80.0);

        let aggregator = SocialAggregator::new(&population);
        let average = aggregator
            .average_opinion_of_group(ALICE, &[ALICE, BORIS])
            .ok();
        assert_eq!(average, Some(80.0));
    }

    #[test]
    fn settlement_score_matches_the_two_resident_scenario() {
        // Two residents; A thinks 70 of B, B thinks 30 of A. The inbound
        // means are 30 (for A) and 70 (for B): settlement score 50.00.
        let mut population = population_of(2, 1);
        set_opinion(&mut population, ALICE, BORIS, 70.0);
        set_opinion(&mut population, BORIS, ALICE, 30.0);

        let aggregator = SocialAggregator::new(&population);
        let score = aggregator
            .settlement_relationship_score(SettlementId::new(1))
            .ok();
        assert_eq!(score, Some(50.0));
    }

    #[test]
    fn empty_settlement_scores_zero() {
        let population = population_of(2, 1);
        let aggregator = SocialAggregator::new(&population);
        let score = aggregator
            .settlement_relationship_score(SettlementId::new(9))
            .ok();
        assert_eq!(score, Some(0.0));
    }

    #[test]
    fn settlement_score_rounds_to_two_decimals() {
        let mut population = population_of(3, 1);
        set_opinion(&mut population, BORIS, ALICE, 20.0);
        set_opinion(&mut population, CHEN, ALICE, 25.0);
        set_opinion(&mut population, ALICE, BORIS, 20.0);
        set_opinion(&mut population, ALICE, CHEN, 25.0);

        let aggregator = SocialAggregator::new(&population);
        let score = aggregator
            .settlement_relationship_score(SettlementId::new(1))
            .ok();
        // Alice hears (20 + 25)/2 = 22.5; Boris hears 20; Chen hears 25.
        // Mean = 67.5 / 3 = 22.5.
        assert_eq!(score, Some(22.5));
    }

    #[test]
    fn unknown_person_queries_error() {
        let population = population_of(1, 1);
        let aggregator = SocialAggregator::new(&population);
        assert!(matches!(
            aggregator.known_people(PersonId::new(42)),
            Err(SocialError::PersonNotFound(_))
        ));
        assert!(matches!(
            aggregator.my_opinions_of_them(PersonId::new(42)),
            Err(SocialError::PersonNotFound(_))
        ));
    }
}
