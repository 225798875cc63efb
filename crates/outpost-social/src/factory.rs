//! Initial opinion formation.
//!
//! When two people first interact, each forms an independent opinion of the
//! other. [`initial_opinion`] is a pure function of the two profiles, the
//! [`MeetingContext`], and randomness; it never writes anywhere — the caller
//! stores the result through the observer's opinion store (which applies the
//! [1, 100] clamp). For a symmetric meeting, call once per direction.
//!
//! The context decides which cues participate:
//!
//! - [`FirstImpression`]: a soft bell-shaped base around 50 plus the
//!   target's conversational and (across genders) physical cues.
//! - [`FaceToFace`]: the same base, with both parties' conversation skills
//!   blended, personality similarity rewarded, and the target's scientific
//!   standing credited.
//! - [`Remote`]: a flat neutral base; only scientific standing carries over
//!   a communication link.
//!
//! [`FirstImpression`]: MeetingContext::FirstImpression
//! [`FaceToFace`]: MeetingContext::FaceToFace
//! [`Remote`]: MeetingContext::Remote

use rand::Rng;

use outpost_types::{Attribute, MeetingContext};

use crate::opinion::NEUTRAL_OPINION;
use crate::population::PersonProfile;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Attribute midpoint; deviations from it drive the modifiers.
const ATTRIBUTE_MIDPOINT: f64 = 50.0;

/// Ceiling of the random bonus for sharing a professional science field.
const SAME_FIELD_BONUS: f64 = 10.0;

/// Divisor applied to total scientific achievement credit.
const ACHIEVEMENT_DIVISOR: f64 = 10.0;

/// Scale applied to personality similarity (`2 - distance`).
const PERSONALITY_SIMILARITY_SCALE: f64 = 50.0;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Compute the initial opinion `observer` forms of `target` under the given
/// meeting context.
///
/// The result is intentionally unclamped; storing it through an
/// [`OpinionStore`](crate::opinion::OpinionStore) applies the [1, 100]
/// range.
pub fn initial_opinion(
    observer: &PersonProfile,
    target: &PersonProfile,
    context: MeetingContext,
    rng: &mut impl Rng,
) -> f64 {
    match context {
        MeetingContext::FirstImpression => first_impression(observer, target, rng),
        MeetingContext::FaceToFace => face_to_face(observer, target, rng),
        MeetingContext::Remote => remote(observer, target),
    }
}

/// Two strangers meet physically for the first time.
fn first_impression(observer: &PersonProfile, target: &PersonProfile, rng: &mut impl Rng) -> f64 {
    let mut result = bell_base(rng);

    let conversation = f64::from(target.natural_attribute(Attribute::Conversation));
    result += signed_uniform(rng, conversation - ATTRIBUTE_MIDPOINT);

    result += attraction_bonus(observer, target, rng);

    if shares_science_field(observer, target) {
        result += rng.random_range(0.0..SAME_FIELD_BONUS);
    }

    settler_nudge(result, rng)
}

/// Two people with shared history spend time together in person.
fn face_to_face(observer: &PersonProfile, target: &PersonProfile, rng: &mut impl Rng) -> f64 {
    let mut result = bell_base(rng);

    // Conversation flows both ways once there is history; blend the pair.
    let observer_conversation = f64::from(observer.natural_attribute(Attribute::Conversation));
    let target_conversation = f64::from(target.natural_attribute(Attribute::Conversation));
    let blended = (observer_conversation + target_conversation) / 2.0;
    result += signed_uniform(rng, blended - ATTRIBUTE_MIDPOINT);

    result += attraction_bonus(observer, target, rng);

    // Similar personalities get along; distance 0 earns the full bonus.
    let distance = observer.personality.distance(&target.personality);
    result += signed_uniform(rng, (2.0 - distance) * PERSONALITY_SIMILARITY_SCALE);

    result += achievement_credit(observer, target);

    settler_nudge(result, rng)
}

/// Contact over a communication link: no physical presence cues, no
/// randomness, just a neutral base plus the target's scientific standing.
fn remote(observer: &PersonProfile, target: &PersonProfile) -> f64 {
    NEUTRAL_OPINION + achievement_credit(observer, target)
}

// ---------------------------------------------------------------------------
// Modifier terms
// ---------------------------------------------------------------------------

/// A soft bell-shaped base around 50: the mean of three uniform draws over
/// [0, 100).
fn bell_base(rng: &mut impl Rng) -> f64 {
    (rng.random_range(0.0..100.0) + rng.random_range(0.0..100.0) + rng.random_range(0.0..100.0))
        / 3.0
}

/// Attractiveness matters only across genders and only in person.
fn attraction_bonus(observer: &PersonProfile, target: &PersonProfile, rng: &mut impl Rng) -> f64 {
    if observer.gender == target.gender {
        return 0.0;
    }
    let attractiveness = f64::from(target.natural_attribute(Attribute::Attractiveness));
    signed_uniform(rng, attractiveness - ATTRIBUTE_MIDPOINT)
}

/// The target's scientific standing as seen by the observer: total credit
/// scaled down, plus full credit in the observer's own job field.
fn achievement_credit(observer: &PersonProfile, target: &PersonProfile) -> f64 {
    let mut credit = target.total_scientific_achievement() / ACHIEVEMENT_DIVISOR;
    if let Some(field) = observer.job_science {
        credit += target.scientific_achievement(field);
    }
    credit
}

/// Whether both people work in the same science field.
fn shares_science_field(observer: &PersonProfile, target: &PersonProfile) -> bool {
    match (observer.job_science, target.job_science) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Settlers are trained and selected to get along: a result still below 50
/// gets one extra upward draw toward (but never past) neutral.
fn settler_nudge(result: f64, rng: &mut impl Rng) -> f64 {
    if result < NEUTRAL_OPINION {
        result + rng.random_range(0.0..(NEUTRAL_OPINION - result))
    } else {
        result
    }
}

/// Uniform draw over `[0, magnitude)`, where a negative magnitude means a
/// draw over `[magnitude, 0)`. Zero magnitude draws nothing.
fn signed_uniform(rng: &mut impl Rng, magnitude: f64) -> f64 {
    if magnitude > 0.0 {
        rng.random_range(0.0..magnitude)
    } else if magnitude < 0.0 {
        -rng.random_range(0.0..-magnitude)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use outpost_types::{
        Deciding, Focus, Gender, Perceiving, PersonalityType, ScienceField, SettlementId,
        Structuring,
    };

    use crate::population::AttributeSet;

    use super::*;

    fn base_profile(gender: Gender) -> PersonProfile {
        PersonProfile {
            name: String::from("Settler"),
            gender,
            personality: PersonalityType::new(
                Focus::Introvert,
                Perceiving::Sensing,
                Deciding::Thinking,
                Structuring::Judging,
            ),
            attributes: AttributeSet::new(),
            job_science: None,
            achievements: BTreeMap::new(),
            settlement: SettlementId::new(1),
        }
    }

    #[test]
    fn signed_uniform_respects_sign() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let positive = signed_uniform(&mut rng, 30.0);
            assert!((0.0..30.0).contains(&positive));
            let negative = signed_uniform(&mut rng, -30.0);
            assert!((-30.0..=0.0).contains(&negative));
            assert!(signed_uniform(&mut rng, 0.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn bell_base_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let base = bell_base(&mut rng);
            assert!((0.0..100.0).contains(&base));
        }
    }

    #[test]
    fn remote_meeting_is_deterministic() {
        let observer = base_profile(Gender::Male);
        let mut target = base_profile(Gender::Female);
        target.achievements.insert(ScienceField::Physics, 30.0);

        let mut rng = SmallRng::seed_from_u64(42);
        let first = initial_opinion(&observer, &target, MeetingContext::Remote, &mut rng);
        let second = initial_opinion(&observer, &target, MeetingContext::Remote, &mut rng);
        // No random draws at all over a communication link.
        assert!((first - second).abs() < f64::EPSILON);
        assert!((first - 53.0).abs() < f64::EPSILON); // 50 + 30/10
    }

    #[test]
    fn remote_meeting_credits_job_field_achievement() {
        let mut observer = base_profile(Gender::Male);
        observer.job_science = Some(ScienceField::Botany);
        let mut target = base_profile(Gender::Female);
        target.achievements.insert(ScienceField::Botany, 10.0);

        let mut rng = SmallRng::seed_from_u64(42);
        let opinion = initial_opinion(&observer, &target, MeetingContext::Remote, &mut rng);
        // 50 + 10/10 (total) + 10 (job field).
        assert!((opinion - 61.0).abs() < f64::EPSILON);
    }

    #[test]
    fn settler_nudge_never_crosses_neutral() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let low = rng.random_range(1.0..49.0);
            let nudged = settler_nudge(low, &mut rng);
            assert!(nudged >= low);
            assert!(nudged < NEUTRAL_OPINION);
        }
        // At or above neutral the nudge is a no-op.
        assert!((settler_nudge(75.0, &mut rng) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn first_impressions_favor_good_conversationalists() {
        let observer = base_profile(Gender::Male);
        let mut charming = base_profile(Gender::Male);
        charming
            .attributes
            .set(Attribute::Conversation, 100);
        let mut awkward = base_profile(Gender::Male);
        awkward.attributes.set(Attribute::Conversation, 0);

        let mut rng = SmallRng::seed_from_u64(42);
        let trials = 300;
        let mut charming_total = 0.0;
        let mut awkward_total = 0.0;
        for _ in 0..trials {
            charming_total +=
                initial_opinion(&observer, &charming, MeetingContext::FirstImpression, &mut rng);
            awkward_total +=
                initial_opinion(&observer, &awkward, MeetingContext::FirstImpression, &mut rng);
        }
        assert!(charming_total > awkward_total);
    }

    #[test]
    fn same_gender_pairs_ignore_attractiveness() {
        let observer = base_profile(Gender::Female);
        let mut target = base_profile(Gender::Female);
        target.attributes.set(Attribute::Attractiveness, 100);

        let mut rng = SmallRng::seed_from_u64(42);
        assert!(attraction_bonus(&observer, &target, &mut rng).abs() < f64::EPSILON);
    }

    #[test]
    fn identical_personalities_earn_the_largest_face_to_face_bonus() {
        let observer = base_profile(Gender::Male);
        let twin = base_profile(Gender::Male);
        let mut opposite = base_profile(Gender::Male);
        opposite.personality = PersonalityType::new(
            Focus::Extravert,
            Perceiving::Intuitive,
            Deciding::Feeling,
            Structuring::Perceiving,
        );

        let mut rng = SmallRng::seed_from_u64(42);
        let trials = 300;
        let mut twin_total = 0.0;
        let mut opposite_total = 0.0;
        for _ in 0..trials {
            twin_total +=
                initial_opinion(&observer, &twin, MeetingContext::FaceToFace, &mut rng);
            opposite_total +=
                initial_opinion(&observer, &opposite, MeetingContext::FaceToFace, &mut rng);
        }
        assert!(twin_total > opposite_total);
    }

    #[test]
    fn shared_field_requires_both_jobs() {
        let mut observer = base_profile(Gender::Male);
        let mut target = base_profile(Gender::Male);
        assert!(!shares_science_field(&observer, &target));

        observer.job_science = Some(ScienceField::Chemistry);
        assert!(!shares_science_field(&observer, &target));

        target.job_science = Some(ScienceField::Chemistry);
        assert!(shares_science_field(&observer, &target));

        target.job_science = Some(ScienceField::Physics);
        assert!(!shares_science_field(&observer, &target));
    }
}
