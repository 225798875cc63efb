//! Enumeration types for the Outpost social simulation.
//!
//! Dimensions, natural attributes, and meeting contexts are fixed enums
//! rather than string keys: an invalid dimension or attribute name is
//! unrepresentable at compile time.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender of a person, as used by the attraction modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

// ---------------------------------------------------------------------------
// Opinion dimensions
// ---------------------------------------------------------------------------

/// One facet of a person's opinion of another person.
///
/// Every opinion is a vector over all three dimensions; a scalar "opinion"
/// is the mean of the three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Confidence that the other person is reliable.
    Trust,
    /// Emotional warmth toward the other person.
    Care,
    /// Regard for the other person's competence and conduct.
    Respect,
}

impl Dimension {
    /// All dimensions, in a stable order.
    pub const ALL: [Self; 3] = [Self::Trust, Self::Care, Self::Respect];
}

// ---------------------------------------------------------------------------
// Natural attributes
// ---------------------------------------------------------------------------

/// An innate characteristic of a person, scored 0 to 100.
///
/// Attributes are read-only inputs to the relationship formulas; 50 is the
/// population average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Ease of talking with others; the main driver of opinion drift.
    Conversation,
    /// Physical attractiveness; only relevant across genders in person.
    Attractiveness,
    /// Capacity to direct and inspire others.
    Leadership,
}

// ---------------------------------------------------------------------------
// Science fields
// ---------------------------------------------------------------------------

/// A field of scientific study a settler can work in or have achievement in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScienceField {
    /// Planetary geology.
    Areology,
    /// Observation of celestial objects.
    Astronomy,
    /// Study of living organisms.
    Biology,
    /// Cultivation of plants for food and oxygen.
    Botany,
    /// Composition and reaction of matter.
    Chemistry,
    /// Computation and information systems.
    Computing,
    /// Design and maintenance of machinery.
    Engineering,
    /// Formal mathematics.
    Mathematics,
    /// Care of settler health.
    Medicine,
    /// Atmospheric science.
    Meteorology,
    /// Physical laws of matter and energy.
    Physics,
    /// Study of mind and behavior.
    Psychology,
}

// ---------------------------------------------------------------------------
// Meeting contexts
// ---------------------------------------------------------------------------

/// The circumstances under which one person forms an initial opinion of
/// another.
///
/// The context decides which cues are available: physical presence exposes
/// personality and attractiveness, a remote contact does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeetingContext {
    /// Two strangers meet physically for the first time.
    FirstImpression,
    /// Two people with shared history meet face to face.
    FaceToFace,
    /// Contact over a communication link, with no physical presence.
    Remote,
}

// ---------------------------------------------------------------------------
// Relationship labels
// ---------------------------------------------------------------------------

/// Qualitative description of a scalar opinion, from worst to best.
///
/// The derive order matters: labels compare the way the underlying opinions
/// do, so `Hostile < Indifferent < CloseFriend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationshipLabel {
    /// Open hostility (opinion below 5).
    Hostile,
    /// Active antagonism (5 to 15).
    Antagonistic,
    /// Cold and unwelcoming (15 to 25).
    Cold,
    /// Deliberately distant (25 to 35).
    Distant,
    /// Wary but civil (35 to 45).
    Guarded,
    /// No particular feeling either way (45 to 55).
    Indifferent,
    /// Polite and pleasant (55 to 65).
    Cordial,
    /// Genuinely friendly (65 to 75).
    Friendly,
    /// Warm and supportive (75 to 85).
    Warm,
    /// Strong fondness (85 to 95).
    Fond,
    /// A close friend (95 and above).
    CloseFriend,
}

impl core::fmt::Display for RelationshipLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::Hostile => "hostile",
            Self::Antagonistic => "antagonistic",
            Self::Cold => "cold",
            Self::Distant => "distant",
            Self::Guarded => "guarded",
            Self::Indifferent => "indifferent",
            Self::Cordial => "cordial",
            Self::Friendly => "friendly",
            Self::Warm => "warm",
            Self::Fond => "fond",
            Self::CloseFriend => "close friend",
        };
        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_all_covers_every_variant() {
        assert_eq!(Dimension::ALL.len(), 3);
        assert!(Dimension::ALL.contains(&Dimension::Trust));
        assert!(Dimension::ALL.contains(&Dimension::Care));
        assert!(Dimension::ALL.contains(&Dimension::Respect));
    }

    #[test]
    fn labels_order_from_worst_to_best() {
        assert!(RelationshipLabel::Hostile < RelationshipLabel::Indifferent);
        assert!(RelationshipLabel::Indifferent < RelationshipLabel::CloseFriend);
        assert!(RelationshipLabel::Cordial < RelationshipLabel::Friendly);
    }

    #[test]
    fn label_display_is_lowercase_prose() {
        assert_eq!(RelationshipLabel::CloseFriend.to_string(), "close friend");
        assert_eq!(RelationshipLabel::Hostile.to_string(), "hostile");
    }

    #[test]
    fn enums_round_trip_serde() {
        let json = serde_json::to_string(&MeetingContext::FaceToFace).ok();
        assert_eq!(json.as_deref(), Some("\"FaceToFace\""));
        let restored: Result<MeetingContext, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(MeetingContext::FaceToFace));
    }
}
