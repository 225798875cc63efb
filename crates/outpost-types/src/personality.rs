//! Personality typing and the normalized personality distance.
//!
//! Settlers carry a four-axis MBTI-style personality type. The relationship
//! formulas never look at individual axes; they consume only the scalar
//! [`PersonalityType::distance`] between two types, normalized to [0, 2]
//! where 0 means identical and 2 means opposite on every axis. Similar
//! personalities get along: the engine turns `2 - distance` into a positive
//! modifier.

use serde::{Deserialize, Serialize};

/// Distance contributed by each differing personality axis.
///
/// Four axes at 0.5 apiece put the distance range at [0, 2].
const AXIS_DISTANCE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// Where a person directs their energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Focus {
    /// Outward, toward people and activity.
    Extravert,
    /// Inward, toward reflection.
    Introvert,
}

/// How a person takes in information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Perceiving {
    /// Concrete facts and present detail.
    Sensing,
    /// Patterns and possibilities.
    Intuitive,
}

/// How a person makes decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Deciding {
    /// Detached logic.
    Thinking,
    /// Personal values and harmony.
    Feeling,
}

/// How a person structures their outer life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Structuring {
    /// Planned and settled.
    Judging,
    /// Open and adaptable.
    Perceiving,
}

// ---------------------------------------------------------------------------
// PersonalityType
// ---------------------------------------------------------------------------

/// A four-axis personality type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonalityType {
    /// Energy direction axis.
    pub focus: Focus,
    /// Information intake axis.
    pub perceiving: Perceiving,
    /// Decision-making axis.
    pub deciding: Deciding,
    /// Outer-life structure axis.
    pub structuring: Structuring,
}

impl PersonalityType {
    /// Construct a personality type from its four axes.
    pub const fn new(
        focus: Focus,
        perceiving: Perceiving,
        deciding: Deciding,
        structuring: Structuring,
    ) -> Self {
        Self {
            focus,
            perceiving,
            deciding,
            structuring,
        }
    }

    /// Normalized distance to another personality type.
    ///
    /// Each differing axis contributes 0.5, so the result lies in [0, 2]:
    /// 0 for identical types, 2 for types that differ on every axis.
    pub fn distance(&self, other: &Self) -> f64 {
        let mut differing = 0u32;
        if self.focus != other.focus {
            differing += 1;
        }
        if self.perceiving != other.perceiving {
            differing += 1;
        }
        if self.deciding != other.deciding {
            differing += 1;
        }
        if self.structuring != other.structuring {
            differing += 1;
        }
        f64::from(differing) * AXIS_DISTANCE
    }
}

impl core::fmt::Display for PersonalityType {
    /// Renders the conventional four-letter code, e.g. `ISTJ`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let focus = match self.focus {
            Focus::Extravert => 'E',
            Focus::Introvert => 'I',
        };
        let perceiving = match self.perceiving {
            Perceiving::Sensing => 'S',
            Perceiving::Intuitive => 'N',
        };
        let deciding = match self.deciding {
            Deciding::Thinking => 'T',
            Deciding::Feeling => 'F',
        };
        let structuring = match self.structuring {
            Structuring::Judging => 'J',
            Structuring::Perceiving => 'P',
        };
        write!(f, "{focus}{perceiving}{deciding}{structuring}")
    }
}
