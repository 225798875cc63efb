//! Qualitative description of scalar opinions.
//!
//! Presentation layers want a word, not a float. The buckets here are a
//! display concern, but they must stay monotonic and cover the whole
//! opinion range with no gaps: any two opinions compare the same way their
//! labels do.

use outpost_types::RelationshipLabel;

/// Ascending bucket boundaries paired with the label used below each one.
///
/// An opinion lands in the first bucket whose threshold exceeds it; anything
/// at 95 or above is a close friend.
const BUCKETS: [(f64, RelationshipLabel); 10] = [
    (5.0, RelationshipLabel::Hostile),
    (15.0, RelationshipLabel::Antagonistic),
    (25.0, RelationshipLabel::Cold),
    (35.0, RelationshipLabel::Distant),
    (45.0, RelationshipLabel::Guarded),
    (55.0, RelationshipLabel::Indifferent),
    (65.0, RelationshipLabel::Cordial),
    (75.0, RelationshipLabel::Friendly),
    (85.0, RelationshipLabel::Warm),
    (95.0, RelationshipLabel::Fond),
];

/// Map a scalar opinion to its qualitative label.
///
/// Pure and total: finite values outside the stored opinion range saturate
/// at the extreme labels, and non-finite input (NaN, infinities) reads as
/// [`Indifferent`] — no usable information means no particular feeling.
///
/// [`Indifferent`]: RelationshipLabel::Indifferent
pub fn describe(opinion: f64) -> RelationshipLabel {
    if !opinion.is_finite() {
        return RelationshipLabel::Indifferent;
    }
    for (threshold, label) in BUCKETS {
        if opinion < threshold {
            return label;
        }
    }
    RelationshipLabel::CloseFriend
}
