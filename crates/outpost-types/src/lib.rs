//! Shared type definitions for the Outpost colony simulation.
//!
//! This crate is the single source of truth for the identifier and
//! enumeration types used across the Outpost workspace. It holds no logic
//! beyond what the types themselves need (distances, display, ordering).
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (gender, dimensions, attributes, contexts)
//! - [`personality`] -- Four-axis personality type and normalized distance

pub mod enums;
pub mod ids;
pub mod personality;

// Re-export all public types at crate root for convenience.
pub use enums::{Attribute, Dimension, Gender, MeetingContext, RelationshipLabel, ScienceField};
pub use ids::{LocationId, PersonId, SettlementId};
pub use personality::{Deciding, Focus, Perceiving, PersonalityType, Structuring};
