//! The social relationship engine for the Outpost colony simulation.
//!
//! Every person carries an opinion of every other person they know, split
//! across three dimensions (trust, care, respect) and clamped to [1, 100].
//! Once per simulation tick the [`RelationshipEngine`] walks each person's
//! local group, forms missing relationships through the first-contact
//! formulas, and stochastically perturbs existing ones. Aggregate views
//! (best friends, settlement scores) and qualitative labels are derived
//! on demand.
//!
//! # Modules
//!
//! - [`aggregate`] -- Pull-based social metrics over the population.
//! - [`config`] -- Tunable relationship rates loaded from YAML.
//! - [`describe`] -- Scalar opinion to qualitative label.
//! - [`engine`] -- The per-tick relationship update driver.
//! - [`error`] -- The crate-wide [`SocialError`] type.
//! - [`factory`] -- Initial-opinion formulas per meeting context.
//! - [`opinion`] -- [`OpinionVector`], [`OpinionStore`], and clamping.
//! - [`population`] -- The person directory the engine operates on.

pub mod aggregate;
pub mod config;
pub mod describe;
pub mod engine;
pub mod error;
pub mod factory;
pub mod opinion;
pub mod population;

pub use aggregate::SocialAggregator;
pub use config::{ConfigError, RelationshipConfig};
pub use describe::describe;
pub use engine::{RelationshipEngine, TickOutcome};
pub use error::SocialError;
pub use factory::initial_opinion;
pub use opinion::{MAX_OPINION, MIN_OPINION, NEUTRAL_OPINION, OpinionStore, OpinionVector};
pub use population::{AttributeSet, PersonProfile, PersonState, Population};
