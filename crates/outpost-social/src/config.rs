//! Configuration for the relationship engine.
//!
//! The engine's behavior is governed by a small set of rate constants, all
//! expressed per millisol of elapsed simulation time. [`RelationshipConfig`]
//! bundles every tunable so that callers (tick loop, tests) can override
//! defaults, and provides a YAML loader for deployments that keep tunables
//! in a config file.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Tunable rates for the per-tick relationship update.
///
/// Each modifier scales one term of the stochastic opinion drift; see the
/// engine module for where each one enters the formula. All fields default
/// to the canonical values, so an empty YAML document is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelationshipConfig {
    /// Probability per millisol that a co-located pair's opinion moves at
    /// all (default: 0.1). Stress raises the effective probability.
    #[serde(default = "default_base_change_probability")]
    pub base_change_probability: f64,

    /// Magnitude ceiling per millisol of the random drift term
    /// (default: 0.1).
    #[serde(default = "default_base_change_amount")]
    pub base_change_amount: f64,

    /// Weight of the reciprocity pull toward the other person's opinion
    /// (default: 0.2).
    #[serde(default = "default_base_opinion_modifier")]
    pub base_opinion_modifier: f64,

    /// Weight of the other person's conversation attribute (default: 0.2).
    #[serde(default = "default_base_conversation_modifier")]
    pub base_conversation_modifier: f64,

    /// Weight of the other person's attractiveness when genders differ
    /// (default: 0.1).
    #[serde(default = "default_base_attractiveness_modifier")]
    pub base_attractiveness_modifier: f64,

    /// Flat bonding rate between people of the same gender (default: 0.02).
    #[serde(default = "default_base_gender_bonding_modifier")]
    pub base_gender_bonding_modifier: f64,

    /// Weight of personality similarity (default: 0.1).
    #[serde(default = "default_personality_diff_modifier")]
    pub personality_diff_modifier: f64,

    /// Constant settler-training rate; colonists are selected to get along
    /// (default: 0.02).
    #[serde(default = "default_base_settler_modifier")]
    pub base_settler_modifier: f64,

    /// Rate at which the local group's regard feeds back into a person's
    /// stress (default: 0.1).
    #[serde(default = "default_base_stress_modifier")]
    pub base_stress_modifier: f64,

    /// Random seed for the engine's internal generator (default: 42).
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            base_change_probability: default_base_change_probability(),
            base_change_amount: default_base_change_amount(),
            base_opinion_modifier: default_base_opinion_modifier(),
            base_conversation_modifier: default_base_conversation_modifier(),
            base_attractiveness_modifier: default_base_attractiveness_modifier(),
            base_gender_bonding_modifier: default_base_gender_bonding_modifier(),
            personality_diff_modifier: default_personality_diff_modifier(),
            base_settler_modifier: default_base_settler_modifier(),
            base_stress_modifier: default_base_stress_modifier(),
            seed: default_seed(),
        }
    }
}

impl RelationshipConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

fn default_base_change_probability() -> f64 {
    0.1
}

fn default_base_change_amount() -> f64 {
    0.1
}

fn default_base_opinion_modifier() -> f64 {
    0.2
}

fn default_base_conversation_modifier() -> f64 {
    0.2
}

fn default_base_attractiveness_modifier() -> f64 {
    0.1
}

fn default_base_gender_bonding_modifier() -> f64 {
    0.02
}

fn default_personality_diff_modifier() -> f64 {
    0.1
}

fn default_base_settler_modifier() -> f64 {
    0.02
}

fn default_base_stress_modifier() -> f64 {
    0.1
}

fn default_seed() -> u64 {
    42
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = RelationshipConfig::parse("{}").ok();
        assert_eq!(config, Some(RelationshipConfig::default()));
    }

    #[test]
    fn partial_yaml_overrides_single_field() {
        let config = RelationshipConfig::parse("base_change_probability: 0.5\nseed: 7\n").ok();
        let Some(config) = config else {
            assert!(config.is_some());
            return;
        };
        assert!((config.base_change_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.seed, 7);
        // Untouched fields keep their defaults.
        assert!((config.base_settler_modifier - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let result = RelationshipConfig::parse(": not yaml :");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn defaults_match_canonical_rates() {
        let config = RelationshipConfig::default();
        assert!((config.base_change_probability - 0.1).abs() < f64::EPSILON);
        assert!((config.base_change_amount - 0.1).abs() < f64::EPSILON);
        assert!((config.base_opinion_modifier - 0.2).abs() < f64::EPSILON);
        assert!((config.base_conversation_modifier - 0.2).abs() < f64::EPSILON);
        assert!((config.base_attractiveness_modifier - 0.1).abs() < f64::EPSILON);
        assert!((config.base_gender_bonding_modifier - 0.02).abs() < f64::EPSILON);
        assert!((config.personality_diff_modifier - 0.1).abs() < f64::EPSILON);
        assert!((config.base_settler_modifier - 0.02).abs() < f64::EPSILON);
        assert!((config.base_stress_modifier - 0.1).abs() < f64::EPSILON);
    }
}
