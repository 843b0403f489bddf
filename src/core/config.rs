//! Engine configuration.
//!
//! `EngineConfig` is loaded once at startup and handed to the registry and
//! the battle engine. Every field has a default matching the standard game,
//! so a partial JSON document only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::ScoringRules;

/// Default session code length.
pub const DEFAULT_SESSION_CODE_LENGTH: usize = 6;

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Point values and multipliers.
    pub scoring: ScoringRules,

    /// Length of generated session codes.
    /// Six characters gives ~2 billion codes; collisions are still checked.
    pub session_code_length: usize,

    /// Seed for session codes and identities.
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Require the sweep user to hold the turn.
    /// Off by default: ping sweep can be used at any time during battle.
    pub sweep_requires_turn: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringRules::default(),
            session_code_length: DEFAULT_SESSION_CODE_LENGTH,
            seed: None,
            sweep_requires_turn: false,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=16).contains(&self.session_code_length) {
            return Err(ConfigError::Invalid(format!(
                "session_code_length must be 4-16, got {}",
                self.session_code_length
            )));
        }
        if self.scoring.admin_access_multiplier == 0 || self.scoring.chain_bonus_multiplier == 0 {
            return Err(ConfigError::Invalid("multipliers must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use custom scoring rules.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Use a custom session code length.
    #[must_use]
    pub fn with_session_code_length(mut self, len: usize) -> Self {
        self.session_code_length = len;
        self
    }

    /// Require turn ownership for ping sweep.
    #[must_use]
    pub fn with_sweep_requires_turn(mut self, required: bool) -> Self {
        self.sweep_requires_turn = required;
        self
    }
}
