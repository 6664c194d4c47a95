// src/domain/config.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::pyramid::MAX_PYRAMID_LEAVES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid league config: {0}")]
    Invalid(String),

    #[error("failed to parse league config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// League rules that are not part of the ranking algorithm itself.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeagueConfig {
    /// Sets needed to win a match (3 = best of five).
    pub sets_to_win: u8,

    /// Player cap per fixture.
    pub max_players: u32,

    /// Up to this many players the fixture is a single round robin.
    pub single_group_max_players: u32,

    /// Allow four groups for player counts divisible by four.
    pub four_groups_enabled: bool,

    /// Smallest fixture that is split into four groups.
    pub four_groups_min_players: u32,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            sets_to_win: 3,
            max_players: (MAX_PYRAMID_LEAVES * 2) as u32,
            single_group_max_players: 6,
            four_groups_enabled: true,
            four_groups_min_players: 12,
        }
    }
}

impl LeagueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sets_to_win == 0 {
            return Err(ConfigError::Invalid("sets_to_win = 0".into()));
        }

        let cap = (MAX_PYRAMID_LEAVES * 2) as u32;
        if self.max_players == 0 || self.max_players > cap {
            return Err(ConfigError::Invalid(format!(
                "max_players must be in [1, {cap}], got {}",
                self.max_players
            )));
        }

        // Any smaller and a split field can leave a group with a single player.
        if self.single_group_max_players < 3 {
            return Err(ConfigError::Invalid(format!(
                "single_group_max_players must be at least 3, got {}",
                self.single_group_max_players
            )));
        }

        if self.four_groups_enabled && self.four_groups_min_players < 8 {
            return Err(ConfigError::Invalid(format!(
                "four_groups_min_players must be at least 8, got {}",
                self.four_groups_min_players
            )));
        }

        Ok(())
    }

    /// Parses and validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: LeagueConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Valid final score: the winner reached `sets_to_win`, the loser did not.
    pub fn is_valid_score(&self, sets_one: u8, sets_two: u8) -> bool {
        let (high, low) = if sets_one >= sets_two {
            (sets_one, sets_two)
        } else {
            (sets_two, sets_one)
        };
        high == self.sets_to_win && low < self.sets_to_win
    }
}
