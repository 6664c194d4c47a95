use serde::{Deserialize, Serialize};

use crate::domain::group::Group;
use crate::domain::PlayerId;

/// League level a player competes in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Open,
}

/// Player record as kept by the player store.
///
/// Only `level` and `quality` matter to the engine: the level is copied into
/// a season record the first time a player is ranked in that season.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    /// Skill rating. `None` for a player who has never finished a fixture.
    pub quality: Option<f64>,
    pub level: Level,
}

impl Player {
    pub fn new(player_id: PlayerId, name: impl Into<String>, level: Level) -> Self {
        Self {
            player_id,
            name: name.into(),
            quality: None,
            level,
        }
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// A player taking part in one fixture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FixturePlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub quality: Option<f64>,
    /// Group the player was seeded into.
    #[serde(default)]
    pub group: Option<Group>,
    /// Place inside the player's group; set when the group stage ends.
    pub group_rank: Option<u32>,
}

impl FixturePlayer {
    pub fn new(player_id: PlayerId, name: impl Into<String>, quality: Option<f64>) -> Self {
        Self {
            player_id,
            name: name.into(),
            quality,
            group: None,
            group_rank: None,
        }
    }

    pub fn to_match_stats(&self) -> PlayerMatchStats {
        PlayerMatchStats::new(self.player_id, self.name.clone())
    }
}

/// One side of a match.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerMatchStats {
    pub player_id: PlayerId,
    pub player_name: String,
    /// `None` until the match is played.
    pub sets_won: Option<u8>,
}

impl PlayerMatchStats {
    pub fn new(player_id: PlayerId, player_name: impl Into<String>) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            sets_won: None,
        }
    }

    pub fn with_sets(mut self, sets_won: u8) -> Self {
        self.sets_won = Some(sets_won);
        self
    }

    pub fn is_played(&self) -> bool {
        self.sets_won.is_some()
    }
}
