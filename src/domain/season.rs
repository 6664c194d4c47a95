// src/domain/season.rs

use serde::{Deserialize, Serialize};

use crate::domain::player::Level;
use crate::domain::{PlayerId, SeasonId};

/// How many fixture scores count towards a season total.
pub const COUNTED_SCORES: usize = 4;

/// A player's record for one season.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeasonPlayer {
    pub season_id: SeasonId,
    pub player_id: PlayerId,
    pub name: String,
    pub level: Level,
    pub quality: f64,
    /// Best fixture scores of the season, highest first. Unused slots are 0.
    pub scores: [f64; COUNTED_SCORES],
    /// Sum of `scores`.
    pub top4: f64,
    /// Position in the season standings (1 = best), 0 until ranked.
    pub rank: u32,
}

impl SeasonPlayer {
    pub fn new(
        season_id: SeasonId,
        player_id: PlayerId,
        name: impl Into<String>,
        level: Level,
        quality: f64,
        first_score: f64,
    ) -> Self {
        let mut scores = [0.0; COUNTED_SCORES];
        scores[0] = first_score;
        Self {
            season_id,
            player_id,
            name: name.into(),
            level,
            quality,
            scores,
            top4: first_score,
            rank: 0,
        }
    }

    /// Folds a fixture score into the best-four list.
    pub fn record_score(&mut self, score: f64) {
        if let Some(slot) = self.scores.iter().position(|&s| score > s) {
            self.scores[slot..].rotate_right(1);
            self.scores[slot] = score;
        }
        self.top4 = self.scores.iter().sum();
    }
}

/// Re-ranks season players by `top4`, best first. Ties keep their order.
pub fn rank_season_players(players: &mut [SeasonPlayer]) {
    players.sort_by(|a, b| b.top4.total_cmp(&a.top4));
    for (index, player) in players.iter_mut().enumerate() {
        player.rank = index as u32 + 1;
    }
}
