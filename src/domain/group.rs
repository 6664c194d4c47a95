// src/domain/group.rs

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerMatchStats;
use crate::domain::{MatchId, PlayerId};

/// Group label of the group stage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    A,
    B,
    C,
    D,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::A, Group::B, Group::C, Group::D];

    pub fn index(self) -> usize {
        match self {
            Group::A => 0,
            Group::B => 1,
            Group::C => 2,
            Group::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Group> {
        Self::ALL.get(index).copied()
    }
}

/// Round-robin match inside one group.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMatch {
    pub match_id: MatchId,
    pub group: Group,
    pub player_one: PlayerMatchStats,
    pub player_two: PlayerMatchStats,
}

impl GroupMatch {
    pub fn new(
        match_id: MatchId,
        group: Group,
        player_one: PlayerMatchStats,
        player_two: PlayerMatchStats,
    ) -> Self {
        Self {
            match_id,
            group,
            player_one,
            player_two,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.player_one.is_played() && self.player_two.is_played()
    }

    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player_one.player_id == player_id || self.player_two.player_id == player_id
    }

    /// Both players belong to `ids`.
    pub fn is_between_all_of(&self, ids: &[PlayerId]) -> bool {
        ids.contains(&self.player_one.player_id) && ids.contains(&self.player_two.player_id)
    }

    pub fn is_direct_match(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player_one.player_id == a && self.player_two.player_id == b)
            || (self.player_one.player_id == b && self.player_two.player_id == a)
    }

    /// Winner id of a finished match. `None` while unplayed or tied.
    pub fn winner_id(&self) -> Option<PlayerId> {
        let one = self.player_one.sets_won?;
        let two = self.player_two.sets_won?;
        if one > two {
            Some(self.player_one.player_id)
        } else if two > one {
            Some(self.player_two.player_id)
        } else {
            None
        }
    }

    /// Sets won minus sets lost from `player_id`'s point of view.
    /// Zero for an unplayed match or a match the player is not part of.
    pub fn set_difference_for(&self, player_id: PlayerId) -> i32 {
        let (Some(one), Some(two)) = (self.player_one.sets_won, self.player_two.sets_won) else {
            return 0;
        };
        let (one, two) = (i32::from(one), i32::from(two));

        if self.player_one.player_id == player_id {
            one - two
        } else if self.player_two.player_id == player_id {
            two - one
        } else {
            0
        }
    }

    pub fn set_result(&mut self, sets_one: u8, sets_two: u8) {
        self.player_one.sets_won = Some(sets_one);
        self.player_two.sets_won = Some(sets_two);
    }
}
