use serde::{Deserialize, Serialize};

use crate::domain::{
    FixtureId, FixturePlayer, FixturePlayerRank, FixtureState, GroupMatch, MatchId,
    PlayerMatchStats, PyramidType, SeasonId, SeasonPlayer,
};
use crate::engine::DeciderOutcome;

/// One decider match with its parent resolved, for clients that do not
/// walk the heap layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeciderMatchDto {
    pub match_id: MatchId,
    pub level: u32,
    pub player_one: Option<PlayerMatchStats>,
    pub player_two: Option<PlayerMatchStats>,
    pub is_finished: bool,
    pub is_left: bool,
    pub parent_match_id: Option<MatchId>,
}

/// Pyramid as a flat list, root first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlattenPyramidDto {
    pub pyramid_type: PyramidType,
    /// Ranks decided at the root.
    pub ranks: (u32, u32),
    pub matches: Vec<DeciderMatchDto>,
    pub is_complete: bool,
}

/// Full fixture view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FixtureViewDto {
    pub season_id: SeasonId,
    pub fixture_id: FixtureId,
    pub number: Option<u32>,
    pub state: FixtureState,
    pub quality_average: f64,
    pub players: Vec<FixturePlayer>,
    pub group_matches: Vec<GroupMatch>,
    pub pyramids: Vec<FlattenPyramidDto>,
    /// Sorted by rank.
    pub ranking: Vec<FixturePlayerRank>,
}

/// API response to a command.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Updated fixture after a stage transition.
    Fixture(FixtureViewDto),

    /// The group match as stored.
    GroupMatch(GroupMatch),

    /// Decider report: what changed plus the updated fixture.
    Decider {
        outcome: DeciderOutcome,
        fixture: FixtureViewDto,
    },

    /// Standings after a fixture was closed.
    SeasonStandings(Vec<SeasonPlayer>),
}
