use serde::{Deserialize, Serialize};

use crate::domain::{FixtureId, FixturePlayer, MatchId, SeasonId};

/// Top-level command. Each one loads a single fixture, applies one change
/// and saves it back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Open an upcoming fixture for group selection.
    StartFixture(FixtureRef),

    /// Seed groups from a ranked player list.
    AssignGroups(AssignGroupsCommand),

    /// Result of a round-robin match.
    ReportGroupMatch(MatchResultCommand),

    /// Rank the groups and build the decider pyramids.
    EndGroupStage(FixtureRef),

    /// Result of a decider match.
    ReportDeciderMatch(MatchResultCommand),

    /// Close the fixture and update the season standings.
    EndFixture(FixtureRef),
}

/// Addresses one fixture of one season.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixtureRef {
    pub season_id: SeasonId,
    pub fixture_id: FixtureId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignGroupsCommand {
    pub season_id: SeasonId,
    pub fixture_id: FixtureId,
    /// Best player first; the order drives the snake seeding.
    pub players: Vec<FixturePlayer>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MatchResultCommand {
    pub season_id: SeasonId,
    pub fixture_id: FixtureId,
    pub match_id: MatchId,
    pub sets_won_by_player_one: u8,
    pub sets_won_by_player_two: u8,
}

impl Command {
    pub fn fixture_ref(&self) -> FixtureRef {
        match self {
            Command::StartFixture(r) | Command::EndGroupStage(r) | Command::EndFixture(r) => *r,
            Command::AssignGroups(c) => FixtureRef {
                season_id: c.season_id,
                fixture_id: c.fixture_id,
            },
            Command::ReportGroupMatch(c) | Command::ReportDeciderMatch(c) => FixtureRef {
                season_id: c.season_id,
                fixture_id: c.fixture_id,
            },
        }
    }
}
