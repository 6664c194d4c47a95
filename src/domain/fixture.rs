// src/domain/fixture.rs

use serde::{Deserialize, Serialize};

use crate::domain::group::{Group, GroupMatch};
use crate::domain::player::FixturePlayer;
use crate::domain::pyramid::{Pyramid, PyramidType};
use crate::domain::{FixtureId, MatchId, PlayerId, SeasonId};

/// Life cycle of a fixture.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FixtureState {
    #[default]
    Upcoming,
    GroupsSelection,
    GroupsStage,
    DecidersStage,
    Finished,
}

/// Final placement of one player in a fixture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FixturePlayerRank {
    pub player_id: PlayerId,
    pub player_name: String,
    /// 1-based, unique inside the fixture.
    pub rank: u32,
    pub score: f64,
}

/// One tournament day of a season. Aggregate root for the engine:
/// everything a single result report touches lives here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SeasonFixture {
    pub season_id: SeasonId,
    pub fixture_id: FixtureId,
    pub number: Option<u32>,
    /// Mean quality of the players, fixed when the groups are assigned.
    pub quality_average: f64,
    pub state: FixtureState,
    pub players: Vec<FixturePlayer>,
    pub group_matches: Vec<GroupMatch>,
    pub pyramids: Vec<Pyramid>,
    pub ranking: Vec<FixturePlayerRank>,
    /// Next free match id inside this fixture.
    pub next_match_id: MatchId,
    /// Scores already folded into the season standings.
    #[serde(default)]
    pub season_recorded: bool,
}

impl SeasonFixture {
    pub fn new(season_id: SeasonId, fixture_id: FixtureId) -> Self {
        Self {
            season_id,
            fixture_id,
            number: None,
            quality_average: 0.0,
            state: FixtureState::Upcoming,
            players: Vec::new(),
            group_matches: Vec::new(),
            pyramids: Vec::new(),
            ranking: Vec::new(),
            next_match_id: 1,
            season_recorded: false,
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    pub fn allocate_match_id(&mut self) -> MatchId {
        let id = self.next_match_id;
        self.next_match_id += 1;
        id
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&FixturePlayer> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut FixturePlayer> {
        self.players.iter_mut().find(|p| p.player_id == player_id)
    }

    /// Replaces players and recomputes the quality baseline.
    pub fn set_players(&mut self, players: Vec<FixturePlayer>) {
        self.quality_average = quality_average(&players);
        self.players = players;
    }

    /// Groups present among the players and group matches, in label order.
    /// A group of one player has no matches but still counts.
    pub fn groups(&self) -> Vec<Group> {
        let mut groups: Vec<Group> = self
            .players
            .iter()
            .filter_map(|p| p.group)
            .chain(self.group_matches.iter().map(|m| m.group))
            .collect();
        groups.sort_unstable();
        groups.dedup();
        groups
    }

    pub fn group_match_mut(&mut self, match_id: MatchId) -> Option<&mut GroupMatch> {
        self.group_matches.iter_mut().find(|m| m.match_id == match_id)
    }

    pub fn unfinished_group_matches(&self) -> usize {
        self.group_matches.iter().filter(|m| !m.is_finished()).count()
    }

    /// Players seeded into `group` or playing one of its matches, in fixture order.
    pub fn group_player_ids(&self, group: Group) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| {
                p.group == Some(group)
                    || self
                        .group_matches
                        .iter()
                        .any(|m| m.group == group && m.involves(p.player_id))
            })
            .map(|p| p.player_id)
            .collect()
    }

    pub fn pyramid(&self, pyramid_type: PyramidType) -> Option<&Pyramid> {
        self.pyramids.iter().find(|p| p.pyramid_type == pyramid_type)
    }

    /// Index of the pyramid containing `match_id`.
    pub fn pyramid_index_of(&self, match_id: MatchId) -> Option<usize> {
        self.pyramids.iter().position(|p| p.contains_match(match_id))
    }

    /// Inserts a ranking entry, replacing whatever held the same rank or the
    /// same player before. Keeps the ranking sorted by rank.
    pub fn upsert_rank(&mut self, entry: FixturePlayerRank) {
        self.ranking
            .retain(|r| r.rank != entry.rank && r.player_id != entry.player_id);
        self.ranking.push(entry);
        self.ranking.sort_by_key(|r| r.rank);
    }

    pub fn rank_of(&self, player_id: PlayerId) -> Option<&FixturePlayerRank> {
        self.ranking.iter().find(|r| r.player_id == player_id)
    }

    pub fn is_ranking_complete(&self) -> bool {
        !self.players.is_empty() && self.ranking.len() == self.players.len()
    }
}

/// Mean of the known qualities; 0 when nobody has one.
pub fn quality_average(players: &[FixturePlayer]) -> f64 {
    let known: Vec<f64> = players.iter().filter_map(|p| p.quality).collect();
    if known.is_empty() {
        return 0.0;
    }
    known.iter().sum::<f64>() / known.len() as f64
}
