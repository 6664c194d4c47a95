use serde::{Deserialize, Serialize};

use crate::domain::{FixtureId, FixturePlayerRank, Pyramid, SeasonFixture, SeasonId, SeasonPlayer};

use super::dto::{DeciderMatchDto, FixtureViewDto, FlattenPyramidDto};

/// Read-only requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    GetFixture {
        season_id: SeasonId,
        fixture_id: FixtureId,
    },

    /// Final ranking of a fixture so far, best rank first.
    GetRanking {
        season_id: SeasonId,
        fixture_id: FixtureId,
    },

    GetSeasonStandings { season_id: SeasonId },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    Fixture(FixtureViewDto),
    Ranking(Vec<FixturePlayerRank>),
    SeasonStandings(Vec<SeasonPlayer>),
}

pub fn build_fixture_view(fixture: &SeasonFixture) -> FixtureViewDto {
    let mut ranking = fixture.ranking.clone();
    ranking.sort_by_key(|r| r.rank);

    FixtureViewDto {
        season_id: fixture.season_id,
        fixture_id: fixture.fixture_id,
        number: fixture.number,
        state: fixture.state,
        quality_average: fixture.quality_average,
        players: fixture.players.clone(),
        group_matches: fixture.group_matches.clone(),
        pyramids: fixture.pyramids.iter().map(flatten_pyramid).collect(),
        ranking,
    }
}

/// Flattens a pyramid in heap order, resolving each node's parent.
pub fn flatten_pyramid(pyramid: &Pyramid) -> FlattenPyramidDto {
    let matches = pyramid
        .nodes
        .iter()
        .map(|node| DeciderMatchDto {
            match_id: node.match_id,
            level: node.level,
            player_one: node.player_one.clone(),
            player_two: node.player_two.clone(),
            is_finished: node.is_finished,
            is_left: node.is_left,
            parent_match_id: pyramid.parent_of(node.match_id).map(|p| p.match_id),
        })
        .collect();

    FlattenPyramidDto {
        pyramid_type: pyramid.pyramid_type,
        ranks: (
            pyramid.pyramid_type.best_rank(),
            pyramid.pyramid_type.worst_final_rank(),
        ),
        matches,
        is_complete: pyramid.is_complete(),
    }
}
