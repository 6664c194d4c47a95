//! Fixture transitions around the two stages: opening the fixture,
//! group results, and closing it into the season standings.

use tracing::{debug, info};

use crate::domain::{
    rank_season_players, FixtureState, GroupMatch, LeagueConfig, Level, MatchId, PlayerId,
    SeasonFixture, SeasonPlayer,
};
use crate::engine::errors::EngineError;
use crate::engine::validation::{require_state, validate_result};

/// Upcoming -> GroupsSelection.
pub fn start_fixture(fixture: &mut SeasonFixture) -> Result<(), EngineError> {
    require_state(fixture, &[FixtureState::Upcoming], "Upcoming")?;
    fixture.state = FixtureState::GroupsSelection;
    info!(fixture_id = fixture.fixture_id, "fixture started");
    Ok(())
}

/// Records (or overwrites) the result of a group match.
pub fn report_group_match(
    fixture: &mut SeasonFixture,
    config: &LeagueConfig,
    match_id: MatchId,
    sets_one: u8,
    sets_two: u8,
) -> Result<GroupMatch, EngineError> {
    validate_result(config, sets_one, sets_two)?;
    require_state(fixture, &[FixtureState::GroupsStage], "GroupsStage")?;

    let group_match = fixture
        .group_match_mut(match_id)
        .ok_or(EngineError::MatchNotFound(match_id))?;
    group_match.set_result(sets_one, sets_two);

    debug!(match_id, group = ?group_match.group, sets_one, sets_two, "group result recorded");
    Ok(group_match.clone())
}

/// Closes a fully ranked fixture and folds its scores into `season_players`.
///
/// `level_of` reads a player's level; it is only asked about players who
/// appear in this season for the first time. Returns the re-ranked standings.
pub fn end_fixture(
    fixture: &mut SeasonFixture,
    mut season_players: Vec<SeasonPlayer>,
    level_of: impl Fn(PlayerId) -> Option<Level>,
) -> Result<Vec<SeasonPlayer>, EngineError> {
    require_state(
        fixture,
        &[FixtureState::DecidersStage, FixtureState::Finished],
        "DecidersStage",
    )?;
    if !fixture.is_ranking_complete() {
        return Err(EngineError::RankingIncomplete {
            ranked: fixture.ranking.len(),
            players: fixture.players.len(),
        });
    }
    if fixture.season_recorded {
        return Err(EngineError::AlreadyRecorded(fixture.fixture_id));
    }

    for rank in &fixture.ranking {
        match season_players.iter_mut().find(|sp| sp.player_id == rank.player_id) {
            Some(existing) => existing.record_score(rank.score),
            None => {
                let player = fixture
                    .player(rank.player_id)
                    .ok_or(EngineError::PlayerNotFound(rank.player_id))?;
                let level = level_of(rank.player_id).ok_or(EngineError::PlayerNotFound(rank.player_id))?;
                season_players.push(SeasonPlayer::new(
                    fixture.season_id,
                    rank.player_id,
                    rank.player_name.clone(),
                    level,
                    player.quality.unwrap_or(rank.score),
                    rank.score,
                ));
            }
        }
    }

    rank_season_players(&mut season_players);
    fixture.state = FixtureState::Finished;
    fixture.season_recorded = true;

    info!(
        season_id = fixture.season_id,
        fixture_id = fixture.fixture_id,
        season_players = season_players.len(),
        "fixture ended"
    );
    Ok(season_players)
}
