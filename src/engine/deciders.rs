//! End of the group stage: group ranks, then either the final ranking
//! (one group) or the first decider pyramids (two or four groups).

use tracing::{debug, info};

use crate::domain::{
    FixturePlayer, FixturePlayerRank, FixtureState, GroupMatch, PlayerId, PlayerMatchStats,
    Pyramid, PyramidType, SeasonFixture,
};
use crate::engine::errors::EngineError;
use crate::engine::group_stage::resolve_group_ranks;
use crate::engine::scoring::score_for_rank;
use crate::engine::validation::require_state;
use crate::engine::RandomSource;

/// Ranks every group and prepares the next stage. Returns the number of groups.
pub fn end_group_stage<R: RandomSource>(
    fixture: &mut SeasonFixture,
    rng: &mut R,
) -> Result<usize, EngineError> {
    require_state(fixture, &[FixtureState::GroupsStage], "GroupsStage")?;

    let remaining = fixture.unfinished_group_matches();
    if remaining > 0 {
        return Err(EngineError::UnfinishedGroupMatches { remaining });
    }

    let groups = fixture.groups();

    // Group ranks are computed in full before the fixture is touched.
    let resolved: Vec<Vec<(PlayerId, u32)>> = if groups.is_empty() {
        // A lone player has no matches to group by.
        match fixture.players.as_slice() {
            [only] => vec![vec![(only.player_id, 1)]],
            _ => return Err(EngineError::UnsupportedGroupCount(0)),
        }
    } else {
        if !matches!(groups.len(), 1 | 2 | 4) {
            return Err(EngineError::UnsupportedGroupCount(groups.len()));
        }
        let mut resolved = Vec::with_capacity(groups.len());
        for &group in &groups {
            let ids = fixture.group_player_ids(group);
            let matches: Vec<GroupMatch> = fixture
                .group_matches
                .iter()
                .filter(|m| m.group == group)
                .cloned()
                .collect();
            let ranks = resolve_group_ranks(&ids, &matches, rng)?;
            debug!(?group, ?ranks, "group resolved");
            resolved.push(ranks);
        }
        resolved
    };

    let sizes: Vec<usize> = resolved.iter().map(Vec::len).collect();
    let grouped: usize = sizes.iter().sum();
    if grouped != fixture.players.len() {
        return Err(EngineError::UngroupedPlayers {
            grouped,
            players: fixture.players.len(),
        });
    }
    match sizes.as_slice() {
        [a, b] if a.abs_diff(*b) > 1 => return Err(EngineError::UnsupportedGroupSizes(sizes.clone())),
        [a, b, c, d] if !(a == b && b == c && c == d && (2..=4).contains(a)) => {
            return Err(EngineError::UnsupportedGroupSizes(sizes.clone()))
        }
        _ => {}
    }

    for (player_id, rank) in resolved.iter().flatten() {
        if let Some(player) = fixture.player_mut(*player_id) {
            player.group_rank = Some(*rank);
        }
    }
    fixture.ranking.clear();
    fixture.pyramids.clear();

    let ordered = ordered_stats(fixture, &resolved)?;
    match ordered.as_slice() {
        [single] => finish_single_group(fixture, single)?,
        [a, b] => build_two_group_deciders(fixture, a, b)?,
        [a, b, c, d] => build_four_group_deciders(fixture, [a, b, c, d].map(Vec::as_slice))?,
        _ => return Err(EngineError::UnsupportedGroupCount(ordered.len())),
    }

    info!(
        fixture_id = fixture.fixture_id,
        groups = resolved.len(),
        pyramids = fixture.pyramids.len(),
        state = ?fixture.state,
        "group stage ended"
    );
    Ok(resolved.len())
}

/// Match-side stats of every group's players, best group rank first.
fn ordered_stats(
    fixture: &SeasonFixture,
    resolved: &[Vec<(PlayerId, u32)>],
) -> Result<Vec<Vec<PlayerMatchStats>>, EngineError> {
    resolved
        .iter()
        .map(|ranks| {
            ranks
                .iter()
                .map(|(player_id, _)| {
                    fixture
                        .player(*player_id)
                        .map(FixturePlayer::to_match_stats)
                        .ok_or(EngineError::PlayerNotFound(*player_id))
                })
                .collect()
        })
        .collect()
}

fn finish_single_group(
    fixture: &mut SeasonFixture,
    ordered: &[PlayerMatchStats],
) -> Result<(), EngineError> {
    let total = fixture.players.len() as u32;
    for (index, stats) in ordered.iter().enumerate() {
        let rank = index as u32 + 1;
        fixture.upsert_rank(FixturePlayerRank {
            player_id: stats.player_id,
            player_name: stats.player_name.clone(),
            rank,
            score: score_for_rank(rank, fixture.quality_average, total),
        });
    }
    fixture.state = FixtureState::Finished;
    Ok(())
}

/// The i-th of group A meets the i-th of group B for ranks `2i+1` and
/// `2i+2`. With uneven groups the last player of the bigger one is ranked
/// last straight away.
fn build_two_group_deciders(
    fixture: &mut SeasonFixture,
    a: &[PlayerMatchStats],
    b: &[PlayerMatchStats],
) -> Result<(), EngineError> {
    let paired = a.len().min(b.len());
    for i in 0..paired {
        let pyramid_type =
            PyramidType::from_index(i).ok_or(EngineError::UnsupportedPlayerCount(a.len() + b.len()))?;
        push_pyramid(fixture, pyramid_type, vec![(a[i].clone(), b[i].clone())])?;
    }

    let leftover = if a.len() > b.len() { a.get(paired) } else { b.get(paired) };
    if let Some(stats) = leftover {
        let total = fixture.players.len() as u32;
        fixture.upsert_rank(FixturePlayerRank {
            player_id: stats.player_id,
            player_name: stats.player_name.clone(),
            rank: total,
            score: score_for_rank(total, fixture.quality_average, total),
        });
    }

    fixture.state = FixtureState::DecidersStage;
    Ok(())
}

/// Group winners cross with runners-up for ranks 1..8; thirds and fourths
/// cross the same way for ranks 9 onwards.
fn build_four_group_deciders(
    fixture: &mut SeasonFixture,
    [a, b, c, d]: [&[PlayerMatchStats]; 4],
) -> Result<(), EngineError> {
    fn cross(
        x: &[PlayerMatchStats],
        i: usize,
        y: &[PlayerMatchStats],
        j: usize,
    ) -> (PlayerMatchStats, PlayerMatchStats) {
        (x[i].clone(), y[j].clone())
    }

    let top = vec![
        cross(a, 0, d, 1),
        cross(c, 0, b, 1),
        cross(b, 0, c, 1),
        cross(d, 0, a, 1),
    ];
    push_pyramid(fixture, PyramidType::Ranks1_2, top)?;

    match a.len() {
        4 => {
            let bottom = vec![
                cross(a, 2, d, 3),
                cross(c, 2, b, 3),
                cross(b, 2, c, 3),
                cross(d, 2, a, 3),
            ];
            push_pyramid(fixture, PyramidType::Ranks9_10, bottom)?;
        }
        3 => {
            let bottom = vec![cross(a, 2, d, 2), cross(c, 2, b, 2)];
            push_pyramid(fixture, PyramidType::Ranks9_10, bottom)?;
        }
        _ => {}
    }

    fixture.state = FixtureState::DecidersStage;
    Ok(())
}

pub(crate) fn push_pyramid(
    fixture: &mut SeasonFixture,
    pyramid_type: PyramidType,
    pairs: Vec<(PlayerMatchStats, PlayerMatchStats)>,
) -> Result<(), EngineError> {
    let pyramid = Pyramid::build(pyramid_type, pairs, || fixture.allocate_match_id())?;
    debug!(?pyramid_type, matches = pyramid.nodes.len(), "pyramid built");
    fixture.pyramids.push(pyramid);
    Ok(())
}
