//! Advancing one decider match through its pyramid.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::pyramid::{left_child, right_child};
use crate::domain::{
    FixturePlayerRank, FixtureState, LeagueConfig, MatchId, PlayerId, PlayerMatchStats,
    PyramidType, SeasonFixture,
};
use crate::engine::deciders::push_pyramid;
use crate::engine::errors::EngineError;
use crate::engine::scoring::decider_scores;
use crate::engine::validation::{require_state, validate_result};

/// What a single decider result changed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DeciderOutcome {
    pub match_id: MatchId,
    /// Final ranks written by this report (root matches only).
    pub decided_ranks: Vec<u32>,
    /// Parent match that now has both players.
    pub parent_ready: Option<MatchId>,
    /// Loser pyramid created or refreshed by this report.
    pub spawned: Option<PyramidType>,
    pub ranking_complete: bool,
}

/// Records the result of a decider match and pushes its consequences:
/// final ranks at level 0, winners to the parent match above, and losers
/// into a new pyramid once a whole level is played.
///
/// Re-reporting a played match overwrites it. Changing its winner is
/// refused once a match depending on it has been played.
pub fn report_decider_result(
    fixture: &mut SeasonFixture,
    config: &LeagueConfig,
    match_id: MatchId,
    sets_one: u8,
    sets_two: u8,
) -> Result<DeciderOutcome, EngineError> {
    validate_result(config, sets_one, sets_two)?;
    require_state(
        fixture,
        &[FixtureState::DecidersStage, FixtureState::Finished],
        "DecidersStage",
    )?;
    if fixture.season_recorded {
        return Err(EngineError::AlreadyRecorded(fixture.fixture_id));
    }

    let pyramid_index = fixture
        .pyramid_index_of(match_id)
        .ok_or(EngineError::MatchNotFound(match_id))?;

    let (position, level, pyramid_type) = {
        let pyramid = &fixture.pyramids[pyramid_index];
        let position = pyramid
            .position_of(match_id)
            .ok_or(EngineError::MatchNotFound(match_id))?;
        let node = &pyramid.nodes[position];
        if !node.is_ready() {
            return Err(EngineError::MatchNotReady(match_id));
        }

        let new_winner = match (&node.player_one, &node.player_two) {
            (Some(one), _) if sets_one > sets_two => one.player_id,
            (_, Some(two)) => two.player_id,
            _ => return Err(EngineError::MatchNotReady(match_id)),
        };
        let winner_changed = node.is_finished
            && node.winner().map(|w| w.player_id) != Some(new_winner);
        if winner_changed {
            ensure_no_downstream_result(fixture, pyramid_index, position)?;
        }

        (position, node.level, pyramid.pyramid_type)
    };

    let mut outcome = DeciderOutcome {
        match_id,
        ..DeciderOutcome::default()
    };

    fixture.pyramids[pyramid_index].nodes[position].set_result(sets_one, sets_two);
    debug!(match_id, level, ?pyramid_type, sets_one, sets_two, "decider result recorded");

    if level == 0 {
        outcome.decided_ranks = rank_root(fixture, pyramid_index);
    } else {
        outcome.parent_ready = propagate_winners(fixture, pyramid_index, position);
        outcome.spawned = spawn_loser_pyramid(fixture, pyramid_index, level)?;
    }

    outcome.ranking_complete = fixture.is_ranking_complete();
    if outcome.ranking_complete {
        info!(fixture_id = fixture.fixture_id, "every rank decided");
    }
    Ok(outcome)
}

/// Fails when the parent match or the loser's spawned match was already played.
fn ensure_no_downstream_result(
    fixture: &SeasonFixture,
    pyramid_index: usize,
    position: usize,
) -> Result<(), EngineError> {
    let pyramid = &fixture.pyramids[pyramid_index];
    let node = &pyramid.nodes[position];

    if let Some(parent) = pyramid.parent_of(node.match_id) {
        if parent.is_finished {
            return Err(EngineError::DownstreamAlreadyPlayed(node.match_id));
        }
    }

    let Some(spawned_type) = pyramid.pyramid_type.spawned_from(node.level) else {
        return Ok(());
    };
    let Some(spawned) = fixture.pyramid(spawned_type) else {
        return Ok(());
    };

    let slot = pyramid
        .positions_on_level(node.level)
        .iter()
        .position(|&p| p == position);
    let leaf = slot.and_then(|k| spawned.leaf_positions().get(k / 2).copied());
    if let Some(leaf) = leaf.and_then(|i| spawned.node(i)) {
        if leaf.is_finished {
            return Err(EngineError::DownstreamAlreadyPlayed(node.match_id));
        }
    }
    Ok(())
}

/// Writes both final ranks of a finished root match.
fn rank_root(fixture: &mut SeasonFixture, pyramid_index: usize) -> Vec<u32> {
    let pyramid = &fixture.pyramids[pyramid_index];
    let Some(root) = pyramid.root() else {
        return Vec::new();
    };
    let (Some(winner), Some(loser)) = (root.winner().cloned(), root.loser().cloned()) else {
        return Vec::new();
    };

    let pyramid_type = pyramid.pyramid_type;
    let total = fixture.players.len() as u32;
    let (winner_score, loser_score) = decider_scores(pyramid_type, fixture.quality_average, total);
    let best = pyramid_type.best_rank();

    fixture.upsert_rank(rank_entry(&winner, best, winner_score));
    fixture.upsert_rank(rank_entry(&loser, best + 1, loser_score));

    info!(
        ?pyramid_type,
        winner = winner.player_id,
        loser = loser.player_id,
        "ranks {} and {} decided",
        best,
        best + 1
    );
    vec![best, best + 1]
}

fn rank_entry(stats: &PlayerMatchStats, rank: u32, score: f64) -> FixturePlayerRank {
    FixturePlayerRank {
        player_id: stats.player_id,
        player_name: stats.player_name.clone(),
        rank,
        score,
    }
}

/// Once both children are played, seats their winners in the parent match.
/// Returns the parent's id when it became (or stays) playable.
fn propagate_winners(
    fixture: &mut SeasonFixture,
    pyramid_index: usize,
    position: usize,
) -> Option<MatchId> {
    let pyramid = &mut fixture.pyramids[pyramid_index];
    let match_id = pyramid.nodes.get(position)?.match_id;

    let sibling = pyramid.sibling_of(match_id)?;
    if !sibling.is_finished {
        return None;
    }

    let parent_position = pyramid.parent_position_of(match_id)?;
    let left = fresh(pyramid.node(left_child(parent_position))?.winner()?);
    let right = fresh(pyramid.node(right_child(parent_position))?.winner()?);

    let parent = pyramid.node_mut(parent_position)?;
    if parent.is_finished {
        return None;
    }
    parent.player_one = Some(left);
    parent.player_two = Some(right);

    debug!(parent = parent.match_id, "winners moved up");
    Some(parent.match_id)
}

/// When every match on `level` is played, pairs the losers of that level in
/// heap order and builds (or refreshes) the pyramid for the ranks they play for.
fn spawn_loser_pyramid(
    fixture: &mut SeasonFixture,
    pyramid_index: usize,
    level: u32,
) -> Result<Option<PyramidType>, EngineError> {
    let pyramid = &fixture.pyramids[pyramid_index];
    if !pyramid.is_level_finished(level) {
        return Ok(None);
    }
    let Some(spawned_type) = pyramid.pyramid_type.spawned_from(level) else {
        return Ok(None);
    };

    let losers: Vec<PlayerMatchStats> = pyramid
        .find_matches_on_level(level)
        .into_iter()
        .filter_map(|n| n.loser())
        .map(fresh)
        .collect();
    let pairs: Vec<(PlayerMatchStats, PlayerMatchStats)> = losers
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();

    match fixture.pyramids.iter().position(|p| p.pyramid_type == spawned_type) {
        Some(existing) => refresh_leaves(fixture, existing, pairs),
        None => {
            push_pyramid(fixture, spawned_type, pairs)?;
            info!(?spawned_type, from_level = level, "loser pyramid spawned");
        }
    }
    Ok(Some(spawned_type))
}

/// Re-seats leaves whose players changed because an earlier result was corrected.
fn refresh_leaves(
    fixture: &mut SeasonFixture,
    pyramid_index: usize,
    pairs: Vec<(PlayerMatchStats, PlayerMatchStats)>,
) {
    let pyramid = &mut fixture.pyramids[pyramid_index];
    let leaves = pyramid.leaf_positions();

    for (position, (one, two)) in leaves.into_iter().zip(pairs) {
        let Some(leaf) = pyramid.node_mut(position) else {
            continue;
        };
        if same_player(&leaf.player_one, one.player_id) && same_player(&leaf.player_two, two.player_id) {
            continue;
        }
        leaf.player_one = Some(one);
        leaf.player_two = Some(two);
        leaf.is_finished = false;
        debug!(leaf = leaf.match_id, "spawned match re-seated");
    }
}

fn same_player(slot: &Option<PlayerMatchStats>, player_id: PlayerId) -> bool {
    slot.as_ref().map(|s| s.player_id) == Some(player_id)
}

/// Copy of a player's side without the previous match's sets.
fn fresh(stats: &PlayerMatchStats) -> PlayerMatchStats {
    PlayerMatchStats {
        sets_won: None,
        ..stats.clone()
    }
}
