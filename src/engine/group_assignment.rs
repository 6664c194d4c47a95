//! Splits a ranked player list into groups and schedules the round robin.

use std::collections::HashSet;

use tracing::info;

use crate::domain::{
    FixturePlayer, FixtureState, Group, GroupMatch, LeagueConfig, SeasonFixture,
};
use crate::engine::errors::EngineError;

/// Number of groups for `player_count` players.
pub fn group_count_for(player_count: usize, config: &LeagueConfig) -> usize {
    let n = player_count as u32;
    if n <= config.single_group_max_players {
        1
    } else if config.four_groups_enabled && n >= config.four_groups_min_players && n % 4 == 0 {
        4
    } else {
        2
    }
}

/// Snake seeding: A B C D D C B A A B ...
///
/// Returns one list per group, each in seed order.
pub fn snake_seed(ranked: &[FixturePlayer], group_count: usize) -> Vec<Vec<FixturePlayer>> {
    let mut groups: Vec<Vec<FixturePlayer>> = vec![Vec::new(); group_count];
    if group_count == 0 {
        return groups;
    }

    for (k, player) in ranked.iter().enumerate() {
        let round = k / group_count;
        let offset = k % group_count;
        let slot = if round % 2 == 0 {
            offset
        } else {
            group_count - 1 - offset
        };
        groups[slot].push(player.clone());
    }
    groups
}

/// Seeds the groups of a fixture in `GroupsSelection` and moves it to
/// `GroupsStage`. `ranked` is best player first.
pub fn assign_groups(
    fixture: &mut SeasonFixture,
    ranked: Vec<FixturePlayer>,
    config: &LeagueConfig,
) -> Result<(), EngineError> {
    if fixture.state != FixtureState::GroupsSelection {
        return Err(EngineError::state("GroupsSelection", fixture.state));
    }

    let n = ranked.len();
    if n == 0 || n as u32 > config.max_players {
        return Err(EngineError::UnsupportedPlayerCount(n));
    }

    let mut seen = HashSet::with_capacity(n);
    for player in &ranked {
        if !seen.insert(player.player_id) {
            return Err(EngineError::DuplicatePlayer(player.player_id));
        }
    }

    let group_count = group_count_for(n, config);
    let seeded = snake_seed(&ranked, group_count);

    fixture.group_matches.clear();
    fixture.pyramids.clear();
    fixture.ranking.clear();

    for (index, members) in seeded.iter().enumerate() {
        let group = Group::from_index(index).ok_or(EngineError::UnsupportedGroupCount(group_count))?;
        for (i, one) in members.iter().enumerate() {
            for two in &members[i + 1..] {
                let match_id = fixture.allocate_match_id();
                fixture.group_matches.push(GroupMatch::new(
                    match_id,
                    group,
                    one.to_match_stats(),
                    two.to_match_stats(),
                ));
            }
        }
    }

    let players = ranked
        .into_iter()
        .map(|p| {
            let group = seeded
                .iter()
                .position(|members| members.iter().any(|m| m.player_id == p.player_id))
                .and_then(Group::from_index);
            FixturePlayer {
                group,
                group_rank: None,
                ..p
            }
        })
        .collect();
    fixture.set_players(players);
    fixture.state = FixtureState::GroupsStage;

    info!(
        fixture_id = fixture.fixture_id,
        players = n,
        groups = group_count,
        matches = fixture.group_matches.len(),
        "groups assigned"
    );
    Ok(())
}
