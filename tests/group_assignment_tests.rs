//! Group assignment tests: group counts, snake seeding, round-robin schedule.

use std::collections::HashSet;

use table_tennis_league::domain::{FixturePlayer, FixtureState, Group, LeagueConfig, SeasonFixture};
use table_tennis_league::engine::{
    assign_groups, end_group_stage, group_count_for, report_group_match, snake_seed,
    start_fixture, EngineError, ErrorKind,
};
use table_tennis_league::infra::DeterministicRng;

//
// ---------- helpers ----------
//

fn ranked(n: u64) -> Vec<FixturePlayer> {
    (1..=n)
        .map(|id| FixturePlayer::new(id, format!("P{id}"), Some(80.0 - id as f64)))
        .collect()
}

fn selecting() -> SeasonFixture {
    let mut f = SeasonFixture::new(1, 1);
    start_fixture(&mut f).unwrap();
    f
}

fn ids(players: &[FixturePlayer]) -> Vec<u64> {
    players.iter().map(|p| p.player_id).collect()
}

//
// TEST 1 — number of groups
//
#[test]
fn group_count_by_player_count() {
    let config = LeagueConfig::default();

    for n in 1..=6 {
        assert_eq!(group_count_for(n, &config), 1, "n={n}");
    }
    for n in [7, 8, 9, 10, 11, 13, 14, 15] {
        assert_eq!(group_count_for(n, &config), 2, "n={n}");
    }
    assert_eq!(group_count_for(12, &config), 4);
    assert_eq!(group_count_for(16, &config), 4);
}

#[test]
fn four_groups_can_be_disabled() {
    let config = LeagueConfig {
        four_groups_enabled: false,
        ..LeagueConfig::default()
    };
    assert_eq!(group_count_for(16, &config), 2);
}

//
// TEST 2 — snake seeding
//
#[test]
fn snake_seed_four_groups() {
    let groups = snake_seed(&ranked(16), 4);

    assert_eq!(ids(&groups[0]), vec![1, 8, 9, 16]);
    assert_eq!(ids(&groups[1]), vec![2, 7, 10, 15]);
    assert_eq!(ids(&groups[2]), vec![3, 6, 11, 14]);
    assert_eq!(ids(&groups[3]), vec![4, 5, 12, 13]);
}

#[test]
fn snake_seed_two_uneven_groups() {
    let groups = snake_seed(&ranked(9), 2);

    assert_eq!(ids(&groups[0]), vec![1, 4, 5, 8, 9]);
    assert_eq!(ids(&groups[1]), vec![2, 3, 6, 7]);
}

//
// TEST 3 — round-robin schedule
//
#[test]
fn sixteen_players_get_four_round_robins() {
    let mut f = selecting();
    assign_groups(&mut f, ranked(16), &LeagueConfig::default()).unwrap();

    assert_eq!(f.state, FixtureState::GroupsStage);
    assert_eq!(f.group_matches.len(), 24);
    assert_eq!(f.groups(), vec![Group::A, Group::B, Group::C, Group::D]);

    let match_ids: HashSet<u64> = f.group_matches.iter().map(|m| m.match_id).collect();
    assert_eq!(match_ids.len(), 24);

    for group in Group::ALL {
        let members = f.group_player_ids(group);
        assert_eq!(members.len(), 4);
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let count = f
                    .group_matches
                    .iter()
                    .filter(|m| m.group == group && m.is_direct_match(*a, *b))
                    .count();
                assert_eq!(count, 1, "{a} vs {b} in {group:?}");
            }
        }
    }
    assert!(f.group_matches.iter().all(|m| !m.is_finished()));
}

#[test]
fn small_fixture_is_one_group() {
    let mut f = selecting();
    assign_groups(&mut f, ranked(6), &LeagueConfig::default()).unwrap();

    assert_eq!(f.group_matches.len(), 15);
    assert_eq!(f.groups(), vec![Group::A]);
}

#[test]
fn nine_players_split_five_four() {
    let mut f = selecting();
    assign_groups(&mut f, ranked(9), &LeagueConfig::default()).unwrap();

    assert_eq!(f.group_player_ids(Group::A).len(), 5);
    assert_eq!(f.group_player_ids(Group::B).len(), 4);
    assert_eq!(f.group_matches.len(), 10 + 6);
    assert!((f.quality_average - 75.0).abs() < 1e-9);
}

#[test]
fn group_ranks_are_cleared() {
    let mut players = ranked(4);
    players[0].group_rank = Some(3);

    let mut f = selecting();
    assign_groups(&mut f, players, &LeagueConfig::default()).unwrap();

    assert!(f.players.iter().all(|p| p.group_rank.is_none()));
}

//
// TEST 4 — rejected assignments
//
#[test]
fn rejects_duplicates_and_oversized_fields() {
    let config = LeagueConfig::default();

    let mut players = ranked(5);
    players.push(players[2].clone());
    let mut f = selecting();
    let err = assign_groups(&mut f, players, &config).unwrap_err();
    assert!(matches!(err, EngineError::DuplicatePlayer(3)));
    assert_eq!(err.kind(), ErrorKind::UnsupportedConfiguration);
    assert_eq!(f.state, FixtureState::GroupsSelection);
    assert!(f.group_matches.is_empty());

    let err = assign_groups(&mut f, ranked(17), &config).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedPlayerCount(17)));

    let err = assign_groups(&mut f, Vec::new(), &config).unwrap_err();
    assert!(matches!(err, EngineError::UnsupportedPlayerCount(0)));
}

#[test]
fn requires_groups_selection() {
    let mut f = SeasonFixture::new(1, 1);

    let err = assign_groups(&mut f, ranked(4), &LeagueConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(f.state, FixtureState::Upcoming);
}

//
// TEST 5 — a group holding a single player
//
#[test]
fn players_remember_their_group() {
    let mut f = selecting();
    assign_groups(&mut f, ranked(9), &LeagueConfig::default()).unwrap();

    for id in [1, 4, 5, 8, 9] {
        assert_eq!(f.player(id).unwrap().group, Some(Group::A), "player {id}");
    }
    for id in [2, 3, 6, 7] {
        assert_eq!(f.player(id).unwrap().group, Some(Group::B), "player {id}");
    }
}

#[test]
fn lone_player_group_is_still_ranked() {
    // Not reachable through a validated config; assign_groups takes it as is.
    let config = LeagueConfig {
        single_group_max_players: 2,
        ..LeagueConfig::default()
    };
    let mut f = selecting();
    assign_groups(&mut f, ranked(3), &config).unwrap();

    // Snake order: A = [1], B = [2, 3].
    assert_eq!(f.groups(), vec![Group::A, Group::B]);
    assert_eq!(f.group_player_ids(Group::A), vec![1]);
    assert_eq!(f.group_matches.len(), 1);

    let id = f.group_matches[0].match_id;
    report_group_match(&mut f, &config, id, 3, 0).unwrap();
    let groups = end_group_stage(&mut f, &mut DeterministicRng::from_u64(1)).unwrap();

    assert_eq!(groups, 2);
    assert_eq!(f.state, FixtureState::DecidersStage);
    assert_eq!(f.player(1).unwrap().group_rank, Some(1));
    assert_eq!(f.pyramids.len(), 1);
    let final_match = f.pyramids[0].root().unwrap();
    assert!(final_match.involves(1, 2));
    assert_eq!(f.ranking.len(), 1);
    assert_eq!(f.rank_of(3).unwrap().rank, 3);
}
