//! Season standings tests: best-four totals, re-ranking, closing fixtures.

use table_tennis_league::domain::{
    rank_season_players, FixturePlayer, FixturePlayerRank, FixtureState, Level, SeasonFixture,
    SeasonPlayer,
};
use table_tennis_league::engine::{end_fixture, EngineError, ErrorKind};

//
// ---------- helpers ----------
//

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn season_player(player_id: u64, first_score: f64) -> SeasonPlayer {
    SeasonPlayer::new(1, player_id, format!("P{player_id}"), Level::Advanced, 70.0, first_score)
}

/// Fully ranked fixture: player `i` finished at rank `i` with `scores[i - 1]`.
fn ranked_fixture(scores: &[f64], qualities: &[Option<f64>]) -> SeasonFixture {
    let mut f = SeasonFixture::new(1, 4);
    f.players = qualities
        .iter()
        .enumerate()
        .map(|(i, q)| FixturePlayer::new(i as u64 + 1, format!("P{}", i + 1), *q))
        .collect();
    f.ranking = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| FixturePlayerRank {
            player_id: i as u64 + 1,
            player_name: format!("P{}", i + 1),
            rank: i as u32 + 1,
            score,
        })
        .collect();
    f.state = FixtureState::DecidersStage;
    f
}

//
// TEST 1 — best four scores
//
#[test]
fn record_score_keeps_best_four() {
    let mut sp = season_player(1, 70.0);
    assert_eq!(sp.scores, [70.0, 0.0, 0.0, 0.0]);
    assert!(approx(sp.top4, 70.0));

    for score in [72.0, 65.0, 80.0, 60.0, 75.0] {
        sp.record_score(score);
    }

    assert_eq!(sp.scores, [80.0, 75.0, 72.0, 70.0]);
    assert!(approx(sp.top4, 297.0));
    assert_eq!(sp.rank, 0);
}

#[test]
fn negative_first_score_counts() {
    let mut sp = season_player(1, -2.0);
    assert_eq!(sp.scores[0], -2.0);
    assert!(approx(sp.top4, -2.0));

    sp.record_score(5.0);
    assert_eq!(sp.scores[0], 5.0);
    assert!(approx(sp.top4, 3.0));
}

#[test]
fn rank_season_players_by_total() {
    let mut players = vec![season_player(1, 60.0), season_player(2, 75.0), season_player(3, 70.0)];
    players[0].record_score(40.0);

    rank_season_players(&mut players);

    let order: Vec<(u64, u32)> = players.iter().map(|sp| (sp.player_id, sp.rank)).collect();
    assert_eq!(order, vec![(1, 1), (2, 2), (3, 3)]);
}

//
// TEST 2 — closing a fixture
//
#[test]
fn end_fixture_adds_new_and_updates_existing() {
    let mut f = ranked_fixture(&[78.0, 76.0, 74.0], &[Some(72.0), None, Some(68.0)]);
    let existing = vec![season_player(3, 77.0)];

    let standings = end_fixture(&mut f, existing, |_| Some(Level::Beginner)).unwrap();

    assert_eq!(f.state, FixtureState::Finished);
    assert!(f.season_recorded);
    assert_eq!(standings.len(), 3);

    // Player 3 now holds 77 + 74.
    assert_eq!(standings[0].player_id, 3);
    assert!(approx(standings[0].top4, 151.0));
    assert_eq!(standings[0].level, Level::Advanced);

    let p1 = standings.iter().find(|sp| sp.player_id == 1).unwrap();
    assert_eq!(p1.rank, 2);
    assert!(approx(p1.quality, 72.0));
    assert_eq!(p1.level, Level::Beginner);

    // Without a quality the first score stands in.
    let p2 = standings.iter().find(|sp| sp.player_id == 2).unwrap();
    assert_eq!(p2.rank, 3);
    assert!(approx(p2.quality, 76.0));
}

#[test]
fn end_fixture_accepts_single_group_finish() {
    let mut f = ranked_fixture(&[71.0], &[None]);
    f.state = FixtureState::Finished;

    let standings = end_fixture(&mut f, Vec::new(), |_| Some(Level::Open)).unwrap();

    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].rank, 1);
}

//
// TEST 3 — refusals
//
#[test]
fn end_fixture_only_counts_once() {
    let mut f = ranked_fixture(&[78.0, 76.0], &[None, None]);
    end_fixture(&mut f, Vec::new(), |_| Some(Level::Open)).unwrap();

    let err = end_fixture(&mut f, Vec::new(), |_| Some(Level::Open)).unwrap_err();

    assert!(matches!(err, EngineError::AlreadyRecorded(4)));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn end_fixture_needs_complete_ranking() {
    let mut f = ranked_fixture(&[78.0], &[None, None]);

    let err = end_fixture(&mut f, Vec::new(), |_| Some(Level::Open)).unwrap_err();

    assert!(matches!(err, EngineError::RankingIncomplete { ranked: 1, players: 2 }));
    assert_eq!(f.state, FixtureState::DecidersStage);
    assert!(!f.season_recorded);
}

#[test]
fn end_fixture_needs_deciders_or_finished() {
    let mut f = ranked_fixture(&[78.0, 76.0], &[None, None]);
    f.state = FixtureState::GroupsStage;

    let err = end_fixture(&mut f, Vec::new(), |_| Some(Level::Open)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn end_fixture_needs_player_level() {
    let mut f = ranked_fixture(&[78.0, 76.0], &[None, None]);

    let err = end_fixture(&mut f, Vec::new(), |id| (id == 1).then_some(Level::Open)).unwrap_err();

    assert!(matches!(err, EngineError::PlayerNotFound(2)));
    assert!(!f.season_recorded);
}

#[test]
fn end_fixture_without_qualities_keeps_negative_scores() {
    // Ranks 9 and 10 of a ten player field where nobody has a quality.
    let mut f = ranked_fixture(&[-3.0, -4.0], &[None, None]);

    let standings = end_fixture(&mut f, Vec::new(), |_| Some(Level::Open)).unwrap();

    let last = standings.iter().find(|sp| sp.player_id == 2).unwrap();
    assert!(approx(last.top4, -4.0));
    assert_eq!(last.rank, 2);
}
