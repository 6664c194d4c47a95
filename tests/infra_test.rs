// tests/infra_test.rs

use table_tennis_league::{
    domain::{FixtureState, Level, Player, SeasonFixture, SeasonPlayer},
    infra::{
        FixtureStore, IdGenerator, InMemoryLeagueStorage, PlayerStore, SeasonStore,
        StorageSnapshot,
    },
};

//
// ---------- helpers ----------
//

fn season_player(season_id: u64, player_id: u64, score: f64, rank: u32) -> SeasonPlayer {
    let mut sp = SeasonPlayer::new(
        season_id,
        player_id,
        format!("P{player_id}"),
        Level::Open,
        score,
        score,
    );
    sp.rank = rank;
    sp
}

fn populated() -> InMemoryLeagueStorage {
    let mut storage = InMemoryLeagueStorage::new();
    storage.insert_player(Player::new(1, "Ana", Level::Advanced).with_quality(72.5));
    storage.insert_player(Player::new(2, "Ben", Level::Beginner));

    let mut fixture = SeasonFixture::new(1, 1).with_number(3);
    fixture.state = FixtureState::GroupsSelection;
    storage.save_fixture(&fixture);
    storage.save_fixture(&SeasonFixture::new(1, 2));

    storage.save_season_player(&season_player(1, 2, 70.0, 2));
    storage.save_season_player(&season_player(1, 1, 75.0, 1));
    storage.save_season_player(&season_player(1, 3, 10.0, 0));
    storage.save_season_player(&season_player(2, 1, 60.0, 1));
    storage
}

//
// TEST 1 — IdGenerator
//
#[test]
fn id_generator_counts_independently() {
    let ids = IdGenerator::new();

    assert_eq!(ids.next_season_id(), 1);
    assert_eq!(ids.next_season_id(), 2);
    assert_eq!(ids.next_fixture_id(), 1);
    assert_eq!(ids.next_player_id(), 1);
    assert_eq!(ids.next_player_id(), 2);
    assert_eq!(ids.next_fixture_id(), 2);
}

//
// TEST 2 — fixtures and players
//
#[test]
fn fixtures_are_keyed_by_season_and_fixture() {
    let mut storage = populated();

    assert_eq!(storage.fixture_count(), 2);
    let loaded = storage.load_fixture(1, 1).unwrap();
    assert_eq!(loaded.number, Some(3));
    assert_eq!(loaded.state, FixtureState::GroupsSelection);
    assert!(storage.load_fixture(2, 1).is_none());

    let mut changed = loaded.clone();
    changed.state = FixtureState::GroupsStage;
    storage.save_fixture(&changed);
    assert_eq!(storage.fixture_count(), 2);
    assert_eq!(storage.load_fixture(1, 1).unwrap().state, FixtureState::GroupsStage);
}

#[test]
fn players_keep_level_and_quality() {
    let storage = populated();

    let ana = storage.load_player(1).unwrap();
    assert_eq!(ana.level, Level::Advanced);
    assert_eq!(ana.quality, Some(72.5));
    assert_eq!(storage.load_player(2).unwrap().quality, None);
    assert!(storage.load_player(9).is_none());
}

//
// TEST 3 — season standings
//
#[test]
fn season_players_listed_by_rank_unranked_last() {
    let storage = populated();

    let listed: Vec<(u64, u32)> = storage
        .list_season_players(1)
        .iter()
        .map(|sp| (sp.player_id, sp.rank))
        .collect();
    assert_eq!(listed, vec![(1, 1), (2, 2), (3, 0)]);

    assert_eq!(storage.list_season_players(2).len(), 1);
    assert!(storage.list_season_players(7).is_empty());
}

#[test]
fn saving_season_player_replaces_previous_record() {
    let mut storage = populated();

    let mut updated = season_player(1, 3, 10.0, 0);
    updated.record_score(90.0);
    updated.rank = 3;
    storage.save_season_player(&updated);

    let listed = storage.list_season_players(1);
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[2].player_id, 3);
    assert!((listed[2].top4 - 100.0).abs() < 1e-9);
}

//
// TEST 4 — snapshots
//
#[test]
fn snapshot_survives_json_round_trip() {
    let storage = populated();
    let snapshot = storage.snapshot();

    assert_eq!(snapshot.fixtures.len(), 2);
    assert_eq!(snapshot.fixtures[0].fixture_id, 1);
    assert_eq!(snapshot.players.len(), 2);
    assert_eq!(snapshot.season_players.len(), 4);

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: StorageSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);

    let restored = InMemoryLeagueStorage::from_snapshot(decoded);
    assert_eq!(restored.snapshot(), snapshot);
    assert_eq!(restored.load_fixture(1, 1), storage.load_fixture(1, 1));
}

#[test]
fn fixture_without_season_flag_still_decodes() {
    let fixture = SeasonFixture::new(4, 5);
    let mut value = serde_json::to_value(&fixture).unwrap();
    value.as_object_mut().unwrap().remove("season_recorded");

    let decoded: SeasonFixture = serde_json::from_value(value).unwrap();
    assert!(!decoded.season_recorded);
    assert_eq!(decoded, fixture);
}
