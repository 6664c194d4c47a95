use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    FixtureId, Player, PlayerId, SeasonFixture, SeasonId, SeasonPlayer,
};

/// Fixture aggregates, one load and one save per command.
pub trait FixtureStore {
    fn load_fixture(&self, season_id: SeasonId, fixture_id: FixtureId) -> Option<SeasonFixture>;

    fn save_fixture(&mut self, fixture: &SeasonFixture);
}

/// Read access to player records.
pub trait PlayerStore {
    fn load_player(&self, player_id: PlayerId) -> Option<Player>;
}

/// Season standings.
pub trait SeasonStore {
    /// Season players ordered by rank (unranked ones last).
    fn list_season_players(&self, season_id: SeasonId) -> Vec<SeasonPlayer>;

    fn save_season_player(&mut self, season_player: &SeasonPlayer);
}

/// Everything a `LeagueService` needs from storage.
pub trait LeagueStorage: FixtureStore + PlayerStore + SeasonStore {}

impl<T: FixtureStore + PlayerStore + SeasonStore> LeagueStorage for T {}

/// Simple in-memory implementation for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryLeagueStorage {
    fixtures: HashMap<(SeasonId, FixtureId), SeasonFixture>,
    players: HashMap<PlayerId, Player>,
    season_players: HashMap<(SeasonId, PlayerId), SeasonPlayer>,
}

/// Serializable dump of an `InMemoryLeagueStorage`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSnapshot {
    pub fixtures: Vec<SeasonFixture>,
    pub players: Vec<Player>,
    pub season_players: Vec<SeasonPlayer>,
}

impl InMemoryLeagueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_player(&mut self, player: Player) {
        self.players.insert(player.player_id, player);
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }

    /// Entries sorted by key so that equal storages dump equally.
    pub fn snapshot(&self) -> StorageSnapshot {
        let mut fixtures: Vec<SeasonFixture> = self.fixtures.values().cloned().collect();
        fixtures.sort_by_key(|f| (f.season_id, f.fixture_id));

        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by_key(|p| p.player_id);

        let mut season_players: Vec<SeasonPlayer> = self.season_players.values().cloned().collect();
        season_players.sort_by_key(|sp| (sp.season_id, sp.player_id));

        StorageSnapshot {
            fixtures,
            players,
            season_players,
        }
    }

    pub fn from_snapshot(snapshot: StorageSnapshot) -> Self {
        let mut storage = Self::new();
        for fixture in snapshot.fixtures {
            storage
                .fixtures
                .insert((fixture.season_id, fixture.fixture_id), fixture);
        }
        for player in snapshot.players {
            storage.insert_player(player);
        }
        for sp in snapshot.season_players {
            storage.season_players.insert((sp.season_id, sp.player_id), sp);
        }
        storage
    }
}

impl FixtureStore for InMemoryLeagueStorage {
    fn load_fixture(&self, season_id: SeasonId, fixture_id: FixtureId) -> Option<SeasonFixture> {
        self.fixtures.get(&(season_id, fixture_id)).cloned()
    }

    fn save_fixture(&mut self, fixture: &SeasonFixture) {
        self.fixtures
            .insert((fixture.season_id, fixture.fixture_id), fixture.clone());
    }
}

impl PlayerStore for InMemoryLeagueStorage {
    fn load_player(&self, player_id: PlayerId) -> Option<Player> {
        self.players.get(&player_id).cloned()
    }
}

impl SeasonStore for InMemoryLeagueStorage {
    fn list_season_players(&self, season_id: SeasonId) -> Vec<SeasonPlayer> {
        let mut out: Vec<SeasonPlayer> = self
            .season_players
            .values()
            .filter(|sp| sp.season_id == season_id)
            .cloned()
            .collect();
        out.sort_by_key(|sp| (sp.rank == 0, sp.rank, sp.player_id));
        out
    }

    fn save_season_player(&mut self, season_player: &SeasonPlayer) {
        self.season_players.insert(
            (season_player.season_id, season_player.player_id),
            season_player.clone(),
        );
    }
}
