// src/league/service.rs

use tracing::{info, warn};

use crate::api::{
    build_fixture_view, ApiError, AssignGroupsCommand, Command, CommandResponse, FixtureRef,
    MatchResultCommand, Query, QueryResponse,
};
use crate::domain::{LeagueConfig, SeasonFixture};
use crate::engine::{self, EngineError, RandomSource};
use crate::infra::LeagueStorage;

/// Handler layer: load one fixture, apply one engine operation, save it.
///
/// Nothing is written when the operation fails, so a rejected command
/// leaves the stored fixture untouched.
pub struct LeagueService<S, R> {
    storage: S,
    rng: R,
    config: LeagueConfig,
}

impl<S: LeagueStorage, R: RandomSource> LeagueService<S, R> {
    pub fn new(storage: S, rng: R, config: LeagueConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            storage,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn execute(&mut self, command: Command) -> Result<CommandResponse, ApiError> {
        let target = command.fixture_ref();
        self.apply(command).map_err(|err| {
            warn!(
                season_id = target.season_id,
                fixture_id = target.fixture_id,
                error = %err,
                "command rejected"
            );
            ApiError::from(err)
        })
    }

    pub fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        match query {
            Query::GetFixture {
                season_id,
                fixture_id,
            } => {
                let fixture = self.load(FixtureRef {
                    season_id,
                    fixture_id,
                })?;
                Ok(QueryResponse::Fixture(build_fixture_view(&fixture)))
            }
            Query::GetRanking {
                season_id,
                fixture_id,
            } => {
                let fixture = self.load(FixtureRef {
                    season_id,
                    fixture_id,
                })?;
                Ok(QueryResponse::Ranking(build_fixture_view(&fixture).ranking))
            }
            Query::GetSeasonStandings { season_id } => Ok(QueryResponse::SeasonStandings(
                self.storage.list_season_players(season_id),
            )),
        }
    }

    fn load(&self, target: FixtureRef) -> Result<SeasonFixture, EngineError> {
        self.storage
            .load_fixture(target.season_id, target.fixture_id)
            .ok_or(EngineError::FixtureNotFound {
                season_id: target.season_id,
                fixture_id: target.fixture_id,
            })
    }

    fn apply(&mut self, command: Command) -> Result<CommandResponse, EngineError> {
        let mut fixture = self.load(command.fixture_ref())?;

        let response = match command {
            Command::StartFixture(_) => {
                engine::start_fixture(&mut fixture)?;
                CommandResponse::Fixture(build_fixture_view(&fixture))
            }

            Command::AssignGroups(AssignGroupsCommand { players, .. }) => {
                engine::assign_groups(&mut fixture, players, &self.config)?;
                CommandResponse::Fixture(build_fixture_view(&fixture))
            }

            Command::ReportGroupMatch(MatchResultCommand {
                match_id,
                sets_won_by_player_one,
                sets_won_by_player_two,
                ..
            }) => {
                let group_match = engine::report_group_match(
                    &mut fixture,
                    &self.config,
                    match_id,
                    sets_won_by_player_one,
                    sets_won_by_player_two,
                )?;
                CommandResponse::GroupMatch(group_match)
            }

            Command::EndGroupStage(_) => {
                engine::end_group_stage(&mut fixture, &mut self.rng)?;
                CommandResponse::Fixture(build_fixture_view(&fixture))
            }

            Command::ReportDeciderMatch(MatchResultCommand {
                match_id,
                sets_won_by_player_one,
                sets_won_by_player_two,
                ..
            }) => {
                let outcome = engine::report_decider_result(
                    &mut fixture,
                    &self.config,
                    match_id,
                    sets_won_by_player_one,
                    sets_won_by_player_two,
                )?;
                CommandResponse::Decider {
                    outcome,
                    fixture: build_fixture_view(&fixture),
                }
            }

            Command::EndFixture(_) => {
                let season_players = self.storage.list_season_players(fixture.season_id);
                let storage = &self.storage;
                let standings = engine::end_fixture(&mut fixture, season_players, |player_id| {
                    storage.load_player(player_id).map(|p| p.level)
                })?;
                for season_player in &standings {
                    self.storage.save_season_player(season_player);
                }
                info!(
                    season_id = fixture.season_id,
                    standings = standings.len(),
                    "season standings updated"
                );
                CommandResponse::SeasonStandings(standings)
            }
        };

        self.storage.save_fixture(&fixture);
        Ok(response)
    }
}
