// src/bin/league_dev_cli.rs
//
// Plays one complete fixture with simulated results and prints the final
// ranking as JSON.
//
//   league_dev_cli [players] [seed] [config.toml]
//
// RUST_LOG controls the log output (default: info).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use table_tennis_league::api::{
    AssignGroupsCommand, Command, CommandResponse, FixtureRef, MatchResultCommand, Query,
    QueryResponse,
};
use table_tennis_league::domain::{
    FixturePlayer, FixtureState, LeagueConfig, Level, Player, PlayerId, SeasonFixture,
};
use table_tennis_league::infra::{
    FixtureStore, IdGenerator, InMemoryLeagueStorage, PlayerStore, RngSeed,
};
use table_tennis_league::{ApiError, LeagueService};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let player_count: usize = args.first().and_then(|s| s.parse().ok()).unwrap_or(16);
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2024);

    let config = match args.get(2) {
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| LeagueConfig::from_toml_str(&raw).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(err) => {
                eprintln!("league_dev_cli: cannot load {path}: {err}");
                std::process::exit(2);
            }
        },
        None => LeagueConfig::default(),
    };

    if let Err(err) = run(player_count, seed, config) {
        eprintln!("league_dev_cli: {err:?}");
        std::process::exit(1);
    }
}

fn run(player_count: usize, seed: u64, config: LeagueConfig) -> Result<(), ApiError> {
    let ids = IdGenerator::new();
    let season_id = ids.next_season_id();
    let fixture_id = ids.next_fixture_id();
    let target = FixtureRef {
        season_id,
        fixture_id,
    };

    // Draws for the simulated scores; tie draws get their own derived seed.
    let mut results_rng = StdRng::seed_from_u64(seed);
    let tie_rng = RngSeed::from_u64(seed).derive(season_id, fixture_id).to_rng();

    let mut storage = InMemoryLeagueStorage::new();
    let mut players = Vec::with_capacity(player_count);
    for n in 0..player_count {
        let player_id = ids.next_player_id();
        let quality = 80.0 - n as f64 * 1.5;
        let player = Player::new(player_id, format!("Player {:02}", n + 1), Level::Intermediate)
            .with_quality(quality);
        players.push(FixturePlayer::new(player_id, player.name.clone(), player.quality));
        storage.insert_player(player);
    }
    storage.save_fixture(&SeasonFixture::new(season_id, fixture_id).with_number(1));

    let mut service = LeagueService::new(storage, tie_rng, config)
        .map_err(ApiError::from)?;

    service.execute(Command::StartFixture(target))?;
    let response = service.execute(Command::AssignGroups(AssignGroupsCommand {
        season_id,
        fixture_id,
        players,
    }))?;

    if let CommandResponse::Fixture(view) = response {
        let sets_to_win = service.config().sets_to_win;
        for group_match in view.group_matches {
            let (one, two) = simulate(
                &mut results_rng,
                service.storage(),
                group_match.player_one.player_id,
                group_match.player_two.player_id,
                sets_to_win,
            );
            service.execute(Command::ReportGroupMatch(result(target, group_match.match_id, one, two)))?;
        }
    }

    service.execute(Command::EndGroupStage(target))?;

    loop {
        let QueryResponse::Fixture(view) = service.query(Query::GetFixture {
            season_id,
            fixture_id,
        })?
        else {
            break;
        };
        if view.state == FixtureState::Finished || view.ranking.len() == view.players.len() {
            break;
        }

        let playable: Vec<(u64, PlayerId, PlayerId)> = view
            .pyramids
            .iter()
            .flat_map(|p| p.matches.iter())
            .filter(|m| !m.is_finished)
            .filter_map(|m| match (&m.player_one, &m.player_two) {
                (Some(one), Some(two)) => Some((m.match_id, one.player_id, two.player_id)),
                _ => None,
            })
            .collect();
        if playable.is_empty() {
            break;
        }

        let sets_to_win = service.config().sets_to_win;
        for (match_id, p1, p2) in playable {
            let (one, two) = simulate(&mut results_rng, service.storage(), p1, p2, sets_to_win);
            service.execute(Command::ReportDeciderMatch(result(target, match_id, one, two)))?;
        }
    }

    service.execute(Command::EndFixture(target))?;

    if let QueryResponse::Ranking(ranking) = service.query(Query::GetRanking {
        season_id,
        fixture_id,
    })? {
        info!(players = ranking.len(), "fixture finished");
        match serde_json::to_string_pretty(&ranking) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("league_dev_cli: cannot encode ranking: {err}"),
        }
    }

    Ok(())
}

fn result(target: FixtureRef, match_id: u64, one: u8, two: u8) -> MatchResultCommand {
    MatchResultCommand {
        season_id: target.season_id,
        fixture_id: target.fixture_id,
        match_id,
        sets_won_by_player_one: one,
        sets_won_by_player_two: two,
    }
}

/// Better quality wins more often; the loser takes 0..sets_to_win sets.
fn simulate(
    rng: &mut StdRng,
    players: &impl PlayerStore,
    one: PlayerId,
    two: PlayerId,
    sets_to_win: u8,
) -> (u8, u8) {
    let quality = |id| players.load_player(id).and_then(|p| p.quality).unwrap_or(70.0);
    let edge = (quality(one) - quality(two)) / 40.0;
    let one_wins = rng.gen_bool((0.5 + edge).clamp(0.1, 0.9));
    let loser_sets = rng.gen_range(0..sets_to_win);

    if one_wins {
        (sets_to_win, loser_sets)
    } else {
        (loser_sets, sets_to_win)
    }
}
