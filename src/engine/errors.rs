use thiserror::Error;

use crate::domain::{
    BracketError, ConfigError, FixtureId, FixtureState, MatchId, PlayerId, SeasonId,
};

/// Broad failure classes, used by the API layer to pick a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    UnsupportedConfiguration,
    InvalidResult,
    InvalidConfig,
}

/// Errors of the progression engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("fixture {fixture_id} of season {season_id} not found")]
    FixtureNotFound {
        season_id: SeasonId,
        fixture_id: FixtureId,
    },

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("no direct match between players {a} and {b}")]
    DirectMatchNotFound { a: PlayerId, b: PlayerId },

    #[error("fixture is {found:?}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        found: FixtureState,
    },

    #[error("{remaining} group matches are still unfinished")]
    UnfinishedGroupMatches { remaining: usize },

    #[error("ranking holds {ranked} of {players} players")]
    RankingIncomplete { ranked: usize, players: usize },

    #[error("fixture {0} is already counted in the season standings")]
    AlreadyRecorded(FixtureId),

    #[error("match {0} is waiting for its players")]
    MatchNotReady(MatchId),

    #[error("match {0} cannot change winner: a dependent match was already played")]
    DownstreamAlreadyPlayed(MatchId),

    #[error("unsupported number of groups: {0}")]
    UnsupportedGroupCount(usize),

    #[error("unsupported group sizes: {0:?}")]
    UnsupportedGroupSizes(Vec<usize>),

    #[error("unsupported number of players: {0}")]
    UnsupportedPlayerCount(usize),

    #[error("only {grouped} of {players} players belong to a group")]
    UngroupedPlayers { grouped: usize, players: usize },

    #[error("player {0} listed twice")]
    DuplicatePlayer(PlayerId),

    #[error("a match cannot end in a tie ({0}-{0})")]
    TieResult(u8),

    #[error("invalid score {0}-{1}")]
    InvalidScore(u8, u8),

    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::FixtureNotFound { .. }
            | EngineError::MatchNotFound(_)
            | EngineError::PlayerNotFound(_)
            | EngineError::DirectMatchNotFound { .. } => ErrorKind::NotFound,

            EngineError::InvalidState { .. }
            | EngineError::UnfinishedGroupMatches { .. }
            | EngineError::RankingIncomplete { .. }
            | EngineError::AlreadyRecorded(_)
            | EngineError::MatchNotReady(_)
            | EngineError::DownstreamAlreadyPlayed(_) => ErrorKind::InvalidState,

            EngineError::UnsupportedGroupCount(_)
            | EngineError::UnsupportedGroupSizes(_)
            | EngineError::UnsupportedPlayerCount(_)
            | EngineError::UngroupedPlayers { .. }
            | EngineError::DuplicatePlayer(_)
            | EngineError::Bracket(_) => ErrorKind::UnsupportedConfiguration,

            EngineError::TieResult(_) | EngineError::InvalidScore(..) => ErrorKind::InvalidResult,

            EngineError::Config(_) => ErrorKind::InvalidConfig,
        }
    }

    pub(crate) fn state(expected: &'static str, found: FixtureState) -> Self {
        EngineError::InvalidState { expected, found }
    }
}
