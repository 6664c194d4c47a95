use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, ErrorKind};

/// Errors as seen by clients. Transport-agnostic; a handler maps each
/// variant to its own status code.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Fixture, match or player does not exist.
    NotFound(String),

    /// The fixture is not in a state that allows the command.
    InvalidState(String),

    /// Group or player layout the league cannot run.
    UnsupportedConfiguration(String),

    /// Rejected match score (tie or impossible sets).
    InvalidResult(String),

    /// Broken league configuration.
    InvalidConfig(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::InvalidState => ApiError::InvalidState(message),
            ErrorKind::UnsupportedConfiguration => ApiError::UnsupportedConfiguration(message),
            ErrorKind::InvalidResult => ApiError::InvalidResult(message),
            ErrorKind::InvalidConfig => ApiError::InvalidConfig(message),
        }
    }
}
