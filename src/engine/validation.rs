use crate::domain::{FixtureState, LeagueConfig, SeasonFixture};
use crate::engine::errors::EngineError;

/// Checks a reported score before anything is mutated.
pub fn validate_result(config: &LeagueConfig, sets_one: u8, sets_two: u8) -> Result<(), EngineError> {
    if sets_one == sets_two {
        return Err(EngineError::TieResult(sets_one));
    }
    if !config.is_valid_score(sets_one, sets_two) {
        return Err(EngineError::InvalidScore(sets_one, sets_two));
    }
    Ok(())
}

pub fn require_state(
    fixture: &SeasonFixture,
    allowed: &[FixtureState],
    expected: &'static str,
) -> Result<(), EngineError> {
    if allowed.contains(&fixture.state) {
        Ok(())
    } else {
        Err(EngineError::state(expected, fixture.state))
    }
}
