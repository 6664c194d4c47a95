use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{FixtureId, PlayerId, SeasonId};

/// Monotonic id counters for local runs and tests.
///
/// Match ids are not handed out here: they come from the fixture's own
/// counter so that they stay unique inside the stored aggregate.
#[derive(Debug)]
pub struct IdGenerator {
    season_counter: AtomicU64,
    fixture_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            season_counter: AtomicU64::new(1),
            fixture_counter: AtomicU64::new(1),
            player_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_season_id(&self) -> SeasonId {
        self.season_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_fixture_id(&self) -> FixtureId {
        self.fixture_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
