//! RngSeed: 32-byte seed for reproducible tie draws.
//!
//! Seeds are derived per fixture so that replaying a fixture with the same
//! base seed redraws every perfect tie the same way:
//!     new = H(domain || old || season_id || fixture_id)

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FixtureId, SeasonId};
use crate::infra::rng::DeterministicRng;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Little-endian `x` in the first eight bytes, zeros after.
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed for the tie draws of one fixture.
    pub fn derive(&self, season_id: SeasonId, fixture_id: FixtureId) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"TT_LEAGUE_TIE_DRAW_V1");
        hasher.update(self.bytes);
        hasher.update(season_id.to_le_bytes());
        hasher.update(fixture_id.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
