//! Infrastructure around the engine:
//! - id generation;
//! - RNG implementations;
//! - storage traits with an in-memory backend.

pub mod ids;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use ids::*;
pub use persistence::*;
pub use rng::*;
pub use rng_seed::RngSeed;
