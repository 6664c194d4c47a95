//! League data model: players, groups, pyramids, fixtures, season records.

pub mod config;
pub mod fixture;
pub mod group;
pub mod player;
pub mod pyramid;
pub mod season;

pub type PlayerId = u64;
pub type SeasonId = u64;
pub type FixtureId = u64;
pub type MatchId = u64;

pub use config::*;
pub use fixture::*;
pub use group::*;
pub use player::*;
pub use pyramid::*;
pub use season::*;
