//! Table-tennis league progression engine.
//!
//! A fixture (one tournament day of a season) goes through group play and
//! then a set of decider pyramids until every player holds a final rank.
//! Layers:
//!   - `domain` – league data model and configuration
//!   - `engine` – group ranking, pyramids, scoring, fixture transitions
//!   - `infra` – RNGs, seeds, storage traits
//!   - `api` – commands, queries, DTOs, client errors
//!   - `league` – `LeagueService`, the load / apply / save loop

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod league;

pub use api::{ApiError, Command, CommandResponse, Query, QueryResponse};
pub use domain::LeagueConfig;
pub use engine::{EngineError, RandomSource};
pub use league::LeagueService;
