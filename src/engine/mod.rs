//! League progression engine: group ranking, decider pyramids, scoring.
//!
//! Every operation takes a loaded `SeasonFixture`, mutates it in memory and
//! leaves persistence to the caller. Main entry points:
//!   - `assign_groups` – seed groups and round-robin matches
//!   - `end_group_stage` – rank groups, build the first pyramids
//!   - `report_decider_result` – advance one decider match

pub mod deciders;
pub mod errors;
pub mod group_assignment;
pub mod group_stage;
pub mod lifecycle;
pub mod progression;
pub mod scoring;
pub mod validation;

pub use deciders::end_group_stage;
pub use errors::{EngineError, ErrorKind};
pub use group_assignment::{assign_groups, group_count_for, snake_seed};
pub use group_stage::resolve_group_ranks;
pub use lifecycle::{end_fixture, report_group_match, start_fixture};
pub use progression::{report_decider_result, DeciderOutcome};
pub use scoring::{decider_scores, score_for_rank};

/// Source of randomness for the engine.
/// The only consumer is the perfect-tie draw of the group stage.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
