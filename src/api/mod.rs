//! External API of the league engine.
//!
//! - commands (commands.rs): everything that changes a fixture;
//! - queries (queries.rs): read only;
//! - DTOs (dto.rs): flattened views for clients;
//! - errors (errors.rs): what the client sees.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
