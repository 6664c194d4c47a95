// src/league/mod.rs

pub mod service;

pub use service::LeagueService;
