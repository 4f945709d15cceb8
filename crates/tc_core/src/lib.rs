//! # tc_core - Squad building for generated football teams
//!
//! Domain side of the team creator: positions, players, formation presets,
//! nation catalogue and the greedy starting-XI / roster builder.
//!
//! ## Features
//! - Deterministic XI selection (same pool = same lineup)
//! - Club and national rosters from one shared `Squad`
//! - 22 stock formations with game-ready values
//! - YAML/JSON configuration

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod squad;
pub mod tactics;

pub use config::CreatorConfig;
pub use error::{ConfigError, Result, SquadError};
pub use models::{Player, Position, PositionGroup, TeamKind, TeamSpec};
pub use squad::{build_squad, build_starting_xi, pick_captain, Squad, StartingXi};
pub use tactics::{Formation, FormationSlot};
