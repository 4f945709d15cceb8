//! Flat records shared by the selector and the file writers

pub mod player;
pub mod position;
pub mod team;

pub use player::Player;
pub use position::{Position, PositionGroup};
pub use team::{TeamKind, TeamSpec};
