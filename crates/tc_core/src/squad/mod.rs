//! Squad building: starting XI, captain, bench and teamsheet layout

pub mod roster;
pub mod selector;
pub mod slots;

pub use roster::{build_squad, SetPieceTakers, Squad, RESERVE_POSITION, SUBSTITUTE_POSITION};
pub use selector::{build_starting_xi, pick_captain, LineupSlot, SlotFit, StartingXi};
pub use slots::SlotRule;
