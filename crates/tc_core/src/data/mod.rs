//! Static game data

pub mod blacklist;
pub mod nations;

pub use blacklist::{Blacklist, BLACKLISTED_PLAYERS};
pub use nations::{
    is_base_game_nation, nation_id, nation_name, resolve_nation, BASE_GAME_NATIONS, NATIONS,
};
