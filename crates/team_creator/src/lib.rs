//! Team Creator Library
//!
//! Adds generated club and national teams to the tab-delimited tables of a
//! football game database: squad links, teamsheet, formation, mentalities,
//! team row, league link, manager, kits and the nation/stadium links.
//!
//! Squad selection lives in `tc_core`; this crate reads and writes the files.

pub mod mapping;
pub mod pipeline;
pub mod players;
pub mod report;
pub mod table;
pub mod template;
pub mod writers;

pub use mapping::{load_mappings, parse_mappings, save_mappings, NationMapping};
pub use pipeline::{FileOutcome, FileReport, TeamCreator, TeamReport, PLAYERS_FILE, TEAMS_FILE};
pub use players::{load_club_players, national_players, read_player_pool, PoolRow};
pub use report::{
    created_national_teams, existing_team_ids, preview_starting_xi, scan_nations, NationScan,
    NationStats, Viability, XiPreview,
};
pub use table::{detect_encoding, Encoding, TableFile};
pub use template::RowTemplate;
pub use writers::{default_writers, TableWriter, TeamContext, WriteSummary};
