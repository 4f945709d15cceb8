//! Row writers, one per game table
//!
//! Each writer turns the shared team context into rows for one file. The
//! pipeline opens the file, hands it to the writer and saves it; writers never
//! touch the filesystem themselves.

mod kits;
mod links;
mod staff;
mod tactics;
mod teams;
mod teamsheet;

pub use kits::TeamKitsWriter;
pub use links::{LeagueTeamLinksWriter, NationLinksWriter, PlayerLinksWriter, StadiumLinksWriter};
pub use staff::ManagerWriter;
pub use tactics::{FormationsWriter, MentalitiesWriter};
pub use teams::TeamsWriter;
pub use teamsheet::TeamsheetWriter;

use anyhow::Result;
use tc_core::{CreatorConfig, Formation, Squad, TeamSpec};

use crate::table::TableFile;

/// Everything a writer needs to know about the team being added
#[derive(Debug, Clone, Copy)]
pub struct TeamContext<'a> {
    pub team: &'a TeamSpec,
    pub squad: &'a Squad,
    pub formation: &'a Formation,
    pub config: &'a CreatorConfig,
}

/// What a writer changed in its table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows_added: usize,
    pub rows_removed: usize,
    /// First id handed out (formation id, kit id, ...), when the table has one
    pub first_id: Option<u64>,
}

impl WriteSummary {
    pub fn added(rows: usize) -> Self {
        Self {
            rows_added: rows,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.first_id = Some(id);
        self
    }
}

pub trait TableWriter {
    /// File name inside the data directory
    fn file_name(&self) -> &'static str;

    /// Built-in column layout; empty for tables written positionally
    fn columns(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Whether this table gets rows for the given team
    fn applies(&self, _ctx: &TeamContext) -> bool {
        true
    }

    /// Append this team's rows to `table` (in memory)
    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary>;
}

/// All writers in processing order
pub fn default_writers() -> Vec<Box<dyn TableWriter>> {
    vec![
        Box::new(TeamsWriter),
        Box::new(MentalitiesWriter),
        Box::new(TeamsheetWriter),
        Box::new(FormationsWriter),
        Box::new(LeagueTeamLinksWriter),
        Box::new(ManagerWriter),
        Box::new(TeamKitsWriter),
        Box::new(PlayerLinksWriter),
        Box::new(NationLinksWriter),
        Box::new(StadiumLinksWriter),
    ]
}

/// Value of a per-slot formation column: `offsetNx`, `offsetNy`, `posNrole`
/// or `positionN`
pub(crate) fn slot_value(formation: &Formation, column: &str) -> Option<String> {
    let (index, field) = if let Some(rest) = column.strip_prefix("offset") {
        let axis = rest
            .len()
            .checked_sub(1)
            .filter(|&i| rest.is_char_boundary(i))?;
        (&rest[..axis], &rest[axis..])
    } else if let Some(rest) = column.strip_prefix("position") {
        (rest, "position")
    } else {
        let rest = column.strip_prefix("pos")?.strip_suffix("role")?;
        (rest, "role")
    };

    let slot = formation.slots.get(index.parse::<usize>().ok()?)?;
    match field {
        "x" => Some(slot.offset_x.clone()),
        "y" => Some(slot.offset_y.clone()),
        "role" => Some(slot.role.clone()),
        "position" => Some(slot.position_code.to_string()),
        _ => None,
    }
}

/// Player id or the game's `-1` placeholder
pub(crate) fn id_or_none(id: Option<u32>) -> String {
    id.map_or_else(|| "-1".to_string(), |id| id.to_string())
}
