//! `formations.txt` and `default_mentalities.txt`

use anyhow::Result;

use super::{id_or_none, slot_value, TableWriter, TeamContext, WriteSummary};
use crate::table::TableFile;
use crate::template::RowTemplate;

const FORMATION_COLUMNS: [&str; 54] = [
    "offset6x",
    "offset5y",
    "offset10x",
    "offset2x",
    "defenders",
    "offset2y",
    "offset6y",
    "offset7x",
    "offset3x",
    "offset8x",
    "offset10y",
    "offset3y",
    "offset4x",
    "offset7y",
    "offset0x",
    "offset8y",
    "attackers",
    "offset9x",
    "midfielders",
    "offset5x",
    "offset0y",
    "offset1x",
    "offset4y",
    "offset9y",
    "offset1y",
    "pos0role",
    "pos6role",
    "pos8role",
    "pos4role",
    "pos7role",
    "pos2role",
    "pos1role",
    "pos10role",
    "pos3role",
    "pos9role",
    "pos5role",
    "formationname",
    "position10",
    "position6",
    "offensiverating",
    "position8",
    "position5",
    "formationaudioid",
    "teamid",
    "position2",
    "formationid",
    "relativeformationid",
    "position4",
    "position3",
    "formationfullnameid",
    "position0",
    "position9",
    "position7",
    "position1",
];

const MENTALITY_COLUMNS: [&str; 63] = [
    "offset6x",
    "offset5y",
    "offset10x",
    "offset2x",
    "offset2y",
    "offset6y",
    "offset7x",
    "offset3x",
    "offset8x",
    "offset10y",
    "offset3y",
    "offset4x",
    "offset7y",
    "offset0x",
    "offset8y",
    "offset9x",
    "offset5x",
    "offset0y",
    "offset1x",
    "offset4y",
    "offset9y",
    "offset1y",
    "pos0role",
    "pos6role",
    "pos8role",
    "pos4role",
    "pos7role",
    "pos2role",
    "pos1role",
    "pos10role",
    "pos3role",
    "pos9role",
    "pos5role",
    "tactic_name",
    "playerid0",
    "playerid9",
    "position10",
    "defensivedepth",
    "playerid1",
    "position6",
    "playerid7",
    "position8",
    "playerid6",
    "buildupplay",
    "playerid5",
    "sourceformationid",
    "playerid8",
    "playerid2",
    "position5",
    "formationaudioid",
    "playerid4",
    "teamid",
    "position2",
    "playerid3",
    "position4",
    "position3",
    "formationfullnameid",
    "mentalityid",
    "playerid10",
    "position0",
    "position9",
    "position7",
    "position1",
];

/// Id defaults when the table has no usable id yet
const FORMATION_ID_DEFAULT: u64 = 1;
const MENTALITY_ID_DEFAULT: u64 = 3;

/// Mentalities written per team: the active one plus two blanks
const MENTALITIES_PER_TEAM: usize = 3;

pub struct FormationsWriter;

impl FormationsWriter {
    pub fn row(ctx: &TeamContext, formation_id: u64) -> RowTemplate {
        let f = ctx.formation;
        let mut row = RowTemplate::with_capacity(FORMATION_COLUMNS.len());
        for column in FORMATION_COLUMNS {
            let value = match column {
                "defenders" => f.defenders.clone(),
                "midfielders" => f.midfielders.clone(),
                "attackers" => f.attackers.clone(),
                "formationname" => f.name.clone(),
                "offensiverating" => f.offensive_rating.clone(),
                "formationaudioid" => f.audio_id.clone(),
                "teamid" => ctx.team.id.to_string(),
                "formationid" => formation_id.to_string(),
                "relativeformationid" => f.relative_formation_id.clone(),
                "formationfullnameid" => f.fullname_id.clone(),
                _ => slot_value(f, column).unwrap_or_else(|| "-1".to_string()),
            };
            row.push(column, value);
        }
        row
    }
}

impl TableWriter for FormationsWriter {
    fn file_name(&self) -> &'static str {
        "formations.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        FORMATION_COLUMNS.to_vec()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let formation_id = table.next_id(table.column("formationid"), FORMATION_ID_DEFAULT);
        let row = Self::row(ctx, formation_id).render(table.header());
        table.append_rows(&[row]);
        log::debug!("Formation '{}' as id {}", ctx.formation.name, formation_id);
        Ok(WriteSummary::added(1).with_id(formation_id))
    }
}

pub struct MentalitiesWriter;

impl MentalitiesWriter {
    /// Mentality carrying the formation and the starting XI
    pub fn active_row(ctx: &TeamContext, mentality_id: u64) -> RowTemplate {
        let f = ctx.formation;
        let starters = ctx.squad.xi.player_ids();
        let mut row = RowTemplate::with_capacity(MENTALITY_COLUMNS.len());
        for column in MENTALITY_COLUMNS {
            let value = match column {
                "teamid" => ctx.team.id.to_string(),
                "mentalityid" => mentality_id.to_string(),
                "tactic_name" => f.tactic_name.clone(),
                "defensivedepth" => f.defensive_depth.clone(),
                "buildupplay" => f.build_up_play.clone(),
                "sourceformationid" => "0".to_string(),
                "formationaudioid" => f.audio_id.clone(),
                "formationfullnameid" => f.fullname_id.clone(),
                _ => match column.strip_prefix("playerid") {
                    Some(idx) => id_or_none(
                        idx.parse::<usize>()
                            .ok()
                            .and_then(|i| starters.get(i).copied()),
                    ),
                    None => slot_value(f, column).unwrap_or_else(|| "-1".to_string()),
                },
            };
            row.push(column, value);
        }
        row
    }

    /// Placeholder mentality with zeroed layout and no players
    pub fn inactive_row(mentality_id: u64) -> RowTemplate {
        let mut row = RowTemplate::with_capacity(MENTALITY_COLUMNS.len());
        for column in MENTALITY_COLUMNS {
            let value = match column {
                "tactic_name" => String::new(),
                "defensivedepth" => "1".to_string(),
                "buildupplay" => "0".to_string(),
                "mentalityid" => mentality_id.to_string(),
                c if c.starts_with("offset") || (c.starts_with("pos") && c.ends_with("role")) => {
                    "0".to_string()
                }
                _ => "-1".to_string(),
            };
            row.push(column, value);
        }
        row
    }
}

impl TableWriter for MentalitiesWriter {
    fn file_name(&self) -> &'static str {
        "default_mentalities.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        MENTALITY_COLUMNS.to_vec()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let first_id = table.next_id(table.column("mentalityid"), MENTALITY_ID_DEFAULT);
        let header = table.header().to_vec();

        let mut rows = vec![Self::active_row(ctx, first_id).render(&header)];
        for offset in 1..MENTALITIES_PER_TEAM as u64 {
            rows.push(Self::inactive_row(first_id + offset).render(&header));
        }
        table.append_rows(&rows);

        log::debug!(
            "Mentalities {}..={} for team {}",
            first_id,
            first_id + MENTALITIES_PER_TEAM as u64 - 1,
            ctx.team.id
        );
        Ok(WriteSummary::added(rows.len()).with_id(first_id))
    }
}
