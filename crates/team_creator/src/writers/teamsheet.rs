//! `default_teamsheets.txt`: lineup, bench and set-piece takers

use anyhow::Result;

use super::{id_or_none, TableWriter, TeamContext, WriteSummary};
use crate::table::TableFile;
use crate::template::RowTemplate;

const TEAMSHEET_COLUMNS: [&str; 67] = [
    "playerid35",
    "playerid0",
    "playerid9",
    "customsub0in",
    "playerid36",
    "rightfreekicktakerid",
    "playerid44",
    "playerid27",
    "playerid1",
    "playerid38",
    "playerid31",
    "playerid7",
    "playerid20",
    "playerid39",
    "playerid42",
    "playerid48",
    "playerid13",
    "playerid6",
    "customsub0out",
    "playerid37",
    "playerid5",
    "playerid45",
    "playerid8",
    "playerid14",
    "playerid46",
    "longkicktakerid",
    "playerid12",
    "playerid2",
    "rightcornerkicktakerid",
    "playerid30",
    "customsub1in",
    "playerid15",
    "playerid41",
    "playerid47",
    "playerid23",
    "playerid16",
    "customsub1out",
    "leftcornerkicktakerid",
    "playerid18",
    "playerid4",
    "playerid40",
    "playerid49",
    "customsub2out",
    "teamid",
    "playerid22",
    "playerid24",
    "playerid11",
    "customsub2in",
    "playerid3",
    "captainid",
    "playerid51",
    "leftfreekicktakerid",
    "playerid25",
    "playerid33",
    "playerid19",
    "playerid17",
    "playerid26",
    "playerid50",
    "playerid34",
    "penaltytakerid",
    "playerid32",
    "freekicktakerid",
    "playerid28",
    "playerid21",
    "playerid10",
    "playerid43",
    "playerid29",
];

pub struct TeamsheetWriter;

impl TeamsheetWriter {
    pub fn row(ctx: &TeamContext) -> RowTemplate {
        let slots = ctx.squad.teamsheet_slots(ctx.config.teamsheet_slots);
        let takers = ctx.squad.set_piece_takers();

        let mut row = RowTemplate::with_capacity(TEAMSHEET_COLUMNS.len());
        for column in TEAMSHEET_COLUMNS {
            let value = match column {
                "teamid" => ctx.team.id.to_string(),
                "captainid" => ctx.squad.captain_id.to_string(),
                "freekicktakerid" => takers.free_kick.to_string(),
                "rightfreekicktakerid" => takers.right_free_kick.to_string(),
                "leftfreekicktakerid" => takers.left_free_kick.to_string(),
                "rightcornerkicktakerid" => takers.right_corner.to_string(),
                "leftcornerkicktakerid" => takers.left_corner.to_string(),
                "penaltytakerid" => takers.penalty.to_string(),
                "longkicktakerid" => id_or_none(takers.long_kick),
                c => match c.strip_prefix("playerid") {
                    Some(idx) => id_or_none(
                        idx.parse::<usize>()
                            .ok()
                            .and_then(|i| slots.get(i).copied().flatten()),
                    ),
                    // customsubNin / customsubNout
                    None => "-1".to_string(),
                },
            };
            row.push(column, value);
        }
        row
    }
}

impl TableWriter for TeamsheetWriter {
    fn file_name(&self) -> &'static str {
        "default_teamsheets.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        TEAMSHEET_COLUMNS.to_vec()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let row = Self::row(ctx);
        let listed = TEAMSHEET_COLUMNS
            .iter()
            .filter(|c| c.starts_with("playerid"))
            .filter(|c| row.get(c).is_some_and(|v| v != "-1"))
            .count();
        table.append_rows(&[row.render(table.header())]);
        log::debug!("Teamsheet for team {} lists {} players", ctx.team.id, listed);
        Ok(WriteSummary::added(1))
    }
}
