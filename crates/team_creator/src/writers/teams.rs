//! `teams.txt`: the team row itself

use anyhow::Result;

use super::{TableWriter, TeamContext, WriteSummary};
use crate::table::TableFile;
use crate::template::RowTemplate;

/// Column names with the values a generated team starts from. Empty values
/// are filled per team.
const TEAM_COLUMNS: [(&str, &str); 110] = [
    ("assetid", ""),
    ("teamcolor1g", "26"),
    ("teamcolor1r", "218"),
    ("clubworth", "1000000"),
    ("teamcolor2b", "255"),
    ("goalnetstanchioncolor2g", "1"),
    ("teamcolor2r", "255"),
    ("foundationyear", "2000"),
    ("goalnetstanchioncolor2r", "1"),
    ("teamcolor3r", "228"),
    ("goalnetstanchioncolor1b", "1"),
    ("teamcolor1b", "53"),
    ("opponentweakthreshold", "3"),
    ("latitude", "0"),
    ("teamcolor3g", "206"),
    ("opponentstrongthreshold", "3"),
    ("goalnetstanchioncolor2b", "1"),
    ("goalnetstanchioncolor1r", "1"),
    ("teamcolor2g", "255"),
    ("goalnetstanchioncolor1g", "1"),
    ("teamname", ""),
    ("teamcolor3b", "60"),
    ("presassetone", "0"),
    ("powid", "-1"),
    ("hassubstitutionboard", "0"),
    ("rightfreekicktakerid", ""),
    ("flamethrowercannon", "0"),
    ("domesticprestige", "5"),
    ("genericint2", "-1"),
    ("cksupport7", "0"),
    ("defensivedepth", "50"),
    ("hasvikingclap", "0"),
    ("jerseytype", "0"),
    ("pitchcolor", "0"),
    ("cksupport9", "0"),
    ("pitchwear", "0"),
    ("popularity", "5"),
    ("hastifo", "0"),
    ("presassettwo", "0"),
    ("teamstadiumcapacity", "0"),
    ("stadiumgoalnetstyle", "0"),
    ("iscompetitionscarfenabled", "0"),
    ("cityid", "0"),
    ("rivalteam", "0"),
    ("playsurfacetype", "1"),
    ("isbannerenabled", "0"),
    ("midfieldrating", "75"),
    ("cksupport8", "0"),
    ("stadiummowpattern_code", "0"),
    ("cksupport6", "0"),
    ("matchdayoverallrating", "75"),
    ("matchdaymidfieldrating", "75"),
    ("attackrating", "75"),
    ("longitude", "0"),
    ("buildupplay", "50"),
    ("matchdaydefenserating", "75"),
    ("hasstandingcrowd", "0"),
    ("favoriteteamsheetid", "-1"),
    ("defenserating", "75"),
    ("iscompetitionpoleflagenabled", "0"),
    ("skinnyflags", "0"),
    ("uefa_consecutive_wins", "0"),
    ("longkicktakerid", ""),
    ("trait1vweak", "0"),
    ("iscompetitioncrowdcardsenabled", "0"),
    ("rightcornerkicktakerid", ""),
    ("throwerleft", "0"),
    ("gender", "0"),
    ("cksupport1", "0"),
    ("cornerflagpolecolor", "0"),
    ("uefa_cl_wins", "0"),
    ("hassuncanthem", "0"),
    ("domesticcups", "0"),
    ("ethnicity", "0"),
    ("leftcornerkicktakerid", ""),
    ("youthdevelopment", "5"),
    ("teamid", ""),
    ("uefa_el_wins", "0"),
    ("trait1vequal", "0"),
    ("numtransfersin", "0"),
    ("stanchionflamethrower", "0"),
    ("stadiumgoalnetpattern", "0"),
    ("throwerright", "0"),
    ("captainid", ""),
    ("personalityid", "0"),
    ("prev_el_champ", "0"),
    ("leftfreekicktakerid", ""),
    ("cksupport2", "0"),
    ("leaguetitles", "0"),
    ("genericbanner", "0"),
    ("crowdregion", "0"),
    ("uefa_uecl_wins", "0"),
    ("overallrating", "75"),
    ("ballid", "0"),
    ("profitability", "50"),
    ("utcoffset", "0"),
    ("penaltytakerid", ""),
    ("pitchlinecolor", "0"),
    ("cksupport5", "0"),
    ("freekicktakerid", ""),
    ("crowdskintonecode", "0"),
    ("internationalprestige", "5"),
    ("cksupport3", "0"),
    ("haslargeflag", "0"),
    ("trainingstadium", "0"),
    ("form", "50"),
    ("genericint1", "-1"),
    ("cksupport4", "0"),
    ("trait1vstrong", "0"),
    ("matchdayattackrating", "75"),
];

/// Columns that name a set-piece taker; the team row uses the captain for all
const TAKER_COLUMNS: [&str; 8] = [
    "captainid",
    "freekicktakerid",
    "rightfreekicktakerid",
    "leftfreekicktakerid",
    "rightcornerkicktakerid",
    "leftcornerkicktakerid",
    "penaltytakerid",
    "longkicktakerid",
];

pub struct TeamsWriter;

impl TeamsWriter {
    pub fn row(ctx: &TeamContext) -> RowTemplate {
        let mut row = RowTemplate::with_capacity(TEAM_COLUMNS.len());
        for (column, value) in TEAM_COLUMNS {
            row.push(column, value);
        }
        row.set("assetid", ctx.team.id);
        row.set("teamid", ctx.team.id);
        row.set("teamname", &ctx.team.name);
        for column in TAKER_COLUMNS {
            row.set(column, ctx.squad.captain_id);
        }
        row
    }
}

impl TableWriter for TeamsWriter {
    fn file_name(&self) -> &'static str {
        "teams.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        TEAM_COLUMNS.iter().map(|(c, _)| *c).collect()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let row = Self::row(ctx).render(table.header());
        table.append_rows(&[row]);
        log::debug!("Team row {} '{}'", ctx.team.id, ctx.team.name);
        Ok(WriteSummary::added(1).with_id(u64::from(ctx.team.id)))
    }
}
