//! `teamkits.txt`: home, away and third kit

use anyhow::Result;

use super::{TableWriter, TeamContext, WriteSummary};
use crate::table::TableFile;
use crate::template::RowTemplate;

/// First kit id when the table holds none
const KIT_ID_DEFAULT: u64 = 17_127;

const KIT_COLUMNS: [&str; 72] = [
    "teamkitid",
    "chestbadge",
    "shortsnumberplacementcode",
    "shortsnumbercolorprimg",
    "teamcolorsecb",
    "shortsrenderingdetailmaptype",
    "jerseyfrontnumberplacementcode",
    "jerseynumbercolorsecr",
    "jerseynumbercolorprimr",
    "jerseynumbercolorprimg",
    "shortsnumbercolorsecb",
    "teamcolorprimg",
    "shortsnumbercolorterb",
    "shortsnumbercolorprimr",
    "teamcolortertb",
    "jerseynumbercolorterg",
    "jerseynameoutlinecolorr",
    "shortsnumbercolorprimb",
    "jerseynamelayouttype",
    "jerseynumbercolorterr",
    "jerseyrightsleevebadge",
    "jerseynumbercolorprimb",
    "jerseyshapestyle",
    "jerseybacknameplacementcode",
    "teamcolorprimr",
    "jerseynamecolorg",
    "jerseyleftsleevebadge",
    "jerseynameoutlinecolorb",
    "teamcolorsecg",
    "shortsnumbercolorsecg",
    "teamcolortertr",
    "jerseynumbercolorsecg",
    "renderingmaterialtype",
    "shortsnumbercolorterr",
    "teamcolorsecr",
    "jerseycollargeometrytype",
    "shortsnumbercolorterg",
    "jerseynamecolorr",
    "teamcolorprimb",
    "jerseyrenderingdetailmaptype",
    "jerseynameoutlinecolorg",
    "jerseynumbercolorsecb",
    "jerseynamecolorb",
    "jerseynumbercolorterb",
    "teamcolortertg",
    "shortsnumbercolorsecr",
    "jerseybacknamefontcase",
    "teamkittypetechid",
    "powid",
    "isinheritbasedetailmap",
    "islocked",
    "numberfonttype",
    "shortstemplateindex",
    "jerseynamefonttype",
    "teamcolorprimpercent",
    "isgeneric",
    "teamcolorsecpercent",
    "year",
    "jerseytemplateindex",
    "captainarmband",
    "teamtechid",
    "isembargoed",
    "hasadvertisingkit",
    "jerseynameoutlinewidth",
    "dlc",
    "teamcolortertpercent",
    "armbandtype",
    "shortsnumberfonttype",
    "shortstyle",
    "jerseyfit",
    "sockstemplateindex",
    "jerseyrestriction",
];

const HOME_KIT: [&str; 72] = [
    "",
    "0",
    "1",
    "12",
    "34",
    "0",
    "1",
    "220",
    "45",
    "42",
    "12",
    "222",
    "12",
    "12",
    "219",
    "12",
    "45",
    "12",
    "0",
    "12",
    "0",
    "38",
    "0",
    "1",
    "224",
    "42",
    "0",
    "38",
    "35",
    "12",
    "222",
    "220",
    "0",
    "12",
    "39",
    "0",
    "12",
    "45",
    "219",
    "0",
    "42",
    "220",
    "38",
    "12",
    "222",
    "12",
    "0",
    "0",
    "-1",
    "0",
    "0",
    "123",
    "101",
    "88",
    "5",
    "0",
    "78",
    "0",
    "0",
    "0",
    "",
    "0",
    "0",
    "0",
    "0",
    "90",
    "1",
    "123",
    "0",
    "0",
    "0",
    "0",
];

const AWAY_KIT: [&str; 72] = [
    "",
    "0",
    "1",
    "220",
    "92",
    "0",
    "1",
    "12",
    "220",
    "220",
    "220",
    "60",
    "220",
    "220",
    "89",
    "220",
    "220",
    "220",
    "0",
    "220",
    "0",
    "220",
    "0",
    "1",
    "179",
    "220",
    "0",
    "220",
    "40",
    "220",
    "51",
    "12",
    "0",
    "220",
    "58",
    "0",
    "220",
    "220",
    "127",
    "0",
    "220",
    "12",
    "220",
    "220",
    "37",
    "220",
    "0",
    "1",
    "-1",
    "0",
    "0",
    "123",
    "101",
    "53",
    "44",
    "0",
    "78",
    "0",
    "0",
    "0",
    "",
    "0",
    "0",
    "0",
    "0",
    "89",
    "0",
    "123",
    "0",
    "0",
    "0",
    "0",
];

const THIRD_KIT: [&str; 72] = [
    "",
    "0",
    "1",
    "229",
    "84",
    "0",
    "1",
    "12",
    "220",
    "229",
    "22",
    "30",
    "22",
    "220",
    "29",
    "229",
    "220",
    "22",
    "0",
    "220",
    "0",
    "22",
    "0",
    "1",
    "32",
    "229",
    "0",
    "220",
    "83",
    "229",
    "29",
    "12",
    "0",
    "220",
    "86",
    "7",
    "229",
    "220",
    "30",
    "0",
    "220",
    "12",
    "22",
    "22",
    "29",
    "220",
    "0",
    "2",
    "-1",
    "0",
    "0",
    "123",
    "101",
    "81",
    "9",
    "0",
    "78",
    "0",
    "0",
    "0",
    "",
    "0",
    "0",
    "0",
    "0",
    "97",
    "0",
    "123",
    "0",
    "0",
    "0",
    "0",
];

/// Home, away, third; `teamkittypetechid` 0, 1, 2
const KITS: [&[&str; 72]; 3] = [&HOME_KIT, &AWAY_KIT, &THIRD_KIT];

pub struct TeamKitsWriter;

impl TeamKitsWriter {
    /// Next kit id: kit ids lead each line, so every numeric line prefix counts
    pub fn next_kit_id(table: &TableFile) -> u64 {
        table
            .leading_ids()
            .into_iter()
            .max()
            .map_or(KIT_ID_DEFAULT, |max| max + 1)
    }

    pub fn rows(ctx: &TeamContext, first_id: u64) -> Vec<RowTemplate> {
        KITS.iter()
            .zip(first_id..)
            .map(|(values, kit_id)| {
                let mut row = RowTemplate::from_columns(&KIT_COLUMNS, &values[..]);
                row.set("teamkitid", kit_id);
                row.set("teamtechid", ctx.team.id);
                row
            })
            .collect()
    }
}

impl TableWriter for TeamKitsWriter {
    fn file_name(&self) -> &'static str {
        "teamkits.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        KIT_COLUMNS.to_vec()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let first_id = Self::next_kit_id(table);
        let header = table.header().to_vec();
        let rows: Vec<String> = Self::rows(ctx, first_id)
            .iter()
            .map(|row| row.render(&header))
            .collect();
        table.append_rows(&rows);
        log::debug!(
            "Kits {}..{} for team {}",
            first_id,
            first_id + rows.len() as u64,
            ctx.team.id
        );
        Ok(WriteSummary::added(rows.len()).with_id(first_id))
    }
}
