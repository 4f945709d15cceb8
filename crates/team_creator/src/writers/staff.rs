//! `manager.txt`: a placeholder manager per team

use anyhow::Result;

use super::{TableWriter, TeamContext, WriteSummary};
use crate::table::TableFile;
use crate::template::RowTemplate;

const MANAGER_ID_DEFAULT: u64 = 254_782;

const MANAGER_COLUMNS: [(&str, &str); 53] = [
    ("starrating", "2"),
    ("firstname", "Manager"),
    ("commonname", ""),
    ("surname", "Manager"),
    ("eyebrowcode", "0"),
    ("skintypecode", "0"),
    ("haircolorcode", "24"),
    ("facialhairtypecode", "0"),
    ("managerid", ""),
    ("accessorycode4", "0"),
    ("hairtypecode", "0"),
    ("facepsdlayer0", "0"),
    ("lipcolor", "0"),
    ("skinsurfacepack", "0"),
    ("accessorycode3", "0"),
    ("accessorycolourcode1", "0"),
    ("headtypecode", "0"),
    ("height", "180"),
    ("seasonaloutfitid", "0"),
    ("birthdate", "142606"),
    ("isrewardable", "0"),
    ("skinmakeup", "0"),
    ("trait1vweak", "0"),
    ("weight", "80"),
    ("hashighqualityhead", "0"),
    ("eyedetail", "0"),
    ("gender", "0"),
    ("headassetid", "0"),
    ("ethnicity", "0"),
    ("faceposerpreset", "0"),
    ("islicensed", "0"),
    ("teamid", ""),
    ("trait1vequal", "0"),
    ("eyecolorcode", "3"),
    ("personalityid", "0"),
    ("accessorycolourcode3", "0"),
    ("accessorycode1", "0"),
    ("headclasscode", "0"),
    ("nationality", "1"),
    ("sideburnscode", "0"),
    ("accessorycolourcode4", "0"),
    ("headvariation", "0"),
    ("skintonecode", "3"),
    ("outfitid", "0"),
    ("facepsdlayer1", "0"),
    ("skincomplexion", "0"),
    ("accessorycode2", "0"),
    ("hairstylecode", "0"),
    ("bodytypecode", "3"),
    ("managerjointeamdate", "161224"),
    ("trait1vstrong", "0"),
    ("accessorycolourcode2", "0"),
    ("facialhaircolorcode", "0"),
];

pub struct ManagerWriter;

impl ManagerWriter {
    pub fn row(ctx: &TeamContext, manager_id: u64) -> RowTemplate {
        let mut row = RowTemplate::with_capacity(MANAGER_COLUMNS.len());
        for (column, value) in MANAGER_COLUMNS {
            row.push(column, value);
        }
        row.set("managerid", manager_id);
        row.set("teamid", ctx.team.id);
        row
    }
}

impl TableWriter for ManagerWriter {
    fn file_name(&self) -> &'static str {
        "manager.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        MANAGER_COLUMNS.iter().map(|(c, _)| *c).collect()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let manager_id = table.next_id(table.column("managerid"), MANAGER_ID_DEFAULT);
        let row = Self::row(ctx, manager_id).render(table.header());
        table.append_rows(&[row]);
        log::debug!("Manager {} for team {}", manager_id, ctx.team.id);
        Ok(WriteSummary::added(1).with_id(manager_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::test_support::{last_row, Fixture};
    use std::path::Path;

    #[test]
    fn test_manager_ids() {
        let fx = Fixture::club();
        let header: Vec<&str> = MANAGER_COLUMNS.iter().map(|(c, _)| *c).collect();
        let mut existing = vec!["0"; 53];
        existing[8] = "260001";
        let text = format!("{}\r\n{}\r\n", header.join("\t"), existing.join("\t"));
        let mut table = TableFile::from_bytes(Path::new("manager.txt"), text.as_bytes()).unwrap();

        let summary = ManagerWriter.apply(&mut table, &fx.ctx()).unwrap();
        assert_eq!(summary.first_id, Some(260_002));

        let cells = last_row(&table);
        assert_eq!(cells.len(), 53);
        assert_eq!(cells[0], "2");
        assert_eq!(cells[1], "Manager");
        assert_eq!(cells[8], "260002");
        assert_eq!(cells[31], "130000");
        assert!(table.content().ends_with(&cells.join("\t")));
        assert!(!table.content().ends_with("\r\n"));
    }

    #[test]
    fn test_manager_default_id() {
        let fx = Fixture::club();
        let mut table = TableFile::from_bytes(Path::new("manager.txt"), b"").unwrap();
        let summary = ManagerWriter.apply(&mut table, &fx.ctx()).unwrap();
        assert_eq!(summary.first_id, Some(254_783));
        assert_eq!(table.content().lines().count(), 1);
    }
}
