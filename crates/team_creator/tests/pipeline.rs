//! End-to-end runs over a data directory written at test time

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tc_core::{CreatorConfig, TeamSpec};
use team_creator::{default_writers, parse_mappings, FileOutcome, TableFile, TeamCreator};

fn utf16(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Built-in header of the writer for `file`
fn columns(file: &str) -> Vec<&'static str> {
    default_writers()
        .into_iter()
        .find(|w| w.file_name() == file)
        .map(|w| w.columns())
        .unwrap_or_default()
}

/// A row for `columns` with `values` set by name and "0" elsewhere
fn row(columns: &[&str], values: &[(&str, &str)]) -> String {
    columns
        .iter()
        .map(|c| {
            values
                .iter()
                .find(|(name, _)| name == c)
                .map_or("0", |(_, v)| *v)
        })
        .collect::<Vec<_>>()
        .join("\t")
}

fn table_text(file: &str, rows: &[&[(&str, &str)]], eol: &str) -> String {
    let cols = columns(file);
    let mut text = cols.join("\t");
    for values in rows {
        text.push_str(eol);
        text.push_str(&row(&cols, values));
    }
    text.push_str(eol);
    text
}

/// Game tables with a few existing rows; teams.txt and players.txt are
/// UTF-16LE with CRLF
fn write_data_dir(dir: &Path) -> Result<()> {
    let teams = table_text(
        "teams.txt",
        &[
            &[("teamid", "1"), ("teamname", "Arsenal")],
            &[("teamid", "241"), ("teamname", "Spain")],
        ],
        "\r\n",
    );
    fs::write(dir.join("teams.txt"), utf16(&teams))?;

    let files: [(&str, &[&[(&str, &str)]]); 6] = [
        (
            "default_mentalities.txt",
            &[
                &[("teamid", "1"), ("mentalityid", "10")],
                &[("teamid", "1"), ("mentalityid", "11")],
            ],
        ),
        ("default_teamsheets.txt", &[&[("teamid", "1")]]),
        ("formations.txt", &[&[("teamid", "1"), ("formationid", "20")]]),
        ("manager.txt", &[&[("managerid", "254900"), ("teamid", "1")]]),
        (
            "teamkits.txt",
            &[
                &[("teamkitid", "17300"), ("teamtechid", "1")],
                &[("teamkitid", "17301"), ("teamtechid", "1")],
            ],
        ),
        (
            "teamplayerlinks.txt",
            &[
                &[("artificialkey", "30000"), ("teamid", "111592"), ("playerid", "1013")],
                &[("artificialkey", "30001"), ("teamid", "111592"), ("playerid", "9999")],
                &[("artificialkey", "30002"), ("teamid", "1"), ("playerid", "1014")],
            ],
        ),
    ];
    for (file, rows) in files {
        fs::write(dir.join(file), table_text(file, rows, "\n"))?;
    }

    // Positional table, no trailing newline
    fs::write(dir.join("leagueteamlinks.txt"), "artificialkey\tteamid\n4\t1")?;
    fs::write(dir.join("teamnationlinks.txt"), "leagueid\tteamid\tnationid\n78\t241\t45\n")?;
    fs::write(dir.join("teamstadiumlinks.txt"), "a\tstadiumid\tteamid\tb\n")?;

    // 34 Guinean men (9 keepers), one Guinean woman, one Brazilian striker
    let mut players = String::from(
        "playerid\tfirstname\tsurname\tnationality\tgender\tpreferredposition1\toverallrating\r\n",
    );
    let codes = [0, 0, 0, 3, 5, 5, 7, 10, 14, 14, 18, 23, 25, 27];
    for i in 0..34u32 {
        let code = codes[i as usize % codes.len()];
        players.push_str(&format!(
            "{}\tFirst{}\tLast{}\t118\t0\t{}\t{}\r\n",
            5000 + i,
            i,
            i,
            code,
            60 + i % 25
        ));
    }
    players.push_str("6000\tAna\tWoman\t118\t1\t25\t99\r\n");
    players.push_str("6001\tOther\tNation\t54\t0\t25\t95\r\n");
    fs::write(dir.join("players.txt"), utf16(&players))?;
    Ok(())
}

fn write_roster(path: &Path) -> Result<()> {
    let mut text = String::from("playerid\tovr\tpos1\tpos2\tpos3\tgiven\tsur\tjersey\n");
    let positions = [
        "GK", "RB", "CB", "CB", "LB", "CDM", "CM", "CM", "RW", "ST", "LW", "GK", "CB", "CM",
        "ST", "RB", "LM", "CAM",
    ];
    for (i, pos) in positions.iter().enumerate() {
        text.push_str(&format!(
            "{}\t{}\t{}\t\t\tGiven{}\tSur{}\t{}\n",
            1001 + i,
            80 - i,
            pos,
            i,
            i,
            i + 1
        ));
    }
    fs::write(path, text)?;
    Ok(())
}

/// Rows of `file` as column-name lookups
struct Rows {
    table: TableFile,
}

impl Rows {
    fn open(dir: &Path, file: &str) -> Result<Self> {
        Ok(Self {
            table: TableFile::open(&dir.join(file))?,
        })
    }

    fn col(&self, name: &str) -> usize {
        self.table.column(name).unwrap()
    }

    /// Values of `name` for every row whose `teamid` is `team`
    fn values(&self, team: u32, name: &str) -> Vec<String> {
        let (team_col, col) = (self.col("teamid"), self.col(name));
        self.table
            .rows()
            .filter(|r| r[team_col] == team.to_string())
            .map(|r| r[col].to_string())
            .collect()
    }
}

#[test]
fn club_team_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let data = dir.path();
    write_data_dir(data)?;
    let roster = data.join("Rovers.txt");
    write_roster(&roster)?;

    let creator = TeamCreator::new(data, CreatorConfig::default());
    let team_id = creator.resolve_team_id(None)?;
    assert_eq!(team_id, 242);
    assert!(creator.resolve_team_id(Some(241)).is_err());

    let formation = creator.formation(Some("4-4-2"))?;
    let team = TeamSpec::club(team_id, "Rovers", 13);
    let report = creator.create_club_team(&roster, &team, &formation)?;

    assert_eq!(report.successes(), 8);
    assert_eq!(report.errors(), 0);
    assert_eq!(report.outcome("teamnationlinks.txt"), Some(&FileOutcome::Skipped));
    assert_eq!(report.outcome("teamstadiumlinks.txt"), Some(&FileOutcome::Skipped));
    assert_eq!(report.squad.len(), 18);

    // teams.txt keeps its encoding, BOM and CRLF, and knows the new team
    let raw = fs::read(data.join("teams.txt"))?;
    assert_eq!(&raw[..2], &[0xFF, 0xFE]);
    let teams = Rows::open(data, "teams.txt")?;
    assert_eq!(teams.table.line_ending(), "\r\n");
    assert_eq!(teams.values(team_id, "teamname"), vec!["Rovers"]);
    assert_eq!(creator.next_team_id()?, 243);

    // Free-agent link of a squad member is gone, other links stay
    let links = Rows::open(data, "teamplayerlinks.txt")?;
    assert_eq!(links.values(111_592, "playerid"), vec!["9999"]);
    assert_eq!(links.values(1, "playerid"), vec!["1014"]);

    let keys: Vec<u32> = links
        .values(team_id, "artificialkey")
        .iter()
        .map(|k| k.parse().unwrap())
        .collect();
    assert_eq!(keys, (30003..30021).collect::<Vec<_>>());
    let linked: HashSet<String> = links.values(team_id, "playerid").into_iter().collect();
    assert_eq!(linked.len(), 18);
    let positions = links.values(team_id, "position");
    assert!(positions[11..].iter().all(|p| p == "28"));
    // Roster jerseys are kept
    assert!(links.values(team_id, "jerseynumber").contains(&"18".to_string()));

    // Every player on the teamsheet and in the mentalities is linked
    let sheets = Rows::open(data, "default_teamsheets.txt")?;
    let sheet_players: Vec<String> = (0..52)
        .flat_map(|i| sheets.values(team_id, &format!("playerid{}", i)))
        .filter(|id| id != "-1")
        .collect();
    assert_eq!(sheet_players.len(), 18);
    assert!(sheet_players.iter().all(|id| linked.contains(id)));
    let captain = sheets.values(team_id, "captainid");
    assert!(linked.contains(&captain[0]));

    let mentalities = Rows::open(data, "default_mentalities.txt")?;
    assert_eq!(mentalities.values(team_id, "mentalityid"), vec!["12"]);
    assert_eq!(mentalities.values(team_id, "playerid0").len(), 1);
    assert!(linked.contains(&mentalities.values(team_id, "playerid0")[0]));
    assert_eq!(mentalities.table.rows().count(), 5);

    // Ids continue from the existing rows
    let formations = Rows::open(data, "formations.txt")?;
    assert_eq!(formations.values(team_id, "formationid"), vec!["21"]);
    assert_eq!(formations.values(team_id, "formationname"), vec!["4-4-2"]);

    let league = fs::read_to_string(data.join("leagueteamlinks.txt"))?;
    let league_row: Vec<&str> = league.lines().last().unwrap_or_default().split('\t').collect();
    assert_eq!(league.lines().count(), 3);
    assert_eq!((league_row[12], league_row[18], league_row[20]), ("13", "5", "242"));

    let manager = Rows::open(data, "manager.txt")?;
    assert_eq!(manager.values(team_id, "managerid"), vec!["254901"]);

    let kits = Rows::open(data, "teamkits.txt")?;
    let (kit_col, tech_col) = (kits.col("teamkitid"), kits.col("teamtechid"));
    let kit_ids: Vec<String> = kits
        .table
        .rows()
        .filter(|r| r[tech_col] == "242")
        .map(|r| r[kit_col].to_string())
        .collect();
    assert_eq!(kit_ids, vec!["17302", "17303", "17304"]);
    Ok(())
}

#[test]
fn national_team_end_to_end() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let data = dir.path();
    write_data_dir(data)?;
    let creator = TeamCreator::new(data, CreatorConfig::default());

    let report =
        creator.create_national_team("guinea", Some(500), Some(77), &creator.formation(None)?)?;
    assert_eq!(report.team.name, "Guinea");
    assert_eq!(report.successes(), 10);
    assert_eq!(report.squad.len(), 26);
    assert!(report.squad.roster().all(|p| p.nationality == Some(118)));
    assert!(!report.squad.contains(6000));

    let nations = fs::read_to_string(data.join("teamnationlinks.txt"))?;
    assert_eq!(nations.lines().last(), Some("78\t500\t118"));
    let stadiums = fs::read_to_string(data.join("teamstadiumlinks.txt"))?;
    assert_eq!(stadiums.lines().last(), Some("0\t77\t500\t0"));

    // National squads leave free-agent links alone and list every sub as 28
    let links = Rows::open(data, "teamplayerlinks.txt")?;
    assert_eq!(links.values(111_592, "playerid").len(), 2);
    assert!(links.values(500, "position")[11..].iter().all(|p| p == "28"));
    let jerseys = links.values(500, "jerseynumber");
    assert_eq!(jerseys.len(), 26);
    assert_eq!(jerseys[25], "26");

    // The team row now exists, so the same id is refused
    assert!(creator
        .create_national_team("Guinea", Some(500), None, &creator.formation(None)?)
        .is_err());
    Ok(())
}

#[test]
fn national_batch_dry_run() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_data_dir(dir.path())?;
    let before = fs::read(dir.path().join("teamplayerlinks.txt"))?;

    let creator = TeamCreator::new(dir.path(), CreatorConfig::default()).dry_run(true);
    let mappings = parse_mappings("# batch\nGuinea,600\nBrazil,601\nNowhere,602\nSpain,241\n");
    assert_eq!(mappings.len(), 3);

    let results = creator.create_national_batch(&mappings, &creator.formation(None)?)?;
    assert_eq!(results.len(), 3);
    assert!(results[0].1.as_ref().is_ok_and(|r| r.created() && r.dry_run));
    // A lone Brazilian striker cannot fill a lineup; Spain's id is taken
    assert!(results[1].1.is_err());
    assert!(results[2].1.is_err());

    assert_eq!(fs::read(dir.path().join("teamplayerlinks.txt"))?, before);
    Ok(())
}
