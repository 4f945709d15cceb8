//! Team creation pipeline
//!
//! Load players, build the squad once, then run every table writer over the
//! data directory. A failing or missing table is recorded and the remaining
//! tables are still written.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tc_core::data::{resolve_nation, Blacklist};
use tc_core::tactics::{find_formation, random_formation, stock_formations};
use tc_core::{build_squad, CreatorConfig, Formation, Player, Squad, TeamSpec};

use crate::mapping::NationMapping;
use crate::players::{self, PoolRow};
use crate::report::existing_team_ids;
use crate::table::TableFile;
use crate::writers::{default_writers, TableWriter, TeamContext, WriteSummary};

pub const TEAMS_FILE: &str = "teams.txt";
pub const PLAYERS_FILE: &str = "players.txt";

/// What happened to one table for one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(WriteSummary),
    /// The table does not apply to this team (nation link of a club, ...)
    Skipped,
    Missing,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file: &'static str,
    pub outcome: FileOutcome,
}

/// Result of adding one team
#[derive(Debug, Clone)]
pub struct TeamReport {
    pub team: TeamSpec,
    pub formation: String,
    pub squad: Squad,
    pub files: Vec<FileReport>,
    pub dry_run: bool,
}

impl TeamReport {
    pub fn successes(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Written(_)))
            .count()
    }

    pub fn errors(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Missing | FileOutcome::Failed(_)))
            .count()
    }

    /// At least one table took the team
    pub fn created(&self) -> bool {
        self.successes() > 0
    }

    pub fn outcome(&self, file: &str) -> Option<&FileOutcome> {
        self.files.iter().find(|f| f.file == file).map(|f| &f.outcome)
    }
}

impl fmt::Display for TeamReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} (ID: {}, {}, {} players, captain {})",
            self.team.name,
            self.team.id,
            self.formation,
            self.squad.len(),
            self.squad.captain_id
        )?;
        for file in &self.files {
            match &file.outcome {
                FileOutcome::Written(s) if s.rows_removed > 0 => writeln!(
                    f,
                    "  ✓ {:<26} +{} rows, -{} rows",
                    file.file, s.rows_added, s.rows_removed
                )?,
                FileOutcome::Written(s) => {
                    writeln!(f, "  ✓ {:<26} +{} rows", file.file, s.rows_added)?
                }
                FileOutcome::Skipped => writeln!(f, "  - {:<26} not needed", file.file)?,
                FileOutcome::Missing => writeln!(f, "  ✗ {:<26} file not found", file.file)?,
                FileOutcome::Failed(e) => writeln!(f, "  ✗ {:<26} {}", file.file, e)?,
            }
        }
        write!(
            f,
            "  {} files updated, {} errors{}",
            self.successes(),
            self.errors(),
            if self.dry_run { " (dry run)" } else { "" }
        )
    }
}

/// Adds generated teams to the game tables of one data directory
pub struct TeamCreator {
    data_dir: PathBuf,
    config: CreatorConfig,
    formations: Vec<Formation>,
    blacklist: Blacklist,
    writers: Vec<Box<dyn TableWriter>>,
    dry_run: bool,
    allow_duplicate_ids: bool,
}

impl TeamCreator {
    pub fn new(data_dir: impl Into<PathBuf>, config: CreatorConfig) -> Self {
        let mut formations = stock_formations();
        formations.extend(config.extra_formations.iter().cloned());
        let blacklist = Blacklist::new(&config.extra_blacklist);
        Self {
            data_dir: data_dir.into(),
            config,
            formations,
            blacklist,
            writers: default_writers(),
            dry_run: false,
            allow_duplicate_ids: false,
        }
    }

    /// Render every row but leave the files untouched
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn allow_duplicate_ids(mut self, allow: bool) -> Self {
        self.allow_duplicate_ids = allow;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &CreatorConfig {
        &self.config
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Stock presets followed by configured ones
    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    /// Formation by name; `None` is the default 4-3-3, `"random"` picks one
    pub fn formation(&self, name: Option<&str>) -> Result<Formation> {
        match name.map(str::trim) {
            None | Some("") => Ok(Formation::default()),
            Some(n) if n.eq_ignore_ascii_case("random") => {
                random_formation(&self.formations, &mut rand::thread_rng())
                    .cloned()
                    .context("No formations available")
            }
            Some(n) => find_formation(&self.formations, n)
                .cloned()
                .with_context(|| format!("Unknown formation '{}'", n)),
        }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Team id to name for every team already in teams.txt
    pub fn existing_teams(&self) -> Result<std::collections::BTreeMap<u32, String>> {
        let teams = TableFile::open(&self.path(TEAMS_FILE))?;
        Ok(existing_team_ids(&teams))
    }

    /// `max(teamid) + 1` from teams.txt
    pub fn next_team_id(&self) -> Result<u32> {
        let existing = self.existing_teams()?;
        let max = existing.keys().next_back().copied().unwrap_or(0);
        Ok(max + 1)
    }

    /// Caller id after a duplicate check, or the next free id
    pub fn resolve_team_id(&self, requested: Option<u32>) -> Result<u32> {
        let Some(id) = requested else {
            let id = self.next_team_id()?;
            log::info!("Using next free team id {}", id);
            return Ok(id);
        };
        if self.allow_duplicate_ids || !self.path(TEAMS_FILE).exists() {
            return Ok(id);
        }
        if let Some(name) = self.existing_teams()?.get(&id) {
            bail!("Team id {} is already used by '{}'", id, name);
        }
        Ok(id)
    }

    /// Build the squad for `team` and write it to every table
    pub fn create_team(
        &self,
        team: &TeamSpec,
        pool: &[Player],
        formation: &Formation,
    ) -> Result<TeamReport> {
        formation.validate()?;
        let squad = build_squad(pool, formation, team.kind, &self.config)
            .with_context(|| format!("Failed to build squad for {}", team.name))?;

        let ctx = TeamContext {
            team,
            squad: &squad,
            formation,
            config: &self.config,
        };
        let files = self.write_tables(&ctx);

        let report = TeamReport {
            team: team.clone(),
            formation: formation.name.clone(),
            squad,
            files,
            dry_run: self.dry_run,
        };
        log::info!(
            "Team {} '{}': {} files updated, {} errors",
            team.id,
            team.name,
            report.successes(),
            report.errors()
        );
        Ok(report)
    }

    fn write_tables(&self, ctx: &TeamContext) -> Vec<FileReport> {
        self.writers
            .iter()
            .map(|writer| {
                let file = writer.file_name();
                let outcome = if !writer.applies(ctx) {
                    FileOutcome::Skipped
                } else if !self.path(file).exists() {
                    log::warn!("{} not found in {}", file, self.data_dir.display());
                    FileOutcome::Missing
                } else {
                    match self.write_table(writer.as_ref(), ctx) {
                        Ok(summary) => FileOutcome::Written(summary),
                        Err(e) => {
                            log::error!("Failed to update {}: {:#}", file, e);
                            FileOutcome::Failed(format!("{:#}", e))
                        }
                    }
                };
                FileReport { file, outcome }
            })
            .collect()
    }

    fn write_table(&self, writer: &dyn TableWriter, ctx: &TeamContext) -> Result<WriteSummary> {
        let path = self.path(writer.file_name());
        let mut table = TableFile::open(&path)?;
        let columns = writer.columns();
        if !columns.is_empty() && !same_columns(table.header(), &columns) {
            log::warn!(
                "{} header differs from the {}-column layout, rows use built-in order",
                writer.file_name(),
                columns.len()
            );
        }
        let summary = writer.apply(&mut table, ctx)?;
        if self.dry_run {
            log::debug!("Dry run, {} left unchanged", path.display());
        } else {
            table.save()?;
        }
        Ok(summary)
    }

    /// Club team from a roster file
    pub fn create_club_team(
        &self,
        player_file: &Path,
        team: &TeamSpec,
        formation: &Formation,
    ) -> Result<TeamReport> {
        let pool = players::load_club_players(player_file)?;
        self.create_team(team, &pool, formation)
    }

    /// Parsed players.txt of the data directory
    pub fn player_pool(&self) -> Result<Vec<PoolRow>> {
        let table = TableFile::open(&self.path(PLAYERS_FILE))?;
        players::read_player_pool(&table)
    }

    /// National team for a nation name (fuzzy-matched against the catalogue)
    pub fn create_national_team(
        &self,
        nation: &str,
        team_id: Option<u32>,
        stadium_id: Option<u32>,
        formation: &Formation,
    ) -> Result<TeamReport> {
        let (name, nation_id) =
            resolve_nation(nation).with_context(|| format!("Unknown nation '{}'", nation))?;
        let team_id = self.resolve_team_id(team_id)?;
        let pool = self.player_pool()?;
        let team = TeamSpec::national(team_id, name, self.config.national_league_id, nation_id)
            .with_stadium(stadium_id);
        self.create_national_from_pool(&pool, &team, formation)
    }

    fn create_national_from_pool(
        &self,
        pool: &[PoolRow],
        team: &TeamSpec,
        formation: &Formation,
    ) -> Result<TeamReport> {
        let nation_id = team
            .nation_id()
            .with_context(|| format!("{} is not a national team", team.name))?;
        let candidates = players::national_players(pool, nation_id, &self.blacklist);
        if candidates.iter().all(Player::is_goalkeeper) {
            bail!("No valid field players found for {} (nation ID {})", team.name, nation_id);
        }
        log::info!("{} candidates for {}", candidates.len(), team.name);
        self.create_team(team, &candidates, formation)
    }

    /// One club team per roster file; the team name is the file stem and ids
    /// count up from `first_team_id` for every roster that loads
    pub fn create_club_batch(
        &self,
        files: &[PathBuf],
        first_team_id: Option<u32>,
        league_id: u32,
        formation: &Formation,
    ) -> Result<Vec<(String, Result<TeamReport>)>> {
        let mut next_id = match first_team_id {
            Some(id) => id,
            None => self.next_team_id()?,
        };
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            let name = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            let pool = match players::load_club_players(file) {
                Ok(pool) => pool,
                Err(e) => {
                    results.push((name, Err(e)));
                    continue;
                }
            };
            let result = self.resolve_team_id(Some(next_id)).and_then(|id| {
                let team = TeamSpec::club(id, name.clone(), league_id);
                self.create_team(&team, &pool, formation)
            });
            next_id += 1;
            results.push((name, result));
        }
        Ok(results)
    }

    /// National teams for resolved `NationName,TeamID` lines, reading
    /// players.txt once
    pub fn create_national_batch(
        &self,
        mappings: &[NationMapping],
        formation: &Formation,
    ) -> Result<Vec<(String, Result<TeamReport>)>> {
        let pool = self.player_pool()?;
        let results = mappings
            .iter()
            .map(|m| {
                let result = self.resolve_team_id(Some(m.team_id)).and_then(|id| {
                    let team = TeamSpec::national(
                        id,
                        m.nation,
                        self.config.national_league_id,
                        m.nation_id,
                    );
                    self.create_national_from_pool(&pool, &team, formation)
                });
                (m.nation.to_string(), result)
            })
            .collect();
        Ok(results)
    }
}

/// Same column names, in any order
fn same_columns(header: &[String], columns: &[&str]) -> bool {
    header.len() == columns.len() && columns.iter().all(|c| header.iter().any(|h| h == c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_formation_lookup() {
        let creator = TeamCreator::new("data", CreatorConfig::default());
        assert_eq!(creator.formation(None).unwrap().name, "4-3-3");
        assert_eq!(creator.formation(Some(" 4-4-2 ")).unwrap().name, "4-4-2");
        assert!(creator.formation(Some("9-9-9")).is_err());
        let random = creator.formation(Some("RANDOM")).unwrap();
        assert!(creator.formations().contains(&random));
    }

    #[test]
    fn test_team_ids() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join(TEAMS_FILE),
            "teamid\tteamname\n10\tRovers\n250\tUnited\n",
        )?;
        let creator = TeamCreator::new(dir.path(), CreatorConfig::default());
        assert_eq!(creator.next_team_id()?, 251);
        assert_eq!(creator.resolve_team_id(None)?, 251);
        assert_eq!(creator.resolve_team_id(Some(300))?, 300);
        assert!(creator.resolve_team_id(Some(250)).is_err());

        let creator = creator.allow_duplicate_ids(true);
        assert_eq!(creator.resolve_team_id(Some(250))?, 250);
        Ok(())
    }

    #[test]
    fn test_missing_tables_are_errors() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("formations.txt"), "formationid\n7\n")?;
        let creator = TeamCreator::new(dir.path(), CreatorConfig::default());
        let pool = crate::writers::test_support::pool();
        let team = TeamSpec::club(500, "Rovers", 13);

        let report = creator.create_team(&team, &pool, &Formation::default())?;
        assert!(report.created());
        assert_eq!(report.successes(), 1);
        // 7 tables missing; nation and stadium links do not apply
        assert_eq!(report.errors(), 7);
        assert_eq!(report.outcome("teamnationlinks.txt"), Some(&FileOutcome::Skipped));
        assert_eq!(report.outcome("teams.txt"), Some(&FileOutcome::Missing));
        let formations = fs::read_to_string(dir.path().join("formations.txt"))?;
        assert!(formations.ends_with("\t500\t4\t8\t9\t7\t6\t7\t0\t25\t15\t3"));
        Ok(())
    }

    #[test]
    fn test_dry_run_leaves_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("formations.txt");
        fs::write(&path, "formationid\n7\n")?;
        let creator = TeamCreator::new(dir.path(), CreatorConfig::default()).dry_run(true);
        let pool = crate::writers::test_support::pool();
        let report =
            creator.create_team(&TeamSpec::club(500, "Rovers", 13), &pool, &Formation::default())?;
        assert!(report.created());
        assert!(report.to_string().contains("(dry run)"));
        assert_eq!(fs::read_to_string(&path)?, "formationid\n7\n");
        Ok(())
    }

    #[test]
    fn test_same_columns() {
        let header = vec!["b".to_string(), "a".to_string()];
        assert!(same_columns(&header, &["a", "b"]));
        assert!(!same_columns(&header, &["a"]));
        assert!(!same_columns(&header, &["a", "c"]));
    }
}
