//! Read-only reports: nation availability, XI preview, existing team ids

use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use tc_core::data::{is_base_game_nation, nation_name, Blacklist, NATIONS};
use tc_core::PositionGroup;

use crate::players::PoolRow;
use crate::table::TableFile;

/// Squad size at which a nation is considered fully viable
pub const VIABLE_PLAYERS: usize = 23;
/// Default minimum number of players for a nation to be listed
pub const DEFAULT_MIN_PLAYERS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viability {
    /// 23+ players, 2+ goalkeepers
    Viable,
    /// 11+ players, 1+ goalkeeper
    Possible,
    Short,
}

impl Viability {
    pub fn symbol(&self) -> &'static str {
        match self {
            Viability::Viable => "✓",
            Viability::Possible => "○",
            Viability::Short => "✗",
        }
    }
}

/// Player counts for one nation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationStats {
    pub nation_id: u32,
    pub name: String,
    pub total: usize,
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub attackers: usize,
    /// Rounded to one decimal
    pub avg_ovr: f64,
    pub top_ovr: u8,
    #[serde(skip)]
    ovr_sum: u64,
}

impl NationStats {
    fn new(nation_id: u32) -> Self {
        Self {
            nation_id,
            name: nation_name(nation_id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown ({})", nation_id)),
            total: 0,
            goalkeepers: 0,
            defenders: 0,
            midfielders: 0,
            attackers: 0,
            avg_ovr: 0.0,
            top_ovr: 0,
            ovr_sum: 0,
        }
    }

    fn add(&mut self, row: &PoolRow) {
        self.total += 1;
        self.ovr_sum += u64::from(row.overall);
        self.top_ovr = self.top_ovr.max(row.overall);
        match row.position().group() {
            PositionGroup::Goalkeeper => self.goalkeepers += 1,
            PositionGroup::Defense => self.defenders += 1,
            PositionGroup::Midfield => self.midfielders += 1,
            PositionGroup::Attack => self.attackers += 1,
        }
    }

    fn finish(&mut self) {
        if self.total > 0 {
            let avg = self.ovr_sum as f64 / self.total as f64;
            self.avg_ovr = (avg * 10.0).round() / 10.0;
        }
    }

    pub fn viability(&self) -> Viability {
        if self.total >= VIABLE_PLAYERS && self.goalkeepers >= 2 {
            Viability::Viable
        } else if self.total >= DEFAULT_MIN_PLAYERS && self.goalkeepers >= 1 {
            Viability::Possible
        } else {
            Viability::Short
        }
    }
}

/// Result of a nation availability scan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NationScan {
    /// Nations available to create, most players first
    pub nations: Vec<NationStats>,
    /// Left out because the base game already has them
    pub skipped_base_game: Vec<String>,
    /// Left out because teams.txt already has them
    pub skipped_created: Vec<String>,
}

impl NationScan {
    pub fn viable(&self) -> impl Iterator<Item = &NationStats> {
        self.nations
            .iter()
            .filter(|n| n.viability() == Viability::Viable)
    }
}

/// Catalogue nations that already have a men's national team in teams.txt.
///
/// A team counts when its name equals the nation, contains
/// "<nation> national" or is "<nation> nt" (all compared lowercase).
pub fn created_national_teams(teams: &TableFile) -> FxHashSet<String> {
    let mut created = FxHashSet::default();
    let Some(name_col) = teams.column_ci("teamname") else {
        log::warn!("No teamname column in {}", teams.path().display());
        return created;
    };

    for cells in teams.rows() {
        let Some(team) = cells.get(name_col) else {
            continue;
        };
        let team = team.to_lowercase();
        if team.contains("women") {
            continue;
        }
        let found = NATIONS.iter().map(|(name, _)| *name).find(|name| {
            let nation = name.to_lowercase();
            team == nation
                || team.contains(&format!("{} national", nation))
                || team == format!("{} nt", nation)
        });
        if let Some(name) = found {
            created.insert(name.to_string());
        }
    }

    if !created.is_empty() {
        log::info!("Found {} national teams already in teams.txt", created.len());
    }
    created
}

/// Count men's, non-blacklisted players per nation
pub fn scan_nations(
    pool: &[PoolRow],
    blacklist: &Blacklist,
    min_players: usize,
    extra_excluded: &[String],
    created: &FxHashSet<String>,
) -> NationScan {
    let mut stats: FxHashMap<u32, NationStats> = FxHashMap::default();
    for row in pool {
        if row.gender != 0 || blacklist.contains(row.player_id) {
            continue;
        }
        stats
            .entry(row.nationality)
            .or_insert_with(|| NationStats::new(row.nationality))
            .add(row);
    }

    let mut scan = NationScan::default();
    for (_, mut nation) in stats {
        if nation.total < min_players {
            continue;
        }
        nation.finish();
        if is_base_game_nation(&nation.name, extra_excluded) {
            scan.skipped_base_game.push(nation.name);
        } else if created.contains(&nation.name) {
            scan.skipped_created.push(nation.name);
        } else {
            scan.nations.push(nation);
        }
    }

    scan.nations
        .sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    scan.skipped_base_game.sort();
    scan.skipped_created.sort();

    log::info!(
        "{} nations available, {} in base game, {} already created",
        scan.nations.len(),
        scan.skipped_base_game.len(),
        scan.skipped_created.len()
    );
    scan
}

fn stats_line(stats: &NationStats) -> String {
    format!(
        "{:<25} | {:>5} | {:>3} | {:>3} | {:>3} | {:>3} | {:>7.1} | {:>7}",
        stats.name,
        stats.total,
        stats.goalkeepers,
        stats.defenders,
        stats.midfielders,
        stats.attackers,
        stats.avg_ovr,
        stats.top_ovr
    )
}

fn table_header() -> String {
    format!(
        "{:<25} | {:>5} | {:>3} | {:>3} | {:>3} | {:>3} | {:>7} | {:>7}",
        "Nation", "Total", "GK", "DEF", "MID", "ATT", "Avg OVR", "Top OVR"
    )
}

/// Scan result as a console table with viability markers
pub fn render_scan(scan: &NationScan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", table_header());
    let _ = writeln!(out, "{}", "-".repeat(82));
    for stats in &scan.nations {
        let _ = writeln!(out, "{} {}", stats.viability().symbol(), stats_line(stats));
    }
    let _ = writeln!(out, "{}", "-".repeat(82));
    let _ = writeln!(
        out,
        "{} nations, {} viable (✓ 23+ players and 2+ GK, ○ 11+ and 1+ GK)",
        scan.nations.len(),
        scan.viable().count()
    );
    out
}

/// Plain-text availability report ending with a batch-ready nation list
pub fn render_export(scan: &NationScan, min_players: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "NATIONAL TEAM AVAILABILITY REPORT");
    let _ = writeln!(out, "{}\n", "=".repeat(80));
    let _ = writeln!(
        out,
        "Total nations with {}+ players: {}",
        min_players,
        scan.nations.len()
    );
    let _ = writeln!(
        out,
        "Viable nations ({}+ players, 2+ GK): {}\n",
        VIABLE_PLAYERS,
        scan.viable().count()
    );
    let _ = writeln!(out, "{}", "-".repeat(80));
    let _ = writeln!(out, "{}", table_header());
    let _ = writeln!(out, "{}", "-".repeat(80));
    for stats in &scan.nations {
        let _ = writeln!(out, "{}", stats_line(stats));
    }
    let _ = writeln!(out, "{}", "-".repeat(80));
    let _ = writeln!(out, "\n\nNations ready for batch import (copy these lines):");
    let _ = writeln!(out, "{}", "-".repeat(40));
    for stats in scan.viable() {
        let _ = writeln!(out, "{}", stats.name);
    }
    out
}

pub fn export_scan(scan: &NationScan, min_players: usize, path: &Path) -> Result<()> {
    fs::write(path, render_export(scan, min_players))
        .with_context(|| format!("Failed to write nation report: {}", path.display()))
}

/// Lines of the preview lineup: 1 GK, 4 DEF, 3 MID, 3 ATT
const PREVIEW_LINES: [(PositionGroup, usize); 4] = [
    (PositionGroup::Goalkeeper, 1),
    (PositionGroup::Defense, 4),
    (PositionGroup::Midfield, 3),
    (PositionGroup::Attack, 3),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLine {
    pub group: PositionGroup,
    pub needed: usize,
    /// `(name, ovr)`, best first
    pub players: Vec<(String, u8)>,
}

impl PreviewLine {
    pub fn shortage(&self) -> usize {
        self.needed.saturating_sub(self.players.len())
    }
}

/// Quick 4-3-3 of a nation's best players by line
#[derive(Debug, Clone, PartialEq)]
pub struct XiPreview {
    pub nation: String,
    pub lines: Vec<PreviewLine>,
}

impl XiPreview {
    pub fn average_ovr(&self) -> f64 {
        let ratings: Vec<u8> = self
            .lines
            .iter()
            .flat_map(|l| l.players.iter().map(|(_, ovr)| *ovr))
            .collect();
        if ratings.is_empty() {
            return 0.0;
        }
        ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64
    }
}

impl fmt::Display for XiPreview {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "STARTING XI PREVIEW: {}", self.nation)?;
        writeln!(f, "{}", rule)?;
        for line in &self.lines {
            let label = line.group.short_name();
            writeln!(f, "\n{}:", label)?;
            if line.players.is_empty() {
                writeln!(f, "  - NO PLAYERS AVAILABLE")?;
            }
            for (name, ovr) in &line.players {
                writeln!(f, "  - {} (OVR: {})", name, ovr)?;
            }
            if line.shortage() > 0 {
                writeln!(f, "  ⚠️ Need {} more {}", line.shortage(), label)?;
            }
        }
        writeln!(f, "\n{}", rule)?;
        writeln!(f, "Team Average OVR: {:.1}", self.average_ovr())?;
        writeln!(f, "{}", rule)
    }
}

pub fn preview_starting_xi(
    pool: &[PoolRow],
    nation_id: u32,
    nation: &str,
    blacklist: &Blacklist,
) -> XiPreview {
    let mut candidates: Vec<&PoolRow> = pool
        .iter()
        .filter(|r| r.nationality == nation_id && r.gender == 0)
        .filter(|r| !blacklist.contains(r.player_id))
        .collect();
    candidates.sort_by(|a, b| b.overall.cmp(&a.overall));

    let lines = PREVIEW_LINES
        .iter()
        .map(|&(group, needed)| PreviewLine {
            group,
            needed,
            players: candidates
                .iter()
                .filter(|r| r.position().group() == group)
                .take(needed)
                .map(|r| (r.to_player().display_name(), r.overall))
                .collect(),
        })
        .collect();

    XiPreview {
        nation: nation.to_string(),
        lines,
    }
}

/// Team id to team name for every row of teams.txt
pub fn existing_team_ids(teams: &TableFile) -> BTreeMap<u32, String> {
    let mut existing = BTreeMap::new();
    let Some(id_col) = teams.column_ci("teamid") else {
        log::warn!("No teamid column in {}", teams.path().display());
        return existing;
    };
    let name_col = teams.column_ci("teamname");

    for cells in teams.rows() {
        let Some(id) = cells.get(id_col).and_then(|c| c.parse::<u32>().ok()) else {
            continue;
        };
        let name = name_col
            .and_then(|c| cells.get(c))
            .map_or("Unknown", |n| n)
            .to_string();
        existing.insert(id, name);
    }
    log::debug!("Found {} existing teams", existing.len());
    existing
}
