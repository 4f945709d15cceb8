//! `NationName,TeamID` files: batch input and saved team-id mappings

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use tc_core::data::resolve_nation;

/// One resolved `NationName,TeamID` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationMapping {
    /// Catalogue name the line resolved to
    pub nation: &'static str,
    pub nation_id: u32,
    pub team_id: u32,
}

/// Parse mapping lines.
///
/// Blank lines and `#` comments are ignored. Lines without a comma, with a
/// non-numeric team id or an unknown nation are skipped with a warning. A
/// nation listed twice keeps its last team id.
pub fn parse_mappings(text: &str) -> Vec<NationMapping> {
    let mut mappings: Vec<NationMapping> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, id)) = line.split_once(',') else {
            log::warn!("Line {}: expected NationName,TeamID, got '{}'", line_num, line);
            continue;
        };
        let (name, id) = (name.trim(), id.trim());
        let Ok(team_id) = id.parse::<u32>() else {
            log::warn!("Line {}: invalid team id '{}'", line_num, id);
            continue;
        };
        let Some((nation, nation_id)) = resolve_nation(name) else {
            log::warn!("Line {}: nation '{}' not found, skipping", line_num, name);
            continue;
        };
        if !nation.eq_ignore_ascii_case(name) {
            log::info!("Matched '{}' to '{}'", name, nation);
        }

        let mapping = NationMapping {
            nation,
            nation_id,
            team_id,
        };
        match mappings.iter_mut().find(|m| m.nation_id == nation_id) {
            Some(existing) => {
                log::warn!(
                    "Line {}: {} listed again, team id {} replaces {}",
                    line_num,
                    nation,
                    team_id,
                    existing.team_id
                );
                *existing = mapping;
            }
            None => mappings.push(mapping),
        }
    }
    mappings
}

pub fn load_mappings(path: &Path) -> Result<Vec<NationMapping>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
    let mappings = parse_mappings(&text);
    log::info!("Loaded {} team id mappings from {}", mappings.len(), path.display());
    Ok(mappings)
}

/// Mapping file text with a commented header
pub fn render_mappings(mappings: &[NationMapping], saved_at: DateTime<Local>) -> String {
    let mut out = String::from("# Nation Team ID Mappings\n# Format: NationName,TeamID\n");
    out.push_str(&format!("# Saved: {}\n", saved_at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("#{}\n", "=".repeat(50)));
    for m in mappings {
        out.push_str(&format!("{},{}\n", m.nation, m.team_id));
    }
    out
}

pub fn save_mappings(mappings: &[NationMapping], path: &Path) -> Result<()> {
    fs::write(path, render_mappings(mappings, Local::now()))
        .with_context(|| format!("Failed to write mapping file: {}", path.display()))?;
    log::info!("Saved {} team id mappings to {}", mappings.len(), path.display());
    Ok(())
}
