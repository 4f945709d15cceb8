//! Player sources: club roster files and the game's `players.txt`

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tc_core::data::Blacklist;
use tc_core::{Player, Position};

use crate::table::TableFile;

/// One row of a club roster file (tab-separated, UTF-8)
#[derive(Debug, Deserialize)]
struct ClubRow {
    playerid: String,
    ovr: String,
    #[serde(default)]
    pos1: String,
    #[serde(default)]
    pos2: String,
    #[serde(default)]
    pos3: String,
    #[serde(default)]
    given: String,
    #[serde(default)]
    sur: String,
    #[serde(default)]
    jersey: Option<String>,
}

impl ClubRow {
    fn into_player(self) -> Result<Player> {
        let id: u32 = self
            .playerid
            .trim()
            .parse()
            .with_context(|| format!("invalid playerid '{}'", self.playerid))?;
        let overall: u8 = self
            .ovr
            .trim()
            .parse()
            .with_context(|| format!("invalid ovr '{}'", self.ovr))?;

        let position = Position::from_abbr(&self.pos1).unwrap_or(Position::Unknown);
        let secondary_positions = [&self.pos2, &self.pos3]
            .into_iter()
            .filter_map(|p| Position::from_abbr(p))
            .collect();
        let jersey = self
            .jersey
            .as_deref()
            .and_then(|j| j.trim().parse::<u8>().ok());

        let mut player = Player::new(id, position, overall).with_name(self.given, self.sur);
        player.secondary_positions = secondary_positions;
        player.jersey = jersey;
        Ok(player)
    }
}

/// Load a club roster file.
///
/// Rows with a missing or non-numeric `playerid`/`ovr` are skipped with a
/// warning. Fails when no outfield player is left.
pub fn load_club_players(path: &Path) -> Result<Vec<Player>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("Failed to open player file: {}", path.display()))?;

    let mut players = Vec::new();
    for (line, result) in reader.deserialize::<ClubRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("{}: skipped row {}: {}", path.display(), line + 2, e);
                continue;
            }
        };
        let name = format!("{} {}", row.given, row.sur);
        match row.into_player() {
            Ok(player) => players.push(player),
            Err(e) => log::warn!("Skipped player with invalid data: {} - {:#}", name.trim(), e),
        }
    }

    let keepers = players.iter().filter(|p| p.is_goalkeeper()).count();
    if keepers == players.len() {
        bail!("No valid field players found in {}", path.display());
    }

    log::info!(
        "Loaded {} field players and {} goalkeepers from {}",
        players.len() - keepers,
        keepers,
        path.display()
    );
    Ok(players)
}

/// One row of the game's `players.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRow {
    pub player_id: u32,
    pub nationality: u32,
    pub gender: u8,
    /// `preferredposition1`
    pub position_code: i32,
    pub overall: u8,
    pub first_name: String,
    pub last_name: String,
}

impl PoolRow {
    pub fn position(&self) -> Position {
        u8::try_from(self.position_code).map_or(Position::CM, Position::from_game_code)
    }

    pub fn to_player(&self) -> Player {
        let mut player = Player::new(self.player_id, self.position(), self.overall)
            .with_name(self.first_name.clone(), self.last_name.clone());
        player.nationality = Some(self.nationality);
        player.gender = self.gender;
        player
    }
}

const REQUIRED_POOL_COLUMNS: [&str; 5] = [
    "playerid",
    "nationality",
    "gender",
    "preferredposition1",
    "overallrating",
];

/// Parse every usable row of `players.txt`.
///
/// Header names are matched case-insensitively. Rows that are too short or
/// hold non-numeric values are skipped.
pub fn read_player_pool(table: &TableFile) -> Result<Vec<PoolRow>> {
    let mut idx = [0usize; 5];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_POOL_COLUMNS) {
        *slot = table.column_ci(name).with_context(|| {
            format!(
                "Required column '{}' not found in {}",
                name,
                table.path().display()
            )
        })?;
    }
    let [id_col, nat_col, gender_col, pos_col, ovr_col] = idx;
    let min_len = idx.iter().max().copied().unwrap_or(0) + 1;
    let first_col = table.column_ci("firstname");
    let last_col = table.column_ci("surname");

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for cells in table.rows() {
        if cells.len() < min_len {
            skipped += 1;
            continue;
        }
        let parsed = (|| {
            Some(PoolRow {
                player_id: cells[id_col].parse().ok()?,
                nationality: cells[nat_col].parse().ok()?,
                gender: cells[gender_col].parse().ok()?,
                position_code: cells[pos_col].parse().ok()?,
                overall: cells[ovr_col].parse().ok()?,
                first_name: first_col
                    .and_then(|c| cells.get(c))
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                last_name: last_col
                    .and_then(|c| cells.get(c))
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            })
        })();
        match parsed {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }

    log::debug!(
        "Read {} player rows from {} ({} skipped)",
        rows.len(),
        table.path().display(),
        skipped
    );
    Ok(rows)
}

/// Men's players of `nation_id` that are not blacklisted
pub fn national_players(pool: &[PoolRow], nation_id: u32, blacklist: &Blacklist) -> Vec<Player> {
    pool.iter()
        .filter(|r| r.nationality == nation_id && r.gender == 0)
        .filter(|r| !blacklist.contains(r.player_id))
        .map(PoolRow::to_player)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_club_file_skips_bad_rows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Rovers.csv");
        fs::write(
            &path,
            "playerid\tovr\tpos1\tpos2\tpos3\tgiven\tsur\tjersey\n\
             1\t70\tGK\t\t\tAl\tKeeper\t1\n\
             2\t75\tRCB\tCB\t\tBo\tBack\t\n\
             x\t60\tST\t\t\tBad\tId\t9\n\
             3\t80\tST\tCF\tRW\tCy\tStriker\t9\n",
        )?;

        let players = load_club_players(&path)?;
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].jersey, Some(1));
        assert_eq!(players[1].position, Position::CB);
        assert_eq!(players[1].jersey, None);
        assert_eq!(players[2].secondary_positions, vec![Position::CF, Position::RW]);
        assert_eq!(players[2].display_name(), "Cy Striker");
        Ok(())
    }

    #[test]
    fn test_club_file_without_field_players() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Keepers.txt");
        fs::write(&path, "playerid\tovr\tpos1\tgiven\tsur\n1\t70\tGK\tA\tB\n")?;
        assert!(load_club_players(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_pool_filters_nation_gender_blacklist() -> Result<()> {
        let text = "PlayerID\tNationality\tGender\tPreferredPosition1\tOverallRating\n\
                    100\t219\t0\t25\t70\n\
                    101\t219\t1\t25\t80\n\
                    102\t54\t0\t0\t75\n\
                    27\t219\t0\t3\t90\n\
                    103\t219\t0\t21\n\
                    104\t219\t0\t0\t66\n";
        let table = TableFile::from_bytes(Path::new("players.txt"), text.as_bytes())?;
        let pool = read_player_pool(&table)?;
        assert_eq!(pool.len(), 5);

        let players = national_players(&pool, 219, &Blacklist::default());
        let ids: Vec<u32> = players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![100, 104]);
        assert_eq!(players[0].position, Position::ST);
        assert_eq!(players[1].position, Position::GK);
        assert_eq!(players[0].display_name(), "Player 100");
        Ok(())
    }

    #[test]
    fn test_pool_missing_column() {
        let table =
            TableFile::from_bytes(Path::new("players.txt"), b"playerid\tgender\n1\t0\n").unwrap();
        assert!(read_player_pool(&table).is_err());
    }
}
