//! Link tables: players, league, nation and stadium

use anyhow::{bail, Result};
use rustc_hash::FxHashSet;

use super::{TableWriter, TeamContext, WriteSummary};
use crate::table::TableFile;
use crate::template::RowTemplate;

const PLAYER_LINK_COLUMNS: [&str; 16] = [
    "leaguegoals",
    "isamongtopscorers",
    "yellows",
    "isamongtopscorersinteam",
    "jerseynumber",
    "position",
    "artificialkey",
    "teamid",
    "leaguegoalsprevmatch",
    "injury",
    "leagueappearances",
    "prevform",
    "istopscorer",
    "playerid",
    "form",
    "reds",
];

const NATION_LINK_COLUMNS: [&str; 3] = ["leagueid", "teamid", "nationid"];

/// Column positions used when the header does not name them
const ARTIFICIAL_KEY_COLUMN: usize = 6;
const TEAM_ID_COLUMN: usize = 7;
const PLAYER_ID_COLUMN: usize = 13;

const PLAYER_LINK_KEY_DEFAULT: u64 = 26_271;
const LEAGUE_LINK_KEY_DEFAULT: u64 = 0;

/// `teamplayerlinks.txt`: one link per squad member
pub struct PlayerLinksWriter;

impl PlayerLinksWriter {
    /// Link rows for the whole roster, keys starting at `first_key`
    pub fn rows(ctx: &TeamContext, first_key: u64) -> Vec<RowTemplate> {
        let positions = ctx.squad.link_position_ids(ctx.config.club_substitutes);
        ctx.squad
            .roster()
            .zip(positions)
            .enumerate()
            .map(|(i, (player, position))| {
                let jersey = player
                    .jersey
                    .filter(|&j| j > 0)
                    .map_or(i as u64 + 1, u64::from);
                let mut row = RowTemplate::with_capacity(PLAYER_LINK_COLUMNS.len());
                for column in PLAYER_LINK_COLUMNS {
                    let value = match column {
                        "jerseynumber" => jersey.to_string(),
                        "position" => position.to_string(),
                        "artificialkey" => (first_key + i as u64).to_string(),
                        "teamid" => ctx.team.id.to_string(),
                        "playerid" => player.id.to_string(),
                        _ => "0".to_string(),
                    };
                    row.push(column, value);
                }
                row
            })
            .collect()
    }

    /// Remove links that tie this squad's players to the free-agent team
    fn release_free_agents(table: &mut TableFile, ctx: &TeamContext) -> usize {
        let team_col = table.column("teamid").unwrap_or(TEAM_ID_COLUMN);
        let player_col = table.column("playerid").unwrap_or(PLAYER_ID_COLUMN);
        let free_agents = ctx.config.free_agent_team_id.to_string();
        let ours: FxHashSet<String> = ctx.squad.roster().map(|p| p.id.to_string()).collect();

        let removed = table.retain_rows(|cells| {
            let (Some(team), Some(player)) = (cells.get(team_col), cells.get(player_col)) else {
                return true;
            };
            !(*team == free_agents && ours.contains(*player))
        });
        if removed > 0 {
            log::info!(
                "Released {} players from free-agent team {} to team {}",
                removed,
                ctx.config.free_agent_team_id,
                ctx.team.id
            );
        }
        removed
    }
}

impl TableWriter for PlayerLinksWriter {
    fn file_name(&self) -> &'static str {
        "teamplayerlinks.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        PLAYER_LINK_COLUMNS.to_vec()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let key_col = table.column("artificialkey").unwrap_or(ARTIFICIAL_KEY_COLUMN);
        let first_key = table.next_id(Some(key_col), PLAYER_LINK_KEY_DEFAULT);

        let removed = if ctx.squad.is_national() {
            0
        } else {
            Self::release_free_agents(table, ctx)
        };

        let header = table.header().to_vec();
        let rows: Vec<String> = Self::rows(ctx, first_key)
            .iter()
            .map(|row| row.render(&header))
            .collect();
        table.append_rows(&rows);

        log::debug!(
            "Linked {} players to team {} (keys from {})",
            rows.len(),
            ctx.team.id,
            first_key
        );
        Ok(WriteSummary {
            rows_added: rows.len(),
            rows_removed: removed,
            first_id: Some(first_key),
        })
    }
}

/// `leagueteamlinks.txt`: puts the team into its league
pub struct LeagueTeamLinksWriter;

impl LeagueTeamLinksWriter {
    /// 34 values in game order; the column names of this table vary between
    /// game versions, so the row is always written positionally
    pub fn row(ctx: &TeamContext, key: u64) -> String {
        let league = ctx.team.league_id.to_string();
        let key = key.to_string();
        let team = ctx.team.id.to_string();
        let mut values = vec!["0"; 34];
        values[1] = "1";
        values[3] = "1";
        values[12] = &league;
        values[13] = &league;
        values[18] = &key;
        values[20] = &team;
        values[28] = "-1";
        values.join("\t")
    }
}

impl TableWriter for LeagueTeamLinksWriter {
    fn file_name(&self) -> &'static str {
        "leagueteamlinks.txt"
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let key = table.next_id(table.column("artificialkey"), LEAGUE_LINK_KEY_DEFAULT);
        table.append_rows(&[Self::row(ctx, key)]);
        log::debug!("Team {} linked to league {}", ctx.team.id, ctx.team.league_id);
        Ok(WriteSummary::added(1).with_id(key))
    }
}

/// `teamnationlinks.txt`: national teams only
pub struct NationLinksWriter;

impl TableWriter for NationLinksWriter {
    fn file_name(&self) -> &'static str {
        "teamnationlinks.txt"
    }

    fn columns(&self) -> Vec<&'static str> {
        NATION_LINK_COLUMNS.to_vec()
    }

    fn applies(&self, ctx: &TeamContext) -> bool {
        ctx.team.is_national()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let Some(nation_id) = ctx.team.nation_id() else {
            bail!("Team {} is not a national team", ctx.team.id);
        };
        let row = RowTemplate::from_columns(
            &NATION_LINK_COLUMNS,
            &[ctx.config.national_league_id, ctx.team.id, nation_id],
        );
        table.append_rows(&[row.render(table.header())]);
        Ok(WriteSummary::added(1))
    }
}

/// `teamstadiumlinks.txt`: only when a stadium was given
pub struct StadiumLinksWriter;

impl TableWriter for StadiumLinksWriter {
    fn file_name(&self) -> &'static str {
        "teamstadiumlinks.txt"
    }

    fn applies(&self, ctx: &TeamContext) -> bool {
        ctx.team.stadium_id.is_some()
    }

    fn apply(&self, table: &mut TableFile, ctx: &TeamContext) -> Result<WriteSummary> {
        let Some(stadium_id) = ctx.team.stadium_id else {
            bail!("No stadium given for team {}", ctx.team.id);
        };
        let row = format!("0\t{}\t{}\t0", stadium_id, ctx.team.id);
        table.append_rows(&[row]);
        Ok(WriteSummary::added(1))
    }
}
