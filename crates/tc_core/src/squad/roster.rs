//! Full squad: starters, bench, link positions and teamsheet layout
//!
//! One `Squad` feeds every writer, so the teamsheet, the mentality and the
//! player links always agree on who is in the team.

use crate::config::CreatorConfig;
use crate::error::Result;
use crate::models::{Player, PositionGroup, TeamKind};
use crate::tactics::{Formation, SLOT_COUNT};

use super::selector::{build_starting_xi, pick_captain, split_by_overall, StartingXi};

/// Link position id of a substitute
pub const SUBSTITUTE_POSITION: u8 = 28;
/// Link position id of a reserve
pub const RESERVE_POSITION: u8 = 29;

#[derive(Debug, Clone, PartialEq)]
pub struct Squad {
    pub kind: TeamKind,
    pub xi: StartingXi,
    /// Non-starters in roster order: backup goalkeepers first, then outfield
    pub bench: Vec<Player>,
    pub captain_id: u32,
}

/// Who takes which set piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPieceTakers {
    pub free_kick: u32,
    pub right_free_kick: u32,
    pub left_free_kick: u32,
    pub right_corner: u32,
    pub left_corner: u32,
    pub penalty: u32,
    pub long_kick: Option<u32>,
}

/// Build the starting XI, captain and bench for a team
pub fn build_squad(
    pool: &[Player],
    formation: &Formation,
    kind: TeamKind,
    config: &CreatorConfig,
) -> Result<Squad> {
    let xi = build_starting_xi(pool, formation, config.position_penalty)?;
    // XI is never empty here, so there is always a captain
    let captain_id = pick_captain(&xi).unwrap_or(xi.slots[0].player.id);

    let (keepers, outfield) = split_by_overall(pool);
    let backup_keepers: Vec<&Player> = keepers.into_iter().filter(|p| !xi.contains(p.id)).collect();
    let outfield: Vec<&Player> = outfield.into_iter().filter(|p| !xi.contains(p.id)).collect();

    let bench: Vec<Player> = match kind {
        TeamKind::Club => backup_keepers
            .into_iter()
            .chain(outfield)
            .cloned()
            .collect(),
        TeamKind::National { .. } => {
            let keeper = backup_keepers.first().copied();
            let bench_size = usize::from(keeper.is_some()) + outfield.len();
            if SLOT_COUNT + bench_size > config.national_squad_size {
                log::info!(
                    "Limiting national squad from {} to {} players",
                    SLOT_COUNT + bench_size,
                    config.national_squad_size
                );
                balanced_bench(
                    keeper,
                    &outfield,
                    config.national_squad_size.saturating_sub(SLOT_COUNT),
                )
            } else {
                keeper.into_iter().chain(outfield).cloned().collect()
            }
        }
    };

    log::info!(
        "Squad: {} starters, {} bench, captain {}",
        SLOT_COUNT,
        bench.len(),
        captain_id
    );

    Ok(Squad {
        kind,
        xi,
        bench,
        captain_id,
    })
}

/// One backup keeper, a third of the spots each to defenders and midfielders,
/// the rest to forwards, then best remaining by OVR
fn balanced_bench(keeper: Option<&Player>, outfield: &[&Player], spots: usize) -> Vec<Player> {
    let mut bench: Vec<&Player> = keeper.filter(|_| spots > 0).into_iter().collect();
    let spots = spots.saturating_sub(bench.len());

    let defenders = in_line(outfield, PositionGroup::Defense);
    let midfielders = in_line(outfield, PositionGroup::Midfield);
    let forwards = in_line(outfield, PositionGroup::Attack);

    let def_count = defenders.len().min(spots / 3);
    let mid_count = midfielders.len().min(spots / 3);
    let fwd_count = forwards.len().min(spots - def_count - mid_count);

    bench.extend(&defenders[..def_count]);
    bench.extend(&midfielders[..mid_count]);
    bench.extend(&forwards[..fwd_count]);

    let missing = spots - (def_count + mid_count + fwd_count);
    let top_up: Vec<&Player> = outfield
        .iter()
        .copied()
        .filter(|p| !bench.iter().any(|b| b.id == p.id))
        .take(missing)
        .collect();
    bench.extend(top_up);

    bench.into_iter().cloned().collect()
}

fn in_line<'a>(players: &[&'a Player], group: PositionGroup) -> Vec<&'a Player> {
    players
        .iter()
        .copied()
        .filter(|p| p.position.group() == group)
        .collect()
}

impl Squad {
    /// Starters then bench
    pub fn roster(&self) -> impl Iterator<Item = &Player> {
        self.xi.slots.iter().map(|s| &s.player).chain(self.bench.iter())
    }

    pub fn len(&self) -> usize {
        self.xi.slots.len() + self.bench.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, player_id: u32) -> bool {
        self.roster().any(|p| p.id == player_id)
    }

    pub fn is_national(&self) -> bool {
        matches!(self.kind, TeamKind::National { .. })
    }

    /// Link position id per roster member, in roster order.
    ///
    /// Starters get their slot code. National benches are all substitutes;
    /// club benches have `club_substitutes` substitutes, then reserves.
    pub fn link_position_ids(&self, club_substitutes: usize) -> Vec<u8> {
        let mut ids = self.xi.position_codes();
        for idx in 0..self.bench.len() {
            let id = if self.is_national() || idx < club_substitutes {
                SUBSTITUTE_POSITION
            } else {
                RESERVE_POSITION
            };
            ids.push(id);
        }
        ids
    }

    /// Player id per teamsheet slot (`playerid0..`), `None` for empty slots.
    ///
    /// Starters fill 0..11; the bench follows with goalkeepers first and
    /// outfield players ordered by position then OVR. Players past
    /// `slot_count` are dropped.
    pub fn teamsheet_slots(&self, slot_count: usize) -> Vec<Option<u32>> {
        let mut ordered: Vec<&Player> = self.bench.iter().filter(|p| p.is_goalkeeper()).collect();
        let mut outfield: Vec<&Player> = self.bench.iter().filter(|p| !p.is_goalkeeper()).collect();
        outfield.sort_by(|a, b| {
            a.position
                .sort_rank()
                .cmp(&b.position.sort_rank())
                .then(b.overall.cmp(&a.overall))
        });
        ordered.extend(outfield);

        let mut slots: Vec<Option<u32>> = self.xi.slots.iter().map(|s| Some(s.player.id)).collect();
        let bench_room = slot_count.saturating_sub(slots.len());
        if ordered.len() > bench_room {
            log::warn!(
                "More than {} bench players, {} left off the teamsheet",
                bench_room,
                ordered.len() - bench_room
            );
        }
        slots.extend(ordered.into_iter().take(bench_room).map(|p| Some(p.id)));
        slots.resize(slot_count.max(SLOT_COUNT), None);
        slots
    }

    /// Set-piece takers by lineup slot, falling back to the captain
    pub fn set_piece_takers(&self) -> SetPieceTakers {
        let at = |idx: usize| self.xi.slots.get(idx).map(|s| s.player.id);
        let captain = self.captain_id;

        let right_side = at(10).or(at(9)).unwrap_or(captain);
        let left_side = at(8).or(at(9)).unwrap_or(captain);

        SetPieceTakers {
            free_kick: right_side,
            right_free_kick: right_side,
            left_free_kick: left_side,
            right_corner: right_side,
            left_corner: left_side,
            penalty: at(9).unwrap_or(captain),
            long_kick: at(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position::{self, *};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn p(id: u32, position: Position, overall: u8) -> Player {
        Player::new(id, position, overall)
    }

    /// 4-3-3 XI (ids 1-11) plus `extra` bench players
    fn pool_with(extra: Vec<Player>) -> Vec<Player> {
        let mut pool = vec![
            p(1, GK, 80),
            p(2, RB, 75),
            p(3, CB, 78),
            p(4, CB, 77),
            p(5, LB, 74),
            p(6, CDM, 76),
            p(7, CM, 79),
            p(8, CM, 78),
            p(9, RW, 81),
            p(10, ST, 85),
            p(11, LW, 80),
        ];
        pool.extend(extra);
        pool
    }

    fn national() -> TeamKind {
        TeamKind::National { nation_id: 219 }
    }

    #[test]
    fn test_club_bench_keeps_everyone() {
        let pool = pool_with(vec![p(20, GK, 60), p(21, ST, 70), p(22, GK, 65), p(23, CB, 72)]);
        let squad = build_squad(&pool, &Formation::default(), TeamKind::Club, &CreatorConfig::default())
            .unwrap();
        let bench: Vec<u32> = squad.bench.iter().map(|p| p.id).collect();
        assert_eq!(bench, vec![22, 20, 23, 21]);
        assert_eq!(squad.len(), 15);
        assert_eq!(squad.captain_id, 10);
    }

    #[test]
    fn test_national_single_backup_keeper() {
        let pool = pool_with(vec![p(20, GK, 60), p(22, GK, 65), p(23, CB, 72)]);
        let squad = build_squad(&pool, &Formation::default(), national(), &CreatorConfig::default())
            .unwrap();
        let bench: Vec<u32> = squad.bench.iter().map(|p| p.id).collect();
        assert_eq!(bench, vec![22, 23]);
        assert!(!squad.contains(20));
    }

    #[test]
    fn test_national_cap_balances_lines() {
        // 30 extra outfield players: 10 per line
        let mut extra = vec![p(100, GK, 60)];
        for i in 0..10 {
            extra.push(p(200 + i, CB, 70 - i as u8));
            extra.push(p(300 + i, CM, 75 - i as u8));
            extra.push(p(400 + i, ST, 72 - i as u8));
        }
        let pool = pool_with(extra);
        let config = CreatorConfig::default();
        let squad = build_squad(&pool, &Formation::default(), national(), &config).unwrap();

        assert_eq!(squad.len(), 26);
        assert_eq!(squad.bench[0].id, 100);
        let count = |group: PositionGroup| {
            squad.bench.iter().filter(|p| p.position.group() == group).count()
        };
        // 14 spots after the keeper: 4 + 4 + 6
        assert_eq!(count(PositionGroup::Defense), 4);
        assert_eq!(count(PositionGroup::Midfield), 4);
        assert_eq!(count(PositionGroup::Attack), 6);
        assert!(squad.contains(200) && squad.contains(300) && squad.contains(400));
    }

    #[test]
    fn test_national_cap_tops_up_short_lines() {
        // Only midfielders on the bench: 4 via the line quota, rest by OVR
        let mut extra = vec![p(100, GK, 60)];
        for i in 0..20 {
            extra.push(p(300 + i, CM, 80 - i as u8));
        }
        let squad = build_squad(
            &pool_with(extra),
            &Formation::default(),
            national(),
            &CreatorConfig::default(),
        )
        .unwrap();
        assert_eq!(squad.len(), 26);
        assert!(squad.bench[1..]
            .iter()
            .all(|p| p.position.group() == PositionGroup::Midfield));
    }

    #[test]
    fn test_national_cap_below_xi_keeps_starters_only() {
        let extra = (20..29).map(|id| p(id, CM, 60)).collect();
        let pool = pool_with(extra);
        let config = CreatorConfig {
            national_squad_size: 10,
            ..CreatorConfig::default()
        };
        let squad = build_squad(&pool, &Formation::default(), national(), &config).unwrap();
        assert_eq!(squad.len(), SLOT_COUNT);
        assert!(squad.bench.is_empty());
    }

    #[test]
    fn test_link_position_ids() {
        let extra: Vec<Player> = (0..10).map(|i| p(50 + i, CM, 60)).collect();
        let pool = pool_with(extra);
        let config = CreatorConfig::default();

        let club = build_squad(&pool, &Formation::default(), TeamKind::Club, &config).unwrap();
        let ids = club.link_position_ids(config.club_substitutes);
        assert_eq!(&ids[..11], &[0, 3, 4, 6, 7, 10, 13, 15, 23, 25, 27]);
        assert_eq!(ids[11..18], [28; 7]);
        assert_eq!(ids[18..], [29; 3]);

        let nt = build_squad(&pool, &Formation::default(), national(), &config).unwrap();
        let ids = nt.link_position_ids(config.club_substitutes);
        assert!(ids[11..].iter().all(|&id| id == SUBSTITUTE_POSITION));
    }

    #[test]
    fn test_teamsheet_bench_order() {
        let pool = pool_with(vec![p(20, ST, 70), p(21, CB, 60), p(22, GK, 50), p(23, CB, 65)]);
        let squad = build_squad(&pool, &Formation::default(), TeamKind::Club, &CreatorConfig::default())
            .unwrap();
        let slots = squad.teamsheet_slots(52);
        assert_eq!(slots.len(), 52);
        assert_eq!(slots[0], Some(1));
        assert_eq!(&slots[11..15], &[Some(22), Some(23), Some(21), Some(20)]);
        assert!(slots[15..].iter().all(|s| s.is_none()));
    }

    #[test]
    fn test_teamsheet_overflow_dropped() {
        let extra: Vec<Player> = (0..50).map(|i| p(100 + i, CM, 60)).collect();
        let squad = build_squad(
            &pool_with(extra),
            &Formation::default(),
            TeamKind::Club,
            &CreatorConfig::default(),
        )
        .unwrap();
        let slots = squad.teamsheet_slots(52);
        assert_eq!(slots.len(), 52);
        assert!(slots.iter().all(|s| s.is_some()));
    }

    #[test]
    fn test_set_piece_takers() {
        let squad = build_squad(
            &pool_with(Vec::new()),
            &Formation::default(),
            TeamKind::Club,
            &CreatorConfig::default(),
        )
        .unwrap();
        let takers = squad.set_piece_takers();
        assert_eq!(takers.right_free_kick, 11);
        assert_eq!(takers.free_kick, 11);
        assert_eq!(takers.right_corner, 11);
        assert_eq!(takers.left_free_kick, 9);
        assert_eq!(takers.left_corner, 9);
        assert_eq!(takers.penalty, 10);
        assert_eq!(takers.long_kick, Some(1));
    }

    fn arb_pool() -> impl Strategy<Value = Vec<Player>> {
        prop::collection::vec((0u8..=27, 40u8..=99), 11..60).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (code, ovr))| Player::new(i as u32 + 1, Position::from_game_code(code), ovr))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_national_roster_consistent(pool in arb_pool()) {
            let config = CreatorConfig::default();
            if let Ok(squad) = build_squad(&pool, &Formation::default(), national(), &config) {
                prop_assert!(squad.len() <= config.national_squad_size);
                let ids: HashSet<u32> = squad.roster().map(|p| p.id).collect();
                prop_assert_eq!(ids.len(), squad.len());
                prop_assert!(squad.contains(squad.captain_id));
                prop_assert!(squad.bench.iter().filter(|p| p.is_goalkeeper()).count() <= 1);
                for id in squad.teamsheet_slots(config.teamsheet_slots).into_iter().flatten() {
                    prop_assert!(ids.contains(&id));
                }
                prop_assert_eq!(squad.link_position_ids(config.club_substitutes).len(), squad.len());
            }
        }
    }
}
