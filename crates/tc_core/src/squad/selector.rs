//! Starting XI selection
//!
//! Greedy three-pass fill over the formation's slots:
//!
//! 1. every slot takes the unused player with the best
//!    `overall - priority * penalty` among its acceptable positions
//!    (goalkeeper slot: best unused goalkeeper);
//! 2. empty outfield slots take the first unused player found by walking the
//!    slot line's fallback positions;
//! 3. anything still empty takes the best unused player of the right kind.

use rustc_hash::FxHashSet;

use crate::error::{Result, SquadError};
use crate::models::Player;
use crate::tactics::{Formation, SLOT_COUNT};

use super::slots::SlotRule;

/// How a starter ended up in their slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFit {
    /// Primary position is the slot's first choice
    Natural,
    /// Primary position is further down the slot's list
    Adapted { penalty: i32 },
    /// Picked from the slot line's fallback positions
    Backup,
    /// Any remaining player
    LastResort,
}

/// A filled lineup slot
#[derive(Debug, Clone, PartialEq)]
pub struct LineupSlot {
    pub rule: SlotRule,
    pub player: Player,
    pub fit: SlotFit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartingXi {
    pub slots: Vec<LineupSlot>,
}

impl StartingXi {
    pub fn player_ids(&self) -> Vec<u32> {
        self.slots.iter().map(|s| s.player.id).collect()
    }

    pub fn contains(&self, player_id: u32) -> bool {
        self.slots.iter().any(|s| s.player.id == player_id)
    }

    pub fn position_codes(&self) -> Vec<u8> {
        self.slots.iter().map(|s| s.rule.code).collect()
    }
}

/// Split a pool into goalkeepers and outfield players, both by OVR desc
pub fn split_by_overall(pool: &[Player]) -> (Vec<&Player>, Vec<&Player>) {
    let (mut keepers, mut outfield): (Vec<&Player>, Vec<&Player>) =
        pool.iter().partition(|p| p.is_goalkeeper());
    keepers.sort_by(|a, b| b.overall.cmp(&a.overall));
    outfield.sort_by(|a, b| b.overall.cmp(&a.overall));
    (keepers, outfield)
}

/// Pick the eleven starters for `formation` from `pool`
pub fn build_starting_xi(
    pool: &[Player],
    formation: &Formation,
    position_penalty: i32,
) -> Result<StartingXi> {
    formation.validate()?;

    let rules = formation
        .position_codes()
        .iter()
        .map(|&code| {
            SlotRule::for_code(code).ok_or_else(|| {
                SquadError::InvalidFormation(format!("unknown position code {code}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (keepers, outfield) = split_by_overall(pool);
    if outfield.is_empty() {
        return Err(SquadError::NoOutfieldPlayers);
    }

    log::info!(
        "Building starting XI ({}): {} GKs, {} outfield players, penalty {}",
        formation.name,
        keepers.len(),
        outfield.len(),
        position_penalty
    );

    let mut picks: Vec<Option<(&Player, SlotFit)>> = vec![None; SLOT_COUNT];
    let mut used: FxHashSet<u32> = FxHashSet::default();

    // Pass 1: acceptable positions scored with the penalty
    for (idx, rule) in rules.iter().enumerate() {
        if rule.is_goalkeeper() {
            if let Some(gk) = keepers.iter().copied().find(|p| !used.contains(&p.id)) {
                used.insert(gk.id);
                picks[idx] = Some((gk, SlotFit::Natural));
            }
            continue;
        }

        let mut best: Option<(&Player, i32, usize)> = None;
        for (priority, &accepted) in rule.accepts.iter().enumerate() {
            for player in outfield.iter().copied().filter(|p| p.position == accepted) {
                if used.contains(&player.id) {
                    continue;
                }
                let score = i32::from(player.overall) - priority as i32 * position_penalty;
                if best.map_or(true, |(_, s, _)| score > s) {
                    best = Some((player, score, priority));
                }
            }
        }

        if let Some((player, _, priority)) = best {
            used.insert(player.id);
            let fit = if priority == 0 {
                SlotFit::Natural
            } else {
                SlotFit::Adapted {
                    penalty: priority as i32 * position_penalty,
                }
            };
            picks[idx] = Some((player, fit));
        }
    }

    // Pass 2: line fallbacks
    for (idx, rule) in rules.iter().enumerate() {
        if picks[idx].is_some() || rule.is_goalkeeper() {
            continue;
        }
        let found = rule.fallback_order().into_iter().find_map(|pos| {
            outfield
                .iter()
                .find(|p| p.position == pos && !used.contains(&p.id))
                .copied()
        });
        if let Some(player) = found {
            used.insert(player.id);
            picks[idx] = Some((player, SlotFit::Backup));
        }
    }

    // Pass 3: whoever is left
    for (idx, rule) in rules.iter().enumerate() {
        if picks[idx].is_some() {
            continue;
        }
        let candidates = if rule.is_goalkeeper() {
            &keepers
        } else {
            &outfield
        };
        if let Some(player) = candidates.iter().copied().find(|p| !used.contains(&p.id)) {
            used.insert(player.id);
            picks[idx] = Some((player, SlotFit::LastResort));
        }
    }

    let mut slots = Vec::with_capacity(SLOT_COUNT);
    for (idx, (rule, pick)) in rules.into_iter().zip(picks).enumerate() {
        let (player, fit) = pick.ok_or(SquadError::IncompleteLineup {
            slot: idx,
            name: rule.name,
        })?;
        log::debug!(
            "  [{}] {}: {} ({}, OVR {}) {:?}",
            idx,
            rule.name,
            player.display_name(),
            player.position,
            player.overall,
            fit
        );
        slots.push(LineupSlot {
            rule,
            player: player.clone(),
            fit,
        });
    }

    Ok(StartingXi { slots })
}

/// Captain: highest-rated outfield starter, first in slot order on ties.
///
/// Falls back to the goalkeeper when no outfield starter exists.
pub fn pick_captain(xi: &StartingXi) -> Option<u32> {
    let mut captain: Option<&Player> = None;
    for slot in xi.slots.iter().filter(|s| !s.player.is_goalkeeper()) {
        if captain.map_or(true, |c| slot.player.overall > c.overall) {
            captain = Some(&slot.player);
        }
    }
    captain
        .or_else(|| xi.slots.first().map(|s| &s.player))
        .map(|p| p.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use crate::models::Position::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn p(id: u32, position: Position, overall: u8) -> Player {
        Player::new(id, position, overall)
    }

    /// Two goalkeepers plus a natural player for every 4-3-3 slot
    fn full_pool() -> Vec<Player> {
        vec![
            p(1, GK, 80),
            p(2, GK, 70),
            p(3, RB, 75),
            p(4, CB, 78),
            p(5, CB, 77),
            p(6, LB, 74),
            p(7, CDM, 76),
            p(8, CM, 79),
            p(9, CM, 73),
            p(10, RW, 81),
            p(11, ST, 85),
            p(12, LW, 80),
            p(13, CB, 65),
            p(14, ST, 66),
        ]
    }

    #[test]
    fn test_natural_positions_fill_433() {
        let xi = build_starting_xi(&full_pool(), &Formation::default(), 3).unwrap();
        assert_eq!(xi.player_ids(), vec![1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert!(xi.slots.iter().all(|s| s.fit == SlotFit::Natural));
        assert_eq!(xi.position_codes(), vec![0, 3, 4, 6, 7, 10, 13, 15, 23, 25, 27]);
    }

    #[test]
    fn test_high_rated_adapted_player_beats_weak_natural() {
        let mut pool = full_pool();
        // 85 RM scores 82 at RW; beats the 70 RW
        pool.retain(|pl| pl.id != 10);
        pool.push(p(20, RW, 70));
        pool.push(p(21, RM, 85));

        let xi = build_starting_xi(&pool, &Formation::default(), 3).unwrap();
        let rw = &xi.slots[8];
        assert_eq!(rw.player.id, 21);
        assert_eq!(rw.fit, SlotFit::Adapted { penalty: 3 });
    }

    #[test]
    fn test_tie_keeps_higher_priority_position() {
        // RW 80 vs RM 83 (83 - 3 = 80): tie goes to the natural RW
        let mut pool = full_pool();
        pool.retain(|pl| pl.id != 10);
        pool.push(p(20, RW, 80));
        pool.push(p(21, RM, 83));

        let xi = build_starting_xi(&pool, &Formation::default(), 3).unwrap();
        assert_eq!(xi.slots[8].player.id, 20);
    }

    #[test]
    fn test_backup_pass_uses_line_order() {
        // No full backs or wide backs at all: RB falls through to the
        // defense line search and then midfield.
        let pool = vec![
            p(1, GK, 70),
            p(2, CB, 70),
            p(3, CB, 69),
            p(4, CM, 75),
            p(5, CM, 74),
            p(6, CM, 73),
            p(7, CM, 72),
            p(8, CM, 71),
            p(9, ST, 80),
            p(10, ST, 79),
            p(11, ST, 78),
        ];
        let xi = build_starting_xi(&pool, &Formation::default(), 3).unwrap();
        assert_eq!(xi.slots.len(), 11);
        assert!(xi
            .slots
            .iter()
            .any(|s| matches!(s.fit, SlotFit::Backup | SlotFit::LastResort)));
        let unique: HashSet<u32> = xi.player_ids().into_iter().collect();
        assert_eq!(unique.len(), 11);
    }

    #[test]
    fn test_no_outfield_players() {
        let pool = vec![p(1, GK, 70), p(2, GK, 60)];
        assert_eq!(
            build_starting_xi(&pool, &Formation::default(), 3),
            Err(SquadError::NoOutfieldPlayers)
        );
    }

    #[test]
    fn test_missing_goalkeeper_is_incomplete() {
        let pool: Vec<Player> = full_pool().into_iter().filter(|pl| !pl.is_goalkeeper()).collect();
        assert_eq!(
            build_starting_xi(&pool, &Formation::default(), 3),
            Err(SquadError::IncompleteLineup { slot: 0, name: "GK" })
        );
    }

    #[test]
    fn test_short_pool_is_incomplete() {
        let pool = vec![p(1, GK, 70), p(2, CB, 70), p(3, ST, 70)];
        assert!(matches!(
            build_starting_xi(&pool, &Formation::default(), 3),
            Err(SquadError::IncompleteLineup { .. })
        ));
    }

    #[test]
    fn test_captain_highest_outfield() {
        let xi = build_starting_xi(&full_pool(), &Formation::default(), 3).unwrap();
        assert_eq!(pick_captain(&xi), Some(11));
    }

    #[test]
    fn test_captain_first_on_ties() {
        let mut pool = full_pool();
        for pl in pool.iter_mut().filter(|pl| !pl.is_goalkeeper()) {
            pl.overall = 70;
        }
        let xi = build_starting_xi(&pool, &Formation::default(), 3).unwrap();
        assert_eq!(pick_captain(&xi), Some(xi.slots[1].player.id));
    }

    fn arb_player(id: u32) -> impl Strategy<Value = Player> {
        (0u8..=27, 40u8..=99).prop_map(move |(code, ovr)| {
            Player::new(id, Position::from_game_code(code), ovr)
        })
    }

    fn arb_pool() -> impl Strategy<Value = Vec<Player>> {
        (11usize..40).prop_flat_map(|n| {
            (0..n as u32)
                .map(arb_player)
                .collect::<Vec<_>>()
        })
    }

    proptest! {
        #[test]
        fn prop_xi_unique_and_captain_starts(pool in arb_pool()) {
            let has_gk = pool.iter().any(|pl| pl.is_goalkeeper());
            let outfield = pool.iter().filter(|pl| !pl.is_goalkeeper()).count();
            match build_starting_xi(&pool, &Formation::default(), 3) {
                Ok(xi) => {
                    let ids: HashSet<u32> = xi.player_ids().into_iter().collect();
                    prop_assert_eq!(ids.len(), 11);
                    prop_assert!(xi.slots[0].player.is_goalkeeper());
                    prop_assert!(xi.slots[1..].iter().all(|s| !s.player.is_goalkeeper()));
                    let captain = pick_captain(&xi).unwrap();
                    prop_assert!(xi.contains(captain));
                }
                Err(_) => prop_assert!(!has_gk || outfield < 10),
            }
        }
    }
}
