//! Formation Presets
//!
//! Formations written to `formations.txt` and `default_mentalities.txt`.
//! Every value is kept as the literal string the game files expect, so a
//! preset can be emitted without re-formatting floats (`"0.4995"`, `"3.5"`).
//!
//! Only four presets ship a full pitch layout; the others reuse the default
//! 4-3-3 layout and differ by name, audio id and full-name id.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SquadError;

/// Number of players on the pitch
pub const SLOT_COUNT: usize = 11;

/// Highest position code the game knows
pub const MAX_POSITION_CODE: u8 = 27;

/// One of the eleven pitch positions of a formation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub offset_x: String,
    pub offset_y: String,
    /// Role id (`posNrole`)
    pub role: String,
    /// Game position code (`positionN`)
    pub position_code: u8,
}

impl FormationSlot {
    fn new(offset_x: &str, offset_y: &str, role: &str, position_code: u8) -> Self {
        Self {
            offset_x: offset_x.to_string(),
            offset_y: offset_y.to_string(),
            role: role.to_string(),
            position_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formation {
    /// Id of the preset in the stock formations table
    pub source_id: Option<u32>,
    pub name: String,
    pub audio_id: String,
    pub fullname_id: String,
    pub defenders: String,
    pub midfielders: String,
    pub attackers: String,
    pub offensive_rating: String,
    pub relative_formation_id: String,
    pub defensive_depth: String,
    pub build_up_play: String,
    pub tactic_name: String,
    pub slots: [FormationSlot; SLOT_COUNT],
}

impl Default for Formation {
    /// Default 4-3-3 used when no preset is chosen
    fn default() -> Self {
        Self {
            source_id: None,
            name: "4-3-3".to_string(),
            audio_id: "6".to_string(),
            fullname_id: "7".to_string(),
            defenders: "4".to_string(),
            midfielders: "3".to_string(),
            attackers: "3".to_string(),
            offensive_rating: "3".to_string(),
            relative_formation_id: "9".to_string(),
            defensive_depth: "50".to_string(),
            build_up_play: "2".to_string(),
            tactic_name: String::new(),
            slots: [
                FormationSlot::new("0.497", "0.0175", "4161", 0),
                FormationSlot::new("0.9", "0.175", "8386", 3),
                FormationSlot::new("0.6731", "0.1537", "12737", 4),
                FormationSlot::new("0.325", "0.15", "12737", 6),
                FormationSlot::new("0.075", "0.2", "8386", 7),
                FormationSlot::new("0.5", "0.3375", "17089", 10),
                FormationSlot::new("0.65", "0.5125", "21314", 13),
                FormationSlot::new("0.35", "0.5125", "21314", 15),
                FormationSlot::new("0.925", "0.825", "33794", 23),
                FormationSlot::new("0.4995", "0.875", "12737", 25),
                FormationSlot::new("0.075", "0.825", "33794", 27),
            ],
        }
    }
}

impl Formation {
    /// Position codes of the eleven slots, in slot order
    pub fn position_codes(&self) -> [u8; SLOT_COUNT] {
        let mut codes = [0u8; SLOT_COUNT];
        for (code, slot) in codes.iter_mut().zip(self.slots.iter()) {
            *code = slot.position_code;
        }
        codes
    }

    /// Slot 0 must be the goalkeeper and no other slot may be one
    pub fn validate(&self) -> Result<(), SquadError> {
        if self.slots[0].position_code != 0 {
            return Err(SquadError::InvalidFormation(format!(
                "{}: slot 0 must be the goalkeeper (code 0), found {}",
                self.name, self.slots[0].position_code
            )));
        }
        for (idx, slot) in self.slots.iter().enumerate().skip(1) {
            if slot.position_code == 0 || slot.position_code > MAX_POSITION_CODE {
                return Err(SquadError::InvalidFormation(format!(
                    "{}: slot {} has invalid position code {}",
                    self.name, idx, slot.position_code
                )));
            }
        }
        Ok(())
    }

    fn preset(id: u32, name: &str, audio_id: u8, fullname_id: u8) -> Self {
        Self {
            source_id: Some(id),
            name: name.to_string(),
            audio_id: audio_id.to_string(),
            fullname_id: fullname_id.to_string(),
            ..Self::default()
        }
    }

    fn with_shape(
        mut self,
        defenders: &str,
        midfielders: &str,
        attackers: &str,
        defensive_depth: &str,
        build_up_play: &str,
    ) -> Self {
        self.defenders = defenders.to_string();
        self.midfielders = midfielders.to_string();
        self.attackers = attackers.to_string();
        self.defensive_depth = defensive_depth.to_string();
        self.build_up_play = build_up_play.to_string();
        self
    }

    fn with_slots(mut self, slots: [(&str, &str, &str, u8); SLOT_COUNT]) -> Self {
        for (slot, (x, y, role, code)) in self.slots.iter_mut().zip(slots) {
            *slot = FormationSlot::new(x, y, role, code);
        }
        self
    }
}

// ============================================================================
// Stock presets
// ============================================================================

/// All stock formations, in the order the game lists them
pub fn stock_formations() -> Vec<Formation> {
    vec![
        Formation::preset(785, "3-1-4-2", 1, 28)
            .with_shape("3.5", "4.5", "2", "50", "2")
            .with_slots([
                ("0.5", "0.0175", "4161", 0),
                ("0.675", "0.15", "12737", 4),
                ("0.5", "0.15", "12737", 5),
                ("0.325", "0.15", "12737", 6),
                ("0.5", "0.3375", "17089", 10),
                ("0.925", "0.5875", "25730", 12),
                ("0.65", "0.5125", "21445", 13),
                ("0.35", "0.5125", "21185", 15),
                ("0.075", "0.5875", "25602", 16),
                ("0.6", "0.875", "38341", 24),
                ("0.39", "0.875", "38275", 26),
            ]),
        Formation::preset(848, "3-4-1-2", 1, 29)
            .with_shape("3", "4.5", "2.5", "30", "3")
            .with_slots([
                ("0.5", "0.0175", "4161", 0),
                ("0.675", "0.15", "12802", 4),
                ("0.5", "0.15", "12737", 5),
                ("0.325", "0.15", "12737", 6),
                ("0.925", "0.5875", "25602", 12),
                ("0.65", "0.5125", "21314", 13),
                ("0.35", "0.5125", "21314", 15),
                ("0.075", "0.5875", "25602", 16),
                ("0.5", "0.6625", "29570", 18),
                ("0.6", "0.875", "38405", 24),
                ("0.39", "0.875", "38405", 26),
            ]),
        Formation::preset(720, "3-4-2-1", 19, 21),
        Formation::preset(823, "3-4-3", 0, 2),
        Formation::preset(845, "3-5-2", 1, 22),
        Formation::preset(733, "4-1-2-1-2", 11, 9),
        Formation::preset(215, "4-1-3-2", 12, 30),
        Formation::preset(834, "4-1-4-1", 15, 31),
        Formation::preset(761, "4-2-1-3", 18, 27),
        Formation::preset(624, "4-2-2-2", 10, 32),
        Formation::preset(841, "4-2-3-1", 14, 16),
        Formation::preset(755, "4-2-4", 2, 33),
        Formation::preset(746, "4-3-1-2", 9, 34),
        Formation::preset(604, "4-3-2-1", 8, 20),
        four_three_three(),
        Formation::preset(656, "4-4-1-1", 14, 18),
        Formation::preset(842, "4-4-2", 10, 11)
            .with_shape("4", "4", "2", "50", "3")
            .with_slots([
                ("0.5", "0.0175", "4226", 0),
                ("0.925", "0.2", "8450", 3),
                ("0.675", "0.15", "12802", 4),
                ("0.325", "0.15", "12737", 6),
                ("0.075", "0.2", "8513", 7),
                ("0.925", "0.5875", "25794", 12),
                ("0.65", "0.5125", "21381", 13),
                ("0.35", "0.5125", "21314", 15),
                ("0.075", "0.5875", "25794", 16),
                ("0.6", "0.875", "38341", 24),
                ("0.39", "0.875", "38213", 26),
            ]),
        Formation::preset(808, "4-5-1", 15, 19),
        Formation::preset(567, "5-2-1-2", 4, 35),
        Formation::preset(846, "5-2-3", 3, 36),
        Formation::preset(843, "5-3-2", 4, 24),
        Formation::preset(686, "5-4-1", 5, 14),
    ]
}

/// Stock 4-3-3; differs from the default layout by the striker role
fn four_three_three() -> Formation {
    let mut formation = Formation::preset(849, "4-3-3", 6, 7);
    formation.slots[9].role = "38405".to_string();
    formation
}

/// Look up a formation by name (case-insensitive) in `formations`
pub fn find_formation<'a>(formations: &'a [Formation], name: &str) -> Option<&'a Formation> {
    let wanted = name.trim();
    formations
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(wanted))
}

/// Pick a random formation from `formations`
pub fn random_formation<'a, R: Rng + ?Sized>(
    formations: &'a [Formation],
    rng: &mut R,
) -> Option<&'a Formation> {
    formations.choose(rng)
}
