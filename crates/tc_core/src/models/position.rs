use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard playing position.
///
/// Side variants used by the game (RCB, LDM, RS, ...) collapse onto the
/// central position they belong to; the side only matters for lineup slots,
/// see [`crate::squad::SlotRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    GK,
    SW,
    RWB,
    RB,
    CB,
    LB,
    LWB,
    CDM,
    CM,
    CAM,
    RM,
    LM,
    CF,
    ST,
    RW,
    LW,
    Unknown,
}

/// Line of the pitch a position belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

impl Position {
    /// Parse a position abbreviation (case-insensitive)
    pub fn from_abbr(s: &str) -> Option<Self> {
        let pos = match s.trim().to_uppercase().as_str() {
            "GK" => Position::GK,
            "SW" => Position::SW,
            "RWB" => Position::RWB,
            "RB" => Position::RB,
            "CB" | "RCB" | "LCB" => Position::CB,
            "LB" => Position::LB,
            "LWB" => Position::LWB,
            "CDM" | "RDM" | "LDM" | "DM" => Position::CDM,
            "CM" | "RCM" | "LCM" => Position::CM,
            "CAM" | "RAM" | "LAM" | "AM" => Position::CAM,
            "RM" => Position::RM,
            "LM" => Position::LM,
            "CF" | "RF" | "LF" => Position::CF,
            "ST" | "RS" | "LS" => Position::ST,
            "RW" => Position::RW,
            "LW" => Position::LW,
            _ => return None,
        };
        Some(pos)
    }

    /// Map the game's numeric position code (`preferredposition1`).
    ///
    /// Codes outside the table fall back to CM.
    pub fn from_game_code(code: u8) -> Self {
        match code {
            0 => Position::GK,
            1 => Position::SW,
            2 => Position::RWB,
            3 => Position::RB,
            4..=6 => Position::CB,
            7 => Position::LB,
            8 => Position::LWB,
            9..=11 => Position::CDM,
            12 => Position::RM,
            13..=15 => Position::CM,
            16 => Position::LM,
            17..=19 => Position::CAM,
            20..=22 => Position::CF,
            23 => Position::RW,
            24..=26 => Position::ST,
            27 => Position::LW,
            _ => Position::CM,
        }
    }

    pub fn abbr(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::SW => "SW",
            Position::RWB => "RWB",
            Position::RB => "RB",
            Position::CB => "CB",
            Position::LB => "LB",
            Position::LWB => "LWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::RM => "RM",
            Position::LM => "LM",
            Position::CF => "CF",
            Position::ST => "ST",
            Position::RW => "RW",
            Position::LW => "LW",
            Position::Unknown => "?",
        }
    }

    /// Ordering used when listing bench players on a teamsheet
    pub fn sort_rank(&self) -> u16 {
        match self {
            Position::GK => 0,
            Position::CB => 1,
            Position::RB => 2,
            Position::LB => 3,
            Position::CDM => 4,
            Position::CM => 5,
            Position::CAM => 6,
            Position::RM => 7,
            Position::LM => 8,
            Position::ST => 9,
            Position::CF => 10,
            _ => 999,
        }
    }

    pub fn group(&self) -> PositionGroup {
        match self {
            Position::GK => PositionGroup::Goalkeeper,
            Position::SW
            | Position::RWB
            | Position::RB
            | Position::CB
            | Position::LB
            | Position::LWB => PositionGroup::Defense,
            Position::CDM
            | Position::CM
            | Position::CAM
            | Position::RM
            | Position::LM
            | Position::Unknown => PositionGroup::Midfield,
            Position::CF | Position::ST | Position::RW | Position::LW => PositionGroup::Attack,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

impl PositionGroup {
    pub fn short_name(&self) -> &'static str {
        match self {
            PositionGroup::Goalkeeper => "GK",
            PositionGroup::Defense => "DEF",
            PositionGroup::Midfield => "MID",
            PositionGroup::Attack => "ATT",
        }
    }
}
