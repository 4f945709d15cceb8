//! Lineup slot rules keyed by game position code

use crate::models::{Position, PositionGroup};

use Position::*;

/// What a lineup slot accepts, in preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRule {
    pub code: u8,
    pub name: &'static str,
    pub accepts: &'static [Position],
    pub group: PositionGroup,
}

const GK_ONLY: &[Position] = &[GK];
const SWEEPER: &[Position] = &[SW, CB];
const RIGHT_WING_BACK: &[Position] = &[RWB, RB, RM];
const RIGHT_BACK: &[Position] = &[RB, RWB, CB];
const CENTRE_BACK: &[Position] = &[CB];
const LEFT_BACK: &[Position] = &[LB, LWB, CB];
const LEFT_WING_BACK: &[Position] = &[LWB, LB, LM];
const HOLDING: &[Position] = &[CDM, CM, CAM];
const RIGHT_MID: &[Position] = &[RM, RW, RWB, CM];
const CENTRAL_MID: &[Position] = &[CM, CDM, CAM];
const LEFT_MID: &[Position] = &[LM, LW, LWB, CM];
const ATTACKING_MID: &[Position] = &[CAM, CM, CF];
const FORWARD: &[Position] = &[CF, ST, CAM];
const RIGHT_WING: &[Position] = &[RW, RM, ST, CAM];
const STRIKER: &[Position] = &[ST, CF, RW, LW];
const LEFT_WING: &[Position] = &[LW, LM, ST, CAM];

impl SlotRule {
    /// Rule for a game position code; `None` past LW (27)
    pub fn for_code(code: u8) -> Option<Self> {
        use PositionGroup::*;
        let (name, accepts, group) = match code {
            0 => ("GK", GK_ONLY, Goalkeeper),
            1 => ("SW", SWEEPER, Defense),
            2 => ("RWB", RIGHT_WING_BACK, Defense),
            3 => ("RB", RIGHT_BACK, Defense),
            4 => ("RCB", CENTRE_BACK, Defense),
            5 => ("CB", CENTRE_BACK, Defense),
            6 => ("LCB", CENTRE_BACK, Defense),
            7 => ("LB", LEFT_BACK, Defense),
            8 => ("LWB", LEFT_WING_BACK, Defense),
            9 => ("RDM", HOLDING, Midfield),
            10 => ("CDM", HOLDING, Midfield),
            11 => ("LDM", HOLDING, Midfield),
            12 => ("RM", RIGHT_MID, Midfield),
            13 => ("RCM", CENTRAL_MID, Midfield),
            14 => ("CM", CENTRAL_MID, Midfield),
            15 => ("LCM", CENTRAL_MID, Midfield),
            16 => ("LM", LEFT_MID, Midfield),
            17 => ("RAM", ATTACKING_MID, Midfield),
            18 => ("CAM", ATTACKING_MID, Midfield),
            19 => ("LAM", ATTACKING_MID, Midfield),
            20 => ("RF", FORWARD, Attack),
            21 => ("CF", FORWARD, Attack),
            22 => ("LF", FORWARD, Attack),
            23 => ("RW", RIGHT_WING, Attack),
            24 => ("RS", STRIKER, Attack),
            25 => ("ST", STRIKER, Attack),
            26 => ("LS", STRIKER, Attack),
            27 => ("LW", LEFT_WING, Attack),
            _ => return None,
        };
        Some(Self {
            code,
            name,
            accepts,
            group,
        })
    }

    /// Positions searched when no acceptable player is left
    pub fn fallback_order(&self) -> Vec<Position> {
        const DEFENSE: &[Position] = &[CB, RB, LB, RWB, LWB];
        const MIDFIELD: &[Position] = &[CDM, CM, CAM, RM, LM];
        const ATTACK: &[Position] = &[ST, CF, RW, LW];

        let lines: &[&[Position]] = match self.group {
            PositionGroup::Goalkeeper => &[],
            PositionGroup::Defense => &[DEFENSE, MIDFIELD],
            PositionGroup::Midfield => &[MIDFIELD, DEFENSE, ATTACK],
            PositionGroup::Attack => &[ATTACK, MIDFIELD],
        };
        lines.iter().flat_map(|l| l.iter().copied()).collect()
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.group == PositionGroup::Goalkeeper
    }
}
